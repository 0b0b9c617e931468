use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::constants::{GRAPHQL_PATH, TWINGATE_DOMAIN};
use crate::error::{TwingateError, TwingateResult};

lazy_static! {
    // a single DNS label
    static ref SUBDOMAIN: Regex = Regex::new(r"^[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?$").unwrap();
}

/// Subdomain and API key of one Twingate network.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub subdomain: String,
    pub api_key: String,
}

impl Credentials {
    pub fn new(subdomain: impl Into<String>, api_key: impl Into<String>) -> TwingateResult<Self> {
        let subdomain = subdomain.into().trim().to_string();
        let api_key = api_key.into().trim().to_string();

        if subdomain.is_empty() {
            return Err(TwingateError::InvalidInput("subdomain must not be empty".to_string()));
        }
        if !SUBDOMAIN.is_match(&subdomain) {
            return Err(TwingateError::InvalidInput(format!(
                "subdomain '{}' must be a single DNS label, e.g. 'acme' for acme.twingate.com",
                subdomain
            )));
        }
        if api_key.is_empty() {
            return Err(TwingateError::InvalidInput("API key must not be empty".to_string()));
        }

        Ok(Self { subdomain, api_key })
    }

    /// `https://{subdomain}.twingate.com/api/graphql/`
    pub fn endpoint(&self) -> String {
        format!("https://{}.{}{}", self.subdomain, TWINGATE_DOMAIN, GRAPHQL_PATH)
    }

    /// Key with everything but the first and last four characters hidden.
    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() <= 8 {
            return "*".repeat(chars.len());
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("subdomain", &self.subdomain)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Per-call context handed to the executor: who to authenticate as and which
/// batch item the call belongs to.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'a> {
    pub credentials: &'a Credentials,
    pub item_index: usize,
}

impl<'a> RequestContext<'a> {
    pub fn new(credentials: &'a Credentials) -> Self {
        Self {
            credentials,
            item_index: 0,
        }
    }

    pub fn for_item(credentials: &'a Credentials, item_index: usize) -> Self {
        Self {
            credentials,
            item_index,
        }
    }
}
