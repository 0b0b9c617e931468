use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use super::context::{Credentials, RequestContext};
use super::pagination::PageLimit;
use crate::constants::{API_KEY_HEADER, DEFAULT_TIMEOUT_SECS};
use crate::error::{TransportError, TwingateError, TwingateResult};

/// Variables object sent alongside a query.
pub type Variables = Map<String, Value>;

/// Longest slice of a non-JSON error body kept in a transport error.
const MAX_ERROR_BODY: usize = 512;

/// Message used when no error entry carries text.
const UNSPECIFIED_ERROR: &str = "GraphQL request failed without an error message";

/// Sends authenticated GraphQL requests to the Twingate admin API.
#[derive(Debug, Clone)]
pub struct GraphQLClient {
    http: Client,
    endpoint: Option<String>,
    pub(crate) page_limit: Option<PageLimit>,
}

impl GraphQLClient {
    pub fn new() -> TwingateResult<Self> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> TwingateResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TwingateError::ConfigError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: None,
            page_limit: Some(PageLimit::default()),
        })
    }

    /// Send every request to `url` instead of the subdomain endpoint.
    /// Meant for pointing the client at a local mock server.
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = Some(url.into());
        self
    }

    /// Cap on pages fetched by [`GraphQLClient::fetch_all`]. `None` removes the cap.
    pub fn with_page_limit(mut self, limit: Option<PageLimit>) -> Self {
        self.page_limit = limit;
        self
    }

    pub fn endpoint_for(&self, credentials: &Credentials) -> String {
        match &self.endpoint {
            Some(url) => url.clone(),
            None => credentials.endpoint(),
        }
    }

    /// Execute one GraphQL request and return its `data` object.
    ///
    /// A non-empty `errors` list always fails with [`TwingateError::GraphQLApi`], even when
    /// `data` is also present. Nothing is retried.
    pub async fn execute(
        &self,
        query: &str,
        variables: &Variables,
        ctx: RequestContext<'_>,
    ) -> TwingateResult<Map<String, Value>> {
        let url = self.endpoint_for(ctx.credentials);
        let request_body = GraphQLRequest { query, variables };

        debug!(
            subdomain = %ctx.credentials.subdomain,
            item_index = ctx.item_index,
            variables = variables.len(),
            "sending GraphQL request"
        );

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &ctx.credentials.api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| TwingateError::transport(e, ctx.item_index))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TwingateError::transport(e, ctx.item_index))?;

        let raw: Value = match serde_json::from_slice(&bytes) {
            Ok(raw) => raw,
            Err(e) if status.is_success() => return Err(TwingateError::transport(e, ctx.item_index)),
            Err(_) => {
                return Err(TwingateError::transport(
                    TransportError::Status {
                        status,
                        body: truncate_body(&String::from_utf8_lossy(&bytes)),
                    },
                    ctx.item_index,
                ))
            }
        };

        let envelope = GraphQLResponse::deserialize(&raw)
            .map_err(|e| TwingateError::transport(e, ctx.item_index))?;

        if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
            let message = error_message(&errors);
            debug!(item_index = ctx.item_index, %message, "GraphQL request returned errors");
            return Err(TwingateError::GraphQLApi {
                message,
                envelope: raw,
                item_index: ctx.item_index,
            });
        }

        if !status.is_success() {
            return Err(TwingateError::transport(
                TransportError::Status {
                    status,
                    body: truncate_body(&raw.to_string()),
                },
                ctx.item_index,
            ));
        }

        match envelope.data {
            Some(Value::Object(data)) => Ok(data),
            None | Some(Value::Null) => Ok(Map::new()),
            Some(other) => Err(TwingateError::malformed(
                format!("expected `data` to be an object, got {}", json_type(&other)),
                ctx.item_index,
            )),
        }
    }
}

/// Messages of every error entry, joined. Entries without a text message are skipped.
fn error_message(errors: &[Value]) -> String {
    let messages: Vec<&str> = errors
        .iter()
        .filter_map(|e| e.get("message").and_then(Value::as_str))
        .filter(|m| !m.is_empty())
        .collect();

    if messages.is_empty() {
        UNSPECIFIED_ERROR.to_string()
    } else {
        messages.join(", ")
    }
}

fn truncate_body(body: &str) -> String {
    if body.chars().count() <= MAX_ERROR_BODY {
        body.to_string()
    } else {
        let head: String = body.chars().take(MAX_ERROR_BODY).collect();
        format!("{}...", head)
    }
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Debug, Serialize)]
struct GraphQLRequest<'a> {
    query: &'a str,
    variables: &'a Variables,
}

#[derive(Debug, Deserialize)]
struct GraphQLResponse {
    #[serde(default)]
    data: Option<Value>,
    // raw entries; `message` is not guaranteed to be a string
    #[serde(default)]
    errors: Option<Vec<Value>>,
}
