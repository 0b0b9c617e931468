use std::path::PathBuf;
use std::sync::Arc;

use crate::client::{Credentials, GraphQLClient};
use crate::config::{config_path, load_config_from, resolve_credentials, save_config_to, Config};
use crate::constants::{API_KEY_ENV, SUBDOMAIN_ENV};
use crate::error::{TwingateError, TwingateResult};

/// Central context for CLI operations, holding the configuration, credentials and client
pub struct CliContext {
    config: Config,
    config_path: Option<PathBuf>,
    credentials: Option<Credentials>,
    client: Option<Arc<GraphQLClient>>,
}

impl CliContext {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            config_path: None,
            credentials: None,
            client: None,
        }
    }

    /// Load context from the config file in the home directory and the environment
    pub fn load() -> TwingateResult<Self> {
        Self::load_from(config_path()?)
    }

    pub fn load_from(path: PathBuf) -> TwingateResult<Self> {
        let config = load_config_from(&path)?;
        let credentials = resolve_credentials(
            &config,
            std::env::var(SUBDOMAIN_ENV).ok(),
            std::env::var(API_KEY_ENV).ok(),
        )
        .ok();

        Ok(Self {
            config,
            config_path: Some(path),
            credentials,
            client: None,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn credentials(&self) -> TwingateResult<&Credentials> {
        self.credentials.as_ref().ok_or(TwingateError::CredentialsNotFound)
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Shared client, built from the config on first use
    pub fn client(&mut self) -> TwingateResult<Arc<GraphQLClient>> {
        if let Some(client) = &self.client {
            return Ok(client.clone());
        }

        let client = Arc::new(self.config.client()?);
        self.client = Some(client.clone());
        Ok(client)
    }

    /// Store new credentials in the config file and use them from now on
    pub fn set_credentials(&mut self, credentials: Credentials) -> TwingateResult<()> {
        let path = match &self.config_path {
            Some(path) => path.clone(),
            None => config_path()?,
        };

        self.config.subdomain = Some(credentials.subdomain.clone());
        self.config.api_key = Some(credentials.api_key.clone());
        save_config_to(&self.config, &path)?;

        self.config_path = Some(path);
        self.credentials = Some(credentials);
        Ok(())
    }
}

impl Default for CliContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder pattern for creating CLI contexts with specific configurations
pub struct CliContextBuilder {
    credentials: Option<Credentials>,
    config_path: Option<PathBuf>,
}

impl CliContextBuilder {
    pub fn new() -> Self {
        Self {
            credentials: None,
            config_path: None,
        }
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    pub fn build(self) -> TwingateResult<CliContext> {
        let mut context = match self.config_path {
            Some(path) => CliContext::load_from(path)?,
            None if self.credentials.is_some() => CliContext::new(),
            None => CliContext::load()?,
        };

        if let Some(credentials) = self.credentials {
            context.credentials = Some(credentials);
        }

        Ok(context)
    }
}

impl Default for CliContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
