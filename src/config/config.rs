use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::client::{Credentials, GraphQLClient, PageLimit};
use crate::constants::{CONFIG_FILE, DEFAULT_MAX_PAGES, DEFAULT_TIMEOUT_SECS};
use crate::error::{TwingateError, TwingateResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub subdomain: Option<String>,
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Page cap for `returnAll` listings; 0 disables the cap.
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_pages() -> usize {
    DEFAULT_MAX_PAGES
}

impl Default for Config {
    fn default() -> Self {
        Config {
            subdomain: None,
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl Config {
    pub fn page_limit(&self) -> Option<PageLimit> {
        match self.max_pages {
            0 => None,
            n => Some(PageLimit::new(n)),
        }
    }

    /// HTTP client configured with this file's timeout and page cap.
    pub fn client(&self) -> TwingateResult<GraphQLClient> {
        Ok(GraphQLClient::with_timeout(Duration::from_secs(self.timeout_secs))?
            .with_page_limit(self.page_limit()))
    }
}

pub fn config_path() -> TwingateResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| TwingateError::ConfigError("Could not find home directory".to_string()))?;
    Ok(home_dir.join(CONFIG_FILE))
}

/// A missing file is an empty config; an unreadable or invalid one is an error.
pub fn load_config_from(path: &Path) -> TwingateResult<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let config_str = fs::read_to_string(path)?;
    serde_json::from_str(&config_str)
        .map_err(|e| TwingateError::ConfigError(format!("{}: {}", path.display(), e)))
}

pub fn save_config_to(config: &Config, path: &Path) -> TwingateResult<()> {
    let config_str = serde_json::to_string_pretty(config)?;

    // the file holds an API key
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;

    // an existing file keeps its old mode on open
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    file.write_all(config_str.as_bytes())?;
    Ok(())
}

/// Each environment value, when set and non-blank, wins over the stored one.
pub fn resolve_credentials(
    config: &Config,
    env_subdomain: Option<String>,
    env_api_key: Option<String>,
) -> TwingateResult<Credentials> {
    let pick = |env_value: Option<String>, stored: &Option<String>| {
        env_value
            .filter(|v| !v.trim().is_empty())
            .or_else(|| stored.clone().filter(|v| !v.trim().is_empty()))
    };

    match (
        pick(env_subdomain, &config.subdomain),
        pick(env_api_key, &config.api_key),
    ) {
        (Some(subdomain), Some(api_key)) => Credentials::new(subdomain, api_key),
        _ => Err(TwingateError::CredentialsNotFound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn stored() -> Config {
        Config {
            subdomain: Some("acme".to_string()),
            api_key: Some("stored-key-123456".to_string()),
            ..Config::default()
        }
    }

    #[test]
    fn missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = load_config_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let config = Config {
            timeout_secs: 5,
            max_pages: 20,
            ..stored()
        };

        save_config_to(&config, &path).unwrap();
        assert_eq!(load_config_from(&path).unwrap(), config);
    }

    #[cfg(unix)]
    #[test]
    fn saved_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        save_config_to(&stored(), &path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn overwriting_a_readable_file_makes_it_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{}").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        save_config_to(&stored(), &path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(load_config_from(&path).unwrap(), stored());
    }

    #[test]
    fn older_files_get_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"subdomain": "acme", "api_key": null}"#).unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.subdomain.as_deref(), Some("acme"));
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.max_pages, DEFAULT_MAX_PAGES);
    }

    #[test]
    fn invalid_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(load_config_from(&path), Err(TwingateError::ConfigError(_))));
    }

    #[test]
    fn environment_wins_per_field() {
        let creds = resolve_credentials(&stored(), None, Some("env-key-abcdef".to_string())).unwrap();
        assert_eq!(creds.subdomain, "acme");
        assert_eq!(creds.api_key, "env-key-abcdef");

        let creds = resolve_credentials(&stored(), Some("  ".to_string()), None).unwrap();
        assert_eq!(creds.subdomain, "acme");
    }

    #[test]
    fn missing_credentials() {
        let err = resolve_credentials(&Config::default(), Some("acme".to_string()), None).unwrap_err();
        assert!(matches!(err, TwingateError::CredentialsNotFound));
    }

    #[test]
    fn zero_max_pages_removes_cap() {
        let config = Config {
            max_pages: 0,
            ..Config::default()
        };
        assert_eq!(config.page_limit(), None);
        assert_eq!(Config::default().page_limit(), Some(PageLimit::new(DEFAULT_MAX_PAGES)));
    }
}
