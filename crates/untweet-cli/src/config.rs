//! Settings file loading and validation.

use crate::error::{CliError, Result};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use untweet_client::{Credentials, TwitterClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use untweet_janitor::{JanitorConfig, RunMode, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Contents of the settings file.
///
/// ```toml
/// [api]
/// api_key = "..."
/// api_secret_key = "..."
/// access_token = "..."
/// access_token_secret = "..."
///
/// [settings]
/// screen_name = "someone"
/// archive_path = "./archive"
/// max_age = 30
/// min_count = 20
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// API credentials and connection options
    pub api: ApiSettings,

    /// What to prune and where to archive it
    pub settings: UserSettings,
}

/// API credentials and connection options.
#[derive(Clone, Deserialize)]
pub struct ApiSettings {
    /// Consumer key
    pub api_key: String,

    /// Consumer secret
    pub api_secret_key: String,

    /// User access token
    pub access_token: String,

    /// User access token secret
    pub access_token_secret: String,

    /// API root
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Pruning options.
#[derive(Debug, Clone, Deserialize)]
pub struct UserSettings {
    /// Account to prune
    pub screen_name: String,

    /// Directory receiving the snapshot, archives and log
    pub archive_path: PathBuf,

    /// Posts strictly older than this many days are deleted
    pub max_age: u32,

    /// Number of most recent posts that are always kept
    #[serde(default)]
    pub min_count: usize,

    /// Posts requested per timeline call
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiSettings")
            .field("api_key", &"<redacted>")
            .field("api_secret_key", &"<redacted>")
            .field("access_token", &"<redacted>")
            .field("access_token_secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Require an absolute http(s) URL with a host.
fn validate_base_url(base_url: &str) -> Result<()> {
    let invalid = |reason: String| {
        CliError::Config(format!(
            "api.base_url must be an http(s) URL with a host, got {:?}: {}",
            base_url, reason
        ))
    };

    let parsed = url::Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme {}", other))),
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }
    Ok(())
}

impl Settings {
    /// Load and validate a settings file.
    ///
    /// Files ending in `.json` are parsed as JSON, anything else as TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Could not read settings file {}: {}", path.display(), e))
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let settings = if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_toml_str(&contents)
        }
        .map_err(|e| match e {
            CliError::Config(message) => {
                CliError::Config(format!("{}: {}", path.display(), message))
            }
            other => other,
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Parse TOML settings without validating them.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| CliError::Config(e.message().to_string()))
    }

    /// Parse JSON settings without validating them.
    pub fn from_json_str(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).map_err(|e| CliError::Config(e.to_string()))
    }

    /// Check every field, naming the first offending key.
    pub fn validate(&self) -> Result<()> {
        let api = &self.api;
        let required = [
            ("api.api_key", &api.api_key),
            ("api.api_secret_key", &api.api_secret_key),
            ("api.access_token", &api.access_token),
            ("api.access_token_secret", &api.access_token_secret),
            ("settings.screen_name", &self.settings.screen_name),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(CliError::Config(format!("{} must not be empty", key)));
            }
        }

        validate_base_url(&api.base_url)?;
        if api.timeout_secs == 0 {
            return Err(CliError::Config(
                "api.timeout_secs must be greater than 0".to_string(),
            ));
        }

        let user = &self.settings;
        if !user.archive_path.is_dir() {
            return Err(CliError::Config(format!(
                "settings.archive_path {} does not exist or is not a directory",
                user.archive_path.display()
            )));
        }
        if !(2..=MAX_PAGE_SIZE).contains(&user.page_size) {
            return Err(CliError::Config(format!(
                "settings.page_size must be between 2 and {}, got {}",
                MAX_PAGE_SIZE, user.page_size
            )));
        }

        Ok(())
    }

    /// Pipeline configuration for the given mode.
    pub fn janitor_config(&self, mode: RunMode) -> JanitorConfig {
        let user = &self.settings;
        JanitorConfig::new(&user.screen_name, &user.archive_path, user.max_age)
            .with_min_count(user.min_count)
            .with_page_size(user.page_size)
            .with_mode(mode)
    }

    /// OAuth credentials for the API client.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            &self.api.api_key,
            &self.api.api_secret_key,
            &self.api.access_token,
            &self.api.access_token_secret,
        )
    }

    /// API client built from these settings.
    pub fn client(&self) -> Result<TwitterClient> {
        Ok(TwitterClient::with_options(
            self.credentials(),
            &self.api.base_url,
            Duration::from_secs(self.api.timeout_secs),
        )?)
    }
}
