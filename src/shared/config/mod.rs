//! Application configuration module
//!
//! Provides configuration types for the client. Values come from, in order of
//! precedence: environment variables, an optional TOML file, built-in defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Default backend URL (the Flask development server)
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
/// Debounce window for uniqueness checks
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
/// Cosmetic delay before redirecting after a successful login
pub const DEFAULT_REDIRECT_DELAY_MS: u64 = 1000;
/// How long a notification toast stays visible
pub const DEFAULT_NOTIFICATION_TTL_MS: u64 = 5000;

const ENV_API_URL: &str = "STEWARD_API_URL";
const ENV_CSRF_TOKEN: &str = "STEWARD_CSRF_TOKEN";
const ENV_DATA_DIR: &str = "STEWARD_DATA_DIR";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Backend base URL, without trailing slash
    pub server_url: String,
    /// CSRF token sent as `X-CSRFToken` on onboarding requests
    pub csrf_token: Option<String>,
    /// Directory holding the persistent client storage
    pub data_dir: PathBuf,
    pub debounce: Duration,
    pub redirect_delay: Duration,
    pub notification_ttl: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            csrf_token: None,
            data_dir: default_data_dir(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            redirect_delay: Duration::from_millis(DEFAULT_REDIRECT_DELAY_MS),
            notification_ttl: Duration::from_millis(DEFAULT_NOTIFICATION_TTL_MS),
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration: defaults, then the TOML file if present, then env.
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = match default_config_file() {
            Some(path) if path.exists() => AppConfigBuilder::from_toml_file(&path)?,
            _ => AppConfigBuilder::default(),
        };
        builder = builder.with_env_overrides();
        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.server_url.starts_with("http://") || self.server_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(self.server_url.clone()));
        }
        if self.debounce.is_zero() {
            return Err(ConfigError::InvalidValue("debounce_ms must be greater than zero"));
        }
        Ok(())
    }
}

/// On-disk representation, every key optional
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    server_url: Option<String>,
    csrf_token: Option<String>,
    data_dir: Option<PathBuf>,
    debounce_ms: Option<u64>,
    redirect_delay_ms: Option<u64>,
    notification_ttl_ms: Option<u64>,
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    server_url: Option<String>,
    csrf_token: Option<String>,
    data_dir: Option<PathBuf>,
    debounce_ms: Option<u64>,
    redirect_delay_ms: Option<u64>,
    notification_ttl_ms: Option<u64>,
}

impl AppConfigBuilder {
    /// Parse a TOML document into a builder
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let file: FileConfig =
            toml::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Ok(Self {
            server_url: file.server_url,
            csrf_token: file.csrf_token,
            data_dir: file.data_dir,
            debounce_ms: file.debounce_ms,
            redirect_delay_ms: file.redirect_delay_ms,
            notification_ttl_ms: file.notification_ttl_ms,
        })
    }

    /// Read and parse a TOML config file
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&raw)
    }

    /// Apply `STEWARD_*` environment variables on top of the current values
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(ENV_API_URL) {
            self.server_url = Some(url);
        }
        if let Ok(token) = std::env::var(ENV_CSRF_TOKEN) {
            self.csrf_token = Some(token);
        }
        if let Ok(dir) = std::env::var(ENV_DATA_DIR) {
            self.data_dir = Some(PathBuf::from(dir));
        }
        self
    }

    /// Set the server URL
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    pub fn csrf_token(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = Some(token.into());
        self
    }

    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    pub fn debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = Some(ms);
        self
    }

    pub fn redirect_delay_ms(mut self, ms: u64) -> Self {
        self.redirect_delay_ms = Some(ms);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            server_url: self
                .server_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.server_url),
            csrf_token: self.csrf_token.filter(|t| !t.is_empty()),
            data_dir: self.data_dir.unwrap_or(defaults.data_dir),
            debounce: self
                .debounce_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.debounce),
            redirect_delay: self
                .redirect_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.redirect_delay),
            notification_ttl: self
                .notification_ttl_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.notification_ttl),
        };
        config.validate()?;
        Ok(config)
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("steward")
}

fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("steward").join("config.toml"))
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("invalid value: {0}")]
    InvalidValue(&'static str),
    #[error("failed to parse config: {0}")]
    Parse(String),
    #[error("failed to read config: {0}")]
    Io(String),
}
