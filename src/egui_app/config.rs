use std::path::Path;
use std::time::Duration;

use tracing::warn;

use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError};

/// Runtime configuration handed to the controllers.
#[derive(Debug, Clone)]
pub struct Config {
    app: AppConfig,
}

impl Default for Config {
    fn default() -> Self {
        let app = AppConfig::load().unwrap_or_else(|e| {
            warn!(error = %e, "falling back to default configuration");
            AppConfig::default()
        });
        Self { app }
    }
}

impl Config {
    /// Load from the config file and environment
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        let app = builder.build()?;
        Ok(Self { app })
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.server_url(), path)
    }

    pub fn server_url(&self) -> &str {
        &self.app.server_url
    }

    /// CSRF token for onboarding requests, if one was configured or fetched
    pub fn csrf_token(&self) -> Option<&str> {
        self.app.csrf_token.as_deref()
    }

    pub fn set_csrf_token(&mut self, token: Option<String>) {
        self.app.csrf_token = token.filter(|t| !t.is_empty());
    }

    pub fn data_dir(&self) -> &Path {
        &self.app.data_dir
    }

    pub fn debounce(&self) -> Duration {
        self.app.debounce
    }

    pub fn redirect_delay(&self) -> Duration {
        self.app.redirect_delay
    }

    pub fn notification_ttl(&self) -> Duration {
        self.app.notification_ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::with_builder(AppConfig::builder().server_url("http://127.0.0.1:5000")).unwrap()
    }

    #[test]
    fn test_api_url() {
        let url = config().api_url("/api/login");
        assert_eq!(url, "http://127.0.0.1:5000/api/login");
    }

    #[test]
    fn test_set_csrf_token() {
        let mut config = config();
        assert!(config.csrf_token().is_none());
        config.set_csrf_token(Some("abc".to_string()));
        assert_eq!(config.csrf_token(), Some("abc"));
        config.set_csrf_token(Some(String::new()));
        assert!(config.csrf_token().is_none());
    }
}
