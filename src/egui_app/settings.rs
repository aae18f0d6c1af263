//! User settings context.
//!
//! Loaded once per session from `GET /api/user/settings`. Pages read the
//! currency from here; if loading fails the context falls back to USD.

use tracing::{info, warn};

use crate::egui_app::api_client::ApiClient;
use crate::egui_app::navigation::Route;
use crate::shared::api::UserSettings;
use crate::shared::error::ClientError;
use crate::shared::format::{format_currency, DEFAULT_CURRENCY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    NotLoaded,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct SettingsContext {
    status: LoadStatus,
    settings: Option<UserSettings>,
}

impl SettingsContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    /// Whether a load should be started. Loading happens once per session.
    pub fn needs_load(&self) -> bool {
        self.status == LoadStatus::NotLoaded
    }

    pub fn begin_loading(&mut self) {
        self.status = LoadStatus::Loading;
    }

    pub fn settings(&self) -> Option<&UserSettings> {
        self.settings.as_ref()
    }

    /// Currency code, `USD` until settings say otherwise
    pub fn currency(&self) -> &str {
        self.settings
            .as_ref()
            .and_then(|s| s.currency.as_deref())
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(DEFAULT_CURRENCY)
    }

    pub fn format_amount(&self, amount: f64) -> String {
        format_currency(amount, self.currency())
    }

    /// Apply a finished load. Returns the route to redirect to when the session
    /// turned out to be expired.
    pub fn apply(&mut self, result: Result<UserSettings, ClientError>) -> Option<Route> {
        match result {
            Ok(settings) => {
                info!(currency = ?settings.currency, "user settings loaded");
                self.settings = Some(settings);
                self.status = LoadStatus::Loaded;
                None
            }
            Err(ClientError::SessionExpired) => {
                self.reset();
                Some(Route::Entry)
            }
            Err(e) => {
                warn!(error = %e, "failed to load user settings, using {}", DEFAULT_CURRENCY);
                self.settings = None;
                self.status = LoadStatus::Failed;
                None
            }
        }
    }

    /// Forget everything, e.g. on logout
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

pub async fn load_settings(api: &ApiClient) -> Result<UserSettings, ClientError> {
    api.user_settings().await
}
