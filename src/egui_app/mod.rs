//! egui Native Desktop App Module
//!
//! The Steward client's presentation layer: session handling, the backend
//! API client, the auth and onboarding flows and the egui views that render
//! them.
//!
//! # Architecture
//!
//! - **`config`** - Runtime configuration (server URL, CSRF token, timings)
//! - **`session`** - Persistent client storage and the bearer token
//! - **`api_client`** - Async reqwest client for every backend endpoint
//! - **`auth`** - Login, registration, forgot-password and resend handlers
//! - **`onboarding`** - Pure wizard state machine plus its tokio driver
//! - **`settings`** - User settings context (currency)
//! - **`modal`**, **`navigation`**, **`notification`** - UI chrome state
//! - **`state`** - `AppState`, the owner of all of the above
//! - **`views`**, **`theme`** - egui rendering
//!
//! Network calls run on the tokio runtime owned by [`AppState`] and report
//! back through channels drained once per frame, so UI state is only touched
//! on the UI thread.

pub mod api_client;
pub mod auth;
pub mod config;
pub mod modal;
pub mod navigation;
pub mod notification;
pub mod onboarding;
pub mod session;
pub mod settings;
pub mod state;
pub mod theme;
pub mod views;

// Re-export commonly used types
pub use api_client::ApiClient;
pub use auth::{AuthOutcome, AuthState, LoginForm, RegisterForm};
pub use config::Config;
pub use navigation::{NavState, Route};
pub use onboarding::OnboardingController;
pub use session::{ClientStorage, SessionStore};
pub use settings::SettingsContext;
pub use state::AppState;
