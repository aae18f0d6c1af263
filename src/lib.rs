//! Steward - Client Library
//!
//! Steward is a personal-finance budgeting application. This crate is its
//! native client: everything between the user and the backend's JSON API.
//!
//! # Module Structure
//!
//! - **`shared`** - Platform-agnostic pieces
//!   - Wire types and endpoint paths
//!   - Error taxonomy and configuration
//!   - Field validators, password policy, currency/date formatting
//!
//! - **`egui_app`** - Native desktop app (egui/eframe)
//!   - Session token storage and the authorized API client
//!   - Login/registration modal and the onboarding wizard
//!   - Navigation chrome, modals and toast notifications
//!
//! # Usage
//!
//! ```rust,no_run
//! use steward::egui_app::{ApiClient, Config, SessionStore};
//! use steward::shared::api::LoginRequest;
//!
//! # async fn example() -> Result<(), steward::shared::ClientError> {
//! let api = ApiClient::new(Config::new(), SessionStore::in_memory());
//! let response = api.login(&LoginRequest::from_identifier("alice", "S3cret!pw")).await?;
//! println!("login answered {}", response.status);
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Fallible operations return `Result<T, shared::error::ClientError>`.
//! Controllers turn errors into the user-facing messages shown in the UI.

/// Shared types and data structures
pub mod shared;

/// egui native desktop app
#[cfg(not(target_arch = "wasm32"))]
pub mod egui_app;
