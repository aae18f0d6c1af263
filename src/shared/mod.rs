//! Shared Module
//!
//! Platform-agnostic pieces of the client: wire types, error taxonomy,
//! configuration and the pure validation/formatting helpers. Nothing in here
//! touches the UI or performs I/O beyond reading the config file.

/// API endpoint paths and wire types
pub mod api;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Field validators and password policy
pub mod validation;

/// Currency and date formatting
pub mod format;

/// Re-export commonly used types for convenience
pub use api::{ApiReply, ApiResponse, LoginRequest, UserSettings};
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::ClientError;
