//! Shared Error Types
//!
//! This module defines the error type returned by every fallible operation in
//! the client: storage access, configuration, HTTP calls and form validation.
//!
//! # Error Categories
//!
//! - `Validation` - A form field failed a client-side check
//! - `SessionExpired` - The backend answered 401 on an authorized request
//! - `Server` - The backend answered with a non-2xx status
//! - `Network` - The request never produced a response
//! - `Serialization` - JSON encoding/decoding failures
//! - `Storage` - Reading or writing the persistent client storage failed
//! - `Config` - Configuration could not be loaded or is invalid
//!
//! # Usage
//!
//! ```rust
//! use steward::shared::error::ClientError;
//!
//! let error = ClientError::validation("email", "Please enter a valid email address");
//! assert_eq!(error.user_message(), "Please enter a valid email address");
//! ```
use thiserror::Error;

use crate::shared::config::ConfigError;

/// Errors produced by the client presentation layer
#[derive(Debug, Error, Clone)]
pub enum ClientError {
    /// Client-side validation failure, reported next to the field
    #[error("Validation error in field '{field}': {message}")]
    Validation {
        /// Form key of the offending field
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// The bearer token was rejected; the stored token has been cleared
    #[error("Session expired")]
    SessionExpired,

    /// Non-2xx response from the backend
    #[error("Server error {status}: {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Message extracted from the JSON body, or a generic fallback
        message: String,
    },

    /// Transport failure (connection refused, DNS, TLS, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    Serialization {
        /// Human-readable error message
        message: String,
    },

    /// Persistent client storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new server error
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Text suitable for a notification or inline error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message, .. } | Self::Server { message, .. } => message.clone(),
            Self::SessionExpired => "Your session has expired. Please log in again.".to_string(),
            Self::Network(_) => {
                "Network error. Please check your connection and try again.".to_string()
            }
            Self::Serialization { .. } | Self::Storage(_) | Self::Config(_) => {
                "An error occurred".to_string()
            }
        }
    }

    /// Whether this error came from the transport rather than the backend.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::serialization(format!("Invalid response body: {}", err))
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<ConfigError> for ClientError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
