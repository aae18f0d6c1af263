//! API Wire Types
//!
//! Endpoint paths and the JSON request/response bodies exchanged with the
//! backend. Response types are lenient: every field the backend may omit is
//! optional or defaulted, because error bodies and success bodies share a
//! shape on most endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub mod endpoints {
    pub const LOGIN: &str = "/api/login";
    pub const LOGOUT: &str = "/api/logout";
    pub const REGISTER: &str = "/api/register";
    pub const FORGOT_PASSWORD: &str = "/api/forgot-password";
    pub const RESEND_VERIFICATION: &str = "/api/resend-verification";
    pub const VALIDATE_EMAIL: &str = "/api/validate-email";
    pub const VALIDATE_USERNAME: &str = "/api/validate-username";
    pub const ONBOARDING_COMPLETE: &str = "/api/onboarding/complete";
    pub const USER_SETTINGS: &str = "/api/user/settings";
    pub const CSRF_TOKEN: &str = "/api/csrf-token";
}

/// Login body. Exactly one of `username` / `email` is set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub password: String,
}

impl LoginRequest {
    /// An identifier containing `@` is sent as an email, anything else as a username.
    pub fn from_identifier(identifier: &str, password: &str) -> Self {
        let identifier = identifier.trim().to_string();
        if identifier.contains('@') {
            Self {
                username: None,
                email: Some(identifier),
                password: password.to_string(),
            }
        } else {
            Self {
                username: Some(identifier),
                email: None,
                password: password.to_string(),
            }
        }
    }

    pub fn is_email(&self) -> bool {
        self.email.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmailRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UsernameRequest {
    pub username: String,
}

/// Minimal user object returned by registration/onboarding
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RegisteredUser {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Common reply body for login, registration, onboarding and the email endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ApiReply {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub email_verification_required: bool,
    /// Set to `false` by backends that signal verification this way on 403
    #[serde(default)]
    pub email_verified: Option<bool>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user: Option<RegisteredUser>,
}

impl ApiReply {
    /// Verification flag, accepting either wire spelling.
    pub fn requires_verification(&self) -> bool {
        self.email_verification_required || self.email_verified == Some(false)
    }

    /// Email the verification mail was sent to, from `user.email` or `email`.
    pub fn verification_email(&self) -> Option<&str> {
        self.user
            .as_ref()
            .and_then(|u| u.email.as_deref())
            .or(self.email.as_deref())
            .filter(|e| !e.is_empty())
    }

    /// Non-empty token, if any
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    /// Non-empty message, if any
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }
}

/// HTTP status paired with the best-effort parsed body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: ApiReply,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Uniqueness check reply. The backend has answered both `{exists}` and
/// `{available}` over time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExistsResponse {
    #[serde(default)]
    pub exists: Option<bool>,
    #[serde(default)]
    pub available: Option<bool>,
}

impl ExistsResponse {
    pub fn is_taken(&self) -> bool {
        match (self.exists, self.available) {
            (Some(exists), _) => exists,
            (None, Some(available)) => !available,
            (None, None) => false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CsrfTokenResponse {
    pub csrf_token: String,
}

/// `GET /api/user/settings`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserSettings {
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Body of a failed authorized request
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
