/**
 * Authentication Module
 *
 * Login, registration, forgot-password and resend-verification handlers.
 * Each handler validates its form, issues at most one request and maps the
 * backend's answer to an outcome the UI can render.
 */

use std::collections::BTreeMap;

use tracing::{error, info, warn};

use crate::egui_app::api_client::ApiClient;
use crate::shared::api::{ApiResponse, LoginRequest, RegisterRequest};
use crate::shared::validation::{is_valid_email, is_valid_username, validate_new_password};

pub const INVALID_CREDENTIALS: &str =
    "Invalid username or password. Please check your credentials and try again.";
pub const FILL_ALL_FIELDS: &str = "Please fill in all fields";
pub const LOGIN_SUCCESS: &str = "Login successful!";
const LOGIN_FAILED: &str = "Login failed. Please try again.";
const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";
const REGISTRATION_VERIFY: &str =
    "Registration successful! Please check your email to verify your account.";
const VERIFY_BEFORE_LOGIN: &str =
    "Please verify your email before logging in. Check your inbox for the verification email.";
pub const RESEND_SUCCESS: &str = "Verification email sent successfully! Please check your inbox.";
const RESEND_FAILED: &str = "Error sending verification email. Please try again.";
pub const FORGOT_EMAIL_REQUIRED: &str = "Please enter your email address";
const FORGOT_FAILED: &str = "Error sending reset email. Please try again.";
const FORGOT_DEFAULT: &str =
    "If an account with that email exists, a password reset link has been sent.";

/// Field key → message. The `form` key holds errors not tied to one field.
pub type FormErrors = BTreeMap<&'static str, String>;

/// Which panel the auth modal shows
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AuthPanel {
    #[default]
    LoginForm,
    /// "Verify your email" panel with a resend action
    Verification {
        message: String,
        email: Option<String>,
    },
}

/// Authentication state
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub error: Option<String>,
    pub field_errors: FormErrors,
    pub loading: bool,
    pub panel: AuthPanel,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
        self.field_errors.clear();
    }

    pub fn set_error(&mut self, error: String) {
        self.error = Some(error);
    }

    pub fn show_verification(&mut self, message: String, email: Option<String>) {
        self.panel = AuthPanel::Verification { message, email };
    }

    /// Leave the verification panel and re-show the login form
    pub fn back_to_login(&mut self) {
        self.panel = AuthPanel::LoginForm;
    }

    /// Apply a finished submission to the state
    pub fn apply(&mut self, outcome: &AuthOutcome) {
        self.loading = false;
        self.clear_error();
        match outcome {
            AuthOutcome::Invalid(errors) => {
                self.error = errors.get("form").cloned();
                self.field_errors = errors.clone();
            }
            AuthOutcome::LoggedIn => {}
            AuthOutcome::InvalidCredentials(message) | AuthOutcome::Failed(message) => {
                self.error = Some(message.clone());
            }
            AuthOutcome::VerificationRequired { message, email } => {
                self.show_verification(message.clone(), email.clone());
            }
        }
    }
}

/// Result of submitting the login or registration form
#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    /// Rejected client-side; nothing was sent
    Invalid(FormErrors),
    /// Token stored; redirect to the dashboard after the configured delay
    LoggedIn,
    /// 401: generic credential error, form stays populated
    InvalidCredentials(String),
    /// 403 + verification flag, or registration pending verification
    VerificationRequired {
        message: String,
        email: Option<String>,
    },
    /// Any other failure, with the message to surface
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    /// Username or email
    pub identifier: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(identifier: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<LoginRequest, FormErrors> {
        let mut errors = FormErrors::new();
        if self.identifier.trim().is_empty() || self.password.is_empty() {
            errors.insert("form", FILL_ALL_FIELDS.to_string());
            return Err(errors);
        }

        let request = LoginRequest::from_identifier(&self.identifier, &self.password);
        if let Some(email) = &request.email {
            if !is_valid_email(email) {
                errors.insert("identifier", "Please enter a valid email address".to_string());
                return Err(errors);
            }
        }
        Ok(request)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<RegisterRequest, FormErrors> {
        let mut errors = FormErrors::new();

        let username = self.username.trim();
        if username.is_empty() {
            errors.insert("username", "Username is required".to_string());
        } else if !is_valid_username(username) {
            errors.insert(
                "username",
                "Username must be 3-20 characters, letters, numbers, and underscores only"
                    .to_string(),
            );
        }

        if self.first_name.trim().is_empty() {
            errors.insert("first_name", "First name is required".to_string());
        }
        if self.last_name.trim().is_empty() {
            errors.insert("last_name", "Last name is required".to_string());
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.insert("email", "Email address is required".to_string());
        } else if !is_valid_email(email) {
            errors.insert("email", "Please enter a valid email address".to_string());
        }

        if let Err(message) = validate_new_password(&self.password) {
            errors.insert("password", message.to_string());
        }

        if self.confirm_password.is_empty() {
            errors.insert("confirm_password", "Please confirm your password".to_string());
        } else if self.password != self.confirm_password {
            errors.insert("confirm_password", "Passwords do not match".to_string());
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(RegisterRequest {
            username: username.to_string(),
            email: email.to_lowercase(),
            password: self.password.clone(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
        })
    }
}

/// Map a login response to an outcome, without side effects.
pub fn map_login_response(response: &ApiResponse, attempted_email: Option<&str>) -> AuthOutcome {
    let body = &response.body;
    if response.is_success() {
        return match body.token() {
            Some(_) => AuthOutcome::LoggedIn,
            None => AuthOutcome::Failed(body.message().unwrap_or("Login failed").to_string()),
        };
    }

    match response.status {
        401 => AuthOutcome::InvalidCredentials(INVALID_CREDENTIALS.to_string()),
        403 if body.requires_verification() => AuthOutcome::VerificationRequired {
            message: body.message().unwrap_or(VERIFY_BEFORE_LOGIN).to_string(),
            email: body
                .verification_email()
                .or(attempted_email)
                .map(str::to_string),
        },
        status => AuthOutcome::Failed(
            body.message()
                .map(str::to_string)
                .unwrap_or_else(|| format!("Server error: {}", status)),
        ),
    }
}

/// Submit the login form. On success the token is already stored when this returns.
pub async fn submit_login(api: &ApiClient, form: &LoginForm) -> AuthOutcome {
    let request = match form.validate() {
        Ok(request) => request,
        Err(errors) => return AuthOutcome::Invalid(errors),
    };

    let response = match api.login(&request).await {
        Ok(response) => response,
        Err(e) => {
            error!(error = %e, "login request failed");
            return AuthOutcome::Failed(LOGIN_FAILED.to_string());
        }
    };

    let outcome = map_login_response(&response, request.email.as_deref());
    if let (AuthOutcome::LoggedIn, Some(token)) = (&outcome, response.body.token()) {
        store_token(api, token);
        info!("login succeeded");
    } else {
        warn!(status = response.status, "login did not succeed");
    }
    outcome
}

/// Submit the registration form.
pub async fn submit_registration(api: &ApiClient, form: &RegisterForm) -> AuthOutcome {
    let request = match form.validate() {
        Ok(request) => request,
        Err(errors) => return AuthOutcome::Invalid(errors),
    };

    let response = match api.register(&request).await {
        Ok(response) => response,
        Err(e) => {
            error!(error = %e, "registration request failed");
            return AuthOutcome::Failed(REGISTRATION_FAILED.to_string());
        }
    };

    let body = &response.body;
    if !response.is_success() || body.success == Some(false) {
        return AuthOutcome::Failed(
            body.message()
                .map(str::to_string)
                .unwrap_or_else(|| format!("Server error: {}", response.status)),
        );
    }

    match body.token() {
        Some(token) if !body.requires_verification() => {
            store_token(api, token);
            info!(username = %request.username, "registration succeeded");
            AuthOutcome::LoggedIn
        }
        _ => AuthOutcome::VerificationRequired {
            message: body.message().unwrap_or(REGISTRATION_VERIFY).to_string(),
            email: Some(
                body.verification_email()
                    .unwrap_or(&request.email)
                    .to_string(),
            ),
        },
    }
}

/// Request a password reset mail. `Ok` carries the success message.
pub async fn submit_forgot_password(api: &ApiClient, email: &str) -> Result<String, String> {
    if email.trim().is_empty() {
        return Err(FORGOT_EMAIL_REQUIRED.to_string());
    }
    match api.forgot_password(email).await {
        Ok(response) if response.is_success() => {
            Ok(response.body.message().unwrap_or(FORGOT_DEFAULT).to_string())
        }
        Ok(response) => {
            warn!(status = response.status, "forgot-password rejected");
            Err(FORGOT_FAILED.to_string())
        }
        Err(e) => {
            error!(error = %e, "forgot-password request failed");
            Err(FORGOT_FAILED.to_string())
        }
    }
}

/// Resend the verification mail. `Ok` carries the success message.
pub async fn resend_verification(api: &ApiClient, email: &str) -> Result<String, String> {
    match api.resend_verification(email).await {
        Ok(response) => {
            let succeeded = response.body.success.unwrap_or(response.is_success());
            if succeeded {
                Ok(RESEND_SUCCESS.to_string())
            } else {
                Err(format!(
                    "Error: {}",
                    response
                        .body
                        .message()
                        .unwrap_or("Unable to send verification email")
                ))
            }
        }
        Err(e) => {
            error!(error = %e, "resend-verification request failed");
            Err(RESEND_FAILED.to_string())
        }
    }
}

fn store_token(api: &ApiClient, token: &str) {
    if let Err(e) = api.session().set_token(token) {
        error!(error = %e, "failed to persist session token");
    }
}
