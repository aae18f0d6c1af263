//! Backend API Client
//!
//! Async HTTP client for every endpoint the presentation layer talks to.
//!
//! Two calling conventions are used:
//!
//! - **Form endpoints** (login, register, onboarding, email actions) return an
//!   [`ApiResponse`]: the status code plus a leniently parsed body, for any
//!   status. The controllers map status/body pairs to UI outcomes themselves.
//! - **Authorized endpoints** go through [`ApiClient::authorized`], which
//!   attaches the bearer token, turns 401 into [`ClientError::SessionExpired`]
//!   (clearing the stored token) and any other non-2xx into
//!   [`ClientError::Server`] carrying the backend's message.

use std::sync::{Arc, RwLock};

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::egui_app::config::Config;
use crate::egui_app::session::SessionStore;
use crate::shared::api::{
    endpoints, ApiReply, ApiResponse, CsrfTokenResponse, EmailRequest, ErrorBody,
    ExistsResponse, LoginRequest, RegisterRequest, UserSettings, UsernameRequest,
};
use crate::shared::error::ClientError;

const CSRF_HEADER: &str = "X-CSRFToken";

#[derive(Debug, Clone)]
pub struct ApiClient {
    config: Config,
    client: Client,
    session: SessionStore,
    csrf_token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(config: Config, session: SessionStore) -> Self {
        let csrf_token = config.csrf_token().map(str::to_string);
        Self {
            config,
            client: Client::new(),
            session,
            csrf_token: Arc::new(RwLock::new(csrf_token)),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn csrf_token(&self) -> Option<String> {
        self.csrf_token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn set_csrf_token(&self, token: Option<String>) {
        let mut guard = self.csrf_token.write().unwrap_or_else(|e| e.into_inner());
        *guard = token.filter(|t| !t.is_empty());
    }

    /// `POST /api/login`
    pub async fn login(&self, request: &LoginRequest) -> Result<ApiResponse, ClientError> {
        info!(by_email = request.is_email(), "login attempt");
        self.post_form(endpoints::LOGIN, request, false).await
    }

    /// `POST /api/register`
    pub async fn register(&self, request: &RegisterRequest) -> Result<ApiResponse, ClientError> {
        info!(username = %request.username, "registration attempt");
        self.post_form(endpoints::REGISTER, request, false).await
    }

    /// `POST /api/forgot-password`
    pub async fn forgot_password(&self, email: &str) -> Result<ApiResponse, ClientError> {
        let body = EmailRequest {
            email: email.trim().to_string(),
        };
        self.post_form(endpoints::FORGOT_PASSWORD, &body, false).await
    }

    /// `POST /api/resend-verification`
    pub async fn resend_verification(&self, email: &str) -> Result<ApiResponse, ClientError> {
        let body = EmailRequest {
            email: email.trim().to_string(),
        };
        self.post_form(endpoints::RESEND_VERIFICATION, &body, false).await
    }

    /// `POST /api/onboarding/complete` with the aggregated wizard data
    pub async fn complete_onboarding<B: Serialize + ?Sized>(
        &self,
        payload: &B,
    ) -> Result<ApiResponse, ClientError> {
        info!("submitting onboarding");
        self.post_form(endpoints::ONBOARDING_COMPLETE, payload, true).await
    }

    /// Whether an account already uses this email
    pub async fn email_exists(&self, email: &str) -> Result<bool, ClientError> {
        let body = EmailRequest {
            email: email.to_string(),
        };
        self.exists(endpoints::VALIDATE_EMAIL, &body).await
    }

    /// Whether an account already uses this username
    pub async fn username_exists(&self, username: &str) -> Result<bool, ClientError> {
        let body = UsernameRequest {
            username: username.to_string(),
        };
        self.exists(endpoints::VALIDATE_USERNAME, &body).await
    }

    /// `GET /api/csrf-token`, remembering the token for later requests
    pub async fn fetch_csrf_token(&self) -> Result<String, ClientError> {
        let response = self
            .client
            .get(self.config.api_url(endpoints::CSRF_TOKEN))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(server_error(status, response).await);
        }
        let body: CsrfTokenResponse = response.json().await?;
        self.set_csrf_token(Some(body.csrf_token.clone()));
        Ok(body.csrf_token)
    }

    /// `GET /api/user/settings`
    pub async fn user_settings(&self) -> Result<UserSettings, ClientError> {
        self.authorized(Method::GET, endpoints::USER_SETTINGS, None::<&()>)
            .await
    }

    /// Clear the local session, then tell the backend. The backend call is
    /// best-effort; the token is gone even if it fails.
    pub async fn logout(&self) {
        let token = self.session.token();
        self.session.clear_token();

        let mut request = self.client.post(self.config.api_url(endpoints::LOGOUT));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        match request.send().await {
            Ok(response) => debug!(status = %response.status(), "logout acknowledged"),
            Err(e) => warn!(error = %e, "logout request failed"),
        }
    }

    /// Authorized fetch wrapper.
    ///
    /// Attaches `Authorization: Bearer <token>`. A 401 clears the stored token
    /// and yields [`ClientError::SessionExpired`]; the caller sends the user
    /// back to the entry page.
    pub async fn authorized<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut request = self.client.request(method.clone(), self.config.api_url(path));
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        debug!(%method, path, status = status.as_u16(), "authorized request");

        if status == StatusCode::UNAUTHORIZED {
            warn!(path, "session expired");
            self.session.clear_token();
            return Err(ClientError::SessionExpired);
        }
        if !status.is_success() {
            return Err(server_error(status, response).await);
        }

        Ok(response.json::<T>().await?)
    }

    async fn exists<B: Serialize>(&self, path: &str, body: &B) -> Result<bool, ClientError> {
        let response = self
            .with_csrf(self.client.post(self.config.api_url(path)))
            .json(body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(server_error(status, response).await);
        }
        let result: ExistsResponse = response.json().await?;
        Ok(result.is_taken())
    }

    async fn post_form<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        csrf: bool,
    ) -> Result<ApiResponse, ClientError> {
        let mut request = self.client.post(self.config.api_url(path)).json(body);
        if csrf {
            request = self.with_csrf(request);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        let body = parse_reply(&text);

        if (200..300).contains(&status) {
            debug!(path, status, "form request succeeded");
        } else {
            warn!(path, status, message = body.message().unwrap_or(""), "form request rejected");
        }
        Ok(ApiResponse { status, body })
    }

    fn with_csrf(&self, request: RequestBuilder) -> RequestBuilder {
        match self.csrf_token() {
            Some(token) => request.header(CSRF_HEADER, token),
            None => request,
        }
    }
}

/// Best-effort parse; non-JSON bodies (HTML error pages, empty bodies) become
/// an empty reply so status-based fallbacks apply.
fn parse_reply(text: &str) -> ApiReply {
    if text.trim().is_empty() {
        return ApiReply::default();
    }
    serde_json::from_str(text).unwrap_or_else(|e| {
        debug!(error = %e, "response body is not an API reply");
        ApiReply::default()
    })
}

async fn server_error(status: StatusCode, response: reqwest::Response) -> ClientError {
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| "An error occurred".to_string());
    ClientError::server(status.as_u16(), message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reply_tolerates_html() {
        let reply = parse_reply("<html>502 Bad Gateway</html>");
        assert_eq!(reply, ApiReply::default());
    }

    #[test]
    fn test_parse_reply_reads_message() {
        let reply = parse_reply(r#"{"message": "Invalid email/username or password"}"#);
        assert_eq!(reply.message(), Some("Invalid email/username or password"));
    }

    #[test]
    fn test_csrf_token_roundtrip() {
        let config = Config::with_builder(
            crate::shared::config::AppConfig::builder().csrf_token("from-config"),
        )
        .unwrap();
        let client = ApiClient::new(config, SessionStore::in_memory());
        assert_eq!(client.csrf_token().as_deref(), Some("from-config"));
        client.set_csrf_token(None);
        assert!(client.csrf_token().is_none());
    }
}
