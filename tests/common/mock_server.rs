//! Mock backend helpers for integration tests
//!
//! Every test gets its own wiremock server; clients are built with a short
//! debounce so uniqueness checks fire quickly.

use std::time::Duration;

use serde_json::Value;
use steward::egui_app::{ApiClient, Config, SessionStore};
use steward::shared::config::AppConfig;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Debounce used by test clients
pub const TEST_DEBOUNCE_MS: u64 = 50;

pub async fn start_backend() -> MockServer {
    MockServer::start().await
}

pub fn config_for(server_uri: &str) -> Config {
    Config::with_builder(
        AppConfig::builder()
            .server_url(server_uri)
            .debounce_ms(TEST_DEBOUNCE_MS)
            .redirect_delay_ms(0),
    )
    .expect("test config is valid")
}

/// API client with an empty in-memory session
pub fn api_client(server_uri: &str) -> ApiClient {
    ApiClient::new(config_for(server_uri), SessionStore::in_memory())
}

/// API client whose session already holds `token`
pub fn signed_in_client(server_uri: &str, token: &str) -> ApiClient {
    let session = SessionStore::in_memory();
    session.set_token(token).expect("in-memory storage accepts writes");
    ApiClient::new(config_for(server_uri), session)
}

/// Mount a `POST <route>` answering `status` with `body`
pub async fn mock_post(server: &MockServer, route: &str, status: u16, body: Value) {
    Mock::given(method("POST"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount a `GET <route>` answering `status` with `body`
pub async fn mock_get(server: &MockServer, route: &str, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Requests the server saw for `route`
pub async fn requests_to(server: &MockServer, route: &str) -> Vec<wiremock::Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|request| request.url.path() == route)
        .collect()
}

/// Poll `check` until it holds or `timeout` elapses
pub async fn eventually<F>(timeout: Duration, mut check: F) -> bool
where
    F: FnMut() -> bool,
{
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if check() {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
