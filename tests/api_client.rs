//! API client behaviour: authorized requests, uniqueness replies, CSRF

#[macro_use]
mod common;

use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::{Duration, Instant};

use steward::egui_app::{ApiClient, AppState, Config, SessionStore};
use steward::shared::api::{endpoints, UserSettings};
use steward::shared::config::AppConfig;
use steward::shared::ClientError;
use wiremock::matchers::{header, method, path};
use tokio::runtime::Builder;
use wiremock::{Mock, ResponseTemplate};

use common::*;

#[tokio::test]
async fn test_authorized_request_sends_bearer_token() {
    let server = start_backend().await;
    Mock::given(method("GET"))
        .and(path(endpoints::USER_SETTINGS))
        .and(header("Authorization", "Bearer jwt-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"currency": "EUR"})))
        .expect(1)
        .mount(&server)
        .await;
    let api = signed_in_client(&server.uri(), "jwt-abc");

    let settings: UserSettings = assert_ok!(api.user_settings().await);

    assert_eq!(settings.currency.as_deref(), Some("EUR"));
    server.verify().await;
}

#[tokio::test]
async fn test_401_clears_token_and_reports_expiry() {
    let server = start_backend().await;
    mock_get(&server, endpoints::USER_SETTINGS, 401, json!({"message": "expired"})).await;
    let api = signed_in_client(&server.uri(), "stale");

    let result = api.user_settings().await;

    assert_err!(result, ClientError::SessionExpired);
    assert!(api.session().token().is_none());
}

#[tokio::test]
async fn test_server_error_carries_backend_message() {
    let server = start_backend().await;
    mock_get(
        &server,
        endpoints::USER_SETTINGS,
        500,
        json!({"message": "Database unavailable"}),
    )
    .await;
    let api = signed_in_client(&server.uri(), "jwt");

    match api.user_settings().await {
        Err(ClientError::Server { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Database unavailable");
        }
        other => panic!("expected server error, got {:?}", other),
    }
    // only 401 ends the session
    assert_eq!(api.session().token().as_deref(), Some("jwt"));
}

#[tokio::test]
async fn test_server_error_without_message_uses_fallback() {
    let server = start_backend().await;
    Mock::given(method("GET"))
        .and(path(endpoints::USER_SETTINGS))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;
    let api = signed_in_client(&server.uri(), "jwt");

    assert_err!(
        api.user_settings().await,
        ClientError::Server { status: 502, .. }
    );
}

#[tokio::test]
async fn test_uniqueness_replies_accept_both_shapes() {
    let server = start_backend().await;
    mock_post(&server, endpoints::VALIDATE_EMAIL, 200, json!({"exists": true})).await;
    mock_post(
        &server,
        endpoints::VALIDATE_USERNAME,
        200,
        json!({"available": true}),
    )
    .await;
    let api = api_client(&server.uri());

    assert!(assert_ok!(api.email_exists("ada@example.com").await));
    assert!(!assert_ok!(api.username_exists("ada_l").await));
}

#[tokio::test]
async fn test_uniqueness_check_network_failure_is_an_error() {
    let api = api_client("http://127.0.0.1:9");
    let result = api.email_exists("ada@example.com").await;
    match result {
        Err(e) => assert!(e.is_network(), "expected network error, got {:?}", e),
        Ok(taken) => panic!("expected failure, got {}", taken),
    }
}

#[tokio::test]
async fn test_onboarding_sends_csrf_header() {
    let server = start_backend().await;
    Mock::given(method("POST"))
        .and(path(endpoints::ONBOARDING_COMPLETE))
        .and(header("X-CSRFToken", "csrf-xyz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;
    let config = assert_ok!(Config::with_builder(
        AppConfig::builder()
            .server_url(server.uri())
            .csrf_token("csrf-xyz"),
    ));
    let api = ApiClient::new(config, SessionStore::in_memory());

    let response = assert_ok!(api.complete_onboarding(&json!({"firstName": "Ada"})).await);

    assert!(response.is_success());
    server.verify().await;
}

#[tokio::test]
async fn test_fetched_csrf_token_is_remembered() {
    let server = start_backend().await;
    mock_get(&server, endpoints::CSRF_TOKEN, 200, json!({"csrf_token": "fresh"})).await;
    let api = api_client(&server.uri());

    let token = assert_ok!(api.fetch_csrf_token().await);

    assert_eq!(token, "fresh");
    assert_eq!(api.csrf_token().as_deref(), Some("fresh"));
}

#[test]
fn test_startup_fetches_missing_csrf_token() {
    // The mock backend lives on its own runtime; AppState owns another
    let backend = assert_ok!(Builder::new_multi_thread().enable_all().build());
    let server = backend.block_on(async {
        let server = start_backend().await;
        mock_get(&server, endpoints::CSRF_TOKEN, 200, json!({"csrf_token": "boot"})).await;
        server
    });
    let runtime = assert_ok!(Builder::new_multi_thread().enable_all().build());

    let state = AppState::with_runtime(runtime, config_for(&server.uri()), SessionStore::in_memory());

    let deadline = Instant::now() + Duration::from_secs(2);
    while state.api.csrf_token().is_none() && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(10));
    }
    assert_eq!(state.api.csrf_token().as_deref(), Some("boot"));
}

#[tokio::test]
async fn test_logout_clears_token_even_if_backend_is_down() {
    let api = signed_in_client("http://127.0.0.1:9", "jwt");
    api.logout().await;
    assert!(api.session().token().is_none());
}
