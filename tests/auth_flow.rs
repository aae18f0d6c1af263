//! Login, registration and email-action flows against a mock backend

#[macro_use]
mod common;

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use serde_json::json;
use steward::egui_app::auth::{
    self, AuthOutcome, LoginForm, RegisterForm, FORGOT_EMAIL_REQUIRED, INVALID_CREDENTIALS,
    RESEND_SUCCESS,
};
use steward::shared::api::endpoints;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use common::*;

fn registration(password: &str) -> RegisterForm {
    RegisterForm {
        username: "ada_l".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: "Ada@Example.com".to_string(),
        password: password.to_string(),
        confirm_password: password.to_string(),
    }
}

#[tokio::test]
async fn test_login_401_shows_generic_error_and_stores_nothing() {
    let server = start_backend().await;
    mock_post(
        &server,
        endpoints::LOGIN,
        401,
        json!({"message": "Invalid email/username or password"}),
    )
    .await;
    let api = api_client(&server.uri());

    let outcome = auth::submit_login(&api, &LoginForm::new("alice", "x")).await;

    assert_eq!(
        outcome,
        AuthOutcome::InvalidCredentials(INVALID_CREDENTIALS.to_string())
    );
    assert!(api.session().token().is_none());
}

#[tokio::test]
async fn test_login_success_stores_token() {
    let server = start_backend().await;
    mock_post(
        &server,
        endpoints::LOGIN,
        200,
        json!({"success": true, "token": "jwt-123", "message": "Login successful"}),
    )
    .await;
    let api = api_client(&server.uri());

    let outcome = auth::submit_login(&api, &LoginForm::new("alice", "S3cret!pw")).await;

    assert_eq!(outcome, AuthOutcome::LoggedIn);
    assert_eq!(api.session().token().as_deref(), Some("jwt-123"));
}

#[tokio::test]
async fn test_login_sends_email_identifier_as_email() {
    let server = start_backend().await;
    mock_post(&server, endpoints::LOGIN, 200, json!({"token": "t"})).await;
    let api = api_client(&server.uri());

    auth::submit_login(&api, &LoginForm::new(" ada@example.com ", "pw")).await;

    let requests = requests_to(&server, endpoints::LOGIN).await;
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = assert_ok!(serde_json::from_slice(&requests[0].body));
    assert_eq!(body, json!({"email": "ada@example.com", "password": "pw"}));
}

#[tokio::test]
async fn test_login_403_unverified_shows_verification_panel() {
    let server = start_backend().await;
    mock_post(
        &server,
        endpoints::LOGIN,
        403,
        json!({"message": "Please verify your email", "email_verification_required": true}),
    )
    .await;
    let api = api_client(&server.uri());

    let outcome = auth::submit_login(&api, &LoginForm::new("ada@example.com", "pw")).await;

    assert_eq!(
        outcome,
        AuthOutcome::VerificationRequired {
            message: "Please verify your email".to_string(),
            email: Some("ada@example.com".to_string()),
        }
    );
    assert!(api.session().token().is_none());
}

#[tokio::test]
async fn test_login_unreachable_backend_fails_softly() {
    let api = api_client("http://127.0.0.1:9");
    let outcome = auth::submit_login(&api, &LoginForm::new("alice", "pw")).await;
    assert_matches!(outcome, AuthOutcome::Failed(_));
}

#[tokio::test]
async fn test_weak_registration_password_never_reaches_backend() {
    let server = start_backend().await;
    Mock::given(method("POST"))
        .and(path(endpoints::REGISTER))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let api = api_client(&server.uri());

    let outcome = auth::submit_registration(&api, &registration("weakpass")).await;

    let errors = match outcome {
        AuthOutcome::Invalid(errors) => errors,
        other => panic!("expected client-side rejection, got {:?}", other),
    };
    assert_contains!(errors["password"], "uppercase");
    server.verify().await;
}

#[tokio::test]
async fn test_registration_pending_verification() {
    let server = start_backend().await;
    mock_post(
        &server,
        endpoints::REGISTER,
        201,
        json!({
            "success": true,
            "email_verification_required": true,
            "user": {"email": "ada@example.com", "username": "ada_l"}
        }),
    )
    .await;
    let api = api_client(&server.uri());

    let outcome = auth::submit_registration(&api, &registration("Str0ng!pw")).await;

    assert_matches!(
        outcome,
        AuthOutcome::VerificationRequired { email: Some(email), .. } if email == "ada@example.com"
    );
    assert!(api.session().token().is_none());
}

#[tokio::test]
async fn test_registration_rejected_surfaces_backend_message() {
    let server = start_backend().await;
    mock_post(
        &server,
        endpoints::REGISTER,
        409,
        json!({"success": false, "message": "Username already exists"}),
    )
    .await;
    let api = api_client(&server.uri());

    let outcome = auth::submit_registration(&api, &registration("Str0ng!pw")).await;

    assert_eq!(
        outcome,
        AuthOutcome::Failed("Username already exists".to_string())
    );
}

#[tokio::test]
async fn test_forgot_password_success_message() {
    let server = start_backend().await;
    mock_post(
        &server,
        endpoints::FORGOT_PASSWORD,
        200,
        json!({"message": "Reset link sent"}),
    )
    .await;
    let api = api_client(&server.uri());

    let message = assert_ok!(auth::submit_forgot_password(&api, "ada@example.com").await);
    assert_eq!(message, "Reset link sent");
}

#[tokio::test]
async fn test_forgot_password_requires_email() {
    let server = start_backend().await;
    let api = api_client(&server.uri());

    let result = auth::submit_forgot_password(&api, "   ").await;

    assert_eq!(result, Err(FORGOT_EMAIL_REQUIRED.to_string()));
    assert!(requests_to(&server, endpoints::FORGOT_PASSWORD).await.is_empty());
}

#[tokio::test]
async fn test_resend_verification_messages() {
    let server = start_backend().await;
    mock_post(
        &server,
        endpoints::RESEND_VERIFICATION,
        200,
        json!({"success": true}),
    )
    .await;
    let api = api_client(&server.uri());
    assert_eq!(
        auth::resend_verification(&api, "ada@example.com").await,
        Ok(RESEND_SUCCESS.to_string())
    );

    let failing = start_backend().await;
    mock_post(
        &failing,
        endpoints::RESEND_VERIFICATION,
        400,
        json!({"success": false, "message": "Email already verified"}),
    )
    .await;
    let api = api_client(&failing.uri());
    assert_eq!(
        auth::resend_verification(&api, "ada@example.com").await,
        Err("Error: Email already verified".to_string())
    );
}
