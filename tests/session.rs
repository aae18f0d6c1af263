//! Persistent session storage and start-up routing

#[macro_use]
mod common;

use std::sync::Arc;

use pretty_assertions::assert_eq;
use steward::egui_app::modal::ModalId;
use steward::egui_app::session::TOKEN_KEY;
use steward::egui_app::{AppState, ClientStorage, Route, SessionStore};
use tokio::runtime::Builder;

use common::*;

fn app_state(session: SessionStore) -> AppState {
    let runtime = assert_ok!(Builder::new_current_thread().enable_all().build());
    // Unroutable backend: nothing here may depend on a response
    AppState::with_runtime(runtime, config_for("http://127.0.0.1:9"), session)
}

#[test]
fn test_token_survives_reopen() {
    let dir = assert_ok!(tempfile::tempdir());

    let storage = Arc::new(assert_ok!(ClientStorage::open(dir.path())));
    let session = SessionStore::new(storage);
    assert_ok!(session.set_token("persisted-jwt"));
    drop(session);

    let reopened = assert_ok!(ClientStorage::open(dir.path()));
    assert_eq!(
        reopened.get_item(TOKEN_KEY).as_deref(),
        Some("persisted-jwt")
    );
}

#[test]
fn test_cleared_token_stays_cleared() {
    let dir = assert_ok!(tempfile::tempdir());
    let session = SessionStore::new(Arc::new(assert_ok!(ClientStorage::open(dir.path()))));
    assert_ok!(session.set_token("jwt"));
    session.clear_token();

    let reopened = SessionStore::new(Arc::new(assert_ok!(ClientStorage::open(dir.path()))));
    assert!(!reopened.is_authenticated());
}

#[test]
fn test_stored_token_opens_dashboard_immediately() {
    let session = SessionStore::in_memory();
    assert_ok!(session.set_token("jwt"));

    let state = app_state(session);

    assert_eq!(state.nav.current(), Route::Dashboard);
    assert!(state.is_authenticated());
}

#[test]
fn test_no_token_stays_on_entry() {
    let mut state = app_state(SessionStore::in_memory());
    assert_eq!(state.nav.current(), Route::Entry);

    state.open_path(Route::Transactions.path());
    assert_eq!(state.nav.current(), Route::Entry);
    assert!(!state.modals.is_open(ModalId::Auth));
}

#[test]
fn test_logout_returns_to_entry() {
    let session = SessionStore::in_memory();
    assert_ok!(session.set_token("jwt"));
    let mut state = app_state(session);

    state.logout();

    assert_eq!(state.nav.current(), Route::Entry);
    assert!(!state.session().is_authenticated());
    assert!(!state.is_authenticated());
}
