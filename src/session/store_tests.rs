use std::sync::Arc;

use super::*;
use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::session::{MemoryTokenStore, Role};

fn user(id: &str) -> User {
    User {
        id: id.into(),
        email: format!("{}@x.com", id),
        full_name: "Jane Doe".into(),
        company_name: None,
        role: Role::Contractor,
        is_active: true,
        kyc_verified: false,
        created_at: None,
    }
}

// Base URL is never contacted in these tests; restore without a persisted
// token must not touch the network at all.
fn offline_client(store: &Arc<SessionStore>) -> ApiClient {
    let cfg = ClientConfig::new("http://127.0.0.1:9", "/tmp/unused");
    ApiClient::new(&cfg, store.clone()).unwrap()
}

#[test]
fn starts_loading() {
    let store = SessionStore::new(Box::new(MemoryTokenStore::new()));
    assert_eq!(store.state(), SessionState::Loading);
    assert!(store.loading());
    assert!(store.user().is_none());
    assert!(store.token().is_none());
}

#[tokio::test]
async fn restore_without_token_is_anonymous() {
    let store = Arc::new(SessionStore::new(Box::new(MemoryTokenStore::new())));
    let api = offline_client(&store);
    store.restore(&api).await;
    assert_eq!(store.state(), SessionState::Anonymous);
    assert!(!store.loading());
    assert!(store.user().is_none());
}

#[tokio::test]
async fn restore_runs_only_once() {
    let store = Arc::new(SessionStore::new(Box::new(MemoryTokenStore::new())));
    let api = offline_client(&store);
    store.restore(&api).await;
    store.login("tok", user("u1"));
    // A second restore must not re-enter Loading or clobber the session.
    store.restore(&api).await;
    assert_eq!(store.state(), SessionState::Authenticated);
    assert_eq!(store.token().as_deref(), Some("tok"));
}

#[test]
fn login_then_logout_round_trip() {
    let storage = Box::new(MemoryTokenStore::new());
    let store = SessionStore::new(storage);
    store.login("tok123", user("u1"));
    assert_eq!(store.state(), SessionState::Authenticated);
    assert_eq!(store.token().as_deref(), Some("tok123"));
    assert_eq!(store.user().unwrap().id, "u1");

    store.logout();
    assert_eq!(store.state(), SessionState::Anonymous);
    assert!(store.token().is_none());
    assert!(store.user().is_none());
    // Idempotent
    store.logout();
    assert_eq!(store.state(), SessionState::Anonymous);
}

#[test]
fn second_login_fully_replaces_session() {
    let store = SessionStore::new(Box::new(MemoryTokenStore::new()));
    store.login("tok-a", user("u1"));
    store.login("tok-b", user("u2"));
    assert_eq!(store.token().as_deref(), Some("tok-b"));
    assert_eq!(store.user().unwrap().id, "u2");
    assert_eq!(store.state(), SessionState::Authenticated);
}

#[test]
fn user_and_token_always_paired() {
    let store = SessionStore::new(Box::new(MemoryTokenStore::new()));
    assert_eq!(store.user().is_some(), store.token().is_some());
    store.login("t", user("u1"));
    assert_eq!(store.user().is_some(), store.token().is_some());
    store.logout();
    assert_eq!(store.user().is_some(), store.token().is_some());
}
