//! Authentication API integration tests
//!
//! Bearer token handling and the user profile endpoints.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{mint_token, TestApp, TEST_JWT_SECRET};

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = TestApp::new().await;

    let body = crate::assert_api_error!(
        app.server.get("/api/groups").await,
        StatusCode::UNAUTHORIZED,
        "unauthorized"
    );
    crate::assert_contains!(body["error"].as_str().unwrap_or_default(), "Authorization");
}

#[tokio::test]
async fn test_wrong_secret_is_unauthorized() {
    let app = TestApp::new().await;
    let token = mint_token("mallory", "Mallory", "some-other-secret", 3600);

    app.server
        .get("/api/auth/me")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    let app = TestApp::new().await;
    let token = mint_token("late", "Late", TEST_JWT_SECRET, -3600);

    app.server
        .get("/api/auth/me")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_first_request_creates_user_once() {
    let app = TestApp::new().await;

    let first = app.user("alice").await;
    let second = app.user("alice").await;

    assert_eq!(first.id, second.id);
    assert_eq!(first.email, "alice@example.com");
    assert_eq!(app.db.count("users").await, 1);
}

#[tokio::test]
async fn test_update_profile() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;

    let response = app
        .server
        .put("/api/users/me")
        .authorization_bearer(&alice.token)
        .json(&json!({ "name": "Alice Liddell" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["name"], "Alice Liddell");

    // A later sign-in keeps the edited name
    let me: Value = app
        .server
        .get("/api/users/me")
        .authorization_bearer(&alice.token)
        .await
        .json();
    assert_eq!(me["name"], "Alice Liddell");
}

#[tokio::test]
async fn test_update_profile_rejects_empty_name() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;

    let response = app
        .server
        .put("/api/users/me")
        .authorization_bearer(&alice.token)
        .json(&json!({ "name": "   " }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "validation_error");
}

#[tokio::test]
async fn test_public_profile_hides_email() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let bob = app.user("bob").await;

    let response = app
        .server
        .get(&format!("/api/users/{}", alice.id))
        .authorization_bearer(&bob.token)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["name"], "alice");
    assert!(body.get("email").is_none());
}

#[tokio::test]
async fn test_unknown_user_is_not_found() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;

    app.server
        .get(&format!("/api/users/{}", uuid::Uuid::new_v4()))
        .authorization_bearer(&alice.token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
