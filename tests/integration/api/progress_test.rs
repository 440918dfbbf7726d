//! Reading progress API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::TestApp;

#[tokio::test]
async fn test_record_progress_computes_percentage() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let (group_id, _) = app.create_group(&alice, "Club").await;
    let book_id = app.add_book(&alice, group_id, "Dune").await;

    let progress = app.set_progress(&alice, group_id, book_id, 85, 200).await;

    assert_eq!(progress["current_page"], 85);
    assert_eq!(progress["total_pages"], 200);
    assert_eq!(progress["progress_percentage"], 42.5);
}

#[tokio::test]
async fn test_record_progress_overwrites() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let (group_id, _) = app.create_group(&alice, "Club").await;
    let book_id = app.add_book(&alice, group_id, "Dune").await;

    let first = app.set_progress(&alice, group_id, book_id, 10, 100).await;
    let second = app.set_progress(&alice, group_id, book_id, 60, 100).await;

    assert_eq!(first["id"], second["id"]);
    assert_eq!(app.db.count("reading_progress").await, 1);

    let mine: Value = app
        .server
        .get(&format!("/api/progress/groups/{}/books/{}", group_id, book_id))
        .authorization_bearer(&alice.token)
        .await
        .json();
    assert_eq!(mine["progress_percentage"], 60.0);
}

#[tokio::test]
async fn test_invalid_positions_are_rejected() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let (group_id, _) = app.create_group(&alice, "Club").await;
    let book_id = app.add_book(&alice, group_id, "Dune").await;

    for (page, total) in [(201, 200), (-1, 200), (0, 0)] {
        let response = app
            .server
            .post("/api/progress")
            .authorization_bearer(&alice.token)
            .json(&json!({
                "group_id": group_id,
                "book_id": book_id,
                "current_page": page,
                "total_pages": total,
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "validation_error", "page {} of {}", page, total);
    }
    assert_eq!(app.db.count("reading_progress").await, 0);
}

#[tokio::test]
async fn test_record_progress_access() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let mallory = app.user("mallory").await;
    let (group_id, _) = app.create_group(&alice, "Club").await;
    let book_id = app.add_book(&alice, group_id, "Dune").await;

    app.server
        .post("/api/progress")
        .authorization_bearer(&mallory.token)
        .json(&json!({
            "group_id": group_id,
            "book_id": book_id,
            "current_page": 1,
            "total_pages": 10,
        }))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    app.server
        .post("/api/progress")
        .authorization_bearer(&alice.token)
        .json(&json!({
            "group_id": group_id,
            "book_id": uuid::Uuid::new_v4(),
            "current_page": 1,
            "total_pages": 10,
        }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_own_progress_is_not_found() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let (group_id, _) = app.create_group(&alice, "Club").await;
    let book_id = app.add_book(&alice, group_id, "Dune").await;

    app.server
        .get(&format!("/api/progress/groups/{}/books/{}", group_id, book_id))
        .authorization_bearer(&alice.token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_group_progress_is_ordered_furthest_first() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let bob = app.user("bob").await;
    let (group_id, invite_code) = app.create_group(&alice, "Club").await;
    app.join(&bob, &invite_code).await;
    let book_id = app.add_book(&alice, group_id, "Dune").await;

    app.set_progress(&alice, group_id, book_id, 20, 100).await;
    app.set_progress(&bob, group_id, book_id, 75, 100).await;

    let all: Vec<Value> = app
        .server
        .get(&format!("/api/progress/groups/{}/books/{}/all", group_id, book_id))
        .authorization_bearer(&alice.token)
        .await
        .json();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0]["user_name"], "bob");
    assert_eq!(all[1]["user_name"], "alice");
}

#[tokio::test]
async fn test_list_my_progress_with_filter() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let (first, _) = app.create_group(&alice, "First").await;
    let (second, _) = app.create_group(&alice, "Second").await;
    let dune = app.add_book(&alice, first, "Dune").await;
    let emma = app.add_book(&alice, second, "Emma").await;
    app.set_progress(&alice, first, dune, 1, 10).await;
    app.set_progress(&alice, second, emma, 2, 10).await;

    let all: Vec<Value> = app
        .server
        .get("/api/progress")
        .authorization_bearer(&alice.token)
        .await
        .json();
    assert_eq!(all.len(), 2);

    let filtered: Vec<Value> = app
        .server
        .get("/api/progress")
        .add_query_param("group_id", first)
        .authorization_bearer(&alice.token)
        .await
        .json();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["book_title"], "Dune");
}

#[tokio::test]
async fn test_only_owner_modifies_progress() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let bob = app.user("bob").await;
    let (group_id, invite_code) = app.create_group(&alice, "Club").await;
    app.join(&bob, &invite_code).await;
    let book_id = app.add_book(&alice, group_id, "Dune").await;
    let progress = app.set_progress(&alice, group_id, book_id, 10, 100).await;
    let progress_id = progress["id"].as_str().unwrap().to_string();

    app.server
        .put(&format!("/api/progress/{}", progress_id))
        .authorization_bearer(&bob.token)
        .json(&json!({ "current_page": 99, "total_pages": 100 }))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let updated: Value = app
        .server
        .put(&format!("/api/progress/{}", progress_id))
        .authorization_bearer(&alice.token)
        .json(&json!({ "current_page": 50, "total_pages": 100 }))
        .await
        .json();
    assert_eq!(updated["progress_percentage"], 50.0);

    app.server
        .delete(&format!("/api/progress/{}", progress_id))
        .authorization_bearer(&bob.token)
        .await
        .assert_status(StatusCode::FORBIDDEN);
    app.server
        .delete(&format!("/api/progress/{}", progress_id))
        .authorization_bearer(&alice.token)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    assert_eq!(app.db.count("reading_progress").await, 0);
}
