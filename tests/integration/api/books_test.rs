//! Book API integration tests
//!
//! Search runs against a wiremock stand-in for Open Library.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{failing_open_library, mock_open_library, test_config, TestApp};

#[tokio::test]
async fn test_search_proxies_open_library() {
    let mock = mock_open_library().await;
    let app = TestApp::with_config(test_config().open_library_url(mock.uri())).await;
    let alice = app.user("alice").await;

    let response = app
        .server
        .get("/api/books/search")
        .add_query_param("q", "dune")
        .authorization_bearer(&alice.token)
        .await;

    response.assert_status_ok();
    let results: Vec<Value> = response.json();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["title"], "Dune");
    assert_eq!(results[0]["author"], "Frank Herbert");
    assert_eq!(results[0]["open_library_id"], "OL893415W");
    assert_eq!(
        results[0]["cover_url"],
        "https://covers.openlibrary.org/b/id/11481354-M.jpg"
    );
    assert_eq!(results[1]["author"], "Unknown");
}

#[tokio::test]
async fn test_search_requires_query() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;

    app.server
        .get("/api/books/search")
        .add_query_param("q", "  ")
        .authorization_bearer(&alice.token)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_upstream_failure() {
    let mock = failing_open_library().await;
    let app = TestApp::with_config(test_config().open_library_url(mock.uri())).await;
    let alice = app.user("alice").await;

    let response = app
        .server
        .get("/api/books/search")
        .add_query_param("q", "dune")
        .authorization_bearer(&alice.token)
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["code"], "upstream_unavailable");
}

#[tokio::test]
async fn test_add_and_list_group_books() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let (group_id, _) = app.create_group(&alice, "Club").await;

    let book_id = app.add_book(&alice, group_id, "Piranesi").await;

    let book: Value = app
        .server
        .get(&format!("/api/books/{}", book_id))
        .authorization_bearer(&alice.token)
        .await
        .json();
    assert_eq!(book["title"], "Piranesi");

    let books: Vec<Value> = app
        .server
        .get(&format!("/api/groups/{}/books", group_id))
        .authorization_bearer(&alice.token)
        .await
        .json();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["book_id"], book_id.to_string());
    assert_eq!(books[0]["book"]["title"], "Piranesi");
}

#[tokio::test]
async fn test_duplicate_group_book_conflicts() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let (group_id, _) = app.create_group(&alice, "Club").await;
    let book_id = app.add_book(&alice, group_id, "Piranesi").await;

    let response = app
        .server
        .post(&format!("/api/groups/{}/books", group_id))
        .authorization_bearer(&alice.token)
        .json(&json!({ "book_id": book_id }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["code"], "conflict");
}

#[tokio::test]
async fn test_books_dedupe_by_isbn_across_groups() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let (first, _) = app.create_group(&alice, "First").await;
    let (second, _) = app.create_group(&alice, "Second").await;
    let body = json!({ "title": "Dune", "author": "Frank Herbert", "isbn": "9780441013593" });

    let a: Value = app
        .server
        .post(&format!("/api/groups/{}/books", first))
        .authorization_bearer(&alice.token)
        .json(&body)
        .await
        .json();
    let b: Value = app
        .server
        .post(&format!("/api/groups/{}/books", second))
        .authorization_bearer(&alice.token)
        .json(&body)
        .await
        .json();

    assert_eq!(a["book"]["id"], b["book"]["id"]);
    assert_eq!(app.db.count("books").await, 1);
}

#[tokio::test]
async fn test_new_book_needs_title_and_author() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let (group_id, _) = app.create_group(&alice, "Club").await;

    app.server
        .post(&format!("/api/groups/{}/books", group_id))
        .authorization_bearer(&alice.token)
        .json(&json!({ "title": "No author" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_non_member_cannot_add_books() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let mallory = app.user("mallory").await;
    let (group_id, _) = app.create_group(&alice, "Club").await;

    app.server
        .post(&format!("/api/groups/{}/books", group_id))
        .authorization_bearer(&mallory.token)
        .json(&json!({ "title": "Spam", "author": "Mallory" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}
