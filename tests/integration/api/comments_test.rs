//! Comment API integration tests
//!
//! Most of these check that a reader never receives a comment written
//! further into the book than they have read.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::{test_config, TestApp, TestUser};

/// Total used where exact hundredths matter: page N is N/100 percent
const PAGES: i64 = 10_000;

struct Discussion {
    app: TestApp,
    author: TestUser,
    reader: TestUser,
    group_id: Uuid,
    book_id: Uuid,
}

async fn discussion() -> Discussion {
    let app = TestApp::new().await;
    let author = app.user("author").await;
    let reader = app.user("reader").await;
    let (group_id, invite_code) = app.create_group(&author, "Club").await;
    app.join(&reader, &invite_code).await;
    let book_id = app.add_book(&author, group_id, "The Long Book").await;
    app.set_progress(&author, group_id, book_id, PAGES, PAGES).await;

    Discussion {
        app,
        author,
        reader,
        group_id,
        book_id,
    }
}

impl Discussion {
    async fn post(&self, content: &str, page: i64) -> Uuid {
        self.app
            .comment(&self.author, self.group_id, self.book_id, content, page, PAGES)
            .await
    }

    async fn read_to(&self, page: i64) {
        self.app
            .set_progress(&self.reader, self.group_id, self.book_id, page, PAGES)
            .await;
    }

    async fn visible(&self) -> Vec<String> {
        self.app
            .visible_contents(&self.reader, self.group_id, self.book_id)
            .await
    }

    async fn ahead(&self) -> Vec<Value> {
        let response = self
            .app
            .server
            .get(&format!(
                "/api/groups/{}/books/{}/comments/ahead",
                self.group_id, self.book_id
            ))
            .authorization_bearer(&self.reader.token)
            .await;
        response.assert_status_ok();
        response.json()
    }
}

#[tokio::test]
async fn test_boundary_scenario() {
    let d = discussion().await;
    d.post("start", 0).await;
    d.post("exactly here", 4250).await;
    d.post("one step past", 4251).await;
    d.post("the end", PAGES).await;

    d.read_to(4250).await;
    assert_eq!(d.visible().await, vec!["start", "exactly here"]);

    let ahead = d.ahead().await;
    let ahead_at: Vec<f64> = ahead
        .iter()
        .map(|c| c["progress_percentage"].as_f64().unwrap())
        .collect();
    assert_eq!(ahead_at, vec![42.51, 100.0]);
    assert_eq!(ahead[0]["content"], "one step past");

    d.read_to(4251).await;
    assert_eq!(d.visible().await, vec!["start", "exactly here", "one step past"]);
    assert_eq!(d.ahead().await.len(), 1);
}

#[tokio::test]
async fn test_ahead_entries_match_listing_shape() {
    let d = discussion().await;
    let comment_id = d.post("the twist", 9000).await;

    let ahead = d.ahead().await;
    assert_eq!(ahead.len(), 1);
    let entry = &ahead[0];
    for field in [
        "id",
        "group_id",
        "book_id",
        "user_id",
        "content",
        "progress_page",
        "progress_total_pages",
        "progress_percentage",
        "parent_comment_id",
        "created_at",
        "like_count",
        "user_has_liked",
        "user_name",
        "user_avatar_url",
    ] {
        assert!(entry.get(field).is_some(), "ahead entry missing {}", field);
    }
    assert_eq!(entry["id"], comment_id.to_string());
    assert_eq!(entry["group_id"], d.group_id.to_string());
    assert_eq!(entry["book_id"], d.book_id.to_string());
    assert_eq!(entry["content"], "the twist");
    assert_eq!(entry["progress_page"], 9000);
    assert_eq!(entry["progress_total_pages"], PAGES);
    assert_eq!(entry["progress_percentage"], json!(90.0));
    assert_eq!(entry["like_count"], 0);
    assert_eq!(entry["user_has_liked"], false);
    assert_eq!(entry["user_name"], "author");
}

#[tokio::test]
async fn test_reader_without_progress_sees_only_zero() {
    let d = discussion().await;
    d.post("before reading", 0).await;
    d.post("chapter one", 100).await;

    assert_eq!(d.visible().await, vec!["before reading"]);
    assert_eq!(d.ahead().await.len(), 1);
}

#[tokio::test]
async fn test_display_order_is_progress_then_age() {
    let d = discussion().await;
    d.post("late", 5000).await;
    d.post("early first", 1000).await;
    d.post("early second", 1000).await;

    d.read_to(PAGES).await;
    assert_eq!(d.visible().await, vec!["early first", "early second", "late"]);
}

#[tokio::test]
async fn test_direct_fetch_distinguishes_failures() {
    let d = discussion().await;
    let outsider = d.app.user("outsider").await;
    let comment_id = d.post("midpoint twist", 5000).await;
    d.read_to(3000).await;

    crate::assert_api_error!(
        d.app
            .server
            .get(&format!("/api/comments/{}", comment_id))
            .authorization_bearer(&d.reader.token)
            .await,
        StatusCode::FORBIDDEN,
        "insufficient_progress"
    );
    crate::assert_api_error!(
        d.app
            .server
            .get(&format!("/api/comments/{}", Uuid::new_v4()))
            .authorization_bearer(&d.reader.token)
            .await,
        StatusCode::NOT_FOUND,
        "not_found"
    );
    crate::assert_api_error!(
        d.app
            .server
            .get(&format!("/api/comments/{}", comment_id))
            .authorization_bearer(&outsider.token)
            .await,
        StatusCode::FORBIDDEN,
        "forbidden"
    );

    d.read_to(5000).await;
    let comment: Value = d
        .app
        .server
        .get(&format!("/api/comments/{}", comment_id))
        .authorization_bearer(&d.reader.token)
        .await
        .json();
    assert_eq!(comment["content"], "midpoint twist");
    assert_eq!(comment["user_name"], "author");
}

#[tokio::test]
async fn test_non_member_cannot_list() {
    let d = discussion().await;
    let outsider = d.app.user("outsider").await;

    d.app
        .server
        .get(&format!("/api/groups/{}/books/{}/comments", d.group_id, d.book_id))
        .authorization_bearer(&outsider.token)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_validation() {
    let app = TestApp::with_config(test_config().max_comment_length(10)).await;
    let alice = app.user("alice").await;
    let (group_id, _) = app.create_group(&alice, "Club").await;
    let book_id = app.add_book(&alice, group_id, "Dune").await;
    let url = format!("/api/groups/{}/comments", group_id);

    for (content, page, total) in [("", 1, 10), ("far too long a comment", 1, 10), ("ok", 11, 10)] {
        app.server
            .post(&url)
            .authorization_bearer(&alice.token)
            .json(&json!({
                "book_id": book_id,
                "content": content,
                "progress_page": page,
                "progress_total_pages": total,
            }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    // Book must belong to the group
    app.server
        .post(&url)
        .authorization_bearer(&alice.token)
        .json(&json!({
            "book_id": Uuid::new_v4(),
            "content": "ok",
            "progress_page": 1,
            "progress_total_pages": 10,
        }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    assert_eq!(app.db.count("comments").await, 0);
}

#[tokio::test]
async fn test_reply_parent_checks() {
    let d = discussion().await;
    let other_book = d.app.add_book(&d.author, d.group_id, "Other Book").await;
    let parent = d
        .app
        .comment(&d.author, d.group_id, other_book, "elsewhere", 0, 10)
        .await;
    let url = format!("/api/groups/{}/comments", d.group_id);

    d.app
        .server
        .post(&url)
        .authorization_bearer(&d.author.token)
        .json(&json!({
            "book_id": d.book_id,
            "content": "reply",
            "progress_page": 0,
            "progress_total_pages": PAGES,
            "parent_comment_id": parent,
        }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    d.app
        .server
        .post(&url)
        .authorization_bearer(&d.author.token)
        .json(&json!({
            "book_id": d.book_id,
            "content": "reply",
            "progress_page": 0,
            "progress_total_pages": PAGES,
            "parent_comment_id": Uuid::new_v4(),
        }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edit_is_author_only_and_keeps_position() {
    let d = discussion().await;
    let comment_id = d.post("first draft", 0).await;
    let url = format!("/api/comments/{}", comment_id);

    d.app
        .server
        .put(&url)
        .authorization_bearer(&d.reader.token)
        .json(&json!({ "content": "vandalised" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let edited: Value = d
        .app
        .server
        .put(&url)
        .authorization_bearer(&d.author.token)
        .json(&json!({ "content": "second draft" }))
        .await
        .json();
    assert_eq!(edited["content"], "second draft");
    assert_eq!(edited["progress_percentage"], 0.0);
}

#[tokio::test]
async fn test_delete_removes_replies() {
    let d = discussion().await;
    let root = d.post("root", 0).await;
    let reply = d
        .app
        .server
        .post(&format!("/api/groups/{}/comments", d.group_id))
        .authorization_bearer(&d.author.token)
        .json(&json!({
            "book_id": d.book_id,
            "content": "reply",
            "progress_page": 10,
            "progress_total_pages": PAGES,
            "parent_comment_id": root,
        }))
        .await;
    reply.assert_status(StatusCode::CREATED);
    d.post("unrelated", 0).await;

    d.app
        .server
        .delete(&format!("/api/comments/{}", root))
        .authorization_bearer(&d.reader.token)
        .await
        .assert_status(StatusCode::FORBIDDEN);
    d.app
        .server
        .delete(&format!("/api/comments/{}", root))
        .authorization_bearer(&d.author.token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    assert_eq!(d.app.db.count("comments").await, 1);
    d.app
        .server
        .get(&format!("/api/comments/{}", root))
        .authorization_bearer(&d.author.token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_likes() {
    let d = discussion().await;
    let visible = d.post("visible", 0).await;
    let hidden = d.post("hidden", 9000).await;
    let like_url = format!("/api/comments/{}/like", visible);

    d.app
        .server
        .post(&like_url)
        .authorization_bearer(&d.reader.token)
        .await
        .assert_status(StatusCode::CREATED);
    d.app
        .server
        .post(&like_url)
        .authorization_bearer(&d.reader.token)
        .await
        .assert_status(StatusCode::CONFLICT);

    let comment: Value = d
        .app
        .server
        .get(&format!("/api/comments/{}", visible))
        .authorization_bearer(&d.reader.token)
        .await
        .json();
    assert_eq!(comment["like_count"], 1);
    assert_eq!(comment["user_has_liked"], true);

    // Cannot like what you cannot see
    d.app
        .server
        .post(&format!("/api/comments/{}/like", hidden))
        .authorization_bearer(&d.reader.token)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    d.app
        .server
        .delete(&like_url)
        .authorization_bearer(&d.reader.token)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    d.app
        .server
        .delete(&like_url)
        .authorization_bearer(&d.reader.token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_report_requires_visibility() {
    let d = discussion().await;
    let hidden = d.post("hidden", 9000).await;

    crate::assert_api_error!(
        d.app
            .server
            .post(&format!("/api/comments/{}/report", hidden))
            .authorization_bearer(&d.reader.token)
            .json(&json!({}))
            .await,
        StatusCode::FORBIDDEN,
        "insufficient_progress"
    );
}
