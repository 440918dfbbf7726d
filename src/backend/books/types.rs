//! Book request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A book row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub open_library_id: Option<String>,
    pub cover_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields for a book that may not exist yet
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub open_library_id: Option<String>,
    pub cover_url: Option<String>,
}

/// One Open Library hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSearchResult {
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub open_library_id: Option<String>,
    pub cover_url: Option<String>,
    pub publish_year: Option<i32>,
}

/// Query string for `GET /api/books/search`
#[derive(Debug, Deserialize)]
pub struct BookSearchQuery {
    pub q: String,
    pub limit: Option<u32>,
}

/// Body of `POST /api/groups/{group_id}/books`
///
/// Either `book_id` names an existing book, or `title` and `author`
/// describe a new one.
#[derive(Debug, Default, Deserialize)]
pub struct AddGroupBookRequest {
    pub book_id: Option<Uuid>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub open_library_id: Option<String>,
    pub cover_url: Option<String>,
}

/// A book as attached to a group
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct GroupBook {
    pub id: Uuid,
    pub group_id: Uuid,
    pub book_id: Uuid,
    pub added_by: Option<Uuid>,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupBookResponse {
    #[serde(flatten)]
    pub group_book: GroupBook,
    pub book: Book,
}
