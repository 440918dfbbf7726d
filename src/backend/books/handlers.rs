//! Book HTTP Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::books::db;
use crate::backend::books::search::OpenLibraryClient;
use crate::backend::books::types::{
    AddGroupBookRequest, Book, BookSearchQuery, BookSearchResult, GroupBookResponse, NewBook,
};
use crate::backend::cascade;
use crate::backend::error::BackendError;
use crate::backend::groups::access::{require_admin, require_member};
use crate::backend::middleware::AuthUser;
use crate::shared::validate::text_length;

const DEFAULT_SEARCH_LIMIT: u32 = 10;
const MAX_SEARCH_LIMIT: u32 = 50;
const MAX_TITLE_LENGTH: usize = 500;

/// Search Open Library
///
/// `limit` defaults to 10 and is clamped to 1..=50.
///
/// # Errors
///
/// * `400 Bad Request` - Empty query
/// * `503 Service Unavailable` - Open Library unreachable or returned garbage
pub async fn search_books(
    State(client): State<OpenLibraryClient>,
    Query(query): Query<BookSearchQuery>,
) -> Result<Json<Vec<BookSearchResult>>, BackendError> {
    let q = query.q.trim();
    if q.is_empty() {
        return Err(BackendError::bad_request("Search query must not be empty"));
    }
    let limit = query
        .limit
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .clamp(1, MAX_SEARCH_LIMIT);

    Ok(Json(client.search(q, limit).await?))
}

pub async fn get_book(
    State(pool): State<SqlitePool>,
    Path(book_id): Path<Uuid>,
) -> Result<Json<Book>, BackendError> {
    let book = db::get_book(&pool, book_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Book not found"))?;
    Ok(Json(book))
}

/// Attach a book to a group, creating the book first if needed
///
/// The body either names an existing `book_id` or carries `title` and
/// `author` for a new book. New books are de-duplicated by ISBN, then by
/// Open Library ID.
pub async fn add_group_book(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(group_id): Path<Uuid>,
    Json(request): Json<AddGroupBookRequest>,
) -> Result<(StatusCode, Json<GroupBookResponse>), BackendError> {
    require_member(&pool, group_id, user.user_id).await?;

    let book = match request.book_id {
        Some(book_id) => db::get_book(&pool, book_id)
            .await?
            .ok_or_else(|| BackendError::not_found("Book not found"))?,
        None => {
            let title = request.title.unwrap_or_default();
            let author = request.author.unwrap_or_default();
            text_length("title", &title, MAX_TITLE_LENGTH)?;
            text_length("author", &author, MAX_TITLE_LENGTH)?;

            db::create_book(
                &pool,
                &NewBook {
                    title: title.trim().to_string(),
                    author: author.trim().to_string(),
                    isbn: request.isbn,
                    open_library_id: request.open_library_id,
                    cover_url: request.cover_url,
                },
            )
            .await?
        }
    };

    if db::get_group_book(&pool, group_id, book.id).await?.is_some() {
        return Err(BackendError::conflict("Book is already in this group"));
    }
    let group_book = db::add_book_to_group(&pool, group_id, book.id, user.user_id).await?;

    tracing::info!("User {} added book {} to group {}", user.user_id, book.id, group_id);
    Ok((StatusCode::CREATED, Json(GroupBookResponse { group_book, book })))
}

pub async fn list_group_books(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(group_id): Path<Uuid>,
) -> Result<Json<Vec<GroupBookResponse>>, BackendError> {
    require_member(&pool, group_id, user.user_id).await?;

    let books = db::list_group_books(&pool, group_id)
        .await?
        .into_iter()
        .map(|(group_book, book)| GroupBookResponse { group_book, book })
        .collect();
    Ok(Json(books))
}

/// Admin-only; also drops the book's comments and progress in this group
pub async fn remove_group_book(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path((group_id, book_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, BackendError> {
    require_admin(&pool, group_id, user.user_id).await?;

    if !cascade::remove_group_book(&pool, group_id, book_id).await? {
        return Err(BackendError::not_found("Book is not in this group"));
    }

    tracing::info!("Admin {} removed book {} from group {}", user.user_id, book_id, group_id);
    Ok(StatusCode::NO_CONTENT)
}
