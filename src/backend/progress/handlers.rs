//! Reading Progress HTTP Handlers
//!
//! A reader's progress is the only input to what they can see, so every
//! write goes through `ReadingPosition::new` before touching storage.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::books::db::get_book;
use crate::backend::error::BackendError;
use crate::backend::groups::access::require_member;
use crate::backend::middleware::AuthUser;
use crate::backend::progress::db;
use crate::backend::progress::types::{
    MemberProgress, ProgressQuery, ProgressWithBook, ReadingProgress, RecordProgressRequest,
    UpdateProgressRequest,
};
use crate::shared::ReadingPosition;

/// Record (or overwrite) the caller's position in a book
///
/// # Errors
///
/// * `403 Forbidden` - Not a member of the group
/// * `404 Not Found` - Group or book does not exist
/// * `400 Bad Request` - Page outside `0..=total_pages`, or `total_pages <= 0`
pub async fn record_progress(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Json(request): Json<RecordProgressRequest>,
) -> Result<(StatusCode, Json<ReadingProgress>), BackendError> {
    require_member(&pool, request.group_id, user.user_id).await?;
    if get_book(&pool, request.book_id).await?.is_none() {
        return Err(BackendError::not_found("Book not found"));
    }
    let position = ReadingPosition::new(request.current_page, request.total_pages)?;

    let progress = db::upsert_progress(
        &pool,
        user.user_id,
        request.book_id,
        request.group_id,
        position,
    )
    .await?;

    tracing::info!(
        "User {} is at {}% of book {} in group {}",
        user.user_id,
        progress.progress_percentage,
        request.book_id,
        request.group_id
    );
    Ok((StatusCode::CREATED, Json(progress)))
}

/// The caller's progress across books, optionally limited to one group
pub async fn list_my_progress(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Query(query): Query<ProgressQuery>,
) -> Result<Json<Vec<ProgressWithBook>>, BackendError> {
    let progress = db::list_progress_for_user(&pool, user.user_id, query.group_id).await?;
    Ok(Json(progress))
}

pub async fn get_my_book_progress(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path((group_id, book_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ReadingProgress>, BackendError> {
    let progress = db::get_user_progress(&pool, user.user_id, book_id, group_id)
        .await?
        .ok_or_else(|| BackendError::not_found("No progress recorded for this book"))?;
    Ok(Json(progress))
}

/// Every member's progress on a book, furthest first
pub async fn list_group_book_progress(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path((group_id, book_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Vec<MemberProgress>>, BackendError> {
    require_member(&pool, group_id, user.user_id).await?;
    Ok(Json(db::list_group_book_progress(&pool, group_id, book_id).await?))
}

pub async fn update_progress(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(progress_id): Path<Uuid>,
    Json(request): Json<UpdateProgressRequest>,
) -> Result<Json<ReadingProgress>, BackendError> {
    owned_progress(&pool, progress_id, user.user_id).await?;
    let position = ReadingPosition::new(request.current_page, request.total_pages)?;

    let progress = db::update_progress(&pool, progress_id, position)
        .await?
        .ok_or_else(|| BackendError::not_found("Progress not found"))?;
    Ok(Json(progress))
}

pub async fn delete_progress(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(progress_id): Path<Uuid>,
) -> Result<StatusCode, BackendError> {
    owned_progress(&pool, progress_id, user.user_id).await?;
    db::delete_progress(&pool, progress_id).await?;

    tracing::info!("User {} deleted progress {}", user.user_id, progress_id);
    Ok(StatusCode::NO_CONTENT)
}

async fn owned_progress(
    pool: &SqlitePool,
    progress_id: Uuid,
    user_id: Uuid,
) -> Result<ReadingProgress, BackendError> {
    let progress = db::get_progress_by_id(pool, progress_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Progress not found"))?;
    if progress.user_id != user_id {
        tracing::warn!("User {} tried to modify progress {} of another user", user_id, progress_id);
        return Err(BackendError::forbidden("You can only modify your own progress"));
    }
    Ok(progress)
}
