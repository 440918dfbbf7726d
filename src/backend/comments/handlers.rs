//! Comment HTTP Handlers
//!
//! Every read goes through [`VisibilityThreshold`]: a reader sees a comment
//! only if it was written at or before their own recorded progress in the
//! same (group, book). Readers with no progress row see only comments made
//! at 0%.
//!
//! # Direct lookups
//!
//! `GET /api/comments/{comment_id}` keeps three failures apart:
//!
//! | Situation                   | Status | `code`                  |
//! |-----------------------------|--------|-------------------------|
//! | No such comment             | 404    | `not_found`             |
//! | Caller not in the group     | 403    | `forbidden`             |
//! | Past the caller's progress  | 403    | `insufficient_progress` |

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::books::db::get_group_book;
use crate::backend::cascade;
use crate::backend::comments::db::{self, NewComment};
use crate::backend::comments::types::{
    CommentLike, CommentView, CreateCommentRequest, ReportCommentRequest, SpoilerReport,
    UpdateCommentRequest,
};
use crate::backend::error::BackendError;
use crate::backend::groups::access::require_member;
use crate::backend::middleware::AuthUser;
use crate::backend::progress::db::get_user_percentage;
use crate::shared::validate::{optional_text_length, text_length};
use crate::shared::{AppConfig, ReadingPosition, VisibilityThreshold};

const MAX_REASON_LENGTH: usize = 1000;

/// Post a comment pinned to the author's stated position
///
/// # Errors
///
/// * `403 Forbidden` - Not a member of the group
/// * `404 Not Found` - Group missing, book not in the group, or parent missing
/// * `400 Bad Request` - Bad content length or position, or a parent from
///   another discussion
pub async fn create_comment(
    State(pool): State<SqlitePool>,
    State(config): State<Arc<AppConfig>>,
    AuthUser(user): AuthUser,
    Path(group_id): Path<Uuid>,
    Json(request): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentView>), BackendError> {
    require_member(&pool, group_id, user.user_id).await?;
    if get_group_book(&pool, group_id, request.book_id).await?.is_none() {
        return Err(BackendError::not_found("Book is not in this group"));
    }
    text_length("content", &request.content, config.max_comment_length)?;
    let position = ReadingPosition::new(request.progress_page, request.progress_total_pages)?;

    if let Some(parent_id) = request.parent_comment_id {
        let parent = db::get_comment_view(&pool, parent_id, user.user_id)
            .await?
            .ok_or_else(|| BackendError::not_found("Parent comment not found"))?;
        if parent.group_id != group_id || parent.book_id != request.book_id {
            return Err(BackendError::bad_request(
                "Parent comment belongs to a different discussion",
            ));
        }
    }

    let comment_id = db::create_comment(
        &pool,
        &NewComment {
            group_id,
            book_id: request.book_id,
            user_id: user.user_id,
            content: &request.content,
            position,
            parent_comment_id: request.parent_comment_id,
        },
    )
    .await?;

    let comment = db::get_comment_view(&pool, comment_id, user.user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Comment not found"))?;

    tracing::info!(
        "User {} commented on book {} in group {} at {}%",
        user.user_id,
        request.book_id,
        group_id,
        comment.progress_percentage
    );
    Ok((StatusCode::CREATED, Json(comment)))
}

/// Comments the caller has reached, by progress then age
pub async fn list_comments(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path((group_id, book_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Vec<CommentView>>, BackendError> {
    let (threshold, comments) = discussion(&pool, group_id, book_id, user.user_id).await?;
    Ok(Json(threshold.visible(comments)))
}

/// Comments past the caller's progress, same shape and order as the listing
pub async fn list_ahead_comments(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path((group_id, book_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Vec<CommentView>>, BackendError> {
    let (threshold, comments) = discussion(&pool, group_id, book_id, user.user_id).await?;
    Ok(Json(threshold.ahead(comments)))
}

pub async fn get_comment(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(comment_id): Path<Uuid>,
) -> Result<Json<CommentView>, BackendError> {
    Ok(Json(visible_comment(&pool, comment_id, user.user_id).await?))
}

/// Author-only edit; the progress marker stays as written
pub async fn update_comment(
    State(pool): State<SqlitePool>,
    State(config): State<Arc<AppConfig>>,
    AuthUser(user): AuthUser,
    Path(comment_id): Path<Uuid>,
    Json(request): Json<UpdateCommentRequest>,
) -> Result<Json<CommentView>, BackendError> {
    authored_comment(&pool, comment_id, user.user_id).await?;
    text_length("content", &request.content, config.max_comment_length)?;

    db::update_comment_content(&pool, comment_id, &request.content).await?;
    let comment = db::get_comment_view(&pool, comment_id, user.user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Comment not found"))?;
    Ok(Json(comment))
}

/// Author-only; replies go with it
pub async fn delete_comment(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(comment_id): Path<Uuid>,
) -> Result<StatusCode, BackendError> {
    authored_comment(&pool, comment_id, user.user_id).await?;

    let removed = cascade::delete_comment_thread(&pool, comment_id).await?;
    if removed.is_empty() {
        return Err(BackendError::not_found("Comment not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn like_comment(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(comment_id): Path<Uuid>,
) -> Result<(StatusCode, Json<CommentLike>), BackendError> {
    let comment = visible_comment(&pool, comment_id, user.user_id).await?;
    if comment.user_has_liked {
        return Err(BackendError::conflict("You already liked this comment"));
    }

    let like = db::like_comment(&pool, comment_id, user.user_id).await?;
    Ok((StatusCode::CREATED, Json(like)))
}

pub async fn unlike_comment(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(comment_id): Path<Uuid>,
) -> Result<StatusCode, BackendError> {
    if !db::unlike_comment(&pool, comment_id, user.user_id).await? {
        return Err(BackendError::not_found("Like not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Flag a comment as a spoiler for the group admins to review
pub async fn report_comment(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(comment_id): Path<Uuid>,
    Json(request): Json<ReportCommentRequest>,
) -> Result<(StatusCode, Json<SpoilerReport>), BackendError> {
    visible_comment(&pool, comment_id, user.user_id).await?;
    optional_text_length("reason", request.reason.as_deref(), MAX_REASON_LENGTH)?;

    let report = db::create_report(&pool, comment_id, user.user_id, request.reason.as_deref()).await?;
    tracing::info!("User {} reported comment {} as a spoiler", user.user_id, comment_id);
    Ok((StatusCode::CREATED, Json(report)))
}

/// Caller's threshold and the raw comment list for one discussion
async fn discussion(
    pool: &SqlitePool,
    group_id: Uuid,
    book_id: Uuid,
    user_id: Uuid,
) -> Result<(VisibilityThreshold, Vec<CommentView>), BackendError> {
    require_member(pool, group_id, user_id).await?;

    let threshold =
        VisibilityThreshold::for_reader(get_user_percentage(pool, user_id, book_id, group_id).await?);
    let comments = db::list_comments_for_book(pool, group_id, book_id, user_id).await?;
    Ok((threshold, comments))
}

/// Fetch a comment the caller is allowed to read
async fn visible_comment(
    pool: &SqlitePool,
    comment_id: Uuid,
    user_id: Uuid,
) -> Result<CommentView, BackendError> {
    let comment = db::get_comment_view(pool, comment_id, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Comment not found"))?;
    require_member(pool, comment.group_id, user_id).await?;

    let recorded = get_user_percentage(pool, user_id, comment.book_id, comment.group_id).await?;
    if let Err(e) = VisibilityThreshold::for_reader(recorded).check(&comment) {
        tracing::warn!("User {} is not far enough along to read comment {}", user_id, comment_id);
        return Err(e.into());
    }
    Ok(comment)
}

async fn authored_comment(
    pool: &SqlitePool,
    comment_id: Uuid,
    user_id: Uuid,
) -> Result<CommentView, BackendError> {
    let comment = db::get_comment_view(pool, comment_id, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Comment not found"))?;
    if comment.user_id != user_id {
        return Err(BackendError::forbidden("You can only modify your own comments"));
    }
    Ok(comment)
}
