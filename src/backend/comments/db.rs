//! Comment Database Operations
//!
//! Queries return [`CommentView`] rows already joined with the author and
//! the viewer's like state. Rows come back in insertion order; filtering and
//! display ordering happen in `shared::visibility`.

use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::backend::comments::types::{CommentLike, CommentView, ReportStatus, SpoilerReport};
use crate::shared::ReadingPosition;

/// Shared SELECT for comment views; binds the viewer id first
const VIEW_SELECT: &str = r#"
    SELECT c.id, c.group_id, c.book_id, c.user_id, c.content,
           c.progress_page, c.progress_total_pages, c.progress_percentage,
           c.parent_comment_id, c.created_at, c.updated_at,
           (SELECT COUNT(*) FROM comment_likes l WHERE l.comment_id = c.id) AS like_count,
           EXISTS (
               SELECT 1 FROM comment_likes l WHERE l.comment_id = c.id AND l.user_id = ?
           ) AS user_has_liked,
           u.name AS user_name, u.avatar_url AS user_avatar_url
    FROM comments c
    JOIN users u ON u.id = c.user_id
"#;

const REPORT_COLUMNS: &str = "id, comment_id, reported_by, reason, status, created_at";

/// Fields of a comment about to be written
#[derive(Debug, Clone)]
pub struct NewComment<'a> {
    pub group_id: Uuid,
    pub book_id: Uuid,
    pub user_id: Uuid,
    pub content: &'a str,
    pub position: ReadingPosition,
    pub parent_comment_id: Option<Uuid>,
}

/// Insert a comment, freezing the author's progress marker
///
/// # Returns
/// The new comment's id
pub async fn create_comment(pool: &SqlitePool, comment: &NewComment<'_>) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO comments
            (id, group_id, book_id, user_id, content, progress_page, progress_total_pages,
             progress_percentage, parent_comment_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(comment.group_id)
    .bind(comment.book_id)
    .bind(comment.user_id)
    .bind(comment.content)
    .bind(i64::from(comment.position.page()))
    .bind(i64::from(comment.position.total()))
    .bind(i64::from(comment.position.percentage()))
    .bind(comment.parent_comment_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(id)
}

/// One comment as seen by `viewer_id`, without any visibility check
pub async fn get_comment_view(
    pool: &SqlitePool,
    comment_id: Uuid,
    viewer_id: Uuid,
) -> Result<Option<CommentView>, sqlx::Error> {
    sqlx::query_as::<_, CommentView>(&format!("{VIEW_SELECT} WHERE c.id = ?"))
        .bind(viewer_id)
        .bind(comment_id)
        .fetch_optional(pool)
        .await
}

/// Every comment on a book in a group, in insertion order
pub async fn list_comments_for_book(
    pool: &SqlitePool,
    group_id: Uuid,
    book_id: Uuid,
    viewer_id: Uuid,
) -> Result<Vec<CommentView>, sqlx::Error> {
    sqlx::query_as::<_, CommentView>(&format!(
        "{VIEW_SELECT} WHERE c.group_id = ? AND c.book_id = ? ORDER BY c.rowid"
    ))
    .bind(viewer_id)
    .bind(group_id)
    .bind(book_id)
    .fetch_all(pool)
    .await
}

/// Replace a comment's text; progress fields are never touched
pub async fn update_comment_content(
    pool: &SqlitePool,
    comment_id: Uuid,
    content: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE comments SET content = ?, updated_at = ? WHERE id = ?")
        .bind(content)
        .bind(Utc::now())
        .bind(comment_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// (id, parent) pairs for every comment on a book in a group
///
/// Takes any executor so the cascade can read the tree inside its
/// transaction.
pub async fn list_thread_edges<'e, E>(
    executor: E,
    group_id: Uuid,
    book_id: Uuid,
) -> Result<Vec<(Uuid, Option<Uuid>)>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, (Uuid, Option<Uuid>)>(
        "SELECT id, parent_comment_id FROM comments WHERE group_id = ? AND book_id = ? ORDER BY rowid",
    )
    .bind(group_id)
    .bind(book_id)
    .fetch_all(executor)
    .await
}

/// Record a like; a second like by the same user is a unique violation
pub async fn like_comment(
    pool: &SqlitePool,
    comment_id: Uuid,
    user_id: Uuid,
) -> Result<CommentLike, sqlx::Error> {
    sqlx::query_as::<_, CommentLike>(
        r#"
        INSERT INTO comment_likes (id, comment_id, user_id, created_at)
        VALUES (?, ?, ?, ?)
        RETURNING id, comment_id, user_id, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(comment_id)
    .bind(user_id)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}

/// Remove a like; returns whether one existed
pub async fn unlike_comment(
    pool: &SqlitePool,
    comment_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comment_likes WHERE comment_id = ? AND user_id = ?")
        .bind(comment_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn create_report(
    pool: &SqlitePool,
    comment_id: Uuid,
    reported_by: Uuid,
    reason: Option<&str>,
) -> Result<SpoilerReport, sqlx::Error> {
    sqlx::query_as::<_, SpoilerReport>(&format!(
        r#"
        INSERT INTO spoiler_reports (id, comment_id, reported_by, reason, status, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING {REPORT_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(comment_id)
    .bind(reported_by)
    .bind(reason)
    .bind(ReportStatus::Pending)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}

/// Reports filed against comments in a group, oldest first
pub async fn list_reports_for_group(
    pool: &SqlitePool,
    group_id: Uuid,
) -> Result<Vec<SpoilerReport>, sqlx::Error> {
    sqlx::query_as::<_, SpoilerReport>(
        r#"
        SELECT r.id, r.comment_id, r.reported_by, r.reason, r.status, r.created_at
        FROM spoiler_reports r
        JOIN comments c ON c.id = r.comment_id
        WHERE c.group_id = ?
        ORDER BY r.created_at, r.rowid
        "#,
    )
    .bind(group_id)
    .fetch_all(pool)
    .await
}

/// Set a report's status, provided it belongs to `group_id`
pub async fn set_report_status(
    pool: &SqlitePool,
    group_id: Uuid,
    report_id: Uuid,
    status: ReportStatus,
) -> Result<Option<SpoilerReport>, sqlx::Error> {
    sqlx::query_as::<_, SpoilerReport>(&format!(
        r#"
        UPDATE spoiler_reports SET status = ?
        WHERE id = ?
          AND comment_id IN (SELECT id FROM comments WHERE group_id = ?)
        RETURNING {REPORT_COLUMNS}
        "#
    ))
    .bind(status)
    .bind(report_id)
    .bind(group_id)
    .fetch_optional(pool)
    .await
}
