//! Reading Progress Database Operations
//!
//! Page, total and percentage are always written by a single statement, so
//! a concurrent reader never sees a half-applied update.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::progress::types::{MemberProgress, ProgressWithBook, ReadingProgress};
use crate::shared::{Percentage, ReadingPosition};

const PROGRESS_COLUMNS: &str =
    "id, user_id, book_id, group_id, current_page, total_pages, progress_percentage, updated_at";

/// Insert or replace the reader's progress for (book, group)
///
/// The `UNIQUE (user_id, book_id, group_id)` constraint makes concurrent
/// first writes converge on one row.
pub async fn upsert_progress(
    pool: &SqlitePool,
    user_id: Uuid,
    book_id: Uuid,
    group_id: Uuid,
    position: ReadingPosition,
) -> Result<ReadingProgress, sqlx::Error> {
    sqlx::query_as::<_, ReadingProgress>(&format!(
        r#"
        INSERT INTO reading_progress
            (id, user_id, book_id, group_id, current_page, total_pages, progress_percentage, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT (user_id, book_id, group_id) DO UPDATE SET
            current_page = excluded.current_page,
            total_pages = excluded.total_pages,
            progress_percentage = excluded.progress_percentage,
            updated_at = excluded.updated_at
        RETURNING {PROGRESS_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(book_id)
    .bind(group_id)
    .bind(i64::from(position.page()))
    .bind(i64::from(position.total()))
    .bind(i64::from(position.percentage()))
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}

pub async fn get_progress_by_id(
    pool: &SqlitePool,
    progress_id: Uuid,
) -> Result<Option<ReadingProgress>, sqlx::Error> {
    sqlx::query_as::<_, ReadingProgress>(&format!(
        "SELECT {PROGRESS_COLUMNS} FROM reading_progress WHERE id = ?"
    ))
    .bind(progress_id)
    .fetch_optional(pool)
    .await
}

pub async fn get_user_progress(
    pool: &SqlitePool,
    user_id: Uuid,
    book_id: Uuid,
    group_id: Uuid,
) -> Result<Option<ReadingProgress>, sqlx::Error> {
    sqlx::query_as::<_, ReadingProgress>(&format!(
        r#"
        SELECT {PROGRESS_COLUMNS} FROM reading_progress
        WHERE user_id = ? AND book_id = ? AND group_id = ?
        "#
    ))
    .bind(user_id)
    .bind(book_id)
    .bind(group_id)
    .fetch_optional(pool)
    .await
}

/// The reader's recorded percentage, if any
pub async fn get_user_percentage(
    pool: &SqlitePool,
    user_id: Uuid,
    book_id: Uuid,
    group_id: Uuid,
) -> Result<Option<Percentage>, sqlx::Error> {
    Ok(get_user_progress(pool, user_id, book_id, group_id)
        .await?
        .map(|progress| progress.progress_percentage))
}

pub async fn update_progress(
    pool: &SqlitePool,
    progress_id: Uuid,
    position: ReadingPosition,
) -> Result<Option<ReadingProgress>, sqlx::Error> {
    sqlx::query_as::<_, ReadingProgress>(&format!(
        r#"
        UPDATE reading_progress
        SET current_page = ?, total_pages = ?, progress_percentage = ?, updated_at = ?
        WHERE id = ?
        RETURNING {PROGRESS_COLUMNS}
        "#
    ))
    .bind(i64::from(position.page()))
    .bind(i64::from(position.total()))
    .bind(i64::from(position.percentage()))
    .bind(Utc::now())
    .bind(progress_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_progress(pool: &SqlitePool, progress_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM reading_progress WHERE id = ?")
        .bind(progress_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// The reader's progress across books, most recently updated first
pub async fn list_progress_for_user(
    pool: &SqlitePool,
    user_id: Uuid,
    group_id: Option<Uuid>,
) -> Result<Vec<ProgressWithBook>, sqlx::Error> {
    sqlx::query_as::<_, ProgressWithBook>(
        r#"
        SELECT p.id, p.user_id, p.book_id, p.group_id, p.current_page, p.total_pages,
               p.progress_percentage, p.updated_at,
               b.title AS book_title, b.author AS book_author, b.cover_url AS book_cover_url
        FROM reading_progress p
        JOIN books b ON b.id = p.book_id
        WHERE p.user_id = ? AND (? IS NULL OR p.group_id = ?)
        ORDER BY p.updated_at DESC
        "#,
    )
    .bind(user_id)
    .bind(group_id)
    .bind(group_id)
    .fetch_all(pool)
    .await
}

/// Every member's progress on a book, furthest first
pub async fn list_group_book_progress(
    pool: &SqlitePool,
    group_id: Uuid,
    book_id: Uuid,
) -> Result<Vec<MemberProgress>, sqlx::Error> {
    sqlx::query_as::<_, MemberProgress>(
        r#"
        SELECT p.id, p.user_id, p.book_id, p.group_id, p.current_page, p.total_pages,
               p.progress_percentage, p.updated_at,
               u.name AS user_name, u.avatar_url AS user_avatar_url
        FROM reading_progress p
        JOIN users u ON u.id = p.user_id
        WHERE p.group_id = ? AND p.book_id = ?
        ORDER BY p.progress_percentage DESC, p.updated_at
        "#,
    )
    .bind(group_id)
    .bind(book_id)
    .fetch_all(pool)
    .await
}
