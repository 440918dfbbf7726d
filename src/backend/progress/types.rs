//! Reading progress request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::Percentage;

/// One reader's position in one book within one group
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ReadingProgress {
    pub id: Uuid,
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub group_id: Uuid,
    pub current_page: i64,
    pub total_pages: i64,
    #[sqlx(try_from = "i64")]
    pub progress_percentage: Percentage,
    pub updated_at: DateTime<Utc>,
}

/// Progress with the book it refers to, for "my progress"
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProgressWithBook {
    pub id: Uuid,
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub group_id: Uuid,
    pub current_page: i64,
    pub total_pages: i64,
    #[sqlx(try_from = "i64")]
    pub progress_percentage: Percentage,
    pub updated_at: DateTime<Utc>,
    pub book_title: String,
    pub book_author: String,
    pub book_cover_url: Option<String>,
}

/// Progress with the reader it belongs to, for group overviews
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MemberProgress {
    pub id: Uuid,
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub group_id: Uuid,
    pub current_page: i64,
    pub total_pages: i64,
    #[sqlx(try_from = "i64")]
    pub progress_percentage: Percentage,
    pub updated_at: DateTime<Utc>,
    pub user_name: String,
    pub user_avatar_url: Option<String>,
}

/// Body of `POST /api/progress`
#[derive(Debug, Deserialize)]
pub struct RecordProgressRequest {
    pub book_id: Uuid,
    pub group_id: Uuid,
    pub current_page: i64,
    pub total_pages: i64,
}

/// Body of `PUT /api/progress/{progress_id}`
#[derive(Debug, Deserialize)]
pub struct UpdateProgressRequest {
    pub current_page: i64,
    pub total_pages: i64,
}

/// Query string for `GET /api/progress`
#[derive(Debug, Default, Deserialize)]
pub struct ProgressQuery {
    pub group_id: Option<Uuid>,
}
