//! Comment request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::{Percentage, ProgressMarked};

/// A comment as shown to one viewer
///
/// `like_count` and `user_has_liked` are computed for the viewer that
/// issued the query.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CommentView {
    pub id: Uuid,
    pub group_id: Uuid,
    pub book_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub progress_page: i64,
    pub progress_total_pages: i64,
    #[sqlx(try_from = "i64")]
    pub progress_percentage: Percentage,
    pub parent_comment_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub like_count: i64,
    pub user_has_liked: bool,
    pub user_name: String,
    pub user_avatar_url: Option<String>,
}

impl ProgressMarked for CommentView {
    fn progress(&self) -> Percentage {
        self.progress_percentage
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Body of `POST /api/groups/{group_id}/comments`
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub book_id: Uuid,
    pub content: String,
    pub progress_page: i64,
    pub progress_total_pages: i64,
    pub parent_comment_id: Option<Uuid>,
}

/// Body of `PUT /api/comments/{comment_id}`
#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CommentLike {
    pub id: Uuid,
    pub comment_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Review state of a spoiler report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Resolved,
    Dismissed,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SpoilerReport {
    pub id: Uuid,
    pub comment_id: Uuid,
    pub reported_by: Uuid,
    pub reason: Option<String>,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/comments/{comment_id}/report`
#[derive(Debug, Default, Deserialize)]
pub struct ReportCommentRequest {
    pub reason: Option<String>,
}

/// Body of `PUT /api/groups/{group_id}/reports/{report_id}`
#[derive(Debug, Deserialize)]
pub struct ReviewReportRequest {
    pub status: ReportStatus,
}
