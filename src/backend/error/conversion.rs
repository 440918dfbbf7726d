/**
 * Error Conversion
 *
 * Conversions into `BackendError` from library errors, and from
 * `BackendError` into an HTTP response.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "You don't have sufficient reading progress to view this comment",
 *   "code": "insufficient_progress",
 *   "status": 403
 * }
 * ```
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::backend::error::types::BackendError;

impl From<sqlx::Error> for BackendError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => BackendError::not_found("Record not found"),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                BackendError::conflict("Record already exists")
            }
            _ => BackendError::Database(err),
        }
    }
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Internal error: {}", self);
        } else {
            tracing::debug!("Request failed with {}: {}", status, self);
        }

        let body = serde_json::json!({
            "error": self.message(),
            "code": self.code(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}
