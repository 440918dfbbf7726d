/**
 * Backend Error Types
 *
 * This module defines the error type returned by every HTTP handler and
 * service function in the backend.
 *
 * # Error Categories
 *
 * ## Request Errors
 *
 * - `NotFound` - The addressed resource does not exist
 * - `Forbidden` - The caller lacks the role or membership for the action
 * - `BadRequest` / `Conflict` - The request breaks a business rule
 * - `Unauthorized` - Missing or invalid bearer token
 *
 * ## Domain Errors
 *
 * `SharedError` wraps validation failures and the spoiler gate
 * (`InsufficientProgress`). The spoiler gate maps to 403 like `Forbidden`
 * but carries its own machine-readable code so clients can tell "you are
 * not allowed here" apart from "keep reading".
 *
 * ## Infrastructure Errors
 *
 * - `Upstream` - Open Library is unreachable or returned an error
 * - `Database` - sqlx failure; details are logged, never returned
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use bookclub::backend::error::BackendError;
///
/// let err = BackendError::not_found("Comment not found");
/// assert_eq!(err.code(), "not_found");
///
/// let err = BackendError::forbidden("Only group admins can do this");
/// assert_eq!(err.status_code().as_u16(), 403);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// External service failure
    #[error("Upstream error: {message}")]
    Upstream { message: String },

    /// Shared error (validation, insufficient progress)
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Database error
    ///
    /// Converted from `sqlx::Error` in `conversion.rs`, which maps unique
    /// violations to `Conflict` first.
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BackendError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Shorthand for a field validation failure
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SharedError(SharedError::validation(field, message))
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `NotFound` - 404
    /// - `Forbidden`, `InsufficientProgress` - 403
    /// - `BadRequest`, `ValidationError` - 400
    /// - `Conflict` - 409
    /// - `Unauthorized` - 401
    /// - `Upstream` - 503
    /// - everything else - 500
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Upstream { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::SharedError(err) => match err {
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::InsufficientProgress { .. } => StatusCode::FORBIDDEN,
            },
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code, stable across releases
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Forbidden { .. } => "forbidden",
            Self::BadRequest { .. } => "bad_request",
            Self::Conflict { .. } => "conflict",
            Self::Unauthorized { .. } => "unauthorized",
            Self::Upstream { .. } => "upstream_unavailable",
            Self::SharedError(err) => match err {
                SharedError::SerializationError { .. } => "internal_error",
                SharedError::ValidationError { .. } => "validation_error",
                SharedError::InsufficientProgress { .. } => "insufficient_progress",
            },
            Self::Database(_) | Self::SerializationError(_) => "internal_error",
        }
    }

    /// Get the error message
    ///
    /// Internal failures return a generic message; their detail only goes
    /// to the log.
    pub fn message(&self) -> String {
        match self {
            Self::NotFound { message }
            | Self::Forbidden { message }
            | Self::BadRequest { message }
            | Self::Conflict { message }
            | Self::Unauthorized { message }
            | Self::Upstream { message } => message.clone(),
            Self::SharedError(SharedError::SerializationError { .. }) => {
                "Internal server error".to_string()
            }
            Self::SharedError(err) => err.to_string(),
            Self::Database(_) | Self::SerializationError(_) => "Internal server error".to_string(),
        }
    }
}
