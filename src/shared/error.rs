//! Shared Error Types
//!
//! This module defines error types raised by the platform-agnostic domain code
//! (progress arithmetic, visibility checks, configuration parsing). They carry
//! no HTTP semantics; the backend maps each variant onto a status code.
//!
//! # Error Categories
//!
//! - `SerializationError` - JSON serialization/deserialization failures
//! - `ValidationError` - Data validation failures
//! - `InsufficientProgress` - A reader tried to see a comment beyond their progress
//!
//! # Usage
//!
//! ```rust
//! use bookclub::shared::error::SharedError;
//!
//! let error = SharedError::validation("total_pages", "must be greater than zero");
//! ```
use thiserror::Error;

use crate::shared::progress::Percentage;

/// Shared error types that can occur in domain code
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// The reader has not read far enough to see the requested item
    #[error("Insufficient reading progress: requires {required}%, you are at {current}%")]
    InsufficientProgress {
        /// Progress marker of the requested item
        required: Percentage,
        /// The reader's visibility threshold
        current: Percentage,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new insufficient-progress error
    pub fn insufficient_progress(required: Percentage, current: Percentage) -> Self {
        Self::InsufficientProgress { required, current }
    }
}
