//! Backend Error Module
//!
//! Error types returned by handlers and services, and their HTTP encoding.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - From<sqlx::Error> and IntoResponse
//! ```
//!
//! # HTTP Response Conversion
//!
//! `BackendError` implements `IntoResponse`, so handlers return
//! `Result<_, BackendError>` and use `?` throughout. Every error response
//! carries a `code` field; `not_found`, `forbidden` and
//! `insufficient_progress` are always distinct.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::BackendError;

/// Result alias for backend operations
pub type BackendResult<T> = Result<T, BackendError>;
