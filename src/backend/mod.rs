//! Backend Module
//!
//! The HTTP server: an Axum API over SQLite where reading groups track
//! their progress through books and discuss them without spoiling each
//! other.
//!
//! # Architecture
//!
//! - **`server`** - Database loading, application state, startup
//! - **`routes`** - Router assembly, CORS, tracing
//! - **`middleware`** - Bearer token authentication
//! - **`auth`** - Token verification and the user table
//! - **`groups`** - Groups, membership, invite codes, report review
//! - **`books`** - Book catalogue, group reading lists, Open Library search
//! - **`progress`** - Per-reader progress through a book
//! - **`comments`** - Progress-gated discussion, likes, spoiler reports
//! - **`cascade`** - Transactional multi-table deletes
//! - **`error`** - `BackendError` and its JSON response
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Startup and state
//! ├── routes/         - Route configuration
//! ├── middleware/     - Request middleware
//! ├── auth/           - Authentication and users
//! ├── groups/         - Reading groups
//! ├── books/          - Books and search
//! ├── progress/       - Reading progress
//! ├── comments/       - Discussion
//! ├── cascade.rs      - Explicit cascading deletes
//! └── error/          - Error types
//! ```
//!
//! # Spoiler gating
//!
//! Each comment stores the author's page and total at the time of writing.
//! A reader sees a comment only if its percentage is at most the reader's
//! own recorded percentage for that (group, book); see
//! [`crate::shared::VisibilityThreshold`].
//!
//! # Example
//!
//! ```rust,no_run
//! use bookclub::backend::create_app;
//! use bookclub::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(config).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Reading groups and membership
pub mod groups;

/// Books and Open Library search
pub mod books;

/// Reading progress
pub mod progress;

/// Progress-gated comments
pub mod comments;

/// Explicit cascading deletes
pub mod cascade;

pub use error::{BackendError, BackendResult};
pub use server::{create_app, AppState};
