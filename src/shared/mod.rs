//! Shared Module
//!
//! Domain types with no I/O: progress arithmetic, the spoiler-visibility
//! rule, the reply tree, configuration and shared errors. The backend builds
//! on these; they are usable on their own in any client that needs to apply
//! the same rules.

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Fixed-point reading progress
pub mod progress;

/// Progress-gated comment visibility
pub mod visibility;

/// Reply tree over comment ids
pub mod comment_tree;

/// Input validation helpers
pub mod validate;

pub use comment_tree::CommentTree;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::SharedError;
pub use progress::{Percentage, ReadingPosition};
pub use visibility::{ProgressMarked, VisibilityThreshold};
