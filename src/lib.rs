//! BookClub - Main Library
//!
//! Backend for reading groups that read the same book at different speeds.
//! Members record how far they have read, post comments pinned to their
//! current page, and only ever see comments from at or before their own
//! position in the book.
//!
//! # Module Structure
//!
//! - **`shared`** - Domain rules with no I/O
//!   - Fixed-point progress percentages and reading positions
//!   - The visibility threshold and display ordering
//!   - Reply tree, configuration, shared errors
//!
//! - **`backend`** - The Axum server
//!   - SQLite storage via sqlx with embedded migrations
//!   - Bearer JWT authentication
//!   - Groups, books, progress, comments, spoiler reports
//!
//! # Usage
//!
//! ```rust,no_run
//! use bookclub::backend::server::create_app;
//! use bookclub::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(AppConfig::from_env()?).await?;
//! # let _ = app;
//! # Ok(())
//! # }
//! ```
//!
//! Applying the visibility rule on its own:
//!
//! ```rust
//! use bookclub::shared::{ReadingPosition, VisibilityThreshold};
//!
//! let reader = ReadingPosition::new(85, 200).unwrap().percentage();
//! let threshold = VisibilityThreshold::for_reader(Some(reader));
//!
//! assert!(threshold.allows(ReadingPosition::new(85, 200).unwrap().percentage()));
//! assert!(!threshold.allows(ReadingPosition::new(86, 200).unwrap().percentage()));
//! ```

pub mod shared;

pub mod backend;
