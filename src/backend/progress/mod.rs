//! Reading Progress
//!
//! One row per (reader, book, group). The stored percentage is the
//! reader's visibility threshold for that book's discussion.

pub mod types;
pub mod db;
pub mod handlers;

pub use types::ReadingProgress;
