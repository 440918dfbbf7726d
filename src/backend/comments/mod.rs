//! Book Discussion
//!
//! Comments are pinned to the page the author had reached when writing.
//! Reads are filtered against the reader's own progress so nobody is shown
//! a comment from further into the book than they are.

pub mod types;
pub mod db;
pub mod handlers;

pub use types::CommentView;
