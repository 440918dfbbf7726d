//! Books
//!
//! The shared book catalogue, group reading lists, and the Open Library
//! search proxy.

pub mod types;
pub mod db;
pub mod search;
pub mod handlers;

pub use search::OpenLibraryClient;
pub use types::Book;
