//! Integration tests
//!
//! Drive the real router over an in-memory database.

#[path = "../common/mod.rs"]
mod common;
