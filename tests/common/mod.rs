//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - In-memory database fixtures
//! - A test server wired to the real router
//! - Token minting for test users
//! - An Open Library mock
//! - Custom assertion macros

#![allow(dead_code)]

pub mod assertions;
pub mod auth_helpers;
pub mod database;
pub mod open_library;

// Re-export commonly used utilities
pub use app::*;
pub use auth_helpers::*;
pub use database::*;
pub use open_library::*;
