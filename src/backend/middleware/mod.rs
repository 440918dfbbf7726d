//! Request Middleware
//!
//! - **`auth`** - Bearer-token authentication and the `AuthUser` extractor

pub mod auth;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
