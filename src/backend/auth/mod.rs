//! Authentication Module
//!
//! Verifies bearer tokens issued by the identity provider and keeps the
//! local user table in step with them.
//!
//! # Architecture
//!
//! - **`users`** - User data model and database operations
//! - **`sessions`** - JWT verification
//! - **`handlers`** - HTTP handlers for the current user and profiles
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and database operations
//! ├── sessions.rs     - JWT verification
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── types.rs    - Request/response types
//!     └── me.rs       - Current user and profile handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. The client obtains an HS256 token from the identity provider
//! 2. Every `/api` request carries it as `Authorization: Bearer <token>`
//! 3. `auth_middleware` verifies it and upserts the user by token subject
//! 4. Handlers receive the user through the `AuthUser` extractor
//!
//! # Security
//!
//! - Tokens are verified with the secret from `AppConfig`, never a default
//! - Expired or tampered tokens return 401

/// User data model and database operations
pub mod users;

/// JWT verification
pub mod sessions;

/// HTTP handlers for user endpoints
pub mod handlers;

pub use handlers::types::{PublicUserResponse, UserResponse};
pub use handlers::{get_me, get_user, update_me};
