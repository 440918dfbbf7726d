//! User Handlers Module
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! └── me.rs       - Current user and profile handlers
//! ```
//!
//! # Handlers
//!
//! - **`get_me`** - GET /api/auth/me and GET /api/users/me
//! - **`update_me`** - PUT /api/users/me
//! - **`get_user`** - GET /api/users/{user_id}

/// Request and response types
pub mod types;

/// Current user handlers
pub mod me;

pub use me::{get_me, get_user, update_me};
