//! Server Module
//!
//! Everything needed to stand the HTTP server up.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Database pool creation and migrations
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration**: the binary builds an `AppConfig` from the environment
//! 2. **Database**: `load_database` opens the pool and migrates the schema
//! 3. **State**: `AppState` wraps the pool, config and Open Library client
//! 4. **Router**: `create_router` mounts the API behind auth, CORS and tracing
//!
//! # Example
//!
//! ```rust,no_run
//! use bookclub::backend::server::create_app;
//! use bookclub::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::builder().jwt_secret("change-me").build()?;
//! let app = create_app(config).await?;
//! # let _ = app;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Database loading
pub mod config;

/// Server initialization
pub mod init;

pub use init::{create_app, InitError};
pub use state::AppState;
