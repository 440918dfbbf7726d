//! Route Configuration Module
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Router assembly, CORS, tracing, health check
//! └── api_routes.rs   - Authenticated API endpoints
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use bookclub::backend::routes::create_router;
//! use bookclub::backend::server::{config::connect_in_memory, AppState};
//! use bookclub::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::builder().jwt_secret("change-me").build()?;
//! let state = AppState::new(connect_in_memory().await?, config)?;
//! let router = create_router(state);
//! # let _ = router;
//! # Ok(())
//! # }
//! ```

/// Main router creation
pub mod router;

/// Authenticated API endpoints
pub mod api_routes;

pub use router::create_router;
