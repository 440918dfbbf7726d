/**
 * Server Initialization
 *
 * # Initialization Process
 *
 * 1. Open the database and run migrations
 * 2. Build the shared state around the pool and configuration
 * 3. Create the router
 */

use axum::Router;
use thiserror::Error;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::shared::AppConfig;

/// Startup failure
#[derive(Debug, Error)]
pub enum InitError {
    #[error("database initialization failed: {0}")]
    Database(#[from] sqlx::Error),
    #[error("HTTP client initialization failed: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Create and configure the Axum application
///
/// # Arguments
///
/// * `config` - Validated configuration
///
/// # Returns
///
/// Router ready to be passed to `axum::serve`
///
/// # Errors
///
/// Database connection or migration failure, or HTTP client setup failure.
pub async fn create_app(config: AppConfig) -> Result<Router<()>, InitError> {
    tracing::info!("Initializing bookclub backend server");

    let db = load_database(&config.database_url).await?;
    let app_state = AppState::new(db, config)?;

    let app = create_router(app_state);
    tracing::info!("Router configured");

    Ok(app)
}
