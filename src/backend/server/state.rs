/**
 * Application State Management
 *
 * `AppState` holds everything a handler needs: the database pool, the
 * configuration the server was started with, and the Open Library client.
 * Each part is cheap to clone (`SqlitePool` and `reqwest::Client` are
 * reference-counted, the config sits behind an `Arc`).
 *
 * # State Extraction
 *
 * The `FromRef` implementations let handlers extract only the part they
 * use, e.g. `State(pool): State<SqlitePool>`.
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::books::search::OpenLibraryClient;
use crate::shared::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub books: OpenLibraryClient,
}

impl AppState {
    /// Assemble state around an open pool
    ///
    /// # Errors
    ///
    /// Fails only if the HTTP client cannot be built (TLS backend init).
    pub fn new(db: SqlitePool, config: AppConfig) -> Result<Self, reqwest::Error> {
        let books = OpenLibraryClient::new(config.open_library_url.clone())?;
        Ok(Self {
            db,
            config: Arc::new(config),
            books,
        })
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db.clone()
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}

impl FromRef<AppState> for OpenLibraryClient {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.books.clone()
    }
}
