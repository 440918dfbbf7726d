/**
 * Database Configuration
 *
 * Opens the SQLite pool named by `AppConfig::database_url` and applies the
 * embedded migrations from `migrations/`.
 *
 * # Error Handling
 *
 * The server cannot do anything useful without its database, so failures
 * are returned to the caller and abort startup.
 */

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Load and initialize the database connection pool
///
/// This function:
/// 1. Parses the connection string (creating the file if missing)
/// 2. Opens a pool with foreign keys enforced
/// 3. Runs database migrations
///
/// # Errors
///
/// Any connection or migration failure.
pub async fn load_database(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!("Connecting to database at {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;
    tracing::info!("Database migrations completed successfully");

    Ok(pool)
}

/// Private in-memory database with the schema applied
///
/// A single connection is used because every SQLite `:memory:` connection is
/// its own database.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;
    Ok(pool)
}

async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
