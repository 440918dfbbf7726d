/**
 * User Model and Database Operations
 *
 * Users are never registered explicitly. The first authenticated request
 * carrying a new token subject creates the row; later requests refresh the
 * email and last-login time.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

/// User struct representing a user in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Subject of the identity provider's token
    pub external_id: String,
    /// User email address
    pub email: String,
    /// Display name
    pub name: String,
    pub avatar_url: Option<String>,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Last authenticated request
    pub last_login: DateTime<Utc>,
}

/// Identity details taken from a verified token
#[derive(Debug, Clone)]
pub struct ExternalIdentity {
    pub external_id: String,
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
}

/// Create the user for `identity`, or refresh the existing one
///
/// Name and avatar are only taken from the token on first sight so that a
/// profile edited through `PUT /api/users/me` is not overwritten.
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `identity` - Claims from a verified bearer token
///
/// # Returns
/// The stored user
pub async fn upsert_user(
    pool: &SqlitePool,
    identity: &ExternalIdentity,
) -> Result<User, sqlx::Error> {
    let now = Utc::now();

    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, external_id, email, name, avatar_url, created_at, last_login)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT (external_id) DO UPDATE
            SET email = excluded.email, last_login = excluded.last_login
        RETURNING id, external_id, email, name, avatar_url, created_at, last_login
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&identity.external_id)
    .bind(&identity.email)
    .bind(&identity.name)
    .bind(&identity.avatar_url)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Get user by ID
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, external_id, email, name, avatar_url, created_at, last_login
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Update the editable profile fields
///
/// `None` leaves a field unchanged.
pub async fn update_profile(
    pool: &SqlitePool,
    id: Uuid,
    name: Option<&str>,
    avatar_url: Option<&str>,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET name = COALESCE(?, name), avatar_url = COALESCE(?, avatar_url)
        WHERE id = ?
        RETURNING id, external_id, email, name, avatar_url, created_at, last_login
        "#,
    )
    .bind(name)
    .bind(avatar_url)
    .bind(id)
    .fetch_optional(pool)
    .await
}
