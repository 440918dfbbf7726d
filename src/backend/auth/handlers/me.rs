/**
 * Current User Handlers
 *
 * `GET /api/auth/me` and `GET /api/users/me` return the caller's account,
 * `PUT /api/users/me` edits it, and `GET /api/users/{user_id}` returns the
 * public part of anyone's profile.
 *
 * # Authentication
 *
 * All routes sit behind `auth_middleware`, so by the time a handler runs
 * the user row exists.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::auth::handlers::types::{PublicUserResponse, UpdateUserRequest, UserResponse};
use crate::backend::auth::users::{get_user_by_id, update_profile};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::shared::validate::optional_text_length;

const MAX_NAME_LENGTH: usize = 255;

/// Get current user handler
///
/// # Errors
///
/// * `404 Not Found` - If the user row disappeared after authentication
///
/// # Example Response
///
/// ```json
/// {
///   "id": "123e4567-e89b-12d3-a456-426614174000",
///   "email": "reader@example.com",
///   "name": "Reader",
///   "avatar_url": null,
///   "created_at": "2024-01-01T00:00:00Z",
///   "last_login": "2024-01-02T00:00:00Z"
/// }
/// ```
pub async fn get_me(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
) -> Result<Json<UserResponse>, BackendError> {
    let user = get_user_by_id(&pool, user.user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    Ok(Json(user.into()))
}

/// Update the caller's display name and avatar
///
/// # Errors
///
/// * `400 Bad Request` - Name empty or longer than 255 characters
pub async fn update_me(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, BackendError> {
    optional_text_length("name", request.name.as_deref(), MAX_NAME_LENGTH)?;

    let updated = update_profile(
        &pool,
        user.user_id,
        request.name.as_deref(),
        request.avatar_url.as_deref(),
    )
    .await?
    .ok_or_else(|| BackendError::not_found("User not found"))?;

    tracing::info!("User {} updated their profile", updated.id);
    Ok(Json(updated.into()))
}

/// Public profile of any user
pub async fn get_user(
    State(pool): State<SqlitePool>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<PublicUserResponse>, BackendError> {
    let user = get_user_by_id(&pool, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    Ok(Json(user.into()))
}
