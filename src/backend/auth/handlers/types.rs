/**
 * User Handler Types
 *
 * Request and response types for the current-user and profile endpoints.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::auth::users::User;

/// The caller's own account
///
/// The identity-provider subject stays server-side.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            email: user.email,
            name: user.name,
            avatar_url: user.avatar_url,
            created_at: user.created_at,
            last_login: user.last_login,
        }
    }
}

/// What other members may see about a user
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PublicUserResponse {
    pub id: Uuid,
    pub name: String,
    pub avatar_url: Option<String>,
}

impl From<User> for PublicUserResponse {
    fn from(user: User) -> Self {
        PublicUserResponse {
            id: user.id,
            name: user.name,
            avatar_url: user.avatar_url,
        }
    }
}

/// Body of `PUT /api/users/me`; absent fields are left alone
#[derive(Deserialize, Debug, Default)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}
