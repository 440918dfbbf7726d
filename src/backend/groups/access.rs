//! Group access checks shared by every module that scopes data to a group.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::error::{BackendError, BackendResult};
use crate::backend::groups::db;
use crate::backend::groups::types::GroupMember;

/// Membership of `user_id` in `group_id`
///
/// # Errors
///
/// - `NotFound` if the group does not exist
/// - `Forbidden` if it exists but the user is not a member
pub async fn require_member(
    pool: &SqlitePool,
    group_id: Uuid,
    user_id: Uuid,
) -> BackendResult<GroupMember> {
    if let Some(member) = db::get_membership(pool, group_id, user_id).await? {
        return Ok(member);
    }
    if db::get_group(pool, group_id).await?.is_none() {
        return Err(BackendError::not_found("Group not found"));
    }
    tracing::warn!("User {} is not a member of group {}", user_id, group_id);
    Err(BackendError::forbidden("You are not a member of this group"))
}

/// Like [`require_member`], but the member must also be an admin
pub async fn require_admin(
    pool: &SqlitePool,
    group_id: Uuid,
    user_id: Uuid,
) -> BackendResult<GroupMember> {
    let member = require_member(pool, group_id, user_id).await?;
    if !member.is_admin() {
        tracing::warn!("User {} is not an admin of group {}", user_id, group_id);
        return Err(BackendError::forbidden("Only group admins can do this"));
    }
    Ok(member)
}
