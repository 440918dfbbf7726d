//! Group HTTP Handlers
//!
//! Membership is checked through `groups::access` before anything scoped to
//! a group is read or written.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::cascade;
use crate::backend::comments::db as comments_db;
use crate::backend::comments::types::{ReportStatus, ReviewReportRequest, SpoilerReport};
use crate::backend::error::BackendError;
use crate::backend::groups::access::{require_admin, require_member};
use crate::backend::groups::db;
use crate::backend::groups::invite::normalize_invite_code;
use crate::backend::groups::types::{
    CreateGroupRequest, Group, GroupDetail, GroupMember, GroupSummary, JoinGroupRequest,
    MemberRole, MemberWithUser, UpdateGroupRequest,
};
use crate::backend::middleware::AuthUser;
use crate::shared::validate::{optional_text_length, text_length};
use crate::shared::AppConfig;

const MAX_NAME_LENGTH: usize = 255;
const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// Create a group; the caller becomes its first admin
pub async fn create_group(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Json(request): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<Group>), BackendError> {
    text_length("name", &request.name, MAX_NAME_LENGTH)?;
    optional_text_length("description", request.description.as_deref(), MAX_DESCRIPTION_LENGTH)?;

    let group = db::create_group(
        &pool,
        request.name.trim(),
        request.description.as_deref(),
        user.user_id,
    )
    .await?;

    tracing::info!("User {} created group {}", user.user_id, group.id);
    Ok((StatusCode::CREATED, Json(group)))
}

/// Groups the caller belongs to
pub async fn list_groups(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<GroupSummary>>, BackendError> {
    let groups = db::list_groups_for_user(&pool, user.user_id).await?;
    Ok(Json(groups))
}

pub async fn get_group(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(group_id): Path<Uuid>,
) -> Result<Json<GroupDetail>, BackendError> {
    require_member(&pool, group_id, user.user_id).await?;

    let group = db::get_group(&pool, group_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Group not found"))?;
    let members = db::list_members(&pool, group_id).await?;

    Ok(Json(GroupDetail {
        group,
        member_count: members.len(),
        members,
    }))
}

/// Admin-only partial update
pub async fn update_group(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(group_id): Path<Uuid>,
    Json(request): Json<UpdateGroupRequest>,
) -> Result<Json<Group>, BackendError> {
    require_admin(&pool, group_id, user.user_id).await?;
    optional_text_length("name", request.name.as_deref(), MAX_NAME_LENGTH)?;
    optional_text_length("description", request.description.as_deref(), MAX_DESCRIPTION_LENGTH)?;

    let group = db::update_group(
        &pool,
        group_id,
        request.name.as_deref().map(str::trim),
        request.description.as_deref(),
    )
    .await?
    .ok_or_else(|| BackendError::not_found("Group not found"))?;

    Ok(Json(group))
}

/// Admin-only; removes the group with its books, progress and discussion
pub async fn delete_group(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(group_id): Path<Uuid>,
) -> Result<StatusCode, BackendError> {
    require_admin(&pool, group_id, user.user_id).await?;

    if !cascade::delete_group(&pool, group_id).await? {
        return Err(BackendError::not_found("Group not found"));
    }

    tracing::info!("User {} deleted group {}", user.user_id, group_id);
    Ok(StatusCode::NO_CONTENT)
}

/// Join a group by invite code
///
/// # Errors
///
/// * `404 Not Found` - Unknown invite code
/// * `409 Conflict` - Already a member
/// * `400 Bad Request` - Group is full
pub async fn join_group(
    State(pool): State<SqlitePool>,
    State(config): State<Arc<AppConfig>>,
    AuthUser(user): AuthUser,
    Json(request): Json<JoinGroupRequest>,
) -> Result<Json<Group>, BackendError> {
    let code = normalize_invite_code(&request.invite_code);
    let group = db::get_group_by_invite_code(&pool, &code)
        .await?
        .ok_or_else(|| BackendError::not_found("Invalid invite code"))?;

    if db::get_membership(&pool, group.id, user.user_id).await?.is_some() {
        return Err(BackendError::conflict("You are already a member of this group"));
    }

    let joined = db::add_member_within_limit(&pool, group.id, user.user_id, config.max_group_members)
        .await?;
    if joined.is_none() {
        tracing::warn!("User {} tried to join full group {}", user.user_id, group.id);
        return Err(BackendError::bad_request(format!(
            "Group has reached the maximum of {} members",
            config.max_group_members
        )));
    }

    tracing::info!("User {} joined group {}", user.user_id, group.id);
    Ok(Json(group))
}

/// Leave a group; the last admin has to promote someone first
pub async fn leave_group(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(group_id): Path<Uuid>,
) -> Result<StatusCode, BackendError> {
    let membership = db::get_membership(&pool, group_id, user.user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("You are not a member of this group"))?;

    ensure_not_last_admin(&pool, &membership).await?;
    db::remove_member(&pool, group_id, user.user_id).await?;

    tracing::info!("User {} left group {}", user.user_id, group_id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_members(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(group_id): Path<Uuid>,
) -> Result<Json<Vec<MemberWithUser>>, BackendError> {
    require_member(&pool, group_id, user.user_id).await?;
    Ok(Json(db::list_members(&pool, group_id).await?))
}

/// Admin-only removal of another member
pub async fn remove_member(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path((group_id, member_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, BackendError> {
    require_admin(&pool, group_id, user.user_id).await?;

    let target = db::get_membership(&pool, group_id, member_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Member not found"))?;
    ensure_not_last_admin(&pool, &target).await?;

    db::remove_member(&pool, group_id, member_id).await?;
    tracing::info!("Admin {} removed {} from group {}", user.user_id, member_id, group_id);
    Ok(StatusCode::NO_CONTENT)
}

/// Admin-only promotion of a member to admin
pub async fn promote_member(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path((group_id, member_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<GroupMember>, BackendError> {
    require_admin(&pool, group_id, user.user_id).await?;

    let target = db::get_membership(&pool, group_id, member_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Member not found"))?;
    if target.is_admin() {
        return Err(BackendError::bad_request("Member is already an admin"));
    }

    let promoted = db::set_member_role(&pool, group_id, member_id, MemberRole::Admin)
        .await?
        .ok_or_else(|| BackendError::not_found("Member not found"))?;

    tracing::info!("Admin {} promoted {} in group {}", user.user_id, member_id, group_id);
    Ok(Json(promoted))
}

/// Admin-only list of spoiler reports against the group's comments
pub async fn list_reports(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path(group_id): Path<Uuid>,
) -> Result<Json<Vec<SpoilerReport>>, BackendError> {
    require_admin(&pool, group_id, user.user_id).await?;
    Ok(Json(comments_db::list_reports_for_group(&pool, group_id).await?))
}

/// Admin-only: mark a report resolved or dismissed
pub async fn review_report(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    Path((group_id, report_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<ReviewReportRequest>,
) -> Result<Json<SpoilerReport>, BackendError> {
    require_admin(&pool, group_id, user.user_id).await?;
    if request.status == ReportStatus::Pending {
        return Err(BackendError::validation("status", "must be resolved or dismissed"));
    }

    let report = comments_db::set_report_status(&pool, group_id, report_id, request.status)
        .await?
        .ok_or_else(|| BackendError::not_found("Report not found"))?;

    tracing::info!("Admin {} set report {} to {:?}", user.user_id, report_id, report.status);
    Ok(Json(report))
}

async fn ensure_not_last_admin(pool: &SqlitePool, member: &GroupMember) -> Result<(), BackendError> {
    if member.is_admin() && db::count_admins(pool, member.group_id).await? <= 1 {
        return Err(BackendError::bad_request(
            "Cannot remove the last admin; promote another member first",
        ));
    }
    Ok(())
}
