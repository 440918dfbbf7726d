//! Group Database Operations

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::backend::groups::invite::generate_invite_code;
use crate::backend::groups::types::{Group, GroupMember, GroupSummary, MemberRole, MemberWithUser};

const GROUP_COLUMNS: &str = "id, name, description, invite_code, created_by, created_at";
const MEMBER_COLUMNS: &str = "id, group_id, user_id, role, joined_at";
const INVITE_ATTEMPTS: usize = 5;

/// Create a group with `created_by` as its first admin
///
/// The group and the admin membership are written in one transaction. A
/// colliding invite code is regenerated a few times before giving up.
pub async fn create_group(
    pool: &SqlitePool,
    name: &str,
    description: Option<&str>,
    created_by: Uuid,
) -> Result<Group, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let mut attempt = 0;

    let group = loop {
        attempt += 1;
        let result = sqlx::query_as::<_, Group>(&format!(
            r#"
            INSERT INTO groups (id, name, description, invite_code, created_by, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING {GROUP_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(description)
        .bind(generate_invite_code())
        .bind(created_by)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await;

        match result {
            Ok(group) => break group,
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() && attempt < INVITE_ATTEMPTS => {
                tracing::warn!("Invite code collision, retrying (attempt {})", attempt);
            }
            Err(e) => return Err(e),
        }
    };

    insert_member(&mut tx, group.id, created_by, MemberRole::Admin).await?;
    tx.commit().await?;

    Ok(group)
}

pub async fn get_group(pool: &SqlitePool, group_id: Uuid) -> Result<Option<Group>, sqlx::Error> {
    sqlx::query_as::<_, Group>(&format!("SELECT {GROUP_COLUMNS} FROM groups WHERE id = ?"))
        .bind(group_id)
        .fetch_optional(pool)
        .await
}

pub async fn get_group_by_invite_code(
    pool: &SqlitePool,
    invite_code: &str,
) -> Result<Option<Group>, sqlx::Error> {
    sqlx::query_as::<_, Group>(&format!(
        "SELECT {GROUP_COLUMNS} FROM groups WHERE invite_code = ?"
    ))
    .bind(invite_code)
    .fetch_optional(pool)
    .await
}

/// Groups `user_id` belongs to, most recently joined first
pub async fn list_groups_for_user(
    pool: &SqlitePool,
    user_id: Uuid,
) -> Result<Vec<GroupSummary>, sqlx::Error> {
    sqlx::query_as::<_, GroupSummary>(
        r#"
        SELECT g.id, g.name, g.description, g.invite_code, g.created_by, g.created_at,
               (SELECT COUNT(*) FROM group_members c WHERE c.group_id = g.id) AS member_count
        FROM groups g
        JOIN group_members m ON m.group_id = g.id
        WHERE m.user_id = ?
        ORDER BY m.joined_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Apply a partial update; `None` keeps the stored value
pub async fn update_group(
    pool: &SqlitePool,
    group_id: Uuid,
    name: Option<&str>,
    description: Option<&str>,
) -> Result<Option<Group>, sqlx::Error> {
    sqlx::query_as::<_, Group>(&format!(
        r#"
        UPDATE groups
        SET name = COALESCE(?, name), description = COALESCE(?, description)
        WHERE id = ?
        RETURNING {GROUP_COLUMNS}
        "#
    ))
    .bind(name)
    .bind(description)
    .bind(group_id)
    .fetch_optional(pool)
    .await
}

pub async fn get_membership(
    pool: &SqlitePool,
    group_id: Uuid,
    user_id: Uuid,
) -> Result<Option<GroupMember>, sqlx::Error> {
    sqlx::query_as::<_, GroupMember>(&format!(
        "SELECT {MEMBER_COLUMNS} FROM group_members WHERE group_id = ? AND user_id = ?"
    ))
    .bind(group_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

async fn insert_member(
    conn: &mut SqliteConnection,
    group_id: Uuid,
    user_id: Uuid,
    role: MemberRole,
) -> Result<GroupMember, sqlx::Error> {
    sqlx::query_as::<_, GroupMember>(&format!(
        r#"
        INSERT INTO group_members (id, group_id, user_id, role, joined_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING {MEMBER_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(group_id)
    .bind(user_id)
    .bind(role)
    .bind(Utc::now())
    .fetch_one(conn)
    .await
}

/// Add a member if the group has room
///
/// The count and the insert share a transaction so two joins racing for
/// the last seat cannot both succeed. Returns `None` when the group is full.
pub async fn add_member_within_limit(
    pool: &SqlitePool,
    group_id: Uuid,
    user_id: Uuid,
    limit: u32,
) -> Result<Option<GroupMember>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM group_members WHERE group_id = ?")
        .bind(group_id)
        .fetch_one(&mut *tx)
        .await?;
    if count >= i64::from(limit) {
        return Ok(None);
    }

    let member = insert_member(&mut tx, group_id, user_id, MemberRole::Member).await?;
    tx.commit().await?;
    Ok(Some(member))
}

/// Remove a membership; returns whether a row was deleted
pub async fn remove_member(
    pool: &SqlitePool,
    group_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM group_members WHERE group_id = ? AND user_id = ?")
        .bind(group_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn set_member_role(
    pool: &SqlitePool,
    group_id: Uuid,
    user_id: Uuid,
    role: MemberRole,
) -> Result<Option<GroupMember>, sqlx::Error> {
    sqlx::query_as::<_, GroupMember>(&format!(
        r#"
        UPDATE group_members SET role = ?
        WHERE group_id = ? AND user_id = ?
        RETURNING {MEMBER_COLUMNS}
        "#
    ))
    .bind(role)
    .bind(group_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn count_admins(pool: &SqlitePool, group_id: Uuid) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM group_members WHERE group_id = ? AND role = 'admin'",
    )
    .bind(group_id)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Members with their profiles, in join order
pub async fn list_members(
    pool: &SqlitePool,
    group_id: Uuid,
) -> Result<Vec<MemberWithUser>, sqlx::Error> {
    sqlx::query_as::<_, MemberWithUser>(
        r#"
        SELECT m.id, m.group_id, m.user_id, m.role, m.joined_at,
               u.name AS user_name, u.email AS user_email, u.avatar_url AS user_avatar_url
        FROM group_members m
        JOIN users u ON u.id = m.user_id
        WHERE m.group_id = ?
        ORDER BY m.joined_at, m.rowid
        "#,
    )
    .bind(group_id)
    .fetch_all(pool)
    .await
}
