//! Explicit Cascading Deletes
//!
//! The schema declares no `ON DELETE CASCADE`. Every removal that takes
//! dependent rows with it is spelled out here and runs in one transaction,
//! children before parents, so foreign keys hold at every statement.
//!
//! | Removed | Also removed |
//! |---|---|
//! | group | members, group books, progress, comments, likes, reports |
//! | book from a group | that book's comments, likes, reports and progress in the group |
//! | book | the above in every group, then the book |
//! | comment | its reply subtree with their likes and reports |

use sqlx::sqlite::SqliteArguments;
use sqlx::{Sqlite, SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::backend::comments::db::list_thread_edges;
use crate::shared::CommentTree;

type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

/// Which comments and progress rows a cleanup touches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Group(Uuid),
    Book(Uuid),
    GroupBook { group_id: Uuid, book_id: Uuid },
}

impl Scope {
    fn predicate(self) -> &'static str {
        match self {
            Scope::Group(_) => "group_id = ?",
            Scope::Book(_) => "book_id = ?",
            Scope::GroupBook { .. } => "group_id = ? AND book_id = ?",
        }
    }

    fn bind(self, query: SqliteQuery<'_>) -> SqliteQuery<'_> {
        match self {
            Scope::Group(group_id) => query.bind(group_id),
            Scope::Book(book_id) => query.bind(book_id),
            Scope::GroupBook { group_id, book_id } => query.bind(group_id).bind(book_id),
        }
    }
}

/// Delete comments in scope together with their likes and reports
async fn purge_comments(conn: &mut SqliteConnection, scope: Scope) -> Result<u64, sqlx::Error> {
    let predicate = scope.predicate();

    for table in ["comment_likes", "spoiler_reports"] {
        let sql = format!(
            "DELETE FROM {table} WHERE comment_id IN (SELECT id FROM comments WHERE {predicate})"
        );
        scope.bind(sqlx::query(&sql)).execute(&mut *conn).await?;
    }

    // Parents and replies share the scope, so one statement removes both
    let sql = format!("DELETE FROM comments WHERE {predicate}");
    let result = scope.bind(sqlx::query(&sql)).execute(&mut *conn).await?;
    Ok(result.rows_affected())
}

async fn purge_progress(conn: &mut SqliteConnection, scope: Scope) -> Result<u64, sqlx::Error> {
    let sql = format!("DELETE FROM reading_progress WHERE {}", scope.predicate());
    let result = scope.bind(sqlx::query(&sql)).execute(&mut *conn).await?;
    Ok(result.rows_affected())
}

/// Delete a group and everything scoped to it
///
/// # Returns
/// Whether the group existed
pub async fn delete_group(pool: &SqlitePool, group_id: Uuid) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let scope = Scope::Group(group_id);

    let comments = purge_comments(&mut tx, scope).await?;
    let progress = purge_progress(&mut tx, scope).await?;
    sqlx::query("DELETE FROM group_books WHERE group_id = ?")
        .bind(group_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM group_members WHERE group_id = ?")
        .bind(group_id)
        .execute(&mut *tx)
        .await?;
    let deleted = sqlx::query("DELETE FROM groups WHERE id = ?")
        .bind(group_id)
        .execute(&mut *tx)
        .await?
        .rows_affected()
        > 0;

    tx.commit().await?;
    tracing::info!(
        "Deleted group {} ({} comments, {} progress rows)",
        group_id,
        comments,
        progress
    );
    Ok(deleted)
}

/// Detach a book from a group along with its discussion and progress there
///
/// # Returns
/// Whether the book was attached
pub async fn remove_group_book(
    pool: &SqlitePool,
    group_id: Uuid,
    book_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let scope = Scope::GroupBook { group_id, book_id };

    purge_comments(&mut tx, scope).await?;
    purge_progress(&mut tx, scope).await?;
    let removed = sqlx::query("DELETE FROM group_books WHERE group_id = ? AND book_id = ?")
        .bind(group_id)
        .bind(book_id)
        .execute(&mut *tx)
        .await?
        .rows_affected()
        > 0;

    tx.commit().await?;
    Ok(removed)
}

/// Delete a book from every group and then the book itself
pub async fn delete_book(pool: &SqlitePool, book_id: Uuid) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let scope = Scope::Book(book_id);

    purge_comments(&mut tx, scope).await?;
    purge_progress(&mut tx, scope).await?;
    sqlx::query("DELETE FROM group_books WHERE book_id = ?")
        .bind(book_id)
        .execute(&mut *tx)
        .await?;
    let deleted = sqlx::query("DELETE FROM books WHERE id = ?")
        .bind(book_id)
        .execute(&mut *tx)
        .await?
        .rows_affected()
        > 0;

    tx.commit().await?;
    Ok(deleted)
}

/// Delete a comment and all replies beneath it
///
/// # Returns
/// Ids removed, deepest replies first; empty if the comment did not exist
pub async fn delete_comment_thread(
    pool: &SqlitePool,
    comment_id: Uuid,
) -> Result<Vec<Uuid>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let location: Option<(Uuid, Uuid)> =
        sqlx::query_as("SELECT group_id, book_id FROM comments WHERE id = ?")
            .bind(comment_id)
            .fetch_optional(&mut *tx)
            .await?;
    let Some((group_id, book_id)) = location else {
        return Ok(Vec::new());
    };

    let edges = list_thread_edges(&mut *tx, group_id, book_id).await?;

    let doomed = CommentTree::build(edges).subtree(comment_id);
    for id in &doomed {
        for sql in [
            "DELETE FROM comment_likes WHERE comment_id = ?",
            "DELETE FROM spoiler_reports WHERE comment_id = ?",
            "DELETE FROM comments WHERE id = ?",
        ] {
            sqlx::query(sql).bind(*id).execute(&mut *tx).await?;
        }
    }

    tx.commit().await?;
    tracing::info!("Deleted comment {} with {} replies", comment_id, doomed.len() - 1);
    Ok(doomed)
}
