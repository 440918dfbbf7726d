//! Book Database Operations

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::books::types::{Book, GroupBook, NewBook};

const BOOK_COLUMNS: &str = "id, title, author, isbn, open_library_id, cover_url, created_at";

/// Get book by ID
pub async fn get_book(pool: &SqlitePool, book_id: Uuid) -> Result<Option<Book>, sqlx::Error> {
    sqlx::query_as::<_, Book>(&format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = ?"))
        .bind(book_id)
        .fetch_optional(pool)
        .await
}

async fn find_book_by(
    pool: &SqlitePool,
    column: &str,
    value: &str,
) -> Result<Option<Book>, sqlx::Error> {
    sqlx::query_as::<_, Book>(&format!(
        "SELECT {BOOK_COLUMNS} FROM books WHERE {column} = ? ORDER BY created_at LIMIT 1"
    ))
    .bind(value)
    .fetch_optional(pool)
    .await
}

/// Store a book, reusing an existing row with the same ISBN or Open Library ID
///
/// ISBN is checked before Open Library ID.
pub async fn create_book(pool: &SqlitePool, new_book: &NewBook) -> Result<Book, sqlx::Error> {
    if let Some(isbn) = new_book.isbn.as_deref().filter(|s| !s.is_empty()) {
        if let Some(existing) = find_book_by(pool, "isbn", isbn).await? {
            tracing::debug!("Reusing book {} for ISBN {}", existing.id, isbn);
            return Ok(existing);
        }
    }
    if let Some(ol_id) = new_book.open_library_id.as_deref().filter(|s| !s.is_empty()) {
        if let Some(existing) = find_book_by(pool, "open_library_id", ol_id).await? {
            tracing::debug!("Reusing book {} for Open Library ID {}", existing.id, ol_id);
            return Ok(existing);
        }
    }

    sqlx::query_as::<_, Book>(&format!(
        r#"
        INSERT INTO books (id, title, author, isbn, open_library_id, cover_url, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING {BOOK_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(&new_book.title)
    .bind(&new_book.author)
    .bind(&new_book.isbn)
    .bind(&new_book.open_library_id)
    .bind(&new_book.cover_url)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}

pub async fn get_group_book(
    pool: &SqlitePool,
    group_id: Uuid,
    book_id: Uuid,
) -> Result<Option<GroupBook>, sqlx::Error> {
    sqlx::query_as::<_, GroupBook>(
        r#"
        SELECT id, group_id, book_id, added_by, added_at
        FROM group_books
        WHERE group_id = ? AND book_id = ?
        "#,
    )
    .bind(group_id)
    .bind(book_id)
    .fetch_optional(pool)
    .await
}

/// Attach a book to a group
///
/// Fails with a unique violation if the book is already attached.
pub async fn add_book_to_group(
    pool: &SqlitePool,
    group_id: Uuid,
    book_id: Uuid,
    added_by: Uuid,
) -> Result<GroupBook, sqlx::Error> {
    sqlx::query_as::<_, GroupBook>(
        r#"
        INSERT INTO group_books (id, group_id, book_id, added_by, added_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, group_id, book_id, added_by, added_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(group_id)
    .bind(book_id)
    .bind(added_by)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}

/// Books attached to a group, newest first
pub async fn list_group_books(
    pool: &SqlitePool,
    group_id: Uuid,
) -> Result<Vec<(GroupBook, Book)>, sqlx::Error> {
    let group_books = sqlx::query_as::<_, GroupBook>(
        r#"
        SELECT id, group_id, book_id, added_by, added_at
        FROM group_books
        WHERE group_id = ?
        ORDER BY added_at DESC
        "#,
    )
    .bind(group_id)
    .fetch_all(pool)
    .await?;

    let mut result = Vec::with_capacity(group_books.len());
    for group_book in group_books {
        if let Some(book) = get_book(pool, group_book.book_id).await? {
            result.push((group_book, book));
        }
    }
    Ok(result)
}
