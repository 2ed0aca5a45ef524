//! Postgres-backed [`BookStore`].

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use super::{
    error::BookError,
    models::{Book, BookRequest},
    store::BookStore,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, author, year, created_at, updated_at";

pub struct PgBookStore {
    pool: PgPool,
}

impl PgBookStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Log a backend failure with its context and wrap it as `StoreUnavailable`.
fn unavailable(
    operation: &'static str,
    id: Option<Uuid>,
) -> impl FnOnce(sqlx::Error) -> BookError {
    move |source| {
        tracing::error!(operation, book_id = ?id, error = %source, "book store query failed");
        BookError::StoreUnavailable { operation, source }
    }
}

/// Keep the rows that decoded, in order. An unreadable row is logged and
/// dropped instead of failing the whole listing.
fn readable_books<I>(rows: I) -> Vec<Book>
where
    I: IntoIterator<Item = Result<Book, sqlx::Error>>,
{
    rows.into_iter()
        .filter_map(|row| match row {
            Ok(book) => Some(book),
            Err(err) => {
                tracing::error!(error = %err, "skipping unreadable book row");
                None
            }
        })
        .collect()
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn list(&self) -> Result<Vec<Book>, BookError> {
        let query = format!("SELECT {COLUMNS} FROM books ORDER BY created_at DESC, id DESC");
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(unavailable("list", None))?;

        Ok(readable_books(rows.iter().map(|row| Book::from_row(row))))
    }

    async fn get(&self, id: Uuid) -> Result<Book, BookError> {
        let query = format!("SELECT {COLUMNS} FROM books WHERE id = $1");
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(unavailable("get", Some(id)))?
            .ok_or(BookError::NotFound(id))
    }

    async fn create(&self, request: &BookRequest) -> Result<Book, BookError> {
        let id = Uuid::now_v7();
        let now = OffsetDateTime::now_utc();
        let query = format!(
            "INSERT INTO books (id, title, author, year, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .bind(&request.title)
            .bind(&request.author)
            .bind(request.year)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(unavailable("create", Some(id)))
    }

    async fn update(&self, id: Uuid, request: &BookRequest) -> Result<Book, BookError> {
        // GREATEST keeps updated_at monotonic if the wall clock steps back.
        let query = format!(
            "UPDATE books SET \
                title = $2, \
                author = $3, \
                year = $4, \
                updated_at = GREATEST($5, updated_at) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .bind(&request.title)
            .bind(&request.author)
            .bind(request.year)
            .bind(OffsetDateTime::now_utc())
            .fetch_optional(&self.pool)
            .await
            .map_err(unavailable("update", Some(id)))?
            .ok_or(BookError::NotFound(id))
    }

    async fn delete(&self, id: Uuid) -> Result<(), BookError> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(unavailable("delete", Some(id)))?;

        if result.rows_affected() == 0 {
            return Err(BookError::NotFound(id));
        }
        Ok(())
    }
}
