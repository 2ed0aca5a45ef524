use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::error::BookError;

/// A book persisted in the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    /// Store-assigned identifier, immutable
    pub id: Uuid,
    pub title: String,
    pub author: String,
    /// Publication year, bounded by [`super::validate::MIN_YEAR`] and [`super::validate::MAX_YEAR`]
    pub year: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Equal to `created_at` until the first update
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Payload accepted by both create and full-record update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRequest {
    pub title: String,
    pub author: String,
    pub year: i32,
}

impl BookRequest {
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: i32) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
        }
    }
}

/// Parse a path segment into a book id before any store access.
pub fn parse_book_id(raw: &str) -> Result<Uuid, BookError> {
    Uuid::parse_str(raw).map_err(|_| BookError::InvalidIdentifier(raw.to_string()))
}
