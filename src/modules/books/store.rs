use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::{
    error::BookError,
    models::{Book, BookRequest},
};

/// Persistence contract for books.
///
/// Each call is one round-trip to the backend. Implementations must be safe
/// to share between concurrent requests without outside locking. Payloads are
/// expected to have passed [`validate`](super::validate::validate) already.
#[async_trait]
pub trait BookStore: Send + Sync + 'static {
    /// All books, newest first. Never fails just because the store is empty.
    async fn list(&self) -> Result<Vec<Book>, BookError>;

    async fn get(&self, id: Uuid) -> Result<Book, BookError>;

    /// Assigns a fresh id and sets `created_at == updated_at == now`.
    async fn create(&self, request: &BookRequest) -> Result<Book, BookError>;

    /// Replaces title, author and year, and refreshes `updated_at`.
    async fn update(&self, id: Uuid, request: &BookRequest) -> Result<Book, BookError>;

    async fn delete(&self, id: Uuid) -> Result<(), BookError>;
}

pub type SharedBookStore = Arc<dyn BookStore>;
