//! In-process [`BookStore`] for running without Postgres.

use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    error::BookError,
    models::{Book, BookRequest},
    store::BookStore,
};

#[derive(Default)]
pub struct InMemoryBookStore {
    books: RwLock<HashMap<Uuid, Book>>,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn list(&self) -> Result<Vec<Book>, BookError> {
        let mut books: Vec<Book> = self.books.read().await.values().cloned().collect();
        books.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(books)
    }

    async fn get(&self, id: Uuid) -> Result<Book, BookError> {
        self.books
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(BookError::NotFound(id))
    }

    async fn create(&self, request: &BookRequest) -> Result<Book, BookError> {
        let now = OffsetDateTime::now_utc();
        let book = Book {
            id: Uuid::now_v7(),
            title: request.title.clone(),
            author: request.author.clone(),
            year: request.year,
            created_at: now,
            updated_at: now,
        };

        self.books.write().await.insert(book.id, book.clone());
        Ok(book)
    }

    async fn update(&self, id: Uuid, request: &BookRequest) -> Result<Book, BookError> {
        let mut books = self.books.write().await;
        let book = books.get_mut(&id).ok_or(BookError::NotFound(id))?;

        book.title = request.title.clone();
        book.author = request.author.clone();
        book.year = request.year;
        book.updated_at = OffsetDateTime::now_utc().max(book.updated_at);

        Ok(book.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), BookError> {
        self.books
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(BookError::NotFound(id))
    }
}
