pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;
pub mod validate;

use async_trait::async_trait;
use axum::{routing::get, Router};
use serde_json::json;
use shelf_kernel::{InitCtx, Migration, Module};

pub use error::BookError;
pub use memory::InMemoryBookStore;
pub use models::{Book, BookRequest};
pub use postgres::PgBookStore;
pub use store::{BookStore, SharedBookStore};

/// Books module: CRUD over the `books` table
pub struct BooksModule {
    store: SharedBookStore,
}

impl BooksModule {
    pub fn new(store: SharedBookStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            backend = ?ctx.settings.database.backend,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route(
                "/books",
                get(handlers::list_books).post(handlers::create_book),
            )
            .route(
                "/books/{id}",
                get(handlers::get_book)
                    .put(handlers::update_book)
                    .delete(handlers::delete_book),
            )
            .with_state(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error_response = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                    }
                }
            })
        };
        let book_response = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/Book" }
                    }
                }
            })
        };
        let id_param = json!({
            "name": "id",
            "in": "path",
            "required": true,
            "description": "Book ID",
            "schema": { "type": "string", "format": "uuid" }
        });
        let book_body = json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/BookRequest" }
                }
            }
        });

        Some(json!({
            "paths": {
                "/books": {
                    "get": {
                        "summary": "Get all books",
                        "tags": ["books"],
                        "responses": {
                            "200": {
                                "description": "All books, newest first",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Book" }
                                        }
                                    }
                                }
                            },
                            "500": error_response("Internal server error")
                        }
                    },
                    "post": {
                        "summary": "Create a new book",
                        "tags": ["books"],
                        "requestBody": book_body.clone(),
                        "responses": {
                            "201": book_response("Created book"),
                            "400": error_response("Invalid JSON or book data"),
                            "500": error_response("Internal server error")
                        }
                    }
                },
                "/books/{id}": {
                    "get": {
                        "summary": "Get a book by ID",
                        "tags": ["books"],
                        "parameters": [id_param.clone()],
                        "responses": {
                            "200": book_response("The book"),
                            "400": error_response("Invalid book ID"),
                            "404": error_response("Book not found"),
                            "500": error_response("Internal server error")
                        }
                    },
                    "put": {
                        "summary": "Update a book",
                        "tags": ["books"],
                        "parameters": [id_param.clone()],
                        "requestBody": book_body,
                        "responses": {
                            "200": book_response("Updated book"),
                            "400": error_response("Invalid book ID, JSON or book data"),
                            "404": error_response("Book not found"),
                            "500": error_response("Internal server error")
                        }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["books"],
                        "parameters": [id_param],
                        "responses": {
                            "204": { "description": "Book deleted" },
                            "400": error_response("Invalid book ID"),
                            "404": error_response("Book not found"),
                            "500": error_response("Internal server error")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string", "format": "uuid" },
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "year": { "type": "integer", "minimum": validate::MIN_YEAR, "maximum": validate::MAX_YEAR },
                            "created_at": { "type": "string", "format": "date-time" },
                            "updated_at": { "type": "string", "format": "date-time" }
                        },
                        "required": ["id", "title", "author", "year", "created_at", "updated_at"]
                    },
                    "BookRequest": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string", "minLength": 1 },
                            "author": { "type": "string", "minLength": 1 },
                            "year": { "type": "integer", "minimum": validate::MIN_YEAR, "maximum": validate::MAX_YEAR }
                        },
                        "required": ["title", "author", "year"]
                    }
                }
            }
        }))
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_create_books",
            up: r#"
                CREATE TABLE IF NOT EXISTS books (
                    id         UUID PRIMARY KEY,
                    title      TEXT NOT NULL CHECK (title <> ''),
                    author     TEXT NOT NULL CHECK (author <> ''),
                    year       INTEGER NOT NULL CHECK (year BETWEEN 1000 AND 2034),
                    created_at TIMESTAMPTZ NOT NULL,
                    updated_at TIMESTAMPTZ NOT NULL
                );
                CREATE INDEX IF NOT EXISTS books_created_at_idx ON books (created_at DESC);
                "#,
        }]
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module backed by `store`
pub fn create_module(store: SharedBookStore) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new(store))
}
