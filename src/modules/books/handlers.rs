use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shelf_http::{AppError, AppJson};

use super::{
    models::{parse_book_id, Book, BookRequest},
    store::SharedBookStore,
    validate::validate,
};

/// `GET /books`
pub async fn list_books(
    State(store): State<SharedBookStore>,
) -> Result<Json<Vec<Book>>, AppError> {
    Ok(Json(store.list().await?))
}

/// `GET /books/{id}`
pub async fn get_book(
    State(store): State<SharedBookStore>,
    Path(id): Path<String>,
) -> Result<Json<Book>, AppError> {
    let id = parse_book_id(&id)?;
    Ok(Json(store.get(id).await?))
}

/// `POST /books`
pub async fn create_book(
    State(store): State<SharedBookStore>,
    AppJson(request): AppJson<BookRequest>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    validate(&request)?;
    let book = store.create(&request).await?;

    tracing::info!(book_id = %book.id, "book created");
    Ok((StatusCode::CREATED, Json(book)))
}

/// `PUT /books/{id}`
pub async fn update_book(
    State(store): State<SharedBookStore>,
    Path(id): Path<String>,
    AppJson(request): AppJson<BookRequest>,
) -> Result<Json<Book>, AppError> {
    let id = parse_book_id(&id)?;
    validate(&request)?;
    let book = store.update(id, &request).await?;

    tracing::info!(book_id = %book.id, "book updated");
    Ok(Json(book))
}

/// `DELETE /books/{id}`
pub async fn delete_book(
    State(store): State<SharedBookStore>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_book_id(&id)?;
    store.delete(id).await?;

    tracing::info!(book_id = %id, "book deleted");
    Ok(StatusCode::NO_CONTENT)
}
