use serde_json::json;
use shelf_http::AppError;
use thiserror::Error;
use uuid::Uuid;

/// Domain outcomes of book validation and storage.
#[derive(Debug, Error)]
pub enum BookError {
    #[error("invalid book id '{0}'")]
    InvalidIdentifier(String),

    #[error("invalid {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },

    #[error("book {0} not found")]
    NotFound(Uuid),

    #[error("book store unavailable during {operation}")]
    StoreUnavailable {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl From<BookError> for AppError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::InvalidIdentifier(_) => AppError::bad_request("Invalid book ID"),
            BookError::InvalidField { field, reason } => AppError::validation(
                vec![json!({ "field": field, "error": reason })],
                "Invalid book data",
            ),
            BookError::NotFound(_) => AppError::not_found("Book not found"),
            err @ BookError::StoreUnavailable { .. } => AppError::Internal(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, response::IntoResponse};

    fn status(err: BookError) -> StatusCode {
        AppError::from(err).into_response().status()
    }

    #[test]
    fn maps_domain_outcomes_to_status_codes() {
        assert_eq!(
            status(BookError::InvalidIdentifier("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(BookError::InvalidField {
                field: "year",
                reason: "out_of_range"
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status(BookError::NotFound(Uuid::nil())), StatusCode::NOT_FOUND);
        assert_eq!(
            status(BookError::StoreUnavailable {
                operation: "list",
                source: sqlx::Error::PoolTimedOut,
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
