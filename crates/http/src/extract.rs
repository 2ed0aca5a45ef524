//! Request extractors whose rejections speak the [`AppError`] format.

use axum::extract::FromRequest;

use crate::error::AppError;

/// JSON body extractor that rejects undecodable payloads with a 400 error body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
