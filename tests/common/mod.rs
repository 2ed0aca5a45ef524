#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use shelf_app::books::{BookStore, InMemoryBookStore, SharedBookStore};
use shelf_kernel::{settings::Settings, ModuleRegistry};

/// Build the full application router, with every module and middleware, on
/// top of the given store.
pub fn build_app_with(store: SharedBookStore) -> Router {
    let mut registry = ModuleRegistry::new();
    shelf_app::register_all(&mut registry, store);
    shelf_http::build_router(&registry, &Settings::default())
}

/// Full application router backed by a fresh in-memory store.
pub fn build_app() -> Router {
    build_app_with(Arc::new(InMemoryBookStore::new()))
}

pub fn shared<S: BookStore>(store: S) -> SharedBookStore {
    Arc::new(store)
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn send_raw(app: Router, method: Method, uri: &str, raw: &'static str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(raw))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Assert the status and return the decoded JSON body.
pub async fn expect_json(response: Response<Body>, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}
