//! Router builder for SHELF HTTP server

use axum::{
    http::{HeaderValue, Method, Request, StatusCode},
    response::Redirect,
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use uuid::Uuid;

use shelf_kernel::ModuleRegistry;

const API_TITLE: &str = "Book Library API";
const API_VERSION: &str = "1.0.0";

/// Single path the OpenAPI document is served from.
pub const OPENAPI_DOCUMENT_PATH: &str = "/docs/openapi.json";

/// Builder for constructing the main HTTP router
pub struct RouterBuilder {
    router: Router,
}

impl RouterBuilder {
    /// Create a new router builder
    pub fn new() -> Self {
        Self {
            router: Router::new(),
        }
    }

    /// Add a route to the router
    pub fn route(mut self, path: &str, route: axum::routing::MethodRouter) -> Self {
        self.router = self.router.route(path, route);
        self
    }

    /// Merge a module's router; module routes carry their own absolute paths
    pub fn mount_module(mut self, module_name: &str, module_router: Router) -> Self {
        tracing::info!(module = module_name, "mounting module routes");
        self.router = self.router.merge(module_router);
        self
    }

    /// Add tracing middleware
    pub fn with_tracing(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
        );
        self
    }

    /// Add CORS middleware restricted to the given origins
    pub fn with_cors(mut self, allowed_origins: &[String]) -> Self {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(%origin, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();

        self.router = self.router.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers(AllowHeaders::mirror_request()),
        );
        self
    }

    /// Add request ID middleware
    pub fn with_request_id(mut self) -> Self {
        self.router = self
            .router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7));
        self
    }

    /// Add timeout middleware
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.router = self.router.layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_millis(timeout_ms),
        ));
        self
    }

    /// Add OpenAPI documentation by collecting specs from all modules
    pub fn with_openapi(mut self, registry: &ModuleRegistry) -> Self {
        let openapi_spec = merged_openapi(registry);

        // Swagger UI serves the document itself at `/docs/openapi.json`
        let openapi_obj: utoipa::openapi::OpenApi = serde_json::from_value(openapi_spec)
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "merged OpenAPI document is invalid; serving stub");
                utoipa::openapi::OpenApiBuilder::new()
                    .info(
                        utoipa::openapi::InfoBuilder::new()
                            .title(API_TITLE)
                            .version(API_VERSION)
                            .build(),
                    )
                    .build()
            });

        self.router = self
            .router
            .merge(
                utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                    .url(OPENAPI_DOCUMENT_PATH, openapi_obj),
            )
            .route("/docs", get(|| async { Redirect::to("/swagger-ui/") }));

        self
    }

    /// Build the final router
    pub fn build(self) -> Router {
        self.router
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Merge the base document with every module's `paths` and `components.schemas`.
pub fn merged_openapi(registry: &ModuleRegistry) -> serde_json::Value {
    let mut openapi_spec = serde_json::json!({
        "openapi": "3.1.0",
        "info": {
            "title": API_TITLE,
            "version": API_VERSION,
            "description": "A simple book library management API with UUID identifiers"
        },
        "paths": {},
        "components": {
            "schemas": {}
        }
    });

    openapi_spec["components"]["schemas"]["ErrorResponse"] = serde_json::json!({
        "type": "object",
        "properties": {
            "error": {
                "type": "object",
                "properties": {
                    "code": { "type": "string" },
                    "message": { "type": "string" },
                    "details": { "type": "array", "items": { "type": "object" } },
                    "trace_id": { "type": "string" },
                    "timestamp": { "type": "string", "format": "date-time" }
                },
                "required": ["code", "message", "trace_id", "timestamp"]
            }
        },
        "required": ["error"]
    });

    openapi_spec["paths"]["/health"] = serde_json::json!({
        "get": {
            "summary": "Health check",
            "tags": ["system"],
            "responses": {
                "200": {
                    "description": "OK",
                    "content": { "text/plain": { "schema": { "type": "string" } } }
                }
            }
        }
    });

    for module in registry.modules() {
        let Some(module_spec) = module.openapi() else {
            continue;
        };

        if let Some(paths) = module_spec.get("paths").and_then(|p| p.as_object()) {
            for (path, path_item) in paths {
                openapi_spec["paths"][path] = path_item.clone();
            }
        }

        if let Some(schemas) = module_spec
            .get("components")
            .and_then(|c| c.get("schemas"))
            .and_then(|s| s.as_object())
        {
            for (schema_name, schema_def) in schemas {
                openapi_spec["components"]["schemas"][schema_name] = schema_def.clone();
            }
        }
    }

    openapi_spec
}

/// Request ID generator producing time-ordered UUIDs
#[derive(Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let request_id = Uuid::now_v7().to_string().parse::<HeaderValue>().ok()?;
        Some(RequestId::new(request_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_router_builder_basic() {
        let router = RouterBuilder::new()
            .route("/test", get(|| async { "test" }))
            .build();

        let response = router
            .oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_module_mounting_keeps_absolute_paths() {
        let module_router = Router::new().route("/books", get(|| async { "module" }));

        let router = RouterBuilder::new()
            .mount_module("books", module_router)
            .build();

        let response = router
            .oneshot(Request::builder().uri("/books").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_middleware_chain_sets_request_id() {
        let router = RouterBuilder::new()
            .route("/health", get(|| async { "OK" }))
            .with_tracing()
            .with_cors(&["http://localhost:3000".to_string()])
            .with_request_id()
            .with_timeout(5000)
            .build();

        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let request_id = response
            .headers()
            .get("x-request-id")
            .expect("x-request-id header")
            .to_str()
            .unwrap();
        assert!(Uuid::parse_str(request_id).is_ok());
    }

    #[tokio::test]
    async fn test_cors_rejects_unknown_origin() {
        let router = RouterBuilder::new()
            .route("/health", get(|| async { "OK" }))
            .with_cors(&["http://localhost:3000".to_string()])
            .build();

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("origin", "http://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response
            .headers()
            .get("access-control-allow-origin")
            .is_none());
    }

    #[tokio::test]
    async fn test_swagger_ui_points_at_docs_document() {
        let router = RouterBuilder::new()
            .with_openapi(&ModuleRegistry::new())
            .build();

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .uri(OPENAPI_DOCUMENT_PATH)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(json["paths"]["/health"]["get"].is_object());

        let initializer = router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/swagger-ui/swagger-initializer.js")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(initializer.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(initializer.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains(OPENAPI_DOCUMENT_PATH));

        let legacy = router
            .oneshot(
                Request::builder()
                    .uri("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(legacy.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_merged_openapi_without_modules() {
        let spec = merged_openapi(&ModuleRegistry::new());
        assert!(spec["paths"]["/health"]["get"].is_object());
        assert!(spec["components"]["schemas"]["ErrorResponse"].is_object());
    }
}
