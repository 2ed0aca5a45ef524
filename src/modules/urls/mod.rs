pub mod normalize;

use async_trait::async_trait;
use axum::{routing::post, Json, Router};
use serde::Deserialize;
use serde_json::json;
use shelf_http::{AppError, AppJson};
use shelf_kernel::{InitCtx, Module};

pub use normalize::{normalize, NormalizedUrl, UrlError};

/// URL utilities module: link cleanup
pub struct UrlsModule;

impl UrlsModule {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for UrlsModule {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
pub struct ProcessUrlRequest {
    #[serde(default)]
    pub url: String,
}

impl From<UrlError> for AppError {
    fn from(err: UrlError) -> Self {
        match err {
            UrlError::Empty => AppError::bad_request("URL is required"),
            UrlError::Malformed(_) => AppError::bad_request("Invalid URL format"),
        }
    }
}

#[async_trait]
impl Module for UrlsModule {
    fn name(&self) -> &'static str {
        "urls"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            tracking_params = normalize::TRACKING_PARAMS.len(),
            "urls module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new().route("/process-url", post(process_url))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/process-url": {
                    "post": {
                        "summary": "Process and clean up a URL",
                        "description": "Strips tracking parameters and returns the cleaned URL with its components",
                        "tags": ["utils"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/ProcessUrlRequest" }
                                }
                            }
                        },
                        "responses": {
                            "200": {
                                "description": "Normalized URL",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/NormalizedUrl" }
                                    }
                                }
                            },
                            "400": {
                                "description": "Missing or malformed URL",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "ProcessUrlRequest": {
                        "type": "object",
                        "properties": {
                            "url": { "type": "string", "format": "uri" }
                        },
                        "required": ["url"]
                    },
                    "NormalizedUrl": {
                        "type": "object",
                        "properties": {
                            "original_url": { "type": "string" },
                            "cleaned_url": { "type": "string" },
                            "domain": { "type": "string" },
                            "path": { "type": "string" },
                            "query": { "type": "string" }
                        },
                        "required": ["original_url", "cleaned_url", "domain", "path", "query"]
                    }
                }
            }
        }))
    }
}

/// `POST /process-url`
async fn process_url(
    AppJson(request): AppJson<ProcessUrlRequest>,
) -> Result<Json<NormalizedUrl>, AppError> {
    let normalized = normalize(&request.url)?;

    tracing::info!(
        original = %normalized.original_url,
        cleaned = %normalized.cleaned_url,
        "URL processed"
    );
    Ok(Json(normalized))
}

/// Create a new instance of the urls module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(UrlsModule::new())
}
