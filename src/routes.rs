// HTTP routes and shared state

use crate::config::VisionConfig;
use crate::vision::ImageAnalyzer;
use crate::{analysis, docs, page};
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::ToSchema;
use utoipa_rapidoc::RapiDoc;

pub struct AppState {
    pub vision: VisionConfig,
    pub analyzer: Arc<dyn ImageAnalyzer>,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    version: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub fn create_router(state: AppState, max_upload_bytes: usize) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/", get(page::index))
        .route("/health", get(health))
        .route("/api/ImageAnalysis", post(analysis::analyze_image))
        .route(docs::OPENAPI_JSON_PATH, get(docs::openapi_json))
        .merge(RapiDoc::new(docs::OPENAPI_JSON_PATH).path(docs::DOCS_UI_PATH))
        .layer(RequestBodyLimitLayer::new(max_upload_bytes))
        .layer(DefaultBodyLimit::disable())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
