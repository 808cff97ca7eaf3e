//! OpenAPI document, served as JSON and browsable through RapiDoc.

use crate::analysis;
use crate::routes;
use axum::Json;
use utoipa::OpenApi;

pub const OPENAPI_JSON_PATH: &str = "/swagger/v1/swagger.json";
pub const DOCS_UI_PATH: &str = "/swagger";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AI Image Analysis API",
        version = "v1",
        description = "Upload an image and receive a caption with its confidence, generated by Azure AI Vision."
    ),
    paths(analysis::analyze_image, routes::health),
    components(schemas(
        analysis::CaptionResponse,
        crate::vision::ErrorDetails,
        crate::error::ErrorMessage,
        routes::HealthResponse
    )),
    tags((name = "ImageAnalysis", description = "Image captioning"))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
