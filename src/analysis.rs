// Upload-and-relay endpoint

use crate::error::{ApiError, ErrorMessage, Result};
use crate::routes::AppState;
use crate::upload::{self, StagedImage};
use crate::vision::ErrorDetails;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CaptionResponse {
    pub caption: String,
    pub confidence: f64,
}

/// Multipart form accepted by the endpoint.
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

#[utoipa::path(
    post,
    path = "/api/ImageAnalysis",
    tag = "ImageAnalysis",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Caption generated", body = CaptionResponse),
        (status = 400, description = "Invalid file, missing configuration or provider failure", content(
            (ErrorDetails = "application/json"),
            (String = "text/plain")
        )),
        (status = 413, description = "Upload exceeds the configured size limit", body = ErrorMessage),
        (status = 500, description = "Unexpected failure", body = ErrorMessage)
    )
)]
pub async fn analyze_image(
    State(state): State<Arc<AppState>>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<CaptionResponse>> {
    let mut multipart = multipart.map_err(|rejection| {
        debug!(%rejection, "Request is not a multipart upload");
        ApiError::InvalidFile
    })?;

    // Only an oversized body keeps its own status, anything unreadable has no file
    let image = match upload::read_file_field(&mut multipart).await {
        Ok(Some(image)) if !image.is_empty() => image,
        Ok(_) => return Err(ApiError::InvalidFile),
        Err(err) if err.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return Err(ApiError::Upload(err))
        }
        Err(err) => {
            debug!(%err, "Malformed multipart body");
            return Err(ApiError::InvalidFile);
        }
    };

    let credentials = state.vision.credentials().inspect_err(|err| {
        warn!(%err, "Rejecting upload, vision service is not configured");
    })?;

    info!(
        bytes = image.len(),
        file_name = ?image.file_name,
        content_type = ?image.content_type,
        "Received image for analysis"
    );

    // Removed from disk when `staged` drops, whichever way this returns
    let staged = StagedImage::write(&image.bytes).await.inspect_err(|err| {
        error!(%err, "Failed to stage upload");
    })?;

    let outcome = state
        .analyzer
        .analyze(&credentials, staged.path(), &state.vision.analysis_options())
        .await
        .inspect_err(|err| error!(%err, "Vision service call failed"))?;

    match outcome.into_caption() {
        Ok(caption) => {
            info!(caption = %caption.text, confidence = caption.confidence, "Image analyzed");
            Ok(Json(CaptionResponse {
                caption: caption.text,
                confidence: caption.confidence,
            }))
        }
        Err(details) => {
            warn!(reason = %details.reason, code = %details.code, "Vision service reported a failure");
            Err(ApiError::Provider(details))
        }
    }
}
