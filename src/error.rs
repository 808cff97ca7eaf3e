// Error type of the analysis endpoint and its HTTP mapping

use crate::vision::{ErrorDetails, VisionError};
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid File")]
    InvalidFile,

    #[error("VISION_KEY is missing or empty.")]
    MissingKey,

    #[error("VISION_ENDPOINT is missing or empty.")]
    MissingEndpoint,

    #[error("{} ({}): {}", .0.reason, .0.code, .0.message)]
    Provider(ErrorDetails),

    #[error("{0}")]
    Upload(#[from] MultipartError),

    #[error("{0}")]
    Vision(#[from] VisionError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Body of every unexpected failure.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorMessage {
    #[serde(rename = "errorMessage")]
    pub message: String,
}

impl ErrorMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            // Plain text, the client only needs to display it
            ApiError::InvalidFile | ApiError::MissingKey | ApiError::MissingEndpoint => {
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            ApiError::Provider(details) => (StatusCode::BAD_REQUEST, Json(details)).into_response(),
            ApiError::Upload(err) => {
                (err.status(), Json(ErrorMessage::new(err.body_text()))).into_response()
            }
            ApiError::Vision(_) | ApiError::Io(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorMessage::new(self.to_string())),
            )
                .into_response(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
