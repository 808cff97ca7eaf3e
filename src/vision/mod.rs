// Image analysis provider interface and the Azure AI Vision client

mod azure;
mod models;

pub use azure::AzureVisionClient;
pub use models::*;

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// The call to the provider did not produce an answer at all.
#[derive(Error, Debug)]
pub enum VisionError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid vision endpoint '{endpoint}': {reason}")]
    Endpoint { endpoint: String, reason: String },

    #[error("Malformed response from vision service: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A service that captions images and detects text in them.
#[async_trait]
pub trait ImageAnalyzer: Send + Sync {
    /// Analyzes the image stored at `image`.
    ///
    /// `Ok` means the provider answered, successfully or not. `Err` means it
    /// could not be reached or its answer could not be read.
    async fn analyze(
        &self,
        credentials: &Credentials,
        image: &Path,
        options: &AnalysisOptions,
    ) -> Result<AnalysisOutcome, VisionError>;
}
