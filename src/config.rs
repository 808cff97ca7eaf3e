// Command line and environment configuration

use crate::error::ApiError;
use crate::vision::{AnalysisOptions, Credentials};
use clap::{Parser, ValueEnum};
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// AI image analysis: upload an image, get its caption from Azure AI Vision
#[derive(Parser, Debug, Clone)]
#[command(name = "ai-image-analysis", version, about, long_about = None)]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Azure AI Vision endpoint, e.g. https://<resource>.cognitiveservices.azure.com
    #[arg(long, env = "VISION_ENDPOINT")]
    pub vision_endpoint: Option<String>,

    /// Azure AI Vision subscription key
    #[arg(long, env = "VISION_KEY", hide_env_values = true)]
    pub vision_key: Option<String>,

    /// Language of the generated caption
    #[arg(long, env = "VISION_LANGUAGE", default_value = "en")]
    pub language: String,

    /// Timeout for one call to the vision service, in seconds
    #[arg(long, env = "VISION_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Largest accepted request body, in megabytes
    #[arg(long, env = "MAX_UPLOAD_MB", default_value_t = 20)]
    pub max_upload_mb: usize,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl Args {
    pub fn vision_config(&self) -> VisionConfig {
        VisionConfig {
            endpoint: self.vision_endpoint.clone(),
            key: self.vision_key.clone(),
            language: self.language.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

/// Provider settings handed to the upload handler at startup.
///
/// Credentials stay optional here: a server without them still starts and
/// answers every analysis request with 400.
#[derive(Clone)]
pub struct VisionConfig {
    pub endpoint: Option<String>,
    pub key: Option<String>,
    pub language: String,
    pub timeout: Duration,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

impl VisionConfig {
    /// Key first, then endpoint, matching the order clients see the errors in.
    pub fn credentials(&self) -> Result<Credentials, ApiError> {
        let key = non_empty(&self.key).ok_or(ApiError::MissingKey)?;
        let endpoint = non_empty(&self.endpoint).ok_or(ApiError::MissingEndpoint)?;

        Ok(Credentials {
            endpoint: endpoint.to_string(),
            key: key.to_string(),
        })
    }

    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions::caption_and_text(self.language.clone())
    }
}

impl fmt::Debug for VisionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisionConfig")
            .field("endpoint", &self.endpoint)
            .field("key", &self.key.as_ref().map(|_| "[REDACTED]"))
            .field("language", &self.language)
            .field("timeout", &self.timeout)
            .finish()
    }
}
