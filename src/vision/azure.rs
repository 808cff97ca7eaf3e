// Azure AI Vision Image Analysis 4.0 client

use super::{
    Analysis, AnalysisOptions, AnalysisOutcome, Caption, Credentials, ErrorDetails,
    ImageAnalyzer, VisionError,
};
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, StatusCode, Url};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

const ANALYZE_PATH: &str = "computervision/imageanalysis:analyze";
const API_VERSION: &str = "2023-10-01";
const KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeResponse {
    model_version: Option<String>,
    caption_result: Option<CaptionResult>,
    read_result: Option<ReadResult>,
}

#[derive(Deserialize)]
struct CaptionResult {
    text: String,
    confidence: f64,
}

#[derive(Deserialize)]
struct ReadResult {
    #[serde(default)]
    blocks: Vec<ReadBlock>,
}

#[derive(Deserialize)]
struct ReadBlock {
    #[serde(default)]
    lines: Vec<ReadLine>,
}

#[derive(Deserialize)]
struct ReadLine {
    text: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ServiceError,
}

#[derive(Deserialize)]
struct ServiceError {
    code: Option<String>,
    message: Option<String>,
    innererror: Option<InnerError>,
}

#[derive(Deserialize)]
struct InnerError {
    code: Option<String>,
    message: Option<String>,
}

impl From<AnalyzeResponse> for Analysis {
    fn from(response: AnalyzeResponse) -> Self {
        let text_lines = response
            .read_result
            .map(|read| {
                read.blocks
                    .into_iter()
                    .flat_map(|block| block.lines)
                    .map(|line| line.text)
                    .collect()
            })
            .unwrap_or_default();

        Analysis {
            caption: response.caption_result.map(|c| Caption {
                text: c.text,
                confidence: c.confidence,
            }),
            text_lines,
        }
    }
}

/// Maps a non-success answer onto the reason/code/message triple.
///
/// The inner error is the more specific one (e.g. `InvalidImageFormat` under
/// `InvalidRequest`), so it wins when present.
fn error_details(status: StatusCode, body: &str) -> ErrorDetails {
    let fallback_reason = status.canonical_reason().unwrap_or("Error").to_string();
    let code = status.as_u16().to_string();

    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope { error }) => {
            let (inner_code, inner_message) = error
                .innererror
                .map(|inner| (inner.code, inner.message))
                .unwrap_or((None, None));

            ErrorDetails::new(
                inner_code.or(error.code).unwrap_or(fallback_reason),
                code,
                inner_message
                    .or(error.message)
                    .unwrap_or_else(|| body.to_string()),
            )
        }
        Err(_) => ErrorDetails::new(fallback_reason, code, body),
    }
}

pub struct AzureVisionClient {
    http: reqwest::Client,
}

impl AzureVisionClient {
    pub fn new(timeout: Duration) -> Result<Self, VisionError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }

    fn analyze_url(endpoint: &str, options: &AnalysisOptions) -> Result<Url, VisionError> {
        let base = format!("{}/{}", endpoint.trim_end_matches('/'), ANALYZE_PATH);
        let mut url = Url::parse(&base).map_err(|e| VisionError::Endpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        url.query_pairs_mut()
            .append_pair("api-version", API_VERSION)
            .append_pair("features", &options.feature_list())
            .append_pair("language", &options.language)
            .append_pair(
                "gender-neutral-caption",
                if options.gender_neutral_caption {
                    "true"
                } else {
                    "false"
                },
            );

        Ok(url)
    }
}

#[async_trait]
impl ImageAnalyzer for AzureVisionClient {
    async fn analyze(
        &self,
        credentials: &Credentials,
        image: &Path,
        options: &AnalysisOptions,
    ) -> Result<AnalysisOutcome, VisionError> {
        let url = Self::analyze_url(&credentials.endpoint, options)?;
        let bytes = tokio::fs::read(image).await?;

        info!(bytes = bytes.len(), features = %options.feature_list(), "Sending image to Azure AI Vision");

        let response = self
            .http
            .post(url)
            .header(KEY_HEADER, &credentials.key)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let preview: String = body.chars().take(500).collect();
        debug!(%status, body = %preview, "Azure AI Vision response");

        if !status.is_success() {
            return Ok(AnalysisOutcome::Failed(error_details(status, &body)));
        }

        let parsed: AnalyzeResponse = serde_json::from_str(&body)?;
        if let Some(model) = &parsed.model_version {
            debug!(model = %model, "Analysis completed");
        }

        let analysis = Analysis::from(parsed);
        debug!(lines = ?analysis.text_lines, "Detected text");

        Ok(AnalysisOutcome::Analyzed(analysis))
    }
}
