// Request options and results exchanged with an image analysis provider

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Analysis capability requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Caption,
    /// Printed and handwritten text detection (OCR).
    Read,
}

impl Feature {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Caption => "caption",
            Feature::Read => "read",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOptions {
    pub features: Vec<Feature>,
    pub language: String,
    pub gender_neutral_caption: bool,
}

impl AnalysisOptions {
    /// Caption plus text detection with gender-neutral phrasing.
    pub fn caption_and_text(language: impl Into<String>) -> Self {
        Self {
            features: vec![Feature::Caption, Feature::Read],
            language: language.into(),
            gender_neutral_caption: true,
        }
    }

    pub fn feature_list(&self) -> String {
        self.features
            .iter()
            .map(Feature::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Where and how to reach the provider.
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub endpoint: String,
    pub key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("endpoint", &self.endpoint)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Caption {
    pub text: String,
    pub confidence: f64,
}

/// What the provider found in an image it managed to analyze.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Analysis {
    pub caption: Option<Caption>,
    pub text_lines: Vec<String>,
}

/// Structured failure reported by the provider, passed through to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetails {
    #[serde(rename = "errorReason")]
    pub reason: String,
    #[serde(rename = "errorCode")]
    pub code: String,
    #[serde(rename = "errorMessage")]
    pub message: String,
}

impl ErrorDetails {
    pub fn new(
        reason: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            reason: reason.into(),
            code: code.into(),
            message: message.into(),
        }
    }

    /// The provider answered successfully but produced no caption.
    pub fn no_caption() -> Self {
        Self::new(
            "NoCaption",
            "200",
            "The service returned no caption for this image.",
        )
    }
}

/// The two answers a provider can give once the call went through.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Analyzed(Analysis),
    Failed(ErrorDetails),
}

impl AnalysisOutcome {
    /// Reduces the outcome to the caption the endpoint returns, or the error it relays.
    pub fn into_caption(self) -> Result<Caption, ErrorDetails> {
        match self {
            AnalysisOutcome::Analyzed(analysis) => analysis
                .caption
                .filter(|caption| !caption.text.trim().is_empty())
                .ok_or_else(ErrorDetails::no_caption),
            AnalysisOutcome::Failed(details) => Err(details),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_request_caption_and_read() {
        let options = AnalysisOptions::caption_and_text("en");
        assert_eq!(options.feature_list(), "caption,read");
        assert_eq!(options.language, "en");
        assert!(options.gender_neutral_caption);
    }

    #[test]
    fn test_credentials_debug_hides_key() {
        let credentials = Credentials {
            endpoint: "https://vision.example.com".to_string(),
            key: "super-secret".to_string(),
        };
        let printed = format!("{:?}", credentials);
        assert!(printed.contains("vision.example.com"));
        assert!(!printed.contains("super-secret"));
    }

    #[test]
    fn test_error_details_serialize_with_wire_names() {
        let details = ErrorDetails::new("InvalidImageFormat", "400", "unsupported format");
        let value = serde_json::to_value(&details).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "errorReason": "InvalidImageFormat",
                "errorCode": "400",
                "errorMessage": "unsupported format",
            })
        );
    }

    #[test]
    fn test_blank_caption_is_not_usable() {
        let outcome = AnalysisOutcome::Analyzed(Analysis {
            caption: Some(Caption {
                text: "  ".to_string(),
                confidence: 0.5,
            }),
            text_lines: vec!["STOP".to_string()],
        });
        assert_eq!(outcome.into_caption(), Err(ErrorDetails::no_caption()));
    }

    #[test]
    fn test_failed_outcome_keeps_provider_details() {
        let details = ErrorDetails::new("InvalidRequest", "400", "bad image");
        let outcome = AnalysisOutcome::Failed(details.clone());
        assert_eq!(outcome.into_caption(), Err(details));
    }
}
