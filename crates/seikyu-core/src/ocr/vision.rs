//! Wire types for the Google Cloud Vision `images:annotate` endpoint.
//!
//! Only the parts needed for text detection are modelled. Transport lives
//! in the CLI; these types are plain serde data.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::config::OcrConfig;

lazy_static! {
    static ref DATA_URL_PREFIX: Regex = Regex::new(r"^data:image/\w+;base64,").unwrap();
}

/// Strip a `data:image/...;base64,` prefix from an encoded image, if present.
pub fn strip_data_url(encoded: &str) -> &str {
    match DATA_URL_PREFIX.find(encoded) {
        Some(m) => &encoded[m.end()..],
        None => encoded,
    }
}

/// Request body for `images:annotate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchAnnotateImagesRequest {
    pub requests: Vec<AnnotateImageRequest>,
}

impl BatchAnnotateImagesRequest {
    /// A batch holding a single request.
    pub fn single(request: AnnotateImageRequest) -> Self {
        Self {
            requests: vec![request],
        }
    }
}

/// One image to annotate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateImageRequest {
    pub image: ImageSource,
    pub features: Vec<Feature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_context: Option<ImageContext>,
}

impl AnnotateImageRequest {
    /// Text detection request for base64-encoded image content.
    pub fn text_detection(content: &str, config: &OcrConfig) -> Self {
        let image_context = if config.language_hints.is_empty() {
            None
        } else {
            Some(ImageContext {
                language_hints: config.language_hints.clone(),
            })
        };

        Self {
            image: ImageSource {
                content: strip_data_url(content).to_string(),
            },
            features: vec![Feature {
                feature_type: config.feature.as_str().to_string(),
            }],
            image_context,
        }
    }
}

/// Inline image content (base64).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSource {
    pub content: String,
}

/// Requested detection feature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub feature_type: String,
}

/// Hints for the detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageContext {
    pub language_hints: Vec<String>,
}

/// Annotations for one image.
///
/// The annotation stays untyped here; [`OcrResult::from_response`] reads the
/// text and the word tree separately so a bad tree cannot lose the text.
///
/// [`OcrResult::from_response`]: super::OcrResult::from_response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateImageResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_text_annotation: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Status>,
}

/// Error status reported for one image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Status {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::DetectionFeature;

    #[test]
    fn test_strip_data_url() {
        assert_eq!(strip_data_url("data:image/png;base64,iVBORw0"), "iVBORw0");
        assert_eq!(strip_data_url("data:image/jpeg;base64,/9j/4AAQ"), "/9j/4AAQ");
        assert_eq!(strip_data_url("iVBORw0"), "iVBORw0");
    }

    #[test]
    fn test_request_body_shape() {
        let config = OcrConfig {
            feature: DetectionFeature::DocumentTextDetection,
            ..Default::default()
        };
        let request = BatchAnnotateImagesRequest::single(AnnotateImageRequest::text_detection(
            "data:image/png;base64,AAAA",
            &config,
        ));

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["requests"][0]["image"]["content"], "AAAA");
        assert_eq!(json["requests"][0]["features"][0]["type"], "DOCUMENT_TEXT_DETECTION");
        assert_eq!(json["requests"][0]["imageContext"]["languageHints"][0], "ja");
    }

    #[test]
    fn test_request_without_hints_omits_context() {
        let config = OcrConfig {
            language_hints: Vec::new(),
            ..Default::default()
        };

        let json = serde_json::to_value(AnnotateImageRequest::text_detection("AAAA", &config)).unwrap();

        assert!(json.get("imageContext").is_none());
    }
}
