//! Configuration structures for the scanning pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SeikyuError};

/// Main configuration for seikyu.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeikyuConfig {
    /// OCR provider configuration.
    pub ocr: OcrConfig,

    /// Highlight overlay configuration.
    pub highlight: HighlightConfig,

    /// Report output configuration.
    pub output: OutputConfig,
}

/// Text detection feature requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DetectionFeature {
    /// Sparse text detection, suited to photos and receipts.
    #[default]
    TextDetection,
    /// Dense document text detection.
    DocumentTextDetection,
}

impl DetectionFeature {
    /// Feature name as the provider's API spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionFeature::TextDetection => "TEXT_DETECTION",
            DetectionFeature::DocumentTextDetection => "DOCUMENT_TEXT_DETECTION",
        }
    }
}

/// OCR provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// `images:annotate` endpoint URL.
    pub endpoint: String,

    /// Detection feature to request.
    pub feature: DetectionFeature,

    /// Language hints sent with each request.
    pub language_hints: Vec<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Environment variable holding an API key.
    pub api_key_env: String,

    /// Environment variable holding an OAuth bearer token.
    pub access_token_env: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://vision.googleapis.com/v1/images:annotate".to_string(),
            feature: DetectionFeature::default(),
            language_hints: vec!["ja".to_string()],
            timeout_secs: 60,
            api_key_env: "GOOGLE_VISION_API_KEY".to_string(),
            access_token_env: "GOOGLE_VISION_ACCESS_TOKEN".to_string(),
        }
    }
}

/// Highlight overlay configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Fill and stroke color as `#rrggbb`.
    pub color: String,

    /// Opacity of the overlay (0.0 - 1.0).
    pub opacity: f32,

    /// Outline width in pixels.
    pub line_width: u32,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            color: "#f59e42".to_string(),
            opacity: 0.5,
            line_width: 3,
        }
    }
}

/// Report output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format (`json`, `csv` or `text`).
    pub format: String,

    /// Include the full recognized text in reports.
    pub include_raw_text: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            include_raw_text: false,
        }
    }
}

impl SeikyuConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| SeikyuError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: SeikyuConfig =
            serde_json::from_str(r#"{ "ocr": { "feature": "DOCUMENT_TEXT_DETECTION" } }"#).unwrap();

        assert_eq!(config.ocr.feature, DetectionFeature::DocumentTextDetection);
        assert_eq!(config.ocr.language_hints, vec!["ja".to_string()]);
        assert_eq!(config.highlight.color, "#f59e42");
        assert_eq!(config.output.format, "json");
    }

    #[test]
    fn test_feature_names() {
        assert_eq!(DetectionFeature::TextDetection.as_str(), "TEXT_DETECTION");
        assert_eq!(
            serde_json::to_string(&DetectionFeature::DocumentTextDetection).unwrap(),
            "\"DOCUMENT_TEXT_DETECTION\""
        );
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = SeikyuConfig::from_file(&path).unwrap_err();

        assert!(matches!(err, SeikyuError::Config(_)));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = SeikyuConfig::default();
        config.highlight.opacity = 0.25;
        config.save(&path).unwrap();

        let loaded = SeikyuConfig::from_file(&path).unwrap();
        assert_eq!(loaded.highlight.opacity, 0.25);
    }
}
