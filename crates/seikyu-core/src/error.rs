//! Error types for the seikyu-core library.
//!
//! Field extraction and highlight location never fail; these errors only
//! cover the layers around them (provider responses, images, configuration).

use thiserror::Error;

/// Main error type for the seikyu library.
#[derive(Error, Debug)]
pub enum SeikyuError {
    /// OCR provider response error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Overlay rendering error.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// Image decoding or encoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to the OCR provider's response.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The response body could not be parsed.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The provider reported an error for the image.
    #[error("provider error {code}: {message}")]
    Provider { code: i32, message: String },

    /// The response carried no responses for the submitted image.
    #[error("empty response")]
    EmptyResponse,
}

/// Errors related to drawing highlight overlays.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The highlight color is not a `#rrggbb` hex string.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// The image has a zero dimension.
    #[error("image has no pixels")]
    EmptyImage,
}

/// Result type for the seikyu library.
pub type Result<T> = std::result::Result<T, SeikyuError>;
