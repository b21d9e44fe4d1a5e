//! OCR output: recognized text and the word geometry tree.
//!
//! The tree mirrors the provider's `fullTextAnnotation`:
//! pages -> blocks -> paragraphs -> words -> symbols. Coordinates are image
//! pixels and are kept exactly as the provider sent them.

pub mod vision;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{OcrError, Result};

pub use vision::{AnnotateImageRequest, AnnotateImageResponse, BatchAnnotateImagesRequest};

/// A polygon vertex in image pixel coordinates.
///
/// The provider omits zero coordinates, so missing values read as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
}

impl Vertex {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A bounding polygon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingPoly {
    #[serde(default)]
    pub vertices: Vec<Vertex>,
}

impl BoundingPoly {
    /// The polygon as a quadrilateral, if it has exactly four vertices.
    pub fn quad(&self) -> Option<[Vertex; 4]> {
        <[Vertex; 4]>::try_from(self.vertices.as_slice()).ok()
    }
}

/// A single recognized character.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingPoly>,
}

/// A recognized word.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingPoly>,
    #[serde(default)]
    pub symbols: Vec<Symbol>,
}

impl Word {
    /// Build a word from its text, one symbol per character.
    pub fn from_text(text: &str, quad: [Vertex; 4]) -> Self {
        Self {
            bounding_box: Some(BoundingPoly {
                vertices: quad.to_vec(),
            }),
            symbols: text
                .chars()
                .map(|c| Symbol {
                    text: c.to_string(),
                    bounding_box: None,
                })
                .collect(),
        }
    }

    /// The word's text: its symbols joined in order.
    pub fn text(&self) -> String {
        self.symbols.iter().map(|s| s.text.as_str()).collect()
    }

    /// The word's bounding quadrilateral.
    pub fn quad(&self) -> Option<[Vertex; 4]> {
        self.bounding_box.as_ref().and_then(BoundingPoly::quad)
    }
}

/// A paragraph of words.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingPoly>,
    #[serde(default)]
    pub words: Vec<Word>,
}

/// A block of paragraphs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingPoly>,
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
}

/// A page of blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// The full text annotation: text plus the word geometry tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextAnnotation {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl TextAnnotation {
    /// All words in document order (page, block, paragraph, word).
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.pages
            .iter()
            .flat_map(|page| page.blocks.iter())
            .flat_map(|block| block.paragraphs.iter())
            .flat_map(|para| para.words.iter())
    }

    /// Dimensions of the first page, when the provider reported them.
    pub fn page_size(&self) -> Option<(u32, u32)> {
        self.pages
            .first()
            .filter(|p| p.width > 0 && p.height > 0)
            .map(|p| (p.width, p.height))
    }
}

/// Result of OCR on one image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OcrResult {
    /// Full recognized text (empty when nothing was recognized).
    pub text: String,

    /// Word geometry tree, when the provider returned one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<TextAnnotation>,

    /// Round-trip time of the OCR request in milliseconds.
    pub processing_time_ms: u64,
}

impl OcrResult {
    /// Build a result from a single annotate response.
    ///
    /// The text is taken as-is; a word tree that does not parse is dropped
    /// with a warning so extraction still sees the text.
    pub fn from_response(response: AnnotateImageResponse) -> Result<Self> {
        if let Some(status) = response.error {
            return Err(OcrError::Provider {
                code: status.code,
                message: status.message,
            }
            .into());
        }

        let raw = response.full_text_annotation.filter(|a| !a.is_null());

        let text = raw
            .as_ref()
            .and_then(|a| a.get("text"))
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_string();

        let annotation = raw.and_then(|a| match serde_json::from_value::<TextAnnotation>(a) {
            Ok(tree) => Some(tree),
            Err(e) => {
                warn!("Ignoring malformed word tree: {}", e);
                None
            }
        });

        debug!(
            "OCR response: {} chars, {} words",
            text.chars().count(),
            annotation.as_ref().map(|a| a.words().count()).unwrap_or(0)
        );

        Ok(Self {
            text,
            annotation,
            processing_time_ms: 0,
        })
    }

    /// Parse a saved response body.
    ///
    /// Accepts either a batch body (`{"responses": [...]}`, first response
    /// used) or a single annotate response.
    pub fn from_response_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| OcrError::MalformedResponse(e.to_string()))?;

        let response = match value.get("responses") {
            Some(responses) => responses
                .as_array()
                .and_then(|r| r.first())
                .cloned()
                .ok_or(OcrError::EmptyResponse)?,
            None => value,
        };

        let response: AnnotateImageResponse = serde_json::from_value(response)
            .map_err(|e| OcrError::MalformedResponse(e.to_string()))?;

        Self::from_response(response)
    }
}
