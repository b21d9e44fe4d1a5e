//! Core library for Japanese invoice OCR processing.
//!
//! This crate provides:
//! - Rule-based invoice field extraction (date, amount, parties, applicant, payment date)
//! - The word geometry tree returned by Google Cloud Vision text detection
//! - Highlight location mapping extracted values back onto recognized words
//! - Display scaling and overlay drawing for highlight boxes

pub mod error;
pub mod highlight;
pub mod invoice;
pub mod models;
pub mod ocr;

pub use error::{OcrError, RenderError, Result, SeikyuError};
pub use highlight::{HighlightBox, HighlightStyle, draw_highlights, locate, locate_json, scale_boxes};
pub use invoice::{Extraction, InvoiceParser, extract};
pub use models::invoice::{FieldRecord, ScanReport, SENTINEL};
pub use ocr::{OcrResult, TextAnnotation, Vertex};
