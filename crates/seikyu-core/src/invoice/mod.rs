//! Invoice field extraction module.

mod parser;
pub mod rules;

pub use parser::{Extraction, InvoiceParser};

use crate::models::invoice::FieldRecord;

/// Extract invoice fields from recognized text.
///
/// Never fails; fields without a match hold the sentinel.
pub fn extract(text: &str) -> FieldRecord {
    InvoiceParser::new().parse(text).record
}
