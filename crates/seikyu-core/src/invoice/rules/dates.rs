//! Date extraction for Japanese invoices.
//!
//! Dates are kept in the source's own formatting; no calendar validation
//! is applied.

use super::patterns::{DATE, PAYMENT_DATE};
use super::{verbatim, ExtractionMatch, FieldExtractor};

/// Calendar date extractor (`2024/01/15`, `2024年1月15日`).
#[derive(Debug, Default, Clone, Copy)]
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        DATE.find(text).map(verbatim)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        DATE.find_iter(text).map(verbatim).collect()
    }
}

/// Payment timestamp extractor: a date immediately followed by `H:MM`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PaymentDateExtractor;

impl PaymentDateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for PaymentDateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        PAYMENT_DATE.find(text).map(verbatim)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        PAYMENT_DATE
            .find_iter(text)
            .map(verbatim)
            .collect()
    }
}
