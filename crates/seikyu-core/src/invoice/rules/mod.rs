//! Rule-based field extractors for Japanese invoices.

pub mod amounts;
pub mod applicant;
pub mod dates;
pub mod parties;
pub mod patterns;

pub use amounts::{extract_amounts, format_yen, parse_yen_amount, AmountExtractor, InvoiceAmounts, YenAmount};
pub use applicant::{extract_applicant, ApplicantExtractor, ApplicantRule};
pub use dates::{DateExtractor, PaymentDateExtractor};
pub use parties::{extract_parties, CompanyNameExtractor, InvoiceParties};
pub use patterns::*;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A value pulled out of the source text together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Position in source text (byte offsets).
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// A match whose value is the matched text itself.
pub(crate) fn verbatim(m: regex::Match<'_>) -> ExtractionMatch<String> {
    ExtractionMatch::new(m.as_str().to_string(), m.as_str()).with_position(m.start(), m.end())
}
