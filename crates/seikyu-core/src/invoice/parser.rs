//! Rule-based invoice parser.

use std::time::Instant;

use tracing::debug;

use crate::highlight::locate;
use crate::models::invoice::{elapsed_ms, FieldRecord, ReportMetadata, ScanReport, SENTINEL};
use crate::ocr::OcrResult;

use super::rules::{
    amounts::{extract_amounts, format_yen},
    applicant::extract_applicant,
    dates::{DateExtractor, PaymentDateExtractor},
    parties::extract_parties,
    FieldExtractor,
};

/// Output of one extraction run.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Display values, sentinel-filled.
    pub record: FieldRecord,

    /// Raw matched substrings, in field order, for highlight location.
    ///
    /// Order: date, every amount token, recipient, applicant, payment
    /// date, issuer. Fields without a match contribute nothing.
    pub targets: Vec<String>,
}

/// Invoice parser running every field rule over the same text.
#[derive(Debug, Clone, Default)]
pub struct InvoiceParser {
    /// Keep the recognized text in scan reports.
    include_raw_text: bool,
}

impl InvoiceParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the full recognized text in scan reports.
    pub fn with_raw_text(mut self, include: bool) -> Self {
        self.include_raw_text = include;
        self
    }

    /// Run every field rule against `text`.
    ///
    /// Rules are independent: each sees the full original text.
    pub fn parse(&self, text: &str) -> Extraction {
        let mut record = FieldRecord::default();
        let mut targets = Vec::new();

        let date = DateExtractor::new().extract(text);
        let amounts = extract_amounts(text);
        let parties = extract_parties(text);
        let applicant = extract_applicant(text);
        let payment_date = PaymentDateExtractor::new().extract(text);

        if let Some(date) = date {
            targets.push(date.source);
            record.date = date.value;
        }

        targets.extend(amounts.all_amounts.iter().map(|m| m.source.clone()));
        if let Some(total) = amounts.total {
            record.amount = format_yen(&total.value);
        }

        if let Some(to) = parties.to {
            targets.push(to.source);
            record.to = to.value;
        }

        if let Some(applicant) = applicant {
            targets.push(applicant.value.clone());
            record.applicant = applicant.value;
        }

        if let Some(payment_date) = payment_date {
            targets.push(payment_date.source);
            record.payment_date = payment_date.value;
        }

        if let Some(issuer) = parties.issuer {
            targets.push(issuer.source);
            record.issuer = issuer.value;
        }

        debug!(
            "Extracted {}/6 fields, {} highlight targets",
            record.filled_count(),
            targets.len()
        );

        Extraction { record, targets }
    }

    /// Extract fields from an OCR result and locate their words.
    pub fn analyze(&self, ocr: &OcrResult) -> ScanReport {
        let start = Instant::now();

        let Extraction { record, targets } = self.parse(&ocr.text);
        let boxes = locate(&targets, ocr.annotation.as_ref());

        let metadata = ReportMetadata {
            image_size: ocr.annotation.as_ref().and_then(|a| a.page_size()),
            word_count: ocr.annotation.as_ref().map(|a| a.words().count()).unwrap_or(0),
            processing_time_ms: elapsed_ms(start.elapsed()),
            ..Default::default()
        };

        if record.amount == SENTINEL && !ocr.text.is_empty() {
            debug!("No yen amount found in {} chars of text", ocr.text.chars().count());
        }

        ScanReport {
            fields: record,
            targets,
            boxes,
            raw_text: self.include_raw_text.then(|| ocr.text.clone()),
            metadata,
        }
    }
}
