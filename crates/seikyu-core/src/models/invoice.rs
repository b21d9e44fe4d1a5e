//! Invoice data models.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::highlight::HighlightBox;

/// Placeholder for a field whose rule found no match.
pub const SENTINEL: &str = "-";

/// Best-guess invoice fields from one extraction run.
///
/// Every field holds either the extracted value or [`SENTINEL`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRecord {
    /// Invoice date in the source formatting (日付).
    pub date: String,

    /// Largest yen amount, formatted as `¥50,000` (金額).
    pub amount: String,

    /// Billed party (請求先).
    pub to: String,

    /// Applicant or person in charge (申請者).
    pub applicant: String,

    /// Payment date and time (支払い日時).
    #[serde(rename = "paymentDate")]
    pub payment_date: String,

    /// Billing party (請求元).
    pub issuer: String,
}

impl Default for FieldRecord {
    fn default() -> Self {
        Self {
            date: SENTINEL.to_string(),
            amount: SENTINEL.to_string(),
            to: SENTINEL.to_string(),
            applicant: SENTINEL.to_string(),
            payment_date: SENTINEL.to_string(),
            issuer: SENTINEL.to_string(),
        }
    }
}

impl FieldRecord {
    /// Column keys, in display order.
    pub const KEYS: [&'static str; 6] = ["date", "amount", "to", "applicant", "paymentDate", "issuer"];

    /// Column labels as shown in the results table, in display order.
    pub const LABELS: [&'static str; 6] = ["日付", "金額", "請求先", "申請者", "支払い日時", "請求元"];

    /// Field values in display order.
    pub fn values(&self) -> [&str; 6] {
        [
            self.date.as_str(),
            self.amount.as_str(),
            self.to.as_str(),
            self.applicant.as_str(),
            self.payment_date.as_str(),
            self.issuer.as_str(),
        ]
    }

    /// Look up a field by its serialized key.
    pub fn get(&self, key: &str) -> Option<&str> {
        Self::KEYS
            .iter()
            .position(|k| *k == key)
            .map(|i| self.values()[i])
    }

    /// Overwrite a field by its serialized key, as a user edit would.
    ///
    /// Returns `false` for an unknown key.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> bool {
        let slot = match key {
            "date" => &mut self.date,
            "amount" => &mut self.amount,
            "to" => &mut self.to,
            "applicant" => &mut self.applicant,
            "paymentDate" => &mut self.payment_date,
            "issuer" => &mut self.issuer,
            _ => return false,
        };
        *slot = value.into();
        true
    }

    /// True when no rule matched anything.
    pub fn is_empty(&self) -> bool {
        self.values().iter().all(|v| *v == SENTINEL)
    }

    /// Number of fields holding a value.
    pub fn filled_count(&self) -> usize {
        self.values().iter().filter(|v| **v != SENTINEL).count()
    }
}

/// Full result of scanning one invoice image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Extracted fields.
    pub fields: FieldRecord,

    /// Raw matched substrings used for highlighting.
    pub targets: Vec<String>,

    /// Highlight boxes in image pixel space.
    pub boxes: Vec<HighlightBox>,

    /// Full recognized text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,

    /// Processing metadata.
    pub metadata: ReportMetadata,
}

/// Metadata attached to a scan report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Source file name, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Image dimensions (width, height).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_size: Option<(u32, u32)>,

    /// Number of recognized words walked for highlighting.
    pub word_count: usize,

    /// When the extraction ran.
    pub extracted_at: DateTime<Utc>,

    /// Extraction and highlight time in milliseconds (excludes OCR).
    pub processing_time_ms: u64,
}

impl Default for ReportMetadata {
    fn default() -> Self {
        Self {
            source: None,
            image_size: None,
            word_count: 0,
            extracted_at: Utc::now(),
            processing_time_ms: 0,
        }
    }
}

/// Whole milliseconds in `elapsed`, saturating at `u64::MAX`.
pub fn elapsed_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_is_all_sentinels() {
        let record = FieldRecord::default();
        assert!(record.is_empty());
        assert_eq!(record.filled_count(), 0);
        assert_eq!(record.values(), ["-"; 6]);
    }

    #[test]
    fn test_serialized_keys() {
        let record = FieldRecord {
            payment_date: "2024/01/15 10:00".to_string(),
            ..Default::default()
        };

        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["paymentDate"], "2024/01/15 10:00");
        assert_eq!(json["to"], "-");
        assert!(json.get("payment_date").is_none());
    }

    #[test]
    fn test_get_and_set_by_key() {
        let mut record = FieldRecord::default();

        assert!(record.set("applicant", "山田"));
        assert!(!record.set("total", "1"));

        assert_eq!(record.get("applicant"), Some("山田"));
        assert_eq!(record.get("paymentDate"), Some("-"));
        assert_eq!(record.get("total"), None);
        assert_eq!(record.filled_count(), 1);
    }

    #[test]
    fn test_elapsed_ms_saturates() {
        assert_eq!(elapsed_ms(Duration::from_millis(1500)), 1500);
        assert_eq!(elapsed_ms(Duration::from_micros(999)), 0);
        assert_eq!(elapsed_ms(Duration::MAX), u64::MAX);
    }
}
