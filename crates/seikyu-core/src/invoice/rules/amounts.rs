//! Amount extraction for Japanese invoices.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::patterns::AMOUNT_YEN;
use super::{ExtractionMatch, FieldExtractor};

/// A whole yen amount of any length, kept as normalized decimal digits.
///
/// OCR output can run digit groups together, so amounts are not bounded by
/// any fixed-width integer type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct YenAmount {
    /// ASCII digits without leading zeros ("0" for zero).
    digits: String,
}

impl YenAmount {
    /// Parse a comma-grouped integer amount (e.g. "1,234,567").
    ///
    /// Returns `None` when no digit is present or any other character is.
    pub fn parse(s: &str) -> Option<Self> {
        let cleaned: String = s.chars().filter(|c| *c != ',').collect();

        if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        let trimmed = cleaned.trim_start_matches('0');
        let digits = if trimmed.is_empty() { "0" } else { trimmed };

        Some(Self {
            digits: digits.to_string(),
        })
    }

    /// The amount's decimal digits.
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// The amount as a `u64`, if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        self.digits.parse().ok()
    }
}

impl From<u64> for YenAmount {
    fn from(value: u64) -> Self {
        Self {
            digits: value.to_string(),
        }
    }
}

impl Ord for YenAmount {
    // Normalized digits: the longer string is larger, equal lengths compare digit-wise
    fn cmp(&self, other: &Self) -> Ordering {
        self.digits
            .len()
            .cmp(&other.digits.len())
            .then_with(|| self.digits.cmp(&other.digits))
    }
}

impl PartialOrd for YenAmount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for YenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_yen(self))
    }
}

/// Yen amount extractor (`1,000円`, `50000 円`).
#[derive(Debug, Default, Clone, Copy)]
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<YenAmount>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for caps in AMOUNT_YEN.captures_iter(text) {
            let full_match = caps.get(0).unwrap();

            // A run of bare commas matches the pattern but is not a number
            if let Some(amount) = parse_yen_amount(&caps[1]) {
                results.push(
                    ExtractionMatch::new(amount, full_match.as_str())
                        .with_position(full_match.start(), full_match.end()),
                );
            }
        }

        results
    }
}

/// Amounts found on an invoice.
#[derive(Debug, Clone, Default)]
pub struct InvoiceAmounts {
    /// Largest amount, taken as the invoice total.
    pub total: Option<ExtractionMatch<YenAmount>>,
    /// Every detected amount, in text order.
    pub all_amounts: Vec<ExtractionMatch<YenAmount>>,
}

/// Extract amounts from invoice text.
pub fn extract_amounts(text: &str) -> InvoiceAmounts {
    let all_amounts = AmountExtractor::new().extract_all(text);

    let total = all_amounts
        .iter()
        .max_by(|a, b| a.value.cmp(&b.value))
        .cloned();

    InvoiceAmounts { total, all_amounts }
}

/// Parse a comma-grouped integer yen amount (e.g. "1,234,567").
pub fn parse_yen_amount(s: &str) -> Option<YenAmount> {
    YenAmount::parse(s)
}

/// Format an amount as a yen string with thousands grouping (¥1,234,567).
pub fn format_yen(amount: &YenAmount) -> String {
    let chars: Vec<char> = amount.digits().chars().collect();
    let mut formatted = String::new();

    // Add thousand separators
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(*c);
    }

    format!("¥{}", formatted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yen(s: &str) -> YenAmount {
        YenAmount::parse(s).unwrap()
    }

    #[test]
    fn test_parse_yen_amount() {
        assert_eq!(parse_yen_amount("1,000"), Some(YenAmount::from(1000)));
        assert_eq!(parse_yen_amount("50000"), Some(YenAmount::from(50000)));
        assert_eq!(parse_yen_amount("007"), Some(YenAmount::from(7)));
        assert_eq!(parse_yen_amount("0,000"), Some(YenAmount::from(0)));
        assert_eq!(parse_yen_amount(","), None);
        assert_eq!(parse_yen_amount(""), None);
        assert_eq!(parse_yen_amount("12a"), None);
    }

    #[test]
    fn test_format_yen() {
        assert_eq!(format_yen(&YenAmount::from(0)), "¥0");
        assert_eq!(format_yen(&YenAmount::from(999)), "¥999");
        assert_eq!(format_yen(&YenAmount::from(1000)), "¥1,000");
        assert_eq!(YenAmount::from(1234567).to_string(), "¥1,234,567");
    }

    #[test]
    fn test_ordering_by_magnitude() {
        assert!(yen("1,000") > yen("999"));
        assert!(yen("0012") > yen("9"));
        assert!(yen("20") > yen("19"));
        assert_eq!(yen("000").cmp(&yen("0")), Ordering::Equal);
    }

    #[test]
    fn test_amount_wider_than_fixed_integers() {
        let digits = "123456789012345678901234567890";
        let amount = yen(digits);

        assert_eq!(amount.digits(), digits);
        assert_eq!(amount.to_u64(), None);
        assert!(amount > YenAmount::from(u64::MAX));
        assert_eq!(
            format_yen(&amount),
            "¥123,456,789,012,345,678,901,234,567,890"
        );
    }

    #[test]
    fn test_long_token_is_the_total() {
        let text = "小計 1,000円\n合計 123456789012345678901234567890円";

        let amounts = extract_amounts(text);

        assert_eq!(amounts.all_amounts.len(), 2);
        let total = amounts.total.unwrap();
        assert_eq!(total.source, "123456789012345678901234567890円");
        assert_eq!(total.value.digits(), "123456789012345678901234567890");
    }

    #[test]
    fn test_extract_amounts_selects_maximum() {
        let text = "小計 1,000円\n合計 50,000円\n消費税 4,545 円";

        let amounts = extract_amounts(text);

        assert_eq!(amounts.all_amounts.len(), 3);
        assert_eq!(amounts.total.unwrap().value, YenAmount::from(50000));
    }

    #[test]
    fn test_extract_all_keeps_source_tokens() {
        let results = AmountExtractor::new().extract_all("税込 12,800 円");

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].source, "12,800 円");
    }

    #[test]
    fn test_comma_only_token_is_skipped() {
        let amounts = extract_amounts("項目,円");

        assert!(amounts.all_amounts.is_empty());
        assert!(amounts.total.is_none());
    }

    #[test]
    fn test_no_amounts() {
        let amounts = extract_amounts("金額未定");
        assert!(amounts.total.is_none());
    }
}
