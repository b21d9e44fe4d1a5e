//! Applicant extraction.
//!
//! Rules are tried in priority order and the first rule with any match wins,
//! even when a lower-priority rule matches earlier in the text.

use regex::Regex;

use super::patterns::{APPLICANT_HONORIFIC, APPLICANT_LABEL, PERSON_IN_CHARGE_LABEL};
use super::{ExtractionMatch, FieldExtractor};

/// Applicant rules, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicantRule {
    /// Name followed by the 様 honorific.
    Honorific,
    /// Name after a `申請者:` label.
    ApplicantLabel,
    /// Name after a `担当:` label.
    PersonInChargeLabel,
}

impl ApplicantRule {
    /// All rules in the order they are tried.
    pub const PRIORITY: [ApplicantRule; 3] = [
        ApplicantRule::Honorific,
        ApplicantRule::ApplicantLabel,
        ApplicantRule::PersonInChargeLabel,
    ];

    fn pattern(&self) -> &'static Regex {
        match self {
            ApplicantRule::Honorific => &APPLICANT_HONORIFIC,
            ApplicantRule::ApplicantLabel => &APPLICANT_LABEL,
            ApplicantRule::PersonInChargeLabel => &PERSON_IN_CHARGE_LABEL,
        }
    }

    /// Apply this rule alone, returning the first captured name.
    pub fn apply(&self, text: &str) -> Option<ExtractionMatch<String>> {
        let caps = self.pattern().captures(text)?;
        let name = caps.get(1)?;

        Some(
            ExtractionMatch::new(name.as_str().to_string(), &caps[0])
                .with_position(name.start(), name.end()),
        )
    }
}

/// Applicant extractor.
#[derive(Debug, Default, Clone, Copy)]
pub struct ApplicantExtractor;

impl ApplicantExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for ApplicantExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        ApplicantRule::PRIORITY
            .iter()
            .find_map(|rule| rule.apply(text))
    }

    /// Every name captured by the winning rule.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        for rule in ApplicantRule::PRIORITY {
            let matches: Vec<_> = rule
                .pattern()
                .captures_iter(text)
                .filter_map(|caps| {
                    let name = caps.get(1)?;
                    Some(
                        ExtractionMatch::new(name.as_str().to_string(), &caps[0])
                            .with_position(name.start(), name.end()),
                    )
                })
                .collect();

            if !matches.is_empty() {
                return matches;
            }
        }

        Vec::new()
    }
}

/// Extract the applicant name from invoice text.
pub fn extract_applicant(text: &str) -> Option<ExtractionMatch<String>> {
    ApplicantExtractor::new().extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_honorific() {
        let result = extract_applicant("山田太郎様\nご請求書").unwrap();
        assert_eq!(result.value, "山田太郎様");
    }

    #[test]
    fn test_applicant_label_beats_person_in_charge() {
        // The 担当 label appears first in the text but has lower priority
        let text = "担当：佐藤\n申請者：鈴木花子";

        let result = extract_applicant(text).unwrap();

        assert_eq!(result.value, "鈴木花子");
        assert_eq!(result.source, "申請者：鈴木花子");
    }

    #[test]
    fn test_honorific_beats_labels() {
        let text = "申請者: 鈴木\nたなか様";
        assert_eq!(extract_applicant(text).unwrap().value, "たなか様");
    }

    #[test]
    fn test_person_in_charge_fallback() {
        let result = extract_applicant("担当: カトウ 090-0000-0000").unwrap();
        assert_eq!(result.value, "カトウ");
    }

    #[test]
    fn test_name_run_stops_at_latin() {
        assert_eq!(extract_applicant("申請者:田中A").unwrap().value, "田中");
    }

    #[test]
    fn test_no_applicant() {
        assert!(extract_applicant("Invoice 2024").is_none());
        assert!(ApplicantExtractor::new().extract_all("").is_empty());
    }

    #[test]
    fn test_extract_all_uses_winning_rule_only() {
        let text = "担当:佐藤\n申請者:鈴木\n申請者:高橋";

        let names: Vec<String> = ApplicantExtractor::new()
            .extract_all(text)
            .into_iter()
            .map(|m| m.value)
            .collect();

        assert_eq!(names, vec!["鈴木".to_string(), "高橋".to_string()]);
    }
}
