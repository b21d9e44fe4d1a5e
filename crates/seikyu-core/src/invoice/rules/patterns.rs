//! Common regex patterns for Japanese invoice extraction.
//!
//! Digits are spelled `[0-9]` on purpose: `\d` in `regex` is Unicode-aware
//! and would also accept full-width digits.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Calendar dates: 2024/01/15, 2024-1-5, 2024年1月15日
    pub static ref DATE: Regex = Regex::new(
        r"[0-9]{4}[/\-年][0-9]{1,2}[/\-月][0-9]{1,2}日?"
    ).unwrap();

    // Date followed by a clock time: 2024/01/15 14:30
    pub static ref PAYMENT_DATE: Regex = Regex::new(
        r"[0-9]{4}[/\-年][0-9]{1,2}[/\-月][0-9]{1,2}日?\s*[0-9]{1,2}:[0-9]{2}"
    ).unwrap();

    // Yen amounts: 1,000円, 50000 円
    pub static ref AMOUNT_YEN: Regex = Regex::new(
        r"([0-9,]+)\s*円"
    ).unwrap();

    // Company-form prefix followed by the rest of the name
    pub static ref COMPANY_NAME: Regex = Regex::new(
        r"(?:株式会社|有限会社|合同会社)\S*"
    ).unwrap();

    // Applicant candidates, in priority order
    pub static ref APPLICANT_HONORIFIC: Regex = Regex::new(
        r"([\p{Han}\p{Hiragana}\p{Katakana}]+様)"
    ).unwrap();

    pub static ref APPLICANT_LABEL: Regex = Regex::new(
        r"申請者[:：]\s*([\p{Han}\p{Hiragana}\p{Katakana}]+)"
    ).unwrap();

    pub static ref PERSON_IN_CHARGE_LABEL: Regex = Regex::new(
        r"担当[:：]\s*([\p{Han}\p{Hiragana}\p{Katakana}]+)"
    ).unwrap();
}
