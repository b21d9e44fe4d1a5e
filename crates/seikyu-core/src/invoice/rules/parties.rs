//! Company name extraction for the billed and billing parties.
//!
//! Recipient and issuer share one rule: the first company-form name in the
//! text. Both fields always carry the same match.

use super::patterns::COMPANY_NAME;
use super::{verbatim, ExtractionMatch, FieldExtractor};

/// Legal entity name extractor (`株式会社サンプル`).
#[derive(Debug, Default, Clone, Copy)]
pub struct CompanyNameExtractor;

impl CompanyNameExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for CompanyNameExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        COMPANY_NAME.find(text).map(verbatim)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        COMPANY_NAME.find_iter(text).map(verbatim).collect()
    }
}

/// Parties named on an invoice.
#[derive(Debug, Clone, Default)]
pub struct InvoiceParties {
    /// Billed party (請求先).
    pub to: Option<ExtractionMatch<String>>,
    /// Billing party (請求元).
    pub issuer: Option<ExtractionMatch<String>>,
}

/// Extract both parties from invoice text.
pub fn extract_parties(text: &str) -> InvoiceParties {
    let company = CompanyNameExtractor::new().extract(text);

    InvoiceParties {
        to: company.clone(),
        issuer: company,
    }
}
