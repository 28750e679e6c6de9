//! Receipt text heuristics
//!
//! Turns OCR output into a candidate expense date and amount. The OCR engine
//! itself is an external collaborator behind [`TextExtractor`]; this module
//! only applies the text heuristics. Results are low-confidence defaults the
//! user is expected to confirm or edit, so a miss is not an error.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::LedgerResult;
use crate::models::Money;

/// Extracts text from a receipt image; implemented by the embedding
/// application (e.g. with an OCR engine), not by this crate
pub trait TextExtractor {
    fn extract_text(&self, image: &[u8]) -> LedgerResult<String>;
}

/// Candidate expense fields recovered from receipt text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptHint {
    /// First date-looking substring, normalized to `YYYY-MM-DD`; `None` when
    /// nothing matched
    pub date: Option<String>,
    /// Largest digit run of length >= 3; zero when nothing matched
    pub amount: Money,
}

fn date_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(19|20)\d{2}[-/.](0[1-9]|1[0-2])[-/.](0[1-9]|[12][0-9]|3[01])")
            .unwrap()
    })
}

fn amount_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d{3,}").unwrap())
}

/// Apply the date/amount heuristics to extracted receipt text
pub fn scan_receipt_text(text: &str) -> ReceiptHint {
    let date = date_pattern()
        .find(text)
        .map(|m| m.as_str().replace(['.', '/'], "-"));

    // commas are digit grouping on receipts; strip before scanning for runs
    let digits_only = text.replace(',', "");
    let amount = amount_pattern()
        .find_iter(&digits_only)
        .filter_map(|m| m.as_str().parse::<i64>().ok())
        .max()
        .map(Money::from_units)
        .unwrap_or_default();

    ReceiptHint { date, amount }
}

/// Run the extractor on an image and scan the resulting text
pub fn scan_receipt_image(
    extractor: &dyn TextExtractor,
    image: &[u8],
) -> LedgerResult<ReceiptHint> {
    let text = extractor.extract_text(image)?;
    Ok(scan_receipt_text(&text))
}
