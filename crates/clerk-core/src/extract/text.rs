//! Transaction extraction from unstructured text
//!
//! PDF text layers and OCR output carry transactions as free-form lines.
//! Three regex templates cover the field orderings seen in the wild; all
//! three run over the full text and their matches are concatenated, so one
//! line can contribute a candidate per template it matches. Overlap is
//! resolved downstream by deduplication, not here.

use regex::Regex;
use tracing::debug;

use crate::error::Result;
use crate::models::TransactionCandidate;
use crate::normalize::{parse_amount, parse_date};

/// Amount token: optional leading `$`, up to three leading digits, optional
/// thousands groups, optional cents
const AMOUNT_PATTERN: &str = r"\$?\d{1,3}(?:,\d{3})*(?:\.\d{2})?";

/// Date token: numeric day/month/year with `/` or `-` separators
const DATE_PATTERN: &str = r"\d{1,2}[/-]\d{1,2}[/-]\d{2,4}";

/// Field ordering a template captures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldOrder {
    DateDescAmount,
    AmountDateDesc,
    DescAmountDate,
}

impl FieldOrder {
    /// Map the three capture groups onto (date, description, amount)
    fn assign<'t>(&self, g1: &'t str, g2: &'t str, g3: &'t str) -> (&'t str, &'t str, &'t str) {
        match self {
            Self::DateDescAmount => (g1, g2, g3),
            Self::AmountDateDesc => (g2, g3, g1),
            Self::DescAmountDate => (g3, g1, g2),
        }
    }
}

struct Template {
    order: FieldOrder,
    regex: Regex,
}

/// Applies the ordered regex templates to recover transaction triples
pub struct TextPatternExtractor {
    templates: Vec<Template>,
}

impl TextPatternExtractor {
    pub fn new() -> Result<Self> {
        // Description groups exclude `$` and newlines, and field separators
        // are spaces/tabs only, so a match never crosses a currency token
        // or a physical line.
        let templates = vec![
            Template {
                order: FieldOrder::DateDescAmount,
                regex: Regex::new(&format!(
                    r"({DATE_PATTERN})[ \t]+([^$\r\n]+?)[ \t]+({AMOUNT_PATTERN})"
                ))?,
            },
            Template {
                order: FieldOrder::AmountDateDesc,
                regex: Regex::new(&format!(
                    r"({AMOUNT_PATTERN})[ \t]+({DATE_PATTERN})[ \t]+([^$\r\n]+)"
                ))?,
            },
            Template {
                order: FieldOrder::DescAmountDate,
                regex: Regex::new(&format!(
                    r"([^$\r\n]+?)[ \t]+({AMOUNT_PATTERN})[ \t]+({DATE_PATTERN})"
                ))?,
            },
        ];

        Ok(Self { templates })
    }

    /// Extract candidates from a block of text.
    ///
    /// Matches that fail to normalize into a complete candidate are dropped
    /// silently; statement text is full of totals, footers, and page
    /// furniture that happen to brush against the patterns.
    pub fn extract(&self, text: &str) -> Vec<TransactionCandidate> {
        let mut candidates = Vec::new();

        for template in &self.templates {
            for caps in template.regex.captures_iter(text) {
                let (g1, g2, g3) = match (caps.get(1), caps.get(2), caps.get(3)) {
                    (Some(a), Some(b), Some(c)) => (a.as_str(), b.as_str(), c.as_str()),
                    _ => continue,
                };

                // The currency marker pins down which group is the amount;
                // group 3 never needs testing by construction of the
                // templates. Without a marker, trust the template's declared
                // order.
                let order = if g1.contains('$') {
                    FieldOrder::AmountDateDesc
                } else if g2.contains('$') {
                    FieldOrder::DescAmountDate
                } else {
                    template.order
                };

                let (date_str, desc_str, amount_str) = order.assign(g1, g2, g3);

                let candidate = TransactionCandidate {
                    date: parse_date(date_str),
                    description: Some(desc_str.trim().to_string()).filter(|s| !s.is_empty()),
                    amount: parse_amount(amount_str),
                    reference: None,
                };

                if candidate.is_complete() {
                    candidates.push(candidate);
                }
            }
        }

        debug!("Text extraction: {} candidates", candidates.len());

        candidates
    }
}
