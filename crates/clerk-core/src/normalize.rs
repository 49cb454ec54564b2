//! Field normalizers for dates and monetary amounts
//!
//! Both parsers are total: they return `None` on anything they cannot
//! handle instead of erroring, because statement cells routinely hold
//! headers, footers, and junk.

use chrono::NaiveDate;

/// Date formats attempted in order. MM/DD variants come before DD/MM, so an
/// ambiguous date like 03/04/2024 always resolves as US-style March 4th.
/// Keeping that priority is part of the extraction contract.
const DATE_FORMATS: [&str; 9] = [
    "%m/%d/%Y", // 01/15/2024
    "%m/%d/%y", // 01/15/24
    "%m-%d-%Y", // 01-15-2024
    "%m-%d-%y", // 01-15-24
    "%Y-%m-%d", // 2024-01-15
    "%d/%m/%Y", // 15/01/2024 (European)
    "%d/%m/%y", // 15/01/24
    "%d-%m-%Y", // 15-01-2024
    "%d-%m-%y", // 15-01-24
];

/// Parse a date string, trying each supported format in order.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Parse an amount string, stripping currency symbols and thousands
/// separators. Sign is preserved.
pub fn parse_amount(s: &str) -> Option<f64> {
    let cleaned: String = s.trim().replace(['$', ','], "");
    cleaned.parse::<f64>().ok()
}
