//! Header-based column detection for tabular documents

/// Keywords that mark a date column
const DATE_KEYWORDS: [&str; 4] = ["date", "transaction_date", "posted_date", "trans_date"];

/// Keywords that mark a description column
const DESCRIPTION_KEYWORDS: [&str; 6] =
    ["description", "memo", "payee", "merchant", "details", "transaction"];

/// Keywords that mark an amount column
const AMOUNT_KEYWORDS: [&str; 6] =
    ["amount", "debit", "credit", "balance", "withdrawal", "deposit"];

/// Keywords that mark a reference column
const REFERENCE_KEYWORDS: [&str; 4] = ["reference", "ref", "transaction_id", "check_no"];

/// Mapping from semantic field to column index, inferred from a header row.
///
/// Fields without a matching header stay `None`; downstream extraction then
/// drops rows that lack the required fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: Option<usize>,
    pub description: Option<usize>,
    pub amount: Option<usize>,
    pub reference: Option<usize>,
}

impl ColumnMap {
    /// Infer column roles from header text.
    ///
    /// Each header is lowercased and tested against the keyword lists in
    /// field order (date, description, amount, reference). A header claims
    /// at most one field, the first one whose keywords it matches, and
    /// the first header to claim a field wins; later headers matching an
    /// already-assigned field are ignored.
    pub fn detect<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut map = Self::default();

        for (i, header) in headers.iter().enumerate() {
            let header = header.as_ref().to_lowercase();

            let slot = if matches_any(&header, &DATE_KEYWORDS) {
                &mut map.date
            } else if matches_any(&header, &DESCRIPTION_KEYWORDS) {
                &mut map.description
            } else if matches_any(&header, &AMOUNT_KEYWORDS) {
                &mut map.amount
            } else if matches_any(&header, &REFERENCE_KEYWORDS) {
                &mut map.reference
            } else {
                continue;
            };

            if slot.is_none() {
                *slot = Some(i);
            }
        }

        map
    }

    /// Whether the required fields (date, description, amount) all resolved
    pub fn has_required(&self) -> bool {
        self.date.is_some() && self.description.is_some() && self.amount.is_some()
    }
}

fn matches_any(header: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| header.contains(kw))
}
