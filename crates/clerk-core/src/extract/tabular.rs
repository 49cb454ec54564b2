//! Transaction extraction from tabular documents

use tracing::debug;

use crate::columns::ColumnMap;
use crate::models::TransactionCandidate;
use crate::normalize::{parse_amount, parse_date};

/// Extract transaction candidates from rows using a detected column map.
///
/// Rows producing an incomplete candidate are dropped silently: header
/// repeats, footers, and running-balance lines are normal in real
/// statements, not errors.
pub fn extract_rows(rows: &[Vec<String>], columns: &ColumnMap) -> Vec<TransactionCandidate> {
    let mut candidates = Vec::new();
    let mut dropped = 0usize;

    for row in rows {
        let candidate = candidate_from_row(row, columns);
        if candidate.is_complete() {
            candidates.push(candidate);
        } else {
            dropped += 1;
        }
    }

    debug!(
        "Tabular extraction: {} candidates, {} rows dropped",
        candidates.len(),
        dropped
    );

    candidates
}

fn candidate_from_row(row: &[String], columns: &ColumnMap) -> TransactionCandidate {
    let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).map(|s| s.as_str());

    TransactionCandidate {
        date: cell(columns.date).and_then(parse_date),
        description: cell(columns.description)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
        amount: cell(columns.amount).and_then(parse_amount),
        reference: cell(columns.reference)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn columns() -> ColumnMap {
        ColumnMap::detect(&["Date", "Description", "Amount"])
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_extracts_complete_row() {
        let rows = vec![row(&["2024-01-15", "STARBUCKS COFFEE", "-5.50"])];
        let candidates = extract_rows(&rows, &columns());

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].date, NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(candidates[0].description.as_deref(), Some("STARBUCKS COFFEE"));
        assert_eq!(candidates[0].amount, Some(-5.50));
    }

    #[test]
    fn test_drops_malformed_rows() {
        let rows = vec![
            row(&["2024-01-15", "STARBUCKS COFFEE", "-5.50"]),
            row(&["Beginning balance", "", "1000.00"]),
            row(&["2024-01-16", "GROCERY MART", "not-a-number"]),
            row(&["TOTALS"]),
        ];
        let candidates = extract_rows(&rows, &columns());
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn test_missing_required_column_drops_everything() {
        let columns = ColumnMap::detect(&["Date", "Description"]);
        let rows = vec![row(&["2024-01-15", "STARBUCKS COFFEE"])];
        assert!(extract_rows(&rows, &columns).is_empty());
    }

    #[test]
    fn test_reference_column_carried_through() {
        let columns = ColumnMap::detect(&["Date", "Description", "Amount", "Reference"]);
        let rows = vec![row(&["2024-01-15", "WIRE IN", "250.00", "TXN-0091"])];
        let candidates = extract_rows(&rows, &columns);
        assert_eq!(candidates[0].reference.as_deref(), Some("TXN-0091"));
    }

    #[test]
    fn test_description_is_trimmed() {
        let rows = vec![row(&["2024-01-15", "  STARBUCKS COFFEE  ", "-5.50"])];
        let candidates = extract_rows(&rows, &columns());
        assert_eq!(candidates[0].description.as_deref(), Some("STARBUCKS COFFEE"));
    }
}
