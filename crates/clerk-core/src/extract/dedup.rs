//! Deduplication and extraction confidence scoring

use std::collections::HashSet;

use chrono::NaiveDate;
use sha2::{Digest, Sha256};

use crate::models::TransactionCandidate;

/// Generate a unique hash over (date, trimmed description, amount).
///
/// This is both the dedup key within one extraction and the `import_hash`
/// storage collaborators use to skip transactions they have already seen.
pub fn transaction_hash(date: &NaiveDate, description: &str, amount: f64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(date.to_string().as_bytes());
    hasher.update(description.trim().as_bytes());
    hasher.update(amount.to_be_bytes());
    hex::encode(hasher.finalize())
}

/// Collapse exact duplicates, preserving first-seen order.
///
/// Running the pass over its own output is a no-op.
pub fn dedupe(candidates: Vec<TransactionCandidate>) -> Vec<TransactionCandidate> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();

    for candidate in candidates {
        let key = match (candidate.date, &candidate.description, candidate.amount) {
            (Some(date), Some(description), Some(amount)) => {
                transaction_hash(&date, description, amount)
            }
            // Incomplete candidates never reach this stage; keep them
            // rather than inventing a collapse rule for them
            _ => {
                unique.push(candidate);
                continue;
            }
        };

        if seen.insert(key) {
            unique.push(candidate);
        }
    }

    unique
}

/// Per-transaction confidence: 0.4 for a date, 0.3 for a description, 0.3
/// for an amount.
///
/// Complete candidates always score 1.0; the weighting exists so the scorer
/// stays meaningful if partial candidates are ever allowed through.
pub fn score_candidate(candidate: &TransactionCandidate) -> f64 {
    let mut score = 0.0;
    if candidate.date.is_some() {
        score += 0.4;
    }
    if candidate
        .description
        .as_deref()
        .is_some_and(|d| !d.trim().is_empty())
    {
        score += 0.3;
    }
    if candidate.amount.is_some() {
        score += 0.3;
    }
    score
}

/// Document-level confidence: mean of the per-transaction scores, boosted
/// by 1.2x (capped at 1.0) when more than 80% of transactions score above
/// 0.8. An empty set has confidence 0.0.
pub fn document_confidence(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }

    let total: f64 = scores.iter().sum();
    let mean = total / scores.len() as f64;

    let valid = scores.iter().filter(|s| **s > 0.8).count();
    if valid as f64 / scores.len() as f64 > 0.8 {
        (mean * 1.2).min(1.0)
    } else {
        mean
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(date: (i32, u32, u32), description: &str, amount: f64) -> TransactionCandidate {
        TransactionCandidate {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
            description: Some(description.to_string()),
            amount: Some(amount),
            reference: None,
        }
    }

    #[test]
    fn test_dedupe_collapses_identical_candidates() {
        let candidates = vec![
            candidate((2024, 1, 15), "STARBUCKS COFFEE", -5.50),
            candidate((2024, 1, 15), "STARBUCKS COFFEE", -5.50),
        ];
        assert_eq!(dedupe(candidates).len(), 1);
    }

    #[test]
    fn test_dedupe_trims_description_for_key() {
        let candidates = vec![
            candidate((2024, 1, 15), "STARBUCKS COFFEE", -5.50),
            candidate((2024, 1, 15), "  STARBUCKS COFFEE  ", -5.50),
        ];
        assert_eq!(dedupe(candidates).len(), 1);
    }

    #[test]
    fn test_dedupe_keeps_distinct_candidates() {
        let candidates = vec![
            candidate((2024, 1, 15), "STARBUCKS COFFEE", -5.50),
            candidate((2024, 1, 16), "STARBUCKS COFFEE", -5.50),
            candidate((2024, 1, 15), "STARBUCKS COFFEE", -6.50),
        ];
        assert_eq!(dedupe(candidates).len(), 3);
    }

    #[test]
    fn test_dedupe_preserves_first_seen_order() {
        let candidates = vec![
            candidate((2024, 1, 16), "B", -1.0),
            candidate((2024, 1, 15), "A", -2.0),
            candidate((2024, 1, 16), "B", -1.0),
        ];
        let unique = dedupe(candidates);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].description.as_deref(), Some("B"));
        assert_eq!(unique[1].description.as_deref(), Some("A"));
    }

    #[test]
    fn test_dedupe_is_idempotent() {
        let candidates = vec![
            candidate((2024, 1, 15), "STARBUCKS COFFEE", -5.50),
            candidate((2024, 1, 15), "STARBUCKS COFFEE", -5.50),
            candidate((2024, 1, 16), "GROCERY MART", -42.17),
        ];
        let once = dedupe(candidates);
        let twice = dedupe(once.clone());
        assert_eq!(once.len(), twice.len());
    }

    #[test]
    fn test_score_weights() {
        let complete = candidate((2024, 1, 15), "STARBUCKS COFFEE", -5.50);
        assert_eq!(score_candidate(&complete), 1.0);

        let no_date = TransactionCandidate {
            date: None,
            ..complete.clone()
        };
        assert!((score_candidate(&no_date) - 0.6).abs() < 1e-9);

        assert_eq!(score_candidate(&TransactionCandidate::default()), 0.0);
    }

    #[test]
    fn test_document_confidence_empty() {
        assert_eq!(document_confidence(&[]), 0.0);
    }

    #[test]
    fn test_document_confidence_boost_and_cap() {
        // All transactions complete: mean 1.0, boosted, capped at 1.0
        assert_eq!(document_confidence(&[1.0, 1.0, 1.0]), 1.0);
    }

    #[test]
    fn test_document_confidence_no_boost_below_threshold() {
        // Half the scores above 0.8 is not more than 80%
        let scores = [1.0, 0.6];
        assert!((document_confidence(&scores) - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_document_confidence_bounds() {
        for scores in [vec![0.0], vec![0.4, 0.3], vec![1.0; 50], vec![0.7, 0.9, 1.0]] {
            let confidence = document_confidence(&scores);
            assert!((0.0..=1.0).contains(&confidence));
        }
    }
}
