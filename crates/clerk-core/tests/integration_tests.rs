//! Integration tests for clerk-core
//!
//! These tests exercise the full ingest → extract → categorize → correct →
//! re-categorize workflow.

use clerk_core::{
    document::{read_tabular, DocumentInput},
    engine::CategoryEngine,
    extract::extract_document,
    guess::MockGuesser,
    learn::MemoryStore,
    models::{ExtractionMethod, PredictionSource},
};

/// Statement fixture with a header, a duplicated charge, and the usual
/// non-transaction furniture banks put in exports
fn statement_csv() -> &'static str {
    r#"Date,Description,Amount
01/15/2024,STARBUCKS COFFEE,-5.50
01/15/2024,STARBUCKS COFFEE,-5.50
01/16/2024,GROCERY MART,-42.17
01/20/2024,NETFLIX.COM,-15.99
Beginning balance,,1000.00
,,
"#
}

#[test]
fn test_tabular_extraction_workflow() {
    let document = read_tabular(statement_csv().as_bytes()).expect("Failed to read CSV");
    let result = extract_document(&document).expect("Extraction failed");

    assert_eq!(result.method, ExtractionMethod::Tabular);
    // Four data rows minus one exact duplicate; junk rows dropped silently
    assert_eq!(result.total_count, 3);
    assert_eq!(result.transactions.len(), 3);
    assert_eq!(result.transactions[0].description, "STARBUCKS COFFEE");
    assert_eq!(result.transactions[0].amount, -5.50);

    // Completeness invariant: every surviving transaction is fully formed
    for tx in &result.transactions {
        assert!(!tx.description.is_empty());
        assert!(!tx.import_hash.is_empty());
    }

    assert!(result.confidence > 0.99);

    let summary = result.summary();
    assert_eq!(
        summary.first_date.map(|d| d.to_string()).as_deref(),
        Some("2024-01-15")
    );
    assert_eq!(
        summary.last_date.map(|d| d.to_string()).as_deref(),
        Some("2024-01-20")
    );
    assert!((summary.total_amount - (-63.66)).abs() < 1e-9);
}

#[test]
fn test_text_extraction_workflow() {
    let text = "Statement Period: January 2024\n\
                01/15/2024 STARBUCKS COFFEE $5.50\n\
                01/16/2024 GROCERY MART $42.17\n\
                Page 1 of 1\n";
    let document = DocumentInput::Text(text.to_string());
    let result = extract_document(&document).expect("Extraction failed");

    assert_eq!(result.method, ExtractionMethod::TextPattern);
    assert_eq!(result.total_count, 2);
    assert_eq!(result.transactions[0].description, "STARBUCKS COFFEE");
    assert_eq!(result.transactions[0].amount, 5.50);
    assert!(result.confidence > 0.99);
}

#[test]
fn test_unsupported_format_is_surfaced() {
    let err = clerk_core::detect_format(std::path::Path::new("statement.docx")).unwrap_err();
    assert!(matches!(err, clerk_core::Error::UnsupportedFormat(_)));
}

#[tokio::test]
async fn test_correction_learning_workflow() {
    let document = read_tabular(statement_csv().as_bytes()).unwrap();
    let result = extract_document(&document).unwrap();

    let engine = CategoryEngine::new(MemoryStore::new(), MockGuesser::returning("Food & Dining", 0.6));
    let starbucks = &result.transactions[0];

    // Before any corrections the external guess passes through
    let before = engine.categorize("user-1", starbucks).await.unwrap();
    assert_eq!(before.category, "Food & Dining");
    assert_eq!(before.source, PredictionSource::Ai);

    // The user corrects the category; the next prediction follows suit
    engine
        .correct("user-1", starbucks, Some("Food & Dining"), "Coffee")
        .unwrap();

    let after = engine.categorize("user-1", starbucks).await.unwrap();
    assert_eq!(after.category, "Coffee");
    assert_eq!(after.source, PredictionSource::Learned);

    // A second user sees none of this
    let other = engine.categorize("user-2", starbucks).await.unwrap();
    assert_eq!(other.category, "Food & Dining");
    assert_eq!(other.source, PredictionSource::Ai);
}

#[tokio::test]
async fn test_batch_categorization_over_extraction() {
    let document = read_tabular(statement_csv().as_bytes()).unwrap();
    let result = extract_document(&document).unwrap();

    let engine = CategoryEngine::new(MemoryStore::new(), MockGuesser::default());
    let predictions = engine
        .categorize_batch("user-1", &result.transactions)
        .await
        .unwrap();

    assert_eq!(predictions.len(), result.transactions.len());
    for prediction in predictions {
        assert!((0.0..=1.0).contains(&prediction.confidence));
    }
}
