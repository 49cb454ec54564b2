//! Format-agnostic transaction extraction pipeline
//!
//! Control flow: `DocumentInput` → {tabular | text-pattern} extractor →
//! deduplication → confidence scoring → `ExtractionResult`.

pub mod dedup;
pub mod tabular;
pub mod text;

use tracing::debug;

use crate::columns::ColumnMap;
use crate::document::DocumentInput;
use crate::error::Result;
use crate::models::{ExtractionMethod, ExtractionResult, Transaction, TransactionCandidate};

pub use dedup::transaction_hash;
pub use text::TextPatternExtractor;

/// Extract transactions from a document
pub fn extract_document(document: &DocumentInput) -> Result<ExtractionResult> {
    let (candidates, method) = match document {
        DocumentInput::Tabular { headers, rows } => {
            let columns = ColumnMap::detect(headers);
            debug!("Detected columns: {:?}", columns);
            (tabular::extract_rows(rows, &columns), ExtractionMethod::Tabular)
        }
        DocumentInput::Text(text) => {
            let extractor = TextPatternExtractor::new()?;
            (extractor.extract(text), ExtractionMethod::TextPattern)
        }
    };

    Ok(finalize(candidates, method))
}

/// Deduplicate candidates, score them, and assemble the immutable result.
///
/// Incomplete candidates are filtered here as well; the extractors already
/// drop them, but the completeness invariant on `ExtractionResult` does not
/// depend on that.
fn finalize(candidates: Vec<TransactionCandidate>, method: ExtractionMethod) -> ExtractionResult {
    let complete: Vec<TransactionCandidate> = candidates
        .into_iter()
        .filter(TransactionCandidate::is_complete)
        .collect();

    let unique = dedup::dedupe(complete);
    let scores: Vec<f64> = unique.iter().map(dedup::score_candidate).collect();
    let confidence = dedup::document_confidence(&scores);

    let transactions: Vec<Transaction> = unique
        .into_iter()
        .filter_map(|candidate| {
            let date = candidate.date?;
            let description = candidate.description?.trim().to_string();
            let amount = candidate.amount?;
            let import_hash = transaction_hash(&date, &description, amount);
            Some(Transaction {
                date,
                description,
                amount,
                reference: candidate.reference,
                import_hash,
            })
        })
        .collect();

    debug!(
        "Extraction finalized: {} transactions via {} (confidence {:.2})",
        transactions.len(),
        method,
        confidence
    );

    ExtractionResult {
        total_count: transactions.len(),
        transactions,
        confidence,
        method,
    }
}
