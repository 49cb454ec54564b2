//! Domain models for clerk

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::context::PreferenceContext;

/// How a document's transactions were extracted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionMethod {
    /// Rows + header (CSV, spreadsheet export, embedded table)
    Tabular,
    /// Unstructured text (PDF text layer, OCR output)
    TextPattern,
}

impl ExtractionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tabular => "tabular",
            Self::TextPattern => "text-pattern",
        }
    }
}

impl std::str::FromStr for ExtractionMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tabular" => Ok(Self::Tabular),
            "text-pattern" | "text_pattern" | "text" => Ok(Self::TextPattern),
            _ => Err(format!("Unknown extraction method: {}", s)),
        }
    }
}

impl std::fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A partially parsed transaction produced by an extractor.
///
/// Candidates may be missing fields; anything incomplete is dropped before
/// it reaches the deduplication stage. Statements routinely contain header,
/// footer, and running-balance rows, so an incomplete candidate is expected
/// rather than an error.
#[derive(Debug, Clone, Default)]
pub struct TransactionCandidate {
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub reference: Option<String>,
}

impl TransactionCandidate {
    /// A candidate is complete when date, description, and amount all parsed.
    pub fn is_complete(&self) -> bool {
        self.date.is_some()
            && self.description.as_deref().is_some_and(|d| !d.trim().is_empty())
            && self.amount.is_some()
    }
}

/// A fully extracted transaction.
///
/// Only complete candidates become transactions, so date, description, and
/// amount are always present here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    /// Sign preserved from the source; callers decide whether negative means debit
    pub amount: f64,
    pub reference: Option<String>,
    /// Hash of (date, trimmed description, amount) for deduplication
    pub import_hash: String,
}

/// Result of extracting one document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub transactions: Vec<Transaction>,
    pub total_count: usize,
    /// Document-level extraction confidence in [0, 1]
    pub confidence: f64,
    pub method: ExtractionMethod,
}

/// Date range and amount statistics for an extraction result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionSummary {
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub total_amount: f64,
    pub average_amount: f64,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
}

impl ExtractionResult {
    /// Summarize date range and amount statistics for display
    pub fn summary(&self) -> ExtractionSummary {
        let dates: Vec<NaiveDate> = self.transactions.iter().map(|t| t.date).collect();
        let amounts: Vec<f64> = self.transactions.iter().map(|t| t.amount).collect();

        let total: f64 = amounts.iter().sum();
        let average = if amounts.is_empty() {
            0.0
        } else {
            total / amounts.len() as f64
        };

        ExtractionSummary {
            first_date: dates.iter().min().copied(),
            last_date: dates.iter().max().copied(),
            total_amount: total,
            average_amount: average,
            min_amount: amounts.iter().copied().reduce(f64::min),
            max_amount: amounts.iter().copied().reduce(f64::max),
        }
    }
}

/// A learned mapping from merchant key to a user's preferred category.
///
/// Created on the first correction for a merchant key and updated in place
/// on subsequent corrections. Durability belongs to the preference store;
/// this crate only defines the update and matching algorithms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchantPreference {
    pub merchant_key: String,
    /// Category the system originally assigned, recorded at creation
    pub original_category: Option<String>,
    pub preferred_category: String,
    pub correction_count: u32,
    /// Grows by 1.1x per correction, capped at 2.0, never decreases
    pub learning_weight: f64,
    pub context: PreferenceContext,
    pub last_corrected_at: DateTime<Utc>,
}

/// Externally supplied category guess for a transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryGuess {
    pub category: String,
    pub confidence: f64,
}

/// Where the final category came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionSource {
    /// The external guess, unmodified or confidence-boosted
    Ai,
    /// A learned preference overrode the external guess
    Learned,
}

impl PredictionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ai => "ai",
            Self::Learned => "learned",
        }
    }
}

impl std::fmt::Display for PredictionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Final category decision for a transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryPrediction {
    pub category: String,
    pub confidence: f64,
    pub source: PredictionSource,
}
