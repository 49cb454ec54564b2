//! Clerk Core Library
//!
//! Shared functionality for the clerk statement processing tool:
//! - Document ingestion (tabular exports and extracted text)
//! - Format-agnostic transaction extraction with deduplication and
//!   confidence scoring
//! - Merchant key canonicalization
//! - Pluggable category-guesser backends (keyword, HTTP, mock)
//! - Preference learning from user corrections
//! - Context-weighted blending of guesses and learned preferences

pub mod columns;
pub mod config;
pub mod context;
pub mod document;
pub mod engine;
pub mod error;
pub mod extract;
pub mod guess;
pub mod learn;
pub mod merchant;
pub mod models;
pub mod normalize;
pub mod predict;

pub use columns::ColumnMap;
pub use config::{EngineConfig, GuesserBackend, GuesserConfig};
pub use context::{context_match, AmountRange, PreferenceContext, TimeOfDay};
pub use document::{detect_format, load_document, DocumentFormat, DocumentInput};
pub use engine::CategoryEngine;
pub use error::{Error, Result};
pub use extract::{extract_document, transaction_hash, TextPatternExtractor};
pub use guess::{CategoryGuesser, GuesserClient, HttpGuesser, KeywordGuesser, MockGuesser};
pub use learn::{
    analytics, apply_correction, Correction, LearningAnalytics, MemoryStore, MerchantCorrections,
    PreferenceStore,
};
pub use merchant::merchant_key;
pub use models::{
    CategoryGuess, CategoryPrediction, ExtractionMethod, ExtractionResult, ExtractionSummary,
    MerchantPreference, PredictionSource, Transaction, TransactionCandidate,
};
pub use predict::{keys_match, matching_preferences, predict};
