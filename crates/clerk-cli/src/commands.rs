//! Command implementations

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clerk_core::{
    analytics, extract_document, load_document, transaction_hash, CategoryEngine, DocumentFormat,
    EngineConfig, GuesserClient, PreferenceStore, Transaction,
};
use tracing::info;

use crate::store::{resolve_store_path, JsonFileStore};

/// Build the engine from the config file and store flags
fn open_engine(
    store_flag: Option<PathBuf>,
    config_flag: Option<&Path>,
) -> Result<CategoryEngine<JsonFileStore, GuesserClient>> {
    let config = EngineConfig::load(config_flag)?;
    let guesser = GuesserClient::from_config(&config.guesser, &config.default_category)?;
    let store = JsonFileStore::open(resolve_store_path(store_flag)?)?;
    Ok(CategoryEngine::new(store, guesser))
}

pub fn cmd_extract(file: &Path, format: Option<DocumentFormat>, summary: bool) -> Result<()> {
    let document = load_document(file, format)?;
    let result = extract_document(&document)?;

    info!(
        "Extracted {} transactions via {} (confidence {:.2})",
        result.total_count, result.method, result.confidence
    );

    if summary {
        println!("{}", serde_json::to_string_pretty(&result.summary())?);
    } else {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    Ok(())
}

pub async fn cmd_categorize(
    store_flag: Option<PathBuf>,
    config_flag: Option<&Path>,
    file: &Path,
    format: Option<DocumentFormat>,
    user: &str,
) -> Result<()> {
    let engine = open_engine(store_flag, config_flag)?;

    let document = load_document(file, format)?;
    let result = extract_document(&document)?;
    let predictions = engine.categorize_batch(user, &result.transactions).await?;

    for (tx, prediction) in result.transactions.iter().zip(&predictions) {
        println!(
            "{}  {:<40}  {:>10.2}  {} ({:.2}, {})",
            tx.date,
            tx.description,
            tx.amount,
            prediction.category,
            prediction.confidence,
            prediction.source
        );
    }

    info!(
        "Categorized {} transactions for user {}",
        predictions.len(),
        user
    );

    Ok(())
}

/// Fields of a `correct` invocation
pub struct CorrectionRequest {
    pub user: String,
    pub description: String,
    pub amount: f64,
    pub date: Option<NaiveDate>,
    pub from: Option<String>,
    pub to: String,
}

pub fn cmd_correct(
    store_flag: Option<PathBuf>,
    config_flag: Option<&Path>,
    request: &CorrectionRequest,
) -> Result<()> {
    let engine = open_engine(store_flag, config_flag)?;

    let date = request.date.unwrap_or_else(|| Utc::now().date_naive());
    let transaction = Transaction {
        date,
        description: request.description.clone(),
        amount: request.amount,
        reference: None,
        import_hash: transaction_hash(&date, &request.description, request.amount),
    };

    let preference = engine.correct(
        &request.user,
        &transaction,
        request.from.as_deref(),
        &request.to,
    )?;

    println!("{}", serde_json::to_string_pretty(&preference)?);
    info!(
        "Recorded correction for {}: {} (correction #{}, weight {:.2})",
        preference.merchant_key,
        preference.preferred_category,
        preference.correction_count,
        preference.learning_weight
    );

    Ok(())
}

pub fn cmd_preferences(store_flag: Option<PathBuf>, user: &str) -> Result<()> {
    let store = JsonFileStore::open(resolve_store_path(store_flag)?)?;
    let preferences = store.preferences_for_user(user)?;
    let stats = analytics(&preferences);

    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "preferences": preferences,
            "analytics": stats,
        }))?
    );

    Ok(())
}
