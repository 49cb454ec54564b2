//! Category engine
//!
//! Wires the guesser, the preference store, the context matcher, and the
//! weighted predictor into the per-transaction flow: guess → look up
//! preferences by merchant key → blend. Corrections run the read →
//! pure-update → write cycle against the store, and their effect is
//! visible to the next prediction for the same merchant key.

use chrono::{NaiveDateTime, NaiveTime, Utc};
use tracing::debug;

use crate::context::PreferenceContext;
use crate::error::Result;
use crate::guess::CategoryGuesser;
use crate::learn::{apply_correction, Correction, PreferenceStore};
use crate::merchant::merchant_key;
use crate::models::{CategoryGuess, CategoryPrediction, MerchantPreference, Transaction};
use crate::predict::{matching_preferences, predict};

/// Per-user categorization engine over a preference store and a guesser
pub struct CategoryEngine<S, G> {
    store: S,
    guesser: G,
}

impl<S: PreferenceStore, G: CategoryGuesser> CategoryEngine<S, G> {
    pub fn new(store: S, guesser: G) -> Self {
        Self { store, guesser }
    }

    /// Categorize one transaction for a user
    pub async fn categorize(
        &self,
        user_id: &str,
        transaction: &Transaction,
    ) -> Result<CategoryPrediction> {
        let guess = self
            .guesser
            .guess(&transaction.description, transaction.amount)
            .await?;
        self.blend(user_id, transaction, &guess)
    }

    /// Categorize a batch of transactions for a user
    pub async fn categorize_batch(
        &self,
        user_id: &str,
        transactions: &[Transaction],
    ) -> Result<Vec<CategoryPrediction>> {
        let mut predictions = Vec::with_capacity(transactions.len());
        for transaction in transactions {
            predictions.push(self.categorize(user_id, transaction).await?);
        }
        Ok(predictions)
    }

    /// Blend an externally produced guess with the user's learned
    /// preferences. Exposed separately so callers with their own guess
    /// source can skip the backend call.
    pub fn blend(
        &self,
        user_id: &str,
        transaction: &Transaction,
        guess: &CategoryGuess,
    ) -> Result<CategoryPrediction> {
        let key = merchant_key(&transaction.description);
        let preferences = self.store.preferences_for_user(user_id)?;
        let matching = matching_preferences(&key, &preferences);

        debug!(
            "Categorizing {:?} (key {:?}): {} of {} preferences match",
            transaction.description,
            key,
            matching.len(),
            preferences.len()
        );

        Ok(predict(
            transaction.amount,
            Some(transaction_time(transaction)),
            guess,
            &matching,
        ))
    }

    /// Record a user correction and return the updated preference.
    ///
    /// A missing record is not an error: the first-correction path creates
    /// a fresh one.
    pub fn correct(
        &self,
        user_id: &str,
        transaction: &Transaction,
        original_category: Option<&str>,
        corrected_category: &str,
    ) -> Result<MerchantPreference> {
        let key = merchant_key(&transaction.description);
        let correction = Correction {
            merchant_key: key.clone(),
            original_category: original_category.map(|c| c.to_string()),
            corrected_category: corrected_category.to_string(),
            context: PreferenceContext::capture(
                transaction.amount,
                Some(transaction_time(transaction)),
            ),
        };

        let existing = self.store.find(user_id, &key)?;
        let updated = apply_correction(existing, &correction, Utc::now());
        self.store.save(user_id, updated.clone())?;

        debug!(
            "Learned correction for {:?}: {} (count {}, weight {:.2})",
            key, updated.preferred_category, updated.correction_count, updated.learning_weight
        );

        Ok(updated)
    }
}

/// Statement transactions carry a date but no time; treat them as midnight
fn transaction_time(transaction: &Transaction) -> NaiveDateTime {
    transaction.date.and_time(NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::transaction_hash;
    use crate::guess::MockGuesser;
    use crate::learn::MemoryStore;
    use crate::models::PredictionSource;
    use chrono::NaiveDate;

    fn transaction(description: &str, amount: f64) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        Transaction {
            date,
            description: description.to_string(),
            amount,
            reference: None,
            import_hash: transaction_hash(&date, description, amount),
        }
    }

    fn engine(guess: MockGuesser) -> CategoryEngine<MemoryStore, MockGuesser> {
        CategoryEngine::new(MemoryStore::new(), guess)
    }

    #[tokio::test]
    async fn test_no_preferences_passes_guess_through() {
        let engine = engine(MockGuesser::returning("Food & Dining", 0.6));
        let prediction = engine
            .categorize("user-1", &transaction("STARBUCKS COFFEE", 5.50))
            .await
            .unwrap();

        assert_eq!(prediction.category, "Food & Dining");
        assert_eq!(prediction.confidence, 0.6);
        assert_eq!(prediction.source, PredictionSource::Ai);
    }

    #[tokio::test]
    async fn test_correction_changes_next_prediction() {
        let engine = engine(MockGuesser::returning("Food & Dining", 0.6));
        let tx = transaction("STARBUCKS COFFEE", 5.50);

        engine
            .correct("user-1", &tx, Some("Food & Dining"), "Coffee")
            .unwrap();

        let prediction = engine.categorize("user-1", &tx).await.unwrap();
        assert_eq!(prediction.category, "Coffee");
        assert_eq!(prediction.source, PredictionSource::Learned);
        assert!(prediction.confidence > 0.7);
    }

    #[tokio::test]
    async fn test_correction_applies_to_merchant_variants() {
        let engine = engine(MockGuesser::returning("Food & Dining", 0.6));

        engine
            .correct(
                "user-1",
                &transaction("STARBUCKS COFFEE #1234", 5.50),
                Some("Food & Dining"),
                "Coffee",
            )
            .unwrap();

        // Different store, same merchant key family
        let prediction = engine
            .categorize("user-1", &transaction("STARBUCKS COFFEE SEATTLE", 6.25))
            .await
            .unwrap();
        assert_eq!(prediction.category, "Coffee");
    }

    #[tokio::test]
    async fn test_repeat_corrections_grow_the_record() {
        let engine = engine(MockGuesser::returning("Uncategorized", 0.2));
        let tx = transaction("STARBUCKS COFFEE", 5.50);

        engine.correct("user-1", &tx, Some("Uncategorized"), "Coffee").unwrap();
        engine.correct("user-1", &tx, Some("Uncategorized"), "Coffee").unwrap();
        let preference = engine
            .correct("user-1", &tx, Some("Uncategorized"), "Coffee")
            .unwrap();

        assert_eq!(preference.correction_count, 3);
        assert!((preference.learning_weight - 1.21).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_users_are_isolated() {
        let engine = engine(MockGuesser::returning("Food & Dining", 0.6));
        let tx = transaction("STARBUCKS COFFEE", 5.50);

        engine
            .correct("user-1", &tx, Some("Food & Dining"), "Coffee")
            .unwrap();

        // Another user's predictions are untouched by user-1's corrections
        let prediction = engine.categorize("user-2", &tx).await.unwrap();
        assert_eq!(prediction.category, "Food & Dining");
        assert_eq!(prediction.source, PredictionSource::Ai);
    }

    #[tokio::test]
    async fn test_agreeing_guess_gets_boosted() {
        let engine = engine(MockGuesser::returning("Coffee", 0.6));
        let tx = transaction("STARBUCKS COFFEE", 5.50);

        engine.correct("user-1", &tx, None, "Coffee").unwrap();

        let prediction = engine.categorize("user-1", &tx).await.unwrap();
        assert_eq!(prediction.category, "Coffee");
        assert!((prediction.confidence - 0.9).abs() < 1e-9);
        assert_eq!(prediction.source, PredictionSource::Ai);
    }

    #[tokio::test]
    async fn test_batch_categorization() {
        let engine = engine(MockGuesser::returning("Food & Dining", 0.6));
        let transactions = vec![
            transaction("STARBUCKS COFFEE", 5.50),
            transaction("GROCERY MART", 42.17),
        ];

        let predictions = engine
            .categorize_batch("user-1", &transactions)
            .await
            .unwrap();
        assert_eq!(predictions.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_description_never_matches_learned_records() {
        let engine = engine(MockGuesser::returning("Food & Dining", 0.6));

        engine
            .correct("user-1", &transaction("STARBUCKS COFFEE", 5.50), None, "Coffee")
            .unwrap();

        let prediction = engine
            .categorize("user-1", &transaction("", 5.50))
            .await
            .unwrap();
        assert_eq!(prediction.category, "Food & Dining");
        assert_eq!(prediction.source, PredictionSource::Ai);
    }
}
