//! Preference learning from user corrections
//!
//! The learner itself is a pure function over (existing record, correction,
//! timestamp); durability and the serialization of concurrent corrections
//! for the same merchant key belong to the `PreferenceStore` implementation.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::context::PreferenceContext;
use crate::error::Result;
use crate::models::MerchantPreference;

/// Multiplier applied to the learning weight on each repeat correction
pub const WEIGHT_GROWTH: f64 = 1.1;

/// Ceiling for the learning weight
pub const WEIGHT_CAP: f64 = 2.0;

/// A user correction for one transaction
#[derive(Debug, Clone)]
pub struct Correction {
    pub merchant_key: String,
    /// Category the system had assigned, if any
    pub original_category: Option<String>,
    pub corrected_category: String,
    /// Situation of the corrected transaction
    pub context: PreferenceContext,
}

/// Fold a correction into a preference record.
///
/// First correction for a merchant key creates the record with weight 1.0.
/// Repeat corrections grow the weight by `WEIGHT_GROWTH` up to `WEIGHT_CAP`
/// (so the weight never decreases), take the new category, and merge
/// context first-write-wins: the category is last-write, the context
/// first-write.
pub fn apply_correction(
    existing: Option<MerchantPreference>,
    correction: &Correction,
    now: DateTime<Utc>,
) -> MerchantPreference {
    match existing {
        None => MerchantPreference {
            merchant_key: correction.merchant_key.clone(),
            original_category: correction.original_category.clone(),
            preferred_category: correction.corrected_category.clone(),
            correction_count: 1,
            learning_weight: 1.0,
            context: correction.context.clone(),
            last_corrected_at: now,
        },
        Some(mut preference) => {
            preference.correction_count += 1;
            preference.learning_weight = (preference.learning_weight * WEIGHT_GROWTH).min(WEIGHT_CAP);
            preference.preferred_category = correction.corrected_category.clone();
            preference.context.merge(&correction.context);
            preference.last_corrected_at = now;
            preference
        }
    }
}

/// Storage collaborator for learned preferences.
///
/// Implementations must partition records by user id (one user's
/// corrections must never influence another user's predictions) and must
/// serialize concurrent read-modify-write cycles for the same
/// (user, merchant key), since weight growth and context merging are not
/// commutative.
pub trait PreferenceStore: Send + Sync {
    /// All preferences recorded for a user
    fn preferences_for_user(&self, user_id: &str) -> Result<Vec<MerchantPreference>>;

    /// Look up one preference by exact merchant key
    fn find(&self, user_id: &str, merchant_key: &str) -> Result<Option<MerchantPreference>>;

    /// Persist a created or updated preference
    fn save(&self, user_id: &str, preference: MerchantPreference) -> Result<()>;
}

/// In-memory preference store, keyed by user id.
///
/// Useful for tests and single-process callers; anything needing
/// durability brings its own `PreferenceStore`.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<HashMap<String, HashMap<String, MerchantPreference>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn preferences_for_user(&self, user_id: &str) -> Result<Vec<MerchantPreference>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .get(user_id)
            .map(|prefs| prefs.values().cloned().collect())
            .unwrap_or_default())
    }

    fn find(&self, user_id: &str, merchant_key: &str) -> Result<Option<MerchantPreference>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .get(user_id)
            .and_then(|prefs| prefs.get(merchant_key))
            .cloned())
    }

    fn save(&self, user_id: &str, preference: MerchantPreference) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .entry(user_id.to_string())
            .or_default()
            .insert(preference.merchant_key.clone(), preference);
        Ok(())
    }
}

/// Correction count for one merchant, for the analytics view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchantCorrections {
    pub merchant_key: String,
    pub corrections: u32,
}

/// Aggregate view of what a user's corrections have taught the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningAnalytics {
    pub total_corrections: u32,
    pub pattern_count: usize,
    pub average_weight: f64,
    /// Top five most-corrected merchants
    pub most_corrected: Vec<MerchantCorrections>,
}

/// Summarize a user's learned preferences
pub fn analytics(preferences: &[MerchantPreference]) -> LearningAnalytics {
    let total_corrections: u32 = preferences.iter().map(|p| p.correction_count).sum();
    let average_weight = if preferences.is_empty() {
        0.0
    } else {
        preferences.iter().map(|p| p.learning_weight).sum::<f64>() / preferences.len() as f64
    };

    let mut most_corrected: Vec<MerchantCorrections> = preferences
        .iter()
        .map(|p| MerchantCorrections {
            merchant_key: p.merchant_key.clone(),
            corrections: p.correction_count,
        })
        .collect();
    most_corrected.sort_by(|a, b| b.corrections.cmp(&a.corrections));
    most_corrected.truncate(5);

    LearningAnalytics {
        total_corrections,
        pattern_count: preferences.len(),
        average_weight,
        most_corrected,
    }
}
