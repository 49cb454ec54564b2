//! Weighted category prediction
//!
//! Blends the externally supplied category guess with learned preferences.
//! Pure given its inputs; selecting which preferences participate is the
//! caller's job (via `matching_preferences`).

use std::collections::HashSet;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::context::context_match;
use crate::models::{CategoryGuess, CategoryPrediction, MerchantPreference, PredictionSource};

/// Fraction of the preference confidence added to the guess when both agree
pub const AGREEMENT_BOOST: f64 = 0.3;

/// Preference confidence required to override a disagreeing guess
pub const OVERRIDE_THRESHOLD: f64 = 0.7;

/// Minimum token-overlap ratio for two merchant keys to match
const TOKEN_OVERLAP_THRESHOLD: f64 = 0.5;

/// Whether two merchant keys refer to the same merchant.
///
/// Exact equality, containment either way, or at least half the tokens of
/// the shorter key appearing in the other. Empty keys never match.
pub fn keys_match(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }

    if a == b || a.contains(b) || b.contains(a) {
        return true;
    }

    let tokens_a: HashSet<&str> = a.split_whitespace().collect();
    let tokens_b: HashSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return false;
    }

    let overlap = tokens_a.intersection(&tokens_b).count();
    let min_len = tokens_a.len().min(tokens_b.len());
    overlap as f64 / min_len as f64 >= TOKEN_OVERLAP_THRESHOLD
}

/// Select the stored preferences whose merchant key matches the
/// transaction's extracted key
pub fn matching_preferences<'a>(
    merchant_key: &str,
    preferences: &'a [MerchantPreference],
) -> Vec<&'a MerchantPreference> {
    preferences
        .iter()
        .filter(|p| keys_match(merchant_key, &p.merchant_key))
        .collect()
}

/// Blend the external guess with matching preferences into a final
/// prediction.
///
/// Never fails: with no matching preferences, or none whose context applies
/// at all, the guess comes back unchanged.
pub fn predict(
    amount: f64,
    when: Option<NaiveDateTime>,
    guess: &CategoryGuess,
    preferences: &[&MerchantPreference],
) -> CategoryPrediction {
    let ai_prediction = || CategoryPrediction {
        category: guess.category.clone(),
        confidence: guess.confidence,
        source: PredictionSource::Ai,
    };

    if preferences.is_empty() {
        return ai_prediction();
    }

    // Per-category weight totals in first-seen order, so ties resolve
    // deterministically toward the earliest-seen category
    let mut totals: Vec<(&str, f64)> = Vec::new();
    let mut grand_total = 0.0;

    for preference in preferences {
        let adjusted =
            preference.learning_weight * context_match(amount, when, &preference.context);
        grand_total += adjusted;

        match totals
            .iter_mut()
            .find(|(category, _)| *category == preference.preferred_category.as_str())
        {
            Some((_, weight)) => *weight += adjusted,
            None => totals.push((preference.preferred_category.as_str(), adjusted)),
        }
    }

    if grand_total == 0.0 {
        return ai_prediction();
    }

    let (best_category, best_weight) = totals
        .iter()
        .fold(("", f64::MIN), |best, &(category, weight)| {
            if weight > best.1 {
                (category, weight)
            } else {
                best
            }
        });

    let preference_confidence = best_weight / grand_total;
    debug!(
        "Preference blend: best {} at {:.2} vs guess {} at {:.2}",
        best_category, preference_confidence, guess.category, guess.confidence
    );

    if best_category == guess.category {
        CategoryPrediction {
            category: guess.category.clone(),
            confidence: (guess.confidence + preference_confidence * AGREEMENT_BOOST).min(1.0),
            source: PredictionSource::Ai,
        }
    } else if preference_confidence > OVERRIDE_THRESHOLD {
        CategoryPrediction {
            category: best_category.to_string(),
            confidence: preference_confidence,
            source: PredictionSource::Learned,
        }
    } else {
        ai_prediction()
    }
}
