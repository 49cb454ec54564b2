//! Keyword-scoring guesser
//!
//! Deterministic fallback when no categorization service is reachable.
//! Covers the common merchants and billing phrases well enough to be
//! useful on its own, and its guesses improve like any other backend's
//! once corrections accumulate on top.

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::models::CategoryGuess;

use super::CategoryGuesser;

/// Category keyword table, checked in order; ties go to the earlier entry
const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Food & Dining",
        &[
            "restaurant", "cafe", "coffee", "dining", "pizza", "burger", "sushi", "mcdonalds",
            "starbucks", "doordash", "grubhub",
        ],
    ),
    (
        "Transportation",
        &["uber", "lyft", "taxi", "fuel", "parking", "toll", "transit", "metro"],
    ),
    (
        "Shopping",
        &["amazon", "walmart", "target", "costco", "store", "mall", "clothing"],
    ),
    (
        "Entertainment",
        &["netflix", "spotify", "movie", "theater", "concert", "game", "gym"],
    ),
    (
        "Healthcare",
        &["pharmacy", "medical", "dental", "clinic", "hospital", "prescription"],
    ),
    (
        "Utilities",
        &["electric", "water", "internet", "phone", "cable", "utility"],
    ),
    (
        "Housing",
        &["rent", "mortgage", "apartment", "property", "lease"],
    ),
    (
        "Education",
        &["tuition", "university", "college", "course", "school"],
    ),
    (
        "Travel",
        &["hotel", "airline", "flight", "airbnb", "booking"],
    ),
    (
        "Insurance",
        &["insurance", "premium", "policy"],
    ),
    (
        "Subscriptions",
        &["subscription", "membership", "recurring"],
    ),
    (
        "Fees & Charges",
        &["fee", "overdraft", "penalty", "service charge", "interest"],
    ),
];

/// Guesser that scores keyword hits against the transaction description
#[derive(Clone)]
pub struct KeywordGuesser {
    default_category: String,
}

impl KeywordGuesser {
    pub fn new(default_category: &str) -> Self {
        Self {
            default_category: default_category.to_string(),
        }
    }
}

#[async_trait]
impl CategoryGuesser for KeywordGuesser {
    async fn guess(&self, description: &str, _amount: f64) -> Result<CategoryGuess> {
        let description = description.to_lowercase();

        let mut best_category: Option<&str> = None;
        let mut best_score = 0usize;

        for (category, keywords) in CATEGORY_KEYWORDS {
            let score = keywords
                .iter()
                .filter(|kw| description.contains(*kw))
                .count();
            if score > best_score {
                best_score = score;
                best_category = Some(category);
            }
        }

        // Confidence scales with keyword hits; a miss still yields a weak
        // guess at the default category rather than a failure
        let (category, confidence) = match best_category {
            Some(category) => (category.to_string(), (best_score as f64 * 0.2).min(0.8)),
            None => (self.default_category.clone(), 0.1),
        };

        debug!(
            "Keyword guess for {:?}: {} ({} hits)",
            description, category, best_score
        );

        Ok(CategoryGuess {
            category,
            confidence,
        })
    }
}
