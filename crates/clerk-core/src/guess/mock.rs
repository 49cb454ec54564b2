//! Mock guesser for testing
//!
//! Returns a fixed response so tests can drive the blending logic without
//! a backend.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::CategoryGuess;

use super::CategoryGuesser;

/// Guesser that always returns the configured category and confidence
#[derive(Clone)]
pub struct MockGuesser {
    pub category: String,
    pub confidence: f64,
}

impl MockGuesser {
    /// Mock returning a specific guess
    pub fn returning(category: &str, confidence: f64) -> Self {
        Self {
            category: category.to_string(),
            confidence,
        }
    }
}

impl Default for MockGuesser {
    fn default() -> Self {
        Self::returning("Food & Dining", 0.6)
    }
}

#[async_trait]
impl CategoryGuesser for MockGuesser {
    async fn guess(&self, _description: &str, _amount: f64) -> Result<CategoryGuess> {
        Ok(CategoryGuess {
            category: self.category.clone(),
            confidence: self.confidence,
        })
    }
}
