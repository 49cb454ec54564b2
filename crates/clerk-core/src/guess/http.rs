//! HTTP guesser backend
//!
//! Client for a remote categorization service. The wire contract is the
//! narrow interface the engine depends on: POST a transaction, get back a
//! `(category, confidence)` pair. Whatever sits behind the endpoint (an
//! LLM, a rules service, a hosted model) is out of scope here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::CategoryGuess;

use super::CategoryGuesser;

#[derive(Serialize)]
struct GuessRequest<'a> {
    description: &'a str,
    amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

#[derive(Deserialize)]
struct GuessResponse {
    category: String,
    confidence: f64,
}

/// Guesser backed by a remote categorization endpoint
#[derive(Clone)]
pub struct HttpGuesser {
    http_client: Client,
    endpoint: String,
    model: Option<String>,
}

impl HttpGuesser {
    pub fn new(endpoint: &str, model: Option<&str>, timeout_secs: u64) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.map(|m| m.to_string()),
        })
    }
}

#[async_trait]
impl CategoryGuesser for HttpGuesser {
    async fn guess(&self, description: &str, amount: f64) -> Result<CategoryGuess> {
        let request = GuessRequest {
            description,
            amount,
            model: self.model.as_deref(),
        };

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Guess(format!(
                "categorization service returned {}",
                response.status()
            )));
        }

        let body: GuessResponse = response.json().await?;
        debug!(
            "Remote guess for {:?}: {} ({:.2})",
            description, body.category, body.confidence
        );

        Ok(CategoryGuess {
            category: body.category,
            confidence: body.confidence.clamp(0.0, 1.0),
        })
    }
}
