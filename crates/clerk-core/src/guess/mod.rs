//! Pluggable category-guesser backends
//!
//! The engine treats the initial category guess as an external input: some
//! collaborator looks at a transaction and supplies a `(category,
//! confidence)` pair. This module defines that seam and three backends:
//! a deterministic keyword scorer, a remote HTTP service client, and a
//! mock for tests. How a backend arrives at its guess is its own business;
//! the blending against learned preferences happens downstream and is
//! identical for all of them.

mod http;
mod keyword;
mod mock;

pub use http::HttpGuesser;
pub use keyword::KeywordGuesser;
pub use mock::MockGuesser;

use async_trait::async_trait;

use crate::config::{GuesserBackend, GuesserConfig};
use crate::error::{Error, Result};
use crate::models::CategoryGuess;

/// Trait defining the interface for category guessers.
///
/// Backends should be Send + Sync to allow use across async tasks.
#[async_trait]
pub trait CategoryGuesser: Send + Sync {
    /// Produce a category guess for one transaction
    async fn guess(&self, description: &str, amount: f64) -> Result<CategoryGuess>;
}

/// Concrete guesser wrapper providing Clone + compile-time dispatch
#[derive(Clone)]
pub enum GuesserClient {
    Keyword(KeywordGuesser),
    Http(HttpGuesser),
    Mock(MockGuesser),
}

impl GuesserClient {
    /// Build a client from configuration
    pub fn from_config(config: &GuesserConfig, default_category: &str) -> Result<Self> {
        match config.backend {
            GuesserBackend::Keyword => {
                Ok(Self::Keyword(KeywordGuesser::new(default_category)))
            }
            GuesserBackend::Http => {
                let endpoint = config.endpoint.as_deref().ok_or_else(|| {
                    Error::InvalidData("http guesser backend requires an endpoint".to_string())
                })?;
                Ok(Self::Http(HttpGuesser::new(
                    endpoint,
                    config.model.as_deref(),
                    config.timeout_secs,
                )?))
            }
            GuesserBackend::Mock => Ok(Self::Mock(MockGuesser::default())),
        }
    }
}

#[async_trait]
impl CategoryGuesser for GuesserClient {
    async fn guess(&self, description: &str, amount: f64) -> Result<CategoryGuess> {
        match self {
            Self::Keyword(backend) => backend.guess(description, amount).await,
            Self::Http(backend) => backend.guess(description, amount).await,
            Self::Mock(backend) => backend.guess(description, amount).await,
        }
    }
}
