//! Engine configuration
//!
//! Config is loaded with a two-layer resolution:
//! 1. An override file supplied by the caller (CLI `--config`)
//! 2. Embedded defaults (compiled into the binary)

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/engine.toml");

/// Guesser backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuesserBackend {
    /// Deterministic keyword scoring, no network
    Keyword,
    /// Remote categorization service over HTTP
    Http,
    /// Fixed response, for tests and dry runs
    Mock,
}

/// Settings for the external category guesser
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GuesserConfig {
    pub backend: GuesserBackend,
    /// Endpoint URL, required for the http backend
    pub endpoint: Option<String>,
    /// Model identifier forwarded to the http backend
    pub model: Option<String>,
    pub timeout_secs: u64,
}

impl Default for GuesserConfig {
    fn default() -> Self {
        Self {
            backend: GuesserBackend::Keyword,
            endpoint: None,
            model: None,
            timeout_secs: 30,
        }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Category used when nothing better is known
    pub default_category: String,
    pub guesser: GuesserConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_category: "Uncategorized".to_string(),
            guesser: GuesserConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration, preferring an override file when given
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let raw = match override_path {
            Some(path) => fs::read_to_string(path)?,
            None => DEFAULT_CONFIG.to_string(),
        };
        Ok(toml::from_str(&raw)?)
    }
}
