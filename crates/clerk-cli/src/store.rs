//! JSON-file preference store
//!
//! The CLI's durable implementation of the core's `PreferenceStore` seam.
//! Preferences live in a single JSON file keyed by user id, then by
//! merchant key; the file is rewritten on every save while the lock is
//! held, which serializes read-modify-write cycles within the process.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use clerk_core::models::MerchantPreference;
use clerk_core::{PreferenceStore, Result};
use tracing::debug;

type Preferences = HashMap<String, HashMap<String, MerchantPreference>>;

pub struct JsonFileStore {
    path: PathBuf,
    inner: Mutex<Preferences>,
}

impl JsonFileStore {
    /// Open (or lazily create) a store file
    pub fn open(path: PathBuf) -> Result<Self> {
        let inner = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            Preferences::new()
        };

        debug!("Opened preference store at {}", path.display());

        Ok(Self {
            path,
            inner: Mutex::new(inner),
        })
    }

    fn persist(&self, inner: &Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(inner)?)?;
        Ok(())
    }
}

impl PreferenceStore for JsonFileStore {
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
        self.persist(&inner)
    }
}

/// Default store location under the platform data directory
pub fn default_store_path() -> anyhow::Result<PathBuf> {
    let data_dir = dirs::data_dir().context("could not determine the platform data directory")?;
    Ok(data_dir.join("clerk").join("preferences.json"))
}

/// Resolve the store path from the CLI flag or the platform default
pub fn resolve_store_path(flag: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match flag {
        Some(path) => Ok(path),
        None => default_store_path(),
    }
}
