//! User preference persistence
//!
//! The only state that survives a restart: the 'light'/'dark' theme
//! preference, stored under a fixed key. The file-backed store reads its
//! file once at construction and rewrites it on every change, mirroring
//! the read-once-at-startup / write-on-change contract of the console UI.

use crate::{AssistantError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Fixed storage key for the theme preference.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        };
        write!(f, "{}", s)
    }
}

impl Theme {
    /// Parse a stored value, falling back to light for anything unknown.
    pub fn parse_or_default(value: &str) -> Self {
        match value {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

/// Trait for key/value preference persistence
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory preference store for development and tests
pub struct InMemoryPreferenceStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self {
            values: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryPreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.read().await;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.write().await;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON-file-backed preference store
pub struct FilePreferenceStore {
    path: PathBuf,
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl FilePreferenceStore {
    /// Open the store, loading the file once. A missing file starts empty;
    /// a malformed file is an error rather than silent data loss.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let values = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            HashMap::new()
        };

        debug!(path = %path.display(), "Preference store loaded");

        Ok(Self {
            path,
            values: Arc::new(RwLock::new(values)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_file(&self, values: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(values)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for FilePreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.read().await;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.write().await;
        values.insert(key.to_string(), value.to_string());
        self.write_file(&values).map_err(|e| {
            AssistantError::PreferenceError(format!(
                "Failed to persist preferences to {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

/// Read the theme preference, defaulting to light when unset.
pub async fn load_theme(store: &dyn PreferenceStore) -> Result<Theme> {
    let stored = store.get(THEME_KEY).await?;
    Ok(stored
        .map(|value| Theme::parse_or_default(&value))
        .unwrap_or(Theme::Light))
}

/// Persist the theme preference under the fixed key.
pub async fn save_theme(store: &dyn PreferenceStore, theme: Theme) -> Result<()> {
    store.set(THEME_KEY, &theme.to_string()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::block_on;

    #[test]
    fn test_theme_defaults_to_light() {
        let store = InMemoryPreferenceStore::new();
        let theme = block_on(load_theme(&store)).unwrap();
        assert_eq!(theme, Theme::Light);
    }

    #[test]
    fn test_theme_round_trip_in_memory() {
        let store = InMemoryPreferenceStore::new();
        block_on(save_theme(&store, Theme::Dark)).unwrap();
        let theme = block_on(load_theme(&store)).unwrap();
        assert_eq!(theme, Theme::Dark);
    }

    #[test]
    fn test_unknown_value_falls_back_to_light() {
        let store = InMemoryPreferenceStore::new();
        block_on(store.set(THEME_KEY, "solarized")).unwrap();
        let theme = block_on(load_theme(&store)).unwrap();
        assert_eq!(theme, Theme::Light);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");

        let store = FilePreferenceStore::open(&path).unwrap();
        block_on(save_theme(&store, Theme::Dark)).unwrap();
        drop(store);

        let reopened = FilePreferenceStore::open(&path).unwrap();
        let theme = block_on(load_theme(&reopened)).unwrap();
        assert_eq!(theme, Theme::Dark);
    }

    #[test]
    fn test_file_store_starts_empty_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePreferenceStore::open(dir.path().join("missing.json")).unwrap();
        let theme = block_on(load_theme(&store)).unwrap();
        assert_eq!(theme, Theme::Light);
    }
}
