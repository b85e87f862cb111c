//! Key/value persistence for client-side bookkeeping.
//!
//! The history keeps its entries and counters behind this small interface
//! so callers decide where they live: memory for tests, a JSON file for the
//! CLI, anything else an embedding application wants to plug in.

use crate::{IndexError, IndexResult};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::debug;

/// String key/value storage.
pub trait KeyValueStore {
    /// Store `value` under `key`, replacing any previous value.
    fn save(&mut self, key: &str, value: &str) -> IndexResult<()>;

    /// Fetch the value under `key`.
    fn load(&self, key: &str) -> IndexResult<Option<String>>;

    /// Delete `key`. Missing keys are not an error.
    fn remove(&mut self, key: &str) -> IndexResult<()>;
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn save(&mut self, key: &str, value: &str) -> IndexResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> IndexResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn remove(&mut self, key: &str) -> IndexResult<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object file.
///
/// The file is read on every access and rewritten on every change. A
/// missing file reads as an empty store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> IndexResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            IndexError::Store(format!("{} is not a valid store file: {}", self.path.display(), e))
        })
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> IndexResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(values)?;
        std::fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), keys = values.len(), "store written");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn save(&mut self, key: &str, value: &str) -> IndexResult<()> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }

    fn load(&self, key: &str) -> IndexResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn remove(&mut self, key: &str) -> IndexResult<()> {
        let mut values = self.read_all()?;
        if values.remove(key).is_some() {
            self.write_all(&values)?;
        }
        Ok(())
    }
}
