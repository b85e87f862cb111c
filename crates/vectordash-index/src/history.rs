//! Bounded history of created embeddings.
//!
//! Newest entries come first. Once the history is full the oldest entries
//! fall off, but `total_created` keeps counting every embedding ever
//! recorded.

use crate::store::KeyValueStore;
use crate::{IndexError, IndexResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use vectordash_embeddings::{Embedding, SimilarityReport};

/// Store key for the serialized entries.
pub const HISTORY_KEY: &str = "embeddingsHistory";
/// Store key for the running total.
pub const TOTAL_KEY: &str = "totalEmbeddings";
/// Default number of entries kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Snapshot written by [`EmbeddingHistory::export`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryExport {
    pub embeddings: Vec<Embedding>,
    pub total_count: usize,
    pub export_date: DateTime<Utc>,
    pub model: String,
}

/// Embedding history persisted through a [`KeyValueStore`].
#[derive(Debug)]
pub struct EmbeddingHistory<S: KeyValueStore> {
    store: S,
    entries: Vec<Embedding>,
    total_created: u64,
    limit: usize,
}

impl<S: KeyValueStore> EmbeddingHistory<S> {
    /// Load the history from `store`.
    ///
    /// A corrupt entry list or counter is logged and replaced with an empty
    /// one rather than failing; store I/O errors are returned.
    pub fn load(store: S, limit: usize) -> IndexResult<Self> {
        let total_created: u64 = match store.load(TOTAL_KEY)? {
            Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
                warn!(value = %raw, error = %e, "ignoring unreadable embedding total");
                0
            }),
            None => 0,
        };

        let mut entries: Vec<Embedding> = match store.load(HISTORY_KEY)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "ignoring unreadable embedding history");
                Vec::new()
            }),
            None => Vec::new(),
        };
        entries.truncate(limit);

        debug!(entries = entries.len(), total_created, "history loaded");
        Ok(Self {
            store,
            entries,
            total_created,
            limit,
        })
    }

    /// Load with the default limit.
    pub fn open(store: S) -> IndexResult<Self> {
        Self::load(store, DEFAULT_HISTORY_LIMIT)
    }

    /// Add a batch of new embeddings in front of the existing ones.
    ///
    /// Returns the number recorded.
    pub fn record(&mut self, batch: Vec<Embedding>) -> IndexResult<usize> {
        let added = batch.len();
        if added == 0 {
            return Ok(0);
        }

        let mut entries = batch;
        entries.extend(self.entries.iter().cloned());
        entries.truncate(self.limit);
        let total = self.total_created + added as u64;

        self.persist(&entries, total)?;
        self.entries = entries;
        self.total_created = total;
        debug!(added, kept = self.entries.len(), total, "embeddings recorded");
        Ok(added)
    }

    /// Remove the entry at `index`.
    pub fn remove(&mut self, index: usize) -> IndexResult<Embedding> {
        if index >= self.entries.len() {
            return Err(self.out_of_range(index));
        }
        let mut entries = self.entries.clone();
        let removed = entries.remove(index);
        self.persist(&entries, self.total_created)?;
        self.entries = entries;
        Ok(removed)
    }

    /// Drop all entries. The running total is kept.
    pub fn clear(&mut self) -> IndexResult<()> {
        self.persist(&[], self.total_created)?;
        self.entries.clear();
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Embedding> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[Embedding] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Embeddings ever recorded, including ones no longer kept.
    pub fn total_created(&self) -> u64 {
        self.total_created
    }

    /// Case-insensitive substring search over entry text.
    ///
    /// A blank query matches nothing.
    pub fn search(&self, query: &str) -> Vec<(usize, &Embedding)> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.text.to_lowercase().contains(&query))
            .collect()
    }

    /// Compare two entries by position.
    pub fn compare(&self, first: usize, second: usize) -> IndexResult<SimilarityReport> {
        let a = self.get(first).ok_or_else(|| self.out_of_range(first))?;
        let b = self.get(second).ok_or_else(|| self.out_of_range(second))?;
        Ok(a.compare(b)?)
    }

    /// Snapshot of the kept entries.
    pub fn export(&self, model: &str) -> HistoryExport {
        HistoryExport {
            embeddings: self.entries.clone(),
            total_count: self.entries.len(),
            export_date: Utc::now(),
            model: model.to_string(),
        }
    }

    /// Give the store back.
    pub fn into_store(self) -> S {
        self.store
    }

    fn out_of_range(&self, index: usize) -> IndexError {
        IndexError::OutOfRange {
            index,
            len: self.entries.len(),
        }
    }

    /// Write `entries` and `total` without touching in-memory state.
    ///
    /// If the total cannot be written the previous entries are put back so
    /// both keys keep describing the same history.
    fn persist(&mut self, entries: &[Embedding], total: u64) -> IndexResult<()> {
        let json = serde_json::to_string(entries)?;
        self.store.save(HISTORY_KEY, &json)?;
        if total == self.total_created {
            return Ok(());
        }

        if let Err(e) = self.store.save(TOTAL_KEY, &total.to_string()) {
            let restored = serde_json::to_string(&self.entries)
                .map_err(IndexError::from)
                .and_then(|previous| self.store.save(HISTORY_KEY, &previous));
            if let Err(rollback) = restored {
                warn!(error = %rollback, "could not restore embedding history");
            }
            return Err(e);
        }
        Ok(())
    }
}
