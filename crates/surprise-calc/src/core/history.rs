//! Persisted calculation history
//!
//! A bounded queue of `"<expression> = <result>"` strings. The full list is
//! written to storage after every mutation; clearing deletes the storage key
//! instead of writing an empty list.

use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::storage::{Storage, StorageError};

/// Formats a history entry
#[must_use]
pub fn entry_text(expression: &str, result: &str) -> String {
    format!("{expression} = {result}")
}

/// Bounded, persisted history log
#[derive(Debug)]
pub struct HistoryStore {
    /// The history entries, oldest first
    entries: VecDeque<String>,
    /// Maximum number of entries to keep
    capacity: usize,
    /// Storage key
    key: String,
    /// Persistence backend
    storage: Box<dyn Storage>,
}

impl HistoryStore {
    /// Default maximum history size
    pub const DEFAULT_CAPACITY: usize = 10;

    /// Loads the history from storage.
    ///
    /// A missing key, unreadable backend or malformed value all yield an
    /// empty history. A persisted list longer than `capacity` keeps its
    /// newest entries.
    pub fn load(storage: Box<dyn Storage>, key: impl Into<String>, capacity: usize) -> Self {
        let key = key.into();
        let mut entries = match storage.get_item(&key) {
            Ok(Some(json)) => serde_json::from_str::<Vec<String>>(&json)
                .map(VecDeque::from)
                .unwrap_or_else(|e| {
                    warn!(%key, error = %e, "Ignoring malformed persisted history");
                    VecDeque::new()
                }),
            Ok(None) => VecDeque::new(),
            Err(e) => {
                warn!(%key, error = %e, "Failed to read persisted history");
                VecDeque::new()
            }
        };

        while entries.len() > capacity {
            entries.pop_front();
        }

        debug!(%key, entries = entries.len(), "Loaded history");
        Self {
            entries,
            capacity,
            key,
            storage,
        }
    }

    /// Appends an entry, evicting the oldest past capacity, then persists
    pub fn record(&mut self, entry: impl Into<String>) {
        self.entries.push_back(entry.into());
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }

        if let Err(e) = self.persist() {
            warn!(key = %self.key, error = %e, "Failed to persist history");
        }
    }

    /// Empties the log and deletes the storage key
    pub fn clear(&mut self) {
        self.entries.clear();
        if let Err(e) = self.storage.remove_item(&self.key) {
            warn!(key = %self.key, error = %e, "Failed to remove persisted history");
        }
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        let json = self.to_json().map_err(|e| StorageError::Serialize {
            key: self.key.clone(),
            message: e.to_string(),
        })?;
        self.storage.set_item(&self.key, &json)
    }

    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the history is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the maximum number of entries
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the storage key
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns an iterator over the entries (oldest first)
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Returns an iterator over the entries (newest first)
    pub fn iter_rev(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().rev().map(String::as_str)
    }

    /// Returns the entries as an owned list (oldest first)
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    /// Returns the most recent entry
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    /// Returns the oldest entry
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
    }

    /// Returns the entry at the given index (0 = oldest)
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Serializes the history to its persisted JSON form
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }
}
