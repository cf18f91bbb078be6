//! Key-value persistence backends
//!
//! The history log persists through the [`Storage`] trait, which mirrors the
//! browser `localStorage` surface: string keys, string values, synchronous
//! calls. [`MemoryStorage`] backs native builds and tests; the browser build
//! provides a `localStorage` implementation in `wasm::browser`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

/// Errors raised by a storage backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Value could not be serialized
    #[error("Failed to serialize value for '{key}': {message}")]
    Serialize {
        /// Key being written
        key: String,
        /// Serializer message
        message: String,
    },
    /// Backend rejected the operation (quota, privacy mode, ...)
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Synchronous string key-value store
pub trait Storage: std::fmt::Debug {
    /// Reads a value, `None` when the key is absent
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes a value, replacing any previous one
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Deletes the key; absent keys are not an error
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory storage.
///
/// Clones share the same map, so a clone kept by a test observes every write
/// made through the store it was handed to, and a second store built from a
/// clone behaves like a page reload against the same `localStorage`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the key is present
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.items.borrow().contains_key(key)
    }

    /// Returns the number of stored keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    /// Returns true if nothing is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_new_is_empty() {
        let storage = MemoryStorage::new();
        assert!(storage.is_empty());
        assert_eq!(storage.len(), 0);
    }

    #[test]
    fn test_memory_storage_set_get() {
        let mut storage = MemoryStorage::new();
        storage.set_item("k", "v").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), Some("v".to_string()));
        assert!(storage.contains_key("k"));
    }

    #[test]
    fn test_memory_storage_overwrite() {
        let mut storage = MemoryStorage::new();
        storage.set_item("k", "a").unwrap();
        storage.set_item("k", "b").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), Some("b".to_string()));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_memory_storage_missing_key() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("missing").unwrap(), None);
    }

    #[test]
    fn test_memory_storage_remove() {
        let mut storage = MemoryStorage::new();
        storage.set_item("k", "v").unwrap();
        storage.remove_item("k").unwrap();
        assert!(!storage.contains_key("k"));
        // Removing again is fine
        storage.remove_item("k").unwrap();
    }

    #[test]
    fn test_memory_storage_clones_share_state() {
        let mut storage = MemoryStorage::new();
        let observer = storage.clone();
        storage.set_item("shared", "1").unwrap();
        assert!(observer.contains_key("shared"));
    }

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::Backend("quota exceeded".into());
        assert_eq!(err.to_string(), "Storage backend error: quota exceeded");

        let err = StorageError::Serialize {
            key: "calculatorHistory".into(),
            message: "boom".into(),
        };
        assert!(err.to_string().contains("calculatorHistory"));
    }
}
