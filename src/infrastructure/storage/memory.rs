//! In-memory key-value store

use std::collections::HashMap;
use std::sync::Mutex;

use crate::application::ports::{KeyValueStore, StorageError};

/// Volatile store, useful for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with `key` preset to `value`
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut values) = store.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.lock().map_err(|e| StorageError::Read {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().map_err(|e| StorageError::Write {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
