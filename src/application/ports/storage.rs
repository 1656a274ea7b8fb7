//! Key-value persistence port

use std::sync::Arc;

use thiserror::Error;

/// Storage errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Failed to read '{key}': {message}")]
    Read { key: String, message: String },

    #[error("Failed to write '{key}': {message}")]
    Write { key: String, message: String },

    #[error("Stored data under '{key}' is corrupted: {message}")]
    Corrupted { key: String, message: String },

    #[error("Failed to serialize data: {0}")]
    Serialize(String),
}

/// Port for a synchronous, string-valued local key-value store
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Returns
    /// `Ok(None)` when nothing has been stored yet
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Blanket implementation for boxed store types
impl KeyValueStore for Box<dyn KeyValueStore> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.as_ref().get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.as_ref().set(key, value)
    }
}

/// Shared stores, so several use cases can sit on one backend
impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.as_ref().get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.as_ref().set(key, value)
    }
}
