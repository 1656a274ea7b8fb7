//! File-backed key-value store
//!
//! Each key lives in its own `<key>.json` file inside a data directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::application::ports::{KeyValueStore, StorageError};

/// Key-value store that keeps one file per key
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Read {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let write_error = |e: std::io::Error| StorageError::Write {
            key: key.to_string(),
            message: e.to_string(),
        };

        fs::create_dir_all(&self.dir).map_err(write_error)?;

        // a crash mid-write leaves the previous value intact
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(write_error)?;
        fs::rename(&tmp, &path).map_err(write_error)?;

        debug!(path = %path.display(), bytes = value.len(), "Stored value");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get("absent").unwrap(), None);
    }

    #[test]
    fn set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));

        store.set("elementa_entries", "[]").unwrap();
        assert_eq!(store.get("elementa_entries").unwrap().as_deref(), Some("[]"));
        assert!(store.path_for("elementa_entries").exists());
        assert!(!dir.path().join("nested/elementa_entries.json.tmp").exists());
    }

    #[test]
    fn set_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn unwritable_dir_reports_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();

        let store = FileStore::new(blocker.join("sub"));
        let err = store.set("k", "v").unwrap_err();
        assert!(matches!(err, StorageError::Write { ref key, .. } if key == "k"));
    }
}
