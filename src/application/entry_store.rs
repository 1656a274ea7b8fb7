//! Journal entry store use case
//!
//! Every mutation is a full read-modify-write of the whole collection held
//! under a single key. Reads degrade to an empty collection on failure; writes
//! always report failure to the caller.
//!
//! Mutations work on the raw stored records. Records this build cannot read
//! are written back untouched instead of being dropped.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::domain::element::Element;
use crate::domain::error::{EmptyEntryError, EntryNotFoundError};
use crate::domain::journal::{Entry, EntryId, ENTRIES_KEY};

use super::ports::{KeyValueStore, StorageError};

/// Errors from entry store operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryStoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    NotFound(#[from] EntryNotFoundError),

    #[error(transparent)]
    Empty(#[from] EmptyEntryError),
}

/// Entry store over a key-value backend
pub struct EntryStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> EntryStore<S> {
    /// Create a new entry store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get the underlying backend
    pub fn backend(&self) -> &S {
        &self.store
    }

    /// Insert an entry and persist the re-sorted collection.
    ///
    /// A stored value that is not a JSON array is reported as corrupted
    /// rather than overwritten.
    pub async fn save(&self, entry: Entry) -> Result<(), StorageError> {
        let id = entry.id();
        let result = self.read_records().and_then(|mut records| {
            records.push(to_record(&entry)?);
            self.write_records(records)
        });

        result.inspect_err(|e| error!(error = %e, %id, "Save failed"))
    }

    /// Load all entries, newest first. Never fails: unreadable data yields an
    /// empty list and malformed records are skipped.
    pub async fn load_all(&self) -> Vec<Entry> {
        self.read_lenient()
    }

    /// Delete the entry with `id`. Deleting an unknown id changes nothing.
    pub async fn delete_by_id(&self, id: EntryId) -> Result<(), StorageError> {
        let result = self.read_records().and_then(|mut records| {
            let before = records.len();
            records.retain(|record| record_id(record) != Some(id));

            if records.len() == before {
                debug!(%id, "No entry to delete");
                return Ok(());
            }
            self.write_records(records)
        });

        result.inspect_err(|e| error!(error = %e, %id, "Delete failed"))
    }

    /// Refile the entry with `id` under `folder`.
    ///
    /// # Returns
    /// The updated entry
    pub async fn move_to_folder(&self, id: EntryId, folder: Element) -> Result<Entry, EntryStoreError> {
        let mut records = self
            .read_records()
            .inspect_err(|e| error!(error = %e, %id, "Move failed"))?;

        let (slot, mut entry) = records
            .iter()
            .enumerate()
            .filter(|(_, record)| record_id(record) == Some(id))
            .find_map(|(i, record)| Entry::deserialize(record).ok().map(|entry| (i, entry)))
            .ok_or(EntryNotFoundError { id })?;

        entry.move_to(folder);
        records[slot] = to_record(&entry)?;

        self.write_records(records)
            .inspect_err(|e| error!(error = %e, %id, "Move failed"))?;
        Ok(entry)
    }

    /// Compose and save a new entry from user text
    pub async fn create(&self, element: Element, text: &str) -> Result<Entry, EntryStoreError> {
        self.create_at(element, text, Utc::now()).await
    }

    /// Compose and save a new entry as if created at `now`.
    ///
    /// The id is the creation time in milliseconds, bumped past the newest
    /// stored id when two entries land in the same millisecond.
    pub async fn create_at(
        &self,
        element: Element,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<Entry, EntryStoreError> {
        let mut entry = Entry::compose(element, text, now)?;

        let newest = self.read_records()?.iter().filter_map(record_id).max();
        if let Some(newest) = newest {
            if entry.id() <= newest {
                entry = Entry::new(newest.successor(), element, text, now)?;
            }
        }

        self.save(entry.clone()).await?;
        Ok(entry)
    }

    /// Find a single entry by id
    pub async fn find(&self, id: EntryId) -> Option<Entry> {
        self.read_lenient().into_iter().find(|entry| entry.id() == id)
    }

    /// Entries currently filed under `folder`, newest first
    pub async fn in_folder(&self, folder: Element) -> Vec<Entry> {
        self.read_lenient()
            .into_iter()
            .filter(|entry| entry.folder() == folder)
            .collect()
    }

    fn read_records(&self) -> Result<Vec<Value>, StorageError> {
        let Some(raw) = self.store.get(ENTRIES_KEY)? else {
            return Ok(Vec::new());
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&raw).map_err(|e| StorageError::Corrupted {
            key: ENTRIES_KEY.to_string(),
            message: e.to_string(),
        })
    }

    fn read_lenient(&self) -> Vec<Entry> {
        let records = match self.read_records() {
            Ok(records) => records,
            Err(e) => {
                error!(error = %e, "Load failed");
                return Vec::new();
            }
        };

        let mut entries: Vec<Entry> = records
            .iter()
            .filter_map(|record| match Entry::deserialize(record) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "Skipping malformed entry");
                    None
                }
            })
            .collect();

        entries.sort_by(|a, b| b.id().cmp(&a.id()));
        entries
    }

    fn write_records(&self, mut records: Vec<Value>) -> Result<(), StorageError> {
        // records without a readable id sink to the end, in stored order
        records.sort_by(|a, b| record_id(b).cmp(&record_id(a)));
        let json =
            serde_json::to_string(&records).map_err(|e| StorageError::Serialize(e.to_string()))?;
        self.store.set(ENTRIES_KEY, &json)
    }
}

fn record_id(record: &Value) -> Option<EntryId> {
    record.get("id").and_then(Value::as_i64).map(EntryId::new)
}

fn to_record(entry: &Entry) -> Result<Value, StorageError> {
    serde_json::to_value(entry).map_err(|e| StorageError::Serialize(e.to_string()))
}
