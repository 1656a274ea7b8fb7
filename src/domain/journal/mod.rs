//! Journal domain module

mod entry;

pub use entry::{Entry, EntryId, MalformedEntryError};

/// Storage key holding the whole entry collection
pub const ENTRIES_KEY: &str = "elementa_entries";
