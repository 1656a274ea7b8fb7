//! Application layer - Use cases and port interfaces
//!
//! Contains the core journaling operations and trait definitions
//! for external system interactions.

pub mod entry_store;
pub mod ports;
pub mod recording;

// Re-export use cases
pub use entry_store::{EntryStore, EntryStoreError};
pub use recording::{RecordingError, RecordingUseCase};
