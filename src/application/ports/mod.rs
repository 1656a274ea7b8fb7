//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod capture;
pub mod config;
pub mod storage;

// Re-export common types
pub use capture::{CaptureError, CaptureSource, EventSender, TranscriptCallback};
pub use config::ConfigStore;
pub use storage::{KeyValueStore, StorageError};
