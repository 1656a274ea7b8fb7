//! Domain layer - Core business logic
//!
//! Contains value objects, entities, the recording state machine and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod element;
pub mod error;
pub mod journal;
pub mod recording;

// Re-export common types
pub use config::AppConfig;
pub use element::{Element, ALL_ELEMENTS};
pub use error::*;
pub use journal::{Entry, EntryId};
pub use recording::{CaptureEvent, CaptureKind, RecordingOutput, RecordingSession, SessionMode};
