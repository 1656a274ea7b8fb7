//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the filesystem, the microphone and the FLAC encoder.

pub mod capture;
pub mod config;
pub mod recording;
pub mod storage;

// Re-export adapters
pub use capture::{CpalCapture, ScriptedCapture};
pub use config::XdgConfigStore;
pub use recording::AudioArchive;
pub use storage::{FileStore, MemoryStore};
