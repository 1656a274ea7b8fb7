//! Domain error types

use thiserror::Error;

use crate::domain::journal::EntryId;
use crate::domain::recording::CaptureErrorCode;

/// Error when an unknown element tag is provided
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid element: \"{input}\". Valid elements are: earth, water, fire, air, spirit")]
pub struct InvalidElementError {
    pub input: String,
}

/// Error when an entry would be created without any text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Entry text is empty. Write or record something before saving")]
pub struct EmptyEntryError;

/// Error when a move targets an entry id that is not stored
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Entry {id} not found")]
pub struct EntryNotFoundError {
    pub id: EntryId,
}

/// Provider error severe enough to halt a recording session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Capture halted: {code}")]
pub struct CriticalCaptureError {
    pub code: CaptureErrorCode,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
