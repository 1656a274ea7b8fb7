//! On-disk archive of audio-mode recordings

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::fs;
use tracing::info;

use crate::domain::element::Element;
use crate::domain::recording::{AudioClip, AudioMimeType};

use super::flac_encoder::{encode_clip, EncodingError};

/// Errors from archiving a recording
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error("Failed to write recording to {path}: {message}")]
    Write { path: String, message: String },
}

/// Writes finished clips as FLAC files under a directory
pub struct AudioArchive {
    dir: PathBuf,
}

impl AudioArchive {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name for a clip recorded for `element` at `at`
    pub fn file_name(element: Element, at: DateTime<Utc>, mime_type: AudioMimeType) -> String {
        format!(
            "{}-{}.{}",
            at.format("%Y%m%d-%H%M%S"),
            element,
            mime_type.extension()
        )
    }

    /// Encode `clip` and write it to the archive.
    ///
    /// # Returns
    /// Path of the written file
    pub async fn save(
        &self,
        clip: &AudioClip,
        element: Element,
        at: DateTime<Utc>,
    ) -> Result<PathBuf, ArchiveError> {
        let clip = clip.clone();
        let data = tokio::task::spawn_blocking(move || encode_clip(&clip))
            .await
            .map_err(|e| EncodingError::Encode(format!("Encode task error: {e}")))??;

        let path = self.dir.join(Self::file_name(element, at, data.mime_type()));
        let write_error = |e: std::io::Error| ArchiveError::Write {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        fs::create_dir_all(&self.dir).await.map_err(write_error)?;
        fs::write(&path, data.data()).await.map_err(write_error)?;

        info!(path = %path.display(), size = %data.human_readable_size(), "Recording archived");
        Ok(path)
    }
}
