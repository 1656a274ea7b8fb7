//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::element::Element;

/// Audio capture configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Keep finished audio recordings as FLAC files
    pub save: Option<bool>,
    pub recordings_dir: Option<String>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub data_dir: Option<String>,
    pub default_element: Option<String>,
    pub audio: Option<AudioConfig>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            data_dir: None,
            default_element: Some("earth".to_string()),
            audio: Some(AudioConfig {
                save: Some(true),
                recordings_dir: None,
            }),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            data_dir: other.data_dir.or(self.data_dir),
            default_element: other.default_element.or(self.default_element),
            audio: Self::merge_audio_config(self.audio, other.audio),
        }
    }

    /// Merge audio config sections
    fn merge_audio_config(
        base: Option<AudioConfig>,
        other: Option<AudioConfig>,
    ) -> Option<AudioConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(AudioConfig {
                save: o.save.or(b.save),
                recordings_dir: o.recordings_dir.or(b.recordings_dir),
            }),
        }
    }

    /// Directory holding the entry collection, or the platform data dir
    pub fn data_dir_or_default(&self) -> PathBuf {
        self.data_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir)
    }

    /// Get default element as parsed Element, or earth if not set/invalid
    pub fn default_element_or_default(&self) -> Element {
        self.default_element
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get audio save setting, or true if not set
    pub fn save_audio_or_default(&self) -> bool {
        self.audio.as_ref().and_then(|a| a.save).unwrap_or(true)
    }

    /// Directory for archived recordings, or `<data dir>/recordings`
    pub fn recordings_dir_or_default(&self) -> PathBuf {
        self.audio
            .as_ref()
            .and_then(|a| a.recordings_dir.as_ref())
            .map(PathBuf::from)
            .unwrap_or_else(|| self.data_dir_or_default().join("recordings"))
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("elementa")
}
