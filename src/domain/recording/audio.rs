//! Captured audio value objects

use std::fmt;

/// Raw mono PCM captured during an audio-mode session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioClip {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl AudioClip {
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Append a chunk. The first chunk fixes the sample rate.
    pub fn extend(&mut self, samples: &[i16], sample_rate: u32) {
        if self.sample_rate == 0 {
            self.sample_rate = sample_rate;
        }
        self.samples.extend_from_slice(samples);
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Length of the clip in milliseconds
    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        self.samples.len() as u64 * 1000 / self.sample_rate as u64
    }
}

/// Supported encoded audio types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AudioMimeType {
    #[default]
    Flac,
}

impl AudioMimeType {
    /// Get the MIME type string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Flac => "audio/flac",
        }
    }

    /// Get the file extension
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Flac => "flac",
        }
    }
}

impl fmt::Display for AudioMimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Encoded audio bytes ready to be written out
#[derive(Debug, Clone)]
pub struct AudioData {
    data: Vec<u8>,
    mime_type: AudioMimeType,
}

impl AudioData {
    pub fn new(data: Vec<u8>, mime_type: AudioMimeType) -> Self {
        Self { data, mime_type }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn mime_type(&self) -> AudioMimeType {
        self.mime_type
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        let bytes = self.size_bytes();
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }
}
