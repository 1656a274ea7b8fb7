//! Capture provider events

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which flavour of capture a session runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureKind {
    /// Continuous speech-to-text with incremental results
    #[default]
    Speech,
    /// Raw microphone audio delivered as PCM chunks
    Audio,
}

impl CaptureKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Speech => "speech",
            Self::Audio => "audio",
        }
    }

    /// Speech recognition runs on a remote service
    pub const fn requires_network(&self) -> bool {
        matches!(self, Self::Speech)
    }
}

impl fmt::Display for CaptureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One segment of a recognizer's result list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionResult {
    pub text: String,
    pub is_final: bool,
}

impl RecognitionResult {
    /// A segment the recognizer may still revise
    pub fn interim(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: false,
        }
    }

    /// A segment the recognizer will not revise
    pub fn finalized(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: true,
        }
    }
}

/// Provider error codes, named after the recognizer's wire codes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CaptureErrorCode {
    /// Microphone permission denied
    NotAllowed,
    /// No usable input device
    AudioCapture,
    /// Recognition service refused the request
    ServiceNotAllowed,
    /// Network failure talking to the recognizer
    Network,
    NoSpeech,
    Aborted,
    LanguageNotSupported,
    Other(String),
}

impl CaptureErrorCode {
    pub fn as_str(&self) -> &str {
        match self {
            Self::NotAllowed => "not-allowed",
            Self::AudioCapture => "audio-capture",
            Self::ServiceNotAllowed => "service-not-allowed",
            Self::Network => "network",
            Self::NoSpeech => "no-speech",
            Self::Aborted => "aborted",
            Self::LanguageNotSupported => "language-not-supported",
            Self::Other(code) => code,
        }
    }

    /// Critical codes halt the session and suppress auto-restart
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            Self::NotAllowed | Self::AudioCapture | Self::ServiceNotAllowed | Self::Network
        )
    }
}

impl FromStr for CaptureErrorCode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "not-allowed" => Self::NotAllowed,
            "audio-capture" => Self::AudioCapture,
            "service-not-allowed" => Self::ServiceNotAllowed,
            "network" => Self::Network,
            "no-speech" => Self::NoSpeech,
            "aborted" => Self::Aborted,
            "language-not-supported" => Self::LanguageNotSupported,
            other => Self::Other(other.to_string()),
        })
    }
}

impl From<String> for CaptureErrorCode {
    fn from(code: String) -> Self {
        match code.parse() {
            Ok(parsed) => parsed,
            Err(never) => match never {},
        }
    }
}

impl From<CaptureErrorCode> for String {
    fn from(code: CaptureErrorCode) -> Self {
        code.as_str().to_string()
    }
}

impl fmt::Display for CaptureErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Notification delivered by a capture provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CaptureEvent {
    /// The recognizer's full current result list (it grows, it is not a delta)
    Results { results: Vec<RecognitionResult> },
    /// A block of mono PCM samples
    AudioChunk { samples: Vec<i16>, sample_rate: u32 },
    /// The provider stopped delivering, either on request or after silence
    StreamEnded,
    /// The provider reported an error
    Failed { code: CaptureErrorCode },
}

impl CaptureEvent {
    pub fn results(results: Vec<RecognitionResult>) -> Self {
        Self::Results { results }
    }

    pub fn failed(code: CaptureErrorCode) -> Self {
        Self::Failed { code }
    }
}
