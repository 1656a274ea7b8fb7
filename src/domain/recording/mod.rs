//! Recording domain module

mod audio;
mod event;
mod session;

pub use audio::{AudioClip, AudioData, AudioMimeType};
pub use event::{CaptureErrorCode, CaptureEvent, CaptureKind, RecognitionResult};
pub use session::{RecordingOutput, RecordingSession, SessionMode, Transition};
