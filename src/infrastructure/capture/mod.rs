//! Capture provider adapters
//!
//! `CpalCapture` streams raw microphone audio. `ScriptedCapture` replays
//! recorded recognizer output, standing in for a speech service.

mod cpal_capture;
mod scripted;

pub use cpal_capture::CpalCapture;
pub use scripted::ScriptedCapture;
