//! Capture provider port

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::domain::recording::{CaptureEvent, CaptureKind};

/// Capture errors raised by a provider's own start/stop calls
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    #[error("No audio input device available")]
    NoDevice,

    #[error("Failed to start capture: {0}")]
    StartFailed(String),

    #[error("Failed to stop capture: {0}")]
    StopFailed(String),
}

/// Channel a provider delivers its events on
pub type EventSender = mpsc::UnboundedSender<CaptureEvent>;

/// Listener for transcript updates.
/// Parameters: (text, is_final)
pub type TranscriptCallback = Arc<dyn Fn(&str, bool) + Send + Sync>;

/// Port for a speech-recognition or raw-audio capture provider.
///
/// A provider only emits events between `start` and the `StreamEnded` that
/// follows `stop` (or a silence timeout). It may be started again after that.
#[async_trait]
pub trait CaptureSource: Send + Sync {
    /// Flavour of events this provider emits
    fn kind(&self) -> CaptureKind;

    /// Whether the host offers the capability at all
    fn is_supported(&self) -> bool;

    /// Whether network connectivity is currently available
    fn is_online(&self) -> bool {
        true
    }

    /// Begin capturing, delivering events on `events`.
    async fn start(&self, events: EventSender) -> Result<(), CaptureError>;

    /// Ask the provider to stop. It answers with `StreamEnded`.
    async fn stop(&self) -> Result<(), CaptureError>;

    /// Let go of the device or stream. Must be safe to call repeatedly.
    async fn release(&self);
}
