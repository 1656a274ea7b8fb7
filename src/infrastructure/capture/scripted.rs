//! Scripted capture provider
//!
//! Replays recognizer output captured ahead of time. Each `start` emits the
//! next segment; every segment but the last closes with a stream end, the
//! way a recognizer gives up after a stretch of silence. The last segment
//! stays open until `stop`.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::application::ports::{CaptureError, CaptureSource, EventSender};
use crate::domain::recording::{CaptureEvent, CaptureKind};

/// Capture source that replays a fixed list of event segments
pub struct ScriptedCapture {
    kind: CaptureKind,
    segments: Mutex<VecDeque<Vec<CaptureEvent>>>,
    sender: Mutex<Option<EventSender>>,
    supported: bool,
    online: AtomicBool,
    starts: AtomicUsize,
    stops: AtomicUsize,
    releases: AtomicUsize,
}

impl ScriptedCapture {
    /// Create a speech provider that replays `segments` in order
    pub fn new(segments: Vec<Vec<CaptureEvent>>) -> Self {
        Self {
            kind: CaptureKind::Speech,
            segments: Mutex::new(segments.into()),
            sender: Mutex::new(None),
            supported: true,
            online: AtomicBool::new(true),
            starts: AtomicUsize::new(0),
            stops: AtomicUsize::new(0),
            releases: AtomicUsize::new(0),
        }
    }

    /// Parse a script: a JSON array of segments, each an array of events
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let segments: Vec<Vec<CaptureEvent>> = serde_json::from_str(json)?;
        Ok(Self::new(segments))
    }

    pub fn with_kind(mut self, kind: CaptureKind) -> Self {
        self.kind = kind;
        self
    }

    /// Pretend the host lacks the capability
    pub fn unsupported(mut self) -> Self {
        self.supported = false;
        self
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    /// Inject an event outside the script, as if the provider emitted it now
    pub fn emit(&self, event: CaptureEvent) {
        if let Ok(sender) = self.sender.lock() {
            if let Some(tx) = sender.as_ref() {
                let _ = tx.send(event);
            }
        }
    }

    /// Segments not yet replayed
    pub fn remaining(&self) -> usize {
        self.segments.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn start_count(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    pub fn stop_count(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }

    pub fn release_count(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CaptureSource for ScriptedCapture {
    fn kind(&self) -> CaptureKind {
        self.kind
    }

    fn is_supported(&self) -> bool {
        self.supported
    }

    fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    async fn start(&self, events: EventSender) -> Result<(), CaptureError> {
        let (segment, more) = {
            let mut segments = self
                .segments
                .lock()
                .map_err(|e| CaptureError::StartFailed(e.to_string()))?;
            let segment = segments
                .pop_front()
                .ok_or_else(|| CaptureError::StartFailed("Script exhausted".to_string()))?;
            (segment, !segments.is_empty())
        };

        self.starts.fetch_add(1, Ordering::SeqCst);
        debug!(events = segment.len(), "Replaying script segment");

        for event in segment {
            let _ = events.send(event);
        }
        if more {
            let _ = events.send(CaptureEvent::StreamEnded);
        }

        if let Ok(mut sender) = self.sender.lock() {
            *sender = Some(events);
        }
        Ok(())
    }

    async fn stop(&self) -> Result<(), CaptureError> {
        self.stops.fetch_add(1, Ordering::SeqCst);
        self.emit(CaptureEvent::StreamEnded);
        Ok(())
    }

    async fn release(&self) {
        self.releases.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut sender) = self.sender.lock() {
            sender.take();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recording::RecognitionResult;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn segments_replay_in_order() {
        let capture = ScriptedCapture::new(vec![
            vec![CaptureEvent::results(vec![RecognitionResult::finalized("a")])],
            vec![CaptureEvent::results(vec![RecognitionResult::finalized("b")])],
        ]);
        let (tx, mut rx) = mpsc::unbounded_channel();

        capture.start(tx.clone()).await.unwrap();
        assert!(matches!(rx.try_recv().unwrap(), CaptureEvent::Results { .. }));
        assert_eq!(rx.try_recv().unwrap(), CaptureEvent::StreamEnded);

        capture.start(tx).await.unwrap();
        assert!(matches!(rx.try_recv().unwrap(), CaptureEvent::Results { .. }));
        // last segment stays open until stop
        assert!(rx.try_recv().is_err());

        capture.stop().await.unwrap();
        assert_eq!(rx.try_recv().unwrap(), CaptureEvent::StreamEnded);
        assert_eq!(capture.remaining(), 0);
    }

    #[tokio::test]
    async fn exhausted_script_fails_to_start() {
        let capture = ScriptedCapture::new(Vec::new());
        let (tx, _rx) = mpsc::unbounded_channel();
        assert!(matches!(
            capture.start(tx).await,
            Err(CaptureError::StartFailed(_))
        ));
        assert_eq!(capture.start_count(), 0);
    }

    #[test]
    fn parses_json_script() {
        let capture = ScriptedCapture::from_json(
            r#"[[{"type":"results","results":[{"text":"hi","is_final":true}]}],
                [{"type":"failed","code":"no-speech"}]]"#,
        )
        .unwrap();
        assert_eq!(capture.remaining(), 2);
        assert_eq!(capture.kind(), CaptureKind::Speech);
    }

    #[tokio::test]
    async fn released_source_drops_injected_events() {
        let capture = ScriptedCapture::new(vec![Vec::new()]);
        let (tx, mut rx) = mpsc::unbounded_channel();
        capture.start(tx).await.unwrap();
        capture.release().await;

        capture.emit(CaptureEvent::StreamEnded);
        assert!(rx.try_recv().is_err());
        assert_eq!(capture.release_count(), 1);
    }
}
