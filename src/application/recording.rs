//! Recording session use case
//!
//! Owns the capture source, the session state machine and the event channel the
//! source delivers on. Events are applied one at a time, in arrival order.

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::domain::element::Element;
use crate::domain::error::CriticalCaptureError;
use crate::domain::recording::{
    CaptureEvent, CaptureKind, RecordingOutput, RecordingSession, SessionMode, Transition,
};

use super::ports::{CaptureError, CaptureSource, TranscriptCallback};

/// Errors from starting a recording
#[derive(Debug, Clone, Error)]
pub enum RecordingError {
    #[error("{0} capture is not supported in this environment")]
    UnsupportedEnvironment(CaptureKind),

    #[error("Voice-to-text requires an internet connection")]
    Offline,

    #[error(transparent)]
    StartFailed(#[from] CaptureError),
}

/// Drives a [`RecordingSession`] from a capture source's events
pub struct RecordingUseCase<C: CaptureSource> {
    source: C,
    session: RecordingSession,
    callback: Option<TranscriptCallback>,
    events_tx: mpsc::UnboundedSender<CaptureEvent>,
    events_rx: mpsc::UnboundedReceiver<CaptureEvent>,
}

impl<C: CaptureSource> RecordingUseCase<C> {
    /// Create a new use case around a capture source
    pub fn new(source: C) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            source,
            session: RecordingSession::new(),
            callback: None,
            events_tx,
            events_rx,
        }
    }

    /// Start a session for `element`.
    ///
    /// Starting while a session is already active is ignored. Speech capture
    /// refuses to start offline.
    pub async fn start(
        &mut self,
        element: Element,
        callback: Option<TranscriptCallback>,
    ) -> Result<(), RecordingError> {
        if self.session.is_active() {
            warn!("Recording already in progress");
            return Ok(());
        }

        let kind = self.source.kind();
        if !self.source.is_supported() {
            return Err(RecordingError::UnsupportedEnvironment(kind));
        }
        if kind.requires_network() && !self.source.is_online() {
            return Err(RecordingError::Offline);
        }

        // events left over from a previous session must not leak into this one
        while self.events_rx.try_recv().is_ok() {}

        self.session.begin(kind, element);
        self.callback = callback;

        if let Err(e) = self.source.start(self.events_tx.clone()).await {
            self.session.abort();
            self.source.release().await;
            return Err(e.into());
        }

        info!(%kind, %element, "Recording started");
        Ok(())
    }

    /// Apply one provider event and carry out the resulting transition
    pub async fn handle_event(&mut self, event: CaptureEvent) -> Transition {
        let online = self.source.is_online();
        let transition = self.session.apply(event, online);

        match &transition {
            Transition::Noop => {}
            Transition::Progress(text) => {
                if let Some(callback) = &self.callback {
                    callback(text, false);
                }
            }
            Transition::Restart => {
                debug!("Stream ended after silence, restarting");
                if let Err(e) = self.source.start(self.events_tx.clone()).await {
                    error!(error = %e, "Restart failed");
                    self.session.abort();
                    self.source.release().await;
                }
            }
            Transition::Tolerated(code) => {
                warn!(%code, "Capture error ignored");
            }
            Transition::Halted(err) => {
                error!(error = %err, "Recording halted");
                self.source.release().await;
            }
            Transition::Ended => {
                debug!("Recording ended");
                self.source.release().await;
            }
        }

        transition
    }

    /// Apply every event already queued, without waiting
    pub async fn drain(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event).await;
            handled += 1;
        }
        handled
    }

    /// Wait for the next provider event and apply it
    pub async fn pump(&mut self) -> Option<Transition> {
        let event = self.events_rx.recv().await?;
        Some(self.handle_event(event).await)
    }

    /// Stop the active session and collect what it captured.
    ///
    /// Returns `None` when nothing was recording.
    pub async fn stop(&mut self) -> Option<RecordingOutput> {
        self.drain().await;

        let Some(output) = self.session.request_stop() else {
            warn!("No recording in progress");
            return None;
        };

        if let Err(e) = self.source.stop().await {
            warn!(error = %e, "Capture source did not stop cleanly");
        }
        self.drain().await;
        self.source.release().await;

        if let (Some(callback), Some(text)) = (&self.callback, output.as_text()) {
            if !text.is_empty() {
                callback(text, true);
            }
        }

        info!(mode = %self.session.mode(), "Recording stopped");
        Some(output)
    }

    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    pub fn mode(&self) -> SessionMode {
        self.session.mode()
    }

    pub fn kind(&self) -> CaptureKind {
        self.source.kind()
    }

    /// Finalized text of the current or most recent speech session
    pub fn current_transcript(&self) -> &str {
        self.session.transcript()
    }

    pub fn halted_by(&self) -> Option<&CriticalCaptureError> {
        self.session.halted_by()
    }

    pub fn session(&self) -> &RecordingSession {
        &self.session
    }

    pub fn source(&self) -> &C {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use crate::application::ports::EventSender;
    use crate::domain::recording::{CaptureErrorCode, RecognitionResult};

    #[derive(Default)]
    struct MockSource {
        unsupported: bool,
        offline: AtomicBool,
        fail_start: bool,
        starts: AtomicUsize,
        releases: AtomicUsize,
        sender: Mutex<Option<EventSender>>,
    }

    impl MockSource {
        fn emit(&self, event: CaptureEvent) {
            if let Some(tx) = self.sender.lock().unwrap().as_ref() {
                tx.send(event).unwrap();
            }
        }
    }

    #[async_trait]
    impl CaptureSource for MockSource {
        fn kind(&self) -> CaptureKind {
            CaptureKind::Speech
        }

        fn is_supported(&self) -> bool {
            !self.unsupported
        }

        fn is_online(&self) -> bool {
            !self.offline.load(Ordering::SeqCst)
        }

        async fn start(&self, events: EventSender) -> Result<(), CaptureError> {
            if self.fail_start {
                return Err(CaptureError::StartFailed("busy".into()));
            }
            self.starts.fetch_add(1, Ordering::SeqCst);
            *self.sender.lock().unwrap() = Some(events);
            Ok(())
        }

        async fn stop(&self) -> Result<(), CaptureError> {
            self.emit(CaptureEvent::StreamEnded);
            Ok(())
        }

        async fn release(&self) {
            self.releases.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn finals(texts: &[&str]) -> CaptureEvent {
        CaptureEvent::results(texts.iter().map(|t| RecognitionResult::finalized(*t)).collect())
    }

    #[tokio::test]
    async fn start_rejects_unsupported_source() {
        let mut use_case = RecordingUseCase::new(MockSource {
            unsupported: true,
            ..Default::default()
        });
        let err = use_case.start(Element::Air, None).await.unwrap_err();
        assert!(matches!(err, RecordingError::UnsupportedEnvironment(CaptureKind::Speech)));
        assert!(!use_case.is_active());
    }

    #[tokio::test]
    async fn start_rejects_offline_speech() {
        let source = MockSource::default();
        source.offline.store(true, Ordering::SeqCst);
        let mut use_case = RecordingUseCase::new(source);

        let err = use_case.start(Element::Air, None).await.unwrap_err();
        assert!(matches!(err, RecordingError::Offline));
        assert_eq!(use_case.source().starts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failed_start_returns_to_idle() {
        let mut use_case = RecordingUseCase::new(MockSource {
            fail_start: true,
            ..Default::default()
        });
        let err = use_case.start(Element::Fire, None).await.unwrap_err();
        assert!(matches!(err, RecordingError::StartFailed(_)));
        assert_eq!(use_case.mode(), SessionMode::Idle);
        assert_eq!(use_case.source().releases.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn second_start_is_ignored() {
        let mut use_case = RecordingUseCase::new(MockSource::default());
        use_case.start(Element::Air, None).await.unwrap();
        use_case.start(Element::Fire, None).await.unwrap();
        assert_eq!(use_case.source().starts.load(Ordering::SeqCst), 1);
        assert_eq!(use_case.session().element(), Some(Element::Air));
    }

    #[tokio::test]
    async fn progress_reaches_callback_and_stop_finalizes() {
        let seen: Arc<Mutex<Vec<(String, bool)>>> = Arc::default();
        let sink = Arc::clone(&seen);
        let callback: TranscriptCallback = Arc::new(move |text: &str, is_final: bool| {
            sink.lock().unwrap().push((text.to_string(), is_final))
        });

        let mut use_case = RecordingUseCase::new(MockSource::default());
        use_case.start(Element::Water, Some(callback)).await.unwrap();

        use_case.source().emit(CaptureEvent::results(vec![
            RecognitionResult::finalized("hello"),
            RecognitionResult::interim("wor"),
        ]));
        use_case.pump().await;

        let output = use_case.stop().await.unwrap();
        assert_eq!(output, RecordingOutput::Transcript("hello".into()));

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0], ("hello wor".to_string(), false));
        assert_eq!(seen.last().unwrap(), &("hello".to_string(), true));
    }

    #[tokio::test]
    async fn silence_timeout_restarts_source() {
        let mut use_case = RecordingUseCase::new(MockSource::default());
        use_case.start(Element::Air, None).await.unwrap();

        use_case.source().emit(finals(&["one"]));
        use_case.source().emit(CaptureEvent::StreamEnded);
        use_case.drain().await;

        assert!(use_case.is_active());
        assert_eq!(use_case.source().starts.load(Ordering::SeqCst), 2);

        use_case.source().emit(finals(&["two"]));
        use_case.drain().await;
        assert_eq!(use_case.current_transcript(), "one two ");
    }

    #[tokio::test]
    async fn stream_end_while_offline_ends_session() {
        let mut use_case = RecordingUseCase::new(MockSource::default());
        use_case.start(Element::Air, None).await.unwrap();

        use_case.source().offline.store(true, Ordering::SeqCst);
        use_case.source().emit(CaptureEvent::StreamEnded);
        let transition = use_case.pump().await.unwrap();

        assert_eq!(transition, Transition::Ended);
        assert_eq!(use_case.mode(), SessionMode::Idle);
        assert_eq!(use_case.source().starts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn critical_error_halts_without_restart() {
        let mut use_case = RecordingUseCase::new(MockSource::default());
        use_case.start(Element::Earth, None).await.unwrap();

        use_case.source().emit(CaptureEvent::failed(CaptureErrorCode::NotAllowed));
        use_case.source().emit(CaptureEvent::StreamEnded);
        use_case.drain().await;

        assert_eq!(use_case.mode(), SessionMode::Idle);
        assert_eq!(
            use_case.halted_by(),
            Some(&CriticalCaptureError {
                code: CaptureErrorCode::NotAllowed
            })
        );
        assert_eq!(use_case.source().starts.load(Ordering::SeqCst), 1);
        assert!(use_case.stop().await.is_none());
    }

    #[tokio::test]
    async fn stop_when_idle_returns_none() {
        let mut use_case = RecordingUseCase::new(MockSource::default());
        assert!(use_case.stop().await.is_none());
    }
}
