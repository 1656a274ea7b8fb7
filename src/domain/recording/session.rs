//! Recording session state machine

use std::fmt;

use crate::domain::element::Element;
use crate::domain::error::CriticalCaptureError;

use super::audio::AudioClip;
use super::event::{CaptureErrorCode, CaptureEvent, CaptureKind};

/// Session modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionMode {
    #[default]
    Idle,
    Active,
    /// Stopped by a critical provider error. Treated as idle for restarts.
    Halted,
}

impl SessionMode {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Active => "active",
            Self::Halted => "halted",
        }
    }
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a finished session produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordingOutput {
    /// Trimmed finalized transcript (speech mode)
    Transcript(String),
    /// Everything captured (audio mode)
    Audio(AudioClip),
}

impl RecordingOutput {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Transcript(text) => Some(text),
            Self::Audio(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Transcript(text) => text.is_empty(),
            Self::Audio(clip) => clip.is_empty(),
        }
    }
}

/// Directive for whoever owns the capture source, produced by [`RecordingSession::apply`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Nothing to do
    Noop,
    /// Notify the listener with finalized text plus the current interim text
    Progress(String),
    /// Restart the source in place; the session stays active
    Restart,
    /// A non-critical provider error; log it and carry on
    Tolerated(CaptureErrorCode),
    /// A critical provider error halted the session; release the source
    Halted(CriticalCaptureError),
    /// The session is over; release the source
    Ended,
}

#[derive(Debug, Clone)]
enum CaptureBuffer {
    Text(String),
    Audio(AudioClip),
}

impl CaptureBuffer {
    fn for_kind(kind: CaptureKind) -> Self {
        match kind {
            CaptureKind::Speech => Self::Text(String::new()),
            CaptureKind::Audio => Self::Audio(AudioClip::default()),
        }
    }
}

/// Recording session entity.
///
/// State machine:
///   IDLE -> ACTIVE (begin)
///   ACTIVE -> ACTIVE (stream ended after silence, restart)
///   ACTIVE -> HALTED (critical provider error)
///   ACTIVE -> IDLE (request_stop, stream ended without restart, abort)
///   HALTED -> IDLE (stream ended)
#[derive(Debug)]
pub struct RecordingSession {
    mode: SessionMode,
    kind: CaptureKind,
    element: Option<Element>,
    buffer: CaptureBuffer,
    /// Index into the provider's result list; everything before it is in `buffer`
    cursor: usize,
    stop_requested: bool,
    halted_by: Option<CriticalCaptureError>,
}

impl Default for RecordingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSession {
    /// Create a new session in idle state
    pub fn new() -> Self {
        Self {
            mode: SessionMode::Idle,
            kind: CaptureKind::default(),
            element: None,
            buffer: CaptureBuffer::for_kind(CaptureKind::default()),
            cursor: 0,
            stop_requested: false,
            halted_by: None,
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn kind(&self) -> CaptureKind {
        self.kind
    }

    /// Element of the current or most recent session
    pub fn element(&self) -> Option<Element> {
        self.element
    }

    pub fn is_active(&self) -> bool {
        self.mode == SessionMode::Active
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn stop_requested(&self) -> bool {
        self.stop_requested
    }

    /// Critical error that halted the current or most recent session
    pub fn halted_by(&self) -> Option<&CriticalCaptureError> {
        self.halted_by.as_ref()
    }

    /// Finalized text accumulated so far. Empty in audio mode.
    pub fn transcript(&self) -> &str {
        match &self.buffer {
            CaptureBuffer::Text(text) => text,
            CaptureBuffer::Audio(_) => "",
        }
    }

    /// Number of PCM samples buffered. Zero in speech mode.
    pub fn buffered_samples(&self) -> usize {
        match &self.buffer {
            CaptureBuffer::Text(_) => 0,
            CaptureBuffer::Audio(clip) => clip.samples().len(),
        }
    }

    /// Reset every field and go active. Returns false, changing nothing,
    /// when a session is already active.
    pub fn begin(&mut self, kind: CaptureKind, element: Element) -> bool {
        if self.is_active() {
            return false;
        }
        self.mode = SessionMode::Active;
        self.kind = kind;
        self.element = Some(element);
        self.buffer = CaptureBuffer::for_kind(kind);
        self.cursor = 0;
        self.stop_requested = false;
        self.halted_by = None;
        true
    }

    /// Apply one provider event. `online` is the connectivity at the time the
    /// event is handled; it only matters for the restart decision.
    pub fn apply(&mut self, event: CaptureEvent, online: bool) -> Transition {
        match event {
            CaptureEvent::Results { results } => {
                if !self.is_active() {
                    return Transition::Noop;
                }
                let CaptureBuffer::Text(finalized) = &mut self.buffer else {
                    return Transition::Noop;
                };

                let mut interim = String::new();
                for (index, result) in results.iter().enumerate().skip(self.cursor) {
                    if result.is_final {
                        finalized.push_str(&result.text);
                        finalized.push(' ');
                        self.cursor = index + 1;
                    } else {
                        interim.push_str(&result.text);
                    }
                }

                Transition::Progress(format!("{finalized}{interim}"))
            }

            CaptureEvent::AudioChunk {
                samples,
                sample_rate,
            } => {
                if self.is_active() {
                    if let CaptureBuffer::Audio(clip) = &mut self.buffer {
                        clip.extend(&samples, sample_rate);
                    }
                }
                Transition::Noop
            }

            CaptureEvent::StreamEnded => match self.mode {
                SessionMode::Idle => Transition::Noop,
                SessionMode::Halted => {
                    self.mode = SessionMode::Idle;
                    Transition::Ended
                }
                SessionMode::Active => {
                    let keep_alive = self.kind == CaptureKind::Speech
                        && !self.stop_requested
                        && self.halted_by.is_none()
                        && online;
                    if keep_alive {
                        // a restarted recognizer starts a fresh result list
                        self.cursor = 0;
                        Transition::Restart
                    } else {
                        self.mode = SessionMode::Idle;
                        Transition::Ended
                    }
                }
            },

            CaptureEvent::Failed { code } => {
                if !code.is_critical() {
                    return Transition::Tolerated(code);
                }
                if !self.is_active() {
                    return Transition::Noop;
                }
                let error = CriticalCaptureError { code };
                self.halted_by = Some(error.clone());
                self.mode = SessionMode::Halted;
                Transition::Halted(error)
            }
        }
    }

    /// Mark the stop as user-requested and collect the result.
    ///
    /// Must run before the provider is told to stop, so the stream end that
    /// follows is not mistaken for a silence timeout. Returns `None` when no
    /// session is active.
    pub fn request_stop(&mut self) -> Option<RecordingOutput> {
        if !self.is_active() {
            return None;
        }
        self.stop_requested = true;
        self.mode = SessionMode::Idle;

        Some(match &mut self.buffer {
            CaptureBuffer::Text(text) => RecordingOutput::Transcript(text.trim().to_string()),
            CaptureBuffer::Audio(clip) => RecordingOutput::Audio(std::mem::take(clip)),
        })
    }

    /// Drop back to idle after the source failed to (re)start
    pub fn abort(&mut self) {
        self.mode = SessionMode::Idle;
    }
}
