//! Microphone capture using cpal
//!
//! The cpal stream is not `Send`, so it lives on a dedicated thread that
//! forwards mono i16 chunks to the session's event channel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, StreamError};
use tokio::sync::oneshot;
use tracing::{debug, error, warn};

use crate::application::ports::{CaptureError, CaptureSource, EventSender};
use crate::domain::recording::{CaptureErrorCode, CaptureEvent, CaptureKind};

/// How often the capture thread checks for a stop request
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Raw audio capture from the default input device
pub struct CpalCapture {
    running: Arc<AtomicBool>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl CpalCapture {
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
            worker: Mutex::new(None),
        }
    }

    fn input_device() -> Result<cpal::Device, CaptureError> {
        cpal::default_host()
            .default_input_device()
            .ok_or(CaptureError::NoDevice)
    }

    /// Mix interleaved frames down to mono
    fn to_mono(samples: &[i16], channels: u16) -> Vec<i16> {
        if channels <= 1 {
            return samples.to_vec();
        }

        samples
            .chunks(channels as usize)
            .map(|frame| {
                let sum: i32 = frame.iter().map(|&s| s as i32).sum();
                (sum / frame.len() as i32) as i16
            })
            .collect()
    }

    fn error_code(err: &StreamError) -> CaptureErrorCode {
        match err {
            StreamError::DeviceNotAvailable => CaptureErrorCode::AudioCapture,
            other => CaptureErrorCode::Other(other.to_string()),
        }
    }

    /// Build and run the stream until `running` clears. Runs on its own thread.
    fn run(
        events: EventSender,
        running: Arc<AtomicBool>,
        ready: oneshot::Sender<Result<(), CaptureError>>,
    ) {
        let stream = match Self::build_stream(events.clone()) {
            Ok(stream) => stream,
            Err(e) => {
                let _ = ready.send(Err(e));
                return;
            }
        };

        if let Err(e) = stream.play() {
            let _ = ready.send(Err(CaptureError::StartFailed(e.to_string())));
            return;
        }
        let _ = ready.send(Ok(()));

        while running.load(Ordering::SeqCst) {
            std::thread::sleep(POLL_INTERVAL);
        }

        drop(stream);
        let _ = events.send(CaptureEvent::StreamEnded);
        debug!("Microphone stream closed");
    }

    fn build_stream(events: EventSender) -> Result<cpal::Stream, CaptureError> {
        let device = Self::input_device()?;
        let supported = device
            .default_input_config()
            .map_err(|e| CaptureError::StartFailed(format!("Failed to get config: {e}")))?;

        let sample_format = supported.sample_format();
        let config = supported.config();
        let channels = config.channels;
        let sample_rate = config.sample_rate.0;

        let error_events = events.clone();
        let on_error = move |err: StreamError| {
            error!(error = %err, "Audio stream error");
            let _ = error_events.send(CaptureEvent::failed(Self::error_code(&err)));
        };

        let stream = match sample_format {
            SampleFormat::I16 => device.build_input_stream(
                &config,
                move |data: &[i16], _: &cpal::InputCallbackInfo| {
                    let _ = events.send(CaptureEvent::AudioChunk {
                        samples: Self::to_mono(data, channels),
                        sample_rate,
                    });
                },
                on_error,
                None,
            ),
            SampleFormat::F32 => device.build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    let pcm: Vec<i16> = data.iter().map(|&s| (s * 32767.0) as i16).collect();
                    let _ = events.send(CaptureEvent::AudioChunk {
                        samples: Self::to_mono(&pcm, channels),
                        sample_rate,
                    });
                },
                on_error,
                None,
            ),
            other => {
                return Err(CaptureError::StartFailed(format!(
                    "Unsupported sample format: {other:?}"
                )))
            }
        };

        stream.map_err(|e| CaptureError::StartFailed(e.to_string()))
    }
}

impl Default for CpalCapture {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CaptureSource for CpalCapture {
    fn kind(&self) -> CaptureKind {
        CaptureKind::Audio
    }

    fn is_supported(&self) -> bool {
        Self::input_device().is_ok()
    }

    async fn start(&self, events: EventSender) -> Result<(), CaptureError> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(CaptureError::StartFailed(
                "Capture already in progress".to_string(),
            ));
        }

        let (ready_tx, ready_rx) = oneshot::channel();
        let running = Arc::clone(&self.running);
        let handle = std::thread::spawn(move || Self::run(events, running, ready_tx));

        let outcome = ready_rx
            .await
            .unwrap_or_else(|_| Err(CaptureError::StartFailed("Capture thread exited".into())));

        match outcome {
            Ok(()) => {
                if let Ok(mut worker) = self.worker.lock() {
                    *worker = Some(handle);
                }
                Ok(())
            }
            Err(e) => {
                self.running.store(false, Ordering::SeqCst);
                Err(e)
            }
        }
    }

    async fn stop(&self) -> Result<(), CaptureError> {
        if !self.running.swap(false, Ordering::SeqCst) {
            return Err(CaptureError::StopFailed("Not capturing".to_string()));
        }
        Ok(())
    }

    async fn release(&self) {
        self.running.store(false, Ordering::SeqCst);

        let handle = self.worker.lock().ok().and_then(|mut worker| worker.take());
        if let Some(handle) = handle {
            let joined = tokio::task::spawn_blocking(move || handle.join()).await;
            if !matches!(joined, Ok(Ok(()))) {
                warn!("Capture thread did not exit cleanly");
            }
        }
    }
}
