//! Record command: capture a reflection and file it

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use chrono::Utc;

use crate::application::ports::TranscriptCallback;
use crate::application::{RecordingError, RecordingUseCase};
use crate::domain::config::AppConfig;
use crate::domain::element::Element;
use crate::domain::recording::{AudioClip, RecordingOutput};
use crate::infrastructure::{AudioArchive, CpalCapture, ScriptedCapture};

use super::app::{open_store, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
use super::presenter::Presenter;

/// Options for the record command
#[derive(Debug, Clone)]
pub struct RecordOptions {
    pub element: Element,
    pub save_audio: bool,
}

/// Record from the microphone until Ctrl+C
pub async fn run_record(config: &AppConfig, options: RecordOptions) -> ExitCode {
    let mut presenter = Presenter::new();
    let mut use_case = RecordingUseCase::new(CpalCapture::new());

    if let Err(e) = use_case.start(options.element, None).await {
        return start_failed(&presenter, &e);
    }

    presenter.start_spinner(&format!(
        "Recording {}... press Ctrl+C to stop",
        options.element
    ));

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        let interrupted = tokio::select! {
            _ = &mut ctrl_c => true,
            transition = use_case.pump() => transition.is_none(),
        };
        if interrupted || !use_case.is_active() {
            break;
        }
    }

    if let Some(err) = use_case.halted_by() {
        presenter.spinner_fail(&err.to_string());
        return ExitCode::from(EXIT_ERROR);
    }

    let output = use_case.stop().await;
    presenter.spinner_success("Recording stopped");

    match output {
        Some(RecordingOutput::Audio(clip)) => {
            finish_audio(config, &options, &presenter, clip).await
        }
        Some(RecordingOutput::Transcript(text)) => {
            finish_transcript(config, options.element, &presenter, &text).await
        }
        None => {
            presenter.warn("Recording ended before anything was captured");
            ExitCode::from(EXIT_SUCCESS)
        }
    }
}

/// Replay a recognizer script through the speech session and file the transcript
pub async fn run_scripted(config: &AppConfig, element: Element, script: &Path) -> ExitCode {
    let presenter = Presenter::new();

    let json = match tokio::fs::read_to_string(script).await {
        Ok(json) => json,
        Err(e) => {
            presenter.error(&format!("Failed to read script {}: {}", script.display(), e));
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };
    let source = match ScriptedCapture::from_json(&json) {
        Ok(source) => source,
        Err(e) => {
            presenter.error(&format!("Invalid script: {}", e));
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let callback: TranscriptCallback = Arc::new(|text: &str, is_final: bool| {
        if !is_final {
            tracing::debug!(text, "Transcript progress");
        }
    });

    let mut use_case = RecordingUseCase::new(source);
    if let Err(e) = use_case.start(element, Some(callback)).await {
        return start_failed(&presenter, &e);
    }

    // the whole script is queued up front; restarts queue the next segment
    use_case.drain().await;

    if let Some(err) = use_case.halted_by() {
        presenter.error(&err.to_string());
        return ExitCode::from(EXIT_ERROR);
    }

    match use_case.stop().await {
        Some(RecordingOutput::Transcript(text)) => {
            finish_transcript(config, element, &presenter, &text).await
        }
        Some(RecordingOutput::Audio(_)) | None => {
            presenter.warn("Nothing was transcribed");
            ExitCode::from(EXIT_SUCCESS)
        }
    }
}

fn start_failed(presenter: &Presenter, err: &RecordingError) -> ExitCode {
    presenter.error(&err.to_string());
    ExitCode::from(EXIT_ERROR)
}

async fn finish_transcript(
    config: &AppConfig,
    element: Element,
    presenter: &Presenter,
    text: &str,
) -> ExitCode {
    if text.is_empty() {
        presenter.warn("Nothing was transcribed");
        return ExitCode::from(EXIT_SUCCESS);
    }

    presenter.output(text);
    match open_store(config).create(element, text).await {
        Ok(entry) => {
            presenter.success(&format!(
                "Saved entry {} to {}",
                entry.id(),
                presenter.element_label(element)
            ));
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

async fn finish_audio(
    config: &AppConfig,
    options: &RecordOptions,
    presenter: &Presenter,
    clip: AudioClip,
) -> ExitCode {
    if clip.is_empty() {
        presenter.warn("No audio captured");
        return ExitCode::from(EXIT_SUCCESS);
    }
    if !options.save_audio {
        tracing::info!(duration_ms = clip.duration_ms(), "Discarding recording");
        presenter.info("Recording discarded");
        return ExitCode::from(EXIT_SUCCESS);
    }

    let archive = AudioArchive::new(config.recordings_dir_or_default());
    match archive.save(&clip, options.element, Utc::now()).await {
        Ok(path) => {
            presenter.success(&format!("Saved recording ({} s)", clip.duration_ms() / 1000));
            presenter.output(&path.to_string_lossy());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}
