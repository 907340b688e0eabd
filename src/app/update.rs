// SPDX-License-Identifier: MPL-2.0
//! Update logic for the application.
//!
//! Component messages come back with an effect; this module turns effects
//! into tasks (file dialog, file loading, camera capture, analysis) and
//! into toasts and diagnostics entries.

use super::persisted_state::AppState;
use super::{Message, Stage};
use crate::acquisition::{self, camera, extensions, ImageOrigin, ImageSource};
use crate::app::config::Config;
use crate::diagnosis::analyzer::{AnalysisError, Analyzer};
use crate::diagnosis::DiagnosisResult;
use crate::diagnostics::{AppStateEvent, DiagnosticsHandle, ErrorType, UserAction, WarningType};
use crate::i18n::fluent::I18n;
use crate::ui::acquisition::{self as acquisition_ui, Effect};
use crate::ui::notifications::{self, Notification};
use crate::ui::results;
use iced::Task;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Mutable view of the application state handed to the handlers.
pub struct UpdateContext<'a> {
    pub i18n: &'a I18n,
    pub stage: &'a mut Stage,
    pub config: &'a Config,
    pub analyzer: &'a Arc<dyn Analyzer>,
    pub app_state: &'a mut AppState,
    pub notifications: &'a mut notifications::Manager,
    pub diagnostics: &'a DiagnosticsHandle,
}

pub fn handle_acquisition_message(
    ctx: &mut UpdateContext<'_>,
    message: acquisition_ui::Message,
) -> Task<Message> {
    let Stage::Acquisition(state) = ctx.stage else {
        return Task::none();
    };

    let effect = state.handle_message(message);
    apply_effect(ctx, effect)
}

fn apply_effect(ctx: &mut UpdateContext<'_>, effect: Effect) -> Task<Message> {
    match effect {
        Effect::None => Task::none(),
        Effect::OpenFilePicker => {
            ctx.diagnostics.log_action(UserAction::OpenFilePicker);
            open_file_dialog(ctx)
        }
        Effect::LoadFile {
            path,
            origin,
            generation,
        } => load_file(path, origin, generation),
        Effect::CaptureCamera => {
            ctx.diagnostics.log_action(UserAction::TakePhoto);
            let index = ctx.config.capture.camera_index;
            Task::perform(camera::capture_still_async(index), |result| {
                Message::Acquisition(acquisition_ui::Message::CameraCaptured(result))
            })
        }
        Effect::Analyze(source) => {
            ctx.diagnostics.log_action(UserAction::SubmitAnalysis);
            analyze(
                Arc::clone(ctx.analyzer),
                source,
                Duration::from_millis(ctx.config.analysis.simulated_delay_ms),
            )
        }
        Effect::ImageSelected {
            origin,
            width,
            height,
            bytes,
        } => {
            ctx.notifications.clear_image_load_warnings();
            ctx.diagnostics.log_action(UserAction::SelectImage {
                source: origin.as_str().to_string(),
            });
            ctx.diagnostics.log_state(AppStateEvent::ImageSelected {
                width,
                height,
                bytes,
            });
            Task::none()
        }
        Effect::SelectionCleared => {
            ctx.diagnostics.log_action(UserAction::ClearSelection);
            Task::none()
        }
        Effect::LoadFailed { name, error } => {
            eprintln!("Failed to load {name}: {error}");
            ctx.notifications.push(
                Notification::warning("notification-image-load-error")
                    .with_arg("name", name)
                    .with_warning_type(WarningType::ImageLoad),
            );
            Task::none()
        }
        Effect::CameraFailed(err) => {
            ctx.notifications.push(Notification::camera_failure(&err));
            Task::none()
        }
    }
}

/// Opens the native file dialog in the last used directory.
fn open_file_dialog(ctx: &UpdateContext<'_>) -> Task<Message> {
    let filter_name = ctx.i18n.tr("acquisition-file-filter");
    let directory = ctx.app_state.existing_open_directory().map(PathBuf::from);

    Task::perform(
        async move {
            let mut dialog =
                rfd::AsyncFileDialog::new().add_filter(filter_name, extensions::IMAGE_EXTENSIONS);

            if let Some(dir) = directory {
                dialog = dialog.set_directory(&dir);
            }

            dialog.pick_file().await.map(|h| h.path().to_path_buf())
        },
        Message::FilePicked,
    )
}

/// Handles the file dialog result.
pub fn handle_file_picked(ctx: &mut UpdateContext<'_>, path: Option<PathBuf>) -> Task<Message> {
    // Cancelled
    let Some(path) = path else {
        return Task::none();
    };

    ctx.app_state.set_last_open_directory_from_file(&path);
    if let Some(key) = ctx.app_state.save() {
        ctx.notifications
            .push(Notification::warning(key).with_warning_type(WarningType::StateIssue));
    }

    handle_acquisition_message(ctx, acquisition_ui::Message::FileChosen(path))
}

/// Reads a file off the UI thread.
pub fn load_file(path: PathBuf, origin: ImageOrigin, generation: u64) -> Task<Message> {
    let name = acquisition::display_name(&path);
    Task::perform(acquisition::load_path_async(path, origin), move |result| {
        Message::Acquisition(acquisition_ui::Message::ImageLoaded {
            name,
            generation,
            result,
        })
    })
}

fn analyze(analyzer: Arc<dyn Analyzer>, source: ImageSource, delay: Duration) -> Task<Message> {
    Task::future(run_analysis(analyzer, source, delay))
}

/// Waits out the simulated latency, then runs the analyzer. The reported
/// duration includes the wait.
pub async fn run_analysis(
    analyzer: Arc<dyn Analyzer>,
    source: ImageSource,
    delay: Duration,
) -> Message {
    let started = Instant::now();
    tokio::time::sleep(delay).await;
    let result = analyzer.analyze(&source);

    Message::AnalysisCompleted {
        result,
        duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
    }
}

/// Moves to the result screen, or reports the failure and keeps the image.
pub fn handle_analysis_completed(
    ctx: &mut UpdateContext<'_>,
    result: Result<DiagnosisResult, AnalysisError>,
    duration_ms: u64,
) -> Task<Message> {
    // Only an analysis started from the acquisition screen can complete.
    let Stage::Acquisition(state) = ctx.stage else {
        return Task::none();
    };
    if !state.is_analyzing() {
        return Task::none();
    }

    match result {
        Ok(diagnosis) => {
            ctx.diagnostics.log_state(AppStateEvent::AnalysisCompleted {
                confidence: diagnosis.confidence().value(),
                tier: diagnosis.tier().as_str().to_string(),
                duration_ms,
            });
            *ctx.stage = Stage::Results(diagnosis);
        }
        Err(err) => {
            eprintln!("Analysis failed: {err}");
            state.finish_analysis();
            ctx.notifications.push(
                Notification::error("notification-analysis-error")
                    .with_error_type(ErrorType::AnalysisError),
            );
        }
    }

    Task::none()
}

pub fn handle_results_message(
    ctx: &mut UpdateContext<'_>,
    message: &results::Message,
) -> Task<Message> {
    match results::update(message) {
        results::Event::None => {}
        results::Event::Reset => {
            ctx.diagnostics.log_action(UserAction::ResetResults);
            ctx.diagnostics.log_state(AppStateEvent::AcquisitionReset);
            *ctx.stage = Stage::Acquisition(acquisition_ui::State::new());
        }
    }
    Task::none()
}
