// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between acquisition and results.
//!
//! The `App` struct owns the current [`Stage`], localization, preferences,
//! the notification overlay and the diagnostics log. Component effects are
//! translated into tasks in [`update`]; this file keeps startup policy
//! (window size, config and state loading, CLI preselection) in one place.

pub mod config;
mod message;
pub mod paths;
pub mod persisted_state;
mod screen;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};
pub use screen::Screen;

use crate::diagnosis::analyzer::{Analyzer, MockAnalyzer};
use crate::diagnosis::DiagnosisResult;
use crate::diagnostics::{DiagnosticsCollector, WarningType};
use crate::i18n::fluent::I18n;
use crate::ui::acquisition;
use crate::ui::notifications::{self, Notification};
use crate::ui::theming::ThemeMode;
use config::Config;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Where the user is in the flow. Holding either a pending image or a
/// displayed result, never both.
#[derive(Debug)]
pub enum Stage {
    Acquisition(acquisition::State),
    Results(DiagnosisResult),
}

impl Stage {
    #[must_use]
    pub fn screen(&self) -> Screen {
        match self {
            Stage::Acquisition(_) => Screen::Acquisition,
            Stage::Results(_) => Screen::Results,
        }
    }
}

impl Default for Stage {
    fn default() -> Self {
        Stage::Acquisition(acquisition::State::new())
    }
}

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    stage: Stage,
    theme_mode: ThemeMode,
    config: Config,
    analyzer: Arc<dyn Analyzer>,
    /// Persisted application state (last open directory).
    app_state: persisted_state::AppState,
    /// Toast notification manager for user feedback.
    notifications: notifications::Manager,
    diagnostics: DiagnosticsCollector,
    diagnostics_out: Option<PathBuf>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.stage.screen())
            .field("theme_mode", &self.theme_mode)
            .finish_non_exhaustive()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 760;
pub const WINDOW_DEFAULT_WIDTH: u32 = 720;
pub const MIN_WINDOW_HEIGHT: u32 = 560;
pub const MIN_WINDOW_WIDTH: u32 = 480;

/// Builds the window settings. Close requests are handled by the app so the
/// diagnostics report can be written first.
#[allow(clippy::cast_precision_loss)] // window sizes are small
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        icon: crate::icon::load_window_icon(),
        exit_on_close_request: false,
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    paths::init_cli_overrides(flags.data_dir.clone(), flags.config_dir.clone());

    // iced 0.14 requires an `Fn` boot closure; flags are consumed once and
    // later calls fall back to defaults.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl Default for App {
    fn default() -> Self {
        let config = Config::default();
        let diagnostics = DiagnosticsCollector::default();
        let mut notifications = notifications::Manager::new();
        notifications.set_diagnostics(diagnostics.handle());

        Self {
            i18n: I18n::default(),
            stage: Stage::default(),
            theme_mode: config.general.theme_mode,
            analyzer: Arc::new(MockAnalyzer::new(&config.analysis)),
            config,
            app_state: persisted_state::AppState::default(),
            notifications,
            diagnostics,
            diagnostics_out: None,
        }
    }
}

impl App {
    /// Initializes application state and optionally starts loading the image
    /// named on the command line.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let i18n = I18n::new(flags.lang.clone(), flags.i18n_dir.clone(), &config);
        let (app_state, state_warning) = persisted_state::AppState::load();

        let mut app = Self::with_config(i18n, config);
        app.app_state = app_state;
        app.diagnostics_out = flags.diagnostics_out;

        if let Some(key) = config_warning {
            app.notifications
                .push(Notification::warning(key).with_warning_type(WarningType::ConfigurationIssue));
        }
        if let Some(key) = state_warning {
            app.notifications
                .push(Notification::warning(key).with_warning_type(WarningType::StateIssue));
        }

        let task = match flags.file_path {
            Some(path) => app.update(Message::Acquisition(acquisition::Message::FileChosen(
                PathBuf::from(path),
            ))),
            None => Task::none(),
        };

        (app, task)
    }

    /// App with the given localization and preferences and a fresh stage.
    #[must_use]
    pub fn with_config(i18n: I18n, config: Config) -> Self {
        Self {
            i18n,
            theme_mode: config.general.theme_mode,
            analyzer: Arc::new(MockAnalyzer::new(&config.analysis)),
            config,
            ..Self::default()
        }
    }

    /// Replaces the analyzer used for new submissions.
    #[must_use]
    pub fn with_analyzer(mut self, analyzer: Arc<dyn Analyzer>) -> Self {
        self.analyzer = analyzer;
        self
    }

    #[must_use]
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    #[must_use]
    pub fn notifications(&self) -> &notifications::Manager {
        &self.notifications
    }

    #[must_use]
    pub fn diagnostics(&self) -> &DiagnosticsCollector {
        &self.diagnostics
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");

        match &self.stage {
            Stage::Acquisition(state) => match state.selection() {
                Some(selection) => format!("{} - {app_name}", selection.source().name()),
                None => app_name,
            },
            Stage::Results(result) => format!("{} - {app_name}", result.name()),
        }
    }

    fn theme(&self) -> Theme {
        self.theme_mode.iced_theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        let screen = self.stage.screen();
        let is_busy = matches!(&self.stage, Stage::Acquisition(state) if state.is_busy());

        Subscription::batch([
            subscription::create_event_subscription(screen),
            subscription::create_tick_subscription(self.notifications.has_notifications()),
            subscription::create_spinner_subscription(is_busy),
        ])
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let handle = self.diagnostics.handle();
        let mut ctx = update::UpdateContext {
            i18n: &self.i18n,
            stage: &mut self.stage,
            config: &self.config,
            analyzer: &self.analyzer,
            app_state: &mut self.app_state,
            notifications: &mut self.notifications,
            diagnostics: &handle,
        };

        let task = match message {
            Message::Acquisition(acquisition_message) => {
                update::handle_acquisition_message(&mut ctx, acquisition_message)
            }
            Message::Results(results_message) => {
                update::handle_results_message(&mut ctx, &results_message)
            }
            Message::Notification(notification_message) => {
                self.notifications.handle_message(&notification_message);
                Task::none()
            }
            Message::FilePicked(path) => update::handle_file_picked(&mut ctx, path),
            Message::AnalysisCompleted {
                result,
                duration_ms,
            } => update::handle_analysis_completed(&mut ctx, result, duration_ms),
            Message::Tick(_instant) => {
                self.notifications.tick();
                Task::none()
            }
            Message::WindowCloseRequested(_id) => {
                self.diagnostics.process_pending();
                self.export_diagnostics();
                return iced::exit();
            }
        };

        self.diagnostics.process_pending();
        task
    }

    fn export_diagnostics(&self) {
        let Some(path) = &self.diagnostics_out else {
            return;
        };
        if let Err(err) = self.diagnostics.export_to_file(path) {
            eprintln!("Failed to write diagnostics to {}: {err}", path.display());
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            stage: &self.stage,
            notifications: &self.notifications,
        })
    }
}
