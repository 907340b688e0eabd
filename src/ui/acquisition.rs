// SPDX-License-Identifier: MPL-2.0
//! Image acquisition component.
//!
//! Owns the pending [`ImageSelection`], the drop target highlight and the
//! busy flags (file being read, camera capture in flight, analysis running).
//! Async work is never started here: [`State::handle_message`] returns an
//! [`Effect`] and the application turns it into a task whose completion
//! comes back as another [`Message`].

use crate::acquisition::{self, ImageOrigin, ImageSource};
use crate::error::{CameraError, Error};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::icons;
use crate::ui::styles;
use crate::ui::widgets::animated_spinner::{self, AnimatedSpinner};
use iced::widget::{
    button, image, mouse_area, Column, Container, Row, Space, Stack, Text,
};
use iced::{alignment, ContentFit, Element, Length};
use std::path::PathBuf;
use std::time::Instant;

/// Contextual data needed to render the acquisition screen.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
}

/// Highlight state of the drop target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropZone {
    #[default]
    Idle,
    DragHover,
}

/// An accepted image together with its preview.
#[derive(Debug, Clone)]
pub struct ImageSelection {
    source: ImageSource,
    preview: image::Handle,
}

impl ImageSelection {
    #[must_use]
    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    #[must_use]
    pub fn preview(&self) -> &image::Handle {
        &self.preview
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    OpenFilePicker,
    TakePhoto,
    ClearSelection,
    Submit,
    FileHovered,
    FilesHoveredLeft,
    FileDropped(PathBuf),
    /// A file chosen in the picker or named on the command line.
    FileChosen(PathBuf),
    /// A picked, dropped or command-line file finished loading.
    ImageLoaded {
        name: String,
        /// Generation handed out with the matching [`Effect::LoadFile`].
        generation: u64,
        result: Result<Option<ImageSource>, Error>,
    },
    CameraCaptured(Result<ImageSource, CameraError>),
    SpinnerTick(Instant),
}

/// Side effects the application performs after a message.
#[derive(Debug, Clone)]
pub enum Effect {
    None,
    OpenFilePicker,
    LoadFile { path: PathBuf, origin: ImageOrigin, generation: u64 },
    CaptureCamera,
    /// Hand the image to the analyzer.
    Analyze(ImageSource),
    ImageSelected { origin: ImageOrigin, width: u32, height: u32, bytes: usize },
    SelectionCleared,
    LoadFailed { name: String, error: Error },
    CameraFailed(CameraError),
}

#[derive(Debug, Default)]
pub struct State {
    selection: Option<ImageSelection>,
    drop_zone: DropZone,
    analyzing: bool,
    loading: bool,
    camera_pending: bool,
    busy_since: Option<Instant>,
    spinner_rotation: f32,
    /// Bumped whenever a pending load is abandoned; older results are stale.
    load_generation: u64,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn selection(&self) -> Option<&ImageSelection> {
        self.selection.as_ref()
    }

    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.selection.is_some()
    }

    #[must_use]
    pub fn drop_zone(&self) -> DropZone {
        self.drop_zone
    }

    #[must_use]
    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn is_camera_pending(&self) -> bool {
        self.camera_pending
    }

    /// Whether a spinner is on screen and needs ticks.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.analyzing || self.loading || self.camera_pending
    }

    /// Accepts `source` as the new selection, replacing any previous one.
    ///
    /// Returns `false` and leaves the state untouched when the declared
    /// content type is not `image/*`.
    pub fn select_image(&mut self, source: ImageSource) -> bool {
        if !acquisition::is_image_content_type(source.content_type()) {
            return false;
        }
        let preview = source.handle();
        self.selection = Some(ImageSelection { source, preview });
        true
    }

    /// Drops the pending image and returns to the empty prompt.
    ///
    /// A file still being read is abandoned: its result will be ignored.
    pub fn clear_selection(&mut self) {
        self.selection = None;
        self.drop_zone = DropZone::Idle;
        if self.loading {
            self.loading = false;
            self.load_generation = self.load_generation.wrapping_add(1);
            self.settle_busy();
        }
    }

    /// Starts an analysis of the pending image.
    ///
    /// Returns the image to analyze, or `None` when there is nothing to
    /// submit or an analysis is already running.
    pub fn submit(&mut self) -> Option<ImageSource> {
        if self.analyzing {
            return None;
        }
        let source = self.selection.as_ref()?.source.clone();
        self.analyzing = true;
        self.mark_busy();
        Some(source)
    }

    /// Clears the analyzing flag after a failed analysis. The selection is
    /// kept so the user can retry.
    pub fn finish_analysis(&mut self) {
        self.analyzing = false;
        self.settle_busy();
    }

    pub fn drag_enter(&mut self) {
        self.drop_zone = DropZone::DragHover;
    }

    pub fn drag_leave(&mut self) {
        self.drop_zone = DropZone::Idle;
    }

    /// Marks a file load as started, returning `false` if one is already
    /// running or the image cannot be replaced right now.
    pub fn begin_loading(&mut self) -> bool {
        if self.loading || self.analyzing {
            return false;
        }
        self.loading = true;
        self.mark_busy();
        true
    }

    pub fn handle_message(&mut self, message: Message) -> Effect {
        match message {
            Message::OpenFilePicker => {
                if self.analyzing || self.loading {
                    Effect::None
                } else {
                    Effect::OpenFilePicker
                }
            }
            Message::TakePhoto => {
                if self.camera_pending || self.analyzing {
                    return Effect::None;
                }
                self.camera_pending = true;
                self.mark_busy();
                Effect::CaptureCamera
            }
            Message::ClearSelection => {
                if self.analyzing || self.selection.is_none() {
                    return Effect::None;
                }
                self.clear_selection();
                Effect::SelectionCleared
            }
            Message::Submit => match self.submit() {
                Some(source) => Effect::Analyze(source),
                None => Effect::None,
            },
            Message::FileHovered => {
                self.drag_enter();
                Effect::None
            }
            Message::FilesHoveredLeft => {
                self.drag_leave();
                Effect::None
            }
            Message::FileDropped(path) => {
                self.drag_leave();
                self.request_load(path, ImageOrigin::Drop)
            }
            Message::FileChosen(path) => self.request_load(path, ImageOrigin::File),
            Message::ImageLoaded {
                name,
                generation,
                result,
            } => {
                if generation != self.load_generation {
                    return Effect::None;
                }
                self.loading = false;
                self.settle_busy();
                match result {
                    Ok(Some(source)) => self.accept(source),
                    Ok(None) => Effect::None,
                    Err(error) => Effect::LoadFailed { name, error },
                }
            }
            Message::CameraCaptured(result) => {
                self.camera_pending = false;
                self.settle_busy();
                match result {
                    Ok(source) => self.accept(source),
                    Err(err) => Effect::CameraFailed(err),
                }
            }
            Message::SpinnerTick(now) => {
                if let Some(since) = self.busy_since {
                    self.spinner_rotation =
                        animated_spinner::rotation_at(now.saturating_duration_since(since));
                }
                Effect::None
            }
        }
    }

    /// Non-image files are ignored before any I/O happens.
    fn request_load(&mut self, path: PathBuf, origin: ImageOrigin) -> Effect {
        let content_type = acquisition::content_type_for_path(&path);
        if !acquisition::is_image_content_type(content_type) || !self.begin_loading() {
            return Effect::None;
        }
        Effect::LoadFile {
            path,
            origin,
            generation: self.load_generation,
        }
    }

    fn accept(&mut self, source: ImageSource) -> Effect {
        let origin = source.origin();
        let (width, height) = source.dimensions();
        let bytes = source.len();
        if self.analyzing || !self.select_image(source) {
            return Effect::None;
        }
        Effect::ImageSelected {
            origin,
            width,
            height,
            bytes,
        }
    }

    fn mark_busy(&mut self) {
        if self.busy_since.is_none() {
            self.busy_since = Some(Instant::now());
            self.spinner_rotation = 0.0;
        }
    }

    fn settle_busy(&mut self) {
        if !self.is_busy() {
            self.busy_since = None;
        }
    }
}

// =============================================================================
// View
// =============================================================================

#[must_use]
#[allow(clippy::needless_pass_by_value)] // ViewContext is small and consumed
pub fn view<'a>(state: &'a State, ctx: ViewContext<'a>) -> Element<'a, Message> {
    let i18n = ctx.i18n;

    let title = Text::new(i18n.tr("acquisition-title")).size(typography::TITLE_MD);

    let mut content = Column::new()
        .spacing(spacing::MD)
        .width(Length::Fill)
        .push(title)
        .push(drop_zone(state, i18n))
        .push(source_buttons(state, i18n));

    if state.selection.is_some() {
        content = content.push(analyze_button(state, i18n));
    }

    Container::new(content)
        .width(Length::Fill)
        .padding(spacing::LG)
        .style(styles::container::card)
        .into()
}

fn drop_zone<'a>(state: &'a State, i18n: &'a I18n) -> Element<'a, Message> {
    let hovering = state.drop_zone == DropZone::DragHover;

    let inner: Element<'a, Message> = match &state.selection {
        Some(selection) => preview(state, selection, i18n),
        None => {
            let (icon, hint) = if hovering {
                (icons::image(), i18n.tr("acquisition-drop-release"))
            } else if state.loading {
                (icons::image(), i18n.tr("acquisition-loading"))
            } else {
                (icons::upload(), i18n.tr("acquisition-drop-hint"))
            };

            let prompt = Column::new()
                .spacing(spacing::SM)
                .align_x(alignment::Horizontal::Center)
                .push(icons::tinted(icon, sizing::ICON_XL, palette::PRIMARY_500))
                .push(
                    Text::new(hint)
                        .size(typography::BODY)
                        .align_x(alignment::Horizontal::Center),
                );

            let prompt = Container::new(prompt).center(Length::Fill);

            if state.loading || state.analyzing {
                prompt.into()
            } else {
                mouse_area(prompt).on_press(Message::OpenFilePicker).into()
            }
        }
    };

    Container::new(inner)
        .width(Length::Fill)
        .height(Length::Fixed(sizing::DROP_ZONE_HEIGHT))
        .padding(spacing::XS)
        .style(styles::container::drop_zone(hovering))
        .into()
}

fn preview<'a>(
    state: &'a State,
    selection: &'a ImageSelection,
    i18n: &'a I18n,
) -> Element<'a, Message> {
    let picture = Container::new(
        image::Image::new(selection.preview.clone())
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fill),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .style(styles::container::preview_frame);

    let (width, height) = selection.source.dimensions();
    let caption = Text::new(i18n.tr_with_args(
        "acquisition-preview-caption",
        &[
            ("name", selection.source.name()),
            ("width", &width.to_string()),
            ("height", &height.to_string()),
        ],
    ))
    .size(typography::CAPTION);

    let mut layers = Stack::new().push(picture);

    // No clearing while the image is being analyzed.
    if !state.analyzing {
        let clear = button(icons::tinted(icons::cross(), sizing::ICON_SM, palette::WHITE))
            .on_press(Message::ClearSelection)
            .padding(spacing::XS)
            .style(styles::button::overlay_round);
        layers = layers.push(
            Container::new(clear)
                .width(Length::Fill)
                .align_x(alignment::Horizontal::Right)
                .padding(spacing::XS),
        );
    }

    Column::new()
        .spacing(spacing::XS)
        .push(layers)
        .push(caption)
        .into()
}

fn source_buttons<'a>(state: &'a State, i18n: &'a I18n) -> Element<'a, Message> {
    let locked = state.analyzing || state.loading;

    let select = button(labelled(
        icons::themed(icons::upload(), sizing::ICON_SM),
        i18n.tr("acquisition-select-button"),
    ))
    .on_press_maybe((!locked).then_some(Message::OpenFilePicker))
    .padding([spacing::XS, spacing::MD])
    .height(Length::Fixed(sizing::BUTTON_HEIGHT))
    .style(styles::button::secondary);

    let camera_label: Element<'a, Message> = if state.camera_pending {
        spinner_label(state, palette::PRIMARY_500, i18n.tr("acquisition-camera-pending"))
    } else {
        labelled(
            icons::themed(icons::camera(), sizing::ICON_SM),
            i18n.tr("acquisition-camera-button"),
        )
    };

    let camera = button(camera_label)
        .on_press_maybe(
            (!state.camera_pending && !state.analyzing).then_some(Message::TakePhoto),
        )
        .padding([spacing::XS, spacing::MD])
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .style(styles::button::secondary);

    Row::new()
        .spacing(spacing::SM)
        .push(select)
        .push(camera)
        .push(Space::new().width(Length::Fill))
        .into()
}

fn analyze_button<'a>(state: &'a State, i18n: &'a I18n) -> Element<'a, Message> {
    let label: Element<'a, Message> = if state.analyzing {
        spinner_label(state, palette::WHITE, i18n.tr("acquisition-analyzing"))
    } else {
        labelled(
            icons::tinted(icons::leaf(), sizing::ICON_SM, palette::WHITE),
            i18n.tr("acquisition-analyze-button"),
        )
    };

    button(Container::new(label).center_x(Length::Fill))
        .on_press_maybe((!state.analyzing).then_some(Message::Submit))
        .width(Length::Fill)
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .padding([spacing::XS, spacing::MD])
        .style(styles::button::primary)
        .into()
}

fn labelled<'a>(icon: iced::widget::Svg<'static>, label: String) -> Element<'a, Message> {
    Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(icon)
        .push(Text::new(label).size(typography::BODY))
        .into()
}

fn spinner_label<'a>(state: &State, color: iced::Color, label: String) -> Element<'a, Message> {
    Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(AnimatedSpinner::new(color, state.spinner_rotation).into_element())
        .push(Text::new(label).size(typography::BODY))
        .into()
}
