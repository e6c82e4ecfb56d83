// SPDX-License-Identifier: MPL-2.0
//! Capture screen: the live alignment surface for one overlay.
//!
//! The screen owns a gesture [`Engine`] and feeds it every pointer event the
//! alignment surface publishes. One finger (or the mouse) drags the overlay,
//! two fingers pinch and rotate it, and the slider drives opacity. "Record
//! pose" snapshots the current transform together with the latest sensor
//! reading; the parent application performs the store call and reports back.

pub mod pointer;
pub mod renderer;
pub mod status_bar;

use crate::error::StoreError;
use crate::gesture::{self, AngleWrapPolicy, Engine, OverlayTransform, TransformOverrides};
use crate::i18n::fluent::I18n;
use crate::sensors::{PermissionState, SensorReading};
use crate::store::{Overlay, StoreClient};
use iced::widget::{button, canvas, container, slider, Column, Row, Text};
use iced::{Element, Length, Size, Task};
use renderer::AlignmentSurface;

/// A downloaded and decoded overlay image.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub handle: iced::widget::image::Handle,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone)]
enum ImageState {
    Loading,
    Ready(LoadedImage),
    Failed(StoreError),
}

/// Messages handled by the capture screen.
#[derive(Debug, Clone)]
pub enum Message {
    Pointer(gesture::Message),
    OpacityChanged(f32),
    ImageLoaded(Result<LoadedImage, StoreError>),
    RecordPose,
    PoseRecorded(Result<(), StoreError>),
    RequestOrientationPermission,
}

/// Effects propagated to the parent application.
#[derive(Debug, Clone)]
pub enum Effect {
    None,
    /// The user asked to record the current pose. The parent enriches the
    /// transform with sensor and viewport metadata and performs the call.
    RecordRequested(OverlayTransform),
    OrientationPermissionRequested,
}

/// Contextual data needed to render the capture screen.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub reading: &'a SensorReading,
    pub permission: PermissionState,
}

/// Capture screen state.
#[derive(Debug)]
pub struct State {
    overlay: Overlay,
    engine: Engine,
    image: ImageState,
    recording: bool,
    last_record: Option<Result<(), StoreError>>,
}

impl State {
    pub fn new(
        overlay: Overlay,
        overrides: TransformOverrides,
        wrap_policy: AngleWrapPolicy,
    ) -> Self {
        Self {
            overlay,
            engine: Engine::new(overrides, wrap_policy),
            image: ImageState::Loading,
            recording: false,
            last_record: None,
        }
    }

    #[must_use]
    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    #[must_use]
    pub fn transform(&self) -> OverlayTransform {
        self.engine.transform()
    }

    /// Task that downloads and decodes the overlay image.
    pub fn load_task(&self, client: StoreClient) -> Task<Message> {
        let url = self.overlay.overlay_url.clone();
        Task::perform(fetch_image(client, url), Message::ImageLoaded)
    }

    pub fn update(&mut self, message: Message) -> Effect {
        match message {
            Message::Pointer(pointer) => {
                if let gesture::Effect::TransformChanged(_) = self.engine.handle(pointer) {
                    // A changed pose makes the last record notice stale.
                    self.last_record = None;
                }
                Effect::None
            }
            Message::OpacityChanged(value) => {
                self.engine.handle(gesture::Message::OpacityChanged(value));
                Effect::None
            }
            Message::ImageLoaded(result) => {
                self.image = match result {
                    Ok(image) => ImageState::Ready(image),
                    Err(error) => ImageState::Failed(error),
                };
                Effect::None
            }
            Message::RecordPose => {
                if self.recording {
                    Effect::None
                } else {
                    self.recording = true;
                    Effect::RecordRequested(self.engine.transform())
                }
            }
            Message::PoseRecorded(result) => {
                self.recording = false;
                self.last_record = Some(result);
                Effect::None
            }
            Message::RequestOrientationPermission => Effect::OrientationPermissionRequested,
        }
    }

    pub fn view<'a>(&'a self, ctx: ViewContext<'a>) -> Element<'a, Message> {
        let surface: Element<'a, Message> = match &self.image {
            ImageState::Loading => centered_notice(ctx.i18n.tr("capture-loading")),
            ImageState::Failed(error) => centered_notice(format!(
                "{} ({error})",
                ctx.i18n.tr(error.i18n_key())
            )),
            ImageState::Ready(image) => canvas(AlignmentSurface {
                handle: &image.handle,
                image_size: Size::new(image.width, image.height),
                transform: self.engine.transform(),
            })
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        };

        let record_label = if self.recording {
            ctx.i18n.tr("capture-recording")
        } else {
            ctx.i18n.tr("capture-record-button")
        };
        let record_button = button(Text::new(record_label))
            .on_press_maybe((!self.recording).then_some(Message::RecordPose))
            .padding([6, 12]);

        let opacity = self.engine.transform().opacity;
        let controls = Row::new()
            .spacing(12)
            .align_y(iced::Alignment::Center)
            .push(Text::new(self.overlay.title.clone()).width(Length::Fill))
            .push(Text::new(ctx.i18n.tr("capture-opacity-label")))
            .push(
                slider(0.0..=1.0, opacity, Message::OpacityChanged)
                    .step(0.01)
                    .width(Length::Fixed(160.0)),
            )
            .push(record_button);

        let mut content = Column::new()
            .push(container(controls).width(Length::Fill).padding([8, 10]))
            .push(surface);

        if let Some(result) = &self.last_record {
            let notice = match result {
                Ok(()) => ctx.i18n.tr("capture-record-saved"),
                Err(error) => format!("{} ({error})", ctx.i18n.tr(error.i18n_key())),
            };
            content = content.push(container(Text::new(notice).size(13)).padding([4, 10]));
        }

        content = content.push(status_bar::view(status_bar::ViewContext {
            i18n: ctx.i18n,
            reading: ctx.reading,
            permission: ctx.permission,
        }));

        content.into()
    }
}

fn centered_notice<'a>(notice: String) -> Element<'a, Message> {
    container(Text::new(notice))
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

async fn fetch_image(client: StoreClient, url: String) -> Result<LoadedImage, StoreError> {
    let bytes = client.download_image(&url, |_| {}).await?;
    let decoded = image_rs::load_from_memory(&bytes)
        .map_err(|e| StoreError::Decode(e.to_string()))?;
    Ok(LoadedImage {
        width: decoded.width(),
        height: decoded.height(),
        handle: iced::widget::image::Handle::from_bytes(bytes),
    })
}
