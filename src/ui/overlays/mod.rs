// SPDX-License-Identifier: MPL-2.0
//! Overlay library screen: lists the published overlays and hosts the
//! creation form. An overlay can reference an external image URL or an
//! image file uploaded to the store's object bucket.

use crate::error::StoreError;
use crate::i18n::fluent::I18n;
use crate::store::{NewOverlay, Overlay, StoreClient};
use iced::widget::{button, container, scrollable, text_input, Column, Row, Text};
use iced::{Element, Length, Task};
use std::path::PathBuf;
use uuid::Uuid;

/// Messages handled by the overlays screen.
#[derive(Debug, Clone)]
pub enum Message {
    Refresh,
    Loaded(Result<Vec<Overlay>, StoreError>),
    TitleChanged(String),
    PlaceChanged(String),
    UrlChanged(String),
    PickFile,
    FilePicked(Option<PathBuf>),
    ClearFile,
    Submit,
    Submitted(Result<Overlay, StoreError>),
    Open(usize),
    OpenLibrary(usize),
}

/// Effects propagated to the parent application.
#[derive(Debug, Clone)]
pub enum Effect {
    None,
    OpenCapture(Overlay),
    OpenLibrary(Overlay),
}

/// Contextual data needed to render the screen.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
}

#[derive(Debug, Clone, Default)]
struct Form {
    title: String,
    place_name: String,
    url: String,
    file: Option<PathBuf>,
    submitting: bool,
    error: Option<String>,
}

impl Form {
    /// A submission needs a title and exactly one image source.
    fn ready(&self) -> bool {
        !self.submitting
            && !self.title.trim().is_empty()
            && (self.file.is_some() || !self.url.trim().is_empty())
    }
}

/// Overlays screen state.
#[derive(Debug)]
pub struct State {
    client: StoreClient,
    overlays: Vec<Overlay>,
    loading: bool,
    error: Option<StoreError>,
    form: Form,
}

impl State {
    pub fn new(client: StoreClient) -> Self {
        Self {
            client,
            overlays: Vec::new(),
            loading: false,
            error: None,
            form: Form::default(),
        }
    }

    /// Task that reloads the overlay list.
    pub fn refresh_task(&mut self) -> Task<Message> {
        self.loading = true;
        self.error = None;
        let client = self.client.clone();
        Task::perform(async move { client.list_overlays().await }, Message::Loaded)
    }

    pub fn update(&mut self, message: Message) -> (Effect, Task<Message>) {
        match message {
            Message::Refresh => (Effect::None, self.refresh_task()),
            Message::Loaded(result) => {
                self.loading = false;
                match result {
                    Ok(overlays) => self.overlays = overlays,
                    Err(error) => self.error = Some(error),
                }
                (Effect::None, Task::none())
            }
            Message::TitleChanged(value) => {
                self.form.title = value;
                (Effect::None, Task::none())
            }
            Message::PlaceChanged(value) => {
                self.form.place_name = value;
                (Effect::None, Task::none())
            }
            Message::UrlChanged(value) => {
                self.form.url = value;
                (Effect::None, Task::none())
            }
            Message::PickFile => (
                Effect::None,
                Task::perform(
                    async {
                        rfd::AsyncFileDialog::new()
                            .add_filter("Images", &["png", "jpg", "jpeg", "webp"])
                            .pick_file()
                            .await
                            .map(|handle| handle.path().to_path_buf())
                    },
                    Message::FilePicked,
                ),
            ),
            Message::FilePicked(path) => {
                if path.is_some() {
                    self.form.file = path;
                }
                (Effect::None, Task::none())
            }
            Message::ClearFile => {
                self.form.file = None;
                (Effect::None, Task::none())
            }
            Message::Submit => {
                if !self.form.ready() {
                    return (Effect::None, Task::none());
                }
                self.form.submitting = true;
                self.form.error = None;
                let client = self.client.clone();
                let title = self.form.title.trim().to_string();
                let place_name = match self.form.place_name.trim() {
                    "" => None,
                    trimmed => Some(trimmed.to_string()),
                };
                let source = match &self.form.file {
                    Some(path) => ImageSource::File(path.clone()),
                    None => ImageSource::Url(self.form.url.trim().to_string()),
                };
                (
                    Effect::None,
                    Task::perform(
                        submit_overlay(client, title, place_name, source),
                        Message::Submitted,
                    ),
                )
            }
            Message::Submitted(result) => {
                self.form.submitting = false;
                match result {
                    Ok(overlay) => {
                        self.form = Form::default();
                        self.overlays.insert(0, overlay);
                    }
                    Err(error) => self.form.error = Some(error.to_string()),
                }
                (Effect::None, Task::none())
            }
            Message::Open(index) => match self.overlays.get(index) {
                Some(overlay) => (Effect::OpenCapture(overlay.clone()), Task::none()),
                None => (Effect::None, Task::none()),
            },
            Message::OpenLibrary(index) => match self.overlays.get(index) {
                Some(overlay) => (Effect::OpenLibrary(overlay.clone()), Task::none()),
                None => (Effect::None, Task::none()),
            },
        }
    }

    pub fn view<'a>(&'a self, ctx: ViewContext<'a>) -> Element<'a, Message> {
        let mut content = Column::new()
            .spacing(12)
            .padding(16)
            .push(Text::new(ctx.i18n.tr("overlays-heading")).size(22))
            .push(self.form_view(&ctx));

        if let Some(error) = &self.error {
            content = content.push(Text::new(format!(
                "{} ({error})",
                ctx.i18n.tr(error.i18n_key())
            )));
        }

        if self.loading {
            content = content.push(Text::new(ctx.i18n.tr("overlays-loading")));
        } else if self.overlays.is_empty() && self.error.is_none() {
            content = content.push(Text::new(ctx.i18n.tr("overlays-empty")));
        } else {
            let mut list = Column::new().spacing(8);
            for (index, overlay) in self.overlays.iter().enumerate() {
                list = list.push(overlay_row(&ctx, index, overlay));
            }
            content = content.push(scrollable(list).height(Length::Fill));
        }

        content.into()
    }

    fn form_view<'a>(&'a self, ctx: &ViewContext<'a>) -> Element<'a, Message> {
        let file_picker: Element<'a, Message> = match &self.form.file {
            Some(path) => Row::new()
                .spacing(8)
                .align_y(iced::Alignment::Center)
                .push(Text::new(
                    path.file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                ))
                .push(
                    button(Text::new(ctx.i18n.tr("overlays-form-clear-file")).size(13))
                        .on_press(Message::ClearFile)
                        .padding(4),
                )
                .into(),
            None => button(Text::new(ctx.i18n.tr("overlays-form-pick-file")))
                .on_press(Message::PickFile)
                .padding([4, 8])
                .into(),
        };

        let submit_label = if self.form.submitting {
            ctx.i18n.tr("overlays-form-submitting")
        } else {
            ctx.i18n.tr("overlays-form-submit")
        };

        let mut form = Column::new()
            .spacing(8)
            .push(
                text_input(&ctx.i18n.tr("overlays-form-title"), &self.form.title)
                    .on_input(Message::TitleChanged),
            )
            .push(
                text_input(&ctx.i18n.tr("overlays-form-place"), &self.form.place_name)
                    .on_input(Message::PlaceChanged),
            )
            .push(
                Row::new()
                    .spacing(8)
                    .align_y(iced::Alignment::Center)
                    .push(
                        text_input(&ctx.i18n.tr("overlays-form-url"), &self.form.url)
                            .on_input(Message::UrlChanged)
                            .width(Length::Fill),
                    )
                    .push(Text::new(ctx.i18n.tr("overlays-form-or")))
                    .push(file_picker),
            )
            .push(
                button(Text::new(submit_label))
                    .on_press_maybe(self.form.ready().then_some(Message::Submit))
                    .padding([6, 12]),
            );

        if let Some(error) = &self.form.error {
            form = form.push(Text::new(error.clone()).size(13));
        }

        container(form).width(Length::Fill).into()
    }
}

fn overlay_row<'a>(
    ctx: &ViewContext<'a>,
    index: usize,
    overlay: &'a Overlay,
) -> Element<'a, Message> {
    let mut details = Column::new().spacing(2).width(Length::Fill).push(
        Text::new(overlay.title.clone()).size(16),
    );
    if let Some(place) = &overlay.place_name {
        details = details.push(Text::new(place.clone()).size(13));
    }
    if let Some(created_at) = overlay.created_at {
        details = details.push(
            Text::new(created_at.format("%Y-%m-%d %H:%M").to_string()).size(12),
        );
    }

    container(
        Row::new()
            .spacing(8)
            .align_y(iced::Alignment::Center)
            .push(details)
            .push(
                button(Text::new(ctx.i18n.tr("overlays-align-button")))
                    .on_press(Message::Open(index))
                    .padding([4, 8]),
            )
            .push(
                button(Text::new(ctx.i18n.tr("overlays-poses-button")))
                    .on_press(Message::OpenLibrary(index))
                    .padding([4, 8]),
            ),
    )
    .width(Length::Fill)
    .padding(8)
    .into()
}

#[derive(Debug, Clone)]
enum ImageSource {
    Url(String),
    File(PathBuf),
}

async fn submit_overlay(
    client: StoreClient,
    title: String,
    place_name: Option<String>,
    source: ImageSource,
) -> Result<Overlay, StoreError> {
    let overlay_url = match source {
        ImageSource::Url(url) => url,
        ImageSource::File(path) => {
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|e| StoreError::Upload(e.to_string()))?;
            let format = image_rs::guess_format(&bytes)
                .map_err(|e| StoreError::Upload(e.to_string()))?;
            let extension = format
                .extensions_str()
                .first()
                .copied()
                .unwrap_or("bin");
            let file_name = format!("{}.{}", Uuid::new_v4(), extension);
            client
                .upload_overlay_image(&file_name, format.to_mime_type(), bytes)
                .await?
        }
    };

    client
        .create_overlay(&NewOverlay {
            title,
            overlay_url,
            place_name,
            lat: None,
            lon: None,
        })
        .await
}
