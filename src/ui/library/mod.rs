// SPDX-License-Identifier: MPL-2.0
//! Pose library screen: the recorded poses of one overlay, newest first.
//! Opening a pose enters the capture screen with that pose's transform
//! restored; "start blank" enters it with the defaults.

use crate::error::StoreError;
use crate::gesture::TransformOverrides;
use crate::i18n::fluent::I18n;
use crate::store::{Overlay, PoseRecord, StoreClient};
use iced::widget::{button, container, scrollable, Column, Row, Text};
use iced::{Element, Length, Task};

/// Messages handled by the library screen.
#[derive(Debug, Clone)]
pub enum Message {
    Loaded(Result<Vec<PoseRecord>, StoreError>),
    OpenBlank,
    OpenPose(usize),
}

/// Effects propagated to the parent application.
#[derive(Debug, Clone)]
pub enum Effect {
    None,
    OpenCapture {
        overlay: Overlay,
        overrides: TransformOverrides,
    },
}

/// Contextual data needed to render the screen.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
}

/// Library screen state.
#[derive(Debug)]
pub struct State {
    overlay: Overlay,
    poses: Vec<PoseRecord>,
    loading: bool,
    error: Option<StoreError>,
}

impl State {
    pub fn new(overlay: Overlay) -> Self {
        Self {
            overlay,
            poses: Vec::new(),
            loading: true,
            error: None,
        }
    }

    #[must_use]
    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// Task that loads the overlay's poses.
    pub fn load_task(&self, client: StoreClient) -> Task<Message> {
        let overlay_id = self.overlay.id.clone();
        Task::perform(
            async move { client.list_poses(&overlay_id).await },
            Message::Loaded,
        )
    }

    pub fn update(&mut self, message: Message) -> Effect {
        match message {
            Message::Loaded(result) => {
                self.loading = false;
                match result {
                    Ok(poses) => self.poses = poses,
                    Err(error) => self.error = Some(error),
                }
                Effect::None
            }
            Message::OpenBlank => Effect::OpenCapture {
                overlay: self.overlay.clone(),
                overrides: TransformOverrides::default(),
            },
            Message::OpenPose(index) => match self.poses.get(index) {
                Some(pose) => Effect::OpenCapture {
                    overlay: self.overlay.clone(),
                    overrides: pose.transform_overrides(),
                },
                None => Effect::None,
            },
        }
    }

    pub fn view<'a>(&'a self, ctx: ViewContext<'a>) -> Element<'a, Message> {
        let mut content = Column::new()
            .spacing(12)
            .padding(16)
            .push(
                Row::new()
                    .spacing(8)
                    .align_y(iced::Alignment::Center)
                    .push(Text::new(self.overlay.title.clone()).size(22).width(Length::Fill))
                    .push(
                        button(Text::new(ctx.i18n.tr("library-start-blank")))
                            .on_press(Message::OpenBlank)
                            .padding([6, 12]),
                    ),
            );

        if let Some(error) = &self.error {
            content = content.push(Text::new(format!(
                "{} ({error})",
                ctx.i18n.tr(error.i18n_key())
            )));
        } else if self.loading {
            content = content.push(Text::new(ctx.i18n.tr("library-loading")));
        } else if self.poses.is_empty() {
            content = content.push(Text::new(ctx.i18n.tr("library-empty")));
        } else {
            let mut list = Column::new().spacing(8);
            for (index, pose) in self.poses.iter().enumerate() {
                list = list.push(pose_row(&ctx, index, pose));
            }
            content = content.push(scrollable(list).height(Length::Fill));
        }

        content.into()
    }
}

fn pose_row<'a>(ctx: &ViewContext<'a>, index: usize, pose: &'a PoseRecord) -> Element<'a, Message> {
    let recorded = pose
        .recorded_at
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "–".to_string());

    let mut summary = Vec::new();
    if let Some(scale) = pose.overlay_scale {
        summary.push(format!("×{scale:.2}"));
    }
    if let Some(rotation) = pose.overlay_rotation_deg {
        summary.push(format!("{rotation:.0}°"));
    }
    if let (Some(lat), Some(lon)) = (pose.lat, pose.lon) {
        summary.push(format!("{lat:.4}, {lon:.4}"));
    }

    let mut details = Column::new()
        .spacing(2)
        .width(Length::Fill)
        .push(Text::new(recorded).size(15));
    if !summary.is_empty() {
        details = details.push(Text::new(summary.join("  ·  ")).size(13));
    }
    if let Some(notes) = &pose.notes {
        details = details.push(Text::new(notes.clone()).size(13));
    }

    container(
        Row::new()
            .spacing(8)
            .align_y(iced::Alignment::Center)
            .push(details)
            .push(
                button(Text::new(ctx.i18n.tr("library-open-pose")))
                    .on_press(Message::OpenPose(index))
                    .padding([4, 8]),
            ),
    )
    .width(Length::Fill)
    .padding(8)
    .into()
}
