// SPDX-License-Identifier: MPL-2.0
//! Top navigation bar shared by every screen: application title plus
//! navigation back to the overlay list and, when an overlay is open,
//! into its pose library.

use crate::i18n::fluent::I18n;
use iced::widget::{button, container, Row, Text};
use iced::{Element, Length};

/// Contextual data needed to render the navbar.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    /// Title of the open overlay, when a capture or library screen is shown.
    pub overlay_title: Option<&'a str>,
    pub can_go_overlays: bool,
    pub can_open_library: bool,
}

/// Messages emitted by the navbar.
#[derive(Debug, Clone)]
pub enum Message {
    OpenOverlays,
    OpenLibrary,
}

/// Render the navigation bar.
pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let mut row = Row::new()
        .spacing(12)
        .align_y(iced::Alignment::Center)
        .push(Text::new(ctx.i18n.tr("app-title")).size(18));

    if let Some(title) = ctx.overlay_title {
        row = row.push(Text::new(format!("· {title}")).size(14));
    }

    row = row.push(iced::widget::Space::new().width(Length::Fill));

    if ctx.can_go_overlays {
        row = row.push(
            button(Text::new(ctx.i18n.tr("navbar-overlays")).size(14))
                .on_press(Message::OpenOverlays)
                .padding([4, 10]),
        );
    }
    if ctx.can_open_library {
        row = row.push(
            button(Text::new(ctx.i18n.tr("navbar-library")).size(14))
                .on_press(Message::OpenLibrary)
                .padding([4, 10]),
        );
    }

    container(row).width(Length::Fill).padding([8, 12]).into()
}
