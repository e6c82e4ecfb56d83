// SPDX-License-Identifier: MPL-2.0
//! Status bar at the bottom of the capture screen: live position and
//! orientation readouts, plus the compass-permission prompt when the
//! platform gates orientation data behind a user gesture.

use super::Message;
use crate::i18n::fluent::I18n;
use crate::sensors::{PermissionState, SensorReading};
use iced::widget::{button, container, Row, Text};
use iced::{Element, Length};

/// Contextual data needed to render the status bar.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub reading: &'a SensorReading,
    pub permission: PermissionState,
}

fn geo_line(ctx: &ViewContext<'_>) -> String {
    if let Some(fix) = &ctx.reading.geo {
        let mut line = format!("{:.5}, {:.5}", fix.lat, fix.lon);
        if let Some(accuracy) = fix.accuracy_m {
            line.push_str(&format!(" (±{:.0} m)", accuracy));
        }
        line
    } else if let Some(error) = &ctx.reading.geo_error {
        error.clone()
    } else {
        ctx.i18n.tr("status-geo-waiting")
    }
}

fn angle(value: Option<f64>) -> String {
    match value {
        Some(degrees) => format!("{degrees:.0}°"),
        None => "–".to_string(),
    }
}

fn orientation_line(ctx: &ViewContext<'_>) -> String {
    if let Some(sample) = &ctx.reading.orientation {
        format!(
            "{} / {}",
            angle(sample.alpha_yaw_deg),
            angle(sample.beta_pitch_deg)
        )
    } else if let Some(error) = &ctx.reading.orientation_error {
        error.clone()
    } else {
        ctx.i18n.tr("status-orientation-waiting")
    }
}

/// Render the status bar.
pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let mut row = Row::new()
        .spacing(16)
        .push(Text::new(format!(
            "{}: {}",
            ctx.i18n.tr("status-geo-label"),
            geo_line(&ctx)
        )))
        .push(Text::new(format!(
            "{}: {}",
            ctx.i18n.tr("status-orientation-label"),
            orientation_line(&ctx)
        )));

    if ctx.permission == PermissionState::Default {
        row = row.push(
            button(Text::new(ctx.i18n.tr("status-grant-compass")).size(13))
                .on_press(Message::RequestOrientationPermission)
                .padding(4),
        );
    }

    container(row)
        .width(Length::Fill)
        .padding([6, 10])
        .into()
}
