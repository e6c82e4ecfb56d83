// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! The capture surface receives pointer input through its canvas widget, so
//! the subscriptions here only cover window resizes (tracked as the pose
//! viewport) and the sensor poll tick while the capture screen is open.

use super::{Message, Screen};
use iced::{event, time, Subscription};
use std::time::Duration;

const SENSOR_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Window events needed on every screen.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, _window| match event {
        event::Event::Window(iced::window::Event::Resized(size)) => {
            Some(Message::WindowResized(size))
        }
        _ => None,
    })
}

/// Sensor polling, active only while a capture screen is shown.
pub fn create_tick_subscription(screen: Screen) -> Subscription<Message> {
    match screen {
        Screen::Capture => {
            time::every(SENSOR_POLL_INTERVAL).map(|_instant| Message::SensorTick)
        }
        Screen::Overlays | Screen::Library => Subscription::none(),
    }
}
