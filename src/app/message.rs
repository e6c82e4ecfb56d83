// SPDX-License-Identifier: MPL-2.0
//! Top-level application messages and launch flags.

use crate::error::StoreError;
use crate::store::Overlay;
use crate::ui::{capture, library, navbar, overlays};
use iced::Size;

/// Launch parameters resolved from the command line.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional store base URL override.
    pub server: Option<String>,
    /// Optional overlay id to open directly on the capture screen.
    pub overlay_id: Option<String>,
}

/// Top-level application messages.
#[derive(Debug, Clone)]
pub enum Message {
    Overlays(overlays::Message),
    Capture(capture::Message),
    Library(library::Message),
    Navbar(navbar::Message),
    /// Result of resolving an overlay id passed on the command line.
    OverlayResolved(Result<Overlay, StoreError>),
    SensorTick,
    WindowResized(Size),
}
