// SPDX-License-Identifier: MPL-2.0
//! `align_lens` is a re-photography helper built with the Iced GUI framework.
//!
//! A historical photograph is composited over the live view as a
//! semi-transparent overlay; one finger drags it while two fingers pinch and
//! rotate it, and the resulting pose can be recorded to a remote store and
//! restored later. The crate also demonstrates internationalization with
//! Fluent, user preference management, and modular UI design.

#![doc(html_root_url = "https://docs.rs/align_lens/0.1.0")]

pub mod app;
pub mod config;
pub mod error;
pub mod gesture;
pub mod i18n;
pub mod sensors;
pub mod store;
pub mod ui;
