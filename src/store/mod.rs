// SPDX-License-Identifier: MPL-2.0
//! Remote persistence for overlay and pose records.
//!
//! The backend is a PostgREST-style REST API with an adjacent object storage
//! endpoint. Overlays are created once and listed; pose records are written
//! once per "record pose" action and never updated.

pub mod client;
pub mod models;

pub use client::StoreClient;
pub use models::{NewOverlay, NewPose, Overlay, PoseRecord};
