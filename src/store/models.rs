// SPDX-License-Identifier: MPL-2.0
//! Record shapes exchanged with the remote store.
//!
//! Split into row types (`Overlay`, `PoseRecord`) and insert types
//! (`NewOverlay`, `NewPose`) so server-generated columns never appear in
//! request bodies.

use crate::gesture::{OverlayTransform, TransformOverrides};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reference image registered in the library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    pub id: String,
    pub title: String,
    pub overlay_url: String,
    #[serde(default)]
    pub place_name: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Insert shape for a new overlay (no server-generated columns).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOverlay {
    pub title: String,
    pub overlay_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
}

/// One immutable alignment record: the overlay transform at the moment of
/// recording plus whatever sensor and viewport metadata was available.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PoseRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub overlay_id: String,
    #[serde(default)]
    pub recorded_at: Option<DateTime<Utc>>,

    // Geolocation fix
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub alt: Option<f64>,
    #[serde(default)]
    pub accuracy_m: Option<f64>,
    #[serde(default)]
    pub heading_deg: Option<f64>,
    #[serde(default)]
    pub speed_mps: Option<f64>,

    // Device orientation
    #[serde(default)]
    pub alpha_yaw_deg: Option<f64>,
    #[serde(default)]
    pub beta_pitch_deg: Option<f64>,
    #[serde(default)]
    pub gamma_roll_deg: Option<f64>,
    #[serde(default)]
    pub tilt_deg: Option<f64>,

    // Overlay transform
    #[serde(default)]
    pub overlay_scale: Option<f32>,
    #[serde(default)]
    pub overlay_rotation_deg: Option<f32>,
    #[serde(default)]
    pub overlay_offset_x: Option<f32>,
    #[serde(default)]
    pub overlay_offset_y: Option<f32>,
    #[serde(default)]
    pub overlay_opacity: Option<f32>,

    // Capture context
    #[serde(default)]
    pub device_model: Option<String>,
    #[serde(default)]
    pub viewport_w: Option<u32>,
    #[serde(default)]
    pub viewport_h: Option<u32>,
    #[serde(default)]
    pub stream_w: Option<u32>,
    #[serde(default)]
    pub stream_h: Option<u32>,
    #[serde(default)]
    pub zoom_factor: Option<f64>,
    #[serde(default)]
    pub fov_deg: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl PoseRecord {
    /// Transform overrides for reopening this pose in a capture session.
    /// Missing columns simply keep the defaults.
    #[must_use]
    pub fn transform_overrides(&self) -> TransformOverrides {
        TransformOverrides {
            opacity: self.overlay_opacity,
            scale: self.overlay_scale,
            rotation_deg: self.overlay_rotation_deg,
            offset_x: self.overlay_offset_x,
            offset_y: self.overlay_offset_y,
        }
    }
}

/// Insert shape for one pose record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPose {
    pub overlay_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy_m: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_deg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_mps: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha_yaw_deg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beta_pitch_deg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gamma_roll_deg: Option<f64>,

    pub overlay_scale: f32,
    pub overlay_rotation_deg: f32,
    pub overlay_offset_x: f32,
    pub overlay_offset_y: f32,
    pub overlay_opacity: f32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewport_w: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewport_h: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_w: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_h: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewPose {
    /// Starts an insert from the overlay id and the current transform; the
    /// caller fills in sensor and viewport metadata as available.
    #[must_use]
    pub fn from_transform(overlay_id: impl Into<String>, transform: OverlayTransform) -> Self {
        Self {
            overlay_id: overlay_id.into(),
            lat: None,
            lon: None,
            alt: None,
            accuracy_m: None,
            heading_deg: None,
            speed_mps: None,
            alpha_yaw_deg: None,
            beta_pitch_deg: None,
            gamma_roll_deg: None,
            overlay_scale: transform.scale,
            overlay_rotation_deg: transform.rotation_deg,
            overlay_offset_x: transform.offset_x,
            overlay_offset_y: transform.offset_y,
            overlay_opacity: transform.opacity,
            device_model: None,
            viewport_w: None,
            viewport_h: None,
            stream_w: None,
            stream_h: None,
            notes: None,
        }
    }
}
