// SPDX-License-Identifier: MPL-2.0
//! Overlay transform state.
//!
//! The transform is owned exclusively by the gesture engine; consumers only
//! ever see copies of it. Serialization is used when a recorded pose is
//! restored into a new alignment session.

use serde::{Deserialize, Serialize};

/// Default overlay opacity when no pose is restored.
pub const DEFAULT_OPACITY: f32 = 0.5;

/// Default overlay scale (1.0 = natural size).
pub const DEFAULT_SCALE: f32 = 1.0;

/// Minimum allowed opacity.
pub const MIN_OPACITY: f32 = 0.0;

/// Maximum allowed opacity.
pub const MAX_OPACITY: f32 = 1.0;

/// The 2D presentation state applied to the overlay image: offset, uniform
/// scale, and rotation, plus opacity.
///
/// Consumers apply it with the composition translate → scale → rotate,
/// pivoted at the image's own center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayTransform {
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
    /// Uniform scale factor, strictly positive.
    pub scale: f32,
    /// Rotation in degrees. Unbounded: consecutive pinch steps accumulate.
    pub rotation_deg: f32,
    /// Horizontal offset in screen pixels.
    pub offset_x: f32,
    /// Vertical offset in screen pixels.
    pub offset_y: f32,
}

impl Default for OverlayTransform {
    fn default() -> Self {
        Self {
            opacity: DEFAULT_OPACITY,
            scale: DEFAULT_SCALE,
            rotation_deg: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl OverlayTransform {
    /// Builds a transform from the defaults with per-field overrides applied,
    /// e.g. when reopening a previously recorded pose.
    #[must_use]
    pub fn with_overrides(overrides: TransformOverrides) -> Self {
        let defaults = Self::default();
        Self {
            opacity: overrides.opacity.map_or(defaults.opacity, clamp_opacity),
            scale: overrides.scale.unwrap_or(defaults.scale),
            rotation_deg: overrides.rotation_deg.unwrap_or(defaults.rotation_deg),
            offset_x: overrides.offset_x.unwrap_or(defaults.offset_x),
            offset_y: overrides.offset_y.unwrap_or(defaults.offset_y),
        }
    }
}

/// Optional per-field overrides for the initial transform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformOverrides {
    pub opacity: Option<f32>,
    pub scale: Option<f32>,
    pub rotation_deg: Option<f32>,
    pub offset_x: Option<f32>,
    pub offset_y: Option<f32>,
}

/// Clamps an opacity value into the supported `[0, 1]` range.
#[must_use]
pub fn clamp_opacity(value: f32) -> f32 {
    value.clamp(MIN_OPACITY, MAX_OPACITY)
}
