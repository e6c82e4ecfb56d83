// SPDX-License-Identifier: MPL-2.0
//! Device sensor boundary.
//!
//! Geolocation and device orientation are platform services this application
//! only consumes: their readings are recorded as pose metadata and shown in
//! the capture status bar, but they never influence the overlay transform.
//! A [`SensorProvider`] abstracts the platform; desktop builds run with
//! [`UnavailableProvider`].

use std::fmt;

/// One geolocation fix.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeoFix {
    pub lat: f64,
    pub lon: f64,
    pub alt: Option<f64>,
    pub accuracy_m: Option<f64>,
    pub heading_deg: Option<f64>,
    pub speed_mps: Option<f64>,
}

/// One device-orientation sample (yaw/pitch/roll in degrees).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrientationSample {
    pub alpha_yaw_deg: Option<f64>,
    pub beta_pitch_deg: Option<f64>,
    pub gamma_roll_deg: Option<f64>,
}

/// Permission state for sensors that require an explicit user grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionState {
    #[default]
    Default,
    Granted,
    Denied,
}

/// Combined sensor reading delivered by a provider poll.
#[derive(Debug, Clone, Default)]
pub struct SensorReading {
    pub geo: Option<GeoFix>,
    pub geo_error: Option<String>,
    pub orientation: Option<OrientationSample>,
    pub orientation_error: Option<String>,
}

/// Source of sensor readings. Implementations wrap platform APIs; the
/// application polls on a timer and treats every field as optional.
pub trait SensorProvider: fmt::Debug {
    /// Current reading. Must not block.
    fn poll(&mut self) -> SensorReading;

    /// Permission state for orientation events.
    fn orientation_permission(&self) -> PermissionState {
        PermissionState::Granted
    }

    /// Requests orientation permission where the platform needs one.
    fn request_orientation_permission(&mut self) {}
}

/// Provider for platforms without geolocation or orientation APIs.
#[derive(Debug, Clone, Default)]
pub struct UnavailableProvider;

impl SensorProvider for UnavailableProvider {
    fn poll(&mut self) -> SensorReading {
        SensorReading {
            geo: None,
            geo_error: Some("Geolocation is not available on this device.".to_string()),
            orientation: None,
            orientation_error: Some("Orientation is not available on this device.".to_string()),
        }
    }
}

/// Latest sensor state kept by the application and refreshed on a tick.
#[derive(Debug, Default)]
pub struct SensorHub {
    provider: Option<Box<dyn SensorProvider>>,
    latest: SensorReading,
}

impl SensorHub {
    #[must_use]
    pub fn new(provider: Box<dyn SensorProvider>) -> Self {
        Self {
            provider: Some(provider),
            latest: SensorReading::default(),
        }
    }

    /// Polls the provider and stores the fresh reading.
    pub fn refresh(&mut self) {
        if let Some(provider) = self.provider.as_mut() {
            self.latest = provider.poll();
        }
    }

    #[must_use]
    pub fn latest(&self) -> &SensorReading {
        &self.latest
    }

    #[must_use]
    pub fn orientation_permission(&self) -> PermissionState {
        self.provider
            .as_ref()
            .map_or(PermissionState::Default, |p| p.orientation_permission())
    }

    pub fn request_orientation_permission(&mut self) {
        if let Some(provider) = self.provider.as_mut() {
            provider.request_orientation_permission();
        }
    }
}
