// SPDX-License-Identifier: MPL-2.0
//! The gesture engine: contact events in, transform snapshots out.
//!
//! One contact drags the overlay, two contacts pinch/rotate it, and an
//! independent channel sets opacity. Every mutation yields exactly one
//! [`Effect::TransformChanged`] carrying the full snapshot; the consumer is
//! responsible for any render-rate throttling.
//!
//! Pinch/rotate works incrementally against a reference frame: the
//! distance/bearing snapshot of the designated pair taken on an earlier
//! update. The first two-contact reading only seeds that frame, so entering
//! or re-entering the two-contact phase never produces a visible jump.

use serde::{Deserialize, Serialize};

use super::contacts::{ContactId, ContactPoint, ContactRegistry};
use super::transform::{clamp_opacity, OverlayTransform, TransformOverrides};

/// How a per-step rotation delta behaves across the ±180° bearing boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleWrapPolicy {
    /// Keep the raw difference between consecutive bearings. A bearing jump
    /// from 179° to −179° counts as −358°.
    #[default]
    Raw,
    /// Normalize each delta into (−180°, 180°], treating any jump as the
    /// shorter rotation. The same bearing jump counts as +2°.
    Shortest,
}

impl AngleWrapPolicy {
    fn apply(self, delta_deg: f32) -> f32 {
        match self {
            AngleWrapPolicy::Raw => delta_deg,
            AngleWrapPolicy::Shortest => {
                let mut delta = delta_deg % 360.0;
                if delta <= -180.0 {
                    delta += 360.0;
                } else if delta > 180.0 {
                    delta -= 360.0;
                }
                delta
            }
        }
    }
}

/// Contact lifecycle and control events consumed by the engine.
///
/// Events must arrive in source order per contact id; the engine assumes no
/// reordering across a single contact's start/move/end lifecycle.
#[derive(Debug, Clone)]
pub enum Message {
    /// A contact touched down.
    ContactStarted {
        id: ContactId,
        position: ContactPoint,
    },
    /// An active contact moved to a new position.
    ContactMoved {
        id: ContactId,
        position: ContactPoint,
    },
    /// A contact lifted (or was cancelled / left the surface).
    ContactEnded { id: ContactId },
    /// Direct opacity control, bypassing the gesture path entirely.
    OpacityChanged(f32),
}

/// Outcome of one engine event.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Nothing visible changed.
    None,
    /// The transform changed; the snapshot is the complete new state.
    TransformChanged(OverlayTransform),
}

/// Gesture phase, derived from the number of active contacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    OneContact,
    TwoContact,
    ManyContact,
}

/// Distance/bearing baseline for the next incremental pinch/rotate step,
/// tagged with the pair it was measured for.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ReferenceFrame {
    pair: (ContactId, ContactId),
    distance: f32,
    angle_deg: f32,
}

/// Gesture-to-transform engine.
///
/// Single-threaded and synchronous; no operation blocks or performs I/O.
/// Malformed event sequences (unknown-id moves or ends, duplicate starts)
/// degrade to no-ops rather than errors.
#[derive(Debug, Clone)]
pub struct Engine {
    transform: OverlayTransform,
    contacts: ContactRegistry,
    reference: Option<ReferenceFrame>,
    wrap_policy: AngleWrapPolicy,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(TransformOverrides::default(), AngleWrapPolicy::default())
    }
}

impl Engine {
    /// Creates an engine with per-field initial-transform overrides (e.g. a
    /// restored pose) and the configured angle wrap policy.
    #[must_use]
    pub fn new(overrides: TransformOverrides, wrap_policy: AngleWrapPolicy) -> Self {
        Self {
            transform: OverlayTransform::with_overrides(overrides),
            contacts: ContactRegistry::default(),
            reference: None,
            wrap_policy,
        }
    }

    /// Read-only snapshot of the current transform.
    #[must_use]
    pub fn transform(&self) -> OverlayTransform {
        self.transform
    }

    /// Current gesture phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self.contacts.len() {
            0 => Phase::Idle,
            1 => Phase::OneContact,
            2 => Phase::TwoContact,
            _ => Phase::ManyContact,
        }
    }

    /// Processes one event. Returns at most one transform change.
    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::ContactStarted { id, position } => self.contact_started(id, position),
            Message::ContactMoved { id, position } => self.contact_moved(id, position),
            Message::ContactEnded { id } => self.contact_ended(id),
            Message::OpacityChanged(value) => {
                self.transform.opacity = clamp_opacity(value);
                Effect::TransformChanged(self.transform)
            }
        }
    }

    fn contact_started(&mut self, id: ContactId, position: ContactPoint) -> Effect {
        let was_two = self.contacts.len() == 2;
        if self.contacts.start(id, position) && was_two {
            // The count left 2: the baseline no longer describes the live
            // geometry, so the next pair move must re-seed.
            self.reference = None;
        }
        Effect::None
    }

    fn contact_moved(&mut self, id: ContactId, position: ContactPoint) -> Effect {
        let Some(previous) = self.contacts.update(id, position) else {
            // Move for a contact this engine never saw start.
            return Effect::None;
        };

        match self.phase() {
            Phase::Idle => Effect::None,
            Phase::OneContact => {
                self.transform.offset_x += position.x - previous.x;
                self.transform.offset_y += position.y - previous.y;
                Effect::TransformChanged(self.transform)
            }
            Phase::TwoContact | Phase::ManyContact => self.pinch_step(id),
        }
    }

    fn contact_ended(&mut self, id: ContactId) -> Effect {
        if self.contacts.end(id) {
            self.reconcile_reference();
        }
        Effect::None
    }

    /// Incremental pinch/rotate against the designated pair.
    fn pinch_step(&mut self, moved: ContactId) -> Effect {
        let Some(pair) = self.contacts.pinch_pair() else {
            return Effect::None;
        };
        if moved != pair.0 && moved != pair.1 {
            // Extra contacts are tracked but never drive the transform.
            return Effect::None;
        }

        let (Some(first), Some(second)) = (
            self.contacts.position(pair.0),
            self.contacts.position(pair.1),
        ) else {
            return Effect::None;
        };

        let dx = first.x - second.x;
        let dy = first.y - second.y;
        let distance = (dx * dx + dy * dy).sqrt();
        let angle_deg = dy.atan2(dx).to_degrees();

        let mut effect = Effect::None;
        if let Some(reference) = self.reference {
            // A baseline from an earlier update for this exact pair, with a
            // usable distance on both sides. A zero distance (both contacts
            // at the same point) has no defined angle and would drive scale
            // to zero or infinity, so such a step only seeds. Scale and
            // rotation commit together or not at all.
            if reference.pair == pair && reference.distance > 0.0 && distance > 0.0 {
                self.transform.scale *= distance / reference.distance;
                self.transform.rotation_deg +=
                    self.wrap_policy.apply(angle_deg - reference.angle_deg);
                effect = Effect::TransformChanged(self.transform);
            }
        }

        // Always adopt the fresh reading, whether or not it was applied. The
        // first reading after entering the two-contact phase only seeds.
        self.reference = Some(ReferenceFrame {
            pair,
            distance,
            angle_deg,
        });

        effect
    }

    /// Drops the reference frame when it no longer matches the live pair:
    /// the count fell below two, or a pair member lifted and another contact
    /// was promoted. Lifting a contact outside the pair keeps it.
    fn reconcile_reference(&mut self) {
        let keep = match (self.reference, self.contacts.pinch_pair()) {
            (Some(reference), Some(pair)) => reference.pair == pair,
            _ => false,
        };
        if !keep {
            self.reference = None;
        }
    }
}
