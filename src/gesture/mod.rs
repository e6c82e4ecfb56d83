// SPDX-License-Identifier: MPL-2.0
//! Gesture-to-transform engine.
//!
//! Turns a stream of raw contact events (any number of simultaneous touch or
//! pointer contacts) into a continuously updated overlay transform: drag with
//! one contact, pinch/rotate with two. The engine is pure state-transition
//! logic; it performs no rendering and no I/O.

pub mod contacts;
pub mod engine;
pub mod transform;

pub use contacts::{ContactId, ContactPoint, ContactRegistry};
pub use engine::{AngleWrapPolicy, Effect, Engine, Message, Phase};
pub use transform::{OverlayTransform, TransformOverrides};
