// SPDX-License-Identifier: MPL-2.0
//! Registry of in-flight contacts.
//!
//! Tracks the set of currently active contacts and the last position seen for
//! each of them. Only cardinality and identity matter to the engine; press
//! order is kept so pair selection under three or more contacts stays
//! deterministic.

use std::collections::HashMap;

/// Identifier for one contact, stable for its down → moves → up lifetime.
///
/// The value is caller-assigned and opaque: touch finger ids and synthetic
/// mouse contacts share the same space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactId(pub u64);

/// Screen-space position of a contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactPoint {
    pub x: f32,
    pub y: f32,
}

impl ContactPoint {
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Owned, bounded map of active contacts keyed by contact id.
#[derive(Debug, Clone, Default)]
pub struct ContactRegistry {
    positions: HashMap<ContactId, ContactPoint>,
    press_order: Vec<ContactId>,
}

impl ContactRegistry {
    /// Registers a new contact. Returns `false` (and keeps the stored
    /// position) if the id is already active.
    pub fn start(&mut self, id: ContactId, position: ContactPoint) -> bool {
        if self.positions.contains_key(&id) {
            return false;
        }
        self.positions.insert(id, position);
        self.press_order.push(id);
        true
    }

    /// Updates the stored position of an active contact, returning the
    /// previous position. Unknown ids are ignored and yield `None`; this
    /// covers moves for contacts the engine never saw start.
    pub fn update(&mut self, id: ContactId, position: ContactPoint) -> Option<ContactPoint> {
        self.positions.get_mut(&id).map(|stored| {
            let previous = *stored;
            *stored = position;
            previous
        })
    }

    /// Removes a contact. Returns `false` if the id was not active.
    pub fn end(&mut self, id: ContactId) -> bool {
        if self.positions.remove(&id).is_none() {
            return false;
        }
        self.press_order.retain(|other| *other != id);
        true
    }

    /// Number of currently active contacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Last known position of a contact, if active.
    #[must_use]
    pub fn position(&self, id: ContactId) -> Option<ContactPoint> {
        self.positions.get(&id).copied()
    }

    /// The designated pinch pair: the two oldest-remaining contacts in press
    /// order. `None` while fewer than two contacts are active.
    #[must_use]
    pub fn pinch_pair(&self) -> Option<(ContactId, ContactId)> {
        match self.press_order.as_slice() {
            [first, second, ..] => Some((*first, *second)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_registers_contact() {
        let mut registry = ContactRegistry::default();
        assert!(registry.start(ContactId(1), ContactPoint::new(10.0, 20.0)));
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.position(ContactId(1)),
            Some(ContactPoint::new(10.0, 20.0))
        );
    }

    #[test]
    fn duplicate_start_keeps_original_position() {
        let mut registry = ContactRegistry::default();
        registry.start(ContactId(1), ContactPoint::new(10.0, 20.0));

        assert!(!registry.start(ContactId(1), ContactPoint::new(99.0, 99.0)));
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.position(ContactId(1)),
            Some(ContactPoint::new(10.0, 20.0))
        );
    }

    #[test]
    fn update_returns_previous_position() {
        let mut registry = ContactRegistry::default();
        registry.start(ContactId(7), ContactPoint::new(1.0, 2.0));

        let previous = registry.update(ContactId(7), ContactPoint::new(3.0, 4.0));
        assert_eq!(previous, Some(ContactPoint::new(1.0, 2.0)));
        assert_eq!(
            registry.position(ContactId(7)),
            Some(ContactPoint::new(3.0, 4.0))
        );
    }

    #[test]
    fn update_unknown_contact_is_ignored() {
        let mut registry = ContactRegistry::default();
        assert_eq!(
            registry.update(ContactId(42), ContactPoint::new(0.0, 0.0)),
            None
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn end_removes_contact_and_order_entry() {
        let mut registry = ContactRegistry::default();
        registry.start(ContactId(1), ContactPoint::new(0.0, 0.0));
        registry.start(ContactId(2), ContactPoint::new(5.0, 5.0));

        assert!(registry.end(ContactId(1)));
        assert!(!registry.end(ContactId(1)));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.pinch_pair(), None);
    }

    #[test]
    fn pinch_pair_is_two_oldest_by_press_order() {
        let mut registry = ContactRegistry::default();
        registry.start(ContactId(3), ContactPoint::new(0.0, 0.0));
        registry.start(ContactId(1), ContactPoint::new(1.0, 1.0));
        registry.start(ContactId(2), ContactPoint::new(2.0, 2.0));

        assert_eq!(registry.pinch_pair(), Some((ContactId(3), ContactId(1))));
    }

    #[test]
    fn pinch_pair_survives_third_contact_lift() {
        let mut registry = ContactRegistry::default();
        registry.start(ContactId(3), ContactPoint::new(0.0, 0.0));
        registry.start(ContactId(1), ContactPoint::new(1.0, 1.0));
        registry.start(ContactId(2), ContactPoint::new(2.0, 2.0));

        registry.end(ContactId(2));
        assert_eq!(registry.pinch_pair(), Some((ContactId(3), ContactId(1))));
    }

    #[test]
    fn pinch_pair_promotes_next_oldest_after_member_lift() {
        let mut registry = ContactRegistry::default();
        registry.start(ContactId(3), ContactPoint::new(0.0, 0.0));
        registry.start(ContactId(1), ContactPoint::new(1.0, 1.0));
        registry.start(ContactId(2), ContactPoint::new(2.0, 2.0));

        registry.end(ContactId(1));
        assert_eq!(registry.pinch_pair(), Some((ContactId(3), ContactId(2))));
    }
}
