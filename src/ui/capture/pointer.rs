// SPDX-License-Identifier: MPL-2.0
//! Maps raw Iced runtime events onto gesture-engine contacts.
//!
//! Touch fingers are first-class contacts. The left mouse button is exposed
//! as one synthetic contact so the alignment surface stays usable on
//! desktops without a touchscreen; the cursor leaving the window ends it,
//! matching the "every start gets exactly one end" contract of the engine.

use crate::gesture::{self, ContactId, ContactPoint};
use iced::{mouse, touch, Point, Rectangle};

/// Contact id reserved for the synthetic mouse contact. Touch finger ids are
/// runtime-assigned and small, so the top of the id space is safe.
pub const MOUSE_CONTACT: ContactId = ContactId(u64::MAX);

fn contact_point(position: Point, bounds: Rectangle) -> ContactPoint {
    ContactPoint::new(position.x - bounds.x, position.y - bounds.y)
}

fn finger_contact(finger: touch::Finger) -> ContactId {
    ContactId(finger.0)
}

/// Per-surface pointer state: tracks the cursor so button presses (which
/// carry no position of their own) can start a contact.
#[derive(Debug, Clone, Default)]
pub struct PointerMap {
    cursor: Option<Point>,
    mouse_down: bool,
}

impl PointerMap {
    /// Translates one runtime event into at most one engine message.
    pub fn map(&mut self, event: &iced::Event, bounds: Rectangle) -> Option<gesture::Message> {
        match event {
            iced::Event::Touch(touch_event) => self.map_touch(*touch_event, bounds),
            iced::Event::Mouse(mouse_event) => self.map_mouse(*mouse_event, bounds),
            _ => None,
        }
    }

    fn map_touch(&mut self, event: touch::Event, bounds: Rectangle) -> Option<gesture::Message> {
        match event {
            touch::Event::FingerPressed { id, position } => {
                if !bounds.contains(position) {
                    return None;
                }
                Some(gesture::Message::ContactStarted {
                    id: finger_contact(id),
                    position: contact_point(position, bounds),
                })
            }
            // Moves and lifts are forwarded unconditionally: the engine
            // ignores ids it never saw start.
            touch::Event::FingerMoved { id, position } => Some(gesture::Message::ContactMoved {
                id: finger_contact(id),
                position: contact_point(position, bounds),
            }),
            touch::Event::FingerLifted { id, .. } | touch::Event::FingerLost { id, .. } => {
                Some(gesture::Message::ContactEnded {
                    id: finger_contact(id),
                })
            }
        }
    }

    fn map_mouse(&mut self, event: mouse::Event, bounds: Rectangle) -> Option<gesture::Message> {
        match event {
            mouse::Event::CursorMoved { position } => {
                self.cursor = Some(position);
                if self.mouse_down {
                    Some(gesture::Message::ContactMoved {
                        id: MOUSE_CONTACT,
                        position: contact_point(position, bounds),
                    })
                } else {
                    None
                }
            }
            mouse::Event::ButtonPressed(mouse::Button::Left) => {
                let position = self.cursor.filter(|cursor| bounds.contains(*cursor))?;
                self.mouse_down = true;
                Some(gesture::Message::ContactStarted {
                    id: MOUSE_CONTACT,
                    position: contact_point(position, bounds),
                })
            }
            mouse::Event::ButtonReleased(mouse::Button::Left) => {
                if self.mouse_down {
                    self.mouse_down = false;
                    Some(gesture::Message::ContactEnded { id: MOUSE_CONTACT })
                } else {
                    None
                }
            }
            mouse::Event::CursorLeft => {
                if self.mouse_down {
                    self.mouse_down = false;
                    Some(gesture::Message::ContactEnded { id: MOUSE_CONTACT })
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> Rectangle {
        Rectangle::new(Point::new(10.0, 20.0), iced::Size::new(300.0, 200.0))
    }

    fn press(map: &mut PointerMap, x: f32, y: f32) -> Option<gesture::Message> {
        map.map(
            &iced::Event::Mouse(mouse::Event::CursorMoved {
                position: Point::new(x, y),
            }),
            surface(),
        );
        map.map(
            &iced::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)),
            surface(),
        )
    }

    #[test]
    fn mouse_press_inside_starts_synthetic_contact() {
        let mut map = PointerMap::default();
        let message = press(&mut map, 110.0, 120.0);

        match message {
            Some(gesture::Message::ContactStarted { id, position }) => {
                assert_eq!(id, MOUSE_CONTACT);
                // Surface-local coordinates.
                assert_eq!(position, ContactPoint::new(100.0, 100.0));
            }
            other => panic!("expected contact start, got {:?}", other),
        }
    }

    #[test]
    fn mouse_press_outside_is_ignored() {
        let mut map = PointerMap::default();
        assert!(press(&mut map, 5.0, 5.0).is_none());
    }

    #[test]
    fn cursor_move_without_press_emits_nothing() {
        let mut map = PointerMap::default();
        let message = map.map(
            &iced::Event::Mouse(mouse::Event::CursorMoved {
                position: Point::new(50.0, 50.0),
            }),
            surface(),
        );
        assert!(message.is_none());
    }

    #[test]
    fn drag_then_release_emits_move_and_end() {
        let mut map = PointerMap::default();
        press(&mut map, 110.0, 120.0);

        let moved = map.map(
            &iced::Event::Mouse(mouse::Event::CursorMoved {
                position: Point::new(130.0, 140.0),
            }),
            surface(),
        );
        assert!(matches!(
            moved,
            Some(gesture::Message::ContactMoved { id, .. }) if id == MOUSE_CONTACT
        ));

        let released = map.map(
            &iced::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)),
            surface(),
        );
        assert!(matches!(
            released,
            Some(gesture::Message::ContactEnded { id }) if id == MOUSE_CONTACT
        ));

        // A second release without a press is ignored.
        let again = map.map(
            &iced::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)),
            surface(),
        );
        assert!(again.is_none());
    }

    #[test]
    fn cursor_leaving_surface_ends_the_contact() {
        let mut map = PointerMap::default();
        press(&mut map, 110.0, 120.0);

        let left = map.map(&iced::Event::Mouse(mouse::Event::CursorLeft), surface());
        assert!(matches!(
            left,
            Some(gesture::Message::ContactEnded { id }) if id == MOUSE_CONTACT
        ));
    }

    #[test]
    fn finger_lifecycle_maps_to_contact_lifecycle() {
        let mut map = PointerMap::default();
        let finger = touch::Finger(3);

        let started = map.map(
            &iced::Event::Touch(touch::Event::FingerPressed {
                id: finger,
                position: Point::new(60.0, 70.0),
            }),
            surface(),
        );
        assert!(matches!(
            started,
            Some(gesture::Message::ContactStarted { id, .. }) if id == ContactId(3)
        ));

        let lost = map.map(
            &iced::Event::Touch(touch::Event::FingerLost {
                id: finger,
                position: Point::new(60.0, 70.0),
            }),
            surface(),
        );
        assert!(matches!(
            lost,
            Some(gesture::Message::ContactEnded { id }) if id == ContactId(3)
        ));
    }

    #[test]
    fn finger_press_outside_surface_is_ignored() {
        let mut map = PointerMap::default();
        let started = map.map(
            &iced::Event::Touch(touch::Event::FingerPressed {
                id: touch::Finger(1),
                position: Point::new(0.0, 0.0),
            }),
            surface(),
        );
        assert!(started.is_none());
    }
}
