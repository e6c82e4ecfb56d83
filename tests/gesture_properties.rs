// SPDX-License-Identifier: MPL-2.0
//! End-to-end gesture scenarios driven through the public engine API:
//! full contact lifecycles across drag, pinch, contact churn and policy
//! boundaries.

use align_lens::gesture::{
    AngleWrapPolicy, ContactId, ContactPoint, Effect, Engine, Message, TransformOverrides,
};
use approx::assert_relative_eq;

fn engine() -> Engine {
    Engine::new(TransformOverrides::default(), AngleWrapPolicy::default())
}

fn start(engine: &mut Engine, id: u64, x: f32, y: f32) -> Effect {
    engine.handle(Message::ContactStarted {
        id: ContactId(id),
        position: ContactPoint::new(x, y),
    })
}

fn mv(engine: &mut Engine, id: u64, x: f32, y: f32) -> Effect {
    engine.handle(Message::ContactMoved {
        id: ContactId(id),
        position: ContactPoint::new(x, y),
    })
}

fn end(engine: &mut Engine, id: u64) -> Effect {
    engine.handle(Message::ContactEnded { id: ContactId(id) })
}

#[test]
fn drag_accumulates_across_many_moves() {
    let mut engine = engine();
    start(&mut engine, 1, 0.0, 0.0);

    for step in 1..=20 {
        mv(&mut engine, 1, step as f32 * 3.0, step as f32 * -2.0);
    }

    let transform = engine.transform();
    assert_relative_eq!(transform.offset_x, 60.0);
    assert_relative_eq!(transform.offset_y, -40.0);
    assert_relative_eq!(transform.scale, 1.0);
    assert_relative_eq!(transform.rotation_deg, 0.0);
}

#[test]
fn pinch_scales_relative_to_the_seeded_distance() {
    let mut engine = engine();
    start(&mut engine, 1, 0.0, 0.0);
    start(&mut engine, 2, 100.0, 0.0);

    // First two-contact move only seeds the reference.
    let seed = mv(&mut engine, 2, 100.0, 0.0);
    assert!(matches!(seed, Effect::None));

    mv(&mut engine, 2, 200.0, 0.0);
    assert_relative_eq!(engine.transform().scale, 2.0, epsilon = 1e-5);

    mv(&mut engine, 2, 50.0, 0.0);
    assert_relative_eq!(engine.transform().scale, 0.5, epsilon = 1e-5);
}

#[test]
fn rotation_accumulates_past_a_full_turn() {
    // Under the shortest-arc policy, a steady orbit keeps adding small
    // positive deltas; nothing snaps the total back into ±180°.
    let mut engine = Engine::new(TransformOverrides::default(), AngleWrapPolicy::Shortest);
    start(&mut engine, 2, 0.0, 0.0);

    let radius = 100.0_f32;
    start(&mut engine, 1, radius, 0.0);
    mv(&mut engine, 1, radius, 0.0); // seed at 0°

    for step in 1..=15 {
        let theta = (step as f32 * 30.0).to_radians();
        mv(&mut engine, 1, radius * theta.cos(), radius * theta.sin());
    }

    assert_relative_eq!(engine.transform().rotation_deg, 450.0, epsilon = 1e-2);
    assert_relative_eq!(engine.transform().scale, 1.0, epsilon = 1e-4);
}

#[test]
fn raw_policy_jumps_across_the_bearing_boundary() {
    let mut engine = engine();
    start(&mut engine, 1, -100.0, 0.0);
    start(&mut engine, 2, 0.0, 0.0);
    mv(&mut engine, 1, -100.0, 1.746); // seed at ≈ +179°

    mv(&mut engine, 1, -100.0, -1.746); // bearing ≈ −179°
    assert_relative_eq!(engine.transform().rotation_deg, -358.0, epsilon = 0.1);
}

#[test]
fn shortest_policy_takes_the_small_step_across_the_boundary() {
    let mut engine = Engine::new(TransformOverrides::default(), AngleWrapPolicy::Shortest);
    start(&mut engine, 1, -100.0, 0.0);
    start(&mut engine, 2, 0.0, 0.0);
    mv(&mut engine, 1, -100.0, 1.746);

    mv(&mut engine, 1, -100.0, -1.746);
    assert_relative_eq!(engine.transform().rotation_deg, 2.0, epsilon = 0.1);
}

#[test]
fn lifting_one_pinch_contact_transitions_to_a_clean_drag() {
    let mut engine = engine();
    start(&mut engine, 1, 0.0, 0.0);
    start(&mut engine, 2, 100.0, 0.0);
    mv(&mut engine, 2, 100.0, 0.0);
    mv(&mut engine, 2, 150.0, 0.0);

    let scale_after_pinch = engine.transform().scale;
    end(&mut engine, 2);

    // The remaining contact drags from its current position with no jump.
    mv(&mut engine, 1, 10.0, 5.0);
    let transform = engine.transform();
    assert_relative_eq!(transform.offset_x, 10.0);
    assert_relative_eq!(transform.offset_y, 5.0);
    assert_relative_eq!(transform.scale, scale_after_pinch);
}

#[test]
fn reentering_two_contacts_reseeds_instead_of_jumping() {
    let mut engine = engine();
    start(&mut engine, 1, 0.0, 0.0);
    start(&mut engine, 2, 100.0, 0.0);
    mv(&mut engine, 2, 100.0, 0.0);
    mv(&mut engine, 2, 200.0, 0.0);
    end(&mut engine, 2);

    let scale_before = engine.transform().scale;

    // Second pinch starts at a very different spacing; the first move after
    // re-entry must not rescale against the stale reference.
    start(&mut engine, 3, 10.0, 0.0);
    let reseed = mv(&mut engine, 3, 10.0, 0.0);
    assert!(matches!(reseed, Effect::None));
    assert_relative_eq!(engine.transform().scale, scale_before);

    mv(&mut engine, 3, 20.0, 0.0);
    assert_relative_eq!(engine.transform().scale, scale_before * 2.0, epsilon = 1e-5);
}

#[test]
fn a_third_contact_is_inert_for_the_transform() {
    let mut engine = engine();
    start(&mut engine, 1, 0.0, 0.0);
    start(&mut engine, 2, 100.0, 0.0);
    mv(&mut engine, 2, 100.0, 0.0);

    start(&mut engine, 3, 500.0, 500.0);
    let before = engine.transform();

    // Moving the extra contact changes nothing.
    mv(&mut engine, 3, 600.0, 600.0);
    assert_eq!(engine.transform(), before);

    // Ending it leaves the designated pair pinching; the first pair move
    // after the churn only reseeds.
    end(&mut engine, 3);
    mv(&mut engine, 2, 100.0, 0.0);
    assert_eq!(engine.transform(), before);

    mv(&mut engine, 2, 200.0, 0.0);
    assert_relative_eq!(engine.transform().scale, before.scale * 2.0, epsilon = 1e-5);
}

#[test]
fn coincident_contacts_never_produce_a_degenerate_scale() {
    let mut engine = engine();
    start(&mut engine, 1, 50.0, 50.0);
    start(&mut engine, 2, 60.0, 50.0);
    mv(&mut engine, 2, 60.0, 50.0);

    // Collapse the pair onto one point, then separate again.
    mv(&mut engine, 2, 50.0, 50.0);
    let collapsed = engine.transform();
    assert!(collapsed.scale.is_finite());
    assert_relative_eq!(collapsed.scale, 1.0);

    mv(&mut engine, 2, 70.0, 50.0);
    let transform = engine.transform();
    assert!(transform.scale.is_finite());
    assert!(transform.scale > 0.0);
}

#[test]
fn restored_pose_seeds_the_engine_and_keeps_moving() {
    let overrides = TransformOverrides {
        opacity: Some(0.8),
        scale: Some(1.4),
        rotation_deg: Some(33.0),
        offset_x: Some(12.0),
        offset_y: Some(-7.0),
    };
    let mut engine = Engine::new(overrides, AngleWrapPolicy::Raw);

    let initial = engine.transform();
    assert_relative_eq!(initial.scale, 1.4);
    assert_relative_eq!(initial.rotation_deg, 33.0);

    start(&mut engine, 1, 0.0, 0.0);
    mv(&mut engine, 1, 8.0, 0.0);
    assert_relative_eq!(engine.transform().offset_x, 20.0);
    assert_relative_eq!(engine.transform().offset_y, -7.0);
}

#[test]
fn a_session_walks_from_drag_through_pinch_without_jumps() {
    let mut engine = engine();

    start(&mut engine, 1, 100.0, 100.0);
    mv(&mut engine, 1, 110.0, 115.0);
    let after_drag = engine.transform();
    assert_relative_eq!(after_drag.offset_x, 10.0);
    assert_relative_eq!(after_drag.offset_y, 15.0);
    assert_relative_eq!(after_drag.scale, 1.0);
    assert_relative_eq!(after_drag.rotation_deg, 0.0);

    // Second contact joins; nothing changes until the pair moves.
    start(&mut engine, 2, 200.0, 100.0);
    let seed = mv(&mut engine, 1, 90.0, 90.0);
    assert!(matches!(seed, Effect::None));
    assert_relative_eq!(engine.transform().scale, 1.0);
    assert_relative_eq!(engine.transform().rotation_deg, 0.0);

    // Contact 1 stays at (90, 90); the pair distance seeded above is
    // sqrt(110^2 + 10^2), and (145, 95) puts the pair at exactly half of it.
    mv(&mut engine, 2, 145.0, 95.0);
    assert_relative_eq!(engine.transform().scale, 0.5, epsilon = 1e-5);
    assert_relative_eq!(engine.transform().offset_x, 10.0);
    assert_relative_eq!(engine.transform().offset_y, 15.0);
}

#[test]
fn opacity_changes_are_independent_of_gestures() {
    let mut engine = engine();
    start(&mut engine, 1, 0.0, 0.0);
    mv(&mut engine, 1, 30.0, 0.0);

    let effect = engine.handle(Message::OpacityChanged(0.3));
    assert!(matches!(effect, Effect::TransformChanged(_)));

    let transform = engine.transform();
    assert_relative_eq!(transform.opacity, 0.3);
    assert_relative_eq!(transform.offset_x, 30.0);
}
