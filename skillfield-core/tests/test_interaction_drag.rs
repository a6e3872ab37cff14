//! Drag-and-throw state machine

use glam::Vec2;
use skillfield_core::tests::test_helpers::{approx_eq_vec2, container, store_with};
use skillfield_core::{
    advance_frame, handle_pointer, step_simulation, DragState, EntityId, PhysicsParams, PointerEvent,
    PointerResponse, SimulationContext, TranslationBuffer,
};

fn two_entity_context() -> SimulationContext {
    let store = store_with(&[
        (30.0, Vec2::new(100.0, 100.0), Vec2::ZERO),
        (30.0, Vec2::new(300.0, 100.0), Vec2::ZERO),
    ]);
    SimulationContext::new(store, container(800.0, 600.0), PhysicsParams::default())
        .expect("context should build")
}

#[test]
fn test_press_on_entity_starts_drag() {
    let mut ctx = two_entity_context();

    let response = handle_pointer(&mut ctx, PointerEvent::Press(Vec2::new(105.0, 100.0)));

    assert_eq!(response, PointerResponse::DragStarted(EntityId(0)));
    assert!(response.captured());
    assert_eq!(ctx.controller.dragged(), Some(EntityId(0)));
    assert_eq!(ctx.store().get(EntityId(0)).unwrap().pos, Vec2::new(105.0, 100.0));
}

#[test]
fn test_press_on_empty_space_is_ignored() {
    let mut ctx = two_entity_context();

    let response = handle_pointer(&mut ctx, PointerEvent::Press(Vec2::new(600.0, 500.0)));

    assert_eq!(response, PointerResponse::Ignored);
    assert_eq!(ctx.controller.state(), DragState::Idle);
}

#[test]
fn test_second_press_does_not_steal_drag() {
    let mut ctx = two_entity_context();
    handle_pointer(&mut ctx, PointerEvent::Press(Vec2::new(100.0, 100.0)));

    let response = handle_pointer(&mut ctx, PointerEvent::Press(Vec2::new(300.0, 100.0)));

    assert_eq!(response, PointerResponse::Ignored);
    assert_eq!(ctx.controller.dragged(), Some(EntityId(0)));
    let dragged = ctx.store().iter().filter(|e| ctx.controller.dragged() == Some(e.id())).count();
    assert_eq!(dragged, 1);
}

#[test]
fn test_move_drags_entity_with_damped_velocity() {
    let mut ctx = two_entity_context();
    handle_pointer(&mut ctx, PointerEvent::Press(Vec2::new(100.0, 100.0)));

    let response = handle_pointer(&mut ctx, PointerEvent::Move(Vec2::new(120.0, 110.0)));

    assert_eq!(response, PointerResponse::Dragged(EntityId(0)));
    let entity = ctx.store().get(EntityId(0)).unwrap();
    assert_eq!(entity.pos, Vec2::new(120.0, 110.0));
    assert!(approx_eq_vec2(entity.vel, Vec2::new(10.0, 5.0), 1e-6));
}

#[test]
fn test_move_is_clamped_to_container() {
    let mut ctx = two_entity_context();
    handle_pointer(&mut ctx, PointerEvent::Press(Vec2::new(100.0, 100.0)));

    handle_pointer(&mut ctx, PointerEvent::Move(Vec2::new(-500.0, 900.0)));

    assert_eq!(ctx.store().get(EntityId(0)).unwrap().pos, Vec2::new(30.0, 570.0));
}

#[test]
fn test_move_without_drag_is_ignored() {
    let mut ctx = two_entity_context();
    let response = handle_pointer(&mut ctx, PointerEvent::Move(Vec2::new(120.0, 110.0)));
    assert_eq!(response, PointerResponse::Ignored);
    assert_eq!(ctx.store().get(EntityId(0)).unwrap().pos, Vec2::new(100.0, 100.0));
}

#[test]
fn test_release_throws_with_last_frame_delta() {
    let mut ctx = two_entity_context();
    let mut display = TranslationBuffer::bound_to(ctx.store());

    handle_pointer(&mut ctx, PointerEvent::Press(Vec2::new(100.0, 100.0)));
    step_simulation(&mut ctx, &mut display);
    assert_eq!(ctx.store().get(EntityId(0)).unwrap().vel, Vec2::ZERO);

    handle_pointer(&mut ctx, PointerEvent::Move(Vec2::new(130.0, 100.0)));
    step_simulation(&mut ctx, &mut display);
    assert!(approx_eq_vec2(ctx.store().get(EntityId(0)).unwrap().vel, Vec2::new(30.0, 0.0), 1e-6));

    let response = handle_pointer(&mut ctx, PointerEvent::Release);
    assert_eq!(response, PointerResponse::DragEnded(EntityId(0)));
    assert_eq!(ctx.controller.state(), DragState::Idle);

    step_simulation(&mut ctx, &mut display);
    let thrown = ctx.store().get(EntityId(0)).unwrap();
    assert!(thrown.vel.x > 29.0);
    assert!(thrown.pos.x > 155.0);
}

#[test]
fn test_throw_survives_multiple_substeps_per_frame() {
    let mut ctx = two_entity_context();
    let mut display = TranslationBuffer::bound_to(ctx.store());

    handle_pointer(&mut ctx, PointerEvent::Press(Vec2::new(100.0, 100.0)));
    handle_pointer(&mut ctx, PointerEvent::Move(Vec2::new(140.0, 100.0)));

    // One host frame running two integrator steps
    assert!(!advance_frame(&mut ctx, &mut display, 2));
    assert_eq!(ctx.frame, 2);
    assert!(approx_eq_vec2(ctx.store().get(EntityId(0)).unwrap().vel, Vec2::new(40.0, 0.0), 1e-6));

    handle_pointer(&mut ctx, PointerEvent::Release);
    advance_frame(&mut ctx, &mut display, 2);

    let thrown = ctx.store().get(EntityId(0)).unwrap();
    assert!(thrown.vel.x > 38.0);
    assert!(thrown.pos.x > 210.0);
    assert_eq!(display.translation(EntityId(0)), Some(thrown.pos - Vec2::splat(30.0)));
}

#[test]
fn test_leaving_container_ends_drag() {
    let mut ctx = two_entity_context();
    handle_pointer(&mut ctx, PointerEvent::Press(Vec2::new(300.0, 100.0)));

    let response = handle_pointer(&mut ctx, PointerEvent::Leave);

    assert_eq!(response, PointerResponse::DragEnded(EntityId(1)));
    assert_eq!(ctx.controller.dragged(), None);
    assert_eq!(handle_pointer(&mut ctx, PointerEvent::Release), PointerResponse::Ignored);
}

#[test]
fn test_click_on_entity_does_not_blast() {
    let mut ctx = two_entity_context();

    let response = handle_pointer(&mut ctx, PointerEvent::Click(Vec2::new(100.0, 100.0)));

    assert_eq!(response, PointerResponse::Ignored);
    assert!(ctx.store().iter().all(|e| e.vel == Vec2::ZERO));
}

#[test]
fn test_click_during_drag_does_not_blast() {
    let mut ctx = two_entity_context();
    handle_pointer(&mut ctx, PointerEvent::Press(Vec2::new(100.0, 100.0)));

    let response = handle_pointer(&mut ctx, PointerEvent::Click(Vec2::new(600.0, 500.0)));

    assert_eq!(response, PointerResponse::Ignored);
    assert_eq!(ctx.store().get(EntityId(1)).unwrap().vel, Vec2::ZERO);
}

#[test]
fn test_host_points_are_translated_to_local_space() {
    let mut ctx = two_entity_context();
    ctx.container.set_origin(Vec2::new(50.0, 20.0));

    let response = handle_pointer(&mut ctx, PointerEvent::Press(Vec2::new(150.0, 120.0)));

    assert_eq!(response, PointerResponse::DragStarted(EntityId(0)));
    assert_eq!(ctx.store().get(EntityId(0)).unwrap().pos, Vec2::new(100.0, 100.0));
}
