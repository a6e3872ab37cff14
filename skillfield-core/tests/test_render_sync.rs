//! Pushing positions to the display layer

use glam::Vec2;
use skillfield_core::tests::test_helpers::{container, store_with};
use skillfield_core::{
    step_simulation, sync_display, DisplayLayer, EntityId, PhysicsParams, SimulationContext,
    TranslationBuffer,
};

#[test]
fn test_translation_is_top_left_corner() {
    let store = store_with(&[(30.0, Vec2::new(100.0, 200.0), Vec2::ZERO)]);
    let mut display = TranslationBuffer::bound_to(&store);

    let updated = sync_display(&store, &mut display);

    assert_eq!(updated, 1);
    assert_eq!(display.translation(EntityId(0)), Some(Vec2::new(70.0, 170.0)));
}

#[test]
fn test_missing_elements_are_skipped() {
    let store = store_with(&[
        (30.0, Vec2::new(100.0, 200.0), Vec2::ZERO),
        (40.0, Vec2::new(300.0, 200.0), Vec2::ZERO),
    ]);
    let mut display = TranslationBuffer::new();
    display.bind(EntityId(0));

    let updated = sync_display(&store, &mut display);

    assert_eq!(updated, 1);
    assert_eq!(display.translation(EntityId(1)), None);
}

#[test]
fn test_unbound_element_mid_session_is_a_no_op() {
    let store = store_with(&[(30.0, Vec2::new(100.0, 200.0), Vec2::ZERO)]);
    let mut display = TranslationBuffer::bound_to(&store);
    display.unbind(EntityId(0));

    assert!(!display.set_translation(EntityId(0), Vec2::ONE));
    assert_eq!(sync_display(&store, &mut display), 0);
    assert!(display.is_empty());
}

#[test]
fn test_frame_syncs_post_integration_positions() {
    let store = store_with(&[(30.0, Vec2::new(400.0, 300.0), Vec2::ZERO)]);
    let mut ctx = SimulationContext::new(store, container(800.0, 600.0), PhysicsParams::default())
        .expect("context should build");
    let mut display = TranslationBuffer::bound_to(ctx.store());

    let cancelled = step_simulation(&mut ctx, &mut display);

    assert!(!cancelled);
    assert_eq!(ctx.frame, 1);
    let entity = ctx.store().get(EntityId(0)).unwrap();
    assert!(entity.pos.y > 300.0);
    assert_eq!(
        display.translation(EntityId(0)),
        Some(entity.pos - Vec2::splat(30.0))
    );
}
