//! Pointer handling: drag-and-throw for a single entity, blast for the rest
//!
//! Events arrive in the host's reference frame and are translated into the
//! container's local space before any hit test.

use crate::engine::{Container, EntityId, EntityStore};
use crate::integrator::{direction_or_x, PhysicsParams};
use glam::Vec2;
use log::debug;

/// Fraction of a pointer move used as the throw estimate between frames
pub const MOVE_VELOCITY_DAMPING: f32 = 0.5;

/// Pointer input from the host, in host-frame coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press(Vec2),
    Move(Vec2),
    Release,
    Leave,
    Click(Vec2),
}

/// What the controller did with an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerResponse {
    Ignored,
    /// The press landed on an entity; the host must not treat it as a blast
    DragStarted(EntityId),
    Dragged(EntityId),
    DragEnded(EntityId),
    Blast { affected: usize },
}

impl PointerResponse {
    /// Whether the event was consumed by an entity and must not propagate
    pub fn captured(&self) -> bool {
        matches!(
            self,
            PointerResponse::DragStarted(_)
                | PointerResponse::Dragged(_)
                | PointerResponse::DragEnded(_)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        id: EntityId,
        /// Entity position as of the previous frame
        previous: Vec2,
    },
}

#[derive(Debug, Default)]
pub struct InteractionController {
    state: DragState,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn dragged(&self) -> Option<EntityId> {
        match self.state {
            DragState::Dragging { id, .. } => Some(id),
            DragState::Idle => None,
        }
    }

    pub fn handle(
        &mut self,
        event: PointerEvent,
        store: &mut EntityStore,
        container: &Container,
        params: &PhysicsParams,
    ) -> PointerResponse {
        match event {
            PointerEvent::Press(p) => self.press(container.to_local(p), store, container),
            PointerEvent::Move(p) => self.drag_to(container.to_local(p), store, container),
            PointerEvent::Release | PointerEvent::Leave => self.release(),
            PointerEvent::Click(p) => self.click(container.to_local(p), store, params),
        }
    }

    fn press(&mut self, point: Vec2, store: &mut EntityStore, container: &Container) -> PointerResponse {
        if self.dragged().is_some() {
            return PointerResponse::Ignored;
        }
        let Some(id) = store.hit_test(point) else {
            return PointerResponse::Ignored;
        };
        let Some(entity) = store.get_mut(id) else {
            return PointerResponse::Ignored;
        };

        entity.pos = container.clamp_center(point, entity.radius());
        entity.vel = Vec2::ZERO;
        self.state = DragState::Dragging {
            id,
            previous: entity.pos,
        };
        debug!("drag started on {} '{}'", id, entity.label());
        PointerResponse::DragStarted(id)
    }

    fn drag_to(&mut self, point: Vec2, store: &mut EntityStore, container: &Container) -> PointerResponse {
        let DragState::Dragging { id, .. } = self.state else {
            return PointerResponse::Ignored;
        };
        let Some(entity) = store.get_mut(id) else {
            // The entity vanished with its store; drop the drag
            self.state = DragState::Idle;
            return PointerResponse::Ignored;
        };

        let target = container.clamp_center(point, entity.radius());
        entity.vel = (target - entity.pos) * MOVE_VELOCITY_DAMPING;
        entity.pos = target;
        PointerResponse::Dragged(id)
    }

    fn release(&mut self) -> PointerResponse {
        match std::mem::take(&mut self.state) {
            DragState::Dragging { id, .. } => {
                debug!("drag released on {}", id);
                PointerResponse::DragEnded(id)
            }
            DragState::Idle => PointerResponse::Ignored,
        }
    }

    fn click(&mut self, point: Vec2, store: &mut EntityStore, params: &PhysicsParams) -> PointerResponse {
        if self.dragged().is_some() || store.hit_test(point).is_some() {
            return PointerResponse::Ignored;
        }
        let affected = apply_blast(store, point, params);
        debug!("blast at ({:.1}, {:.1}) moved {} entities", point.x, point.y, affected);
        PointerResponse::Blast { affected }
    }

    /// Derive the held entity's throw velocity from its motion since the last frame
    pub fn track_frame(&mut self, store: &mut EntityStore) {
        let DragState::Dragging { id, previous } = &mut self.state else {
            return;
        };
        if let Some(entity) = store.get_mut(*id) {
            entity.vel = entity.pos - *previous;
            *previous = entity.pos;
        }
    }
}

/// Push every entity radially away from `point`, weaker with distance.
///
/// Returns the number of entities affected.
pub fn apply_blast(store: &mut EntityStore, point: Vec2, params: &PhysicsParams) -> usize {
    let mut affected = 0;
    for entity in store.iter_mut() {
        let (dir, dist) = direction_or_x(point, entity.pos);
        let force = params.blast_strength / (dist + params.blast_softening);
        entity.vel += dir * force;
        affected += 1;
    }
    affected
}
