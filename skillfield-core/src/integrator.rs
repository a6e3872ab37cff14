use crate::engine::{Container, Entity, EntityId, EntityStore};
use glam::Vec2;

/// Distances below this are treated as coincident when deriving a direction
pub const MIN_SEPARATION: f32 = 1e-4;

/// Tunable constants for one playground
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsParams {
    /// Added to `vel.y` every frame (px/frame²)
    pub gravity: f32,
    /// Velocity multiplier applied every frame
    pub friction: f32,
    /// Fraction of velocity kept (with flipped sign) after hitting a wall
    pub bounce: f32,
    /// Fraction of the positional correction applied as a velocity nudge
    pub collision_stiffness: f32,
    pub blast_strength: f32,
    pub blast_softening: f32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            gravity: 0.4,
            friction: 0.99,
            bounce: 0.7,
            collision_stiffness: 0.05,
            blast_strength: 8000.0,
            blast_softening: 50.0,
        }
    }
}

/// Overlap response between two entities
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Where the second entity's center would sit at exactly touching distance
    pub target: Vec2,
    /// Velocity added to the second entity and subtracted from the first
    pub nudge: Vec2,
}

/// Unit vector from `from` to `to`, or +X when the points coincide
pub(crate) fn direction_or_x(from: Vec2, to: Vec2) -> (Vec2, f32) {
    let delta = to - from;
    let dist = delta.length();
    if dist > MIN_SEPARATION {
        (delta / dist, dist)
    } else {
        (Vec2::X, dist)
    }
}

/// Soft contact between `a` and `b`, if their circles overlap
pub fn contact(a: &Entity, b: &Entity, stiffness: f32) -> Option<Contact> {
    let min_dist = a.radius() + b.radius();
    let (normal, dist) = direction_or_x(a.pos, b.pos);
    if dist >= min_dist {
        return None;
    }

    let target = a.pos + normal * min_dist;
    Some(Contact {
        target,
        nudge: (target - b.pos) * stiffness,
    })
}

/// Step the simulation forward by one frame.
///
/// `pinned` is the entity held by the pointer: it is neither moved nor nudged
/// here, but still pushes the others away.
pub fn step(
    store: &mut EntityStore,
    container: &Container,
    params: &PhysicsParams,
    pinned: Option<EntityId>,
) {
    for entity in store.iter_mut() {
        if Some(entity.id()) == pinned {
            continue;
        }

        entity.vel.y += params.gravity;
        entity.vel *= params.friction;
        entity.pos += entity.vel;

        resolve_boundaries(entity, container, params.bounce);
    }

    resolve_contacts(store, params.collision_stiffness, pinned);
}

/// Clamp an entity inside the container, reflecting velocity per axis
pub fn resolve_boundaries(entity: &mut Entity, container: &Container, bounce: f32) {
    let r = entity.radius();

    // Floor, then ceiling
    if entity.pos.y + r > container.height() {
        entity.pos.y = container.height() - r;
        entity.vel.y *= -bounce;
    }
    if entity.pos.y - r < 0.0 {
        entity.pos.y = r;
        entity.vel.y *= -bounce;
    }

    // Walls
    if entity.pos.x + r > container.width() {
        entity.pos.x = container.width() - r;
        entity.vel.x *= -bounce;
    }
    if entity.pos.x - r < 0.0 {
        entity.pos.x = r;
        entity.vel.x *= -bounce;
    }
}

/// Every unordered pair, O(n²)
fn resolve_contacts(store: &mut EntityStore, stiffness: f32, pinned: Option<EntityId>) {
    let entities = store.as_mut_slice();

    for j in 1..entities.len() {
        let (head, tail) = entities.split_at_mut(j);
        let b = &mut tail[0];
        for a in head.iter_mut() {
            let Some(hit) = contact(a, b, stiffness) else {
                continue;
            };
            if Some(a.id()) != pinned {
                a.vel -= hit.nudge;
            }
            if Some(b.id()) != pinned {
                b.vel += hit.nudge;
            }
        }
    }
}
