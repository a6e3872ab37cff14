use crate::error::{PlaygroundError, PlaygroundResult};
use glam::Vec2;
use std::fmt;

/// Base radius of an entity before its label is accounted for
pub const BASE_RADIUS: f32 = 30.0;
/// Extra radius per label character
pub const RADIUS_PER_CHAR: f32 = 2.5;

/// Radius of the circle that fits a rendered label
pub fn radius_for_label(label: &str) -> f32 {
    BASE_RADIUS + RADIUS_PER_CHAR * label.chars().count() as f32
}

/// Stable index of an entity inside its store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub usize);

impl EntityId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A labeled circle in the playground
#[derive(Debug, Clone)]
pub struct Entity {
    id: EntityId,
    radius: f32,
    label: String,
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Entity {
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether `point` lies inside this entity's circle
    pub fn contains(&self, point: Vec2) -> bool {
        self.pos.distance_squared(point) <= self.radius * self.radius
    }
}

/// Dense, fixed-order storage of every entity in a session
#[derive(Debug, Default, Clone)]
pub struct EntityStore {
    entities: Vec<Entity>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
        }
    }

    /// Add an entity whose radius is derived from its label
    pub fn spawn(&mut self, label: impl Into<String>, pos: Vec2, vel: Vec2) -> EntityId {
        let label = label.into();
        let radius = radius_for_label(&label);
        self.push(label, radius, pos, vel)
    }

    /// Add an entity with an explicit radius
    pub fn spawn_with_radius(
        &mut self,
        label: impl Into<String>,
        radius: f32,
        pos: Vec2,
        vel: Vec2,
    ) -> PlaygroundResult<EntityId> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(PlaygroundError::InvalidRadius(radius));
        }
        Ok(self.push(label.into(), radius, pos, vel))
    }

    fn push(&mut self, label: String, radius: f32, pos: Vec2, vel: Vec2) -> EntityId {
        let id = EntityId(self.entities.len());
        self.entities.push(Entity {
            id,
            radius,
            label,
            pos,
            vel,
        });
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.0)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    /// Topmost entity under `point` (later entities are drawn above earlier ones)
    pub fn hit_test(&self, point: Vec2) -> Option<EntityId> {
        self.entities
            .iter()
            .rev()
            .find(|entity| entity.contains(point))
            .map(Entity::id)
    }
}

/// The rectangle entities live in, in local pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Container {
    width: f32,
    height: f32,
    origin: Vec2,
}

impl Container {
    pub fn new(width: f32, height: f32) -> PlaygroundResult<Self> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(PlaygroundError::InvalidContainer { width, height });
        }
        Ok(Self {
            width,
            height,
            origin: Vec2::ZERO,
        })
    }

    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Move the container within the host frame; dimensions stay fixed
    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    /// Convert a host-frame point to local coordinates
    pub fn to_local(&self, point: Vec2) -> Vec2 {
        point - self.origin
    }

    /// Whether a circle of this radius can sit inside the container at all
    pub fn fits(&self, radius: f32) -> bool {
        2.0 * radius <= self.width && 2.0 * radius <= self.height
    }

    /// Clamp a circle center so the circle stays inside the container
    pub fn clamp_center(&self, center: Vec2, radius: f32) -> Vec2 {
        Vec2::new(
            center.x.clamp(radius, (self.width - radius).max(radius)),
            center.y.clamp(radius, (self.height - radius).max(radius)),
        )
    }
}
