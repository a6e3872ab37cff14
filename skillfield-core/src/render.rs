//! Per-frame side channel from the simulation to whatever draws it
//!
//! The host re-renders its widgets on its own schedule. Positions only flow
//! through [`sync_display`], once per frame, after integration.

use crate::engine::{EntityId, EntityStore};
use glam::Vec2;
use log::trace;
use std::collections::HashMap;

/// Something that can place one visual element per entity
pub trait DisplayLayer {
    /// Move the element bound to `id` so its top-left corner sits at `translation`.
    ///
    /// Returns `false` if no element is bound to `id`.
    fn set_translation(&mut self, id: EntityId, translation: Vec2) -> bool;
}

/// Push every entity's position to the display layer.
///
/// Returns the number of elements updated. Missing elements are skipped.
pub fn sync_display(store: &EntityStore, layer: &mut dyn DisplayLayer) -> usize {
    let mut updated = 0;
    for entity in store.iter() {
        let translation = entity.pos - Vec2::splat(entity.radius());
        if layer.set_translation(entity.id(), translation) {
            updated += 1;
        } else {
            trace!("no display element for {}, skipping", entity.id());
        }
    }
    updated
}

/// Display layer that keeps the latest translation of every bound element
#[derive(Debug, Default, Clone)]
pub struct TranslationBuffer {
    elements: HashMap<EntityId, Vec2>,
}

impl TranslationBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A buffer with one element bound per entity in `store`
    pub fn bound_to(store: &EntityStore) -> Self {
        let mut buffer = Self::new();
        for entity in store.iter() {
            buffer.bind(entity.id());
        }
        buffer
    }

    pub fn bind(&mut self, id: EntityId) {
        self.elements.entry(id).or_insert(Vec2::ZERO);
    }

    pub fn unbind(&mut self, id: EntityId) {
        self.elements.remove(&id);
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn translation(&self, id: EntityId) -> Option<Vec2> {
        self.elements.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl DisplayLayer for TranslationBuffer {
    fn set_translation(&mut self, id: EntityId, translation: Vec2) -> bool {
        match self.elements.get_mut(&id) {
            Some(slot) => {
                *slot = translation;
                true
            }
            None => false,
        }
    }
}
