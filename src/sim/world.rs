//! Entity storage with deferred removal
//!
//! Entities are owned by value and kept sorted by id. Removing an entity only
//! marks it dead and records it as pending; the actual sweep happens in
//! [`World::flush_removals`] at the end of the tick, so iteration within a
//! tick never sees a shifted collection.

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, EntityKind};
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// Fixed rectangular playing field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

impl Arena {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Whether a point lies inside or on the arena border
    pub fn contains(&self, point: Vec2) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }
}

/// Live entity collection for one session
#[derive(Debug, Clone, Default)]
pub struct World {
    /// Sorted by id
    entities: Vec<Entity>,
    /// Marked dead this tick, swept at tick end
    pending: BTreeSet<EntityId>,
    next_id: u32,
}

impl World {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            pending: BTreeSet::new(),
            next_id: 1,
        }
    }

    /// Insert an entity and return its freshly allocated id
    pub fn add_entity(&mut self, mut entity: Entity) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        entity.id = id;
        entity.alive = true;
        // Ids only grow, so pushing keeps the vec sorted
        self.entities.push(entity);
        id
    }

    /// Mark an entity dead. Returns false if it was already dead or unknown,
    /// so a second removal in the same tick is a no-op.
    pub fn remove_entity(&mut self, id: EntityId) -> bool {
        let Some(entity) = self.get_any_mut(id) else {
            return false;
        };
        if !entity.alive {
            return false;
        }
        entity.alive = false;
        self.pending.insert(id);
        true
    }

    /// Sweep entities removed during this tick
    pub fn flush_removals(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let pending = std::mem::take(&mut self.pending);
        self.entities.retain(|e| {
            debug_assert!(e.alive || pending.contains(&e.id), "dead entity {:?} was never queued", e.id);
            e.alive
        });
    }

    /// Number of entities waiting for the end-of-tick sweep
    pub fn pending_removals(&self) -> usize {
        self.pending.len()
    }

    /// Visit every live entity in id order
    pub fn for_each_entity(&self, mut visitor: impl FnMut(&Entity)) {
        for entity in self.entities.iter().filter(|e| e.alive) {
            visitor(entity);
        }
    }

    /// Live entities of one kind, in id order
    pub fn entities_of_kind(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.iter().filter(move |e| e.alive && e.kind() == kind)
    }

    /// Mutable access to every live entity
    pub fn iter_alive_mut(&mut self) -> impl Iterator<Item = &mut Entity> + '_ {
        self.entities.iter_mut().filter(|e| e.alive)
    }

    /// Live entity by id
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index_of(id).map(|i| &self.entities[i]).filter(|e| e.alive)
    }

    /// Live entity by id, mutable
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.index_of(id).map(|i| &mut self.entities[i]).filter(|e| e.alive)
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Live entity count
    pub fn len(&self) -> usize {
        self.entities.iter().filter(|e| e.alive).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get_any_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.index_of(id).map(|i| &mut self.entities[i])
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.binary_search_by_key(&id, |e| e.id).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Side, TargetKind};

    fn sample_world() -> (World, EntityId, EntityId, EntityId) {
        let mut world = World::new();
        let paddle = world.add_entity(Entity::paddle(Side::Left));
        let ball = world.add_entity(Entity::ball(Vec2::new(400.0, 300.0), Vec2::new(5.0, 5.0)));
        let target = world.add_entity(Entity::target(TargetKind::Circle, 3.0, Vec2::ZERO));
        (world, paddle, ball, target)
    }

    #[test]
    fn test_ids_are_ascending() {
        let (world, paddle, ball, target) = sample_world();
        assert!(paddle < ball && ball < target);
        let mut seen = Vec::new();
        world.for_each_entity(|e| seen.push(e.id));
        assert_eq!(seen, vec![paddle, ball, target]);
    }

    #[test]
    fn test_removal_is_deferred() {
        let (mut world, _, ball, _) = sample_world();

        assert!(world.remove_entity(ball));
        // Hidden from queries immediately, still stored until the sweep
        assert!(!world.is_alive(ball));
        assert_eq!(world.entities_of_kind(EntityKind::Ball).count(), 0);
        assert_eq!(world.pending_removals(), 1);
        assert_eq!(world.entities.len(), 3);

        world.flush_removals();
        assert_eq!(world.pending_removals(), 0);
        assert_eq!(world.entities.len(), 2);
        assert_eq!(world.len(), 2);
    }

    #[test]
    fn test_double_remove_is_noop() {
        let (mut world, _, _, target) = sample_world();
        assert!(world.remove_entity(target));
        assert!(!world.remove_entity(target));
        assert!(!world.remove_entity(EntityId(999)));
        world.flush_removals();
        assert!(world.get(target).is_none());
    }

    #[test]
    fn test_entities_of_kind() {
        let (mut world, paddle, _, _) = sample_world();
        world.add_entity(Entity::paddle(Side::Right));
        let paddles: Vec<_> = world.entities_of_kind(EntityKind::Paddle).map(|e| e.id).collect();
        assert_eq!(paddles.len(), 2);
        assert_eq!(paddles[0], paddle);
    }

    #[test]
    fn test_arena_contains() {
        let arena = Arena::default();
        assert_eq!(arena.center(), Vec2::new(400.0, 300.0));
        assert!(arena.contains(Vec2::new(0.0, 600.0)));
        assert!(!arena.contains(Vec2::new(-0.1, 10.0)));
        assert!(!arena.contains(Vec2::new(10.0, 600.1)));
    }
}
