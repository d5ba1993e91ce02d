//! Live entity registry and spatial queries for one sector.
//!
//! Entities are stored in insertion order. Every query skips dead entities,
//! and `update` purges them once per tick after all entities have advanced,
//! never mid-iteration.
//!
//! Queries are linear scans over squared distances. That is fine for the
//! tens-to-hundreds of entities a sector holds; a spatial grid could sit
//! behind the same methods if populations grow.

use serde::{Deserialize, Serialize};

use crate::components::{Entity, EntityId, EntityType, Vec2};

/// Ordered container of a sector's entities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
    next_id: u32,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
        }
    }

    /// Append an entity, assigning it a fresh id
    pub fn add_entity(&mut self, mut entity: Entity) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        entity.id = id;
        self.entities.push(entity);
        id
    }

    /// Remove immediately, preserving the order of the rest
    pub fn remove_entity(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(index))
    }

    /// Mark an entity dead; it disappears from queries now and from storage
    /// on the next `update`. Returns false if the id is unknown.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        match self.get_mut(id) {
            Some(entity) => {
                entity.kill();
                true
            }
            None => false,
        }
    }

    /// Drop every entity and restart id assignment
    pub fn clear(&mut self) {
        self.entities.clear();
        self.next_id = 1;
    }

    /// Advance every live entity, then purge the dead ones.
    /// Returns how many entities were purged.
    pub fn update(&mut self, dt: f64) -> usize {
        for entity in self.entities.iter_mut().filter(|e| e.alive) {
            entity.update(dt);
        }
        let before = self.entities.len();
        self.entities.retain(|e| e.alive);
        before - self.entities.len()
    }

    /// Live entity by id
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id && e.alive)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id && e.alive)
    }

    /// Live entities in storage order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.alive)
    }

    /// Stored entity count, including dead ones awaiting purge
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn count_alive(&self, entity_type: Option<EntityType>) -> usize {
        self.iter()
            .filter(|e| entity_type.map_or(true, |t| e.is_type(t)))
            .count()
    }

    pub fn entities_by_type(&self, entity_type: EntityType) -> Vec<&Entity> {
        self.iter().filter(|e| e.is_type(entity_type)).collect()
    }

    pub fn stations(&self) -> Vec<&Entity> {
        self.entities_by_type(EntityType::Station)
    }

    pub fn gates(&self) -> Vec<&Entity> {
        self.entities_by_type(EntityType::WarpGate)
    }

    pub fn asteroids(&self) -> Vec<&Entity> {
        self.entities_by_type(EntityType::Asteroid)
    }

    pub fn hostiles(&self) -> Vec<&Entity> {
        self.entities_by_type(EntityType::Hostile)
    }

    pub fn anomalies(&self) -> Vec<&Entity> {
        self.entities_by_type(EntityType::Anomaly)
    }

    /// Closest live entity to `(x, y)`, optionally restricted to one type.
    /// Ties go to the entity stored first.
    pub fn find_nearest(&self, x: f64, y: f64, entity_type: Option<EntityType>) -> Option<&Entity> {
        let point = Vec2::new(x, y);
        let mut best: Option<(&Entity, f64)> = None;
        for entity in self.iter() {
            if entity_type.is_some_and(|t| !entity.is_type(t)) {
                continue;
            }
            let d2 = entity.position.distance_squared(&point);
            if best.map_or(true, |(_, best_d2)| d2 < best_d2) {
                best = Some((entity, d2));
            }
        }
        best.map(|(entity, _)| entity)
    }

    /// Live entities with `dx² + dy² <= radius²`, in storage order
    pub fn entities_in_radius(&self, x: f64, y: f64, radius: f64) -> Vec<&Entity> {
        let point = Vec2::new(x, y);
        let r2 = radius * radius;
        self.iter()
            .filter(|e| e.position.distance_squared(&point) <= r2)
            .collect()
    }
}
