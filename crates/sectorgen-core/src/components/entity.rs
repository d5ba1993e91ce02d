//! Sector entities: the common envelope plus one payload per kind.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use super::common::Vec2;
use crate::topology::SectorId;

/// Registry-assigned entity identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Placeholder carried by entities that have not been added to a registry yet
    pub const UNASSIGNED: Self = Self(0);
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Type discriminator used by queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    CelestialBody,
    Asteroid,
    Station,
    WarpGate,
    Hostile,
    Anomaly,
}

impl EntityType {
    pub const ALL: [EntityType; 6] = [
        EntityType::CelestialBody,
        EntityType::Asteroid,
        EntityType::Station,
        EntityType::WarpGate,
        EntityType::Hostile,
        EntityType::Anomaly,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EntityType::CelestialBody => "celestial_body",
            EntityType::Asteroid => "asteroid",
            EntityType::Station => "station",
            EntityType::WarpGate => "warp_gate",
            EntityType::Hostile => "hostile",
            EntityType::Anomaly => "anomaly",
        }
    }
}

/// Any placed object in a sector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub position: Vec2,
    /// Dead entities are invisible to queries and dropped on the next purge
    pub alive: bool,
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(position: Vec2, kind: EntityKind) -> Self {
        Self {
            id: EntityId::UNASSIGNED,
            position,
            alive: true,
            kind,
        }
    }

    pub fn entity_type(&self) -> EntityType {
        match &self.kind {
            EntityKind::CelestialBody(_) => EntityType::CelestialBody,
            EntityKind::Asteroid(_) => EntityType::Asteroid,
            EntityKind::Station(_) => EntityType::Station,
            EntityKind::WarpGate(_) => EntityType::WarpGate,
            EntityKind::Hostile(_) => EntityType::Hostile,
            EntityKind::Anomaly(_) => EntityType::Anomaly,
        }
    }

    pub fn is_type(&self, entity_type: EntityType) -> bool {
        self.entity_type() == entity_type
    }

    /// Display name, for kinds that carry one
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            EntityKind::CelestialBody(b) => Some(&b.name),
            EntityKind::Station(s) => Some(&s.name),
            EntityKind::WarpGate(g) => Some(&g.name),
            EntityKind::Hostile(h) => Some(&h.name),
            EntityKind::Asteroid(_) | EntityKind::Anomaly(_) => None,
        }
    }

    /// Mark for removal; the registry drops it on its next update
    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Distance from the sector center
    pub fn distance_to_center(&self) -> f64 {
        self.position.length()
    }

    pub fn as_gate(&self) -> Option<&WarpGate> {
        match &self.kind {
            EntityKind::WarpGate(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_anomaly(&self) -> Option<&Anomaly> {
        match &self.kind {
            EntityKind::Anomaly(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_asteroid(&self) -> Option<&Asteroid> {
        match &self.kind {
            EntityKind::Asteroid(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_hostile(&self) -> Option<&Hostile> {
        match &self.kind {
            EntityKind::Hostile(h) => Some(h),
            _ => None,
        }
    }

    /// Advance the entity's own state by `dt` seconds.
    pub fn update(&mut self, dt: f64) {
        match &mut self.kind {
            EntityKind::Asteroid(asteroid) => {
                asteroid.rotation = (asteroid.rotation + asteroid.spin * dt).rem_euclid(TAU);
            }
            EntityKind::Anomaly(anomaly) => {
                anomaly.age += dt;
                if anomaly.is_expired() {
                    self.alive = false;
                }
            }
            EntityKind::CelestialBody(_)
            | EntityKind::Station(_)
            | EntityKind::WarpGate(_)
            | EntityKind::Hostile(_) => {}
        }
    }
}

/// Type-specific payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntityKind {
    CelestialBody(CelestialBody),
    Asteroid(Asteroid),
    Station(Station),
    WarpGate(WarpGate),
    Hostile(Hostile),
    Anomaly(Anomaly),
}

/// Kinds of dominant body at a sector's center
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CelestialKind {
    RockyPlanet,
    GasGiant,
    IceGiant,
    Star,
}

impl CelestialKind {
    pub const ALL: [CelestialKind; 4] = [
        CelestialKind::RockyPlanet,
        CelestialKind::GasGiant,
        CelestialKind::IceGiant,
        CelestialKind::Star,
    ];
}

/// The dominant body placed at the sector center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialBody {
    pub name: String,
    pub body_kind: CelestialKind,
    pub radius: f64,
    /// Cosmetic only
    pub has_rings: bool,
}

/// Harvestable resource subtypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Iron,
    Copper,
    Silicon,
    Titanium,
    Platinum,
    Crystal,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::Iron,
        ResourceKind::Copper,
        ResourceKind::Silicon,
        ResourceKind::Titanium,
        ResourceKind::Platinum,
        ResourceKind::Crystal,
    ];
}

/// A single harvestable rock belonging to a resource field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub resource: ResourceKind,
    pub size: f64,
    /// Index into the sector's `asteroid_fields`
    pub field_index: u32,
    /// Ore left to mine
    pub yield_remaining: f64,
    /// Visual rotation in radians
    pub rotation: f64,
    /// Radians per second
    pub spin: f64,
}

/// A docking station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    pub docking_radius: f64,
}

/// Bidirectional link to a neighbouring sector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarpGate {
    pub name: String,
    pub destination: SectorId,
    pub destination_name: String,
    /// Non-standard link, usually to a less predictable destination
    pub wormhole: bool,
}

/// Enemy tiers, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostileTier {
    Scout,
    Fighter,
    Gunship,
    Dreadnought,
}

impl HostileTier {
    /// Next tier up; the top tier stays where it is
    pub fn escalate(self) -> Self {
        match self {
            HostileTier::Scout => HostileTier::Fighter,
            HostileTier::Fighter => HostileTier::Gunship,
            HostileTier::Gunship | HostileTier::Dreadnought => HostileTier::Dreadnought,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HostileTier::Scout => "Scout",
            HostileTier::Fighter => "Fighter",
            HostileTier::Gunship => "Gunship",
            HostileTier::Dreadnought => "Dreadnought",
        }
    }
}

/// A hostile ship and its patrol route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hostile {
    pub name: String,
    pub tier: HostileTier,
    pub spawn_point: Vec2,
    pub patrol_point: Vec2,
}

/// Anomaly variants and their scaled fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum AnomalyKind {
    /// One-way jump to another known sector (`None` when no other sector exists)
    Wormhole { destination: Option<SectorId> },
    CombatSite { enemy_count: u32, reward: u32 },
    DataSite { reward: u32 },
    GasPocket { volume: f64 },
}

impl AnomalyKind {
    pub fn name(&self) -> &'static str {
        match self {
            AnomalyKind::Wormhole { .. } => "wormhole",
            AnomalyKind::CombatSite { .. } => "combat_site",
            AnomalyKind::DataSite { .. } => "data_site",
            AnomalyKind::GasPocket { .. } => "gas_pocket",
        }
    }
}

/// Transient point of interest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub kind: AnomalyKind,
    /// Seconds since spawn
    pub age: f64,
    /// Lifetime in seconds; `None` persists until consumed
    pub time_to_live: Option<f64>,
}

impl Anomaly {
    pub fn is_expired(&self) -> bool {
        self.time_to_live.is_some_and(|ttl| self.age >= ttl)
    }
}

/// Descriptor for one resource field, used for dust-cloud rendering only
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AsteroidField {
    /// Order in which the field was generated
    pub index: u32,
    pub center: Vec2,
    pub radius: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anomaly(ttl: Option<f64>) -> Entity {
        Entity::new(
            Vec2::new(10.0, 0.0),
            EntityKind::Anomaly(Anomaly {
                kind: AnomalyKind::DataSite { reward: 100 },
                age: 0.0,
                time_to_live: ttl,
            }),
        )
    }

    #[test]
    fn test_anomaly_expires() {
        let mut e = anomaly(Some(5.0));
        e.update(3.0);
        assert!(e.alive);
        e.update(2.0);
        assert!(!e.alive);
    }

    #[test]
    fn test_persistent_anomaly_never_expires() {
        let mut e = anomaly(None);
        for _ in 0..1000 {
            e.update(60.0);
        }
        assert!(e.alive);
    }

    #[test]
    fn test_asteroid_spin_wraps() {
        let mut e = Entity::new(
            Vec2::ZERO,
            EntityKind::Asteroid(Asteroid {
                resource: ResourceKind::Iron,
                size: 10.0,
                field_index: 0,
                yield_remaining: 100.0,
                rotation: 6.0,
                spin: 1.0,
            }),
        );
        e.update(1.0);
        let rotation = e.as_asteroid().map(|a| a.rotation).unwrap_or(-1.0);
        assert!((0.0..TAU).contains(&rotation));
        assert!((rotation - (7.0 - TAU)).abs() < 1e-9);
    }

    #[test]
    fn test_hostile_tier_escalation() {
        assert_eq!(HostileTier::Scout.escalate(), HostileTier::Fighter);
        assert_eq!(HostileTier::Gunship.escalate(), HostileTier::Dreadnought);
        assert_eq!(HostileTier::Dreadnought.escalate(), HostileTier::Dreadnought);
    }

    #[test]
    fn test_entity_type_discriminator() {
        let e = anomaly(None);
        assert_eq!(e.entity_type(), EntityType::Anomaly);
        assert!(e.is_type(EntityType::Anomaly));
        assert!(e.name().is_none());
        assert_eq!(e.id, EntityId::UNASSIGNED);
    }
}
