//! Entity construction.
//!
//! Generation stages resolve every random value first, then hand a typed
//! options struct to an [`EntityFactory`]. Collaborators that need to
//! decorate entities (attach render handles, rename things for a campaign)
//! supply their own factory through the world context; the default
//! [`StandardFactory`] maps options straight onto entity payloads.

use crate::components::*;
use crate::topology::SectorId;

/// Central body placement
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBodyOptions {
    pub name: String,
    pub body_kind: CelestialKind,
    /// Always the sector center in generated layouts
    pub position: Vec2,
    pub radius: f64,
    pub has_rings: bool,
}

/// One resource field member
#[derive(Debug, Clone, PartialEq)]
pub struct AsteroidOptions {
    pub position: Vec2,
    pub resource: ResourceKind,
    pub size: f64,
    pub field_index: u32,
    /// Initial ore yield
    pub yield_amount: f64,
    /// Radians per second, sign gives direction
    pub spin: f64,
}

/// Station placement
#[derive(Debug, Clone, PartialEq)]
pub struct StationOptions {
    pub name: String,
    pub position: Vec2,
    pub docking_radius: f64,
}

/// Gate placement and its link
#[derive(Debug, Clone, PartialEq)]
pub struct GateOptions {
    pub name: String,
    pub position: Vec2,
    pub destination: SectorId,
    pub destination_name: String,
    pub wormhole: bool,
}

/// Hostile spawn
#[derive(Debug, Clone, PartialEq)]
pub struct HostileOptions {
    pub name: String,
    pub position: Vec2,
    pub tier: HostileTier,
    pub patrol_point: Vec2,
}

/// Anomaly spawn
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalyOptions {
    pub position: Vec2,
    pub kind: AnomalyKind,
    /// `None` for anomalies that persist until consumed
    pub time_to_live: Option<f64>,
}

/// Constructors for each entity kind.
///
/// Implementations must not draw randomness; everything positional is
/// already resolved in the options.
pub trait EntityFactory {
    fn celestial_body(&self, opts: CelestialBodyOptions) -> Entity;
    fn asteroid(&self, opts: AsteroidOptions) -> Entity;
    fn station(&self, opts: StationOptions) -> Entity;
    fn gate(&self, opts: GateOptions) -> Entity;
    fn hostile(&self, opts: HostileOptions) -> Entity;
    fn anomaly(&self, opts: AnomalyOptions) -> Entity;
}

/// Plain-data factory
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFactory;

impl EntityFactory for StandardFactory {
    fn celestial_body(&self, opts: CelestialBodyOptions) -> Entity {
        Entity::new(
            opts.position,
            EntityKind::CelestialBody(CelestialBody {
                name: opts.name,
                body_kind: opts.body_kind,
                radius: opts.radius,
                has_rings: opts.has_rings,
            }),
        )
    }

    fn asteroid(&self, opts: AsteroidOptions) -> Entity {
        Entity::new(
            opts.position,
            EntityKind::Asteroid(Asteroid {
                resource: opts.resource,
                size: opts.size,
                field_index: opts.field_index,
                yield_remaining: opts.yield_amount,
                rotation: 0.0,
                spin: opts.spin,
            }),
        )
    }

    fn station(&self, opts: StationOptions) -> Entity {
        Entity::new(
            opts.position,
            EntityKind::Station(Station {
                name: opts.name,
                docking_radius: opts.docking_radius,
            }),
        )
    }

    fn gate(&self, opts: GateOptions) -> Entity {
        Entity::new(
            opts.position,
            EntityKind::WarpGate(WarpGate {
                name: opts.name,
                destination: opts.destination,
                destination_name: opts.destination_name,
                wormhole: opts.wormhole,
            }),
        )
    }

    fn hostile(&self, opts: HostileOptions) -> Entity {
        Entity::new(
            opts.position,
            EntityKind::Hostile(Hostile {
                name: opts.name,
                tier: opts.tier,
                spawn_point: opts.position,
                patrol_point: opts.patrol_point,
            }),
        )
    }

    fn anomaly(&self, opts: AnomalyOptions) -> Entity {
        Entity::new(
            opts.position,
            EntityKind::Anomaly(Anomaly {
                kind: opts.kind,
                age: 0.0,
                time_to_live: opts.time_to_live,
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hostile_remembers_spawn_point() {
        let e = StandardFactory.hostile(HostileOptions {
            name: "Raider".into(),
            position: Vec2::new(2000.0, 0.0),
            tier: HostileTier::Fighter,
            patrol_point: Vec2::new(2100.0, 50.0),
        });
        let hostile = e.as_hostile().expect("hostile payload");
        assert_eq!(hostile.spawn_point, e.position);
        assert_eq!(hostile.patrol_point, Vec2::new(2100.0, 50.0));
        assert!(e.alive);
    }

    #[test]
    fn test_gate_payload() {
        let e = StandardFactory.gate(GateOptions {
            name: "Gate to Vega".into(),
            position: Vec2::new(4500.0, 0.0),
            destination: SectorId::from("vega"),
            destination_name: "Vega".into(),
            wormhole: false,
        });
        assert_eq!(e.entity_type(), EntityType::WarpGate);
        assert_eq!(e.name(), Some("Gate to Vega"));
        assert_eq!(e.as_gate().map(|g| g.destination.as_str()), Some("vega"));
    }
}
