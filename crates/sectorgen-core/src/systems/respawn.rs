//! Respawn system - keeps live sectors stocked with anomalies.
//!
//! Runs from `Sector::update`. Elapsed time accumulates until a check is
//! due; at most one check runs per update, after which the timer restarts.
//! Each check counts live anomalies against the sector's cap and, if
//! under it, rolls the spawn chance. New anomalies use the same type
//! selection as initial generation but draw from the caller's ambient
//! `rand` generator, not the sector's seeded stream: the initial layout
//! must be reproducible, live-world evolution does not have to be.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::components::{AnomalyKind, EntityId, EntityType, Vec2};
use crate::context::WorldContext;
use crate::generation::spawn_anomaly;
use crate::registry::EntityRegistry;
use crate::rng::{AmbientRng, RandomStream};
use crate::topology::SectorId;

/// Notification emitted when live content changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SectorEvent {
    AnomalySpawned {
        sector: SectorId,
        entity: EntityId,
        kind: AnomalyKind,
        position: Vec2,
    },
}

/// Periodic anomaly replenishment state for one sector
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RespawnScheduler {
    /// Seconds since the last check
    elapsed: f64,
    /// Checks run so far
    checks: u64,
}

impl RespawnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn checks(&self) -> u64 {
        self.checks
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance by `dt` seconds and run the check if it came due.
    ///
    /// A long `dt` still runs a single check. Non-finite or negative `dt`
    /// is ignored, and a non-positive check interval disables respawning.
    pub fn tick<R: Rng>(
        &mut self,
        dt: f64,
        sector: &SectorId,
        danger_level: f64,
        registry: &mut EntityRegistry,
        ctx: &WorldContext,
        rng: &mut R,
    ) -> Vec<SectorEvent> {
        let config = &ctx.respawn;
        let mut events = Vec::new();
        if config.check_interval <= 0.0 {
            return events;
        }
        if !dt.is_finite() || dt < 0.0 {
            log::warn!("sector {}: ignoring respawn tick with dt {}", sector, dt);
            return events;
        }

        self.elapsed += dt;
        if self.elapsed < config.check_interval {
            return events;
        }
        self.elapsed = 0.0;
        self.checks += 1;

        let live = registry.count_alive(Some(EntityType::Anomaly));
        let cap = config.anomaly_cap(danger_level) as usize;
        if live >= cap {
            log::debug!("sector {}: {} anomalies at cap {}", sector, live, cap);
            return events;
        }

        let mut ambient = AmbientRng(&mut *rng);
        if !ambient.chance(config.spawn_chance) {
            return events;
        }

        let anomaly = spawn_anomaly(&mut ambient, sector, danger_level, ctx, config.time_to_live);
        let position = anomaly.position;
        let kind = anomaly.as_anomaly().map(|a| a.kind.clone());
        let id = registry.add_entity(anomaly);

        if let Some(kind) = kind {
            log::info!(
                "sector {}: anomaly {} ({}) appeared at ({:.0}, {:.0})",
                sector,
                id,
                kind.name(),
                position.x,
                position.y
            );
            events.push(SectorEvent::AnomalySpawned {
                sector: sector.clone(),
                entity: id,
                kind,
                position,
            });
        }

        events
    }
}
