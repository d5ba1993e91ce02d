//! Sector - one playable region and its live contents.

use rand::Rng;

use crate::components::AsteroidField;
use crate::config::DifficultyTier;
use crate::context::WorldContext;
use crate::generation::generate_layout;
use crate::registry::EntityRegistry;
use crate::rng::SeededRng;
use crate::snapshot::LayoutSnapshot;
use crate::systems::{RespawnScheduler, SectorEvent};
use crate::topology::{SectorId, SectorInfo};

/// A sector: metadata, seeded generator, live registry and respawn state.
///
/// `generate` runs once; later calls are no-ops until `reset`.
#[derive(Debug, Clone)]
pub struct Sector {
    info: SectorInfo,
    rng: SeededRng,
    generated: bool,
    entities: EntityRegistry,
    asteroid_fields: Vec<AsteroidField>,
    respawn: RespawnScheduler,
}

impl Sector {
    pub fn new(info: SectorInfo) -> Self {
        let rng = SeededRng::new(info.layout_seed());
        Self {
            info,
            rng,
            generated: false,
            entities: EntityRegistry::new(),
            asteroid_fields: Vec::new(),
            respawn: RespawnScheduler::new(),
        }
    }

    pub fn info(&self) -> &SectorInfo {
        &self.info
    }

    pub fn id(&self) -> &SectorId {
        &self.info.id
    }

    pub fn name(&self) -> &str {
        self.info.display_name()
    }

    pub fn seed(&self) -> u32 {
        self.rng.seed()
    }

    pub fn tier(&self) -> DifficultyTier {
        self.info.tier
    }

    pub fn danger_level(&self) -> f64 {
        self.info.danger_level
    }

    pub fn is_generated(&self) -> bool {
        self.generated
    }

    pub fn entities(&self) -> &EntityRegistry {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut EntityRegistry {
        &mut self.entities
    }

    /// Field metadata for dust-cloud rendering; not part of the entity set
    pub fn asteroid_fields(&self) -> &[AsteroidField] {
        &self.asteroid_fields
    }

    pub fn respawn(&self) -> &RespawnScheduler {
        &self.respawn
    }

    /// Populate the sector from its seed. Returns false (and does nothing)
    /// if it was already generated.
    pub fn generate(&mut self, ctx: &WorldContext) -> bool {
        if self.generated {
            return false;
        }

        self.rng.reset();
        let layout = generate_layout(&self.info, ctx, &mut self.rng);
        for entity in layout.entities {
            self.entities.add_entity(entity);
        }
        self.asteroid_fields = layout.asteroid_fields;
        self.generated = true;

        log::info!(
            "Generated sector {} ({}, seed {}): {} entities, {} fields",
            self.info.id,
            self.info.tier.name(),
            self.seed(),
            self.entities.len(),
            self.asteroid_fields.len()
        );
        true
    }

    /// Drop all content and rewind the seeded stream so the next
    /// `generate` reproduces the original layout.
    pub fn reset(&mut self) {
        self.entities.clear();
        self.asteroid_fields.clear();
        self.rng.reset();
        self.respawn.reset();
        self.generated = false;
    }

    /// Advance live entities by `dt` seconds, purge the dead, then run
    /// the respawn check with the ambient `rng`.
    pub fn update<R: Rng>(&mut self, dt: f64, ctx: &WorldContext, rng: &mut R) -> Vec<SectorEvent> {
        let purged = self.entities.update(dt);
        if purged > 0 {
            log::debug!("sector {}: purged {} dead entities", self.info.id, purged);
        }
        if !self.generated {
            return Vec::new();
        }
        self.respawn.tick(
            dt,
            &self.info.id,
            self.info.danger_level,
            &mut self.entities,
            ctx,
            rng,
        )
    }

    /// Ordered position list for determinism checks
    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot::capture(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::EntityType;
    use crate::config::UniverseConfig;
    use crate::topology::{GateEdge, Topology};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ctx() -> WorldContext {
        WorldContext::new(UniverseConfig {
            topology: Topology::new()
                .with_sector(
                    SectorInfo::new("kepler", "Kepler")
                        .with_grid(0, 0)
                        .with_tier(DifficultyTier::Dangerous)
                        .with_danger(0.6)
                        .with_seed(42)
                        .with_station(true),
                )
                .with_sector(SectorInfo::new("tau", "Tau").with_grid(1, 1))
                .with_edge(GateEdge::new("kepler", "tau")),
            ..Default::default()
        })
    }

    #[test]
    fn test_generate_is_idempotent() {
        let ctx = ctx();
        let mut sector = Sector::new(ctx.topology.sectors[0].clone());
        assert!(!sector.is_generated());
        assert!(sector.generate(&ctx));
        let count = sector.entities().len();
        assert!(!sector.generate(&ctx));
        assert_eq!(sector.entities().len(), count);
    }

    #[test]
    fn test_reset_reproduces_layout() {
        let ctx = ctx();
        let mut sector = Sector::new(ctx.topology.sectors[0].clone());
        sector.generate(&ctx);
        let first = sector.snapshot();

        sector.reset();
        assert!(!sector.is_generated());
        assert!(sector.entities().is_empty());
        assert!(sector.asteroid_fields().is_empty());

        sector.generate(&ctx);
        assert_eq!(sector.snapshot(), first);
        assert_eq!(sector.seed(), 42);
    }

    #[test]
    fn test_generated_contents() {
        let ctx = ctx();
        let mut sector = Sector::new(ctx.topology.sectors[0].clone());
        sector.generate(&ctx);
        let reg = sector.entities();

        assert_eq!(reg.count_alive(Some(EntityType::CelestialBody)), 1);
        assert_eq!(reg.asteroids().len(), 420);
        assert_eq!(sector.asteroid_fields().len(), 12);
        assert_eq!(reg.stations().len(), 1);
        assert_eq!(reg.gates().len(), 1);
        assert_eq!(reg.hostiles().len(), 6);
        // 1 + floor(0.6 * 3)
        assert_eq!(reg.anomalies().len(), 2);
    }

    #[test]
    fn test_ungenerated_sector_does_not_respawn() {
        let ctx = ctx();
        let mut sector = Sector::new(ctx.topology.sectors[0].clone());
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert!(sector.update(30.0, &ctx, &mut rng).is_empty());
        }
        assert!(sector.entities().is_empty());
    }

    #[test]
    fn test_update_respects_anomaly_cap() {
        let ctx = ctx();
        let mut sector = Sector::new(ctx.topology.sectors[0].clone());
        sector.generate(&ctx);
        let mut rng = StdRng::seed_from_u64(9);
        let cap = ctx.respawn.anomaly_cap(sector.danger_level()) as usize;
        for _ in 0..1000 {
            sector.update(1.5, &ctx, &mut rng);
            assert!(sector.entities().anomalies().len() <= cap);
        }
    }
}
