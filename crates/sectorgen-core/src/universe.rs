//! Universe - owns every sector of a topology and drives live updates

use rand::Rng;

use crate::config::{ConfigError, UniverseConfig};
use crate::context::WorldContext;
use crate::sector::Sector;
use crate::systems::SectorEvent;
use crate::topology::SectorId;

/// All sectors of one topology plus the shared context
pub struct Universe {
    ctx: WorldContext,
    sectors: Vec<Sector>,
    /// Seconds of live simulation since creation
    sim_time: f64,
}

impl Universe {
    /// One ungenerated sector per topology entry, in topology order
    pub fn new(ctx: WorldContext) -> Self {
        let sectors = ctx.topology.sectors.iter().cloned().map(Sector::new).collect();
        Self {
            ctx,
            sectors,
            sim_time: 0.0,
        }
    }

    /// Validate a JSON universe file and build from it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config = UniverseConfig::from_json(json)?;
        config.validate()?;
        Ok(Self::new(WorldContext::new(config)))
    }

    pub fn context(&self) -> &WorldContext {
        &self.ctx
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    pub fn sector(&self, id: &SectorId) -> Option<&Sector> {
        self.sectors.iter().find(|s| s.id() == id)
    }

    pub fn sector_mut(&mut self, id: &SectorId) -> Option<&mut Sector> {
        self.sectors.iter_mut().find(|s| s.id() == id)
    }

    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// Generate one sector on first visit. Returns false if the id is
    /// unknown or the sector was already generated.
    pub fn generate(&mut self, id: &SectorId) -> bool {
        let ctx = &self.ctx;
        match self.sectors.iter_mut().find(|s| s.id() == id) {
            Some(sector) => sector.generate(ctx),
            None => {
                log::warn!("generate: unknown sector {}", id);
                false
            }
        }
    }

    /// Generate every sector not yet generated. Returns how many were built.
    pub fn generate_all(&mut self) -> usize {
        let ctx = &self.ctx;
        let mut built = 0;
        for sector in self.sectors.iter_mut() {
            if sector.generate(ctx) {
                built += 1;
            }
        }
        built
    }

    /// Reset one sector so its next `generate` replays the seeded layout
    pub fn reset(&mut self, id: &SectorId) -> bool {
        match self.sector_mut(id) {
            Some(sector) => {
                sector.reset();
                true
            }
            None => false,
        }
    }

    /// Advance every sector by `dt` seconds using the thread-local RNG for
    /// respawns.
    pub fn update(&mut self, dt: f64) -> Vec<SectorEvent> {
        let mut rng = rand::thread_rng();
        self.update_with(dt, &mut rng)
    }

    /// Same as [`Universe::update`] with a caller-supplied ambient source
    pub fn update_with<R: Rng>(&mut self, dt: f64, rng: &mut R) -> Vec<SectorEvent> {
        self.sim_time += dt;
        let ctx = &self.ctx;
        let mut events = Vec::new();
        for sector in self.sectors.iter_mut() {
            events.extend(sector.update(dt, ctx, rng));
        }
        events
    }

    pub fn total_entities(&self) -> usize {
        self.sectors.iter().map(|s| s.entities().count_alive(None)).sum()
    }
}
