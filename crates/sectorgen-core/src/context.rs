//! World context handed to generation and live updates.
//!
//! Holds the read-only inputs a sector is built from: topology, content
//! tables, generator constants, respawn settings and the entity factory.
//! It is passed explicitly into every call that needs it.

use crate::config::{
    ConfigError, ContentTables, DifficultyProfile, DifficultyTier, GeneratorConfig,
    RespawnConfig, UniverseConfig,
};
use crate::factory::{EntityFactory, StandardFactory};
use crate::topology::Topology;

/// Immutable inputs for building and running sectors
pub struct WorldContext {
    pub topology: Topology,
    pub tables: ContentTables,
    pub generator: GeneratorConfig,
    pub respawn: RespawnConfig,
    factory: Box<dyn EntityFactory>,
}

impl WorldContext {
    /// Build a context that uses [`StandardFactory`]
    pub fn new(config: UniverseConfig) -> Self {
        Self {
            topology: config.topology,
            tables: config.tables,
            generator: config.generator,
            respawn: config.respawn,
            factory: Box::new(StandardFactory),
        }
    }

    /// Default tables and constants over the given topology
    pub fn with_topology(topology: Topology) -> Self {
        Self::new(UniverseConfig {
            topology,
            ..Default::default()
        })
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(Self::new(UniverseConfig::from_json(json)?))
    }

    /// Replace the entity factory
    pub fn with_factory(mut self, factory: Box<dyn EntityFactory>) -> Self {
        self.factory = factory;
        self
    }

    pub fn factory(&self) -> &dyn EntityFactory {
        self.factory.as_ref()
    }

    pub fn difficulty(&self, tier: DifficultyTier) -> &DifficultyProfile {
        self.tables.difficulty.profile(tier)
    }
}

impl Default for WorldContext {
    fn default() -> Self {
        Self::new(UniverseConfig::default())
    }
}

impl std::fmt::Debug for WorldContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorldContext")
            .field("topology", &self.topology)
            .field("tables", &self.tables)
            .field("generator", &self.generator)
            .field("respawn", &self.respawn)
            .finish_non_exhaustive()
    }
}
