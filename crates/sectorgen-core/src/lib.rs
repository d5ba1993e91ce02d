//! SectorGen Core - deterministic procedural sectors for a space game.
//!
//! A sector's initial layout is a pure function of its seed, its metadata
//! and the world context: the same inputs always produce the same ordered
//! list of entities at the same positions. After generation, a sector is a
//! live registry that ages, purges and replenishes its contents.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`rng`] | mulberry32 stream, derived distributions, ambient adapter |
//! | [`components`] | Vectors, bands, entities and their payloads |
//! | [`config`] | Difficulty/abundance tables, generator and respawn constants |
//! | [`topology`] | Sector metadata and the gate graph |
//! | [`factory`] | Entity construction seam |
//! | [`context`] | Read-only world inputs passed into every call |
//! | [`generation`] | The six ordered placement stages |
//! | [`registry`] | Live entity storage and linear spatial queries |
//! | [`systems`] | Live-world systems (anomaly respawn) |
//! | [`sector`] | Generate/reset/update lifecycle of one sector |
//! | [`universe`] | All sectors of a topology, lazy generation, ticking |
//! | [`snapshot`] | Ordered layout records and golden files |
//!
//! # Example
//!
//! ```rust,no_run
//! use sectorgen_core::prelude::*;
//!
//! let json = std::fs::read_to_string("data/universe.json").unwrap();
//! let mut universe = Universe::from_json(&json).unwrap();
//!
//! // Generate on first visit
//! universe.generate(&SectorId::from("sol"));
//!
//! // Live play
//! loop {
//!     for event in universe.update(1.0 / 60.0) {
//!         println!("{:?}", event);
//!     }
//! }
//! ```

pub mod components;
pub mod config;
pub mod context;
pub mod factory;
pub mod generation;
pub mod registry;
pub mod rng;
pub mod sector;
pub mod snapshot;
pub mod systems;
pub mod topology;
pub mod universe;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::config::{DifficultyTier, UniverseConfig};
    pub use crate::context::WorldContext;
    pub use crate::registry::EntityRegistry;
    pub use crate::rng::{RandomStream, SeededRng};
    pub use crate::sector::Sector;
    pub use crate::snapshot::LayoutSnapshot;
    pub use crate::systems::SectorEvent;
    pub use crate::topology::{SectorId, SectorInfo, Topology};
    pub use crate::universe::Universe;
}
