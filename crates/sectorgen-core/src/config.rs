//! Content tables and generator constants.
//!
//! Everything here is configuration data: difficulty profiles, resource
//! abundance, and the numeric bands the generation stages place things in.
//! Each table has a `Default` carrying the built-in balance values, and
//! every field may be omitted from JSON.
//!
//! Tables are assumed to be validated once at load time ([`ContentTables::validate`]);
//! generation never re-checks them.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::components::{DistanceBand, HostileTier, ResourceKind};
use crate::rng::RandomStream;
use crate::topology::Topology;

/// Tolerance for abundance weights summing to 1.0
pub const ABUNDANCE_SUM_TOLERANCE: f64 = 0.01;

/// Named difficulty category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyTier {
    Safe,
    #[default]
    Normal,
    Dangerous,
    Deadly,
}

impl DifficultyTier {
    pub const ALL: [DifficultyTier; 4] = [
        DifficultyTier::Safe,
        DifficultyTier::Normal,
        DifficultyTier::Dangerous,
        DifficultyTier::Deadly,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DifficultyTier::Safe => "safe",
            DifficultyTier::Normal => "normal",
            DifficultyTier::Dangerous => "dangerous",
            DifficultyTier::Deadly => "deadly",
        }
    }
}

/// Per-tier generation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Scales resource field count and field population
    pub asteroid_density: f64,
    pub enemy_count: u32,
    /// Chance that a hostile is bumped one tier above `base_tier`
    #[serde(default)]
    pub escalation_chance: f64,
    #[serde(default = "default_base_tier")]
    pub base_tier: HostileTier,
}

fn default_base_tier() -> HostileTier {
    HostileTier::Scout
}

impl DifficultyProfile {
    pub fn new(asteroid_density: f64, enemy_count: u32) -> Self {
        Self {
            asteroid_density,
            enemy_count,
            escalation_chance: 0.0,
            base_tier: HostileTier::Scout,
        }
    }

    pub fn with_escalation(mut self, base_tier: HostileTier, chance: f64) -> Self {
        self.base_tier = base_tier;
        self.escalation_chance = chance;
        self
    }
}

/// Difficulty profile for every tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTable {
    pub safe: DifficultyProfile,
    pub normal: DifficultyProfile,
    pub dangerous: DifficultyProfile,
    pub deadly: DifficultyProfile,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            safe: DifficultyProfile::new(0.3, 0),
            normal: DifficultyProfile::new(0.5, 3).with_escalation(HostileTier::Scout, 0.1),
            dangerous: DifficultyProfile::new(0.8, 6).with_escalation(HostileTier::Fighter, 0.3),
            deadly: DifficultyProfile::new(1.0, 10).with_escalation(HostileTier::Gunship, 0.5),
        }
    }
}

impl DifficultyTable {
    pub fn profile(&self, tier: DifficultyTier) -> &DifficultyProfile {
        match tier {
            DifficultyTier::Safe => &self.safe,
            DifficultyTier::Normal => &self.normal,
            DifficultyTier::Dangerous => &self.dangerous,
            DifficultyTier::Deadly => &self.deadly,
        }
    }
}

/// One resource subtype and its relative weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbundanceEntry {
    pub resource: ResourceKind,
    pub weight: f64,
}

/// Ordered resource abundance table; weights should sum to about 1.0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AbundanceTable {
    pub entries: Vec<AbundanceEntry>,
}

impl Default for AbundanceTable {
    fn default() -> Self {
        Self::from_weights(&[
            (ResourceKind::Iron, 0.40),
            (ResourceKind::Copper, 0.25),
            (ResourceKind::Silicon, 0.15),
            (ResourceKind::Titanium, 0.10),
            (ResourceKind::Platinum, 0.06),
            (ResourceKind::Crystal, 0.04),
        ])
    }
}

impl AbundanceTable {
    pub fn from_weights(weights: &[(ResourceKind, f64)]) -> Self {
        Self {
            entries: weights
                .iter()
                .map(|&(resource, weight)| AbundanceEntry { resource, weight })
                .collect(),
        }
    }

    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    pub fn weight_of(&self, resource: ResourceKind) -> f64 {
        self.entries
            .iter()
            .filter(|e| e.resource == resource)
            .map(|e| e.weight)
            .sum()
    }

    /// Cumulative roll: one draw, walk the entries until the draw falls
    /// under the running total. Weights are not normalized; a gap left by
    /// rounding resolves to the last entry. An empty table yields iron.
    pub fn roll(&self, rng: &mut impl RandomStream) -> ResourceKind {
        let roll = rng.next();
        let mut acc = 0.0;
        for entry in &self.entries {
            acc += entry.weight;
            if roll < acc {
                return entry.resource;
            }
        }
        self.entries
            .last()
            .map(|e| e.resource)
            .unwrap_or(ResourceKind::Iron)
    }
}

/// Difficulty and abundance tables consumed by the generator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentTables {
    pub difficulty: DifficultyTable,
    pub abundance: AbundanceTable,
}

impl ContentTables {
    /// Check table sanity. Collects every problem into one error.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();

        if self.abundance.entries.is_empty() {
            problems.push("abundance table is empty".to_string());
        }
        for entry in &self.abundance.entries {
            if entry.weight < 0.0 {
                problems.push(format!("abundance weight for {:?} is negative", entry.resource));
            }
        }
        let total = self.abundance.total_weight();
        if (total - 1.0).abs() > ABUNDANCE_SUM_TOLERANCE {
            problems.push(format!("abundance weights sum to {:.4}, expected 1.0", total));
        }

        for tier in DifficultyTier::ALL {
            let profile = self.difficulty.profile(tier);
            if profile.asteroid_density < 0.0 {
                problems.push(format!("{} asteroid_density is negative", tier.name()));
            }
            if !(0.0..=1.0).contains(&profile.escalation_chance) {
                problems.push(format!("{} escalation_chance outside 0..1", tier.name()));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::InvalidTable(problems.join("; ")))
        }
    }
}

/// How resource field centers are spread around the central body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldPlacement {
    /// Even base angles plus jitter; every side of the sector gets coverage
    #[default]
    EvenlySpaced,
    /// Independent uniform angles
    Uniform,
}

/// How stages draw from the seeded stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedMode {
    /// One stream shared by all stages in fixed order
    #[default]
    Sequential,
    /// Each stage gets its own sub-generator seeded from `(seed, stage)`
    PerStage,
}

/// Anomaly count, type thresholds and reward scaling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnomalyConfig {
    pub base_count: u32,
    pub count_per_danger: f64,
    pub distance: DistanceBand,
    /// Draw below this is a wormhole
    pub wormhole_threshold: f64,
    /// Draw below this (and danger at least `combat_min_danger`) is a combat site
    pub combat_threshold: f64,
    pub combat_min_danger: f64,
    /// Draw below this is a data site; anything else is a gas pocket
    pub data_threshold: f64,
    pub combat_enemy_base: f64,
    pub combat_enemy_per_danger: f64,
    pub combat_reward_base: f64,
    pub combat_reward_per_danger: f64,
    pub data_reward_base: f64,
    pub data_reward_per_danger: f64,
    pub gas_volume_base: f64,
    pub gas_volume_per_danger: f64,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            base_count: 1,
            count_per_danger: 3.0,
            distance: DistanceBand::new(1000.0, 4200.0),
            wormhole_threshold: 0.15,
            combat_threshold: 0.50,
            combat_min_danger: 0.3,
            data_threshold: 0.75,
            combat_enemy_base: 2.0,
            combat_enemy_per_danger: 6.0,
            combat_reward_base: 500.0,
            combat_reward_per_danger: 1500.0,
            data_reward_base: 200.0,
            data_reward_per_danger: 600.0,
            gas_volume_base: 200.0,
            gas_volume_per_danger: 300.0,
        }
    }
}

impl AnomalyConfig {
    /// `base + floor(danger * per_danger)`
    pub fn count_for(&self, danger_level: f64) -> u32 {
        self.base_count + (danger_level.max(0.0) * self.count_per_danger).floor() as u32
    }
}

/// Numeric constants for every generation stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub sector_radius: f64,

    pub body_radius: DistanceBand,
    pub ring_chance: f64,

    /// Field count is `floor(field_base + density * field_per_density)`
    pub field_base: f64,
    pub field_per_density: f64,
    /// Members per field are `floor(asteroid_base + density * asteroid_per_density)`
    pub asteroid_base: f64,
    pub asteroid_per_density: f64,
    pub field_placement: FieldPlacement,
    /// Max angular jitter (radians) around an evenly spaced base angle
    pub field_angle_jitter: f64,
    pub field_distance: DistanceBand,
    pub field_radius: DistanceBand,
    /// Every asteroid ends up inside this band
    pub resource_distance: DistanceBand,
    pub asteroid_size: DistanceBand,
    pub asteroid_max_spin: f64,
    pub yield_per_size: f64,

    /// Added to the central body radius
    pub station_clearance: DistanceBand,
    pub station_docking_radius: f64,

    pub gate_distance: f64,

    pub hostile_distance: DistanceBand,
    pub patrol_radius: f64,

    pub anomalies: AnomalyConfig,

    pub seed_mode: SeedMode,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            sector_radius: 5000.0,
            body_radius: DistanceBand::new(300.0, 600.0),
            ring_chance: 0.5,
            field_base: 6.0,
            field_per_density: 8.0,
            asteroid_base: 15.0,
            asteroid_per_density: 25.0,
            field_placement: FieldPlacement::EvenlySpaced,
            field_angle_jitter: 0.25,
            field_distance: DistanceBand::new(1200.0, 3800.0),
            field_radius: DistanceBand::new(200.0, 500.0),
            resource_distance: DistanceBand::new(900.0, 4300.0),
            asteroid_size: DistanceBand::new(8.0, 40.0),
            asteroid_max_spin: 0.5,
            yield_per_size: 10.0,
            station_clearance: DistanceBand::new(600.0, 1000.0),
            station_docking_radius: 150.0,
            gate_distance: 4500.0,
            hostile_distance: DistanceBand::new(1500.0, 4000.0),
            patrol_radius: 300.0,
            anomalies: AnomalyConfig::default(),
            seed_mode: SeedMode::Sequential,
        }
    }
}

impl GeneratorConfig {
    /// `floor(field_base + density * field_per_density)`
    pub fn field_count(&self, density: f64) -> u32 {
        (self.field_base + density * self.field_per_density).floor().max(0.0) as u32
    }

    /// `floor(asteroid_base + density * asteroid_per_density)`
    pub fn asteroids_per_field(&self, density: f64) -> u32 {
        (self.asteroid_base + density * self.asteroid_per_density)
            .floor()
            .max(0.0) as u32
    }

    /// Check that every band is ordered and fits inside the sector
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();
        let bands = [
            ("body_radius", self.body_radius),
            ("field_distance", self.field_distance),
            ("field_radius", self.field_radius),
            ("resource_distance", self.resource_distance),
            ("asteroid_size", self.asteroid_size),
            ("station_clearance", self.station_clearance),
            ("hostile_distance", self.hostile_distance),
            ("anomalies.distance", self.anomalies.distance),
        ];
        for (name, band) in bands {
            if band.min > band.max {
                problems.push(format!("{} min {} exceeds max {}", name, band.min, band.max));
            }
            if band.min < 0.0 {
                problems.push(format!("{} is negative", name));
            }
        }
        for (name, distance) in [
            ("resource_distance", self.resource_distance.max),
            ("hostile_distance", self.hostile_distance.max),
            ("anomalies.distance", self.anomalies.distance.max),
            ("gate_distance", self.gate_distance),
        ] {
            if distance > self.sector_radius {
                problems.push(format!("{} reaches outside the sector radius", name));
            }
        }
        if self.hostile_distance.min <= self.body_radius.max {
            problems.push("hostile_distance overlaps the central body".to_string());
        }
        let a = &self.anomalies;
        if !(a.wormhole_threshold <= a.combat_threshold && a.combat_threshold <= a.data_threshold) {
            problems.push("anomaly thresholds must be non-decreasing".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::InvalidTable(problems.join("; ")))
        }
    }
}

/// Live-world anomaly replenishment settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RespawnConfig {
    /// Seconds between population checks
    pub check_interval: f64,
    /// Chance per check that an under-cap sector gets a new anomaly
    pub spawn_chance: f64,
    /// Lifetime of respawned anomalies in seconds
    pub time_to_live: Option<f64>,
    /// Cap is `cap_base + floor(danger * cap_per_danger)`
    pub cap_base: u32,
    pub cap_per_danger: f64,
}

impl Default for RespawnConfig {
    fn default() -> Self {
        Self {
            check_interval: 30.0,
            spawn_chance: 0.5,
            time_to_live: Some(600.0),
            cap_base: 1,
            cap_per_danger: 3.0,
        }
    }
}

impl RespawnConfig {
    pub fn anomaly_cap(&self, danger_level: f64) -> u32 {
        self.cap_base + (danger_level.max(0.0) * self.cap_per_danger).floor() as u32
    }
}

/// Everything a universe is built from, as stored in `universe.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UniverseConfig {
    pub topology: Topology,
    pub tables: ContentTables,
    pub generator: GeneratorConfig,
    pub respawn: RespawnConfig,
}

impl UniverseConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate tables and generator bands together
    pub fn validate(&self) -> Result<(), ConfigError> {
        let problems: Vec<String> = [self.tables.validate(), self.generator.validate()]
            .into_iter()
            .filter_map(|r| r.err())
            .map(|e| e.to_string())
            .collect();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::InvalidTable(problems.join("; ")))
        }
    }
}

/// Errors that can occur while loading configuration
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
    InvalidTable(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Json(e) => write!(f, "JSON error: {}", e),
            ConfigError::InvalidTable(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            ConfigError::InvalidTable(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededRng;

    #[test]
    fn test_default_tables_are_valid() {
        let tables = ContentTables::default();
        assert!(tables.validate().is_ok());
        assert!((tables.abundance.total_weight() - 1.0).abs() < 1e-9);
        assert!(GeneratorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_abundance_chi_square() {
        let table = AbundanceTable::default();
        let mut rng = SeededRng::new(7);
        let n = 10_000;
        let mut counts = std::collections::HashMap::new();
        for _ in 0..n {
            *counts.entry(table.roll(&mut rng)).or_insert(0u32) += 1;
        }

        let chi_square: f64 = table
            .entries
            .iter()
            .map(|e| {
                let expected = e.weight * n as f64;
                let observed = *counts.get(&e.resource).unwrap_or(&0) as f64;
                (observed - expected).powi(2) / expected
            })
            .sum();
        // 5 degrees of freedom, p = 0.001
        assert!(chi_square < 20.515, "chi-square {chi_square}");
    }

    #[test]
    fn test_abundance_gap_falls_back_to_last() {
        let table = AbundanceTable::from_weights(&[
            (ResourceKind::Iron, 0.0),
            (ResourceKind::Crystal, 0.0),
        ]);
        let mut rng = SeededRng::new(1);
        assert_eq!(table.roll(&mut rng), ResourceKind::Crystal);
    }

    #[test]
    fn test_invalid_abundance_rejected() {
        let mut tables = ContentTables::default();
        tables.abundance = AbundanceTable::from_weights(&[
            (ResourceKind::Iron, 0.7),
            (ResourceKind::Copper, 0.7),
        ]);
        let err = tables.validate().unwrap_err();
        assert!(err.to_string().contains("sum to 1.4000"));
    }

    #[test]
    fn test_field_formulas() {
        let config = GeneratorConfig::default();
        assert_eq!(config.field_count(0.8), 12);
        assert_eq!(config.asteroids_per_field(0.8), 35);
        assert_eq!(config.field_count(0.0), 6);
        assert_eq!(config.anomalies.count_for(0.5), 2);
        assert_eq!(config.anomalies.count_for(-1.0), 1);
    }

    #[test]
    fn test_anomaly_cap() {
        let respawn = RespawnConfig::default();
        assert_eq!(respawn.anomaly_cap(0.0), 1);
        assert_eq!(respawn.anomaly_cap(0.34), 2);
        assert_eq!(respawn.anomaly_cap(1.0), 4);
    }

    #[test]
    fn test_universe_config_partial_json() {
        let json = r#"{
            "tables": { "difficulty": { "safe": { "asteroid_density": 0.1, "enemy_count": 0 } } },
            "generator": { "gate_distance": 4000.0 }
        }"#;
        let config = UniverseConfig::from_json(json).expect("partial config should parse");
        assert_eq!(config.tables.difficulty.safe.asteroid_density, 0.1);
        assert_eq!(config.tables.difficulty.deadly.enemy_count, 10);
        assert_eq!(config.generator.gate_distance, 4000.0);
        assert_eq!(config.generator.field_base, 6.0);
        assert!(config.topology.sectors.is_empty());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let err = UniverseConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_generator_validate_catches_inverted_band() {
        let config = GeneratorConfig {
            hostile_distance: DistanceBand::new(4000.0, 1500.0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
