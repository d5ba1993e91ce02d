//! Universe topology: known sectors and the gate edges between them.
//!
//! The generator only ever reads this graph. Missing or partial entries are
//! tolerated: omitted fields deserialize to defaults, edges to unknown
//! sectors still produce a gate, and lookups for unknown ids return `None`
//! so callers can fall back to safe defaults.

use serde::{Deserialize, Serialize};

use crate::config::DifficultyTier;

/// Stable sector identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectorId(pub String);

impl SectorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SectorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectorId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Position of a sector on the galaxy map grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Metadata for one sector as described by the topology
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorInfo {
    pub id: SectorId,
    #[serde(default)]
    pub name: String,
    /// Unknown coordinates make gates fall back to even angular spacing
    #[serde(default)]
    pub grid: Option<GridCoord>,
    #[serde(default)]
    pub tier: DifficultyTier,
    /// Continuous danger scalar, typically 0..1
    #[serde(default)]
    pub danger_level: f64,
    /// Explicit layout seed; derived from the id when omitted
    #[serde(default)]
    pub seed: Option<u32>,
    /// Whether the sector hosts a station
    #[serde(default)]
    pub station: bool,
}

impl SectorInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: SectorId::new(id),
            name: name.into(),
            grid: None,
            tier: DifficultyTier::default(),
            danger_level: 0.0,
            seed: None,
            station: false,
        }
    }

    pub fn with_grid(mut self, x: i32, y: i32) -> Self {
        self.grid = Some(GridCoord::new(x, y));
        self
    }

    pub fn with_tier(mut self, tier: DifficultyTier) -> Self {
        self.tier = tier;
        self
    }

    pub fn with_danger(mut self, danger_level: f64) -> Self {
        self.danger_level = danger_level;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_station(mut self, station: bool) -> Self {
        self.station = station;
        self
    }

    /// Display name, falling back to the id
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.id.as_str()
        } else {
            &self.name
        }
    }

    /// Layout seed: the explicit one, or a stable hash of the id
    pub fn layout_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| hash_id(self.id.as_str()))
    }
}

/// Gate link between two sectors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateEdge {
    pub from: SectorId,
    pub to: SectorId,
    #[serde(default)]
    pub wormhole: bool,
}

impl GateEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: SectorId::new(from),
            to: SectorId::new(to),
            wormhole: false,
        }
    }

    pub fn wormhole(mut self) -> Self {
        self.wormhole = true;
        self
    }

    pub fn touches(&self, id: &SectorId) -> bool {
        &self.from == id || &self.to == id
    }

    /// The endpoint opposite `id`
    pub fn other_end(&self, id: &SectorId) -> Option<&SectorId> {
        if &self.from == id {
            Some(&self.to)
        } else if &self.to == id {
            Some(&self.from)
        } else {
            None
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// One edge as seen from a particular sector
#[derive(Debug, Clone, PartialEq)]
pub struct Connection<'a> {
    pub destination: &'a SectorId,
    /// `None` when the destination is not a known sector
    pub info: Option<&'a SectorInfo>,
    pub wormhole: bool,
}

/// Sectors and gate edges of the universe
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    #[serde(default)]
    pub sectors: Vec<SectorInfo>,
    #[serde(default)]
    pub edges: Vec<GateEdge>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sector(mut self, sector: SectorInfo) -> Self {
        self.sectors.push(sector);
        self
    }

    pub fn with_edge(mut self, edge: GateEdge) -> Self {
        self.edges.push(edge);
        self
    }

    pub fn sector(&self, id: &SectorId) -> Option<&SectorInfo> {
        self.sectors.iter().find(|s| &s.id == id)
    }

    /// One connection per edge touching `id`, in edge order.
    /// Self-loops do not lead anywhere and are skipped.
    pub fn connections<'a>(&'a self, id: &'a SectorId) -> Vec<Connection<'a>> {
        self.edges
            .iter()
            .filter(|e| !e.is_self_loop())
            .filter_map(|e| {
                e.other_end(id).map(|dest| Connection {
                    destination: dest,
                    info: self.sector(dest),
                    wormhole: e.wormhole,
                })
            })
            .collect()
    }

    /// Every known sector except `id`, in topology order
    pub fn other_sectors<'a>(&'a self, id: &'a SectorId) -> impl Iterator<Item = &'a SectorInfo> {
        self.sectors.iter().filter(move |s| &s.id != id)
    }

    /// Layout seed for `id`: the sector's explicit seed, else a hash of the id.
    /// Unknown ids still get a stable seed.
    pub fn seed_for(&self, id: &SectorId) -> u32 {
        self.sector(id)
            .map_or_else(|| hash_id(id.as_str()), |s| s.layout_seed())
    }

    /// Self-loop edges touching `id`
    pub fn self_loops(&self, id: &SectorId) -> usize {
        self.edges
            .iter()
            .filter(|e| e.is_self_loop() && e.touches(id))
            .count()
    }
}

/// FNV-1a over the id bytes, so derived seeds are stable across platforms
pub fn hash_id(id: &str) -> u32 {
    let mut hash: u32 = 0x811c9dc5;
    for byte in id.bytes() {
        hash ^= byte as u32;
        hash = hash.wrapping_mul(0x01000193);
    }
    hash
}
