//! Layout snapshots for determinism checks.
//!
//! A snapshot is the ordered `(type, x, y)` list of a sector's live
//! entities plus its field metadata. Two generations of the same seed and
//! configuration must produce equal snapshots. Snapshots are stored as JSON
//! golden files; the fingerprint is an FNV-1a hash over the compact bincode
//! encoding, handy for logs and quick comparisons.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::components::{AsteroidField, EntityType};
use crate::sector::Sector;
use crate::topology::SectorId;

/// One entity as recorded in a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub entity_type: EntityType,
    pub x: f64,
    pub y: f64,
}

/// Ordered record of a generated layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub sector: SectorId,
    pub seed: u32,
    pub entities: Vec<SnapshotEntry>,
    pub asteroid_fields: Vec<AsteroidField>,
}

impl LayoutSnapshot {
    pub fn capture(sector: &Sector) -> Self {
        Self {
            sector: sector.id().clone(),
            seed: sector.seed(),
            entities: sector
                .entities()
                .iter()
                .map(|e| SnapshotEntry {
                    entity_type: e.entity_type(),
                    x: e.position.x,
                    y: e.position.y,
                })
                .collect(),
            asteroid_fields: sector.asteroid_fields().to_vec(),
        }
    }

    pub fn count_of(&self, entity_type: EntityType) -> usize {
        self.entities
            .iter()
            .filter(|e| e.entity_type == entity_type)
            .count()
    }

    /// FNV-1a 64 over the bincode encoding
    pub fn fingerprint(&self) -> Result<u64, SnapshotError> {
        let bytes = bincode::serialize(self)?;
        let mut hash: u64 = 0xcbf29ce484222325;
        for byte in bytes {
            hash ^= byte as u64;
            hash = hash.wrapping_mul(0x100000001b3);
        }
        Ok(hash)
    }

    /// First difference against `other`, described for humans
    pub fn diff(&self, other: &LayoutSnapshot) -> Option<String> {
        if self.seed != other.seed {
            return Some(format!("seed {} != {}", self.seed, other.seed));
        }
        if self.entities.len() != other.entities.len() {
            return Some(format!(
                "entity count {} != {}",
                self.entities.len(),
                other.entities.len()
            ));
        }
        if let Some((i, (a, b))) = self
            .entities
            .iter()
            .zip(&other.entities)
            .enumerate()
            .find(|(_, (a, b))| a != b)
        {
            return Some(format!("entity {}: {:?} != {:?}", i, a, b));
        }
        if self.asteroid_fields != other.asteroid_fields {
            return Some("asteroid field metadata differs".to_string());
        }
        None
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn read_from(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

/// Errors that can occur reading or writing snapshots
#[derive(Debug)]
pub enum SnapshotError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Bincode(Box<bincode::ErrorKind>),
}

impl From<std::io::Error> for SnapshotError {
    fn from(e: std::io::Error) -> Self {
        SnapshotError::Io(e)
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(e: serde_json::Error) -> Self {
        SnapshotError::Json(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SnapshotError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SnapshotError::Bincode(e)
    }
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::Io(e) => write!(f, "IO error: {}", e),
            SnapshotError::Json(e) => write!(f, "JSON error: {}", e),
            SnapshotError::Bincode(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for SnapshotError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DifficultyTier;
    use crate::context::WorldContext;
    use crate::topology::SectorInfo;

    fn generated(seed: u32) -> Sector {
        let ctx = WorldContext::default();
        let mut sector = Sector::new(
            SectorInfo::new("golden", "Golden")
                .with_seed(seed)
                .with_tier(DifficultyTier::Dangerous),
        );
        sector.generate(&ctx);
        sector
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let a = generated(42).snapshot();
        let b = generated(42).snapshot();
        assert_eq!(a.fingerprint().ok(), b.fingerprint().ok());
        assert!(a.diff(&b).is_none());
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = generated(42).snapshot();
        let b = generated(43).snapshot();
        assert_ne!(a.fingerprint().ok(), b.fingerprint().ok());
        assert!(a.diff(&b).is_some());
    }

    #[test]
    fn test_json_roundtrip_preserves_positions() {
        let snap = generated(42).snapshot();
        let json = snap.to_json().expect("serialize snapshot");
        let back = LayoutSnapshot::from_json(&json).expect("parse snapshot");
        assert!(snap.diff(&back).is_none(), "{:?}", snap.diff(&back));
    }

    #[test]
    fn test_golden_file_on_disk() {
        let snap = generated(7).snapshot();
        let path = std::env::temp_dir().join(format!("sectorgen-golden-{}.json", std::process::id()));
        snap.write_to(&path).expect("write golden");
        let loaded = LayoutSnapshot::read_from(&path).expect("read golden");
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, snap);
    }
}
