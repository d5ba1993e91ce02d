//! Name generation for stations, hostiles and bodies

use crate::components::{CelestialKind, HostileTier};
use crate::rng::RandomStream;

/// Station name built from the sector name and a random designation
pub fn station_name(rng: &mut impl RandomStream, sector_name: &str) -> String {
    let suffix = rng.pick(STATION_SUFFIXES).copied().unwrap_or("Station");
    format!("{} {}", sector_name, suffix)
}

/// Hostile callsign: faction, tier and hull number
pub fn hostile_name(rng: &mut impl RandomStream, tier: HostileTier) -> String {
    let faction = rng.pick(HOSTILE_FACTIONS).copied().unwrap_or("Raider");
    let hull = rng.int(1, 99);
    format!("{} {} {:02}", faction, tier.name(), hull)
}

/// Central body name; draws nothing
pub fn body_name(sector_name: &str, kind: CelestialKind) -> String {
    match kind {
        CelestialKind::Star => format!("{} Star", sector_name),
        CelestialKind::RockyPlanet | CelestialKind::GasGiant | CelestialKind::IceGiant => {
            format!("{} Prime", sector_name)
        }
    }
}

/// Gate label as shown on scanners
pub fn gate_name(destination_name: &str, wormhole: bool) -> String {
    if wormhole {
        format!("Wormhole to {}", destination_name)
    } else {
        format!("Gate to {}", destination_name)
    }
}

static STATION_SUFFIXES: &[&str] = &[
    "Station",
    "Outpost",
    "Depot",
    "Relay",
    "Hub",
    "Anchorage",
    "Citadel",
    "Terminal",
    "Exchange",
    "Refinery",
];

static HOSTILE_FACTIONS: &[&str] = &[
    "Raider",
    "Corsair",
    "Reaver",
    "Marauder",
    "Drifter",
    "Outlaw",
    "Vandal",
    "Scavenger",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededRng;

    #[test]
    fn test_station_name() {
        let mut rng = SeededRng::new(1);
        let name = station_name(&mut rng, "Vega");
        assert!(name.starts_with("Vega "));
    }

    #[test]
    fn test_hostile_name_is_deterministic() {
        let a = hostile_name(&mut SeededRng::new(9), HostileTier::Gunship);
        let b = hostile_name(&mut SeededRng::new(9), HostileTier::Gunship);
        assert_eq!(a, b);
        assert!(a.contains("Gunship"));
    }

    #[test]
    fn test_name_variety() {
        let mut rng = SeededRng::new(3);
        let names: std::collections::HashSet<String> = (0..100)
            .map(|_| hostile_name(&mut rng, HostileTier::Scout))
            .collect();
        assert!(names.len() > 10);
    }

    #[test]
    fn test_gate_name() {
        assert_eq!(gate_name("Sol", false), "Gate to Sol");
        assert_eq!(gate_name("Sol", true), "Wormhole to Sol");
    }
}
