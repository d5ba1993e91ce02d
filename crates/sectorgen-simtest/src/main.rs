//! SectorGen Headless Harness
//!
//! Generates every sector of a universe file and validates layout
//! invariants, determinism and live-play behaviour. Runs entirely
//! in-process with no rendering.
//!
//! Usage:
//!   cargo run -p sectorgen-simtest
//!   cargo run -p sectorgen-simtest -- --verbose
//!   cargo run -p sectorgen-simtest -- --universe path/to/universe.json
//!   cargo run -p sectorgen-simtest -- --write-golden data/golden/
//!   cargo run -p sectorgen-simtest -- --check-golden data/golden/
//!   cargo run -p sectorgen-simtest -- --json

use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;
use sectorgen_core::config::{SeedMode, UniverseConfig};
use sectorgen_core::prelude::*;

// ── Bundled universe (same file the integration tests use) ─────────────
const UNIVERSE_JSON: &str = include_str!("../../../data/universe.json");

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn new(name: impl Into<String>, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed,
            detail: detail.into(),
        }
    }
}

struct Options {
    verbose: bool,
    json: bool,
    universe: Option<PathBuf>,
    write_golden: Option<PathBuf>,
    check_golden: Option<PathBuf>,
}

impl Options {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let value_of = |flag: &str| {
            args.iter()
                .position(|a| a == flag)
                .and_then(|i| args.get(i + 1))
                .map(PathBuf::from)
        };
        Self {
            verbose: args.iter().any(|a| a == "--verbose"),
            json: args.iter().any(|a| a == "--json"),
            universe: value_of("--universe"),
            write_golden: value_of("--write-golden"),
            check_golden: value_of("--check-golden"),
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let opts = Options::from_args();
    println!("=== SectorGen Harness ===\n");

    let mut results = Vec::new();

    // 1. Universe file
    let config = match load_config(opts.universe.as_deref()) {
        Ok(config) => {
            results.push(TestResult::new(
                "universe_load",
                true,
                format!("{} sectors, {} edges", config.topology.sectors.len(), config.topology.edges.len()),
            ));
            config
        }
        Err(detail) => {
            results.push(TestResult::new("universe_load", false, detail));
            report(&results, opts.verbose);
            std::process::exit(1);
        }
    };

    // 2. Layout invariants
    results.extend(validate_layouts(&config, opts.verbose));

    // 3. Gates against the topology
    results.extend(validate_gates(&config, opts.verbose));

    // 4. Determinism across runs, reset and seed modes
    results.extend(validate_determinism(&config, opts.verbose));

    // 5. Live play: expiry, purge, respawn cap
    results.extend(validate_live_play(&config, opts.verbose));

    // 6. Golden files
    if let Some(dir) = &opts.write_golden {
        results.extend(write_golden(&config, dir));
    }
    if let Some(dir) = &opts.check_golden {
        results.extend(check_golden(&config, dir));
    }

    if opts.json {
        print_json_summary(&config);
    }

    let failed = report(&results, opts.verbose);
    if failed > 0 {
        std::process::exit(1);
    }
}

fn report(results: &[TestResult], verbose: bool) -> usize {
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.len() - passed;

    for r in results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed,
        results.len(),
        failed
    );
    failed
}

fn load_config(path: Option<&Path>) -> Result<UniverseConfig, String> {
    let config = match path {
        Some(path) => UniverseConfig::from_path(path),
        None => UniverseConfig::from_json(UNIVERSE_JSON),
    }
    .map_err(|e| e.to_string())?;
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

/// Band check with slack for polar placements, which round through cos/sin
fn within(band: DistanceBand, distance: f64) -> bool {
    distance >= band.min - 1e-6 && distance <= band.max + 1e-6
}

fn generated_universe(config: &UniverseConfig) -> Universe {
    let mut universe = Universe::new(WorldContext::new(config.clone()));
    universe.generate_all();
    universe
}

// ── 2. Layout invariants ────────────────────────────────────────────────

fn validate_layouts(config: &UniverseConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Layouts ---");
    let mut results = Vec::new();
    let universe = generated_universe(config);
    let generator = &config.generator;

    for sector in universe.sectors() {
        let id = sector.id();
        let reg = sector.entities();
        let profile = config.tables.difficulty.profile(sector.tier());

        if verbose {
            println!(
                "  {} ({}, seed {}): {} entities, {} fields",
                id,
                sector.tier().name(),
                sector.seed(),
                reg.len(),
                sector.asteroid_fields().len()
            );
        }

        let bodies = reg.count_alive(Some(EntityType::CelestialBody));
        results.push(TestResult::new(
            format!("{}_central_body", id),
            bodies == 1,
            format!("{} central bodies", bodies),
        ));

        let density = profile.asteroid_density;
        let expected_asteroids =
            generator.field_count(density) as usize * generator.asteroids_per_field(density) as usize;
        let asteroids = reg.asteroids();
        results.push(TestResult::new(
            format!("{}_asteroid_count", id),
            asteroids.len() == expected_asteroids
                && sector.asteroid_fields().len() == generator.field_count(density) as usize,
            format!("{} asteroids, expected {}", asteroids.len(), expected_asteroids),
        ));

        let band = generator.resource_distance;
        let stray = asteroids
            .iter()
            .filter(|a| !band.contains_point(&a.position))
            .count();
        results.push(TestResult::new(
            format!("{}_asteroid_band", id),
            stray == 0,
            format!("{} asteroids outside {:.0}..{:.0}", stray, band.min, band.max),
        ));

        let hostiles = reg.hostiles();
        let band = generator.hostile_distance;
        let stray = hostiles
            .iter()
            .filter(|h| !within(band, h.distance_to_center()))
            .count();
        results.push(TestResult::new(
            format!("{}_hostiles", id),
            hostiles.len() == profile.enemy_count as usize && stray == 0,
            format!(
                "{} hostiles (expected {}), {} outside band",
                hostiles.len(),
                profile.enemy_count,
                stray
            ),
        ));

        let stations = reg.stations().len();
        results.push(TestResult::new(
            format!("{}_station", id),
            stations == usize::from(sector.info().station),
            format!("{} stations, flagged {}", stations, sector.info().station),
        ));

        let anomalies = reg.anomalies().len();
        let expected = generator.anomalies.count_for(sector.danger_level()) as usize;
        results.push(TestResult::new(
            format!("{}_anomalies", id),
            anomalies == expected,
            format!("{} anomalies, expected {}", anomalies, expected),
        ));
    }

    results
}

// ── 3. Gates ────────────────────────────────────────────────────────────

fn validate_gates(config: &UniverseConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Gates ---");
    let mut results = Vec::new();
    let universe = generated_universe(config);
    let topology = &config.topology;

    for sector in universe.sectors() {
        let id = sector.id();
        let mut expected: Vec<String> = topology
            .connections(id)
            .iter()
            .map(|c| c.destination.to_string())
            .collect();
        let gates = sector.entities().gates();
        let mut actual: Vec<String> = gates
            .iter()
            .filter_map(|g| g.as_gate().map(|gate| gate.destination.to_string()))
            .collect();
        expected.sort();
        actual.sort();

        if verbose {
            println!("  {} -> {}", id, actual.join(", "));
        }

        results.push(TestResult::new(
            format!("{}_gate_edges", id),
            expected == actual,
            format!("gates {:?}, edges {:?}", actual, expected),
        ));

        let off_ring = gates
            .iter()
            .filter(|g| (g.distance_to_center() - config.generator.gate_distance).abs() > 1e-6)
            .count();
        results.push(TestResult::new(
            format!("{}_gate_distance", id),
            off_ring == 0,
            format!("{} gates off the {:.0} ring", off_ring, config.generator.gate_distance),
        ));
    }

    results
}

// ── 4. Determinism ──────────────────────────────────────────────────────

fn validate_determinism(config: &UniverseConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Determinism ---");
    let mut results = Vec::new();

    let first = generated_universe(config);
    let second = generated_universe(config);
    for (a, b) in first.sectors().iter().zip(second.sectors()) {
        let (sa, sb) = (a.snapshot(), b.snapshot());
        let diff = sa.diff(&sb);
        if verbose {
            if let Ok(fp) = sa.fingerprint() {
                println!("  {} fingerprint {:016x}", a.id(), fp);
            }
        }
        results.push(TestResult::new(
            format!("{}_repeatable", a.id()),
            diff.is_none(),
            diff.unwrap_or_else(|| format!("{} entities identical", sa.entities.len())),
        ));
    }

    // Reset after live play replays the seeded layout
    let mut universe = generated_universe(config);
    let initial: Vec<LayoutSnapshot> = universe.sectors().iter().map(|s| s.snapshot()).collect();
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..600 {
        universe.update_with(1.0, &mut rng);
    }
    let ids: Vec<SectorId> = universe.sectors().iter().map(|s| s.id().clone()).collect();
    let mut mismatched = Vec::new();
    for (id, before) in ids.iter().zip(&initial) {
        universe.reset(id);
        universe.generate(id);
        if universe.sector(id).map(|s| s.snapshot()).as_ref() != Some(before) {
            mismatched.push(id.to_string());
        }
    }
    results.push(TestResult::new(
        "reset_replays_layout",
        mismatched.is_empty(),
        if mismatched.is_empty() {
            "all sectors replayed after reset".to_string()
        } else {
            format!("mismatch in {}", mismatched.join(", "))
        },
    ));

    // Per-stage seeding is repeatable too
    let mut per_stage = config.clone();
    per_stage.generator.seed_mode = SeedMode::PerStage;
    let a = generated_universe(&per_stage);
    let b = generated_universe(&per_stage);
    let same = a
        .sectors()
        .iter()
        .zip(b.sectors())
        .all(|(x, y)| x.snapshot() == y.snapshot());
    results.push(TestResult::new(
        "per_stage_repeatable",
        same,
        "per-stage sub-generators produce identical layouts",
    ));

    results
}

// ── 5. Live play ────────────────────────────────────────────────────────

fn validate_live_play(config: &UniverseConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Live play ---");
    let mut results = Vec::new();
    let mut universe = generated_universe(config);
    let mut rng = StdRng::seed_from_u64(42);

    // Consume every generated anomaly so respawn has room to work
    let ids: Vec<SectorId> = universe.sectors().iter().map(|s| s.id().clone()).collect();
    for id in &ids {
        if let Some(sector) = universe.sector_mut(id) {
            let anomalies: Vec<EntityId> = sector.entities().anomalies().iter().map(|e| e.id).collect();
            for anomaly in anomalies {
                sector.entities_mut().despawn(anomaly);
            }
        }
    }

    let mut over_cap = 0;
    let mut spawned = 0;
    let mut dead_visible = 0;
    for _ in 0..3600 {
        spawned += universe.update_with(1.0, &mut rng).len();
        for sector in universe.sectors() {
            let cap = config.respawn.anomaly_cap(sector.danger_level()) as usize;
            if sector.entities().anomalies().len() > cap {
                over_cap += 1;
            }
            dead_visible += sector.entities().len() - sector.entities().count_alive(None);
        }
    }

    if verbose {
        println!("  {} anomalies respawned over one hour", spawned);
    }

    results.push(TestResult::new(
        "respawn_cap",
        over_cap == 0,
        format!("{} ticks over cap", over_cap),
    ));
    results.push(TestResult::new(
        "respawn_active",
        spawned > 0,
        format!("{} anomalies respawned", spawned),
    ));
    results.push(TestResult::new(
        "dead_purged",
        dead_visible == 0,
        format!("{} dead entities left after update", dead_visible),
    ));

    results
}

// ── 6. Golden files ─────────────────────────────────────────────────────

fn golden_path(dir: &Path, id: &SectorId) -> PathBuf {
    dir.join(format!("{}.json", id))
}

fn write_golden(config: &UniverseConfig, dir: &Path) -> Vec<TestResult> {
    println!("--- Writing golden files to {} ---", dir.display());
    if let Err(e) = std::fs::create_dir_all(dir) {
        return vec![TestResult::new("golden_write", false, e.to_string())];
    }
    let universe = generated_universe(config);
    universe
        .sectors()
        .iter()
        .map(|sector| {
            let path = golden_path(dir, sector.id());
            match sector.snapshot().write_to(&path) {
                Ok(()) => TestResult::new(
                    format!("{}_golden_write", sector.id()),
                    true,
                    path.display().to_string(),
                ),
                Err(e) => TestResult::new(format!("{}_golden_write", sector.id()), false, e.to_string()),
            }
        })
        .collect()
}

fn check_golden(config: &UniverseConfig, dir: &Path) -> Vec<TestResult> {
    println!("--- Checking golden files in {} ---", dir.display());
    let universe = generated_universe(config);
    universe
        .sectors()
        .iter()
        .map(|sector| {
            let name = format!("{}_golden", sector.id());
            match LayoutSnapshot::read_from(golden_path(dir, sector.id())) {
                Ok(golden) => {
                    let diff = sector.snapshot().diff(&golden);
                    TestResult::new(
                        name,
                        diff.is_none(),
                        diff.unwrap_or_else(|| "matches golden".to_string()),
                    )
                }
                Err(e) => TestResult::new(name, false, e.to_string()),
            }
        })
        .collect()
}

fn print_json_summary(config: &UniverseConfig) {
    let universe = generated_universe(config);
    let sectors: Vec<serde_json::Value> = universe
        .sectors()
        .iter()
        .map(|s| {
            let snap = s.snapshot();
            serde_json::json!({
                "id": s.id(),
                "tier": s.tier(),
                "seed": s.seed(),
                "fingerprint": snap.fingerprint().ok().map(|fp| format!("{:016x}", fp)),
                "counts": EntityType::ALL
                    .iter()
                    .map(|t| (t.name().to_string(), snap.count_of(*t)))
                    .collect::<std::collections::BTreeMap<_, _>>(),
            })
        })
        .collect();
    match serde_json::to_string_pretty(&sectors) {
        Ok(text) => println!("{}", text),
        Err(e) => log::error!("failed to encode summary: {}", e),
    }
}
