//! Central body and station placement

use crate::components::{CelestialKind, Vec2};
use crate::context::WorldContext;
use crate::factory::{CelestialBodyOptions, StationOptions};
use crate::rng::RandomStream;
use crate::topology::SectorInfo;

use super::names::{body_name, station_name};
use super::{point_in_band, SectorLayout};

/// Stage 0: one dominant body exactly at the sector center.
pub fn place_central_body(
    info: &SectorInfo,
    ctx: &WorldContext,
    rng: &mut impl RandomStream,
    layout: &mut SectorLayout,
) {
    let config = &ctx.generator;

    let body_kind = rng
        .pick(&CelestialKind::ALL)
        .copied()
        .unwrap_or(CelestialKind::RockyPlanet);
    let radius = rng.float(config.body_radius.min, config.body_radius.max);
    let has_rings = rng.chance(config.ring_chance);

    let body = ctx.factory().celestial_body(CelestialBodyOptions {
        name: body_name(info.display_name(), body_kind),
        body_kind,
        position: Vec2::ZERO,
        radius,
        has_rings,
    });

    layout.body_radius = radius;
    layout.entities.push(body);
}

/// Stage 2: optional station, clear of the central body.
///
/// Sectors without a station draw nothing here.
pub fn place_station(
    info: &SectorInfo,
    ctx: &WorldContext,
    rng: &mut impl RandomStream,
    layout: &mut SectorLayout,
) {
    if !info.station {
        return;
    }
    let config = &ctx.generator;
    let band = config.station_clearance.offset(layout.body_radius);

    let position = point_in_band(rng, band.min, band.max);
    let name = station_name(rng, info.display_name());

    layout.entities.push(ctx.factory().station(StationOptions {
        name,
        position,
        docking_radius: config.station_docking_radius,
    }));
}
