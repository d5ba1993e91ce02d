//! Hostile spawns.

use crate::context::WorldContext;
use crate::factory::HostileOptions;
use crate::rng::RandomStream;
use crate::topology::SectorInfo;

use super::names::hostile_name;
use super::{point_in_band, SectorLayout};

/// Stage 4: hostiles from the tier's enemy count.
///
/// Per hostile, in draw order: escalation roll, spawn angle and distance,
/// patrol offset, name. The escalation roll is drawn even when the chance
/// is zero so the stream length does not depend on table values.
pub fn place_hostiles(
    info: &SectorInfo,
    ctx: &WorldContext,
    rng: &mut impl RandomStream,
    layout: &mut SectorLayout,
) {
    let config = &ctx.generator;
    let profile = ctx.difficulty(info.tier);

    for _ in 0..profile.enemy_count {
        let tier = if rng.chance(profile.escalation_chance) {
            profile.base_tier.escalate()
        } else {
            profile.base_tier
        };
        let position = point_in_band(rng, config.hostile_distance.min, config.hostile_distance.max);
        let patrol_point = position + rng.point_in_circle(config.patrol_radius);
        let name = hostile_name(rng, tier);

        layout.entities.push(ctx.factory().hostile(HostileOptions {
            name,
            position,
            tier,
            patrol_point,
        }));
    }
}
