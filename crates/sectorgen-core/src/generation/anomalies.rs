//! Anomaly placement and type selection.
//!
//! The same selection runs at generation time (seeded stream) and during
//! live play (ambient source, see `systems::respawn`).

use crate::components::{AnomalyKind, Entity};
use crate::config::AnomalyConfig;
use crate::context::WorldContext;
use crate::factory::AnomalyOptions;
use crate::rng::RandomStream;
use crate::topology::{SectorId, SectorInfo};

use super::{point_in_band, SectorLayout};

/// Stage 5: `base + floor(danger * per_danger)` anomalies.
///
/// Generated anomalies persist until a collaborator consumes them.
pub fn place_anomalies(
    info: &SectorInfo,
    ctx: &WorldContext,
    rng: &mut impl RandomStream,
    layout: &mut SectorLayout,
) {
    let count = ctx.generator.anomalies.count_for(info.danger_level);
    for _ in 0..count {
        let anomaly = spawn_anomaly(rng, &info.id, info.danger_level, ctx, None);
        layout.entities.push(anomaly);
    }
}

/// Build one anomaly: position first, then type.
pub fn spawn_anomaly(
    rng: &mut impl RandomStream,
    sector: &SectorId,
    danger_level: f64,
    ctx: &WorldContext,
    time_to_live: Option<f64>,
) -> Entity {
    let config = &ctx.generator.anomalies;
    let position = point_in_band(rng, config.distance.min, config.distance.max);
    let destinations: Vec<&SectorId> = ctx.topology.other_sectors(sector).map(|s| &s.id).collect();
    let kind = roll_anomaly_kind(rng, danger_level, &destinations, config);

    ctx.factory().anomaly(AnomalyOptions {
        position,
        kind,
        time_to_live,
    })
}

/// Pick an anomaly type from one draw using sequential thresholds:
/// wormhole, then combat site (only at or above the minimum danger), then
/// data site, else gas pocket. Rewards scale linearly with danger; a
/// wormhole additionally draws its destination from `destinations`.
pub fn roll_anomaly_kind(
    rng: &mut impl RandomStream,
    danger_level: f64,
    destinations: &[&SectorId],
    config: &AnomalyConfig,
) -> AnomalyKind {
    let danger = danger_level.max(0.0);
    let roll = rng.next();

    if roll < config.wormhole_threshold {
        AnomalyKind::Wormhole {
            destination: rng.pick(destinations).map(|id| (*id).clone()),
        }
    } else if roll < config.combat_threshold && danger >= config.combat_min_danger {
        AnomalyKind::CombatSite {
            enemy_count: (config.combat_enemy_base + danger * config.combat_enemy_per_danger)
                .floor() as u32,
            reward: (config.combat_reward_base + danger * config.combat_reward_per_danger).round()
                as u32,
        }
    } else if roll < config.data_threshold {
        AnomalyKind::DataSite {
            reward: (config.data_reward_base + danger * config.data_reward_per_danger).round()
                as u32,
        }
    } else {
        AnomalyKind::GasPocket {
            volume: config.gas_volume_base + danger * config.gas_volume_per_danger,
        }
    }
}
