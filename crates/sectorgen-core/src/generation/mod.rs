//! Generation - procedural population of one sector from its seed.
//!
//! Stages run in a fixed order against one seeded stream:
//!
//! | # | Stage | Draws |
//! |---|-------|-------|
//! | 0 | [`Stage::CentralBody`] | body kind, radius, rings |
//! | 1 | [`Stage::ResourceFields`] | field placement, members, subtypes |
//! | 2 | [`Stage::Station`] | angle, distance, name (only if the sector has one) |
//! | 3 | [`Stage::Gates`] | none |
//! | 4 | [`Stage::Hostiles`] | tier escalation, placement, patrol, name |
//! | 5 | [`Stage::Anomalies`] | placement, type, wormhole destination |
//!
//! The order is part of the layout contract: reordering stages or changing
//! how many draws a stage makes changes every value after it. With
//! [`SeedMode::PerStage`] each stage instead gets its own sub-generator
//! seeded from `(sector seed, stage index)`, so stages stop depending on
//! each other's draw counts.

mod anomalies;
mod bodies;
mod fields;
mod gates;
mod hostiles;
mod names;

pub use anomalies::*;
pub use bodies::*;
pub use fields::*;
pub use gates::*;
pub use hostiles::*;
pub use names::*;

use crate::components::{AsteroidField, Entity, Vec2};
use crate::config::SeedMode;
use crate::context::WorldContext;
use crate::rng::{RandomStream, SeededRng};
use crate::topology::SectorInfo;

/// Generation stages in contract order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    CentralBody,
    ResourceFields,
    Station,
    Gates,
    Hostiles,
    Anomalies,
}

impl Stage {
    pub const ORDER: [Stage; 6] = [
        Stage::CentralBody,
        Stage::ResourceFields,
        Stage::Station,
        Stage::Gates,
        Stage::Hostiles,
        Stage::Anomalies,
    ];

    pub fn index(&self) -> u32 {
        match self {
            Stage::CentralBody => 0,
            Stage::ResourceFields => 1,
            Stage::Station => 2,
            Stage::Gates => 3,
            Stage::Hostiles => 4,
            Stage::Anomalies => 5,
        }
    }
}

/// Output of a full generation pass, in creation order
#[derive(Debug, Clone, Default)]
pub struct SectorLayout {
    pub entities: Vec<Entity>,
    pub asteroid_fields: Vec<AsteroidField>,
    /// Radius of the central body, consumed by later stages
    pub body_radius: f64,
}

/// Run every stage for `info` and return the resulting layout.
///
/// `rng` must be positioned at the start of the sector's stream.
pub fn generate_layout(info: &SectorInfo, ctx: &WorldContext, rng: &mut SeededRng) -> SectorLayout {
    let mut layout = SectorLayout::default();

    for stage in Stage::ORDER {
        let before = layout.entities.len();
        match ctx.generator.seed_mode {
            SeedMode::Sequential => run_stage(stage, info, ctx, rng, &mut layout),
            SeedMode::PerStage => {
                let mut sub = SeededRng::for_stage(rng.seed(), stage.index());
                run_stage(stage, info, ctx, &mut sub, &mut layout);
            }
        }
        log::debug!(
            "sector {}: stage {:?} produced {} entities",
            info.id,
            stage,
            layout.entities.len() - before
        );
    }

    layout
}

fn run_stage(
    stage: Stage,
    info: &SectorInfo,
    ctx: &WorldContext,
    rng: &mut SeededRng,
    layout: &mut SectorLayout,
) {
    match stage {
        Stage::CentralBody => place_central_body(info, ctx, rng, layout),
        Stage::ResourceFields => place_resource_fields(info, ctx, rng, layout),
        Stage::Station => place_station(info, ctx, rng, layout),
        Stage::Gates => place_gates(info, ctx, layout),
        Stage::Hostiles => place_hostiles(info, ctx, rng, layout),
        Stage::Anomalies => place_anomalies(info, ctx, rng, layout),
    }
}

/// Random point at a uniform angle with its distance drawn from `[min, max)`.
/// Angle is drawn first.
pub fn point_in_band(rng: &mut impl RandomStream, min: f64, max: f64) -> Vec2 {
    let angle = rng.angle();
    let distance = rng.float(min, max);
    Vec2::from_polar(angle, distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_indices_follow_order() {
        for (i, stage) in Stage::ORDER.iter().enumerate() {
            assert_eq!(stage.index(), i as u32);
        }
    }

    #[test]
    fn test_point_in_band() {
        let mut rng = SeededRng::new(17);
        for _ in 0..1000 {
            let d = point_in_band(&mut rng, 100.0, 200.0).length();
            assert!((100.0 - 1e-9..=200.0 + 1e-9).contains(&d));
        }
    }
}
