//! Resource field placement.
//!
//! Field count and population scale with the difficulty tier's asteroid
//! density. Centers are spread either evenly around the central body (base
//! angle plus jitter) or at independent uniform angles. Members scatter
//! uniformly by area inside their field and are then projected radially
//! into the resource band so no rock lands inside the central clearance or
//! outside the playable area.

use std::f64::consts::TAU;

use crate::components::{AsteroidField, Vec2};
use crate::config::FieldPlacement;
use crate::context::WorldContext;
use crate::factory::AsteroidOptions;
use crate::rng::RandomStream;
use crate::topology::SectorInfo;

use super::SectorLayout;

/// Stage 1: resource fields and their member asteroids.
pub fn place_resource_fields(
    info: &SectorInfo,
    ctx: &WorldContext,
    rng: &mut impl RandomStream,
    layout: &mut SectorLayout,
) {
    let config = &ctx.generator;
    let density = ctx.difficulty(info.tier).asteroid_density;
    let field_count = config.field_count(density);
    let per_field = config.asteroids_per_field(density);

    for index in 0..field_count {
        let angle = field_angle(
            rng,
            config.field_placement,
            index,
            field_count,
            config.field_angle_jitter,
        );
        let distance = rng.float(config.field_distance.min, config.field_distance.max);
        let center = Vec2::from_polar(angle, distance);
        let radius = rng.float(config.field_radius.min, config.field_radius.max);

        layout.asteroid_fields.push(AsteroidField {
            index,
            center,
            radius,
        });

        for _ in 0..per_field {
            let offset = rng.point_in_circle(radius);
            let position = (center + offset).clamp_length(
                config.resource_distance.min,
                config.resource_distance.max,
            );
            let resource = ctx.tables.abundance.roll(rng);
            let size = rng.float(config.asteroid_size.min, config.asteroid_size.max);
            let spin = rng.float(-config.asteroid_max_spin, config.asteroid_max_spin);

            layout.entities.push(ctx.factory().asteroid(AsteroidOptions {
                position,
                resource,
                size,
                field_index: index,
                yield_amount: size * config.yield_per_size,
                spin,
            }));
        }
    }
}

/// Angle of field `index` out of `count`.
///
/// Evenly spaced placement always draws exactly one value (the jitter), so
/// both modes consume the same number of draws per field.
pub fn field_angle(
    rng: &mut impl RandomStream,
    placement: FieldPlacement,
    index: u32,
    count: u32,
    jitter: f64,
) -> f64 {
    match placement {
        FieldPlacement::Uniform => rng.angle(),
        FieldPlacement::EvenlySpaced => {
            let base = index as f64 * TAU / count.max(1) as f64;
            (base + rng.float(-jitter, jitter)).rem_euclid(TAU)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::EntityType;
    use crate::config::{DifficultyTier, UniverseConfig};
    use crate::rng::SeededRng;

    fn dangerous_sector() -> SectorInfo {
        SectorInfo::new("s", "Sol").with_tier(DifficultyTier::Dangerous)
    }

    #[test]
    fn test_field_and_member_counts() {
        let ctx = WorldContext::default();
        let mut layout = SectorLayout::default();
        place_resource_fields(&dangerous_sector(), &ctx, &mut SeededRng::new(42), &mut layout);

        assert_eq!(layout.asteroid_fields.len(), 12);
        assert_eq!(layout.entities.len(), 12 * 35);
        assert!(layout.entities.iter().all(|e| e.is_type(EntityType::Asteroid)));
    }

    #[test]
    fn test_members_stay_in_resource_band() {
        let ctx = WorldContext::default();
        let band = ctx.generator.resource_distance;
        for seed in 0..20 {
            let mut layout = SectorLayout::default();
            place_resource_fields(&dangerous_sector(), &ctx, &mut SeededRng::new(seed), &mut layout);
            for e in &layout.entities {
                let d = e.distance_to_center();
                assert!(d >= band.min - 1e-6 && d <= band.max + 1e-6, "distance {d}");
            }
        }
    }

    #[test]
    fn test_even_spacing_covers_every_quadrant() {
        let ctx = WorldContext::default();
        for seed in 0..50 {
            let mut layout = SectorLayout::default();
            place_resource_fields(&dangerous_sector(), &ctx, &mut SeededRng::new(seed), &mut layout);
            let mut quadrants = [false; 4];
            for field in &layout.asteroid_fields {
                let angle = field.center.angle().rem_euclid(TAU);
                quadrants[((angle / (TAU / 4.0)) as usize).min(3)] = true;
            }
            assert!(quadrants.iter().all(|q| *q), "seed {seed} left a quadrant empty");
        }
    }

    #[test]
    fn test_uniform_placement_mode() {
        let mut config = UniverseConfig::default();
        config.generator.field_placement = FieldPlacement::Uniform;
        let ctx = WorldContext::new(config);
        let mut layout = SectorLayout::default();
        place_resource_fields(&dangerous_sector(), &ctx, &mut SeededRng::new(42), &mut layout);
        assert_eq!(layout.asteroid_fields.len(), 12);
        for field in &layout.asteroid_fields {
            assert!(ctx.generator.field_distance.contains_point(&field.center) || {
                // float rounding at the band edge
                (field.center.length() - ctx.generator.field_distance.max).abs() < 1e-6
            });
        }
    }

    #[test]
    fn test_members_reference_their_field() {
        let ctx = WorldContext::default();
        let mut layout = SectorLayout::default();
        place_resource_fields(&dangerous_sector(), &ctx, &mut SeededRng::new(1), &mut layout);
        for e in &layout.entities {
            let asteroid = e.as_asteroid().expect("asteroid payload");
            assert!((asteroid.field_index as usize) < layout.asteroid_fields.len());
        }
    }
}
