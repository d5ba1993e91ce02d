//! Deterministic seeded random number generation.
//!
//! Sector layouts are generated from a single mulberry32 stream. The step
//! function is reproduced bit-for-bit so that a seed yields the same layout on
//! every platform and across sessions. Every derived distribution is written
//! purely in terms of [`RandomStream::next`], so rewinding the cursor with
//! [`SeededRng::reset`] replays the full derived sequence as well.
//!
//! Live-world content (anomaly respawns) deliberately does not use this
//! stream; it goes through [`AmbientRng`], which wraps any `rand` generator.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::components::Vec2;

/// mulberry32 increment.
const MULBERRY_STEP: u32 = 0x6D2B79F5;

/// 2^32, used to scale a `u32` into `[0, 1)`.
const U32_RANGE: f64 = 4_294_967_296.0;

/// A source of uniform values in `[0, 1)` plus the distributions derived
/// from it.
///
/// Only [`next`](RandomStream::next) is required. The provided methods must
/// not draw from anywhere else, otherwise seeded replays diverge.
pub trait RandomStream {
    /// Next uniform value in `[0, 1)`.
    fn next(&mut self) -> f64;

    /// Uniform float in `[min, max)`.
    fn float(&mut self, min: f64, max: f64) -> f64 {
        min + self.next() * (max - min)
    }

    /// Uniform integer in `[min, max]` (both inclusive).
    fn int(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = (max - min + 1) as f64;
        min + (self.next() * span).floor() as i64
    }

    /// `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next() < p
    }

    /// Uniformly chosen element, or `None` for an empty slice.
    ///
    /// An empty slice does not consume a draw.
    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = ((self.next() * items.len() as f64).floor() as usize).min(items.len() - 1);
        items.get(idx)
    }

    /// Fisher-Yates shuffle in place.
    fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = ((self.next() * (i + 1) as f64).floor() as usize).min(i);
            items.swap(i, j);
        }
    }

    /// Uniform angle in `[0, 2π)`.
    fn angle(&mut self) -> f64 {
        self.next() * TAU
    }

    /// Point uniformly distributed by area inside a circle of `radius`
    /// centered on the origin.
    fn point_in_circle(&mut self, radius: f64) -> Vec2 {
        let angle = self.angle();
        let dist = self.next().sqrt() * radius;
        Vec2::from_polar(angle, dist)
    }

    /// Point on the circumference of a circle of `radius`.
    fn point_on_circle(&mut self, radius: f64) -> Vec2 {
        let angle = self.angle();
        Vec2::from_polar(angle, radius)
    }

    /// Point inside a `width` x `height` rectangle centered on the origin.
    fn point_in_rect(&mut self, width: f64, height: f64) -> Vec2 {
        let x = (self.next() - 0.5) * width;
        let y = (self.next() - 0.5) * height;
        Vec2::new(x, y)
    }

    /// Normally distributed value (Box-Muller, two draws).
    fn gaussian(&mut self, mean: f64, stddev: f64) -> f64 {
        // ln(0) is -inf; the smallest positive value keeps the result finite
        let u1 = self.next().max(f64::MIN_POSITIVE);
        let u2 = self.next();
        let z = (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos();
        mean + z * stddev
    }

    /// Weighted choice over `(value, weight)` pairs.
    ///
    /// Draws once, scales by the total weight and walks the cumulative sum.
    /// Falls back to the last entry when rounding leaves a gap. Returns
    /// `None` only for an empty slice.
    fn weighted<'a, T>(&mut self, items: &'a [(T, f64)]) -> Option<&'a T> {
        let (last, _) = items.last()?;
        let total: f64 = items.iter().map(|(_, w)| w.max(0.0)).sum();
        let roll = self.next() * total;
        let mut acc = 0.0;
        for (value, weight) in items {
            acc += weight.max(0.0);
            if roll < acc {
                return Some(value);
            }
        }
        Some(last)
    }
}

/// mulberry32 generator with a rewindable cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeededRng {
    seed: u32,
    state: u32,
}

impl SeededRng {
    /// Create a generator positioned at the start of `seed`'s stream.
    pub fn new(seed: u32) -> Self {
        Self { seed, state: seed }
    }

    /// Independent generator for one generation stage.
    ///
    /// Used when stages must not depend on each other's draw counts.
    pub fn for_stage(sector_seed: u32, stage_index: u32) -> Self {
        Self::new(stage_seed(sector_seed, stage_index))
    }

    /// The seed this generator was created with.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Rewind to the start of the stream. The seed itself is unchanged.
    pub fn reset(&mut self) {
        self.state = self.seed;
    }

    /// Raw 32-bit output of one mulberry32 step.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(MULBERRY_STEP);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }
}

impl RandomStream for SeededRng {
    fn next(&mut self) -> f64 {
        self.next_u32() as f64 / U32_RANGE
    }
}

/// Adapts a `rand` generator to [`RandomStream`].
///
/// Used for live-world evolution, which is not required to be reproducible.
#[derive(Debug)]
pub struct AmbientRng<'a, R: Rng>(pub &'a mut R);

impl<R: Rng> RandomStream for AmbientRng<'_, R> {
    fn next(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// Combine a sector seed with a stage index into a sub-generator seed.
pub fn stage_seed(sector_seed: u32, stage_index: u32) -> u32 {
    let mut h = (sector_seed as u64)
        .wrapping_mul(6364136223846793005)
        .wrapping_add(stage_index as u64 + 1);
    h ^= h >> 33;
    h = h.wrapping_mul(0xff51afd7ed558ccd);
    h ^= h >> 33;
    h as u32
}
