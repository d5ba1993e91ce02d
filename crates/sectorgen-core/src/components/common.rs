//! Common geometry shared by every entity kind.

use serde::{Deserialize, Serialize};

/// Upper bound on single-ulp corrections in [`Vec2::clamp_length`]
const MAX_CLAMP_NUDGES: usize = 16;

/// 2D position vector in sector space (origin at the sector center)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `distance` from the origin along `angle` (radians)
    pub fn from_polar(angle: f64, distance: f64) -> Self {
        Self {
            x: angle.cos() * distance,
            y: angle.sin() * distance,
        }
    }

    pub fn distance_squared(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance(&self, other: &Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Angle from the positive x axis, in `(-π, π]`
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self {
                x: self.x / len,
                y: self.y / len,
            }
        } else {
            Self::ZERO
        }
    }

    /// Move the point along its ray from the origin so its length lies in
    /// `[min, max]`. The origin itself is pushed out along +x.
    ///
    /// The result's [`length`](Self::length) is inside the closed range
    /// exactly, not just within rounding of it.
    pub fn clamp_length(&self, min: f64, max: f64) -> Self {
        let len = self.length();
        if len >= min && len <= max {
            return *self;
        }
        let dir = if len > 0.0 {
            self.normalize()
        } else {
            Self::new(1.0, 0.0)
        };
        let mut scale = len.clamp(min, max);
        let mut out = dir * scale;
        // Scaling a unit vector can land a few ulps outside the range
        for _ in 0..MAX_CLAMP_NUDGES {
            let out_len = out.length();
            if out_len < min && scale.is_finite() {
                scale = f64::from_bits(scale.to_bits() + 1);
            } else if out_len > max && scale > 0.0 {
                scale = f64::from_bits(scale.to_bits() - 1);
            } else {
                break;
            }
            out = dir * scale;
        }
        out
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl std::ops::Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

/// Inclusive distance band measured from the sector center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceBand {
    pub min: f64,
    pub max: f64,
}

impl DistanceBand {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, distance: f64) -> bool {
        distance >= self.min && distance <= self.max
    }

    /// Whether a point's distance to the origin lies inside the band
    pub fn contains_point(&self, point: &Vec2) -> bool {
        self.contains(point.length())
    }

    pub fn offset(&self, by: f64) -> Self {
        Self::new(self.min + by, self.max + by)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_operations() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(4.0, 6.0);

        let sum = a + b;
        assert_eq!(sum, Vec2::new(5.0, 8.0));

        let diff = b - a;
        assert_eq!(diff.x, 3.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(a.distance_squared(&b), 25.0);

        let scaled = a * 2.0;
        assert_eq!(scaled, Vec2::new(2.0, 4.0));
    }

    #[test]
    fn test_from_polar() {
        let p = Vec2::from_polar(std::f64::consts::FRAC_PI_2, 10.0);
        assert!(p.x.abs() < 1e-9);
        assert!((p.y - 10.0).abs() < 1e-9);
        assert!((p.angle() - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
    }

    #[test]
    fn test_clamp_length() {
        let inside = Vec2::new(3.0, 4.0);
        assert_eq!(inside.clamp_length(1.0, 10.0), inside);

        let near = inside.clamp_length(10.0, 20.0);
        assert!((near.length() - 10.0).abs() < 1e-9);
        assert!((near.angle() - inside.angle()).abs() < 1e-9);

        let far = Vec2::new(300.0, 400.0).clamp_length(1.0, 100.0);
        assert!((far.length() - 100.0).abs() < 1e-9);

        let origin = Vec2::ZERO.clamp_length(5.0, 10.0);
        assert_eq!(origin, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_clamped_points_land_inside_band_exactly() {
        use crate::rng::{RandomStream, SeededRng};

        let band = DistanceBand::new(900.0, 4300.0);
        let mut rng = SeededRng::new(7);
        for _ in 0..100_000 {
            let center = rng.point_in_circle(5000.0);
            let p = center + rng.point_in_circle(800.0);
            let clamped = p.clamp_length(band.min, band.max);
            assert!(
                band.contains_point(&clamped),
                "({}, {}) -> length {}",
                p.x,
                p.y,
                clamped.length()
            );
        }
    }

    #[test]
    fn test_distance_band() {
        let band = DistanceBand::new(100.0, 200.0);
        assert!(band.contains(100.0));
        assert!(band.contains(200.0));
        assert!(!band.contains(99.9));
        assert!(band.contains_point(&Vec2::new(0.0, 150.0)));
        assert_eq!(band.offset(50.0), DistanceBand::new(150.0, 250.0));
    }
}
