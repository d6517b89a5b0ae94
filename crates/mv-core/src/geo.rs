//! World-space coordinate type and planar helpers.
//!
//! Coordinates are single-precision world units.  The `z` axis is height;
//! angles are measured in the `x/y` plane, counter-clockwise from `+x`, in
//! radians normalised to `[0, 2π)`.

use std::f32::consts::TAU;
use std::ops::{Add, Mul, Sub};

/// A point (or displacement) in world space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn length_sq(self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_sq().sqrt()
    }

    /// Squared 3-D distance.  Prefer this for threshold comparisons.
    #[inline]
    pub fn distance_sq(self, other: Vec3) -> f32 {
        (other - self).length_sq()
    }

    #[inline]
    pub fn distance(self, other: Vec3) -> f32 {
        self.distance_sq(other).sqrt()
    }

    /// Distance in the horizontal plane, ignoring height.
    #[inline]
    pub fn distance_2d(self, other: Vec3) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Planar angle from `self` towards `other`, in `[0, 2π)`.
    pub fn angle_to(self, other: Vec3) -> f32 {
        normalize_angle((other.y - self.y).atan2(other.x - self.x))
    }

    /// The point `dist` units away from `self` along planar angle `angle`,
    /// at the same height.
    #[inline]
    pub fn offset_polar(self, dist: f32, angle: f32) -> Vec3 {
        Vec3::new(self.x + dist * angle.cos(), self.y + dist * angle.sin(), self.z)
    }

    /// Linear interpolation; `t = 0` is `self`, `t = 1` is `other`.
    #[inline]
    pub fn lerp(self, other: Vec3, t: f32) -> Vec3 {
        self + (other - self) * t
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl std::fmt::Display for Vec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

/// Wrap any angle into `[0, 2π)`.
pub fn normalize_angle(angle: f32) -> f32 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if a >= TAU { 0.0 } else { a }
}

/// Smallest absolute difference between two planar angles, in `[0, π]`.
pub fn angle_diff(a: f32, b: f32) -> f32 {
    let d = normalize_angle(a - b);
    if d > std::f32::consts::PI { TAU - d } else { d }
}
