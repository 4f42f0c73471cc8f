//! Geometric primitive: Vec2 and segment helpers

use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// A 2-D vector in input coordinates.
///
/// Layout matches the interop record `{ float x; float y; }`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn magnitude(&self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn magnitude_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn dot(&self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3-D cross product.
    pub fn cross(&self, other: Vec2) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Counter-clockwise perpendicular.
    pub fn orthogonal(&self) -> Vec2 {
        Vec2::new(-self.y, self.x)
    }

    /// Unit vector in the same direction, or zero for the zero vector.
    pub fn unit(&self) -> Vec2 {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            Vec2::ZERO
        } else {
            *self / magnitude
        }
    }

    /// Absolute angle in radians, in [0, π], between two vectors.
    ///
    /// Returns 0 when either vector is zero.
    pub fn absolute_angle_to(&self, other: Vec2) -> f32 {
        if self.magnitude_squared() == 0.0 || other.magnitude_squared() == 0.0 {
            return 0.0;
        }
        self.cross(other).atan2(self.dot(other)).abs()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).magnitude()
}

/// Projects `point` onto the segment `start..end`.
///
/// Returns the clamped segment parameter in [0, 1]; a degenerate segment
/// yields 0.
pub fn nearest_point_on_segment(start: Vec2, end: Vec2, point: Vec2) -> f32 {
    let segment = end - start;
    let length_squared = segment.magnitude_squared();
    if length_squared == 0.0 {
        return 0.0;
    }
    ((point - start).dot(segment) / length_squared).clamp(0.0, 1.0)
}

/// Intersects the ray `origin + s * direction` (both signs of `s`) with the
/// segment `start..end`.
///
/// Returns the segment parameter in [0, 1] and the signed ray distance `s`,
/// or `None` when the ray is parallel to the segment or misses it.
pub fn line_segment_intersection(
    origin: Vec2,
    direction: Vec2,
    start: Vec2,
    end: Vec2,
) -> Option<(f32, f32)> {
    let segment = end - start;
    let denominator = direction.cross(segment);
    if denominator.abs() < f32::EPSILON {
        return None;
    }
    let offset = start - origin;
    let s = offset.cross(segment) / denominator;
    let t = offset.cross(direction) / denominator;
    (0.0..=1.0).contains(&t).then_some((t, s))
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, scalar: f32) -> Vec2 {
        Vec2::new(self.x * scalar, self.y * scalar)
    }
}

impl Mul<Vec2> for f32 {
    type Output = Vec2;

    fn mul(self, vector: Vec2) -> Vec2 {
        vector * self
    }
}

impl MulAssign<f32> for Vec2 {
    fn mul_assign(&mut self, scalar: f32) {
        self.x *= scalar;
        self.y *= scalar;
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;

    fn div(self, scalar: f32) -> Vec2 {
        Vec2::new(self.x / scalar, self.y / scalar)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

#[cfg(test)]
#[path = "tests/vec2_tests.rs"]
mod tests;
