//! Scalar interpolation helpers.

use crate::Vec2;

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for Vec2 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        Vec2::new(
            self.x.lerp(&target.x, fraction),
            self.y.lerp(&target.y, fraction),
        )
    }
}

/// Interpolates between `start` and `end`, clamping `fraction` to [0, 1].
pub fn interp<T: Lerp>(start: T, end: T, fraction: f32) -> T {
    start.lerp(&end, fraction.clamp(0.0, 1.0))
}

/// Time interpolation done in `f64` so long strokes keep sub-sample precision.
pub fn interp_time(start: f64, end: f64, fraction: f64) -> f64 {
    start + (end - start) * fraction.clamp(0.0, 1.0)
}

/// Maps `value` from `[start, end]` onto `[0, 1]`, clamping outside.
///
/// A degenerate range acts as a step at `start`.
pub fn normalize01(start: f32, end: f32, value: f32) -> f32 {
    if start == end {
        return if value > start { 1.0 } else { 0.0 };
    }
    ((value - start) / (end - start)).clamp(0.0, 1.0)
}
