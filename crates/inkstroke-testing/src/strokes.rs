//! Synthetic input strokes.
//!
//! Every generator starts with a DOWN, appends MOVE samples at a fixed
//! interval and ends with an UP on the final sample. Jitter comes from a
//! small deterministic generator so test runs are reproducible.

use inkstroke_core::{EventType, Input};
use inkstroke_geometry::Vec2;

/// Builds a DOWN..MOVE..UP input sequence.
#[derive(Clone, Debug)]
pub struct StrokeBuilder {
    start_time: f64,
    interval: f64,
    pressure: Option<f32>,
    points: Vec<Vec2>,
}

impl Default for StrokeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StrokeBuilder {
    /// A builder sampling at 100 Hz starting at time zero.
    pub fn new() -> Self {
        Self {
            start_time: 0.0,
            interval: 0.01,
            pressure: None,
            points: Vec::new(),
        }
    }

    pub fn start_time(mut self, start_time: f64) -> Self {
        self.start_time = start_time;
        self
    }

    pub fn interval(mut self, interval: f64) -> Self {
        self.interval = interval;
        self
    }

    /// Reports a constant pressure on every sample instead of unknown.
    pub fn pressure(mut self, pressure: f32) -> Self {
        self.pressure = Some(pressure);
        self
    }

    pub fn point(mut self, point: Vec2) -> Self {
        self.points.push(point);
        self
    }

    /// `samples` evenly spaced points from `from` to `to`, both inclusive.
    pub fn line(mut self, from: Vec2, to: Vec2, samples: usize) -> Self {
        let last = samples.saturating_sub(1).max(1) as f32;
        for i in 0..samples {
            let t = i as f32 / last;
            self.points.push(from + (to - from) * t);
        }
        self
    }

    /// `samples` points on a circular arc around `center`, angles in radians.
    pub fn arc(
        mut self,
        center: Vec2,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        samples: usize,
    ) -> Self {
        let last = samples.saturating_sub(1).max(1) as f32;
        for i in 0..samples {
            let angle = start_angle + (end_angle - start_angle) * i as f32 / last;
            self.points
                .push(center + Vec2::new(angle.cos(), angle.sin()) * radius);
        }
        self
    }

    /// Out along +x for `length`, then straight back: a quick reversal.
    pub fn flick_back(self, origin: Vec2, length: f32, samples_each_way: usize) -> Self {
        let tip = origin + Vec2::new(length, 0.0);
        let builder = self.line(origin, tip, samples_each_way);
        let step = length / samples_each_way.max(1) as f32;
        builder.line(tip - Vec2::new(step, 0.0), origin, samples_each_way)
    }

    /// A nearly stationary pen: `samples` points within `amplitude` of `center`.
    pub fn jittered_hold(mut self, center: Vec2, amplitude: f32, samples: usize, seed: u32) -> Self {
        let mut noise = Jitter::new(seed);
        for _ in 0..samples {
            let offset = Vec2::new(noise.next_signed(), noise.next_signed()) * amplitude;
            self.points.push(center + offset);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn build(&self) -> Vec<Input> {
        let count = self.points.len();
        self.points
            .iter()
            .enumerate()
            .map(|(index, &position)| {
                let event_type = match index {
                    0 => EventType::Down,
                    i if i + 1 == count => EventType::Up,
                    _ => EventType::Move,
                };
                let input = Input::new(
                    event_type,
                    position,
                    self.start_time + index as f64 * self.interval,
                );
                match self.pressure {
                    Some(pressure) => input.with_pressure(pressure),
                    None => input,
                }
            })
            .collect()
    }
}

/// xorshift32; only needs to be deterministic.
struct Jitter(u32);

impl Jitter {
    fn new(seed: u32) -> Self {
        Self(seed.max(1))
    }

    fn next_signed(&mut self) -> f32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        (x as f32 / u32::MAX as f32) * 2.0 - 1.0
    }
}
