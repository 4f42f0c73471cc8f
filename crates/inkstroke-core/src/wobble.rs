//! Low-speed jitter removal.
//!
//! A moving average over a short time window acts as a low-pass filter on
//! the digitizer signal. The average lags the pen, so it is blended back
//! toward the raw position as the pen speeds up.

use std::collections::VecDeque;

use inkstroke_geometry::{distance, interp, normalize01, Vec2};

use crate::params::WobbleSmootherParams;

#[derive(Clone, Copy, Debug)]
struct WobbleSample {
    position: Vec2,
    /// Distance from the previous sample.
    distance: f32,
    /// Time since the previous sample.
    duration: f64,
    time: f64,
}

#[derive(Clone, Debug)]
pub struct WobbleSmoother {
    params: WobbleSmootherParams,
    samples: VecDeque<WobbleSample>,
}

impl WobbleSmoother {
    pub fn new(params: WobbleSmootherParams) -> Self {
        Self {
            params,
            samples: VecDeque::new(),
        }
    }

    pub fn params(&self) -> &WobbleSmootherParams {
        &self.params
    }

    /// Clears the window; the smoother carries nothing across strokes.
    pub fn reset(&mut self) {
        self.samples.clear();
    }

    pub fn window_len(&self) -> usize {
        self.samples.len()
    }

    /// Records a raw sample and returns the position to feed the spring model.
    pub fn update(&mut self, position: Vec2, time: f64) -> Vec2 {
        if !self.params.is_enabled {
            return position;
        }

        let (sample_distance, duration) = match self.samples.back() {
            Some(previous) => (distance(position, previous.position), time - previous.time),
            None => (0.0, 0.0),
        };
        self.samples.push_back(WobbleSample {
            position,
            distance: sample_distance,
            duration,
            time,
        });

        let horizon = time - self.params.timeout;
        while self
            .samples
            .front()
            .is_some_and(|sample| sample.time < horizon)
        {
            self.samples.pop_front();
        }

        let mut weighted_position_sum = Vec2::ZERO;
        let mut distance_sum = 0.0f32;
        let mut duration_sum = 0.0f64;
        for sample in &self.samples {
            weighted_position_sum += sample.position * sample.duration as f32;
            distance_sum += sample.distance;
            duration_sum += sample.duration;
        }

        if duration_sum <= 0.0 {
            return position;
        }

        let average_position = weighted_position_sum / duration_sum as f32;
        let average_speed = distance_sum / duration_sum as f32;
        interp(
            average_position,
            position,
            normalize01(
                self.params.speed_floor,
                self.params.speed_ceiling,
                average_speed,
            ),
        )
    }
}

#[cfg(test)]
#[path = "tests/wobble_tests.rs"]
mod tests;
