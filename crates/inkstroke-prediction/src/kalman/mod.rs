//! Statistical prediction from a pair of constant-jerk Kalman filters.
//!
//! Each axis is filtered independently in units of one sample interval;
//! the average interval over the last `max_time_samples` inputs converts
//! the estimate back to real time. The predicted path starts on the
//! session's tip, eases onto the filter's trajectory, and is cut short in
//! proportion to how much the estimate can be trusted.

mod confidence;
mod filter;

use std::collections::VecDeque;

use inkstroke_core::{KalmanPredictorParams, TipState};
use inkstroke_geometry::{distance, interp, Vec2};

use crate::predictor::{PredictionInput, TrajectoryPredictor};

pub use confidence::{
    prediction_confidence, trusted_sample_count, ConfidenceFactors, MIN_PREDICTION_CONFIDENCE,
};
pub use filter::KalmanFilter;

/// Filter state converted to real time units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KalmanEstimate {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub jerk: Vec2,
    /// Time of the last observed sample.
    pub time: f64,
}

#[derive(Clone, Debug)]
pub struct KalmanPredictor {
    params: KalmanPredictorParams,
    x_filter: KalmanFilter,
    y_filter: KalmanFilter,
    sample_times: VecDeque<f64>,
    last_position: Option<Vec2>,
    updates_since_reset: usize,
}

impl KalmanPredictor {
    pub fn new(params: KalmanPredictorParams) -> Self {
        Self {
            params,
            x_filter: KalmanFilter::new(params.process_noise, params.measurement_noise),
            y_filter: KalmanFilter::new(params.process_noise, params.measurement_noise),
            sample_times: VecDeque::with_capacity(params.max_time_samples.max(1) as usize),
            last_position: None,
            updates_since_reset: 0,
        }
    }

    pub fn params(&self) -> &KalmanPredictorParams {
        &self.params
    }

    pub fn updates_since_reset(&self) -> usize {
        self.updates_since_reset
    }

    /// True once enough updates have arrived for predictions to be trusted.
    pub fn is_stable(&self) -> bool {
        self.updates_since_reset >= self.params.min_stable_iteration.max(1) as usize
    }

    /// Average time between the retained samples.
    pub fn sample_interval(&self) -> Option<f64> {
        let (first, last) = (self.sample_times.front()?, self.sample_times.back()?);
        let intervals = self.sample_times.len().checked_sub(1).filter(|&n| n > 0)?;
        let interval = (last - first) / intervals as f64;
        (interval > 0.0).then_some(interval)
    }

    pub fn estimate(&self) -> Option<KalmanEstimate> {
        let time = *self.sample_times.back()?;
        let dt = self.sample_interval()?;
        let per_step = |x: f64, y: f64, scale: f64| Vec2::new((x / scale) as f32, (y / scale) as f32);
        Some(KalmanEstimate {
            position: per_step(self.x_filter.position(), self.y_filter.position(), 1.0),
            velocity: per_step(self.x_filter.velocity(), self.y_filter.velocity(), dt),
            acceleration: per_step(
                self.x_filter.acceleration(),
                self.y_filter.acceleration(),
                dt * dt,
            ),
            jerk: per_step(self.x_filter.jerk(), self.y_filter.jerk(), dt * dt * dt),
            time,
        })
    }

    /// Confidence in a prediction made from `estimate`.
    pub fn confidence(&self, estimate: &KalmanEstimate) -> f32 {
        let Some(last_position) = self.last_position else {
            return 0.0;
        };
        let confidence = &self.params.confidence;
        let horizon =
            (confidence.desired_number_of_samples.max(0) as f64 * self.params.prediction_interval)
                as f32;
        let curvature = self.weighted_curvature(estimate, horizon);
        prediction_confidence(
            confidence,
            ConfidenceFactors {
                estimation_distance: distance(estimate.position, last_position),
                speed: estimate.velocity.magnitude(),
                linear_deviation: curvature.magnitude(),
            },
        )
    }

    /// Position on the filter's trajectory `elapsed` after the estimate.
    fn extrapolate(&self, estimate: &KalmanEstimate, elapsed: f32) -> Vec2 {
        estimate.position
            + estimate.velocity * elapsed
            + self.weighted_curvature(estimate, elapsed)
    }

    /// Weighted acceleration and jerk contribution after `elapsed`.
    fn weighted_curvature(&self, estimate: &KalmanEstimate, elapsed: f32) -> Vec2 {
        let t2 = elapsed * elapsed;
        estimate.acceleration * (self.params.acceleration_weight * t2 / 2.0)
            + estimate.jerk * (self.params.jerk_weight * t2 * elapsed / 6.0)
    }
}

impl TrajectoryPredictor for KalmanPredictor {
    fn reset(&mut self) {
        self.sample_times.clear();
        self.last_position = None;
        self.updates_since_reset = 0;
    }

    fn update(&mut self, position: Vec2, time: f64) {
        let max_samples = self.params.max_time_samples.max(1) as usize;
        if self.sample_times.len() == max_samples {
            self.sample_times.pop_front();
        }
        self.sample_times.push_back(time);

        if self.last_position.is_none() {
            self.x_filter.reset(position.x as f64);
            self.y_filter.reset(position.y as f64);
        } else {
            self.x_filter.predict();
            self.x_filter.update(position.x as f64);
            self.y_filter.predict();
            self.y_filter.update(position.y as f64);
        }
        self.last_position = Some(position);
        self.updates_since_reset += 1;
    }

    fn predict<E>(&self, input: &PredictionInput<'_>, out: &mut E)
    where
        E: Extend<TipState>,
    {
        if !self.is_stable() {
            log::debug!(
                "kalman predictor cold: {} of {} updates",
                self.updates_since_reset,
                self.params.min_stable_iteration
            );
            return;
        }
        let Some(estimate) = self.estimate() else {
            return;
        };

        let desired = self.params.confidence.desired_number_of_samples.max(0) as usize;
        let count = trusted_sample_count(desired, self.confidence(&estimate));
        if count == 0 {
            return;
        }

        let tip = input.tip();
        let interval = self.params.prediction_interval;
        let horizon = count as f64 * interval;
        let catchup_speed = estimate
            .velocity
            .magnitude()
            .max(self.params.min_catchup_velocity);
        let catchup_duration = if catchup_speed > 0.0 {
            let gap = distance(tip.position, estimate.position);
            ((gap / catchup_speed) as f64).min(horizon)
        } else {
            0.0
        };

        let mut previous = tip;
        for step in 1..=count {
            let elapsed = step as f64 * interval;
            let time = tip.time + elapsed;
            let on_filter = self.extrapolate(&estimate, (time - estimate.time) as f32);
            let on_tip = tip.position + tip.velocity * elapsed as f32;
            let blend = if catchup_duration > 0.0 {
                smoothstep((elapsed / catchup_duration) as f32)
            } else {
                1.0
            };
            let position = interp(on_tip, on_filter, blend);

            let dt = (time - previous.time) as f32;
            let velocity = (position - previous.position) / dt;
            let state = TipState {
                position,
                velocity,
                acceleration: (velocity - previous.velocity) / dt,
                time,
            };
            out.extend(Some(state));
            previous = state;
        }
    }
}

fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
#[path = "../tests/kalman_tests.rs"]
mod tests;
