//! Spring-mass-drag model of the pen tip.
//!
//! The tip is attached to the raw input (the anchor) by a damped spring:
//!
//! ```text
//! acceleration = (anchor - position) / spring_mass_constant - drag_constant * velocity
//! ```
//!
//! integrated with semi-implicit Euler, so the modeled stroke lags and
//! rounds off sharp corners of the raw input.
//!
//! With loop contraction mitigation enabled the integrated position is then
//! blended toward the anchor by a strength that depends on the trailing
//! average speed of the tip.

use std::collections::VecDeque;

use inkstroke_geometry::{distance, interp, interp_time, normalize01, Vec2};

use crate::params::{LoopContractionMitigationParams, PositionModelerParams};
use crate::types::TipState;

#[derive(Clone, Copy, Debug)]
struct SpeedSample {
    time: f64,
    speed: f32,
}

#[derive(Clone, Debug)]
pub struct PositionModeler {
    params: PositionModelerParams,
    state: TipState,
    speed_samples: VecDeque<SpeedSample>,
}

impl PositionModeler {
    pub fn new(params: PositionModelerParams, initial: TipState) -> Self {
        Self {
            params,
            state: initial,
            speed_samples: VecDeque::new(),
        }
    }

    pub fn params(&self) -> &PositionModelerParams {
        &self.params
    }

    pub fn reset(&mut self, initial: TipState) {
        self.state = initial;
        self.speed_samples.clear();
    }

    pub fn state(&self) -> TipState {
        self.state
    }

    /// Average tip speed over the trailing sampling window.
    ///
    /// The newest sample is always included so a zero-length window falls
    /// back to the instantaneous speed.
    pub fn windowed_speed(&self) -> f32 {
        if self.speed_samples.is_empty() {
            return 0.0;
        }
        let total: f32 = self.speed_samples.iter().map(|sample| sample.speed).sum();
        total / self.speed_samples.len() as f32
    }

    /// Weight of the simulated position in the final tip position.
    ///
    /// Always 1 when loop mitigation is disabled.
    pub fn interpolation_strength(&self) -> f32 {
        let mitigation = &self.params.loop_mitigation;
        if !mitigation.is_enabled {
            return 1.0;
        }
        strength_for_speed(mitigation, self.windowed_speed())
    }

    /// Advances the model toward `anchor` until `time`.
    pub fn update(&mut self, anchor: Vec2, time: f64) -> TipState {
        let next = self.simulate(anchor, time);
        self.commit(next);
        next
    }

    /// Runs `steps` updates with the anchor and time moving linearly from
    /// the start values (exclusive) to the end values (inclusive).
    pub fn update_along_linear_path<E>(
        &mut self,
        start_anchor: Vec2,
        start_time: f64,
        end_anchor: Vec2,
        end_time: f64,
        steps: usize,
        out: &mut E,
    ) where
        E: Extend<TipState>,
    {
        for step in 1..=steps {
            let (anchor, time) = if step == steps {
                (end_anchor, end_time)
            } else {
                let fraction = step as f64 / steps as f64;
                (
                    interp(start_anchor, end_anchor, fraction as f32),
                    interp_time(start_time, end_time, fraction),
                )
            };
            out.extend(Some(self.update(anchor, time)));
        }
    }

    /// Lets the tip settle onto `anchor` at fixed time steps.
    ///
    /// A step that fails to bring the tip closer to the anchor is discarded
    /// and retried at half the time step. Iteration stops once the tip is
    /// within `stopping_distance` of the anchor, once a step moves it less
    /// than `stopping_distance`, or after `max_iterations` attempts.
    /// Returns the number of states emitted.
    pub fn model_end_of_stroke<E>(
        &mut self,
        anchor: Vec2,
        time_step: f64,
        max_iterations: usize,
        stopping_distance: f32,
        out: &mut E,
    ) -> usize
    where
        E: Extend<TipState>,
    {
        if distance(self.state.position, anchor) < stopping_distance {
            return 0;
        }

        let mut time_step = time_step;
        let mut emitted = 0;
        for _ in 0..max_iterations {
            let previous = self.state;
            let candidate = self.simulate(anchor, previous.time + time_step);
            let remaining = distance(candidate.position, anchor);
            if remaining >= distance(previous.position, anchor) {
                time_step *= 0.5;
                continue;
            }

            self.commit(candidate);
            out.extend(Some(candidate));
            emitted += 1;

            if remaining < stopping_distance
                || distance(previous.position, candidate.position) < stopping_distance
            {
                break;
            }
        }
        emitted
    }

    fn simulate(&self, anchor: Vec2, time: f64) -> TipState {
        let delta_time = (time - self.state.time) as f32;
        if delta_time <= 0.0 {
            return self.state;
        }

        let acceleration = (anchor - self.state.position) / self.params.spring_mass_constant
            - self.params.drag_constant * self.state.velocity;
        let velocity = self.state.velocity + delta_time * acceleration;
        let simulated = self.state.position + delta_time * velocity;

        if !self.params.loop_mitigation.is_enabled {
            return TipState {
                position: simulated,
                velocity,
                acceleration,
                time,
            };
        }

        let position = interp(anchor, simulated, self.interpolation_strength());
        let velocity = (position - self.state.position) / delta_time;
        TipState {
            position,
            velocity,
            acceleration: (velocity - self.state.velocity) / delta_time,
            time,
        }
    }

    fn commit(&mut self, next: TipState) {
        self.state = next;
        if !self.params.loop_mitigation.is_enabled {
            return;
        }
        self.speed_samples.push_back(SpeedSample {
            time: next.time,
            speed: next.velocity.magnitude(),
        });
        let horizon = next.time - self.params.loop_mitigation.min_speed_sampling_window;
        while self.speed_samples.len() > 1
            && self
                .speed_samples
                .front()
                .is_some_and(|sample| sample.time < horizon)
        {
            self.speed_samples.pop_front();
        }
    }
}

fn strength_for_speed(mitigation: &LoopContractionMitigationParams, speed: f32) -> f32 {
    interp(
        mitigation.interpolation_strength_at_speed_lower_bound,
        mitigation.interpolation_strength_at_speed_upper_bound,
        normalize01(
            mitigation.speed_lower_bound,
            mitigation.speed_upper_bound,
            speed,
        ),
    )
}

#[cfg(test)]
#[path = "tests/position_tests.rs"]
mod tests;
