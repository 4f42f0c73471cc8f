//! Output-rate and angle driven step planning.

use inkstroke_geometry::Vec2;

use crate::params::SamplingParams;
use crate::types::TipState;

/// How many simulation steps to run between two inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepPlan {
    /// Steps that will actually run.
    pub steps: usize,
    /// Steps the rate and angle bounds asked for before the per-call cap.
    pub requested: usize,
}

impl StepPlan {
    pub fn is_capped(&self) -> bool {
        self.steps < self.requested
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SamplingController {
    params: SamplingParams,
}

impl SamplingController {
    pub fn new(params: SamplingParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SamplingParams {
        &self.params
    }

    pub fn max_outputs_per_call(&self) -> usize {
        self.params.max_outputs_per_call.max(1) as usize
    }

    /// Fixed step used when settling the tip at stroke end.
    pub fn end_of_stroke_time_step(&self) -> f64 {
        1.0 / self.params.min_output_rate
    }

    pub fn end_of_stroke_max_iterations(&self) -> usize {
        self.params.end_of_stroke_max_iterations.max(0) as usize
    }

    pub fn end_of_stroke_stopping_distance(&self) -> f32 {
        self.params.end_of_stroke_stopping_distance
    }

    /// Plans the steps from `tip` toward `target` over `[start_time, end_time]`.
    ///
    /// At least one step always runs. The rate bound asks for
    /// `ceil(elapsed * min_output_rate)` steps; when angle subdivision is
    /// enabled, the estimated turn between the tip's heading and the
    /// direction to `target` may ask for more. `already_emitted` counts
    /// outputs this call has produced so far against `max_outputs_per_call`.
    pub fn plan(
        &self,
        tip: &TipState,
        target: Vec2,
        start_time: f64,
        end_time: f64,
        already_emitted: usize,
    ) -> StepPlan {
        let elapsed = (end_time - start_time).max(0.0);
        let rate_steps = (elapsed * self.params.min_output_rate).ceil() as usize;
        let requested = rate_steps.max(self.angle_steps(tip, target)).max(1);

        let budget = self
            .max_outputs_per_call()
            .saturating_sub(already_emitted)
            .max(1);
        let steps = requested.min(budget);
        if steps < requested {
            log::warn!(
                "capping resample from {} to {} steps (max_outputs_per_call = {})",
                requested,
                steps,
                self.params.max_outputs_per_call
            );
        }
        StepPlan { steps, requested }
    }

    /// End-of-stroke iterations still allowed after `already_emitted` outputs.
    pub fn end_of_stroke_budget(&self, already_emitted: usize) -> usize {
        self.end_of_stroke_max_iterations()
            .min(self.max_outputs_per_call().saturating_sub(already_emitted))
    }

    fn angle_steps(&self, tip: &TipState, target: Vec2) -> usize {
        let max_angle = self.params.max_estimated_angle_to_traverse_per_input;
        if max_angle <= 0.0 {
            return 0;
        }
        let angle = tip.velocity.absolute_angle_to(target - tip.position) as f64;
        (angle / max_angle).ceil() as usize
    }
}

#[cfg(test)]
#[path = "tests/sampling_tests.rs"]
mod tests;
