//! Kinematic prediction: let the spring settle onto the last anchor.

use inkstroke_core::{SamplingController, SamplingParams, TipState};
use inkstroke_geometry::Vec2;

use crate::predictor::{PredictionInput, TrajectoryPredictor};

/// Predicts the tail the stroke would have if the pen lifted now.
///
/// Works from the current velocity and acceleration of the tip alone, so it
/// is available from the first sample and keeps no history.
#[derive(Clone, Debug)]
pub struct StrokeEndPredictor {
    sampling: SamplingController,
}

impl StrokeEndPredictor {
    pub fn new(sampling: SamplingParams) -> Self {
        Self {
            sampling: SamplingController::new(sampling),
        }
    }
}

impl TrajectoryPredictor for StrokeEndPredictor {
    fn reset(&mut self) {}

    fn update(&mut self, _position: Vec2, _time: f64) {}

    fn predict<E>(&self, input: &PredictionInput<'_>, out: &mut E)
    where
        E: Extend<TipState>,
    {
        let mut modeler = input.modeler.clone();
        modeler.model_end_of_stroke(
            input.anchor,
            self.sampling.end_of_stroke_time_step(),
            self.sampling.end_of_stroke_max_iterations(),
            self.sampling.end_of_stroke_stopping_distance(),
            out,
        );
    }
}
