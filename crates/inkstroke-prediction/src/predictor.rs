//! Predictor strategies behind one tagged type.

use inkstroke_core::{PositionModeler, PredictionKind, PredictionParams, SamplingParams, TipState};
use inkstroke_geometry::Vec2;

use crate::kalman::KalmanPredictor;
use crate::stroke_end::StrokeEndPredictor;

/// What a predictor may read from the session.
#[derive(Clone, Copy, Debug)]
pub struct PredictionInput<'a> {
    /// The session's position model, positioned at the last committed tip.
    pub modeler: &'a PositionModeler,
    /// The spring anchor the tip was last pulled toward.
    pub anchor: Vec2,
}

impl PredictionInput<'_> {
    pub fn tip(&self) -> TipState {
        self.modeler.state()
    }
}

/// Capability shared by every prediction strategy.
pub trait TrajectoryPredictor {
    /// Forgets all history; called at the start of each stroke.
    fn reset(&mut self);

    /// Feeds one input sample after wobble smoothing.
    fn update(&mut self, position: Vec2, time: f64);

    /// Appends predicted tip states, strictly after the current tip time.
    fn predict<E>(&self, input: &PredictionInput<'_>, out: &mut E)
    where
        E: Extend<TipState>;
}

/// The strategy selected at reset time.
#[derive(Clone, Debug)]
pub enum Predictor {
    StrokeEnd(StrokeEndPredictor),
    Kalman(KalmanPredictor),
    Disabled,
}

impl Predictor {
    pub fn new(params: &PredictionParams, sampling: SamplingParams) -> Self {
        match params {
            PredictionParams::StrokeEnd => Predictor::StrokeEnd(StrokeEndPredictor::new(sampling)),
            PredictionParams::Kalman(kalman) => Predictor::Kalman(KalmanPredictor::new(*kalman)),
            PredictionParams::Disabled => Predictor::Disabled,
        }
    }

    pub fn kind(&self) -> PredictionKind {
        match self {
            Predictor::StrokeEnd(_) => PredictionKind::StrokeEnd,
            Predictor::Kalman(_) => PredictionKind::Kalman,
            Predictor::Disabled => PredictionKind::Disabled,
        }
    }
}

impl TrajectoryPredictor for Predictor {
    fn reset(&mut self) {
        match self {
            Predictor::StrokeEnd(predictor) => predictor.reset(),
            Predictor::Kalman(predictor) => predictor.reset(),
            Predictor::Disabled => {}
        }
    }

    fn update(&mut self, position: Vec2, time: f64) {
        match self {
            Predictor::StrokeEnd(predictor) => predictor.update(position, time),
            Predictor::Kalman(predictor) => predictor.update(position, time),
            Predictor::Disabled => {}
        }
    }

    fn predict<E>(&self, input: &PredictionInput<'_>, out: &mut E)
    where
        E: Extend<TipState>,
    {
        match self {
            Predictor::StrokeEnd(predictor) => predictor.predict(input, out),
            Predictor::Kalman(predictor) => predictor.predict(input, out),
            Predictor::Disabled => {}
        }
    }
}
