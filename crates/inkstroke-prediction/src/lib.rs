//! Trajectory prediction for inkstroke
//!
//! Predictors extrapolate the modeled stroke past the last committed
//! sample to hide input latency. They never mutate the session: `predict`
//! takes `&self` and writes into a caller-supplied sink.

mod kalman;
mod predictor;
mod stroke_end;

pub use kalman::*;
pub use predictor::*;
pub use stroke_end::*;

pub mod prelude {
    pub use crate::kalman::{KalmanFilter, KalmanPredictor};
    pub use crate::predictor::{PredictionInput, Predictor, TrajectoryPredictor};
    pub use crate::stroke_end::StrokeEndPredictor;
}
