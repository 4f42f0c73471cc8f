//! Core stages of the inkstroke model
//!
//! Raw pointer samples flow through the stages in this crate in order:
//! [`WobbleSmoother`] removes low-speed jitter, [`SamplingController`]
//! decides how many intermediate steps to synthesize, [`PositionModeler`]
//! runs the spring-mass-drag simulation for each step, and
//! [`StylusStateModeler`] fills in pressure, tilt and orientation for every
//! simulated tip position.
//!
//! Session orchestration lives in `inkstroke-modeler`; prediction lives in
//! `inkstroke-prediction`.

mod error;
mod params;
mod position;
mod sampling;
mod stylus;
mod types;
mod wobble;

pub use error::*;
pub use params::*;
pub use position::*;
pub use sampling::*;
pub use stylus::*;
pub use types::*;
pub use wobble::*;

pub use inkstroke_geometry::Vec2;

pub mod prelude {
    pub use crate::error::{ModelError, ModelResult, StatusCode};
    pub use crate::params::{
        KalmanConfidenceParams, KalmanPredictorParams, LoopContractionMitigationParams,
        PositionModelerParams, PredictionKind, PredictionParams, SamplingParams,
        StrokeModelParams, StylusStateModelerParams, WobbleSmootherParams,
    };
    pub use crate::types::{EventType, Input, StrokeResult, StylusState, TipState};
    pub use inkstroke_geometry::Vec2;
}
