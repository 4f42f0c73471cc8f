//! Stroke modeling sessions for inkstroke
//!
//! A [`StrokeModeler`] turns raw DOWN/MOVE/UP pointer samples into a smooth,
//! evenly resampled stroke and can extrapolate it past the last input to
//! hide latency. Results are written into caller-provided buffers; the
//! returned [`OutputCount`] reports how many were written and how many the
//! call produced in total.

mod output;
mod pipeline;
mod session;

pub use output::*;
pub use session::*;

pub use inkstroke_core::{
    EventType, Input, ModelError, ModelResult, PredictionKind, StatusCode, StrokeModelParams,
    StrokeResult, StylusState, Vec2,
};

pub mod prelude {
    pub use crate::output::OutputCount;
    pub use crate::session::{SessionPhase, StrokeModeler};
    pub use inkstroke_core::prelude::*;
}
