//! The stroke modeling session.
//!
//! ```text
//! Uninitialized --reset--> Idle --DOWN--> InStroke --UP--> Idle
//! ```
//!
//! Every fallible call validates before it mutates, so an error leaves the
//! session exactly as it was.

use inkstroke_core::{
    Input, ModelError, ModelResult, PredictionKind, StrokeModelParams, StrokeResult,
};

use crate::output::{write_results, OutputCount};
use crate::pipeline::{ResultBuffer, StrokePhase, StrokePipeline};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    /// No parameter set has been applied yet.
    Uninitialized,
    /// Ready for a DOWN.
    Idle,
    /// Between a DOWN and its UP.
    InStroke,
}

/// Models one stroke at a time from raw pointer input.
///
/// Not internally synchronized; distinct sessions share nothing and may be
/// driven from different threads.
#[derive(Debug, Default)]
pub struct StrokeModeler {
    params: Option<StrokeModelParams>,
    pipeline: Option<StrokePipeline>,
    snapshot: Option<StrokePipeline>,
    scratch: ResultBuffer,
}

impl StrokeModeler {
    /// Creates an uninitialized session; call [`reset_with_params`](Self::reset_with_params) first.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session already reset with `params`.
    pub fn with_params(params: StrokeModelParams) -> ModelResult<Self> {
        let mut modeler = Self::new();
        modeler.reset_with_params(params)?;
        Ok(modeler)
    }

    pub fn phase(&self) -> SessionPhase {
        match self.pipeline.as_ref().map(StrokePipeline::phase) {
            None => SessionPhase::Uninitialized,
            Some(StrokePhase::Idle) => SessionPhase::Idle,
            Some(StrokePhase::InStroke) => SessionPhase::InStroke,
        }
    }

    /// The parameter set applied by the last successful parameterized reset.
    pub fn params(&self) -> Option<&StrokeModelParams> {
        self.params.as_ref()
    }

    pub fn prediction_kind(&self) -> Option<PredictionKind> {
        self.params.map(|params| params.prediction.kind())
    }

    /// The most recent committed result of the current or last stroke.
    pub fn last_result(&self) -> Option<StrokeResult> {
        self.pipeline.as_ref().and_then(StrokePipeline::last_result)
    }

    pub fn has_snapshot(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Validates `params` and reinitializes the session with them.
    ///
    /// On error the session, including its previous parameters, is untouched.
    pub fn reset_with_params(&mut self, params: StrokeModelParams) -> ModelResult<()> {
        params.validate()?;
        log::debug!(
            "resetting stroke modeler with {:?} prediction",
            params.prediction.kind()
        );
        self.params = Some(params);
        self.reinitialize(&params);
        Ok(())
    }

    /// Reinitializes the session with the last applied parameters.
    pub fn reset(&mut self) -> ModelResult<()> {
        let params = self.params.ok_or(ModelError::FailedPrecondition(
            "reset requires a prior successful reset with parameters",
        ))?;
        log::debug!("resetting stroke modeler");
        self.reinitialize(&params);
        Ok(())
    }

    /// Feeds one input and writes the resulting samples into `out`.
    ///
    /// When `out` is too short the leading results are written and
    /// [`OutputCount::total`] reports how many were produced.
    pub fn update(&mut self, input: &Input, out: &mut [StrokeResult]) -> ModelResult<OutputCount> {
        let requested = self.run_update(input)?;
        Ok(write_results(&self.scratch, out, requested))
    }

    /// Like [`update`](Self::update) but returns every result.
    pub fn update_to_vec(&mut self, input: &Input) -> ModelResult<Vec<StrokeResult>> {
        self.run_update(input)?;
        Ok(self.scratch.to_vec())
    }

    /// Writes the predicted continuation of the stroke into `out`.
    ///
    /// Read-only: repeated calls without an intervening update return the
    /// same results.
    pub fn predict(&self, out: &mut [StrokeResult]) -> ModelResult<OutputCount> {
        let mut results = ResultBuffer::new();
        self.run_predict(&mut results)?;
        Ok(write_results(&results, out, results.len()))
    }

    pub fn predict_to_vec(&self) -> ModelResult<Vec<StrokeResult>> {
        let mut results = ResultBuffer::new();
        self.run_predict(&mut results)?;
        Ok(results.into_vec())
    }

    /// Captures the stroke state, replacing any earlier capture.
    pub fn save(&mut self) -> ModelResult<()> {
        let pipeline = self.pipeline.as_ref().ok_or(ModelError::FailedPrecondition(
            "save requires a prior reset",
        ))?;
        self.snapshot = Some(pipeline.clone());
        log::debug!("saved stroke state");
        Ok(())
    }

    /// Returns to the last saved stroke state. The capture is kept, so it
    /// can be restored again.
    pub fn restore(&mut self) -> ModelResult<()> {
        let snapshot = self
            .snapshot
            .as_ref()
            .ok_or(ModelError::FailedPrecondition("restore requires a prior save"))?;
        self.pipeline = Some(snapshot.clone());
        log::debug!("restored stroke state");
        Ok(())
    }

    fn reinitialize(&mut self, params: &StrokeModelParams) {
        self.pipeline = Some(StrokePipeline::new(params));
        self.snapshot = None;
        self.scratch.clear();
    }

    /// Runs `input` on a copy of the pipeline and commits it only if every
    /// produced state is finite. Results are left in `scratch`.
    fn run_update(&mut self, input: &Input) -> ModelResult<usize> {
        let pipeline = self.pipeline.as_ref().ok_or(ModelError::FailedPrecondition(
            "update requires a prior reset",
        ))?;
        pipeline.check(input)?;

        let mut next = pipeline.clone();
        self.scratch.clear();
        let requested = next.apply(input, &mut self.scratch);
        if let Err(error) = ensure_finite(&self.scratch) {
            self.scratch.clear();
            return Err(error);
        }

        log::trace!(
            "{:?} at t = {} produced {} results",
            input.event_type,
            input.time,
            self.scratch.len()
        );
        self.pipeline = Some(next);
        Ok(requested)
    }

    fn run_predict(&self, results: &mut ResultBuffer) -> ModelResult<()> {
        let pipeline = self.pipeline.as_ref().ok_or(ModelError::FailedPrecondition(
            "predict requires a prior reset",
        ))?;
        pipeline.predict(results)?;
        ensure_finite(results)?;
        log::trace!("prediction produced {} results", results.len());
        Ok(())
    }
}

fn ensure_finite(results: &[StrokeResult]) -> ModelResult<()> {
    match results.iter().find(|result| !result.tip_state().is_finite()) {
        Some(result) => Err(ModelError::Internal(format!(
            "simulation produced a non-finite state at t = {}",
            result.time
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
