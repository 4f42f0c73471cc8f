//! Per-stroke state: every stage plus the last committed input.
//!
//! A `StrokePipeline` is cloned for speculative work, both for the
//! all-or-nothing update in the session and for the Save/Restore slot, so
//! it holds only bounded windows and never the full stroke history.

use inkstroke_core::{
    EventType, Input, ModelError, ModelResult, PositionModeler, SamplingController,
    StrokeModelParams, StrokeResult, StylusStateModeler, TipState, WobbleSmoother,
};
use inkstroke_geometry::Vec2;
use inkstroke_prediction::{PredictionInput, Predictor, TrajectoryPredictor};
use smallvec::SmallVec;

pub(crate) type ResultBuffer = SmallVec<[StrokeResult; 32]>;
type TipBuffer = SmallVec<[TipState; 32]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StrokePhase {
    Idle,
    InStroke,
}

/// The smoothed position the spring was last pulled toward.
#[derive(Clone, Copy, Debug)]
struct Anchor {
    position: Vec2,
    time: f64,
}

#[derive(Clone, Debug)]
pub(crate) struct StrokePipeline {
    phase: StrokePhase,
    wobble: WobbleSmoother,
    sampling: SamplingController,
    position: PositionModeler,
    stylus: StylusStateModeler,
    predictor: Predictor,
    anchor: Option<Anchor>,
    last_result: Option<StrokeResult>,
}

impl StrokePipeline {
    pub(crate) fn new(params: &StrokeModelParams) -> Self {
        Self {
            phase: StrokePhase::Idle,
            wobble: WobbleSmoother::new(params.wobble),
            sampling: SamplingController::new(params.sampling),
            position: PositionModeler::new(params.position, TipState::default()),
            stylus: StylusStateModeler::new(params.stylus_state),
            predictor: Predictor::new(&params.prediction, params.sampling),
            anchor: None,
            last_result: None,
        }
    }

    pub(crate) fn phase(&self) -> StrokePhase {
        self.phase
    }

    pub(crate) fn last_result(&self) -> Option<StrokeResult> {
        self.last_result
    }

    /// Rejects inputs that are malformed or out of order for the current phase.
    pub(crate) fn check(&self, input: &Input) -> ModelResult<()> {
        if !input.position.is_finite() || !input.time.is_finite() {
            return Err(ModelError::InvalidArgument(format!(
                "input position ({}, {}) and time {} must be finite",
                input.position.x, input.position.y, input.time
            )));
        }
        if !(input.pressure.is_finite() && input.tilt.is_finite() && input.orientation.is_finite())
        {
            return Err(ModelError::InvalidArgument(format!(
                "stylus values must be finite; got pressure {}, tilt {}, orientation {}",
                input.pressure, input.tilt, input.orientation
            )));
        }

        match (self.phase, input.event_type) {
            (StrokePhase::Idle, EventType::Down) => Ok(()),
            (StrokePhase::Idle, _) => Err(ModelError::FailedPrecondition(
                "received MOVE or UP without a preceding DOWN",
            )),
            (StrokePhase::InStroke, EventType::Down) => Err(ModelError::FailedPrecondition(
                "received DOWN while a stroke is in progress",
            )),
            (StrokePhase::InStroke, _) => match self.anchor {
                Some(anchor) if input.time <= anchor.time => {
                    Err(ModelError::InvalidArgument(format!(
                        "input time {} must be after the previous input time {}",
                        input.time, anchor.time
                    )))
                }
                _ => Ok(()),
            },
        }
    }

    /// Runs a checked input through every stage, appending results to `out`.
    ///
    /// Returns the number of results the sampling bounds asked for.
    pub(crate) fn apply(&mut self, input: &Input, out: &mut ResultBuffer) -> usize {
        match input.event_type {
            EventType::Down => self.begin(input, out),
            EventType::Move => self.advance(input, out),
            EventType::Up => {
                let requested = self.advance(input, out);
                requested + self.finish(input, out)
            }
        }
    }

    /// Extrapolates past the last committed result without changing any state.
    pub(crate) fn predict(&self, out: &mut ResultBuffer) -> ModelResult<()> {
        let anchor = match (self.phase, self.anchor) {
            (StrokePhase::InStroke, Some(anchor)) => anchor,
            _ => {
                return Err(ModelError::FailedPrecondition(
                    "predict requires a stroke in progress",
                ))
            }
        };

        let mut tips = TipBuffer::new();
        self.predictor.predict(
            &PredictionInput {
                modeler: &self.position,
                anchor: anchor.position,
            },
            &mut tips,
        );
        let stylus = self.stylus.latest();
        out.extend(tips.iter().map(|tip| StrokeResult::new(*tip, stylus)));
        Ok(())
    }

    fn begin(&mut self, input: &Input, out: &mut ResultBuffer) -> usize {
        log::debug!(
            "stroke begins at ({}, {}), t = {}",
            input.position.x,
            input.position.y,
            input.time
        );
        self.wobble.reset();
        self.stylus.reset();
        self.predictor.reset();
        self.position
            .reset(TipState::at_rest(input.position, input.time));

        let anchor = self.wobble.update(input.position, input.time);
        self.stylus.update(input.position, input.stylus_state());
        self.predictor.update(anchor, input.time);
        self.anchor = Some(Anchor {
            position: anchor,
            time: input.time,
        });
        self.phase = StrokePhase::InStroke;

        let result = StrokeResult::new(self.position.state(), self.stylus.latest());
        out.push(result);
        self.last_result = Some(result);
        1
    }

    fn advance(&mut self, input: &Input, out: &mut ResultBuffer) -> usize {
        let Some(previous) = self.anchor else {
            return 0;
        };
        let anchor = self.wobble.update(input.position, input.time);
        self.stylus.update(input.position, input.stylus_state());
        self.predictor.update(anchor, input.time);

        let plan = self.sampling.plan(
            &self.position.state(),
            anchor,
            previous.time,
            input.time,
            out.len(),
        );
        let mut tips = TipBuffer::new();
        self.position.update_along_linear_path(
            previous.position,
            previous.time,
            anchor,
            input.time,
            plan.steps,
            &mut tips,
        );
        self.emit(&tips, out);
        self.anchor = Some(Anchor {
            position: anchor,
            time: input.time,
        });
        plan.requested
    }

    /// Lets the tip settle onto the final raw position.
    ///
    /// Returns the number of settling steps the stroke needed, which exceeds
    /// the emitted count when `max_outputs_per_call` cut the tail short.
    fn finish(&mut self, input: &Input, out: &mut ResultBuffer) -> usize {
        let max_iterations = self.sampling.end_of_stroke_max_iterations();
        let budget = self.sampling.end_of_stroke_budget(out.len());
        let time_step = self.sampling.end_of_stroke_time_step();
        let stopping_distance = self.sampling.end_of_stroke_stopping_distance();

        let needed = if budget < max_iterations {
            let mut uncapped = TipBuffer::new();
            self.position.clone().model_end_of_stroke(
                input.position,
                time_step,
                max_iterations,
                stopping_distance,
                &mut uncapped,
            )
        } else {
            0
        };

        let mut tips = TipBuffer::new();
        let emitted = self.position.model_end_of_stroke(
            input.position,
            time_step,
            budget,
            stopping_distance,
            &mut tips,
        );
        self.emit(&tips, out);
        self.phase = StrokePhase::Idle;

        let needed = needed.max(emitted);
        if needed > emitted {
            log::warn!(
                "dropping {} of {} settling steps (max_outputs_per_call = {})",
                needed - emitted,
                needed,
                self.sampling.max_outputs_per_call()
            );
        }
        log::debug!(
            "stroke ends at t = {} after {} settling steps",
            input.time,
            emitted
        );
        needed
    }

    fn emit(&mut self, tips: &[TipState], out: &mut ResultBuffer) {
        for tip in tips {
            let result = StrokeResult::new(*tip, self.stylus.query(tip.position, tip.velocity));
            out.push(result);
            self.last_result = Some(result);
        }
    }
}
