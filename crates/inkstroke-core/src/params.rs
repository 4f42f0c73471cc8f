//! Parameter set for a stroke model.
//!
//! Five independently configurable sub-models: wobble smoothing, position
//! (spring/drag plus loop mitigation), sampling, stylus state and
//! prediction. The `Default` impls are the known-good baseline: wobble
//! smoothing disabled and stroke-end prediction.

use std::fmt::Display;

use crate::error::{ModelError, ModelResult};

/// Upper bound on `end_of_stroke_max_iterations`.
pub const MAX_END_OF_STROKE_ITERATIONS: i32 = 1000;

/// Sentinel that disables angle-based subdivision.
pub const ANGLE_SUBDIVISION_DISABLED: f64 = -1.0;

fn ensure(
    condition: bool,
    field: &'static str,
    requirement: &'static str,
    value: impl Display,
) -> ModelResult<()> {
    if condition {
        Ok(())
    } else {
        Err(ModelError::InvalidArgument(format!(
            "{field} must be {requirement}; got {value}"
        )))
    }
}

/// Low-speed jitter removal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WobbleSmootherParams {
    /// When false the other fields are ignored and positions pass through.
    pub is_enabled: bool,
    /// Length of the sliding window.
    pub timeout: f64,
    /// At or below this speed the averaged position is used.
    pub speed_floor: f32,
    /// At or above this speed the raw position is used.
    pub speed_ceiling: f32,
}

impl WobbleSmootherParams {
    pub fn enabled() -> Self {
        Self {
            is_enabled: true,
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: f64) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_speed_range(mut self, speed_floor: f32, speed_ceiling: f32) -> Self {
        self.speed_floor = speed_floor;
        self.speed_ceiling = speed_ceiling;
        self
    }

    pub fn validate(&self) -> ModelResult<()> {
        if !self.is_enabled {
            return Ok(());
        }
        ensure(
            self.timeout >= 0.0 && self.timeout.is_finite(),
            "wobble.timeout",
            "a finite value >= 0",
            self.timeout,
        )?;
        ensure(
            self.speed_floor >= 0.0 && self.speed_floor.is_finite(),
            "wobble.speed_floor",
            "a finite value >= 0",
            self.speed_floor,
        )?;
        ensure(
            self.speed_ceiling >= self.speed_floor && self.speed_ceiling.is_finite(),
            "wobble.speed_ceiling",
            "finite and >= wobble.speed_floor",
            self.speed_ceiling,
        )
    }
}

impl Default for WobbleSmootherParams {
    fn default() -> Self {
        Self {
            is_enabled: false,
            timeout: 0.04,
            speed_floor: 1.31,
            speed_ceiling: 1.44,
        }
    }
}

/// Speed-dependent blending between the spring model and the raw anchor.
///
/// The interpolation strength is the weight given to the simulated
/// position: 1 keeps the spring result, 0 snaps to the anchor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoopContractionMitigationParams {
    pub is_enabled: bool,
    pub speed_lower_bound: f32,
    pub speed_upper_bound: f32,
    pub interpolation_strength_at_speed_lower_bound: f32,
    pub interpolation_strength_at_speed_upper_bound: f32,
    /// Trailing window the speed estimate is averaged over.
    pub min_speed_sampling_window: f64,
}

impl LoopContractionMitigationParams {
    pub fn enabled(
        speed_lower_bound: f32,
        speed_upper_bound: f32,
        strength_at_lower_bound: f32,
        strength_at_upper_bound: f32,
    ) -> Self {
        Self {
            is_enabled: true,
            speed_lower_bound,
            speed_upper_bound,
            interpolation_strength_at_speed_lower_bound: strength_at_lower_bound,
            interpolation_strength_at_speed_upper_bound: strength_at_upper_bound,
            ..Self::default()
        }
    }

    pub fn with_sampling_window(mut self, window: f64) -> Self {
        self.min_speed_sampling_window = window;
        self
    }

    pub fn validate(&self) -> ModelResult<()> {
        if !self.is_enabled {
            return Ok(());
        }
        ensure(
            self.speed_lower_bound >= 0.0 && self.speed_lower_bound.is_finite(),
            "position.loop_mitigation.speed_lower_bound",
            "a finite value >= 0",
            self.speed_lower_bound,
        )?;
        ensure(
            self.speed_upper_bound >= self.speed_lower_bound && self.speed_upper_bound.is_finite(),
            "position.loop_mitigation.speed_upper_bound",
            "finite and >= speed_lower_bound",
            self.speed_upper_bound,
        )?;
        ensure(
            (0.0..=1.0).contains(&self.interpolation_strength_at_speed_lower_bound),
            "position.loop_mitigation.interpolation_strength_at_speed_lower_bound",
            "in [0, 1]",
            self.interpolation_strength_at_speed_lower_bound,
        )?;
        ensure(
            (0.0..=1.0).contains(&self.interpolation_strength_at_speed_upper_bound),
            "position.loop_mitigation.interpolation_strength_at_speed_upper_bound",
            "in [0, 1]",
            self.interpolation_strength_at_speed_upper_bound,
        )?;
        ensure(
            self.min_speed_sampling_window >= 0.0 && self.min_speed_sampling_window.is_finite(),
            "position.loop_mitigation.min_speed_sampling_window",
            "a finite value >= 0",
            self.min_speed_sampling_window,
        )
    }
}

impl Default for LoopContractionMitigationParams {
    fn default() -> Self {
        Self {
            is_enabled: false,
            speed_lower_bound: 0.0,
            speed_upper_bound: 0.0,
            interpolation_strength_at_speed_lower_bound: 1.0,
            interpolation_strength_at_speed_upper_bound: 1.0,
            min_speed_sampling_window: 0.0,
        }
    }
}

/// Spring-mass-drag model of the pen tip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionModelerParams {
    /// Ratio of the spring's mass to its stiffness; smaller follows faster.
    pub spring_mass_constant: f32,
    pub drag_constant: f32,
    pub loop_mitigation: LoopContractionMitigationParams,
}

impl PositionModelerParams {
    pub fn with_loop_mitigation(mut self, loop_mitigation: LoopContractionMitigationParams) -> Self {
        self.loop_mitigation = loop_mitigation;
        self
    }

    pub fn validate(&self) -> ModelResult<()> {
        ensure(
            self.spring_mass_constant > 0.0 && self.spring_mass_constant.is_finite(),
            "position.spring_mass_constant",
            "a finite value > 0",
            self.spring_mass_constant,
        )?;
        ensure(
            self.drag_constant > 0.0 && self.drag_constant.is_finite(),
            "position.drag_constant",
            "a finite value > 0",
            self.drag_constant,
        )?;
        self.loop_mitigation.validate()
    }
}

impl Default for PositionModelerParams {
    fn default() -> Self {
        Self {
            spring_mass_constant: 11.0 / 32400.0,
            drag_constant: 72.0,
            loop_mitigation: LoopContractionMitigationParams::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplingParams {
    /// Minimum number of outputs per unit of time.
    pub min_output_rate: f64,
    /// End-of-stroke settling stops once the tip is this close to rest.
    pub end_of_stroke_stopping_distance: f32,
    pub end_of_stroke_max_iterations: i32,
    pub max_outputs_per_call: i32,
    /// Radians; [`ANGLE_SUBDIVISION_DISABLED`] turns the check off.
    pub max_estimated_angle_to_traverse_per_input: f64,
}

impl SamplingParams {
    pub fn with_min_output_rate(mut self, min_output_rate: f64) -> Self {
        self.min_output_rate = min_output_rate;
        self
    }

    pub fn with_max_outputs_per_call(mut self, max_outputs_per_call: i32) -> Self {
        self.max_outputs_per_call = max_outputs_per_call;
        self
    }

    pub fn with_max_angle_per_input(mut self, radians: f64) -> Self {
        self.max_estimated_angle_to_traverse_per_input = radians;
        self
    }

    pub fn with_end_of_stroke(mut self, stopping_distance: f32, max_iterations: i32) -> Self {
        self.end_of_stroke_stopping_distance = stopping_distance;
        self.end_of_stroke_max_iterations = max_iterations;
        self
    }

    pub fn validate(&self) -> ModelResult<()> {
        ensure(
            self.min_output_rate > 0.0 && self.min_output_rate.is_finite(),
            "sampling.min_output_rate",
            "a finite value > 0",
            self.min_output_rate,
        )?;
        ensure(
            self.end_of_stroke_stopping_distance > 0.0
                && self.end_of_stroke_stopping_distance.is_finite(),
            "sampling.end_of_stroke_stopping_distance",
            "a finite value > 0",
            self.end_of_stroke_stopping_distance,
        )?;
        ensure(
            self.end_of_stroke_max_iterations > 0
                && self.end_of_stroke_max_iterations <= MAX_END_OF_STROKE_ITERATIONS,
            "sampling.end_of_stroke_max_iterations",
            "in (0, 1000]",
            self.end_of_stroke_max_iterations,
        )?;
        ensure(
            self.max_outputs_per_call > 0,
            "sampling.max_outputs_per_call",
            "> 0",
            self.max_outputs_per_call,
        )?;
        ensure(
            self.max_estimated_angle_to_traverse_per_input == ANGLE_SUBDIVISION_DISABLED
                || (self.max_estimated_angle_to_traverse_per_input > 0.0
                    && self.max_estimated_angle_to_traverse_per_input.is_finite()),
            "sampling.max_estimated_angle_to_traverse_per_input",
            "-1 or a finite value > 0",
            self.max_estimated_angle_to_traverse_per_input,
        )
    }
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            min_output_rate: 180.0,
            end_of_stroke_stopping_distance: 0.001,
            end_of_stroke_max_iterations: 20,
            max_outputs_per_call: 100_000,
            max_estimated_angle_to_traverse_per_input: ANGLE_SUBDIVISION_DISABLED,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct StylusStateModelerParams {
    /// Locate progress by casting along the stroke normal instead of taking
    /// the closest point on the raw polyline.
    pub use_stroke_normal_projection: bool,
}

impl StylusStateModelerParams {
    pub fn validate(&self) -> ModelResult<()> {
        Ok(())
    }
}

/// Boundary tag for the prediction strategy. Discriminants are part of the
/// interop contract.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PredictionKind {
    StrokeEnd = 0,
    Kalman = 1,
    Disabled = 2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KalmanConfidenceParams {
    pub desired_number_of_samples: i32,
    /// Estimation error at which distance confidence reaches zero.
    pub max_estimation_distance: f32,
    pub min_travel_speed: f32,
    pub max_travel_speed: f32,
    /// Deviation from a straight line at which linearity confidence bottoms out.
    pub max_linear_deviation: f32,
    pub baseline_linearity_confidence: f32,
}

impl KalmanConfidenceParams {
    pub fn validate(&self) -> ModelResult<()> {
        ensure(
            self.desired_number_of_samples > 0,
            "prediction.kalman.confidence.desired_number_of_samples",
            "> 0",
            self.desired_number_of_samples,
        )?;
        ensure(
            self.max_estimation_distance > 0.0 && self.max_estimation_distance.is_finite(),
            "prediction.kalman.confidence.max_estimation_distance",
            "a finite value > 0",
            self.max_estimation_distance,
        )?;
        ensure(
            self.min_travel_speed >= 0.0 && self.min_travel_speed.is_finite(),
            "prediction.kalman.confidence.min_travel_speed",
            "a finite value >= 0",
            self.min_travel_speed,
        )?;
        ensure(
            self.max_travel_speed > self.min_travel_speed && self.max_travel_speed.is_finite(),
            "prediction.kalman.confidence.max_travel_speed",
            "finite and > min_travel_speed",
            self.max_travel_speed,
        )?;
        ensure(
            self.max_linear_deviation > 0.0 && self.max_linear_deviation.is_finite(),
            "prediction.kalman.confidence.max_linear_deviation",
            "a finite value > 0",
            self.max_linear_deviation,
        )?;
        ensure(
            (0.0..=1.0).contains(&self.baseline_linearity_confidence),
            "prediction.kalman.confidence.baseline_linearity_confidence",
            "in [0, 1]",
            self.baseline_linearity_confidence,
        )
    }
}

impl Default for KalmanConfidenceParams {
    fn default() -> Self {
        Self {
            desired_number_of_samples: 20,
            max_estimation_distance: 1.5,
            min_travel_speed: 6.0,
            max_travel_speed: 30.0,
            max_linear_deviation: 10.0,
            baseline_linearity_confidence: 0.4,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KalmanPredictorParams {
    pub process_noise: f64,
    pub measurement_noise: f64,
    /// Updates required after a reset before predictions are trusted.
    pub min_stable_iteration: i32,
    /// Bound on the sample-interval history.
    pub max_time_samples: i32,
    pub min_catchup_velocity: f32,
    pub acceleration_weight: f32,
    pub jerk_weight: f32,
    /// Spacing between predicted samples.
    pub prediction_interval: f64,
    pub confidence: KalmanConfidenceParams,
}

impl KalmanPredictorParams {
    pub fn with_min_stable_iteration(mut self, min_stable_iteration: i32) -> Self {
        self.min_stable_iteration = min_stable_iteration;
        self
    }

    pub fn with_noise(mut self, process_noise: f64, measurement_noise: f64) -> Self {
        self.process_noise = process_noise;
        self.measurement_noise = measurement_noise;
        self
    }

    pub fn with_confidence(mut self, confidence: KalmanConfidenceParams) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn validate(&self) -> ModelResult<()> {
        ensure(
            self.process_noise > 0.0 && self.process_noise.is_finite(),
            "prediction.kalman.process_noise",
            "a finite value > 0",
            self.process_noise,
        )?;
        ensure(
            self.measurement_noise > 0.0 && self.measurement_noise.is_finite(),
            "prediction.kalman.measurement_noise",
            "a finite value > 0",
            self.measurement_noise,
        )?;
        ensure(
            self.min_stable_iteration > 0,
            "prediction.kalman.min_stable_iteration",
            "> 0",
            self.min_stable_iteration,
        )?;
        ensure(
            self.max_time_samples > 0,
            "prediction.kalman.max_time_samples",
            "> 0",
            self.max_time_samples,
        )?;
        ensure(
            self.min_catchup_velocity >= 0.0 && self.min_catchup_velocity.is_finite(),
            "prediction.kalman.min_catchup_velocity",
            "a finite value >= 0",
            self.min_catchup_velocity,
        )?;
        ensure(
            self.acceleration_weight.is_finite(),
            "prediction.kalman.acceleration_weight",
            "finite",
            self.acceleration_weight,
        )?;
        ensure(
            self.jerk_weight.is_finite(),
            "prediction.kalman.jerk_weight",
            "finite",
            self.jerk_weight,
        )?;
        ensure(
            self.prediction_interval > 0.0 && self.prediction_interval.is_finite(),
            "prediction.kalman.prediction_interval",
            "a finite value > 0",
            self.prediction_interval,
        )?;
        self.confidence.validate()
    }
}

impl Default for KalmanPredictorParams {
    fn default() -> Self {
        Self {
            process_noise: 1.0,
            measurement_noise: 1.0,
            min_stable_iteration: 4,
            max_time_samples: 20,
            min_catchup_velocity: 0.0,
            acceleration_weight: 0.5,
            jerk_weight: 0.1,
            prediction_interval: 0.02,
            confidence: KalmanConfidenceParams::default(),
        }
    }
}

/// Prediction strategy, selected at reset time.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum PredictionParams {
    #[default]
    StrokeEnd,
    Kalman(KalmanPredictorParams),
    Disabled,
}

impl PredictionParams {
    pub fn kind(&self) -> PredictionKind {
        match self {
            PredictionParams::StrokeEnd => PredictionKind::StrokeEnd,
            PredictionParams::Kalman(_) => PredictionKind::Kalman,
            PredictionParams::Disabled => PredictionKind::Disabled,
        }
    }

    pub fn validate(&self) -> ModelResult<()> {
        match self {
            PredictionParams::Kalman(params) => params.validate(),
            PredictionParams::StrokeEnd | PredictionParams::Disabled => Ok(()),
        }
    }
}

/// The complete parameter set applied by a parameterized reset.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct StrokeModelParams {
    pub wobble: WobbleSmootherParams,
    pub position: PositionModelerParams,
    pub sampling: SamplingParams,
    pub stylus_state: StylusStateModelerParams,
    pub prediction: PredictionParams,
}

impl StrokeModelParams {
    pub fn with_wobble(mut self, wobble: WobbleSmootherParams) -> Self {
        self.wobble = wobble;
        self
    }

    pub fn with_position(mut self, position: PositionModelerParams) -> Self {
        self.position = position;
        self
    }

    pub fn with_sampling(mut self, sampling: SamplingParams) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn with_stylus_state(mut self, stylus_state: StylusStateModelerParams) -> Self {
        self.stylus_state = stylus_state;
        self
    }

    pub fn with_prediction(mut self, prediction: PredictionParams) -> Self {
        self.prediction = prediction;
        self
    }

    /// Checks every sub-model and reports the first violated invariant.
    pub fn validate(&self) -> ModelResult<()> {
        self.wobble.validate()?;
        self.position.validate()?;
        self.sampling.validate()?;
        self.stylus_state.validate()?;
        self.prediction.validate()
    }
}

#[cfg(test)]
#[path = "tests/params_tests.rs"]
mod tests;
