//! How far a Kalman prediction can be trusted.

use inkstroke_core::KalmanConfidenceParams;
use inkstroke_geometry::{interp, normalize01};

/// Predictions below this confidence are dropped entirely.
pub const MIN_PREDICTION_CONFIDENCE: f32 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfidenceFactors {
    /// Distance between the filter's position estimate and the last observed sample.
    pub estimation_distance: f32,
    /// Estimated travel speed.
    pub speed: f32,
    /// Distance between the predicted tail end and a straight-line extrapolation.
    pub linear_deviation: f32,
}

/// Multiplicative confidence in [0, 1].
///
/// Large estimation error and slow travel each push confidence to zero;
/// curvature only lowers it to `baseline_linearity_confidence`.
pub fn prediction_confidence(params: &KalmanConfidenceParams, factors: ConfidenceFactors) -> f32 {
    let distance_confidence =
        1.0 - normalize01(0.0, params.max_estimation_distance, factors.estimation_distance);
    let speed_confidence =
        normalize01(params.min_travel_speed, params.max_travel_speed, factors.speed);
    let linearity_confidence = interp(
        1.0,
        params.baseline_linearity_confidence,
        normalize01(0.0, params.max_linear_deviation, factors.linear_deviation),
    );
    (distance_confidence * speed_confidence * linearity_confidence).clamp(0.0, 1.0)
}

/// Number of predicted samples worth returning at `confidence`.
///
/// Sample `i` of `desired` is kept only while `i / desired <= confidence`.
pub fn trusted_sample_count(desired: usize, confidence: f32) -> usize {
    if confidence.is_nan() || confidence < MIN_PREDICTION_CONFIDENCE {
        return 0;
    }
    ((desired as f32 * confidence).floor() as usize).min(desired)
}
