use super::*;
use crate::error::StatusCode;

fn message_of(result: ModelResult<()>) -> String {
    match result {
        Ok(()) => panic!("expected validation to fail"),
        Err(error) => {
            assert_eq!(error.code(), StatusCode::InvalidArgument);
            error.message().to_owned()
        }
    }
}

#[test]
fn defaults_are_valid_baseline() {
    let params = StrokeModelParams::default();
    assert!(params.validate().is_ok());
    assert!(!params.wobble.is_enabled);
    assert_eq!(params.prediction.kind(), PredictionKind::StrokeEnd);
    assert!(!params.position.loop_mitigation.is_enabled);
}

#[test]
fn default_kalman_params_are_valid() {
    let params = StrokeModelParams::default()
        .with_prediction(PredictionParams::Kalman(KalmanPredictorParams::default()));
    assert!(params.validate().is_ok());
    assert_eq!(params.prediction.kind(), PredictionKind::Kalman);
}

#[test]
fn zero_output_rate_is_rejected() {
    let params =
        StrokeModelParams::default().with_sampling(SamplingParams::default().with_min_output_rate(0.0));
    assert!(message_of(params.validate()).contains("sampling.min_output_rate"));
}

#[test]
fn nan_output_rate_is_rejected() {
    let params = StrokeModelParams::default()
        .with_sampling(SamplingParams::default().with_min_output_rate(f64::NAN));
    assert!(message_of(params.validate()).contains("sampling.min_output_rate"));
}

#[test]
fn end_of_stroke_iterations_are_bounded() {
    for iterations in [0, -3, 1001] {
        let sampling = SamplingParams::default().with_end_of_stroke(0.001, iterations);
        assert!(message_of(sampling.validate()).contains("end_of_stroke_max_iterations"));
    }
    let sampling = SamplingParams::default().with_end_of_stroke(0.001, 1000);
    assert!(sampling.validate().is_ok());
}

#[test]
fn stopping_distance_must_be_positive() {
    let sampling = SamplingParams::default().with_end_of_stroke(0.0, 20);
    assert!(message_of(sampling.validate()).contains("end_of_stroke_stopping_distance"));
}

#[test]
fn max_outputs_per_call_must_be_positive() {
    let sampling = SamplingParams::default().with_max_outputs_per_call(0);
    assert!(message_of(sampling.validate()).contains("max_outputs_per_call"));
}

#[test]
fn angle_accepts_only_sentinel_or_positive() {
    assert!(SamplingParams::default()
        .with_max_angle_per_input(ANGLE_SUBDIVISION_DISABLED)
        .validate()
        .is_ok());
    assert!(SamplingParams::default()
        .with_max_angle_per_input(0.5)
        .validate()
        .is_ok());
    for angle in [0.0, -0.5] {
        let sampling = SamplingParams::default().with_max_angle_per_input(angle);
        assert!(message_of(sampling.validate()).contains("max_estimated_angle"));
    }
}

#[test]
fn disabled_wobble_ignores_other_fields() {
    let wobble = WobbleSmootherParams {
        is_enabled: false,
        timeout: -1.0,
        speed_floor: 5.0,
        speed_ceiling: 1.0,
    };
    assert!(wobble.validate().is_ok());
    let enabled = WobbleSmootherParams {
        is_enabled: true,
        ..wobble
    };
    assert!(message_of(enabled.validate()).contains("wobble.timeout"));
}

#[test]
fn wobble_ceiling_below_floor_is_rejected() {
    let wobble = WobbleSmootherParams::enabled().with_speed_range(2.0, 1.0);
    assert!(message_of(wobble.validate()).contains("wobble.speed_ceiling"));
}

#[test]
fn loop_mitigation_strength_must_be_fraction() {
    let position = PositionModelerParams::default().with_loop_mitigation(
        LoopContractionMitigationParams::enabled(0.0, 10.0, 1.5, 0.5),
    );
    assert!(message_of(position.validate()).contains("interpolation_strength_at_speed_lower_bound"));
}

#[test]
fn spring_constants_must_be_positive() {
    let position = PositionModelerParams {
        drag_constant: 0.0,
        ..PositionModelerParams::default()
    };
    assert!(message_of(position.validate()).contains("position.drag_constant"));
}

#[test]
fn first_violation_wins() {
    let params = StrokeModelParams::default()
        .with_wobble(WobbleSmootherParams::enabled().with_timeout(-1.0))
        .with_sampling(SamplingParams::default().with_min_output_rate(0.0));
    assert!(message_of(params.validate()).contains("wobble.timeout"));
}

#[test]
fn kalman_confidence_is_validated() {
    let confidence = KalmanConfidenceParams {
        max_travel_speed: 1.0,
        min_travel_speed: 2.0,
        ..KalmanConfidenceParams::default()
    };
    let prediction =
        PredictionParams::Kalman(KalmanPredictorParams::default().with_confidence(confidence));
    assert!(message_of(prediction.validate()).contains("max_travel_speed"));

    let prediction = PredictionParams::Kalman(
        KalmanPredictorParams::default().with_min_stable_iteration(0),
    );
    assert!(message_of(prediction.validate()).contains("min_stable_iteration"));
}
