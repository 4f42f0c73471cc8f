use super::*;
use inkstroke_core::{KalmanConfidenceParams, PositionModeler, PositionModelerParams};

const DT: f64 = 0.01;

fn feed_line(predictor: &mut KalmanPredictor, count: usize, step: f32) -> (Vec2, f64) {
    let mut last = (Vec2::ZERO, 0.0);
    for i in 0..count {
        let position = Vec2::new(step * i as f32, 0.0);
        let time = i as f64 * DT;
        predictor.update(position, time);
        last = (position, time);
    }
    last
}

fn modeler_at(position: Vec2, velocity: Vec2, time: f64) -> PositionModeler {
    PositionModeler::new(
        PositionModelerParams::default(),
        TipState {
            position,
            velocity,
            acceleration: Vec2::ZERO,
            time,
        },
    )
}

#[test]
fn filter_tracks_constant_velocity() {
    let mut filter = KalmanFilter::new(1.0, 1.0);
    assert!(!filter.is_initialized());
    filter.reset(0.0);
    for i in 1..=40 {
        filter.predict();
        filter.update(2.0 * i as f64);
    }
    assert!(filter.is_initialized());
    assert!((filter.position() - 80.0).abs() < 0.05, "{}", filter.position());
    assert!((filter.velocity() - 2.0).abs() < 0.05, "{}", filter.velocity());
}

#[test]
fn cold_predictor_returns_nothing() {
    let params = KalmanPredictorParams::default().with_min_stable_iteration(6);
    let mut predictor = KalmanPredictor::new(params);
    let (last, time) = feed_line(&mut predictor, 5, 0.5);
    assert!(!predictor.is_stable());

    let modeler = modeler_at(last, Vec2::new(50.0, 0.0), time);
    let mut out = Vec::new();
    predictor.predict(
        &PredictionInput {
            modeler: &modeler,
            anchor: last,
        },
        &mut out,
    );
    assert!(out.is_empty());

    predictor.update(Vec2::new(2.5, 0.0), 5.0 * DT);
    assert!(predictor.is_stable());
}

#[test]
fn straight_line_predicts_ahead_of_tip() {
    let mut predictor = KalmanPredictor::new(KalmanPredictorParams::default());
    let (last, time) = feed_line(&mut predictor, 30, 0.5);
    let modeler = modeler_at(last, Vec2::new(50.0, 0.0), time);

    let mut out = Vec::new();
    predictor.predict(
        &PredictionInput {
            modeler: &modeler,
            anchor: last,
        },
        &mut out,
    );

    let desired = KalmanConfidenceParams::default().desired_number_of_samples as usize;
    assert!(!out.is_empty());
    assert!(out.len() <= desired);
    let mut previous = modeler.state();
    for state in &out {
        assert!(state.time > previous.time);
        assert!(state.position.x > previous.position.x);
        assert!(state.position.y.abs() < 1e-2);
        previous = *state;
    }
}

#[test]
fn prediction_is_repeatable() {
    let mut predictor = KalmanPredictor::new(KalmanPredictorParams::default());
    let (last, time) = feed_line(&mut predictor, 20, 0.5);
    let modeler = modeler_at(last, Vec2::new(50.0, 0.0), time);
    let input = PredictionInput {
        modeler: &modeler,
        anchor: last,
    };

    let mut first = Vec::new();
    let mut second = Vec::new();
    predictor.predict(&input, &mut first);
    predictor.predict(&input, &mut second);
    assert_eq!(first, second);
}

#[test]
fn stationary_pointer_has_no_confidence() {
    let mut predictor = KalmanPredictor::new(KalmanPredictorParams::default());
    feed_line(&mut predictor, 10, 0.0);
    let estimate = predictor.estimate().expect("enough samples");
    assert_eq!(predictor.confidence(&estimate), 0.0);
}

#[test]
fn reset_forgets_history() {
    let mut predictor = KalmanPredictor::new(KalmanPredictorParams::default());
    feed_line(&mut predictor, 10, 0.5);
    assert!(predictor.is_stable());

    predictor.reset();
    assert_eq!(predictor.updates_since_reset(), 0);
    assert!(predictor.estimate().is_none());
    assert!(!predictor.is_stable());
}

#[test]
fn sample_interval_uses_bounded_history() {
    let params = KalmanPredictorParams {
        max_time_samples: 3,
        ..KalmanPredictorParams::default()
    };
    let mut predictor = KalmanPredictor::new(params);
    for (i, time) in [0.0, 0.1, 0.11, 0.12].into_iter().enumerate() {
        predictor.update(Vec2::new(i as f32, 0.0), time);
    }
    let interval = predictor.sample_interval().expect("three samples retained");
    assert!((interval - 0.01).abs() < 1e-9);
}

#[test]
fn confidence_combines_factors() {
    let params = KalmanConfidenceParams::default();
    let certain = ConfidenceFactors {
        estimation_distance: 0.0,
        speed: 100.0,
        linear_deviation: 0.0,
    };
    assert_eq!(prediction_confidence(&params, certain), 1.0);

    let half_distance = ConfidenceFactors {
        estimation_distance: 0.75,
        ..certain
    };
    assert!((prediction_confidence(&params, half_distance) - 0.5).abs() < 1e-6);

    let slow = ConfidenceFactors {
        speed: 6.0,
        ..certain
    };
    assert_eq!(prediction_confidence(&params, slow), 0.0);

    let curved = ConfidenceFactors {
        linear_deviation: 50.0,
        ..certain
    };
    assert!((prediction_confidence(&params, curved) - 0.4).abs() < 1e-6);
}

#[test]
fn trusted_samples_follow_confidence() {
    assert_eq!(trusted_sample_count(20, 1.0), 20);
    assert_eq!(trusted_sample_count(20, 0.5), 10);
    assert_eq!(trusted_sample_count(20, 0.26), 5);
    assert_eq!(trusted_sample_count(20, 0.04), 0);
    assert_eq!(trusted_sample_count(20, f32::NAN), 0);
}
