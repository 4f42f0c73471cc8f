use inkstroke_core::{
    KalmanPredictorParams, LoopContractionMitigationParams, PositionModelerParams,
    PredictionParams, SamplingParams, StylusStateModelerParams, WobbleSmootherParams,
};
use inkstroke_geometry::Vec2;
use inkstroke_modeler::{Input, OutputCount, StrokeModelParams, StrokeModeler, StrokeResult};
use inkstroke_testing::{assert_results_approx_eq, assert_time_strictly_increasing, StrokeBuilder};

fn param_sets() -> Vec<(&'static str, StrokeModelParams)> {
    let defaults = StrokeModelParams::default();
    vec![
        ("defaults", defaults),
        (
            "wobble",
            defaults.with_wobble(WobbleSmootherParams::enabled()),
        ),
        (
            "loop mitigation",
            defaults.with_position(PositionModelerParams::default().with_loop_mitigation(
                LoopContractionMitigationParams::enabled(0.0, 100.0, 1.0, 0.5)
                    .with_sampling_window(0.05),
            )),
        ),
        (
            "angle subdivision",
            defaults.with_sampling(SamplingParams::default().with_max_angle_per_input(0.2)),
        ),
        (
            "normal projection",
            defaults.with_stylus_state(StylusStateModelerParams {
                use_stroke_normal_projection: true,
            }),
        ),
        (
            "kalman",
            defaults.with_prediction(PredictionParams::Kalman(KalmanPredictorParams::default())),
        ),
    ]
}

fn strokes() -> Vec<(&'static str, Vec<Input>)> {
    vec![
        (
            "line",
            StrokeBuilder::new()
                .line(Vec2::ZERO, Vec2::new(20.0, 5.0), 12)
                .build(),
        ),
        (
            "arc",
            StrokeBuilder::new()
                .pressure(0.6)
                .arc(Vec2::new(10.0, 10.0), 10.0, 0.0, 3.0, 16)
                .build(),
        ),
        (
            "flick back",
            StrokeBuilder::new()
                .flick_back(Vec2::ZERO, 12.0, 6)
                .build(),
        ),
        (
            "jittered hold",
            StrokeBuilder::new()
                .start_time(2.0)
                .jittered_hold(Vec2::new(4.0, 4.0), 0.3, 20, 11)
                .build(),
        ),
    ]
}

fn run(modeler: &mut StrokeModeler, inputs: &[Input]) -> Vec<StrokeResult> {
    let mut results = Vec::new();
    for input in inputs {
        results.extend(modeler.update_to_vec(input).expect("valid input"));
    }
    results
}

#[test]
fn time_strictly_increases_within_each_stroke() {
    for (params_name, params) in param_sets() {
        for (stroke_name, inputs) in strokes() {
            let mut modeler = StrokeModeler::with_params(params).expect("valid params");
            let results = run(&mut modeler, &inputs);
            let msg = format!("{params_name} / {stroke_name}");
            assert!(results.len() >= inputs.len(), "{msg}");
            assert_time_strictly_increasing(&results, &msg);
            assert!(
                results.iter().all(|result| result.tip_state().is_finite()),
                "{msg}: non-finite result"
            );
        }
    }
}

#[test]
fn predict_is_idempotent() {
    for (params_name, params) in param_sets() {
        for (stroke_name, inputs) in strokes() {
            let mut modeler = StrokeModeler::with_params(params).expect("valid params");
            run(&mut modeler, &inputs[..inputs.len() - 1]);
            let last = modeler.last_result();

            let first = modeler.predict_to_vec().expect("stroke in progress");
            let second = modeler.predict_to_vec().expect("stroke in progress");
            assert_eq!(first, second, "{params_name} / {stroke_name}");
            assert_eq!(modeler.last_result(), last);
        }
    }
}

#[test]
fn predictions_continue_after_last_result() {
    for (params_name, params) in param_sets() {
        let inputs = StrokeBuilder::new()
            .line(Vec2::ZERO, Vec2::new(30.0, 0.0), 31)
            .build();
        let mut modeler = StrokeModeler::with_params(params).expect("valid params");
        run(&mut modeler, &inputs[..30]);
        let last = modeler.last_result().expect("results committed");

        let predicted = modeler.predict_to_vec().expect("stroke in progress");
        let msg = format!("{params_name}: prediction");
        if let Some(first) = predicted.first() {
            assert!(first.time > last.time, "{msg}");
        }
        assert_time_strictly_increasing(&predicted, &msg);
    }
}

#[test]
fn truncated_output_reports_true_total() {
    let inputs = [
        Input::down(Vec2::ZERO, 0.0),
        Input::moved(Vec2::new(40.0, 10.0), 0.1),
    ];
    let mut full = StrokeModeler::with_params(StrokeModelParams::default()).expect("defaults");
    let mut partial = StrokeModeler::with_params(StrokeModelParams::default()).expect("defaults");
    full.update_to_vec(&inputs[0]).expect("down");
    partial.update_to_vec(&inputs[0]).expect("down");

    let expected = full.update_to_vec(&inputs[1]).expect("move");
    let mut out = [StrokeResult::default(); 5];
    let count = partial.update(&inputs[1], &mut out).expect("move");

    assert_eq!(expected.len(), 18);
    assert_eq!(
        count,
        OutputCount {
            written: 5,
            total: 18,
            requested: 18
        }
    );
    assert!(count.is_truncated());
    assert_eq!(&out[..], &expected[..5]);
    assert_eq!(partial.last_result(), full.last_result());
}

#[test]
fn save_update_restore_matches_untouched_session() {
    for (params_name, params) in param_sets() {
        let inputs = StrokeBuilder::new()
            .pressure(0.4)
            .arc(Vec2::ZERO, 15.0, 0.0, 1.5, 14)
            .build();
        let (prefix, rest) = inputs.split_at(7);
        let speculative = Input::moved(Vec2::new(-40.0, 25.0), rest[0].time);

        let mut rolled_back = StrokeModeler::with_params(params).expect("valid params");
        run(&mut rolled_back, prefix);
        rolled_back.save().expect("save");
        rolled_back
            .update_to_vec(&speculative)
            .expect("speculative move");
        rolled_back.predict_to_vec().expect("speculative predict");
        rolled_back.restore().expect("restore");

        let mut untouched = StrokeModeler::with_params(params).expect("valid params");
        run(&mut untouched, prefix);

        let msg = format!("{params_name}: round trip");
        assert_results_approx_eq(
            &rolled_back.predict_to_vec().expect("predict"),
            &untouched.predict_to_vec().expect("predict"),
            1e-6,
            &msg,
        );
        assert_results_approx_eq(
            &run(&mut rolled_back, rest),
            &run(&mut untouched, rest),
            1e-6,
            &msg,
        );
    }
}

#[test]
fn reset_then_down_always_succeeds() {
    let sets = param_sets();
    let mut modeler = StrokeModeler::new();
    let mut time = 0.0;
    for (index, (name, params)) in sets.iter().enumerate() {
        modeler.reset_with_params(*params).expect(name);
        let inputs = StrokeBuilder::new()
            .start_time(time)
            .line(Vec2::ZERO, Vec2::new(5.0, 5.0), 4)
            .build();
        // Stop mid-stroke on odd sets so the next reset interrupts it.
        let taken = if index % 2 == 0 { inputs.len() } else { 2 };
        run(&mut modeler, &inputs[..taken]);
        time = inputs[taken - 1].time;

        modeler.reset().expect(name);
        modeler
            .update_to_vec(&Input::down(Vec2::new(1.0, 1.0), time))
            .expect(name);
    }
}

#[test]
fn max_outputs_per_call_coarsens_resampling() {
    let params = StrokeModelParams::default()
        .with_sampling(SamplingParams::default().with_max_outputs_per_call(4));
    let mut modeler = StrokeModeler::with_params(params).expect("valid params");
    modeler
        .update_to_vec(&Input::down(Vec2::ZERO, 0.0))
        .expect("down");

    let mut out = [StrokeResult::default(); 32];
    let count = modeler
        .update(&Input::moved(Vec2::new(10.0, 0.0), 0.1), &mut out)
        .expect("move");
    assert_eq!(count.total, 4);
    assert_eq!(count.written, 4);
    assert_eq!(count.requested, 18);
    assert!(count.is_capped());
    assert!(!count.is_truncated());
    assert!((out[3].time - 0.1).abs() < 1e-12);

    let count = modeler
        .update(&Input::up(Vec2::new(20.0, 0.0), 0.2), &mut out)
        .expect("up");
    assert_eq!(count.total, 4);
    assert!(count.is_capped());
}

#[test]
fn capped_stroke_end_reports_dropped_settling() {
    let inputs = [
        Input::down(Vec2::ZERO, 0.0),
        Input::up(Vec2::new(10.0, 0.0), 0.01),
    ];
    let mut uncapped = StrokeModeler::with_params(StrokeModelParams::default()).expect("defaults");
    run(&mut uncapped, &inputs[..1]);
    let full = uncapped.update_to_vec(&inputs[1]).expect("up");

    let params = StrokeModelParams::default()
        .with_sampling(SamplingParams::default().with_max_outputs_per_call(3));
    let mut capped = StrokeModeler::with_params(params).expect("valid params");
    run(&mut capped, &inputs[..1]);
    let mut out = [StrokeResult::default(); 16];
    let count = capped.update(&inputs[1], &mut out).expect("up");

    assert!(full.len() > 3);
    assert_eq!(count.total, 3);
    assert_eq!(count.written, 3);
    assert!(count.is_capped());
    assert!(count.requested > count.total);
    assert_eq!(count.requested, full.len());
    assert_eq!(&out[..3], &full[..3]);
}
