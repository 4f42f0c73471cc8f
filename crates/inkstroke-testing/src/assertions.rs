//! Tolerance assertions for modeled strokes.

use inkstroke_core::StrokeResult;
use inkstroke_geometry::Vec2;

/// Assert that a stroke quantity is within `tolerance` of `expected`.
///
/// `what` names the quantity, e.g. `"result[3] pressure"`.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, what: &str) {
    let error = (actual - expected).abs();
    if error > tolerance || error.is_nan() {
        panic!("{what} = {actual}, expected {expected} within {tolerance} (off by {error})");
    }
}

/// Assert that both components of a vector are approximately equal.
pub fn assert_vec_approx_eq(actual: Vec2, expected: Vec2, tolerance: f32, what: &str) {
    assert_approx_eq(actual.x, expected.x, tolerance, &format!("{what}.x"));
    assert_approx_eq(actual.y, expected.y, tolerance, &format!("{what}.y"));
}

/// Assert that two result sequences match field by field.
pub fn assert_results_approx_eq(
    actual: &[StrokeResult],
    expected: &[StrokeResult],
    tolerance: f32,
    what: &str,
) {
    assert_eq!(actual.len(), expected.len(), "{what}: result count");
    for (index, (a, e)) in actual.iter().zip(expected).enumerate() {
        let field = |name: &str| format!("{what}: result[{index}].{name}");
        assert!(
            (a.time - e.time).abs() <= tolerance as f64,
            "{} = {}, expected {}",
            field("time"),
            a.time,
            e.time
        );
        assert_vec_approx_eq(a.position, e.position, tolerance, &field("position"));
        assert_vec_approx_eq(a.velocity, e.velocity, tolerance, &field("velocity"));
        assert_approx_eq(a.pressure, e.pressure, tolerance, &field("pressure"));
        assert_approx_eq(a.tilt, e.tilt, tolerance, &field("tilt"));
        assert_approx_eq(a.orientation, e.orientation, tolerance, &field("orientation"));
    }
}

/// Assert that result times strictly increase across the whole sequence.
pub fn assert_time_strictly_increasing<'a, I>(results: I, msg: &str)
where
    I: IntoIterator<Item = &'a StrokeResult>,
{
    let mut previous: Option<f64> = None;
    for (index, result) in results.into_iter().enumerate() {
        if let Some(previous) = previous {
            assert!(
                result.time > previous,
                "{}: time went from {} to {} at index {}",
                msg,
                previous,
                result.time,
                index
            );
        }
        previous = Some(result.time);
    }
}
