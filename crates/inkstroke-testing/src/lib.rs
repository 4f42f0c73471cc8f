//! Testing utilities for inkstroke

pub mod assertions;
pub mod strokes;

pub use assertions::*;
pub use strokes::*;

pub mod prelude {
    pub use crate::assertions::{
        assert_approx_eq, assert_time_strictly_increasing, assert_vec_approx_eq,
    };
    pub use crate::strokes::StrokeBuilder;
}
