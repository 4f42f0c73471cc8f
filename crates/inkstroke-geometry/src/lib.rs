//! Pure math for the inkstroke pipeline
//!
//! This crate contains the 2-D vector type shared by every stage of the
//! stroke model, plus the scalar interpolation helpers the smoothing,
//! spring and prediction stages are written in terms of.

mod interp;
mod vec2;

pub use interp::*;
pub use vec2::*;

pub mod prelude {
    pub use crate::interp::{interp, interp_time, normalize01, Lerp};
    pub use crate::vec2::{distance, nearest_point_on_segment, Vec2};
}
