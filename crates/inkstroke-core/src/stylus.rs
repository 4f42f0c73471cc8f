//! Pressure, tilt and orientation for simulated tip positions.
//!
//! Raw inputs form a short polyline. A tip position is located on it, either
//! by closest-point projection or by casting along the stroke normal, and
//! the stylus channels are interpolated between the bracketing inputs.

use std::collections::VecDeque;

use inkstroke_geometry::{
    distance, interp, line_segment_intersection, nearest_point_on_segment, Vec2,
};

use crate::params::StylusStateModelerParams;
use crate::types::{is_unknown, StylusState, UNKNOWN_STYLUS_VALUE};

/// Raw inputs kept for interpolation.
pub const MAX_STYLUS_INPUT_SAMPLES: usize = 10;

#[derive(Clone, Copy, Debug)]
struct StylusSample {
    position: Vec2,
    state: StylusState,
}

/// Channels that have reported the unknown sentinel during this stroke.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct UnknownChannels {
    pressure: bool,
    tilt: bool,
    orientation: bool,
}

#[derive(Clone, Debug)]
pub struct StylusStateModeler {
    params: StylusStateModelerParams,
    samples: VecDeque<StylusSample>,
    unknown: UnknownChannels,
}

impl StylusStateModeler {
    pub fn new(params: StylusStateModelerParams) -> Self {
        Self {
            params,
            samples: VecDeque::with_capacity(MAX_STYLUS_INPUT_SAMPLES),
            unknown: UnknownChannels::default(),
        }
    }

    pub fn params(&self) -> &StylusStateModelerParams {
        &self.params
    }

    pub fn reset(&mut self) {
        self.samples.clear();
        self.unknown = UnknownChannels::default();
    }

    /// Records a raw input. Once a channel is reported unknown it stays
    /// unknown for the rest of the stroke.
    pub fn update(&mut self, position: Vec2, state: StylusState) {
        self.unknown.pressure |= is_unknown(state.pressure);
        self.unknown.tilt |= is_unknown(state.tilt);
        self.unknown.orientation |= is_unknown(state.orientation);

        if self.samples.len() == MAX_STYLUS_INPUT_SAMPLES {
            self.samples.pop_front();
        }
        self.samples.push_back(StylusSample { position, state });
    }

    /// Stylus state of the most recent raw input, with unknown channels masked.
    pub fn latest(&self) -> StylusState {
        self.samples
            .back()
            .map_or(StylusState::UNKNOWN, |sample| self.mask(sample.state))
    }

    /// Interpolated stylus state at a tip `position` moving with `velocity`.
    pub fn query(&self, position: Vec2, velocity: Vec2) -> StylusState {
        match self.samples.len() {
            0 => StylusState::UNKNOWN,
            1 => self.latest(),
            _ => {
                let (segment, fraction) = self
                    .locate_along_normal(position, velocity)
                    .unwrap_or_else(|| self.locate_closest(position));
                let start = self.samples[segment].state;
                let end = self.samples[segment + 1].state;
                self.mask(StylusState {
                    pressure: interp(start.pressure, end.pressure, fraction),
                    tilt: interp(start.tilt, end.tilt, fraction),
                    orientation: interp(start.orientation, end.orientation, fraction),
                })
            }
        }
    }

    fn segments(&self) -> impl Iterator<Item = (usize, Vec2, Vec2)> + '_ {
        self.samples
            .iter()
            .zip(self.samples.iter().skip(1))
            .enumerate()
            .map(|(index, (start, end))| (index, start.position, end.position))
    }

    fn locate_closest(&self, position: Vec2) -> (usize, f32) {
        let mut best = (0, 0.0);
        let mut best_distance = f32::INFINITY;
        for (index, start, end) in self.segments() {
            let fraction = nearest_point_on_segment(start, end, position);
            let candidate = distance(interp(start, end, fraction), position);
            // Ties go to the later segment so progress never runs backwards.
            if candidate <= best_distance {
                best_distance = candidate;
                best = (index, fraction);
            }
        }
        best
    }

    fn locate_along_normal(&self, position: Vec2, velocity: Vec2) -> Option<(usize, f32)> {
        if !self.params.use_stroke_normal_projection || velocity.magnitude_squared() == 0.0 {
            return None;
        }
        let normal = velocity.orthogonal();
        self.segments()
            .filter_map(|(index, start, end)| {
                line_segment_intersection(position, normal, start, end)
                    .map(|(fraction, reach)| (index, fraction, reach.abs()))
            })
            .min_by(|a, b| a.2.total_cmp(&b.2))
            .map(|(index, fraction, _)| (index, fraction))
    }

    fn mask(&self, state: StylusState) -> StylusState {
        StylusState {
            pressure: if self.unknown.pressure {
                UNKNOWN_STYLUS_VALUE
            } else {
                state.pressure
            },
            tilt: if self.unknown.tilt {
                UNKNOWN_STYLUS_VALUE
            } else {
                state.tilt
            },
            orientation: if self.unknown.orientation {
                UNKNOWN_STYLUS_VALUE
            } else {
                state.orientation
            },
        }
    }
}

#[cfg(test)]
#[path = "tests/stylus_tests.rs"]
mod tests;
