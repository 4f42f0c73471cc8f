//! Input and output records.
//!
//! `EventType`, `Input` and `StrokeResult` are `#[repr(C)]` and mirror the
//! interop records field for field; do not reorder their fields.

use inkstroke_geometry::Vec2;

/// Sentinel for an unreported stylus channel.
pub const UNKNOWN_STYLUS_VALUE: f32 = -1.0;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    Down = 0,
    Move = 1,
    Up = 2,
}

/// One raw pointer sample.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Input {
    pub event_type: EventType,
    pub position: Vec2,
    /// Monotonic, unit-agnostic.
    pub time: f64,
    pub pressure: f32,
    pub tilt: f32,
    pub orientation: f32,
}

impl Input {
    /// Creates an input with every stylus channel unknown.
    pub fn new(event_type: EventType, position: Vec2, time: f64) -> Self {
        Self {
            event_type,
            position,
            time,
            pressure: UNKNOWN_STYLUS_VALUE,
            tilt: UNKNOWN_STYLUS_VALUE,
            orientation: UNKNOWN_STYLUS_VALUE,
        }
    }

    pub fn down(position: Vec2, time: f64) -> Self {
        Self::new(EventType::Down, position, time)
    }

    pub fn moved(position: Vec2, time: f64) -> Self {
        Self::new(EventType::Move, position, time)
    }

    pub fn up(position: Vec2, time: f64) -> Self {
        Self::new(EventType::Up, position, time)
    }

    pub fn with_pressure(mut self, pressure: f32) -> Self {
        self.pressure = pressure;
        self
    }

    pub fn with_tilt(mut self, tilt: f32) -> Self {
        self.tilt = tilt;
        self
    }

    pub fn with_orientation(mut self, orientation: f32) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn stylus_state(&self) -> StylusState {
        StylusState {
            pressure: self.pressure,
            tilt: self.tilt,
            orientation: self.orientation,
        }
    }
}

/// Non-positional channels carried alongside a position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StylusState {
    pub pressure: f32,
    pub tilt: f32,
    pub orientation: f32,
}

impl StylusState {
    pub const UNKNOWN: StylusState = StylusState {
        pressure: UNKNOWN_STYLUS_VALUE,
        tilt: UNKNOWN_STYLUS_VALUE,
        orientation: UNKNOWN_STYLUS_VALUE,
    };
}

impl Default for StylusState {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

/// Negative channel values are never valid readings, so any of them counts
/// as the unknown sentinel.
pub fn is_unknown(value: f32) -> bool {
    value < 0.0
}

/// Simulated pen tip at a point in time.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct TipState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub time: f64,
}

impl TipState {
    /// A tip at rest.
    pub fn at_rest(position: Vec2, time: f64) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            time,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.velocity.is_finite()
            && self.acceleration.is_finite()
            && self.time.is_finite()
    }
}

/// One modeled output sample.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct StrokeResult {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub time: f64,
    pub pressure: f32,
    pub tilt: f32,
    pub orientation: f32,
}

impl StrokeResult {
    pub fn new(tip: TipState, stylus: StylusState) -> Self {
        Self {
            position: tip.position,
            velocity: tip.velocity,
            acceleration: tip.acceleration,
            time: tip.time,
            pressure: stylus.pressure,
            tilt: stylus.tilt,
            orientation: stylus.orientation,
        }
    }

    pub fn tip_state(&self) -> TipState {
        TipState {
            position: self.position,
            velocity: self.velocity,
            acceleration: self.acceleration,
            time: self.time,
        }
    }

    pub fn stylus_state(&self) -> StylusState {
        StylusState {
            pressure: self.pressure,
            tilt: self.tilt,
            orientation: self.orientation,
        }
    }
}
