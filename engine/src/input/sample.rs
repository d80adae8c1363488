//! Movement input as seen by the locomotion core.
//!
//! The device layer is opaque: the core receives a 2D axis value sampled on
//! demand plus discrete action triggers. Nothing here knows about keys or
//! gamepads.

use glam::Vec2;

/// One reading of the movement axis.
///
/// Components are clamped to `[-1, 1]` but the vector is not normalized, so a
/// diagonal on a raw stick can be longer than one.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSample {
    axis: Vec2,
}

impl InputSample {
    /// No input.
    pub const NONE: InputSample = InputSample { axis: Vec2::ZERO };

    /// Build from raw axis values. Non-finite components read as zero.
    pub fn new(x: f32, y: f32) -> Self {
        let clean = |v: f32| if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 };
        Self {
            axis: Vec2::new(clean(x), clean(y)),
        }
    }

    pub fn axis(&self) -> Vec2 {
        self.axis
    }

    pub fn x(&self) -> f32 {
        self.axis.x
    }

    pub fn y(&self) -> f32 {
        self.axis.y
    }

    pub fn length_squared(&self) -> f32 {
        self.axis.length_squared()
    }
}

impl From<Vec2> for InputSample {
    fn from(axis: Vec2) -> Self {
        Self::new(axis.x, axis.y)
    }
}

/// Discrete action triggers the controller listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Jump,
    Dash,
}
