//! Animation parameter output.
//!
//! Each variable tick the controller derives three scalars from the motion
//! state and pushes them into an [`AnimationDriver`] under fixed parameter
//! names. The driver is whatever animation system the host uses.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::motion::MotionState;

/// Normalized speed parameter (`|velocity| / max_speed`)
pub const PARAM_SPEED: &str = "Speed";

/// Grounded flag parameter
pub const PARAM_GROUNDED: &str = "isGrounded";

/// Vertical velocity parameter
pub const PARAM_VERTICAL_VELOCITY: &str = "verticalVelocity";

/// Snapshot of the values sent to the animation driver.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnimationParams {
    /// Speed relative to the configured ceiling; exceeds 1 while dashing
    pub speed: f32,
    pub is_grounded: bool,
    pub vertical_velocity: f32,
}

impl AnimationParams {
    /// Derive parameters from the current state.
    ///
    /// A non-positive `max_speed` yields a speed of zero instead of dividing
    /// by it.
    pub fn from_state(state: &MotionState, is_grounded: bool, max_speed: f32) -> Self {
        let speed = if max_speed > 0.0 {
            state.speed() / max_speed
        } else {
            0.0
        };
        Self {
            speed,
            is_grounded,
            vertical_velocity: state.vertical_velocity(),
        }
    }

    /// Write every parameter into `driver`.
    pub fn apply(&self, driver: &mut dyn AnimationDriver) {
        driver.set_float(PARAM_SPEED, self.speed);
        driver.set_bool(PARAM_GROUNDED, self.is_grounded);
        driver.set_float(PARAM_VERTICAL_VELOCITY, self.vertical_velocity);
    }
}

/// Named-parameter sink, injected into the controller at construction.
pub trait AnimationDriver {
    fn set_float(&mut self, name: &str, value: f32);
    fn set_bool(&mut self, name: &str, value: bool);
}

/// Value stored in a [`ParameterTable`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Float(f32),
    Bool(bool),
}

/// Animation driver that just remembers the last value of each parameter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParameterTable {
    values: HashMap<String, ParamValue>,
}

impl ParameterTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<ParamValue> {
        self.values.get(name).copied()
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        match self.get(name)? {
            ParamValue::Float(value) => Some(value),
            ParamValue::Bool(_) => None,
        }
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            ParamValue::Bool(value) => Some(value),
            ParamValue::Float(_) => None,
        }
    }
}

impl AnimationDriver for ParameterTable {
    fn set_float(&mut self, name: &str, value: f32) {
        self.values.insert(name.to_owned(), ParamValue::Float(value));
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.values.insert(name.to_owned(), ParamValue::Bool(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_params_from_state() {
        let mut state = MotionState::new();
        state.velocity = Vec3::new(3.0, -4.0, 0.0);

        let params = AnimationParams::from_state(&state, false, 5.0);
        assert!((params.speed - 1.0).abs() < 1e-5);
        assert!(!params.is_grounded);
        assert_eq!(params.vertical_velocity, -4.0);
    }

    #[test]
    fn test_zero_max_speed_does_not_divide() {
        let mut state = MotionState::new();
        state.velocity = Vec3::X;
        let params = AnimationParams::from_state(&state, true, 0.0);
        assert_eq!(params.speed, 0.0);
    }

    #[test]
    fn test_apply_writes_named_parameters() {
        let params = AnimationParams {
            speed: 0.5,
            is_grounded: true,
            vertical_velocity: -1.5,
        };
        let mut table = ParameterTable::new();
        params.apply(&mut table);

        assert_eq!(table.float(PARAM_SPEED), Some(0.5));
        assert_eq!(table.bool(PARAM_GROUNDED), Some(true));
        assert_eq!(table.float(PARAM_VERTICAL_VELOCITY), Some(-1.5));
        assert_eq!(table.bool(PARAM_SPEED), None);
        assert_eq!(table.get("missing"), None);
    }
}
