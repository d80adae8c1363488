//! Movement tuning.
//!
//! One [`MovementConfig`] per controlled entity, fixed at construction.
//! Values can come from code (`Default` / struct update syntax) or from a
//! JSON file where any omitted field keeps its default:
//!
//! ```json
//! { "max_speed": 7.5, "dash_cooldown": 0.6 }
//! ```

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::LocomotionError;
use crate::world::LayerMask;

/// Planar velocity change per fixed tick at full input (m/s)
pub const MOVE_SPEED: f32 = 1.0;

/// Horizontal speed ceiling outside of a dash (m/s)
pub const MAX_SPEED: f32 = 5.0;

/// Jump impulse (N·s); divided by mass for the velocity change
pub const JUMP_FORCE: f32 = 5.0;

/// Velocity assigned at dash start (m/s)
pub const DASH_SPEED: f32 = 10.0;

/// How long a dash suspends the speed ceiling (s)
pub const DASH_DURATION: f32 = 0.2;

/// Minimum time between dash starts (s)
pub const DASH_COOLDOWN: f32 = 1.0;

/// Grace window after last ground contact in which a jump is allowed (s)
pub const COYOTE_TIME: f32 = 0.1;

/// Minimum time between jumps (s)
pub const JUMP_COOLDOWN: f32 = 0.3;

/// Length of each ground probe, and twice the side probe offset (m)
pub const GROUND_CHECK_RADIUS: f32 = 0.1;

/// Orientation smoothing rate (1/s)
pub const TURN_RATE: f32 = 10.0;

/// Per-entity movement tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Planar velocity change applied each fixed tick at full input.
    pub move_speed: f32,

    /// Horizontal speed ceiling, suspended while dashing.
    pub max_speed: f32,

    /// Upward impulse applied by a jump.
    pub jump_force: f32,

    /// Body mass used to turn the jump impulse into a velocity change.
    pub mass: f32,

    /// Dash velocity magnitude.
    pub dash_speed: f32,

    /// Dash length in seconds.
    pub dash_duration: f32,

    /// Seconds from one dash start until the next is allowed.
    pub dash_cooldown: f32,

    /// Jump grace window after leaving the ground.
    pub coyote_time: f32,

    /// Minimum seconds between jumps.
    pub jump_cooldown: f32,

    /// Ground probe length.
    pub ground_check_radius: f32,

    /// Ground probe origin relative to the entity position.
    pub ground_check_offset: Vec3,

    /// Layers that count as navigable ground.
    pub ground_layer: LayerMask,

    /// World gravity. Its Y component drives the extra fall acceleration.
    pub gravity: Vec3,

    /// Rotation slerp rate toward the movement direction.
    pub turn_rate: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: MOVE_SPEED,
            max_speed: MAX_SPEED,
            jump_force: JUMP_FORCE,
            mass: 1.0,
            dash_speed: DASH_SPEED,
            dash_duration: DASH_DURATION,
            dash_cooldown: DASH_COOLDOWN,
            coyote_time: COYOTE_TIME,
            jump_cooldown: JUMP_COOLDOWN,
            ground_check_radius: GROUND_CHECK_RADIUS,
            ground_check_offset: Vec3::new(0.0, 0.05, 0.0),
            ground_layer: LayerMask::GROUND,
            gravity: Vec3::new(0.0, -9.81, 0.0),
            turn_rate: TURN_RATE,
        }
    }
}

impl MovementConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, LocomotionError> {
        let config: MovementConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LocomotionError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> Result<String, LocomotionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Velocity change produced by one jump impulse.
    pub fn jump_velocity_change(&self) -> f32 {
        self.jump_force / self.mass
    }

    /// Check every value is usable.
    ///
    /// A non-positive `ground_check_radius` passes: the sensor treats it as
    /// "never grounded" instead of failing.
    pub fn validate(&self) -> Result<(), LocomotionError> {
        let non_negative = [
            ("move_speed", self.move_speed),
            ("max_speed", self.max_speed),
            ("jump_force", self.jump_force),
            ("dash_speed", self.dash_speed),
            ("dash_duration", self.dash_duration),
            ("dash_cooldown", self.dash_cooldown),
            ("coyote_time", self.coyote_time),
            ("jump_cooldown", self.jump_cooldown),
            ("turn_rate", self.turn_rate),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() {
                return Err(LocomotionError::InvalidConfig {
                    field,
                    reason: "must be finite",
                });
            }
            if value < 0.0 {
                return Err(LocomotionError::InvalidConfig {
                    field,
                    reason: "must not be negative",
                });
            }
        }

        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(LocomotionError::InvalidConfig {
                field: "mass",
                reason: "must be greater than zero",
            });
        }
        if !self.ground_check_radius.is_finite() {
            return Err(LocomotionError::InvalidConfig {
                field: "ground_check_radius",
                reason: "must be finite",
            });
        }
        if !self.ground_check_offset.is_finite() {
            return Err(LocomotionError::InvalidConfig {
                field: "ground_check_offset",
                reason: "must be finite",
            });
        }
        if !self.gravity.is_finite() {
            return Err(LocomotionError::InvalidConfig {
                field: "gravity",
                reason: "must be finite",
            });
        }

        Ok(())
    }
}
