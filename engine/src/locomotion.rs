//! Locomotion Engine
//!
//! The fixed-tick integrator. Every physics step it runs, in order:
//!
//! 1. camera-relative input applied as a direct velocity change
//! 2. extra gravity while falling, for a snappier descent
//! 3. horizontal speed ceiling (skipped while dashing)
//! 4. snap to rest below [`STOP_SPEED`]
//! 5. orientation slerp toward the movement direction
//! 6. angular velocity cleared, rotation only comes from step 5
//!
//! Without a camera, steps 1 and 5 are skipped and the rest still run so the
//! entity keeps falling and stays clamped.
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut engine = LocomotionEngine::new(config);
//! // each fixed tick
//! if let Err(err) = engine.fixed_step(&mut state, input, Some(&camera), FIXED_TIMESTEP) {
//!     // camera missing: this tick only fell and clamped
//! }
//! ```

use glam::{Quat, Vec3};
use log::{trace, warn};

use crate::camera::{CameraBasis, CameraFrame, CameraView};
use crate::config::MovementConfig;
use crate::error::LocomotionError;
use crate::input::InputSample;
use crate::motion::MotionState;

/// Below this speed the velocity is zeroed (m/s)
pub const STOP_SPEED: f32 = 0.01;

/// Squared input length needed before the entity turns to face its movement
pub const FACING_INPUT_THRESHOLD_SQ: f32 = 0.01;

/// Yaw-only rotation whose local -Z points along `direction` in the XZ plane.
///
/// Returns `None` when `direction` has no usable horizontal component.
pub fn facing_rotation(direction: Vec3) -> Option<Quat> {
    let flat = Vec3::new(direction.x, 0.0, direction.z);
    if !flat.is_finite() || flat.length_squared() < 1e-8 {
        return None;
    }
    Some(Quat::from_rotation_y((-flat.x).atan2(-flat.z)))
}

/// Step 1: add `planar * move_speed` straight to the velocity.
pub fn apply_planar_input(state: &mut MotionState, planar: Vec3, move_speed: f32) {
    state.velocity += planar * move_speed;
}

/// Step 2: while moving downward, add `gravity_y * dt` to the vertical speed.
pub fn apply_fall_gravity(state: &mut MotionState, gravity_y: f32, dt: f32) {
    if state.velocity.y < 0.0 {
        state.velocity += Vec3::Y * gravity_y * dt;
    }
}

/// Step 3: rescale the horizontal part to `max_speed` if above it.
///
/// Returns whether the clamp fired. Vertical velocity is never touched.
pub fn clamp_horizontal_speed(state: &mut MotionState, max_speed: f32) -> bool {
    let horizontal = Vec3::new(state.velocity.x, 0.0, state.velocity.z);
    let max_speed = max_speed.max(0.0);
    if horizontal.length_squared() <= max_speed * max_speed {
        return false;
    }
    let clamped = horizontal.normalize() * max_speed;
    state.velocity = Vec3::new(clamped.x, state.velocity.y, clamped.z);
    true
}

/// Step 4: zero the velocity if its magnitude is under [`STOP_SPEED`].
pub fn snap_to_rest(state: &mut MotionState) -> bool {
    if state.velocity != Vec3::ZERO && state.velocity.length() < STOP_SPEED {
        state.velocity = Vec3::ZERO;
        true
    } else {
        false
    }
}

/// Fixed-tick movement integrator for one entity.
#[derive(Debug, Clone)]
pub struct LocomotionEngine {
    config: MovementConfig,
    frame: CameraFrame,
}

impl LocomotionEngine {
    pub fn new(config: MovementConfig) -> Self {
        Self {
            config,
            frame: CameraFrame::new(),
        }
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    /// Camera projection state (keeps the fallback basis).
    pub fn frame_mut(&mut self) -> &mut CameraFrame {
        &mut self.frame
    }

    /// Run one fixed tick of length `dt`.
    ///
    /// A missing camera returns `InvalidReference`, but the state has still
    /// been advanced by the camera-independent steps.
    pub fn fixed_step(
        &mut self,
        state: &mut MotionState,
        input: InputSample,
        camera: Option<&dyn CameraView>,
        dt: f32,
    ) -> Result<(), LocomotionError> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let basis = self.frame.basis(camera);

        if let Ok(basis) = &basis {
            apply_planar_input(
                state,
                basis.planar_direction(input.axis()),
                self.config.move_speed,
            );
        }

        apply_fall_gravity(state, self.config.gravity.y, dt);

        if !state.is_dashing && clamp_horizontal_speed(state, self.config.max_speed) {
            trace!("horizontal speed clamped to {}", self.config.max_speed);
        }

        if snap_to_rest(state) {
            trace!("velocity snapped to rest");
        }

        if let Ok(basis) = &basis {
            self.update_facing(state, basis, input, dt);
        }

        state.angular_velocity = Vec3::ZERO;

        if !state.velocity.is_finite() {
            warn!("non-finite velocity {:?} reset to zero", state.velocity);
            state.velocity = Vec3::ZERO;
        }

        basis.map(|_| ())
    }

    /// Step 5: slerp toward the input direction, or hold the current facing
    /// when the input is too small.
    fn update_facing(&self, state: &mut MotionState, basis: &CameraBasis, input: InputSample, dt: f32) {
        if input.length_squared() <= FACING_INPUT_THRESHOLD_SQ {
            return;
        }
        let Some(target) = facing_rotation(basis.planar_direction(input.axis())) else {
            return;
        };
        let t = (self.config.turn_rate * dt).clamp(0.0, 1.0);
        let rotation = state.rotation.slerp(target, t).normalize();
        if rotation.is_finite() {
            state.rotation = rotation;
        }
    }
}
