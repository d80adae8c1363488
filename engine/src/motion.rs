//! Mutable physical state of one controlled entity.

use glam::{Quat, Vec3};

/// Timestamp used for "this has never happened".
///
/// Timestamps are `f64` seconds so that a long-running clock keeps
/// resolving single frames.
pub const NEVER: f64 = f64::NEG_INFINITY;

/// Timers at or below this are treated as expired.
pub const TIMER_EPSILON: f32 = 1e-5;

/// Velocity, orientation and timing state mutated by the locomotion core.
///
/// Invariants:
/// - while `is_dashing` is set the horizontal speed ceiling is not applied
/// - while `dash_timer > 0` a new dash is refused
/// - `dash_timer` and `dash_remaining` never go negative
#[derive(Debug, Clone, PartialEq)]
pub struct MotionState {
    /// World-space position of the entity's feet
    pub position: Vec3,

    /// World-space linear velocity (m/s)
    pub velocity: Vec3,

    /// Orientation, smoothed toward the movement direction
    pub rotation: Quat,

    /// Angular velocity left over from the physics step; cleared every tick
    pub angular_velocity: Vec3,

    /// Last time the ground sensor reported contact (s)
    pub last_grounded_time: f64,

    /// Last time a jump impulse was applied (s)
    pub last_jump_time: f64,

    /// Dash cooldown countdown (s)
    pub dash_timer: f32,

    /// Time left in the current dash (s)
    pub dash_remaining: f32,

    /// Whether a dash is in flight
    pub is_dashing: bool,
}

impl Default for MotionState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            angular_velocity: Vec3::ZERO,
            last_grounded_time: NEVER,
            last_jump_time: NEVER,
            dash_timer: 0.0,
            dash_remaining: 0.0,
            is_dashing: false,
        }
    }
}

impl MotionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn at a position with everything else at rest.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Speed in the XZ plane.
    pub fn horizontal_speed(&self) -> f32 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z).length()
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.velocity.y
    }

    /// Entity right axis, used to spread the ground probes.
    pub fn right_axis(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Entity facing (local -Z).
    pub fn facing(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Seconds since last ground contact, infinite if never grounded.
    pub fn time_since_grounded(&self, now: f64) -> f64 {
        now - self.last_grounded_time
    }

    /// Seconds since the last jump, infinite if never jumped.
    pub fn time_since_jump(&self, now: f64) -> f64 {
        now - self.last_jump_time
    }

    pub fn dash_ready(&self) -> bool {
        !self.is_dashing && self.dash_timer <= 0.0
    }
}
