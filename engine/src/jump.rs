//! Jump Controller
//!
//! Edge-triggered jump with two guards, evaluated at trigger time:
//!
//! - **Coyote window**: last ground contact no more than `coyote_time` ago
//! - **Cooldown**: last jump at least `jump_cooldown` ago
//!
//! A passing trigger adds an upward velocity change of `jump_force / mass`
//! and stamps the jump time. A failing one changes nothing.

use glam::Vec3;
use log::debug;

use crate::config::MovementConfig;
use crate::error::{ActionOutcome, Rejection};
use crate::motion::MotionState;

/// Coyote-time and cooldown gated jump.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpController {
    coyote_time: f32,
    jump_cooldown: f32,
    velocity_change: f32,
}

impl JumpController {
    pub fn new(config: &MovementConfig) -> Self {
        Self {
            coyote_time: config.coyote_time,
            jump_cooldown: config.jump_cooldown,
            velocity_change: config.jump_velocity_change(),
        }
    }

    /// Check both guards at time `now` without touching the state.
    pub fn check(&self, state: &MotionState, now: f64) -> Result<(), Rejection> {
        if !(state.time_since_grounded(now) <= f64::from(self.coyote_time)) {
            return Err(Rejection::NotGrounded);
        }
        if !(state.time_since_jump(now) >= f64::from(self.jump_cooldown)) {
            return Err(Rejection::JumpCooldown);
        }
        Ok(())
    }

    /// Handle a jump trigger at time `now`.
    pub fn try_jump(&self, state: &mut MotionState, now: f64) -> ActionOutcome {
        match self.check(state, now) {
            Ok(()) => {
                state.velocity += Vec3::Y * self.velocity_change;
                state.last_jump_time = now;
                ActionOutcome::Performed
            }
            Err(reason) => {
                debug!("jump blocked: {reason}");
                ActionOutcome::Rejected(reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grounded_at(t: f64) -> MotionState {
        let mut state = MotionState::new();
        state.last_grounded_time = t;
        state
    }

    #[test]
    fn test_jump_inside_coyote_window() {
        let jump = JumpController::new(&MovementConfig::default());
        let mut state = grounded_at(0.0);

        assert_eq!(jump.try_jump(&mut state, 0.09), ActionOutcome::Performed);
        assert_eq!(state.velocity.y, 5.0);
        assert_eq!(state.last_jump_time, 0.09);
    }

    #[test]
    fn test_jump_after_coyote_window_rejected() {
        let jump = JumpController::new(&MovementConfig::default());
        let mut state = grounded_at(0.0);

        assert_eq!(
            jump.try_jump(&mut state, 0.2),
            ActionOutcome::Rejected(Rejection::NotGrounded)
        );
        assert_eq!(state.velocity.y, 0.0);
        assert_eq!(state.last_jump_time, crate::motion::NEVER);
    }

    #[test]
    fn test_never_grounded_cannot_jump() {
        let jump = JumpController::new(&MovementConfig::default());
        let mut state = MotionState::new();
        assert!(!jump.try_jump(&mut state, 0.0).is_performed());
    }

    #[test]
    fn test_cooldown_blocks_second_jump() {
        let jump = JumpController::new(&MovementConfig::default());
        let mut state = grounded_at(1.0);

        assert!(jump.try_jump(&mut state, 1.0).is_performed());
        state.last_grounded_time = 1.1;
        assert_eq!(
            jump.try_jump(&mut state, 1.1),
            ActionOutcome::Rejected(Rejection::JumpCooldown)
        );
        assert_eq!(state.velocity.y, 5.0);

        state.last_grounded_time = 1.4;
        assert!(jump.try_jump(&mut state, 1.4).is_performed());
        assert_eq!(state.velocity.y, 10.0);
    }

    #[test]
    fn test_impulse_scales_with_mass() {
        let config = MovementConfig {
            jump_force: 6.0,
            mass: 3.0,
            ..MovementConfig::default()
        };
        let jump = JumpController::new(&config);
        let mut state = grounded_at(0.0);
        state.velocity = Vec3::new(1.0, -4.0, 0.0);

        jump.try_jump(&mut state, 0.0);
        assert_eq!(state.velocity, Vec3::new(1.0, -2.0, 0.0));
    }

    #[test]
    fn test_non_finite_time_rejected() {
        let jump = JumpController::new(&MovementConfig::default());
        let mut state = grounded_at(0.0);
        assert_eq!(
            jump.try_jump(&mut state, f64::NAN),
            ActionOutcome::Rejected(Rejection::NotGrounded)
        );
    }
}
