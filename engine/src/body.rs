//! Minimal rigid-body step.
//!
//! Stands in for the host physics engine in the headless simulation and the
//! tests: applies the engine's own gravity, integrates position and stops the
//! body on navigable ground. No walls, no friction, no torque.

use glam::Vec3;

use crate::config::MovementConfig;
use crate::motion::MotionState;
use crate::world::{LayerMask, RaycastWorld};

/// How far above the body the landing probe starts (m)
pub const STEP_HEIGHT: f32 = 0.3;

/// Point-mass body integrated with semi-implicit Euler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidBody {
    pub gravity: Vec3,
    pub solid_layers: LayerMask,
}

impl RigidBody {
    pub fn new(gravity: Vec3, solid_layers: LayerMask) -> Self {
        Self {
            gravity,
            solid_layers,
        }
    }

    pub fn from_config(config: &MovementConfig) -> Self {
        Self::new(config.gravity, config.ground_layer)
    }

    /// Advance one physics step. Returns true when the body ended the step
    /// resting on a surface.
    pub fn step(&self, state: &mut MotionState, world: &dyn RaycastWorld, dt: f32) -> bool {
        if !(dt.is_finite() && dt > 0.0) {
            return false;
        }

        state.velocity += self.gravity * dt;
        let mut next = state.position + state.velocity * dt;
        let mut supported = false;

        if state.velocity.y <= 0.0 {
            let top = state.position.y.max(next.y) + STEP_HEIGHT;
            let start = Vec3::new(next.x, top, next.z);
            if let Some(hit) = world.raycast(start, Vec3::NEG_Y, top - next.y, self.solid_layers) {
                next.y = hit.point.y;
                state.velocity.y = 0.0;
                supported = true;
            }
        }

        state.position = next;
        supported
    }
}
