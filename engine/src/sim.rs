//! Headless simulation loop.
//!
//! Drives a [`PlayerController`] the way a game loop would: per rendered
//! frame, zero or more fixed physics ticks of [`FIXED_TIMESTEP`] from an
//! accumulator, then one variable tick. Triggers are delivered between frames
//! with [`Simulation::trigger`] and take effect immediately.
//!
//! # Order of operations (per frame)
//! 1. fixed ticks: locomotion step, then the rigid-body step
//! 2. variable tick: clock, ground stamp, dash timers, animation output

use log::trace;

use crate::animation::{AnimationDriver, AnimationParams};
use crate::body::RigidBody;
use crate::camera::CameraView;
use crate::controller::PlayerController;
use crate::error::{ActionOutcome, LocomotionError};
use crate::input::{ActionKind, InputSample};
use crate::world::RaycastWorld;

/// Physics step length (s)
pub const FIXED_TIMESTEP: f32 = 1.0 / 50.0;

/// Upper bound on physics steps run for one frame
pub const MAX_FIXED_STEPS_PER_FRAME: usize = 8;

/// Longest frame delta accepted before clamping (s)
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// What one call to [`Simulation::frame`] did.
#[derive(Debug)]
pub struct FrameReport {
    /// Parameters pushed to the animation driver
    pub params: AnimationParams,
    /// Number of fixed ticks run
    pub fixed_steps: usize,
    /// First error reported by a fixed tick, if any
    pub error: Option<LocomotionError>,
}

/// One controlled entity in a static world.
#[derive(Debug)]
pub struct Simulation<A: AnimationDriver, W: RaycastWorld> {
    player: PlayerController<A>,
    body: RigidBody,
    world: W,
    accumulator: f32,
}

impl<A: AnimationDriver, W: RaycastWorld> Simulation<A, W> {
    pub fn new(player: PlayerController<A>, world: W) -> Self {
        let body = RigidBody::from_config(player.config());
        Self {
            player,
            body,
            world,
            accumulator: 0.0,
        }
    }

    pub fn player(&self) -> &PlayerController<A> {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerController<A> {
        &mut self.player
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    /// Deliver an input trigger now.
    pub fn trigger(
        &mut self,
        action: ActionKind,
        input: InputSample,
        camera: Option<&dyn CameraView>,
    ) -> Result<ActionOutcome, LocomotionError> {
        self.player.handle_action(action, input, camera)
    }

    /// Advance by one rendered frame of `delta` seconds.
    pub fn frame(
        &mut self,
        delta: f32,
        input: InputSample,
        camera: Option<&dyn CameraView>,
    ) -> FrameReport {
        let delta = if delta.is_finite() {
            delta.clamp(0.0, MAX_FRAME_DELTA)
        } else {
            0.0
        };
        self.accumulator = (self.accumulator + delta)
            .min(FIXED_TIMESTEP * MAX_FIXED_STEPS_PER_FRAME as f32);

        let mut error = None;
        let mut steps = 0usize;
        while self.accumulator >= FIXED_TIMESTEP && steps < MAX_FIXED_STEPS_PER_FRAME {
            if let Err(err) = self.player.fixed_update(input, camera, FIXED_TIMESTEP) {
                error.get_or_insert(err);
            }
            self.body
                .step(self.player.state_mut(), &self.world, FIXED_TIMESTEP);
            self.accumulator -= FIXED_TIMESTEP;
            steps += 1;
        }
        trace!("frame {delta:.4}s ran {steps} fixed steps");

        let params = self.player.update(delta, &self.world);
        FrameReport {
            params,
            fixed_steps: steps,
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::ParameterTable;
    use crate::camera::CameraTransform;
    use crate::config::MovementConfig;
    use crate::world::StaticWorld;

    fn sim() -> Simulation<ParameterTable, StaticWorld> {
        let mut player =
            PlayerController::new(MovementConfig::default(), ParameterTable::new()).unwrap();
        player.enable();
        Simulation::new(player, StaticWorld::flat_ground(0.0))
    }

    #[test]
    fn test_fixed_steps_per_frame() {
        let mut sim = sim();
        let camera = CameraTransform::default();

        let report = sim.frame(0.05, InputSample::NONE, Some(&camera));
        assert_eq!(report.fixed_steps, 2);
        assert!(report.error.is_none());

        // Leftover 0.01 plus 0.015 makes one more step
        let report = sim.frame(0.015, InputSample::NONE, Some(&camera));
        assert_eq!(report.fixed_steps, 1);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut sim = sim();
        let report = sim.frame(5.0, InputSample::NONE, Some(&CameraTransform::default()));
        assert!(report.fixed_steps <= MAX_FIXED_STEPS_PER_FRAME);
        assert!((sim.player().now() - f64::from(MAX_FRAME_DELTA)).abs() < 1e-6);
    }

    #[test]
    fn test_missing_camera_reported_but_frame_completes() {
        let mut sim = sim();
        sim.player_mut().state_mut().position.y = 2.0;

        let report = sim.frame(0.04, InputSample::new(1.0, 0.0), None);
        assert!(matches!(report.error, Some(LocomotionError::InvalidReference(_))));
        assert!(sim.player().state().position.y < 2.0);
        assert_eq!(sim.player().state().velocity.x, 0.0);
    }

    #[test]
    fn test_standing_still_stays_grounded() {
        let mut sim = sim();
        let camera = CameraTransform::default();
        for _ in 0..60 {
            let report = sim.frame(1.0 / 60.0, InputSample::NONE, Some(&camera));
            assert!(report.params.is_grounded);
        }
        assert!(sim.player().state().position.y.abs() < 1e-4);
    }
}
