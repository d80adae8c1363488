//! Player Controller
//!
//! Ties the locomotion pieces together for one entity and exposes the three
//! entry points the host calls:
//!
//! - [`fixed_update`](PlayerController::fixed_update) every physics step
//! - [`update`](PlayerController::update) once per rendered frame
//! - [`on_jump`](PlayerController::on_jump) / [`on_dash`](PlayerController::on_dash)
//!   whenever the input layer fires a trigger, between ticks
//!
//! # Usage
//!
//! ```rust,ignore
//! use locomotion_engine::{MovementConfig, ParameterTable, PlayerController};
//!
//! let mut player = PlayerController::new(MovementConfig::default(), ParameterTable::new())?;
//! player.enable();
//!
//! // input callbacks
//! player.on_jump();
//! player.on_dash(input, Some(&camera))?;
//!
//! // physics step
//! player.fixed_update(input, Some(&camera), FIXED_TIMESTEP)?;
//!
//! // render frame
//! let params = player.update(frame_dt, &world);
//! ```

use glam::Vec3;
use log::{debug, trace};

use crate::animation::{AnimationDriver, AnimationParams};
use crate::camera::CameraView;
use crate::config::MovementConfig;
use crate::dash::DashController;
use crate::error::{ActionOutcome, LocomotionError, Rejection};
use crate::events::{DashObserver, ObserverId};
use crate::input::{ActionKind, InputSample};
use crate::jump::JumpController;
use crate::locomotion::LocomotionEngine;
use crate::motion::MotionState;
use crate::sensor::GroundSensor;
use crate::world::RaycastWorld;

/// Physics-driven character controller for one entity.
///
/// The animation driver is injected at construction and lives as long as the
/// controller. Cameras and world geometry are only borrowed per call.
#[derive(Debug)]
pub struct PlayerController<A: AnimationDriver> {
    config: MovementConfig,
    state: MotionState,
    engine: LocomotionEngine,
    sensor: GroundSensor,
    jump: JumpController,
    dash: DashController,
    animator: A,

    /// Seconds of variable-tick time since spawn
    clock: f64,

    /// Listening to action triggers
    enabled: bool,

    last_params: AnimationParams,
}

impl<A: AnimationDriver> PlayerController<A> {
    /// Create a controller at the origin. Fails if `config` is invalid.
    pub fn new(config: MovementConfig, animator: A) -> Result<Self, LocomotionError> {
        Self::with_state(config, MotionState::new(), animator)
    }

    /// Create a controller with an explicit initial state.
    pub fn with_state(
        config: MovementConfig,
        state: MotionState,
        animator: A,
    ) -> Result<Self, LocomotionError> {
        config.validate()?;
        Ok(Self {
            config,
            state,
            engine: LocomotionEngine::new(config),
            sensor: GroundSensor::new(config.ground_check_radius, config.ground_layer),
            jump: JumpController::new(&config),
            dash: DashController::new(),
            animator,
            clock: 0.0,
            enabled: false,
            last_params: AnimationParams::default(),
        })
    }

    /// Start listening to jump and dash triggers.
    pub fn enable(&mut self) {
        if !self.enabled {
            debug!("player controller enabled");
            self.enabled = true;
        }
    }

    /// Stop listening to jump and dash triggers.
    pub fn disable(&mut self) {
        if self.enabled {
            debug!("player controller disabled");
            self.enabled = false;
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn state(&self) -> &MotionState {
        &self.state
    }

    /// Mutable state access for the physics host (position integration,
    /// collision response) and for teleports.
    pub fn state_mut(&mut self) -> &mut MotionState {
        &mut self.state
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }

    /// Current controller time in seconds.
    pub fn now(&self) -> f64 {
        self.clock
    }

    /// Parameters pushed by the most recent [`update`](Self::update).
    pub fn last_animation_params(&self) -> AnimationParams {
        self.last_params
    }

    pub fn subscribe_dash(&mut self, observer: Box<dyn DashObserver>) -> ObserverId {
        self.dash.subscribe(observer)
    }

    pub fn unsubscribe_dash(&mut self, id: ObserverId) -> Option<Box<dyn DashObserver>> {
        self.dash.unsubscribe(id)
    }

    /// World position the ground probes start from.
    pub fn ground_check_origin(&self) -> Vec3 {
        self.state.position + self.config.ground_check_offset
    }

    /// Probe segments for debug drawing.
    pub fn ground_probe_segments(&self) -> [(Vec3, Vec3); 3] {
        self.sensor
            .probe_segments(self.ground_check_origin(), self.state.right_axis())
    }

    /// Fresh ground query against `world`; never cached.
    pub fn is_grounded(&self, world: &dyn RaycastWorld) -> bool {
        self.sensor
            .is_grounded(world, self.ground_check_origin(), self.state.right_axis())
    }

    /// Dispatch a trigger from the input layer.
    pub fn handle_action(
        &mut self,
        action: ActionKind,
        input: InputSample,
        camera: Option<&dyn CameraView>,
    ) -> Result<ActionOutcome, LocomotionError> {
        match action {
            ActionKind::Jump => Ok(self.on_jump()),
            ActionKind::Dash => self.on_dash(input, camera),
        }
    }

    /// Jump trigger. Rejections are logged and reported, never errors.
    pub fn on_jump(&mut self) -> ActionOutcome {
        if !self.enabled {
            return ActionOutcome::Rejected(Rejection::Disabled);
        }
        self.jump.try_jump(&mut self.state, self.clock)
    }

    /// Dash trigger.
    ///
    /// Guards are evaluated before the camera is consulted, so a blocked dash
    /// never fails on a missing camera. An allowed dash without a camera
    /// returns `InvalidReference` and changes nothing.
    pub fn on_dash(
        &mut self,
        input: InputSample,
        camera: Option<&dyn CameraView>,
    ) -> Result<ActionOutcome, LocomotionError> {
        if !self.enabled {
            return Ok(ActionOutcome::Rejected(Rejection::Disabled));
        }
        if let Err(reason) = DashController::check(&self.state, input) {
            debug!("dash blocked: {reason}");
            return Ok(ActionOutcome::Rejected(reason));
        }
        let basis = self.engine.frame_mut().basis(camera)?;
        Ok(self
            .dash
            .try_dash(&mut self.state, &self.config, input, &basis))
    }

    /// One fixed physics tick.
    ///
    /// Without a camera this still applies gravity, clamping and rest
    /// snapping, then reports `InvalidReference`.
    pub fn fixed_update(
        &mut self,
        input: InputSample,
        camera: Option<&dyn CameraView>,
        dt: f32,
    ) -> Result<(), LocomotionError> {
        self.engine.fixed_step(&mut self.state, input, camera, dt)
    }

    /// One variable (per-frame) tick.
    ///
    /// Advances the clock, stamps ground contact, runs the dash countdowns
    /// and pushes the animation parameters. Returns what was pushed.
    pub fn update(&mut self, dt: f32, world: &dyn RaycastWorld) -> AnimationParams {
        if dt.is_finite() && dt > 0.0 {
            self.clock += f64::from(dt);
        }

        let grounded = self.is_grounded(world);
        if grounded {
            self.state.last_grounded_time = self.clock;
        }

        self.dash.tick(&mut self.state, dt);

        let params = AnimationParams::from_state(&self.state, grounded, self.config.max_speed);
        params.apply(&mut self.animator);
        trace!("animation params {params:?}");
        self.last_params = params;
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{PARAM_GROUNDED, PARAM_SPEED, ParameterTable};
    use crate::camera::CameraTransform;
    use crate::events::DashEvent;
    use crate::world::StaticWorld;
    use std::cell::RefCell;
    use std::f32::consts::FRAC_PI_2;
    use std::rc::Rc;

    fn player() -> PlayerController<ParameterTable> {
        let mut player =
            PlayerController::new(MovementConfig::default(), ParameterTable::new()).unwrap();
        player.enable();
        player
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = MovementConfig {
            dash_speed: f32::INFINITY,
            ..MovementConfig::default()
        };
        assert!(PlayerController::new(config, ParameterTable::new()).is_err());
    }

    #[test]
    fn test_disabled_controller_ignores_triggers() {
        let mut player =
            PlayerController::new(MovementConfig::default(), ParameterTable::new()).unwrap();
        assert!(!player.is_enabled());
        assert_eq!(
            player.on_jump(),
            ActionOutcome::Rejected(Rejection::Disabled)
        );
        let camera = CameraTransform::default();
        assert_eq!(
            player
                .on_dash(InputSample::new(1.0, 0.0), Some(&camera))
                .unwrap(),
            ActionOutcome::Rejected(Rejection::Disabled)
        );

        player.enable();
        player.disable();
        assert!(!player.is_enabled());
    }

    #[test]
    fn test_update_stamps_ground_contact() {
        let world = StaticWorld::flat_ground(0.0);
        let mut player = player();

        player.update(0.016, &world);
        assert_eq!(player.state().last_grounded_time, player.now());
        assert!(player.on_jump().is_performed());
    }

    #[test]
    fn test_update_pushes_animation_params() {
        let world = StaticWorld::flat_ground(0.0);
        let mut player = player();
        player.state_mut().velocity = Vec3::new(2.5, 0.0, 0.0);

        let params = player.update(0.016, &world);
        assert_eq!(params, player.last_animation_params());
        assert_eq!(player.animator().float(PARAM_SPEED), Some(0.5));
        assert_eq!(player.animator().bool(PARAM_GROUNDED), Some(true));
    }

    #[test]
    fn test_clock_keeps_resolving_frames_after_long_uptime() {
        let world = StaticWorld::flat_ground(0.0);
        let mut player = player();
        // About six days in
        player.clock = 530_000.0;

        player.update(1.0 / 60.0, &world);
        let start = player.now();
        assert!(player.on_jump().is_performed());

        for _ in 0..600 {
            player.update(1.0 / 60.0, &world);
        }
        assert!(player.now() - start > 9.9);
        assert!(player.on_jump().is_performed());
    }

    #[test]
    fn test_airborne_player_cannot_jump() {
        let world = StaticWorld::flat_ground(0.0);
        let mut player = player();
        player.state_mut().position = Vec3::new(0.0, 3.0, 0.0);

        player.update(0.016, &world);
        assert_eq!(
            player.on_jump(),
            ActionOutcome::Rejected(Rejection::NotGrounded)
        );
    }

    #[test]
    fn test_dash_without_camera_is_invalid_reference() {
        let mut player = player();
        let before = player.state().clone();

        let result = player.on_dash(InputSample::new(1.0, 0.0), None);
        assert!(matches!(result, Err(LocomotionError::InvalidReference(_))));
        assert_eq!(*player.state(), before);
    }

    #[test]
    fn test_dash_with_camera_looking_straight_down() {
        let mut player = player();
        // Yawed to +X, looking straight down
        let camera = CameraTransform::from_yaw_pitch(FRAC_PI_2, -FRAC_PI_2);

        let outcome = player
            .on_dash(InputSample::new(1.0, 1.0), Some(&camera))
            .unwrap();
        assert!(outcome.is_performed());

        let expected = Vec3::new(1.0, 0.0, 1.0).normalize() * player.config().dash_speed;
        assert!((player.state().velocity - expected).length() < 1e-3);
    }

    #[test]
    fn test_blocked_dash_without_camera_is_not_an_error() {
        let mut player = player();
        let result = player.on_dash(InputSample::NONE, None).unwrap();
        assert_eq!(result, ActionOutcome::Rejected(Rejection::NoInput));
    }

    #[test]
    fn test_dash_observers_through_controller() {
        let world = StaticWorld::flat_ground(0.0);
        let mut player = player();
        let camera = CameraTransform::default();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let id = player.subscribe_dash(Box::new(move |e: &DashEvent| sink.borrow_mut().push(*e)));

        player
            .handle_action(ActionKind::Dash, InputSample::new(0.0, 1.0), Some(&camera))
            .unwrap();
        for _ in 0..20 {
            player.update(0.02, &world);
        }

        assert_eq!(events.borrow().len(), 2);
        assert!(matches!(events.borrow()[0], DashEvent::Started { .. }));
        assert_eq!(events.borrow()[1], DashEvent::Finished);
        assert!(player.unsubscribe_dash(id).is_some());
    }

    #[test]
    fn test_probe_segments_follow_position() {
        let mut player = player();
        player.state_mut().position = Vec3::new(1.0, 2.0, 3.0);
        let [(center, end), _, _] = player.ground_probe_segments();
        assert!((center - Vec3::new(1.0, 2.05, 3.0)).length() < 1e-5);
        assert!((end.y - 1.95).abs() < 1e-5);
    }
}
