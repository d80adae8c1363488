//! Locomotion Engine Library
//!
//! Physics-driven character locomotion for a single controlled entity:
//! camera-relative movement with a speed ceiling, three-ray ground sensing,
//! coyote-time jumping, a timed dash that lifts the speed ceiling, and
//! orientation smoothed toward the movement direction.
//!
//! # Modules
//!
//! - [`controller`] - [`PlayerController`], the per-entity entry point
//! - [`locomotion`] - Fixed-tick integrator
//! - [`jump`] / [`dash`] - Trigger-driven actions
//! - [`sensor`] - Ground probing
//! - [`camera`] - Camera-relative movement basis
//! - [`world`] - Raycast queries and a static box world
//! - [`sim`] - Fixed-step accumulator loop with a minimal rigid body
//!
//! # Example
//!
//! ```ignore
//! use locomotion_engine::{
//!     ActionKind, CameraTransform, InputSample, MovementConfig, ParameterTable,
//!     PlayerController, Simulation, StaticWorld,
//! };
//!
//! let mut player = PlayerController::new(MovementConfig::default(), ParameterTable::new())?;
//! player.enable();
//! let mut sim = Simulation::new(player, StaticWorld::flat_ground(0.0));
//! let camera = CameraTransform::from_yaw_pitch(0.0, -0.3);
//!
//! let input = InputSample::new(0.0, 1.0);
//! sim.trigger(ActionKind::Dash, input, Some(&camera))?;
//! let report = sim.frame(1.0 / 60.0, input, Some(&camera));
//! println!("speed {:.2}", report.params.speed);
//! ```

pub mod animation;
pub mod body;
pub mod camera;
pub mod config;
pub mod controller;
pub mod dash;
pub mod error;
pub mod events;
pub mod input;
pub mod jump;
pub mod locomotion;
pub mod motion;
pub mod sensor;
pub mod sim;
pub mod world;

pub use animation::{AnimationDriver, AnimationParams, ParameterTable};
pub use camera::{CameraBasis, CameraFrame, CameraTransform, CameraView};
pub use config::MovementConfig;
pub use controller::PlayerController;
pub use dash::DashController;
pub use error::{ActionOutcome, LocomotionError, Rejection};
pub use events::{DashEvent, DashObserver, ObserverId};
pub use input::{ActionKind, InputSample};
pub use jump::JumpController;
pub use locomotion::LocomotionEngine;
pub use motion::MotionState;
pub use sensor::GroundSensor;
pub use sim::{FIXED_TIMESTEP, FrameReport, Simulation};
pub use world::{LayerMask, RaycastWorld, StaticWorld, Surface};
