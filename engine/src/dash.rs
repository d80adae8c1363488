//! Dash Controller
//!
//! A dash overwrites the velocity with `direction * dash_speed` and lifts the
//! horizontal speed ceiling for `dash_duration` seconds. State machine:
//!
//! ```text
//!   idle --trigger--> dashing --dash_duration elapsed--> idle
//! ```
//!
//! A trigger is refused while a dash is in flight, while the cooldown timer
//! is still running, or when the movement input is inside the deadzone. The
//! cooldown starts together with the dash, so the next dash is possible
//! `dash_cooldown` seconds after the previous one *began*.
//!
//! There is no coroutine: both countdowns are advanced by [`DashController::tick`]
//! once per variable tick.

use log::{debug, trace};

use crate::camera::CameraBasis;
use crate::config::MovementConfig;
use crate::error::{ActionOutcome, Rejection};
use crate::events::{DashEvent, DashObserver, ObserverId, ObserverRegistry};
use crate::input::InputSample;
use crate::motion::{MotionState, TIMER_EPSILON};

/// Squared input length below which a dash has no direction
pub const DASH_INPUT_DEADZONE_SQ: f32 = 0.1;

fn count_down(timer: f32, dt: f32) -> f32 {
    let left = timer - dt;
    if left <= TIMER_EPSILON { 0.0 } else { left }
}

/// Timed velocity override with cooldown, plus its listeners.
#[derive(Debug, Default)]
pub struct DashController {
    observers: ObserverRegistry<dyn DashObserver>,
}

impl DashController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Box<dyn DashObserver>) -> ObserverId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> Option<Box<dyn DashObserver>> {
        self.observers.unsubscribe(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Re-entrancy, cooldown and deadzone guards, in that order.
    pub fn check(state: &MotionState, input: InputSample) -> Result<(), Rejection> {
        if state.is_dashing {
            return Err(Rejection::AlreadyDashing);
        }
        if state.dash_timer > 0.0 {
            return Err(Rejection::DashCooldown);
        }
        if !(input.length_squared() >= DASH_INPUT_DEADZONE_SQ) {
            return Err(Rejection::NoInput);
        }
        Ok(())
    }

    /// Handle a dash trigger with the current camera basis.
    pub fn try_dash(
        &mut self,
        state: &mut MotionState,
        config: &MovementConfig,
        input: InputSample,
        basis: &CameraBasis,
    ) -> ActionOutcome {
        if let Err(reason) = Self::check(state, input) {
            return Self::reject(reason);
        }

        let direction = basis.planar_direction(input.axis()).normalize_or_zero();
        if direction == glam::Vec3::ZERO {
            return Self::reject(Rejection::NoInput);
        }

        state.dash_timer = config.dash_cooldown;
        state.dash_remaining = config.dash_duration;
        state.is_dashing = true;
        state.velocity = direction * config.dash_speed;
        debug!("dash started along {direction:?}");

        self.notify(DashEvent::Started {
            direction,
            speed: config.dash_speed,
        });
        ActionOutcome::Performed
    }

    /// Advance the cooldown and, if dashing, the duration countdown.
    ///
    /// Ends the dash once its duration has elapsed and emits
    /// [`DashEvent::Finished`].
    pub fn tick(&mut self, state: &mut MotionState, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        state.dash_timer = count_down(state.dash_timer, dt);

        if state.is_dashing {
            state.dash_remaining = count_down(state.dash_remaining, dt);
            if state.dash_remaining <= 0.0 {
                state.is_dashing = false;
                trace!("dash finished");
                self.notify(DashEvent::Finished);
            }
        }
    }

    fn reject(reason: Rejection) -> ActionOutcome {
        debug!("dash blocked: {reason}");
        ActionOutcome::Rejected(reason)
    }

    fn notify(&mut self, event: DashEvent) {
        for observer in self.observers.iter_mut() {
            observer.on_dash_event(&event);
        }
    }
}
