//! Error and rejection types for the locomotion core.
//!
//! Two very different failure families live here:
//!
//! - [`LocomotionError`] is a real error. A required binding is missing or a
//!   configuration file is unusable. It is returned through `Result`.
//! - [`Rejection`] is not an error at all. A jump or dash trigger that fails
//!   its guard is a normal gameplay outcome, reported through
//!   [`ActionOutcome::Rejected`] and a `debug!` log line.

use thiserror::Error;

/// Errors surfaced to callers of the locomotion core.
#[derive(Debug, Error)]
pub enum LocomotionError {
    /// A required external binding (the camera) is not available.
    #[error("invalid reference: {0} is not bound")]
    InvalidReference(&'static str),

    /// A tuning value failed validation.
    #[error("invalid movement config: `{field}` {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },

    /// Reading a config file failed.
    #[error("failed to read movement config: {0}")]
    Io(#[from] std::io::Error),

    /// A config file is not valid JSON for [`MovementConfig`](crate::config::MovementConfig).
    #[error("failed to parse movement config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a discrete action trigger did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Outside the coyote window since the last grounded contact.
    #[error("not grounded and coyote window elapsed")]
    NotGrounded,
    /// A jump happened too recently.
    #[error("jump on cooldown")]
    JumpCooldown,
    /// A dash is still in flight.
    #[error("already dashing")]
    AlreadyDashing,
    /// The dash cooldown timer has not run out.
    #[error("dash on cooldown")]
    DashCooldown,
    /// Movement input is inside the dash deadzone, so there is no direction.
    #[error("no movement input")]
    NoInput,
    /// The controller is disabled and not listening to triggers.
    #[error("controller disabled")]
    Disabled,
}

/// Result of handling a jump or dash trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Performed,
    Rejected(Rejection),
}

impl ActionOutcome {
    pub fn is_performed(&self) -> bool {
        matches!(self, ActionOutcome::Performed)
    }

    /// The rejection reason, if the action was blocked.
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            ActionOutcome::Performed => None,
            ActionOutcome::Rejected(reason) => Some(*reason),
        }
    }
}
