//! Camera Module
//!
//! Turns a borrowed camera orientation into the horizontal movement basis.
//! The core never owns a camera; it only reads one per query.

pub mod frame;

pub use frame::{CameraBasis, CameraFrame, CameraTransform, CameraView};
