//! Input Module
//!
//! Device-agnostic movement input: a 2D axis sample plus discrete action
//! triggers. Binding keys or sticks to these is the host's business.

pub mod sample;

pub use sample::{ActionKind, InputSample};
