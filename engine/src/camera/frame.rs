//! Camera-relative movement basis.
//!
//! Input is interpreted relative to the view: stick-up moves along the
//! camera's forward axis flattened onto the ground plane, stick-right along
//! its flattened right axis. The camera itself belongs to someone else and is
//! only borrowed per query through [`CameraView`].

use glam::{Quat, Vec2, Vec3};
use log::{info, warn};

use crate::error::LocomotionError;

/// Below this squared length a flattened axis is considered degenerate.
const MIN_AXIS_LENGTH_SQ: f32 = 1e-6;

/// Read-only access to a camera's world orientation.
pub trait CameraView {
    /// World-space right vector.
    fn right(&self) -> Vec3;
    /// World-space forward (view) vector.
    fn forward(&self) -> Vec3;
}

/// Plain camera orientation, looking down -Z at zero yaw and pitch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTransform {
    pub rotation: Quat,
}

impl Default for CameraTransform {
    fn default() -> Self {
        Self {
            rotation: Quat::IDENTITY,
        }
    }
}

impl CameraTransform {
    pub fn from_rotation(rotation: Quat) -> Self {
        Self { rotation }
    }

    /// Build from yaw/pitch angles in radians.
    ///
    /// Yaw 0 looks toward -Z, positive yaw turns toward +X. Positive pitch
    /// looks up.
    pub fn from_yaw_pitch(yaw: f32, pitch: f32) -> Self {
        Self {
            rotation: Quat::from_rotation_y(-yaw) * Quat::from_rotation_x(pitch),
        }
    }
}

impl CameraView for CameraTransform {
    fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }
}

/// Horizontal movement axes derived from a camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    pub right: Vec3,
    pub forward: Vec3,
}

impl CameraBasis {
    /// World-aligned basis used before any camera has been seen.
    pub const WORLD: CameraBasis = CameraBasis {
        right: Vec3::X,
        forward: Vec3::NEG_Z,
    };

    /// Map a 2D input onto the ground plane: `x * right + y * forward`.
    ///
    /// The result is not normalized; diagonal input on a raw stick is longer
    /// than one.
    pub fn planar_direction(&self, input: Vec2) -> Vec3 {
        self.right * input.x + self.forward * input.y
    }
}

impl Default for CameraBasis {
    fn default() -> Self {
        Self::WORLD
    }
}

/// Drop the vertical component and normalize, or `None` if nothing is left.
fn flatten(axis: Vec3) -> Option<Vec3> {
    let flat = Vec3::new(axis.x, 0.0, axis.z);
    if flat.is_finite() && flat.length_squared() > MIN_AXIS_LENGTH_SQ {
        Some(flat.normalize())
    } else {
        None
    }
}

/// Projects a camera onto the ground plane, remembering the last good basis.
///
/// When a camera looks straight up or down its forward axis has no horizontal
/// component left; it is rebuilt from the right axis instead.
#[derive(Debug, Clone)]
pub struct CameraFrame {
    last: CameraBasis,
    missing_reported: bool,
}

impl Default for CameraFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraFrame {
    pub fn new() -> Self {
        Self {
            last: CameraBasis::WORLD,
            missing_reported: false,
        }
    }

    /// Last basis successfully produced.
    pub fn last_basis(&self) -> CameraBasis {
        self.last
    }

    /// Flattened camera right axis.
    pub fn right_axis(&mut self, camera: Option<&dyn CameraView>) -> Result<Vec3, LocomotionError> {
        Ok(self.basis(camera)?.right)
    }

    /// Flattened camera forward axis.
    pub fn forward_axis(&mut self, camera: Option<&dyn CameraView>) -> Result<Vec3, LocomotionError> {
        Ok(self.basis(camera)?.forward)
    }

    /// Both axes at once, always orthogonal.
    ///
    /// Forward wins when it survives flattening and right is rebuilt from it.
    /// A camera looking straight up or down still has a usable right axis,
    /// so forward is rebuilt from that instead. Only when neither survives is
    /// the previous basis kept.
    pub fn basis(&mut self, camera: Option<&dyn CameraView>) -> Result<CameraBasis, LocomotionError> {
        let camera = self.bound(camera)?;
        if let Some(forward) = flatten(camera.forward()) {
            self.last = CameraBasis {
                right: forward.cross(Vec3::Y),
                forward,
            };
        } else if let Some(right) = flatten(camera.right()) {
            self.last = CameraBasis {
                right,
                forward: Vec3::Y.cross(right),
            };
        }
        Ok(self.last)
    }

    fn bound<'a>(
        &mut self,
        camera: Option<&'a dyn CameraView>,
    ) -> Result<&'a dyn CameraView, LocomotionError> {
        match camera {
            Some(camera) => {
                if self.missing_reported {
                    info!("camera binding restored");
                    self.missing_reported = false;
                }
                Ok(camera)
            }
            None => {
                if !self.missing_reported {
                    warn!("no camera bound; planar input and facing are suspended");
                    self.missing_reported = true;
                }
                Err(LocomotionError::InvalidReference("camera"))
            }
        }
    }
}
