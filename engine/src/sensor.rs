//! Ground Sensor
//!
//! Decides whether an entity stands on navigable ground by casting three
//! short parallel rays straight down: one from the sensor origin and one on
//! each side of it along the entity's right axis. A single center ray drops
//! out on ledges and slopes; any of the three touching is enough.
//!
//! ```text
//!        -right*r/2    origin    +right*r/2
//!             |          |          |
//!             v          v          v      length r
//! ```

use glam::Vec3;

use crate::world::{LayerMask, RaycastWorld};

/// Three-ray downward ground probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundSensor {
    /// Ray length; the side rays sit half of this away from the center
    pub radius: f32,
    /// Layers that count as navigable
    pub layer: LayerMask,
}

impl GroundSensor {
    pub fn new(radius: f32, layer: LayerMask) -> Self {
        Self { radius, layer }
    }

    /// Ray origins: center, `+right` side, `-right` side.
    ///
    /// `right_axis` is used as given, so a non-unit axis widens or narrows
    /// the spread.
    pub fn probe_origins(&self, origin: Vec3, right_axis: Vec3) -> [Vec3; 3] {
        let side = right_axis * self.radius * 0.5;
        [origin, origin + side, origin - side]
    }

    /// Start and end points of each probe, for debug drawing.
    pub fn probe_segments(&self, origin: Vec3, right_axis: Vec3) -> [(Vec3, Vec3); 3] {
        let down = Vec3::NEG_Y * self.radius.max(0.0);
        self.probe_origins(origin, right_axis).map(|start| (start, start + down))
    }

    /// True when any probe hits a surface on [`layer`](Self::layer) within
    /// [`radius`](Self::radius).
    ///
    /// A non-positive or non-finite radius, or a non-finite origin, reports
    /// not grounded.
    pub fn is_grounded(&self, world: &dyn RaycastWorld, origin: Vec3, right_axis: Vec3) -> bool {
        if !(self.radius.is_finite() && self.radius > 0.0) || !origin.is_finite() {
            return false;
        }
        // A broken axis only loses the side probes, the center still counts
        let right_axis = if right_axis.is_finite() {
            right_axis
        } else {
            Vec3::ZERO
        };

        self.probe_origins(origin, right_axis)
            .into_iter()
            .any(|start| {
                world
                    .raycast(start, Vec3::NEG_Y, self.radius, self.layer)
                    .is_some()
            })
    }
}

/// Free-function form of [`GroundSensor::is_grounded`].
pub fn is_grounded(
    world: &dyn RaycastWorld,
    origin: Vec3,
    right_axis: Vec3,
    radius: f32,
    layer: LayerMask,
) -> bool {
    GroundSensor::new(radius, layer).is_grounded(world, origin, right_axis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{StaticWorld, Surface};

    fn ledge_world() -> StaticWorld {
        // Ground only for x <= 0
        let mut world = StaticWorld::new();
        world.add(Surface::new(
            Vec3::new(-10.0, -1.0, -10.0),
            Vec3::new(0.0, 0.0, 10.0),
            LayerMask::GROUND,
        ));
        world
    }

    #[test]
    fn test_grounded_on_flat_floor() {
        let world = StaticWorld::flat_ground(0.0);
        let sensor = GroundSensor::new(0.1, LayerMask::GROUND);
        assert!(sensor.is_grounded(&world, Vec3::new(0.0, 0.05, 0.0), Vec3::X));
    }

    #[test]
    fn test_not_grounded_when_high() {
        let world = StaticWorld::flat_ground(0.0);
        let sensor = GroundSensor::new(0.1, LayerMask::GROUND);
        assert!(!sensor.is_grounded(&world, Vec3::new(0.0, 0.5, 0.0), Vec3::X));
    }

    #[test]
    fn test_side_probe_catches_ledge() {
        let world = ledge_world();
        let sensor = GroundSensor::new(0.1, LayerMask::GROUND);

        // Center is 0.03 past the ledge, the -right probe is 0.02 before it
        let origin = Vec3::new(0.03, 0.05, 0.0);
        let [center, _, _] = sensor.probe_origins(origin, Vec3::X);
        assert!(world.raycast(center, Vec3::NEG_Y, 0.1, LayerMask::GROUND).is_none());

        assert!(sensor.is_grounded(&world, origin, Vec3::X));
    }

    #[test]
    fn test_off_ledge_beyond_side_probes() {
        let world = ledge_world();
        let sensor = GroundSensor::new(0.1, LayerMask::GROUND);
        assert!(!sensor.is_grounded(&world, Vec3::new(0.2, 0.05, 0.0), Vec3::X));
    }

    #[test]
    fn test_non_navigable_layer_ignored() {
        let mut world = StaticWorld::new();
        world.add(Surface::floor(Vec3::ZERO, 5.0, 0.0, LayerMask::DECOR));
        let sensor = GroundSensor::new(0.1, LayerMask::GROUND);
        assert!(!sensor.is_grounded(&world, Vec3::new(0.0, 0.05, 0.0), Vec3::X));
    }

    #[test]
    fn test_degenerate_radius_is_not_grounded() {
        let world = StaticWorld::flat_ground(0.0);
        let origin = Vec3::new(0.0, 0.0, 0.0);
        assert!(!is_grounded(&world, origin, Vec3::X, 0.0, LayerMask::GROUND));
        assert!(!is_grounded(&world, origin, Vec3::X, -1.0, LayerMask::GROUND));
        assert!(!is_grounded(&world, origin, Vec3::X, f32::NAN, LayerMask::GROUND));
    }

    #[test]
    fn test_non_finite_axis_keeps_center_probe() {
        let world = StaticWorld::flat_ground(0.0);
        let sensor = GroundSensor::new(0.1, LayerMask::GROUND);
        assert!(sensor.is_grounded(&world, Vec3::new(0.0, 0.05, 0.0), Vec3::splat(f32::NAN)));
    }

    #[test]
    fn test_probe_segments() {
        let sensor = GroundSensor::new(0.2, LayerMask::GROUND);
        let segments = sensor.probe_segments(Vec3::ZERO, Vec3::X);
        assert_eq!(segments[0], (Vec3::ZERO, Vec3::new(0.0, -0.2, 0.0)));
        assert_eq!(segments[1].0, Vec3::new(0.1, 0.0, 0.0));
        assert_eq!(segments[2].0, Vec3::new(-0.1, 0.0, 0.0));
    }
}
