//! World geometry queries.
//!
//! The locomotion core never owns level geometry. It only asks one question
//! of it: "does a ray starting here hit a surface on one of these layers
//! within this distance?". [`RaycastWorld`] is that question; [`StaticWorld`]
//! answers it for a set of axis-aligned boxes and is what the tests and the
//! headless simulation use.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Bit set of surface layers.
///
/// A ray query carries a mask; a surface is only considered when its own
/// layer bits intersect the mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL: LayerMask = LayerMask(u32::MAX);
    /// Layer used for walkable ground unless configured otherwise.
    pub const GROUND: LayerMask = LayerMask(1 << 0);
    /// Layer for props and decoration that should never count as ground.
    pub const DECOR: LayerMask = LayerMask(1 << 1);

    /// Mask containing the single layer `index` (0..32).
    pub fn layer(index: u32) -> Self {
        LayerMask(1u32.checked_shl(index).unwrap_or(0))
    }

    pub fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }

    pub fn union(self, other: LayerMask) -> Self {
        LayerMask(self.0 | other.0)
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        LayerMask::GROUND
    }
}

/// A successful ray query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// World-space point where the ray met the surface
    pub point: Vec3,
    /// Distance from the ray origin to `point`
    pub distance: f32,
    /// Layer of the surface that was hit
    pub layer: LayerMask,
}

/// Opaque raycast service provided by whatever owns the level geometry.
pub trait RaycastWorld {
    /// Cast a ray and return the nearest hit within `max_distance` on a
    /// surface whose layer intersects `mask`.
    ///
    /// `direction` is expected to be normalized.
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit>;
}

/// Axis-aligned solid box on a layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub min: Vec3,
    pub max: Vec3,
    pub layer: LayerMask,
}

impl Surface {
    pub fn new(min: Vec3, max: Vec3, layer: LayerMask) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
            layer,
        }
    }

    /// Thin horizontal slab whose top face sits at `height`.
    pub fn floor(center: Vec3, half_extent: f32, height: f32, layer: LayerMask) -> Self {
        Self::new(
            Vec3::new(center.x - half_extent, height - 1.0, center.z - half_extent),
            Vec3::new(center.x + half_extent, height, center.z + half_extent),
            layer,
        )
    }
}

/// Static level made of [`Surface`] boxes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticWorld {
    surfaces: Vec<Surface>,
}

impl StaticWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// A world with one large ground slab whose top is at `height`.
    pub fn flat_ground(height: f32) -> Self {
        let mut world = Self::new();
        world.add(Surface::floor(Vec3::ZERO, 500.0, height, LayerMask::GROUND));
        world
    }

    pub fn add(&mut self, surface: Surface) -> &mut Self {
        self.surfaces.push(surface);
        self
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }
}

impl RaycastWorld for StaticWorld {
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        if !(max_distance > 0.0) || !origin.is_finite() || !direction.is_finite() {
            return None;
        }

        self.surfaces
            .iter()
            .filter(|surface| surface.layer.intersects(mask))
            .filter_map(|surface| {
                ray_aabb_intersect(origin, direction, surface.min, surface.max)
                    .filter(|t| *t <= max_distance)
                    .map(|t| RayHit {
                        point: origin + direction * t,
                        distance: t,
                        layer: surface.layer,
                    })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

/// Slab-method ray/box test.
///
/// Returns the distance along `ray_dir` to the nearest intersection at or in
/// front of the origin. A ray that starts inside the box reports a hit at
/// distance zero.
pub fn ray_aabb_intersect(ray_origin: Vec3, ray_dir: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        let origin = ray_origin[axis];
        let dir = ray_dir[axis];
        let (lo, hi) = (aabb_min[axis], aabb_max[axis]);

        if dir.abs() < 1e-10 {
            // Parallel to this slab: must already be between the planes
            if origin < lo || origin > hi {
                return None;
            }
            continue;
        }

        let inv = 1.0 / dir;
        let t1 = (lo - origin) * inv;
        let t2 = (hi - origin) * inv;
        t_min = t_min.max(t1.min(t2));
        t_max = t_max.min(t1.max(t2));
    }

    if t_max >= t_min && t_max >= 0.0 {
        Some(t_min.max(0.0))
    } else {
        None
    }
}
