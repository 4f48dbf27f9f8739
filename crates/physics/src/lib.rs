#![warn(missing_docs)]
//! Ray queries against axis-aligned colliders.

mod scene;

pub use scene::{Scene, SceneObject};

use gazekit_core::{ActivatableSet, TargetId};
use glam::Vec3;

/// Half-line starting at `origin` pointing along `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point in world space.
    pub origin: Vec3,
    /// Direction of travel. Not required to be normalized.
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// A ray is degenerate when its direction has no length or is not finite.
    pub fn is_degenerate(&self) -> bool {
        !self.origin.is_finite()
            || !self.direction.is_finite()
            || self.direction.length_squared() <= f32::EPSILON
    }

    /// Point at parametric distance `t` along the normalized direction.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction.normalize_or_zero() * t
    }
}

/// Axis-aligned bounding box used as a gaze collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Create an AABB from center position and size.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half_size = size.abs() * 0.5;
        Self {
            min: center - half_size,
            max: center + half_size,
        }
    }

    /// Distance along the normalized ray to the first intersection, if any.
    ///
    /// A ray starting inside the box reports the exit distance.
    pub fn ray_intersection(&self, ray: &Ray) -> Option<f32> {
        if ray.is_degenerate() {
            return None;
        }
        let dir = ray.direction.normalize();
        let inv_dir = dir.recip();

        let t1 = (self.min - ray.origin) * inv_dir;
        let t2 = (self.max - ray.origin) * inv_dir;

        // NaN from 0 * inf on an axis-parallel ray is dropped by f32::min/max.
        let tmin = t1.min(t2).max_element();
        let tmax = t1.max(t2).min_element();

        // Entire box is behind the ray origin
        if tmax < 0.0 {
            return None;
        }

        if tmin > tmax {
            return None;
        }

        Some(if tmin < 0.0 { tmax } else { tmin })
    }
}

/// Nearest hit returned by a [`RaycastQuery`].
#[derive(Clone)]
pub struct RaycastHit {
    /// Identity of the object that was hit.
    pub target: TargetId,
    /// Display name, used by diagnostics.
    pub name: String,
    /// Distance from the ray origin to the hit point.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
    /// Capabilities attached to the hit object. Empty for inert objects.
    pub activatables: ActivatableSet,
}

impl RaycastHit {
    /// Whether the hit object participates in gaze interaction.
    pub fn is_interactive(&self) -> bool {
        !self.activatables.is_empty()
    }
}

impl std::fmt::Debug for RaycastHit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RaycastHit")
            .field("target", &self.target)
            .field("name", &self.name)
            .field("distance", &self.distance)
            .field("point", &self.point)
            .field("activatables", &self.activatables.len())
            .finish()
    }
}

/// Nearest-hit scene query with unbounded range.
///
/// Implementations must report degenerate rays and empty scenes as `None`.
pub trait RaycastQuery {
    /// Cast `ray` and return the closest hit, if any.
    fn cast_ray(&self, ray: &Ray) -> Option<RaycastHit>;
}

impl<Q: RaycastQuery + ?Sized> RaycastQuery for &Q {
    fn cast_ray(&self, ray: &Ray) -> Option<RaycastHit> {
        (**self).cast_ray(ray)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aabb_ray_intersection() {
        let aabb = Aabb::from_center_size(Vec3::ZERO, Vec3::ONE);

        // Ray pointing at center from positive Z
        let hit = aabb.ray_intersection(&Ray::new(Vec3::new(0.0, 0.0, 2.0), Vec3::NEG_Z));
        assert!((hit.expect("ray should hit") - 1.5).abs() < 0.001);

        // Ray missing the box
        let miss = aabb.ray_intersection(&Ray::new(Vec3::new(2.0, 0.0, 2.0), Vec3::NEG_Z));
        assert!(miss.is_none());
    }

    #[test]
    fn box_behind_origin_is_not_hit() {
        let aabb = Aabb::from_center_size(Vec3::new(0.0, 0.0, 5.0), Vec3::ONE);
        assert!(aabb
            .ray_intersection(&Ray::new(Vec3::ZERO, Vec3::NEG_Z))
            .is_none());
    }

    #[test]
    fn origin_inside_box_reports_exit_distance() {
        let aabb = Aabb::from_center_size(Vec3::ZERO, Vec3::splat(2.0));
        let t = aabb
            .ray_intersection(&Ray::new(Vec3::ZERO, Vec3::X))
            .expect("inside ray should hit");
        assert!((t - 1.0).abs() < 0.001);
    }

    #[test]
    fn unnormalized_direction_reports_world_distance() {
        let aabb = Aabb::from_center_size(Vec3::new(0.0, 0.0, -5.0), Vec3::ONE);
        let t = aabb
            .ray_intersection(&Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0)))
            .expect("ray should hit");
        assert!((t - 4.5).abs() < 0.001);
    }

    #[test]
    fn degenerate_rays_never_hit() {
        let aabb = Aabb::from_center_size(Vec3::ZERO, Vec3::splat(10.0));
        assert!(aabb
            .ray_intersection(&Ray::new(Vec3::ZERO, Vec3::ZERO))
            .is_none());
        assert!(aabb
            .ray_intersection(&Ray::new(Vec3::ZERO, Vec3::new(f32::NAN, 0.0, 1.0)))
            .is_none());
    }
}
