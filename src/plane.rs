//! Infinite plane primitive for ray tracing.

use glam::Vec3A;

use crate::material::Material;
use crate::ray::Ray;
use crate::surface::HitRecord;

/// Rays closer to parallel than this are treated as missing the plane.
const PARALLEL_EPSILON: f32 = 0.001;

/// Infinite plane defined by a point on the plane and a unit normal.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    /// Any point on the plane.
    pub point: Vec3A,
    /// Plane normal (unit vector), used as authored for shading.
    pub normal: Vec3A,
    /// Material properties determining light interaction.
    pub material: Material,
}

impl Plane {
    /// Create a new plane.
    pub fn new(point: Vec3A, normal: Vec3A, material: Material) -> Self {
        Self { point, normal, material }
    }

    /// Nearest forward intersection, or `None`.
    pub(crate) fn cast(&self, ray: &Ray) -> Option<HitRecord> {
        let denom = self.normal.dot(ray.direction);
        let t = self.normal.dot(self.point - ray.origin) / denom;
        if t < 0.0 {
            return None;
        }
        // The parallel check runs after the sign check; it also rejects the
        // non-finite t a near-zero denominator produces.
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let position = ray.at(t);
        Some(HitRecord {
            position,
            normal: self.normal,
            material: self.material,
            incoming: *ray,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::UP;
    use approx::assert_abs_diff_eq;

    fn ground_plane() -> Plane {
        let material = Material::new(Vec3A::new(127.0, 127.0, 127.0), 0.0).unwrap();
        Plane::new(Vec3A::new(0.0, -0.75, 0.0), UP, material)
    }

    #[test]
    fn straight_down_hit() {
        let plane = ground_plane();
        let ray = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, -1.0, 0.0));
        let hit = plane.cast(&ray).unwrap();
        assert_abs_diff_eq!(hit.position.y, -0.75, epsilon = 1e-6);
        assert_abs_diff_eq!(hit.normal.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn parallel_ray_misses() {
        let plane = ground_plane();
        let ray = Ray::new(Vec3A::ZERO, Vec3A::new(1.0, 0.0, 0.0));
        assert!(plane.cast(&ray).is_none());
    }

    #[test]
    fn plane_behind_origin_misses() {
        let plane = ground_plane();
        let ray = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 1.0, 0.0));
        assert!(plane.cast(&ray).is_none());
    }

    #[test]
    fn grazing_ray_below_threshold_is_rejected() {
        // Almost parallel, pointed slightly toward the plane: t is positive
        // and enormous, but the denominator is under the threshold.
        let plane = ground_plane();
        let direction = Vec3A::new(1.0, -1e-4, 0.0).normalize();
        let ray = Ray::new(Vec3A::ZERO, direction);
        assert!(plane.cast(&ray).is_none());
    }
}
