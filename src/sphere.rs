//! Sphere primitive for ray tracing.
//!
//! Implements ray-sphere intersection returning only the near root of the
//! quadratic: a ray starting inside a sphere never sees the exit hit. No ray
//! in a well-formed scene originates inside a sphere, so the far root is
//! deliberately never computed.

use glam::Vec3A;

use crate::material::Material;
use crate::ray::Ray;
use crate::surface::HitRecord;

/// Sphere primitive defined by center, radius, and material.
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    /// Center point of the sphere in world coordinates.
    pub center: Vec3A,
    /// Radius of the sphere (positive).
    ///
    /// A zero radius is degenerate geometry: the hit normal normalizes a
    /// zero-length vector and comes out non-finite.
    pub radius: f32,
    /// Material properties determining light interaction.
    pub material: Material,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3A, radius: f32, material: Material) -> Self {
        Self { center, radius, material }
    }

    /// Nearest forward intersection, or `None`.
    pub(crate) fn cast(&self, ray: &Ray) -> Option<HitRecord> {
        let oc = ray.origin - self.center;

        // Half-discriminant of the quadratic, assuming a unit direction.
        let x = ray.direction.dot(oc).powi(2) - ray.origin.distance_squared(self.center)
            + self.radius * self.radius;
        if x < 0.0 {
            return None;
        }

        // Near root only; a tangent hit (x == 0) still counts.
        let t = -ray.direction.dot(oc) - x.sqrt();
        if t < 0.0 {
            return None;
        }

        let position = ray.at(t);
        let normal = (position - self.center).normalize();
        Some(HitRecord { position, normal, material: self.material, incoming: *ray })
    }
}
