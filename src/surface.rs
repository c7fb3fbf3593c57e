//! Ray-surface intersection dispatch.
//!
//! `Surface` is a tagged enum over the geometric primitives, dispatching
//! `cast` with a plain match instead of a trait object. `HitRecord` carries
//! everything the shader needs about an intersection and is consumed
//! immediately; it is never stored.

use glam::Vec3A;

use crate::material::Material;
use crate::plane::Plane;
use crate::ray::Ray;
use crate::sphere::Sphere;

/// Ray-surface intersection information.
///
/// Contains the intersection point, the surface normal, the material, and the
/// incoming ray, everything needed for shading.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord {
    /// Point where the ray strikes the surface.
    pub position: Vec3A,
    /// Surface normal at the intersection point (unit vector).
    ///
    /// Sphere normals point outward from the center; plane normals are used
    /// as authored and are not flipped to face the ray.
    pub normal: Vec3A,
    /// Material of the surface at the hit point.
    pub material: Material,
    /// The ray that produced this hit.
    pub incoming: Ray,
}

/// Geometric primitive variants.
///
/// Enum dispatch keeps the scene a flat list of values with no virtual calls.
#[derive(Debug, Clone, Copy)]
pub enum Surface {
    /// Sphere defined by center and radius.
    Sphere(Sphere),
    /// Infinite plane defined by a point and a normal.
    Plane(Plane),
}

impl Surface {
    /// Nearest forward intersection of `ray` with this surface.
    ///
    /// Returns the hit closest to the ray origin along the positive ray
    /// parameter, or `None` if the surface is missed or lies behind the
    /// origin. `ray.direction` must be unit length.
    pub fn cast(&self, ray: &Ray) -> Option<HitRecord> {
        match self {
            Surface::Sphere(sphere) => sphere.cast(ray),
            Surface::Plane(plane) => plane.cast(ray),
        }
    }
}
