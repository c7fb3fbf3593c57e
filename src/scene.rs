//! Scene: an ordered collection of surfaces plus a single point light.

use glam::Vec3A;

use crate::material::Material;
use crate::plane::Plane;
use crate::ray::Ray;
use crate::sphere::Sphere;
use crate::surface::{HitRecord, Surface};
use crate::vector::UP;

/// Single point light illuminating the scene.
#[derive(Debug, Clone, Copy)]
pub struct Light {
    /// Light position in world coordinates.
    pub position: Vec3A,
}

/// Immutable scene: surfaces are built once and never change during a render.
pub struct Scene {
    /// Ordered list of surfaces; iteration order breaks distance ties.
    pub surfaces: Vec<Surface>,
    /// The scene's point light.
    pub light: Light,
}

impl Scene {
    /// Create a scene from a surface list and a light.
    pub fn new(surfaces: Vec<Surface>, light: Light) -> Self {
        Self { surfaces, light }
    }

    /// Nearest hit across all surfaces, or `None` if nothing is struck.
    ///
    /// Keeps the hit whose position is strictly closest to the ray origin;
    /// at equal distance the earlier surface in the list wins.
    pub fn nearest_hit(&self, ray: &Ray) -> Option<HitRecord> {
        let mut nearest: Option<HitRecord> = None;
        for surface in &self.surfaces {
            if let Some(hit) = surface.cast(ray) {
                let closer = match &nearest {
                    None => true,
                    Some(best) => {
                        ray.origin.distance(hit.position) < ray.origin.distance(best.position)
                    }
                };
                if closer {
                    nearest = Some(hit);
                }
            }
        }
        nearest
    }
}

/// Build the demo scene: seven spheres over a grey ground plane, lit from
/// above right.
pub fn demo_scene() -> Scene {
    let material = |r: f32, g: f32, b: f32, reflectivity: f32| {
        Material::new(Vec3A::new(r, g, b), reflectivity).expect("demo materials are in range")
    };

    let surfaces = vec![
        Surface::Sphere(Sphere::new(
            Vec3A::new(0.0, 0.0, 5.0),
            1.0,
            material(255.0, 255.0, 255.0, 0.9),
        )),
        Surface::Sphere(Sphere::new(
            Vec3A::new(3.0, 0.0, 4.0),
            1.0,
            material(0.0, 0.0, 255.0, 0.2),
        )),
        Surface::Sphere(Sphere::new(
            Vec3A::new(-3.0, 0.0, 4.0),
            1.0,
            material(255.0, 0.0, 0.0, 0.2),
        )),
        Surface::Sphere(Sphere::new(
            Vec3A::new(0.7, -0.4, 5.0),
            0.75,
            material(255.0, 255.0, 0.0, 0.4),
        )),
        Surface::Sphere(Sphere::new(
            Vec3A::new(-0.7, -0.4, 5.0),
            0.75,
            material(0.0, 255.0, 255.0, 0.0),
        )),
        Surface::Sphere(Sphere::new(
            Vec3A::new(0.7, -0.5, 3.0),
            0.25,
            material(0.0, 127.0, 255.0, 0.07),
        )),
        Surface::Sphere(Sphere::new(
            Vec3A::new(-0.7, -0.5, 3.0),
            0.25,
            material(127.0, 0.0, 255.0, 0.3),
        )),
        Surface::Plane(Plane::new(
            Vec3A::new(0.0, -0.75, 0.0),
            UP,
            material(127.0, 127.0, 127.0, 0.0),
        )),
    ];

    Scene::new(surfaces, Light { position: Vec3A::new(3.0, 5.0, 0.0) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::FORWARD;
    use approx::assert_abs_diff_eq;

    fn sphere_at(z: f32) -> Surface {
        let material = Material::new(Vec3A::new(255.0, 255.0, 255.0), 0.0).unwrap();
        Surface::Sphere(Sphere::new(Vec3A::new(0.0, 0.0, z), 1.0, material))
    }

    #[test]
    fn nearest_hit_picks_closer_surface() {
        let light = Light { position: Vec3A::new(3.0, 5.0, 0.0) };
        let ray = Ray::new(Vec3A::ZERO, FORWARD);

        for surfaces in [
            vec![sphere_at(5.0), sphere_at(8.0)],
            vec![sphere_at(8.0), sphere_at(5.0)],
        ] {
            let scene = Scene::new(surfaces, light);
            let hit = scene.nearest_hit(&ray).unwrap();
            assert_abs_diff_eq!(hit.position.z, 4.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn empty_scene_has_no_hit() {
        let scene = Scene::new(Vec::new(), Light { position: Vec3A::ZERO });
        assert!(scene.nearest_hit(&Ray::new(Vec3A::ZERO, FORWARD)).is_none());
    }

    #[test]
    fn demo_scene_front_sphere_is_nearest_from_origin() {
        let scene = demo_scene();
        let hit = scene.nearest_hit(&Ray::new(Vec3A::ZERO, FORWARD)).unwrap();
        assert_abs_diff_eq!(hit.position.z, 4.0, epsilon = 1e-5);
    }
}
