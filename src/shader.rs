//! Recursive Whitted shading: diffuse and specular terms with a shadow test,
//! blended with a mirror reflection traced up to a fixed depth.
//!
//! Colors stay in the 0-255-per-channel domain and are deliberately not
//! clamped here; specular and reflection sums may exceed 255 so highlights can
//! blow out. Clamping happens once, at the pixel write.

use glam::Vec3A;

use crate::ray::Ray;
use crate::scene::Scene;
use crate::surface::HitRecord;
use crate::vector::{reflect, Color};

/// Maximum reflection recursion depth.
pub const MAX_DEPTH: u32 = 3;
/// Ambient light factor applied to every lit or shadowed surface.
pub const AMBIENT: f32 = 0.1;
/// Offset along the normal for shadow-ray origins, avoids self-intersection.
const SHADOW_BIAS: f32 = 1e-4;
/// Phong specular exponent; high value gives a tight highlight.
const SPECULAR_EXPONENT: i32 = 256;
/// Specular highlights are always white.
const WHITE: Color = Vec3A::new(255.0, 255.0, 255.0);

/// Compute the visible color for a hit, recursing into reflections.
///
/// `None` shades as background black. `depth` counts reflection bounces so
/// far; recursion stops once it reaches [`MAX_DEPTH`], or naturally when a
/// reflected ray hits nothing.
pub fn shade(scene: &Scene, hit: Option<&HitRecord>, depth: u32) -> Color {
    let Some(hit) = hit else {
        return Color::ZERO;
    };

    let to_light = scene.light.position - hit.position;
    let light_dir = to_light.normalize();

    // Shadow ray starts slightly off the surface. The point is lit if nothing
    // is in the way, or if the blocker is beyond the light itself.
    let shadow_ray = Ray::new(hit.position + hit.normal * SHADOW_BIAS, light_dir);
    let lit = match scene.nearest_hit(&shadow_ray) {
        None => true,
        Some(blocker) => hit.position.distance(blocker.position) > to_light.length(),
    };

    let mut diffuse = 0.0;
    let mut specular_light = Color::ZERO;
    if lit {
        diffuse = hit.normal.dot(light_dir).max(0.0);
        let specular = hit
            .incoming
            .direction
            .dot(reflect(light_dir, hit.normal))
            .max(0.0)
            .powi(SPECULAR_EXPONENT);
        specular_light = WHITE * specular;
    }

    let reflectivity = hit.material.reflectivity;
    let mut reflection_color = Color::ZERO;
    if reflectivity > 0.0 && depth < MAX_DEPTH {
        // Reflection rays need no bias: the near-root intersection rejects
        // the t < 0 self-hit on the surface being left.
        let reflected = Ray::new(hit.position, reflect(hit.incoming.direction, hit.normal));
        let reflection_hit = scene.nearest_hit(&reflected);
        reflection_color = shade(scene, reflection_hit.as_ref(), depth + 1);
    }

    let base = hit.material.color * (AMBIENT + diffuse * (1.0 - AMBIENT));
    base * (1.0 - reflectivity) + reflection_color * reflectivity + specular_light
}
