//! Vector math helpers built on glam.
//!
//! `Vec3A` serves both as a point/direction type and as an RGB color with
//! channels in the 0-255 range. Normalizing a zero-length vector follows
//! glam's behavior and produces non-finite components; those values propagate
//! through intersection and shading math and are clamped to zero when the
//! final color is written to the pixel buffer.

use glam::Vec3A;

/// RGB color type using Vec3A for SIMD optimization. Channels are 0-255.
pub type Color = Vec3A;

/// World-space up direction.
pub const UP: Vec3A = Vec3A::Y;

/// Camera forward direction.
pub const FORWARD: Vec3A = Vec3A::Z;

/// Reflect a vector off a surface using the law of reflection.
pub fn reflect(v: Vec3A, n: Vec3A) -> Vec3A {
    v - 2.0 * v.dot(n) * n
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn normalize_produces_unit_length() {
        let v = Vec3A::new(3.0, -4.0, 12.0);
        assert_abs_diff_eq!(v.normalize().length(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn normalize_zero_vector_is_non_finite() {
        // Degenerate case: zero-length input yields non-finite components
        // rather than an error.
        let v = Vec3A::ZERO.normalize();
        assert!(!v.is_finite());
    }

    #[test]
    fn reflect_mirrors_normal_component() {
        let d = Vec3A::new(0.6, -0.8, 0.0);
        let n = UP;
        let r = reflect(d, n);
        assert_abs_diff_eq!(r.dot(n), -d.dot(n), epsilon = 1e-6);
        assert_abs_diff_eq!(r.length(), d.length(), epsilon = 1e-6);
    }

    #[test]
    fn reflect_head_on_reverses_direction() {
        let r = reflect(FORWARD, -FORWARD);
        assert_abs_diff_eq!(r.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(r.y, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(r.z, -1.0, epsilon = 1e-6);
    }
}
