//! Surface material: base color plus mirror reflectivity.
//!
//! Materials are validated at scene-build time; out-of-range reflectivity is
//! rejected up front so the shading code never has to guard against it.

use std::error::Error;
use std::fmt;

use crate::vector::Color;

/// Material properties determining how a surface is shaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Base surface color, 0-255 per channel.
    pub color: Color,
    /// Mirror blend factor in [0, 1]: 0 is fully matte, 1 is a perfect mirror.
    pub reflectivity: f32,
}

/// Construction-time validation error for material parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaterialError {
    /// Reflectivity outside the [0, 1] range (or not a number).
    ReflectivityOutOfRange(f32),
}

impl fmt::Display for MaterialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialError::ReflectivityOutOfRange(value) => {
                write!(f, "reflectivity {} is outside the [0, 1] range", value)
            }
        }
    }
}

impl Error for MaterialError {}

impl Material {
    /// Create a new material, validating reflectivity.
    pub fn new(color: Color, reflectivity: f32) -> Result<Self, MaterialError> {
        if !(0.0..=1.0).contains(&reflectivity) {
            return Err(MaterialError::ReflectivityOutOfRange(reflectivity));
        }
        Ok(Self { color, reflectivity })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3A;

    #[test]
    fn accepts_reflectivity_bounds() {
        assert!(Material::new(Vec3A::new(255.0, 0.0, 0.0), 0.0).is_ok());
        assert!(Material::new(Vec3A::new(255.0, 0.0, 0.0), 1.0).is_ok());
        assert!(Material::new(Vec3A::new(255.0, 0.0, 0.0), 0.4).is_ok());
    }

    #[test]
    fn rejects_out_of_range_reflectivity() {
        assert_eq!(
            Material::new(Vec3A::ZERO, 1.5),
            Err(MaterialError::ReflectivityOutOfRange(1.5))
        );
        assert_eq!(
            Material::new(Vec3A::ZERO, -0.1),
            Err(MaterialError::ReflectivityOutOfRange(-0.1))
        );
    }

    #[test]
    fn rejects_nan_reflectivity() {
        assert!(Material::new(Vec3A::ZERO, f32::NAN).is_err());
    }
}
