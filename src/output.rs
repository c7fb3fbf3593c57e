//! PNG export for rendered images.
//!
//! The renderer produces ready-to-write RGBA8 data, so saving is a direct
//! encode with no tone mapping step.

use std::time::Instant;

use image::{ImageError, RgbaImage};
use log::info;

/// Save an RGBA image as a PNG file, logging the write time.
pub fn save_image_as_png(image: &RgbaImage, path: &str) -> Result<(), ImageError> {
    let start = Instant::now();
    image.save(path)?;
    info!(
        "Saved {} ({}x{}) in {:.2?}",
        path,
        image.width(),
        image.height(),
        start.elapsed()
    );
    Ok(())
}
