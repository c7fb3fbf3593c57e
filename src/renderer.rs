//! Scanline renderer: fixed camera at the origin, four sub-pixel samples per
//! pixel, progressive flushing of completed scanlines.
//!
//! The renderer writes into an external row-major RGBA8 buffer and never
//! reads it back. Sequential rendering periodically hands completed rows to a
//! caller-supplied callback so partial progress can be displayed; the
//! parallel mode splits the buffer into disjoint rows and produces
//! bit-identical output, since shading is deterministic.

use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use glam::Vec3A;
use image::RgbaImage;
use log::{debug, info};
use rayon::prelude::*;

use crate::ray::Ray;
use crate::scene::Scene;
use crate::shader;
use crate::vector::{Color, FORWARD};

/// Bytes per pixel in the RGBA output buffer.
const BYTES_PER_PIXEL: usize = 4;
/// Sub-pixel sample offsets for the fixed 4x supersample.
const SAMPLE_OFFSETS: [(f32, f32); 4] = [(0.0, 0.0), (0.5, 0.0), (0.5, 0.5), (0.0, 0.5)];
/// Wall-clock interval between progressive scanline flushes.
const FLUSH_INTERVAL: Duration = Duration::from_millis(100);
/// Horizontal field of view in degrees.
const FOV_DEGREES: f32 = 90.0;

/// Shared cancellation flag for an in-flight render.
///
/// Overlapping render triggers are resolved by cancel-and-restart: the caller
/// cancels the previous render's token before starting a new pass. Checked
/// between scanlines, so cancellation never tears a row.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a fresh, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of the render holding this token.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// True once [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Rows flushed to the output buffer since the previous update.
#[derive(Debug)]
pub struct ScanlineUpdate<'a> {
    /// Completed row range, half-open.
    pub rows: Range<u32>,
    /// Raw RGBA bytes of exactly those rows.
    pub pixels: &'a [u8],
}

/// Outcome of a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    /// Every scanline was rendered and flushed.
    Complete,
    /// The token was cancelled; rows completed so far have been flushed.
    Cancelled,
}

/// Renderer with a fixed camera at the world origin looking along +Z.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    /// Output image width in pixels.
    pub width: u32,
    /// Output image height in pixels.
    pub height: u32,
}

impl Renderer {
    /// Create a renderer for a width x height raster.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Camera ray direction through the sub-pixel sample point (sx, sy).
    fn ray_direction(&self, sx: f32, sy: f32) -> Vec3A {
        let half_fov_tan = (FOV_DEGREES.to_radians() / 2.0).tan();
        let w = self.width as f32;
        let h = self.height as f32;
        let offset = Vec3A::new(
            (sx - w / 2.0) / w * half_fov_tan,
            ((h - sy) - h / 2.0) / w * half_fov_tan,
            0.0,
        );
        (FORWARD + offset).normalize()
    }

    /// Arithmetic mean of the four sub-pixel samples for pixel (x, y).
    fn pixel_color(&self, scene: &Scene, x: u32, y: u32) -> Color {
        let mut color = Color::ZERO;
        for (dx, dy) in SAMPLE_OFFSETS {
            let ray = Ray::new(Vec3A::ZERO, self.ray_direction(x as f32 + dx, y as f32 + dy));
            let hit = scene.nearest_hit(&ray);
            color += shader::shade(scene, hit.as_ref(), 0);
        }
        color / 4.0
    }

    /// Shade one scanline into its RGBA row slice.
    fn render_scanline(&self, scene: &Scene, y: u32, row: &mut [u8]) {
        for x in 0..self.width {
            let color = self.pixel_color(scene, x, y);
            let i = x as usize * BYTES_PER_PIXEL;
            row[i] = channel_to_byte(color.x);
            row[i + 1] = channel_to_byte(color.y);
            row[i + 2] = channel_to_byte(color.z);
            row[i + 3] = 255;
        }
    }

    /// Render sequentially into an external RGBA buffer, flushing completed
    /// scanlines through `on_update`.
    ///
    /// After each scanline, once [`FLUSH_INTERVAL`] has elapsed since the last
    /// flush, every row completed since then is handed to the callback in one
    /// update; a final update always covers the tail. Rows are flushed exactly
    /// once, in order, with none skipped. The buffer must hold exactly
    /// `width * height * 4` bytes.
    pub fn render_into(
        &self,
        scene: &Scene,
        pixels: &mut [u8],
        cancel: &CancelToken,
        mut on_update: impl FnMut(ScanlineUpdate<'_>),
    ) -> RenderStatus {
        let row_bytes = self.width as usize * BYTES_PER_PIXEL;
        assert_eq!(
            pixels.len(),
            row_bytes * self.height as usize,
            "pixel buffer size does not match {}x{} RGBA",
            self.width,
            self.height
        );

        let start = Instant::now();
        let mut flushed = 0u32;
        let mut last_flush = Instant::now();

        for y in 0..self.height {
            if cancel.is_cancelled() {
                flush_rows(&mut on_update, pixels, row_bytes, &mut flushed, y);
                debug!("Render cancelled at scanline {}", y);
                return RenderStatus::Cancelled;
            }

            let offset = y as usize * row_bytes;
            self.render_scanline(scene, y, &mut pixels[offset..offset + row_bytes]);

            if last_flush.elapsed() >= FLUSH_INTERVAL {
                flush_rows(&mut on_update, pixels, row_bytes, &mut flushed, y + 1);
                last_flush = Instant::now();
            }
        }

        flush_rows(&mut on_update, pixels, row_bytes, &mut flushed, self.height);
        info!("Image generated in {:.2?}", start.elapsed());
        RenderStatus::Complete
    }

    /// Render sequentially into a freshly allocated image.
    pub fn render(&self, scene: &Scene) -> RgbaImage {
        let mut image = RgbaImage::new(self.width, self.height);
        self.render_into(scene, &mut image, &CancelToken::new(), |_| {});
        image
    }

    /// Render scanlines in parallel across CPU cores.
    ///
    /// Each worker owns a disjoint row of the buffer, so every pixel is
    /// written exactly once and the output matches the sequential render
    /// byte for byte.
    pub fn render_parallel(&self, scene: &Scene) -> RgbaImage {
        let mut image = RgbaImage::new(self.width, self.height);
        let row_bytes = self.width as usize * BYTES_PER_PIXEL;

        info!("Generating image using {} CPU cores...", rayon::current_num_threads());
        let start = Instant::now();

        let buffer: &mut [u8] = &mut image;
        buffer
            .par_chunks_exact_mut(row_bytes)
            .enumerate()
            .for_each(|(y, row)| self.render_scanline(scene, y as u32, row));

        info!("Image generated in {:.2?}", start.elapsed());
        image
    }
}

/// Hand rows `[*flushed, upto)` to the callback and advance the cursor.
fn flush_rows(
    on_update: &mut impl FnMut(ScanlineUpdate<'_>),
    pixels: &[u8],
    row_bytes: usize,
    flushed: &mut u32,
    upto: u32,
) {
    if *flushed >= upto {
        return;
    }
    let bytes = *flushed as usize * row_bytes..upto as usize * row_bytes;
    debug!("Flushing scanlines {}..{}", *flushed, upto);
    on_update(ScanlineUpdate { rows: *flushed..upto, pixels: &pixels[bytes] });
    *flushed = upto;
}

/// Clamp a color channel to the 0-255 byte range.
///
/// Non-finite values from degenerate geometry survive `clamp` as NaN and
/// saturate to 0 in the cast, blackening the affected channel.
fn channel_to_byte(value: f32) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::demo_scene;
    use approx::assert_abs_diff_eq;

    #[test]
    fn center_sample_looks_straight_ahead() {
        let renderer = Renderer::new(1024, 720);
        let direction = renderer.ray_direction(512.0, 360.0);
        assert_abs_diff_eq!(direction.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(direction.y, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(direction.z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn every_pixel_is_written_with_opaque_alpha() {
        let renderer = Renderer::new(8, 6);
        let image = renderer.render(&demo_scene());
        for pixel in image.pixels() {
            assert_eq!(pixel[3], 255);
        }
    }

    #[test]
    fn scanline_updates_partition_the_image() {
        let renderer = Renderer::new(8, 6);
        let scene = demo_scene();
        let mut pixels = vec![0u8; 8 * 6 * 4];

        let mut next_row = 0u32;
        let mut total_bytes = 0usize;
        let status = renderer.render_into(&scene, &mut pixels, &CancelToken::new(), |update| {
            assert_eq!(update.rows.start, next_row);
            assert!(update.rows.end > update.rows.start);
            total_bytes += update.pixels.len();
            next_row = update.rows.end;
        });

        assert_eq!(status, RenderStatus::Complete);
        assert_eq!(next_row, 6);
        assert_eq!(total_bytes, pixels.len());
    }

    #[test]
    fn cancelled_render_writes_nothing_more() {
        let renderer = Renderer::new(8, 6);
        let scene = demo_scene();
        let mut pixels = vec![0u8; 8 * 6 * 4];

        let cancel = CancelToken::new();
        cancel.cancel();
        let mut updates = 0;
        let status = renderer.render_into(&scene, &mut pixels, &cancel, |_| updates += 1);

        assert_eq!(status, RenderStatus::Cancelled);
        assert_eq!(updates, 0);
        assert!(pixels.iter().all(|&b| b == 0));
    }

    #[test]
    fn parallel_matches_sequential() {
        let renderer = Renderer::new(16, 12);
        let scene = demo_scene();
        let sequential = renderer.render(&scene);
        let parallel = renderer.render_parallel(&scene);
        assert_eq!(sequential.as_raw(), parallel.as_raw());
    }

    #[test]
    fn overflowing_channels_clamp_at_the_write() {
        assert_eq!(channel_to_byte(-3.0), 0);
        assert_eq!(channel_to_byte(0.0), 0);
        assert_eq!(channel_to_byte(127.4), 127);
        assert_eq!(channel_to_byte(400.0), 255);
        assert_eq!(channel_to_byte(f32::NAN), 0);
        assert_eq!(channel_to_byte(f32::INFINITY), 255);
    }
}
