//! RGBA pixel surface the software render host draws into.
//!
//! Pixels are stored tightly packed in row-major order, four bytes per pixel.
//! Drawing entry points take signed coordinates and clip silently, so
//! projected geometry that falls partly off-screen needs no pre-clipping.

use batuta_common::display::WithDimensions;
use trueno::{Backend, Vector};

use crate::color::Rgba;
use crate::error::{Error, Result};

/// Row-major RGBA framebuffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Framebuffer {
    /// Create a new framebuffer cleared to transparent black.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if width or height is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use trueno_raster::framebuffer::Framebuffer;
    ///
    /// let fb = Framebuffer::new(800, 600).unwrap();
    /// assert_eq!(fb.width(), 800);
    /// assert_eq!(fb.height(), 600);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Self { width, height, pixels: vec![0; Self::byte_len(width, height)] })
    }

    fn byte_len(width: u32, height: u32) -> usize {
        (width as usize) * (height as usize) * 4
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of pixels.
    #[must_use]
    pub const fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Raw RGBA bytes, tightly packed.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Fill every pixel with one color.
    pub fn clear(&mut self, color: Rgba) {
        let rgba = color.to_array();
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&rgba);
        }
    }

    /// Color at `(x, y)`, `None` when out of bounds.
    #[must_use]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let idx = self.index(i64::from(x), i64::from(y))?;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.pixels[idx..idx + 4]);
        Some(Rgba::from_array(px))
    }

    /// Set the color at `(x, y)`. Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: i64, y: i64, color: Rgba) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx..idx + 4].copy_from_slice(&color.to_array());
        }
    }

    /// Fill the `w` x `h` rectangle whose top-left corner is `(x, y)`, clipped.
    pub fn fill_rect(&mut self, x: i64, y: i64, w: u32, h: u32, color: Rgba) {
        let x1 = x.clamp(0, i64::from(self.width));
        let y1 = y.clamp(0, i64::from(self.height));
        let x2 = (x + i64::from(w)).clamp(0, i64::from(self.width));
        let y2 = (y + i64::from(h)).clamp(0, i64::from(self.height));
        if x1 >= x2 || y1 >= y2 {
            return;
        }

        let rgba = color.to_array();
        let row_bytes = (self.width as usize) * 4;
        for row_y in y1..y2 {
            let start = (row_y as usize) * row_bytes + (x1 as usize) * 4;
            let end = start + ((x2 - x1) as usize) * 4;
            for chunk in self.pixels[start..end].chunks_exact_mut(4) {
                chunk.copy_from_slice(&rgba);
            }
        }
    }

    /// Number of pixels exactly equal to `color`.
    #[must_use]
    pub fn count_color(&self, color: Rgba) -> usize {
        let rgba = color.to_array();
        self.pixels.chunks_exact(4).filter(|px| *px == rgba).count()
    }

    /// Luminance (min, max, mean) over all pixels, reduced with trueno.
    #[must_use]
    pub fn luminance_stats(&self) -> (f32, f32, f32) {
        let luminances: Vec<f32> = self
            .pixels
            .chunks_exact(4)
            .map(|px| Rgba::from_array([px[0], px[1], px[2], px[3]]).luminance())
            .collect();

        let vec = Vector::from_vec(luminances);
        let min = vec.min().unwrap_or(0.0);
        let max = vec.max().unwrap_or(255.0);
        let mean = vec.mean().unwrap_or(127.5);
        (min, max, mean)
    }

    /// SIMD backend trueno selected for this machine.
    #[must_use]
    pub fn backend() -> Backend {
        Backend::select_best()
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        Some(((y as usize) * (self.width as usize) + (x as usize)) * 4)
    }
}

/// Resizing reallocates and clears; zero dimensions are raised to one.
impl WithDimensions for Framebuffer {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.pixels = vec![0; Self::byte_len(self.width, self.height)];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_framebuffer() {
        let fb = Framebuffer::new(100, 50).unwrap();
        assert_eq!(fb.pixel_count(), 5000);
        assert_eq!(fb.pixels().len(), 20_000);
        assert_eq!(fb.get_pixel(0, 0), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(matches!(
            Framebuffer::new(0, 100),
            Err(Error::InvalidDimensions { width: 0, height: 100 })
        ));
        assert!(Framebuffer::new(100, 0).is_err());
    }

    #[test]
    fn test_clear_and_count() {
        let mut fb = Framebuffer::new(13, 7).unwrap();
        fb.clear(Rgba::VIOLET);
        assert_eq!(fb.count_color(Rgba::VIOLET), 91);
        assert_eq!(fb.get_pixel(12, 6), Some(Rgba::VIOLET));
    }

    #[test]
    fn test_set_pixel_clips_negative() {
        let mut fb = Framebuffer::new(4, 4).unwrap();
        fb.set_pixel(-1, 2, Rgba::RED);
        fb.set_pixel(2, 4, Rgba::RED);
        assert_eq!(fb.count_color(Rgba::RED), 0);
        fb.set_pixel(3, 3, Rgba::RED);
        assert_eq!(fb.get_pixel(3, 3), Some(Rgba::RED));
    }

    #[test]
    fn test_fill_rect_clipped() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fb.clear(Rgba::WHITE);
        fb.fill_rect(-2, -2, 4, 4, Rgba::BLUE);
        assert_eq!(fb.count_color(Rgba::BLUE), 4);
        fb.fill_rect(8, 8, 5, 5, Rgba::RED);
        assert_eq!(fb.count_color(Rgba::RED), 4);
        fb.fill_rect(20, 20, 3, 3, Rgba::GREEN);
        assert_eq!(fb.count_color(Rgba::GREEN), 0);
    }

    #[test]
    fn test_luminance_stats() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fb.clear(Rgba::BLACK);
        fb.set_pixel(0, 0, Rgba::WHITE);
        let (min, max, mean) = fb.luminance_stats();
        assert!(min.abs() < 0.01);
        assert!((max - 255.0).abs() < 0.01);
        assert!((mean - 2.55).abs() < 0.01);
    }

    #[test]
    fn test_set_dimensions_reallocates() {
        let mut fb = Framebuffer::new(4, 4).unwrap();
        fb.clear(Rgba::RED);
        fb.set_dimensions(6, 0);
        assert_eq!((fb.width(), fb.height()), (6, 1));
        assert_eq!(fb.count_color(Rgba::RED), 0);
        assert_eq!(fb.pixels().len(), 24);
    }

    #[test]
    fn test_backend_selection() {
        let backend = Framebuffer::backend();
        println!("Selected backend: {backend:?}");
    }
}
