//! Framebuffer and z-buffer storage
//!
//! The framebuffer is a row-major RGBA8 grid, written pixel-by-pixel during
//! the draw pass and handed off whole to the presentation layer. The z-buffer
//! is a matching grid of depth values under a "strictly greater wins" test.

use super::types::Color;

/// Framebuffer for software rendering
pub struct Framebuffer {
    pub pixels: Vec<u8>, // RGBA, 4 bytes per pixel
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            width,
            height,
        }
    }

    /// Base index of a pixel's channel block. Float coordinates are rounded
    /// to the nearest pixel.
    pub fn pixel_offset(&self, x: f32, y: f32) -> usize {
        4 * (y.round() as usize * self.width + x.round() as usize)
    }

    /// Write a pixel at (possibly fractional) coordinates, fully opaque.
    pub fn set_pixel(&mut self, x: f32, y: f32, color: Color) {
        let idx = self.pixel_offset(x, y);
        self.pixels[idx] = color.r;
        self.pixels[idx + 1] = color.g;
        self.pixels[idx + 2] = color.b;
        self.pixels[idx + 3] = 255;
    }

    /// Read back a pixel at (possibly fractional) coordinates.
    pub fn get_pixel(&self, x: f32, y: f32) -> Color {
        let idx = self.pixel_offset(x, y);
        Color::with_alpha(
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        )
    }

    /// Overwrite every pixel with one color.
    pub fn fill(&mut self, color: Color) {
        for i in 0..(self.width * self.height) {
            let bytes = color.to_bytes();
            self.pixels[i * 4] = bytes[0];
            self.pixels[i * 4 + 1] = bytes[1];
            self.pixels[i * 4 + 2] = bytes[2];
            self.pixels[i * 4 + 3] = 255;
        }
    }

    /// Overwrite every pixel, computing the color per pixel in row-major
    /// scan order.
    pub fn fill_with<F: FnMut(usize, usize) -> Color>(&mut self, mut f: F) {
        for y in 0..self.height {
            for x in 0..self.width {
                self.set_pixel(x as f32, y as f32, f(x, y));
            }
        }
    }

    /// Per-channel gamma remap, `(c/255)^gamma * 255`, alpha untouched.
    /// Applied once after all drawing.
    pub fn gamma_correct(&mut self, gamma: f32) {
        for i in (0..self.pixels.len()).step_by(4) {
            for c in 0..3 {
                let v = self.pixels[i + c] as f32 / 255.0;
                self.pixels[i + c] = (v.powf(gamma) * 255.0).round() as u8;
            }
        }
    }

    /// Swap rows top-to-bottom (color channels only). Applying it twice
    /// restores the original image.
    pub fn flip_vertical(&mut self) {
        for y in 0..self.height / 2 {
            for x in 0..self.width {
                let i1 = self.pixel_offset(x as f32, y as f32);
                let i2 = self.pixel_offset(x as f32, (self.height - 1 - y) as f32);
                self.pixels.swap(i1, i2);
                self.pixels.swap(i1 + 1, i2 + 1);
                self.pixels.swap(i1 + 2, i2 + 2);
            }
        }
    }
}

/// Per-pixel depth grid. Cells start at negative infinity ("nothing drawn
/// yet"); a fragment wins only with a strictly greater depth, so equal-depth
/// fragments keep first-drawn-wins ordering.
pub struct ZBuffer {
    pub depths: Vec<f32>,
    pub width: usize,
    pub height: usize,
}

impl ZBuffer {
    /// Allocate a depth grid matching the framebuffer's pixel count.
    pub fn for_framebuffer(fb: &Framebuffer) -> Self {
        Self {
            depths: vec![f32::NEG_INFINITY; fb.width * fb.height],
            width: fb.width,
            height: fb.height,
        }
    }

    pub fn clear(&mut self) {
        self.depths.fill(f32::NEG_INFINITY);
    }

    pub fn at(&self, x: usize, y: usize) -> f32 {
        self.depths[y * self.width + x]
    }

    /// Depth test: store and return true only if `depth` is strictly greater
    /// than the stored value.
    pub fn test_and_write(&mut self, x: usize, y: usize, depth: f32) -> bool {
        let idx = y * self.width + x;
        if depth > self.depths[idx] {
            self.depths[idx] = depth;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_offset_rounds() {
        let fb = Framebuffer::new(10, 10);
        assert_eq!(fb.pixel_offset(0.4, 0.4), 0);
        assert_eq!(fb.pixel_offset(0.6, 0.0), 4);
        assert_eq!(fb.pixel_offset(0.0, 0.6), 4 * 10);
    }

    #[test]
    fn test_fill_covers_every_pixel() {
        let mut fb = Framebuffer::new(4, 3);
        fb.fill(Color::new(7, 8, 9));
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(fb.get_pixel(x as f32, y as f32), Color::new(7, 8, 9));
            }
        }
    }

    #[test]
    fn test_fill_with_coordinates() {
        let mut fb = Framebuffer::new(3, 2);
        fb.fill_with(|x, y| Color::new(x as u8, y as u8, 0));
        assert_eq!(fb.get_pixel(2.0, 1.0), Color::new(2, 1, 0));
        assert_eq!(fb.get_pixel(0.0, 0.0), Color::new(0, 0, 0));
    }

    #[test]
    fn test_gamma_round_trip() {
        let gamma = 2.0;
        for c in [0u8, 1, 17, 128, 200, 255] {
            let mut fb = Framebuffer::new(1, 1);
            fb.fill(Color::new(c, c, c));
            fb.gamma_correct(gamma);
            let stored = fb.get_pixel(0.0, 0.0).r as f32 / 255.0;
            let recovered = stored.powf(1.0 / gamma) * 255.0;
            // u8 quantization bounds the recovery error
            assert!((recovered - c as f32).abs() < 3.0, "c={} recovered={}", c, recovered);
        }
    }

    #[test]
    fn test_flip_vertical_is_involution() {
        let mut fb = Framebuffer::new(3, 4);
        fb.fill_with(|x, y| Color::new(x as u8, y as u8, (x + y) as u8));
        let original = fb.pixels.clone();
        fb.flip_vertical();
        assert_eq!(fb.get_pixel(0.0, 0.0), Color::new(0, 3, 3));
        fb.flip_vertical();
        assert_eq!(fb.pixels, original);
    }

    #[test]
    fn test_zbuffer_starts_empty() {
        let fb = Framebuffer::new(2, 2);
        let zbuf = ZBuffer::for_framebuffer(&fb);
        assert_eq!(zbuf.depths.len(), 4);
        assert!(zbuf.depths.iter().all(|d| *d == f32::NEG_INFINITY));
    }

    #[test]
    fn test_zbuffer_strictly_greater_wins() {
        let fb = Framebuffer::new(2, 2);
        let mut zbuf = ZBuffer::for_framebuffer(&fb);
        assert!(zbuf.test_and_write(1, 1, 0.5));
        assert!(!zbuf.test_and_write(1, 1, 0.5)); // tie does not overwrite
        assert!(!zbuf.test_and_write(1, 1, 0.2));
        assert!(zbuf.test_and_write(1, 1, 0.7));
        assert_eq!(zbuf.at(1, 1), 0.7);
    }

    #[test]
    fn test_zbuffer_clear_resets() {
        let fb = Framebuffer::new(2, 2);
        let mut zbuf = ZBuffer::for_framebuffer(&fb);
        zbuf.test_and_write(0, 0, 3.0);
        zbuf.clear();
        assert!(zbuf.depths.iter().all(|d| *d == f32::NEG_INFINITY));
    }
}
