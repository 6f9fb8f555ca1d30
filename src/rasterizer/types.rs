//! Core types for the rasterizer

use super::math::Vec3;
use serde::{Deserialize, Serialize};

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Scale the color channels by a factor, leaving alpha alone.
    pub fn scale(self, s: f32) -> Self {
        Self {
            r: (self.r as f32 * s).clamp(0.0, 255.0).round() as u8,
            g: (self.g as f32 * s).clamp(0.0, 255.0).round() as u8,
            b: (self.b as f32 * s).clamp(0.0, 255.0).round() as u8,
            a: self.a,
        }
    }

    /// Blend two colors with the weight on `from`: t=1 yields `from`,
    /// t=0 yields `to`. Same convention as [`super::math::lerp`].
    pub fn lerp(t: f32, from: Color, to: Color) -> Color {
        let v = super::math::lerp(
            t,
            Vec3::new(from.r as f32, from.g as f32, from.b as f32),
            Vec3::new(to.r as f32, to.g as f32, to.b as f32),
        );
        Color {
            r: v.x.clamp(0.0, 255.0).round() as u8,
            g: v.y.clamp(0.0, 255.0).round() as u8,
            b: v.z.clamp(0.0, 255.0).round() as u8,
            a: 255,
        }
    }

    /// Convert to [u8; 4] for framebuffer
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Texel addressing strategy. Only nearest-neighbor for now; kept as an
/// explicit mode so a filtered sampler can slot in without touching the
/// rasterizer loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SampleMode {
    /// Round to the nearest texel, clamped to the texture edge.
    #[default]
    Nearest,
}

/// Decoded texture image (array of colors)
#[derive(Debug, Clone)]
pub struct Texture {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Color>,
}

impl Texture {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::WHITE; width * height],
        }
    }

    /// Load a texture from an image file. Rows are flipped so that v=0
    /// addresses the bottom of the image, matching OBJ texture coordinates.
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_bytes(&bytes)
    }

    /// Decode a texture from raw image bytes (PNG/JPEG/BMP).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, String> {
        use image::GenericImageView;

        let img = image::load_from_memory(bytes)
            .map_err(|e| format!("Failed to decode image: {}", e))?;

        let (width, height) = img.dimensions();
        let rgba = img.to_rgba8();

        let pixels: Vec<Color> = rgba
            .pixels()
            .map(|p| Color::with_alpha(p[0], p[1], p[2], p[3]))
            .collect();

        let mut texture = Self {
            width: width as usize,
            height: height as usize,
            pixels,
        };
        texture.flip_vertical();
        Ok(texture)
    }

    /// Swap rows top-to-bottom in place.
    pub fn flip_vertical(&mut self) {
        for y in 0..self.height / 2 {
            for x in 0..self.width {
                self.pixels.swap(y * self.width + x, (self.height - 1 - y) * self.width + x);
            }
        }
    }

    /// Sample at (u * width, v * height) in [0,1] texture space.
    pub fn sample(&self, u: f32, v: f32, mode: SampleMode) -> Color {
        match mode {
            SampleMode::Nearest => {
                let tx = nearest_index(u * self.width as f32, self.width);
                let ty = nearest_index(v * self.height as f32, self.height);
                self.pixels[ty * self.width + tx]
            }
        }
    }
}

/// Round a float coordinate to the nearest index in [0, len).
fn nearest_index(coord: f32, len: usize) -> usize {
    (coord.round().max(0.0) as usize).min(len.saturating_sub(1))
}
