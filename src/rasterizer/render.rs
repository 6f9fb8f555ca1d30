//! Triangle rasterization
//!
//! Each triangle is traversed through its clamped screen-space bounding box.
//! Per candidate pixel: barycentric inside-test, depth interpolation and
//! z-buffer test, texture-coordinate interpolation, nearest-texel sample,
//! and a blend toward the light color by the face's light intensity.

use super::framebuffer::{Framebuffer, ZBuffer};
use super::math::{Vec2, Vec3};
use super::transform::ScreenTransform;
use super::types::{Color, SampleMode, Texture};
use crate::model::{Mesh, MeshError};
use crate::scene::RenderConfig;

/// Screen-space bounding box of a triangle, floored per coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl BoundingBox {
    pub fn of_triangle(pts: &[Vec3; 3]) -> Self {
        let mut bbox = BoundingBox {
            min_x: i32::MAX,
            min_y: i32::MAX,
            max_x: i32::MIN,
            max_y: i32::MIN,
        };
        for p in pts {
            let x = p.x.floor() as i32;
            let y = p.y.floor() as i32;
            bbox.min_x = bbox.min_x.min(x);
            bbox.min_y = bbox.min_y.min(y);
            bbox.max_x = bbox.max_x.max(x);
            bbox.max_y = bbox.max_y.max(y);
        }
        bbox
    }

    /// Clamp to [0,width) x [0,height). None if nothing remains on screen.
    pub fn clamped(self, width: usize, height: usize) -> Option<BoundingBox> {
        let clamped = BoundingBox {
            min_x: self.min_x.max(0),
            min_y: self.min_y.max(0),
            max_x: self.max_x.min(width as i32 - 1),
            max_y: self.max_y.min(height as i32 - 1),
        };
        if clamped.min_x > clamped.max_x || clamped.min_y > clamped.max_y {
            None
        } else {
            Some(clamped)
        }
    }
}

/// Barycentric coordinates of pixel (px, py) relative to a screen-space
/// triangle, via the cross-product method. Returns None when the
/// homogeneous z magnitude is below 1, meaning the projected triangle is
/// degenerate (zero or near-zero area) and owns no pixels.
pub fn barycentric(pts: &[Vec3; 3], px: f32, py: f32) -> Option<Vec3> {
    let v0 = Vec3::new(pts[2].x - pts[0].x, pts[1].x - pts[0].x, pts[0].x - px);
    let v1 = Vec3::new(pts[2].y - pts[0].y, pts[1].y - pts[0].y, pts[0].y - py);
    let c = v0.cross(v1);
    if c.z.abs() < 1.0 {
        return None;
    }
    Some(Vec3::new(1.0 - (c.x + c.y) / c.z, c.y / c.z, c.x / c.z))
}

/// Rasterize one triangle into the framebuffer.
///
/// `intensity` is the precomputed dot product of the normalized face normal
/// and the light direction; callers cull faces with non-positive intensity
/// before getting here. `light_color` is the light color already scaled by
/// the configured intensity factor.
pub fn rasterize_triangle(
    fb: &mut Framebuffer,
    zbuf: &mut ZBuffer,
    pts: &[Vec3; 3],
    uvs: &[Vec2; 3],
    texture: &Texture,
    intensity: f32,
    light_color: Color,
) {
    let bbox = match BoundingBox::of_triangle(pts).clamped(fb.width, fb.height) {
        Some(bbox) => bbox,
        None => return,
    };

    for py in bbox.min_y..=bbox.max_y {
        for px in bbox.min_x..=bbox.max_x {
            let bc = match barycentric(pts, px as f32, py as f32) {
                Some(bc) => bc,
                None => return, // degenerate triangle owns no pixels
            };
            if bc.x < 0.0 || bc.y < 0.0 || bc.z < 0.0 {
                continue;
            }

            let z = bc.x * pts[0].z + bc.y * pts[1].z + bc.z * pts[2].z;
            // z-buffer written before the color write; strictly greater wins
            if !zbuf.test_and_write(px as usize, py as usize, z) {
                continue;
            }

            let u = bc.x * uvs[0].x + bc.y * uvs[1].x + bc.z * uvs[2].x;
            let v = bc.x * uvs[0].y + bc.y * uvs[1].y + bc.z * uvs[2].y;
            let texel = texture.sample(u, v, SampleMode::Nearest);
            let color = Color::lerp(intensity, texel, light_color);
            fb.set_pixel(px as f32, py as f32, color);
        }
    }
}

/// Render every face of a mesh once: project vertices, compute the face
/// normal and light intensity, cull away-facing triangles, and rasterize
/// the rest. Index validation runs first so a malformed mesh aborts the
/// pass before any pixel is written.
pub fn render_mesh(
    fb: &mut Framebuffer,
    zbuf: &mut ZBuffer,
    mesh: &Mesh,
    texture: &Texture,
    transform: &ScreenTransform,
    config: &RenderConfig,
) -> Result<(), MeshError> {
    mesh.validate()?;
    let light_color = config.light_color.scale(config.light_intensity);

    for face in &mesh.faces {
        let mut world = [Vec3::ZERO; 3];
        let mut screen = [Vec3::ZERO; 3];
        let mut uvs = [Vec2::default(); 3];
        for j in 0..3 {
            world[j] = mesh.vertices[face.v[j]];
            screen[j] = transform.world_to_screen(world[j]);
            uvs[j] = mesh.texcoords[face.vt[j]];
        }

        let normal = (world[2] - world[0]).cross(world[1] - world[0]).normalize();
        let intensity = normal.dot(config.light_dir);
        if intensity > 0.0 {
            rasterize_triangle(fb, zbuf, &screen, &uvs, texture, intensity, light_color);
        }
    }
    Ok(())
}
