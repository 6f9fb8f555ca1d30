//! Geometry transform: model space to screen space
//!
//! A vertex is embedded as a homogeneous column, multiplied by a projection
//! matrix and a viewport matrix, then divided back down to 3D. Both matrices
//! are fixed for the whole render pass. No frustum clipping happens here;
//! geometry straddling the camera plane produces non-finite coordinates.

use super::math::{Mat4, Vec3};

/// Projection matrix: identity plus a single perspective term, the inverse
/// camera distance, at row 3 column 2. `None` means no perspective
/// (orthographic).
pub fn projection(camera_distance: Option<f32>) -> Mat4 {
    let mut m = Mat4::identity();
    if let Some(d) = camera_distance {
        m.0[14] = -1.0 / d;
    }
    m
}

/// Viewport matrix mapping the canonical [-1,1]^3 cube into the pixel
/// rectangle (x, y, w, h) and depth range [0, depth_range].
pub fn viewport(x: f32, y: f32, w: f32, h: f32, depth_range: f32) -> Mat4 {
    let mut m = Mat4::identity();
    m.0[0] = w / 2.0;
    m.0[3] = x + w / 2.0;
    m.0[5] = h / 2.0;
    m.0[7] = y + h / 2.0;
    m.0[10] = depth_range / 2.0;
    m.0[11] = depth_range / 2.0;
    m
}

/// Fixed projection + viewport pair for one render pass.
pub struct ScreenTransform {
    projection: Mat4,
    viewport: Mat4,
}

impl ScreenTransform {
    pub fn new(projection: Mat4, viewport: Mat4) -> Self {
        Self { projection, viewport }
    }

    /// Project a model-space vertex to (pixel x, pixel y, depth).
    pub fn world_to_screen(&self, v: Vec3) -> Vec3 {
        let h = self.projection.mul_point(v.to_homogeneous());
        let h = self.viewport.mul_point(h);
        Vec3::from_homogeneous(h)
    }
}
