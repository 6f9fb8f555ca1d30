//! Software rasterizer
//!
//! Single-light textured triangle rendering into an RGBA framebuffer:
//! - Perspective projection + viewport transform
//! - Barycentric triangle traversal
//! - Z-buffer visibility ("strictly greater wins")
//! - Nearest-texel sampling, Lambertian light blend

mod framebuffer;
mod math;
mod render;
mod transform;
mod types;

pub use framebuffer::*;
pub use math::*;
pub use render::*;
pub use transform::*;
pub use types::*;

/// Default output dimensions
pub const WIDTH: usize = 800;
pub const HEIGHT: usize = 800;
