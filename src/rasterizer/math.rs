//! Vector and matrix math for 3D rendering

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Divide by magnitude. A zero-length input yields non-finite
    /// components; callers must pass non-degenerate vectors.
    pub fn normalize(self) -> Vec3 {
        let l = self.len();
        Vec3 {
            x: self.x / l,
            y: self.y / l,
            z: self.z / l,
        }
    }

    pub fn scale(self, s: f32) -> Vec3 {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    /// Embed as a homogeneous column [x, y, z, 1].
    pub fn to_homogeneous(self) -> [f32; 4] {
        [self.x, self.y, self.z, 1.0]
    }

    /// Perspective divide back to 3D. A zero w yields non-finite
    /// components; triangles straddling the camera plane are not clipped.
    pub fn from_homogeneous(h: [f32; 4]) -> Vec3 {
        Vec3 {
            x: h[0] / h[3],
            y: h[1] / h[3],
            z: h[2] / h[3],
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f32) -> Vec3 {
        self.scale(s)
    }
}

/// 2D Vector (for texture coordinates)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Blend two vectors with the weight on `from`: t=1 yields `from`,
/// t=0 yields `to`. Shading output depends on this direction.
pub fn lerp(t: f32, from: Vec3, to: Vec3) -> Vec3 {
    Vec3 {
        x: from.x * t + to.x * (1.0 - t),
        y: from.y * t + to.y * (1.0 - t),
        z: from.z * t + to.z * (1.0 - t),
    }
}

/// 4x4 matrix, row-major
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mat4(pub [f32; 16]);

impl Mat4 {
    pub fn identity() -> Self {
        let mut m = [0.0; 16];
        for i in 0..4 {
            m[i * 4 + i] = 1.0;
        }
        Mat4(m)
    }

    /// Multiply by a homogeneous column vector.
    pub fn mul_point(&self, v: [f32; 4]) -> [f32; 4] {
        let m = &self.0;
        let mut out = [0.0; 4];
        for (row, o) in out.iter_mut().enumerate() {
            *o = m[row * 4] * v[0]
                + m[row * 4 + 1] * v[1]
                + m[row * 4 + 2] * v[2]
                + m[row * 4 + 3] * v[3];
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_dot() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert!((a.dot(b) - 32.0).abs() < 0.001);
    }

    #[test]
    fn test_vec3_cross() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        let c = a.cross(b);
        assert!((c.z - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_normalize_unit_length() {
        let v = Vec3::new(3.0, 0.0, 4.0).normalize();
        assert!((v.len() - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_lerp_weight_direction() {
        let from = Vec3::new(10.0, 20.0, 30.0);
        let to = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(lerp(1.0, from, to), from);
        assert_eq!(lerp(0.0, from, to), to);
    }

    #[test]
    fn test_identity_mul_point() {
        let m = Mat4::identity();
        let v = [1.0, 2.0, 3.0, 1.0];
        assert_eq!(m.mul_point(v), v);
    }

    #[test]
    fn test_homogeneous_round_trip() {
        let v = Vec3::new(2.0, 4.0, 6.0);
        let h = v.to_homogeneous();
        assert_eq!(h[3], 1.0);
        assert_eq!(Vec3::from_homogeneous(h), v);
    }

    #[test]
    fn test_perspective_divide() {
        let out = Vec3::from_homogeneous([2.0, 4.0, 6.0, 2.0]);
        assert_eq!(out, Vec3::new(1.0, 2.0, 3.0));
    }
}
