//! Mesh data and OBJ loading
//!
//! A mesh is three read-only lists: vertex positions, texture coordinates,
//! and faces holding separate indices into each. Everything is loaded once
//! before drawing starts.

mod obj;

pub use obj::*;

use crate::rasterizer::{Vec2, Vec3};

/// One triangle corner set: three vertex indices and three
/// texture-coordinate indices, already 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub v: [usize; 3],
    pub vt: [usize; 3],
}

/// Triangulated mesh with per-vertex positions and texture coordinates.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    pub texcoords: Vec<Vec2>,
    pub faces: Vec<Face>,
}

impl Mesh {
    /// Load and parse an OBJ file.
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Mesh, MeshError> {
        let contents = std::fs::read_to_string(path)?;
        obj::parse(&contents)
    }

    /// Check that every face index resolves within its list. Run before a
    /// render pass so malformed data aborts it up front.
    pub fn validate(&self) -> Result<(), MeshError> {
        for (i, face) in self.faces.iter().enumerate() {
            for &v in &face.v {
                if v >= self.vertices.len() {
                    return Err(MeshError::VertexIndex { face: i, index: v });
                }
            }
            for &vt in &face.vt {
                if vt >= self.texcoords.len() {
                    return Err(MeshError::TexcoordIndex { face: i, index: vt });
                }
            }
        }
        Ok(())
    }
}

/// Error type for mesh loading and validation
#[derive(Debug)]
pub enum MeshError {
    IoError(std::io::Error),
    /// A malformed record in the OBJ source
    ParseError { line: usize, message: String },
    /// A face's vertex index falls outside the vertex list
    VertexIndex { face: usize, index: usize },
    /// A face's texture-coordinate index falls outside the texcoord list
    TexcoordIndex { face: usize, index: usize },
}

impl From<std::io::Error> for MeshError {
    fn from(e: std::io::Error) -> Self {
        MeshError::IoError(e)
    }
}

impl std::fmt::Display for MeshError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeshError::IoError(e) => write!(f, "IO error: {}", e),
            MeshError::ParseError { line, message } => {
                write!(f, "Invalid mesh data at line {}: {}", line, message)
            }
            MeshError::VertexIndex { face, index } => {
                write!(f, "Invalid mesh data: face {} vertex index {} out of range", face, index)
            }
            MeshError::TexcoordIndex { face, index } => {
                write!(
                    f,
                    "Invalid mesh data: face {} texture coordinate index {} out of range",
                    face, index
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_mesh() -> Mesh {
        Mesh {
            vertices: vec![Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)],
            texcoords: vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)],
            faces: vec![Face { v: [0, 1, 2], vt: [0, 1, 0] }],
        }
    }

    #[test]
    fn test_validate_accepts_in_range() {
        assert!(small_mesh().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_vertex_index() {
        let mut mesh = small_mesh();
        mesh.faces[0].v[2] = 3;
        assert!(matches!(
            mesh.validate(),
            Err(MeshError::VertexIndex { face: 0, index: 3 })
        ));
    }

    #[test]
    fn test_validate_rejects_texcoord_index() {
        let mut mesh = small_mesh();
        mesh.faces[0].vt[1] = 2;
        assert!(matches!(
            mesh.validate(),
            Err(MeshError::TexcoordIndex { face: 0, index: 2 })
        ));
    }
}
