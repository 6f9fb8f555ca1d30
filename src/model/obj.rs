//! OBJ subset parser
//!
//! Line-oriented records: `v x y z` vertex positions, `vt u v` texture
//! coordinates, `f a/at/.. b/bt/.. c/ct/..` triangular faces with 1-based
//! indices. Any other record tag is skipped.

use super::{Face, Mesh, MeshError};

/// Parse OBJ text into a mesh. Face indices are decremented to 0-based;
/// bounds are checked separately by [`Mesh::validate`].
pub fn parse(source: &str) -> Result<Mesh, MeshError> {
    let mut mesh = Mesh::default();

    for (i, line) in source.lines().enumerate() {
        let line_no = i + 1;
        let mut fields = line.split_whitespace();
        let tag = match fields.next() {
            Some(tag) => tag,
            None => continue,
        };
        match tag {
            "v" => {
                let [x, y, z]: [f32; 3] = parse_floats(&mut fields, line_no)?;
                mesh.vertices.push(crate::rasterizer::Vec3::new(x, y, z));
            }
            "vt" => {
                let [u, v]: [f32; 2] = parse_floats(&mut fields, line_no)?;
                mesh.texcoords.push(crate::rasterizer::Vec2::new(u, v));
            }
            "f" => mesh.faces.push(parse_face(&mut fields, line_no)?),
            _ => {} // normals, groups, comments and the rest are not used
        }
    }

    Ok(mesh)
}

fn parse_floats<'a, const N: usize>(
    fields: &mut impl Iterator<Item = &'a str>,
    line_no: usize,
) -> Result<[f32; N], MeshError> {
    let mut out = [0.0; N];
    for o in out.iter_mut() {
        let field = fields.next().ok_or_else(|| MeshError::ParseError {
            line: line_no,
            message: "missing coordinate".to_string(),
        })?;
        *o = field.parse().map_err(|_| MeshError::ParseError {
            line: line_no,
            message: format!("bad coordinate '{}'", field),
        })?;
    }
    Ok(out)
}

fn parse_face<'a>(
    fields: &mut impl Iterator<Item = &'a str>,
    line_no: usize,
) -> Result<Face, MeshError> {
    let mut face = Face { v: [0; 3], vt: [0; 3] };
    for j in 0..3 {
        let corner = fields.next().ok_or_else(|| MeshError::ParseError {
            line: line_no,
            message: "face needs three corners".to_string(),
        })?;
        let mut indices = corner.split('/');
        face.v[j] = parse_index(indices.next(), line_no)?;
        face.vt[j] = parse_index(indices.next(), line_no)?;
    }
    Ok(face)
}

/// Parse a 1-based index field down to 0-based.
fn parse_index(field: Option<&str>, line_no: usize) -> Result<usize, MeshError> {
    let field = field.unwrap_or("");
    let index: usize = field.parse().map_err(|_| MeshError::ParseError {
        line: line_no,
        message: format!("bad face index '{}'", field),
    })?;
    index.checked_sub(1).ok_or_else(|| MeshError::ParseError {
        line: line_no,
        message: "face indices are 1-based".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::{Vec2, Vec3};

    const SOURCE: &str = "\
# comment line
v -0.5 0.5 0.0
v 0.5 0.5 0.0
v 0.0 -0.5 0.0
vn 0.0 0.0 1.0
vt 0.0 1.0
vt  1.0  1.0
vt 0.5 0.0
f 1/1/1 2/2/1 3/3/1
";

    #[test]
    fn test_parse_counts_and_values() {
        let mesh = parse(SOURCE).unwrap();
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.texcoords.len(), 3);
        assert_eq!(mesh.faces.len(), 1);
        assert_eq!(mesh.vertices[0], Vec3::new(-0.5, 0.5, 0.0));
        assert_eq!(mesh.texcoords[2], Vec2::new(0.5, 0.0));
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_parse_decrements_indices() {
        let mesh = parse(SOURCE).unwrap();
        assert_eq!(mesh.faces[0], Face { v: [0, 1, 2], vt: [0, 1, 2] });
    }

    #[test]
    fn test_parse_skips_unknown_tags() {
        let mesh = parse("g head\nusemtl skin\nv 0 0 0\n").unwrap();
        assert_eq!(mesh.vertices.len(), 1);
    }

    #[test]
    fn test_parse_rejects_bad_coordinate() {
        let err = parse("v 1.0 oops 3.0\n").unwrap_err();
        assert!(matches!(err, MeshError::ParseError { line: 1, .. }));
    }

    #[test]
    fn test_parse_rejects_zero_index() {
        let err = parse("f 0/1 1/1 1/1\n").unwrap_err();
        assert!(matches!(err, MeshError::ParseError { line: 1, .. }));
    }

    #[test]
    fn test_parse_rejects_missing_texcoord_index() {
        let err = parse("f 1 2 3\n").unwrap_err();
        assert!(matches!(err, MeshError::ParseError { line: 1, .. }));
    }
}
