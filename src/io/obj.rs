//! Wavefront OBJ format support.
//!
//! The reader is permissive. Unknown keys are skipped, and a face line that
//! fits none of the supported grammars still yields a (degenerate) face, so a
//! bad line never aborts a load. Only `v`, `f`, `usemtl` and `mtllib` carry
//! meaning; `vt` and `vn` are only counted, so relative face indices resolve.
//!
//! # Face grammars
//!
//! Tried in this order, each against the whole line:
//!
//! | Corners | Corner form | Fields |
//! |---------|-------------|--------|
//! | 4 | `v/t/n` | 12 |
//! | 4 | `v/t`   | 8 |
//! | 4 | `v`     | 4 |
//! | 3 | `v/t/n` | 9 |
//! | 3 | `v/t`   | 6 |
//! | 3 | `v`     | 3 |

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use super::mtl;
use super::text::{first_token, for_each_keyed_line, parse_floats};
use crate::error::{MeshError, Result};
use crate::label;
use crate::mesh::{ObjFace, ObjIndex, ObjMesh, ObjVertex};

/// Face grammars as (corners, indices per corner), highest priority first.
const FACE_GRAMMARS: [(usize, usize); 6] = [(4, 3), (4, 2), (4, 1), (3, 3), (3, 2), (3, 1)];

/// Parse OBJ text. The `mtllib` reference is recorded but not followed.
pub fn parse<R: BufRead>(reader: R) -> Result<ObjMesh> {
    let mut mesh = ObjMesh::new();
    let mut current_material: Option<String> = None;
    // Vertices, texture coordinates and normals seen so far, for relative indices.
    let mut seen = [0i32; 3];

    for_each_keyed_line(reader, |key, rest| match key {
        "v" => {
            mesh.vertices.push(parse_vertex(rest));
            seen[0] = seen[0].saturating_add(1);
        }
        "vt" => seen[1] = seen[1].saturating_add(1),
        "vn" => seen[2] = seen[2].saturating_add(1),
        "f" => mesh
            .faces
            .push(parse_face(rest, seen).with_material(current_material.clone())),
        "usemtl" => {
            if let Some(name) = first_token(rest) {
                current_material = Some(label::bounded(name));
            }
        }
        "mtllib" => {
            if let Some(lib) = first_token(rest) {
                mesh.mtllib = Some(label::bounded(lib));
            }
        }
        _ => {}
    })?;

    Ok(mesh)
}

/// Parse the numbers of a `v` line. Missing coordinates are 0, as is a
/// missing weight.
fn parse_vertex(text: &str) -> ObjVertex {
    let mut xyzw = [0.0f32; 4];
    parse_floats(text, &mut xyzw);
    ObjVertex::new(xyzw[0], xyzw[1], xyzw[2], xyzw[3])
}

/// Parse the corners of an `f` line, falling back to [`ObjFace::degenerate`].
///
/// A trailing `#` comment is dropped first. Negative (relative) indices are
/// resolved against `seen`, the number of `v`, `vt` and `vn` records read so
/// far, so the face keeps absolute 1-based indices.
fn parse_face(text: &str, seen: [i32; 3]) -> ObjFace {
    let text = text.split_once('#').map_or(text, |(face, _)| face);
    let tokens: Vec<&str> = text.split_whitespace().collect();

    for &(corners, per_corner) in &FACE_GRAMMARS {
        if tokens.len() != corners {
            continue;
        }
        let parsed: Option<Vec<ObjIndex>> = tokens
            .iter()
            .map(|token| parse_corner(token, per_corner).map(|c| resolve_relative(c, seen)))
            .collect();
        if let Some(c) = parsed {
            return if corners == 4 {
                ObjFace::quad([c[0], c[1], c[2], c[3]])
            } else {
                ObjFace::triangle([c[0], c[1], c[2]])
            };
        }
    }

    ObjFace::degenerate()
}

/// Parse one `v`, `v/t` or `v/t/n` corner, requiring exactly `fields` integers.
fn parse_corner(token: &str, fields: usize) -> Option<ObjIndex> {
    let mut values = [0i32; 3];
    let mut count = 0;
    for part in token.split('/') {
        if count == fields {
            return None;
        }
        values[count] = part.parse().ok()?;
        count += 1;
    }
    if count != fields {
        return None;
    }
    Some(ObjIndex {
        vertex: values[0],
        texture: (fields >= 2).then_some(values[1]),
        normal: (fields == 3).then_some(values[2]),
    })
}

/// Turn relative (negative) indices into absolute 1-based ones. `-1` names
/// the most recent record.
fn resolve_relative(corner: ObjIndex, seen: [i32; 3]) -> ObjIndex {
    let absolute = |index: i32, count: i32| {
        if index < 0 {
            count.saturating_add(index).saturating_add(1)
        } else {
            index
        }
    };
    ObjIndex {
        vertex: absolute(corner.vertex, seen[0]),
        texture: corner.texture.map(|t| absolute(t, seen[1])),
        normal: corner.normal.map(|n| absolute(n, seen[2])),
    }
}

/// Load an OBJ file along with the materials of its `mtllib`.
///
/// The library path is resolved against the OBJ file's directory. A library
/// that cannot be read is logged and skipped; faces then resolve to black.
///
/// # Example
///
/// ```no_run
/// use solidmesh::io::obj;
///
/// let mesh = obj::load("model.obj").unwrap();
/// println!("{} faces, {} materials", mesh.faces.len(), mesh.materials.len());
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<ObjMesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| MeshError::load(path, e))?;
    let mut mesh = parse(BufReader::new(file))?;

    if let Some(lib) = &mesh.mtllib {
        let lib_path = path.parent().unwrap_or_else(|| Path::new("")).join(lib);
        match mtl::load(&lib_path) {
            Ok(materials) => mesh.materials = materials,
            Err(e) => log::warn!("{}: skipping material library: {}", path.display(), e),
        }
    }

    log::debug!(
        "{}: {} vertices, {} faces, {} materials",
        path.display(),
        mesh.vertices.len(),
        mesh.faces.len(),
        mesh.materials.len()
    );

    Ok(mesh)
}

/// Write an OBJ mesh as text.
///
/// Output order is: the optional `comment` line, `mtllib`, every vertex as
/// `v x y z 1.0` with six decimals, then the faces. A `usemtl` line precedes
/// a face only when its material differs from the previous face's. Only
/// vertex indices are written.
pub fn write<W: Write>(mesh: &ObjMesh, comment: Option<&str>, mut writer: W) -> Result<()> {
    if let Some(comment) = comment {
        writeln!(writer, "# {}", comment)?;
    }
    if let Some(lib) = &mesh.mtllib {
        writeln!(writer, "mtllib {}", lib)?;
    }

    for v in &mesh.vertices {
        let p = v.position;
        writeln!(writer, "v {:.6} {:.6} {:.6} 1.0", p.x, p.y, p.z)?;
    }

    let mut previous: Option<&str> = None;
    for face in &mesh.faces {
        if let Some(name) = face.material.as_deref() {
            if previous != Some(name) {
                writeln!(writer, "usemtl {}", name)?;
                previous = Some(name);
            }
        }
        write!(writer, "f")?;
        for corner in face.corners() {
            write!(writer, " {}", corner.vertex)?;
        }
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}

/// Save OBJ text to a file, overwriting it.
pub fn save_text<P: AsRef<Path>>(text: &str, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| MeshError::save(path, e))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Rgb;

    fn parse_str(text: &str) -> ObjMesh {
        parse(text.as_bytes()).unwrap()
    }

    #[test]
    fn test_vertex_defaults() {
        let mesh = parse_str("v 1 2 3\nv 1 2 3 4\nv 5\nv\n");
        assert_eq!(mesh.vertices[0], ObjVertex::new(1.0, 2.0, 3.0, 0.0));
        assert_eq!(mesh.vertices[1], ObjVertex::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(mesh.vertices[2], ObjVertex::new(5.0, 0.0, 0.0, 0.0));
        assert_eq!(mesh.vertices[3], ObjVertex::default());
    }

    #[test]
    fn test_face_grammars() {
        let mesh = parse_str(
            "f 1/2/3 4/5/6 7/8/9 10/11/12\n\
             f 1/2 3/4 5/6 7/8\n\
             f 1 2 3 4\n\
             f 1/2/3 4/5/6 7/8/9\n\
             f 1/2 3/4 5/6\n\
             f 1 2 3\n",
        );
        let faces = &mesh.faces;
        assert_eq!(faces.len(), 6);

        assert!(faces[0].is_quad());
        assert_eq!(
            faces[0].corners()[3],
            ObjIndex {
                vertex: 10,
                texture: Some(11),
                normal: Some(12)
            }
        );

        assert!(faces[1].is_quad());
        assert_eq!(faces[1].corners()[1].texture, Some(4));
        assert_eq!(faces[1].corners()[1].normal, None);

        assert!(faces[2].is_quad());
        assert_eq!(faces[2].corners()[3], ObjIndex::vertex(4));

        assert!(!faces[3].is_quad());
        assert_eq!(faces[3].corners()[2].normal, Some(9));

        assert!(!faces[4].is_quad());
        assert_eq!(faces[4].corners()[2].texture, Some(6));

        assert!(!faces[5].is_quad());
        assert_eq!(
            faces[5].corners().iter().map(|c| c.vertex).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_malformed_face_does_not_abort() {
        let mesh = parse_str("f abc\nf 1//2 2//3 3//4\nf 1 2\nf 1 2 3 4 5\nf 1/2 2 3\nf 4 5 6\n");
        assert_eq!(mesh.faces.len(), 6);
        for face in &mesh.faces[..5] {
            assert_eq!(*face, ObjFace::degenerate());
        }
        assert_eq!(mesh.faces[5].corners()[0].vertex, 4);
    }

    #[test]
    fn test_relative_indices_resolve_against_records_so_far() {
        let mesh = parse_str(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvn 0 0 1\n\
             f -3 -2 -1\n\
             v 1 1 0\n\
             f -1/-2/-1 -2/-1/-1 -3/-2/-1\n",
        );
        let first: Vec<i32> = mesh.faces[0].corners().iter().map(|c| c.vertex).collect();
        assert_eq!(first, vec![1, 2, 3]);

        let second = mesh.faces[1].corners();
        assert_eq!(
            second[0],
            ObjIndex {
                vertex: 4,
                texture: Some(1),
                normal: Some(1)
            }
        );
        assert_eq!(second[1].vertex, 3);
        assert_eq!(second[1].texture, Some(2));
        assert_eq!(second[2].vertex, 2);
    }

    #[test]
    fn test_trailing_comment_on_face() {
        let mesh = parse_str("f 1 2 3 # exporter note\nf 1 2 3 4#tight\n");
        let first: Vec<i32> = mesh.faces[0].corners().iter().map(|c| c.vertex).collect();
        assert_eq!(first, vec![1, 2, 3]);
        assert!(mesh.faces[1].is_quad());
        assert_eq!(mesh.faces[1].corners()[3].vertex, 4);
    }

    #[test]
    fn test_usemtl_applies_forward_only() {
        let mesh = parse_str("f 1 2 3\nusemtl red\nf 1 2 3\nf 2 3 4\nusemtl blue\nf 3 4 5\n");
        let names: Vec<Option<&str>> = mesh.faces.iter().map(|f| f.material.as_deref()).collect();
        assert_eq!(names, vec![None, Some("red"), Some("red"), Some("blue")]);
    }

    #[test]
    fn test_degenerate_face_keeps_material() {
        let mesh = parse_str("usemtl red\nf nope\n");
        assert_eq!(mesh.faces[0].material.as_deref(), Some("red"));
    }

    #[test]
    fn test_mtllib_and_ignored_keys() {
        let mesh = parse_str("# comment\nmtllib scene.mtl\no thing\nvt 0 1\nvn 0 0 1\ns off\n");
        assert_eq!(mesh.mtllib.as_deref(), Some("scene.mtl"));
        assert!(mesh.vertices.is_empty());
        assert!(mesh.faces.is_empty());
    }

    #[test]
    fn test_mtllib_takes_first_library() {
        let mesh = parse_str("mtllib a.mtl b.mtl\n");
        assert_eq!(mesh.mtllib.as_deref(), Some("a.mtl"));
    }

    #[test]
    fn test_write_suppresses_repeated_usemtl() {
        let mut mesh = ObjMesh::new();
        mesh.mtllib = Some("out.mtl".to_string());
        mesh.vertices.push(ObjVertex::new(0.0, -0.0, 0.5, 1.0));
        let tri = ObjFace::triangle([ObjIndex::vertex(1); 3]);
        for name in ["a", "a", "b", "a"] {
            mesh.faces.push(tri.clone().with_material(Some(name.to_string())));
        }

        let mut out = Vec::new();
        write(&mesh, Some("test"), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "# test\n\
             mtllib out.mtl\n\
             v 0.000000 -0.000000 0.500000 1.0\n\
             usemtl a\nf 1 1 1\nf 1 1 1\n\
             usemtl b\nf 1 1 1\n\
             usemtl a\nf 1 1 1\n"
        );
    }

    #[test]
    fn test_load_resolves_mtllib_next_to_obj() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("m.mtl"), "newmtl red\nKd 1 0 0\n").unwrap();
        std::fs::write(
            dir.path().join("m.obj"),
            "mtllib m.mtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\nusemtl red\nf 1 2 3\n",
        )
        .unwrap();

        let mesh = load(dir.path().join("m.obj")).unwrap();
        assert_eq!(mesh.materials.len(), 1);
        assert_eq!(mesh.material("red").unwrap().diffuse, Rgb::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_load_with_missing_mtllib() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("m.obj"), "mtllib gone.mtl\nf 1 2 3\n").unwrap();

        let mesh = load(dir.path().join("m.obj")).unwrap();
        assert!(mesh.materials.is_empty());
        assert_eq!(mesh.faces.len(), 1);
    }

    #[test]
    fn test_load_missing_obj() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(dir.path().join("none.obj")).unwrap_err().is_unopenable());
    }
}
