//! Conversion between solid meshes and OBJ/MTL.
//!
//! # Axes
//!
//! The two formats disagree on which axis points up. Exporting to OBJ maps a
//! solid position `(x, y, z)` to `(x, -z, y)`, and importing maps an OBJ
//! position `(x, y, z)` to `(x, z, -y)`. The two maps are inverses, so a
//! solid → OBJ → solid trip returns every coordinate unchanged (apart from
//! the six-decimal text rounding of OBJ vertices).
//!
//! # Faces
//!
//! Solid triangles become OBJ triangles with indices shifted to 1-based. OBJ
//! triangles come back with indices shifted to 0-based, and an OBJ quad
//! `(v0, v1, v2, v3)` becomes the two triangles `(v0, v1, v2)` and
//! `(v2, v1, v3)`.
//!
//! # Example
//!
//! ```
//! use solidmesh::convert::{obj_to_solid, solid_to_obj, ConvertOptions};
//! use solidmesh::io::obj;
//! use solidmesh::mesh::{Rgb, SolidMesh};
//!
//! let mut mesh = SolidMesh::new("tri.solid");
//! mesh.add_vertex(0.0, 0.0, 0.0);
//! mesh.add_vertex(1.0, 0.0, 0.0);
//! mesh.add_vertex(0.0, 1.0, 0.0);
//! mesh.add_triangle([0, 1, 2], Rgb::new(0.5, 0.5, 0.5));
//!
//! let options = ConvertOptions::default().with_mtl_name("tri.mtl");
//! let export = solid_to_obj(&mesh, &options).unwrap();
//! assert!(export.obj.contains("usemtl material_0"));
//!
//! let mut parsed = obj::parse(export.obj.as_bytes()).unwrap();
//! parsed.materials = solidmesh::io::mtl::parse(export.mtl.as_bytes()).unwrap();
//! let back = obj_to_solid(&parsed, &options);
//! assert_eq!(back.triangles, mesh.triangles);
//! ```

use std::path::Path;

use nalgebra::Point3;

use crate::error::Result;
use crate::io::{mtl, obj, solid};
use crate::material::{dedup, MaterialSet};
use crate::mesh::{ObjFace, ObjIndex, ObjMesh, ObjVertex, SolidMesh, SolidTriangle};

/// Vertex count above which an OBJ → solid conversion warns.
pub const DEFAULT_VERTEX_LIMIT: usize = 1200;

/// Triangle count above which an OBJ → solid conversion warns.
pub const DEFAULT_FACE_LIMIT: usize = 400;

/// Options for conversions.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Vertex count above which OBJ → solid logs a warning. The mesh is
    /// written regardless.
    pub vertex_limit: usize,
    /// Triangle count (after quad splitting) above which OBJ → solid logs a
    /// warning. The mesh is written regardless.
    pub face_limit: usize,
    /// `mtllib` reference written into exported OBJ text. When unset, the
    /// file name of the MTL written next to the OBJ is used.
    pub mtl_name: Option<String>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            vertex_limit: DEFAULT_VERTEX_LIMIT,
            face_limit: DEFAULT_FACE_LIMIT,
            mtl_name: None,
        }
    }
}

impl ConvertOptions {
    /// Set the vertex warning ceiling.
    pub fn with_vertex_limit(mut self, limit: usize) -> Self {
        self.vertex_limit = limit;
        self
    }

    /// Set the triangle warning ceiling.
    pub fn with_face_limit(mut self, limit: usize) -> Self {
        self.face_limit = limit;
        self
    }

    /// Set the `mtllib` reference.
    pub fn with_mtl_name<S: Into<String>>(mut self, name: S) -> Self {
        self.mtl_name = Some(name.into());
        self
    }
}

/// OBJ and MTL text produced from a solid mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjExport {
    /// OBJ text.
    pub obj: String,
    /// MTL text.
    pub mtl: String,
}

impl ObjExport {
    /// Write both texts, overwriting existing files.
    pub fn save<P: AsRef<Path>, Q: AsRef<Path>>(&self, obj_path: P, mtl_path: Q) -> Result<()> {
        obj::save_text(&self.obj, obj_path)?;
        obj::save_text(&self.mtl, mtl_path)
    }
}

/// Map a solid position into OBJ axes.
#[inline]
pub fn solid_to_obj_axes(p: Point3<f32>) -> Point3<f32> {
    Point3::new(p.x, -p.z, p.y)
}

/// Map an OBJ position into solid axes.
#[inline]
pub fn obj_to_solid_axes(p: Point3<f32>) -> Point3<f32> {
    Point3::new(p.x, p.z, -p.y)
}

/// Convert a solid mesh to OBJ and MTL text.
///
/// Triangle colors are grouped into `material_<id>` materials (see
/// [`crate::material`]). The MTL reference is `options.mtl_name`, or the
/// mesh label with an `.mtl` extension.
pub fn solid_to_obj(mesh: &SolidMesh, options: &ConvertOptions) -> Result<ObjExport> {
    let grouped = dedup(&mesh.triangles);

    let mut target = ObjMesh::new();
    target.mtllib = Some(
        options
            .mtl_name
            .clone()
            .unwrap_or_else(|| default_mtl_name(mesh.label())),
    );
    target.vertices = mesh
        .vertices
        .iter()
        .map(|&v| {
            let p = solid_to_obj_axes(v);
            ObjVertex::new(p.x, p.y, p.z, 1.0)
        })
        .collect();
    target.faces = mesh
        .triangles
        .iter()
        .zip(&grouped.triangle_materials)
        .map(|(tri, &id)| {
            let [a, b, c] = tri.vertices.map(|i| ObjIndex::vertex(i32::from(i) + 1));
            let name = grouped.materials.get(id).map(|m| m.name.clone());
            ObjFace::triangle([a, b, c]).with_material(name)
        })
        .collect();

    let comment = format!("exported from solid mesh file '{}'", mesh.label());
    let mut obj_text = Vec::new();
    obj::write(&target, Some(&comment), &mut obj_text)?;

    let mut mtl_text = Vec::new();
    mtl::write(&grouped.materials.to_obj_materials(), &mut mtl_text)?;

    log::debug!(
        "{}: {} vertices, {} triangles, {} materials",
        mesh.label(),
        mesh.vertex_count(),
        mesh.triangle_count(),
        grouped.materials.len()
    );

    Ok(ObjExport {
        obj: String::from_utf8_lossy(&obj_text).into_owned(),
        mtl: String::from_utf8_lossy(&mtl_text).into_owned(),
    })
}

fn default_mtl_name(label: &str) -> String {
    let name = Path::new(label)
        .with_extension("mtl")
        .file_name()
        .map(|n| n.to_string_lossy().into_owned());
    name.unwrap_or_else(|| "materials.mtl".to_string())
}

/// Convert an OBJ mesh to a solid mesh.
///
/// Faces take the diffuse color of their material; faces without one, or
/// naming a material that was not loaded, are black. Exceeding the vertex or
/// triangle ceilings of `options` only logs a warning.
pub fn obj_to_solid(mesh: &ObjMesh, options: &ConvertOptions) -> SolidMesh {
    let triangle_count = mesh.triangle_count();
    if mesh.vertices.len() > options.vertex_limit {
        log::warn!(
            "{} vertices exceeds the solid format limit of {}",
            mesh.vertices.len(),
            options.vertex_limit
        );
    }
    if triangle_count > options.face_limit {
        log::warn!(
            "{} triangles exceeds the solid format limit of {}",
            triangle_count,
            options.face_limit
        );
    }

    let materials = MaterialSet::from_obj_materials(&mesh.materials);
    let mut target = SolidMesh::with_capacity("", mesh.vertices.len(), triangle_count);

    target.vertices = mesh
        .vertices
        .iter()
        .map(|v| obj_to_solid_axes(v.position))
        .collect();

    for face in &mesh.faces {
        let color = materials.color_of(face.material.as_deref());
        let v: Vec<i16> = face
            .corners()
            .iter()
            .map(|c| solid_index(c.vertex))
            .collect();

        target
            .triangles
            .push(SolidTriangle::new([v[0], v[1], v[2]], color));
        if face.is_quad() {
            target
                .triangles
                .push(SolidTriangle::new([v[2], v[1], v[3]], color));
        }
    }

    if let Err(e) = target.validate() {
        log::warn!("converted mesh references a missing vertex: {}", e);
    }

    target
}

/// Shift a 1-based OBJ index to the 0-based 16-bit solid field.
///
/// Indices that do not fit wrap the way a 16-bit store would.
fn solid_index(index: i32) -> i16 {
    let zero_based = index.wrapping_sub(1);
    i16::try_from(zero_based).unwrap_or_else(|_| {
        log::warn!("vertex index {} does not fit a solid triangle", index);
        zero_based as i16
    })
}

/// Convert an OBJ mesh straight to solid bytes.
pub fn obj_to_solid_bytes(mesh: &ObjMesh, options: &ConvertOptions) -> Result<Vec<u8>> {
    solid::encode(&obj_to_solid(mesh, options))
}

/// Load a solid file and write it as OBJ plus an MTL file next to it.
///
/// The MTL path is `obj_path` with an `.mtl` extension. Returns that path.
pub fn solid_to_obj_files<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    obj_path: Q,
    options: &ConvertOptions,
) -> Result<std::path::PathBuf> {
    let obj_path = obj_path.as_ref();
    let mtl_path = obj_path.with_extension("mtl");

    let mesh = solid::load(input)?;

    let mut options = options.clone();
    if options.mtl_name.is_none() {
        options.mtl_name = mtl_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
    }

    solid_to_obj(&mesh, &options)?.save(obj_path, &mtl_path)?;
    Ok(mtl_path)
}

/// Load an OBJ file (and its materials) and write it as a solid file.
pub fn obj_to_solid_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: &ConvertOptions,
) -> Result<()> {
    let input = input.as_ref();
    let mesh = obj::load(input)?;
    let mut target = obj_to_solid(&mesh, options);
    target.set_label(&input.to_string_lossy());
    solid::save(&target, output)
}
