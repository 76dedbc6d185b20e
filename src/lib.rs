//! # Solidmesh
//!
//! A converter between the solid mesh format and Wavefront OBJ/MTL.
//!
//! The solid format is a fixed-layout, big-endian binary file: a vertex
//! count, a triangle count, the vertex positions, then triangles carrying
//! three vertex indices and a flat RGB color each. OBJ/MTL express the same
//! colors as named materials. Solidmesh reads and writes both sides and
//! bridges them by grouping triangle colors into materials.
//!
//! ## Features
//!
//! - **Binary codec**: big-endian 16/32-bit integers and IEEE-754 floats
//! - **Permissive OBJ reader**: six face grammars, malformed lines degrade
//!   instead of failing
//! - **Material dedup**: exact-color grouping with deterministic names
//! - **Axis remap and quad splitting** between the two conventions
//!
//! ## Quick Start
//!
//! ```no_run
//! use solidmesh::prelude::*;
//!
//! // Solid to OBJ + MTL
//! let mesh = solidmesh::io::solid::load("gun.solid").unwrap();
//! let export = solid_to_obj(&mesh, &ConvertOptions::default().with_mtl_name("gun.mtl")).unwrap();
//! export.save("gun.obj", "gun.mtl").unwrap();
//!
//! // OBJ (materials included) back to solid
//! let obj = solidmesh::io::obj::load("gun.obj").unwrap();
//! let solid = obj_to_solid(&obj, &ConvertOptions::default());
//! solidmesh::io::solid::save(&solid, "gun2.solid").unwrap();
//! ```
//!
//! ## Building Meshes Programmatically
//!
//! ```
//! use solidmesh::prelude::*;
//!
//! let mut mesh = SolidMesh::new("quad.solid");
//! mesh.add_vertex(0.0, 0.0, 0.0);
//! mesh.add_vertex(1.0, 0.0, 0.0);
//! mesh.add_vertex(1.0, 1.0, 0.0);
//! mesh.add_vertex(0.0, 1.0, 0.0);
//! mesh.add_triangle([0, 1, 2], Rgb::new(1.0, 0.0, 0.0));
//! mesh.add_triangle([0, 2, 3], Rgb::new(1.0, 0.0, 0.0));
//!
//! let bytes = solidmesh::io::solid::encode(&mesh).unwrap();
//! assert_eq!(bytes.len(), 4 + 4 * 12 + 2 * 20);
//! ```
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`] facade: `debug!` for load summaries,
//! `warn!` for conditions that are tolerated, such as an OBJ mesh larger than
//! the solid format's customary limits or an unreadable `mtllib`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod convert;
pub mod error;
pub mod io;
pub mod label;
pub mod material;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use solidmesh::prelude::*;
/// ```
pub mod prelude {
    pub use crate::convert::{obj_to_solid, solid_to_obj, ConvertOptions, ObjExport};
    pub use crate::error::{MeshError, Result};
    pub use crate::material::{dedup, Material, MaterialSet};
    pub use crate::mesh::{
        ObjFace, ObjIndex, ObjMaterial, ObjMesh, ObjVertex, Rgb, SolidMesh, SolidTriangle,
        SolidVertex,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_two_vertex_export() {
        let mut mesh = SolidMesh::new("pair.solid");
        mesh.add_vertex(0.0, 0.0, 0.0);
        mesh.add_vertex(1.0, 0.0, 0.0);
        mesh.add_triangle([0, 1, 0], Rgb::new(0.5, 0.5, 0.5));

        let bytes = crate::io::solid::encode(&mesh).unwrap();
        let loaded = crate::io::solid::decode(&bytes, "pair.solid").unwrap();
        let export = solid_to_obj(&loaded, &ConvertOptions::default()).unwrap();

        let lines: Vec<&str> = export.obj.lines().collect();
        assert!(lines.contains(&"v 0.000000 -0.000000 0.000000 1.0"));
        assert!(lines.contains(&"v 1.000000 -0.000000 0.000000 1.0"));
        assert!(lines.contains(&"usemtl material_0"));
        assert!(lines.contains(&"f 1 2 1"));
    }

    #[test]
    fn test_quad_face_from_text() {
        let obj = crate::io::obj::parse("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n".as_bytes())
            .unwrap();
        let solid = obj_to_solid(&obj, &ConvertOptions::default());
        assert_eq!(solid.triangle_count(), 2);
        assert_eq!(solid.triangles[0].vertices, [0, 1, 2]);
        assert_eq!(solid.triangles[1].vertices, [2, 1, 3]);
        assert!(solid.validate().is_ok());
    }
}
