//! Core mesh data structures.
//!
//! This module provides the two in-memory models the converter moves between.
//!
//! # Overview
//!
//! - [`SolidMesh`] mirrors the binary solid format: a fixed set of vertices
//!   and colored triangles, loaded or written in one piece.
//! - [`ObjMesh`] mirrors OBJ/MTL text: vertices, triangle or quad faces with
//!   an optional material name, and the named materials of the `mtllib`.
//!
//! Colors are carried as [`Rgb`]. Solid triangles hold one directly; OBJ
//! faces reach theirs through a material name.
//!
//! # Construction
//!
//! ```
//! use solidmesh::mesh::{Rgb, SolidMesh};
//!
//! let mut mesh = SolidMesh::new("tri.solid");
//! mesh.add_vertex(0.0, 0.0, 0.0);
//! mesh.add_vertex(1.0, 0.0, 0.0);
//! mesh.add_vertex(0.0, 1.0, 0.0);
//! mesh.add_triangle([0, 1, 2], Rgb::new(0.5, 0.5, 0.5));
//!
//! assert!(mesh.validate().is_ok());
//! ```

mod color;
mod obj;
mod solid;

pub use color::Rgb;
pub use obj::{ObjFace, ObjIndex, ObjMaterial, ObjMesh, ObjVertex};
pub use solid::{SolidMesh, SolidTriangle, SolidVertex};
