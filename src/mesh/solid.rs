//! In-memory model of the solid mesh format.
//!
//! A solid mesh is a flat vertex array plus a flat array of colored index
//! triangles. Both counts live in the file header as signed 16-bit values, so
//! a mesh holds at most [`i16::MAX`] of each when it is written back out.

use nalgebra::Point3;

use super::color::Rgb;
use crate::error::{MeshError, Result};
use crate::label;

/// A solid-format vertex position.
pub type SolidVertex = Point3<f32>;

/// A colored triangle referencing three vertices by 0-based index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidTriangle {
    /// Vertex indices into [`SolidMesh::vertices`].
    pub vertices: [i16; 3],
    /// Flat color of the triangle.
    pub color: Rgb,
}

impl SolidTriangle {
    /// Create a triangle from indices and a color.
    pub fn new(vertices: [i16; 3], color: Rgb) -> Self {
        Self { vertices, color }
    }
}

/// A solid mesh: fixed-count vertex and triangle arrays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolidMesh {
    label: String,

    /// Vertex positions, in file order.
    pub vertices: Vec<SolidVertex>,

    /// Colored triangles, in file order.
    pub triangles: Vec<SolidTriangle>,
}

impl SolidMesh {
    /// Create an empty mesh labelled with its provenance (usually the source path).
    pub fn new(label: &str) -> Self {
        Self {
            label: label::bounded(label),
            vertices: Vec::new(),
            triangles: Vec::new(),
        }
    }

    /// Create an empty mesh with room for the given number of elements.
    pub fn with_capacity(label: &str, num_vertices: usize, num_triangles: usize) -> Self {
        Self {
            label: label::bounded(label),
            vertices: Vec::with_capacity(num_vertices),
            triangles: Vec::with_capacity(num_triangles),
        }
    }

    /// Provenance label of this mesh.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replace the provenance label.
    pub fn set_label(&mut self, label: &str) {
        self.label = label::bounded(label);
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Append a vertex and return its index.
    pub fn add_vertex(&mut self, x: f32, y: f32, z: f32) -> usize {
        self.vertices.push(Point3::new(x, y, z));
        self.vertices.len() - 1
    }

    /// Append a triangle and return its index.
    pub fn add_triangle(&mut self, vertices: [i16; 3], color: Rgb) -> usize {
        self.triangles.push(SolidTriangle::new(vertices, color));
        self.triangles.len() - 1
    }

    /// Check that every triangle index lies in `[0, vertex_count)`.
    ///
    /// The codecs do not call this; files with out-of-range indices still load.
    pub fn validate(&self) -> Result<()> {
        let vertex_count = self.vertex_count();
        for (ti, tri) in self.triangles.iter().enumerate() {
            for &vi in &tri.vertices {
                if vi < 0 || vi as usize >= vertex_count {
                    return Err(MeshError::InvalidVertexIndex {
                        triangle: ti,
                        vertex: vi,
                        vertex_count,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_follow_contents() {
        let mut mesh = SolidMesh::new("tri.solid");
        mesh.add_vertex(0.0, 0.0, 0.0);
        mesh.add_vertex(1.0, 0.0, 0.0);
        mesh.add_vertex(0.0, 1.0, 0.0);
        mesh.add_triangle([0, 1, 2], Rgb::new(1.0, 0.0, 0.0));

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.label(), "tri.solid");
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut mesh = SolidMesh::new("bad");
        mesh.add_vertex(0.0, 0.0, 0.0);
        mesh.add_triangle([0, 0, 1], Rgb::ZERO);

        match mesh.validate() {
            Err(MeshError::InvalidVertexIndex {
                triangle,
                vertex,
                vertex_count,
            }) => {
                assert_eq!(triangle, 0);
                assert_eq!(vertex, 1);
                assert_eq!(vertex_count, 1);
            }
            other => panic!("expected InvalidVertexIndex, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_negative() {
        let mut mesh = SolidMesh::new("bad");
        mesh.add_vertex(0.0, 0.0, 0.0);
        mesh.add_triangle([0, -1, 0], Rgb::ZERO);
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn test_empty_mesh_is_valid() {
        let mesh = SolidMesh::new("empty");
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
        assert!(mesh.validate().is_ok());
    }
}
