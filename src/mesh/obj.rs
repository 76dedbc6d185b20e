//! In-memory model of a Wavefront OBJ mesh and its MTL materials.
//!
//! Face indices are kept exactly as written in the text: 1-based. They are
//! shifted to 0-based only when a face is turned into solid triangles.

use nalgebra::Point3;

use super::color::Rgb;
use crate::label;

/// A geometric vertex (`v x y z [w]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjVertex {
    /// Position.
    pub position: Point3<f32>,
    /// Optional weight; 0 when the line does not carry one.
    pub w: f32,
}

impl ObjVertex {
    /// Create a vertex from all four components.
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
            w,
        }
    }
}

impl Default for ObjVertex {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

/// One corner of a face: `v`, `v/t` or `v/t/n`, all 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjIndex {
    /// Geometric vertex index.
    pub vertex: i32,
    /// Texture coordinate index, if present.
    pub texture: Option<i32>,
    /// Normal index, if present.
    pub normal: Option<i32>,
}

impl ObjIndex {
    /// A corner with only a vertex index.
    pub fn vertex(vertex: i32) -> Self {
        Self {
            vertex,
            texture: None,
            normal: None,
        }
    }

    /// A corner with every index set to `value`.
    pub fn splat(value: i32) -> Self {
        Self {
            vertex: value,
            texture: Some(value),
            normal: Some(value),
        }
    }
}

impl Default for ObjIndex {
    fn default() -> Self {
        Self::vertex(1)
    }
}

/// A triangle or quad face.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjFace {
    corners: [ObjIndex; 4],
    quad: bool,
    /// Material active (`usemtl`) when the face was read.
    pub material: Option<String>,
}

impl ObjFace {
    /// A triangle face.
    pub fn triangle(corners: [ObjIndex; 3]) -> Self {
        Self {
            corners: [corners[0], corners[1], corners[2], ObjIndex::default()],
            quad: false,
            material: None,
        }
    }

    /// A quad face.
    pub fn quad(corners: [ObjIndex; 4]) -> Self {
        Self {
            corners,
            quad: true,
            material: None,
        }
    }

    /// Placeholder for a face line that matched no grammar: a triangle whose
    /// indices are all 1.
    pub fn degenerate() -> Self {
        Self {
            corners: [ObjIndex::splat(1); 4],
            quad: false,
            material: None,
        }
    }

    /// Attach a material name.
    pub fn with_material(mut self, material: Option<String>) -> Self {
        self.material = material;
        self
    }

    /// Whether this face has four corners.
    #[inline]
    pub fn is_quad(&self) -> bool {
        self.quad
    }

    /// The 3 or 4 corners of this face.
    pub fn corners(&self) -> &[ObjIndex] {
        if self.quad {
            &self.corners
        } else {
            &self.corners[..3]
        }
    }

    /// Number of triangles this face becomes in the solid format.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        if self.quad {
            2
        } else {
            1
        }
    }
}

/// A material record from an MTL file.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjMaterial {
    /// Material name (`newmtl`).
    pub name: String,
    /// Ambient color (`Ka`).
    pub ambient: Rgb,
    /// Diffuse color (`Kd`).
    pub diffuse: Rgb,
    /// Specular color (`Ks`).
    pub specular: Rgb,
    /// Specular exponent (`Ns`).
    pub shininess: f32,
}

impl ObjMaterial {
    /// A material with every numeric field zeroed.
    pub fn new(name: &str) -> Self {
        Self {
            name: label::bounded(name),
            ambient: Rgb::ZERO,
            diffuse: Rgb::ZERO,
            specular: Rgb::ZERO,
            shininess: 0.0,
        }
    }
}

/// A mesh read from OBJ text, with the materials of its `mtllib`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjMesh {
    /// Geometric vertices, in file order.
    pub vertices: Vec<ObjVertex>,
    /// Faces, in file order.
    pub faces: Vec<ObjFace>,
    /// Materials loaded from the referenced MTL file.
    pub materials: Vec<ObjMaterial>,
    /// Path given by the last `mtllib` line, as written.
    pub mtllib: Option<String>,
}

impl ObjMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of solid triangles this mesh turns into (quads count twice).
    pub fn triangle_count(&self) -> usize {
        self.faces.iter().map(ObjFace::triangle_count).sum()
    }

    /// Find a loaded material by name. The first record wins on duplicates.
    pub fn material(&self, name: &str) -> Option<&ObjMaterial> {
        self.materials.iter().find(|m| m.name == name)
    }
}
