//! Material deduplication.
//!
//! The solid format colors each triangle directly, OBJ names materials. This
//! module bridges the two: [`dedup`] groups triangles by exact color into a
//! set of named materials, and [`MaterialSet::from_obj_materials`] maps names
//! back to diffuse colors.
//!
//! # Identity
//!
//! Two colors are the same material only if all three components have the
//! same bit pattern. Colors one ulp apart become two materials, and no
//! tolerance is applied.
//!
//! # Id assignment
//!
//! Each new color is conceptually pushed to the front of the set, and ids are
//! handed out front to back once every triangle has been seen. The color met
//! last therefore gets id 0 and the color met first gets the highest id.
//!
//! ```
//! use solidmesh::material::dedup;
//! use solidmesh::mesh::{Rgb, SolidTriangle};
//!
//! let red = Rgb::new(1.0, 0.0, 0.0);
//! let blue = Rgb::new(0.0, 0.0, 1.0);
//! let triangles = [
//!     SolidTriangle::new([0, 1, 2], red),
//!     SolidTriangle::new([0, 2, 3], blue),
//!     SolidTriangle::new([1, 2, 3], red),
//! ];
//!
//! let result = dedup(&triangles);
//! assert_eq!(result.materials.len(), 2);
//! assert_eq!(result.triangle_materials, vec![1, 0, 1]);
//! assert_eq!(result.materials.get(1).unwrap().name, "material_1");
//! ```

use crate::mesh::{ObjMaterial, Rgb, SolidTriangle};

/// A named flat-colored material.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Position of this material in its set.
    pub id: usize,
    /// Material name as written to MTL.
    pub name: String,
    /// Diffuse color.
    pub color: Rgb,
}

impl Material {
    /// Name given to generated materials.
    pub fn generated_name(id: usize) -> String {
        format!("material_{}", id)
    }
}

/// An ordered set of materials, indexed by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialSet {
    materials: Vec<Material>,
}

/// Output of [`dedup`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dedup {
    /// Distinct colors as named materials.
    pub materials: MaterialSet,
    /// Material id of each input triangle, in input order.
    pub triangle_materials: Vec<usize>,
}

/// Group triangles by exact color.
///
/// Produces one material per distinct color bit pattern, named
/// `material_<id>`, plus the material id of every triangle.
pub fn dedup(triangles: &[SolidTriangle]) -> Dedup {
    // First-seen order; the front of the set is the end of this vector.
    let mut seen: Vec<Rgb> = Vec::new();
    let mut slots: Vec<usize> = Vec::with_capacity(triangles.len());

    for tri in triangles {
        let slot = match seen.iter().position(|c| c.same_bits(tri.color)) {
            Some(slot) => slot,
            None => {
                seen.push(tri.color);
                seen.len() - 1
            }
        };
        slots.push(slot);
    }

    let count = seen.len();
    let materials = seen
        .iter()
        .rev()
        .enumerate()
        .map(|(id, &color)| Material {
            id,
            name: Material::generated_name(id),
            color,
        })
        .collect();

    Dedup {
        materials: MaterialSet { materials },
        triangle_materials: slots.into_iter().map(|slot| count - 1 - slot).collect(),
    }
}

impl MaterialSet {
    /// Build the reverse mapping from loaded MTL records: name to diffuse
    /// color, ids in file order.
    pub fn from_obj_materials(records: &[ObjMaterial]) -> Self {
        let materials = records
            .iter()
            .enumerate()
            .map(|(id, m)| Material {
                id,
                name: m.name.clone(),
                color: m.diffuse,
            })
            .collect();
        Self { materials }
    }

    /// Number of materials.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Materials in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }

    /// Material with the given id.
    pub fn get(&self, id: usize) -> Option<&Material> {
        self.materials.get(id)
    }

    /// Id of the material with exactly this color.
    pub fn id_of(&self, color: Rgb) -> Option<usize> {
        self.materials
            .iter()
            .position(|m| m.color.same_bits(color))
    }

    /// Diffuse color for a face's material name.
    ///
    /// No name, or a name with no matching material, resolves to black. The
    /// first material wins when names repeat.
    pub fn color_of(&self, name: Option<&str>) -> Rgb {
        name.and_then(|name| self.materials.iter().find(|m| m.name == name))
            .map_or(Rgb::ZERO, |m| m.color)
    }

    /// MTL records for this set.
    ///
    /// Only the diffuse color comes from the material. Ambient is always
    /// white, specular black and the exponent zero.
    pub fn to_obj_materials(&self) -> Vec<ObjMaterial> {
        self.materials
            .iter()
            .map(|m| {
                let mut record = ObjMaterial::new(&m.name);
                record.ambient = Rgb::new(1.0, 1.0, 1.0);
                record.diffuse = m.color;
                record
            })
            .collect()
    }
}
