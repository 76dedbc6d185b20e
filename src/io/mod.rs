//! Mesh file I/O.
//!
//! This module provides readers and writers for the formats the converter
//! moves between, plus the big-endian codec underneath the solid format.
//!
//! # Supported Formats
//!
//! | Format | Extension | Load | Save | Notes |
//! |--------|-----------|------|------|-------|
//! | Solid | `.solid` | ✓ | ✓ | Big-endian binary, colored triangles |
//! | Wavefront OBJ | `.obj` | ✓ | ✓ | Triangles and quads, `usemtl` materials |
//! | Wavefront MTL | `.mtl` | ✓ | ✓ | Loaded through the OBJ's `mtllib` |
//!
//! # Usage
//!
//! The easiest way to convert is with automatic format detection:
//!
//! ```no_run
//! use solidmesh::convert::ConvertOptions;
//! use solidmesh::io::convert_file;
//!
//! // Writes model.obj and model.mtl
//! convert_file("model.solid", "model.obj", &ConvertOptions::default()).unwrap();
//!
//! // And back
//! convert_file("model.obj", "model.solid", &ConvertOptions::default()).unwrap();
//! ```
//!
//! You can also use format-specific functions:
//!
//! ```no_run
//! use solidmesh::io::{obj, solid};
//!
//! let mesh = solid::load("model.solid").unwrap();
//! solid::save(&mesh, "copy.solid").unwrap();
//!
//! let obj_mesh = obj::load("model.obj").unwrap();
//! ```

pub mod binary;
pub mod mtl;
pub mod obj;
pub mod solid;
mod text;

use std::fmt;
use std::path::Path;

use crate::convert::{obj_to_solid_file, solid_to_obj_files, ConvertOptions};
use crate::error::{MeshError, Result};

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Binary solid format.
    Solid,
    /// Wavefront OBJ format.
    Obj,
}

impl Format {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_lowercase().as_str() {
            "solid" => Some(Format::Solid),
            "obj" => Some(Format::Obj),
            _ => None,
        }
    }

    /// Detect format from file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Format> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Format::from_extension)
    }

    fn require<P: AsRef<Path>>(path: P) -> Result<Format> {
        let path = path.as_ref();
        Format::from_path(path).ok_or_else(|| MeshError::UnsupportedFormat {
            extension: path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("(none)")
                .to_string(),
        })
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Solid => write!(f, "solid"),
            Format::Obj => write!(f, "obj"),
        }
    }
}

/// Convert `input` to `output`, picking the direction from the extensions.
///
/// Solid → OBJ also writes an MTL file beside the OBJ. Converting a format
/// to itself is rejected.
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: &ConvertOptions,
) -> Result<()> {
    let (input, output) = (input.as_ref(), output.as_ref());
    match (Format::require(input)?, Format::require(output)?) {
        (Format::Solid, Format::Obj) => solid_to_obj_files(input, output, options).map(|_| ()),
        (Format::Obj, Format::Solid) => obj_to_solid_file(input, output, options),
        (from, to) => Err(MeshError::UnsupportedConversion {
            from: from.to_string(),
            to: to.to_string(),
        }),
    }
}
