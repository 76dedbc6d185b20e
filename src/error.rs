//! Error types for solidmesh.
//!
//! This module defines all error types used throughout the library.
//! Malformed OBJ face lines and material names that resolve to nothing are
//! deliberately absent: both are recovered from inside the parsers.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur while loading, converting or saving meshes.
#[derive(Error, Debug)]
pub enum MeshError {
    /// A binary stream ended in the middle of a record.
    #[error("input truncated at byte {offset}: needed {needed} more bytes")]
    TruncatedInput {
        /// Byte offset where the failed read started.
        offset: u64,
        /// Number of bytes the read required.
        needed: usize,
    },

    /// A triangle references a vertex outside the mesh.
    #[error("triangle {triangle} references vertex {vertex}, mesh has {vertex_count} vertices")]
    InvalidVertexIndex {
        /// The triangle index.
        triangle: usize,
        /// The offending vertex index.
        vertex: i16,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// A count does not fit the signed 16-bit header field of the solid format.
    #[error("{count} {what} cannot be stored in a solid mesh (maximum {max})", max = i16::MAX)]
    CountOverflow {
        /// What was being counted.
        what: &'static str,
        /// The count that overflowed.
        count: usize,
    },

    /// A solid header declares a negative element count.
    #[error("solid header declares {count} {what}")]
    NegativeCount {
        /// What was being counted.
        what: &'static str,
        /// The count as stored.
        count: i16,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error loading mesh from file.
    #[error("failed to load mesh from {path}: {message}")]
    LoadError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Error saving mesh to file.
    #[error("failed to save mesh to {path}: {message}")]
    SaveError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Unsupported file format.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat {
        /// The file extension.
        extension: String,
    },

    /// No conversion exists between the two formats.
    #[error("cannot convert {from} to {to}")]
    UnsupportedConversion {
        /// Input format.
        from: String,
        /// Output format.
        to: String,
    },
}

impl MeshError {
    /// Wrap an I/O failure on `path` as a [`MeshError::LoadError`].
    pub fn load<P: Into<PathBuf>>(path: P, err: std::io::Error) -> Self {
        MeshError::LoadError {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Wrap an I/O failure on `path` as a [`MeshError::SaveError`].
    pub fn save<P: Into<PathBuf>>(path: P, err: std::io::Error) -> Self {
        MeshError::SaveError {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Whether this error reports a missing or inaccessible file.
    pub fn is_unopenable(&self) -> bool {
        matches!(self, MeshError::LoadError { .. } | MeshError::SaveError { .. })
    }
}
