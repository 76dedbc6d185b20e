//! Solid mesh format support.
//!
//! The solid format has no magic number or version. Its layout, all
//! big-endian:
//!
//! ```text
//! i16 vertex_count
//! i16 triangle_count
//! vertex_count   x { f32 x, f32 y, f32 z }
//! triangle_count x { i16 v0, i16 v1, i16 v2, i16 padding, f32 r, f32 g, f32 b }
//! ```
//!
//! The padding field is read and dropped, and always written as zero.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use nalgebra::Point3;

use super::binary::{BinaryReader, BinaryWriter};
use crate::error::{MeshError, Result};
use crate::mesh::{Rgb, SolidMesh, SolidTriangle};

/// Size in bytes of one vertex record.
pub const VERTEX_RECORD_SIZE: usize = 12;

/// Size in bytes of one triangle record.
pub const TRIANGLE_RECORD_SIZE: usize = 20;

/// Size in bytes of the count header.
pub const HEADER_SIZE: usize = 4;

/// Read a solid mesh from a byte stream.
///
/// The whole mesh is read before anything is returned; a stream that ends
/// early fails with [`MeshError::TruncatedInput`].
pub fn read<R: Read>(reader: R, label: &str) -> Result<SolidMesh> {
    let mut reader = BinaryReader::new(reader);

    let vertex_count = read_count(&mut reader, "vertices")?;
    let triangle_count = read_count(&mut reader, "triangles")?;
    log::debug!(
        "{}: {} vertices, {} triangles",
        label,
        vertex_count,
        triangle_count
    );

    let mut mesh = SolidMesh::with_capacity(label, vertex_count, triangle_count);

    let mut xyz = [0.0f32; 3];
    for _ in 0..vertex_count {
        reader.read_f32_into(&mut xyz)?;
        mesh.vertices.push(Point3::new(xyz[0], xyz[1], xyz[2]));
    }

    let mut indices = [0i16; 3];
    let mut rgb = [0.0f32; 3];
    for _ in 0..triangle_count {
        reader.read_i16_into(&mut indices)?;
        let _padding = reader.read_i16()?;
        reader.read_f32_into(&mut rgb)?;
        mesh.triangles.push(SolidTriangle::new(indices, Rgb::from(rgb)));
    }

    if let Err(e) = mesh.validate() {
        log::warn!("{}: {}", label, e);
    }

    Ok(mesh)
}

fn read_count<R: Read>(reader: &mut BinaryReader<R>, what: &'static str) -> Result<usize> {
    let count = reader.read_i16()?;
    usize::try_from(count).map_err(|_| MeshError::NegativeCount { what, count })
}

/// Decode a solid mesh held in memory.
pub fn decode(bytes: &[u8], label: &str) -> Result<SolidMesh> {
    read(bytes, label)
}

/// Load a solid mesh from a file. The path becomes the mesh label.
///
/// # Example
///
/// ```no_run
/// use solidmesh::io::solid;
///
/// let mesh = solid::load("gun.solid").unwrap();
/// println!("{} triangles", mesh.triangle_count());
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<SolidMesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| MeshError::load(path, e))?;
    read(BufReader::new(file), &path.to_string_lossy())
}

/// Write a solid mesh to a byte sink.
///
/// Fails with [`MeshError::CountOverflow`] before writing anything if either
/// count does not fit the 16-bit header.
pub fn write<W: Write>(mesh: &SolidMesh, writer: W) -> Result<()> {
    let vertex_count = header_count(mesh.vertex_count(), "vertices")?;
    let triangle_count = header_count(mesh.triangle_count(), "triangles")?;

    let mut writer = BinaryWriter::new(writer);
    writer.write_i16(vertex_count)?;
    writer.write_i16(triangle_count)?;

    for v in &mesh.vertices {
        writer.write_f32_all(&[v.x, v.y, v.z])?;
    }

    for tri in &mesh.triangles {
        writer.write_i16_all(&tri.vertices)?;
        writer.write_i16(0)?;
        writer.write_f32_all(&[tri.color.r, tri.color.g, tri.color.b])?;
    }

    writer.flush()
}

fn header_count(count: usize, what: &'static str) -> Result<i16> {
    i16::try_from(count).map_err(|_| MeshError::CountOverflow { what, count })
}

/// Encode a solid mesh into a new byte buffer.
pub fn encode(mesh: &SolidMesh) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(
        HEADER_SIZE
            + mesh.vertex_count() * VERTEX_RECORD_SIZE
            + mesh.triangle_count() * TRIANGLE_RECORD_SIZE,
    );
    write(mesh, &mut bytes)?;
    Ok(bytes)
}

/// Save a solid mesh to a file, overwriting it.
///
/// # Example
///
/// ```no_run
/// use solidmesh::io::solid;
/// use solidmesh::mesh::SolidMesh;
///
/// let mesh = SolidMesh::new("empty");
/// solid::save(&mesh, "empty.solid").unwrap();
/// ```
pub fn save<P: AsRef<Path>>(mesh: &SolidMesh, path: P) -> Result<()> {
    let bytes = encode(mesh)?;
    save_bytes(&bytes, path)
}

/// Write already-encoded solid bytes to a file, overwriting it.
pub fn save_bytes<P: AsRef<Path>>(bytes: &[u8], path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| MeshError::save(path, e))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(bytes)?;
    writer.flush()?;
    Ok(())
}
