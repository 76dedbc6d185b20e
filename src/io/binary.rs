//! Big-endian fixed-width codec.
//!
//! The solid format stores 16-bit and 32-bit signed integers big-endian with
//! no padding between values. A 32-bit float travels as the bit pattern of
//! its IEEE-754 representation, encoded with the 32-bit integer routine.
//!
//! Reads are all-or-nothing per value: when the stream runs out mid-value the
//! read fails with [`MeshError::TruncatedInput`] and the destination slot is
//! left untouched.

use std::io::{ErrorKind, Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{MeshError, Result};

/// Reads big-endian values from a byte stream, tracking the byte offset.
#[derive(Debug)]
pub struct BinaryReader<R> {
    inner: R,
    position: u64,
}

impl<R: Read> BinaryReader<R> {
    /// Wrap a reader. Offsets in errors are relative to this point.
    pub fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    /// Number of bytes consumed so far.
    #[inline]
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Recover the wrapped reader.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn track<T>(&mut self, needed: usize, result: std::io::Result<T>) -> Result<T> {
        match result {
            Ok(value) => {
                self.position += needed as u64;
                Ok(value)
            }
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(MeshError::TruncatedInput {
                offset: self.position,
                needed,
            }),
            Err(e) => Err(MeshError::Io(e)),
        }
    }

    /// Read one 16-bit signed integer.
    pub fn read_i16(&mut self) -> Result<i16> {
        let result = self.inner.read_i16::<BigEndian>();
        self.track(2, result)
    }

    /// Read one 32-bit signed integer.
    pub fn read_i32(&mut self) -> Result<i32> {
        let result = self.inner.read_i32::<BigEndian>();
        self.track(4, result)
    }

    /// Read one 32-bit float from its big-endian bit pattern.
    pub fn read_f32(&mut self) -> Result<f32> {
        self.read_i32().map(|bits| f32::from_bits(bits as u32))
    }

    /// Fill `out` with consecutive 16-bit integers.
    pub fn read_i16_into(&mut self, out: &mut [i16]) -> Result<()> {
        for slot in out {
            *slot = self.read_i16()?;
        }
        Ok(())
    }

    /// Fill `out` with consecutive 32-bit integers.
    pub fn read_i32_into(&mut self, out: &mut [i32]) -> Result<()> {
        for slot in out {
            *slot = self.read_i32()?;
        }
        Ok(())
    }

    /// Fill `out` with consecutive 32-bit floats.
    pub fn read_f32_into(&mut self, out: &mut [f32]) -> Result<()> {
        for slot in out {
            *slot = self.read_f32()?;
        }
        Ok(())
    }
}

/// Writes big-endian values to a byte sink.
#[derive(Debug)]
pub struct BinaryWriter<W> {
    inner: W,
}

impl<W: Write> BinaryWriter<W> {
    /// Wrap a writer.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Recover the wrapped writer.
    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Write one 16-bit signed integer.
    pub fn write_i16(&mut self, value: i16) -> Result<()> {
        self.inner.write_i16::<BigEndian>(value)?;
        Ok(())
    }

    /// Write one 32-bit signed integer.
    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.inner.write_i32::<BigEndian>(value)?;
        Ok(())
    }

    /// Write one 32-bit float as its big-endian bit pattern.
    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.write_i32(value.to_bits() as i32)
    }

    /// Write a run of 16-bit integers.
    pub fn write_i16_all(&mut self, values: &[i16]) -> Result<()> {
        values.iter().try_for_each(|&v| self.write_i16(v))
    }

    /// Write a run of 32-bit integers.
    pub fn write_i32_all(&mut self, values: &[i32]) -> Result<()> {
        values.iter().try_for_each(|&v| self.write_i32(v))
    }

    /// Write a run of 32-bit floats.
    pub fn write_f32_all(&mut self, values: &[f32]) -> Result<()> {
        values.iter().try_for_each(|&v| self.write_f32(v))
    }

    /// Flush the underlying sink.
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }
}
