//! Byte-stream writer.
//!
//! The [`Serializer`] is generic over any `W: std::io::Write`, enabling both
//! in-memory serialization (`to_bytes`) and streaming serialization
//! (`to_writer`, `save`).
//!
//! ## Wire format summary
//! - All values are native-endian, copied straight from memory
//! - Plain-data scalars: `size_of::<T>()` bytes, no padding normalization
//! - Sequences: 8-byte `u64` count prefix + elements
//! - Plain-data sequences: count + one contiguous copy of all elements
//! - Composites: fields encoded consecutively, no tags or length prefix

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use bytemuck::Pod;
use log::{debug, trace};

use crate::classify::Field;
use crate::error::{Error, Result};
use crate::visit::{Visit, Visitor, private};

// ── Public entry points ────────────────────────────────────────────────────

/// Serialize `value` into the file at `path`, creating or truncating it.
///
/// Returns the number of bytes written.
pub fn save<T: Visit, P: AsRef<Path>>(value: &mut T, path: P) -> Result<u64> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| Error::open(path, e))?;
    let mut ser = Serializer::new(BufWriter::new(file));
    value.visit(&mut ser)?;
    ser.flush()?;
    debug!("saved {} bytes to {}", ser.bytes_written(), path.display());
    Ok(ser.bytes_written())
}

/// Serialize `value` into a freshly allocated `Vec<u8>`.
pub fn to_bytes<T: Visit>(value: &mut T) -> Result<Vec<u8>> {
    let mut ser = Serializer::new(Vec::new());
    value.visit(&mut ser)?;
    Ok(ser.into_writer())
}

/// Serialize `value` directly into `writer`, returning the bytes written.
///
/// The writer is not flushed; wrap it in a `BufWriter` for file or socket
/// sinks and flush it afterwards.
pub fn to_writer<W: Write, T: Visit>(mut writer: W, value: &mut T) -> Result<u64> {
    let mut ser = Serializer::new(&mut writer);
    value.visit(&mut ser)?;
    Ok(ser.bytes_written())
}

// ── Serializer ─────────────────────────────────────────────────────────────

/// The byte-stream writer. Generic over any `W: Write`.
///
/// ```rust
/// use pod_visit::{Serializer, Visitor};
///
/// let mut buf = Vec::new();
/// let mut ser = Serializer::new(&mut buf);
/// ser.field("answer", &mut 42u32).unwrap();
/// assert_eq!(ser.bytes_written(), 4);
/// assert_eq!(buf, 42u32.to_ne_bytes());
/// ```
pub struct Serializer<W: Write> {
    writer: W,
    written: u64,
}

impl<W: Write> Serializer<W> {
    /// Create a new serializer that writes into `writer`.
    pub fn new(writer: W) -> Self {
        Serializer { writer, written: 0 }
    }

    /// Number of bytes emitted so far.
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        Ok(self.writer.flush()?)
    }

    /// Consume the serializer and return the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    // ── Internal helpers ───────────────────────────────────────────────────

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        self.written += bytes.len() as u64;
        Ok(())
    }

    fn write_len(&mut self, len: usize) -> Result<()> {
        self.write_all(&(len as u64).to_ne_bytes())
    }
}

impl<W: Write> private::Sealed for Serializer<W> {}

impl<W: Write> Visitor for Serializer<W> {
    fn visit_plain<T: Pod>(&mut self, _name: &str, value: &mut T) -> Result<()> {
        self.write_all(bytemuck::bytes_of(value))
    }

    fn visit_plain_seq<T: Pod>(&mut self, name: &str, seq: &mut Vec<T>) -> Result<()> {
        trace!("writing {} packed elements of `{}`", seq.len(), name);
        self.write_len(seq.len())?;
        if size_of::<T>() == 0 {
            return Ok(());
        }
        self.write_all(bytemuck::cast_slice(seq.as_slice()))
    }

    fn visit_seq<T: Field + Default>(&mut self, name: &str, seq: &mut Vec<T>) -> Result<()> {
        trace!("writing {} elements of `{}`", seq.len(), name);
        self.write_len(seq.len())?;
        for element in seq.iter_mut() {
            element.accept(name, self)?;
        }
        Ok(())
    }

    fn visit_composite<T: Visit>(&mut self, _name: &str, value: &mut T) -> Result<()> {
        value.visit(self)
    }
}
