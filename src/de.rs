//! Byte-stream reader.
//!
//! Mirrors the [`Serializer`](crate::Serializer) operation for operation,
//! consuming bytes in the same order they were produced.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use bytemuck::Pod;
use log::{debug, trace};

use crate::classify::Field;
use crate::error::{Error, Result};
use crate::visit::{Visit, Visitor, private};

/// Upper bound on a single allocation step when the input length is unknown.
const READ_CHUNK_BYTES: usize = 64 * 1024;

// ── Public entry points ────────────────────────────────────────────────────

/// Deserialize the file at `path` into `value`, returning the bytes read.
///
/// `value` is filled in place. If an error is returned its contents are
/// unspecified and it should be discarded; use [`load_value`] to get either
/// a complete value or nothing.
pub fn load<T: Visit, P: AsRef<Path>>(value: &mut T, path: P) -> Result<u64> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::open(path, e))?;
    let len = file.metadata()?.len();
    let mut de = Deserializer::with_limit(BufReader::new(file), len);
    value.visit(&mut de)?;
    debug!("loaded {} bytes from {}", de.bytes_read(), path.display());
    Ok(de.bytes_read())
}

/// Deserialize a fresh `T` from the file at `path`.
pub fn load_value<T: Visit + Default, P: AsRef<Path>>(path: P) -> Result<T> {
    let mut value = T::default();
    load(&mut value, path)?;
    Ok(value)
}

/// Deserialize a fresh `T` from `input`. Trailing bytes are ignored.
pub fn from_bytes<T: Visit + Default>(input: &[u8]) -> Result<T> {
    from_bytes_partial(input).map(|(value, _)| value)
}

/// Deserialize a fresh `T` from `input`, also returning the unconsumed bytes.
pub fn from_bytes_partial<T: Visit + Default>(input: &[u8]) -> Result<(T, &[u8])> {
    let mut de = Deserializer::with_limit(input, input.len() as u64);
    let mut value = T::default();
    value.visit(&mut de)?;
    let consumed = de.bytes_read() as usize;
    Ok((value, &input[consumed..]))
}

/// Deserialize a fresh `T` from any reader.
///
/// The input length is unknown here, so sequence payloads are allocated in
/// bounded steps as bytes actually arrive.
pub fn from_reader<R: Read, T: Visit + Default>(reader: R) -> Result<T> {
    let mut de = Deserializer::new(reader);
    let mut value = T::default();
    value.visit(&mut de)?;
    Ok(value)
}

// ── Deserializer ───────────────────────────────────────────────────────────

/// The byte-stream reader. Reads from any `R: Read`, tracking its position.
pub struct Deserializer<R: Read> {
    reader: R,
    pos: u64,
    limit: Option<u64>,
}

impl<R: Read> Deserializer<R> {
    /// Create a reader over a source of unknown length.
    pub fn new(reader: R) -> Self {
        Deserializer {
            reader,
            pos: 0,
            limit: None,
        }
    }

    /// Create a reader over a source known to hold exactly `len` bytes.
    ///
    /// Sequence counts that claim more data than remains are rejected before
    /// anything is allocated.
    pub fn with_limit(reader: R, len: u64) -> Self {
        Deserializer {
            reader,
            pos: 0,
            limit: Some(len),
        }
    }

    /// Number of bytes consumed so far.
    pub fn bytes_read(&self) -> u64 {
        self.pos
    }

    /// Consume the deserializer and return the inner reader.
    pub fn into_reader(self) -> R {
        self.reader
    }

    // ── Internal helpers ───────────────────────────────────────────────────

    /// Fill `buf` completely. Fails with UnexpectedEof.
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        self.reader.read_exact(buf).map_err(Error::from_read)?;
        self.pos += buf.len() as u64;
        Ok(())
    }

    fn read_len(&mut self) -> Result<u64> {
        let mut bytes = [0u8; 8];
        self.read_exact(&mut bytes)?;
        Ok(u64::from_ne_bytes(bytes))
    }

    /// Fail early if fewer than `needed` bytes remain in a bounded source.
    fn ensure_available(&self, needed: u64) -> Result<()> {
        match self.limit {
            Some(limit) if limit.saturating_sub(self.pos) < needed => Err(Error::UnexpectedEof),
            _ => Ok(()),
        }
    }
}

impl<R: Read> private::Sealed for Deserializer<R> {}

impl<R: Read> Visitor for Deserializer<R> {
    fn visit_plain<T: Pod>(&mut self, _name: &str, value: &mut T) -> Result<()> {
        self.read_exact(bytemuck::bytes_of_mut(value))
    }

    fn visit_plain_seq<T: Pod>(&mut self, name: &str, seq: &mut Vec<T>) -> Result<()> {
        let count = self.read_len()?;
        let elem_size = size_of::<T>();
        let overflow = || Error::LengthOverflow { count, elem_size };
        let total = count.checked_mul(elem_size as u64).ok_or_else(overflow)?;
        let len = usize::try_from(count).map_err(|_| overflow())?;
        self.ensure_available(total)?;
        trace!("reading {} packed elements of `{}`", len, name);

        seq.clear();
        if elem_size == 0 {
            seq.resize(len, T::zeroed());
            return Ok(());
        }

        let step = match self.limit {
            Some(_) => len,
            None => (READ_CHUNK_BYTES / elem_size).max(1),
        };
        while seq.len() < len {
            let start = seq.len();
            let take = step.min(len - start);
            seq.try_reserve_exact(take)?;
            seq.resize(start + take, T::zeroed());
            self.read_exact(bytemuck::cast_slice_mut(&mut seq[start..]))?;
        }
        Ok(())
    }

    fn visit_seq<T: Field + Default>(&mut self, name: &str, seq: &mut Vec<T>) -> Result<()> {
        let count = self.read_len()?;
        let len = usize::try_from(count).map_err(|_| Error::LengthOverflow {
            count,
            elem_size: size_of::<T>(),
        })?;
        trace!("reading {} elements of `{}`", len, name);

        seq.clear();
        // The count is untrusted: cap the up-front reservation and grow as
        // elements actually decode.
        seq.try_reserve(len.min(READ_CHUNK_BYTES / size_of::<T>().max(1)))?;
        for _ in 0..len {
            let mut element = T::default();
            element.accept(name, self)?;
            seq.try_reserve(1)?;
            seq.push(element);
        }
        Ok(())
    }

    fn visit_composite<T: Visit>(&mut self, _name: &str, value: &mut T) -> Result<()> {
        value.visit(self)
    }
}
