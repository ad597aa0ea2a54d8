//! Byte-unit helpers for reporting sizes.

#![allow(non_upper_case_globals)]

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

pub const KB: u64 = 1000;
pub const KiB: u64 = 1 << 10;
pub const MB: u64 = 1000 * 1000;
pub const MiB: u64 = 1 << 20;
pub const GB: u64 = 1000 * 1000 * 1000;
pub const GiB: u64 = 1 << 30;

/// Express `bytes` as a (fractional) number of `unit`s, e.g. `convert(n, KiB)`.
pub fn convert(bytes: u64, unit: u64) -> f64 {
    bytes as f64 / unit as f64
}

/// Number of `W`-sized words needed to hold `bits` bits.
///
/// ```rust
/// assert_eq!(pod_visit::words_for::<u64>(65), 2);
/// assert_eq!(pod_visit::words_for::<u8>(8), 1);
/// ```
pub fn words_for<W>(bits: u64) -> u64 {
    let word_bits = size_of::<W>() as u64 * 8;
    bits.div_ceil(word_bits)
}

/// Size in bytes of the file at `path`.
pub fn file_size<P: AsRef<Path>>(path: P) -> Result<u64> {
    let path = path.as_ref();
    let metadata = fs::metadata(path).map_err(|e| Error::open(path, e))?;
    Ok(metadata.len())
}

/// The unit a size report renders byte counts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteUnit {
    #[default]
    Bytes,
    KB,
    KiB,
    MB,
    MiB,
    GB,
    GiB,
}

impl ByteUnit {
    /// Bytes per unit.
    pub fn factor(self) -> u64 {
        match self {
            ByteUnit::Bytes => 1,
            ByteUnit::KB => KB,
            ByteUnit::KiB => KiB,
            ByteUnit::MB => MB,
            ByteUnit::MiB => MiB,
            ByteUnit::GB => GB,
            ByteUnit::GiB => GiB,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            ByteUnit::Bytes => "bytes",
            ByteUnit::KB => "KB",
            ByteUnit::KiB => "KiB",
            ByteUnit::MB => "MB",
            ByteUnit::MiB => "MiB",
            ByteUnit::GB => "GB",
            ByteUnit::GiB => "GiB",
        }
    }

    /// Render `bytes` in this unit. Whole bytes print as integers.
    pub fn format(self, bytes: u64) -> String {
        match self {
            ByteUnit::Bytes => format!("{} bytes", bytes),
            unit => format!("{:.3} {}", convert(bytes, unit.factor()), unit.suffix()),
        }
    }
}
