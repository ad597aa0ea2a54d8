//! # pod-visit
//!
//! Visitor-driven binary serialization and size accounting for structures
//! built from plain data, nested aggregates and vectors.
//!
//! ## Overview
//!
//! A composite type implements [`Visit`] once, presenting its fields in
//! declared order. The same traversal then drives three visitors:
//!
//! - [`Serializer`] writes the structure as raw bytes ([`save`], [`to_bytes`])
//! - [`Deserializer`] reads it back in the same order ([`load`], [`from_bytes`])
//! - [`Sizer`] computes the encoded size and a per-field breakdown
//!   ([`account`], [`print_size`])
//!
//! Whether a field is copied as raw bytes or traversed is decided at compile
//! time by the traits in [`classify`]; raw copies are bounded by
//! [`bytemuck::Pod`].
//!
//! ## Wire format
//!
//! | Rust type              | Encoding |
//! |------------------------|----------|
//! | plain data (`Pod`)     | `size_of::<T>()` raw native-endian bytes |
//! | `Vec<T>`, `T` plain    | 8-byte `u64` count + packed elements |
//! | `Vec<T>`, `T` composite| 8-byte `u64` count + each element encoded in turn |
//! | `Vec<Vec<T>>`          | 8-byte `u64` count + each inner vector encoded in turn |
//! | composite (`Visit`)    | fields encoded consecutively (no tags, no length prefix) |
//!
//! The format has no versioning and assumes reader and writer share an
//! architecture.
//!
//! ## Example
//!
//! ```rust
//! use pod_visit::{account, from_bytes, to_bytes, visit_fields, Result, Visit, Visitor};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Record {
//!     x: i32,
//!     y: i32,
//!     z: u64,
//!     data1: Vec<i32>,
//!     data2: Vec<f64>,
//! }
//!
//! impl Visit for Record {
//!     fn visit<V: Visitor>(&mut self, visitor: &mut V) -> Result<()> {
//!         visit_fields!(visitor, self, x, y, z, data1, data2)
//!     }
//! }
//!
//! let mut record = Record {
//!     x: 12,
//!     y: 90,
//!     z: 723725,
//!     data1: vec![0, 1, 2],
//!     data2: vec![3.45, 4.45, 5.45],
//! };
//!
//! let bytes = to_bytes(&mut record).unwrap();
//! assert_eq!(bytes.len(), 68); // 4 + 4 + 8 + (8 + 3*4) + (8 + 3*8)
//! assert_eq!(account(&mut record).unwrap().bytes, 68);
//!
//! let decoded: Record = from_bytes(&bytes).unwrap();
//! assert_eq!(record, decoded);
//! ```

pub mod classify;
pub mod de;
pub mod error;
pub mod ser;
pub mod size;
pub mod units;
pub mod visit;

pub use classify::{Element, Field};
pub use de::{Deserializer, from_bytes, from_bytes_partial, from_reader, load, load_value};
pub use error::{Error, Result};
pub use ser::{Serializer, save, to_bytes, to_writer};
pub use size::{
    Report, ReportStyle, SizeNode, Sizer, account, plain_bytes, plain_seq_bytes, print_size,
    print_size_with,
};
pub use units::{ByteUnit, GB, GiB, KB, KiB, MB, MiB, convert, file_size, words_for};
pub use visit::{Visit, Visitor};

pub use bytemuck::{Pod, Zeroable};

/// Width of the element-count prefix written before every sequence.
pub const LENGTH_PREFIX_BYTES: u64 = size_of::<u64>() as u64;
