//! The traversal entry point shared by every visitor.
//!
//! A composite type implements [`Visit`] once. The same implementation drives
//! writing ([`Serializer`](crate::Serializer)), reading
//! ([`Deserializer`](crate::Deserializer)) and size accounting
//! ([`Sizer`](crate::Sizer)), so field order can never drift between save and
//! load.
//!
//! ```rust
//! use pod_visit::{Result, Visit, Visitor};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Sample {
//!     id: u32,
//!     readings: Vec<f64>,
//! }
//!
//! impl Visit for Sample {
//!     fn visit<V: Visitor>(&mut self, visitor: &mut V) -> Result<()> {
//!         visitor.field("id", &mut self.id)?;
//!         visitor.field("readings", &mut self.readings)
//!     }
//! }
//! ```

use bytemuck::Pod;

use crate::classify::Field;
use crate::error::Result;

pub(crate) mod private {
    pub trait Sealed {}
}

/// A composite value: presents its fields, in declared order, to a visitor.
///
/// Implementations must call [`Visitor::field`] for the same fields in the
/// same order on every invocation. The method takes `&mut self` because the
/// reader fills fields in place; writers and the size accountant never mutate.
pub trait Visit {
    fn visit<V: Visitor>(&mut self, visitor: &mut V) -> Result<()>;
}

/// One traversal kind. Sealed: the only visitors are the byte-stream writer,
/// the byte-stream reader and the size accountant.
///
/// Field code should go through [`Visitor::field`]; the `visit_*` callbacks
/// are dispatched to by the [`Field`] and [`Element`](crate::Element)
/// implementations, which decide statically which one applies.
pub trait Visitor: Sized + private::Sealed {
    /// A single plain-data value.
    fn visit_plain<T: Pod>(&mut self, name: &str, value: &mut T) -> Result<()>;

    /// A sequence of plain-data values, packed with no per-element framing.
    fn visit_plain_seq<T: Pod>(&mut self, name: &str, seq: &mut Vec<T>) -> Result<()>;

    /// A sequence whose elements need their own traversal (composites or
    /// nested sequences).
    fn visit_seq<T: Field + Default>(&mut self, name: &str, seq: &mut Vec<T>) -> Result<()>;

    /// A nested composite value.
    fn visit_composite<T: Visit>(&mut self, name: &str, value: &mut T) -> Result<()>;

    /// Present one field to this visitor.
    fn field<F: Field>(&mut self, name: &str, value: &mut F) -> Result<()> {
        value.accept(name, self)
    }
}

/// Present several fields of `$this` to `$visitor`, labelled by their names.
///
/// Expands to a sequence of [`Visitor::field`] calls and evaluates to
/// `Ok(())`, so it can be the whole body of [`Visit::visit`].
///
/// ```rust
/// use pod_visit::{visit_fields, Result, Visit, Visitor};
///
/// #[derive(Default)]
/// struct Header {
///     magic: u32,
///     offsets: Vec<u64>,
/// }
///
/// impl Visit for Header {
///     fn visit<V: Visitor>(&mut self, visitor: &mut V) -> Result<()> {
///         visit_fields!(visitor, self, magic, offsets)
///     }
/// }
/// ```
#[macro_export]
macro_rules! visit_fields {
    ($visitor:expr, $this:expr, $($field:ident),+ $(,)?) => {{
        $( $crate::Visitor::field(&mut *$visitor, stringify!($field), &mut $this.$field)?; )+
        $crate::Result::Ok(())
    }};
}
