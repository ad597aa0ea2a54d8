//! Static classification of values into plain data, composites and sequences.
//!
//! Plain data is anything implementing [`bytemuck::Pod`]: fixed size, no
//! padding, no pointers, valid for every bit pattern. Only plain data is ever
//! copied as raw bytes, and every raw-byte path in this crate is bounded by
//! `T: Pod`, so asking for raw-copy treatment of anything else is a compile
//! error.
//!
//! | Rust type                       | Classified as      | Encoding                          |
//! |---------------------------------|--------------------|-----------------------------------|
//! | primitive integers, `f32`, `f64`| plain data         | raw bytes                         |
//! | `[T; N]` with `T: Pod`          | plain data         | raw bytes                         |
//! | type registered by [`plain_data!`] | plain data      | raw bytes                         |
//! | `T: Visit`                      | composite          | fields, in order                  |
//! | `Vec<T>`, `T` plain             | plain sequence     | `u64` count + one bulk copy       |
//! | `Vec<T>`, `T` composite or `Vec`| sequence           | `u64` count + each element        |
//!
//! [`plain_data!`]: crate::plain_data

use bytemuck::Pod;

use crate::error::Result;
use crate::visit::{Visit, Visitor};

/// Anything that can appear as a field of a composite.
pub trait Field {
    fn accept<V: Visitor>(&mut self, name: &str, visitor: &mut V) -> Result<()>;
}

/// Anything that can be the element type of a `Vec` field.
///
/// The implementation picks, at compile time, whether a `Vec<Self>` is
/// handled as a packed plain-data run or element by element.
pub trait Element: Field + Sized {
    fn accept_seq<V: Visitor>(seq: &mut Vec<Self>, name: &str, visitor: &mut V) -> Result<()>;
}

/// Register one or more [`Pod`] types as plain-data fields and sequence elements.
///
/// User records deriving `Pod` are not picked up automatically; registering
/// them here makes `T` and `Vec<T>` usable as fields. A type that is not
/// `Pod` fails to compile.
///
/// ```rust
/// use bytemuck::{Pod, Zeroable};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
/// #[repr(C)]
/// struct Point {
///     x: f32,
///     y: f32,
/// }
///
/// pod_visit::plain_data!(Point);
/// ```
#[macro_export]
macro_rules! plain_data {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Field for $ty {
                fn accept<V: $crate::Visitor>(
                    &mut self,
                    name: &str,
                    visitor: &mut V,
                ) -> $crate::Result<()> {
                    visitor.visit_plain(name, self)
                }
            }

            impl $crate::Element for $ty {
                fn accept_seq<V: $crate::Visitor>(
                    seq: &mut ::std::vec::Vec<Self>,
                    name: &str,
                    visitor: &mut V,
                ) -> $crate::Result<()> {
                    visitor.visit_plain_seq(name, seq)
                }
            }
        )+
    };
}

plain_data!(u8, i8, u16, i16, u32, i32, u64, i64, u128, i128, usize, isize, f32, f64);

impl<T: Pod, const N: usize> Field for [T; N] {
    fn accept<V: Visitor>(&mut self, name: &str, visitor: &mut V) -> Result<()> {
        visitor.visit_plain(name, self)
    }
}

impl<T: Pod, const N: usize> Element for [T; N] {
    fn accept_seq<V: Visitor>(seq: &mut Vec<Self>, name: &str, visitor: &mut V) -> Result<()> {
        visitor.visit_plain_seq(name, seq)
    }
}

impl<T: Visit> Field for T {
    fn accept<V: Visitor>(&mut self, name: &str, visitor: &mut V) -> Result<()> {
        visitor.visit_composite(name, self)
    }
}

impl<T: Visit + Default> Element for T {
    fn accept_seq<V: Visitor>(seq: &mut Vec<Self>, name: &str, visitor: &mut V) -> Result<()> {
        visitor.visit_seq(name, seq)
    }
}

impl<T: Element> Field for Vec<T> {
    fn accept<V: Visitor>(&mut self, name: &str, visitor: &mut V) -> Result<()> {
        T::accept_seq(self, name, visitor)
    }
}

// Nested sequences are never packed: each inner `Vec` carries its own count.
impl<T: Element> Element for Vec<T> {
    fn accept_seq<V: Visitor>(seq: &mut Vec<Self>, name: &str, visitor: &mut V) -> Result<()> {
        visitor.visit_seq(name, seq)
    }
}
