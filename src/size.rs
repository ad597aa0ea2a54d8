//! Size accountant.
//!
//! The [`Sizer`] walks a structure exactly like the
//! [`Serializer`](crate::Serializer) but performs no I/O. Instead it builds a
//! [`SizeNode`] tree whose root total equals the number of bytes `save` would
//! write, with a per-field, per-element breakdown for diagnostics.

use std::any::type_name;
use std::fmt;
use std::io::Write;

use bytemuck::Pod;
use log::debug;
use serde::Serialize;

use crate::LENGTH_PREFIX_BYTES;
use crate::classify::Field;
use crate::error::Result;
use crate::units::ByteUnit;
use crate::visit::{Visit, Visitor, private};

// ── Public entry points ────────────────────────────────────────────────────

/// Build the size tree of `value`. The root is labelled with the type name.
pub fn account<T: Visit>(value: &mut T) -> Result<SizeNode> {
    let mut sizer = Sizer::new(type_name::<T>());
    value.visit(&mut sizer)?;
    let root = sizer.finish();
    debug!("accounted {} bytes for {}", root.bytes, root.label);
    Ok(root)
}

/// Write the size report of `value` to `sink` and return the total byte count.
pub fn print_size<T: Visit, W: Write>(value: &mut T, sink: W) -> Result<u64> {
    print_size_with(value, sink, ReportStyle::default())
}

/// [`print_size`] with an explicit [`ReportStyle`].
pub fn print_size_with<T: Visit, W: Write>(
    value: &mut T,
    mut sink: W,
    style: ReportStyle,
) -> Result<u64> {
    let root = account(value)?;
    write!(sink, "{}", root.report(style))?;
    Ok(root.bytes)
}

/// Encoded size of one plain-data value.
pub fn plain_bytes<T: Pod>() -> u64 {
    size_of::<T>() as u64
}

/// Encoded size of a plain-data sequence, count prefix included.
pub fn plain_seq_bytes<T: Pod>(seq: &[T]) -> u64 {
    seq.len() as u64 * plain_bytes::<T>() + LENGTH_PREFIX_BYTES
}

// ── SizeNode ───────────────────────────────────────────────────────────────

/// One node of the size breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizeNode {
    /// Encoded bytes of this node, children and local overhead included.
    pub bytes: u64,
    /// Distance from the root.
    pub depth: usize,
    /// Field name, `[i]` for sequence elements, type name for the root.
    pub label: String,
    pub children: Vec<SizeNode>,
}

impl SizeNode {
    fn new(label: impl Into<String>, depth: usize, bytes: u64) -> Self {
        SizeNode {
            bytes,
            depth,
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// The direct child with the given label.
    pub fn child(&self, label: &str) -> Option<&SizeNode> {
        self.children.iter().find(|c| c.label == label)
    }

    /// Share of `total` taken by this node, in percent. Zero when `total` is zero.
    pub fn percent_of(&self, total: u64) -> f64 {
        if total == 0 {
            0.0
        } else {
            self.bytes as f64 * 100.0 / total as f64
        }
    }

    /// A renderable report of this subtree, percentages relative to this node.
    pub fn report(&self, style: ReportStyle) -> Report<'_> {
        Report { root: self, style }
    }
}

impl fmt::Display for SizeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.report(ReportStyle::default()).fmt(f)
    }
}

// ── Report ─────────────────────────────────────────────────────────────────

/// How a size report is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportStyle {
    /// Spaces of indentation per tree level.
    pub indent: usize,
    pub unit: ByteUnit,
}

impl Default for ReportStyle {
    fn default() -> Self {
        ReportStyle {
            indent: 4,
            unit: ByteUnit::Bytes,
        }
    }
}

/// Indented rendering of a [`SizeNode`] tree, one line per node:
///
/// ```text
/// Sample: 36 bytes (100.00%)
///     id: 4 bytes (11.11%)
///     readings: 32 bytes (88.89%)
/// ```
pub struct Report<'a> {
    root: &'a SizeNode,
    style: ReportStyle,
}

impl Report<'_> {
    fn write_node(&self, f: &mut fmt::Formatter<'_>, node: &SizeNode, level: usize) -> fmt::Result {
        writeln!(
            f,
            "{:indent$}{}: {} ({:.2}%)",
            "",
            node.label,
            self.style.unit.format(node.bytes),
            node.percent_of(self.root.bytes),
            indent = level * self.style.indent,
        )?;
        for child in &node.children {
            self.write_node(f, child, level + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_node(f, self.root, 0)
    }
}

// ── Sizer ──────────────────────────────────────────────────────────────────

/// The size accountant. Never touches a byte stream.
///
/// Nodes under construction sit on `open`; a node's total is computed when it
/// is closed, after all of its children are known.
pub struct Sizer {
    root: SizeNode,
    open: Vec<SizeNode>,
}

impl Sizer {
    /// Create an accountant whose root node carries `label`.
    pub fn new(label: impl Into<String>) -> Self {
        Sizer {
            root: SizeNode::new(label, 0, 0),
            open: Vec::new(),
        }
    }

    /// Close the root and return the finished tree.
    pub fn finish(mut self) -> SizeNode {
        while !self.open.is_empty() {
            self.close();
        }
        self.root.bytes += self.root.children.iter().map(|c| c.bytes).sum::<u64>();
        self.root
    }

    fn current(&mut self) -> &mut SizeNode {
        self.open.last_mut().unwrap_or(&mut self.root)
    }

    fn leaf(&mut self, label: &str, bytes: u64) {
        let parent = self.current();
        let node = SizeNode::new(label, parent.depth + 1, bytes);
        parent.children.push(node);
    }

    /// Start a node that owns `local` bytes of its own besides its children.
    fn open(&mut self, label: &str, local: u64) {
        let depth = self.current().depth + 1;
        self.open.push(SizeNode::new(label, depth, local));
    }

    fn close(&mut self) {
        if let Some(mut node) = self.open.pop() {
            node.bytes += node.children.iter().map(|c| c.bytes).sum::<u64>();
            self.current().children.push(node);
        }
    }
}

impl private::Sealed for Sizer {}

impl Visitor for Sizer {
    fn visit_plain<T: Pod>(&mut self, name: &str, _value: &mut T) -> Result<()> {
        self.leaf(name, plain_bytes::<T>());
        Ok(())
    }

    fn visit_plain_seq<T: Pod>(&mut self, name: &str, seq: &mut Vec<T>) -> Result<()> {
        self.leaf(name, plain_seq_bytes(seq));
        Ok(())
    }

    fn visit_seq<T: Field + Default>(&mut self, name: &str, seq: &mut Vec<T>) -> Result<()> {
        self.open(name, LENGTH_PREFIX_BYTES);
        let result = seq
            .iter_mut()
            .enumerate()
            .try_for_each(|(i, element)| element.accept(&format!("[{}]", i), self));
        self.close();
        result
    }

    fn visit_composite<T: Visit>(&mut self, name: &str, value: &mut T) -> Result<()> {
        self.open(name, 0);
        let result = value.visit(self);
        self.close();
        result
    }
}
