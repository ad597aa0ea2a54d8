#![allow(dead_code)]

use bytemuck::{Pod, Zeroable};
use pod_visit::{Element, Result, Visit, Visitor, plain_data, visit_fields};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Two plain scalars of each width plus two plain sequences.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Basic<T1, T2> {
    pub x: i32,
    pub y: i32,
    pub z: u64,
    pub data1: Vec<T1>,
    pub data2: Vec<T2>,
}

impl<T1: Element, T2: Element> Visit for Basic<T1, T2> {
    fn visit<V: Visitor>(&mut self, visitor: &mut V) -> Result<()> {
        visit_fields!(visitor, self, x, y, z, data1, data2)
    }
}

/// `{x: 12, y: 90, z: 723725, data1: [0, 1, 2], data2: [3.45, 4.45, 5.45]}`
pub fn sample_basic() -> Basic<i32, f64> {
    Basic {
        x: 12,
        y: 90,
        z: 723725,
        data1: vec![0, 1, 2],
        data2: vec![3.45, 4.45, 5.45],
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Inner<T> {
    pub x: i32,
    pub data: Vec<T>,
}

impl<T> Default for Inner<T> {
    fn default() -> Self {
        Inner {
            x: 10,
            data: Vec::new(),
        }
    }
}

impl<T: Element> Visit for Inner<T> {
    fn visit<V: Visitor>(&mut self, visitor: &mut V) -> Result<()> {
        visitor.field("x", &mut self.x)?;
        visitor.field("data", &mut self.data)
    }
}

/// A composite holding a composite, a sequence of composites and a sequence
/// of sequences.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Collection {
    pub header: Inner<u32>,
    pub items: Vec<Inner<u64>>,
    pub rows: Vec<Vec<u64>>,
}

impl Visit for Collection {
    fn visit<V: Visitor>(&mut self, visitor: &mut V) -> Result<()> {
        visit_fields!(visitor, self, header, items, rows)
    }
}

/// Ten items whose sequences have lengths 4, 8, 16, ...
pub fn sample_collection() -> Collection {
    let header = Inner {
        x: 10,
        data: (0..13).collect(),
    };
    let mut state = 0x2545_f491_4f6c_dd1du64;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state % 1000
    };
    let items = (0..10)
        .map(|i| Inner {
            x: i,
            data: (0..(4usize << i)).map(|_| next()).collect(),
        })
        .collect();
    let rows = (0..13).map(|_| vec![0u64; 5]).collect();
    Collection {
        header,
        items,
        rows,
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

plain_data!(Point);

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Shape {
    pub origin: Point,
    pub tag: [u8; 4],
    pub outline: Vec<Point>,
    pub quads: Vec<[u16; 4]>,
}

impl Visit for Shape {
    fn visit<V: Visitor>(&mut self, visitor: &mut V) -> Result<()> {
        visit_fields!(visitor, self, origin, tag, outline, quads)
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct Empty;

impl Visit for Empty {
    fn visit<V: Visitor>(&mut self, _visitor: &mut V) -> Result<()> {
        Ok(())
    }
}
