//! Quad-tree spatial index, used once a detection run exceeds
//! [`crate::QUADTREE_THRESHOLD`] symbols. Max depth 8, max
//! bucket 4.

use magic_core::{Position, Rectangle, Symbol, SymbolId};

use crate::SpatialIndex;

const MAX_DEPTH: u32 = 8;
const MAX_BUCKET: usize = 4;

struct Entry {
    id: SymbolId,
    position: Position,
}

enum Node {
    Leaf(Vec<Entry>),
    Internal(Box<[Node; 4]>),
}

/// A quad-tree over a fixed symbol set.
pub struct QuadTree {
    root: Node,
    bounds: Rectangle,
}

impl QuadTree {
    /// Builds a quad-tree over `symbols`.
    pub fn build(symbols: &[Symbol]) -> Self {
        let bounds = bounding_rect(symbols);
        let entries: Vec<Entry> = symbols
            .iter()
            .map(|s| Entry {
                id: s.id,
                position: s.position,
            })
            .collect();
        let root = build_node(entries, bounds, 0);
        Self { root, bounds }
    }
}

fn bounding_rect(symbols: &[Symbol]) -> Rectangle {
    if symbols.is_empty() {
        return Rectangle::new(0, 0, 1, 1);
    }
    let (mut min_x, mut max_x) = (f64::MAX, f64::MIN);
    let (mut min_y, mut max_y) = (f64::MAX, f64::MIN);
    for s in symbols {
        min_x = min_x.min(s.position.x);
        max_x = max_x.max(s.position.x);
        min_y = min_y.min(s.position.y);
        max_y = max_y.max(s.position.y);
    }
    Rectangle::new(
        min_x.floor() as i32 - 1,
        min_y.floor() as i32 - 1,
        max_x.ceil() as i32 + 1,
        max_y.ceil() as i32 + 1,
    )
}

fn build_node(entries: Vec<Entry>, bounds: Rectangle, depth: u32) -> Node {
    if entries.len() <= MAX_BUCKET || depth >= MAX_DEPTH {
        return Node::Leaf(entries);
    }
    let mid_x = (bounds.min_x + bounds.max_x) / 2;
    let mid_y = (bounds.min_y + bounds.max_y) / 2;
    let quadrants = [
        Rectangle::new(bounds.min_x, bounds.min_y, mid_x, mid_y),
        Rectangle::new(mid_x, bounds.min_y, bounds.max_x, mid_y),
        Rectangle::new(bounds.min_x, mid_y, mid_x, bounds.max_y),
        Rectangle::new(mid_x, mid_y, bounds.max_x, bounds.max_y),
    ];
    let mut buckets: [Vec<Entry>; 4] = [Vec::new(), Vec::new(), Vec::new(), Vec::new()];
    for entry in entries {
        let q = quadrant_of(&quadrants, entry.position);
        buckets[q].push(entry);
    }
    let mut iter = buckets.into_iter();
    let children = [
        build_node(iter.next().unwrap(), quadrants[0], depth + 1),
        build_node(iter.next().unwrap(), quadrants[1], depth + 1),
        build_node(iter.next().unwrap(), quadrants[2], depth + 1),
        build_node(iter.next().unwrap(), quadrants[3], depth + 1),
    ];
    Node::Internal(Box::new(children))
}

fn quadrant_of(quadrants: &[Rectangle; 4], pos: Position) -> usize {
    for (i, q) in quadrants.iter().enumerate() {
        if pos.x >= q.min_x as f64 && pos.x < q.max_x as f64 && pos.y >= q.min_y as f64 && pos.y < q.max_y as f64 {
            return i;
        }
    }
    // Positions on the outer boundary of the root fall through to the
    // last quadrant rather than being dropped.
    3
}

fn query_box(pos: Position, radius: f64) -> Rectangle {
    Rectangle::new(
        (pos.x - radius).floor() as i32,
        (pos.y - radius).floor() as i32,
        (pos.x + radius).ceil() as i32,
        (pos.y + radius).ceil() as i32,
    )
}

fn intersects(a: &Rectangle, b: &Rectangle) -> bool {
    a.min_x < b.max_x && a.max_x > b.min_x && a.min_y < b.max_y && a.max_y > b.min_y
}

fn collect(node: &Node, bounds: Rectangle, query: &Rectangle, pos: Position, radius_sq: f64, out: &mut Vec<SymbolId>) {
    if !intersects(&bounds, query) {
        return;
    }
    match node {
        Node::Leaf(entries) => {
            for entry in entries {
                let dx = entry.position.x - pos.x;
                let dy = entry.position.y - pos.y;
                if dx * dx + dy * dy <= radius_sq {
                    out.push(entry.id);
                }
            }
        }
        Node::Internal(children) => {
            let mid_x = (bounds.min_x + bounds.max_x) / 2;
            let mid_y = (bounds.min_y + bounds.max_y) / 2;
            let quadrants = [
                Rectangle::new(bounds.min_x, bounds.min_y, mid_x, mid_y),
                Rectangle::new(mid_x, bounds.min_y, bounds.max_x, mid_y),
                Rectangle::new(bounds.min_x, mid_y, mid_x, bounds.max_y),
                Rectangle::new(mid_x, mid_y, bounds.max_x, bounds.max_y),
            ];
            for (child, quadrant) in children.iter().zip(quadrants.iter()) {
                collect(child, *quadrant, query, pos, radius_sq, out);
            }
        }
    }
}

impl SpatialIndex for QuadTree {
    fn within(&self, pos: Position, radius: f64) -> Vec<SymbolId> {
        let query = query_box(pos, radius);
        let mut out = Vec::new();
        collect(&self.root, self.bounds, &query, pos, radius * radius, &mut out);
        out
    }
}
