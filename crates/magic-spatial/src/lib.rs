#![deny(missing_docs)]
//! Spatial indexing over a fixed set of detected symbols: a uniform
//! grid for small symbol counts and a quad-tree for large ones, behind
//! a shared [`SpatialIndex`] trait. Built once per image,
//! read-only thereafter.

/// Uniform-grid spatial index.
pub mod grid;
/// Quad-tree spatial index.
pub mod quadtree;

use magic_core::{Position, Symbol, SymbolId};

pub use grid::UniformGrid;
pub use quadtree::QuadTree;

/// Threshold above which [`build_index`] prefers a quad-tree over a
/// uniform grid.
pub const QUADTREE_THRESHOLD: usize = 200;

/// A read-only spatial index over a fixed set of symbols.
pub trait SpatialIndex {
    /// Returns the ids of every symbol within `radius` of `pos`.
    fn within(&self, pos: Position, radius: f64) -> Vec<SymbolId>;
}

/// Builds the appropriate index for `symbols`: a [`UniformGrid`] for up
/// to [`QUADTREE_THRESHOLD`] symbols, a [`QuadTree`] beyond that.
pub fn build_index(symbols: &[Symbol]) -> Box<dyn SpatialIndex + Send + Sync> {
    if symbols.len() <= QUADTREE_THRESHOLD {
        Box::new(UniformGrid::build(symbols))
    } else {
        Box::new(QuadTree::build(symbols))
    }
}
