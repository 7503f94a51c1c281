//! Uniform-grid spatial index, the default for up to 200 symbols. Cell
//! size is `max(bounding-span / sqrt(N), 50)`; each cell bucket
//! preserves insertion order.

use std::collections::HashMap;

use magic_core::{Position, Symbol, SymbolId};

use crate::SpatialIndex;

/// A uniform grid over a fixed symbol set.
pub struct UniformGrid {
    cell_size: f64,
    cells: HashMap<(i64, i64), Vec<SymbolId>>,
    positions: Vec<Position>,
}

impl UniformGrid {
    /// Builds a grid over `symbols`, sized from the bounding span of
    /// their positions.
    pub fn build(symbols: &[Symbol]) -> Self {
        let cell_size = cell_size_for(symbols);
        let mut cells: HashMap<(i64, i64), Vec<SymbolId>> = HashMap::new();
        let mut positions = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            positions.push(symbol.position);
            let key = cell_key(symbol.position, cell_size);
            cells.entry(key).or_default().push(symbol.id);
        }
        Self {
            cell_size,
            cells,
            positions,
        }
    }

    /// The cell size this grid was built with.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }
}

fn cell_key(pos: Position, cell_size: f64) -> (i64, i64) {
    ((pos.x / cell_size).floor() as i64, (pos.y / cell_size).floor() as i64)
}

fn cell_size_for(symbols: &[Symbol]) -> f64 {
    if symbols.len() < 2 {
        return 50.0;
    }
    let (mut min_x, mut max_x) = (f64::MAX, f64::MIN);
    let (mut min_y, mut max_y) = (f64::MAX, f64::MIN);
    for s in symbols {
        min_x = min_x.min(s.position.x);
        max_x = max_x.max(s.position.x);
        min_y = min_y.min(s.position.y);
        max_y = max_y.max(s.position.y);
    }
    let span = (max_x - min_x).max(max_y - min_y);
    (span / (symbols.len() as f64).sqrt()).max(50.0)
}

impl SpatialIndex for UniformGrid {
    fn within(&self, pos: Position, radius: f64) -> Vec<SymbolId> {
        let radius_sq = radius * radius;
        let cell_span = (radius / self.cell_size).ceil() as i64 + 1;
        let (cx, cy) = cell_key(pos, self.cell_size);
        let mut found = Vec::new();
        for dy in -cell_span..=cell_span {
            for dx in -cell_span..=cell_span {
                if let Some(bucket) = self.cells.get(&(cx + dx, cy + dy)) {
                    for &id in bucket {
                        let p = self.positions[id.index()];
                        let ddx = p.x - pos.x;
                        let ddy = p.y - pos.y;
                        if ddx * ddx + ddy * ddy <= radius_sq {
                            found.push(id);
                        }
                    }
                }
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use magic_core::{PatternTag, SymbolType};

    fn symbol_at(id: u32, x: f64, y: f64) -> Symbol {
        Symbol::new(
            SymbolId::from_index(id as usize),
            SymbolType::Square,
            Position::new(x, y),
            10.0,
            1.0,
            PatternTag::Empty,
        )
    }

    #[test]
    fn within_finds_nearby_symbols_and_excludes_far_ones() {
        let symbols = vec![
            symbol_at(0, 0.0, 0.0),
            symbol_at(1, 10.0, 10.0),
            symbol_at(2, 500.0, 500.0),
        ];
        let grid = UniformGrid::build(&symbols);
        let found = grid.within(Position::new(0.0, 0.0), 20.0);
        assert_eq!(found.len(), 2);
        assert!(!found.contains(&SymbolId::from_index(2)));
    }
}
