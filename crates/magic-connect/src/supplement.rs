//! Diagonal supplement pass: adds an inferred connection
//! between symbol pairs aligned on a diagonal with sufficient drawn-ink
//! coverage along the straight path between them.

use std::collections::HashSet;

use magic_core::{BinaryImage, Connection, ConnectionType, Position, Symbol, SymbolId};

const DIAGONAL_TOLERANCE_DEG: f64 = 22.5;
const MIN_PATH_COVERAGE: f64 = 0.3;
const SAMPLE_NEIGHBORHOOD: i32 = 2;

/// For every pair of non-`OuterCircle` symbols without an existing
/// connection, whose center-to-center angle is within 22.5 degrees of a
/// diagonal cardinal (45/135/225/315) and whose straight path has at
/// least 30% foreground coverage sampled in a 5x5 neighborhood, adds an
/// inferred solid connection.
pub fn diagonal_supplement(symbols: &[Symbol], existing: &[Connection], binary: &BinaryImage) -> Vec<Connection> {
    let connected: HashSet<(SymbolId, SymbolId)> = existing
        .iter()
        .flat_map(|c| [(c.from, c.to), (c.to, c.from)])
        .collect();

    let mut added = Vec::new();
    for i in 0..symbols.len() {
        if symbols[i].is_outer_circle() {
            continue;
        }
        for j in (i + 1)..symbols.len() {
            if symbols[j].is_outer_circle() {
                continue;
            }
            if connected.contains(&(symbols[i].id, symbols[j].id)) {
                continue;
            }
            if !is_diagonal(symbols[i].position, symbols[j].position) {
                continue;
            }
            if path_coverage(symbols[i].position, symbols[j].position, binary) >= MIN_PATH_COVERAGE {
                added.push(Connection::new(symbols[i].id, symbols[j].id, ConnectionType::Solid).mark_inferred());
            }
        }
    }
    added
}

fn is_diagonal(a: Position, b: Position) -> bool {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let angle = dy.atan2(dx).to_degrees();
    let angle = ((angle % 360.0) + 360.0) % 360.0;
    for cardinal in [45.0, 135.0, 225.0, 315.0] {
        let diff = (angle - cardinal).abs();
        if diff.min(360.0 - diff) <= DIAGONAL_TOLERANCE_DEG {
            return true;
        }
    }
    false
}

fn path_coverage(a: Position, b: Position, binary: &BinaryImage) -> f64 {
    let steps = a.distance(b).ceil().max(1.0) as usize;
    let mut covered = 0usize;
    let mut total = 0usize;
    for step in 0..=steps {
        let t = step as f64 / steps as f64;
        let x = (a.x + t * (b.x - a.x)).round() as i32;
        let y = (a.y + t * (b.y - a.y)).round() as i32;
        let mut hit = false;
        for dy in -SAMPLE_NEIGHBORHOOD..=SAMPLE_NEIGHBORHOOD {
            for dx in -SAMPLE_NEIGHBORHOOD..=SAMPLE_NEIGHBORHOOD {
                total += 1;
                if binary.is_foreground(x + dx, y + dy) {
                    hit = true;
                }
            }
        }
        if hit {
            covered += (2 * SAMPLE_NEIGHBORHOOD as usize + 1).pow(2);
        }
    }
    if total == 0 {
        0.0
    } else {
        covered as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use magic_core::{PatternTag, SymbolId, SymbolType};

    fn symbol(id: u32, x: f64, y: f64) -> Symbol {
        Symbol::new(SymbolId::from_index(id as usize), SymbolType::Square, Position::new(x, y), 10.0, 1.0, PatternTag::Empty)
    }

    #[test]
    fn adds_connection_along_drawn_diagonal() {
        let symbols = vec![symbol(0, 0.0, 0.0), symbol(1, 40.0, 40.0)];
        let mut binary = BinaryImage::new(60, 60);
        for i in 0..45 {
            binary.set_foreground(i, i, true);
        }
        let added = diagonal_supplement(&symbols, &[], &binary);
        assert_eq!(added.len(), 1);
        assert!(added[0].is_inferred());
    }

    #[test]
    fn skips_pair_already_connected() {
        let symbols = vec![symbol(0, 0.0, 0.0), symbol(1, 40.0, 40.0)];
        let mut binary = BinaryImage::new(60, 60);
        for i in 0..45 {
            binary.set_foreground(i, i, true);
        }
        let existing = vec![Connection::new(symbols[0].id, symbols[1].id, ConnectionType::Solid)];
        let added = diagonal_supplement(&symbols, &existing, &binary);
        assert!(added.is_empty());
    }
}
