//! Batch connection detection: with a spatial index built,
//! each symbol's candidate partners are scanned independently; results
//! are appended under a single mutex.

use std::sync::Mutex;

use magic_core::{BinaryImage, Connection, Symbol};
use magic_spatial::{build_index, SpatialIndex};

use crate::label::label_connection_type;
use crate::line::Line;
use crate::validate::endpoint_tolerance;

/// For each symbol, queries the spatial index for nearby candidate
/// partners and emits a direct connection when a straight path between
/// them is substantially drawn ink, labeling its type by transition
/// sampling. Intended as the throughput-oriented counterpart to the
/// sequential line-extraction pipeline for large symbol counts.
pub fn detect_connections_batch(symbols: &[Symbol], binary: &BinaryImage) -> Vec<Connection> {
    let index = build_index(symbols);
    let results = Mutex::new(Vec::new());

    std::thread::scope(|scope| {
        let chunk_size = (symbols.len() / rayon_like_parallelism()).max(1);
        for chunk in symbols.chunks(chunk_size) {
            let index = &index;
            let results = &results;
            scope.spawn(move || {
                let mut local = Vec::new();
                for symbol in chunk {
                    if symbol.is_outer_circle() {
                        continue;
                    }
                    let radius = endpoint_tolerance(symbol);
                    for candidate_id in index.within(symbol.position, radius) {
                        if candidate_id == symbol.id {
                            continue;
                        }
                        let Some(candidate) = symbols.iter().find(|s| s.id == candidate_id) else {
                            continue;
                        };
                        if candidate.is_outer_circle() || candidate.id <= symbol.id {
                            continue;
                        }
                        let line = Line::new(
                            magic_core::Point::new(symbol.position.x as i32, symbol.position.y as i32),
                            magic_core::Point::new(candidate.position.x as i32, candidate.position.y as i32),
                        );
                        let coverage = sampled_path_coverage(&line, binary);
                        if coverage >= 0.3 {
                            let conn_type = label_connection_type(&line, binary);
                            local.push(Connection::new(symbol.id, candidate.id, conn_type));
                        }
                    }
                }
                results.lock().expect("connection mutex poisoned").extend(local);
            });
        }
    });

    let mut out = results.into_inner().expect("connection mutex poisoned");
    out.sort_by(|a, b| (a.from, a.to).cmp(&(b.from, b.to)));
    out
}

fn rayon_like_parallelism() -> usize {
    std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

fn sampled_path_coverage(line: &Line, binary: &BinaryImage) -> f64 {
    let steps = line.length().ceil().max(1.0) as usize;
    let mut hits = 0;
    for step in 0..=steps {
        let t = step as f64 / steps as f64;
        let x = line.start.x as f64 + t * (line.end.x - line.start.x) as f64;
        let y = line.start.y as f64 + t * (line.end.y - line.start.y) as f64;
        if binary.is_foreground(x.round() as i32, y.round() as i32) {
            hits += 1;
        }
    }
    hits as f64 / (steps + 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use magic_core::{PatternTag, Position, SymbolId, SymbolType};

    fn symbol(id: u32, x: f64, y: f64) -> Symbol {
        Symbol::new(SymbolId::from_index(id as usize), SymbolType::Square, Position::new(x, y), 10.0, 1.0, PatternTag::Empty)
    }

    #[test]
    fn finds_a_connection_between_two_linked_symbols() {
        let symbols = vec![symbol(0, 0.0, 0.0), symbol(1, 50.0, 0.0)];
        let mut binary = BinaryImage::new(60, 10);
        for x in 0..50 {
            binary.set_foreground(x, 0, true);
        }
        let connections = detect_connections_batch(&symbols, &binary);
        assert_eq!(connections.len(), 1);
    }
}
