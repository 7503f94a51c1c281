//! Validates candidate line segments against the detected symbols and
//! produces [`Connection`]s.

use magic_core::{Connection, Position, Symbol, SymbolId};

use crate::line::Line;

const MIN_LENGTH: f64 = 20.0;
const MIN_TOLERANCE: f64 = 60.0;

/// Tolerance radius for matching a segment endpoint to a symbol's
/// center: `max(2 * symbol.size, 60)`.
pub fn endpoint_tolerance(symbol: &Symbol) -> f64 {
    (2.0 * symbol.size).max(MIN_TOLERANCE)
}

/// A validated pairing of a line segment to its two endpoint symbols,
/// oriented `from -> to` is decided later by direction inference.
pub struct ValidatedSegment {
    /// The underlying line.
    pub line: Line,
    /// Symbol nearest the line's start.
    pub a: SymbolId,
    /// Symbol nearest the line's end.
    pub b: SymbolId,
}

/// Validates `line` against `symbols`: its start must lie within
/// tolerance of one symbol's center, its end within tolerance of
/// another (distinct) symbol, neither an `OuterCircle`, and the segment
/// must be at least 20px long.
pub fn validate_connection(line: &Line, symbols: &[Symbol]) -> Option<ValidatedSegment> {
    if line.length() < MIN_LENGTH {
        return None;
    }
    let start_pos = line.start.to_position();
    let end_pos = line.end.to_position();

    let a = nearest_within(symbols, start_pos)?;
    let b = nearest_within(symbols, end_pos)?;
    if a == b {
        return None;
    }
    if symbols[a].is_outer_circle() || symbols[b].is_outer_circle() {
        return None;
    }
    Some(ValidatedSegment {
        line: *line,
        a: symbols[a].id,
        b: symbols[b].id,
    })
}

fn nearest_within(symbols: &[Symbol], point: Position) -> Option<usize> {
    symbols
        .iter()
        .enumerate()
        .map(|(i, s)| (i, s.position.distance(point)))
        .filter(|(i, d)| *d <= endpoint_tolerance(&symbols[*i]))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
        .map(|(i, _)| i)
}

/// Builds an unlabeled, undirected [`Connection`] from a validated
/// segment; direction and type are filled in by later stages.
pub fn connection_from_segment(segment: &ValidatedSegment, symbols: &[Symbol]) -> Connection {
    let from = symbols.iter().find(|s| s.id == segment.a).expect("validated id");
    let to = symbols.iter().find(|s| s.id == segment.b).expect("validated id");
    Connection::new(from.id, to.id, magic_core::ConnectionType::Solid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use magic_core::{PatternTag, Point, SymbolType};

    fn symbol_at(id: u32, x: f64, y: f64, kind: SymbolType) -> Symbol {
        Symbol::new(SymbolId::from_index(id as usize), kind, Position::new(x, y), 10.0, 1.0, PatternTag::Empty)
    }

    #[test]
    fn validates_a_segment_between_two_symbols() {
        let symbols = vec![
            symbol_at(0, 0.0, 0.0, SymbolType::Square),
            symbol_at(1, 100.0, 0.0, SymbolType::Star),
        ];
        let line = Line::new(Point::new(5, 0), Point::new(95, 0));
        let validated = validate_connection(&line, &symbols).unwrap();
        assert_ne!(validated.a, validated.b);
    }

    #[test]
    fn rejects_segment_touching_an_outer_circle() {
        let symbols = vec![
            symbol_at(0, 0.0, 0.0, SymbolType::OuterCircle),
            symbol_at(1, 100.0, 0.0, SymbolType::Star),
        ];
        let line = Line::new(Point::new(5, 0), Point::new(95, 0));
        assert!(validate_connection(&line, &symbols).is_none());
    }

    #[test]
    fn rejects_segment_too_short() {
        let symbols = vec![
            symbol_at(0, 0.0, 0.0, SymbolType::Square),
            symbol_at(1, 10.0, 0.0, SymbolType::Star),
        ];
        let line = Line::new(Point::new(0, 0), Point::new(5, 0));
        assert!(validate_connection(&line, &symbols).is_none());
    }
}
