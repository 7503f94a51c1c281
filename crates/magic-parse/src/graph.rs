//! Symbol graph construction: explicit connections applied directly,
//! or three inference rules run over bare symbol positions when no
//! connections were detected.

use magic_core::{Connection, ParserConfig, Symbol, SymbolId, SymbolType};
use magic_graph::SymbolGraph;

/// Builds the symbol graph. If `connections` is non-empty, each one is
/// applied directly as a parent/child edge. Otherwise the three
/// inference rules (main attachment, operator/operand attachment,
/// Star/ancestor attachment) are run over raw positions.
pub fn build_graph(symbols: &[Symbol], connections: &[Connection], config: &ParserConfig) -> SymbolGraph {
    let mut graph = SymbolGraph::new(symbols.iter().map(|s| s.id));

    if !connections.is_empty() {
        for conn in connections {
            graph.attach_child(conn.from, conn.to);
        }
        return graph;
    }

    attach_main(symbols, &mut graph, config);
    attach_operator_operands(symbols, &mut graph, config);
    attach_star_parents(symbols, &mut graph, config);
    graph
}

fn attach_main(symbols: &[Symbol], graph: &mut SymbolGraph, config: &ParserConfig) {
    let Some(main) = symbols.iter().find(|s| s.symbol_type == SymbolType::DoubleCircle) else {
        return;
    };
    for symbol in symbols {
        if symbol.id == main.id {
            continue;
        }
        if symbol.position.y <= main.position.y {
            continue;
        }
        if (symbol.position.x - main.position.x).abs() < config.main_attach_offset {
            graph.attach_child(main.id, symbol.id);
        }
    }
}

fn attach_operator_operands(symbols: &[Symbol], graph: &mut SymbolGraph, config: &ParserConfig) {
    for operator in symbols {
        if !operator.symbol_type.is_operator() {
            continue;
        }
        let mut squares: Vec<(&Symbol, f64)> = symbols
            .iter()
            .filter(|s| s.symbol_type == SymbolType::Square)
            .map(|s| (s, s.position.distance(operator.position)))
            .filter(|(_, dist)| *dist <= config.infer_attach_radius)
            .collect();
        squares.sort_by(|a, b| a.1.total_cmp(&b.1));

        let take = if operator.symbol_type == SymbolType::LogicalNot { 1 } else { 2 };
        for (square, _) in squares.into_iter().take(take) {
            graph.attach_child(square.id, operator.id);
        }
    }
}

fn attach_star_parents(symbols: &[Symbol], graph: &mut SymbolGraph, config: &ParserConfig) {
    for star in symbols {
        if star.symbol_type != SymbolType::Star {
            continue;
        }
        let nearest: Option<(SymbolId, f64)> = symbols
            .iter()
            .filter(|s| s.id != star.id && s.symbol_type != SymbolType::Star)
            .filter(|s| s.position.y < star.position.y)
            .map(|s| (s.id, s.position.distance(star.position)))
            .filter(|(_, dist)| *dist <= config.infer_attach_radius)
            .min_by(|a, b| a.1.total_cmp(&b.1));

        if let Some((parent_id, _)) = nearest {
            graph.attach_child(parent_id, star.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use magic_core::{PatternTag, Position};

    fn symbol(id: u32, ty: SymbolType, x: f64, y: f64) -> Symbol {
        Symbol::new(SymbolId::from_index(id as usize), ty, Position::new(x, y), 10.0, 1.0, PatternTag::Empty)
    }

    #[test]
    fn explicit_connections_are_applied_directly() {
        let symbols = vec![symbol(0, SymbolType::Square, 0.0, 0.0), symbol(1, SymbolType::Star, 0.0, 50.0)];
        let connections =
            vec![Connection::new(symbols[0].id, symbols[1].id, magic_core::ConnectionType::Solid)];
        let graph = build_graph(&symbols, &connections, &ParserConfig::default());
        assert_eq!(graph.parent(symbols[1].id), Some(symbols[0].id));
    }

    #[test]
    fn main_double_circle_attaches_symbols_below_within_offset() {
        let symbols = vec![
            symbol(0, SymbolType::DoubleCircle, 100.0, 0.0),
            symbol(1, SymbolType::Square, 110.0, 80.0),
            symbol(2, SymbolType::Square, 500.0, 80.0),
        ];
        let graph = build_graph(&symbols, &[], &ParserConfig::default());
        assert_eq!(graph.parent(symbols[1].id), Some(symbols[0].id));
        assert_eq!(graph.parent(symbols[2].id), None);
    }

    #[test]
    fn operator_attaches_nearest_two_square_operands() {
        let symbols = vec![
            symbol(0, SymbolType::Convergence, 50.0, 50.0),
            symbol(1, SymbolType::Square, 10.0, 50.0),
            symbol(2, SymbolType::Square, 90.0, 50.0),
            symbol(3, SymbolType::Square, 500.0, 500.0),
        ];
        let graph = build_graph(&symbols, &[], &ParserConfig::default());
        assert!(graph.children(symbols[1].id).contains(&symbols[0].id));
        assert!(graph.children(symbols[2].id).contains(&symbols[0].id));
        assert!(!graph.children(symbols[3].id).contains(&symbols[0].id));
    }

    #[test]
    fn star_attaches_nearest_non_star_ancestor_above_it() {
        let symbols = vec![
            symbol(0, SymbolType::Square, 50.0, 10.0),
            symbol(1, SymbolType::Star, 50.0, 60.0),
        ];
        let graph = build_graph(&symbols, &[], &ParserConfig::default());
        assert_eq!(graph.parent(symbols[1].id), Some(symbols[0].id));
    }
}
