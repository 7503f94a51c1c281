//! Statement dispatch: folds a symbol graph node into a
//! [`Statement`] by its `SymbolType`, recursing into children for
//! compound statements.

use std::collections::HashMap;

use magic_core::{ErrorInfo, ErrorKind, MagicError, Symbol, SymbolId, SymbolType};
use magic_graph::{AstNode, Expression, Statement, SymbolGraph};

use crate::expression::{expression_for, expression_from_parent, literal_from_pattern, synthetic_name};

/// Folds `id` into a statement per its symbol type, memoizing the
/// result on the graph and recursing into children for compound
/// statements. Returns `None` for nodes that are consumed purely as
/// sub-expressions (operators) or that have no statement-dispatch rule.
pub fn statement_for(
    id: SymbolId,
    symbols: &HashMap<SymbolId, &Symbol>,
    graph: &mut SymbolGraph,
    errors: &mut Vec<MagicError>,
) -> Option<Statement> {
    if graph.is_visited(id) {
        return match graph.ast_node(id) {
            Some(AstNode::Statement(stmt)) => Some(stmt.clone()),
            _ => None,
        };
    }
    graph.mark_visited(id);

    let Some(symbol) = symbols.get(&id).copied() else {
        return None;
    };

    let stmt = match symbol.symbol_type {
        SymbolType::OuterCircle | SymbolType::DoubleCircle => None,
        SymbolType::Star => Some(Statement::OutputStatement {
            value: expression_from_parent(id, symbols, &|pid| graph.parents(pid).to_vec(), errors),
        }),
        SymbolType::Triangle => Some(build_if(id, symbol, symbols, graph, errors)),
        SymbolType::Pentagon => Some(build_loop(id, symbol, symbols, graph, errors)),
        SymbolType::Hexagon | SymbolType::SixPointedStar => Some(build_parallel_block(id, symbol, symbols, graph, errors)),
        SymbolType::Square => build_assignment(id, symbol, symbols, graph, errors),
        // An operator's children (in this graph) are downstream
        // consumers that picked it as their nearest ancestor (e.g. a
        // Star reading its result), not its operands — operands are
        // attached the other way, as the operator's parent. Those
        // downstream consumers still need their own dispatch, so they
        // are deliberately left for the caller's sweep to visit rather
        // than marked visited here.
        ty if ty.is_operator() => None,
        _ => {
            errors.push(MagicError::new(
                ErrorKind::UnexpectedSymbol,
                ErrorInfo::new("E_UNEXPECTED_SYMBOL", "symbol has no recognized statement-dispatch rule")
                    .with_context("symbol_id", id.index().to_string())
                    .with_context("symbol_type", format!("{:?}", symbol.symbol_type))
                    .with_context("x", symbol.position.x.to_string())
                    .with_context("y", symbol.position.y.to_string()),
            ));
            None
        }
    };

    if let Some(s) = &stmt {
        graph.set_ast_node(id, AstNode::Statement(s.clone()));
    }
    stmt
}

fn build_if(
    id: SymbolId,
    symbol: &Symbol,
    symbols: &HashMap<SymbolId, &Symbol>,
    graph: &mut SymbolGraph,
    errors: &mut Vec<MagicError>,
) -> Statement {
    let condition = first_comparison(id, symbols, graph, errors).unwrap_or_else(|| Expression::boolean(false));

    let children: Vec<SymbolId> = graph.children(id).to_vec();
    let mut then_branch = Vec::new();
    let mut else_branch = Vec::new();
    for child in children {
        let Some(child_symbol) = symbols.get(&child).copied() else { continue };
        let branch = if child_symbol.position.x < symbol.position.x {
            &mut then_branch
        } else {
            &mut else_branch
        };
        if let Some(stmt) = statement_for(child, symbols, graph, errors) {
            branch.push(stmt);
        }
    }

    Statement::IfStatement { condition, then_branch, else_branch }
}

fn build_loop(
    id: SymbolId,
    _symbol: &Symbol,
    symbols: &HashMap<SymbolId, &Symbol>,
    graph: &mut SymbolGraph,
    errors: &mut Vec<MagicError>,
) -> Statement {
    let children: Vec<SymbolId> = graph.children(id).to_vec();
    let body: Vec<Statement> = children
        .iter()
        .filter_map(|child| statement_for(*child, symbols, graph, errors))
        .collect();

    let square_parent = graph.parent(id).filter(|p| symbols.get(p).map(|s| s.symbol_type) == Some(SymbolType::Square));

    match square_parent {
        Some(parent) => {
            let end = expression_for(parent, symbols, &|pid| graph.parents(pid).to_vec(), errors);
            Statement::ForLoop {
                counter: "i".to_string(),
                start: Expression::integer(0),
                end,
                step: Expression::integer(1),
                body,
            }
        }
        None => {
            let condition = first_comparison(id, symbols, graph, errors).unwrap_or_else(|| Expression::boolean(false));
            Statement::WhileLoop { condition, body }
        }
    }
}

fn build_parallel_block(
    id: SymbolId,
    symbol: &Symbol,
    symbols: &HashMap<SymbolId, &Symbol>,
    graph: &mut SymbolGraph,
    errors: &mut Vec<MagicError>,
) -> Statement {
    let children: Vec<SymbolId> = graph.children(id).to_vec();
    let mut quadrants: [Vec<Statement>; 4] = Default::default();

    for child in children {
        let Some(child_symbol) = symbols.get(&child).copied() else { continue };
        let dx = child_symbol.position.x - symbol.position.x;
        let dy = child_symbol.position.y - symbol.position.y;
        let quadrant = match (dx >= 0.0, dy < 0.0) {
            (true, true) => 0,  // top-right
            (false, true) => 1, // top-left
            (false, false) => 2, // bottom-left
            (true, false) => 3, // bottom-right
        };
        if let Some(stmt) = statement_for(child, symbols, graph, errors) {
            quadrants[quadrant].push(stmt);
        }
    }

    let branches = quadrants.into_iter().filter(|q| !q.is_empty()).collect();
    Statement::ParallelBlock { branches }
}

fn build_assignment(
    id: SymbolId,
    _symbol: &Symbol,
    symbols: &HashMap<SymbolId, &Symbol>,
    graph: &mut SymbolGraph,
    errors: &mut Vec<MagicError>,
) -> Option<Statement> {
    let children: Vec<SymbolId> = graph.children(id).to_vec();
    let has_operator_child = children.iter().any(|c| symbols.get(c).map(|s| s.symbol_type.is_operator()).unwrap_or(false));
    if has_operator_child {
        return None;
    }

    let own_pattern = symbols.get(&id).map(|s| s.pattern);
    let value = match children.first() {
        Some(child) => expression_for(*child, symbols, &|pid| graph.parents(pid).to_vec(), errors),
        None => own_pattern.map(literal_from_pattern).unwrap_or_else(|| Expression::integer(0)),
    };

    Some(Statement::Assignment { target: synthetic_name(id), value })
}

/// Finds the first comparison-operator symbol among `id`'s children
/// and parent, returning its `BinaryOp` expression.
fn first_comparison(
    id: SymbolId,
    symbols: &HashMap<SymbolId, &Symbol>,
    graph: &SymbolGraph,
    errors: &mut Vec<MagicError>,
) -> Option<Expression> {
    let candidate = graph
        .children(id)
        .iter()
        .copied()
        .chain(graph.parent(id))
        .find(|cand| symbols.get(cand).map(|s| s.symbol_type.is_comparison()).unwrap_or(false))?;
    Some(expression_for(candidate, symbols, &|pid| graph.parents(pid).to_vec(), errors))
}
