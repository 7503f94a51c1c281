//! Expression dispatch: folds a symbol graph node into an
//! [`Expression`], recursing into parent nodes for operator operands.

use std::collections::HashMap;

use magic_core::{ErrorInfo, ErrorKind, MagicError, PatternTag, Symbol, SymbolId, SymbolType};
use magic_graph::{BinaryOperator, DataType, Expression, UnaryOperator};

/// Builds the expression a node contributes when referenced as a
/// value (an operator's operand, a `Star`'s printed value, a `Circle`'s
/// call argument, ...). Recurses through parent edges; terminal nodes
/// (`Square`, unrecognized shapes) bottom out without recursing further.
///
/// `parents_of` returns every parent attached to a node, in attachment
/// order — most symbols have at most one, but an operator can have two
/// (its nearest operand squares), which only `binary_op_for` draws on.
pub fn expression_for(
    id: SymbolId,
    symbols: &HashMap<SymbolId, &Symbol>,
    parents_of: &impl Fn(SymbolId) -> Vec<SymbolId>,
    errors: &mut Vec<MagicError>,
) -> Expression {
    let Some(symbol) = symbols.get(&id) else {
        return Expression::integer(0);
    };

    match symbol.symbol_type {
        SymbolType::Square => literal_from_pattern(symbol.pattern),
        SymbolType::Circle => Expression::FunctionCall {
            name: "print".to_string(),
            args: operand_expressions_for(id, symbols, parents_of, errors, 0),
            return_type: DataType::Void,
        },
        SymbolType::LogicalNot => {
            let operand = nearest_operand(id, symbols, parents_of, errors);
            Expression::UnaryOp {
                op: UnaryOperator::Not,
                operand: Box::new(operand),
                data_type: DataType::Boolean,
            }
        }
        ty if ty.is_operator() => binary_op_for(id, ty, symbols, parents_of, errors),
        SymbolType::Transfer => {
            // Transfer nodes are handled as assignments at the statement
            // level; referenced as a value, pass through the assigned value.
            nearest_operand(id, symbols, parents_of, errors)
        }
        _ => Expression::Identifier {
            name: synthetic_name(id),
            data_type: DataType::Integer,
        },
    }
}

/// A node's own first-parent-derived value, used for `Star`'s printed
/// expression and similar "evaluate what feeds into me" lookups.
pub fn expression_from_parent(
    id: SymbolId,
    symbols: &HashMap<SymbolId, &Symbol>,
    parents_of: &impl Fn(SymbolId) -> Vec<SymbolId>,
    errors: &mut Vec<MagicError>,
) -> Expression {
    match parents_of(id).first() {
        Some(&parent) => expression_for(parent, symbols, parents_of, errors),
        None => Expression::integer(0),
    }
}

/// A synthesized stable name for a node with no drawn label.
pub fn synthetic_name(id: SymbolId) -> String {
    format!("sym_{}", id.index())
}

pub(crate) fn literal_from_pattern(pattern: PatternTag) -> Expression {
    match pattern {
        PatternTag::Dot => Expression::integer(1),
        PatternTag::DoubleDot => Expression::integer(2),
        PatternTag::TripleDot => Expression::integer(3),
        PatternTag::Empty => Expression::integer(0),
        PatternTag::Lines | PatternTag::TripleLine => Expression::string("Text"),
        PatternTag::Cross => Expression::boolean(true),
        PatternTag::HalfCircle => Expression::boolean(false),
        _ => Expression::integer(0),
    }
}

/// Collects an operator's operand expressions from its parent nodes
/// (the squares/general expressions attached by the graph-build
/// inference rule), requiring at least `min_operands`. Pads with zero
/// literals and records `UnbalancedExpression` when short.
fn operand_expressions_for(
    id: SymbolId,
    symbols: &HashMap<SymbolId, &Symbol>,
    parents_of: &impl Fn(SymbolId) -> Vec<SymbolId>,
    errors: &mut Vec<MagicError>,
    min_operands: usize,
) -> Vec<Expression> {
    let mut operands: Vec<Expression> =
        parents_of(id).into_iter().map(|parent| expression_for(parent, symbols, parents_of, errors)).collect();
    while operands.len() < min_operands {
        operands.push(Expression::integer(0));
    }
    operands
}

fn nearest_operand(
    id: SymbolId,
    symbols: &HashMap<SymbolId, &Symbol>,
    parents_of: &impl Fn(SymbolId) -> Vec<SymbolId>,
    errors: &mut Vec<MagicError>,
) -> Expression {
    match parents_of(id).first() {
        Some(&parent) => expression_for(parent, symbols, parents_of, errors),
        None => Expression::integer(0),
    }
}

/// Resolves a binary operator's two operands from the operator node's
/// parents — the nearest two operand squares, attached by the
/// graph-build inference rule in ascending-distance order (or the two
/// endpoints of an explicit double connection). Anything short of two
/// resolvable parents is an unbalanced expression, padded with a zero
/// literal so the AST stays well-formed.
fn binary_op_for(
    id: SymbolId,
    ty: SymbolType,
    symbols: &HashMap<SymbolId, &Symbol>,
    parents_of: &impl Fn(SymbolId) -> Vec<SymbolId>,
    errors: &mut Vec<MagicError>,
) -> Expression {
    let Some(op) = operator_kind(ty) else {
        return Expression::integer(0);
    };

    let mut operands: Vec<Expression> = parents_of(id)
        .into_iter()
        .take(2)
        .map(|parent| expression_for(parent, symbols, parents_of, errors))
        .collect();
    if operands.len() < 2 {
        errors.push(MagicError::new(
            ErrorKind::UnbalancedExpression,
            ErrorInfo::new("E_UNBALANCED_EXPRESSION", "operator symbol had fewer than two resolvable operands")
                .with_context("symbol_id", id.index().to_string())
                .with_context("symbol_type", format!("{ty:?}")),
        ));
        while operands.len() < 2 {
            operands.push(Expression::integer(0));
        }
    }
    let right = operands.pop().expect("padded to at least 2");
    let left = operands.pop().expect("padded to at least 2");

    Expression::BinaryOp {
        left: Box::new(left),
        op,
        right: Box::new(right),
        data_type: result_type(op),
    }
}

fn operator_kind(ty: SymbolType) -> Option<BinaryOperator> {
    match ty {
        SymbolType::Convergence => Some(BinaryOperator::Add),
        SymbolType::Divergence => Some(BinaryOperator::Subtract),
        SymbolType::Amplification => Some(BinaryOperator::Multiply),
        SymbolType::Distribution => Some(BinaryOperator::Divide),
        SymbolType::Equal => Some(BinaryOperator::Equal),
        SymbolType::NotEqual => Some(BinaryOperator::NotEqual),
        SymbolType::LessThan => Some(BinaryOperator::LessThan),
        SymbolType::GreaterThan => Some(BinaryOperator::GreaterThan),
        SymbolType::LessEqual => Some(BinaryOperator::LessEqual),
        SymbolType::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        SymbolType::LogicalAnd => Some(BinaryOperator::And),
        SymbolType::LogicalOr => Some(BinaryOperator::Or),
        SymbolType::LogicalXor => Some(BinaryOperator::Xor),
        _ => None,
    }
}

fn result_type(op: BinaryOperator) -> DataType {
    match op {
        BinaryOperator::Add | BinaryOperator::Subtract | BinaryOperator::Multiply | BinaryOperator::Divide => {
            DataType::Integer
        }
        _ => DataType::Boolean,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use magic_core::Position;

    fn symbol(id: u32, ty: SymbolType, pattern: PatternTag) -> Symbol {
        Symbol::new(SymbolId::from_index(id as usize), ty, Position::new(0.0, 0.0), 10.0, 1.0, pattern)
    }

    #[test]
    fn square_dot_pattern_becomes_integer_one() {
        let sym = symbol(0, SymbolType::Square, PatternTag::Dot);
        let mut map = HashMap::new();
        map.insert(sym.id, &sym);
        let mut errors = Vec::new();
        let expr = expression_for(sym.id, &map, &|_| Vec::new(), &mut errors);
        assert_eq!(expr, Expression::integer(1));
        assert!(errors.is_empty());
    }

    #[test]
    fn operator_with_single_operand_pads_and_records_unbalanced_error() {
        let op = symbol(0, SymbolType::Convergence, PatternTag::Empty);
        let operand = symbol(1, SymbolType::Square, PatternTag::Dot);
        let mut map = HashMap::new();
        map.insert(op.id, &op);
        map.insert(operand.id, &operand);
        let mut errors = Vec::new();
        let parents_of = |id: SymbolId| if id == op.id { vec![operand.id] } else { Vec::new() };
        let expr = expression_for(op.id, &map, &parents_of, &mut errors);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind(), ErrorKind::UnbalancedExpression);
        match expr {
            Expression::BinaryOp { op, right, .. } => {
                assert_eq!(op, BinaryOperator::Add);
                assert_eq!(*right, Expression::integer(0));
            }
            _ => panic!("expected a BinaryOp"),
        }
    }

    #[test]
    fn operator_with_two_operands_resolves_both_with_no_error() {
        let op = symbol(0, SymbolType::Convergence, PatternTag::Empty);
        let left = symbol(1, SymbolType::Square, PatternTag::Dot);
        let right = symbol(2, SymbolType::Square, PatternTag::DoubleDot);
        let mut map = HashMap::new();
        map.insert(op.id, &op);
        map.insert(left.id, &left);
        map.insert(right.id, &right);
        let mut errors = Vec::new();
        let parents_of = |id: SymbolId| if id == op.id { vec![left.id, right.id] } else { Vec::new() };
        let expr = expression_for(op.id, &map, &parents_of, &mut errors);
        assert!(errors.is_empty());
        match expr {
            Expression::BinaryOp { op, left: l, right: r, .. } => {
                assert_eq!(op, BinaryOperator::Add);
                assert_eq!(*l, Expression::integer(1));
                assert_eq!(*r, Expression::integer(2));
            }
            _ => panic!("expected a BinaryOp"),
        }
    }
}
