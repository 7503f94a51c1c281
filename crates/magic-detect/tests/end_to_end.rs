//! Parser-level end-to-end scenarios: hand-built symbol/connection
//! fixtures carried through `magic_detect::parse`, one per scenario.
//! Pixel-rasterized fixtures exercise the frame-detection and negative
//! paths (see `src/lib.rs`'s unit tests); these exercise AST shape
//! directly, since asserting exact simplified-vertex counts without
//! running the toolchain would risk testing unverified geometry rather
//! than parser behavior.

use magic_core::{Connection, ConnectionType, ErrorKind, ParserConfig, PatternTag, Position, Symbol, SymbolId, SymbolType};
use magic_detect::parse;
use magic_graph::{BinaryOperator, Expression, Statement};

fn sym(id: u32, ty: SymbolType, x: f64, y: f64, pattern: PatternTag) -> Symbol {
    Symbol::new(SymbolId::from_index(id as usize), ty, Position::new(x, y), 10.0, 1.0, pattern)
}

/// Scenario 2: a frame with a single disconnected `Star` synthesizes
/// the `Hello, World!` main entry once the frame claims the star as
/// its (unprocessed) child, leaving the global statement list empty.
#[test]
fn frame_and_lone_star_synthesizes_hello_world() {
    let symbols = vec![
        sym(0, SymbolType::OuterCircle, 100.0, 0.0, PatternTag::Empty),
        sym(1, SymbolType::Star, 100.0, 60.0, PatternTag::Empty),
    ];
    let (program, error) = parse(&symbols, &[], &ParserConfig::default());
    assert!(error.is_none());
    let main = program.main_entry.expect("main entry synthesized");
    assert!(main.is_main);
    assert_eq!(main.body, vec![Statement::OutputStatement { value: Expression::string("Hello, World!") }]);
}

/// Scenario 3: two `Square` operands feeding a `Convergence` (`+`)
/// operator that itself feeds a `Star`. Both operands are resolved
/// through the operator's two parent edges, nearest first, with no
/// unbalanced-expression error.
#[test]
fn frame_double_circle_and_operator_squares_produce_an_addition() {
    let symbols = vec![
        sym(0, SymbolType::OuterCircle, 100.0, 0.0, PatternTag::Empty),
        sym(1, SymbolType::DoubleCircle, 100.0, 20.0, PatternTag::Empty),
        sym(2, SymbolType::Square, 70.0, 90.0, PatternTag::Dot),
        sym(3, SymbolType::Square, 130.0, 90.0, PatternTag::DoubleDot),
        sym(4, SymbolType::Convergence, 100.0, 90.0, PatternTag::Empty),
        sym(5, SymbolType::Star, 100.0, 160.0, PatternTag::Empty),
    ];
    let (program, error) = parse(&symbols, &[], &ParserConfig::default());
    assert!(error.is_none());

    let main = program.main_entry.expect("double circle recovers a main entry");
    let output = main.body.iter().find_map(|stmt| match stmt {
        Statement::OutputStatement { value } => Some(value),
        _ => None,
    });
    match output.expect("star prints the operator's result") {
        Expression::BinaryOp { op, left, right, .. } => {
            assert_eq!(*op, BinaryOperator::Add);
            assert_eq!(**left, Expression::integer(1));
            assert_eq!(**right, Expression::integer(2));
        }
        other => panic!("expected a BinaryOp, got {other:?}"),
    }
}

/// Scenario 4: a `Pentagon` with a `Square` parent (the loop bound)
/// and a `Star` child becomes a `ForLoop` counting from 0 to the
/// square's literal value.
#[test]
fn frame_pentagon_with_square_parent_becomes_a_for_loop() {
    let symbols = vec![
        sym(0, SymbolType::OuterCircle, 100.0, 0.0, PatternTag::Empty),
        sym(1, SymbolType::Square, 100.0, 20.0, PatternTag::TripleDot),
        sym(2, SymbolType::Pentagon, 100.0, 80.0, PatternTag::Empty),
        sym(3, SymbolType::Star, 100.0, 140.0, PatternTag::Empty),
    ];
    let connections = vec![
        Connection::new(symbols[1].id, symbols[2].id, ConnectionType::Solid),
        Connection::new(symbols[2].id, symbols[3].id, ConnectionType::Solid),
    ];
    let (program, error) = parse(&symbols, &connections, &ParserConfig::default());
    assert!(error.is_none());
    let globals = if program.main_entry.is_some() { &program.main_entry.as_ref().unwrap().body } else { &program.globals };
    let for_loop = globals.iter().find_map(|stmt| match stmt {
        Statement::ForLoop { start, end, step, body, .. } => Some((start, end, step, body)),
        _ => None,
    });
    let (start, end, step, body) = for_loop.expect("pentagon with a square parent becomes a ForLoop");
    assert_eq!(*start, Expression::integer(0));
    assert_eq!(*end, Expression::integer(3));
    assert_eq!(*step, Expression::integer(1));
    assert_eq!(body.len(), 1);
}

/// Scenario 5: a `Triangle` with one `Star` child to its left and one
/// to its right splits into a then/else `IfStatement`.
#[test]
fn frame_triangle_with_flanking_stars_becomes_an_if_statement() {
    let symbols = vec![
        sym(0, SymbolType::OuterCircle, 100.0, 0.0, PatternTag::Empty),
        sym(1, SymbolType::Triangle, 100.0, 40.0, PatternTag::Empty),
        sym(2, SymbolType::Star, 60.0, 100.0, PatternTag::Empty),
        sym(3, SymbolType::Star, 140.0, 100.0, PatternTag::Empty),
    ];
    let connections = vec![
        Connection::new(symbols[1].id, symbols[2].id, ConnectionType::Solid),
        Connection::new(symbols[1].id, symbols[3].id, ConnectionType::Solid),
    ];
    let (program, error) = parse(&symbols, &connections, &ParserConfig::default());
    assert!(error.is_none());
    let globals = if program.main_entry.is_some() { &program.main_entry.as_ref().unwrap().body } else { &program.globals };
    let if_stmt = globals.iter().find_map(|stmt| match stmt {
        Statement::IfStatement { then_branch, else_branch, .. } => Some((then_branch, else_branch)),
        _ => None,
    });
    let (then_branch, else_branch) = if_stmt.expect("triangle with flanking stars becomes an IfStatement");
    assert_eq!(then_branch.len(), 1);
    assert_eq!(else_branch.len(), 1);
}

/// Scenario 6: a `Hexagon` with one `Star` child in each quadrant
/// becomes a `ParallelBlock` with four branches.
#[test]
fn frame_hexagon_with_four_quadrant_stars_becomes_a_parallel_block() {
    let symbols = vec![
        sym(0, SymbolType::OuterCircle, 100.0, 0.0, PatternTag::Empty),
        sym(1, SymbolType::Hexagon, 100.0, 100.0, PatternTag::Empty),
        sym(2, SymbolType::Star, 140.0, 60.0, PatternTag::Empty),
        sym(3, SymbolType::Star, 60.0, 60.0, PatternTag::Empty),
        sym(4, SymbolType::Star, 60.0, 140.0, PatternTag::Empty),
        sym(5, SymbolType::Star, 140.0, 140.0, PatternTag::Empty),
    ];
    let connections = (2..=5)
        .map(|i| Connection::new(symbols[1].id, symbols[i].id, ConnectionType::Solid))
        .collect::<Vec<_>>();
    let (program, error) = parse(&symbols, &connections, &ParserConfig::default());
    assert!(error.is_none());
    let globals = if program.main_entry.is_some() { &program.main_entry.as_ref().unwrap().body } else { &program.globals };
    let branches = globals.iter().find_map(|stmt| match stmt {
        Statement::ParallelBlock { branches } => Some(branches),
        _ => None,
    });
    assert_eq!(branches.expect("hexagon becomes a ParallelBlock").len(), 4);
}

/// A binary operator connected to a single operand still produces a
/// best-effort `BinaryOp`, zero-padded, alongside an aggregated
/// `UnbalancedExpression` error.
#[test]
fn operator_with_a_single_operand_is_unbalanced_but_recoverable() {
    let symbols = vec![
        sym(0, SymbolType::Square, 0.0, 0.0, PatternTag::Dot),
        sym(1, SymbolType::Divergence, 30.0, 0.0, PatternTag::Empty),
        sym(2, SymbolType::Star, 30.0, 60.0, PatternTag::Empty),
    ];
    let connections = vec![
        Connection::new(symbols[0].id, symbols[1].id, ConnectionType::Solid),
        Connection::new(symbols[1].id, symbols[2].id, ConnectionType::Solid),
    ];
    let (program, error) = parse(&symbols, &connections, &ParserConfig::default());
    let aggregated = error.expect("single operand is unbalanced");
    assert_eq!(aggregated.cause().unwrap().kind(), ErrorKind::UnbalancedExpression);

    let globals = if program.main_entry.is_some() { &program.main_entry.as_ref().unwrap().body } else { &program.globals };
    let printed = globals.iter().find_map(|stmt| match stmt {
        Statement::OutputStatement { value } => Some(value),
        _ => None,
    });
    match printed.expect("star prints the unbalanced subtraction") {
        Expression::BinaryOp { op, left, right, .. } => {
            assert_eq!(*op, BinaryOperator::Subtract);
            assert_eq!(**left, Expression::integer(1));
            assert_eq!(**right, Expression::integer(0));
        }
        other => panic!("expected a BinaryOp, got {other:?}"),
    }
}
