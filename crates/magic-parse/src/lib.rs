#![deny(missing_docs)]
//! Parses detected symbols and connections into a [`Program`] AST
//!: symbol graph construction, main-entry recovery, and the
//! statement/expression dispatch tables, with per-statement panic
//! recovery aggregated into a single `Syntax` error.

/// Expression dispatch: folds a node into an [`magic_graph::Expression`].
pub mod expression;
/// Symbol graph construction from explicit connections or inference.
pub mod graph;
/// Main-entry recovery.
pub mod main_entry;
/// Statement dispatch: folds a node into a [`magic_graph::Statement`].
pub mod statement;

use std::collections::{HashMap, VecDeque};
use std::panic::{self, AssertUnwindSafe};

use magic_core::{Connection, ErrorInfo, ErrorKind, MagicError, ParserConfig, Symbol, SymbolId, SymbolType};
use magic_graph::{Program, Statement, SymbolGraph};

pub use graph::build_graph;

/// Parses `(symbols, connections)` into a `Program`, returning the
/// best-effort program alongside an aggregated `Syntax` error when any
/// statement failed to parse.
pub fn parse(symbols: &[Symbol], connections: &[Connection], config: &ParserConfig) -> (Program, Option<MagicError>) {
    let mut graph = build_graph(symbols, connections, config);
    let symbol_map: HashMap<_, _> = symbols.iter().map(|s| (s.id, s)).collect();

    let has_outer_circle = symbols.iter().any(|s| s.symbol_type == SymbolType::OuterCircle);
    let double_circle = symbols.iter().find(|s| s.symbol_type == SymbolType::DoubleCircle).map(|s| s.id);

    let mut errors = Vec::new();
    let mut globals = Vec::new();
    for root in graph.roots() {
        visit(root, &symbol_map, &mut graph, &mut errors, &mut globals);
    }

    if connections.is_empty() {
        // Pure inference: the main entry's body isn't limited to the
        // DoubleCircle's direct children (a Square feeding an operator
        // feeding a Star sits several connection hops below it, and
        // none of those nodes are graph roots), so its subtree is swept
        // transitively. A bare `OuterCircle` with no `DoubleCircle` is
        // deliberately left unswept: its inferred attachments (e.g. a
        // decorative, unconnected Star) fall through to
        // `recover_main_entry`'s "Hello, World!" synthesis instead.
        if let Some(main) = double_circle {
            let mut queue: VecDeque<SymbolId> = graph.children(main).iter().copied().collect();
            while let Some(id) = queue.pop_front() {
                if graph.is_visited(id) {
                    continue;
                }
                queue.extend(graph.children(id).iter().copied());
                visit(id, &symbol_map, &mut graph, &mut errors, &mut globals);
            }
        }
    } else {
        // Every edge here was deliberately drawn, so nothing is
        // decorative: give every remaining node a chance to fold into a
        // statement, even ones with no DoubleCircle/root path to them
        // (e.g. a Pentagon whose loop-bound Square is its only parent).
        for id in graph.ids().collect::<Vec<_>>() {
            visit(id, &symbol_map, &mut graph, &mut errors, &mut globals);
        }
    }

    let main_entry = main_entry::recover_main_entry(&symbol_map, double_circle, globals.clone());
    let globals = if main_entry.is_some() { Vec::new() } else { globals };

    let program = Program { has_outer_circle, main_entry, functions: Vec::new(), globals };

    let aggregated = if errors.is_empty() { None } else { Some(MagicError::aggregate_syntax(errors)) };

    tracing::debug!(has_main = program.main_entry.is_some(), errors = aggregated.is_some(), "parse complete");
    (program, aggregated)
}

/// Folds `id` into a statement, catching panics and recording them as a
/// `Syntax` error, and appends a genuine (not memoized-cached) result to
/// `globals`.
fn visit(
    id: SymbolId,
    symbol_map: &HashMap<SymbolId, &Symbol>,
    graph: &mut SymbolGraph,
    errors: &mut Vec<MagicError>,
    globals: &mut Vec<Statement>,
) {
    if graph.is_visited(id) {
        return;
    }
    let mut local_errors = Vec::new();
    let outcome =
        panic::catch_unwind(AssertUnwindSafe(|| statement::statement_for(id, symbol_map, graph, &mut local_errors)));
    match outcome {
        Ok(Some(stmt)) => {
            errors.extend(local_errors);
            globals.push(stmt);
        }
        Ok(None) => errors.extend(local_errors),
        Err(payload) => {
            let message = panic_message(&payload);
            errors.push(MagicError::new(
                ErrorKind::Syntax,
                ErrorInfo::new("E_SYNTAX_PANIC", format!("statement parsing panicked: {message}"))
                    .with_context("symbol_id", id.index().to_string()),
            ));
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
