//! Main-entry recovery: the `DoubleCircle` becomes
//! `mainEntry` when present; otherwise global statements are wrapped in
//! an implicit entry, or a `Hello, World!` print is synthesized.

use std::collections::HashMap;

use magic_core::{Symbol, SymbolId, SymbolType};
use magic_graph::{DataType, Expression, FunctionDef, Statement};

/// Recovers the program's main entry point from the parsed global
/// statements and the set of detected symbols.
pub fn recover_main_entry(
    symbols: &HashMap<SymbolId, &Symbol>,
    double_circle: Option<SymbolId>,
    globals: Vec<Statement>,
) -> Option<FunctionDef> {
    if double_circle.is_some() {
        return Some(FunctionDef {
            name: "main".to_string(),
            parameters: Vec::new(),
            body: globals,
            return_type: DataType::Void,
            is_main: true,
        });
    }

    if !globals.is_empty() {
        return Some(FunctionDef {
            name: "main".to_string(),
            parameters: Vec::new(),
            body: globals,
            return_type: DataType::Void,
            is_main: true,
        });
    }

    if symbols.values().any(|s| s.symbol_type == SymbolType::Star) {
        return Some(FunctionDef {
            name: "main".to_string(),
            parameters: Vec::new(),
            body: vec![Statement::OutputStatement { value: Expression::string("Hello, World!") }],
            return_type: DataType::Void,
            is_main: true,
        });
    }

    None
}
