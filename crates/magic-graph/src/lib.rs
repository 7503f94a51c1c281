#![deny(missing_docs)]
//! Symbol graph node and AST node type definitions shared between the
//! parser and anything downstream that inspects a parsed program.
//!
//! This crate owns no parsing logic — `magic-parse` builds the graph
//! and folds it into an AST; this crate only defines the shapes both
//! sides agree on.

/// AST node types: `Program`, `FunctionDef`, statements, expressions.
pub mod ast;
/// The symbol graph arena and its per-node bookkeeping.
pub mod node;

pub use ast::{
    AstNode, BinaryOperator, DataType, Expression, FunctionDef, LiteralType, LiteralValue, Program, Statement,
    UnaryOperator,
};
pub use node::{SymbolGraph, SymbolGraphNode};
