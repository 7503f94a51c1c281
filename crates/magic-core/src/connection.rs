//! Directed connections between symbols.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::symbol::SymbolId;

/// How a connecting line was drawn, inferred from foreground/background
/// transitions sampled along its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConnectionType {
    /// Continuous ink, at most 2 transitions sampled.
    Solid,
    /// Moderately broken ink, at most 10 transitions sampled.
    Dashed,
    /// Heavily broken ink, more than 10 transitions sampled.
    Dotted,
}

/// A directed edge between two symbols.
///
/// Invariant: `from != to`; neither endpoint is an `OuterCircle`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Source symbol (flow origin).
    pub from: SymbolId,
    /// Destination symbol (flow target).
    pub to: SymbolId,
    /// How the line was drawn.
    pub connection_type: ConnectionType,
    /// Auxiliary properties (e.g. whether the edge was inferred).
    pub properties: BTreeMap<String, String>,
}

impl Connection {
    /// Creates a new connection between two distinct symbols.
    ///
    /// Panics in debug builds if `from == to`; callers are expected to
    /// have already checked this via `isValidConnection`-equivalent logic
    /// before constructing a `Connection`.
    pub fn new(from: SymbolId, to: SymbolId, connection_type: ConnectionType) -> Self {
        debug_assert!(from != to, "a connection must not self-loop");
        Self {
            from,
            to,
            connection_type,
            properties: BTreeMap::new(),
        }
    }

    /// Marks this connection as inferred (as opposed to detected from an
    /// explicit drawn line).
    pub fn mark_inferred(mut self) -> Self {
        self.properties
            .insert("inferred".to_string(), "true".to_string());
        self
    }

    /// Returns true if this connection was produced by inference rather
    /// than line detection.
    pub fn is_inferred(&self) -> bool {
        self.properties.get("inferred").map(String::as_str) == Some("true")
    }
}
