//! Symbol types, interior pattern tags, and the `Symbol` record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geometry::Position;

/// Stable identifier for a [`Symbol`] within a single detection run.
///
/// Symbols are owned by the detector's output vector; every other
/// structure (connections, graph nodes) refers to a symbol by this
/// index-backed handle rather than by copying the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SymbolId(u32);

impl SymbolId {
    /// Creates a symbol id from its raw index into the symbols vector.
    pub fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// Returns the raw index into the symbols vector.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// The finite set of recognized shape/glyph tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SymbolType {
    /// The outer frame enclosing the whole program; never a connection
    /// endpoint.
    OuterCircle,
    /// A plain circle.
    Circle,
    /// Concentric rings; denotes the main entry point.
    DoubleCircle,
    /// A (possibly rounded) square.
    Square,
    /// A three-vertex polygon.
    Triangle,
    /// A five-vertex polygon.
    Pentagon,
    /// A six-vertex polygon.
    Hexagon,
    /// A generic star shape (fallback bucket).
    Star,
    /// A six-pointed star (11-13 simplified vertices).
    SixPointedStar,
    /// An eight-pointed star (14-18 simplified vertices).
    EightPointedStar,
    /// The `+` operator glyph.
    Convergence,
    /// The `-` operator glyph.
    Divergence,
    /// The `*` operator glyph.
    Amplification,
    /// The `/` operator glyph.
    Distribution,
    /// An arrow-shaped transfer/assignment glyph.
    Transfer,
    /// A seal glyph (reserved for future operator extensions).
    Seal,
    /// A circulation glyph (reserved for future operator extensions).
    Circulation,
    /// The `==` comparison glyph.
    Equal,
    /// The `!=` comparison glyph.
    NotEqual,
    /// The `<` comparison glyph.
    LessThan,
    /// The `>` comparison glyph.
    GreaterThan,
    /// The `<=` comparison glyph.
    LessEqual,
    /// The `>=` comparison glyph.
    GreaterEqual,
    /// Logical AND.
    LogicalAnd,
    /// Logical OR.
    LogicalOr,
    /// Logical NOT.
    LogicalNot,
    /// Logical XOR.
    LogicalXor,
    /// A contour that survived filtering but matched no classification
    /// rule.
    Unknown,
}

impl SymbolType {
    /// Returns true for the comparison-operator glyphs
    /// (`==`, `!=`, `<`, `>`, `<=`, `>=`).
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            SymbolType::Equal
                | SymbolType::NotEqual
                | SymbolType::LessThan
                | SymbolType::GreaterThan
                | SymbolType::LessEqual
                | SymbolType::GreaterEqual
        )
    }

    /// Returns true for the arithmetic-operator glyphs
    /// (`+`, `-`, `*`, `/`).
    pub fn is_arithmetic_operator(&self) -> bool {
        matches!(
            self,
            SymbolType::Convergence
                | SymbolType::Divergence
                | SymbolType::Amplification
                | SymbolType::Distribution
        )
    }

    /// Returns true for any operator glyph (arithmetic, comparison,
    /// logical, or transfer).
    pub fn is_operator(&self) -> bool {
        self.is_arithmetic_operator()
            || self.is_comparison()
            || matches!(
                self,
                SymbolType::Transfer
                    | SymbolType::LogicalAnd
                    | SymbolType::LogicalOr
                    | SymbolType::LogicalNot
                    | SymbolType::LogicalXor
            )
    }
}

/// Interior-pattern label attached to a [`Symbol`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PatternTag {
    /// No ink inside the shape.
    Empty,
    /// A single dot.
    Dot,
    /// Two dots.
    DoubleDot,
    /// Three dots.
    TripleDot,
    /// Four to nine dots.
    MultiDot,
    /// Unclassified line fill.
    Lines,
    /// Dominant horizontal fill lines.
    HorizontalLines,
    /// Dominant vertical fill lines.
    VerticalLines,
    /// Three roughly equal fill lines.
    TripleLine,
    /// A cross (both middle row and column filled).
    Cross,
    /// A filled half-disc arc.
    HalfCircle,
    /// Densely filled with no arc or cross signature.
    Filled,
    /// A sparse pattern with more components than `MultiDot` covers.
    Pattern,
}

/// A detected symbol: its shape, location, confidence, and interior
/// pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    /// Identity within the current detection run.
    pub id: SymbolId,
    /// Classified shape.
    pub symbol_type: SymbolType,
    /// Sub-pixel centroid position.
    pub position: Position,
    /// Characteristic size (e.g. the bounding box's larger dimension).
    pub size: f64,
    /// Classification confidence in `[0, 1]`.
    pub confidence: f64,
    /// Interior pattern label.
    pub pattern: PatternTag,
    /// Arbitrary auxiliary key-value properties (debug/diagnostic use).
    pub properties: BTreeMap<String, String>,
}

impl Symbol {
    /// Creates a new symbol with empty auxiliary properties.
    pub fn new(
        id: SymbolId,
        symbol_type: SymbolType,
        position: Position,
        size: f64,
        confidence: f64,
        pattern: PatternTag,
    ) -> Self {
        Self {
            id,
            symbol_type,
            position,
            size,
            confidence: confidence.clamp(0.0, 1.0),
            pattern,
            properties: BTreeMap::new(),
        }
    }

    /// Returns true if this symbol is the outer frame.
    pub fn is_outer_circle(&self) -> bool {
        matches!(self.symbol_type, SymbolType::OuterCircle)
    }
}
