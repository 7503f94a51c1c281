#![deny(missing_docs)]
//! Shape classification: Douglas-Peucker vertex reduction, the
//! first-match classification cascade, and the interior pattern
//! analyzer.

/// The shape-classification cascade.
pub mod classify;
/// The interior pattern analyzer.
pub mod pattern;
/// Douglas-Peucker polyline simplification.
pub mod simplify;

pub use classify::classify_shape;
pub use pattern::classify_pattern;
pub use simplify::simplify_contour;
