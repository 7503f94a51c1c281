#![deny(missing_docs)]
//! The contour engine: Moore-neighborhood boundary tracing, derived
//! contour properties, edge-touching merge, and an opt-in
//! strip-parallel variant.

/// The [`Contour`] record and its derived scalar properties.
pub mod contour;
/// Merges contours split by image-edge clipping.
pub mod merge;
/// Strip-parallel contour finding for large images.
pub mod parallel;
/// Moore-neighborhood boundary tracing and whole-image contour finding.
pub mod trace;

pub use contour::Contour;
pub use merge::merge_edge_touching;
pub use parallel::find_contours_parallel;
pub use trace::{find_contours, trace_boundary};
