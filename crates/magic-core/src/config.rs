//! Detector and parser configuration.

use serde::{Deserialize, Serialize};

/// Thresholds tuned empirically by the shape classifier, exposed as
/// configuration since the `Unknown`/`Triangle` boundary in particular
/// has no principled cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierThresholds {
    /// Minimum circularity treated as circular.
    pub circle_threshold: f64,
    /// Aspect-ratio cutoff above which a 3-vertex contour is treated as
    /// a `>`/`<` comparison glyph rather than a `Triangle`.
    pub comparison_aspect_high: f64,
    /// Aspect-ratio cutoff below which a 3-vertex contour is treated as
    /// a `>`/`<` comparison glyph rather than a `Triangle`.
    pub comparison_aspect_low: f64,
    /// Douglas–Peucker epsilon floor (pixels).
    pub simplify_epsilon_floor: f64,
    /// Douglas–Peucker epsilon as a fraction of contour perimeter.
    pub simplify_epsilon_fraction: f64,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            circle_threshold: 0.8,
            comparison_aspect_high: 1.4,
            comparison_aspect_low: 0.71,
            simplify_epsilon_floor: 1.5,
            simplify_epsilon_fraction: 0.02,
        }
    }
}

/// Options controlling the detector stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Contours below this area are dropped (spec default 50-100).
    pub min_contour_area: f64,
    /// Classifier thresholds.
    pub classifier: ClassifierThresholds,
    /// Grayscale threshold used by the global binarization policy.
    pub contrast_threshold: u8,
    /// Use adaptive (block-local) thresholding instead of the global
    /// policy.
    pub use_adaptive_threshold: bool,
    /// Sobel-magnitude threshold used by the connection detector.
    pub edge_threshold: u8,
    /// Enable diagnostic PNG dumps and verbose logging.
    pub debug: bool,
    /// Maximum accepted decoded byte length.
    pub max_bytes: usize,
    /// Maximum accepted dimension (either side) in pixels.
    pub max_dim: u32,
    /// Enable the opt-in parallel pipeline stages.
    pub parallel: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_contour_area: 75.0,
            classifier: ClassifierThresholds::default(),
            contrast_threshold: 128,
            use_adaptive_threshold: false,
            edge_threshold: 40,
            debug: false,
            max_bytes: 50 * 1024 * 1024,
            max_dim: 10_000,
            parallel: false,
        }
    }
}

/// Options controlling the graph-to-AST parser (new in this expansion;
/// spec.md's parser entry takes no options, but the distance tolerances
/// it hard-codes are exposed here for testability, matching the
/// classifier's configuration treatment).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Maximum horizontal offset for a DoubleCircle to claim a symbol as
    /// a direct child during inference.
    pub main_attach_offset: f64,
    /// Maximum distance for operator/operand and Star/parent attachment
    /// during inference.
    pub infer_attach_radius: f64,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            main_attach_offset: 150.0,
            infer_attach_radius: 150.0,
        }
    }
}
