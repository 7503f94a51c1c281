#![deny(missing_docs)]
//! Top-level facade: `detect()` turns a decoded pixel buffer into
//! `(symbols, connections)`; `parse()` turns those into a `Program`.
//! Wires together preprocessing (`magic-raster`), contour tracing
//! (`magic-contour`), shape/pattern classification (`magic-shape`),
//! connection detection (`magic-connect`), and parsing (`magic-parse`).

/// The dependency-free PNG debug-dump writer.
pub mod debug_dump;

use magic_connect::{detect_connections, detect_connections_batch};
use magic_contour::{find_contours, find_contours_parallel, merge_edge_touching, Contour};
use magic_core::{
    BinaryImage, Connection, DetectorConfig, ErrorInfo, ErrorKind, MagicError, ParserConfig, PixelBuffer, Symbol,
    SymbolId, SymbolType,
};
use magic_graph::Program;
use magic_raster::{preprocess, MorphologyOp};
use magic_shape::{classify_pattern, classify_shape};

/// Runs the full detector pipeline: preprocessing, contour tracing,
/// shape classification, pattern analysis, and connection detection.
///
/// Returns whatever symbols/connections were recovered alongside an
/// optional error; a `NoSymbolsDetected`/`NoOuterCircle` error still
/// carries the partial symbol list so callers can inspect what was
/// found.
pub fn detect(buf: &PixelBuffer, config: &DetectorConfig) -> (Vec<Symbol>, Vec<Connection>, Option<MagicError>) {
    let binary = match preprocess(buf, config, false, MorphologyOp::None) {
        Ok(binary) => binary,
        Err(err) => return (Vec::new(), Vec::new(), Some(err)),
    };

    let contours = trace_contours(&binary, config);
    let symbols = classify_symbols(&contours, &binary, config);

    maybe_dump(config, &binary, &symbols);

    if symbols.is_empty() {
        let err = MagicError::new(ErrorKind::NoSymbolsDetected, ErrorInfo::new("E_NO_SYMBOLS", "no symbols were detected in the input"));
        return (symbols, Vec::new(), Some(err));
    }
    if !symbols.iter().any(Symbol::is_outer_circle) {
        let err = MagicError::new(
            ErrorKind::NoOuterCircle,
            ErrorInfo::new("E_NO_OUTER_CIRCLE", "no OuterCircle frame was present among the detected symbols"),
        );
        return (symbols, Vec::new(), Some(err));
    }

    let connections = if config.parallel {
        detect_connections_batch(&symbols, &binary)
    } else {
        detect_connections(&symbols, &binary, config)
    };

    tracing::debug!(symbols = symbols.len(), connections = connections.len(), "detect complete");
    (symbols, connections, None)
}

/// Parses detected `(symbols, connections)` into a `Program`. A thin
/// pass-through to `magic_parse::parse` kept here so callers only need
/// to depend on this facade crate. An empty `connections` slice
/// triggers position-based inference.
pub fn parse(symbols: &[Symbol], connections: &[Connection], config: &ParserConfig) -> (Program, Option<MagicError>) {
    magic_parse::parse(symbols, connections, config)
}

fn trace_contours(binary: &BinaryImage, config: &DetectorConfig) -> Vec<Contour> {
    let contours = if config.parallel {
        let strips = std::thread::available_parallelism().map(|n| n.get() as u32).unwrap_or(1);
        find_contours_parallel(binary, config.min_contour_area, strips)
    } else {
        find_contours(binary, config.min_contour_area)
    };
    merge_edge_touching(contours, binary.width(), binary.height())
}

fn classify_symbols(contours: &[Contour], binary: &BinaryImage, config: &DetectorConfig) -> Vec<Symbol> {
    contours
        .iter()
        .enumerate()
        .map(|(index, contour)| {
            let shape = classify_shape(contour, binary.width(), binary.height(), &config.classifier);
            let pattern = classify_pattern(contour, binary);
            let size = contour.bounding_box.width().max(contour.bounding_box.height()) as f64;
            let confidence = confidence_for(shape, contour);
            Symbol::new(SymbolId::from_index(index), shape, contour.centroid, size, confidence, pattern)
        })
        .collect()
}

fn confidence_for(shape: SymbolType, contour: &Contour) -> f64 {
    match shape {
        SymbolType::OuterCircle | SymbolType::Circle | SymbolType::DoubleCircle => contour.circularity,
        SymbolType::Unknown => 0.3,
        _ => contour.circularity.max(0.6),
    }
}

fn maybe_dump(config: &DetectorConfig, binary: &BinaryImage, symbols: &[Symbol]) {
    if !config.debug && std::env::var_os("DEBUG").is_none() {
        return;
    }
    let pixels: Vec<u8> = (0..binary.height())
        .flat_map(|y| (0..binary.width()).map(move |x| (x, y)))
        .map(|(x, y)| if binary.is_foreground(x as i32, y as i32) { 0 } else { 255 })
        .collect();
    if let Err(err) = debug_dump::write_grayscale_png(
        std::path::Path::new("debug_contours.png"),
        binary.width(),
        binary.height(),
        &pixels,
    ) {
        tracing::warn!(%err, "failed to write debug dump");
    }
    tracing::debug!(symbols = symbols.len(), "debug dump written");
}
