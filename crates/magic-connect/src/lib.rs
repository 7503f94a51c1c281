#![deny(missing_docs)]
//! The connection detector: edge image, line extraction, merge/dedup,
//! validation, type labeling, direction inference, and the diagonal
//! supplement pass.

/// Batch (opt-in parallel) connection detection over a spatial index.
pub mod batch;
/// Direction inference between validated endpoints.
pub mod direction;
/// Edge image construction (Sobel + diagonal kernels).
pub mod edges;
/// The three line extractors.
pub mod extract;
/// Connection-type labeling by transition sampling.
pub mod label;
/// The `Line` record.
pub mod line;
/// Near-duplicate line merging.
pub mod merge;
/// The diagonal supplement pass.
pub mod supplement;
/// Endpoint validation against the detected symbols.
pub mod validate;

pub use batch::detect_connections_batch;
pub use line::Line;
pub use supplement::diagonal_supplement;

use magic_core::{BinaryImage, Connection, DetectorConfig, Symbol};

/// Runs the full sequential connection-detection pipeline: edge image,
/// line extraction, merge/dedup, validation, direction inference, type
/// labeling, and the diagonal supplement pass.
pub fn detect_connections(symbols: &[Symbol], binary: &BinaryImage, config: &DetectorConfig) -> Vec<Connection> {
    let edges = edges::detect_edges(binary, config.edge_threshold);
    let lines = extract::extract_lines(&edges);
    let lines = merge::merge_lines(lines);

    let mut connections = Vec::new();
    for line in &lines {
        let Some(validated) = validate::validate_connection(line, symbols) else {
            continue;
        };
        let a = symbols.iter().find(|s| s.id == validated.a).expect("validated id");
        let b = symbols.iter().find(|s| s.id == validated.b).expect("validated id");
        let (from, to) = direction::orient(a, b);
        let conn_type = label::label_connection_type(&validated.line, binary);
        connections.push(Connection::new(from.id, to.id, conn_type));
    }

    connections.extend(supplement::diagonal_supplement(symbols, &connections, binary));

    tracing::debug!(count = connections.len(), "connection detection complete");
    connections
}
