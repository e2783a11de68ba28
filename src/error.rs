//! Error types shared by every algorithm.
//!
//! Only malformed input is an error. Conditions the algorithms are designed
//! to report (negative cycles, unreachable targets, disconnected inputs) are
//! ordinary results.

/// Graph algorithm error types.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// A start, source, target or goal vertex is not part of the graph.
    #[error("Vertex not found: {0}")]
    VertexNotFound(String),

    /// A grid cell lies outside the grid.
    #[error("Cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    CellOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// An algorithm that needs a DAG was given a graph with a cycle.
    #[error("Graph is not acyclic: only {sorted} of {total} vertices could be ordered")]
    NotAcyclic { sorted: usize, total: usize },

    /// An algorithm was selected by a name nothing answers to.
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Snapshot could not be decoded into a graph.
    #[error("Invalid graph snapshot: {0}")]
    Snapshot(String),
}

/// Result type for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;
