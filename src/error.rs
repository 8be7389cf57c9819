use thiserror::Error;

use crate::graphs::{EdgeId, VertexId, Weight};

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("vertex {vertex} is not part of a graph with {number_of_vertices} vertices")]
    InvalidNode {
        vertex: VertexId,
        number_of_vertices: u32,
    },

    /// Negative or NaN weights break the stopping criterion, so they are
    /// rejected instead of producing a wrong path.
    #[error("invalid weight {weight} for edge {edge}")]
    InvalidWeight { edge: EdgeId, weight: Weight },

    #[error("search needs a start and an end vertex before it can run")]
    NotInitialized,
}

#[derive(Debug, Error)]
pub enum GraphError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("unable to decode graph: {0}")]
    Decode(#[from] bincode::Error),
}

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("unable to parse search options: {0}")]
    Json(#[from] serde_json::Error),
}
