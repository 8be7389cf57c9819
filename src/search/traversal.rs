use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::graphs::{EdgeId, VertexId};

/// Selects what identifies a state of the search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TraversalMode {
    /// A vertex is settled once, no matter over which edge it was reached.
    #[default]
    NodeBased,
    /// Every directed edge is its own state, which is what turn costs need.
    EdgeBased,
}

impl TraversalMode {
    pub fn is_edge_based(&self) -> bool {
        matches!(self, TraversalMode::EdgeBased)
    }

    pub fn key(&self, vertex: VertexId, edge: EdgeId) -> TraversalKey {
        match self {
            TraversalMode::NodeBased => TraversalKey::Node(vertex),
            TraversalMode::EdgeBased => TraversalKey::Edge(edge),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TraversalKey {
    Node(VertexId),
    Edge(EdgeId),
}
