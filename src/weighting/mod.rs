use crate::graphs::{EdgeId, EdgeState, VertexId, Weight};

pub mod turn_cost;

/// Cost model consumed by the searches.
///
/// Weights must be non-negative. `Weight::INFINITY` marks an edge or a turn
/// as impassable.
pub trait Weighting: Send + Sync {
    /// Weight of traversing `edge`. `reverse` is set when the edge was reached
    /// by a backward search, that is through [`crate::graphs::Graph::in_edges`].
    fn edge_weight(&self, edge: &EdgeState, reverse: bool) -> Weight;

    /// Weight of turning from `in_edge` into `out_edge` at `via`.
    fn turn_weight(&self, _in_edge: EdgeId, _via: VertexId, _out_edge: EdgeId) -> Weight {
        0.0
    }

    fn name(&self) -> &str;
}

/// Uses the stored edge distance as weight.
#[derive(Clone, Copy, Debug, Default)]
pub struct DistanceWeighting;

impl Weighting for DistanceWeighting {
    fn edge_weight(&self, edge: &EdgeState, _reverse: bool) -> Weight {
        edge.distance
    }

    fn name(&self) -> &str {
        "distance"
    }
}
