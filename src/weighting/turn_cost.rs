use ahash::AHashMap;

use super::Weighting;
use crate::graphs::{EdgeId, EdgeState, VertexId, Weight, NO_EDGE};

/// Adds a table of turn costs on top of another weighting.
pub struct TurnCostWeighting<W: Weighting> {
    inner: W,
    turn_costs: AHashMap<(EdgeId, VertexId, EdgeId), Weight>,
}

impl<W: Weighting> TurnCostWeighting<W> {
    pub fn new(inner: W) -> Self {
        TurnCostWeighting {
            inner,
            turn_costs: AHashMap::new(),
        }
    }

    pub fn set_turn_cost(
        &mut self,
        in_edge: EdgeId,
        via: VertexId,
        out_edge: EdgeId,
        cost: Weight,
    ) {
        self.turn_costs.insert((in_edge, via, out_edge), cost);
    }

    /// Forbids turning from `in_edge` into `out_edge` at `via`.
    pub fn restrict_turn(&mut self, in_edge: EdgeId, via: VertexId, out_edge: EdgeId) {
        self.set_turn_cost(in_edge, via, out_edge, Weight::INFINITY);
    }
}

impl<W: Weighting> Weighting for TurnCostWeighting<W> {
    fn edge_weight(&self, edge: &EdgeState, reverse: bool) -> Weight {
        self.inner.edge_weight(edge, reverse)
    }

    fn turn_weight(&self, in_edge: EdgeId, via: VertexId, out_edge: EdgeId) -> Weight {
        if in_edge == NO_EDGE || out_edge == NO_EDGE {
            return 0.0;
        }
        self.turn_costs
            .get(&(in_edge, via, out_edge))
            .copied()
            .unwrap_or(0.0)
    }

    fn name(&self) -> &str {
        "turn_cost"
    }
}
