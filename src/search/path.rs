use serde::{Deserialize, Serialize};

use super::{
    best_path::BestPath,
    collections::{frontier::Frontier, spt_entry::SearchEntry},
};
use crate::graphs::{EdgeId, VertexId, Weight};

/// Represents a request for finding a shortest path in a graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortestPathRequest {
    pub source: VertexId,
    pub target: VertexId,
}

impl ShortestPathRequest {
    pub fn new(source: VertexId, target: VertexId) -> ShortestPathRequest {
        ShortestPathRequest { source, target }
    }
}

/// Represents a path in a graph.
///
/// `vertices` has one element more than `edges`, a path from a vertex to
/// itself has a single vertex and no edges.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub vertices: Vec<VertexId>,
    pub edges: Vec<EdgeId>,
    pub weight: Weight,
}

/// Stitches the forward and the backward tree together at the best path.
pub fn extract_path<E: SearchEntry>(
    forward: &Frontier<E>,
    backward: &Frontier<E>,
    best: &BestPath,
) -> Option<Path> {
    if !best.is_found() {
        return None;
    }
    let (forward_id, backward_id) = (best.forward?, best.backward?);

    let mut vertices = Vec::new();
    let mut edges = Vec::new();

    // (source -> meeting point)
    for id in forward.path_to_root(forward_id).into_iter().rev() {
        let entry = forward.entry(id);
        if !entry.is_root() {
            edges.push(entry.edge());
        }
        vertices.push(entry.vertex());
    }

    let mut current = backward.entry(backward_id);
    if let Some(edge) = best.meeting_edge {
        edges.push(edge);
        vertices.push(current.vertex());
    }

    // (meeting point -> target), backward entries point towards the target
    while let Some(parent) = current.parent() {
        edges.push(current.edge());
        current = backward.entry(parent);
        vertices.push(current.vertex());
    }

    Some(Path {
        vertices,
        edges,
        weight: best.weight,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        graphs::EdgeState,
        search::{
            collections::spt_entry::SptEntry,
            traversal::{TraversalKey, TraversalMode},
        },
    };

    fn step(edge: EdgeId, base: VertexId, adj: VertexId) -> EdgeState {
        EdgeState {
            edge,
            base,
            adj,
            distance: 1.0,
        }
    }

    #[test]
    fn joins_trees_at_common_vertex() {
        // 0 -e0-> 1 -e1-> 2 -e2-> 3, forward reached 2, backward reached 2
        let mut forward: Frontier = Frontier::new(TraversalMode::NodeBased);
        let root = forward.push(SptEntry::root(0, 0.0));
        let root_entry = forward.entry(root).clone();
        let one = forward
            .relax(
                TraversalKey::Node(1),
                SptEntry::child(&step(0, 0, 1), 1.0, root, &root_entry),
            )
            .unwrap();
        let one_entry = forward.entry(one).clone();
        let two = forward
            .relax(
                TraversalKey::Node(2),
                SptEntry::child(&step(1, 1, 2), 2.0, one, &one_entry),
            )
            .unwrap();

        let mut backward: Frontier = Frontier::new(TraversalMode::NodeBased);
        let target = backward.push(SptEntry::root(3, 0.0));
        let target_entry = backward.entry(target).clone();
        let meet = backward
            .relax(
                TraversalKey::Node(2),
                SptEntry::child(&step(2, 3, 2), 1.0, target, &target_entry),
            )
            .unwrap();

        let best = BestPath {
            weight: 3.0,
            meeting_edge: None,
            forward: Some(two),
            backward: Some(meet),
        };
        let path = extract_path(&forward, &backward, &best).unwrap();

        assert_eq!(path.vertices, vec![0, 1, 2, 3]);
        assert_eq!(path.edges, vec![0, 1, 2]);
        assert_eq!(path.weight, 3.0);
    }

    #[test]
    fn meeting_edge_connects_roots() {
        let mut forward: Frontier = Frontier::new(TraversalMode::NodeBased);
        let source = forward.push(SptEntry::root(4, 0.0));
        let mut backward: Frontier = Frontier::new(TraversalMode::NodeBased);
        let target = backward.push(SptEntry::root(5, 0.0));

        let best = BestPath {
            weight: 2.0,
            meeting_edge: Some(11),
            forward: Some(source),
            backward: Some(target),
        };
        let path = extract_path(&forward, &backward, &best).unwrap();

        assert_eq!(path.vertices, vec![4, 5]);
        assert_eq!(path.edges, vec![11]);
    }

    #[test]
    fn no_path_without_best() {
        let forward: Frontier = Frontier::new(TraversalMode::NodeBased);
        let backward: Frontier = Frontier::new(TraversalMode::NodeBased);
        assert!(extract_path(&forward, &backward, &BestPath::default()).is_none());
    }
}
