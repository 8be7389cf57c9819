use std::collections::BinaryHeap;

use super::{collections::entry_queue::EntryQueueElement, path::Path};
use crate::{
    graphs::{EdgeId, Graph, VertexId, Weight},
    weighting::Weighting,
};

/// Plain node based Dijkstra from `source` to `target`.
///
/// Serves as a reference for the bidirectional search, negative weights are
/// not checked here.
pub fn dijkstra_one_to_one(
    graph: &dyn Graph,
    weighting: &dyn Weighting,
    source: VertexId,
    target: VertexId,
) -> Option<Path> {
    let number_of_vertices = graph.number_of_vertices() as usize;
    if source as usize >= number_of_vertices || target as usize >= number_of_vertices {
        return None;
    }

    let mut weights = vec![Weight::INFINITY; number_of_vertices];
    let mut predecessors: Vec<Option<(VertexId, EdgeId)>> = vec![None; number_of_vertices];
    let mut expanded = vec![false; number_of_vertices];
    let mut queue = BinaryHeap::new();
    let mut sequence = 0;

    weights[source as usize] = 0.0;
    queue.push(EntryQueueElement::new(0.0, sequence, source));

    while let Some(EntryQueueElement { entry: tail, .. }) = queue.pop() {
        if expanded[tail as usize] {
            continue;
        }
        expanded[tail as usize] = true;
        if tail == target {
            break;
        }

        let weight_tail = weights[tail as usize];
        for edge in graph.out_edges(tail) {
            let alternative_weight_head = weight_tail + weighting.edge_weight(&edge, false);
            if alternative_weight_head < weights[edge.adj as usize] {
                weights[edge.adj as usize] = alternative_weight_head;
                predecessors[edge.adj as usize] = Some((tail, edge.edge));
                sequence += 1;
                queue.push(EntryQueueElement::new(
                    alternative_weight_head,
                    sequence,
                    edge.adj,
                ));
            }
        }
    }

    let weight = weights[target as usize];
    if weight.is_infinite() {
        return None;
    }

    let mut vertices = vec![target];
    let mut edges = Vec::new();
    let mut current = target;
    while let Some((predecessor, edge)) = predecessors[current as usize] {
        vertices.push(predecessor);
        edges.push(edge);
        current = predecessor;
    }
    vertices.reverse();
    edges.reverse();

    Some(Path {
        vertices,
        edges,
        weight,
    })
}
