use std::{fs::File, io::BufReader, path::Path};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::{read_edges_from_fmi_file, EdgeId, EdgeState, Graph, VertexId, WeightedEdge};
use crate::error::GraphError;

/// Adjacency vectors for both directions over a shared edge list.
///
/// The id of an edge is its position in the list it was built from.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VecGraph {
    edges: Vec<WeightedEdge>,
    out_edges: Vec<Vec<EdgeId>>,
    in_edges: Vec<Vec<EdgeId>>,
}

impl VecGraph {
    pub fn from_edges(edges: &[WeightedEdge]) -> VecGraph {
        let number_of_vertices = edges
            .iter()
            .map(|edge| std::cmp::max(edge.tail, edge.head) as usize + 1)
            .max()
            .unwrap_or(0);
        VecGraph::with_vertices(number_of_vertices, edges)
    }

    /// Like [`VecGraph::from_edges`], but keeps isolated vertices at the end of
    /// the id range.
    pub fn with_vertices(number_of_vertices: usize, edges: &[WeightedEdge]) -> VecGraph {
        let mut out_edges = vec![Vec::new(); number_of_vertices];
        let mut in_edges = vec![Vec::new(); number_of_vertices];

        for (id, edge) in edges.iter().enumerate() {
            out_edges[edge.tail as usize].push(id as EdgeId);
            in_edges[edge.head as usize].push(id as EdgeId);
        }

        VecGraph {
            edges: edges.to_vec(),
            out_edges,
            in_edges,
        }
    }

    pub fn from_fmi_file(path: &Path) -> Result<VecGraph, GraphError> {
        let (number_of_vertices, edges) = read_edges_from_fmi_file(path)?;
        Ok(VecGraph::with_vertices(number_of_vertices, &edges))
    }

    pub fn from_bincode_file(path: &Path) -> Result<VecGraph, GraphError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(bincode::deserialize_from(reader)?)
    }

    /// Reads `.fmi` text files and falls back to bincode for everything else.
    pub fn from_file(path: &Path) -> Result<VecGraph, GraphError> {
        match path.extension().and_then(|extension| extension.to_str()) {
            Some("fmi") => VecGraph::from_fmi_file(path),
            _ => VecGraph::from_bincode_file(path),
        }
    }

    /// The same graph with every edge pointing the other way. Edge ids are kept.
    pub fn reversed(&self) -> VecGraph {
        let edges = self.edges.iter().map(WeightedEdge::reversed).collect_vec();
        VecGraph::with_vertices(self.out_edges.len(), &edges)
    }

    pub fn edge(&self, edge: EdgeId) -> Option<&WeightedEdge> {
        self.edges.get(edge as usize)
    }

    pub fn edges(&self) -> &[WeightedEdge] {
        &self.edges
    }

    fn states<'a>(
        &'a self,
        vertex: VertexId,
        ids: &'a [EdgeId],
        incoming: bool,
    ) -> impl ExactSizeIterator<Item = EdgeState> + 'a {
        ids.iter().map(move |&id| {
            let edge = &self.edges[id as usize];
            EdgeState {
                edge: id,
                base: vertex,
                adj: if incoming { edge.tail } else { edge.head },
                distance: edge.weight,
            }
        })
    }
}

impl Graph for VecGraph {
    fn number_of_vertices(&self) -> u32 {
        self.out_edges.len() as u32
    }

    fn number_of_edges(&self) -> u32 {
        self.edges.len() as u32
    }

    fn out_edges(&self, vertex: VertexId) -> Box<dyn ExactSizeIterator<Item = EdgeState> + '_> {
        let ids = self
            .out_edges
            .get(vertex as usize)
            .map(Vec::as_slice)
            .unwrap_or_default();
        Box::new(self.states(vertex, ids, false))
    }

    fn in_edges(&self, vertex: VertexId) -> Box<dyn ExactSizeIterator<Item = EdgeState> + '_> {
        let ids = self
            .in_edges
            .get(vertex as usize)
            .map(Vec::as_slice)
            .unwrap_or_default();
        Box::new(self.states(vertex, ids, true))
    }
}
