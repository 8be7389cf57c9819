use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use indicatif::ProgressIterator;
use serde::{Deserialize, Serialize};

use crate::error::GraphError;

pub mod vec_graph;

pub type VertexId = u32;
pub type EdgeId = u32;
pub type Weight = f64;

/// Edge id carried by root entries, which were not reached over any edge.
pub const NO_EDGE: EdgeId = EdgeId::MAX;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightedEdge {
    pub tail: VertexId,
    pub head: VertexId,
    pub weight: Weight,
}

impl WeightedEdge {
    pub fn new(tail: VertexId, head: VertexId, weight: Weight) -> WeightedEdge {
        WeightedEdge { tail, head, weight }
    }

    pub fn reversed(&self) -> WeightedEdge {
        WeightedEdge {
            tail: self.head,
            head: self.tail,
            weight: self.weight,
        }
    }
}

/// One step of an edge iteration.
///
/// `base` is the vertex the iteration started at and `adj` the vertex on the
/// other side. For incoming edges `base` is the head of the original edge and
/// `adj` its tail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeState {
    pub edge: EdgeId,
    pub base: VertexId,
    pub adj: VertexId,
    pub distance: Weight,
}

pub trait Graph: Send + Sync {
    fn number_of_vertices(&self) -> u32;

    fn number_of_edges(&self) -> u32 {
        (0..self.number_of_vertices())
            .map(|vertex| self.out_edges(vertex).count() as u32)
            .sum::<u32>()
    }

    fn out_edges(&self, vertex: VertexId) -> Box<dyn ExactSizeIterator<Item = EdgeState> + '_>;

    fn in_edges(&self, vertex: VertexId) -> Box<dyn ExactSizeIterator<Item = EdgeState> + '_>;

    /// Returns the cheapest edge from `tail` to `head`, if there is one.
    fn edge_between(&self, tail: VertexId, head: VertexId) -> Option<EdgeState> {
        self.out_edges(tail)
            .filter(|edge| edge.adj == head)
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn contains_vertex(&self, vertex: VertexId) -> bool {
        vertex < self.number_of_vertices()
    }
}

/// Reads an `.fmi` file and returns the declared number of vertices together
/// with the edges. Edges pointing outside the declared vertex range are
/// rejected.
pub fn read_edges_from_fmi_file(file: &Path) -> Result<(usize, Vec<WeightedEdge>), GraphError> {
    let reader = BufReader::new(File::open(file)?);
    let mut lines = reader.lines().enumerate();

    // skip comment and empty lines
    let mut header = Vec::with_capacity(2);
    for (number, line) in lines.by_ref() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        header.push(parse_field::<usize>(Some(line), number, "count")?);
        if header.len() == 2 {
            break;
        }
    }
    let [number_of_vertices, number_of_edges] = header[..] else {
        return Err(GraphError::Parse {
            line: 0,
            reason: "missing vertex or edge count".to_string(),
        });
    };

    let edges = lines
        .progress_count((number_of_vertices + number_of_edges) as u64)
        .skip(number_of_vertices)
        .take(number_of_edges)
        .map(|(number, line)| -> Result<WeightedEdge, GraphError> {
            // srcIDX trgIDX cost type maxspeed
            let line = line?;
            let mut values = line.split_whitespace();
            let tail: VertexId = parse_field(values.next(), number, "tail")?;
            let head: VertexId = parse_field(values.next(), number, "head")?;
            let weight = parse_field(values.next(), number, "weight")?;
            for vertex in [tail, head] {
                if vertex as usize >= number_of_vertices {
                    return Err(GraphError::Parse {
                        line: number + 1,
                        reason: format!(
                            "vertex {} out of range, {} vertices declared",
                            vertex, number_of_vertices
                        ),
                    });
                }
            }
            Ok(WeightedEdge { tail, head, weight })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok((number_of_vertices, edges))
}

fn parse_field<T: std::str::FromStr>(
    value: Option<&str>,
    line: usize,
    field: &str,
) -> Result<T, GraphError> {
    let value = value.ok_or_else(|| GraphError::Parse {
        line: line + 1,
        reason: format!("no {} found", field),
    })?;
    value.parse().map_err(|_| GraphError::Parse {
        line: line + 1,
        reason: format!("unable to parse {} '{}'", field, value),
    })
}
