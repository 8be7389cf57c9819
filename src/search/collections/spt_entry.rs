use crate::graphs::{EdgeId, EdgeState, VertexId, Weight, NO_EDGE};

/// Handle of an entry inside the arena of a [`super::frontier::Frontier`].
pub type EntryId = u32;

/// What a frontier needs to know about the entries of its shortest path tree.
///
/// Entries are never changed once created. A cheaper way to reach the same
/// state creates a new entry that replaces the old one in the frontier.
pub trait SearchEntry: Clone {
    fn root(vertex: VertexId, weight: Weight) -> Self;

    fn child(edge: &EdgeState, weight: Weight, parent: EntryId, parent_entry: &Self) -> Self;

    /// Vertex this entry reached.
    fn vertex(&self) -> VertexId;

    /// Edge this entry was reached over, [`NO_EDGE`] for roots.
    fn edge(&self) -> EdgeId;

    fn weight(&self) -> Weight;

    fn parent(&self) -> Option<EntryId>;

    fn is_root(&self) -> bool {
        self.parent().is_none()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SptEntry {
    pub vertex: VertexId,
    pub edge: EdgeId,
    pub weight: Weight,
    pub parent: Option<EntryId>,
}

impl SearchEntry for SptEntry {
    fn root(vertex: VertexId, weight: Weight) -> Self {
        SptEntry {
            vertex,
            edge: NO_EDGE,
            weight,
            parent: None,
        }
    }

    fn child(edge: &EdgeState, weight: Weight, parent: EntryId, _parent_entry: &Self) -> Self {
        SptEntry {
            vertex: edge.adj,
            edge: edge.edge,
            weight,
            parent: Some(parent),
        }
    }

    fn vertex(&self) -> VertexId {
        self.vertex
    }

    fn edge(&self) -> EdgeId {
        self.edge
    }

    fn weight(&self) -> Weight {
        self.weight
    }

    fn parent(&self) -> Option<EntryId> {
        self.parent
    }
}
