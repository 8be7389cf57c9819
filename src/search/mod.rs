use bidirectional::BidirectionalDijkstra;
use options::SearchOptions;
use path::{Path, ShortestPathRequest};

use crate::{
    error::SearchError,
    graphs::{Graph, Weight},
    weighting::Weighting,
};

pub mod best_path;
pub mod bidirectional;
pub mod collections;
pub mod dijkstra;
pub mod options;
pub mod path;
pub mod traversal;

pub trait PathFinding: Send + Sync {
    /// `Ok(None)` if the target can not be reached from the source.
    fn shortest_path(&self, request: &ShortestPathRequest) -> Result<Option<Path>, SearchError>;

    fn shortest_path_weight(
        &self,
        request: &ShortestPathRequest,
    ) -> Result<Option<Weight>, SearchError> {
        Ok(self.shortest_path(request)?.map(|path| path.weight))
    }

    fn number_of_vertices(&self) -> u32;
}

/// Answers queries with a fresh [`BidirectionalDijkstra`] each, so one router
/// can serve several threads at once.
pub struct BidirectionalRouter<G: Graph, W: Weighting> {
    pub graph: G,
    pub weighting: W,
    pub options: SearchOptions,
}

impl<G: Graph, W: Weighting> BidirectionalRouter<G, W> {
    pub fn new(graph: G, weighting: W, options: SearchOptions) -> Self {
        BidirectionalRouter {
            graph,
            weighting,
            options,
        }
    }

    pub fn search(&self) -> BidirectionalDijkstra<'_> {
        BidirectionalDijkstra::new(&self.graph, &self.weighting, self.options.clone())
    }
}

impl<G: Graph, W: Weighting> PathFinding for BidirectionalRouter<G, W> {
    fn shortest_path(&self, request: &ShortestPathRequest) -> Result<Option<Path>, SearchError> {
        let mut search = self.search();
        search.init_from(request.source, 0.0)?;
        search.init_to(request.target, 0.0)?;
        search.run()
    }

    fn number_of_vertices(&self) -> u32 {
        self.graph.number_of_vertices()
    }
}
