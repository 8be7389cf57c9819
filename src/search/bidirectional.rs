use std::{cell::RefCell, rc::Rc, time::Instant};

use tracing::{debug, warn};

use super::{
    best_path::{BestPath, BestPathTracker},
    collections::{
        frontier::Frontier,
        spt_entry::{EntryId, SearchEntry, SptEntry},
    },
    options::SearchOptions,
    path::{extract_path, Path},
    traversal::{TraversalKey, TraversalMode},
};
use crate::{
    error::SearchError,
    graphs::{EdgeId, EdgeState, Graph, VertexId, Weight, NO_EDGE},
    weighting::Weighting,
};

pub const DIJKSTRA_BI: &str = "dijkstra_bi";

/// Frontier that can be handed from one search to another.
pub type SharedFrontier<E> = Rc<RefCell<Frontier<E>>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchState {
    Uninitialized,
    Running,
    Found,
    Exhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// Everything one direction of the search owns.
pub struct DirectionState<E: SearchEntry> {
    frontier: SharedFrontier<E>,
    finished: bool,
    current: Option<EntryId>,
    visited: usize,
}

impl<E: SearchEntry> DirectionState<E> {
    fn new(mode: TraversalMode) -> Self {
        DirectionState {
            frontier: Rc::new(RefCell::new(Frontier::new(mode))),
            finished: false,
            current: None,
            visited: 0,
        }
    }

    fn adopt(&mut self, donor: &DirectionState<E>) {
        self.frontier = Rc::clone(&donor.frontier);
        self.finished = donor.finished;
        self.current = donor.current;
        self.visited = donor.visited;
    }

    pub fn frontier(&self) -> &SharedFrontier<E> {
        &self.frontier
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Last settled entry, the root right after initialization.
    pub fn current(&self) -> Option<EntryId> {
        self.current
    }

    pub fn visited(&self) -> usize {
        self.visited
    }
}

/// Bidirectional Dijkstra between one source and one target.
///
/// The forward search follows outgoing edges from the source, the backward
/// search incoming edges from the target. Every accepted relaxation is checked
/// against the other direction and may improve the best path. A direction stops
/// once the cheapest entry in its open set cannot lead to a better path.
pub struct BidirectionalDijkstra<'a, E: SearchEntry = SptEntry> {
    graph: &'a dyn Graph,
    weighting: &'a dyn Weighting,
    options: SearchOptions,
    forward: DirectionState<E>,
    backward: DirectionState<E>,
    tracker: BestPathTracker,
    started_at: Option<Instant>,
    aborted: bool,
}

impl<'a, E: SearchEntry> BidirectionalDijkstra<'a, E> {
    pub fn new(
        graph: &'a dyn Graph,
        weighting: &'a dyn Weighting,
        options: SearchOptions,
    ) -> Self {
        let mode = options.traversal_mode;
        BidirectionalDijkstra {
            graph,
            weighting,
            options,
            forward: DirectionState::new(mode),
            backward: DirectionState::new(mode),
            tracker: BestPathTracker::default(),
            started_at: None,
            aborted: false,
        }
    }

    pub fn name(&self) -> &'static str {
        DIJKSTRA_BI
    }

    pub fn traversal_mode(&self) -> TraversalMode {
        self.options.traversal_mode
    }

    /// Starts the forward search at `source`. `weight` is the weight the source
    /// is reached with, usually zero.
    pub fn init_from(&mut self, source: VertexId, weight: Weight) -> Result<(), SearchError> {
        self.init(Direction::Forward, source, weight)
    }

    /// Starts the backward search at `target`.
    pub fn init_to(&mut self, target: VertexId, weight: Weight) -> Result<(), SearchError> {
        self.init(Direction::Backward, target, weight)
    }

    fn init(
        &mut self,
        direction: Direction,
        vertex: VertexId,
        weight: Weight,
    ) -> Result<(), SearchError> {
        if !self.graph.contains_vertex(vertex) {
            return Err(SearchError::InvalidNode {
                vertex,
                number_of_vertices: self.graph.number_of_vertices(),
            });
        }
        checked_weight(weight, NO_EDGE)?;

        let edge_based = self.traversal_mode().is_edge_based();
        let state = match direction {
            Direction::Forward => &mut self.forward,
            Direction::Backward => &mut self.backward,
        };
        let root = state.frontier.borrow_mut().push(E::root(vertex, weight));
        state.current = Some(root);

        if !edge_based {
            state
                .frontier
                .borrow_mut()
                .register(TraversalKey::Node(vertex), root);
            return self.connect_roots();
        }

        // Edge based states are edges, so a search from a vertex to itself
        // never meets in a common state and has to be caught here.
        if let Some((source, target)) = self.roots() {
            if source.vertex() == target.vertex() {
                let (forward, backward) = (self.forward_current(), self.backward_current());
                self.tracker
                    .offer(source.weight() + target.weight(), None, forward, backward);
                self.forward.finished = true;
                self.backward.finished = true;
            }
        }
        Ok(())
    }

    fn forward_current(&self) -> EntryId {
        self.forward.current.unwrap_or_default()
    }

    fn backward_current(&self) -> EntryId {
        self.backward.current.unwrap_or_default()
    }

    fn roots(&self) -> Option<(E, E)> {
        let source = self.forward.current?;
        let target = self.backward.current?;
        Some((
            self.forward.frontier.borrow().entry(source).clone(),
            self.backward.frontier.borrow().entry(target).clone(),
        ))
    }

    /// Seeds the best path with the source and target themselves or a direct
    /// edge between them, once both are known.
    fn connect_roots(&mut self) -> Result<(), SearchError> {
        let Some((source, target)) = self.roots() else {
            return Ok(());
        };
        let (forward, backward) = (self.forward_current(), self.backward_current());

        if source.vertex() == target.vertex() {
            self.tracker
                .offer(source.weight() + target.weight(), None, forward, backward);
        } else if let Some(edge) = self.graph.edge_between(source.vertex(), target.vertex()) {
            let edge_weight = checked_weight(self.weighting.edge_weight(&edge, false), edge.edge)?;
            self.tracker.offer(
                source.weight() + edge_weight + target.weight(),
                Some(edge.edge),
                forward,
                backward,
            );
        }
        Ok(())
    }

    pub fn state(&self) -> SearchState {
        if self.forward.current.is_none() || self.backward.current.is_none() {
            return SearchState::Uninitialized;
        }
        if !(self.forward.finished && self.backward.finished) {
            return SearchState::Running;
        }
        if !self.aborted && self.tracker.best().is_found() {
            SearchState::Found
        } else {
            SearchState::Exhausted
        }
    }

    /// Runs one iteration of the main loop. Returns `false` once both
    /// directions are finished.
    pub fn step(&mut self) -> Result<bool, SearchError> {
        if self.state() == SearchState::Uninitialized {
            return Err(SearchError::NotInitialized);
        }
        let started_at = *self.started_at.get_or_insert_with(Instant::now);

        self.update_finished();
        if self.forward.finished && self.backward.finished {
            return Ok(false);
        }
        if self.work_limit_reached(started_at) {
            self.aborted = true;
            self.forward.finished = true;
            self.backward.finished = true;
            return Ok(false);
        }

        let direction = match (self.forward.finished, self.backward.finished) {
            (true, true) => return Ok(false),
            (false, true) => Direction::Forward,
            (true, false) => Direction::Backward,
            (false, false) => {
                let forward_weight = self.forward.frontier.borrow().peek_weight();
                let backward_weight = self.backward.frontier.borrow().peek_weight();
                if forward_weight <= backward_weight {
                    Direction::Forward
                } else {
                    Direction::Backward
                }
            }
        };

        let (this, other, reverse) = match direction {
            Direction::Forward => (&mut self.forward, &self.backward, false),
            Direction::Backward => (&mut self.backward, &self.forward, true),
        };
        expand(
            self.graph,
            self.weighting,
            self.options.traversal_mode,
            this,
            other,
            &mut self.tracker,
            reverse,
        )?;
        Ok(true)
    }

    fn update_finished(&mut self) {
        let best_weight = self.tracker.weight();
        let stop_early = self.options.stop_early;
        for state in [&mut self.forward, &mut self.backward] {
            if state.finished {
                continue;
            }
            let frontier = state.frontier.borrow();
            if frontier.is_empty() || (stop_early && frontier.peek_weight() >= best_weight) {
                state.finished = true;
            }
        }
    }

    fn work_limit_reached(&self, started_at: Instant) -> bool {
        let visited = self.forward.visited + self.backward.visited;
        if let Some(max_visited_nodes) = self.options.max_visited_nodes {
            if visited >= max_visited_nodes {
                warn!(visited, max_visited_nodes, "search exceeded visited node limit");
                return true;
            }
        }
        if let Some(timeout) = self.options.timeout() {
            if started_at.elapsed() >= timeout {
                warn!(visited, ?timeout, "search timed out");
                return true;
            }
        }
        false
    }

    /// Runs the search to the end. `Ok(None)` means that there is no path.
    pub fn run(&mut self) -> Result<Option<Path>, SearchError> {
        while self.step()? {}

        let (forward_visited, backward_visited) = self.visited_nodes();
        debug!(
            algorithm = DIJKSTRA_BI,
            forward_visited,
            backward_visited,
            weight = self.tracker.weight(),
            state = ?self.state(),
            "search finished"
        );

        Ok(self.extract_path())
    }

    pub fn extract_path(&self) -> Option<Path> {
        if self.aborted {
            return None;
        }
        let forward = self.forward.frontier.borrow();
        let backward = self.backward.frontier.borrow();
        extract_path(&*forward, &*backward, self.tracker.best())
    }

    pub fn visited_nodes(&self) -> (usize, usize) {
        (self.forward.visited, self.backward.visited)
    }

    pub fn best_weight(&self) -> Weight {
        self.tracker.weight()
    }

    pub fn best_path(&self) -> &BestPath {
        self.tracker.best()
    }

    /// The entry ids of `best` must refer to the frontiers this search uses.
    pub fn set_best_path(&mut self, best: BestPath) {
        self.tracker.set_best(best);
    }

    /// Stops or resumes updates of the best path.
    pub fn set_update_best_path(&mut self, enabled: bool) {
        self.tracker.set_enabled(enabled);
    }

    pub fn forward(&self) -> &DirectionState<E> {
        &self.forward
    }

    pub fn backward(&self) -> &DirectionState<E> {
        &self.backward
    }

    /// Continues from the forward search of `donor` instead of starting a new
    /// one. The frontier is shared, not copied: from now on only one of the two
    /// searches may expand it. Both searches must use the same traversal mode.
    pub fn adopt_forward_state(&mut self, donor: &BidirectionalDijkstra<'_, E>) {
        self.forward.adopt(&donor.forward);
    }

    /// Backward counterpart of [`BidirectionalDijkstra::adopt_forward_state`].
    pub fn adopt_backward_state(&mut self, donor: &BidirectionalDijkstra<'_, E>) {
        self.backward.adopt(&donor.backward);
    }
}

/// Settles the cheapest entry of `this` and relaxes its edges.
fn expand<E: SearchEntry>(
    graph: &dyn Graph,
    weighting: &dyn Weighting,
    mode: TraversalMode,
    this: &mut DirectionState<E>,
    other: &DirectionState<E>,
    tracker: &mut BestPathTracker,
    reverse: bool,
) -> Result<(), SearchError> {
    let mut frontier = this.frontier.borrow_mut();
    let Some(current) = frontier.pop_best() else {
        this.finished = true;
        return Ok(());
    };
    this.current = Some(current);
    this.visited += 1;

    let entry = frontier.entry(current).clone();
    let edges = if reverse {
        graph.in_edges(entry.vertex())
    } else {
        graph.out_edges(entry.vertex())
    };
    let other_frontier = other.frontier.borrow();

    for edge in edges {
        let edge_weight = checked_weight(weighting.edge_weight(&edge, reverse), edge.edge)?;
        let turn_weight = if mode.is_edge_based() {
            turn_weight(weighting, &entry, &edge, reverse)?
        } else {
            0.0
        };
        let weight = entry.weight() + edge_weight + turn_weight;
        if weight.is_infinite() {
            continue;
        }

        let key = mode.key(edge.adj, edge.edge);
        let Some(id) = frontier.relax(key, E::child(&edge, weight, current, &entry)) else {
            continue;
        };

        let Some(other_id) = other_frontier.best(key) else {
            continue;
        };
        let mut joined = weight + other_frontier.entry(other_id).weight();
        let mut this_id = id;
        if mode.is_edge_based() {
            // Both directions contain the meeting edge, keep it only on the
            // other side.
            joined -= edge_weight;
            this_id = current;
        }
        let (forward_id, backward_id) = if reverse {
            (other_id, this_id)
        } else {
            (this_id, other_id)
        };
        tracker.offer(joined, None, forward_id, backward_id);
    }
    Ok(())
}

fn turn_weight<E: SearchEntry>(
    weighting: &dyn Weighting,
    entry: &E,
    edge: &EdgeState,
    reverse: bool,
) -> Result<Weight, SearchError> {
    if entry.is_root() {
        return Ok(0.0);
    }
    let weight = if reverse {
        weighting.turn_weight(edge.edge, entry.vertex(), entry.edge())
    } else {
        weighting.turn_weight(entry.edge(), entry.vertex(), edge.edge)
    };
    checked_weight(weight, edge.edge)
}

fn checked_weight(weight: Weight, edge: EdgeId) -> Result<Weight, SearchError> {
    if weight.is_nan() || weight < 0.0 {
        return Err(SearchError::InvalidWeight { edge, weight });
    }
    Ok(weight)
}
