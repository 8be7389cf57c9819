use bidi_paths::{
    graphs::{vec_graph::VecGraph, EdgeId, Graph, VertexId, Weight, WeightedEdge, NO_EDGE},
    search::{
        bidirectional::BidirectionalDijkstra, options::SearchOptions, traversal::TraversalMode,
    },
    weighting::{turn_cost::TurnCostWeighting, DistanceWeighting, Weighting},
};
use proptest::{collection::vec, prelude::*};

/// Minimum over all simple paths. Weights are non-negative, so a shortest
/// path never needs to repeat a vertex.
fn brute_force(graph: &VecGraph, source: VertexId, target: VertexId) -> Option<Weight> {
    fn visit(
        graph: &VecGraph,
        vertex: VertexId,
        target: VertexId,
        weight: Weight,
        on_path: &mut Vec<bool>,
        best: &mut Option<Weight>,
    ) {
        if vertex == target {
            if best.map_or(true, |best| weight < best) {
                *best = Some(weight);
            }
            return;
        }
        on_path[vertex as usize] = true;
        for edge in graph.out_edges(vertex) {
            if !on_path[edge.adj as usize] {
                visit(graph, edge.adj, target, weight + edge.distance, on_path, best);
            }
        }
        on_path[vertex as usize] = false;
    }

    let mut best = None;
    let mut on_path = vec![false; graph.number_of_vertices() as usize];
    visit(graph, source, target, 0.0, &mut on_path, &mut best);
    best
}

/// Minimum over all walks that use every edge at most once, paying turn costs
/// between consecutive edges. Repeating an edge repeats the state of an edge
/// based search, so such walks are never needed.
fn brute_force_with_turns(
    graph: &VecGraph,
    weighting: &dyn Weighting,
    source: VertexId,
    target: VertexId,
) -> Option<Weight> {
    #[allow(clippy::too_many_arguments)]
    fn visit(
        graph: &VecGraph,
        weighting: &dyn Weighting,
        vertex: VertexId,
        in_edge: EdgeId,
        target: VertexId,
        weight: Weight,
        used: &mut Vec<bool>,
        best: &mut Option<Weight>,
    ) {
        if best.map_or(false, |best| weight >= best) {
            return;
        }
        if vertex == target {
            *best = Some(weight);
            return;
        }
        for edge in graph.out_edges(vertex) {
            let turn = weighting.turn_weight(in_edge, vertex, edge.edge);
            if used[edge.edge as usize] || turn.is_infinite() {
                continue;
            }
            used[edge.edge as usize] = true;
            let weight = weight + turn + edge.distance;
            visit(graph, weighting, edge.adj, edge.edge, target, weight, used, best);
            used[edge.edge as usize] = false;
        }
    }

    let mut best = None;
    let mut used = vec![false; graph.number_of_edges() as usize];
    visit(graph, weighting, source, NO_EDGE, target, 0.0, &mut used, &mut best);
    best
}

fn search_weight(
    graph: &VecGraph,
    options: SearchOptions,
    source: VertexId,
    target: VertexId,
) -> Option<Weight> {
    search_weight_with(graph, &DistanceWeighting, options, source, target)
}

fn search_weight_with(
    graph: &VecGraph,
    weighting: &dyn Weighting,
    options: SearchOptions,
    source: VertexId,
    target: VertexId,
) -> Option<Weight> {
    let mut search: BidirectionalDijkstra = BidirectionalDijkstra::new(graph, weighting, options);
    search.init_from(source, 0.0).unwrap();
    search.init_to(target, 0.0).unwrap();
    search.run().unwrap().map(|path| path.weight)
}

fn graph_and_query() -> impl Strategy<Value = (VecGraph, VertexId, VertexId)> {
    graph_and_query_with(24)
}

/// Small random graphs with integral weights, so sums are exact.
fn graph_and_query_with(
    max_edges: usize,
) -> impl Strategy<Value = (VecGraph, VertexId, VertexId)> {
    (1u32..8).prop_flat_map(move |number_of_vertices| {
        (
            vec((0..number_of_vertices, 0..number_of_vertices, 0u32..10), 0..max_edges),
            0..number_of_vertices,
            0..number_of_vertices,
        )
            .prop_map(move |(edges, source, target)| {
                let edges: Vec<WeightedEdge> = edges
                    .into_iter()
                    .map(|(tail, head, weight)| WeightedEdge::new(tail, head, weight as Weight))
                    .collect();
                (
                    VecGraph::with_vertices(number_of_vertices as usize, &edges),
                    source,
                    target,
                )
            })
    })
}

/// Assigns a turn cost to every turn of `graph`, drawn from `costs` in order.
/// `RESTRICTED` forbids the turn.
fn turn_costs(graph: &VecGraph, costs: &[u32]) -> TurnCostWeighting<DistanceWeighting> {
    const RESTRICTED: u32 = 7;

    let mut weighting = TurnCostWeighting::new(DistanceWeighting);
    let mut costs = costs.iter().cycle();
    for (in_edge, edge) in graph.edges().iter().enumerate() {
        for out_edge in graph.out_edges(edge.head) {
            let Some(&cost) = costs.next() else {
                return weighting;
            };
            match cost {
                RESTRICTED => weighting.restrict_turn(in_edge as EdgeId, edge.head, out_edge.edge),
                0..=4 => weighting.set_turn_cost(
                    in_edge as EdgeId,
                    edge.head,
                    out_edge.edge,
                    cost as Weight,
                ),
                _ => {}
            }
        }
    }
    weighting
}

const MODES: [TraversalMode; 2] = [TraversalMode::NodeBased, TraversalMode::EdgeBased];

proptest! {
    #[test]
    fn matches_brute_force((graph, source, target) in graph_and_query()) {
        let expected = brute_force(&graph, source, target);
        for mode in MODES {
            let options = SearchOptions::default().with_traversal_mode(mode);
            prop_assert_eq!(search_weight(&graph, options, source, target), expected);
        }
    }

    #[test]
    fn turn_costs_match_brute_force(
        (graph, source, target) in graph_and_query_with(12),
        costs in vec(0u32..8, 1..32),
    ) {
        let weighting = turn_costs(&graph, &costs);
        let options = SearchOptions::default().with_traversal_mode(TraversalMode::EdgeBased);
        prop_assert_eq!(
            search_weight_with(&graph, &weighting, options, source, target),
            brute_force_with_turns(&graph, &weighting, source, target)
        );
    }

    #[test]
    fn reversed_graph_gives_same_weight((graph, source, target) in graph_and_query()) {
        let reversed = graph.reversed();
        for mode in MODES {
            let options = SearchOptions::default().with_traversal_mode(mode);
            prop_assert_eq!(
                search_weight(&graph, options.clone(), source, target),
                search_weight(&reversed, options, target, source)
            );
        }
    }

    #[test]
    fn stopping_early_loses_nothing((graph, source, target) in graph_and_query()) {
        for mode in MODES {
            let early = SearchOptions::default().with_traversal_mode(mode);
            let exhaustive = SearchOptions {
                stop_early: false,
                ..early.clone()
            };
            prop_assert_eq!(
                search_weight(&graph, early, source, target),
                search_weight(&graph, exhaustive, source, target)
            );
        }
    }

    #[test]
    fn best_weight_never_increases((graph, source, target) in graph_and_query()) {
        for mode in MODES {
            let mut search: BidirectionalDijkstra = BidirectionalDijkstra::new(
                &graph,
                &DistanceWeighting,
                SearchOptions::default().with_traversal_mode(mode),
            );
            search.init_from(source, 0.0).unwrap();
            search.init_to(target, 0.0).unwrap();

            let mut previous = search.best_weight();
            while search.step().unwrap() {
                prop_assert!(search.best_weight() <= previous);
                previous = search.best_weight();
            }
        }
    }
}
