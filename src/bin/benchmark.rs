use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use bidi_paths::{
    error::OptionsError,
    graphs::{vec_graph::VecGraph, Graph},
    search::{
        dijkstra::dijkstra_one_to_one,
        options::SearchOptions,
        path::ShortestPathRequest,
        traversal::TraversalMode,
        BidirectionalRouter, PathFinding,
    },
    utility::{get_progressbar, random_requests},
    weighting::DistanceWeighting,
};
use clap::Parser;
use indicatif::{ParallelProgressIterator, ProgressIterator};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Runs random bidirectional Dijkstra queries on a graph.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Graph as .fmi text file or bincode serialized graph.
    #[arg(short, long)]
    graph: PathBuf,
    /// Number of random queries.
    #[arg(short, long, default_value_t = 1_000)]
    number_of_queries: usize,
    /// Overrides the traversal mode of the options file, node based if neither
    /// sets one.
    #[arg(short, long, value_enum)]
    traversal_mode: Option<TraversalMode>,
    /// JSON file with search options.
    #[arg(short, long)]
    options: Option<PathBuf>,
    #[arg(short, long, default_value_t = 0)]
    seed: u64,
    /// Compare every result with a unidirectional Dijkstra.
    #[arg(long)]
    verify: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let options = search_options(args.options.as_deref(), args.traversal_mode)?;

    let graph = VecGraph::from_file(&args.graph)?;
    info!(
        vertices = graph.number_of_vertices(),
        edges = graph.number_of_edges(),
        "graph loaded"
    );
    let router = BidirectionalRouter::new(graph, DistanceWeighting, options);
    let requests = random_requests(
        router.number_of_vertices(),
        args.number_of_queries,
        args.seed,
    );

    let mut durations = Vec::with_capacity(requests.len());
    let mut visited = 0;
    let mut found = 0;
    for request in requests
        .iter()
        .progress_with(get_progressbar("Running queries", requests.len() as u64))
    {
        let start = Instant::now();
        let mut search = router.search();
        search.init_from(request.source, 0.0)?;
        search.init_to(request.target, 0.0)?;
        if search.run()?.is_some() {
            found += 1;
        }
        durations.push(start.elapsed());

        let (forward, backward) = search.visited_nodes();
        visited += forward + backward;
    }

    if !durations.is_empty() {
        let average_duration = durations.iter().sum::<Duration>() / durations.len() as u32;
        info!(
            ?average_duration,
            average_visited = visited / durations.len(),
            found,
            queries = durations.len(),
            "benchmark finished"
        );
    }

    if args.verify {
        let mismatches = requests
            .par_iter()
            .progress_with(get_progressbar("Verifying", requests.len() as u64))
            .filter(|request| !matches_reference(&router, request))
            .count();
        if mismatches > 0 {
            error!(mismatches, "bidirectional search differs from reference");
            std::process::exit(1);
        }
        info!("all queries match the reference");
    }

    Ok(())
}

/// Options from the optional JSON file, with the command line traversal mode
/// applied on top when one was given.
fn search_options(
    path: Option<&Path>,
    traversal_mode: Option<TraversalMode>,
) -> Result<SearchOptions, OptionsError> {
    let options = match path {
        Some(path) => SearchOptions::from_json_file(path)?,
        None => SearchOptions::default(),
    };
    Ok(match traversal_mode {
        Some(traversal_mode) => options.with_traversal_mode(traversal_mode),
        None => options,
    })
}

fn matches_reference(
    router: &BidirectionalRouter<VecGraph, DistanceWeighting>,
    request: &ShortestPathRequest,
) -> bool {
    let expected = dijkstra_one_to_one(
        &router.graph,
        &router.weighting,
        request.source,
        request.target,
    )
    .map(|path| path.weight);

    match router.shortest_path_weight(request) {
        Ok(weight) => weight == expected,
        Err(err) => {
            error!(?request, %err, "query failed");
            false
        }
    }
}
