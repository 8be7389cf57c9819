use indicatif::{ProgressBar, ProgressStyle};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::search::path::ShortestPathRequest;

pub fn get_progressbar(job_name: &str, len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_message(job_name.to_string());
    let template = " {msg} {wide_bar} {pos}/{len} estimated remaining: {eta_precise}";
    if let Ok(style) = ProgressStyle::with_template(template) {
        bar.set_style(style);
    }
    bar
}

/// `number_of_requests` uniformly drawn source target pairs.
pub fn random_requests(
    number_of_vertices: u32,
    number_of_requests: usize,
    seed: u64,
) -> Vec<ShortestPathRequest> {
    if number_of_vertices == 0 {
        return Vec::new();
    }
    let mut rng = StdRng::seed_from_u64(seed);
    (0..number_of_requests)
        .map(|_| {
            ShortestPathRequest::new(
                rng.gen_range(0..number_of_vertices),
                rng.gen_range(0..number_of_vertices),
            )
        })
        .collect()
}
