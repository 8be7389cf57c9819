use std::{fs::File, io::BufReader, path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use super::traversal::TraversalMode;
use crate::error::OptionsError;

/// Settings of a single search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub traversal_mode: TraversalMode,
    /// Stop a direction once it can no longer improve the best path. Turning
    /// this off lets both directions run until their open sets are empty.
    pub stop_early: bool,
    /// Give up after this many vertices were settled in both directions
    /// together.
    pub max_visited_nodes: Option<usize>,
    pub timeout_ms: Option<u64>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            traversal_mode: TraversalMode::NodeBased,
            stop_early: true,
            max_visited_nodes: None,
            timeout_ms: None,
        }
    }
}

impl SearchOptions {
    pub fn with_traversal_mode(mut self, traversal_mode: TraversalMode) -> Self {
        self.traversal_mode = traversal_mode;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    pub fn from_json_file(path: &Path) -> Result<SearchOptions, OptionsError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}
