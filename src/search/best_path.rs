use tracing::trace;

use super::collections::spt_entry::EntryId;
use crate::graphs::{EdgeId, Weight};

/// Cheapest complete path seen so far, given by the two entries it joins.
#[derive(Clone, Debug, PartialEq)]
pub struct BestPath {
    pub weight: Weight,
    /// Edge between the two entries when they sit on different vertices.
    /// `None` when both entries end at the same vertex.
    pub meeting_edge: Option<EdgeId>,
    pub forward: Option<EntryId>,
    pub backward: Option<EntryId>,
}

impl Default for BestPath {
    fn default() -> Self {
        BestPath {
            weight: Weight::INFINITY,
            meeting_edge: None,
            forward: None,
            backward: None,
        }
    }
}

impl BestPath {
    pub fn is_found(&self) -> bool {
        self.weight.is_finite() && self.forward.is_some() && self.backward.is_some()
    }
}

/// Keeps the best path. Its weight never increases.
#[derive(Clone, Debug)]
pub struct BestPathTracker {
    best: BestPath,
    enabled: bool,
}

impl Default for BestPathTracker {
    fn default() -> Self {
        BestPathTracker {
            best: BestPath::default(),
            enabled: true,
        }
    }
}

impl BestPathTracker {
    pub fn weight(&self) -> Weight {
        self.best.weight
    }

    pub fn best(&self) -> &BestPath {
        &self.best
    }

    pub fn set_best(&mut self, best: BestPath) {
        self.best = best;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Replaces the best path if `weight` is strictly smaller. Returns whether
    /// it did.
    pub fn offer(
        &mut self,
        weight: Weight,
        meeting_edge: Option<EdgeId>,
        forward: EntryId,
        backward: EntryId,
    ) -> bool {
        if !self.enabled || weight >= self.best.weight {
            return false;
        }
        trace!(weight, previous = self.best.weight, "better path");
        self.best = BestPath {
            weight,
            meeting_edge,
            forward: Some(forward),
            backward: Some(backward),
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_never_increases() {
        let mut tracker = BestPathTracker::default();
        assert!(tracker.offer(10.0, None, 1, 2));
        assert!(!tracker.offer(12.0, Some(3), 4, 5));
        assert!(!tracker.offer(10.0, None, 6, 7));
        assert!(tracker.offer(7.5, Some(9), 8, 9));

        assert_eq!(
            tracker.best(),
            &BestPath {
                weight: 7.5,
                meeting_edge: Some(9),
                forward: Some(8),
                backward: Some(9),
            }
        );
    }

    #[test]
    fn disabled_tracker_ignores_offers() {
        let mut tracker = BestPathTracker::default();
        tracker.set_enabled(false);
        assert!(!tracker.offer(1.0, None, 0, 0));
        assert!(!tracker.best().is_found());
    }
}
