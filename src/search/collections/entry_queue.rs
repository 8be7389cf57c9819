use std::cmp::Ordering;

use super::spt_entry::EntryId;
use crate::graphs::Weight;

#[derive(Copy, Clone, Debug)]
pub struct EntryQueueElement {
    pub weight: Weight,
    pub sequence: u64,
    pub entry: EntryId,
}

impl EntryQueueElement {
    pub fn new(weight: Weight, sequence: u64, entry: EntryId) -> EntryQueueElement {
        EntryQueueElement {
            weight,
            sequence,
            entry,
        }
    }
}

// The priority queue depends on `Ord`.
// Explicitly implement the trait so the queue becomes a min-heap
// instead of a max-heap.
impl Ord for EntryQueueElement {
    fn cmp(&self, other: &Self) -> Ordering {
        // Flip the ordering on weights. Ties go to the element inserted first,
        // which keeps the pop order deterministic.
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for EntryQueueElement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for EntryQueueElement {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EntryQueueElement {}
