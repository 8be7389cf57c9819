use std::collections::BinaryHeap;

use ahash::AHashMap;

use super::{
    entry_queue::EntryQueueElement,
    spt_entry::{EntryId, SearchEntry, SptEntry},
};
use crate::{
    graphs::Weight,
    search::traversal::{TraversalKey, TraversalMode},
};

/// One direction's open set together with the best entry known per state.
///
/// Entries live in an arena and refer to their parent by [`EntryId`]. The open
/// set is not decreased in place, superseded entries stay queued and are
/// dropped when they reach the top.
pub struct Frontier<E: SearchEntry = SptEntry> {
    mode: TraversalMode,
    entries: Vec<E>,
    open_set: BinaryHeap<EntryQueueElement>,
    best_by_key: AHashMap<TraversalKey, EntryId>,
    sequence: u64,
}

impl<E: SearchEntry> Frontier<E> {
    pub fn new(mode: TraversalMode) -> Self {
        Frontier {
            mode,
            entries: Vec::new(),
            open_set: BinaryHeap::new(),
            best_by_key: AHashMap::new(),
            sequence: 0,
        }
    }

    pub fn mode(&self) -> TraversalMode {
        self.mode
    }

    pub fn key(&self, entry: &E) -> TraversalKey {
        self.mode.key(entry.vertex(), entry.edge())
    }

    pub fn entry(&self, id: EntryId) -> &E {
        &self.entries[id as usize]
    }

    /// Number of entries ever created, including superseded ones.
    pub fn number_of_entries(&self) -> usize {
        self.entries.len()
    }

    /// Stores `entry` and puts it into the open set without registering it.
    ///
    /// A frontier holds at most `EntryId::MAX` entries.
    pub fn push(&mut self, entry: E) -> EntryId {
        debug_assert!(
            self.entries.len() < EntryId::MAX as usize,
            "entry arena of a frontier is full"
        );
        let id = self.entries.len() as EntryId;
        self.open_set
            .push(EntryQueueElement::new(entry.weight(), self.sequence, id));
        self.sequence += 1;
        self.entries.push(entry);
        id
    }

    /// Makes `id` the best entry for `key`.
    pub fn register(&mut self, key: TraversalKey, id: EntryId) {
        self.best_by_key.insert(key, id);
    }

    /// Accepts `entry` if there is no entry for `key` yet or the known one is
    /// strictly more expensive. Returns the id of the accepted entry.
    pub fn relax(&mut self, key: TraversalKey, entry: E) -> Option<EntryId> {
        if let Some(&known) = self.best_by_key.get(&key) {
            if self.entry(known).weight() <= entry.weight() {
                return None;
            }
        }
        let id = self.push(entry);
        self.register(key, id);
        Some(id)
    }

    pub fn best(&self, key: TraversalKey) -> Option<EntryId> {
        self.best_by_key.get(&key).copied()
    }

    pub fn best_entry(&self, key: TraversalKey) -> Option<&E> {
        self.best(key).map(|id| self.entry(id))
    }

    /// An entry is stale once another entry replaced it. Unregistered roots are
    /// always live.
    pub fn is_live(&self, id: EntryId) -> bool {
        match self.best_by_key.get(&self.key(self.entry(id))) {
            Some(&best) => best == id,
            None => self.entry(id).is_root(),
        }
    }

    pub fn pop_best(&mut self) -> Option<EntryId> {
        while let Some(element) = self.open_set.pop() {
            if self.is_live(element.entry) {
                return Some(element.entry);
            }
        }
        None
    }

    /// Smallest weight in the open set or infinity if it is empty. Stale entries
    /// are not skipped, so this is a lower bound of the next popped weight.
    pub fn peek_weight(&self) -> Weight {
        self.open_set
            .peek()
            .map(|element| element.weight)
            .unwrap_or(Weight::INFINITY)
    }

    pub fn is_empty(&self) -> bool {
        self.open_set.is_empty()
    }

    /// Ids from `id` up to the root of its tree, starting with `id`.
    pub fn path_to_root(&self, id: EntryId) -> Vec<EntryId> {
        let mut ids = vec![id];
        let mut current = id;
        while let Some(parent) = self.entry(current).parent() {
            ids.push(parent);
            current = parent;
        }
        ids
    }
}
