pub mod entry_queue;
pub mod frontier;
pub mod spt_entry;
