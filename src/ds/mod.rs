//! Core data structures backing the cache policy.
//!
//! - [`arena`]: slot arena with stable [`Handle`]s and free-list reuse
//! - [`linked_list`]: doubly-linked list over arena handles
//! - [`probe_table`]: open-addressing hash table with tombstone deletes
//!   and a bounded probe sequence
//! - [`freq_index`]: frequency → recency-list index with an O(1)
//!   minimum watermark

pub mod arena;
pub mod freq_index;
pub mod linked_list;
pub mod probe_table;

pub use arena::{Arena, Handle};
pub use freq_index::{FrequencyIndex, DEFAULT_BUCKET_PREALLOC};
pub use linked_list::LinkedList;
pub use probe_table::{InsertError, ProbeTable, MAX_PROBES};
