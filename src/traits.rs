//! # Cache trait hierarchy
//!
//! Small, layered traits separating the operations every cache supports
//! from the operations only a frequency-tracking cache can honor.
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │
//!   │                                         │
//!   │  insert(&mut, K, V) → Option<V>         │
//!   │  get(&mut, &K) → Option<&V>             │
//!   │  contains(&, &K) → bool                 │
//!   │  len / is_empty / capacity / clear      │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │           MutableCache<K, V>            │
//!   │  remove(&K) → Option<V>                 │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          LfuCacheTrait<K, V>            │
//!   │  pop_lfu() → Option<(K, V)>             │
//!   │  peek_lfu() → Option<(&K, &V)>          │
//!   │  frequency(&K) → Option<u64>            │
//!   │  reset_frequency / increment_frequency  │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! `get` takes `&mut self` across the hierarchy because a read is a
//! policy event: it promotes the entry and reorders eviction candidates.

/// Operations every cache supports.
pub trait CoreCache<K, V> {
    /// Inserts or updates a key. Returns the previous value if the key
    /// was present.
    ///
    /// Updating an existing key counts as a use: the entry's frequency is
    /// incremented exactly as a `get` would.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Looks up a key, promoting it on a hit. A miss is a defined `None`
    /// outcome with no side effects on cache state.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Key presence check; does not count as a use.
    fn contains(&self, key: &K) -> bool;

    /// Current number of entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries; 0 means the cache is disabled.
    fn capacity(&self) -> usize;

    /// Drops every entry.
    fn clear(&mut self);
}

/// Caches that allow arbitrary key removal.
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes a key and returns its value.
    fn remove(&mut self, key: &K) -> Option<V>;
}

/// Frequency-tracking operations specific to LFU eviction.
pub trait LfuCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the eviction candidate: lowest frequency,
    /// least recently touched among ties.
    fn pop_lfu(&mut self) -> Option<(K, V)>;

    /// The entry `pop_lfu` would remove, without removing it.
    fn peek_lfu(&self) -> Option<(&K, &V)>;

    /// Current access frequency of a key.
    fn frequency(&self, key: &K) -> Option<u64>;

    /// Resets a key's frequency to 1 (aging hook). Returns the previous
    /// frequency.
    fn reset_frequency(&mut self, key: &K) -> Option<u64>;

    /// Bumps a key's frequency without reading it. Returns the new
    /// frequency.
    fn increment_frequency(&mut self, key: &K) -> Option<u64>;
}
