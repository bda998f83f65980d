//! # LFU (Least Frequently Used) cache
//!
//! Fixed-capacity cache that evicts the entry with the lowest access
//! frequency; among entries tied at the lowest frequency, the least
//! recently touched one goes first. All operations are O(1) amortized.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                        LfuCache<K, V>                            │
//!   │                                                                  │
//!   │   entries: Arena<Entry<K, V>>                                    │
//!   │   ┌────────┬──────────────────────────────────────────────┐      │
//!   │   │ Handle │ Entry { key, value, freq, node }             │      │
//!   │   └────────┴──────────────────────────────────────────────┘      │
//!   │        ▲                          ▲                              │
//!   │        │ key → Handle             │ bucket membership            │
//!   │   ┌────┴──────────────────┐  ┌────┴────────────────────────┐     │
//!   │   │ index: ProbeTable     │  │ freq: FrequencyIndex<Handle>│     │
//!   │   │ (open addressing,     │  │ freq=1: [h3] ◄──► [h1]      │     │
//!   │   │  tombstones, sized at │  │ freq=2: [h0]                │     │
//!   │   │  150% of capacity)    │  │ min watermark, O(1) evict   │     │
//!   │   └───────────────────────┘  └─────────────────────────────┘     │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An entry is owned by the arena, a member of exactly one frequency
//! bucket, and referenced (not owned) by the item index. Every mutation
//! updates all three together; no public operation can observe them out
//! of sync.
//!
//! ## Operations
//!
//! | Method                    | Complexity | Notes                          |
//! |---------------------------|------------|--------------------------------|
//! | `new(capacity)`           | O(capacity)| All allocation happens here    |
//! | `insert(k, v)`            | O(1)       | Update counts as a use; may evict |
//! | `get(&k)`                 | O(1)       | Promotes the entry on a hit    |
//! | `remove(&k)`              | O(1)       | Arbitrary removal              |
//! | `pop_lfu` / `peek_lfu`    | O(1)       | Eviction candidate             |
//! | `frequency(&k)`           | O(1)       | Read-only                      |
//! | `reset_frequency(&k)`     | O(1)       | Aging hook, back to freq 1     |
//! | `increment_frequency(&k)` | O(1)       | Promote without reading        |
//! | `clear()`                 | O(n)       |                                |
//!
//! ## Frequency lifecycle
//!
//! A new entry starts at frequency 1. Every `get` hit, every update
//! `insert`, and every `increment_frequency` raises it by exactly one
//! (saturating at `u64::MAX`); only `reset_frequency` lowers it. The
//! minimum-frequency watermark is maintained incrementally by the
//! frequency index — never recomputed by scanning.
//!
//! ## Capacity 0
//!
//! A zero-capacity cache is valid and disabled: every `insert` is a
//! no-op, every `get` a miss. Useful for configurations that switch
//! caching off without changing call sites.
//!
//! ## Thread safety
//!
//! `LfuCache` is strictly single-threaded; a promotion touches the
//! bucket lists and the watermark as one indivisible step, so there is
//! no useful lock granularity below "the whole cache". With the
//! `concurrency` feature, [`ConcurrentLfuCache`] wraps the cache in a
//! single `parking_lot::Mutex` for exactly that reason.
//!
//! ## Example
//!
//! ```
//! use lfukit::policy::lfu::LfuCache;
//! use lfukit::traits::{CoreCache, LfuCacheTrait};
//!
//! let mut cache = LfuCache::new(2);
//! cache.insert(1, "one");
//! cache.insert(2, "two");
//! cache.get(&1); // key 1 now at frequency 2
//!
//! cache.insert(3, "three"); // evicts key 2 (freq 1)
//! assert_eq!(cache.get(&2), None);
//! assert_eq!(cache.get(&1), Some(&"one"));
//! assert_eq!(cache.frequency(&3), Some(1));
//! ```

use std::hash::{BuildHasher, Hash};

use rustc_hash::FxBuildHasher;

use crate::ds::arena::{Arena, Handle};
use crate::ds::freq_index::FrequencyIndex;
use crate::ds::probe_table::ProbeTable;
#[cfg(any(test, debug_assertions))]
use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LfuMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LfuMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    LfuMetricsReadRecorder, LfuMetricsRecorder, MetricsSnapshotProvider,
};
use crate::traits::{CoreCache, LfuCacheTrait, MutableCache};

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    freq: u64,
    // Node handle inside the bucket for `freq`; None only during the
    // insert window before the entry is linked.
    node: Option<Handle>,
}

/// LFU cache with LRU tie-breaking. See the module docs for the layout.
pub struct LfuCache<K, V, S = FxBuildHasher>
where
    K: Eq + Hash + Clone,
{
    entries: Arena<Entry<K, V>>,
    index: ProbeTable<K, Handle, S>,
    freq: FrequencyIndex<Handle>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LfuMetrics,
}

// Manual impl: the derive would bound `S: Debug`, which the default
// `FxBuildHasher` does not satisfy.
impl<K, V, S> std::fmt::Debug for LfuCache<K, V, S>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    V: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("LfuCache");
        s.field("entries", &self.entries)
            .field("index", &self.index)
            .field("freq", &self.freq)
            .field("capacity", &self.capacity);
        #[cfg(feature = "metrics")]
        s.field("metrics", &self.metrics);
        s.finish()
    }
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries. The item
    /// index gets 150% of that in slots, keeping its load factor at or
    /// below ~66% so the bounded probe sequence cannot run dry.
    pub fn new(capacity: usize) -> Self {
        Self::with_hasher(capacity, FxBuildHasher)
    }
}

impl<K, V, S> LfuCache<K, V, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher,
{
    pub fn with_hasher(capacity: usize, hasher: S) -> Self {
        Self::with_index_capacity(capacity, capacity + capacity / 2, hasher)
    }

    pub(crate) fn with_index_capacity(capacity: usize, index_capacity: usize, hasher: S) -> Self {
        Self {
            entries: Arena::with_capacity(capacity),
            index: ProbeTable::with_capacity_and_hasher(index_capacity, hasher),
            freq: FrequencyIndex::new(),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LfuMetrics::default(),
        }
    }

    /// Moves an entry into the next frequency bucket and records its new
    /// coordinates.
    fn promote_entry(&mut self, handle: Handle) -> u64 {
        let (freq, node) = {
            let entry = self.entries.get(handle).expect("lfu entry missing");
            (entry.freq, entry.node.expect("lfu entry not linked"))
        };
        let (new_freq, new_node) = self
            .freq
            .promote(freq, node)
            .expect("frequency index out of sync with entry");
        let entry = self.entries.get_mut(handle).expect("lfu entry missing");
        entry.freq = new_freq;
        entry.node = Some(new_node);
        new_freq
    }

    /// Removes the eviction candidate from all three structures.
    fn evict_min(&mut self) -> Option<(K, V)> {
        let (handle, _freq) = self.freq.pop_lru_min()?;
        let entry = self.entries.remove(handle).expect("lfu entry missing");
        self.index
            .remove(&entry.key)
            .expect("item index out of sync with entry");
        Some((entry.key, entry.value))
    }

    /// Validates cross-structure invariants; O(n). Available in
    /// debug/test builds.
    #[cfg(any(test, debug_assertions))]
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.entries.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "size {} exceeds capacity {}",
                self.entries.len(),
                self.capacity
            )));
        }
        if self.entries.len() != self.index.len() {
            return Err(InvariantError::new(format!(
                "item index holds {} keys for {} entries",
                self.index.len(),
                self.entries.len()
            )));
        }
        if self.entries.len() != self.freq.len() {
            return Err(InvariantError::new(format!(
                "frequency index holds {} items for {} entries",
                self.freq.len(),
                self.entries.len()
            )));
        }

        let min = self.freq.lowest_occupied();
        for (handle, entry) in self.entries.iter() {
            if self.index.get(&entry.key) != Some(&handle) {
                return Err(InvariantError::new("item index does not point at entry"));
            }
            if entry.node.is_none() {
                return Err(InvariantError::new("entry not linked into a bucket"));
            }
            if entry.freq == 0 {
                return Err(InvariantError::new("entry frequency is zero"));
            }
            if let Some(min_freq) = min {
                if entry.freq < min_freq {
                    return Err(InvariantError::new(format!(
                        "entry frequency {} below watermark {}",
                        entry.freq, min_freq
                    )));
                }
            }
        }

        self.freq.debug_validate();
        Ok(())
    }
}

impl<K, V, S> CoreCache<K, V> for LfuCache<K, V, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if self.capacity == 0 {
            return None;
        }

        if let Some(&handle) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            // An update counts as a use.
            self.promote_entry(handle);
            let entry = self.entries.get_mut(handle).expect("lfu entry missing");
            return Some(std::mem::replace(&mut entry.value, value));
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.entries.len() >= self.capacity {
            #[cfg(feature = "metrics")]
            self.metrics.record_evict_call();

            let evicted = self.evict_min();
            debug_assert!(evicted.is_some());
            #[cfg(feature = "metrics")]
            if evicted.is_some() {
                self.metrics.record_evicted_entry();
            }
        }

        let handle = self.entries.insert(Entry {
            key: key.clone(),
            value,
            freq: 1,
            node: None,
        });
        let node = self.freq.insert_new(handle);
        self.entries.get_mut(handle).expect("lfu entry missing").node = Some(node);
        if let Err(err) = self.index.insert(key, handle) {
            // Unreachable while the 150% sizing invariant holds; losing
            // the insert silently would corrupt the cache, so fail loud.
            panic!("lfu item index rejected a new key ({err:?}): index undersized");
        }

        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let handle = match self.index.get(key) {
            Some(&handle) => handle,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                return None;
            },
        };

        self.promote_entry(handle);

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.entries.get(handle).map(|entry| &entry.value)
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains(key)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        self.entries.clear();
        self.index.clear();
        self.freq.clear();
    }
}

impl<K, V, S> MutableCache<K, V> for LfuCache<K, V, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        let handle = self.index.remove(key)?;
        let entry = self.entries.remove(handle).expect("lfu entry missing");
        let node = entry.node.expect("lfu entry not linked");
        self.freq
            .remove(entry.freq, node)
            .expect("frequency index out of sync with entry");
        Some(entry.value)
    }
}

impl<K, V, S> LfuCacheTrait<K, V> for LfuCache<K, V, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher,
{
    fn pop_lfu(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lfu_call();

        let result = self.evict_min();

        #[cfg(feature = "metrics")]
        if result.is_some() {
            self.metrics.record_pop_lfu_found();
        }

        result
    }

    fn peek_lfu(&self) -> Option<(&K, &V)> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lfu_call();

        let &handle = self.freq.peek_lru_min()?;
        let entry = self.entries.get(handle)?;

        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lfu_found();

        Some((&entry.key, &entry.value))
    }

    fn frequency(&self, key: &K) -> Option<u64> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_frequency_call();

        let result = self
            .index
            .get(key)
            .and_then(|&handle| self.entries.get(handle))
            .map(|entry| entry.freq);

        #[cfg(feature = "metrics")]
        if result.is_some() {
            (&self.metrics).record_frequency_found();
        }

        result
    }

    fn reset_frequency(&mut self, key: &K) -> Option<u64> {
        #[cfg(feature = "metrics")]
        self.metrics.record_reset_frequency_call();

        let handle = *self.index.get(key)?;
        let (old_freq, node) = {
            let entry = self.entries.get(handle).expect("lfu entry missing");
            (entry.freq, entry.node.expect("lfu entry not linked"))
        };

        if old_freq != 1 {
            self.freq
                .remove(old_freq, node)
                .expect("frequency index out of sync with entry");
            let new_node = self.freq.insert_new(handle);
            let entry = self.entries.get_mut(handle).expect("lfu entry missing");
            entry.freq = 1;
            entry.node = Some(new_node);
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_reset_frequency_found();

        Some(old_freq)
    }

    fn increment_frequency(&mut self, key: &K) -> Option<u64> {
        #[cfg(feature = "metrics")]
        self.metrics.record_increment_frequency_call();

        let handle = *self.index.get(key)?;
        let new_freq = self.promote_entry(handle);

        #[cfg(feature = "metrics")]
        self.metrics.record_increment_frequency_found();

        Some(new_freq)
    }
}

#[cfg(feature = "metrics")]
impl<K, V, S> LfuCache<K, V, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher,
{
    pub fn metrics_snapshot(&self) -> LfuMetricsSnapshot {
        LfuMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evict_calls: self.metrics.evict_calls,
            evicted_entries: self.metrics.evicted_entries,
            pop_lfu_calls: self.metrics.pop_lfu_calls,
            pop_lfu_found: self.metrics.pop_lfu_found,
            peek_lfu_calls: self.metrics.peek_lfu_calls.get(),
            peek_lfu_found: self.metrics.peek_lfu_found.get(),
            frequency_calls: self.metrics.frequency_calls.get(),
            frequency_found: self.metrics.frequency_found.get(),
            reset_frequency_calls: self.metrics.reset_frequency_calls,
            reset_frequency_found: self.metrics.reset_frequency_found,
            increment_frequency_calls: self.metrics.increment_frequency_calls,
            increment_frequency_found: self.metrics.increment_frequency_found,
            cache_len: self.entries.len(),
            capacity: self.capacity,
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V, S> MetricsSnapshotProvider<LfuMetricsSnapshot> for LfuCache<K, V, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher,
{
    fn snapshot(&self) -> LfuMetricsSnapshot {
        self.metrics_snapshot()
    }
}

/// Whole-cache mutex wrapper: the external synchronization layer for
/// multi-threaded use. Values are cloned out of the lock.
#[cfg(feature = "concurrency")]
#[derive(Debug)]
pub struct ConcurrentLfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    inner: parking_lot::Mutex<LfuCache<K, V>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentLfuCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: parking_lot::Mutex::new(LfuCache::new(capacity)),
        }
    }

    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.inner.lock().insert(key, value)
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.lock().get(key).cloned()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.lock().remove(key)
    }

    pub fn pop_lfu(&self) -> Option<(K, V)> {
        self.inner.lock().pop_lfu()
    }

    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.inner.lock().frequency(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn clear(&self) {
        self.inner.lock().clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod basic_behavior {
        use super::*;

        #[test]
        fn insert_and_get_round_trip() {
            let mut cache = LfuCache::new(3);
            assert_eq!(cache.insert(1u64, 100), None);
            assert_eq!(cache.insert(2u64, 200), None);

            assert_eq!(cache.get(&1), Some(&100));
            assert_eq!(cache.get(&2), Some(&200));
            assert_eq!(cache.get(&9), None);

            // Insert starts at 1, each hit adds one.
            assert_eq!(cache.frequency(&1), Some(2));
            assert_eq!(cache.frequency(&2), Some(2));
            cache.check_invariants().unwrap();
        }

        #[test]
        fn eviction_picks_lowest_frequency() {
            let mut cache = LfuCache::new(3);
            cache.insert(1u64, 100);
            cache.insert(2u64, 200);
            cache.insert(3u64, 300);

            cache.get(&2); // freq 2
            cache.get(&2); // freq 3
            cache.get(&3); // freq 2

            cache.insert(4u64, 400); // evicts key 1 (freq 1)
            assert!(!cache.contains(&1));
            assert!(cache.contains(&2));
            assert!(cache.contains(&3));
            assert!(cache.contains(&4));
            assert_eq!(cache.len(), 3);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn lru_breaks_frequency_ties() {
            let mut cache = LfuCache::new(2);
            cache.insert(1u64, 1);
            cache.insert(2u64, 2);
            // Both at freq 1; key 1 was touched longer ago.
            cache.insert(3u64, 3);
            assert!(!cache.contains(&1));
            assert!(cache.contains(&2));
            assert!(cache.contains(&3));
        }

        #[test]
        fn end_to_end_promotion_protects_hot_key() {
            // Capacity 2: put(1), put(2), get(1), put(3) evicts key 2.
            let mut cache = LfuCache::new(2);
            cache.insert(1u64, 1);
            cache.insert(2u64, 2);
            assert_eq!(cache.get(&1), Some(&1));
            cache.insert(3u64, 3);
            assert_eq!(cache.get(&2), None);
            assert_eq!(cache.get(&3), Some(&3));
            assert_eq!(cache.get(&1), Some(&1));
        }

        #[test]
        fn capacity_is_never_exceeded() {
            let mut cache = LfuCache::new(2);
            for i in 0u64..20 {
                cache.insert(i, i);
                assert!(cache.len() <= cache.capacity());
                cache.check_invariants().unwrap();
            }
            assert_eq!(cache.len(), 2);
        }

        #[test]
        fn update_counts_as_a_use() {
            let mut cache = LfuCache::new(3);
            cache.insert(1u64, 100);
            assert_eq!(cache.frequency(&1), Some(1));

            // Re-insert replaces the value and promotes the entry.
            assert_eq!(cache.insert(1u64, 999), Some(100));
            assert_eq!(cache.frequency(&1), Some(2));
            assert_eq!(cache.get(&1), Some(&999));
            assert_eq!(cache.frequency(&1), Some(3));
            assert_eq!(cache.len(), 1);

            // The promoted key survives a tie-break against fresher keys.
            cache.insert(2u64, 200);
            cache.insert(3u64, 300);
            cache.insert(4u64, 400);
            assert!(cache.contains(&1));
            cache.check_invariants().unwrap();
        }

        #[test]
        fn frequency_controls() {
            let mut cache = LfuCache::new(4);
            cache.insert(1u64, 10);
            cache.get(&1);
            cache.get(&1);
            assert_eq!(cache.frequency(&1), Some(3));

            assert_eq!(cache.reset_frequency(&1), Some(3));
            assert_eq!(cache.frequency(&1), Some(1));
            // Reset at frequency 1 is a no-op that still reports.
            assert_eq!(cache.reset_frequency(&1), Some(1));

            assert_eq!(cache.increment_frequency(&1), Some(2));
            assert_eq!(cache.frequency(&1), Some(2));

            assert_eq!(cache.frequency(&9), None);
            assert_eq!(cache.reset_frequency(&9), None);
            assert_eq!(cache.increment_frequency(&9), None);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn reset_makes_entry_the_next_victim() {
            let mut cache = LfuCache::new(2);
            cache.insert(1u64, 1);
            cache.insert(2u64, 2);
            cache.get(&1);
            cache.get(&1); // key 1 at freq 3, key 2 at freq 1

            cache.reset_frequency(&1); // both at 1, key 1 touched last
            cache.insert(3u64, 3); // evicts key 2 (LRU at freq 1)
            assert!(cache.contains(&1));
            assert!(!cache.contains(&2));
            cache.check_invariants().unwrap();
        }

        #[test]
        fn pop_and_peek_agree() {
            let mut cache = LfuCache::new(3);
            cache.insert(1u64, 10);
            cache.insert(2u64, 20);
            cache.get(&1);

            let peeked = cache.peek_lfu().map(|(k, v)| (*k, *v));
            assert_eq!(peeked, Some((2, 20)));
            assert_eq!(cache.pop_lfu(), Some((2, 20)));
            assert_eq!(cache.len(), 1);

            assert_eq!(cache.pop_lfu(), Some((1, 10)));
            assert_eq!(cache.pop_lfu(), None);
            assert_eq!(cache.peek_lfu(), None);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn remove_detaches_everywhere() {
            let mut cache = LfuCache::new(3);
            cache.insert(1u64, 10);
            cache.insert(2u64, 20);
            cache.get(&2);

            assert_eq!(cache.remove(&2), Some(20));
            assert_eq!(cache.remove(&2), None);
            assert_eq!(cache.len(), 1);
            assert_eq!(cache.frequency(&2), None);
            assert!(cache.contains(&1));
            cache.check_invariants().unwrap();
        }

        #[test]
        fn clear_then_reuse() {
            let mut cache = LfuCache::new(2);
            cache.insert(1u64, 10);
            cache.insert(2u64, 20);
            cache.clear();
            assert_eq!(cache.len(), 0);
            assert!(!cache.contains(&1));
            cache.check_invariants().unwrap();

            cache.insert(3u64, 30);
            assert_eq!(cache.get(&3), Some(&30));
            assert_eq!(cache.len(), 1);
            cache.check_invariants().unwrap();
        }
    }

    mod edge_cases {
        use super::*;

        #[test]
        fn empty_cache_operations() {
            let mut cache: LfuCache<u64, i32> = LfuCache::new(5);
            assert_eq!(cache.len(), 0);
            assert!(cache.is_empty());
            assert_eq!(cache.capacity(), 5);
            assert_eq!(cache.get(&1), None);
            assert_eq!(cache.remove(&1), None);
            assert_eq!(cache.pop_lfu(), None);
            assert_eq!(cache.peek_lfu(), None);
            cache.clear();
            cache.check_invariants().unwrap();
        }

        #[test]
        fn zero_capacity_disables_the_cache() {
            let mut cache: LfuCache<u64, i32> = LfuCache::new(0);
            assert_eq!(cache.capacity(), 0);
            assert_eq!(cache.insert(1, 100), None);
            assert_eq!(cache.insert(2, 200), None);
            assert_eq!(cache.len(), 0);
            assert_eq!(cache.get(&1), None);
            assert!(!cache.contains(&1));
            assert_eq!(cache.frequency(&1), None);
            assert_eq!(cache.pop_lfu(), None);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn misses_are_idempotent() {
            let mut cache = LfuCache::new(2);
            cache.insert(1u64, 1);
            for _ in 0..5 {
                assert_eq!(cache.get(&42), None);
            }
            assert_eq!(cache.len(), 1);
            assert_eq!(cache.frequency(&1), Some(1));
            cache.check_invariants().unwrap();
        }

        #[test]
        fn single_slot_cache_churns() {
            let mut cache = LfuCache::new(1);
            cache.insert(1u64, 10);
            cache.insert(2u64, 20); // evicts 1 regardless of frequency
            assert!(!cache.contains(&1));
            assert_eq!(cache.get(&2), Some(&20));

            assert_eq!(cache.insert(2u64, 21), Some(20));
            assert_eq!(cache.len(), 1);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn high_frequencies_stay_stable() {
            let mut cache = LfuCache::new(2);
            cache.insert(1u64, 1);
            for _ in 0..1000 {
                cache.get(&1);
            }
            assert_eq!(cache.frequency(&1), Some(1001));

            cache.insert(2u64, 2);
            cache.insert(3u64, 3); // key 2 evicted, key 1 untouchable
            assert!(cache.contains(&1));
            assert!(!cache.contains(&2));
            cache.check_invariants().unwrap();
        }

        #[test]
        fn eviction_cascade_drains_buckets_in_order() {
            let mut cache = LfuCache::new(3);
            cache.insert(1u64, 1);
            cache.insert(2u64, 2);
            cache.insert(3u64, 3);
            cache.get(&1);
            cache.get(&1);
            cache.get(&2);

            // freq: 1→3, 2→2, 3→1; pops come lowest-first.
            assert_eq!(cache.pop_lfu(), Some((3, 3)));
            assert_eq!(cache.pop_lfu(), Some((2, 2)));
            assert_eq!(cache.pop_lfu(), Some((1, 1)));
            cache.check_invariants().unwrap();
        }
    }

    #[cfg(feature = "metrics")]
    mod metrics {
        use super::*;

        #[test]
        fn snapshot_reflects_traffic() {
            let mut cache = LfuCache::new(2);
            cache.insert(1u64, 1);
            cache.insert(2u64, 2);
            cache.insert(1u64, 10); // update
            cache.get(&1);
            cache.get(&9); // miss
            cache.insert(3u64, 3); // eviction

            let snap = cache.metrics_snapshot();
            assert_eq!(snap.insert_calls, 4);
            assert_eq!(snap.insert_new, 3);
            assert_eq!(snap.insert_updates, 1);
            assert_eq!(snap.get_calls, 2);
            assert_eq!(snap.get_hits, 1);
            assert_eq!(snap.get_misses, 1);
            assert_eq!(snap.evict_calls, 1);
            assert_eq!(snap.evicted_entries, 1);
            assert_eq!(snap.cache_len, 2);
            assert_eq!(snap.capacity, 2);
            assert!(snap.hit_ratio() > 0.49 && snap.hit_ratio() < 0.51);
        }
    }

    #[cfg(feature = "concurrency")]
    mod concurrent {
        use super::*;
        use std::sync::Arc;

        #[test]
        fn shared_cache_across_threads() {
            let cache = Arc::new(ConcurrentLfuCache::new(64));
            let mut handles = Vec::new();
            for t in 0u64..4 {
                let cache = Arc::clone(&cache);
                handles.push(std::thread::spawn(move || {
                    for i in 0..100u64 {
                        cache.insert(t * 1000 + i % 16, i);
                        let _ = cache.get(&(t * 1000 + i % 16));
                    }
                }));
            }
            for handle in handles {
                handle.join().unwrap();
            }
            assert!(cache.len() <= cache.capacity());
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        /// Reference LFU: linear scan, evicts the (frequency, last-touch)
        /// minimum.
        struct ModelLfu {
            capacity: usize,
            entries: Vec<(u64, u64, u64, u64)>, // key, value, freq, last_touch
            tick: u64,
        }

        impl ModelLfu {
            fn new(capacity: usize) -> Self {
                Self {
                    capacity,
                    entries: Vec::new(),
                    tick: 0,
                }
            }

            fn get(&mut self, key: u64) -> Option<u64> {
                self.tick += 1;
                let tick = self.tick;
                let entry = self.entries.iter_mut().find(|e| e.0 == key)?;
                entry.2 += 1;
                entry.3 = tick;
                Some(entry.1)
            }

            fn insert(&mut self, key: u64, value: u64) {
                if self.capacity == 0 {
                    return;
                }
                self.tick += 1;
                let tick = self.tick;
                if let Some(entry) = self.entries.iter_mut().find(|e| e.0 == key) {
                    entry.1 = value;
                    entry.2 += 1;
                    entry.3 = tick;
                    return;
                }
                if self.entries.len() == self.capacity {
                    let victim = self
                        .entries
                        .iter()
                        .enumerate()
                        .min_by_key(|(_, e)| (e.2, e.3))
                        .map(|(i, _)| i)
                        .unwrap();
                    self.entries.remove(victim);
                }
                self.entries.push((key, value, 1, tick));
            }
        }

        #[derive(Debug, Clone)]
        enum Op {
            Get(u64),
            Insert(u64, u64),
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                (0u64..16).prop_map(Op::Get),
                (0u64..16, 0u64..1000).prop_map(|(k, v)| Op::Insert(k, v)),
            ]
        }

        proptest! {
            // The cache agrees with a naive reference model on every
            // observable: get results, sizes, membership.
            #[test]
            fn matches_reference_model(
                capacity in 0usize..8,
                ops in proptest::collection::vec(op_strategy(), 1..300),
            ) {
                let mut cache = LfuCache::new(capacity);
                let mut model = ModelLfu::new(capacity);

                for op in ops {
                    match op {
                        Op::Get(key) => {
                            prop_assert_eq!(cache.get(&key).copied(), model.get(key));
                        },
                        Op::Insert(key, value) => {
                            cache.insert(key, value);
                            model.insert(key, value);
                        },
                    }
                    prop_assert_eq!(cache.len(), model.entries.len());
                    cache.check_invariants().unwrap();
                }

                for key in 0u64..16 {
                    let in_model = model.entries.iter().any(|e| e.0 == key);
                    prop_assert_eq!(cache.contains(&key), in_model);
                    if in_model {
                        let freq = model.entries.iter().find(|e| e.0 == key).unwrap().2;
                        prop_assert_eq!(cache.frequency(&key), Some(freq));
                    }
                }
            }
        }
    }
}
