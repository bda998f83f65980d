//! Frequency-ordered buckets for O(1) LFU bookkeeping.
//!
//! One bucket per distinct access frequency currently present; each bucket
//! is a [`LinkedList`] ordered by recency (front = most recently touched,
//! back = eviction candidate). Buckets live in a hash map keyed by
//! frequency and are additionally chained prev/next in ascending frequency
//! order, so retiring an emptied bucket and finding the lowest occupied
//! frequency are both O(1) — the minimum watermark is maintained
//! incrementally, never recomputed by scanning.
//!
//! ```text
//!   min_freq = 1
//!       │
//!       ▼
//!   freq=1: front ─► [h4] ◄──► [h2] ◄─ back (evict here)
//!       │ next
//!       ▼
//!   freq=3: front ─► [h0] ◄─ back
//! ```
//!
//! The index stores opaque `Copy` items — the cache stores entry handles —
//! and reports each item's list node handle back to the caller, which must
//! present the pair `(frequency, node)` on later operations. Emptied
//! buckets are always retired; a long-running workload with a wide
//! frequency range never accumulates stale empty buckets.

use rustc_hash::FxHashMap;

use crate::ds::arena::Handle;
use crate::ds::linked_list::LinkedList;

/// Pre-allocation for the bucket map; access frequencies cluster low.
pub const DEFAULT_BUCKET_PREALLOC: usize = 32;

#[derive(Debug)]
struct Bucket<T> {
    entries: LinkedList<T>,
    prev: Option<u64>,
    next: Option<u64>,
}

/// Frequency buckets with LRU tie-breaking inside each bucket.
#[derive(Debug)]
pub struct FrequencyIndex<T> {
    buckets: FxHashMap<u64, Bucket<T>>,
    // Lowest frequency with a non-empty bucket; 0 when the index is empty.
    min_freq: u64,
    len: usize,
}

impl<T> FrequencyIndex<T>
where
    T: Copy + Eq,
{
    pub fn new() -> Self {
        Self {
            buckets: FxHashMap::with_capacity_and_hasher(
                DEFAULT_BUCKET_PREALLOC,
                Default::default(),
            ),
            min_freq: 0,
            len: 0,
        }
    }

    /// Number of items across all buckets.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Lowest frequency with at least one item; `None` when empty.
    pub fn lowest_occupied(&self) -> Option<u64> {
        if self.min_freq == 0 {
            None
        } else {
            Some(self.min_freq)
        }
    }

    /// Admits a new item at frequency 1, most-recently-used end.
    ///
    /// A fresh admission always resets the minimum watermark to 1.
    pub fn insert_new(&mut self, item: T) -> Handle {
        let node = match self.buckets.get_mut(&1) {
            Some(bucket) => bucket.entries.push_front(item),
            None => {
                let next = self.lowest_occupied();
                let mut bucket = Bucket {
                    entries: LinkedList::new(),
                    prev: None,
                    next,
                };
                let node = bucket.entries.push_front(item);
                self.buckets.insert(1, bucket);
                if let Some(next_freq) = next {
                    if let Some(next_bucket) = self.buckets.get_mut(&next_freq) {
                        next_bucket.prev = Some(1);
                    }
                }
                node
            },
        };
        self.min_freq = 1;
        self.len += 1;
        node
    }

    /// Moves the item at `(freq, node)` into the bucket for `freq + 1`
    /// (saturating), most-recently-used end.
    ///
    /// Returns the new frequency and the item's new node handle; `None`
    /// if no such node exists at `freq`.
    pub fn promote(&mut self, freq: u64, node: Handle) -> Option<(u64, Handle)> {
        let new_freq = freq.saturating_add(1);

        let (item, old_prev, old_next, emptied) = {
            let bucket = self.buckets.get_mut(&freq)?;
            let item = bucket.entries.remove(node)?;
            (item, bucket.prev, bucket.next, bucket.entries.is_empty())
        };

        if emptied {
            self.retire(freq, old_prev, old_next);
        }

        let new_node = match self.buckets.get_mut(&new_freq) {
            Some(bucket) => bucket.entries.push_front(item),
            None => {
                // Splice a fresh bucket into the chain right after the
                // source position.
                let chain_prev = if emptied { old_prev } else { Some(freq) };
                let chain_next = old_next;
                self.link_bucket(new_freq, chain_prev, chain_next);
                let bucket = self
                    .buckets
                    .get_mut(&new_freq)
                    .expect("freshly linked bucket missing");
                bucket.entries.push_front(item)
            },
        };

        if self.min_freq == 0 || new_freq < self.min_freq {
            self.min_freq = new_freq;
        }

        Some((new_freq, new_node))
    }

    /// Removes the item at `(freq, node)`, retiring its bucket if emptied.
    pub fn remove(&mut self, freq: u64, node: Handle) -> Option<T> {
        let (item, prev, next, emptied) = {
            let bucket = self.buckets.get_mut(&freq)?;
            let item = bucket.entries.remove(node)?;
            (item, bucket.prev, bucket.next, bucket.entries.is_empty())
        };
        if emptied {
            self.retire(freq, prev, next);
        }
        self.len -= 1;
        Some(item)
    }

    /// Removes and returns the eviction candidate: the least-recently-used
    /// item of the lowest occupied bucket, with its frequency.
    pub fn pop_lru_min(&mut self) -> Option<(T, u64)> {
        let freq = self.lowest_occupied()?;
        let (item, prev, next, emptied) = {
            let bucket = self.buckets.get_mut(&freq)?;
            let item = bucket.entries.pop_back()?;
            (item, bucket.prev, bucket.next, bucket.entries.is_empty())
        };
        if emptied {
            self.retire(freq, prev, next);
        }
        self.len -= 1;
        Some((item, freq))
    }

    /// The item `pop_lru_min` would return, without removing it.
    pub fn peek_lru_min(&self) -> Option<&T> {
        let freq = self.lowest_occupied()?;
        self.buckets.get(&freq)?.entries.back()
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
        self.min_freq = 0;
        self.len = 0;
    }

    /// Unlinks and drops the (empty) bucket at `freq`, advancing the
    /// minimum watermark if it pointed there.
    fn retire(&mut self, freq: u64, prev: Option<u64>, next: Option<u64>) {
        self.buckets.remove(&freq);
        if let Some(prev_freq) = prev {
            if let Some(bucket) = self.buckets.get_mut(&prev_freq) {
                bucket.next = next;
            }
        }
        if let Some(next_freq) = next {
            if let Some(bucket) = self.buckets.get_mut(&next_freq) {
                bucket.prev = prev;
            }
        }
        if self.min_freq == freq {
            self.min_freq = next.unwrap_or(0);
        }
    }

    fn link_bucket(&mut self, freq: u64, prev: Option<u64>, next: Option<u64>) {
        self.buckets.insert(
            freq,
            Bucket {
                entries: LinkedList::new(),
                prev,
                next,
            },
        );
        if let Some(prev_freq) = prev {
            if let Some(bucket) = self.buckets.get_mut(&prev_freq) {
                bucket.next = Some(freq);
            }
        }
        if let Some(next_freq) = next {
            if let Some(bucket) = self.buckets.get_mut(&next_freq) {
                bucket.prev = Some(freq);
            }
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate(&self) {
        if self.len == 0 {
            assert_eq!(self.min_freq, 0);
            assert!(self.buckets.is_empty());
            return;
        }

        assert!(self.min_freq > 0);
        assert!(self.buckets.contains_key(&self.min_freq));

        let mut counted = 0usize;
        for (&freq, bucket) in &self.buckets {
            assert!(!bucket.entries.is_empty(), "empty bucket not retired");
            bucket.entries.debug_validate();
            counted += bucket.entries.len();

            match bucket.prev {
                Some(prev) => {
                    assert!(prev < freq);
                    assert_eq!(self.buckets[&prev].next, Some(freq));
                },
                None => assert_eq!(self.min_freq, freq),
            }
            if let Some(next) = bucket.next {
                assert!(next > freq);
                assert_eq!(self.buckets[&next].prev, Some(freq));
            }
        }
        assert_eq!(counted, self.len);
    }
}

impl<T> Default for FrequencyIndex<T>
where
    T: Copy + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}
