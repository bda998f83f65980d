//! Fixed-size open-addressing hash table with tombstone deletion.
//!
//! This is the item index of the LFU cache: a key → handle map whose
//! capacity is fixed at construction. The owning cache pre-sizes it with
//! headroom (150% of the cache capacity by default) so the bounded probe
//! sequence never runs dry in normal operation.
//!
//! ## Probing
//!
//! The table size is the next power of two at or above the requested
//! capacity, so slot selection is a bitmask rather than a modulo. Lookup
//! examines the slot sequence
//!
//! ```text
//!   slot(j) = (h(key) + j² + 23·j) & (size - 1)    for j = 0..MAX_PROBES
//! ```
//!
//! The quadratic term spreads collisions; the linear `23·j` term breaks
//! up the cyclic patterns a pure quadratic probe develops on power-of-two
//! tables.
//!
//! ## Slot states
//!
//! | State       | Lookup                | Insert          |
//! |-------------|-----------------------|-----------------|
//! | `Empty`     | terminates (miss)     | usable          |
//! | `Tombstone` | skipped, probe goes on| usable          |
//! | `Occupied`  | key compare           | collision, next |
//!
//! Deletion writes a tombstone instead of emptying the slot, which keeps
//! probe sequences that passed through it intact. The table never resizes;
//! [`InsertError::ProbesExhausted`] signals that the caller undersized it.

use std::hash::{BuildHasher, Hash};

use rustc_hash::FxBuildHasher;

/// Probe sequence length before an insert or lookup gives up.
pub const MAX_PROBES: usize = 20;

/// Linear probe term; breaks simple clustering on power-of-two tables.
const PROBE_STRIDE: usize = 23;

/// Error returned by [`ProbeTable::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertError {
    /// The key is already present; use [`ProbeTable::update`] instead.
    KeyPresent,
    /// No free slot within [`MAX_PROBES`]; the table is undersized for its
    /// workload. The owning cache treats this as an internal-consistency
    /// failure.
    ProbesExhausted,
}

#[derive(Debug)]
enum Slot<K, V> {
    Empty,
    Tombstone,
    Occupied { key: K, value: V },
}

/// Open-addressing map with a fixed slot count.
pub struct ProbeTable<K, V, S = FxBuildHasher> {
    slots: Vec<Slot<K, V>>,
    mask: usize,
    len: usize,
    hasher: S,
}

// Manual impl: the derive would bound `S: Debug`, which the default
// `FxBuildHasher` does not satisfy. The hasher field is skipped.
impl<K: std::fmt::Debug, V: std::fmt::Debug, S> std::fmt::Debug for ProbeTable<K, V, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProbeTable")
            .field("slots", &self.slots)
            .field("mask", &self.mask)
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

impl<K, V> ProbeTable<K, V, FxBuildHasher>
where
    K: Eq + Hash,
{
    /// Creates a table with at least `capacity` slots (rounded up to a
    /// power of two) and the default hasher.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, FxBuildHasher)
    }
}

impl<K, V, S> ProbeTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        let size = capacity.max(1).next_power_of_two();
        let mut slots = Vec::with_capacity(size);
        slots.resize_with(size, || Slot::Empty);
        Self {
            slots,
            mask: size - 1,
            len: 0,
            hasher,
        }
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total slot count (always a power of two).
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let idx = self.find(key)?;
        match &self.slots[idx] {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = self.find(key)?;
        match &mut self.slots[idx] {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Inserts a new key. Fails if the key is present or the probe
    /// sequence finds no free slot.
    pub fn insert(&mut self, key: K, value: V) -> Result<(), InsertError> {
        if self.contains(&key) {
            return Err(InsertError::KeyPresent);
        }

        let h = self.hasher.hash_one(&key) as usize;
        for j in 0..MAX_PROBES {
            let idx = self.slot_at(h, j);
            match self.slots[idx] {
                Slot::Empty | Slot::Tombstone => {
                    self.slots[idx] = Slot::Occupied { key, value };
                    self.len += 1;
                    return Ok(());
                },
                Slot::Occupied { .. } => {},
            }
        }
        Err(InsertError::ProbesExhausted)
    }

    /// Replaces the value for an existing key, returning the old value;
    /// `None` if the key is absent.
    pub fn update(&mut self, key: &K, value: V) -> Option<V> {
        let idx = self.find(key)?;
        match &mut self.slots[idx] {
            Slot::Occupied { value: old, .. } => Some(std::mem::replace(old, value)),
            _ => None,
        }
    }

    /// Removes a key, leaving a tombstone so other probe sequences stay
    /// correct. Returns the removed value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let idx = self.find(key)?;
        match std::mem::replace(&mut self.slots[idx], Slot::Tombstone) {
            Slot::Occupied { value, .. } => {
                self.len -= 1;
                Some(value)
            },
            // find() only returns occupied slots.
            other => {
                self.slots[idx] = other;
                None
            },
        }
    }

    /// Resets every slot to `Empty`.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = Slot::Empty;
        }
        self.len = 0;
    }

    /// Iterates occupied entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Occupied { key, value } => Some((key, value)),
            _ => None,
        })
    }

    fn slot_at(&self, h: usize, j: usize) -> usize {
        h.wrapping_add(j * j + PROBE_STRIDE * j) & self.mask
    }

    fn find(&self, key: &K) -> Option<usize> {
        let h = self.hasher.hash_one(key) as usize;
        for j in 0..MAX_PROBES {
            let idx = self.slot_at(h, j);
            match &self.slots[idx] {
                Slot::Empty => return None,
                Slot::Tombstone => {},
                Slot::Occupied { key: stored, .. } => {
                    if stored == key {
                        return Some(idx);
                    }
                },
            }
        }
        None
    }
}
