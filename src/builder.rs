//! Builder for configuring an [`LfuCache`](crate::policy::lfu::LfuCache).
//!
//! [`LfuCache::new`](crate::policy::lfu::LfuCache::new) covers the
//! common case; the builder exists for the knobs behind it, validated
//! up front instead of panicking deep inside the item index.
//!
//! ```
//! use lfukit::builder::LfuCacheBuilder;
//! use lfukit::traits::CoreCache;
//!
//! let mut cache = LfuCacheBuilder::new(100)
//!     .index_headroom(2.0)
//!     .build::<u64, String>();
//! cache.insert(1, "hello".to_string());
//! assert_eq!(cache.capacity(), 100);
//! ```

use std::hash::{BuildHasher, Hash};

use rustc_hash::FxBuildHasher;

use crate::error::ConfigError;
use crate::policy::lfu::LfuCache;

/// Default item-index headroom: 150% of capacity, keeping the index
/// load factor at or below ~66% under the bounded probe sequence.
pub const DEFAULT_INDEX_HEADROOM: f64 = 1.5;

/// Configures and constructs an `LfuCache`.
#[derive(Debug, Clone)]
pub struct LfuCacheBuilder {
    capacity: usize,
    index_headroom: f64,
}

impl LfuCacheBuilder {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            index_headroom: DEFAULT_INDEX_HEADROOM,
        }
    }

    /// Sets the item-index slot budget as a multiple of capacity.
    /// Must be finite and at least 1.0; values below ~1.5 raise the
    /// index load factor and the risk of probe exhaustion.
    pub fn index_headroom(mut self, headroom: f64) -> Self {
        self.index_headroom = headroom;
        self
    }

    pub fn try_build<K, V>(self) -> Result<LfuCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        self.try_build_with_hasher(FxBuildHasher)
    }

    pub fn try_build_with_hasher<K, V, S>(self, hasher: S) -> Result<LfuCache<K, V, S>, ConfigError>
    where
        K: Eq + Hash + Clone,
        S: BuildHasher,
    {
        if !self.index_headroom.is_finite() {
            return Err(ConfigError::new(format!(
                "index headroom must be finite, got {}",
                self.index_headroom
            )));
        }
        if self.index_headroom < 1.0 {
            return Err(ConfigError::new(format!(
                "index headroom must be >= 1.0, got {}",
                self.index_headroom
            )));
        }

        let index_capacity = (self.capacity as f64 * self.index_headroom).ceil() as usize;
        Ok(LfuCache::with_index_capacity(
            self.capacity,
            index_capacity,
            hasher,
        ))
    }

    /// Panicking variant of [`try_build`](Self::try_build).
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid.
    pub fn build<K, V>(self) -> LfuCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        match self.try_build() {
            Ok(cache) => cache,
            Err(err) => panic!("invalid cache configuration: {err}"),
        }
    }
}
