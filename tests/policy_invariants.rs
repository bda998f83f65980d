// ==============================================
// POLICY INVARIANT TESTS (integration)
// ==============================================
//
// Tests that verify library-wide behavioral guarantees from the public
// API: capacity handling, structural consistency under randomized
// workloads, and builder configuration. These exercise multiple modules
// together and belong here rather than in any single source file.

use lfukit::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ==============================================
// Capacity-0 Behavior
// ==============================================

mod zero_capacity {
    use super::*;

    #[test]
    fn capacity_zero_is_honored() {
        let cache: LfuCache<&str, i32> = LfuCache::new(0);

        assert_eq!(
            cache.capacity(),
            0,
            "LfuCache::new(0) should honor capacity=0, not coerce to {}",
            cache.capacity()
        );
    }

    #[test]
    fn capacity_zero_rejects_inserts() {
        let mut cache: LfuCache<&str, i32> = LfuCache::new(0);
        cache.insert("key", 42);

        assert_eq!(
            cache.len(),
            0,
            "LfuCache with capacity=0 should reject inserts"
        );
        assert_eq!(cache.get(&"key"), None);
    }

    #[test]
    fn builder_honors_capacity_zero() {
        let cache: LfuCache<u64, u64> = LfuCacheBuilder::new(0).build();
        assert_eq!(cache.capacity(), 0);
    }
}

// ==============================================
// Randomized Workloads
// ==============================================

mod random_workloads {
    use super::*;

    fn run_workload(capacity: usize, universe: u64, ops: usize, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut cache: LfuCache<u64, u64> = LfuCache::new(capacity);

        for i in 0..ops {
            let key = rng.gen_range(0..universe);
            match rng.gen_range(0u8..10) {
                0..=4 => {
                    let _ = cache.get(&key);
                },
                5..=7 => {
                    cache.insert(key, i as u64);
                },
                8 => {
                    let _ = cache.remove(&key);
                },
                _ => {
                    let _ = cache.pop_lfu();
                },
            }

            assert!(cache.len() <= capacity, "capacity bound violated");
            cache.check_invariants().unwrap();
        }
    }

    #[test]
    fn mixed_operations_hold_invariants() {
        run_workload(16, 64, 2_000, 0xD15EA5E);
    }

    #[test]
    fn churn_heavy_small_cache() {
        run_workload(2, 128, 2_000, 42);
    }

    #[test]
    fn single_slot_cache() {
        run_workload(1, 32, 1_000, 7);
    }

    #[test]
    fn capacity_larger_than_universe_never_evicts_spuriously() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut cache: LfuCache<u64, u64> = LfuCache::new(64);

        for _ in 0..1_000 {
            let key = rng.gen_range(0u64..16);
            cache.insert(key, key);
            let _ = cache.get(&key);
        }

        // Universe fits; every key seen must still be resident.
        for key in 0u64..16 {
            assert!(cache.contains(&key), "key {key} evicted despite headroom");
        }
        cache.check_invariants().unwrap();
    }
}

// ==============================================
// Frequency Semantics Across the Public API
// ==============================================

mod frequency_semantics {
    use super::*;

    #[test]
    fn frequency_is_monotone_under_hits() {
        let mut cache: LfuCache<u64, u64> = LfuCache::new(8);
        cache.insert(1, 1);

        let mut last = cache.frequency(&1).unwrap();
        for _ in 0..50 {
            cache.get(&1);
            let now = cache.frequency(&1).unwrap();
            assert_eq!(now, last + 1);
            last = now;
        }
    }

    #[test]
    fn eviction_order_matches_reported_frequencies() {
        let mut rng = StdRng::seed_from_u64(1234);
        let mut cache: LfuCache<u64, u64> = LfuCache::new(12);

        for key in 0u64..12 {
            cache.insert(key, key);
            for _ in 0..rng.gen_range(0..8) {
                cache.get(&key);
            }
        }

        // Drain and check frequencies come out non-decreasing.
        let mut last_freq = 0u64;
        while let Some((key, _)) = cache.peek_lfu().map(|(k, v)| (*k, *v)) {
            let freq = cache.frequency(&key).unwrap();
            assert!(freq >= last_freq, "pop order regressed: {freq} < {last_freq}");
            last_freq = freq;
            assert_eq!(cache.pop_lfu().map(|(k, _)| k), Some(key));
        }
        assert!(cache.is_empty());
    }
}
