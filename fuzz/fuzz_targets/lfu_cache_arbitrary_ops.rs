#![no_main]

use libfuzzer_sys::fuzz_target;
use lfukit::policy::lfu::LfuCache;
use lfukit::traits::{CoreCache, LfuCacheTrait, MutableCache};

// Reference LFU: linear scan, evicts the (frequency, last-touch) minimum.
struct Model {
    capacity: usize,
    entries: Vec<(u8, u8, u64, u64)>, // key, value, freq, last_touch
    tick: u64,
}

impl Model {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::new(),
            tick: 0,
        }
    }

    fn get(&mut self, key: u8) -> Option<u8> {
        self.tick += 1;
        let tick = self.tick;
        let entry = self.entries.iter_mut().find(|e| e.0 == key)?;
        entry.2 += 1;
        entry.3 = tick;
        Some(entry.1)
    }

    fn insert(&mut self, key: u8, value: u8) {
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

    fn remove(&mut self, key: u8) -> Option<u8> {
        let slot = self.entries.iter().position(|e| e.0 == key)?;
        Some(self.entries.remove(slot).1)
    }

    fn pop_lfu(&mut self) -> Option<(u8, u8)> {
        let victim = self
            .entries
            .iter()
            .enumerate()
            .min_by_key(|(_, e)| (e.2, e.3))
            .map(|(i, _)| i)?;
        let entry = self.entries.remove(victim);
        Some((entry.0, entry.1))
    }
}

// Fuzz the full cache against the reference model
//
// The first byte picks the capacity (0..=16); the rest is an operation
// stream over a 64-key universe. Every observable result must agree
// with the model, and the cross-structure invariants must hold after
// every operation.
fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    let capacity = usize::from(data[0] % 17);
    let mut cache: LfuCache<u8, u8> = LfuCache::new(capacity);
    let mut model = Model::new(capacity);

    let mut idx = 1;
    while idx + 2 < data.len() {
        let op = data[idx] % 7;
        let key = data[idx + 1] % 64;
        let val = data[idx + 2];

        match op {
            0 => {
                assert_eq!(cache.get(&key).copied(), model.get(key));
            }
            1 | 2 => {
                cache.insert(key, val);
                model.insert(key, val);
            }
            3 => {
                assert_eq!(cache.remove(&key), model.remove(key));
            }
            4 => {
                assert_eq!(cache.pop_lfu(), model.pop_lfu());
            }
            5 => {
                let model_freq = model.entries.iter().find(|e| e.0 == key).map(|e| e.2);
                assert_eq!(cache.frequency(&key), model_freq);
            }
            6 => {
                assert_eq!(
                    cache.contains(&key),
                    model.entries.iter().any(|e| e.0 == key)
                );
            }
            _ => unreachable!(),
        }

        assert_eq!(cache.len(), model.entries.len());
        assert!(cache.len() <= capacity);
        #[cfg(debug_assertions)]
        cache.check_invariants().unwrap();
        idx += 3;
    }
});
