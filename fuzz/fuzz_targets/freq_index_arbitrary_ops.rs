#![no_main]

use libfuzzer_sys::fuzz_target;
use lfukit::ds::{FrequencyIndex, Handle};

// Fuzz arbitrary operation sequences on FrequencyIndex
//
// Drives insert_new, promote, remove, pop_lru_min, and clear while
// mirroring every live item (with its frequency and node handle) in a
// flat Vec. The watermark and per-bucket chain links are revalidated
// after each operation.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let mut index: FrequencyIndex<u32> = FrequencyIndex::new();
    // (item, freq, node)
    let mut live: Vec<(u32, u64, Handle)> = Vec::new();
    let mut next_item = 0u32;

    let mut idx = 0;
    while idx + 1 < data.len() {
        let op = data[idx] % 6;
        let pick = usize::from(data[idx + 1]);

        match op {
            0 => {
                // Insert a fresh item at frequency 1
                let item = next_item;
                next_item = next_item.wrapping_add(1);
                let node = index.insert_new(item);
                live.push((item, 1, node));
            }
            1 => {
                // Promote a live item
                if !live.is_empty() {
                    let slot = pick % live.len();
                    let (_, freq, node) = live[slot];
                    let (new_freq, new_node) =
                        index.promote(freq, node).expect("promote lost a live item");
                    assert_eq!(new_freq, freq.saturating_add(1));
                    live[slot].1 = new_freq;
                    live[slot].2 = new_node;
                }
            }
            2 => {
                // Remove a live item
                if !live.is_empty() {
                    let slot = pick % live.len();
                    let (item, freq, node) = live.swap_remove(slot);
                    assert_eq!(index.remove(freq, node), Some(item));
                }
            }
            3 => {
                // Pop the LRU item at the minimum frequency
                match index.pop_lru_min() {
                    Some((item, freq)) => {
                        let min = live.iter().map(|&(_, f, _)| f).min().unwrap();
                        assert_eq!(freq, min, "pop did not come from the minimum bucket");
                        let slot = live
                            .iter()
                            .position(|&(i, _, _)| i == item)
                            .expect("popped item was not live");
                        live.swap_remove(slot);
                    }
                    None => assert!(live.is_empty()),
                }
            }
            4 => {
                // Watermark agrees with the model
                assert_eq!(
                    index.lowest_occupied(),
                    live.iter().map(|&(_, f, _)| f).min()
                );
            }
            5 => {
                index.clear();
                live.clear();
            }
            _ => unreachable!(),
        }

        assert_eq!(index.len(), live.len());
        assert_eq!(index.is_empty(), live.is_empty());
        #[cfg(debug_assertions)]
        index.debug_validate();
        idx += 2;
    }
});
