#![no_main]

use libfuzzer_sys::fuzz_target;
use lfukit::ds::ProbeTable;

// Fuzz arbitrary operation sequences on ProbeTable
//
// Tests random sequences of insert, get, update, remove, and clear
// against std::collections::HashMap as the oracle. Keys are drawn from
// a single byte so tombstone reuse and probe-chain collisions happen
// constantly.
fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    let mut table: ProbeTable<u32, u32> = ProbeTable::with_capacity(512);
    let mut oracle: std::collections::HashMap<u32, u32> = std::collections::HashMap::new();

    let mut idx = 0;
    while idx + 2 < data.len() {
        let op = data[idx] % 6;
        let key = u32::from(data[idx + 1]);
        let val = u32::from(data[idx + 2]);

        match op {
            0 => {
                // Insert (table rejects duplicates, oracle mirrors that)
                if table.insert(key, val).is_ok() {
                    let prev = oracle.insert(key, val);
                    assert!(prev.is_none());
                }
            }
            1 => {
                // Get
                assert_eq!(table.get(&key), oracle.get(&key));
            }
            2 => {
                // Update existing
                assert_eq!(table.update(&key, val), oracle.get_mut(&key).map(|v| std::mem::replace(v, val)));
            }
            3 => {
                // Remove (leaves a tombstone)
                assert_eq!(table.remove(&key), oracle.remove(&key));
            }
            4 => {
                // Contains
                assert_eq!(table.contains(&key), oracle.contains_key(&key));
            }
            5 => {
                // Clear
                table.clear();
                oracle.clear();
            }
            _ => unreachable!(),
        }

        assert_eq!(table.len(), oracle.len());
        idx += 3;
    }

    // Final sweep: every oracle entry must be reachable through the
    // probe sequence, tombstones and all.
    for (key, val) in &oracle {
        assert_eq!(table.get(key), Some(val));
    }
});
