#![no_main]

use libfuzzer_sys::fuzz_target;
use pqkit::ds::{EntryId, IndexedQueue};

// Fuzz arbitrary operation sequences on IndexedQueue
//
// Drives insert, erase, pop, update, set_value and clear against a naive
// model (an unsorted Vec ranked by key, then by position among equal keys)
// and checks the structural invariants after every step.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let mut queue: IndexedQueue<u8, u32> = IndexedQueue::new();
    // (id, key, value, rank among equal keys) for every live entry
    let mut model: Vec<(EntryId, u8, u32, i64)> = Vec::new();
    let mut dead: Vec<EntryId> = Vec::new();
    let mut newest = 0i64;
    let mut oldest = 0i64;

    let mut idx = 0;
    while idx + 2 < data.len() {
        let op = data[idx] % 8;
        let a = data[idx + 1];
        let b = data[idx + 2];
        idx += 3;

        match op {
            0 | 1 => {
                // insert
                let id = queue.insert(a, u32::from(b));
                assert!(queue.contains(id));
                newest += 1;
                model.push((id, a, u32::from(b), newest));
            },
            2 => {
                // erase a live id
                if model.is_empty() {
                    continue;
                }
                let (id, key, value, _) = model.remove(usize::from(a) % model.len());
                assert_eq!(queue.erase(id), Some((key, value)));
                assert_eq!(queue.erase(id), None);
                dead.push(id);
            },
            3 => {
                // pop
                let expected = model
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, (_, key, _, rank))| (*key, *rank))
                    .map(|(pos, _)| pos);
                match expected {
                    Some(pos) => {
                        let (id, key, value, _) = model.remove(pos);
                        assert_eq!(queue.pop(), Some((key, value)));
                        dead.push(id);
                    },
                    None => assert_eq!(queue.pop(), None),
                }
            },
            4 => {
                // update: an equal key keeps the entry's place, moving left
                // lands after equal keys, moving right lands before them
                if model.is_empty() {
                    continue;
                }
                let pos = usize::from(a) % model.len();
                let old = model[pos].1;
                assert_eq!(queue.update(model[pos].0, b), Some(old));
                model[pos].1 = b;
                assert_eq!(queue.key(model[pos].0), Some(&b));
                if b < old {
                    newest += 1;
                    model[pos].3 = newest;
                } else if b > old {
                    oldest -= 1;
                    model[pos].3 = oldest;
                }
            },
            5 => {
                // set_value
                if model.is_empty() {
                    continue;
                }
                let pos = usize::from(a) % model.len();
                let fresh = u32::from(b) << 8;
                assert_eq!(queue.set_value(model[pos].0, fresh), Some(model[pos].2));
                model[pos].2 = fresh;
            },
            6 => {
                // clear
                if a % 8 == 0 {
                    queue.clear();
                    dead.extend(model.drain(..).map(|(id, ..)| id));
                }
            },
            7 => {
                // stale id probes
                if dead.is_empty() {
                    continue;
                }
                let id = dead[usize::from(a) % dead.len()];
                assert!(!queue.contains(id));
                assert_eq!(queue.get(id), None);
                assert_eq!(queue.update(id, b), None);
            },
            _ => unreachable!(),
        }

        assert_eq!(queue.len(), model.len());
        assert!(queue.check_invariants().is_ok());
    }

    // Final drain must be sorted by key
    let mut last = None;
    while let Some((key, _)) = queue.pop() {
        if let Some(prev) = last {
            assert!(prev <= key);
        }
        last = Some(key);
    }
    assert!(queue.is_empty());
});
