#![no_main]

use std::collections::HashMap;

use libfuzzer_sys::fuzz_target;
use pqkit::ds::KeyedQueue;

// Fuzz arbitrary operation sequences on KeyedQueue
//
// Tests random sequences of push, decrease, remove and pop against a HashMap
// of node -> priority, checking the node map agrees with the queue.
fuzz_target!(|data: &[u8]| {
    let mut queue: KeyedQueue<u8, u8> = KeyedQueue::new();
    let mut model: HashMap<u8, u8> = HashMap::new();

    for chunk in data.chunks_exact(3) {
        let (op, node, priority) = (chunk[0] % 4, chunk[1] % 32, chunk[2]);

        match op {
            0 => {
                // push
                assert_eq!(queue.push(node, priority), model.insert(node, priority));
            },
            1 => {
                // decrease
                let changed = match model.get(&node) {
                    Some(&current) if priority >= current => false,
                    _ => {
                        model.insert(node, priority);
                        true
                    },
                };
                assert_eq!(queue.decrease(node, priority), changed);
            },
            2 => {
                // remove
                assert_eq!(queue.remove(&node), model.remove(&node));
            },
            3 => {
                // pop
                let min = model.values().min().copied();
                match queue.pop() {
                    Some((popped, prio)) => {
                        assert_eq!(Some(prio), min);
                        assert_eq!(model.remove(&popped), Some(prio));
                    },
                    None => assert!(model.is_empty()),
                }
            },
            _ => unreachable!(),
        }

        assert_eq!(queue.len(), model.len());
        assert_eq!(queue.priority(&node), model.get(&node));
        assert!(queue.check_invariants().is_ok());
    }
});
