#![no_main]

use libfuzzer_sys::fuzz_target;
use pqkit::ds::IndexedQueue;

// Fuzz property-based tests for IndexedQueue
//
// Tests specific invariants:
// - Pops come out sorted, equal keys in insertion order
// - create() equals a stable sort of its input
// - Erased ids stay dead after their index is reused
// - Storage stays bounded under insert/erase churn
// - snapshot_sorted() round-trips through create()
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let test_type = data[0] % 5;

    match test_type {
        0 => test_pop_order(&data[1..]),
        1 => test_create_is_stable_sort(&data[1..]),
        2 => test_stale_ids(&data[1..]),
        3 => test_churn_is_bounded(&data[1..]),
        4 => test_snapshot_round_trip(&data[1..]),
        _ => unreachable!(),
    }
});

// Property: pops are sorted by key, FIFO among equal keys
fn test_pop_order(data: &[u8]) {
    let mut queue = IndexedQueue::new();
    for (seq, &byte) in data.iter().enumerate() {
        queue.insert(byte % 16, seq);
    }

    let mut last: Option<(u8, usize)> = None;
    while let Some((key, seq)) = queue.pop() {
        if let Some((prev_key, prev_seq)) = last {
            assert!(prev_key < key || (prev_key == key && prev_seq < seq));
        }
        last = Some((key, seq));
    }
}

// Property: create() yields the same order as a stable sort
fn test_create_is_stable_sort(data: &[u8]) {
    let entries: Vec<(u8, usize)> = data.iter().map(|b| b % 8).zip(0..).collect();
    let mut expected = entries.clone();
    expected.sort_by_key(|(key, _)| *key);

    let mut queue = IndexedQueue::new();
    let ids = queue.create(entries.clone());
    assert_eq!(ids.len(), entries.len());
    for (id, (key, value)) in ids.iter().zip(&entries) {
        assert_eq!(queue.get(*id), Some((key, value)));
    }
    assert_eq!(queue.snapshot_sorted(), expected);
}

// Property: an erased id never resolves again, even once its index is reused
fn test_stale_ids(data: &[u8]) {
    let mut queue = IndexedQueue::new();
    let mut dead = Vec::new();
    for &byte in data {
        let id = queue.insert(byte, ());
        if byte % 2 == 0 {
            queue.erase(id);
            dead.push(id);
        }
        for stale in &dead {
            assert!(!queue.contains(*stale));
        }
    }
    assert!(queue.check_invariants().is_ok());
}

// Property: insert/erase round trips do not grow the slot array
fn test_churn_is_bounded(data: &[u8]) {
    let mut queue = IndexedQueue::new();
    let half = data.len() / 2;
    for &byte in &data[..half] {
        queue.insert(byte, byte);
    }
    let base = queue.slot_len();
    for &byte in &data[half..] {
        let id = queue.insert(byte, byte);
        queue.erase(id);
        assert!(queue.slot_len() <= base + 1);
    }
    assert_eq!(queue.len(), half);
}

// Property: snapshot_sorted() fed back into create() drains identically
fn test_snapshot_round_trip(data: &[u8]) {
    let mut queue = IndexedQueue::new();
    let mut ids = Vec::new();
    for &byte in data {
        ids.push(queue.insert(byte / 4, byte));
    }
    for id in ids.iter().step_by(3) {
        queue.erase(*id);
    }

    let snapshot = queue.snapshot_sorted();
    let mut rebuilt = IndexedQueue::new();
    rebuilt.create(snapshot.clone());

    let mut drained = Vec::new();
    while let Some(entry) = rebuilt.pop() {
        drained.push(entry);
    }
    assert_eq!(drained, snapshot);
}
