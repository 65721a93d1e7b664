// ==============================================
// INDEXED QUEUE SCENARIOS (integration)
// ==============================================
//
// End-to-end walkthroughs through the public API only: id stability across
// unrelated churn, erase idempotence, bulk load, snapshot round trips and
// bounded storage under insert/erase loops.

use pqkit::builder::QueueBuilder;
use pqkit::ds::{EntryId, IndexedQueue, KeyedQueue};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn drain<K: Ord, V>(queue: &mut IndexedQueue<K, V>) -> Vec<(K, V)> {
    let mut out = Vec::new();
    while let Some(entry) = queue.pop() {
        out.push(entry);
    }
    out
}

// ==============================================
// Basic walkthroughs
// ==============================================

mod walkthroughs {
    use super::*;

    #[test]
    fn pop_exposes_next_minimum() {
        let mut queue = IndexedQueue::new();
        queue.insert(5, "a");
        queue.insert(3, "b");
        queue.insert(7, "c");

        assert_eq!(queue.front(), Some((&3, &"b")));
        queue.pop();
        assert_eq!(queue.front(), Some((&5, &"a")));
    }

    #[test]
    fn erased_entry_needs_no_pop() {
        let mut queue = IndexedQueue::new();
        let a = queue.insert(5, "a");
        queue.insert(3, "b");

        queue.erase(a);
        assert!(!queue.contains(a));
        assert_eq!(queue.front(), Some((&3, &"b")));
        assert!(queue.pop().is_some());
        assert!(queue.is_empty());
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn update_moves_entry_to_front() {
        let mut queue = IndexedQueue::new();
        queue.insert(5, "a");
        queue.insert(3, "b");
        let c = queue.insert(7, "c");

        queue.update(c, 1);
        assert_eq!(queue.front(), Some((&1, &"c")));
        queue.check_invariants().unwrap();
    }

    #[test]
    fn bulk_load_keeps_input_order_on_ties() {
        let mut queue = IndexedQueue::new();
        queue.create(vec![(4, "x"), (2, "y"), (4, "z")]);
        assert_eq!(drain(&mut queue), vec![(2, "y"), (4, "x"), (4, "z")]);
    }

    #[test]
    fn insert_erase_loop_keeps_storage_bounded() {
        let mut queue = IndexedQueue::new();
        for i in 0..1000 {
            let id = queue.insert(i % 13, i);
            queue.erase(id);
            queue.check_invariants().unwrap();
            assert!(queue.slot_len() <= 1);
        }
        assert!(queue.is_empty());
        assert_eq!(queue.slot_len(), 0);
    }
}

// ==============================================
// Id semantics
// ==============================================

mod ids {
    use super::*;

    #[test]
    fn erase_twice_is_same_as_once() {
        let mut queue = IndexedQueue::new();
        let a = queue.insert(1, 'a');
        let b = queue.insert(2, 'b');
        queue.insert(3, 'c');

        assert_eq!(queue.erase(b), Some((2, 'b')));
        let after_once = queue.snapshot_sorted();
        assert_eq!(queue.erase(b), None);
        assert_eq!(queue.snapshot_sorted(), after_once);
        assert!(!queue.contains(b));
        assert!(queue.contains(a));
    }

    #[test]
    fn ids_stay_valid_through_unrelated_churn() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut queue = IndexedQueue::new();
        let watched: Vec<(EntryId, i64)> = (0..20)
            .map(|i| {
                let key = rng.random_range(0..1000);
                (queue.insert(key, i), key)
            })
            .collect();

        let mut others = Vec::new();
        for step in 0..2000 {
            match step % 5 {
                0 | 1 => others.push(queue.insert(rng.random_range(-500..1500), -1)),
                2 if !others.is_empty() => {
                    let victim = others.swap_remove(rng.random_range(0..others.len()));
                    queue.erase(victim);
                },
                3 if !others.is_empty() => {
                    let target = others[rng.random_range(0..others.len())];
                    queue.update(target, rng.random_range(-500..1500));
                },
                _ => {},
            }
            for (i, (id, key)) in watched.iter().enumerate() {
                assert_eq!(queue.get(*id), Some((key, &(i as i32))));
            }
        }
        queue.check_invariants().unwrap();
    }

    #[test]
    fn stale_id_never_aliases_reused_index() {
        let mut queue = IndexedQueue::new();
        queue.insert(1, "keep");
        let victim = queue.insert(5, "victim");
        queue.insert(9, "tail");
        queue.erase(victim);

        let newcomer = queue.insert(6, "newcomer");
        assert_eq!(newcomer.index(), victim.index());
        assert_eq!(queue.value(victim), None);
        assert_eq!(queue.update(victim, 0), None);
        assert_eq!(queue.value(newcomer), Some(&"newcomer"));
    }

    #[test]
    fn valid_count_matches_drain_count() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut queue = IndexedQueue::new();
        let mut issued = Vec::new();
        for _ in 0..500 {
            if rng.random_bool(0.6) || issued.is_empty() {
                issued.push(queue.insert(rng.random_range(0..50u32), ()));
            } else {
                let id = issued[rng.random_range(0..issued.len())];
                queue.erase(id);
            }
        }
        let valid = issued.iter().filter(|id| queue.contains(**id)).count();
        assert_eq!(valid, queue.len());
        assert_eq!(drain(&mut queue).len(), valid);
    }
}

// ==============================================
// Bulk load and snapshots
// ==============================================

mod bulk {
    use super::*;

    #[test]
    fn snapshot_round_trip_preserves_order() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut queue = IndexedQueue::new();
        let ids: Vec<_> = (0..200)
            .map(|i| queue.insert(rng.random_range(0..40u16), i))
            .collect();
        for id in ids.iter().step_by(3) {
            queue.erase(*id);
        }

        let snapshot = queue.snapshot_sorted();
        let mut rebuilt = IndexedQueue::new();
        rebuilt.create(snapshot.clone());
        rebuilt.check_invariants().unwrap();
        assert_eq!(drain(&mut rebuilt), snapshot);
    }

    #[test]
    fn builder_from_parts_matches_create() {
        let keys = vec![9, 1, 4, 1];
        let values = vec!["i", "a", "d", "b"];
        let (mut from_parts, _) = QueueBuilder::new(4)
            .try_build_from_parts(keys.clone(), values.clone())
            .unwrap();
        let mut created: IndexedQueue<_, _> = keys.into_iter().zip(values).collect();
        assert_eq!(drain(&mut from_parts), drain(&mut created));
    }
}

// ==============================================
// Keyed queue
// ==============================================

mod keyed {
    use super::*;

    #[test]
    fn relaxation_keeps_minimum_distance() {
        let mut frontier: KeyedQueue<u32, u32> = KeyedQueue::new();
        let offers = [(1, 10), (2, 4), (1, 7), (3, 9), (2, 6), (1, 12), (3, 1)];
        for (node, dist) in offers {
            frontier.decrease(node, dist);
            frontier.check_invariants().unwrap();
        }
        assert_eq!(frontier.pop(), Some((3, 1)));
        assert_eq!(frontier.pop(), Some((2, 4)));
        assert_eq!(frontier.pop(), Some((1, 7)));
        assert!(frontier.is_empty());
    }
}
