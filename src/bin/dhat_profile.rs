//! DHAT heap profiler for pqkit.
//!
//! Run with: cargo run --bin dhat_profile --release --features dhat-heap
//! View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use pqkit::ds::{EntryId, IndexedQueue, KeyedQueue};

/// Simple XorShift64 RNG for deterministic workloads.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

/// Insert then erase the same entry repeatedly; storage must not grow.
fn churn_workload(queue: &mut IndexedQueue<u64, u64>, operations: usize) {
    for i in 0..operations as u64 {
        let id = queue.insert(i % 97, i);
        queue.erase(id);
    }
}

/// Random inserts mixed with erases of random live ids and pops.
fn mixed_workload(queue: &mut IndexedQueue<u64, u64>, operations: usize, universe: u64, seed: u64) {
    let mut rng = XorShift64::new(seed);
    let mut ids: Vec<EntryId> = Vec::new();

    for _ in 0..operations {
        match rng.next_u64() % 4 {
            0 | 1 => ids.push(queue.insert(rng.next_u64() % universe, 0)),
            2 if !ids.is_empty() => {
                let victim = ids.swap_remove((rng.next_u64() as usize) % ids.len());
                queue.erase(victim);
            },
            _ => {
                queue.pop();
            },
        }
    }
}

/// Reprioritise random live ids.
fn update_workload(queue: &mut IndexedQueue<u64, u64>, operations: usize, universe: u64, seed: u64) {
    let mut rng = XorShift64::new(seed);
    let ids: Vec<EntryId> = (0..1024).map(|i| queue.insert(i % universe, i)).collect();
    for _ in 0..operations {
        let id = ids[(rng.next_u64() as usize) % ids.len()];
        queue.update(id, rng.next_u64() % universe);
    }
}

fn profile_indexed_queue() {
    println!("=== Profiling IndexedQueue ===");
    let operations = 100_000;
    let universe = 16_384;

    let mut queue = IndexedQueue::with_capacity(4096);

    churn_workload(&mut queue, operations);
    println!("  After churn: {} slots", queue.slot_len());

    mixed_workload(&mut queue, operations / 4, universe, 42);
    println!(
        "  After mixed: {} live, {} tombstones",
        queue.len(),
        queue.tombstones()
    );

    queue.clear();
    update_workload(&mut queue, operations / 4, universe, 7);

    println!("  Final size: {}", queue.len());
}

fn profile_keyed_queue() {
    println!("=== Profiling KeyedQueue ===");
    let operations = 50_000;
    let mut rng = XorShift64::new(99);
    let mut queue: KeyedQueue<u64, u64> = KeyedQueue::with_capacity(1024);

    for _ in 0..operations {
        let node = rng.next_u64() % 2048;
        queue.decrease(node, rng.next_u64() % 10_000);
        if rng.next_u64() % 3 == 0 {
            queue.pop();
        }
    }

    println!("  Final size: {}", queue.len());
}

fn main() {
    let _profiler = dhat::Profiler::new_heap();

    println!("pqkit DHAT Heap Profiling");
    println!("=========================\n");

    profile_indexed_queue();
    profile_keyed_queue();

    println!("\n=========================");
    println!("Profiling complete!");
    println!(
        "View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>"
    );
}
