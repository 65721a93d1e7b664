//! Example walking through the IndexedQueue id-based API.
//!
//! Run with: cargo run --example basic_queue

use pqkit::prelude::*;

fn main() {
    println!("=== IndexedQueue Examples ===\n");

    // Example 1: ordered pops
    println!("1. Insert and pop");
    let mut queue = QueueBuilder::new(8).build::<u32, &str>();
    let write = queue.insert(5, "write report");
    let coffee = queue.insert(3, "coffee");
    let lunch = queue.insert(7, "lunch");

    if let Some((key, task)) = queue.front() {
        println!("   next: {} (priority {})", task, key);
    }
    println!();

    // Example 2: reprioritise through the id
    println!("2. Update");
    queue.update(lunch, 1);
    if let Some((key, task)) = queue.front() {
        println!("   lunch moved up, next: {} (priority {})", task, key);
    }
    println!();

    // Example 3: erase is O(1) and leaves a tombstone
    println!("3. Erase");
    queue.erase(write);
    println!(
        "   erased 'write report': len {}, tombstones {}, id still valid? {}",
        queue.len(),
        queue.tombstones(),
        queue.contains(write)
    );
    println!();

    // Example 4: holes are reused by the next insert
    println!("4. Hole reuse");
    let email = queue.insert(4, "email");
    println!(
        "   inserted 'email' as {}: slots {}, tombstones {}",
        email,
        queue.slot_len(),
        queue.tombstones()
    );
    println!();

    // Example 5: draining
    println!("5. Drain");
    while let Some((key, task)) = queue.pop() {
        println!("   {:>2} {}", key, task);
    }
    println!("   coffee id valid after drain? {}", queue.contains(coffee));
    println!();

    // Example 6: bulk load
    println!("6. Bulk load");
    let (mut loaded, ids) = QueueBuilder::new(0).build_from(vec![(4, 'x'), (2, 'y'), (4, 'z')]);
    println!("   ids in input order: {:?}", ids.iter().map(|id| id.to_string()).collect::<Vec<_>>());
    let order: Vec<char> = std::iter::from_fn(|| loaded.pop().map(|(_, v)| v)).collect();
    println!("   pop order: {:?} (ties keep input order)", order);
}
