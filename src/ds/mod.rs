pub mod indexed_queue;
pub mod keyed_queue;

#[cfg(feature = "concurrency")]
pub use indexed_queue::ConcurrentIndexedQueue;
pub use indexed_queue::{EntryId, IndexedQueue};
pub use keyed_queue::KeyedQueue;
