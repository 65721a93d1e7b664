pub use crate::builder::QueueBuilder;
pub use crate::ds::{EntryId, IndexedQueue, KeyedQueue};
pub use crate::error::{ConfigError, InvariantError};

#[cfg(feature = "concurrency")]
pub use crate::ds::ConcurrentIndexedQueue;
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::QueueMetricsSnapshot;
