//! Builder for the queue types.
//!
//! Collects the sizing hint once and hands out whichever queue flavour is
//! needed, pre-allocated.
//!
//! ## Example
//!
//! ```rust
//! use pqkit::builder::QueueBuilder;
//!
//! let mut queue = QueueBuilder::new(128).build::<u32, String>();
//! let id = queue.insert(3, "three".to_string());
//! assert_eq!(queue.value(id), Some(&"three".to_string()));
//!
//! let (mut loaded, ids) = QueueBuilder::new(0).build_from(vec![(2, 'b'), (1, 'a')]);
//! assert_eq!(loaded.key(ids[0]), Some(&2));
//! assert_eq!(loaded.pop(), Some((1, 'a')));
//! ```

use std::hash::Hash;

use crate::ds::{EntryId, IndexedQueue, KeyedQueue};
use crate::error::ConfigError;

/// Configures and constructs queues.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueBuilder {
    capacity: usize,
}

impl QueueBuilder {
    /// Creates a builder that pre-allocates room for `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Overrides the capacity hint.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn capacity_hint(&self) -> usize {
        self.capacity
    }

    /// Builds an empty [`IndexedQueue`].
    pub fn build<K, V>(self) -> IndexedQueue<K, V>
    where
        K: Ord,
    {
        IndexedQueue::with_capacity(self.capacity)
    }

    /// Builds an empty [`KeyedQueue`].
    pub fn build_keyed<N, K>(self) -> KeyedQueue<N, K>
    where
        N: Eq + Hash + Clone,
        K: Ord,
    {
        KeyedQueue::with_capacity(self.capacity)
    }

    /// Builds a queue bulk-loaded from `entries`; ids come back in input order.
    pub fn build_from<K, V, I>(self, entries: I) -> (IndexedQueue<K, V>, Vec<EntryId>)
    where
        K: Ord,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut queue = self.build();
        let ids = queue.create(entries);
        (queue, ids)
    }

    /// Builds a queue from separate key and value columns.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the columns differ in length.
    ///
    /// ```rust
    /// use pqkit::builder::QueueBuilder;
    ///
    /// let bad = QueueBuilder::new(4).try_build_from_parts(vec![1, 2], vec!["a"]);
    /// assert!(bad.is_err());
    /// ```
    pub fn try_build_from_parts<K, V>(
        self,
        keys: Vec<K>,
        values: Vec<V>,
    ) -> Result<(IndexedQueue<K, V>, Vec<EntryId>), ConfigError>
    where
        K: Ord,
    {
        let mut queue = self.build();
        let ids = queue.create_from_parts(keys, values)?;
        Ok((queue, ids))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_preallocates() {
        let queue = QueueBuilder::new(64).build::<u64, u64>();
        assert!(queue.is_empty());
        assert!(queue.approx_bytes() > QueueBuilder::new(0).build::<u64, u64>().approx_bytes());
    }

    #[test]
    fn capacity_override() {
        let builder = QueueBuilder::default().capacity(10);
        assert_eq!(builder.capacity_hint(), 10);
    }

    #[test]
    fn build_from_returns_ids_in_input_order() {
        let (queue, ids) = QueueBuilder::new(3).build_from(vec![(5, "e"), (1, "a"), (3, "c")]);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.value(ids[0]), Some(&"e"));
        assert_eq!(queue.value(ids[2]), Some(&"c"));
        assert_eq!(queue.front(), Some((&1, &"a")));
    }

    #[test]
    fn build_keyed_queue() {
        let mut keyed = QueueBuilder::new(8).build_keyed::<&str, u32>();
        keyed.push("n", 4);
        assert_eq!(keyed.priority(&"n"), Some(&4));
    }

    #[test]
    fn try_build_from_parts() {
        let (mut queue, ids) = QueueBuilder::new(2)
            .try_build_from_parts(vec![2, 1], vec!['b', 'a'])
            .unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(queue.pop(), Some((1, 'a')));

        let err = QueueBuilder::new(2)
            .try_build_from_parts(vec![2, 1], Vec::<char>::new())
            .unwrap_err();
        assert!(err.message().contains("mismatch"));
    }
}
