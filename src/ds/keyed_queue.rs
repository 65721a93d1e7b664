//! Priority queue addressed by external keys instead of ids.
//!
//! [`KeyedQueue`] layers an `FxHashMap<N, EntryId>` over an
//! [`IndexedQueue<K, N>`](super::IndexedQueue): the node is stored as the
//! payload, and the map remembers which id each node currently holds. This
//! gives the relaxation primitive of Dijkstra/Prim directly:
//!
//! ```
//! use pqkit::ds::KeyedQueue;
//!
//! let mut frontier: KeyedQueue<&str, u32> = KeyedQueue::new();
//! frontier.decrease("b", 7);
//! frontier.decrease("c", 3);
//! frontier.decrease("b", 2);   // shorter path found
//! frontier.decrease("c", 9);   // longer path ignored
//!
//! assert_eq!(frontier.pop(), Some(("b", 2)));
//! assert_eq!(frontier.pop(), Some(("c", 3)));
//! assert_eq!(frontier.pop(), None);
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;

use super::indexed_queue::{EntryId, IndexedQueue};
use crate::error::InvariantError;

/// Min-priority queue keyed by node, with at most one entry per node.
#[derive(Debug, Clone)]
pub struct KeyedQueue<N, K> {
    queue: IndexedQueue<K, N>,
    ids: FxHashMap<N, EntryId>,
}

impl<N, K> KeyedQueue<N, K>
where
    N: Eq + Hash + Clone,
    K: Ord,
{
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            queue: IndexedQueue::with_capacity(capacity),
            ids: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, node: &N) -> bool {
        self.ids.contains_key(node)
    }

    /// Current priority of `node`.
    pub fn priority(&self, node: &N) -> Option<&K> {
        self.ids.get(node).and_then(|&id| self.queue.key(id))
    }

    /// Inserts `node` or moves it to `priority`; returns the old priority.
    pub fn push(&mut self, node: N, priority: K) -> Option<K> {
        if let Some(&id) = self.ids.get(&node) {
            return self.queue.update(id, priority);
        }
        let id = self.queue.insert(priority, node.clone());
        self.ids.insert(node, id);
        None
    }

    /// Relaxation step: inserts `node`, or lowers its priority if
    /// `priority` is smaller than the current one.
    ///
    /// Returns `true` if the queue changed.
    pub fn decrease(&mut self, node: N, priority: K) -> bool {
        match self.ids.get(&node) {
            Some(&id) => match self.queue.key(id) {
                Some(current) if priority < *current => {
                    self.queue.update(id, priority);
                    true
                },
                _ => false,
            },
            None => {
                let id = self.queue.insert(priority, node.clone());
                self.ids.insert(node, id);
                true
            },
        }
    }

    /// Removes `node` and returns its priority.
    pub fn remove(&mut self, node: &N) -> Option<K> {
        let id = self.ids.remove(node)?;
        self.queue.erase(id).map(|(priority, _)| priority)
    }

    /// Node with the smallest priority.
    pub fn peek(&self) -> Option<(&N, &K)> {
        self.queue.front().map(|(priority, node)| (node, priority))
    }

    pub fn pop(&mut self) -> Option<(N, K)> {
        let (priority, node) = self.queue.pop()?;
        self.ids.remove(&node);
        Some((node, priority))
    }

    pub fn clear(&mut self) {
        self.queue.clear();
        self.ids.clear();
    }

    /// Nodes and priorities in pop order.
    pub fn iter(&self) -> impl Iterator<Item = (&N, &K)> + '_ {
        self.queue.iter().map(|(_, priority, node)| (node, priority))
    }

    /// Checks the underlying queue and that the node map agrees with it.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.queue.check_invariants()?;
        if self.ids.len() != self.queue.len() {
            return Err(InvariantError::new(format!(
                "node map has {} entries, queue has {}",
                self.ids.len(),
                self.queue.len()
            )));
        }
        for (node, &id) in &self.ids {
            if self.queue.value(id) != Some(node) {
                return Err(InvariantError::new(format!(
                    "node map id {} does not hold its node",
                    id
                )));
            }
        }
        Ok(())
    }
}

impl<N, K> Default for KeyedQueue<N, K>
where
    N: Eq + Hash + Clone,
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}
