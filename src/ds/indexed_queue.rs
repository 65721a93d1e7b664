//! Indexed priority queue with stable, generation-checked handles.
//!
//! Every inserted element gets an [`EntryId`] that keeps pointing at the same
//! logical entry while the queue shuffles entries around internally. The id
//! can later be used to erase the entry, change its key, or overwrite its
//! value, without the caller knowing where the entry currently lives.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                          IndexedQueue Layout                                │
//! │                                                                             │
//! │   slots: Vec<Option<Entry>>   (sorted by key from `front`, None = hole)     │
//! │                                                                             │
//! │     slot:    0       1       2       3       4       5                      │
//! │           ┌──────┬───────┬───────┬───────┬───────┬───────┐                  │
//! │           │ hole │ (2,b) │ hole  │ (4,x) │ (4,z) │ (9,q) │                  │
//! │           └──────┴───────┴───────┴───────┴───────┴───────┘                  │
//! │                      ▲                                                      │
//! │                    front = 1                                                │
//! │                                                                             │
//! │   index_to_id:  [ 3,  0,  5,  1,  2,  4 ]     slot -> id index              │
//! │   id_to_index:  [ 1,  3,  4,  0,  5,  2 ]     id index -> slot              │
//! │   generations:  [ 0,  0,  0,  1,  0,  2 ]     bumped when an entry dies     │
//! │                                                                             │
//! │   live = 4   tombstones = 2   (live + tombstones == slots.len())            │
//! └─────────────────────────────────────────────────────────────────────────────┘
//!
//! Insert Flow
//! ───────────
//!   insert(k, v):
//!     1. scan from `front`, skipping holes, past every key <= k
//!        (remember the last hole seen; a hole at front-1 counts)
//!     2. hole before the insertion point?
//!          yes → slide the entries between hole and insertion point left,
//!                new entry takes the freed slot, reuses the hole's id
//!     3. otherwise a hole after the insertion point?
//!          yes → slide the entries up to that hole right,
//!                new entry takes the insertion point, reuses the hole's id
//!     4. otherwise grow by one slot (append or shift right), fresh id
//!
//! Erase Flow
//! ──────────
//!   erase(id):
//!     1. slot = id_to_index[id]; take the entry, bump the id's generation
//!     2. slot == front? advance front past every hole
//!     3. front reached the end? drop all storage (global reset)
//! ```
//!
//! ## Key Concepts
//!
//! - **Tombstones**: erased entries leave a `None` hole behind; no shifting
//!   happens on erase. Holes are consumed again by later inserts.
//! - **Stable ids**: `id_to_index`/`index_to_id` are kept as inverse
//!   permutations, so entries can move without invalidating ids.
//! - **Generations**: an id carries the generation it was issued with. Once
//!   its entry dies the generation moves on, so a stale id is rejected even
//!   after its index has been handed out again.
//! - **FIFO among equal keys**: a new entry goes after every live entry with
//!   an equal key.
//!
//! ## Operations
//!
//! | Operation      | Description                              | Complexity              |
//! |----------------|------------------------------------------|-------------------------|
//! | `insert`       | Place entry in sorted position            | O(distance to a hole)   |
//! | `erase`        | Tombstone the entry                       | O(1), O(run) at front   |
//! | `pop`          | Remove the minimum                        | Amortized O(1)          |
//! | `front`        | Peek the minimum                          | O(1)                    |
//! | `update`       | Change key, shift to new position         | O(distance moved)       |
//! | `create`       | Bulk load with one stable sort            | O(n log n)              |
//! | `contains`     | Check an id                               | O(1)                    |
//!
//! ## Use Cases
//!
//! - **Shortest paths / spanning trees**: decrease-key on frontier nodes
//! - **Region growing, watershed**: seeds ordered by gray value
//! - **Schedulers**: "reschedule task T" as a primitive
//!
//! ## Example Usage
//!
//! ```
//! use pqkit::ds::IndexedQueue;
//!
//! let mut queue = IndexedQueue::new();
//! let a = queue.insert(5, "a");
//! let b = queue.insert(3, "b");
//! let c = queue.insert(7, "c");
//!
//! assert_eq!(queue.front(), Some((&3, &"b")));
//!
//! // Reprioritise through the id
//! queue.update(c, 1);
//! assert_eq!(queue.front(), Some((&1, &"c")));
//!
//! // Erase through the id; stale ids are rejected afterwards
//! queue.erase(b);
//! assert!(!queue.contains(b));
//!
//! assert_eq!(queue.pop(), Some((1, "c")));
//! assert_eq!(queue.pop(), Some((5, "a")));
//! assert!(!queue.contains(a));
//! assert!(queue.is_empty());
//! ```
//!
//! ## Performance Trade-offs
//!
//! - **Not a binary heap**: the slot array is always sorted, so `front` and
//!   `pop` never sift; `insert` pays for the shift instead.
//! - **Holes are cheap space**: erase never moves memory, and later inserts
//!   reuse the holes, which keeps the shifts short.
//! - **Global reset**: when the last live entry goes away, all storage is
//!   dropped. There is no other compaction.
//!
//! ## Thread Safety
//!
//! `IndexedQueue` is not thread-safe, not even for concurrent reads.
//! [`ConcurrentIndexedQueue`] (feature `concurrency`) serialises all access
//! behind a mutex.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Range;

use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::QueueMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::QueueMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    MetricsSnapshotProvider, QueueMetricsReadRecorder, QueueMetricsRecorder,
};

/// Stable handle to an entry of an [`IndexedQueue`].
///
/// Valid from the moment [`insert`](IndexedQueue::insert) (or
/// [`create`](IndexedQueue::create)) returns it until the entry is erased,
/// popped or cleared. After that, every lookup with it yields `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId {
    index: usize,
    generation: u32,
}

impl EntryId {
    /// Dense id slot. Reused after the entry dies.
    pub fn index(self) -> usize {
        self.index
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

#[derive(Debug, Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Priority queue with stable ids, sorted ascending by key.
///
/// # Type Parameters
///
/// - `K`: Key (priority) type; smaller keys come out first
/// - `V`: Payload type
///
/// # Example
///
/// ```
/// use pqkit::ds::IndexedQueue;
///
/// let mut queue: IndexedQueue<u32, &str> = IndexedQueue::new();
/// let low = queue.insert(10, "low");
/// queue.insert(1, "high");
///
/// queue.update(low, 0);
/// assert_eq!(queue.pop(), Some((0, "low")));
/// assert_eq!(queue.pop(), Some((1, "high")));
/// assert_eq!(queue.pop(), None);
/// ```
#[derive(Debug, Clone)]
pub struct IndexedQueue<K, V> {
    slots: Vec<Option<Entry<K, V>>>,
    index_to_id: Vec<usize>,
    id_to_index: Vec<usize>,
    generations: Vec<u32>,
    front: usize,
    live: usize,
    tombstones: usize,
    #[cfg(feature = "metrics")]
    metrics: QueueMetrics,
}

impl<K, V> IndexedQueue<K, V>
where
    K: Ord,
{
    /// Creates an empty queue.
    ///
    /// # Example
    ///
    /// ```
    /// use pqkit::ds::IndexedQueue;
    ///
    /// let queue: IndexedQueue<u64, String> = IndexedQueue::new();
    /// assert!(queue.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty queue with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            index_to_id: Vec::with_capacity(capacity),
            id_to_index: Vec::with_capacity(capacity),
            generations: Vec::with_capacity(capacity),
            front: 0,
            live: 0,
            tombstones: 0,
            #[cfg(feature = "metrics")]
            metrics: QueueMetrics::default(),
        }
    }

    /// Reserves capacity for at least `additional` more entries.
    pub fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional);
        self.index_to_id.reserve(additional);
        self.id_to_index.reserve(additional);
        self.generations.reserve(additional);
    }

    /// Shrinks internal storage to fit current contents.
    pub fn shrink_to_fit(&mut self) {
        self.slots.shrink_to_fit();
        self.index_to_id.shrink_to_fit();
        self.id_to_index.shrink_to_fit();
        self.generations.shrink_to_fit();
    }

    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns `true` if there are no live entries.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Returns the number of holes left behind by erased entries.
    ///
    /// # Example
    ///
    /// ```
    /// use pqkit::ds::IndexedQueue;
    ///
    /// let mut queue = IndexedQueue::new();
    /// queue.insert(1, ());
    /// let b = queue.insert(2, ());
    /// queue.insert(3, ());
    ///
    /// queue.erase(b);
    /// assert_eq!(queue.len(), 2);
    /// assert_eq!(queue.tombstones(), 1);
    /// assert_eq!(queue.slot_len(), 3);
    /// ```
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Returns the physical slot count (live entries plus holes).
    pub fn slot_len(&self) -> usize {
        self.slots.len()
    }

    /// Inserts `value` with priority `key` and returns its id.
    ///
    /// The entry is placed after every live entry whose key is `<= key`, so
    /// equal keys come out in insertion order. A hole before the insertion
    /// point is preferred; then a hole after it; only then does the slot
    /// array grow.
    ///
    /// # Example
    ///
    /// ```
    /// use pqkit::ds::IndexedQueue;
    ///
    /// let mut queue = IndexedQueue::new();
    /// let first = queue.insert(4, "first");
    /// let second = queue.insert(4, "second");
    /// assert_ne!(first, second);
    ///
    /// assert_eq!(queue.pop(), Some((4, "first")));
    /// assert_eq!(queue.pop(), Some((4, "second")));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> EntryId {
        let len = self.slots.len();
        let mut pos = self.front;
        // every slot before `front` is a hole
        let mut last_hole = self.front.checked_sub(1);
        while pos < len {
            match &self.slots[pos] {
                None => last_hole = Some(pos),
                Some(entry) if entry.key <= key => {},
                Some(_) => break,
            }
            pos += 1;
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_scan_step();
        }

        let slot = match last_hole {
            Some(hole) => {
                // the hole travels to pos - 1; everything in between slides left
                self.rotate_left(hole..pos);
                self.tombstones -= 1;
                if hole < self.front {
                    self.front -= 1;
                }
                #[cfg(feature = "metrics")]
                self.metrics.record_insert_left_hole();
                pos - 1
            },
            None => match self.slots[pos..].iter().position(Option::is_none) {
                Some(offset) => {
                    let hole = pos + offset;
                    self.rotate_right(pos..hole + 1);
                    self.tombstones -= 1;
                    #[cfg(feature = "metrics")]
                    self.metrics.record_insert_right_hole();
                    pos
                },
                None => {
                    self.grow_at(pos);
                    pos
                },
            },
        };

        self.slots[slot] = Some(Entry { key, value });
        self.live += 1;
        self.id_at(slot)
    }

    /// Erases the entry behind `id` and returns it.
    ///
    /// Returns `None` (and changes nothing) if `id` is stale or was never
    /// issued by this queue, so erasing twice is harmless.
    ///
    /// # Example
    ///
    /// ```
    /// use pqkit::ds::IndexedQueue;
    ///
    /// let mut queue = IndexedQueue::new();
    /// let a = queue.insert(5, "a");
    /// queue.insert(3, "b");
    ///
    /// assert_eq!(queue.erase(a), Some((5, "a")));
    /// assert_eq!(queue.erase(a), None);
    /// assert_eq!(queue.len(), 1);
    /// ```
    pub fn erase(&mut self, id: EntryId) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_erase_call();
        let slot = self.live_slot(id)?;
        #[cfg(feature = "metrics")]
        self.metrics.record_erase_found();
        self.remove_slot(slot)
    }

    /// Removes and returns the entry with the smallest key.
    ///
    /// Returns `None` when the queue is empty.
    pub fn pop(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_call();
        if self.live == 0 {
            return None;
        }
        let popped = self.remove_slot(self.front);
        #[cfg(feature = "metrics")]
        if popped.is_some() {
            self.metrics.record_pop_found();
        }
        popped
    }

    /// Returns the entry with the smallest key without removing it.
    ///
    /// # Example
    ///
    /// ```
    /// use pqkit::ds::IndexedQueue;
    ///
    /// let mut queue = IndexedQueue::new();
    /// assert_eq!(queue.front(), None);
    ///
    /// queue.insert(2, "two");
    /// queue.insert(1, "one");
    /// assert_eq!(queue.front(), Some((&1, &"one")));
    /// ```
    pub fn front(&self) -> Option<(&K, &V)> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_front_call();
        if self.live == 0 {
            return None;
        }
        let entry = self.slots.get(self.front)?.as_ref()?;
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_front_found();
        Some((&entry.key, &entry.value))
    }

    /// Returns the id of the entry with the smallest key.
    pub fn front_id(&self) -> Option<EntryId> {
        if self.live == 0 {
            return None;
        }
        Some(self.id_at(self.front))
    }

    /// Changes the key of `id` and moves the entry to its new sorted place.
    ///
    /// Returns the previous key, or `None` if `id` is not live. The cost is
    /// proportional to how far the entry travels.
    ///
    /// # Example
    ///
    /// ```
    /// use pqkit::ds::IndexedQueue;
    ///
    /// let mut queue = IndexedQueue::new();
    /// queue.insert(5, "a");
    /// queue.insert(3, "b");
    /// let c = queue.insert(7, "c");
    ///
    /// assert_eq!(queue.update(c, 1), Some(7));
    /// assert_eq!(queue.front(), Some((&1, &"c")));
    /// assert_eq!(queue.key(c), Some(&1));
    /// ```
    pub fn update(&mut self, id: EntryId, key: K) -> Option<K> {
        #[cfg(feature = "metrics")]
        self.metrics.record_update_call();
        let slot = self.live_slot(id)?;
        #[cfg(feature = "metrics")]
        self.metrics.record_update_found();

        let ordering = key.cmp(&self.slots[slot].as_ref()?.key);
        let mut pos = slot;
        match ordering {
            Ordering::Greater => {
                let last = self.slots.len() - 1;
                while pos < last
                    && self.slots[pos + 1]
                        .as_ref()
                        .map_or(true, |next| next.key < key)
                {
                    self.swap_slots(pos, pos + 1);
                    pos += 1;
                    #[cfg(feature = "metrics")]
                    self.metrics.record_update_move_step();
                }
                if slot == self.front {
                    self.advance_front();
                }
            },
            Ordering::Less => {
                while pos > self.front
                    && self.slots[pos - 1]
                        .as_ref()
                        .map_or(true, |prev| key < prev.key)
                {
                    self.swap_slots(pos, pos - 1);
                    pos -= 1;
                    #[cfg(feature = "metrics")]
                    self.metrics.record_update_move_step();
                }
            },
            Ordering::Equal => {},
        }

        let entry = self.slots[pos].as_mut()?;
        Some(std::mem::replace(&mut entry.key, key))
    }

    /// Changes both key and value of `id`; returns the previous pair.
    pub fn update_entry(&mut self, id: EntryId, key: K, value: V) -> Option<(K, V)> {
        let previous_key = self.update(id, key)?;
        let slot = self.id_to_index[id.index];
        let entry = self.slots[slot].as_mut()?;
        let previous_value = std::mem::replace(&mut entry.value, value);
        Some((previous_key, previous_value))
    }

    /// Returns `true` if `id` refers to a live entry.
    pub fn contains(&self, id: EntryId) -> bool {
        self.live_slot(id).is_some()
    }

    /// Returns the key and value behind `id`.
    pub fn get(&self, id: EntryId) -> Option<(&K, &V)> {
        let entry = self.lookup(id)?;
        Some((&entry.key, &entry.value))
    }

    /// Returns the key behind `id`.
    pub fn key(&self, id: EntryId) -> Option<&K> {
        self.lookup(id).map(|entry| &entry.key)
    }

    /// Returns the value behind `id`.
    pub fn value(&self, id: EntryId) -> Option<&V> {
        self.lookup(id).map(|entry| &entry.value)
    }

    /// Returns the value behind `id` mutably. The key cannot be changed
    /// this way; use [`update`](Self::update).
    pub fn value_mut(&mut self, id: EntryId) -> Option<&mut V> {
        let slot = self.live_slot(id)?;
        self.slots[slot].as_mut().map(|entry| &mut entry.value)
    }

    /// Overwrites the value behind `id` in place and returns the old one.
    ///
    /// Returns `None` if `id` is not live; `value` is dropped in that case.
    ///
    /// # Example
    ///
    /// ```
    /// use pqkit::ds::IndexedQueue;
    ///
    /// let mut queue = IndexedQueue::new();
    /// let id = queue.insert(1, "old");
    /// assert_eq!(queue.set_value(id, "new"), Some("old"));
    /// assert_eq!(queue.value(id), Some(&"new"));
    ///
    /// queue.erase(id);
    /// assert_eq!(queue.set_value(id, "late"), None);
    /// ```
    pub fn set_value(&mut self, id: EntryId, value: V) -> Option<V> {
        let current = self.value_mut(id)?;
        Some(std::mem::replace(current, value))
    }

    /// Removes every entry. All ids issued so far become invalid.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        for slot in self.front..self.slots.len() {
            if self.slots[slot].is_some() {
                let index = self.index_to_id[slot];
                self.generations[index] = self.generations[index].wrapping_add(1);
            }
        }
        self.reset();
    }

    /// Replaces the contents with `entries`, sorting once.
    ///
    /// The id of each entry has the entry's position in `entries` as its
    /// [`index`](EntryId::index); the returned ids are in input order.
    /// Entries with equal keys keep their input order.
    ///
    /// # Example
    ///
    /// ```
    /// use pqkit::ds::IndexedQueue;
    ///
    /// let mut queue = IndexedQueue::new();
    /// let ids = queue.create(vec![(4, "x"), (2, "y"), (4, "z")]);
    /// assert_eq!(queue.value(ids[1]), Some(&"y"));
    ///
    /// assert_eq!(queue.pop(), Some((2, "y")));
    /// assert_eq!(queue.pop(), Some((4, "x")));
    /// assert_eq!(queue.pop(), Some((4, "z")));
    /// ```
    pub fn create<I>(&mut self, entries: I) -> Vec<EntryId>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.clear();

        let mut staged: Vec<(usize, K, V)> = entries
            .into_iter()
            .enumerate()
            .map(|(index, (key, value))| (index, key, value))
            .collect();
        // stable: equal keys keep their input order
        staged.sort_by(|a, b| a.1.cmp(&b.1));

        let count = staged.len();
        #[cfg(feature = "metrics")]
        self.metrics.record_create(count as u64);

        self.slots.reserve(count);
        self.index_to_id.reserve(count);
        self.id_to_index.resize(count, 0);
        if self.generations.len() < count {
            self.generations.resize(count, 0);
        }
        for (slot, (index, key, value)) in staged.into_iter().enumerate() {
            self.slots.push(Some(Entry { key, value }));
            self.index_to_id.push(index);
            self.id_to_index[index] = slot;
        }
        self.live = count;

        (0..count)
            .map(|index| EntryId {
                index,
                generation: self.generations[index],
            })
            .collect()
    }

    /// Like [`create`](Self::create), from separate key and value columns.
    ///
    /// Fails without touching the queue if the columns differ in length.
    pub fn create_from_parts(
        &mut self,
        keys: Vec<K>,
        values: Vec<V>,
    ) -> Result<Vec<EntryId>, ConfigError> {
        if keys.len() != values.len() {
            return Err(ConfigError::new(format!(
                "key/value length mismatch: {} keys, {} values",
                keys.len(),
                values.len()
            )));
        }
        Ok(self.create(keys.into_iter().zip(values)))
    }

    /// Iterates live entries in pop order, with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &K, &V)> + '_ {
        let front = self.front;
        self.slots[front..]
            .iter()
            .enumerate()
            .filter_map(move |(offset, slot)| {
                slot.as_ref()
                    .map(|entry| (self.id_at(front + offset), &entry.key, &entry.value))
            })
    }

    /// Returns all live `(key, value)` pairs in pop order.
    ///
    /// Feeding the result back into [`create`](Self::create) rebuilds an
    /// equivalent queue (with different ids).
    pub fn snapshot_sorted(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.iter()
            .map(|(_, key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Returns an approximate memory footprint in bytes.
    pub fn approx_bytes(&self) -> usize {
        std::mem::size_of::<Self>()
            + self.slots.capacity() * std::mem::size_of::<Option<Entry<K, V>>>()
            + (self.index_to_id.capacity() + self.id_to_index.capacity())
                * std::mem::size_of::<usize>()
            + self.generations.capacity() * std::mem::size_of::<u32>()
    }

    /// Recomputes every structural invariant.
    ///
    /// Checks that live and tombstone counts add up to the slot count, that
    /// the front cursor sits on the first live slot with only holes before it,
    /// that the two id maps are inverse permutations, and that live keys
    /// from the front onward are non-decreasing.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let len = self.slots.len();
        if self.live + self.tombstones != len {
            return Err(InvariantError::new(format!(
                "live {} + tombstones {} != slots {}",
                self.live, self.tombstones, len
            )));
        }
        let counted = self.slots.iter().filter(|slot| slot.is_some()).count();
        if counted != self.live {
            return Err(InvariantError::new(format!(
                "live counter {} but {} occupied slots",
                self.live, counted
            )));
        }
        if self.front > self.tombstones {
            return Err(InvariantError::new(format!(
                "front {} > tombstones {}",
                self.front, self.tombstones
            )));
        }
        if let Some(slot) = self.slots[..self.front].iter().position(Option::is_some) {
            return Err(InvariantError::new(format!(
                "live slot {} before front {}",
                slot, self.front
            )));
        }
        if self.live > 0 && self.slots[self.front].is_none() {
            return Err(InvariantError::new(format!(
                "front {} points at a hole",
                self.front
            )));
        }
        if self.live == 0 && len != 0 {
            return Err(InvariantError::new(format!(
                "empty queue kept {} slots instead of resetting",
                len
            )));
        }

        if self.index_to_id.len() != len || self.id_to_index.len() != len {
            return Err(InvariantError::new(format!(
                "id maps have lengths {}/{} for {} slots",
                self.index_to_id.len(),
                self.id_to_index.len(),
                len
            )));
        }
        if self.generations.len() < len {
            return Err(InvariantError::new(format!(
                "generation table {} shorter than id space {}",
                self.generations.len(),
                len
            )));
        }
        for (slot, &index) in self.index_to_id.iter().enumerate() {
            if self.id_to_index.get(index) != Some(&slot) {
                return Err(InvariantError::new(format!(
                    "slot {} maps to id {} which maps to {:?}",
                    slot,
                    index,
                    self.id_to_index.get(index)
                )));
            }
        }

        let mut previous: Option<&K> = None;
        for (slot, entry) in self.slots.iter().enumerate().skip(self.front) {
            if let Some(entry) = entry {
                if previous.is_some_and(|prev| entry.key < *prev) {
                    return Err(InvariantError::new(format!(
                        "key order broken at slot {}",
                        slot
                    )));
                }
                previous = Some(&entry.key);
            }
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    /// Panics if [`check_invariants`](Self::check_invariants) fails (debug/test builds only).
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("IndexedQueue invariant violated: {}", err);
        }
    }

    #[cfg(any(test, debug_assertions))]
    /// Returns a debug snapshot of counters and cursor.
    pub fn debug_snapshot(&self) -> IndexedQueueSnapshot {
        IndexedQueueSnapshot {
            len: self.live,
            tombstones: self.tombstones,
            slot_len: self.slots.len(),
            front: self.front,
        }
    }

    fn id_at(&self, slot: usize) -> EntryId {
        let index = self.index_to_id[slot];
        EntryId {
            index,
            generation: self.generations[index],
        }
    }

    fn live_slot(&self, id: EntryId) -> Option<usize> {
        let slot = *self.id_to_index.get(id.index)?;
        if self.generations[id.index] != id.generation {
            return None;
        }
        self.slots[slot].as_ref()?;
        Some(slot)
    }

    fn lookup(&self, id: EntryId) -> Option<&Entry<K, V>> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_lookup_call();
        let entry = self.slots[self.live_slot(id)?].as_ref();
        #[cfg(feature = "metrics")]
        if entry.is_some() {
            (&self.metrics).record_lookup_found();
        }
        entry
    }

    fn remove_slot(&mut self, slot: usize) -> Option<(K, V)> {
        let entry = self.slots[slot].take()?;
        let index = self.index_to_id[slot];
        self.generations[index] = self.generations[index].wrapping_add(1);
        self.live -= 1;
        self.tombstones += 1;
        if slot == self.front {
            self.advance_front();
        }
        Some((entry.key, entry.value))
    }

    fn advance_front(&mut self) {
        while self.front < self.slots.len() && self.slots[self.front].is_none() {
            self.front += 1;
            #[cfg(feature = "metrics")]
            self.metrics.record_front_advance_step();
        }
        if self.front == self.slots.len() {
            #[cfg(feature = "metrics")]
            self.metrics.record_reset();
            self.reset();
        }
    }

    // Generations survive so ids issued before the reset stay rejected.
    fn reset(&mut self) {
        self.slots.clear();
        self.index_to_id.clear();
        self.id_to_index.clear();
        self.front = 0;
        self.live = 0;
        self.tombstones = 0;
    }

    /// Opens an empty slot at `pos`, shifting the tail right, under a fresh id.
    fn grow_at(&mut self, pos: usize) {
        let index = self.slots.len();
        self.slots.insert(pos, None);
        self.index_to_id.insert(pos, index);
        self.id_to_index.push(pos);
        if self.generations.len() <= index {
            self.generations.push(0);
        }
        self.relink(pos..index + 1);
        #[cfg(feature = "metrics")]
        {
            if pos == index {
                self.metrics.record_insert_append();
            } else {
                self.metrics.record_insert_grow();
            }
            self.metrics.record_shift_steps((index - pos) as u64);
        }
    }

    fn rotate_left(&mut self, range: Range<usize>) {
        self.slots[range.clone()].rotate_left(1);
        self.index_to_id[range.clone()].rotate_left(1);
        #[cfg(feature = "metrics")]
        self.metrics
            .record_shift_steps(range.len().saturating_sub(1) as u64);
        self.relink(range);
    }

    fn rotate_right(&mut self, range: Range<usize>) {
        self.slots[range.clone()].rotate_right(1);
        self.index_to_id[range.clone()].rotate_right(1);
        #[cfg(feature = "metrics")]
        self.metrics
            .record_shift_steps(range.len().saturating_sub(1) as u64);
        self.relink(range);
    }

    fn swap_slots(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
        self.index_to_id.swap(a, b);
        self.id_to_index[self.index_to_id[a]] = a;
        self.id_to_index[self.index_to_id[b]] = b;
    }

    fn relink(&mut self, range: Range<usize>) {
        for slot in range {
            self.id_to_index[self.index_to_id[slot]] = slot;
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> IndexedQueue<K, V>
where
    K: Ord,
{
    /// Returns a snapshot of the metrics counters and current gauges.
    pub fn metrics_snapshot(&self) -> QueueMetricsSnapshot {
        QueueMetricsSnapshot::capture(&self.metrics, self.live, self.tombstones, self.slots.len())
    }

    /// Zeroes the metrics counters.
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<QueueMetricsSnapshot> for IndexedQueue<K, V>
where
    K: Ord,
{
    fn snapshot(&self) -> QueueMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(any(test, debug_assertions))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedQueueSnapshot {
    pub len: usize,
    pub tombstones: usize,
    pub slot_len: usize,
    pub front: usize,
}

impl<K, V> Default for IndexedQueue<K, V>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> FromIterator<(K, V)> for IndexedQueue<K, V>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.create(iter);
        queue
    }
}

impl<K, V> Extend<(K, V)> for IndexedQueue<K, V>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// [`IndexedQueue`] behind a `parking_lot::Mutex`.
///
/// Every call takes the lock, reads included, since even reads must not
/// overlap a shifting insert or update. Borrowing accessors are replaced by
/// closure-based ones (`front_with`, `get_with`) so no reference outlives
/// the lock.
#[cfg(feature = "concurrency")]
#[derive(Debug)]
pub struct ConcurrentIndexedQueue<K, V> {
    inner: parking_lot::Mutex<IndexedQueue<K, V>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentIndexedQueue<K, V>
where
    K: Ord,
{
    pub fn new() -> Self {
        Self {
            inner: parking_lot::Mutex::new(IndexedQueue::new()),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: parking_lot::Mutex::new(IndexedQueue::with_capacity(capacity)),
        }
    }

    pub fn insert(&self, key: K, value: V) -> EntryId {
        self.inner.lock().insert(key, value)
    }

    pub fn erase(&self, id: EntryId) -> Option<(K, V)> {
        self.inner.lock().erase(id)
    }

    pub fn pop(&self) -> Option<(K, V)> {
        self.inner.lock().pop()
    }

    pub fn update(&self, id: EntryId, key: K) -> Option<K> {
        self.inner.lock().update(id, key)
    }

    pub fn update_entry(&self, id: EntryId, key: K, value: V) -> Option<(K, V)> {
        self.inner.lock().update_entry(id, key, value)
    }

    pub fn set_value(&self, id: EntryId, value: V) -> Option<V> {
        self.inner.lock().set_value(id, value)
    }

    pub fn front_with<R>(&self, f: impl FnOnce(&K, &V) -> R) -> Option<R> {
        let queue = self.inner.lock();
        queue.front().map(|(key, value)| f(key, value))
    }

    pub fn get_with<R>(&self, id: EntryId, f: impl FnOnce(&K, &V) -> R) -> Option<R> {
        let queue = self.inner.lock();
        queue.get(id).map(|(key, value)| f(key, value))
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.inner.lock().contains(id)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn create<I>(&self, entries: I) -> Vec<EntryId>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.inner.lock().create(entries)
    }

    pub fn snapshot_sorted(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.inner.lock().snapshot_sorted()
    }

    /// Runs `f` with exclusive access, for batches that must not interleave.
    pub fn with_queue<R>(&self, f: impl FnOnce(&mut IndexedQueue<K, V>) -> R) -> R {
        let mut queue = self.inner.lock();
        f(&mut queue)
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.lock().check_invariants()
    }

    pub fn into_inner(self) -> IndexedQueue<K, V> {
        self.inner.into_inner()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> Default for ConcurrentIndexedQueue<K, V>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}
