//! Error types for the pqkit library.
//!
//! ## Key Components
//!
//! - [`InvariantError`]: Returned by `check_invariants` when the slot array,
//!   the id maps or the counters of a queue disagree with each other.
//! - [`ConfigError`]: Returned when construction input is malformed
//!   (e.g. key and value columns of different lengths).
//!
//! Misusing an id (stale, erased, never issued) or reading from an empty
//! queue is not an error: those paths return `None` or `false`.
//!
//! ## Example Usage
//!
//! ```
//! use pqkit::ds::IndexedQueue;
//! use pqkit::error::ConfigError;
//!
//! let mut queue: IndexedQueue<u32, &str> = IndexedQueue::new();
//! let ids: Result<_, ConfigError> = queue.create_from_parts(vec![3, 1], vec!["c", "a"]);
//! assert!(ids.is_ok());
//!
//! let bad = queue.create_from_parts(vec![3, 1], vec!["c"]);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal queue invariants are violated.
///
/// Produced by [`IndexedQueue::check_invariants`](crate::ds::IndexedQueue::check_invariants)
/// and [`KeyedQueue::check_invariants`](crate::ds::KeyedQueue::check_invariants).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when construction input is invalid.
///
/// Produced by fallible constructors such as
/// [`IndexedQueue::create_from_parts`](crate::ds::IndexedQueue::create_from_parts)
/// and [`QueueBuilder::try_build_from_parts`](crate::builder::QueueBuilder::try_build_from_parts).
///
/// # Example
///
/// ```
/// use pqkit::ds::IndexedQueue;
///
/// let mut queue: IndexedQueue<u64, u64> = IndexedQueue::new();
/// let err = queue.create_from_parts(vec![1, 2, 3], vec![10]).unwrap_err();
/// assert!(err.to_string().contains("length"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
