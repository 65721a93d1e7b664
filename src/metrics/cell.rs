use std::cell::Cell;

/// A counter that can be bumped through `&self`.
///
/// Used for read paths such as [`IndexedQueue::front`](crate::ds::IndexedQueue::front)
/// that only hold a shared borrow. The cell is `Send` but not `Sync`; the
/// concurrent wrapper serialises access behind a mutex.
#[repr(transparent)]
#[derive(Debug, Default, Clone)]
pub struct MetricsCell(Cell<u64>);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(Cell::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub fn incr(&self) {
        self.0.set(self.0.get() + 1);
    }

    #[inline]
    pub fn reset(&self) {
        self.0.set(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_cell_counts_through_shared_ref() {
        let cell = MetricsCell::new();
        let shared = &cell;
        shared.incr();
        shared.incr();
        assert_eq!(cell.get(), 2);
        cell.reset();
        assert_eq!(cell.get(), 0);
    }
}
