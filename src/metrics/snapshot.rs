use crate::metrics::metrics_impl::QueueMetrics;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct QueueMetricsSnapshot {
    pub insert_calls: u64,
    pub insert_append: u64,
    pub insert_grow: u64,
    pub insert_left_hole: u64,
    pub insert_right_hole: u64,
    pub insert_scan_steps: u64,
    pub shift_steps: u64, // slots moved by insert shifting

    pub erase_calls: u64,
    pub erase_found: u64,
    pub pop_calls: u64,
    pub pop_found: u64,

    pub update_calls: u64,
    pub update_found: u64,
    pub update_move_steps: u64,

    pub front_advance_steps: u64,
    pub resets: u64, // queue drained to empty and storage dropped
    pub clear_calls: u64,
    pub create_calls: u64,
    pub created_entries: u64,

    pub peek_front_calls: u64,
    pub peek_front_found: u64,
    pub lookup_calls: u64,
    pub lookup_found: u64,

    // gauges captured at snapshot time
    pub len: usize,
    pub tombstones: usize,
    pub slot_len: usize,
}

impl QueueMetricsSnapshot {
    /// Builds a snapshot from live counters and the current gauges.
    pub fn capture(metrics: &QueueMetrics, len: usize, tombstones: usize, slot_len: usize) -> Self {
        Self {
            insert_calls: metrics.insert_calls,
            insert_append: metrics.insert_append,
            insert_grow: metrics.insert_grow,
            insert_left_hole: metrics.insert_left_hole,
            insert_right_hole: metrics.insert_right_hole,
            insert_scan_steps: metrics.insert_scan_steps,
            shift_steps: metrics.shift_steps,
            erase_calls: metrics.erase_calls,
            erase_found: metrics.erase_found,
            pop_calls: metrics.pop_calls,
            pop_found: metrics.pop_found,
            update_calls: metrics.update_calls,
            update_found: metrics.update_found,
            update_move_steps: metrics.update_move_steps,
            front_advance_steps: metrics.front_advance_steps,
            resets: metrics.resets,
            clear_calls: metrics.clear_calls,
            create_calls: metrics.create_calls,
            created_entries: metrics.created_entries,
            peek_front_calls: metrics.peek_front_calls.get(),
            peek_front_found: metrics.peek_front_found.get(),
            lookup_calls: metrics.lookup_calls.get(),
            lookup_found: metrics.lookup_found.get(),
            len,
            tombstones,
            slot_len,
        }
    }

    /// Fraction of physical slots occupied by tombstones.
    pub fn tombstone_ratio(&self) -> f64 {
        if self.slot_len == 0 {
            0.0
        } else {
            self.tombstones as f64 / self.slot_len as f64
        }
    }
}
