use crate::metrics::cell::MetricsCell;
use crate::metrics::traits::{QueueMetricsReadRecorder, QueueMetricsRecorder};

#[derive(Debug, Default, Clone)]
pub struct QueueMetrics {
    pub insert_calls: u64,
    pub insert_append: u64,
    pub insert_grow: u64,
    pub insert_left_hole: u64,
    pub insert_right_hole: u64,
    pub insert_scan_steps: u64,
    pub shift_steps: u64,
    pub erase_calls: u64,
    pub erase_found: u64,
    pub pop_calls: u64,
    pub pop_found: u64,
    pub update_calls: u64,
    pub update_found: u64,
    pub update_move_steps: u64,
    pub front_advance_steps: u64,
    pub resets: u64,
    pub clear_calls: u64,
    pub create_calls: u64,
    pub created_entries: u64,
    pub peek_front_calls: MetricsCell,
    pub peek_front_found: MetricsCell,
    pub lookup_calls: MetricsCell,
    pub lookup_found: MetricsCell,
}

impl QueueMetrics {
    pub fn new() -> QueueMetrics {
        Self::default()
    }

    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl QueueMetricsRecorder for QueueMetrics {
    fn record_insert_append(&mut self) {
        self.insert_calls += 1;
        self.insert_append += 1;
    }

    fn record_insert_grow(&mut self) {
        self.insert_calls += 1;
        self.insert_grow += 1;
    }

    fn record_insert_left_hole(&mut self) {
        self.insert_calls += 1;
        self.insert_left_hole += 1;
    }

    fn record_insert_right_hole(&mut self) {
        self.insert_calls += 1;
        self.insert_right_hole += 1;
    }

    fn record_insert_scan_step(&mut self) {
        self.insert_scan_steps += 1;
    }

    fn record_shift_steps(&mut self, steps: u64) {
        self.shift_steps += steps;
    }

    fn record_erase_call(&mut self) {
        self.erase_calls += 1;
    }

    fn record_erase_found(&mut self) {
        self.erase_found += 1;
    }

    fn record_pop_call(&mut self) {
        self.pop_calls += 1;
    }

    fn record_pop_found(&mut self) {
        self.pop_found += 1;
    }

    fn record_update_call(&mut self) {
        self.update_calls += 1;
    }

    fn record_update_found(&mut self) {
        self.update_found += 1;
    }

    fn record_update_move_step(&mut self) {
        self.update_move_steps += 1;
    }

    fn record_front_advance_step(&mut self) {
        self.front_advance_steps += 1;
    }

    fn record_reset(&mut self) {
        self.resets += 1;
    }

    fn record_clear(&mut self) {
        self.clear_calls += 1;
    }

    fn record_create(&mut self, entries: u64) {
        self.create_calls += 1;
        self.created_entries += entries;
    }
}

impl QueueMetricsReadRecorder for &QueueMetrics {
    fn record_peek_front_call(&self) {
        self.peek_front_calls.incr();
    }

    fn record_peek_front_found(&self) {
        self.peek_front_found.incr();
    }

    fn record_lookup_call(&self) {
        self.lookup_calls.incr();
    }

    fn record_lookup_found(&self) {
        self.lookup_found.incr();
    }
}
