//! # Metrics Trait Hierarchy
//!
//! Recording, snapshotting and export are split into small traits so the
//! queue code only ever writes counters and never knows who reads them.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │    QueueMetricsRecorder      │    │  QueueMetricsReadRecorder    │
//!   │  insert/erase/update/pop     │    │  front peeks (&self paths)   │
//!   │  shifts/resets               │    │                              │
//!   └──────────────┬───────────────┘    └──────────────┬───────────────┘
//!                  │                                   │
//!                  └─────────────────┬─────────────────┘
//!                                    ▼
//!                            ┌──────────────┐
//!                            │ QueueMetrics │
//!                            └──────┬───────┘
//!                                   │
//!   Consumption (decoupled from recording):
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```
//!
//! ## Design Goals
//! - Recorders only write counters, providers only read them, exporters only
//!   publish them.
//! - Shift and scan steps are counted separately from calls so the
//!   distance-proportional cost of `insert` and `update` shows up directly.

/// Counters for mutating queue operations.
pub trait QueueMetricsRecorder {
    fn record_insert_append(&mut self);
    fn record_insert_grow(&mut self);
    fn record_insert_left_hole(&mut self);
    fn record_insert_right_hole(&mut self);
    fn record_insert_scan_step(&mut self);
    fn record_shift_steps(&mut self, steps: u64);
    fn record_erase_call(&mut self);
    fn record_erase_found(&mut self);
    fn record_pop_call(&mut self);
    fn record_pop_found(&mut self);
    fn record_update_call(&mut self);
    fn record_update_found(&mut self);
    fn record_update_move_step(&mut self);
    fn record_front_advance_step(&mut self);
    fn record_reset(&mut self);
    fn record_clear(&mut self);
    fn record_create(&mut self, entries: u64);
}

/// Counters for `&self` paths (interior mutability).
pub trait QueueMetricsReadRecorder {
    fn record_peek_front_call(&self);
    fn record_peek_front_found(&self);
    fn record_lookup_call(&self);
    fn record_lookup_found(&self);
}

/// Produce a point-in-time snapshot for tests and benches.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
