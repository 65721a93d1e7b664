//! Counter-based instrumentation for the queues (feature `metrics`).
//!
//! Recording lives in [`metrics_impl`], reading in [`snapshot`], publishing
//! in [`exporter`]. The traits tying them together are in [`traits`].

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
