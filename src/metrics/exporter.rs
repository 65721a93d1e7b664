use std::io::Write;
use std::sync::Mutex;

use crate::metrics::snapshot::QueueMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for queue metrics snapshots.
///
/// This exporter writes in the Prometheus text exposition format so it can be
/// scraped by Prometheus or forwarded to an OpenTelemetry collector.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send + Sync> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send + Sync> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_metric(&self, kind: &str, name: &str, value: u64) {
        let mut writer = match self.writer.lock() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        };
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_counter(&self, name: &str, value: u64) {
        self.write_metric("counter", &self.metric_name(name), value);
    }

    fn write_gauge(&self, name: &str, value: u64) {
        self.write_metric("gauge", &self.metric_name(name), value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send + Sync> MetricsExporter<QueueMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &QueueMetricsSnapshot) {
        self.write_counter("insert_calls_total", snapshot.insert_calls);
        self.write_counter("insert_append_total", snapshot.insert_append);
        self.write_counter("insert_grow_total", snapshot.insert_grow);
        self.write_counter("insert_left_hole_total", snapshot.insert_left_hole);
        self.write_counter("insert_right_hole_total", snapshot.insert_right_hole);
        self.write_counter("insert_scan_steps_total", snapshot.insert_scan_steps);
        self.write_counter("shift_steps_total", snapshot.shift_steps);
        self.write_counter("erase_calls_total", snapshot.erase_calls);
        self.write_counter("erase_found_total", snapshot.erase_found);
        self.write_counter("pop_calls_total", snapshot.pop_calls);
        self.write_counter("pop_found_total", snapshot.pop_found);
        self.write_counter("update_calls_total", snapshot.update_calls);
        self.write_counter("update_found_total", snapshot.update_found);
        self.write_counter("update_move_steps_total", snapshot.update_move_steps);
        self.write_counter("front_advance_steps_total", snapshot.front_advance_steps);
        self.write_counter("resets_total", snapshot.resets);
        self.write_counter("clear_calls_total", snapshot.clear_calls);
        self.write_counter("create_calls_total", snapshot.create_calls);
        self.write_counter("created_entries_total", snapshot.created_entries);
        self.write_counter("peek_front_calls_total", snapshot.peek_front_calls);
        self.write_counter("peek_front_found_total", snapshot.peek_front_found);
        self.write_counter("lookup_calls_total", snapshot.lookup_calls);
        self.write_counter("lookup_found_total", snapshot.lookup_found);
        self.write_gauge("len", snapshot.len as u64);
        self.write_gauge("tombstones", snapshot.tombstones as u64);
        self.write_gauge("slot_len", snapshot.slot_len as u64);
    }
}
