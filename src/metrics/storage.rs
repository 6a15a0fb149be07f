//! Storage Phase Metrics
//!
//! CSV rows and bytes moving in and out of the pipeline.

use crate::metrics::{phase_metric, MetricDoc, MetricType, PhaseMetrics};

pub struct StorageMetrics;

impl StorageMetrics {
    pub fn record_write(kind: &'static str, rows: usize, bytes: u64) {
        ::metrics::counter!(phase_metric!(counter, "storage", "rows_written"), "kind" => kind)
            .increment(rows as u64);
        ::metrics::counter!(phase_metric!(counter, "storage", "bytes_written"), "kind" => kind)
            .increment(bytes);
    }

    pub fn record_read(kind: &'static str, rows: usize) {
        ::metrics::counter!(phase_metric!(counter, "storage", "rows_read"), "kind" => kind)
            .increment(rows as u64);
    }

    pub fn record_read_error(kind: &'static str) {
        ::metrics::counter!(phase_metric!(counter, "storage", "read_errors"), "kind" => kind)
            .increment(1);
    }
}

impl PhaseMetrics for StorageMetrics {
    fn register_metrics() {
        use metrics::counter;

        let _ = counter!(phase_metric!(counter, "storage", "rows_written"));
        let _ = counter!(phase_metric!(counter, "storage", "bytes_written"));
        let _ = counter!(phase_metric!(counter, "storage", "rows_read"));
        let _ = counter!(phase_metric!(counter, "storage", "read_errors"));
    }

    fn phase_name() -> &'static str {
        "storage"
    }

    fn metrics_documentation() -> Vec<MetricDoc> {
        vec![
            MetricDoc {
                name: phase_metric!(counter, "storage", "rows_written"),
                metric_type: MetricType::Counter,
                help: "Rows written to CSV",
                labels: vec!["kind"],
            },
            MetricDoc {
                name: phase_metric!(counter, "storage", "bytes_written"),
                metric_type: MetricType::Counter,
                help: "Bytes written to CSV",
                labels: vec!["kind"],
            },
            MetricDoc {
                name: phase_metric!(counter, "storage", "rows_read"),
                metric_type: MetricType::Counter,
                help: "Rows read from CSV",
                labels: vec!["kind"],
            },
            MetricDoc {
                name: phase_metric!(counter, "storage", "read_errors"),
                metric_type: MetricType::Counter,
                help: "CSV reads rejected for a missing column or bad cell",
                labels: vec!["kind"],
            },
        ]
    }
}
