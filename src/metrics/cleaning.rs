//! Cleaning Phase Metrics
//!
//! Per-step row counts, changed values and durations, plus the outlier tally
//! of the final table.

use crate::metrics::{phase_metric, MetricDoc, MetricType, PhaseMetrics};

/// Metrics collection for the cleaning pipeline
pub struct CleaningMetrics;

impl CleaningMetrics {
    /// Record one finished step
    pub fn record_step(
        step: &'static str,
        rows_removed: usize,
        values_changed: usize,
        duration_secs: f64,
    ) {
        ::metrics::counter!(phase_metric!(counter, "cleaning", "steps_completed"), "step" => step)
            .increment(1);
        ::metrics::counter!(phase_metric!(counter, "cleaning", "rows_removed"), "step" => step)
            .increment(rows_removed as u64);
        ::metrics::counter!(phase_metric!(counter, "cleaning", "values_changed"), "step" => step)
            .increment(values_changed as u64);
        ::metrics::histogram!(
            phase_metric!(histogram, "cleaning", "step_duration_seconds"),
            "step" => step
        )
        .record(duration_secs);
    }

    /// Record a run that produced a cleaned table
    pub fn record_run_success(rows_out: usize, outliers: usize, duration_secs: f64) {
        ::metrics::counter!(phase_metric!(counter, "cleaning", "runs")).increment(1);
        ::metrics::gauge!(phase_metric!(gauge, "cleaning", "output_rows")).set(rows_out as f64);
        ::metrics::gauge!(phase_metric!(gauge, "cleaning", "outlier_rows")).set(outliers as f64);
        ::metrics::histogram!(phase_metric!(histogram, "cleaning", "run_duration_seconds"))
            .record(duration_secs);
    }

    /// Record a run aborted by a step error
    pub fn record_run_failure(step: &'static str) {
        ::metrics::counter!(phase_metric!(counter, "cleaning", "failures"), "step" => step)
            .increment(1);
    }
}

impl PhaseMetrics for CleaningMetrics {
    fn register_metrics() {
        use metrics::{counter, gauge, histogram};

        let _ = counter!(phase_metric!(counter, "cleaning", "runs"));
        let _ = counter!(phase_metric!(counter, "cleaning", "steps_completed"));
        let _ = counter!(phase_metric!(counter, "cleaning", "rows_removed"));
        let _ = counter!(phase_metric!(counter, "cleaning", "values_changed"));
        let _ = counter!(phase_metric!(counter, "cleaning", "failures"));
        let _ = gauge!(phase_metric!(gauge, "cleaning", "output_rows"));
        let _ = gauge!(phase_metric!(gauge, "cleaning", "outlier_rows"));
        let _ = histogram!(phase_metric!(histogram, "cleaning", "step_duration_seconds"));
        let _ = histogram!(phase_metric!(histogram, "cleaning", "run_duration_seconds"));
    }

    fn phase_name() -> &'static str {
        "cleaning"
    }

    fn metrics_documentation() -> Vec<MetricDoc> {
        vec![
            MetricDoc {
                name: phase_metric!(counter, "cleaning", "runs"),
                metric_type: MetricType::Counter,
                help: "Total number of completed cleaning runs",
                labels: vec![],
            },
            MetricDoc {
                name: phase_metric!(counter, "cleaning", "steps_completed"),
                metric_type: MetricType::Counter,
                help: "Total number of cleaning steps executed",
                labels: vec!["step"],
            },
            MetricDoc {
                name: phase_metric!(counter, "cleaning", "rows_removed"),
                metric_type: MetricType::Counter,
                help: "Rows dropped by a cleaning step",
                labels: vec!["step"],
            },
            MetricDoc {
                name: phase_metric!(counter, "cleaning", "values_changed"),
                metric_type: MetricType::Counter,
                help: "Cell values filled, derived or flagged by a cleaning step",
                labels: vec!["step"],
            },
            MetricDoc {
                name: phase_metric!(counter, "cleaning", "failures"),
                metric_type: MetricType::Counter,
                help: "Runs aborted by a failing step",
                labels: vec!["step"],
            },
            MetricDoc {
                name: phase_metric!(gauge, "cleaning", "output_rows"),
                metric_type: MetricType::Gauge,
                help: "Rows in the last cleaned table",
                labels: vec![],
            },
            MetricDoc {
                name: phase_metric!(gauge, "cleaning", "outlier_rows"),
                metric_type: MetricType::Gauge,
                help: "Salary outliers flagged in the last cleaned table",
                labels: vec![],
            },
            MetricDoc {
                name: phase_metric!(histogram, "cleaning", "step_duration_seconds"),
                metric_type: MetricType::Histogram,
                help: "Duration of a single cleaning step",
                labels: vec!["step"],
            },
            MetricDoc {
                name: phase_metric!(histogram, "cleaning", "run_duration_seconds"),
                metric_type: MetricType::Histogram,
                help: "Duration of a full cleaning run",
                labels: vec![],
            },
        ]
    }
}
