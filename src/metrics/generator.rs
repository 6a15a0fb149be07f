//! Generator Phase Metrics

use crate::metrics::{phase_metric, MetricDoc, MetricType, PhaseMetrics};

pub struct GeneratorMetrics;

impl GeneratorMetrics {
    pub fn record_generated(rows: usize, nulls_injected: usize, duplicates_injected: usize) {
        ::metrics::counter!(phase_metric!(counter, "generator", "rows")).increment(rows as u64);
        ::metrics::counter!(phase_metric!(counter, "generator", "nulls_injected"))
            .increment(nulls_injected as u64);
        ::metrics::counter!(phase_metric!(counter, "generator", "duplicates_injected"))
            .increment(duplicates_injected as u64);
    }
}

impl PhaseMetrics for GeneratorMetrics {
    fn register_metrics() {
        use metrics::counter;

        let _ = counter!(phase_metric!(counter, "generator", "rows"));
        let _ = counter!(phase_metric!(counter, "generator", "nulls_injected"));
        let _ = counter!(phase_metric!(counter, "generator", "duplicates_injected"));
    }

    fn phase_name() -> &'static str {
        "generator"
    }

    fn metrics_documentation() -> Vec<MetricDoc> {
        vec![
            MetricDoc {
                name: phase_metric!(counter, "generator", "rows"),
                metric_type: MetricType::Counter,
                help: "Synthetic rows produced, duplicates included",
                labels: vec![],
            },
            MetricDoc {
                name: phase_metric!(counter, "generator", "nulls_injected"),
                metric_type: MetricType::Counter,
                help: "Numeric cells blanked out",
                labels: vec![],
            },
            MetricDoc {
                name: phase_metric!(counter, "generator", "duplicates_injected"),
                metric_type: MetricType::Counter,
                help: "Rows re-appended as exact duplicates",
                labels: vec![],
            },
        ]
    }
}
