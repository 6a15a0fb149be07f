//! Metrics registry for coordinating phase-specific metrics
//!
//! Registers the metrics of every phase and detects naming conflicts early.

use crate::metrics::{MetricDoc, PhaseMetrics};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Register all metrics from all phases
pub fn register_all_metrics() -> usize {
    let mut all_metrics = HashMap::new();

    register_phase_metrics::<super::generator::GeneratorMetrics>(&mut all_metrics);
    register_phase_metrics::<super::cleaning::CleaningMetrics>(&mut all_metrics);
    register_phase_metrics::<super::storage::StorageMetrics>(&mut all_metrics);

    info!(
        "Registered {} total metrics across all phases",
        all_metrics.len()
    );
    all_metrics.len()
}

fn register_phase_metrics<T: PhaseMetrics>(all_metrics: &mut HashMap<&'static str, MetricDoc>) {
    T::register_metrics();
    let phase_name = T::phase_name();
    let docs = T::metrics_documentation();

    debug!("Registering {} metrics for phase '{}'", docs.len(), phase_name);

    for doc in docs {
        if all_metrics.contains_key(doc.name) {
            warn!(
                "Metric name conflict detected: '{}' redefined by phase '{}'",
                doc.name, phase_name
            );
        } else {
            all_metrics.insert(doc.name, doc);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{CleaningMetrics, GeneratorMetrics, StorageMetrics};
    use std::collections::HashSet;

    #[test]
    fn test_metric_names_are_unique_across_phases() {
        let docs: Vec<MetricDoc> = GeneratorMetrics::metrics_documentation()
            .into_iter()
            .chain(CleaningMetrics::metrics_documentation())
            .chain(StorageMetrics::metrics_documentation())
            .collect();
        let names: HashSet<&str> = docs.iter().map(|d| d.name).collect();
        assert_eq!(names.len(), docs.len());
        assert!(docs.iter().all(|d| d.name.starts_with("emp_")));
    }

    #[test]
    fn test_register_without_recorder_is_noop() {
        assert_eq!(register_all_metrics(), 16);
    }
}
