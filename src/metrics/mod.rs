//! Metrics for the employee pipeline
//!
//! Each phase (generation, cleaning, storage) defines its metrics in a
//! dedicated submodule. Recording is a no-op until a recorder is installed,
//! so library users pay nothing unless they call [`init_metrics`].

pub mod cleaning;
pub mod generator;
pub mod registry;
pub mod storage;

pub use cleaning::CleaningMetrics;
pub use generator::GeneratorMetrics;
pub use storage::StorageMetrics;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use tracing::{info, warn};

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the global Prometheus recorder and register every phase metric.
///
/// Idempotent. No HTTP listener is started: the pipeline is a short-lived
/// batch job, so the exposition text is rendered in-process via [`render`].
pub fn init_metrics() {
    if HANDLE.get().is_some() {
        return;
    }
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            if HANDLE.set(handle).is_err() {
                warn!("Metrics handle already stored");
            }
            registry::register_all_metrics();
            info!("Prometheus recorder installed");
        }
        Err(e) => {
            warn!("Failed to install Prometheus recorder: {}", e);
        }
    }
}

/// Render the current metrics in Prometheus text format, if a recorder is installed
pub fn render() -> Option<String> {
    HANDLE.get().map(PrometheusHandle::render)
}

/// Implemented by each phase's metrics collection
pub trait PhaseMetrics {
    /// Pre-register all metrics for this phase
    fn register_metrics();

    fn phase_name() -> &'static str;

    /// Documentation for all metrics in this phase
    fn metrics_documentation() -> Vec<MetricDoc>;
}

/// Documentation for a single metric
#[derive(Debug, Clone)]
pub struct MetricDoc {
    pub name: &'static str,
    pub metric_type: MetricType,
    pub help: &'static str,
    pub labels: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MetricType {
    Counter,
    Histogram,
    Gauge,
}

/// Builds metric names following `emp_{phase}_{metric_name}[_total]`
macro_rules! phase_metric {
    (counter, $phase:literal, $name:literal) => {
        concat!("emp_", $phase, "_", $name, "_total")
    };
    (histogram, $phase:literal, $name:literal) => {
        concat!("emp_", $phase, "_", $name)
    };
    (gauge, $phase:literal, $name:literal) => {
        concat!("emp_", $phase, "_", $name)
    };
}

pub(crate) use phase_metric;
