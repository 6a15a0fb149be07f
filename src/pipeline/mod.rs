//! The cleaning pipeline: Impute → Dedup → Derive → Categorize → Normalize types → Flag outliers.
//!
//! Steps run strictly in that order, each consuming the full output of the
//! previous one. Record order is preserved throughout, which the
//! forward-fill imputation depends on.

pub mod steps;

use serde::Serialize;
use std::time::Instant;
use tracing::{error, info, info_span, instrument};

use crate::config::PipelineSettings;
use crate::domain::{CleanedTable, Table};
use crate::error::Result;
use crate::metrics::CleaningMetrics;
use steps::{
    CleaningStep, Deduplicator, NullImputer, OutlierFlagger, SalaryCategorizer,
    TenureSalaryDeriver, TypeNormalizer,
};

/// What a single step did to the table
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StepReport {
    pub step: &'static str,
    pub rows_in: usize,
    pub rows_out: usize,
    /// Cells filled, derived, labeled or flagged
    pub values_changed: usize,
    pub notes: Vec<String>,
}

impl StepReport {
    pub fn new(step: &'static str, rows_in: usize) -> Self {
        Self {
            step,
            rows_in,
            rows_out: rows_in,
            values_changed: 0,
            notes: Vec::new(),
        }
    }

    pub fn rows_removed(&self) -> usize {
        self.rows_in.saturating_sub(self.rows_out)
    }
}

/// Result of a complete pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub rows_in: usize,
    pub rows_out: usize,
    pub outliers: usize,
    pub steps: Vec<StepReport>,
}

#[derive(Debug)]
pub struct PipelineOutput {
    pub table: CleanedTable,
    pub report: PipelineReport,
}

pub struct CleaningPipeline {
    raw_steps: Vec<Box<dyn CleaningStep>>,
    normalizer: TypeNormalizer,
    flagger: OutlierFlagger,
}

impl CleaningPipeline {
    pub fn new(settings: &PipelineSettings) -> Self {
        Self {
            raw_steps: vec![
                Box::new(NullImputer::default()),
                Box::new(Deduplicator),
                Box::new(TenureSalaryDeriver::new(settings.reference_year)),
                Box::new(SalaryCategorizer),
            ],
            normalizer: TypeNormalizer,
            flagger: OutlierFlagger::new(settings.iqr_multiplier),
        }
    }

    /// Run every step over `table`, which the pipeline owns for the duration.
    #[instrument(skip(self, table), fields(rows_in = table.len()))]
    pub fn run(&self, mut table: Table) -> Result<PipelineOutput> {
        let started = Instant::now();
        let rows_in = table.len();
        let mut reports = Vec::with_capacity(self.raw_steps.len() + 2);

        for step in &self.raw_steps {
            let _span = info_span!("step", name = step.name()).entered();
            let step_started = Instant::now();
            let report = step.apply(&mut table).map_err(|e| {
                error!("Step {} failed: {}", step.name(), e);
                CleaningMetrics::record_run_failure(step.name());
                e
            })?;
            Self::finish_step(&report, step_started);
            reports.push(report);
        }

        let step_started = Instant::now();
        let (mut cleaned, report) = {
            let _span = info_span!("step", name = self.normalizer.name()).entered();
            self.normalizer.normalize(table).map_err(|e| {
                error!("Step {} failed: {}", self.normalizer.name(), e);
                CleaningMetrics::record_run_failure(self.normalizer.name());
                e
            })?
        };
        Self::finish_step(&report, step_started);
        reports.push(report);

        let step_started = Instant::now();
        let report = {
            let _span = info_span!("step", name = self.flagger.name()).entered();
            self.flagger.flag(&mut cleaned)
        };
        Self::finish_step(&report, step_started);
        reports.push(report);

        let report = PipelineReport {
            rows_in,
            rows_out: cleaned.len(),
            outliers: cleaned.outlier_count(),
            steps: reports,
        };
        CleaningMetrics::record_run_success(
            report.rows_out,
            report.outliers,
            started.elapsed().as_secs_f64(),
        );
        info!(
            "Cleaning finished: {} rows in, {} rows out, {} outliers",
            report.rows_in, report.rows_out, report.outliers
        );

        Ok(PipelineOutput {
            table: cleaned,
            report,
        })
    }

    fn finish_step(report: &StepReport, started: Instant) {
        CleaningMetrics::record_step(
            report.step,
            report.rows_removed(),
            report.values_changed,
            started.elapsed().as_secs_f64(),
        );
        info!(
            "{}: {} -> {} rows, {} values changed",
            report.step, report.rows_in, report.rows_out, report.values_changed
        );
    }
}

impl Default for CleaningPipeline {
    fn default() -> Self {
        Self::new(&PipelineSettings::default())
    }
}
