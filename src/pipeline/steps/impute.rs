use tracing::{debug, warn};

use crate::domain::{NumericColumn, Table};
use crate::error::Result;
use crate::pipeline::steps::CleaningStep;
use crate::pipeline::StepReport;
use crate::stats;

/// How nulls in one column are replaced
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImputeStrategy {
    Mean,
    Median,
    /// Carry the last non-null value forward in record order
    ForwardFill,
}

/// Fills nulls column by column; each column's fill value is computed from
/// that column alone, before any of its nulls are replaced.
#[derive(Debug, Clone)]
pub struct NullImputer {
    pub plan: Vec<(NumericColumn, ImputeStrategy)>,
}

impl Default for NullImputer {
    fn default() -> Self {
        Self {
            plan: vec![
                (NumericColumn::Salary, ImputeStrategy::Mean),
                (NumericColumn::Age, ImputeStrategy::Median),
                (NumericColumn::PerformanceScore, ImputeStrategy::ForwardFill),
                (NumericColumn::Sales, ImputeStrategy::Mean),
            ],
        }
    }
}

impl NullImputer {
    fn fill_constant(table: &mut Table, column: NumericColumn, value: f64) -> usize {
        let mut filled = 0;
        for record in &mut table.records {
            let cell = column.get_mut(record);
            if cell.is_none() {
                *cell = Some(value);
                filled += 1;
            }
        }
        filled
    }

    fn forward_fill(table: &mut Table, column: NumericColumn) -> usize {
        let mut last = None;
        let mut filled = 0;
        for record in &mut table.records {
            let cell = column.get_mut(record);
            match *cell {
                Some(v) => last = Some(v),
                None => {
                    if let Some(v) = last {
                        *cell = Some(v);
                        filled += 1;
                    }
                }
            }
        }
        filled
    }
}

impl CleaningStep for NullImputer {
    fn name(&self) -> &'static str {
        "impute"
    }

    fn apply(&self, table: &mut Table) -> Result<StepReport> {
        let mut report = StepReport::new(self.name(), table.len());

        for &(column, strategy) in &self.plan {
            let present: Vec<f64> = table.column(column).into_iter().flatten().collect();
            let filled = match strategy {
                ImputeStrategy::Mean => stats::mean(&present)
                    .map(|m| Self::fill_constant(table, column, m))
                    .unwrap_or(0),
                ImputeStrategy::Median => stats::median(&present)
                    .map(|m| Self::fill_constant(table, column, m))
                    .unwrap_or(0),
                ImputeStrategy::ForwardFill => Self::forward_fill(table, column),
            };
            debug!("Filled {} nulls in {} ({:?})", filled, column.name(), strategy);
            report.values_changed += filled;

            let remaining = table.null_count(column);
            if remaining > 0 {
                warn!("{} nulls remain in {} after imputation", remaining, column.name());
                report
                    .notes
                    .push(format!("{} nulls remain in {}", remaining, column.name()));
            }
        }

        report.rows_out = table.len();
        Ok(report)
    }
}
