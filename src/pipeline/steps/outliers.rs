use tracing::{debug, info};

use crate::domain::CleanedTable;
use crate::pipeline::StepReport;
use crate::stats;

/// Flags salary outliers with the Tukey rule. Only `is_outlier` is touched;
/// no row is removed or altered otherwise.
#[derive(Debug, Clone)]
pub struct OutlierFlagger {
    pub iqr_multiplier: f64,
}

impl OutlierFlagger {
    pub fn new(iqr_multiplier: f64) -> Self {
        Self { iqr_multiplier }
    }

    pub fn name(&self) -> &'static str {
        "flag_outliers"
    }

    pub fn flag(&self, table: &mut CleanedTable) -> StepReport {
        let mut report = StepReport::new(self.name(), table.len());

        let salaries: Vec<f64> = table.records.iter().filter_map(|r| r.salary).collect();
        let fences = stats::tukey_fences(&salaries, self.iqr_multiplier);

        for record in &mut table.records {
            record.is_outlier = match (fences, record.salary) {
                (Some((lower, upper)), Some(salary)) => salary < lower || salary > upper,
                _ => false,
            };
        }

        report.values_changed = table.outlier_count();
        match fences {
            Some((lower, upper)) => {
                debug!("Salary fences [{:.2}, {:.2}]", lower, upper);
                report
                    .notes
                    .push(format!("salary fences [{:.2}, {:.2}]", lower, upper));
            }
            None => report.notes.push("no salaries to compute fences".to_string()),
        }
        info!("Flagged {} salary outliers", report.values_changed);

        report.rows_out = table.len();
        report
    }
}
