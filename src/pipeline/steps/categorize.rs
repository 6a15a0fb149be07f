use tracing::debug;

use crate::domain::{SalaryCategory, Table};
use crate::error::Result;
use crate::pipeline::steps::CleaningStep;
use crate::pipeline::StepReport;

/// Labels each salary Low / Medium / High, see [`SalaryCategory::for_salary`].
#[derive(Debug, Clone, Default)]
pub struct SalaryCategorizer;

impl CleaningStep for SalaryCategorizer {
    fn name(&self) -> &'static str {
        "categorize_salary"
    }

    fn apply(&self, table: &mut Table) -> Result<StepReport> {
        let mut report = StepReport::new(self.name(), table.len());

        for record in &mut table.records {
            record.salary_category = record.salary.and_then(SalaryCategory::for_salary);
            if record.salary_category.is_some() {
                report.values_changed += 1;
            }
        }

        let unlabeled = table.len() - report.values_changed;
        if unlabeled > 0 {
            report
                .notes
                .push(format!("{} salaries outside every category", unlabeled));
        }
        debug!("Labeled {} salaries, {} unlabeled", report.values_changed, unlabeled);

        report.rows_out = table.len();
        Ok(report)
    }
}
