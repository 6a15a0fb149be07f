use chrono::Datelike;
use tracing::{debug, warn};

use crate::domain::Table;
use crate::error::{PipelineError, Result};
use crate::pipeline::steps::CleaningStep;
use crate::pipeline::StepReport;

/// Computes `salary / (reference_year - joining_year)`.
///
/// A zero tenure (joined in the reference year) yields a null rather than an
/// infinite value. Negative tenures are kept as computed; a tenure that does
/// not fit in an `i32` is an error.
#[derive(Debug, Clone)]
pub struct TenureSalaryDeriver {
    pub reference_year: i32,
}

impl TenureSalaryDeriver {
    pub fn new(reference_year: i32) -> Self {
        Self { reference_year }
    }

    pub fn tenure_years(&self, joining_year: i32) -> Option<i32> {
        self.reference_year.checked_sub(joining_year)
    }

    pub fn derive(&self, salary: Option<f64>, tenure: i32) -> Option<f64> {
        if tenure == 0 {
            return None;
        }
        salary.map(|s| s / tenure as f64)
    }
}

impl CleaningStep for TenureSalaryDeriver {
    fn name(&self) -> &'static str {
        "derive_tenure_salary"
    }

    fn apply(&self, table: &mut Table) -> Result<StepReport> {
        let mut report = StepReport::new(self.name(), table.len());
        let mut zero_tenure = 0;

        for record in &mut table.records {
            let joining_year = record.joining_date.year();
            let tenure = self.tenure_years(joining_year).ok_or_else(|| {
                PipelineError::Config(format!(
                    "tenure from {} to reference year {} is out of range",
                    joining_year, self.reference_year
                ))
            })?;
            if tenure == 0 {
                zero_tenure += 1;
            }
            record.salary_per_tenure_year = self.derive(record.salary, tenure);
            if record.salary_per_tenure_year.is_some() {
                report.values_changed += 1;
            }
        }

        if zero_tenure > 0 {
            warn!(
                "{} rows joined in {}; salary per tenure year left null",
                zero_tenure, self.reference_year
            );
            report.notes.push(format!("{} rows with zero tenure", zero_tenure));
        }
        debug!("Derived {} salary-per-tenure values", report.values_changed);

        report.rows_out = table.len();
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::test_support::record_joined;

    #[test]
    fn test_divides_salary_by_tenure() {
        let mut table = Table::new(vec![
            record_joined("1", Some(60_000.0), 2015, 1, 1),
            record_joined("2", Some(45_000.0), 2022, 6, 30),
        ]);
        TenureSalaryDeriver::new(2025).apply(&mut table).unwrap();
        assert_eq!(table.records[0].salary_per_tenure_year, Some(6_000.0));
        assert_eq!(table.records[1].salary_per_tenure_year, Some(15_000.0));
    }

    #[test]
    fn test_zero_tenure_is_null() {
        let mut table = Table::new(vec![record_joined("1", Some(60_000.0), 2025, 3, 1)]);
        let report = TenureSalaryDeriver::new(2025).apply(&mut table).unwrap();
        assert_eq!(table.records[0].salary_per_tenure_year, None);
        assert_eq!(report.values_changed, 0);
        assert_eq!(report.notes.len(), 1);
    }

    #[test]
    fn test_null_salary_and_future_joiners() {
        let deriver = TenureSalaryDeriver::new(2025);
        assert_eq!(deriver.derive(None, 10), None);
        assert_eq!(deriver.tenure_years(2027), Some(-2));
        assert_eq!(deriver.derive(Some(50_000.0), -2), Some(-25_000.0));
    }

    #[test]
    fn test_overflowing_tenure_is_an_error() {
        let mut table = Table::new(vec![record_joined("1", Some(60_000.0), 2015, 1, 1)]);
        let err = TenureSalaryDeriver::new(i32::MIN).apply(&mut table).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }
}
