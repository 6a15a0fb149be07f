use tracing::debug;

use crate::constants;
use crate::domain::{CleanedRecord, CleanedTable, Department, EmployeeRecord, Table};
use crate::error::{PipelineError, Result};
use crate::pipeline::StepReport;

/// Converts raw records into their typed form: the department is parsed into
/// the fixed vocabulary and the identifier is kept as trimmed text.
///
/// Any value that does not fit its type aborts the run.
#[derive(Debug, Clone, Default)]
pub struct TypeNormalizer;

impl TypeNormalizer {
    pub fn name(&self) -> &'static str {
        "normalize_types"
    }

    pub fn normalize(&self, table: Table) -> Result<(CleanedTable, StepReport)> {
        let mut report = StepReport::new(self.name(), table.len());

        let records = table
            .records
            .into_iter()
            .enumerate()
            .map(|(row, record)| Self::normalize_record(row, record))
            .collect::<Result<Vec<_>>>()?;

        report.rows_out = records.len();
        report.values_changed = records.len();
        debug!("Normalized {} records", records.len());
        Ok((CleanedTable::new(records), report))
    }

    fn normalize_record(row: usize, record: EmployeeRecord) -> Result<CleanedRecord> {
        let department: Department =
            record
                .department
                .parse()
                .map_err(|message| PipelineError::TypeMismatch {
                    column: constants::DEPARTMENT.to_string(),
                    message: format!("row {}: {}", row, message),
                })?;

        let employee_id = record.employee_id.trim().to_string();
        if employee_id.is_empty() {
            return Err(PipelineError::TypeMismatch {
                column: constants::EMPLOYEE_ID.to_string(),
                message: format!("row {}: empty identifier", row),
            });
        }

        Ok(CleanedRecord {
            employee_id,
            name: record.name,
            department,
            region: record.region,
            gender: record.gender,
            age: record.age,
            salary: record.salary,
            joining_date: record.joining_date,
            performance_score: record.performance_score,
            sales: record.sales,
            salary_per_tenure_year: record.salary_per_tenure_year,
            salary_category: record.salary_category,
            is_outlier: false,
        })
    }
}
