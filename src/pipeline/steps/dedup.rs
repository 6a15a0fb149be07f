use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::debug;

use crate::domain::{EmployeeRecord, SalaryCategory, Table};
use crate::error::Result;
use crate::pipeline::steps::CleaningStep;
use crate::pipeline::StepReport;

/// Drops rows that exactly repeat an earlier row across every column.
/// The first occurrence wins and record order is preserved.
#[derive(Debug, Clone, Default)]
pub struct Deduplicator;

/// Hashable view of a whole row. Floats compare by value, with `-0.0` folded
/// into `0.0` and every NaN treated as the same value.
#[derive(Debug, PartialEq, Eq, Hash)]
struct RowKey<'a> {
    text: [&'a str; 5],
    numbers: [Option<u64>; 5],
    joining_date: NaiveDate,
    category: Option<SalaryCategory>,
}

fn float_key(value: Option<f64>) -> Option<u64> {
    value.map(|v| {
        if v.is_nan() {
            f64::NAN.to_bits()
        } else {
            (v + 0.0).to_bits()
        }
    })
}

impl<'a> RowKey<'a> {
    fn of(r: &'a EmployeeRecord) -> Self {
        Self {
            text: [
                r.employee_id.as_str(),
                r.name.as_str(),
                r.department.as_str(),
                r.region.as_str(),
                r.gender.as_str(),
            ],
            numbers: [
                float_key(r.age),
                float_key(r.salary),
                float_key(r.performance_score),
                float_key(r.sales),
                float_key(r.salary_per_tenure_year),
            ],
            joining_date: r.joining_date,
            category: r.salary_category,
        }
    }
}

impl CleaningStep for Deduplicator {
    fn name(&self) -> &'static str {
        "dedup"
    }

    fn apply(&self, table: &mut Table) -> Result<StepReport> {
        let mut report = StepReport::new(self.name(), table.len());

        let keep: Vec<bool> = {
            let mut seen = HashSet::with_capacity(table.len());
            table
                .records
                .iter()
                .map(|r| seen.insert(RowKey::of(r)))
                .collect()
        };

        let mut keep_iter = keep.into_iter();
        table.records.retain(|_| keep_iter.next().unwrap_or(true));

        report.rows_out = table.len();
        debug!("Removed {} duplicate rows", report.rows_removed());
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::test_support::record;

    #[test]
    fn test_keeps_first_occurrence_in_order() {
        let mut table = Table::new(vec![
            record("1", Some(30.0), Some(40_000.0), Some(2.0), Some(1.0)),
            record("2", Some(31.0), Some(41_000.0), Some(3.0), Some(2.0)),
            record("1", Some(30.0), Some(40_000.0), Some(2.0), Some(1.0)),
            record("3", Some(32.0), Some(42_000.0), Some(4.0), Some(3.0)),
            record("2", Some(31.0), Some(41_000.0), Some(3.0), Some(2.0)),
        ]);

        let report = Deduplicator.apply(&mut table).unwrap();

        let ids: Vec<&str> = table.records.iter().map(|r| r.employee_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(report.rows_in, 5);
        assert_eq!(report.rows_removed(), 2);
    }

    #[test]
    fn test_rows_differing_in_one_cell_are_kept() {
        let mut table = Table::new(vec![
            record("1", Some(30.0), Some(40_000.0), Some(2.0), Some(1.0)),
            record("1", Some(30.0), Some(40_000.0), Some(2.0), None),
        ]);
        Deduplicator.apply(&mut table).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_negative_zero_matches_zero() {
        let mut table = Table::new(vec![
            record("1", Some(30.0), Some(40_000.0), Some(2.0), Some(0.0)),
            record("1", Some(30.0), Some(40_000.0), Some(2.0), Some(-0.0)),
        ]);
        Deduplicator.apply(&mut table).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_idempotent() {
        let mut table = Table::new(vec![
            record("1", None, Some(40_000.0), Some(2.0), Some(1.0)),
            record("1", None, Some(40_000.0), Some(2.0), Some(1.0)),
            record("2", Some(31.0), None, Some(3.0), Some(2.0)),
        ]);
        Deduplicator.apply(&mut table).unwrap();
        let once = table.clone();
        let report = Deduplicator.apply(&mut table).unwrap();
        assert_eq!(table, once);
        assert_eq!(report.rows_removed(), 0);
    }
}
