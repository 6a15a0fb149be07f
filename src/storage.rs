//! CSV persistence for raw and cleaned tables.
//!
//! Files carry a header row, are comma separated and UTF-8. Nulls are empty
//! cells and dates are `YYYY-MM-DD`. Writing replaces any existing file.

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::path::Path;
use tracing::{info, instrument, warn};

use crate::constants;
use crate::domain::{CleanedRecord, CleanedTable, EmployeeRecord, Table};
use crate::error::{PipelineError, Result};
use crate::metrics::StorageMetrics;

const RAW: &str = "raw";
const CLEANED: &str = "cleaned";

/// Write a cleaned table, header included
#[instrument(skip_all, fields(path = %path.display(), rows = table.len()))]
pub fn write_cleaned(path: &Path, table: &CleanedTable) -> Result<()> {
    write_rows(path, CLEANED, &constants::cleaned_columns(), &table.records)
}

/// Read a cleaned table back, rejecting files that lack any output column
#[instrument(skip_all, fields(path = %path.display()))]
pub fn read_cleaned(path: &Path) -> Result<CleanedTable> {
    let records: Vec<CleanedRecord> = read_rows(path, CLEANED, &constants::cleaned_columns())?;
    Ok(CleanedTable::new(records))
}

/// Write a raw (pre-cleaning) table
#[instrument(skip_all, fields(path = %path.display(), rows = table.len()))]
pub fn write_raw(path: &Path, table: &Table) -> Result<()> {
    write_rows(path, RAW, &constants::raw_columns(), &table.records)
}

/// Read a raw table; extra columns are ignored, missing ones are fatal
#[instrument(skip_all, fields(path = %path.display()))]
pub fn read_raw(path: &Path) -> Result<Table> {
    let records: Vec<EmployeeRecord> = read_rows(path, RAW, &constants::raw_columns())?;
    Ok(Table::new(records))
}

fn write_rows<T: Serialize>(
    path: &Path,
    kind: &'static str,
    columns: &[&str],
    rows: &[T],
) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    // Headers are written explicitly so an empty table still gets its header row
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(File::create(path)?);
    writer.write_record(columns)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    drop(writer);

    let bytes = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    StorageMetrics::record_write(kind, rows.len(), bytes);
    info!("Wrote {} {} rows to {}", rows.len(), kind, path.display());
    Ok(())
}

fn read_rows<T: DeserializeOwned>(
    path: &Path,
    kind: &'static str,
    required: &[&str],
) -> Result<Vec<T>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(File::open(path)?);

    let headers = reader.headers()?.clone();
    if let Err(e) = check_columns(&headers, required) {
        warn!("Rejected {}: {}", path.display(), e);
        StorageMetrics::record_read_error(kind);
        return Err(e);
    }

    let rows = reader
        .deserialize::<T>()
        .collect::<std::result::Result<Vec<T>, csv::Error>>()
        .map_err(|e| {
            StorageMetrics::record_read_error(kind);
            PipelineError::from(e)
        })?;

    StorageMetrics::record_read(kind, rows.len());
    info!("Read {} {} rows from {}", rows.len(), kind, path.display());
    Ok(rows)
}

fn check_columns(headers: &StringRecord, required: &[&str]) -> Result<()> {
    match required
        .iter()
        .find(|col| !headers.iter().any(|h| h.trim() == **col))
    {
        Some(missing) => Err(PipelineError::MissingColumn(missing.to_string())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Department, SalaryCategory};
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn cleaned_record(id: &str, salary: Option<f64>, outlier: bool) -> CleanedRecord {
        CleanedRecord {
            employee_id: id.to_string(),
            name: "Ada Lovelace".to_string(),
            department: Department::Hr,
            region: "East".to_string(),
            gender: "Female".to_string(),
            age: Some(36.5),
            salary,
            joining_date: NaiveDate::from_ymd_opt(2016, 2, 29).unwrap(),
            performance_score: Some(4.0),
            sales: Some(1234.5),
            salary_per_tenure_year: salary.map(|s| s / 9.0),
            salary_category: salary.and_then(SalaryCategory::for_salary),
            is_outlier: outlier,
        }
    }

    #[test]
    fn test_cleaned_file_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let table = CleanedTable::new(vec![
            cleaned_record("1", Some(45_000.0), false),
            cleaned_record("2", None, true),
        ]);

        write_cleaned(&path, &table).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(
            lines[0],
            "EmployeeID,Name,Department,Region,Gender,Age,Salary,JoiningDate,PerformanceScore,Sales,Salary_per_year_experience,Category_salary,is_outlier"
        );
        assert!(lines[1].starts_with("1,Ada Lovelace,HR,East,Female,36.5,45000"));
        assert!(lines[1].contains(",2016-02-29,"));
        assert!(lines[1].ends_with(",5000.0,Low,False"));
        assert!(lines[2].ends_with(",,,True"));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_cleaned_read_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let table = CleanedTable::new(vec![
            cleaned_record("1", Some(45_000.0), false),
            cleaned_record("2", None, true),
        ]);
        write_cleaned(&path, &table).unwrap();
        assert_eq!(read_cleaned(&path).unwrap(), table);
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "stale content that is longer than the new file\n".repeat(50)).unwrap();
        write_cleaned(&path, &CleanedTable::default()).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(read_cleaned(&path).unwrap().is_empty());
    }

    #[test]
    fn test_missing_column_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("raw.csv");
        fs::write(
            &path,
            "EmployeeID,Name,Department,Region,Gender,Age,JoiningDate,PerformanceScore,Sales\n\
             1,Bob,IT,North,Male,30,2015-01-01,3,100\n",
        )
        .unwrap();
        let err = read_raw(&path).unwrap_err();
        assert!(matches!(err, PipelineError::MissingColumn(ref c) if c == "Salary"));
    }

    #[test]
    fn test_raw_empty_cells_are_nulls() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("raw.csv");
        fs::write(
            &path,
            "EmployeeID,Name,Department,Region,Gender,Age,Salary,JoiningDate,PerformanceScore,Sales,Extra\n\
             1,Bob,IT,North,Male,,55000,2015-01-01,3,,x\n",
        )
        .unwrap();
        let table = read_raw(&path).unwrap();
        let r = &table.records[0];
        assert_eq!(r.age, None);
        assert_eq!(r.salary, Some(55_000.0));
        assert_eq!(r.sales, None);
        assert_eq!(r.joining_date, NaiveDate::from_ymd_opt(2015, 1, 1).unwrap());
    }

    #[test]
    fn test_bad_cell_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("raw.csv");
        fs::write(
            &path,
            "EmployeeID,Name,Department,Region,Gender,Age,Salary,JoiningDate,PerformanceScore,Sales\n\
             1,Bob,IT,North,Male,thirty,55000,2015-01-01,3,10\n",
        )
        .unwrap();
        assert!(matches!(read_raw(&path).unwrap_err(), PipelineError::Csv(_)));
    }

    #[test]
    fn test_nan_markers_are_nulls() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("raw.csv");
        fs::write(
            &path,
            "EmployeeID,Name,Department,Region,Gender,Age,Salary,JoiningDate,PerformanceScore,Sales\n\
             1,Bob,IT,North,Male,NaN,nan,2015-01-01, NAN ,12.5\n",
        )
        .unwrap();
        let r = &read_raw(&path).unwrap().records[0];
        assert_eq!(r.age, None);
        assert_eq!(r.salary, None);
        assert_eq!(r.performance_score, None);
        assert_eq!(r.sales, Some(12.5));
    }
}
