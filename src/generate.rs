//! Seeded synthetic employee dataset.
//!
//! Produces a raw [`Table`] with a configurable share of nulled numeric cells
//! and a number of exact-duplicate rows, shuffled, so the cleaning pipeline
//! has something to clean. The same seed always yields the same table.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::seq::{index, SliceRandom};
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument};

use crate::config::GeneratorConfig;
use crate::domain::{EmployeeRecord, NumericColumn, Table, DEPARTMENTS, GENDERS, REGIONS};
use crate::error::{PipelineError, Result};
use crate::metrics::GeneratorMetrics;

const FIRST_NAMES: [&str; 24] = [
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David",
    "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Daniel", "Karen", "Matthew", "Nancy", "Anthony", "Lisa",
];

const LAST_NAMES: [&str; 20] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin",
];

/// Generate a raw employee table.
///
/// Rows join on consecutive days from `start_date`; a span that runs past the
/// last representable date is a config error.
#[instrument(skip(config), fields(rows = config.rows, seed = config.seed))]
pub fn generate(config: &GeneratorConfig) -> Result<Table> {
    if config.last_joining_date().is_none() {
        return Err(PipelineError::Config(format!(
            "generator.start_date {} plus {} rows runs past the last representable date",
            config.start_date, config.rows
        )));
    }
    let mut rng = StdRng::seed_from_u64(config.seed);

    let mut records: Vec<EmployeeRecord> = config
        .start_date
        .iter_days()
        .take(config.rows)
        .enumerate()
        .map(|(i, joining_date)| random_record(&mut rng, i, joining_date))
        .collect();

    let nulls_per_column = ((config.rows as f64) * config.null_fraction).round() as usize;
    let nulls_per_column = nulls_per_column.min(config.rows);
    for column in NumericColumn::ALL {
        for idx in index::sample(&mut rng, config.rows, nulls_per_column) {
            *column.get_mut(&mut records[idx]) = None;
        }
        debug!("Nulled {} cells in {}", nulls_per_column, column.name());
    }

    let duplicates = config.duplicates.min(config.rows);
    let picked: Vec<EmployeeRecord> = index::sample(&mut rng, config.rows, duplicates)
        .into_iter()
        .map(|idx| records[idx].clone())
        .collect();
    records.extend(picked);

    records.shuffle(&mut rng);

    GeneratorMetrics::record_generated(
        records.len(),
        nulls_per_column * NumericColumn::ALL.len(),
        duplicates,
    );
    info!(
        "Generated {} rows ({} duplicates, {} nulls per numeric column)",
        records.len(),
        duplicates,
        nulls_per_column
    );

    Ok(Table::new(records))
}

fn random_record(rng: &mut StdRng, i: usize, joining_date: NaiveDate) -> EmployeeRecord {
    let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
    let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
    let department = DEPARTMENTS[rng.gen_range(0..DEPARTMENTS.len())];

    EmployeeRecord {
        employee_id: (i + 1).to_string(),
        name: format!("{} {}", first, last),
        department: department.as_str().to_string(),
        region: REGIONS[rng.gen_range(0..REGIONS.len())].to_string(),
        gender: GENDERS[rng.gen_range(0..GENDERS.len())].to_string(),
        age: Some(rng.gen_range(20..60) as f64),
        salary: Some(rng.gen_range(30_000..120_000) as f64),
        joining_date,
        performance_score: Some(rng.gen_range(1..6) as f64),
        sales: Some(rng.gen_range(0..50_000) as f64),
        salary_per_tenure_year: None,
        salary_category: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn small_config() -> GeneratorConfig {
        GeneratorConfig {
            rows: 200,
            null_fraction: 0.05,
            duplicates: 10,
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_same_seed_same_table() {
        let config = small_config();
        assert_eq!(generate(&config).unwrap(), generate(&config).unwrap());
    }

    #[test]
    fn test_row_count_includes_duplicates() {
        let table = generate(&small_config()).unwrap();
        assert_eq!(table.len(), 210);
        let ids: HashSet<&str> = table.records.iter().map(|r| r.employee_id.as_str()).collect();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn test_nulls_injected_per_column() {
        let table = generate(&small_config()).unwrap();
        for column in NumericColumn::ALL {
            // 10 nulls among the originals, duplicates may copy some of them
            let nulls = table.null_count(column);
            assert!((10..=20).contains(&nulls), "{} nulls in {}", nulls, column.name());
        }
    }

    #[test]
    fn test_values_within_ranges() {
        let table = generate(&small_config()).unwrap();
        for r in &table.records {
            if let Some(age) = r.age {
                assert!((20.0..60.0).contains(&age));
            }
            if let Some(salary) = r.salary {
                assert!((30_000.0..120_000.0).contains(&salary));
            }
            if let Some(score) = r.performance_score {
                assert!((1.0..=5.0).contains(&score));
            }
            assert!(r.department.parse::<crate::domain::Department>().is_ok());
        }
    }

    #[test]
    fn test_joining_dates_are_consecutive() {
        let config = small_config();
        let table = generate(&config).unwrap();
        let first = table.records.iter().map(|r| r.joining_date).min().unwrap();
        let last = table.records.iter().map(|r| r.joining_date).max().unwrap();
        assert_eq!(first, config.start_date);
        assert_eq!(Some(last), config.last_joining_date());
    }

    #[test]
    fn test_start_date_near_calendar_end_is_an_error() {
        let config = GeneratorConfig {
            rows: 100,
            duplicates: 0,
            start_date: NaiveDate::MAX - chrono::Duration::days(30),
            ..GeneratorConfig::default()
        };
        assert!(matches!(generate(&config), Err(PipelineError::Config(_))));
    }
}
