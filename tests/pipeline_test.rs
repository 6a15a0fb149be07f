use anyhow::Result;
use chrono::Datelike;
use std::collections::HashSet;
use tempfile::tempdir;

use employee_pipeline::config::{Config, GeneratorConfig, PipelineSettings};
use employee_pipeline::domain::{NumericColumn, SalaryCategory};
use employee_pipeline::generate::generate;
use employee_pipeline::pipeline::steps::{CleaningStep, Deduplicator, NullImputer};
use employee_pipeline::pipeline::CleaningPipeline;
use employee_pipeline::{profile, stats, storage};

fn generator_config() -> GeneratorConfig {
    GeneratorConfig {
        rows: 1000,
        duplicates: 25,
        ..GeneratorConfig::default()
    }
}

#[test]
fn test_imputation_leaves_no_nulls() -> Result<()> {
    let mut table = generate(&generator_config())?;
    assert!(NumericColumn::ALL.iter().any(|c| table.null_count(*c) > 0));

    let leading_perf_nulls = table
        .records
        .iter()
        .take_while(|r| r.performance_score.is_none())
        .count();
    NullImputer::default().apply(&mut table)?;

    assert_eq!(table.null_count(NumericColumn::Age), 0);
    assert_eq!(table.null_count(NumericColumn::Salary), 0);
    assert_eq!(table.null_count(NumericColumn::Sales), 0);
    assert_eq!(
        table.null_count(NumericColumn::PerformanceScore),
        leading_perf_nulls
    );
    Ok(())
}

#[test]
fn test_generated_duplicates_are_removed() -> Result<()> {
    let config = generator_config();
    let output = CleaningPipeline::default().run(generate(&config)?)?;

    // forward-filled copies may differ from their originals and survive
    assert!(output.table.len() >= config.rows);
    assert!(output.table.len() < config.rows + config.duplicates);

    let rows: HashSet<String> = output
        .table
        .records
        .iter()
        .map(|r| format!("{:?}", r))
        .collect();
    assert_eq!(rows.len(), output.table.len());
    Ok(())
}

#[test]
fn test_dedup_is_idempotent() -> Result<()> {
    let mut table = generate(&generator_config())?;
    NullImputer::default().apply(&mut table)?;
    Deduplicator.apply(&mut table)?;
    let once = table.len();
    Deduplicator.apply(&mut table)?;
    assert_eq!(table.len(), once);
    Ok(())
}

#[test]
fn test_cleaned_table_invariants() -> Result<()> {
    let settings = PipelineSettings::default();
    let output = CleaningPipeline::new(&settings).run(generate(&generator_config())?)?;

    let salaries: Vec<f64> = output.table.records.iter().filter_map(|r| r.salary).collect();
    let (lower, upper) = stats::tukey_fences(&salaries, settings.iqr_multiplier).unwrap();

    for r in &output.table.records {
        let salary = r.salary.unwrap();
        let tenure = settings.reference_year - r.joining_date.year();
        if tenure == 0 {
            assert_eq!(r.salary_per_tenure_year, None);
        } else {
            let expected = salary / tenure as f64;
            assert!((r.salary_per_tenure_year.unwrap() - expected).abs() < 1e-9);
        }

        assert_eq!(r.salary_category, SalaryCategory::for_salary(salary));
        assert_eq!(r.is_outlier, salary < lower || salary > upper);
    }
    assert_eq!(output.report.outliers, output.table.outlier_count());
    Ok(())
}

#[test]
fn test_zero_tenure_rows_under_late_reference_year() -> Result<()> {
    // 1000 consecutive days from 2015-01-01 reach into 2017
    let settings = PipelineSettings {
        reference_year: 2017,
        ..PipelineSettings::default()
    };
    let output = CleaningPipeline::new(&settings).run(generate(&generator_config())?)?;
    let zero: Vec<_> = output
        .table
        .records
        .iter()
        .filter(|r| r.joining_date.year() == 2017)
        .collect();
    assert!(!zero.is_empty());
    assert!(zero.iter().all(|r| r.salary_per_tenure_year.is_none()));
    Ok(())
}

#[test]
fn test_csv_round_trip() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("Cleaned_employee_dataset.csv");
    let output = CleaningPipeline::default().run(generate(&generator_config())?)?;

    storage::write_cleaned(&path, &output.table)?;
    let loaded = storage::read_cleaned(&path)?;

    assert_eq!(loaded.len(), output.table.len());
    let report = profile::profile(&loaded);
    let original = profile::profile(&output.table);
    let non_null = |r: &profile::ProfileReport| -> Vec<&str> {
        r.columns
            .iter()
            .filter(|c| c.missing < r.rows)
            .map(|c| c.name)
            .collect()
    };
    assert_eq!(non_null(&report), non_null(&original));
    assert_eq!(loaded.outlier_count(), output.table.outlier_count());
    assert_eq!(loaded.records[0].employee_id, output.table.records[0].employee_id);
    Ok(())
}

#[test]
fn test_raw_file_through_pipeline() -> Result<()> {
    let dir = tempdir()?;
    let raw_path = dir.path().join("raw.csv");
    let table = generate(&generator_config())?;
    storage::write_raw(&raw_path, &table)?;

    let reloaded = storage::read_raw(&raw_path)?;
    assert_eq!(reloaded, table);

    let from_file = CleaningPipeline::default().run(reloaded)?;
    let in_memory = CleaningPipeline::default().run(table)?;
    assert_eq!(from_file.table, in_memory.table);
    Ok(())
}

#[test]
fn test_config_file_drives_run() -> Result<()> {
    let dir = tempdir()?;
    let config_path = dir.path().join("pipeline.toml");
    std::fs::write(
        &config_path,
        "[generator]\nrows = 300\nduplicates = 10\nseed = 7\n\n[pipeline]\niqr_multiplier = 0.0\n",
    )?;
    let config = Config::load(Some(config_path.as_path()))?;
    let output = CleaningPipeline::new(&config.pipeline).run(generate(&config.generator)?)?;
    assert!(output.table.len() >= 300);
    // a zero multiplier flags everything outside [Q1, Q3]
    assert!(output.table.outlier_count() > 0);
    Ok(())
}
