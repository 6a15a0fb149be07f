use chrono::{Duration, NaiveDate};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants;
use crate::error::{PipelineError, Result};

/// Environment variable naming a config file when `--config` is not given
pub const CONFIG_ENV_VAR: &str = "EMPLOYEE_PIPELINE_CONFIG";

/// Accepted `pipeline.reference_year` range, matching four-digit dates
pub const REFERENCE_YEAR_RANGE: std::ops::RangeInclusive<i32> = 1..=9999;

// Wider than any representable date range, small enough for `Duration::days`
const MAX_DAY_SPAN: i64 = 1 << 40;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pipeline: PipelineSettings,
    pub generator: GeneratorConfig,
    pub output: OutputSettings,
}

/// Knobs of the cleaning pipeline
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    pub reference_year: i32,
    pub iqr_multiplier: f64,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            reference_year: constants::REFERENCE_YEAR,
            iqr_multiplier: constants::IQR_MULTIPLIER,
        }
    }
}

/// Shape of the synthetic dataset
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub rows: usize,
    /// Fraction of rows nulled per numeric column
    pub null_fraction: f64,
    pub duplicates: usize,
    pub seed: u64,
    pub start_date: NaiveDate,
}

impl GeneratorConfig {
    /// Joining date of the last generated row, `None` past the calendar's range
    pub fn last_joining_date(&self) -> Option<NaiveDate> {
        let days = i64::try_from(self.rows.saturating_sub(1)).ok()?;
        if days > MAX_DAY_SPAN {
            return None;
        }
        self.start_date.checked_add_signed(Duration::days(days))
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            rows: 5000,
            null_fraction: 0.02,
            duplicates: 50,
            seed: 42,
            start_date: NaiveDate::from_ymd_opt(2015, 1, 1).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub path: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(constants::DEFAULT_OUTPUT_PATH),
        }
    }
}

impl Config {
    /// Load from an explicit path, then from `EMPLOYEE_PIPELINE_CONFIG`, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from);
        match path.map(Path::to_path_buf).or(env_path) {
            Some(p) => Self::from_file(&p),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.generator.null_fraction) {
            return Err(PipelineError::Config(format!(
                "generator.null_fraction must be within [0, 1], got {}",
                self.generator.null_fraction
            )));
        }
        if self.generator.duplicates > self.generator.rows {
            return Err(PipelineError::Config(format!(
                "generator.duplicates ({}) cannot exceed generator.rows ({})",
                self.generator.duplicates, self.generator.rows
            )));
        }
        if !REFERENCE_YEAR_RANGE.contains(&self.pipeline.reference_year) {
            return Err(PipelineError::Config(format!(
                "pipeline.reference_year must be within {}..={}, got {}",
                REFERENCE_YEAR_RANGE.start(),
                REFERENCE_YEAR_RANGE.end(),
                self.pipeline.reference_year
            )));
        }
        if self.generator.last_joining_date().is_none() {
            return Err(PipelineError::Config(format!(
                "generator.start_date {} plus {} rows runs past the last representable date",
                self.generator.start_date, self.generator.rows
            )));
        }
        if !(self.pipeline.iqr_multiplier.is_finite() && self.pipeline.iqr_multiplier >= 0.0) {
            return Err(PipelineError::Config(format!(
                "pipeline.iqr_multiplier must be a non-negative number, got {}",
                self.pipeline.iqr_multiplier
            )));
        }
        Ok(())
    }
}
