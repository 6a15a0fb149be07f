//! Descriptive statistics over a cleaned table: shape, column kinds, missing
//! values, numeric and categorical summaries, top value counts, a Pearson
//! correlation matrix and the largest sales rows.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::constants;
use crate::domain::{CleanedRecord, CleanedTable};
use crate::stats;

const TOP_VALUES: usize = 10;
const TOP_SALES_ROWS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataKind {
    Numeric,
    Text,
    Date,
    Bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnInfo {
    pub name: &'static str,
    pub kind: DataKind,
    pub missing: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct NumericSummary {
    pub column: &'static str,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub p25: Option<f64>,
    pub p50: Option<f64>,
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoricalSummary {
    pub column: &'static str,
    pub count: usize,
    pub unique: usize,
    pub top: Option<String>,
    pub freq: usize,
    /// Most frequent values, ties in order of first appearance
    pub value_counts: Vec<(String, usize)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<&'static str>,
    pub values: Vec<Vec<Option<f64>>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopSalesRow {
    pub employee_id: String,
    pub name: String,
    pub department: String,
    pub sales: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileReport {
    pub rows: usize,
    pub columns: Vec<ColumnInfo>,
    pub numeric: Vec<NumericSummary>,
    pub categorical: Vec<CategoricalSummary>,
    pub correlation: CorrelationMatrix,
    pub top_sales: Vec<TopSalesRow>,
}

const NUMERIC_COLUMNS: [&str; 5] = [
    constants::AGE,
    constants::SALARY,
    constants::PERFORMANCE_SCORE,
    constants::SALES,
    constants::SALARY_PER_YEAR,
];

// EmployeeID is an opaque text identifier, so it is counted here and stays
// out of the numeric summaries and the correlation matrix.
const CATEGORICAL_COLUMNS: [(&str, DataKind); 8] = [
    (constants::EMPLOYEE_ID, DataKind::Text),
    (constants::NAME, DataKind::Text),
    (constants::DEPARTMENT, DataKind::Text),
    (constants::REGION, DataKind::Text),
    (constants::GENDER, DataKind::Text),
    (constants::JOINING_DATE, DataKind::Date),
    (constants::SALARY_CATEGORY, DataKind::Text),
    (constants::IS_OUTLIER, DataKind::Bool),
];

fn numeric_value(column: &str, r: &CleanedRecord) -> Option<f64> {
    match column {
        constants::AGE => r.age,
        constants::SALARY => r.salary,
        constants::PERFORMANCE_SCORE => r.performance_score,
        constants::SALES => r.sales,
        constants::SALARY_PER_YEAR => r.salary_per_tenure_year,
        _ => None,
    }
}

fn categorical_value(column: &str, r: &CleanedRecord) -> Option<String> {
    match column {
        constants::EMPLOYEE_ID => Some(r.employee_id.clone()),
        constants::NAME => Some(r.name.clone()),
        constants::DEPARTMENT => Some(r.department.to_string()),
        constants::REGION => Some(r.region.clone()),
        constants::GENDER => Some(r.gender.clone()),
        constants::JOINING_DATE => Some(r.joining_date.format(constants::DATE_FORMAT).to_string()),
        constants::SALARY_CATEGORY => r.salary_category.map(|c| c.to_string()),
        constants::IS_OUTLIER => Some(if r.is_outlier { "True" } else { "False" }.to_string()),
        _ => None,
    }
}

/// Build the full profile of a cleaned table
pub fn profile(table: &CleanedTable) -> ProfileReport {
    let mut missing: HashMap<&'static str, usize> = HashMap::new();

    let numeric: Vec<NumericSummary> = NUMERIC_COLUMNS
        .iter()
        .map(|&name| {
            let values: Vec<Option<f64>> =
                table.records.iter().map(|r| numeric_value(name, r)).collect();
            missing.insert(name, values.iter().filter(|v| v.is_none()).count());
            summarize_numeric(name, &values)
        })
        .collect();

    let categorical: Vec<CategoricalSummary> = CATEGORICAL_COLUMNS
        .iter()
        .map(|&(name, _)| {
            let values: Vec<Option<String>> =
                table.records.iter().map(|r| categorical_value(name, r)).collect();
            missing.insert(name, values.iter().filter(|v| v.is_none()).count());
            summarize_categorical(name, &values)
        })
        .collect();

    let columns = constants::cleaned_columns()
        .into_iter()
        .map(|name| {
            let kind = CATEGORICAL_COLUMNS
                .iter()
                .find(|(n, _)| *n == name)
                .map(|&(_, kind)| kind)
                .unwrap_or(DataKind::Numeric);
            ColumnInfo {
                name,
                kind,
                missing: missing.get(name).copied().unwrap_or(0),
            }
        })
        .collect();

    ProfileReport {
        rows: table.len(),
        columns,
        numeric,
        categorical,
        correlation: correlation_matrix(table),
        top_sales: top_sales(table, TOP_SALES_ROWS),
    }
}

fn summarize_numeric(column: &'static str, values: &[Option<f64>]) -> NumericSummary {
    let mut present: Vec<f64> = values.iter().flatten().copied().collect();
    present.sort_by(f64::total_cmp);
    NumericSummary {
        column,
        count: present.len(),
        mean: stats::mean(&present),
        std: stats::sample_std(&present),
        min: present.first().copied(),
        p25: stats::quantile_sorted(&present, 0.25),
        p50: stats::quantile_sorted(&present, 0.5),
        p75: stats::quantile_sorted(&present, 0.75),
        max: present.last().copied(),
    }
}

fn summarize_categorical(column: &'static str, values: &[Option<String>]) -> CategoricalSummary {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for value in values.iter().flatten() {
        match index.get(value.as_str()) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(value.as_str(), counts.len());
                counts.push((value.clone(), 1));
            }
        }
    }
    let unique = counts.len();
    let count: usize = counts.iter().map(|(_, c)| c).sum();

    // stable sort keeps first-appearance order among ties
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    let (top, freq) = counts
        .first()
        .map(|(v, c)| (Some(v.clone()), *c))
        .unwrap_or((None, 0));
    counts.truncate(TOP_VALUES);

    CategoricalSummary {
        column,
        count,
        unique,
        top,
        freq,
        value_counts: counts,
    }
}

fn correlation_matrix(table: &CleanedTable) -> CorrelationMatrix {
    let data: Vec<Vec<Option<f64>>> = NUMERIC_COLUMNS
        .iter()
        .map(|&name| table.records.iter().map(|r| numeric_value(name, r)).collect())
        .collect();

    let values = data
        .iter()
        .map(|a| {
            data.iter()
                .map(|b| {
                    let (xs, ys): (Vec<f64>, Vec<f64>) = a
                        .iter()
                        .zip(b)
                        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
                        .unzip();
                    stats::pearson(&xs, &ys)
                })
                .collect()
        })
        .collect();

    CorrelationMatrix {
        columns: NUMERIC_COLUMNS.to_vec(),
        values,
    }
}

fn top_sales(table: &CleanedTable, n: usize) -> Vec<TopSalesRow> {
    let mut rows: Vec<&CleanedRecord> = table.records.iter().filter(|r| r.sales.is_some()).collect();
    rows.sort_by(|a, b| {
        b.sales
            .unwrap_or(f64::NEG_INFINITY)
            .total_cmp(&a.sales.unwrap_or(f64::NEG_INFINITY))
    });
    rows.into_iter()
        .take(n)
        .map(|r| TopSalesRow {
            employee_id: r.employee_id.clone(),
            name: r.name.clone(),
            department: r.department.to_string(),
            sales: r.sales.unwrap_or_default(),
        })
        .collect()
}

fn fmt_opt(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "-".to_string())
}

impl fmt::Display for ProfileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Shape: ({}, {})", self.rows, self.columns.len())?;

        writeln!(f, "\nColumns:")?;
        for c in &self.columns {
            let kind = match c.kind {
                DataKind::Numeric => "numeric",
                DataKind::Text => "text",
                DataKind::Date => "date",
                DataKind::Bool => "bool",
            };
            writeln!(f, "  {:<28} {:<8} missing={}", c.name, kind, c.missing)?;
        }

        writeln!(f, "\nNumeric summary:")?;
        writeln!(
            f,
            "  {:<28} {:>6} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
            "column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
        )?;
        for s in &self.numeric {
            writeln!(
                f,
                "  {:<28} {:>6} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
                s.column,
                s.count,
                fmt_opt(s.mean),
                fmt_opt(s.std),
                fmt_opt(s.min),
                fmt_opt(s.p25),
                fmt_opt(s.p50),
                fmt_opt(s.p75),
                fmt_opt(s.max)
            )?;
        }

        writeln!(f, "\nCategorical summary:")?;
        for s in &self.categorical {
            writeln!(
                f,
                "  {:<28} count={} unique={} top={} freq={}",
                s.column,
                s.count,
                s.unique,
                s.top.as_deref().unwrap_or("-"),
                s.freq
            )?;
            for (value, count) in &s.value_counts {
                writeln!(f, "      {:<24} {}", value, count)?;
            }
        }

        writeln!(f, "\nCorrelation:")?;
        write!(f, "  {:<28}", "")?;
        for name in &self.correlation.columns {
            write!(f, " {:>12.12}", name)?;
        }
        writeln!(f)?;
        for (name, row) in self.correlation.columns.iter().zip(&self.correlation.values) {
            write!(f, "  {:<28}", name)?;
            for v in row {
                write!(f, " {:>12}", fmt_opt(*v))?;
            }
            writeln!(f)?;
        }

        writeln!(f, "\nTop {} rows by sales:", self.top_sales.len())?;
        for r in &self.top_sales {
            writeln!(
                f,
                "  {:<8} {:<24} {:<10} {:.2}",
                r.employee_id, r.name, r.department, r.sales
            )?;
        }
        Ok(())
    }
}
