//! Domain data shapes shared across the generator, the cleaning pipeline,
//! storage and profiling.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants;

pub const DEPARTMENTS: [Department; 5] = [
    Department::Sales,
    Department::Hr,
    Department::It,
    Department::Finance,
    Department::Marketing,
];
pub const REGIONS: [&str; 4] = ["North", "South", "East", "West"];
pub const GENDERS: [&str; 2] = ["Male", "Female"];

/// Fixed department vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    Sales,
    #[serde(rename = "HR")]
    Hr,
    #[serde(rename = "IT")]
    It,
    Finance,
    Marketing,
}

impl Department {
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Sales => "Sales",
            Department::Hr => "HR",
            Department::It => "IT",
            Department::Finance => "Finance",
            Department::Marketing => "Marketing",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        DEPARTMENTS
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown department '{}'", wanted))
    }
}

/// Salary bucket label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SalaryCategory {
    Low,
    Medium,
    High,
}

impl SalaryCategory {
    /// Bucket a salary: `[30000,50000)` Low, `[50000,100000)` Medium,
    /// `[100000,120000]` High, anything else unlabeled.
    pub fn for_salary(salary: f64) -> Option<Self> {
        if (30_000.0..50_000.0).contains(&salary) {
            Some(SalaryCategory::Low)
        } else if (50_000.0..100_000.0).contains(&salary) {
            Some(SalaryCategory::Medium)
        } else if (100_000.0..=120_000.0).contains(&salary) {
            Some(SalaryCategory::High)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SalaryCategory::Low => "Low",
            SalaryCategory::Medium => "Medium",
            SalaryCategory::High => "High",
        }
    }
}

impl fmt::Display for SalaryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric columns that may carry nulls before imputation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericColumn {
    Age,
    Salary,
    PerformanceScore,
    Sales,
}

impl NumericColumn {
    pub const ALL: [NumericColumn; 4] = [
        NumericColumn::Age,
        NumericColumn::Salary,
        NumericColumn::PerformanceScore,
        NumericColumn::Sales,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            NumericColumn::Age => constants::AGE,
            NumericColumn::Salary => constants::SALARY,
            NumericColumn::PerformanceScore => constants::PERFORMANCE_SCORE,
            NumericColumn::Sales => constants::SALES,
        }
    }

    pub fn get(&self, record: &EmployeeRecord) -> Option<f64> {
        match self {
            NumericColumn::Age => record.age,
            NumericColumn::Salary => record.salary,
            NumericColumn::PerformanceScore => record.performance_score,
            NumericColumn::Sales => record.sales,
        }
    }

    pub fn get_mut<'a>(&self, record: &'a mut EmployeeRecord) -> &'a mut Option<f64> {
        match self {
            NumericColumn::Age => &mut record.age,
            NumericColumn::Salary => &mut record.salary,
            NumericColumn::PerformanceScore => &mut record.performance_score,
            NumericColumn::Sales => &mut record.sales,
        }
    }
}

/// One employee observation as generated or loaded, before type normalization.
///
/// The derived fields are filled in by the cleaning pipeline and are not part
/// of the raw CSV layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    #[serde(rename = "EmployeeID")]
    pub employee_id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Department")]
    pub department: String,
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Age", deserialize_with = "nullable_number::deserialize")]
    pub age: Option<f64>,
    #[serde(rename = "Salary", deserialize_with = "nullable_number::deserialize")]
    pub salary: Option<f64>,
    #[serde(rename = "JoiningDate")]
    pub joining_date: NaiveDate,
    #[serde(rename = "PerformanceScore", deserialize_with = "nullable_number::deserialize")]
    pub performance_score: Option<f64>,
    #[serde(rename = "Sales", deserialize_with = "nullable_number::deserialize")]
    pub sales: Option<f64>,
    #[serde(skip)]
    pub salary_per_tenure_year: Option<f64>,
    #[serde(skip)]
    pub salary_category: Option<SalaryCategory>,
}

/// Ordered sequence of records sharing one schema
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub records: Vec<EmployeeRecord>,
}

impl Table {
    pub fn new(records: Vec<EmployeeRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn column(&self, column: NumericColumn) -> Vec<Option<f64>> {
        self.records.iter().map(|r| column.get(r)).collect()
    }

    pub fn null_count(&self, column: NumericColumn) -> usize {
        self.records
            .iter()
            .filter(|r| column.get(r).is_none())
            .count()
    }
}

/// A record after type normalization and outlier flagging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedRecord {
    #[serde(rename = "EmployeeID")]
    pub employee_id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Department")]
    pub department: Department,
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Age", deserialize_with = "nullable_number::deserialize")]
    pub age: Option<f64>,
    #[serde(rename = "Salary", deserialize_with = "nullable_number::deserialize")]
    pub salary: Option<f64>,
    #[serde(rename = "JoiningDate")]
    pub joining_date: NaiveDate,
    #[serde(rename = "PerformanceScore", deserialize_with = "nullable_number::deserialize")]
    pub performance_score: Option<f64>,
    #[serde(rename = "Sales", deserialize_with = "nullable_number::deserialize")]
    pub sales: Option<f64>,
    #[serde(rename = "Salary_per_year_experience", deserialize_with = "nullable_number::deserialize")]
    pub salary_per_tenure_year: Option<f64>,
    #[serde(rename = "Category_salary")]
    pub salary_category: Option<SalaryCategory>,
    #[serde(rename = "is_outlier", with = "title_case_bool")]
    pub is_outlier: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanedTable {
    pub records: Vec<CleanedRecord>,
}

impl CleanedTable {
    pub fn new(records: Vec<CleanedRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn outlier_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_outlier).count()
    }
}

/// Writes booleans as `True`/`False` and accepts either case when reading.
mod title_case_bool {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "True" } else { "False" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(de::Error::custom(format!("invalid boolean '{}'", other))),
        }
    }
}

/// Reads a numeric cell, treating empty cells and `NaN` markers as null.
mod nullable_number {
    use serde::{de, Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        let raw = match Option::<String>::deserialize(deserializer)? {
            Some(raw) => raw,
            None => return Ok(None),
        };
        let cell = raw.trim();
        if cell.is_empty() || cell.eq_ignore_ascii_case("nan") {
            return Ok(None);
        }
        match cell.parse::<f64>() {
            Ok(value) if value.is_nan() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(_) => Err(de::Error::custom(format!("invalid number '{}'", cell))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_department_parsing_is_case_insensitive() {
        assert_eq!("hr".parse::<Department>().unwrap(), Department::Hr);
        assert_eq!(" Marketing ".parse::<Department>().unwrap(), Department::Marketing);
        assert!("Legal".parse::<Department>().is_err());
    }

    #[test]
    fn test_salary_category_boundaries() {
        assert_eq!(SalaryCategory::for_salary(29_999.0), None);
        assert_eq!(SalaryCategory::for_salary(30_000.0), Some(SalaryCategory::Low));
        assert_eq!(SalaryCategory::for_salary(49_999.99), Some(SalaryCategory::Low));
        assert_eq!(SalaryCategory::for_salary(50_000.0), Some(SalaryCategory::Medium));
        assert_eq!(SalaryCategory::for_salary(100_000.0), Some(SalaryCategory::High));
        assert_eq!(SalaryCategory::for_salary(120_000.0), Some(SalaryCategory::High));
        assert_eq!(SalaryCategory::for_salary(120_000.5), None);
        assert_eq!(SalaryCategory::for_salary(f64::NAN), None);
    }
}
