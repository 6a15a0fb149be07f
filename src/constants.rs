/// Column names used in the CSV files, in output order.
pub const EMPLOYEE_ID: &str = "EmployeeID";
pub const NAME: &str = "Name";
pub const DEPARTMENT: &str = "Department";
pub const REGION: &str = "Region";
pub const GENDER: &str = "Gender";
pub const AGE: &str = "Age";
pub const SALARY: &str = "Salary";
pub const JOINING_DATE: &str = "JoiningDate";
pub const PERFORMANCE_SCORE: &str = "PerformanceScore";
pub const SALES: &str = "Sales";

// Derived columns
pub const SALARY_PER_YEAR: &str = "Salary_per_year_experience";
pub const SALARY_CATEGORY: &str = "Category_salary";
pub const IS_OUTLIER: &str = "is_outlier";

/// Year tenure is measured against.
pub const REFERENCE_YEAR: i32 = 2025;

/// Tukey fence multiplier.
pub const IQR_MULTIPLIER: f64 = 1.5;

pub const DEFAULT_OUTPUT_PATH: &str = "Cleaned_employee_dataset.csv";

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Columns a raw dataset must carry
pub fn raw_columns() -> Vec<&'static str> {
    vec![
        EMPLOYEE_ID,
        NAME,
        DEPARTMENT,
        REGION,
        GENDER,
        AGE,
        SALARY,
        JOINING_DATE,
        PERFORMANCE_SCORE,
        SALES,
    ]
}

/// Columns of the cleaned output, raw columns first
pub fn cleaned_columns() -> Vec<&'static str> {
    let mut cols = raw_columns();
    cols.extend([SALARY_PER_YEAR, SALARY_CATEGORY, IS_OUTLIER]);
    cols
}
