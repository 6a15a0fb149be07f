//! The individual cleaning steps, in the order the pipeline applies them.

pub mod categorize;
pub mod dedup;
pub mod derive;
pub mod impute;
pub mod normalize;
pub mod outliers;

pub use categorize::SalaryCategorizer;
pub use dedup::Deduplicator;
pub use derive::TenureSalaryDeriver;
pub use impute::NullImputer;
pub use normalize::TypeNormalizer;
pub use outliers::OutlierFlagger;

use crate::domain::Table;
use crate::error::Result;
use crate::pipeline::StepReport;

/// A step that mutates the raw table in place
pub trait CleaningStep {
    fn name(&self) -> &'static str;

    fn apply(&self, table: &mut Table) -> Result<StepReport>;
}
