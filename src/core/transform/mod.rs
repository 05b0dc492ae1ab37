//! Output transformation
//!
//! Converts correlated reports into their emitted JSON form:
//!
//! - [`convert`] - date, yes/no and value+unit conversions
//! - [`output`] - the [`OutputRecord`] schema, artifact rendering and naming

pub mod convert;
pub mod output;

pub use convert::{convert_date, convert_yes_no, join_value_unit};
pub use output::{artifact_name, render_artifact, OutputRecord};

use crate::domain::CorrelatedReport;

/// Transforms reports into output records, preserving input order
pub fn to_output_records<'a, I>(reports: I) -> Vec<OutputRecord>
where
    I: IntoIterator<Item = &'a CorrelatedReport>,
{
    reports.into_iter().map(OutputRecord::from_report).collect()
}
