//! Domain models and types for Vigil.
//!
//! This module contains the types every stage of a run passes around: raw
//! extract rows, report identifiers, the correlated report model, the target
//! drug set, and the error hierarchy.
//!
//! # Overview
//!
//! - **Identifiers** ([`ReportId`], [`ReportNumberKey`])
//! - **Extract rows** ([`ExtractRow`], [`ExtractKind`])
//! - **Report model** ([`CorrelatedReport`], [`DrugSlot`], [`ReactionSlot`])
//! - **Targets** ([`TargetDrugSet`], [`MissingDrugSet`])
//! - **Errors** ([`VigilError`], [`SourceError`], [`OutputError`]) and [`Result`]
//!
//! # Type Safety
//!
//! The report id joins rows inside one snapshot, the report number is what
//! identifies a report across snapshots. They are distinct types so one can't
//! be used where the other is expected:
//!
//! ```rust
//! use vigil::domain::{ReportId, ReportNumberKey};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let id = ReportId::new("000042")?;
//! let number = ReportNumberKey::normalize("E2B-0042");
//! assert_ne!(id.as_str(), number.as_str());
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod extract;
pub mod ids;
pub mod report;
pub mod result;
pub mod targets;

pub use errors::{OutputError, SourceError, VigilError};
pub use extract::{clean_field, normalize_name, ExtractKind, ExtractRow, ExtractSet};
pub use ids::{ReportId, ReportNumberKey};
pub use report::{CorrelatedReport, DrugSlot, Linkage, ReactionSlot, ReportScalars};
pub use result::Result;
pub use targets::{MissingDrugSet, TargetDrugSet};
