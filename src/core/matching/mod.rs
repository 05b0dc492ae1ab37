//! Drug matching and report selection
//!
//! The first two stages of a run: find the reports that mention a drug of
//! interest, then narrow them to the report id universe.

pub mod matcher;
pub mod selector;

pub use matcher::{DrugMatcher, MatchOutcome};
pub use selector::{ReportSelector, Selection};
