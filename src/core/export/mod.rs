//! Run orchestration
//!
//! This module provides the top-level pipeline for Vigil:
//! - [`ExportCoordinator`] wires the collaborators and runs every stage
//! - [`ExportSummary`] reports counts and categorised errors for one run

pub mod coordinator;
pub mod summary;

pub use coordinator::ExportCoordinator;
pub use summary::{ExportError, ExportErrorType, ExportSummary};
