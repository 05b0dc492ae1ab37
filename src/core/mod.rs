//! Core business logic for Vigil.
//!
//! This module contains the correlation engine and the orchestration around it.
//!
//! # Modules
//!
//! - [`matching`] - Drug Matcher and Report Selector
//! - [`correlate`] - Correlator and Indication Aligner
//! - [`state`] - Registry of emitted reports and the Deduplicator
//! - [`transform`] - Output records, value conversions, artifact rendering
//! - [`export`] - Run orchestration and summary
//!
//! # Run Workflow
//!
//! 1. **Fetch**: Read the five extracts and the target drug list, and the
//!    report numbers of earlier artifacts
//! 2. **Match**: Find report ids whose drug rows name a target drug
//! 3. **Select**: Drop manufacturer-sourced reports
//! 4. **Correlate**: Join master, drug, reaction, link and indication rows
//!    per report
//! 5. **Deduplicate**: Drop reports emitted by earlier runs
//! 6. **Emit**: Write the new reports as one JSON artifact
//!
//! # Example
//!
//! ```rust,no_run
//! use vigil::config::load_config;
//! use vigil::core::export::ExportCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("vigil.toml")?;
//! let coordinator = ExportCoordinator::from_config(config)?;
//!
//! let summary = coordinator.execute_export().await?;
//!
//! println!("Correlated: {}", summary.correlated_reports);
//! println!("Emitted: {}", summary.emitted_reports);
//! println!("Duplicates: {}", summary.duplicates_skipped);
//! # Ok(())
//! # }
//! ```

pub mod correlate;
pub mod export;
pub mod matching;
pub mod state;
pub mod transform;
