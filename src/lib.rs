// Vigil - Adverse Drug Reaction Report Correlation
// Copyright (c) 2025 Vigil Contributors
// Licensed under the MIT License

//! # Vigil - Adverse Drug Reaction Report Correlation
//!
//! Vigil correlates adverse drug reaction reports from a set of `$`-delimited
//! extract files into one JSON record per report, restricted to reports that
//! mention a drug of interest and emitted once across repeated runs.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Matching** drug rows against a target drug list (substring, case-insensitive)
//! - **Selecting** the report universe, dropping manufacturer-sourced reports
//! - **Correlating** master, drug, reaction and link rows per report into
//!   index-aligned drug and reaction slots
//! - **Aligning** indications to drug slots by drug name
//! - **Deduplicating** against the report numbers of earlier artifacts
//!
//! ## Architecture
//!
//! Vigil follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (matching, correlation, state, transform, export)
//! - [`adapters`] - External integrations (extract sources, output store, notifier)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vigil::config::load_config;
//! use vigil::core::export::ExportCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("vigil.toml")?;
//!
//!     let coordinator = ExportCoordinator::from_config(config)?;
//!     let summary = coordinator.execute_export().await?;
//!
//!     println!("Emitted {} reports", summary.emitted_reports);
//!     Ok(())
//! }
//! ```
//!
//! ## Correlating Without I/O
//!
//! The engine itself is synchronous and works on parsed rows:
//!
//! ```rust
//! use vigil::config::LayoutConfig;
//! use vigil::core::correlate::Correlator;
//! use vigil::core::matching::{DrugMatcher, ReportSelector};
//! use vigil::domain::{ExtractRow, ExtractSet, TargetDrugSet};
//!
//! let layout = LayoutConfig::default();
//! let mut drug_fields = vec![""; 21];
//! drug_fields[1] = "42";
//! drug_fields[3] = "TYLENOL EXTRA STRENGTH";
//! let extracts = ExtractSet {
//!     drug: vec![ExtractRow::parse(&drug_fields.join("$"))],
//!     ..Default::default()
//! };
//!
//! let matcher = DrugMatcher::new(TargetDrugSet::from_lines(&["tylenol"]), layout.drug.clone());
//! let outcome = matcher.match_rows(&extracts.drug);
//!
//! let selection = ReportSelector::without_source_filter(layout.master.clone())
//!     .select(outcome.report_ids(), &extracts.master);
//! let correlation = Correlator::new(layout).correlate(&selection.universe, &extracts);
//!
//! let report = correlation.reports.values().next().unwrap();
//! assert_eq!(report.drug_names(), vec!["TYLENOL EXTRA STRENGTH"]);
//! ```
//!
//! ## Error Handling
//!
//! Vigil uses the [`domain::VigilError`] type for all errors:
//!
//! ```rust,no_run
//! use vigil::domain::VigilError;
//!
//! fn example() -> Result<(), VigilError> {
//!     let config = vigil::config::load_config("vigil.toml")?;
//!     println!("{}", config.source.root);
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Vigil uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(report_count = 12, "Correlation complete");
//! warn!(file = "reactions.txt", "Extract missing, continuing with an empty dataset");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
