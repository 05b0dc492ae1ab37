//! Run command implementation
//!
//! This module implements the `run` command, which executes one full
//! correlation run and writes new reports to the output store.

use crate::config::load_config;
use crate::core::export::ExportCoordinator;
use clap::Args;

/// Arguments for the run command
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Dry run mode - run every stage but write nothing and send no notification
    #[arg(long)]
    pub dry_run: bool,

    /// Keep manufacturer-sourced reports
    #[arg(long)]
    pub no_source_filter: bool,

    /// Override the target drug list file key
    #[arg(long, value_name = "KEY")]
    pub drug_list: Option<String>,
}

impl RunArgs {
    /// Execute the run command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting run command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }

        if self.no_source_filter {
            tracing::info!("Disabling source filter from CLI");
            config.selection.exclude_mah_sourced = false;
        }

        if let Some(key) = &self.drug_list {
            tracing::info!(drug_list = %key, "Overriding drug list from CLI");
            config.source.files.drug_list = key.clone();
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        if config.application.dry_run {
            println!("🔍 DRY RUN MODE - No artifact will be written, no notification sent");
            println!();
        }

        let coordinator = match ExportCoordinator::from_config(config) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create coordinator");
                eprintln!("Failed to initialize run: {e}");
                return Ok(2);
            }
        };

        println!("🚀 Starting run...");
        println!();

        let summary = match coordinator.execute_export().await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Run failed");
                eprintln!("Run failed: {e}");
                return Ok(5);
            }
        };

        println!("📊 Run Summary ({})", summary.run_id);
        println!("  Target Drugs: {}", summary.target_drugs);
        println!("  Matched Reports: {}", summary.matched_reports);
        println!("  Excluded by Source: {}", summary.excluded_by_source);
        println!("  Correlated Reports: {}", summary.correlated_reports);
        println!("  Duplicates Skipped: {}", summary.duplicates_skipped);
        println!("  Emitted Reports: {}", summary.emitted_reports);
        println!(
            "  Artifact: {}",
            summary.artifact.as_deref().unwrap_or("none")
        );
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!();

        if !summary.missing_drugs.is_empty() {
            println!("🔎 Drugs not found in the report data:");
            for name in &summary.missing_drugs {
                println!("  - {name}");
            }
            println!();
        }

        if !summary.errors.is_empty() {
            println!("⚠️  Errors encountered:");
            for error in &summary.errors {
                println!("  - {:?}: {}", error.error_type, error.message);
                if let Some(context) = &error.context {
                    println!("    Context: {context}");
                }
            }
            println!();
        }

        let exit_code = if summary.is_successful() {
            println!("✅ Run completed successfully!");
            0
        } else {
            println!("⚠️  Run completed with errors");
            1
        };

        Ok(exit_code)
    }
}
