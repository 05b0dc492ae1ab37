//! Status command implementation
//!
//! This module implements the `status` command for listing emitted
//! artifacts and the number of reports already emitted.

use crate::adapters::factory::create_output_store;
use crate::config::load_config;
use crate::core::state::ExistingReportRegistry;
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug, Default)]
pub struct StatusArgs {
    /// Show only the last N artifacts by name
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking output status");

        println!("📊 Output Status");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let store = match create_output_store(&config) {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to open output store");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let prefix = config.output.prefix.as_str();
        let artifacts = match store.list_artifacts(prefix).await {
            Ok(a) => a,
            Err(e) => {
                println!("❌ Failed to list artifacts");
                println!("   Error: {e}");
                return Ok(5);
            }
        };

        if artifacts.is_empty() {
            println!("No artifacts found under {}/{prefix}.", config.output.root);
            println!("Run 'vigil run' to correlate and emit reports.");
            return Ok(0);
        }

        let registry = match ExistingReportRegistry::load(store.as_ref(), prefix).await {
            Ok(r) => r,
            Err(e) => {
                println!("❌ Failed to read artifacts");
                println!("   Error: {e}");
                return Ok(5);
            }
        };

        let shown = self.limit.unwrap_or(artifacts.len()).min(artifacts.len());
        println!(
            "Found {} artifact(s), {} report(s) emitted:",
            artifacts.len(),
            registry.len()
        );
        println!();
        for name in artifacts.iter().rev().take(shown) {
            println!("  {name}");
        }
        if shown < artifacts.len() {
            println!("  ... and {} more", artifacts.len() - shown);
        }

        println!();
        Ok(0)
    }
}
