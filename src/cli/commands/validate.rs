//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Vigil configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates as part of loading
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!("  Source: {:?} {}", config.source.kind, config.source.root);
        println!("  Drug List: {}", config.source.files.drug_list);
        println!(
            "  Output: {}/{}/{}_*.json",
            config.output.root, config.output.prefix, config.output.file_stem
        );
        println!(
            "  Source Filter: {}",
            if config.selection.exclude_mah_sourced {
                format!("exclude '{}'", config.selection.mah_marker)
            } else {
                "disabled".to_string()
            }
        );
        println!(
            "  Row Widths: master {}, drug {}, reaction {}, link {}, indication {}",
            config.layout.master.required_fields(),
            config.layout.drug.required_fields(),
            config.layout.reaction.required_fields(),
            config.layout.link.required_fields(),
            config.layout.indication.required_fields()
        );
        println!("  Notification: {:?}", config.notification.kind);
        if let Some(url) = &config.notification.webhook_url {
            println!("  Webhook: {url}");
        }
        println!();
        Ok(0)
    }
}
