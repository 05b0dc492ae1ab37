//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "vigil.toml")]
    pub output: String,

    /// Include the full layout table and explanatory comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Vigil configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Point [source] root at the directory or URL holding the extracts");
                println!("  2. Put the target drug names in drug_names.txt, one per line");
                println!("  3. Validate configuration: vigil validate-config");
                println!("  4. Try a dry run: vigil run --dry-run");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Vigil Configuration File
# Adverse drug reaction report correlation

[application]
log_level = "info"
dry_run = false

[source]
kind = "filesystem"  # filesystem | http
root = "./data"

[output]
root = "./output"
prefix = "report_output"
file_stem = "reported_adverse_reaction"

[selection]
exclude_mah_sourced = true

[notification]
kind = "log"  # log | webhook | disabled

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Vigil Configuration File
# Adverse drug reaction report correlation
#
# Every value below is the default unless noted. Any `${VAR}` reference is
# replaced with the environment variable of that name when the file is loaded,
# and VIGIL_<SECTION>_<KEY> environment variables override file values
# (e.g. VIGIL_SOURCE_ROOT, VIGIL_APPLICATION_DRY_RUN).

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# Dry run mode (run every stage, write nothing, send no notification)
dry_run = false

# ============================================================================
# Extract Source
# ============================================================================
[source]
# Where the extract files live: a local directory or an HTTP(S) base URL
kind = "filesystem"  # filesystem | http
root = "./data"

# Per-request timeout for the http source
timeout_seconds = 60

# File keys, relative to root. Fields are '$'-delimited, one row per line.
[source.files]
master = "reports.txt"
drug = "report_drug.txt"
reaction = "reactions.txt"
link = "report_links.txt"
indication = "report_drug_indication.txt"
# Target drug names, one per line
drug_list = "drug_names.txt"

# ============================================================================
# Output
# ============================================================================
[output]
# Artifacts are written as <root>/<prefix>/<file_stem>_<DD_Mon_YYYY_HH_MM_SS>.json.
# Every artifact under the prefix is read back at startup so reports are
# only ever emitted once.
root = "./output"
prefix = "report_output"
file_stem = "reported_adverse_reaction"

# ============================================================================
# Report Selection
# ============================================================================
[selection]
# Drop reports whose source field mentions the marker (manufacturer reports)
exclude_mah_sourced = true
mah_marker = "mah"

# ============================================================================
# Column Layout
# ============================================================================
# Zero-based field positions per extract. Adjust when the extract format
# changes; a row shorter than max(position) + 1 fields is skipped.
[layout.master]
report_id = 0
report_no = 1
version_no = 2
dat_received = 3
dat_int_received = 4
mah_no = 5
report_type = 7
gender = 10
age = 12
age_unit = 14
outcome = 17
weight = 19
weight_unit = 20
height = 22
height_unit = 23
seriousness = 26
death = 28
disability = 29
congenital_anomaly = 30
life_threatening = 31
hospitalization = 32
other_medically_important = 33
reporter_type = 34
source = 37

[layout.drug]
report_id = 1
drug_name = 3
involvement = 4
route = 6
dose_quantity = 8
dose_unit = 9
frequency_unit = 15
therapy_duration = 17
therapy_duration_unit = 18
dosage_form = 20

[layout.reaction]
report_id = 1
duration = 2
duration_unit = 3
term = 5
coding_version = 9

[layout.link]
report_id = 1
record_type = 2
linked_report_no = 4

[layout.indication]
report_id = 1
drug_name = 3
indication = 4

# ============================================================================
# Notification
# ============================================================================
[notification]
# Where the missing-drug notice goes
kind = "log"  # log | webhook | disabled
subject = "Missing Drug Names Notification"
timeout_seconds = 30

# Required when kind = "webhook"
# webhook_url = "https://hooks.example.com/vigil"
# webhook_token = "${VIGIL_WEBHOOK_TOKEN}"

# ============================================================================
# Logging
# ============================================================================
[logging]
# JSON log files in addition to the console
local_enabled = false
local_path = "./logs"
local_rotation = "daily"  # daily | hourly | never
"#
        .to_string()
    }
}
