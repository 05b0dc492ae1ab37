//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{NotificationKind, SourceKind, VigilConfig};
use crate::config::secret_string;
use crate::domain::errors::VigilError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into VigilConfig
/// 4. Applies environment variable overrides (VIGIL_* prefix)
/// 5. Validates the configuration
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use vigil::config::loader::load_config;
///
/// let config = load_config("vigil.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<VigilConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(VigilError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        VigilError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses and validates configuration from TOML text
///
/// Same pipeline as [`load_config`] minus the file read.
///
/// # Errors
///
/// Returns an error if substitution, parsing, or validation fails
pub fn parse_config(contents: &str) -> Result<VigilConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: VigilConfig = toml::from_str(&contents)
        .map_err(|e| VigilError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        VigilError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| VigilError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    caps[0].to_string()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(VigilError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    value.trim().parse().map_err(|_| {
        VigilError::Configuration(format!("{name} must be 'true' or 'false', got '{value}'"))
    })
}

fn parse_u64(name: &str, value: &str) -> Result<u64> {
    value.trim().parse().map_err(|_| {
        VigilError::Configuration(format!("{name} must be a positive integer, got '{value}'"))
    })
}

/// Applies environment variable overrides using the VIGIL_* prefix
///
/// Environment variables follow the pattern: VIGIL_<SECTION>_<KEY>
/// For example: VIGIL_SOURCE_ROOT, VIGIL_NOTIFICATION_WEBHOOK_TOKEN
fn apply_env_overrides(config: &mut VigilConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("VIGIL_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("VIGIL_APPLICATION_DRY_RUN") {
        config.application.dry_run = parse_bool("VIGIL_APPLICATION_DRY_RUN", &val)?;
    }

    // Source overrides
    if let Ok(val) = std::env::var("VIGIL_SOURCE_KIND") {
        config.source.kind = match val.trim().to_lowercase().as_str() {
            "filesystem" => SourceKind::Filesystem,
            "http" => SourceKind::Http,
            other => {
                return Err(VigilError::Configuration(format!(
                    "VIGIL_SOURCE_KIND must be 'filesystem' or 'http', got '{other}'"
                )))
            }
        };
    }
    if let Ok(val) = std::env::var("VIGIL_SOURCE_ROOT") {
        config.source.root = val;
    }
    if let Ok(val) = std::env::var("VIGIL_SOURCE_TIMEOUT_SECONDS") {
        config.source.timeout_seconds = parse_u64("VIGIL_SOURCE_TIMEOUT_SECONDS", &val)?;
    }
    if let Ok(val) = std::env::var("VIGIL_SOURCE_FILES_DRUG_LIST") {
        config.source.files.drug_list = val;
    }

    // Output overrides
    if let Ok(val) = std::env::var("VIGIL_OUTPUT_ROOT") {
        config.output.root = val;
    }
    if let Ok(val) = std::env::var("VIGIL_OUTPUT_PREFIX") {
        config.output.prefix = val;
    }

    // Selection overrides
    if let Ok(val) = std::env::var("VIGIL_SELECTION_EXCLUDE_MAH_SOURCED") {
        config.selection.exclude_mah_sourced =
            parse_bool("VIGIL_SELECTION_EXCLUDE_MAH_SOURCED", &val)?;
    }

    // Notification overrides
    if let Ok(val) = std::env::var("VIGIL_NOTIFICATION_KIND") {
        config.notification.kind = match val.trim().to_lowercase().as_str() {
            "log" => NotificationKind::Log,
            "webhook" => NotificationKind::Webhook,
            "disabled" => NotificationKind::Disabled,
            other => {
                return Err(VigilError::Configuration(format!(
                    "VIGIL_NOTIFICATION_KIND must be 'log', 'webhook' or 'disabled', got '{other}'"
                )))
            }
        };
    }
    if let Ok(val) = std::env::var("VIGIL_NOTIFICATION_WEBHOOK_URL") {
        config.notification.webhook_url = Some(val);
    }
    if let Ok(val) = std::env::var("VIGIL_NOTIFICATION_WEBHOOK_TOKEN") {
        config.notification.webhook_token = Some(secret_string(val));
    }

    // Logging overrides
    if let Ok(val) = std::env::var("VIGIL_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_bool("VIGIL_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("VIGIL_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
