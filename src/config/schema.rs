//! Configuration schema types
//!
//! This module defines the configuration structure for Vigil.

use crate::config::layout::LayoutConfig;
use crate::config::SecretString;
use crate::domain::extract::ExtractKind;
use serde::{Deserialize, Serialize};
use url::Url;

/// Where the extract files are read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Local directory
    #[default]
    Filesystem,
    /// HTTP(S) base URL, each file fetched with GET
    Http,
}

/// How missing-drug notifications are delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Write the message to the log at warn level
    #[default]
    Log,
    /// POST the message as JSON to a webhook
    Webhook,
    /// Drop notifications
    Disabled,
}

/// Main Vigil configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VigilConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Extract source
    pub source: SourceConfig,

    /// Output artifact location and naming
    #[serde(default)]
    pub output: OutputConfig,

    /// Report selection options
    #[serde(default)]
    pub selection: SelectionConfig,

    /// Column positions per extract
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Missing-drug notification delivery
    #[serde(default)]
    pub notification: NotificationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl VigilConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.source.validate()?;
        self.output.validate()?;
        self.selection.validate()?;
        self.layout.validate()?;
        self.notification.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (correlate but write nothing, notify nobody)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Extract source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Source type
    #[serde(default)]
    pub kind: SourceKind,

    /// Directory (filesystem) or base URL (http) holding the files
    pub root: String,

    /// Per-file fetch timeout in seconds (http only)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// File names relative to the root
    #[serde(default)]
    pub files: ExtractFiles,
}

impl SourceConfig {
    fn validate(&self) -> Result<(), String> {
        if self.root.trim().is_empty() {
            return Err("source.root cannot be empty".to_string());
        }

        if self.kind == SourceKind::Http {
            let url = Url::parse(&self.root)
                .map_err(|e| format!("source.root is not a valid URL: {e}"))?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err("source.root must start with http:// or https://".to_string());
            }
        }

        if self.timeout_seconds == 0 {
            return Err("source.timeout_seconds must be > 0".to_string());
        }

        self.files.validate()
    }
}

/// File name for each extract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractFiles {
    pub master: String,
    pub drug: String,
    pub reaction: String,
    pub link: String,
    pub indication: String,
    pub drug_list: String,
}

impl ExtractFiles {
    /// File name configured for `kind`
    pub fn key_for(&self, kind: ExtractKind) -> &str {
        match kind {
            ExtractKind::Master => &self.master,
            ExtractKind::Drug => &self.drug,
            ExtractKind::Reaction => &self.reaction,
            ExtractKind::Link => &self.link,
            ExtractKind::Indication => &self.indication,
            ExtractKind::DrugList => &self.drug_list,
        }
    }

    fn validate(&self) -> Result<(), String> {
        for kind in ExtractKind::ALL {
            if self.key_for(kind).trim().is_empty() {
                return Err(format!("source.files.{kind} cannot be empty"));
            }
        }
        Ok(())
    }
}

impl Default for ExtractFiles {
    fn default() -> Self {
        Self {
            master: "reports.txt".to_string(),
            drug: "report_drug.txt".to_string(),
            reaction: "reactions.txt".to_string(),
            link: "report_links.txt".to_string(),
            indication: "report_drug_indication.txt".to_string(),
            drug_list: "drug_names.txt".to_string(),
        }
    }
}

/// Output artifact configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory artifacts are written under
    #[serde(default = "default_output_root")]
    pub root: String,

    /// Sub-path holding every emitted artifact; also scanned for the registry
    #[serde(default = "default_output_prefix")]
    pub prefix: String,

    /// Artifact file name stem, a timestamp is appended
    #[serde(default = "default_file_stem")]
    pub file_stem: String,
}

impl OutputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.root.trim().is_empty() {
            return Err("output.root cannot be empty".to_string());
        }
        if self.prefix.trim().is_empty() {
            return Err("output.prefix cannot be empty".to_string());
        }
        if self.file_stem.trim().is_empty() || self.file_stem.contains('/') {
            return Err("output.file_stem must be a non-empty file name".to_string());
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: default_output_root(),
            prefix: default_output_prefix(),
            file_stem: default_file_stem(),
        }
    }
}

/// Report selection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Drop reports whose source field marks them as manufacturer-sourced
    #[serde(default = "default_true")]
    pub exclude_mah_sourced: bool,

    /// Case-insensitive marker searched for in the source field
    #[serde(default = "default_mah_marker")]
    pub mah_marker: String,
}

impl SelectionConfig {
    fn validate(&self) -> Result<(), String> {
        if self.exclude_mah_sourced && self.mah_marker.trim().is_empty() {
            return Err(
                "selection.mah_marker cannot be empty when exclude_mah_sourced is enabled"
                    .to_string(),
            );
        }
        Ok(())
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            exclude_mah_sourced: true,
            mah_marker: default_mah_marker(),
        }
    }
}

/// Notification configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Delivery channel
    #[serde(default)]
    pub kind: NotificationKind,

    /// Webhook endpoint (required when kind = "webhook")
    #[serde(default)]
    pub webhook_url: Option<String>,

    /// Optional bearer token sent to the webhook
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub webhook_token: Option<SecretString>,

    /// Message subject
    #[serde(default = "default_subject")]
    pub subject: String,

    /// Webhook request timeout in seconds
    #[serde(default = "default_notification_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl NotificationConfig {
    fn validate(&self) -> Result<(), String> {
        if self.kind == NotificationKind::Webhook {
            let raw = self
                .webhook_url
                .as_deref()
                .filter(|u| !u.trim().is_empty())
                .ok_or_else(|| {
                    "notification.webhook_url is required when kind is 'webhook'".to_string()
                })?;
            let url = Url::parse(raw)
                .map_err(|e| format!("notification.webhook_url is not a valid URL: {e}"))?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(
                    "notification.webhook_url must start with http:// or https://".to_string(),
                );
            }
        }

        if self.timeout_seconds == 0 {
            return Err("notification.timeout_seconds must be > 0".to_string());
        }
        Ok(())
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            kind: NotificationKind::default(),
            webhook_url: None,
            webhook_token: None,
            subject: default_subject(),
            timeout_seconds: default_notification_timeout_seconds(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_output_root() -> String {
    "./output".to_string()
}

fn default_output_prefix() -> String {
    "report_output".to_string()
}

fn default_file_stem() -> String {
    "reported_adverse_reaction".to_string()
}

fn default_mah_marker() -> String {
    "mah".to_string()
}

fn default_subject() -> String {
    "Missing Drug Names Notification".to_string()
}

fn default_notification_timeout_seconds() -> u64 {
    30
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn source(kind: SourceKind, root: &str) -> SourceConfig {
        SourceConfig {
            kind,
            root: root.to_string(),
            timeout_seconds: 60,
            files: ExtractFiles::default(),
        }
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_source_config_validation() {
        assert!(source(SourceKind::Filesystem, "/data/extracts").validate().is_ok());
        assert!(source(SourceKind::Filesystem, "  ").validate().is_err());
        assert!(source(SourceKind::Http, "https://files.example.com/cvp/")
            .validate()
            .is_ok());
        assert!(source(SourceKind::Http, "not a url").validate().is_err());
        assert!(source(SourceKind::Http, "ftp://files.example.com")
            .validate()
            .is_err());

        let mut config = source(SourceKind::Filesystem, "/data");
        config.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_extract_files_validation() {
        let mut config = source(SourceKind::Filesystem, "/data");
        config.files.link = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.contains("source.files.link"));
    }

    #[test]
    fn test_extract_files_key_for() {
        let files = ExtractFiles::default();
        assert_eq!(files.key_for(ExtractKind::Master), "reports.txt");
        assert_eq!(
            files.key_for(ExtractKind::Indication),
            "report_drug_indication.txt"
        );
        assert_eq!(files.key_for(ExtractKind::DrugList), "drug_names.txt");
    }

    #[test]
    fn test_output_config_validation() {
        let mut config = OutputConfig::default();
        assert!(config.validate().is_ok());

        config.file_stem = "a/b".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_selection_config_validation() {
        let mut config = SelectionConfig::default();
        assert!(config.exclude_mah_sourced);
        assert_eq!(config.mah_marker, "mah");

        config.mah_marker = String::new();
        assert!(config.validate().is_err());

        config.exclude_mah_sourced = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_notification_webhook_requires_url() {
        let mut config = NotificationConfig {
            kind: NotificationKind::Webhook,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.webhook_url = Some("https://hooks.example.com/vigil".to_string());
        config.webhook_token = Some(secret_string("token".to_string()));
        assert!(config.validate().is_ok());

        config.webhook_url = Some("::bad::".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert!(!config.local_enabled);
        assert_eq!(config.local_rotation, "daily");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_logging_config_rejects_unknown_rotation() {
        let config = LoggingConfig {
            local_rotation: "size".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_log_level(), "info");
        assert_eq!(default_output_prefix(), "report_output");
        assert_eq!(default_file_stem(), "reported_adverse_reaction");
        assert_eq!(default_subject(), "Missing Drug Names Notification");
    }
}
