//! Integration tests for configuration loading and validation
//!
//! Tests that touch environment variables hold `ENV_MUTEX` so they don't
//! interfere with each other.

use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;
use vigil::config::{load_config, NotificationKind, SourceKind};

static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn cleanup_env_vars() {
    for var in [
        "VIGIL_APPLICATION_LOG_LEVEL",
        "VIGIL_APPLICATION_DRY_RUN",
        "VIGIL_SOURCE_ROOT",
        "VIGIL_SOURCE_FILES_DRUG_LIST",
        "VIGIL_OUTPUT_PREFIX",
        "VIGIL_SELECTION_EXCLUDE_MAH_SOURCED",
        "VIGIL_NOTIFICATION_KIND",
        "TEST_VIGIL_WEBHOOK_TOKEN",
    ] {
        std::env::remove_var(var);
    }
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
log_level = "debug"
dry_run = true

[source]
kind = "http"
root = "https://files.example.com/cvp"
timeout_seconds = 120

[source.files]
master = "reports_2024.txt"
drug_list = "watchlist.txt"

[output]
root = "/srv/vigil/out"
prefix = "adr"
file_stem = "adr_reports"

[selection]
exclude_mah_sourced = false
mah_marker = "manufacturer"

[layout.drug]
report_id = 0
drug_name = 2

[notification]
kind = "webhook"
webhook_url = "https://hooks.example.com/vigil"
webhook_token = "plain-token"
subject = "Drugs not found"

[logging]
local_enabled = true
local_path = "/tmp/vigil-logs"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert!(config.application.dry_run);
    assert_eq!(config.source.kind, SourceKind::Http);
    assert_eq!(config.source.timeout_seconds, 120);
    assert_eq!(config.source.files.master, "reports_2024.txt");
    assert_eq!(config.source.files.drug, "report_drug.txt");
    assert_eq!(config.source.files.drug_list, "watchlist.txt");
    assert_eq!(config.output.prefix, "adr");
    assert!(!config.selection.exclude_mah_sourced);
    assert_eq!(config.layout.drug.report_id, 0);
    assert_eq!(config.layout.drug.drug_name, 2);
    assert_eq!(config.layout.drug.dosage_form, 20);
    assert_eq!(config.notification.kind, NotificationKind::Webhook);
    assert_eq!(
        config
            .notification
            .webhook_token
            .as_ref()
            .unwrap()
            .expose_secret()
            .as_str(),
        "plain-token"
    );
    assert_eq!(config.notification.subject, "Drugs not found");
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config("[source]\nroot = \"./data\"\n");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "info");
    assert!(!config.application.dry_run);
    assert_eq!(config.source.kind, SourceKind::Filesystem);
    assert_eq!(config.source.files.drug_list, "drug_names.txt");
    assert_eq!(config.output.root, "./output");
    assert_eq!(config.output.prefix, "report_output");
    assert_eq!(config.output.file_stem, "reported_adverse_reaction");
    assert!(config.selection.exclude_mah_sourced);
    assert_eq!(config.selection.mah_marker, "mah");
    assert_eq!(config.notification.kind, NotificationKind::Log);
    assert_eq!(
        config.notification.subject,
        "Missing Drug Names Notification"
    );
    assert!(!config.logging.local_enabled);

    assert_eq!(config.layout.master.required_fields(), 38);
    assert_eq!(config.layout.drug.required_fields(), 21);
    assert_eq!(config.layout.reaction.required_fields(), 10);
    assert_eq!(config.layout.link.required_fields(), 5);
    assert_eq!(config.layout.indication.required_fields(), 5);
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_VIGIL_WEBHOOK_TOKEN", "from-env");

    let file = write_config(
        r#"
[source]
root = "./data"

[notification]
kind = "webhook"
webhook_url = "https://hooks.example.com/vigil"
# token below comes from the environment: ${NOT_SET_AND_NOT_NEEDED}
webhook_token = "${TEST_VIGIL_WEBHOOK_TOKEN}"
"#,
    );

    let config = load_config(file.path()).unwrap();
    let token = config.notification.webhook_token.unwrap();
    assert_eq!(token.expose_secret().as_str(), "from-env");

    cleanup_env_vars();
}

#[test]
fn test_missing_substitution_variable_fails() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        "[source]\nroot = \"./data\"\n\n[notification]\nwebhook_token = \"${TEST_VIGIL_WEBHOOK_TOKEN}\"\n",
    );
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_VIGIL_WEBHOOK_TOKEN"));
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("VIGIL_APPLICATION_LOG_LEVEL", "trace");
    std::env::set_var("VIGIL_APPLICATION_DRY_RUN", "true");
    std::env::set_var("VIGIL_SOURCE_ROOT", "/mnt/extracts");
    std::env::set_var("VIGIL_SOURCE_FILES_DRUG_LIST", "other_drugs.txt");
    std::env::set_var("VIGIL_SELECTION_EXCLUDE_MAH_SOURCED", "false");
    std::env::set_var("VIGIL_NOTIFICATION_KIND", "disabled");

    let file = write_config("[source]\nroot = \"./data\"\n");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "trace");
    assert!(config.application.dry_run);
    assert_eq!(config.source.root, "/mnt/extracts");
    assert_eq!(config.source.files.drug_list, "other_drugs.txt");
    assert!(!config.selection.exclude_mah_sourced);
    assert_eq!(config.notification.kind, NotificationKind::Disabled);

    cleanup_env_vars();
}

#[test]
fn test_invalid_env_override_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("VIGIL_APPLICATION_DRY_RUN", "maybe");

    let file = write_config("[source]\nroot = \"./data\"\n");
    assert!(load_config(file.path()).is_err());

    cleanup_env_vars();
}

#[test]
fn test_invalid_config_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let cases = [
        // source section is required
        "[application]\nlog_level = \"info\"\n",
        // http source needs a URL
        "[source]\nkind = \"http\"\nroot = \"./data\"\n",
        // webhook needs a URL
        "[source]\nroot = \"./data\"\n\n[notification]\nkind = \"webhook\"\n",
        // two key fields on one position
        "[source]\nroot = \"./data\"\n\n[layout.link]\nrecord_type = 4\n",
        "[source]\nroot = \"./data\"\n\n[logging]\nlocal_rotation = \"weekly\"\n",
        "[source]\nroot = \"./data\"\n\n[application]\nlog_level = \"loud\"\n",
    ];

    for contents in cases {
        let file = write_config(contents);
        assert!(load_config(file.path()).is_err(), "accepted: {contents}");
    }
}
