//! End-to-end tests for a full run over local directories

use async_trait::async_trait;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use vigil::adapters::notify::{Notifier, MISSING_DRUG_HEADER};
use vigil::adapters::output::{FilesystemOutputStore, OutputStore};
use vigil::adapters::source::FilesystemSource;
use vigil::config::{parse_config, VigilConfig};
use vigil::core::export::{ExportCoordinator, ExportErrorType, ExportSummary};
use vigil::core::transform::OutputRecord;
use vigil::domain::{Result, VigilError};

const PLACEHOLDER: &str = "No duplicate or linked report";

/// Records every notification it is asked to send
#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<(String, String)>>,
    fail: bool,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn describe(&self) -> String {
        "recording".to_string()
    }

    async fn notify(&self, subject: &str, message: &str) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((subject.to_string(), message.to_string()));
        if self.fail {
            return Err(VigilError::Notification("channel down".to_string()));
        }
        Ok(())
    }
}

/// A `$`-joined row of `width` fields with the given positions filled in
fn row(width: usize, values: &[(usize, &str)]) -> String {
    let mut fields = vec![String::new(); width];
    for (position, value) in values {
        fields[*position] = value.to_string();
    }
    fields.join("$")
}

fn master(id: &str, report_no: &str, source: &str) -> String {
    row(
        38,
        &[
            (0, id),
            (1, report_no),
            (3, "04-FEB-14"),
            (28, "2"),
            (32, "1"),
            (37, source),
        ],
    )
}

fn drug(id: &str, name: &str, involvement: &str) -> String {
    row(
        21,
        &[(1, id), (3, name), (4, involvement), (8, "500"), (9, "mg")],
    )
}

fn reaction(id: &str, term: &str) -> String {
    row(10, &[(1, id), (5, term), (9, "v.26.0")])
}

fn link(id: &str, record_type: &str, linked: &str) -> String {
    row(5, &[(1, id), (2, record_type), (4, linked)])
}

fn indication(id: &str, drug_name: &str, text: &str) -> String {
    row(5, &[(1, id), (3, drug_name), (4, text)])
}

struct Inputs {
    master: Vec<String>,
    drug: Vec<String>,
    reaction: Vec<String>,
    link: Vec<String>,
    indication: Vec<String>,
    drug_list: Vec<&'static str>,
}

impl Inputs {
    /// Report 42 matches, 43 names another drug, 44 is manufacturer-sourced
    fn scenario() -> Self {
        Self {
            master: vec![
                master("42", "E2B-42", "Hospital"),
                master("43", "E2B-43", "Hospital"),
                master("44", "E2B-44", "MAH report"),
            ],
            drug: vec![
                drug("42", "TYLENOL", "Suspect"),
                drug("43", "ADVIL", "Suspect"),
                drug("44", "TYLENOL EXTRA STRENGTH", "Concomitant"),
            ],
            reaction: vec![reaction("42", "Headache"), reaction("44", "Rash")],
            link: vec![],
            indication: vec![indication("42", "tylenol", "Fever")],
            drug_list: vec!["Tylenol", "zyrtec"],
        }
    }

    fn write(&self, dir: &Path) {
        let write = |name: &str, lines: &[String]| {
            std::fs::write(dir.join(name), lines.join("\n")).unwrap();
        };
        write("reports.txt", &self.master);
        write("report_drug.txt", &self.drug);
        write("reactions.txt", &self.reaction);
        write("report_links.txt", &self.link);
        write("report_drug_indication.txt", &self.indication);
        std::fs::write(dir.join("drug_names.txt"), self.drug_list.join("\n")).unwrap();
    }
}

fn config(input: &TempDir) -> VigilConfig {
    parse_config(&format!(
        "[source]\nroot = \"{}\"\n",
        input.path().display()
    ))
    .unwrap()
}

async fn run(
    config: VigilConfig,
    input: &TempDir,
    output: &TempDir,
    notifier: Arc<RecordingNotifier>,
) -> ExportSummary {
    ExportCoordinator::new(
        config,
        Arc::new(FilesystemSource::new(input.path())),
        Arc::new(FilesystemOutputStore::new(output.path())),
        notifier,
    )
    .execute_export()
    .await
    .unwrap()
}

async fn artifacts(output: &TempDir) -> Vec<String> {
    FilesystemOutputStore::new(output.path())
        .list_artifacts("report_output")
        .await
        .unwrap()
}

async fn read_records(output: &TempDir, name: &str) -> Vec<OutputRecord> {
    let bytes = FilesystemOutputStore::new(output.path())
        .read_artifact(name)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_run_emits_correlated_report() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    Inputs::scenario().write(input.path());
    let notifier = Arc::new(RecordingNotifier::default());

    let summary = run(config(&input), &input, &output, notifier.clone()).await;

    assert!(summary.is_successful(), "{:?}", summary.errors);
    assert_eq!(summary.target_drugs, 2);
    assert_eq!(summary.matched_reports, 2);
    assert_eq!(summary.excluded_by_source, 1);
    assert_eq!(summary.correlated_reports, 1);
    assert_eq!(summary.emitted_reports, 1);
    assert_eq!(summary.missing_drugs, vec!["zyrtec"]);

    let names = artifacts(&output).await;
    assert_eq!(names.len(), 1);
    assert_eq!(summary.artifact.as_deref(), Some(names[0].as_str()));
    assert!(names[0].starts_with("report_output/reported_adverse_reaction_"));

    let records = read_records(&output, &names[0]).await;
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.report_id, "42");
    assert_eq!(record.report_no, "E2B-42");
    assert_eq!(record.dat_received, "2014-02-04");
    assert_eq!(record.death, "no");
    assert_eq!(record.hospitalization, "yes");
    assert_eq!(record.source, "Hospital");
    assert_eq!(record.drug_name, vec!["TYLENOL"]);
    assert_eq!(record.drug_involvement, vec!["Suspect"]);
    assert_eq!(record.dose, vec!["500 mg"]);
    assert_eq!(record.indication, vec!["Fever"]);
    assert_eq!(record.reaction_term, vec!["Headache"]);
    assert_eq!(record.record_type, PLACEHOLDER);
    assert_eq!(record.linked_report_no, PLACEHOLDER);
    assert!(record.is_aligned());
}

#[tokio::test]
async fn test_missing_drugs_are_notified_once() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    Inputs::scenario().write(input.path());
    let notifier = Arc::new(RecordingNotifier::default());

    run(config(&input), &input, &output, notifier.clone()).await;

    let sent = notifier.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "Missing Drug Names Notification");
    assert_eq!(sent[0].1, format!("{MISSING_DRUG_HEADER}\n\nzyrtec"));
}

#[tokio::test]
async fn test_notification_failure_does_not_stop_emission() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    Inputs::scenario().write(input.path());
    let notifier = Arc::new(RecordingNotifier {
        fail: true,
        ..Default::default()
    });

    let summary = run(config(&input), &input, &output, notifier).await;

    assert_eq!(summary.errors_of(ExportErrorType::Notification).count(), 1);
    assert_eq!(summary.emitted_reports, 1);
    assert_eq!(artifacts(&output).await.len(), 1);
}

#[tokio::test]
async fn test_rerun_over_same_snapshot_emits_nothing() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    Inputs::scenario().write(input.path());

    let first = run(config(&input), &input, &output, Arc::default()).await;
    assert_eq!(first.emitted_reports, 1);

    let second = run(config(&input), &input, &output, Arc::default()).await;
    assert!(second.is_successful());
    assert_eq!(second.correlated_reports, 1);
    assert_eq!(second.duplicates_skipped, 1);
    assert_eq!(second.emitted_reports, 0);
    assert!(second.artifact.is_none());
    assert_eq!(artifacts(&output).await.len(), 1);
}

#[tokio::test]
async fn test_only_new_report_numbers_are_emitted() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let mut inputs = Inputs::scenario();
    inputs.master.push(master("45", "E2B-45", "Consumer"));
    inputs.drug.push(drug("45", "Tylenol PM", "Suspect"));
    inputs.write(input.path());

    FilesystemOutputStore::new(output.path())
        .write_artifact(
            "report_output/reported_adverse_reaction_01_Jan_2024_00_00_00.json",
            br#"[{"report_no": " e2b-42 "}]"#,
        )
        .await
        .unwrap();

    let summary = run(config(&input), &input, &output, Arc::default()).await;
    assert_eq!(summary.correlated_reports, 2);
    assert_eq!(summary.duplicates_skipped, 1);
    assert_eq!(summary.emitted_reports, 1);

    let name = summary.artifact.unwrap();
    let records = read_records(&output, &name).await;
    let ids: Vec<&str> = records.iter().map(|r| r.report_id.as_str()).collect();
    assert_eq!(ids, vec!["45"]);
}

#[tokio::test]
async fn test_source_filter_can_be_disabled() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    Inputs::scenario().write(input.path());
    let mut config = config(&input);
    config.selection.exclude_mah_sourced = false;

    let summary = run(config, &input, &output, Arc::default()).await;
    assert_eq!(summary.excluded_by_source, 0);
    assert_eq!(summary.emitted_reports, 2);

    let records = read_records(&output, &summary.artifact.unwrap()).await;
    let mah = records.iter().find(|r| r.report_id == "44").unwrap();
    assert_eq!(mah.drug_name, vec!["TYLENOL EXTRA STRENGTH"]);
    assert_eq!(mah.indication, vec![""]);
    assert_eq!(mah.reaction_term, vec!["Rash"]);
}

#[tokio::test]
async fn test_linked_report_carries_link_fields() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let mut inputs = Inputs::scenario();
    inputs.link.push(link("42", "Duplicate", "E2B-7"));
    inputs.write(input.path());

    let summary = run(config(&input), &input, &output, Arc::default()).await;
    let records = read_records(&output, &summary.artifact.unwrap()).await;
    assert_eq!(records[0].record_type, "Duplicate");
    assert_eq!(records[0].linked_report_no, "E2B-7");
}

#[tokio::test]
async fn test_missing_extract_degrades_to_empty() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    Inputs::scenario().write(input.path());
    std::fs::remove_file(input.path().join("reactions.txt")).unwrap();

    let summary = run(config(&input), &input, &output, Arc::default()).await;

    let fetch_errors: Vec<_> = summary.errors_of(ExportErrorType::Fetch).collect();
    assert_eq!(fetch_errors.len(), 1);
    assert!(fetch_errors[0]
        .context
        .as_deref()
        .unwrap()
        .contains("reactions.txt"));

    assert_eq!(summary.emitted_reports, 1);
    let records = read_records(&output, &summary.artifact.unwrap()).await;
    assert!(records[0].reaction_term.is_empty());
    assert_eq!(records[0].drug_name, vec!["TYLENOL"]);
}

#[tokio::test]
async fn test_report_without_master_row_is_still_emitted() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let mut inputs = Inputs::scenario();
    inputs.drug.push(drug("99", "TYLENOL", "Suspect"));
    inputs.write(input.path());

    let summary = run(config(&input), &input, &output, Arc::default()).await;
    assert_eq!(summary.emitted_reports, 2);

    let records = read_records(&output, &summary.artifact.unwrap()).await;
    let orphan = records.iter().find(|r| r.report_id == "99").unwrap();
    assert_eq!(orphan.report_no, "");
    assert_eq!(orphan.drug_name, vec!["TYLENOL"]);
}

#[tokio::test]
async fn test_blank_report_numbers_never_block_later_runs() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let mut inputs = Inputs::scenario();
    inputs.drug.push(drug("100", "TYLENOL", "Suspect"));
    inputs.write(input.path());

    FilesystemOutputStore::new(output.path())
        .write_artifact(
            "report_output/reported_adverse_reaction_01_Jan_2024_00_00_00.json",
            br#"[{"report_id": "99", "report_no": ""}]"#,
        )
        .await
        .unwrap();

    let summary = run(config(&input), &input, &output, Arc::default()).await;
    assert_eq!(summary.duplicates_skipped, 0);
    assert_eq!(summary.emitted_reports, 2);

    let records = read_records(&output, &summary.artifact.unwrap()).await;
    let orphan = records.iter().find(|r| r.report_id == "100").unwrap();
    assert_eq!(orphan.report_no, "");
}
