//! Export coordinator - main orchestrator for a run
//!
//! Owns the collaborators of one run (extract source, output store,
//! notifier) and drives the pipeline through them:
//!
//! 1. Load the registry of emitted reports and fetch the inputs, concurrently
//! 2. Parse the target drug list
//! 3. Match drug rows against the targets
//! 4. Notify about target names that matched nothing
//! 5. Select the report universe (source filter)
//! 6. Correlate and align indications
//! 7. Drop reports emitted by earlier runs
//! 8. Write the new reports as one artifact

use crate::adapters::factory::{create_extract_source, create_notifier, create_output_store};
use crate::adapters::notify::{missing_drug_message, Notifier};
use crate::adapters::output::OutputStore;
use crate::adapters::source::{fetch_extracts, ExtractSource};
use crate::config::VigilConfig;
use crate::core::correlate::Correlator;
use crate::core::export::summary::{ExportError, ExportErrorType, ExportSummary};
use crate::core::matching::{DrugMatcher, ReportSelector};
use crate::core::state::{Deduplicator, ExistingReportRegistry};
use crate::core::transform::{artifact_name, render_artifact, to_output_records, OutputRecord};
use crate::domain::{MissingDrugSet, Result, TargetDrugSet, VigilError};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;

/// Export coordinator
pub struct ExportCoordinator {
    config: VigilConfig,
    source: Arc<dyn ExtractSource + Send + Sync>,
    store: Arc<dyn OutputStore + Send + Sync>,
    notifier: Arc<dyn Notifier + Send + Sync>,
}

impl ExportCoordinator {
    /// Create a coordinator with explicit collaborators
    pub fn new(
        config: VigilConfig,
        source: Arc<dyn ExtractSource + Send + Sync>,
        store: Arc<dyn OutputStore + Send + Sync>,
        notifier: Arc<dyn Notifier + Send + Sync>,
    ) -> Self {
        Self {
            config,
            source,
            store,
            notifier,
        }
    }

    /// Create a coordinator whose collaborators are built from `config`
    ///
    /// # Errors
    ///
    /// Returns an error if any collaborator can't be created
    pub fn from_config(config: VigilConfig) -> Result<Self> {
        let source = create_extract_source(&config)?;
        let store = create_output_store(&config)?;
        let notifier = create_notifier(&config)?;
        Ok(Self::new(config, source, store, notifier))
    }

    /// Execute one run
    ///
    /// Failures at the collaborator boundary (a missing input file, an
    /// unlistable output prefix, a failed notification or write) are logged
    /// and recorded in the summary; the run still completes.
    ///
    /// # Errors
    ///
    /// Returns an error only if the correlation worker panics
    pub async fn execute_export(&self) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new();
        summary.dry_run = self.config.application.dry_run;

        tracing::info!(
            run_id = %summary.run_id,
            source = %self.source.describe(),
            output = %self.store.describe(),
            dry_run = summary.dry_run,
            "Starting run"
        );

        let prefix = self.config.output.prefix.as_str();
        let (registry, fetched) = tokio::join!(
            ExistingReportRegistry::load(self.store.as_ref(), prefix),
            fetch_extracts(self.source.as_ref(), &self.config.source.files),
        );

        let registry = match registry {
            Ok(registry) => registry,
            Err(e) => {
                tracing::error!(
                    prefix = %prefix,
                    error = %e,
                    "Failed to load existing reports, continuing without deduplication"
                );
                summary.add_error(
                    ExportError::new(ExportErrorType::Registry, e.to_string())
                        .with_context(format!("prefix={prefix}")),
                );
                ExistingReportRegistry::default()
            }
        };

        for failure in &fetched.failures {
            summary.add_error(
                ExportError::new(ExportErrorType::Fetch, failure.error.clone())
                    .with_context(format!("extract={}, file={}", failure.kind, failure.key)),
            );
        }
        let extracts = fetched.extracts;

        let targets = TargetDrugSet::from_lines(&fetched.drug_list);
        summary.target_drugs = targets.len();
        if targets.is_empty() {
            tracing::warn!(
                file = %self.config.source.files.drug_list,
                "Target drug list is empty, no reports will be selected"
            );
        }

        let stage = Instant::now();
        let matcher = DrugMatcher::new(targets, self.config.layout.drug.clone());
        let outcome = matcher.match_rows(&extracts.drug);
        summary.matched_reports = outcome.matches.len();
        summary.missing_drugs = outcome.missing.names();
        crate::log_stage_complete!("match", outcome.matches.len(), stage.elapsed());

        self.notify_missing(&outcome.missing, &mut summary).await;

        let stage = Instant::now();
        let selector = ReportSelector::from_config(&self.config.layout.master, &self.config.selection);
        let selection = selector.select(outcome.report_ids(), &extracts.master);
        summary.excluded_by_source = selection.removed_by_source;
        crate::log_stage_complete!("select", selection.universe.len(), stage.elapsed());

        // Correlation is CPU-bound and fans out onto its own scoped threads
        let correlator = Correlator::new(self.config.layout.clone());
        let universe = selection.universe;
        let correlation =
            tokio::task::spawn_blocking(move || correlator.correlate(&universe, &extracts))
                .await
                .map_err(|e| VigilError::Other(format!("Correlation worker failed: {e}")))?;
        summary.correlated_reports = correlation.reports.len();

        let deduped = Deduplicator.filter(correlation.reports.into_values(), &registry);
        summary.duplicates_skipped = deduped.duplicates;

        let records = to_output_records(&deduped.novel);
        self.emit(&records, &mut summary).await;

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    async fn notify_missing(&self, missing: &MissingDrugSet, summary: &mut ExportSummary) {
        let Some(message) = missing_drug_message(missing) else {
            return;
        };

        tracing::warn!(
            missing_count = missing.len(),
            missing = ?missing.names(),
            "Target drugs not found in the drug extract"
        );

        if self.config.application.dry_run {
            tracing::info!("Dry run: skipping missing-drug notification");
            return;
        }

        let subject = self.config.notification.subject.as_str();
        if let Err(e) = self.notifier.notify(subject, &message).await {
            crate::log_error_with_context!(&e, "Failed to send missing-drug notification");
            summary.add_error(
                ExportError::new(ExportErrorType::Notification, e.to_string())
                    .with_context(format!("notifier={}", self.notifier.describe())),
            );
        }
    }

    async fn emit(&self, records: &[OutputRecord], summary: &mut ExportSummary) {
        if records.is_empty() {
            tracing::info!("No new reports, nothing to emit");
            return;
        }

        let name = artifact_name(
            &self.config.output.prefix,
            &self.config.output.file_stem,
            Utc::now(),
        );

        if self.config.application.dry_run {
            tracing::info!(
                artifact = %name,
                report_count = records.len(),
                "Dry run: skipping artifact write"
            );
            summary.emitted_reports = records.len();
            return;
        }

        let written = match render_artifact(records) {
            Ok(bytes) => self.store.write_artifact(&name, &bytes).await,
            Err(e) => Err(e),
        };

        match written {
            Ok(()) => {
                tracing::info!(
                    artifact = %name,
                    report_count = records.len(),
                    "Artifact written"
                );
                summary.emitted_reports = records.len();
                summary.artifact = Some(name);
            }
            Err(e) => {
                crate::log_error_with_context!(&e, "Failed to emit artifact");
                summary.add_error(
                    ExportError::new(ExportErrorType::Emit, e.to_string())
                        .with_context(format!("artifact={name}")),
                );
            }
        }
    }
}
