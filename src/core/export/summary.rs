//! Run summary and reporting
//!
//! This module defines structures for tracking and reporting the result of
//! one run.

use std::time::Duration;
use uuid::Uuid;

/// Summary of a run
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Unique id of this run, included in every summary log line
    pub run_id: Uuid,

    /// Distinct target drug names
    pub target_drugs: usize,

    /// Reports with at least one matching drug row
    pub matched_reports: usize,

    /// Matched reports removed by the source filter
    pub excluded_by_source: usize,

    /// Reports correlated (the selection universe)
    pub correlated_reports: usize,

    /// Correlated reports already emitted by an earlier run
    pub duplicates_skipped: usize,

    /// Reports written to the artifact (or that would be, on a dry run)
    pub emitted_reports: usize,

    /// Target names with no matching drug row, sorted
    pub missing_drugs: Vec<String>,

    /// Name of the artifact written, if any
    pub artifact: Option<String>,

    /// Whether writes and notifications were skipped
    pub dry_run: bool,

    /// Duration of the run
    pub duration: Duration,

    /// Errors encountered during the run
    pub errors: Vec<ExportError>,
}

impl ExportSummary {
    /// Create a new empty summary with a fresh run id
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            target_drugs: 0,
            matched_reports: 0,
            excluded_by_source: 0,
            correlated_reports: 0,
            duplicates_skipped: 0,
            emitted_reports: 0,
            missing_drugs: Vec::new(),
            artifact: None,
            dry_run: false,
            duration: Duration::from_secs(0),
            errors: Vec::new(),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Add an error
    pub fn add_error(&mut self, error: ExportError) {
        self.errors.push(error);
    }

    /// Errors of one category
    pub fn errors_of(&self, error_type: ExportErrorType) -> impl Iterator<Item = &ExportError> {
        self.errors.iter().filter(move |e| e.error_type == error_type)
    }

    /// Check if the run completed without recorded errors
    pub fn is_successful(&self) -> bool {
        self.errors.is_empty()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            run_id = %self.run_id,
            target_drugs = self.target_drugs,
            matched_reports = self.matched_reports,
            excluded_by_source = self.excluded_by_source,
            correlated_reports = self.correlated_reports,
            duplicates_skipped = self.duplicates_skipped,
            emitted_reports = self.emitted_reports,
            missing_drugs = self.missing_drugs.len(),
            artifact = self.artifact.as_deref().unwrap_or("none"),
            dry_run = self.dry_run,
            duration_ms = self.duration.as_millis() as u64,
            "Run completed"
        );

        if !self.errors.is_empty() {
            tracing::warn!(
                run_id = %self.run_id,
                error_count = self.errors.len(),
                "Run completed with errors"
            );
            for error in &self.errors {
                tracing::warn!(
                    error_type = ?error.error_type,
                    message = %error.message,
                    context = error.context.as_deref().unwrap_or(""),
                    "Run error"
                );
            }
        }
    }
}

impl Default for ExportSummary {
    fn default() -> Self {
        Self::new()
    }
}

/// Category of a recorded error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportErrorType {
    /// An input file could not be fetched and was treated as empty
    Fetch,
    /// Previously emitted artifacts could not be listed
    Registry,
    /// The missing-drug notice could not be delivered
    Notification,
    /// The artifact could not be rendered or written
    Emit,
}

/// Recorded error with context
#[derive(Debug, Clone)]
pub struct ExportError {
    /// Category of error
    pub error_type: ExportErrorType,

    /// Error message
    pub message: String,

    /// Optional context (e.g., the file key or artifact name)
    pub context: Option<String>,
}

impl ExportError {
    /// Create a new error
    pub fn new(error_type: ExportErrorType, message: String) -> Self {
        Self {
            error_type,
            message,
            context: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: String) -> Self {
        self.context = Some(context);
        self
    }
}
