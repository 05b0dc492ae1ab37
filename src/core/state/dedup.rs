//! Cross-run deduplication
//!
//! A report is emitted once. Later runs see it again in the extracts (the
//! extracts are full snapshots) and drop it here by report number.

use super::registry::ExistingReportRegistry;
use crate::domain::CorrelatedReport;

/// Reports split into novel and already-emitted
#[derive(Debug, Clone, Default)]
pub struct DedupOutcome {
    /// Reports whose number was never emitted, in input order
    pub novel: Vec<CorrelatedReport>,

    /// Number of reports dropped as already emitted
    pub duplicates: usize,
}

/// Filters correlated reports against the existing report registry
#[derive(Debug, Clone, Copy, Default)]
pub struct Deduplicator;

impl Deduplicator {
    /// Keeps the reports whose normalized report number is not registered
    ///
    /// Reports with a blank report number are always kept.
    ///
    /// Pure: the registry is not updated, so filtering the same input twice
    /// gives the same result.
    pub fn filter<I>(&self, candidates: I, registry: &ExistingReportRegistry) -> DedupOutcome
    where
        I: IntoIterator<Item = CorrelatedReport>,
    {
        let mut outcome = DedupOutcome::default();
        for report in candidates {
            let key = report.report_number_key();
            if !key.is_blank() && registry.contains(&key) {
                tracing::debug!(
                    report_id = %report.report_id,
                    report_no = %key,
                    "Report already emitted, skipping"
                );
                outcome.duplicates += 1;
            } else {
                tracing::debug!(
                    report_id = %report.report_id,
                    report_no = %key,
                    "New report"
                );
                outcome.novel.push(report);
            }
        }

        tracing::info!(
            novel = outcome.novel.len(),
            duplicates = outcome.duplicates,
            "Deduplication complete"
        );
        outcome
    }
}
