//! Report selection
//!
//! Turns the matcher's per-report matches into the set of report ids to
//! correlate, optionally dropping reports sourced from the market
//! authorization holder.

use crate::config::{MasterLayout, SelectionConfig};
use crate::domain::{ExtractRow, ReportId};
use std::collections::BTreeSet;

/// The report id universe for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Ids to correlate
    pub universe: BTreeSet<ReportId>,

    /// Ids implicated by drug matches before filtering
    pub candidates: usize,

    /// Ids removed by the source filter
    pub removed_by_source: usize,
}

/// Selects the report ids to correlate
#[derive(Debug, Clone)]
pub struct ReportSelector {
    layout: MasterLayout,
    /// Lowercased marker, `None` disables the source filter
    mah_marker: Option<String>,
}

impl ReportSelector {
    /// Selector with the source filter on, matching `marker` case-insensitively
    pub fn with_source_filter(layout: MasterLayout, marker: &str) -> Self {
        Self {
            layout,
            mah_marker: Some(marker.trim().to_lowercase()),
        }
    }

    /// Selector that keeps every candidate
    pub fn without_source_filter(layout: MasterLayout) -> Self {
        Self {
            layout,
            mah_marker: None,
        }
    }

    /// Builds the selector from configuration
    pub fn from_config(layout: &MasterLayout, selection: &SelectionConfig) -> Self {
        if selection.exclude_mah_sourced {
            Self::with_source_filter(layout.clone(), &selection.mah_marker)
        } else {
            Self::without_source_filter(layout.clone())
        }
    }

    /// Narrows `candidates` using the master extract
    ///
    /// Only master rows whose report id is already a candidate are looked at,
    /// so the result is always a subset of `candidates`. A candidate with no
    /// usable master row is kept.
    pub fn select(&self, candidates: BTreeSet<ReportId>, master_rows: &[ExtractRow]) -> Selection {
        let candidate_count = candidates.len();

        let Some(marker) = self.mah_marker.as_deref() else {
            return Selection {
                universe: candidates,
                candidates: candidate_count,
                removed_by_source: 0,
            };
        };

        let min_fields = self.layout.source_filter_fields();
        let mut excluded: BTreeSet<ReportId> = BTreeSet::new();

        for row in master_rows {
            if !row.has_at_least(min_fields) {
                continue;
            }
            let Some(report_id) = row
                .cleaned(self.layout.report_id)
                .and_then(|raw| ReportId::new(raw).ok())
            else {
                continue;
            };
            if !candidates.contains(&report_id) {
                continue;
            }

            let source = row.cleaned_or_empty(self.layout.source).to_lowercase();
            if source.contains(marker) {
                tracing::debug!(report_id = %report_id, source = %source, "Excluding manufacturer-sourced report");
                excluded.insert(report_id);
            }
        }

        let universe: BTreeSet<ReportId> = candidates.difference(&excluded).cloned().collect();
        let removed_by_source = candidate_count - universe.len();

        tracing::info!(
            candidates = candidate_count,
            selected = universe.len(),
            removed_by_source,
            "Report selection complete"
        );

        Selection {
            universe,
            candidates: candidate_count,
            removed_by_source,
        }
    }
}
