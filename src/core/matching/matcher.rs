//! Drug name matching
//!
//! Finds drug-detail rows whose drug name contains any target name. The match
//! is a substring test on normalized text, so `"tylenol"` also catches
//! `"TYLENOL EXTRA STRENGTH"`. This over-matches compound names (`"aspirin"`
//! is found inside `"aspirin/caffeine"`), which is the accepted trade-off for
//! catching formulation suffixes.

use crate::config::DrugLayout;
use crate::domain::extract::normalize_name;
use crate::domain::{ExtractRow, MissingDrugSet, ReportId, TargetDrugSet};
use std::collections::{BTreeMap, BTreeSet};

/// Result of matching the target list against the drug extract
#[derive(Debug, Clone, Default)]
pub struct MatchOutcome {
    /// Matching rows per report id, identical rows collapsed
    pub matches: BTreeMap<ReportId, BTreeSet<ExtractRow>>,

    /// Normalized target names that matched at least one row
    pub found: BTreeSet<String>,

    /// Target names that matched nothing
    pub missing: MissingDrugSet,

    /// Rows too short to carry a report id and drug name
    pub rows_skipped: usize,
}

impl MatchOutcome {
    /// Report ids with at least one matching row
    pub fn report_ids(&self) -> BTreeSet<ReportId> {
        self.matches.keys().cloned().collect()
    }

    /// Total distinct matching rows across all reports
    pub fn matched_rows(&self) -> usize {
        self.matches.values().map(BTreeSet::len).sum()
    }
}

/// Matches target drug names against drug-detail rows
#[derive(Debug, Clone)]
pub struct DrugMatcher {
    targets: TargetDrugSet,
    layout: DrugLayout,
}

impl DrugMatcher {
    pub fn new(targets: TargetDrugSet, layout: DrugLayout) -> Self {
        Self { targets, layout }
    }

    /// Scans `rows` once and collects every match
    ///
    /// Rows shorter than the report id and drug name positions are skipped,
    /// as are rows whose report id is blank. A row that contains several
    /// target names marks each of them as found.
    ///
    /// # Examples
    ///
    /// ```
    /// use vigil::config::DrugLayout;
    /// use vigil::core::matching::DrugMatcher;
    /// use vigil::domain::{ExtractRow, TargetDrugSet};
    ///
    /// let matcher = DrugMatcher::new(TargetDrugSet::from_lines(&["tylenol"]), DrugLayout::default());
    /// let rows = vec![
    ///     ExtractRow::parse("1$42$x$\"TYLENOL EXTRA STRENGTH\""),
    ///     ExtractRow::parse("2$43$x$\"ASPIRIN\""),
    /// ];
    /// let outcome = matcher.match_rows(&rows);
    /// assert_eq!(outcome.matches.len(), 1);
    /// assert!(outcome.missing.is_empty());
    /// ```
    pub fn match_rows(&self, rows: &[ExtractRow]) -> MatchOutcome {
        let mut outcome = MatchOutcome::default();
        let min_fields = self.layout.match_fields();

        if self.targets.is_empty() {
            return outcome;
        }

        for row in rows {
            if !row.has_at_least(min_fields) {
                outcome.rows_skipped += 1;
                continue;
            }

            let drug_name = normalize_name(row.field(self.layout.drug_name).unwrap_or_default());
            if drug_name.is_empty() {
                continue;
            }

            let mut matched = false;
            for target in self.targets.iter() {
                if drug_name.contains(target) {
                    matched = true;
                    outcome.found.insert(target.to_string());
                }
            }
            if !matched {
                continue;
            }

            let Some(report_id) = row
                .cleaned(self.layout.report_id)
                .and_then(|raw| ReportId::new(raw).ok())
            else {
                outcome.rows_skipped += 1;
                continue;
            };

            outcome
                .matches
                .entry(report_id)
                .or_default()
                .insert(row.clone());
        }

        outcome.missing = MissingDrugSet::from_unmatched(&self.targets, &outcome.found);

        tracing::info!(
            targets = self.targets.len(),
            reports = outcome.matches.len(),
            rows = outcome.matched_rows(),
            missing = outcome.missing.len(),
            skipped = outcome.rows_skipped,
            "Drug matching complete"
        );

        outcome
    }
}
