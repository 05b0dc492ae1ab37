//! Report correlation
//!
//! Joins the five extracts into one [`CorrelatedReport`] per report id in the
//! universe. The master, reaction, link and drug passes and the indication
//! index build each run on their own scoped thread and return an independent
//! map. This thread then aligns indications against the drug order and
//! merges everything into the final records.

use super::indication::{align_indications, IndicationIndex};
use super::passes::{drug_pass, link_pass, master_pass, reaction_pass};
use crate::config::LayoutConfig;
use crate::domain::{CorrelatedReport, ExtractSet, Linkage, ReportId};
use std::collections::{BTreeMap, BTreeSet};
use std::thread;
use std::time::Instant;

/// Counters describing one correlation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrelationStats {
    /// Reports built
    pub reports: usize,
    /// Reports with no usable master row (default scalars)
    pub without_master: usize,
    /// Reports with a link row
    pub linked: usize,
    /// Drug slots across all reports
    pub drug_slots: usize,
    /// Reaction slots across all reports
    pub reaction_slots: usize,
    /// Drug slots that received a non-empty indication
    pub indications_matched: usize,
}

/// Correlated records keyed by report id, plus stats
#[derive(Debug, Clone, Default)]
pub struct Correlation {
    pub reports: BTreeMap<ReportId, CorrelatedReport>,
    pub stats: CorrelationStats,
}

/// Builds correlated reports from the extracts
#[derive(Debug, Clone, Default)]
pub struct Correlator {
    layout: LayoutConfig,
}

impl Correlator {
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    /// Correlates every id in `universe`
    ///
    /// Every id gets a record, even when it has no rows in some or all
    /// extracts: its scalars default to empty strings, its drug and reaction
    /// slots are empty, and its linkage is the absent-link placeholder.
    pub fn correlate(&self, universe: &BTreeSet<ReportId>, extracts: &ExtractSet) -> Correlation {
        let started = Instant::now();
        let layout = &self.layout;

        let (mut scalars, mut reactions, mut links, drugs, index) = thread::scope(|scope| {
            let master = scope.spawn(|| master_pass(universe, &extracts.master, &layout.master));
            let reaction =
                scope.spawn(|| reaction_pass(universe, &extracts.reaction, &layout.reaction));
            let link = scope.spawn(|| link_pass(universe, &extracts.link, &layout.link));
            let drug = scope.spawn(|| drug_pass(universe, &extracts.drug, &layout.drug));
            let indication = scope.spawn(|| {
                IndicationIndex::build(universe, &extracts.indication, &layout.indication)
            });

            (
                join_pass(master),
                join_pass(reaction),
                join_pass(link),
                join_pass(drug),
                join_pass(indication),
            )
        });

        let mut indications = align_indications(&drugs.order, &index);
        let mut drug_slots = drugs.slots;

        let mut stats = CorrelationStats::default();
        let mut reports = BTreeMap::new();

        for report_id in universe {
            let mut report = CorrelatedReport::skeleton(report_id.clone());

            match scalars.remove(report_id) {
                Some(values) => {
                    report.scalars = values;
                    report.has_master = true;
                }
                None => stats.without_master += 1,
            }

            if let Some(linkage) = links.remove(report_id) {
                report.linkage = linkage;
                stats.linked += 1;
            } else {
                report.linkage = Linkage::none();
            }

            report.reactions = reactions.remove(report_id).unwrap_or_default();

            let mut slots = drug_slots.remove(report_id).unwrap_or_default();
            if let Some(aligned) = indications.remove(report_id) {
                for (slot, indication) in slots.iter_mut().zip(aligned) {
                    if !indication.is_empty() {
                        stats.indications_matched += 1;
                    }
                    slot.indication = indication;
                }
            }
            report.drugs = slots;

            stats.drug_slots += report.drugs.len();
            stats.reaction_slots += report.reactions.len();
            reports.insert(report_id.clone(), report);
        }
        stats.reports = reports.len();

        tracing::info!(
            reports = stats.reports,
            without_master = stats.without_master,
            linked = stats.linked,
            drug_slots = stats.drug_slots,
            reaction_slots = stats.reaction_slots,
            indications_matched = stats.indications_matched,
            indexed_reports = index.report_count(),
            "Correlation complete"
        );
        crate::log_stage_complete!("correlate", stats.reports, started.elapsed());

        Correlation { reports, stats }
    }
}

/// Joins a pass thread, re-raising its panic on this thread
fn join_pass<T>(handle: thread::ScopedJoinHandle<'_, T>) -> T {
    handle
        .join()
        .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
}
