//! Per-extract correlation passes
//!
//! Each pass reads one extract and returns its own map keyed by report id.
//! Passes share nothing mutable, so they can run on separate threads; the
//! correlator merges their results afterwards.
//!
//! Every pass skips rows that are shorter than its layout requires, rows
//! with a blank report id, and rows whose report id is outside the universe.

use crate::config::{DrugLayout, LinkLayout, MasterLayout, ReactionLayout};
use crate::domain::{DrugSlot, ExtractRow, Linkage, ReactionSlot, ReportId, ReportScalars};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Resolves the row's report id if the row is long enough and in the universe
pub(crate) fn universe_id(
    row: &ExtractRow,
    min_fields: usize,
    id_position: usize,
    universe: &BTreeSet<ReportId>,
) -> Option<ReportId> {
    if !row.has_at_least(min_fields) {
        return None;
    }
    let report_id = ReportId::new(row.cleaned(id_position)?).ok()?;
    universe.contains(&report_id).then_some(report_id)
}

/// Scalars per report from the master extract
///
/// When a report id has more than one master row the last one wins.
pub fn master_pass(
    universe: &BTreeSet<ReportId>,
    rows: &[ExtractRow],
    layout: &MasterLayout,
) -> BTreeMap<ReportId, ReportScalars> {
    let min_fields = layout.required_fields();
    let mut scalars = BTreeMap::new();

    for row in rows {
        let Some(report_id) = universe_id(row, min_fields, layout.report_id, universe) else {
            continue;
        };
        let field = |position: usize| row.cleaned_or_empty(position);

        scalars.insert(
            report_id,
            ReportScalars {
                report_no: field(layout.report_no),
                version_no: field(layout.version_no),
                dat_received: field(layout.dat_received),
                dat_int_received: field(layout.dat_int_received),
                mah_no: field(layout.mah_no),
                report_type: field(layout.report_type),
                gender: field(layout.gender),
                age: field(layout.age),
                age_unit: field(layout.age_unit),
                outcome: field(layout.outcome),
                weight: field(layout.weight),
                weight_unit: field(layout.weight_unit),
                height: field(layout.height),
                height_unit: field(layout.height_unit),
                seriousness: field(layout.seriousness),
                death: field(layout.death),
                disability: field(layout.disability),
                congenital_anomaly: field(layout.congenital_anomaly),
                life_threatening: field(layout.life_threatening),
                hospitalization: field(layout.hospitalization),
                other_medically_important: field(layout.other_medically_important),
                reporter_type: field(layout.reporter_type),
                source: field(layout.source),
            },
        );
    }

    scalars
}

/// Reaction slots per report, in encounter order
///
/// Repeated reaction rows produce repeated slots.
pub fn reaction_pass(
    universe: &BTreeSet<ReportId>,
    rows: &[ExtractRow],
    layout: &ReactionLayout,
) -> BTreeMap<ReportId, Vec<ReactionSlot>> {
    let min_fields = layout.required_fields();
    let mut reactions: BTreeMap<ReportId, Vec<ReactionSlot>> = BTreeMap::new();

    for row in rows {
        let Some(report_id) = universe_id(row, min_fields, layout.report_id, universe) else {
            continue;
        };
        reactions.entry(report_id).or_default().push(ReactionSlot {
            term: row.cleaned_or_empty(layout.term),
            coding_version: row.cleaned_or_empty(layout.coding_version),
            duration: row.cleaned_or_empty(layout.duration),
            duration_unit: row.cleaned_or_empty(layout.duration_unit),
        });
    }

    reactions
}

/// Linkage per report; later rows overwrite earlier ones
///
/// Reports without a link row are absent from the result. The placeholder
/// is applied by the correlator, not here.
pub fn link_pass(
    universe: &BTreeSet<ReportId>,
    rows: &[ExtractRow],
    layout: &LinkLayout,
) -> BTreeMap<ReportId, Linkage> {
    let min_fields = layout.required_fields();
    let mut links = BTreeMap::new();

    for row in rows {
        let Some(report_id) = universe_id(row, min_fields, layout.report_id, universe) else {
            continue;
        };
        links.insert(
            report_id,
            Linkage {
                record_type: row.cleaned_or_empty(layout.record_type).trim().to_string(),
                linked_report_no: row
                    .cleaned_or_empty(layout.linked_report_no)
                    .trim()
                    .to_string(),
            },
        );
    }

    links
}

/// Output of the drug-detail pass
#[derive(Debug, Clone, Default)]
pub struct DrugPass {
    /// Drug slots per report in first-encounter order
    pub slots: BTreeMap<ReportId, Vec<DrugSlot>>,

    /// Drug names per report, index `i` naming slot `i`
    pub order: BTreeMap<ReportId, Vec<String>>,
}

/// Drug slots per report, in first-encounter order
///
/// An extract line that appears more than once verbatim produces one slot.
/// Distinct rows for the same drug each get their own slot.
pub fn drug_pass(
    universe: &BTreeSet<ReportId>,
    rows: &[ExtractRow],
    layout: &DrugLayout,
) -> DrugPass {
    let min_fields = layout.required_fields();
    let mut pass = DrugPass::default();
    let mut seen: HashSet<&ExtractRow> = HashSet::new();

    for row in rows {
        let Some(report_id) = universe_id(row, min_fields, layout.report_id, universe) else {
            continue;
        };
        if !seen.insert(row) {
            continue;
        }

        let slot = DrugSlot {
            name: row.cleaned_or_empty(layout.drug_name),
            involvement: row.cleaned_or_empty(layout.involvement),
            route: row.cleaned_or_empty(layout.route),
            dose_quantity: row.cleaned_or_empty(layout.dose_quantity),
            dose_unit: row.cleaned_or_empty(layout.dose_unit),
            frequency_unit: row.cleaned_or_empty(layout.frequency_unit),
            therapy_duration: row.cleaned_or_empty(layout.therapy_duration),
            therapy_duration_unit: row.cleaned_or_empty(layout.therapy_duration_unit),
            dosage_form: row.cleaned_or_empty(layout.dosage_form),
            indication: String::new(),
        };

        pass.order
            .entry(report_id.clone())
            .or_default()
            .push(slot.name.clone());
        pass.slots.entry(report_id).or_default().push(slot);
    }

    pass
}
