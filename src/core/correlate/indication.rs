//! Indication alignment
//!
//! The indication extract is keyed by (report id, drug name) and its row
//! order has nothing to do with drug slot order. Alignment looks each drug
//! slot up by name so `indication[i]` always belongs to `drug_name[i]`.
//!
//! Lookup is exact on the normalized name. A slot with no indication gets an
//! empty string, never a value shifted from a neighbouring slot.

use super::passes::universe_id;
use crate::config::IndicationLayout;
use crate::domain::extract::normalize_name;
use crate::domain::{ExtractRow, ReportId};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// (report id) -> (normalized drug name) -> indication text
#[derive(Debug, Clone, Default)]
pub struct IndicationIndex {
    entries: HashMap<ReportId, HashMap<String, String>>,
}

impl IndicationIndex {
    /// Scans the indication extract once
    ///
    /// Only report ids in `universe` are indexed. When the same drug name
    /// appears on several rows of one report the last row wins.
    pub fn build(
        universe: &BTreeSet<ReportId>,
        rows: &[ExtractRow],
        layout: &IndicationLayout,
    ) -> Self {
        let min_fields = layout.required_fields();
        let mut entries: HashMap<ReportId, HashMap<String, String>> = HashMap::new();

        for row in rows {
            let Some(report_id) = universe_id(row, min_fields, layout.report_id, universe) else {
                continue;
            };
            let drug = normalize_name(row.field(layout.drug_name).unwrap_or_default());
            let indication = row.cleaned_or_empty(layout.indication).trim().to_string();
            entries.entry(report_id).or_default().insert(drug, indication);
        }

        Self { entries }
    }

    /// Indication recorded for `drug_name` on `report_id`
    ///
    /// `drug_name` is an already cleaned slot name; only case and padding
    /// are normalized here.
    pub fn lookup(&self, report_id: &ReportId, drug_name: &str) -> Option<&str> {
        self.entries
            .get(report_id)?
            .get(&drug_name.trim().to_lowercase())
            .map(String::as_str)
    }

    /// Number of reports with at least one indication
    pub fn report_count(&self) -> usize {
        self.entries.len()
    }
}

/// Builds one indication array per report, aligned with its drug order
///
/// Every returned array has exactly the length of the report's drug name
/// list. Repeated identical drug names each receive the same indication.
///
/// # Examples
///
/// ```
/// use std::collections::{BTreeMap, BTreeSet};
/// use vigil::config::IndicationLayout;
/// use vigil::core::correlate::{align_indications, IndicationIndex};
/// use vigil::domain::{ExtractRow, ReportId};
///
/// let r1 = ReportId::new("R1").unwrap();
/// let universe: BTreeSet<ReportId> = [r1.clone()].into_iter().collect();
/// let layout = IndicationLayout { report_id: 0, drug_name: 3, indication: 4 };
/// let rows = vec![ExtractRow::parse("R1$x$y$\"benadryl\"$\"rash\"")];
/// let index = IndicationIndex::build(&universe, &rows, &layout);
///
/// let mut order = BTreeMap::new();
/// order.insert(r1.clone(), vec!["Tylenol".to_string(), "Benadryl".to_string()]);
///
/// let aligned = align_indications(&order, &index);
/// assert_eq!(aligned[&r1], vec!["".to_string(), "rash".to_string()]);
/// ```
pub fn align_indications(
    drug_order: &BTreeMap<ReportId, Vec<String>>,
    index: &IndicationIndex,
) -> BTreeMap<ReportId, Vec<String>> {
    drug_order
        .iter()
        .map(|(report_id, names)| {
            let indications = names
                .iter()
                .map(|name| index.lookup(report_id, name).unwrap_or_default().to_string())
                .collect();
            (report_id.clone(), indications)
        })
        .collect()
}
