//! Correlated report model
//!
//! A [`CorrelatedReport`] is the in-memory result of joining the five extracts
//! for one report id. Repeatable sub-entities are held as slots rather than
//! as parallel arrays, so every drug attribute of slot `i` lives in the same
//! [`DrugSlot`] and the arrays projected at output time are aligned by
//! construction.

use super::ids::{ReportId, ReportNumberKey};
use serde::{Deserialize, Serialize};

/// Value written to both linkage fields when a report has no link row
pub const NO_LINK_PLACEHOLDER: &str = "No duplicate or linked report";

/// Scalar attributes taken from the report master extract
///
/// All values are cleaned but otherwise raw; date and yes/no conversion
/// happens when the output record is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportScalars {
    pub report_no: String,
    pub version_no: String,
    pub dat_received: String,
    pub dat_int_received: String,
    pub mah_no: String,
    pub report_type: String,
    pub gender: String,
    pub age: String,
    pub age_unit: String,
    pub outcome: String,
    pub weight: String,
    pub weight_unit: String,
    pub height: String,
    pub height_unit: String,
    pub seriousness: String,
    pub death: String,
    pub disability: String,
    pub congenital_anomaly: String,
    pub life_threatening: String,
    pub hospitalization: String,
    pub other_medically_important: String,
    pub reporter_type: String,
    pub source: String,
}

/// Linkage to a duplicate or related report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Linkage {
    pub record_type: String,
    pub linked_report_no: String,
}

impl Linkage {
    /// Linkage used for reports absent from the link extract
    pub fn none() -> Self {
        Self {
            record_type: NO_LINK_PLACEHOLDER.to_string(),
            linked_report_no: NO_LINK_PLACEHOLDER.to_string(),
        }
    }

    /// Whether this is the absent-link placeholder
    pub fn is_placeholder(&self) -> bool {
        self.record_type == NO_LINK_PLACEHOLDER && self.linked_report_no == NO_LINK_PLACEHOLDER
    }
}

impl Default for Linkage {
    fn default() -> Self {
        Self::none()
    }
}

/// One drug entry on a report
///
/// Dose and therapy duration keep value and unit apart until output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrugSlot {
    pub name: String,
    pub involvement: String,
    pub route: String,
    pub dose_quantity: String,
    pub dose_unit: String,
    pub frequency_unit: String,
    pub therapy_duration: String,
    pub therapy_duration_unit: String,
    pub dosage_form: String,
    /// Filled by indication alignment, empty when no indication matched
    pub indication: String,
}

/// One reaction entry on a report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionSlot {
    pub term: String,
    pub coding_version: String,
    pub duration: String,
    pub duration_unit: String,
}

/// All data gathered for one report id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrelatedReport {
    pub report_id: ReportId,
    pub scalars: ReportScalars,
    /// False when no usable master row was found and scalars are defaults
    pub has_master: bool,
    pub linkage: Linkage,
    pub drugs: Vec<DrugSlot>,
    pub reactions: Vec<ReactionSlot>,
}

impl CorrelatedReport {
    /// Creates an empty record with default scalars and the absent-link
    /// placeholder
    pub fn skeleton(report_id: ReportId) -> Self {
        Self {
            report_id,
            scalars: ReportScalars::default(),
            has_master: false,
            linkage: Linkage::none(),
            drugs: Vec::new(),
            reactions: Vec::new(),
        }
    }

    /// Key used to recognise previously emitted reports
    pub fn report_number_key(&self) -> ReportNumberKey {
        ReportNumberKey::normalize(&self.scalars.report_no)
    }

    /// Drug names in slot order
    pub fn drug_names(&self) -> Vec<String> {
        self.drugs.iter().map(|drug| drug.name.clone()).collect()
    }
}
