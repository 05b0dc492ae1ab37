//! Output records and artifact rendering
//!
//! An [`OutputRecord`] is the serialized form of one correlated report.
//! Drug and reaction slots are projected into parallel arrays here, at the
//! output boundary, so the arrays line up by construction.

use super::convert::{convert_date, convert_yes_no, join_value_unit};
use crate::domain::{CorrelatedReport, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

/// Timestamp format embedded in artifact names, e.g. `04_Feb_2014_10_00_00`
const ARTIFACT_TIMESTAMP_FORMAT: &str = "%d_%b_%Y_%H_%M_%S";

/// One emitted report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub report_id: String,
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
    pub record_type: String,
    pub linked_report_no: String,

    pub drug_name: Vec<String>,
    pub drug_involvement: Vec<String>,
    pub dosage_form: Vec<String>,
    pub route: Vec<String>,
    pub dose: Vec<String>,
    pub frequency: Vec<String>,
    pub therapy_duration: Vec<String>,
    pub indication: Vec<String>,

    pub reaction_term: Vec<String>,
    pub coding_version: Vec<String>,
    pub reaction_duration: Vec<String>,
    pub reaction_duration_unit: Vec<String>,
}

impl OutputRecord {
    /// Builds the output form of a correlated report
    ///
    /// Dates are converted to ISO 8601 and seriousness flags to yes/no.
    pub fn from_report(report: &CorrelatedReport) -> Self {
        let s = &report.scalars;
        let drugs = &report.drugs;
        let reactions = &report.reactions;

        Self {
            report_id: report.report_id.to_string(),
            report_no: s.report_no.clone(),
            version_no: s.version_no.clone(),
            dat_received: convert_date(&s.dat_received),
            dat_int_received: convert_date(&s.dat_int_received),
            mah_no: s.mah_no.clone(),
            report_type: s.report_type.clone(),
            gender: s.gender.clone(),
            age: s.age.clone(),
            age_unit: s.age_unit.clone(),
            outcome: s.outcome.clone(),
            weight: s.weight.clone(),
            weight_unit: s.weight_unit.clone(),
            height: s.height.clone(),
            height_unit: s.height_unit.clone(),
            seriousness: s.seriousness.clone(),
            death: convert_yes_no(&s.death),
            disability: convert_yes_no(&s.disability),
            congenital_anomaly: convert_yes_no(&s.congenital_anomaly),
            life_threatening: convert_yes_no(&s.life_threatening),
            hospitalization: convert_yes_no(&s.hospitalization),
            other_medically_important: convert_yes_no(&s.other_medically_important),
            reporter_type: s.reporter_type.clone(),
            source: s.source.clone(),
            record_type: report.linkage.record_type.clone(),
            linked_report_no: report.linkage.linked_report_no.clone(),

            drug_name: drugs.iter().map(|d| d.name.clone()).collect(),
            drug_involvement: drugs.iter().map(|d| d.involvement.clone()).collect(),
            dosage_form: drugs.iter().map(|d| d.dosage_form.clone()).collect(),
            route: drugs.iter().map(|d| d.route.clone()).collect(),
            dose: drugs
                .iter()
                .map(|d| join_value_unit(&d.dose_quantity, &d.dose_unit))
                .collect(),
            frequency: drugs.iter().map(|d| d.frequency_unit.clone()).collect(),
            therapy_duration: drugs
                .iter()
                .map(|d| join_value_unit(&d.therapy_duration, &d.therapy_duration_unit))
                .collect(),
            indication: drugs.iter().map(|d| d.indication.clone()).collect(),

            reaction_term: reactions.iter().map(|r| r.term.clone()).collect(),
            coding_version: reactions.iter().map(|r| r.coding_version.clone()).collect(),
            reaction_duration: reactions.iter().map(|r| r.duration.clone()).collect(),
            reaction_duration_unit: reactions.iter().map(|r| r.duration_unit.clone()).collect(),
        }
    }

    /// Whether every drug array has one entry per drug and every reaction
    /// array one entry per reaction
    pub fn is_aligned(&self) -> bool {
        let drugs = self.drug_name.len();
        let reactions = self.reaction_term.len();
        [
            self.drug_involvement.len(),
            self.dosage_form.len(),
            self.route.len(),
            self.dose.len(),
            self.frequency.len(),
            self.therapy_duration.len(),
            self.indication.len(),
        ]
        .iter()
        .all(|&len| len == drugs)
            && [
                self.coding_version.len(),
                self.reaction_duration.len(),
                self.reaction_duration_unit.len(),
            ]
            .iter()
            .all(|&len| len == reactions)
    }
}

/// Serializes records as a JSON array indented with four spaces
///
/// # Errors
///
/// Returns a serialization error if a record can't be encoded
pub fn render_artifact(records: &[OutputRecord]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    records.serialize(&mut serializer)?;
    Ok(buffer)
}

/// Artifact path for a run started at `timestamp`
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use vigil::core::transform::artifact_name;
///
/// let at = Utc.with_ymd_and_hms(2014, 2, 4, 10, 0, 0).unwrap();
/// assert_eq!(
///     artifact_name("report_output", "reported_adverse_reaction", at),
///     "report_output/reported_adverse_reaction_04_Feb_2014_10_00_00.json"
/// );
/// ```
pub fn artifact_name(prefix: &str, file_stem: &str, timestamp: DateTime<Utc>) -> String {
    format!(
        "{}/{}_{}.json",
        prefix.trim_end_matches('/'),
        file_stem,
        timestamp.format(ARTIFACT_TIMESTAMP_FORMAT)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DrugSlot, Linkage, ReactionSlot, ReportId};

    fn report() -> CorrelatedReport {
        let mut report = CorrelatedReport::skeleton(ReportId::new("42").unwrap());
        report.has_master = true;
        report.scalars.report_no = "E2B-42".to_string();
        report.scalars.dat_received = "04-FEB-14".to_string();
        report.scalars.dat_int_received = "unknown".to_string();
        report.scalars.death = "2".to_string();
        report.scalars.hospitalization = "1".to_string();
        report.scalars.disability = "3".to_string();
        report.drugs = vec![
            DrugSlot {
                name: "TYLENOL".to_string(),
                dose_quantity: "500".to_string(),
                dose_unit: "mg".to_string(),
                therapy_duration: "3".to_string(),
                therapy_duration_unit: "Days".to_string(),
                indication: "Fever".to_string(),
                ..Default::default()
            },
            DrugSlot {
                name: "BENADRYL".to_string(),
                dose_quantity: "25".to_string(),
                ..Default::default()
            },
        ];
        report.reactions = vec![ReactionSlot {
            term: "Headache".to_string(),
            coding_version: "v.26.0".to_string(),
            ..Default::default()
        }];
        report
    }

    #[test]
    fn test_from_report_converts_scalars() {
        let record = OutputRecord::from_report(&report());
        assert_eq!(record.report_id, "42");
        assert_eq!(record.dat_received, "2014-02-04");
        assert_eq!(record.dat_int_received, "unknown");
        assert_eq!(record.death, "no");
        assert_eq!(record.hospitalization, "yes");
        assert_eq!(record.disability, "3");
    }

    #[test]
    fn test_from_report_projects_aligned_arrays() {
        let record = OutputRecord::from_report(&report());
        assert_eq!(record.drug_name, vec!["TYLENOL", "BENADRYL"]);
        assert_eq!(record.dose, vec!["500 mg", "25"]);
        assert_eq!(record.therapy_duration, vec!["3 Days", ""]);
        assert_eq!(record.indication, vec!["Fever", ""]);
        assert_eq!(record.reaction_term, vec!["Headache"]);
        assert!(record.is_aligned());
    }

    #[test]
    fn test_unlinked_report_carries_placeholder() {
        let record = OutputRecord::from_report(&report());
        assert_eq!(record.record_type, Linkage::none().record_type);
        assert_eq!(record.linked_report_no, Linkage::none().linked_report_no);
    }

    #[test]
    fn test_empty_report_has_complete_field_set() {
        let empty = CorrelatedReport::skeleton(ReportId::new("7").unwrap());
        let value = serde_json::to_value(OutputRecord::from_report(&empty)).unwrap();
        let object = value.as_object().unwrap();
        for key in ["drug_name", "indication", "reaction_term", "dose", "frequency"] {
            assert_eq!(object[key], serde_json::json!([]), "{key}");
        }
        assert_eq!(object["report_no"], "");
    }

    #[test]
    fn test_is_aligned_detects_mismatch() {
        let mut record = OutputRecord::from_report(&report());
        record.indication.pop();
        assert!(!record.is_aligned());
    }

    #[test]
    fn test_render_artifact_uses_four_space_indent() {
        let bytes = render_artifact(&[OutputRecord::from_report(&report())]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("[\n    {\n        \"report_id\": \"42\""));

        let parsed: Vec<OutputRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_render_empty_artifact() {
        let bytes = render_artifact(&[]).unwrap();
        assert_eq!(bytes, b"[]");
    }
}
