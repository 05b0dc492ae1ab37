//! Column position tables for the extract files
//!
//! Each extract is a headerless `$`-delimited table, so every field is
//! addressed by its zero-based position. The defaults describe the current
//! Canada Vigilance layout. A source-file revision that moves columns is
//! handled by overriding the affected positions under `[layout.*]` in the
//! configuration file.
//!
//! # Example
//!
//! ```toml
//! [layout.drug]
//! dose_unit = 10
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Checks that no two logical fields share a position
fn validate_positions(table: &str, positions: &[(&'static str, usize)]) -> Result<(), String> {
    let mut seen: HashMap<usize, &'static str> = HashMap::new();
    for (name, position) in positions {
        if let Some(other) = seen.insert(*position, name) {
            return Err(format!(
                "layout.{table}: '{name}' and '{other}' both use position {position}"
            ));
        }
    }
    Ok(())
}

/// Minimum row length needed to read every position in the table
fn required_fields(positions: &[(&'static str, usize)]) -> usize {
    positions.iter().map(|(_, p)| p + 1).max().unwrap_or(0)
}

/// Report master extract (`reports.txt`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MasterLayout {
    pub report_id: usize,
    pub report_no: usize,
    pub version_no: usize,
    pub dat_received: usize,
    pub dat_int_received: usize,
    pub mah_no: usize,
    pub report_type: usize,
    pub gender: usize,
    pub age: usize,
    pub age_unit: usize,
    pub outcome: usize,
    pub weight: usize,
    pub weight_unit: usize,
    pub height: usize,
    pub height_unit: usize,
    pub seriousness: usize,
    pub death: usize,
    pub disability: usize,
    pub congenital_anomaly: usize,
    pub life_threatening: usize,
    pub hospitalization: usize,
    pub other_medically_important: usize,
    pub reporter_type: usize,
    pub source: usize,
}

impl Default for MasterLayout {
    fn default() -> Self {
        Self {
            report_id: 0,
            report_no: 1,
            version_no: 2,
            dat_received: 3,
            dat_int_received: 4,
            mah_no: 5,
            report_type: 7,
            gender: 10,
            age: 12,
            age_unit: 14,
            outcome: 17,
            weight: 19,
            weight_unit: 20,
            height: 22,
            height_unit: 23,
            seriousness: 26,
            death: 28,
            disability: 29,
            congenital_anomaly: 30,
            life_threatening: 31,
            hospitalization: 32,
            other_medically_important: 33,
            reporter_type: 34,
            source: 37,
        }
    }
}

impl MasterLayout {
    fn positions(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("report_id", self.report_id),
            ("report_no", self.report_no),
            ("version_no", self.version_no),
            ("dat_received", self.dat_received),
            ("dat_int_received", self.dat_int_received),
            ("mah_no", self.mah_no),
            ("report_type", self.report_type),
            ("gender", self.gender),
            ("age", self.age),
            ("age_unit", self.age_unit),
            ("outcome", self.outcome),
            ("weight", self.weight),
            ("weight_unit", self.weight_unit),
            ("height", self.height),
            ("height_unit", self.height_unit),
            ("seriousness", self.seriousness),
            ("death", self.death),
            ("disability", self.disability),
            ("congenital_anomaly", self.congenital_anomaly),
            ("life_threatening", self.life_threatening),
            ("hospitalization", self.hospitalization),
            ("other_medically_important", self.other_medically_important),
            ("reporter_type", self.reporter_type),
            ("source", self.source),
        ]
    }

    /// Rows shorter than this carry no usable scalars
    pub fn required_fields(&self) -> usize {
        required_fields(&self.positions())
    }

    /// Row length needed by the source filter
    pub fn source_filter_fields(&self) -> usize {
        self.report_id.max(self.source) + 1
    }
}

/// Drug detail extract (`report_drug.txt`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrugLayout {
    pub report_id: usize,
    pub drug_name: usize,
    pub involvement: usize,
    pub route: usize,
    pub dose_quantity: usize,
    pub dose_unit: usize,
    pub frequency_unit: usize,
    pub therapy_duration: usize,
    pub therapy_duration_unit: usize,
    pub dosage_form: usize,
}

impl Default for DrugLayout {
    fn default() -> Self {
        Self {
            report_id: 1,
            drug_name: 3,
            involvement: 4,
            route: 6,
            dose_quantity: 8,
            dose_unit: 9,
            frequency_unit: 15,
            therapy_duration: 17,
            therapy_duration_unit: 18,
            dosage_form: 20,
        }
    }
}

impl DrugLayout {
    fn positions(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("report_id", self.report_id),
            ("drug_name", self.drug_name),
            ("involvement", self.involvement),
            ("route", self.route),
            ("dose_quantity", self.dose_quantity),
            ("dose_unit", self.dose_unit),
            ("frequency_unit", self.frequency_unit),
            ("therapy_duration", self.therapy_duration),
            ("therapy_duration_unit", self.therapy_duration_unit),
            ("dosage_form", self.dosage_form),
        ]
    }

    /// Rows shorter than this are skipped when building drug slots
    pub fn required_fields(&self) -> usize {
        required_fields(&self.positions())
    }

    /// Row length the drug matcher needs (report id and drug name only)
    pub fn match_fields(&self) -> usize {
        self.report_id.max(self.drug_name) + 1
    }
}

/// Reaction extract (`reactions.txt`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactionLayout {
    pub report_id: usize,
    pub duration: usize,
    pub duration_unit: usize,
    pub term: usize,
    pub coding_version: usize,
}

impl Default for ReactionLayout {
    fn default() -> Self {
        Self {
            report_id: 1,
            duration: 2,
            duration_unit: 3,
            term: 5,
            coding_version: 9,
        }
    }
}

impl ReactionLayout {
    fn positions(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("report_id", self.report_id),
            ("duration", self.duration),
            ("duration_unit", self.duration_unit),
            ("term", self.term),
            ("coding_version", self.coding_version),
        ]
    }

    pub fn required_fields(&self) -> usize {
        required_fields(&self.positions())
    }
}

/// Report link extract (`report_links.txt`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkLayout {
    pub report_id: usize,
    pub record_type: usize,
    pub linked_report_no: usize,
}

impl Default for LinkLayout {
    fn default() -> Self {
        Self {
            report_id: 1,
            record_type: 2,
            linked_report_no: 4,
        }
    }
}

impl LinkLayout {
    fn positions(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("report_id", self.report_id),
            ("record_type", self.record_type),
            ("linked_report_no", self.linked_report_no),
        ]
    }

    pub fn required_fields(&self) -> usize {
        required_fields(&self.positions())
    }
}

/// Drug indication extract (`report_drug_indication.txt`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicationLayout {
    pub report_id: usize,
    pub drug_name: usize,
    pub indication: usize,
}

impl Default for IndicationLayout {
    fn default() -> Self {
        Self {
            report_id: 1,
            drug_name: 3,
            indication: 4,
        }
    }
}

impl IndicationLayout {
    fn positions(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("report_id", self.report_id),
            ("drug_name", self.drug_name),
            ("indication", self.indication),
        ]
    }

    pub fn required_fields(&self) -> usize {
        required_fields(&self.positions())
    }
}

/// The full column position table, one entry per extract
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub master: MasterLayout,
    pub drug: DrugLayout,
    pub reaction: ReactionLayout,
    pub link: LinkLayout,
    pub indication: IndicationLayout,
}

impl LayoutConfig {
    /// Validates every table
    ///
    /// # Errors
    ///
    /// Returns an error naming the table and fields when two logical fields
    /// of one table are mapped to the same position
    pub fn validate(&self) -> Result<(), String> {
        validate_positions("master", &self.master.positions())?;
        validate_positions("drug", &self.drug.positions())?;
        validate_positions("reaction", &self.reaction.positions())?;
        validate_positions("link", &self.link.positions())?;
        validate_positions("indication", &self.indication.positions())?;
        Ok(())
    }
}
