//! Extract rows
//!
//! Every input file is a `$`-delimited text table with no header. At this
//! layer a row is just an ordered list of raw fields; positions are
//! interpreted by whichever stage consumes the row, using the column layout
//! from configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Field delimiter used by every extract
pub const FIELD_DELIMITER: char = '$';

/// The five extract tables plus the target drug list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractKind {
    /// One row per report with the scalar attributes
    Master,
    /// One row per drug administered on a report
    Drug,
    /// One row per reaction observed on a report
    Reaction,
    /// Duplicate/linked report references
    Link,
    /// Per-drug indications
    Indication,
    /// Plain list of drug names of interest
    DrugList,
}

impl ExtractKind {
    /// All kinds, in fetch order
    pub const ALL: [ExtractKind; 6] = [
        ExtractKind::Master,
        ExtractKind::Drug,
        ExtractKind::Reaction,
        ExtractKind::Link,
        ExtractKind::Indication,
        ExtractKind::DrugList,
    ];

    /// Short name used in logs and summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractKind::Master => "master",
            ExtractKind::Drug => "drug",
            ExtractKind::Reaction => "reaction",
            ExtractKind::Link => "link",
            ExtractKind::Indication => "indication",
            ExtractKind::DrugList => "drug_list",
        }
    }
}

impl fmt::Display for ExtractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of an extract split on [`FIELD_DELIMITER`]
///
/// Ordering and hashing compare the raw field tuple, so identical lines
/// collapse when collected into a set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExtractRow {
    fields: Vec<String>,
}

impl ExtractRow {
    /// Splits a raw line into fields. A trailing carriage return is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use vigil::domain::extract::ExtractRow;
    ///
    /// let row = ExtractRow::parse("1$42$\"TYLENOL\"\r");
    /// assert_eq!(row.len(), 3);
    /// assert_eq!(row.cleaned(2).as_deref(), Some("TYLENOL"));
    /// ```
    pub fn parse(line: &str) -> Self {
        let line = line.strip_suffix('\r').unwrap_or(line);
        Self {
            fields: line.split(FIELD_DELIMITER).map(str::to_string).collect(),
        }
    }

    /// Builds a row from already separated fields
    pub fn from_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of fields on the row
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the row has no fields at all
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether the row carries at least `count` fields
    pub fn has_at_least(&self, count: usize) -> bool {
        self.fields.len() >= count
    }

    /// Raw field at `index`
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Field at `index` with quoting removed, see [`clean_field`]
    pub fn cleaned(&self, index: usize) -> Option<String> {
        self.field(index).map(clean_field)
    }

    /// Cleaned field at `index`, or an empty string when the row is short
    pub fn cleaned_or_empty(&self, index: usize) -> String {
        self.cleaned(index).unwrap_or_default()
    }

    /// Raw fields in order
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

/// Parsed rows of the five report extracts
#[derive(Debug, Clone, Default)]
pub struct ExtractSet {
    pub master: Vec<ExtractRow>,
    pub drug: Vec<ExtractRow>,
    pub reaction: Vec<ExtractRow>,
    pub link: Vec<ExtractRow>,
    pub indication: Vec<ExtractRow>,
}

impl ExtractSet {
    /// Row count per extract, for logging
    pub fn row_counts(&self) -> [(ExtractKind, usize); 5] {
        [
            (ExtractKind::Master, self.master.len()),
            (ExtractKind::Drug, self.drug.len()),
            (ExtractKind::Reaction, self.reaction.len()),
            (ExtractKind::Link, self.link.len()),
            (ExtractKind::Indication, self.indication.len()),
        ]
    }
}

/// Parses a whole extract, dropping blank lines
pub fn parse_rows<S: AsRef<str>>(lines: &[S]) -> Vec<ExtractRow> {
    lines
        .iter()
        .map(AsRef::as_ref)
        .filter(|line| !line.trim().is_empty())
        .map(ExtractRow::parse)
        .collect()
}

/// Removes field quoting
///
/// Surrounding whitespace and any run of leading or trailing `"` are
/// stripped, then escaped inner quotes (`\"`) are unescaped.
///
/// # Examples
///
/// ```
/// use vigil::domain::extract::clean_field;
///
/// assert_eq!(clean_field("\"Suspect\""), "Suspect");
/// assert_eq!(clean_field("\"5 \\\"extra\\\" mg\""), "5 \"extra\" mg");
/// assert_eq!(clean_field("plain"), "plain");
/// ```
pub fn clean_field(raw: &str) -> String {
    raw.trim().trim_matches('"').replace("\\\"", "\"")
}

/// Normalizes a free-text name for comparison: cleaned, trimmed, lowercased
pub fn normalize_name(raw: &str) -> String {
    clean_field(raw).trim().to_lowercase()
}
