//! Domain identifier types with validation
//!
//! Adverse reaction extracts carry two identifiers per report: the internal
//! report id, which joins rows across every extract of one snapshot, and the
//! externally published report number, which is stable across snapshots and
//! is what previously emitted output is compared on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Report identifier newtype wrapper
///
/// The correlation key shared by all five extracts. Always trimmed and never
/// empty.
///
/// # Examples
///
/// ```
/// use vigil::domain::ids::ReportId;
/// use std::str::FromStr;
///
/// let id = ReportId::from_str(" 000123 ").unwrap();
/// assert_eq!(id.as_str(), "000123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReportId(String);

impl ReportId {
    /// Creates a new ReportId from a string
    ///
    /// # Arguments
    ///
    /// * `id` - The raw report id field, surrounding whitespace allowed
    ///
    /// # Returns
    ///
    /// Returns `Ok(ReportId)` if the trimmed id is non-empty, `Err` otherwise
    pub fn new(id: impl AsRef<str>) -> Result<Self, String> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            return Err("Report ID cannot be empty".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the report id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReportId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ReportId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalized report number
///
/// The comparison key used to recognise reports that were already emitted by
/// an earlier run. Normalization trims and lowercases, so `" ABC-1 "` and
/// `"abc-1"` are the same key. Unlike [`ReportId`] an empty value is allowed:
/// a master row may omit the number, and such records still compare equal to
/// each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReportNumberKey(String);

impl ReportNumberKey {
    /// Normalizes a raw report number into a comparison key
    pub fn normalize(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_lowercase())
    }

    /// Returns the normalized key
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A blank report number identifies nothing and never matches
    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ReportNumberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
