//! Target drug names
//!
//! The list of drugs of interest arrives as plain text, one name per line.
//! Names are compared in normalized form (trimmed, lowercased).

use serde::Serialize;
use std::collections::BTreeSet;

/// Case-normalized set of drug names to search for
///
/// Immutable once built. Duplicate names collapse after normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetDrugSet {
    names: BTreeSet<String>,
}

impl TargetDrugSet {
    /// Builds the set from raw list lines, ignoring blank lines
    ///
    /// # Examples
    ///
    /// ```
    /// use vigil::domain::targets::TargetDrugSet;
    ///
    /// let targets = TargetDrugSet::from_lines(&["Tylenol ", "", "TYLENOL", "Aspirin"]);
    /// assert_eq!(targets.len(), 2);
    /// assert!(targets.contains("tylenol"));
    /// ```
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let names = lines
            .iter()
            .map(|line| line.as_ref().trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect();
        Self { names }
    }

    /// Number of distinct normalized names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no names were supplied
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether `normalized` is one of the targets
    pub fn contains(&self, normalized: &str) -> bool {
        self.names.contains(normalized)
    }

    /// Normalized names in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Target names that matched no drug row during a run
///
/// Informational only. Names are kept sorted so notifications are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MissingDrugSet {
    names: BTreeSet<String>,
}

impl MissingDrugSet {
    /// Every target not present in `found`
    pub fn from_unmatched(targets: &TargetDrugSet, found: &BTreeSet<String>) -> Self {
        let names = targets
            .iter()
            .filter(|name| !found.contains(*name))
            .map(str::to_string)
            .collect();
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Missing names in sorted order
    pub fn names(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lines_normalizes_and_skips_blanks() {
        let targets = TargetDrugSet::from_lines(&["  Tylenol", "\t", "ASPIRIN  ", ""]);
        let names: Vec<&str> = targets.iter().collect();
        assert_eq!(names, vec!["aspirin", "tylenol"]);
    }

    #[test]
    fn test_empty_list() {
        let targets = TargetDrugSet::from_lines::<&str>(&[]);
        assert!(targets.is_empty());
    }

    #[test]
    fn test_missing_from_unmatched() {
        let targets = TargetDrugSet::from_lines(&["tylenol", "aspirin", "zyrtec"]);
        let found: BTreeSet<String> = ["tylenol".to_string()].into_iter().collect();
        let missing = MissingDrugSet::from_unmatched(&targets, &found);
        assert_eq!(missing.names(), vec!["aspirin", "zyrtec"]);
    }
}
