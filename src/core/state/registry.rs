//! Registry of previously emitted report numbers
//!
//! Rebuilt at the start of every run by reading back the artifacts already in
//! the output store. There is no separate state file: the artifacts are the
//! state.

use crate::adapters::OutputStore;
use crate::domain::{Result, ReportNumberKey};
use serde_json::Value;
use std::collections::HashSet;

/// Report numbers emitted by earlier runs, normalized for comparison
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExistingReportRegistry {
    keys: HashSet<ReportNumberKey>,
}

impl ExistingReportRegistry {
    /// Builds a registry directly from known keys
    pub fn from_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = ReportNumberKey>,
    {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// Reads every `*.json` artifact under `prefix`
    ///
    /// Artifacts that can't be read or parsed are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an output error if the prefix can't be listed
    pub async fn load(store: &dyn OutputStore, prefix: &str) -> Result<Self> {
        let names = store.list_artifacts(prefix).await?;

        let mut keys = HashSet::new();
        let mut artifacts = 0usize;
        for name in names.iter().filter(|n| n.ends_with(".json")) {
            let bytes = match store.read_artifact(name).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!(artifact = %name, error = %e, "Skipping unreadable artifact");
                    continue;
                }
            };
            match report_numbers(&bytes) {
                Ok(found) => {
                    artifacts += 1;
                    keys.extend(found);
                }
                Err(e) => {
                    tracing::warn!(artifact = %name, error = %e, "Skipping malformed artifact");
                }
            }
        }

        tracing::info!(
            prefix = %prefix,
            artifacts = artifacts,
            report_numbers = keys.len(),
            "Loaded existing report registry"
        );
        Ok(Self { keys })
    }

    /// Whether `key` was emitted before
    pub fn contains(&self, key: &ReportNumberKey) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Extracts `report_no` from each object of an artifact's JSON array
fn report_numbers(bytes: &[u8]) -> std::result::Result<Vec<ReportNumberKey>, serde_json::Error> {
    let records: Vec<serde_json::Map<String, Value>> = serde_json::from_slice(bytes)?;
    Ok(records
        .iter()
        .filter_map(|record| match record.get("report_no")? {
            Value::String(s) => Some(ReportNumberKey::normalize(s)),
            Value::Number(n) => Some(ReportNumberKey::normalize(n.to_string())),
            _ => None,
        })
        .filter(|key| !key.is_blank())
        .collect())
}
