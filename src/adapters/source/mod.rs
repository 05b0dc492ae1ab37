//! Extract sources
//!
//! An [`ExtractSource`] hands back the lines of one input file by key. The
//! pipeline fetches all six inputs at once through [`fetch_extracts`]; a file
//! that can't be fetched is logged, recorded, and treated as empty so the run
//! still completes over whatever data is available.

pub mod filesystem;
pub mod http;

pub use filesystem::FilesystemSource;
pub use http::HttpSource;

use crate::config::ExtractFiles;
use crate::domain::extract::parse_rows;
use crate::domain::{ExtractKind, ExtractSet, Result};
use async_trait::async_trait;
use std::time::Instant;

/// Read access to the raw input files
#[async_trait]
pub trait ExtractSource: Send + Sync {
    /// Human-readable location, for logs
    fn describe(&self) -> String;

    /// Fetches the file `key` and splits it into lines
    ///
    /// # Errors
    ///
    /// Returns a source error if the file is missing, unreadable, or not UTF-8
    async fn fetch_lines(&self, key: &str) -> Result<Vec<String>>;
}

/// A fetch that failed and was replaced by an empty dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub kind: ExtractKind,
    pub key: String,
    pub error: String,
}

/// Everything fetched for one run
#[derive(Debug, Clone, Default)]
pub struct FetchedExtracts {
    /// Parsed report extracts
    pub extracts: ExtractSet,

    /// Raw target drug list lines
    pub drug_list: Vec<String>,

    /// Inputs that could not be fetched
    pub failures: Vec<FetchFailure>,
}

async fn fetch_one(
    source: &dyn ExtractSource,
    kind: ExtractKind,
    key: &str,
) -> std::result::Result<Vec<String>, FetchFailure> {
    let started = Instant::now();
    match source.fetch_lines(key).await {
        Ok(lines) => {
            tracing::info!(
                extract = %kind,
                file = %key,
                lines = lines.len(),
                duration_ms = started.elapsed().as_millis() as u64,
                "Fetched extract"
            );
            Ok(lines)
        }
        Err(e) => {
            tracing::error!(
                extract = %kind,
                file = %key,
                source = %source.describe(),
                error = %e,
                "Failed to fetch extract, continuing with an empty dataset"
            );
            Err(FetchFailure {
                kind,
                key: key.to_string(),
                error: e.to_string(),
            })
        }
    }
}

/// Fetches the five extracts and the drug list concurrently
///
/// Never fails: each input that can't be fetched becomes empty and is
/// listed in [`FetchedExtracts::failures`].
pub async fn fetch_extracts(source: &dyn ExtractSource, files: &ExtractFiles) -> FetchedExtracts {
    let (master, drug, reaction, link, indication, drug_list) = tokio::join!(
        fetch_one(source, ExtractKind::Master, &files.master),
        fetch_one(source, ExtractKind::Drug, &files.drug),
        fetch_one(source, ExtractKind::Reaction, &files.reaction),
        fetch_one(source, ExtractKind::Link, &files.link),
        fetch_one(source, ExtractKind::Indication, &files.indication),
        fetch_one(source, ExtractKind::DrugList, &files.drug_list),
    );

    let mut failures = Vec::new();
    let mut settle = |fetched: std::result::Result<Vec<String>, FetchFailure>| match fetched {
        Ok(lines) => lines,
        Err(failure) => {
            failures.push(failure);
            Vec::new()
        }
    };

    let extracts = ExtractSet {
        master: parse_rows(&settle(master)),
        drug: parse_rows(&settle(drug)),
        reaction: parse_rows(&settle(reaction)),
        link: parse_rows(&settle(link)),
        indication: parse_rows(&settle(indication)),
    };
    let drug_list = settle(drug_list);

    FetchedExtracts {
        extracts,
        drug_list,
        failures,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SourceError, VigilError};
    use std::collections::HashMap;

    struct MemorySource {
        files: HashMap<String, Vec<String>>,
    }

    #[async_trait]
    impl ExtractSource for MemorySource {
        fn describe(&self) -> String {
            "memory".to_string()
        }

        async fn fetch_lines(&self, key: &str) -> Result<Vec<String>> {
            self.files
                .get(key)
                .cloned()
                .ok_or_else(|| VigilError::Source(SourceError::NotFound(key.to_string())))
        }
    }

    #[tokio::test]
    async fn test_missing_file_becomes_empty_dataset() {
        let files = ExtractFiles::default();
        let mut contents = HashMap::new();
        contents.insert(files.drug.clone(), vec!["1$42$x$TYLENOL".to_string()]);
        contents.insert(files.drug_list.clone(), vec!["tylenol".to_string()]);
        let source = MemorySource { files: contents };

        let fetched = fetch_extracts(&source, &files).await;
        assert_eq!(fetched.extracts.drug.len(), 1);
        assert_eq!(fetched.drug_list, vec!["tylenol"]);
        assert!(fetched.extracts.master.is_empty());

        let failed: Vec<ExtractKind> = fetched.failures.iter().map(|f| f.kind).collect();
        assert_eq!(
            failed,
            vec![
                ExtractKind::Master,
                ExtractKind::Reaction,
                ExtractKind::Link,
                ExtractKind::Indication
            ]
        );
    }

    #[tokio::test]
    async fn test_blank_lines_are_not_rows() {
        let files = ExtractFiles::default();
        let mut contents = HashMap::new();
        for kind in ExtractKind::ALL {
            contents.insert(files.key_for(kind).to_string(), vec![String::new()]);
        }
        let source = MemorySource { files: contents };

        let fetched = fetch_extracts(&source, &files).await;
        assert!(fetched.failures.is_empty());
        assert!(fetched.extracts.reaction.is_empty());
    }
}
