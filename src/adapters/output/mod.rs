//! Output stores
//!
//! An [`OutputStore`] holds the emitted artifacts. The same store is read at
//! the start of a run to rebuild the set of already-emitted report numbers.

pub mod filesystem;

pub use filesystem::FilesystemOutputStore;

use crate::domain::Result;
use async_trait::async_trait;

/// Storage for emitted JSON artifacts
///
/// Artifact names are `/`-separated paths relative to the store root, e.g.
/// `report_output/reported_adverse_reaction_04_Feb_2014_10_00_00.json`.
#[async_trait]
pub trait OutputStore: Send + Sync {
    /// Human-readable location, for logs
    fn describe(&self) -> String;

    /// Lists artifact names under `prefix`, sorted
    ///
    /// A prefix that doesn't exist yet yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an output error if the listing itself fails
    async fn list_artifacts(&self, prefix: &str) -> Result<Vec<String>>;

    /// Reads one artifact
    ///
    /// # Errors
    ///
    /// Returns an output error if the artifact can't be read
    async fn read_artifact(&self, name: &str) -> Result<Vec<u8>>;

    /// Writes one artifact, replacing any existing artifact of the same name
    ///
    /// # Errors
    ///
    /// Returns an output error if the artifact can't be written
    async fn write_artifact(&self, name: &str, contents: &[u8]) -> Result<()>;
}
