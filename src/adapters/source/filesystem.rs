//! Local directory extract source

use super::ExtractSource;
use crate::domain::{Result, SourceError};
use async_trait::async_trait;
use std::path::PathBuf;

/// Reads extracts from files under a root directory
#[derive(Debug, Clone)]
pub struct FilesystemSource {
    root: PathBuf,
}

impl FilesystemSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ExtractSource for FilesystemSource {
    fn describe(&self) -> String {
        format!("filesystem:{}", self.root.display())
    }

    async fn fetch_lines(&self, key: &str) -> Result<Vec<String>> {
        let path = self.root.join(key);
        let bytes = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SourceError::NotFound(path.display().to_string()),
            _ => SourceError::ReadFailed {
                key: key.to_string(),
                message: e.to_string(),
            },
        })?;

        let text =
            String::from_utf8(bytes).map_err(|_| SourceError::InvalidEncoding(key.to_string()))?;
        Ok(text.lines().map(str::to_string).collect())
    }
}
