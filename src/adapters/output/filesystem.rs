//! Local directory output store

use super::OutputStore;
use crate::domain::{OutputError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Stores artifacts as files under a root directory
#[derive(Debug, Clone)]
pub struct FilesystemOutputStore {
    root: PathBuf,
}

impl FilesystemOutputStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, name: &str) -> PathBuf {
        name.split('/')
            .filter(|part| !part.is_empty())
            .fold(self.root.clone(), |path, part| path.join(part))
    }

    fn relative_name(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }
}

#[async_trait]
impl OutputStore for FilesystemOutputStore {
    fn describe(&self) -> String {
        format!("filesystem:{}", self.root.display())
    }

    async fn list_artifacts(&self, prefix: &str) -> Result<Vec<String>> {
        let list_failed = |e: std::io::Error| OutputError::ListFailed {
            prefix: prefix.to_string(),
            message: e.to_string(),
        };

        let start = self.path_for(prefix);
        if !tokio::fs::try_exists(&start).await.map_err(list_failed)? {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        let mut pending = vec![start];
        while let Some(dir) = pending.pop() {
            let mut entries = tokio::fs::read_dir(&dir).await.map_err(list_failed)?;
            while let Some(entry) = entries.next_entry().await.map_err(list_failed)? {
                let file_type = entry.file_type().await.map_err(list_failed)?;
                let path = entry.path();
                if file_type.is_dir() {
                    pending.push(path);
                } else if let Some(name) = self.relative_name(&path) {
                    names.push(name);
                }
            }
        }

        names.sort();
        Ok(names)
    }

    async fn read_artifact(&self, name: &str) -> Result<Vec<u8>> {
        let bytes = tokio::fs::read(self.path_for(name))
            .await
            .map_err(|e| OutputError::ReadFailed {
                name: name.to_string(),
                message: e.to_string(),
            })?;
        Ok(bytes)
    }

    async fn write_artifact(&self, name: &str, contents: &[u8]) -> Result<()> {
        let write_failed = |e: std::io::Error| OutputError::WriteFailed {
            name: name.to_string(),
            message: e.to_string(),
        };

        let path = self.path_for(name);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(write_failed)?;
        }

        // Readers listing the prefix must never see a half-written artifact
        let staging = path.with_extension("json.partial");
        tokio::fs::write(&staging, contents)
            .await
            .map_err(write_failed)?;
        tokio::fs::rename(&staging, &path)
            .await
            .map_err(write_failed)?;

        tracing::debug!(artifact = %name, bytes = contents.len(), "Wrote artifact");
        Ok(())
    }
}
