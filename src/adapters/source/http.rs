//! HTTP extract source
//!
//! Each file is fetched with a plain `GET <base_url>/<key>`.

use super::ExtractSource;
use crate::domain::{Result, SourceError, VigilError};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use url::Url;

/// Reads extracts from an HTTP(S) base URL
#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: Url,
    client: Client,
}

impl HttpSource {
    /// Creates a source rooted at `base_url`
    ///
    /// # Arguments
    ///
    /// * `base_url` - Directory-like URL the file keys are resolved against
    /// * `timeout_seconds` - Per-request timeout
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the URL is invalid or the HTTP client
    /// can't be built
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self> {
        // Url::join replaces the last path segment unless the base ends in '/'
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized)
            .map_err(|e| VigilError::Configuration(format!("Invalid source URL: {e}")))?;

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(timeout_seconds))
            .connect_timeout(Duration::from_secs(timeout_seconds.min(30)))
            .build()
            .map_err(|e| {
                VigilError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self { base_url, client })
    }

    fn url_for(&self, key: &str) -> Result<Url> {
        self.base_url
            .join(key.trim_start_matches('/'))
            .map_err(|e| {
                VigilError::Source(SourceError::ReadFailed {
                    key: key.to_string(),
                    message: format!("invalid key: {e}"),
                })
            })
    }
}

#[async_trait]
impl ExtractSource for HttpSource {
    fn describe(&self) -> String {
        format!("http:{}", self.base_url)
    }

    async fn fetch_lines(&self, key: &str) -> Result<Vec<String>> {
        let url = self.url_for(key)?;

        let resp = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout(key.to_string())
            } else {
                SourceError::ConnectionFailed(e.to_string())
            }
        })?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(key.to_string()).into());
        }
        if !status.is_success() {
            return Err(SourceError::HttpStatus {
                status: status.as_u16(),
                key: key.to_string(),
            }
            .into());
        }

        let bytes = resp.bytes().await.map_err(|e| SourceError::ReadFailed {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        let text = String::from_utf8(bytes.to_vec())
            .map_err(|_| SourceError::InvalidEncoding(key.to_string()))?;

        Ok(text.lines().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_appends_key_to_base_path() {
        let source = HttpSource::new("https://files.example.com/cvp", 10).unwrap();
        assert_eq!(
            source.url_for("reports.txt").unwrap().as_str(),
            "https://files.example.com/cvp/reports.txt"
        );
        assert_eq!(
            source.url_for("/reactions.txt").unwrap().as_str(),
            "https://files.example.com/cvp/reactions.txt"
        );
    }

    #[test]
    fn test_new_rejects_invalid_url() {
        assert!(HttpSource::new("not a url", 10).is_err());
    }
}
