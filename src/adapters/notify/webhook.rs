//! Webhook notifier

use super::Notifier;
use crate::config::{NotificationConfig, SecretString};
use crate::domain::{Result, VigilError};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use serde::Serialize;
use std::time::Duration;

#[derive(Serialize)]
struct WebhookPayload<'a> {
    subject: &'a str,
    message: &'a str,
}

/// POSTs notifications as JSON to a webhook URL
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    url: String,
    token: Option<SecretString>,
    client: Client,
}

impl WebhookNotifier {
    /// Creates a notifier for `url`
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client can't be built
    pub fn new(url: &str, token: Option<SecretString>, timeout_seconds: u64) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| {
                VigilError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            url: url.to_string(),
            token,
            client,
        })
    }

    /// Creates a notifier from the `[notification]` section
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `webhook_url` is not set
    pub fn from_config(config: &NotificationConfig) -> Result<Self> {
        let url = config.webhook_url.as_deref().ok_or_else(|| {
            VigilError::Configuration("notification.webhook_url is required".to_string())
        })?;
        Self::new(url, config.webhook_token.clone(), config.timeout_seconds)
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    fn describe(&self) -> String {
        format!("webhook:{}", self.url)
    }

    async fn notify(&self, subject: &str, message: &str) -> Result<()> {
        let mut request = self
            .client
            .post(&self.url)
            .json(&WebhookPayload { subject, message });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.expose_secret().as_str());
        }

        let resp = request
            .send()
            .await
            .map_err(|e| VigilError::Notification(format!("Webhook request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(VigilError::Notification(format!(
                "Webhook returned {status}: {body}"
            )));
        }

        tracing::info!(subject = %subject, "Notification delivered");
        Ok(())
    }
}
