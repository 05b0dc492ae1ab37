//! Operator notifications
//!
//! Used for the missing-drug notice: target names that matched nothing in
//! the drug extract are sent to an operator channel once per run.

pub mod webhook;

pub use webhook::WebhookNotifier;

use crate::domain::{MissingDrugSet, Result};
use async_trait::async_trait;

/// Opening line of the missing-drug notice
pub const MISSING_DRUG_HEADER: &str =
    "The following drugs from the provided list were not found in the report data:";

/// Delivers a subject and message to an operator
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Human-readable channel name, for logs
    fn describe(&self) -> String;

    /// Sends one notification
    ///
    /// # Errors
    ///
    /// Returns a notification error if delivery fails
    async fn notify(&self, subject: &str, message: &str) -> Result<()>;
}

/// Writes notifications to the log at `warn`
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn describe(&self) -> String {
        "log".to_string()
    }

    async fn notify(&self, subject: &str, message: &str) -> Result<()> {
        tracing::warn!(subject = %subject, "{}", message);
        Ok(())
    }
}

/// Drops every notification
#[derive(Debug, Clone, Default)]
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    fn describe(&self) -> String {
        "disabled".to_string()
    }

    async fn notify(&self, subject: &str, _message: &str) -> Result<()> {
        tracing::debug!(subject = %subject, "Notifications disabled, dropping message");
        Ok(())
    }
}

/// Body of the missing-drug notice, or `None` when every target matched
///
/// ```
/// use vigil::adapters::notify::missing_drug_message;
/// use vigil::domain::{MissingDrugSet, TargetDrugSet};
/// use std::collections::BTreeSet;
///
/// let targets = TargetDrugSet::from_lines(&["Zyrtec", "aspirin"]);
/// let missing = MissingDrugSet::from_unmatched(&targets, &BTreeSet::new());
/// let message = missing_drug_message(&missing).unwrap();
/// assert!(message.ends_with("\n\naspirin\nzyrtec"));
/// ```
pub fn missing_drug_message(missing: &MissingDrugSet) -> Option<String> {
    if missing.is_empty() {
        return None;
    }
    Some(format!(
        "{}\n\n{}",
        MISSING_DRUG_HEADER,
        missing.names().join("\n")
    ))
}
