//! Adapter factory
//!
//! Builds the source, output store and notifier selected by configuration.

use crate::adapters::notify::{DisabledNotifier, LogNotifier, Notifier, WebhookNotifier};
use crate::adapters::output::{FilesystemOutputStore, OutputStore};
use crate::adapters::source::{ExtractSource, FilesystemSource, HttpSource};
use crate::config::{NotificationKind, SourceKind, VigilConfig};
use crate::domain::Result;
use std::sync::Arc;

/// Create the extract source named by `source.kind`
///
/// # Errors
///
/// Returns an error if the source can't be created (e.g. an invalid URL)
pub fn create_extract_source(config: &VigilConfig) -> Result<Arc<dyn ExtractSource + Send + Sync>> {
    match config.source.kind {
        SourceKind::Filesystem => {
            tracing::info!(root = %config.source.root, "Creating filesystem extract source");
            Ok(Arc::new(FilesystemSource::new(&config.source.root))
                as Arc<dyn ExtractSource + Send + Sync>)
        }
        SourceKind::Http => {
            tracing::info!(base_url = %config.source.root, "Creating HTTP extract source");
            let source = HttpSource::new(&config.source.root, config.source.timeout_seconds)?;
            Ok(Arc::new(source) as Arc<dyn ExtractSource + Send + Sync>)
        }
    }
}

/// Create the output store for `output.root`
///
/// # Errors
///
/// Currently infallible for the filesystem store
pub fn create_output_store(config: &VigilConfig) -> Result<Arc<dyn OutputStore + Send + Sync>> {
    tracing::info!(root = %config.output.root, "Creating filesystem output store");
    Ok(Arc::new(FilesystemOutputStore::new(&config.output.root))
        as Arc<dyn OutputStore + Send + Sync>)
}

/// Create the notifier named by `notification.kind`
///
/// # Errors
///
/// Returns an error if the webhook notifier can't be created
pub fn create_notifier(config: &VigilConfig) -> Result<Arc<dyn Notifier + Send + Sync>> {
    let notifier: Arc<dyn Notifier + Send + Sync> = match config.notification.kind {
        NotificationKind::Log => Arc::new(LogNotifier),
        NotificationKind::Disabled => Arc::new(DisabledNotifier),
        NotificationKind::Webhook => {
            Arc::new(WebhookNotifier::from_config(&config.notification)?)
        }
    };
    tracing::info!(notifier = %notifier.describe(), "Created notifier");
    Ok(notifier)
}
