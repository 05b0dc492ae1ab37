//! Configuration management for Vigil.
//!
//! Vigil reads a single TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `VIGIL_<SECTION>_<KEY>` environment overrides
//! - Defaults for every optional setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use vigil::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("vigil.toml")?;
//! println!("Reading extracts from {}", config.source.root);
//! println!("Writing to {}/{}", config.output.root, config.output.prefix);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - log level, dry run
//! - [`SourceConfig`] - where the five extracts and the drug list live
//! - [`OutputConfig`] - artifact location and naming
//! - [`SelectionConfig`] - manufacturer-sourced report filter
//! - [`LayoutConfig`] - column positions per extract
//! - [`NotificationConfig`] - missing-drug notification channel
//! - [`LoggingConfig`] - JSON file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [source]
//! kind = "http"
//! root = "https://files.example.com/cvp/"
//!
//! [output]
//! root = "/srv/vigil"
//!
//! [notification]
//! kind = "webhook"
//! webhook_url = "https://hooks.example.com/vigil"
//! webhook_token = "${VIGIL_WEBHOOK_TOKEN}"
//! ```

pub mod layout;
pub mod loader;
pub mod schema;
pub mod secret;

pub use layout::{
    DrugLayout, IndicationLayout, LayoutConfig, LinkLayout, MasterLayout, ReactionLayout,
};
pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, ExtractFiles, LoggingConfig, NotificationConfig, NotificationKind,
    OutputConfig, SelectionConfig, SourceConfig, SourceKind, VigilConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
