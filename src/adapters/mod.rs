//! External system integrations for Vigil.
//!
//! This module provides adapters for the systems a run talks to:
//!
//! - [`source`] - where the extract files are read from (local directory or HTTP)
//! - [`output`] - where artifacts are written and previously emitted reports are read back
//! - [`notify`] - where the missing-drug notice goes (log, webhook, or nowhere)
//! - [`factory`] - builds each of the above from configuration
//!
//! # Design Pattern
//!
//! Every integration sits behind an `async_trait` so the pipeline can be
//! driven with in-memory implementations in tests:
//!
//! ```rust,no_run
//! use vigil::adapters::factory::{create_extract_source, create_notifier, create_output_store};
//! use vigil::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("vigil.toml")?;
//! let source = create_extract_source(&config)?;
//! let store = create_output_store(&config)?;
//! let notifier = create_notifier(&config)?;
//! println!("{} -> {} ({})", source.describe(), store.describe(), notifier.describe());
//! # Ok(())
//! # }
//! ```

pub mod factory;
pub mod notify;
pub mod output;
pub mod source;

pub use factory::{create_extract_source, create_notifier, create_output_store};
pub use notify::Notifier;
pub use output::OutputStore;
pub use source::ExtractSource;
