//! Correlation of the five extracts into one record per report
//!
//! - [`passes`] - one independent pass per extract
//! - [`indication`] - name-keyed indication alignment
//! - [`correlator`] - runs the passes and merges their results

pub mod correlator;
pub mod indication;
pub mod passes;

pub use correlator::{Correlation, CorrelationStats, Correlator};
pub use indication::{align_indications, IndicationIndex};
pub use passes::{drug_pass, link_pass, master_pass, reaction_pass, DrugPass};
