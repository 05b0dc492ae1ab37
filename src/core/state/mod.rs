// Cross-run state: the registry of emitted reports and deduplication against it

pub mod dedup;
pub mod registry;

pub use dedup::{DedupOutcome, Deduplicator};
pub use registry::ExistingReportRegistry;
