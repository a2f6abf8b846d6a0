//! Aggregation of matched values into per-pattern, per-key statistics.
//!
//! This module covers the ingest phase:
//! - `Aggregate` running totals (sum, count, max) per key
//! - `TagBox`, one matcher plus its key map
//! - `Engine`, which feeds every input line to every box

pub mod engine;
pub mod tally;

// Re-export main types
pub use engine::{is_stdin, Engine, IngestStats};
pub use tally::{Aggregate, ScanOutcome, TagBox};
