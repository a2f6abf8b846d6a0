//! Line matchers and the default pattern set.
//!
//! A matcher wraps one compiled regular expression together with the
//! capture positions of its aggregation key and numeric value.

pub mod defaults;
pub mod matcher;

// Re-export main types
pub use defaults::{default_patterns, DEFAULT_PATTERNS};
pub use matcher::{Capture, Matcher};
