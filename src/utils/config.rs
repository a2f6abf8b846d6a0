//! Configuration and constants for the CLI.

use crate::pattern::default_patterns;
use crate::report::SortField;

/// Current JSON report schema version
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Multiplier applied to every extracted value unless overridden
pub const DEFAULT_FACTOR: i64 = 1;

/// Factor used by the `-k` shortcut (values counted in 1K blocks)
pub const KILO_FACTOR: i64 = 1024;

// Capture positions used when a pattern has no `k` / `v` named groups
pub const DEFAULT_KEY_GROUP: usize = 2;
pub const DEFAULT_VALUE_GROUP: usize = 1;

/// Whole match + key + value
pub const MIN_CAPTURES: usize = 3;

/// Keys longer than this are cut in text output
pub const KEY_DISPLAY_WIDTH: usize = 80;

/// Source name that stands for standard input
pub const STDIN_SOURCE: &str = "-";

/// Everything the engine and the reporter need for one run.
///
/// Built once (normally from CLI arguments) and passed by reference.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Pattern texts, in declaration order
    pub patterns: Vec<String>,

    /// Input sources, `-` or empty for stdin
    pub sources: Vec<String>,

    /// Value multiplier
    pub factor: i64,

    /// Top-N window; values <= 0 disable it
    pub top: i64,

    /// Field used to order rows
    pub sort: SortField,

    /// Flip the sort comparison (and take the head instead of the tail)
    pub reverse: bool,

    /// Lower-case keys before aggregation
    pub lower: bool,

    /// Do not report boxes that collected nothing
    pub skip_empty: bool,

    /// Log and continue on pattern, source and value errors
    pub ignore_errors: bool,

    /// Print box headers and trailing blank lines
    pub verbose: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            patterns: default_patterns(),
            sources: vec![STDIN_SOURCE.to_string()],
            factor: DEFAULT_FACTOR,
            top: -1,
            sort: SortField::Sum,
            reverse: false,
            lower: false,
            skip_empty: false,
            ignore_errors: true,
            verbose: true,
        }
    }
}

impl RunConfig {
    /// Positive window size, if the top-N window is enabled
    pub fn top_limit(&self) -> Option<usize> {
        usize::try_from(self.top).ok().filter(|n| *n > 0)
    }
}
