//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::num::ParseIntError;
use thiserror::Error;

/// Errors raised while building matchers and ingesting input
#[derive(Error, Debug)]
pub enum SumError {
    #[error("pattern error `{pattern}`: {source}")]
    PatternCompile {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("cannot open {source_name}: {source}")]
    SourceOpen {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("read error in {source_name}: {source}")]
    SourceRead {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("bad value {value:?} for pattern `{pattern}`: {source}")]
    ValueParse {
        pattern: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("value {value} x factor {factor} overflows for pattern `{pattern}`")]
    ValueOverflow {
        pattern: String,
        value: i64,
        factor: i64,
    },

    #[error("sum for key {key:?} overflows for pattern `{pattern}`")]
    SumOverflow { pattern: String, key: String },
}

/// Errors that can occur during JSON report output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
