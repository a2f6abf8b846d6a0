//! JSON report output writer.
//!
//! Writes the same selection as the text output, plus run settings,
//! to a pretty-printed JSON file.

use super::select::{Record, Selection, SortField};
use crate::utils::config::{RunConfig, REPORT_SCHEMA_VERSION};
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Whole-run report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SumReport {
    /// Report schema version
    pub version: String,

    /// ISO 8601 timestamp
    pub generated_at: String,

    pub factor: i64,
    pub sort: SortField,
    pub reverse: bool,
    pub top: i64,

    /// Reported boxes, in pattern order
    pub boxes: Vec<BoxReport>,
}

/// One pattern's rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxReport {
    /// 1-based pattern position
    pub index: usize,
    pub pattern: String,

    /// Distinct keys before the top-N window
    pub total_keys: usize,

    pub records: Vec<Record>,
}

impl SumReport {
    /// Build a report from selected boxes
    pub fn new(selections: &[Selection<'_>], config: &RunConfig) -> Self {
        let boxes = selections
            .iter()
            .map(|s| BoxReport {
                index: s.index,
                pattern: s.tag_box.matcher().pattern().to_string(),
                total_keys: s.total_keys,
                records: s.records.clone(),
            })
            .collect();

        Self {
            version: REPORT_SCHEMA_VERSION.to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            factor: config.factor,
            sort: config.sort,
            reverse: config.reverse,
            top: config.top,
            boxes,
        }
    }
}

/// Write a report to a JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report(report: &SumReport, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing JSON report to: {}", output_path.display());

    validate_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, report).map_err(OutputError::SerializationFailed)?;

    debug!("Report written with {} boxes", report.boxes.len());
    Ok(())
}

/// Read a report back from a JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_report(input_path: impl AsRef<Path>) -> Result<SumReport, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let report: SumReport =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    Ok(report)
}

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
