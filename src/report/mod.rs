//! Reporting: sort, top-N selection and output.
//!
//! This module turns finished boxes into:
//! - Sorted, windowed rows (`select`)
//! - Fixed-width text for stdout (`render`)
//! - A JSON report file (`json`)

pub mod json;
pub mod render;
pub mod select;

// Re-export main types and functions
pub use json::{read_report, write_report, BoxReport, SumReport};
pub use render::{format_header, format_row, render_report};
pub use select::{select_box, select_boxes, Record, Selection, SortField};
