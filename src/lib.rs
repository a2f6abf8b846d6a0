//! Tagsum
//!
//! Aggregates numbers extracted from lines of text (typically directory
//! listings) into per-pattern tag totals, counts, ratios and maxima, then
//! reports them sorted and cut to a top-N window.
//!
//! This crate provides the core implementation for the `tagsum` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! ls -l | tagsum
//! ls -Rs1 | tagsum -k --top 10
//! ```

pub mod aggregator;
pub mod commands;
pub mod pattern;
pub mod report;
pub mod utils;
