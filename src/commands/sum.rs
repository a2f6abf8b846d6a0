//! Sum command implementation.
//!
//! The sum command:
//! 1. Compiles every pattern into a box
//! 2. Reads all sources line by line
//! 3. Sorts and windows each box
//! 4. Writes rows to the output stream
//! 5. Optionally writes a JSON report

use crate::aggregator::{Engine, IngestStats};
use crate::commands::models::SumArgs;
use crate::report::{render_report, select_boxes, write_report, SumReport};
use anyhow::{Context, Result};
use log::{debug, info};
use std::io::Write;
use std::time::Instant;

/// Execute a summing run, writing rows to `out`
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Pattern compile errors (strict mode)
/// * Source open/read errors and bad values (strict mode)
/// * Write errors on `out` or the JSON report
pub fn execute_sum<W: Write>(args: &SumArgs, out: &mut W) -> Result<IngestStats> {
    let start_time = Instant::now();
    let config = &args.config;

    debug!(
        "Run: {} patterns, {} sources, factor {}, top {}, sort {} ({}), reverse {}",
        config.patterns.len(),
        config.sources.len(),
        config.factor,
        config.top,
        config.sort,
        config.sort.code(),
        config.reverse
    );

    let mut engine = Engine::new(config).context("Failed to compile patterns")?;
    engine
        .ingest_sources()
        .context("Aborted while reading input")?;

    let stats = engine.stats();
    let boxes = engine.finish();

    let selections = select_boxes(&boxes, config);
    render_report(out, &selections, config.verbose).context("Failed to write report")?;

    if let Some(path) = &args.json_output {
        let report = SumReport::new(&selections, config);
        write_report(&report, path).context("Failed to write JSON report")?;
        info!("✓ JSON report written to: {}", path.display());
    }

    info!(
        "Run completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    Ok(stats)
}

/// Validate run arguments
///
/// **Public** - can be called before execute_sum for early validation
pub fn validate_args(args: &SumArgs) -> Result<()> {
    let config = &args.config;

    if config.patterns.is_empty() {
        anyhow::bail!("At least one pattern is required");
    }

    if config.sources.is_empty() {
        anyhow::bail!("At least one input source is required");
    }

    if config.factor == 0 {
        anyhow::bail!("Factor must be non-zero");
    }

    Ok(())
}
