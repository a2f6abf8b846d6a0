use crate::utils::config::RunConfig;
use std::path::PathBuf;

/// Arguments for a summing run
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone, Default)]
pub struct SumArgs {
    /// Patterns, sources and reporting options
    pub config: RunConfig,

    /// Also write the report as JSON to this path
    pub json_output: Option<PathBuf>,
}
