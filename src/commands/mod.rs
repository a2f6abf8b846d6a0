//! CLI command implementations.
//!
//! Commands orchestrate the library components: build the engine, ingest
//! every source, then select and render each box.

pub mod models;
pub mod sum;
pub mod utils;

// Re-export main command functions
pub use models::SumArgs;
pub use sum::{execute_sum, validate_args};
pub use utils::display_patterns;
