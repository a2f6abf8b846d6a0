//! Utility modules for configuration, error handling, and formatting.

pub mod config;
pub mod error;
pub mod human;

// Re-export commonly used types for convenience
pub use config::RunConfig;
pub use error::{OutputError, SumError};
pub use human::human_bytes;
