//! Errors raised at the simulation boundary
//!
//! Nothing inside the per-step growth loop can fail; these cover input
//! validation and config loading only.

use thiserror::Error;

/// Errors that can occur before a run starts.
#[derive(Error, Debug)]
pub enum SubstrateError {
    #[error("Palette must contain at least one color")]
    EmptyPalette,

    #[error("Invalid field dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("max_cracks must be at least 1")]
    ZeroPopulation,

    #[error("Invalid collision tolerance: {0}")]
    InvalidTolerance(f32),

    #[error("Invalid color '{0}', expected #rrggbb")]
    InvalidColor(String),

    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for boundary operations.
pub type SubstrateResult<T> = Result<T, SubstrateError>;
