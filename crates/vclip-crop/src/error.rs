//! Error types for the crop engine edges.
//!
//! The interactive engine never fails; it clamps. These errors surface only
//! where data enters or leaves it: imported region sets, export crops and
//! replay scripts.

use thiserror::Error;
use vclip_models::RegionSetError;

/// Result type for crop engine operations.
pub type CropResult<T> = Result<T, CropError>;

/// Errors that can occur at the crop engine's boundary.
#[derive(Debug, Error)]
pub enum CropError {
    #[error("Source size is unknown or degenerate: {width}x{height}")]
    SourceNotReady { width: f64, height: f64 },

    #[error("Invalid region set: {0}")]
    InvalidRegionSet(#[from] RegionSetError),

    #[error("Invalid replay script: {0}")]
    InvalidScript(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl CropError {
    /// Create a source-not-ready error.
    pub fn source_not_ready(width: f64, height: f64) -> Self {
        Self::SourceNotReady { width, height }
    }

    /// Create an invalid replay script error.
    pub fn invalid_script(message: impl Into<String>) -> Self {
        Self::InvalidScript(message.into())
    }
}
