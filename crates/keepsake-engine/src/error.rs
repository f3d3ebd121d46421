//! Error types for keepsake-engine

use thiserror::Error;

/// Errors surfaced to the host through the bridge.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Settings JSON could not be parsed
    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),

    /// Settings parsed but were rejected by the show
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// Result type for keepsake-engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
