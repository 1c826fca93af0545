//! Error types for quaver

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuaverError {
    #[error("Invalid notation token: {0}")]
    InvalidNotationToken(String),
    #[error("Invalid note name: {0}")]
    InvalidDisplayName(String),
    #[error("Unknown key: {0}")]
    UnknownKey(String),
    #[error("Unknown genre: {0}")]
    UnknownGenre(String),
    #[error("Unknown scale: {0}")]
    UnknownScale(String),
    /// A notation token that yielded no pitches.
    #[error("Unplayable notation: {0:?}")]
    UnplayableNotation(String),
    /// Decoded tokens ran past the last representable step.
    #[error("Sequence too long at token {0:?}")]
    SequenceOverflow(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, QuaverError>;
