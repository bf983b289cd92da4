//! Error types for geoedit.
//!
//! The interaction layer itself never fails; only configuration input
//! (mode names, settings JSON, GeoJSON text) can be rejected.

use thiserror::Error;

/// Errors raised while reading editing configuration or feature data.
#[derive(Error, Debug)]
pub enum Error {
    /// A mode name that no editing behavior is registered for.
    #[error("unknown edit mode: {0:?}")]
    UnknownMode(String),

    /// An edit handle representation other than `point` or `icon`.
    #[error("unknown edit handle type: {0:?}")]
    UnknownHandleType(String),

    /// A coordinate array with fewer than 2 or more than 3 numbers.
    #[error("invalid position: expected 2 or 3 coordinates, got {0}")]
    InvalidPosition(usize),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenient alias for Result with [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
