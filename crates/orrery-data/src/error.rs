//! Error types for ephemeris retrieval

use thiserror::Error;

/// Result type for ephemeris operations
pub type EphemerisResult<T> = Result<T, EphemerisError>;

/// Reasons a refresh cycle can be discarded
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    #[error("Horizons API error: {0}")]
    Api(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Response has no `ephem` field")]
    MissingEphem,

    #[error("Record {index}: invalid {axis} coordinate {value:?}")]
    InvalidCoordinate {
        index: usize,
        axis: char,
        value: String,
    },

    #[error("Response contained no ephemeris records")]
    Empty,
}
