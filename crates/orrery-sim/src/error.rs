//! Error types for body configuration

use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading or validating a body catalog
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate body name: {0}")]
    DuplicateName(String),

    #[error("Moon {moon} references unknown parent {parent}")]
    UnknownParent { moon: String, parent: String },

    #[error("Moon {moon} orbits {parent}, which is itself a moon")]
    NestedMoon { moon: String, parent: String },

    #[error("Body {body} has a non-finite {field}")]
    NonFinite { body: String, field: &'static str },

    #[error("Body catalog is empty")]
    Empty,
}
