//! Error types for the pattern recognition crate.
//!
//! Registration and lookup never fail; errors only come from the boundaries
//! where untyped input is turned into patterns (strict glob parsing, JSON
//! coercion and (de)serialization).

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PatternError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidGlob { pattern: String, reason: String },

    #[error("Pattern must be an object, got {0}")]
    NotAnObject(String),

    #[error("Unsupported value for field '{field}': {kind}")]
    UnsupportedValue { field: String, kind: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for PatternError {
    fn from(err: serde_json::Error) -> Self {
        PatternError::Serialization(err.to_string())
    }
}
