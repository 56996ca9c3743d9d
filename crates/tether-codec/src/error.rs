//! Error types for Tether Codec

use thiserror::Error;

/// Errors that can occur while encoding a payload
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("Value cannot be represented as JSON: {0}")]
    Unrepresentable(String),
}

impl From<serde_json::Error> for EncodeError {
    fn from(err: serde_json::Error) -> Self {
        EncodeError::Unrepresentable(err.to_string())
    }
}

/// Errors that can occur while decoding a payload
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Bytes are not valid JSON at all
    #[error("Malformed JSON: {0}")]
    Syntax(String),

    /// Valid JSON that does not fit the target shape (wrong type,
    /// missing required field, out-of-range number)
    #[error("JSON does not match the expected shape: {0}")]
    Shape(String),

    /// Input ended before a complete JSON value
    #[error("Truncated JSON: {0}")]
    Truncated(String),
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;
        match err.classify() {
            Category::Data => DecodeError::Shape(err.to_string()),
            Category::Eof => DecodeError::Truncated(err.to_string()),
            Category::Syntax | Category::Io => DecodeError::Syntax(err.to_string()),
        }
    }
}
