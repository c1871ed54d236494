//! Error types for vitals-types.

use thiserror::Error;

/// Errors that can occur when parsing vitals value types from text.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The name does not identify a record collection.
    #[error("Unknown collection: {0} (expected 'glucose' or 'pressure')")]
    UnknownCollection(String),
}

/// Result type alias using vitals-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
