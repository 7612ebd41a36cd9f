//! Error types for drift-listing

use std::num::ParseIntError;

/// Result type for drift-listing operations
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors raised while parsing a raw listing record
///
/// A listing that fails to parse signals a transport contract violation,
/// not a recoverable data condition; callers abort the run.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Expected 5 fields in listing record, found {found}: {line:?}")]
    FieldCount { line: String, found: usize },

    #[error("Invalid size field in listing record {line:?}: {source}")]
    InvalidSize {
        line: String,
        #[source]
        source: ParseIntError,
    },
}
