//! Error types for drift-core

use std::time::Duration;

/// Result type for drift-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or running a check
///
/// Every variant is fail-fast: the pipeline either completes all stages
/// or surfaces one of these and produces no report.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configured path pattern is neither a literal nor a valid regex
    #[error("Unsupported path pattern {pattern:?}: {reason}")]
    UnsupportedPattern { pattern: String, reason: String },

    /// A configured content pattern does not compile as a regex
    #[error("Invalid content pattern {pattern:?} for {path}: {reason}")]
    InvalidContentPattern {
        path: String,
        pattern: String,
        reason: String,
    },

    /// A remote fetch (listing or content) failed; propagated unchanged
    /// from the transport, never retried here
    #[error("Host {host}: {message}")]
    Host { host: String, message: String },

    /// The run exceeded its configured time budget
    #[error("Check cancelled after {elapsed:?}")]
    Cancelled { elapsed: Duration },

    // Transparent wrappers for underlying crate errors
    /// A raw listing record violated the expected field structure
    #[error(transparent)]
    Parse(#[from] drift_listing::ParseError),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}

impl Error {
    pub fn host(host: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Host {
            host: host.into(),
            message: message.into(),
        }
    }
}
