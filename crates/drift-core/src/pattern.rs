//! Path pattern matching
//!
//! A path pattern is either a literal (exact match on the whole path) or
//! a regex (match anywhere in the path). The tagged representation makes
//! an unrecognized pattern kind unrepresentable; configuration that does
//! not fit either shape fails validation in [`crate::config`] instead.

use regex::Regex;

use crate::error::{Error, Result};

/// Pattern for matching entry paths
#[derive(Debug, Clone)]
pub enum PathPattern {
    /// Exact match on the full path
    Literal(String),
    /// Regex match anywhere in the path
    Regex(Regex),
}

impl PathPattern {
    /// Build a literal pattern
    pub fn literal(path: impl Into<String>) -> Self {
        Self::Literal(path.into())
    }

    /// Compile a regex pattern
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPattern`] when the source does not
    /// compile; the caller is handing us broken configuration.
    pub fn regex(source: &str) -> Result<Self> {
        let regex = Regex::new(source).map_err(|err| Error::UnsupportedPattern {
            pattern: source.to_string(),
            reason: err.to_string(),
        })?;
        Ok(Self::Regex(regex))
    }

    /// Check whether this pattern matches the given path
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Literal(literal) => path == literal,
            Self::Regex(regex) => regex.is_match(path),
        }
    }
}
