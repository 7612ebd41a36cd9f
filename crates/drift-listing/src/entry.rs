//! Parsed listing entries
//!
//! A listing record is one line of remote `find` output in the shape
//! `path, mode, owner, group, size`, e.g.
//! `/root/.bashrc, -rw-r--r--, root, root, 176`.

use std::fmt;

use crate::error::{ParseError, Result};

/// Field delimiter in a raw listing record
const FIELD_DELIMITER: &str = ", ";

/// Number of fields in a raw listing record
const FIELD_COUNT: usize = 5;

/// Metadata for one filesystem object as reported by a host listing
///
/// Entries are immutable once parsed. Equality is structural over all
/// fields, so a change to any one of mode, owner, group, or size makes
/// two entries for the same path unequal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entry {
    /// Absolute path, unique within a listing
    pub path: String,
    /// Permission/type string (e.g. `-rw-r--r--` or `drwx------`)
    pub mode: String,
    /// Owning user name
    pub owner: String,
    /// Owning group name
    pub group: String,
    /// Size in bytes
    pub size: u64,
}

impl Entry {
    /// Parse one trimmed raw listing record into an `Entry`
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::FieldCount`] when the record does not split
    /// into exactly five fields, and [`ParseError::InvalidSize`] when the
    /// size field is not a non-negative integer.
    pub fn parse(line: &str) -> Result<Self> {
        let trimmed = line.trim();
        let fields: Vec<&str> = trimmed.split(FIELD_DELIMITER).collect();

        if fields.len() != FIELD_COUNT {
            return Err(ParseError::FieldCount {
                line: trimmed.to_string(),
                found: fields.len(),
            });
        }

        let size = fields[4]
            .parse::<u64>()
            .map_err(|source| ParseError::InvalidSize {
                line: trimmed.to_string(),
                source,
            })?;

        Ok(Self {
            path: fields[0].to_string(),
            mode: fields[1].to_string(),
            owner: fields[2].to_string(),
            group: fields[3].to_string(),
            size,
        })
    }

    /// Whether this entry describes a file rather than a directory
    ///
    /// Determined from the leading character of the mode string.
    #[must_use]
    pub fn is_file(&self) -> bool {
        !self.mode.starts_with('d')
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}, {}",
            self.path, self.mode, self.owner, self.group, self.size
        )
    }
}
