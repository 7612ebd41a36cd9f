//! Check configuration
//!
//! [`CheckConfig`] is the untyped, serde-facing shape loaded from TOML;
//! [`CheckRules`] is its validated form with compiled patterns. The split
//! keeps configuration errors (bad regexes, unrecognized pattern shapes)
//! on an explicit conversion path instead of surfacing mid-pipeline.
//!
//! ```toml
//! check_root_path = "/etc"
//! ignore_paths = ["/etc/mtab", { regex = '\.cache$' }]
//! pending_paths = [{ regex = "^/etc/cron" }]
//!
//! [ignore_contents]
//! "/etc/hosts" = "^#"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pattern::PathPattern;

/// One path pattern as it appears in configuration
///
/// A bare string is a literal path; a `{ regex = "..." }` table is a
/// regular expression. Any other shape is rejected by deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternSpec {
    /// Exact path, e.g. `"/etc/mtab"`
    Literal(String),
    /// Regex over the path, e.g. `{ regex = '\.cache$' }`
    Regex { regex: String },
}

impl PatternSpec {
    /// Validate and compile into a [`PathPattern`]
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPattern`] when a regex spec does not
    /// compile.
    pub fn compile(&self) -> Result<PathPattern> {
        match self {
            Self::Literal(path) => Ok(PathPattern::literal(path.clone())),
            Self::Regex { regex } => PathPattern::regex(regex),
        }
    }
}

/// Recognized check options, as loaded from configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    /// Root path compared on both hosts
    pub check_root_path: String,
    /// Path patterns whose differences are permanently excluded
    pub ignore_paths: Vec<PatternSpec>,
    /// Path patterns whose differences are acknowledged but tracked
    pub pending_paths: Vec<PatternSpec>,
    /// Per-path regex filtering content lines before a file counts as drifted
    pub ignore_contents: BTreeMap<String, String>,
    /// Per-path regex applied to the residue of `ignore_contents`
    pub pending_contents: BTreeMap<String, String>,
}

impl CheckConfig {
    /// Parse a configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error when the TOML is malformed or a field has the
    /// wrong shape.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration file from disk
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Validate the configuration and compile every pattern
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPattern`] for a path pattern that is
    /// not a literal or valid regex, and [`Error::InvalidContentPattern`]
    /// for a content regex that does not compile.
    pub fn compile(&self) -> Result<CheckRules> {
        let ignore_paths = compile_patterns(&self.ignore_paths)?;
        let pending_paths = compile_patterns(&self.pending_paths)?;
        let ignore_contents = compile_contents(&self.ignore_contents)?;
        let pending_contents = compile_contents(&self.pending_contents)?;

        Ok(CheckRules {
            check_root_path: self.check_root_path.clone(),
            ignore_paths,
            pending_paths,
            ignore_contents,
            pending_contents,
        })
    }
}

/// Validated configuration with compiled patterns
#[derive(Debug, Clone, Default)]
pub struct CheckRules {
    /// Root path compared on both hosts
    pub check_root_path: String,
    /// Compiled ignore-path patterns, in configuration order
    pub ignore_paths: Vec<PathPattern>,
    /// Compiled pending-path patterns, in configuration order
    pub pending_paths: Vec<PathPattern>,
    /// Compiled per-path ignore-content regexes
    pub ignore_contents: BTreeMap<String, Regex>,
    /// Compiled per-path pending-content regexes
    pub pending_contents: BTreeMap<String, Regex>,
}

fn compile_patterns(specs: &[PatternSpec]) -> Result<Vec<PathPattern>> {
    specs.iter().map(PatternSpec::compile).collect()
}

fn compile_contents(sources: &BTreeMap<String, String>) -> Result<BTreeMap<String, Regex>> {
    sources
        .iter()
        .map(|(path, source)| {
            let regex = Regex::new(source).map_err(|err| Error::InvalidContentPattern {
                path: path.clone(),
                pattern: source.clone(),
                reason: err.to_string(),
            })?;
            Ok((path.clone(), regex))
        })
        .collect()
}
