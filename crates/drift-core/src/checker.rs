//! Check pipeline driver
//!
//! Drives the fixed stage order raw entry diff → path-ignore →
//! path-pending → content-ignore → content-pending and folds the
//! per-stage results into one immutable [`CheckReport`]. Stages are
//! explicit values threaded forward, never shared mutable state, so a
//! run is deterministic and re-runnable.

use std::collections::BTreeSet;
use std::time::Duration;

use drift_diff::DiffResult;
use drift_listing::Entry;

use crate::config::CheckRules;
use crate::content_filter;
use crate::error::{Error, Result};
use crate::host::Host;
use crate::path_filter;

/// Runtime knobs for a check run
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Maximum concurrent per-file content fetches
    pub fetch_concurrency: usize,
    /// Time budget for the whole run; expiry aborts with
    /// [`Error::Cancelled`] and no partial report
    pub timeout: Option<Duration>,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            fetch_concurrency: 4,
            timeout: None,
        }
    }
}

/// Read-only per-stage counts derived from one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheckCounts {
    /// Entries in the source listing
    pub source_entries: usize,
    /// Entries in the target listing
    pub target_entries: usize,
    /// Distinct paths removed by the path-ignore pass
    pub ignored_by_path: usize,
    /// Distinct paths removed by the path-pending pass
    pub pending_by_path: usize,
    /// Files classified ignored-by-content
    pub ignored_by_content: usize,
    /// Files classified pending-by-content
    pub pending_by_content: usize,
    /// Distinct paths bearing any surviving change
    pub diff_files: usize,
}

/// Immutable result of one check run
#[derive(Debug, Clone)]
pub struct CheckReport {
    /// True iff no change survives all filtering stages
    pub passed: bool,
    /// Surviving entry diff
    pub diff: DiffResult<Entry>,
    /// Content diff records for genuinely differing files, path-sorted
    pub diff_text: String,
    /// Per-stage counts
    pub counts: CheckCounts,
    /// Paths removed by the path-ignore pass, sorted
    pub ignored_paths: Vec<String>,
    /// Paths removed by the path-pending pass, sorted
    pub pending_paths: Vec<String>,
    /// Files classified ignored-by-content, sorted
    pub ignored_content_paths: Vec<String>,
    /// Files classified pending-by-content, sorted
    pub pending_content_paths: Vec<String>,
}

/// Compares two hosts under the configured root
pub struct Checker {
    source: Box<dyn Host>,
    target: Box<dyn Host>,
    rules: CheckRules,
    options: CheckOptions,
}

impl Checker {
    /// Create a checker over two hosts with validated rules
    pub fn new(source: Box<dyn Host>, target: Box<dyn Host>, rules: CheckRules) -> Self {
        Self {
            source,
            target,
            rules,
            options: CheckOptions::default(),
        }
    }

    /// Override the default run options
    #[must_use]
    pub fn with_options(mut self, options: CheckOptions) -> Self {
        self.options = options;
        self
    }

    /// Run the full pipeline once
    ///
    /// # Errors
    ///
    /// Fails fast on the first listing parse error, propagated transport
    /// failure, or timeout; no partial report is produced.
    pub async fn check(&self) -> Result<CheckReport> {
        match self.options.timeout {
            Some(limit) => tokio::time::timeout(limit, self.run())
                .await
                .map_err(|_| Error::Cancelled { elapsed: limit })?,
            None => self.run().await,
        }
    }

    async fn run(&self) -> Result<CheckReport> {
        let root = &self.rules.check_root_path;
        let (source_listing, target_listing) =
            tokio::try_join!(self.source.list(root), self.target.list(root))?;

        let source_entries = parse_listing(&source_listing)?;
        let target_entries = parse_listing(&target_listing)?;
        tracing::debug!(
            source = self.source.label(),
            target = self.target.label(),
            source_entries = source_entries.len(),
            target_entries = target_entries.len(),
            "listings collected"
        );

        let raw = drift_diff::diff(&source_entries, &target_entries);
        tracing::debug!(changes = raw.change_count(), "raw entry diff");

        let paths = path_filter::apply(&raw, &self.rules.ignore_paths, &self.rules.pending_paths);
        tracing::debug!(
            ignored = paths.ignored.len(),
            pending = paths.pending.len(),
            "path passes applied"
        );

        let contents = content_filter::apply(
            &paths.diff,
            self.source.as_ref(),
            self.target.as_ref(),
            &self.rules.ignore_contents,
            &self.rules.pending_contents,
            self.options.fetch_concurrency,
        )
        .await?;
        tracing::debug!(
            ignored = contents.ignored.len(),
            pending = contents.pending.len(),
            "content passes applied"
        );

        let diff_files = distinct_changed_paths(&contents.diff);
        let passed = contents.diff.is_empty();
        tracing::info!(passed, diff_files, "check complete");

        let counts = CheckCounts {
            source_entries: source_entries.len(),
            target_entries: target_entries.len(),
            ignored_by_path: paths.ignored.len(),
            pending_by_path: paths.pending.len(),
            ignored_by_content: contents.ignored.len(),
            pending_by_content: contents.pending.len(),
            diff_files,
        };

        Ok(CheckReport {
            passed,
            diff: contents.diff,
            diff_text: contents.diff_text,
            counts,
            ignored_paths: paths.ignored,
            pending_paths: paths.pending,
            ignored_content_paths: contents.ignored,
            pending_content_paths: contents.pending,
        })
    }
}

fn parse_listing(lines: &[String]) -> Result<Vec<Entry>> {
    lines
        .iter()
        .map(|line| Entry::parse(line).map_err(Error::from))
        .collect()
}

fn distinct_changed_paths(diff: &DiffResult<Entry>) -> usize {
    diff.iter_changes()
        .map(|change| change.element.path.as_str())
        .collect::<BTreeSet<_>>()
        .len()
}
