//! Path-level filtering
//!
//! Two independent passes over the entry diff: the ignore pass on the
//! raw diff, then the pending pass on the ignore pass's residue. A path
//! matched by both lists therefore counts as ignored, never as pending,
//! and the two removed-path sets are disjoint by construction.

use std::collections::BTreeSet;

use drift_diff::DiffResult;
use drift_listing::Entry;

use crate::pattern::PathPattern;

/// Residue and removed-path sets from the two path passes
#[derive(Debug, Clone)]
pub struct PathFilterOutcome {
    /// Diff surviving both passes; hollowed groups are retained
    pub diff: DiffResult<Entry>,
    /// Paths removed by the ignore pass, sorted
    pub ignored: Vec<String>,
    /// Paths removed by the pending pass, sorted
    pub pending: Vec<String>,
}

/// Run the ignore pass, then the pending pass on its residue
#[must_use]
pub fn apply(
    diff: &DiffResult<Entry>,
    ignore_patterns: &[PathPattern],
    pending_patterns: &[PathPattern],
) -> PathFilterOutcome {
    let ignored = matching_paths(diff, ignore_patterns);
    let diff = remove_paths(diff, &ignored);

    let pending = matching_paths(&diff, pending_patterns);
    let diff = remove_paths(&diff, &pending);

    PathFilterOutcome {
        diff,
        ignored: ignored.into_iter().collect(),
        pending: pending.into_iter().collect(),
    }
}

/// Distinct paths among all changes matching any of the patterns
#[must_use]
pub fn matching_paths(diff: &DiffResult<Entry>, patterns: &[PathPattern]) -> BTreeSet<String> {
    diff.iter_changes()
        .filter(|change| {
            patterns
                .iter()
                .any(|pattern| pattern.matches(&change.element.path))
        })
        .map(|change| change.element.path.clone())
        .collect()
}

/// Drop every change whose entry path is in the set
///
/// Groups emptied by the removal are retained as empty groups.
#[must_use]
pub fn remove_paths(diff: &DiffResult<Entry>, paths: &BTreeSet<String>) -> DiffResult<Entry> {
    diff.retain_changes(|change| !paths.contains(&change.element.path))
}
