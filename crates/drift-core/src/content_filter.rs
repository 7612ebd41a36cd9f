//! Content-level filtering and classification
//!
//! Paths changed on both sides (candidate files) are re-diffed line by
//! line with the same engine used for entries. Each candidate is then
//! classified: ignored-by-content when its line diff is fully covered by
//! the path's ignore regex, pending-by-content when the residue is fully
//! covered by the pending regex, otherwise a genuine content difference
//! that lands in the diff-text buffer. Classified files are removed
//! entirely from the surviving entry diff.

use std::collections::{BTreeMap, BTreeSet};

use drift_diff::{ChangeAction, DiffResult};
use drift_listing::Entry;
use futures::{StreamExt, TryStreamExt, stream};
use regex::Regex;

use crate::error::{Error, Result};
use crate::host::Host;
use crate::path_filter;

/// Residue, classifications, and diff text from the content passes
#[derive(Debug, Clone)]
pub struct ContentFilterOutcome {
    /// Entry diff with ignored and pending files removed entirely
    pub diff: DiffResult<Entry>,
    /// Files whose line diff was fully covered by their ignore regex, sorted
    pub ignored: Vec<String>,
    /// Files whose residual line diff was fully covered by their pending
    /// regex, sorted
    pub pending: Vec<String>,
    /// One record per genuinely differing file, in path-sorted order
    pub diff_text: String,
}

/// Paths present in both the removed and the added projection of the
/// diff, at file granularity, sorted
#[must_use]
pub fn candidate_files(diff: &DiffResult<Entry>) -> Vec<String> {
    let mut removed = BTreeSet::new();
    let mut added = BTreeSet::new();

    for change in diff.iter_changes() {
        if !change.element.is_file() {
            continue;
        }
        match change.action {
            ChangeAction::Remove => removed.insert(change.element.path.as_str()),
            ChangeAction::Add => added.insert(change.element.path.as_str()),
        };
    }

    removed
        .intersection(&added)
        .map(|path| (*path).to_string())
        .collect()
}

/// Run the content passes over every candidate file
///
/// Per-candidate fetch-and-diff work is independent and runs with
/// bounded concurrency; results come back in candidate (path-sorted)
/// order, so the diff text and classifications are deterministic
/// regardless of `fetch_concurrency`.
///
/// # Errors
///
/// Propagates the first content fetch failure unchanged.
pub async fn apply(
    diff: &DiffResult<Entry>,
    source: &dyn Host,
    target: &dyn Host,
    ignore_contents: &BTreeMap<String, Regex>,
    pending_contents: &BTreeMap<String, Regex>,
    fetch_concurrency: usize,
) -> Result<ContentFilterOutcome> {
    let candidates = candidate_files(diff);
    tracing::debug!(candidates = candidates.len(), "content filter start");

    let line_diffs: Vec<(String, DiffResult<String>)> = stream::iter(
        candidates.into_iter().map(|path| async move {
            let line_diff = fetch_and_diff(source, target, &path).await?;
            Ok::<_, Error>((path, line_diff))
        }),
    )
    .buffered(fetch_concurrency.max(1))
    .try_collect()
    .await?;

    let mut ignored = Vec::new();
    let mut pending = Vec::new();
    let mut diff_text = String::new();

    for (path, line_diff) in line_diffs {
        let ignore_pattern = ignore_contents.get(&path);
        let after_ignore = filter_lines(&line_diff, ignore_pattern);
        if ignore_pattern.is_some() && after_ignore.is_empty() {
            tracing::debug!(%path, "classified ignored-by-content");
            ignored.push(path);
            continue;
        }

        let pending_pattern = pending_contents.get(&path);
        let after_pending = filter_lines(&after_ignore, pending_pattern);
        if pending_pattern.is_some() && after_pending.is_empty() {
            tracing::debug!(%path, "classified pending-by-content");
            pending.push(path);
            continue;
        }

        // An empty line diff that no configured pattern classified means
        // the content is identical and only the metadata drifted; the
        // file stays in the entry diff and gets no content record.
        if !after_pending.is_empty() {
            append_record(&mut diff_text, source.label(), target.label(), &path, &after_pending);
        }
    }

    let removed: BTreeSet<String> = ignored.iter().chain(pending.iter()).cloned().collect();
    let diff = path_filter::remove_paths(diff, &removed);

    Ok(ContentFilterOutcome {
        diff,
        ignored,
        pending,
        diff_text,
    })
}

async fn fetch_and_diff(
    source: &dyn Host,
    target: &dyn Host,
    path: &str,
) -> Result<DiffResult<String>> {
    let (source_lines, target_lines) =
        tokio::try_join!(source.read_lines(path), target.read_lines(path))?;
    Ok(drift_diff::diff(&source_lines, &target_lines))
}

fn filter_lines(diff: &DiffResult<String>, pattern: Option<&Regex>) -> DiffResult<String> {
    match pattern {
        Some(regex) => diff.retain_changes(|change| !regex.is_match(&change.element)),
        None => diff.clone(),
    }
}

fn append_record(
    buffer: &mut String,
    source_label: &str,
    target_label: &str,
    path: &str,
    line_diff: &DiffResult<String>,
) {
    buffer.push_str(&format!("--- {source_label}: {path}\n"));
    buffer.push_str(&format!("+++ {target_label}: {path}\n"));
    buffer.push('\n');
    for change in line_diff.iter_changes() {
        buffer.push_str(&format!(
            "{} {} {}\n",
            change.action, change.position, change.element
        ));
    }
}
