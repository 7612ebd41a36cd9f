//! LCS-based minimal edit script computation
//!
//! The engine is generic over the element type and is used unchanged for
//! entry-level diffing (elements are listing entries) and content-level
//! diffing (elements are text lines).

use std::hash::Hash;

use similar::{Algorithm, DiffOp, capture_diff_slices};

use crate::change::{Change, DiffGroup, DiffResult};

/// Compute the minimal edit script between two ordered sequences
///
/// Every source element absent from the longest common subsequence
/// becomes a [`Remove`](crate::ChangeAction::Remove) at its source index;
/// every target element absent from it becomes an
/// [`Add`](crate::ChangeAction::Add) at its target index. Consecutive
/// edits between two common anchor points form one [`DiffGroup`], with a
/// hunk's removes preceding its adds. Identical sequences yield an empty
/// [`DiffResult`].
#[must_use]
pub fn diff<T>(source: &[T], target: &[T]) -> DiffResult<T>
where
    T: Clone + Eq + Hash + Ord,
{
    let ops = capture_diff_slices(Algorithm::Myers, source, target);

    let mut groups = Vec::new();
    let mut current: Vec<Change<T>> = Vec::new();

    for op in ops {
        match op {
            DiffOp::Equal { .. } => {
                if !current.is_empty() {
                    groups.push(DiffGroup::new(std::mem::take(&mut current)));
                }
            }
            DiffOp::Delete {
                old_index, old_len, ..
            } => {
                extend_removes(&mut current, source, old_index, old_len);
            }
            DiffOp::Insert {
                new_index, new_len, ..
            } => {
                extend_adds(&mut current, target, new_index, new_len);
            }
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => {
                extend_removes(&mut current, source, old_index, old_len);
                extend_adds(&mut current, target, new_index, new_len);
            }
        }
    }

    if !current.is_empty() {
        groups.push(DiffGroup::new(current));
    }

    DiffResult::new(groups)
}

fn extend_removes<T: Clone>(hunk: &mut Vec<Change<T>>, source: &[T], index: usize, len: usize) {
    for offset in 0..len {
        hunk.push(Change::remove(
            index + offset,
            source[index + offset].clone(),
        ));
    }
}

fn extend_adds<T: Clone>(hunk: &mut Vec<Change<T>>, target: &[T], index: usize, len: usize) {
    for offset in 0..len {
        hunk.push(Change::add(index + offset, target[index + offset].clone()));
    }
}
