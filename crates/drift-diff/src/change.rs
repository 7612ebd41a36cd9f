//! Edit script model
//!
//! A diff between two ordered sequences is a list of hunks
//! ([`DiffGroup`]), each holding the contiguous [`Change`]s between two
//! anchor points of the common subsequence. Positions index into the
//! side the element came from: removes into the source sequence, adds
//! into the target sequence.

use std::fmt;

/// Direction of one edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeAction {
    /// Element present in the source sequence only
    Remove,
    /// Element present in the target sequence only
    Add,
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remove => f.write_str("-"),
            Self::Add => f.write_str("+"),
        }
    }
}

/// One Add-or-Remove edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change<T> {
    /// Whether the element was removed from source or added in target
    pub action: ChangeAction,
    /// Index of the element in its originating sequence
    pub position: usize,
    /// The element itself
    pub element: T,
}

impl<T> Change<T> {
    pub fn remove(position: usize, element: T) -> Self {
        Self {
            action: ChangeAction::Remove,
            position,
            element,
        }
    }

    pub fn add(position: usize, element: T) -> Self {
        Self {
            action: ChangeAction::Add,
            position,
            element,
        }
    }
}

/// One contiguous edit hunk
///
/// A Remove of an old element immediately followed by an Add of a new
/// element in the same group signals a modification at that spot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiffGroup<T> {
    /// Changes in the hunk, removes before adds
    pub changes: Vec<Change<T>>,
}

impl<T> DiffGroup<T> {
    pub fn new(changes: Vec<Change<T>>) -> Self {
        Self { changes }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// An ordered sequence of edit hunks
///
/// Order corresponds to position in the original sequences. Filters may
/// hollow out groups but retain them, so emptiness is defined over the
/// flattened changes, not the group list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiffResult<T> {
    /// Hunks in sequence order
    pub groups: Vec<DiffGroup<T>>,
}

impl<T> DiffResult<T> {
    pub fn new(groups: Vec<DiffGroup<T>>) -> Self {
        Self { groups }
    }

    /// True when no change survives in any group
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(DiffGroup::is_empty)
    }

    /// Total number of surviving changes across all groups
    #[must_use]
    pub fn change_count(&self) -> usize {
        self.groups.iter().map(|group| group.changes.len()).sum()
    }

    /// Iterate every surviving change in sequence order
    pub fn iter_changes(&self) -> impl Iterator<Item = &Change<T>> {
        self.groups.iter().flat_map(|group| group.changes.iter())
    }

    /// Keep only changes satisfying the predicate
    ///
    /// Groups emptied by the predicate are retained as empty groups so
    /// that hunk positions stay aligned across filter passes.
    #[must_use]
    pub fn retain_changes<F>(&self, mut predicate: F) -> Self
    where
        T: Clone,
        F: FnMut(&Change<T>) -> bool,
    {
        let groups = self
            .groups
            .iter()
            .map(|group| {
                DiffGroup::new(
                    group
                        .changes
                        .iter()
                        .filter(|change| predicate(change))
                        .cloned()
                        .collect(),
                )
            })
            .collect();
        Self { groups }
    }
}
