//! Generic sequence diff engine for the drift checker
//!
//! Computes LCS-based minimal edit scripts between two ordered sequences
//! of any equatable element type, producing the
//! [`Change`]/[`DiffGroup`]/[`DiffResult`] model consumed by the filter
//! pipeline. One engine serves both entry-level and line-level diffing.

pub mod change;
pub mod engine;

pub use change::{Change, ChangeAction, DiffGroup, DiffResult};
pub use engine::diff;
