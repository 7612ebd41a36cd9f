//! Diff-and-classification pipeline for the drift checker
//!
//! Compares the filesystem state of two hosts under a configured root
//! and reports whether they have drifted apart, subject to configurable
//! ignore/pending exceptions at path and content level.
//!
//! # Architecture
//!
//! `drift-core` sits above the layer 0 crates; the remote transport
//! implements [`Host`] and stays outside:
//!
//! ```text
//!        transport (SSH / local / API)
//!                     |  Host trait
//!                 drift-core
//!                     |
//!            +--------+--------+
//!            |                 |
//!      drift-listing      drift-diff
//! ```
//!
//! # Pipeline
//!
//! One [`Checker::check`] run is strictly linear: collect listings →
//! raw entry diff → path-ignore → path-pending → content-ignore →
//! content-pending → report. Each stage consumes the previous stage's
//! complete output; only the per-candidate content fetches run
//! concurrently, and their results are merged back in path-sorted order
//! so the observable output is deterministic.

pub mod checker;
pub mod config;
pub mod content_filter;
pub mod error;
pub mod host;
pub mod logging;
pub mod path_filter;
pub mod pattern;

pub use checker::{CheckCounts, CheckOptions, CheckReport, Checker};
pub use config::{CheckConfig, CheckRules, PatternSpec};
pub use content_filter::ContentFilterOutcome;
pub use error::{Error, Result};
pub use host::Host;
pub use path_filter::PathFilterOutcome;
pub use pattern::PathPattern;

// Re-exported so transport implementations and callers can name the
// underlying diff and entry types without depending on the layer 0
// crates directly.
pub use drift_diff::{Change, ChangeAction, DiffGroup, DiffResult};
pub use drift_listing::{Entry, ParseError};
