//! Listing entry model for the drift checker
//!
//! Parses raw directory-listing records fetched from a host into
//! structured, comparable [`Entry`] values. This is a layer 0 crate with
//! no intra-workspace dependencies.

pub mod entry;
pub mod error;

pub use entry::Entry;
pub use error::{ParseError, Result};
