//! Host collaborator contract
//!
//! The checker compares two hosts through this trait; how a listing or a
//! file's content is actually obtained (SSH, local filesystem, API) is
//! the transport layer's concern. Transport failures propagate unchanged
//! through [`crate::Error::Host`]; the pipeline never retries them.

use async_trait::async_trait;

use crate::error::Result;

/// One side of a drift check
#[async_trait]
pub trait Host: Send + Sync {
    /// Short name for this host, used only in diff-text headers
    fn label(&self) -> &str;

    /// Fetch the raw listing records under `root`
    ///
    /// The order is whatever the host's listing produces; it only has to
    /// be stable within a single run.
    ///
    /// # Errors
    ///
    /// Returns an error when the listing cannot be fetched.
    async fn list(&self, root: &str) -> Result<Vec<String>>;

    /// Fetch the text lines of the file at `path`
    ///
    /// # Errors
    ///
    /// Returns an error when the content cannot be fetched.
    async fn read_lines(&self, path: &str) -> Result<Vec<String>>;
}
