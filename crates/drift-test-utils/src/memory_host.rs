//! Scripted in-memory host fixture

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use drift_core::{Error, Host, Result};

/// In-memory [`Host`] backed by a scripted listing and file contents
///
/// Built with a fluent API:
///
/// ```
/// use drift_test_utils::MemoryHost;
///
/// let host = MemoryHost::new("web01")
///     .with_listing(&[
///         "/etc, drwxr-xr-x, root, root, 4096",
///         "/etc/hosts, -rw-r--r--, root, root, 158",
///     ])
///     .with_file("/etc/hosts", "127.0.0.1 localhost\n");
/// ```
///
/// Reading a path that was not scripted fails with
/// [`Error::Host`], mimicking a transport-level fetch failure.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    label: String,
    listing: Vec<String>,
    files: BTreeMap<String, Vec<String>>,
    latency: Option<Duration>,
}

impl MemoryHost {
    /// Create an empty host with the given label
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Script the raw listing records returned by `list`
    #[must_use]
    pub fn with_listing(mut self, records: &[&str]) -> Self {
        self.listing = records.iter().map(|record| (*record).to_string()).collect();
        self
    }

    /// Script the content of one file, split into lines
    #[must_use]
    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files
            .insert(path.to_string(), content.lines().map(str::to_string).collect());
        self
    }

    /// Delay every fetch by the given duration, for timeout tests
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl Host for MemoryHost {
    fn label(&self) -> &str {
        &self.label
    }

    async fn list(&self, _root: &str) -> Result<Vec<String>> {
        self.simulate_latency().await;
        Ok(self.listing.clone())
    }

    async fn read_lines(&self, path: &str) -> Result<Vec<String>> {
        self.simulate_latency().await;
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| Error::Host {
                host: self.label.clone(),
                message: format!("no such file: {path}"),
            })
    }
}
