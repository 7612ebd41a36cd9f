//! Shared test utilities for the drift-checker workspace.
//!
//! Provides [`MemoryHost`], a scripted in-memory
//! [`Host`](drift_core::Host) implementation standing in for the
//! transport layer in tests. Never published.

pub mod memory_host;

pub use memory_host::MemoryHost;
