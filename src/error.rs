//! Error types for the cache layer
//!
//! Provides unified error handling using thiserror. Storage backends return
//! these errors; the cache facade absorbs them into `Lookup::Degraded` and
//! `WriteStatus::Degraded` so they never reach callers as hard failures.

use std::path::PathBuf;

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache storage operations.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Filesystem operation failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stored bytes could not be decoded into an entry
    #[error("Corrupt entry {key}: {reason}")]
    Corrupt { key: String, reason: String },

    /// Value could not be encoded for storage
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl CacheError {
    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CacheError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true if this error means the stored entry is unreadable.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, CacheError::Corrupt { .. })
    }
}

// == Fetch Error Enum ==
/// Errors surfaced by the fetch orchestrator.
///
/// Cloneable so one in-flight fetch can hand the same failure to every waiter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Transport-level failure
    #[error("Network error: {0}")]
    Network(String),

    /// Upstream answered with a non-success status
    #[error("Unexpected status: {0}")]
    Status(u16),

    /// Payload could not be decoded into the cached value type
    #[error("Decode error: {0}")]
    Decode(String),
}

// == Result Type Alias ==
/// Convenience Result type for cache storage.
pub type Result<T> = std::result::Result<T, CacheError>;
