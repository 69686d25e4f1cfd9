//! Error types for refview operations.
//!
//! The traversal itself is designed to tolerate bad data rather than fail:
//! missing asset metadata falls back to a placeholder classification, packages
//! filtered out of the active registry source are silently dropped, and
//! exceeding a depth or breadth limit is policy, not an error. Only two
//! categories surface as `Error`:
//!
//! - Broken preconditions in the traversal (an empty identifier batch handed
//!   to a recursive step), reported explicitly instead of asserted.
//! - Infrastructure failures around registry snapshots (I/O, JSON).

use std::path::PathBuf;
use thiserror::Error;

/// Result type for refview operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for refview operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A recursive traversal step received an empty identifier batch.
    ///
    /// Every recursive call operates on at least one identifier; an empty
    /// batch means the caller's bookkeeping is broken.
    #[error("traversal step received an empty identifier batch")]
    EmptyIdentifierBatch,

    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A registry snapshot could not be parsed.
    #[error("snapshot error in {path}: {source}")]
    Snapshot {
        /// Path to the snapshot file that failed to parse.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// An asset identifier string could not be parsed.
    #[error("invalid asset identifier: {0}")]
    InvalidIdentifier(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_snapshot_path() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = Error::Snapshot {
            path: PathBuf::from("reg.json"),
            source: json_err,
        };

        assert!(err.to_string().contains("reg.json"));
    }

    #[test]
    fn empty_batch_is_described_as_precondition() {
        let err = Error::EmptyIdentifierBatch;
        assert!(err.to_string().contains("empty identifier batch"));
    }
}
