//! Error types for pruning runs

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that abort a pruning run
///
/// Individual delete failures are not errors at this level; they are
/// recorded in the [`DeletionReport`](crate::DeletionReport).
#[derive(Error, Debug)]
pub enum JanitorError {
    /// Invalid pipeline configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A timeline page could not be retrieved; nothing was written
    #[error("Failed to fetch timeline: {0}")]
    Fetch(String),

    /// The full-timeline snapshot could not be persisted
    #[error("Could not write snapshot file {path}: {source}")]
    Snapshot {
        /// Target path
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The archive of posts about to be deleted could not be persisted;
    /// no delete call was issued
    #[error("Could not write archive file {path}: {source}")]
    ArchiveWrite {
        /// Target path
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
}
