//! Error type shared by the file adapter, batch driver and configuration.
//!
//! The core transform itself never fails; everything here comes from the
//! filesystem, from parsing caller-supplied tables, or from configuration.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
/// Failures surfaced outside the in-memory transform.
pub enum Error {
    #[error("IO error on {}: {source}", .path.display())]
    /// Filesystem operation failed on the given path.
    Io {
        /// Path the operation was acting on.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    /// Configuration file could not be read or parsed.
    Config(String),

    #[error("Invalid mutation table: {0}")]
    /// Mutation table failed validation.
    MutationTable(String),

    #[error("JSON error: {0}")]
    /// Mutation table JSON was malformed.
    Json(#[from] serde_json::Error),

    #[error("Unknown text encoding: {0}")]
    /// Encoding label not recognised.
    UnknownEncoding(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    #[must_use]
    /// Wrap an IO error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
