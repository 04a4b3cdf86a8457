use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::digest::DigestError;
use crate::walker::WalkError;

/// Unified bag-creation error.
/// - `From<T>` impls enable `?` across the pipeline.
/// - Messages name the offending path so a single log line is actionable.
#[derive(Debug, Error)]
pub enum BagError {
    /// Source is missing or is not a directory. Raised before any mutation.
    #[error("no such bag directory {}", .0.display())]
    MissingDirectory(PathBuf),

    /// Rejected options. Raised before any mutation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The payload directory could not be created (`AlreadyExists` when the
    /// root already holds a `data` entry), or a top-level entry could not be
    /// moved into it. Entries moved before the failure stay in `data/`.
    #[error("cannot move {} into payload: {source}", .path.display())]
    Reorganize {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Walk(#[from] WalkError),

    #[error(transparent)]
    Digest(#[from] DigestError),

    /// A payload file name is not valid UTF-8 and cannot be written to a
    /// UTF-8 manifest without losing its identity.
    #[error("payload path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    /// A manifest or tag file could not be written.
    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Worker plumbing failed (closed channel, panicked thread, lost entry).
    #[error("pipeline error: {0}")]
    Pipeline(&'static str),
}

impl BagError {
    pub fn reorganize(path: impl Into<PathBuf>, source: io::Error) -> Self {
        BagError::Reorganize { path: path.into(), source }
    }

    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        BagError::Write { path: path.into(), source }
    }

    /// True for errors raised before the source directory was touched.
    pub fn is_precondition(&self) -> bool {
        matches!(self, BagError::MissingDirectory(_) | BagError::InvalidConfig(_))
    }
}
