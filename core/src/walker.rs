//! Lazy, sorted enumeration of payload files.
//!
//! Each directory level is sorted by file name before its entries are
//! emitted, so two walks over the same tree yield the same sequence.
//! Symlinks are not followed: a link to a directory is neither descended
//! nor emitted, any other link is emitted like a regular file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
#[error("cannot walk {}: {source}", .path.display())]
pub struct WalkError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl WalkError {
    pub fn kind(&self) -> io::ErrorKind {
        self.source.kind()
    }
}

impl From<walkdir::Error> for WalkError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(Path::to_path_buf).unwrap_or_default();
        let message = err.to_string();
        let source = err
            .into_io_error()
            .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, message));
        WalkError { path, source }
    }
}

/// Iterator over every non-directory entry under a root.
///
/// Yields at most one `Err`; enumeration stops after it.
pub struct PayloadWalker {
    inner: walkdir::IntoIter,
    failed: bool,
}

impl PayloadWalker {
    pub fn new(root: impl AsRef<Path>) -> Self {
        let inner = WalkDir::new(root.as_ref())
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();
        Self { inner, failed: false }
    }
}

impl Iterator for PayloadWalker {
    type Item = Result<PathBuf, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            match self.inner.next()? {
                Ok(entry) => {
                    let file_type = entry.file_type();
                    if file_type.is_dir() {
                        continue;
                    }
                    if file_type.is_symlink() && points_to_dir(entry.path()) {
                        continue;
                    }
                    return Some(Ok(entry.into_path()));
                }
                Err(err) => {
                    self.failed = true;
                    return Some(Err(WalkError::from(err)));
                }
            }
        }
    }
}

fn points_to_dir(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}

/// Walk `root` fresh; shorthand for `PayloadWalker::new`.
pub fn walk(root: impl AsRef<Path>) -> PayloadWalker {
    PayloadWalker::new(root)
}
