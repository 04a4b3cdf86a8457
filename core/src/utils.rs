use std::path::{Component, Path};

use crate::constants::{ALLOWED_CHUNK_SIZES, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE};
use crate::types::BagError;

/// Render `path` relative to `bag_root` with `/` separators, e.g. `data/sub/b.txt`.
///
/// Names that are not valid UTF-8 are rejected: a lossy rendering could
/// collide with another file and would not resolve back to this one.
pub fn bag_relative_path(bag_root: &Path, path: &Path) -> Result<String, BagError> {
    let relative = path
        .strip_prefix(bag_root)
        .map_err(|_| BagError::Pipeline("payload file outside of bag root"))?;

    let mut parts: Vec<&str> = Vec::new();
    for component in relative.components() {
        if let Component::Normal(part) = component {
            let part = part
                .to_str()
                .ok_or_else(|| BagError::NonUtf8Path(path.to_path_buf()))?;
            parts.push(part);
        }
    }

    if parts.is_empty() {
        return Err(BagError::Pipeline("payload file has an empty relative path"));
    }
    Ok(parts.join("/"))
}

/// Pick the read chunk size for digest workers.
///
/// `None` gives the default. Requests are clamped to
/// `[smallest allowed, MAX_CHUNK_SIZE]` and rounded up to the next allowed
/// size when one exists.
pub fn best_chunk_size(requested: Option<usize>) -> usize {
    let size = match requested {
        None => return DEFAULT_CHUNK_SIZE,
        Some(size) => size,
    };
    if size >= MAX_CHUNK_SIZE {
        return MAX_CHUNK_SIZE;
    }
    if let Some(&allowed) = ALLOWED_CHUNK_SIZES.iter().find(|&&allowed| size <= allowed) {
        return allowed;
    }
    size
}
