use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::constants::PAYLOAD_DIR;
use crate::telemetry::TelemetryCounters;
use crate::types::BagError;

/// Move every top-level entry of `root` into a newly created `data/` directory.
///
/// Creating `data/` comes first, so a root that already holds a `data`
/// entry fails with `AlreadyExists` before anything is moved. Each entry is
/// then a single `rename`: it either moves whole or stays put. The first
/// failure aborts; entries already moved are left in `data/`.
pub fn move_into_payload(root: &Path, counters: &mut TelemetryCounters) -> Result<PathBuf, BagError> {
    let payload = root.join(PAYLOAD_DIR);
    info!(path = %payload.display(), "creating data dir");
    fs::create_dir(&payload).map_err(|e| BagError::reorganize(&payload, e))?;

    for name in top_level_names(root)? {
        if name.as_os_str() == PAYLOAD_DIR {
            continue;
        }
        let from = root.join(&name);
        let to = payload.join(&name);
        debug!(from = %from.display(), to = %to.display(), "moving");
        fs::rename(&from, &to).map_err(|e| BagError::reorganize(&from, e))?;
        counters.add_moved();
    }

    Ok(payload)
}

fn top_level_names(root: &Path) -> Result<Vec<OsString>, BagError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(root).map_err(|e| BagError::reorganize(root, e))? {
        let entry = entry.map_err(|e| BagError::reorganize(root, e))?;
        names.push(entry.file_name());
    }
    names.sort();
    Ok(names)
}
