// Manifest sinks + ordered manifest writer.

use std::collections::BTreeMap;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::digest::DigestAlg;
use crate::types::BagError;
use super::types::{ManifestEntry, PayloadOxum};

struct PendingManifest {
    alg: DigestAlg,
    target: PathBuf,
    out: BufWriter<NamedTempFile>,
}

/// One temporary file per algorithm, created inside the bag root.
///
/// Nothing appears under a final `manifest-<alg>.txt` name until
/// [`ManifestSink::commit`]; dropping the sink removes the temporaries.
pub struct ManifestSink {
    manifests: Vec<PendingManifest>,
}

impl ManifestSink {
    pub fn create(bag_root: &Path, algs: &[DigestAlg]) -> Result<Self, BagError> {
        let mut manifests = Vec::with_capacity(algs.len());
        for &alg in algs {
            let target = bag_root.join(alg.manifest_file_name());
            let tmp = tempfile::Builder::new()
                .prefix(".manifest-")
                .suffix(".tmp")
                .tempfile_in(bag_root)
                .map_err(|e| BagError::write(&target, e))?;
            debug!(manifest = %target.display(), tmp = %tmp.path().display(), "opened manifest");
            manifests.push(PendingManifest {
                alg,
                target,
                out: BufWriter::new(tmp),
            });
        }
        Ok(Self { manifests })
    }

    /// Append `entry` to every manifest.
    pub fn write_entry(&mut self, entry: &ManifestEntry) -> Result<u64, BagError> {
        let mut lines = 0;
        for manifest in self.manifests.iter_mut() {
            let line = entry
                .line(manifest.alg)
                .ok_or(BagError::Pipeline("entry is missing a requested digest"))?;
            manifest
                .out
                .write_all(line.as_bytes())
                .map_err(|e| BagError::write(&manifest.target, e))?;
            lines += 1;
        }
        Ok(lines)
    }

    /// Flush and rename every temporary file onto its final name.
    pub fn commit(self) -> Result<Vec<(DigestAlg, PathBuf)>, BagError> {
        let mut written = Vec::with_capacity(self.manifests.len());
        for manifest in self.manifests {
            let PendingManifest { alg, target, out } = manifest;
            let tmp = out
                .into_inner()
                .map_err(|e| BagError::write(&target, e.into_error()))?;
            tmp.as_file()
                .sync_all()
                .map_err(|e| BagError::write(&target, e))?;
            tmp.persist(&target)
                .map_err(|e| BagError::write(&target, e.error))?;
            written.push((alg, target));
        }
        Ok(written)
    }
}

/// Re-sequences worker results into walk order before writing.
///
/// Entries arrive tagged with their walk index in any order; each is
/// held until every lower index has been written.
pub struct OrderedManifestWriter<'a> {
    out: &'a mut ManifestSink,
    next: u64,
    pending: BTreeMap<u64, ManifestEntry>,
    oxum: PayloadOxum,
    lines: u64,
    write_time: Duration,
}

impl<'a> OrderedManifestWriter<'a> {
    pub fn new(out: &'a mut ManifestSink) -> Self {
        Self {
            out,
            next: 0,
            pending: BTreeMap::new(),
            oxum: PayloadOxum::default(),
            lines: 0,
            write_time: Duration::ZERO,
        }
    }

    pub fn push(&mut self, index: u64, entry: ManifestEntry) -> Result<(), BagError> {
        if index < self.next || self.pending.contains_key(&index) {
            return Err(BagError::Pipeline("duplicate manifest entry"));
        }
        self.pending.insert(index, entry);
        self.flush_ready()
    }

    /// Entries written so far; equals the walk count once complete.
    pub fn written(&self) -> u64 {
        self.next
    }

    /// Verify nothing is still waiting on a missing index.
    pub fn finish(mut self) -> Result<ManifestTotals, BagError> {
        self.flush_ready()?;
        if !self.pending.is_empty() {
            return Err(BagError::Pipeline("manifest is missing entries"));
        }
        Ok(ManifestTotals {
            oxum: self.oxum,
            entries: self.next,
            lines: self.lines,
            write_time: self.write_time,
        })
    }

    fn flush_ready(&mut self) -> Result<(), BagError> {
        while let Some(entry) = self.pending.remove(&self.next) {
            self.write(entry)?;
            self.next += 1;
        }
        Ok(())
    }

    fn write(&mut self, entry: ManifestEntry) -> Result<(), BagError> {
        let start = Instant::now();
        self.lines += self.out.write_entry(&entry)?;
        self.oxum.add_file(entry.bytes);
        self.write_time += start.elapsed();
        Ok(())
    }
}

/// Totals accumulated by [`OrderedManifestWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifestTotals {
    pub oxum: PayloadOxum,
    pub entries: u64,
    pub lines: u64,
    pub write_time: Duration,
}
