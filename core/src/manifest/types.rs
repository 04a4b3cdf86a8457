use std::fmt;
use std::path::PathBuf;

use crate::digest::DigestAlg;
use crate::telemetry::{StageTimes, TelemetryCounters};

/// Payload size/count summary, rendered `"{bytes}.{files}"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PayloadOxum {
    pub bytes: u64,
    pub files: u64,
}

impl PayloadOxum {
    pub fn new(bytes: u64, files: u64) -> Self {
        Self { bytes, files }
    }

    pub fn add_file(&mut self, bytes: u64) {
        self.bytes += bytes;
        self.files += 1;
    }
}

impl fmt::Display for PayloadOxum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.bytes, self.files)
    }
}

/// One payload file: its bag-relative path, size and one digest per algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub path: String,
    pub bytes: u64,
    pub digests: Vec<(DigestAlg, String)>,
}

impl ManifestEntry {
    pub fn digest(&self, alg: DigestAlg) -> Option<&str> {
        self.digests
            .iter()
            .find(|(a, _)| *a == alg)
            .map(|(_, hex)| hex.as_str())
    }

    /// `"<hex>  <path>\n"` for `alg`, if that algorithm was computed.
    pub fn line(&self, alg: DigestAlg) -> Option<String> {
        self.digest(alg).map(|hex| format!("{}  {}\n", hex, self.path))
    }
}

/// Result of a completed manifest run.
#[derive(Debug, Clone)]
pub struct ManifestSummary {
    pub oxum: PayloadOxum,
    pub manifests: Vec<(DigestAlg, PathBuf)>,
    pub counters: TelemetryCounters,
    pub stage_times: StageTimes,
}
