use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::NaiveDate;
use tracing::{debug, error, info};

use crate::constants::DEFAULT_CHUNK_SIZE;
use crate::digest::{normalize_algorithms, DigestAlg};
use crate::manifest::{build_manifests, PayloadOxum};
use crate::metadata::{is_standard_header, today, BagInfo};
use crate::parallelism::ParallelismProfile;
use crate::telemetry::{Stage, TelemetryCounters, TelemetrySnapshot, TelemetryTimer};
use crate::types::BagError;
use crate::utils::best_chunk_size;
use super::reorganize::move_into_payload;
use super::tagfiles::{write_bag_info, write_bagit_txt};

/// Convert `root` into a bag in place.
///
/// `metadata` fills `bag-info.txt`; `Bagging-Date` and `Payload-Oxum` are
/// always generated and replace caller values. `worker_count` digest workers
/// run in parallel; 1 is fully sequential.
pub fn create_bag(
    root: impl AsRef<Path>,
    metadata: impl Into<BagInfo>,
    worker_count: usize,
) -> Result<(), BagError> {
    BagBuilder::new(root)
        .metadata(metadata)
        .workers(worker_count)
        .build()
        .map(|_| ())
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct BagReport {
    pub root: PathBuf,
    pub payload_dir: PathBuf,
    pub oxum: PayloadOxum,
    pub manifests: Vec<(DigestAlg, PathBuf)>,
    pub bagit_txt: PathBuf,
    pub bag_info_txt: PathBuf,
    pub bag_info: BagInfo,
    /// Read size the digest workers actually used.
    pub chunk_size: usize,
    pub telemetry: TelemetrySnapshot,
}

/// Configurable form of [`create_bag`].
#[derive(Debug, Clone)]
pub struct BagBuilder {
    root: PathBuf,
    info: BagInfo,
    profile: ParallelismProfile,
    algs: Vec<DigestAlg>,
    chunk_size: usize,
    bagging_date: Option<NaiveDate>,
}

impl BagBuilder {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            info: BagInfo::new(),
            profile: ParallelismProfile::single_threaded(),
            algs: vec![DigestAlg::Md5],
            chunk_size: DEFAULT_CHUNK_SIZE,
            bagging_date: None,
        }
    }

    pub fn metadata(mut self, info: impl Into<BagInfo>) -> Self {
        self.info = info.into();
        self
    }

    pub fn workers(mut self, worker_count: usize) -> Self {
        self.profile = ParallelismProfile::with_workers(worker_count);
        self
    }

    pub fn profile(mut self, profile: ParallelismProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn algorithms(mut self, algs: &[DigestAlg]) -> Self {
        self.algs = algs.to_vec();
        self
    }

    /// Requested read size for digest workers.
    ///
    /// Rounded onto the tuned sizes by `best_chunk_size`; zero is rejected
    /// by [`BagBuilder::build`].
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Pin `Bagging-Date` instead of using today's local date.
    pub fn bagging_date(mut self, date: NaiveDate) -> Self {
        self.bagging_date = Some(date);
        self
    }

    pub fn build(self) -> Result<BagReport, BagError> {
        info!(path = %self.root.display(), "creating bag");

        let result = self
            .validate()
            .and_then(|(root, algs, chunk_size)| self.assemble(root, algs, chunk_size));
        if let Err(e) = &result {
            error!(path = %self.root.display(), error = %e, "bag creation failed");
        }
        result
    }

    /// Everything that can be rejected without touching the filesystem.
    fn validate(&self) -> Result<(PathBuf, Vec<DigestAlg>, usize), BagError> {
        if self.profile.worker_count == 0 {
            return Err(BagError::InvalidConfig("worker count must be at least 1".into()));
        }
        if self.chunk_size == 0 {
            return Err(BagError::InvalidConfig("chunk size must be at least 1".into()));
        }
        let chunk_size = best_chunk_size(Some(self.chunk_size));
        let algs = normalize_algorithms(&self.algs)
            .map_err(|e| BagError::InvalidConfig(e.to_string()))?;
        for (key, _) in self.info.iter().filter(|(key, _)| !is_standard_header(key)) {
            debug!(key, "non-standard bag-info header");
        }

        match fs::metadata(&self.root) {
            Ok(meta) if meta.is_dir() => {}
            _ => return Err(BagError::MissingDirectory(self.root.clone())),
        }
        let root = fs::canonicalize(&self.root)
            .map_err(|_| BagError::MissingDirectory(self.root.clone()))?;
        Ok((root, algs, chunk_size))
    }

    fn assemble(&self, root: PathBuf, algs: Vec<DigestAlg>, chunk_size: usize) -> Result<BagReport, BagError> {
        let mut timer = TelemetryTimer::new();
        let mut counters = TelemetryCounters::default();

        // 1. payload
        let start = Instant::now();
        let payload_dir = move_into_payload(&root, &mut counters)?;
        timer.add_stage_time(Stage::Reorganize, start.elapsed());

        // 2. manifests
        let summary = build_manifests(&root, &payload_dir, &algs, &self.profile, chunk_size)?;
        counters.merge(&summary.counters);
        timer.stage_times.merge(&summary.stage_times);

        // 3. + 4. tag files
        let start = Instant::now();
        let bagit_txt = write_bagit_txt(&root)?;
        counters.add_tag_file();

        let date = self.bagging_date.unwrap_or_else(today);
        let bag_info = self.info.clone().with_generated(date, &summary.oxum);
        let bag_info_txt = write_bag_info(&root, &bag_info)?;
        counters.add_tag_file();
        timer.add_stage_time(Stage::Write, start.elapsed());

        timer.finish();
        let telemetry = TelemetrySnapshot::from(&counters, &timer);
        info!(
            path = %root.display(),
            oxum = %summary.oxum,
            stages = %telemetry.stage_times.summary(),
            "bag created"
        );

        Ok(BagReport {
            root,
            payload_dir,
            oxum: summary.oxum,
            manifests: summary.manifests,
            bagit_txt,
            bag_info_txt,
            bag_info,
            chunk_size,
            telemetry,
        })
    }
}
