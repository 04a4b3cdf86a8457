use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crossbeam::channel::{Receiver, Sender};
use tracing::trace;

use crate::telemetry::{Stage, StageTimes, TelemetryCounters};
use super::types::{DigestAlg, DigestError, FileDigest, MultiDigest};

/// Stream `path` through every algorithm in `algs`, `chunk_size` bytes at a time.
///
/// Reads until end-of-stream, so an empty file yields each algorithm's
/// identity digest and a size of zero.
pub fn digest_file(
    path: &Path,
    algs: &[DigestAlg],
    chunk_size: usize,
) -> Result<FileDigest, DigestError> {
    let mut file = File::open(path).map_err(|e| DigestError::io(path, e))?;
    let mut hasher = MultiDigest::new(algs);
    let mut buf = vec![0u8; chunk_size.max(1)];
    let mut bytes = 0u64;

    loop {
        let n = match file.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(DigestError::io(path, e)),
        };
        hasher.update(&buf[..n]);
        bytes += n as u64;
    }

    Ok(FileDigest {
        digests: hasher.finalize_hex(),
        bytes,
    })
}

/// One unit of work: a walked file and its position in walk order.
#[derive(Debug, Clone)]
pub struct DigestJob {
    pub index: u64,
    pub path: PathBuf,
}

/// Output of one digest job.
#[derive(Debug)]
pub struct DigestedFile {
    pub index: u64,
    pub path: PathBuf,
    pub digest: FileDigest,
    pub counters: TelemetryCounters,
    pub stage_times: StageTimes,
}

/// Stateless worker: the same job always produces the same digest.
#[derive(Debug, Clone)]
pub struct DigestWorker {
    algs: Vec<DigestAlg>,
    chunk_size: usize,
}

impl DigestWorker {
    pub fn new(algs: Vec<DigestAlg>, chunk_size: usize) -> Self {
        Self { algs, chunk_size }
    }

    pub fn process(&self, job: DigestJob) -> Result<DigestedFile, DigestError> {
        let start = Instant::now();
        let digest = digest_file(&job.path, &self.algs, self.chunk_size)?;

        let mut counters = TelemetryCounters::default();
        counters.add_file(digest.bytes);
        let mut stage_times = StageTimes::default();
        stage_times.add(Stage::Digest, start.elapsed());

        trace!(path = %job.path.display(), bytes = digest.bytes, "digested");
        Ok(DigestedFile {
            index: job.index,
            path: job.path,
            digest,
            counters,
            stage_times,
        })
    }

    /// Run loop: consumes jobs until the input closes, emits one result per job.
    ///
    /// Stops after the first error, or as soon as the receiving side is gone.
    pub fn run(
        self,
        rx: Receiver<DigestJob>,
        tx: Sender<Result<DigestedFile, DigestError>>,
    ) {
        while let Ok(job) = rx.recv() {
            let result = self.process(job);
            let failed = result.is_err();
            if tx.send(result).is_err() || failed {
                return;
            }
        }
    }
}
