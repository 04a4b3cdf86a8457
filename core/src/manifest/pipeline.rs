// Pure pipeline wiring (no digest logic).

use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam::channel::{bounded, unbounded, Receiver};
use tracing::{debug, info};

use crate::digest::{normalize_algorithms, DigestAlg, DigestError, DigestJob, DigestWorker, DigestedFile};
use crate::parallelism::ParallelismProfile;
use crate::telemetry::{Stage, StageTimes, TelemetryCounters};
use crate::types::BagError;
use crate::utils::bag_relative_path;
use crate::walker::{PayloadWalker, WalkError};
use super::io::{ManifestSink, ManifestTotals, OrderedManifestWriter};
use super::types::{ManifestEntry, ManifestSummary};

/// Digest every file under `payload_dir` and write one manifest per algorithm
/// into `bag_root`.
///
/// Layout:
/// [ walker thread ] -> bounded jobs -> [ N digest workers ] -> results -> [ this thread ]
///
/// Either every walked file ends up in every manifest, or the call fails and
/// no manifest is left under its final name.
pub fn build_manifests(
    bag_root: &Path,
    payload_dir: &Path,
    algs: &[DigestAlg],
    profile: &ParallelismProfile,
    chunk_size: usize,
) -> Result<ManifestSummary, BagError> {
    let algs = normalize_algorithms(algs)?;
    if profile.worker_count == 0 {
        return Err(BagError::InvalidConfig("worker count must be at least 1".into()));
    }
    let worker_count = profile.worker_count;
    info!(workers = worker_count, algorithms = ?algs, "writing manifests");

    let mut sink = ManifestSink::create(bag_root, &algs)?;
    let mut counters = TelemetryCounters::default();
    let mut stage_times = StageTimes::default();

    // ---- Channels ----
    let (job_tx, job_rx) = bounded::<DigestJob>(profile.inflight_jobs.max(1));
    let (out_tx, out_rx) = unbounded::<Result<DigestedFile, DigestError>>();

    let (walked, collected) = thread::scope(|scope| {
        // ---- Walker thread ----
        let walker = scope.spawn(move || -> Result<(u64, Duration), WalkError> {
            let start = Instant::now();
            let mut index = 0u64;
            for item in PayloadWalker::new(payload_dir) {
                let path = item?;
                if job_tx.send(DigestJob { index, path }).is_err() {
                    // Coordinator stopped consuming; its error wins.
                    break;
                }
                index += 1;
            }
            Ok((index, start.elapsed()))
        });

        // ---- Workers ----
        for _ in 0..worker_count {
            let worker = DigestWorker::new(algs.clone(), chunk_size);
            let rx = job_rx.clone();
            let tx = out_tx.clone();
            scope.spawn(move || worker.run(rx, tx));
        }
        drop(job_rx);
        drop(out_tx);

        // ---- Ordered writer ----
        let collected = collect(out_rx, bag_root, &mut sink, &mut counters, &mut stage_times);
        let walked = walker
            .join()
            .map_err(|_| BagError::Pipeline("walker thread panicked"));
        (walked, collected)
    });

    let (walked, walk_time) = walked??;
    let totals = collected?;
    if totals.entries != walked {
        return Err(BagError::Pipeline("manifest entry count does not match walked files"));
    }

    stage_times.add(Stage::Walk, walk_time);
    let start = Instant::now();
    let manifests = sink.commit()?;
    stage_times.add(Stage::Write, totals.write_time + start.elapsed());
    counters.add_manifest_lines(totals.lines);

    info!(oxum = %totals.oxum, files = totals.entries, "manifests written");
    Ok(ManifestSummary {
        oxum: totals.oxum,
        manifests,
        counters,
        stage_times,
    })
}

/// Drain worker results on the coordinating thread.
///
/// Returns on the first failure; dropping `out_rx` then shuts the pool down.
fn collect(
    out_rx: Receiver<Result<DigestedFile, DigestError>>,
    bag_root: &Path,
    sink: &mut ManifestSink,
    counters: &mut TelemetryCounters,
    stage_times: &mut StageTimes,
) -> Result<ManifestTotals, BagError> {
    let mut writer = OrderedManifestWriter::new(sink);

    for result in out_rx.iter() {
        let digested = result?;
        counters.merge(&digested.counters);
        stage_times.merge(&digested.stage_times);

        let path = bag_relative_path(bag_root, &digested.path)?;
        debug!(index = digested.index, path = %path, "received digest");
        writer.push(
            digested.index,
            ManifestEntry {
                path,
                bytes: digested.digest.bytes,
                digests: digested.digest.digests,
            },
        )?;
    }

    writer.finish()
}
