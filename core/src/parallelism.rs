use crate::constants::JOBS_PER_WORKER;

/// Parallelism configuration for the digest pool.
///
/// Only scheduling depends on this: digests, manifest contents and the
/// Payload-Oxum are identical for every worker count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParallelismProfile {
    pub worker_count: usize,
    pub inflight_jobs: usize,
}

impl ParallelismProfile {
    /// Fully sequential: one digest worker.
    pub fn single_threaded() -> Self {
        Self::with_workers(1)
    }

    pub fn with_workers(worker_count: usize) -> Self {
        Self {
            worker_count,
            inflight_jobs: worker_count.max(1) * JOBS_PER_WORKER,
        }
    }
}

impl Default for ParallelismProfile {
    fn default() -> Self {
        Self::single_threaded()
    }
}
