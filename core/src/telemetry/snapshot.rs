use std::time::Duration;

use crate::telemetry::counters::TelemetryCounters;
use crate::telemetry::timers::{StageTimes, TelemetryTimer};

/// Immutable view of one bag-creation run.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetrySnapshot {
    pub entries_moved: u64,
    pub files_digested: u64,
    pub bytes_digested: u64,
    pub manifest_lines: u64,
    pub tag_files_written: u64,
    pub throughput_bytes_per_sec: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl TelemetrySnapshot {
    pub fn from(counters: &TelemetryCounters, timer: &TelemetryTimer) -> Self {
        let elapsed = timer.elapsed();

        let throughput = if elapsed.as_secs_f64() > 0.0 {
            counters.bytes_digested as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        Self {
            entries_moved: counters.entries_moved,
            files_digested: counters.files_digested,
            bytes_digested: counters.bytes_digested,
            manifest_lines: counters.manifest_lines,
            tag_files_written: counters.tag_files_written,
            throughput_bytes_per_sec: throughput,
            elapsed,
            stage_times: timer.stage_times.clone(),
        }
    }

    pub fn total_stage_time(&self) -> Duration {
        self.stage_times.total()
    }
}
