//! telemetry/counters.rs
//! Mutable counters used during bag creation.
//!
//! Workers keep their own counters per file; the coordinator merges them.
//! Converted into an immutable TelemetrySnapshot at the end of a run.

/// Deterministic counters collected while building a bag.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct TelemetryCounters {
    pub entries_moved: u64,
    pub files_digested: u64,
    pub bytes_digested: u64,
    pub manifest_lines: u64,
    pub tag_files_written: u64,
}

impl TelemetryCounters {
    /// Record one top-level entry relocated into the payload directory.
    pub fn add_moved(&mut self) {
        self.entries_moved += 1;
    }

    /// Record one payload file read to end-of-stream.
    pub fn add_file(&mut self, bytes: u64) {
        self.files_digested += 1;
        self.bytes_digested += bytes;
    }

    /// Record manifest lines written (one per algorithm).
    pub fn add_manifest_lines(&mut self, lines: u64) {
        self.manifest_lines += lines;
    }

    pub fn add_tag_file(&mut self) {
        self.tag_files_written += 1;
    }

    pub fn merge(&mut self, other: &TelemetryCounters) {
        self.entries_moved += other.entries_moved;
        self.files_digested += other.files_digested;
        self.bytes_digested += other.bytes_digested;
        self.manifest_lines += other.manifest_lines;
        self.tag_files_written += other.tag_files_written;
    }
}
