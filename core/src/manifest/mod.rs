//! Parallel manifest builder.
//!
//! Walks the payload, fans files out to a bounded digest pool and writes
//! `manifest-<alg>.txt` from a single coordinating thread. Lines come out in
//! walk order whatever the worker count.

pub mod types;
pub mod io;
pub mod pipeline;

pub use types::{ManifestEntry, ManifestSummary, PayloadOxum};
pub use io::{ManifestSink, ManifestTotals, OrderedManifestWriter};
pub use pipeline::build_manifests;
