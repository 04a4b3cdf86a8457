//! Per-file digest workers.
//!
//! Responsibilities:
//! - Stream one file in bounded chunks
//! - Feed every requested algorithm from a single read
//! - Count the exact number of bytes read
//!
//! Non-responsibilities:
//! - Walking
//! - Ordering
//! - Writing manifests

pub mod types;
pub mod worker;

pub use types::{
    normalize_algorithms,
    DigestAlg,
    DigestError,
    DigestState,
    FileDigest,
    MultiDigest,
};
pub use worker::{digest_file, DigestJob, DigestWorker, DigestedFile};
