//! bagit-core
//!
//! Turns a plain directory into a BagIt bag, in place: a `data/` payload,
//! one checksum manifest per algorithm, `bagit.txt` and `bag-info.txt`.
//! Digests are computed by a bounded pool of worker threads.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;

pub mod digest;
pub mod walker;
pub mod parallelism;
pub mod telemetry;

// Pipeline layers
pub mod manifest;
pub mod metadata;
pub mod bag;

pub use bag::{create_bag, BagBuilder, BagReport};
pub use types::BagError;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::bag::{create_bag, BagBuilder, BagReport};
    pub use crate::digest::DigestAlg;
    pub use crate::manifest::PayloadOxum;
    pub use crate::metadata::BagInfo;
    pub use crate::parallelism::ParallelismProfile;
    pub use crate::types::BagError;
}
