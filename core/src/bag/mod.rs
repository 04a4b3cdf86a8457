//! Bag assembly: reorganize, manifest, tag files.
//!
//! All paths are built from the canonical bag root; the process working
//! directory is never changed, so distinct directories can be bagged
//! concurrently.

pub mod assemble;
pub mod reorganize;
pub mod tagfiles;

pub use assemble::{create_bag, BagBuilder, BagReport};
pub use reorganize::move_into_payload;
pub use tagfiles::{declaration, write_bag_info, write_bagit_txt};
