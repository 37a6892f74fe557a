//! Batch collection: read collected phrases from many files, reshape them for the target
//! runtime and attach hashes.

mod collector;
mod packager;

pub use collector::{ChildParentMappings, CollectError, CollectOutput, Collector};
pub use packager::{HashedText, PackedPhrase, Packager};
