//! fbt-collect - phrase tables and hashes for fbt string extraction
//!
//! Builds the variation tables (JSFBT) of translatable call sites from their string
//! variation dimensions, reshapes them for runtimes with limited enum support and computes
//! the hashes translation tooling keys phrases and texts on.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `collect`: Batch collection and packaging of phrases from many files
//! - `config`: Configuration file loading and parsing
//! - `core`: Combinations, table building, enum shifting and flattening
//! - `error`: Typed errors of the phrase core
//! - `hash`: Jenkins, Tiger and phrase-level hashes

pub mod cli;
pub mod collect;
pub mod config;
pub mod core;
pub mod error;
pub mod hash;

pub use error::{FbtError, Result};
