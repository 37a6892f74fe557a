//! Phrase table construction and reshaping.
//!
//! - `dimension`: variation axes and their combinations
//! - `table`: keyed tree of leaves and the insert-only builder
//! - `metadata` / `builder`: per-level metadata and table building from dimensions
//! - `enums`: enum shifting and flattening
//! - `phrase`: an extracted call site

mod builder;
mod dimension;
mod enums;
mod metadata;
mod phrase;
mod property_map;
mod table;

pub use builder::{PhraseTable, build_table};
pub use dimension::{
    Choice, Combination, Dimension, DimensionKind, EXACTLY_ONE, GENDER_ANY, NUMBER_ANY,
    compute_combinations,
};
pub use enums::{ShiftedTable, flatten_enum_phrases, shift_enums_to_top};
pub use metadata::{MetaEntry, Metadata, build_metadata};
pub use phrase::Phrase;
pub use property_map::PropertyMap;
pub use table::{Leaf, Table, TableKey, TokenAliases, Tree, insert};
