//! Per-level metadata of a phrase table.
//!
//! Entry `i` describes what selects the key at depth `i` of the table. On the wire an entry
//! keeps the legacy shape: `{"token":"count","type":2,"singular":true}` for a plural,
//! `{"range":[...]}` for an enum and `null` when nothing needs to be known at runtime.

use serde::{Deserialize, Serialize};

use super::dimension::{Combination, Dimension, DimensionKind};
use super::table::TableKey;
use crate::error::FbtError;

const GENDER_TYPE: u8 = 1;
const NUMBER_TYPE: u8 = 2;
const PRONOUN_TYPE: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMetaEntry", into = "RawMetaEntry")]
pub enum MetaEntry {
    Number { token: Option<String>, singular: bool },
    Gender { token: String },
    Pronoun,
    Enum { range: Vec<TableKey> },
}

/// One optional entry per table level.
pub type Metadata = Vec<Option<MetaEntry>>;

impl MetaEntry {
    pub fn is_enum(&self) -> bool {
        matches!(self, MetaEntry::Enum { .. })
    }

    /// Enum keys, if this level is selected by an enum.
    pub fn range(&self) -> Option<&[TableKey]> {
        match self {
            MetaEntry::Enum { range } => Some(range),
            _ => None,
        }
    }

    pub fn for_dimension(dimension: &Dimension) -> Option<MetaEntry> {
        match dimension.kind {
            DimensionKind::Number => Some(MetaEntry::Number {
                token: dimension.token.clone(),
                singular: dimension.singular && dimension.token.is_some(),
            }),
            DimensionKind::Gender => dimension
                .token
                .clone()
                .map(|token| MetaEntry::Gender { token }),
            DimensionKind::Pronoun => Some(MetaEntry::Pronoun),
            DimensionKind::Enum => Some(MetaEntry::Enum {
                range: dimension.candidates.clone(),
            }),
            DimensionKind::Subject => None,
        }
    }
}

/// Metadata for the levels `combination` adds to a table.
pub fn build_metadata(combination: &Combination<'_>) -> Metadata {
    combination
        .choices()
        .iter()
        .filter(|choice| !choice.collapsible)
        .map(|choice| MetaEntry::for_dimension(choice.dimension))
        .collect()
}

#[derive(Serialize, Deserialize)]
struct RawMetaEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    singular: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    range: Option<Vec<TableKey>>,
}

impl From<MetaEntry> for RawMetaEntry {
    fn from(entry: MetaEntry) -> Self {
        let mut raw = RawMetaEntry {
            token: None,
            kind: None,
            singular: None,
            range: None,
        };
        match entry {
            MetaEntry::Number { token, singular } => {
                raw.token = token;
                raw.kind = Some(NUMBER_TYPE);
                raw.singular = singular.then_some(true);
            }
            MetaEntry::Gender { token } => {
                raw.token = Some(token);
                raw.kind = Some(GENDER_TYPE);
            }
            MetaEntry::Pronoun => raw.kind = Some(PRONOUN_TYPE),
            MetaEntry::Enum { range } => raw.range = Some(range),
        }
        raw
    }
}

impl TryFrom<RawMetaEntry> for MetaEntry {
    type Error = FbtError;

    fn try_from(raw: RawMetaEntry) -> Result<Self, Self::Error> {
        if let Some(range) = raw.range {
            return Ok(MetaEntry::Enum { range });
        }
        match raw.kind {
            Some(NUMBER_TYPE) => Ok(MetaEntry::Number {
                token: raw.token,
                singular: raw.singular.unwrap_or(false),
            }),
            Some(GENDER_TYPE) => raw
                .token
                .map(|token| MetaEntry::Gender { token })
                .ok_or_else(|| FbtError::invalid_table("gender metadata without a token")),
            Some(PRONOUN_TYPE) => Ok(MetaEntry::Pronoun),
            Some(other) => Err(FbtError::invalid_table(format!(
                "unknown variation type {}",
                other
            ))),
            None => Err(FbtError::invalid_table(
                "metadata entry needs a `type` or a `range`",
            )),
        }
    }
}
