//! Enum reshaping for runtimes that pick enum values before anything else.
//!
//! [`shift_enums_to_top`] moves every enum level above the other levels, so a runtime can
//! select the enum branch first and hand the remaining sub-table to the regular resolver.
//! [`flatten_enum_phrases`] goes further and splits a phrase into one standalone phrase per
//! enum key combination, for runtimes without enum support at all.

use serde::{Deserialize, Serialize};

use super::builder::PhraseTable;
use super::metadata::{MetaEntry, Metadata};
use super::phrase::Phrase;
use super::property_map::PropertyMap;
use super::table::{Table, TableKey, Tree};
use crate::error::{FbtError, Result};

/// A table with its enum levels moved to the top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftedTable {
    pub shifted_jsfbt: Table,
    pub enum_count: usize,
}

pub fn shift_enums_to_top(phrase: &PhraseTable) -> Result<ShiftedTable> {
    let ranges = enum_ranges(&phrase.metadata);
    if ranges.is_empty() {
        return Ok(ShiftedTable {
            shifted_jsfbt: phrase.table.clone(),
            enum_count: 0,
        });
    }

    Ok(ShiftedTable {
        shifted_jsfbt: shift(phrase, &ranges, &mut Vec::new())?,
        enum_count: ranges.len(),
    })
}

fn shift<'a>(
    phrase: &PhraseTable,
    ranges: &[&'a [TableKey]],
    chosen: &mut Vec<&'a str>,
) -> Result<Table> {
    let Some(range) = ranges.get(chosen.len()) else {
        return without_enums(&phrase.table, &phrase.metadata, chosen);
    };

    let mut children = PropertyMap::new();
    for key in range.iter() {
        chosen.push(key);
        let child = shift(phrase, ranges, chosen);
        chosen.pop();
        children.insert(key.clone(), child?);
    }
    Ok(Tree::Branch(children))
}

/// One phrase per enum key combination, each with the enum-free sub-table and the non-enum
/// metadata. Phrases without enum levels are returned as they are.
pub fn flatten_enum_phrases(phrases: Vec<Phrase>) -> Result<Vec<Phrase>> {
    let mut flattened = Vec::with_capacity(phrases.len());
    for phrase in phrases {
        let ranges = enum_ranges(&phrase.jsfbt.metadata);
        if ranges.is_empty() {
            flattened.push(phrase);
            continue;
        }

        let metadata: Metadata = phrase
            .jsfbt
            .metadata
            .iter()
            .filter(|entry| !entry.as_ref().is_some_and(MetaEntry::is_enum))
            .cloned()
            .collect();

        for keys in key_combinations(&ranges) {
            let table = without_enums(&phrase.jsfbt.table, &phrase.jsfbt.metadata, &keys)?;
            if table.is_leaf() != metadata.is_empty() {
                return Err(FbtError::MetadataLeafMismatch {
                    metadata_len: metadata.len(),
                });
            }
            flattened.push(phrase.with_table(PhraseTable {
                table,
                metadata: metadata.clone(),
            }));
        }
    }
    Ok(flattened)
}

fn enum_ranges(metadata: &Metadata) -> Vec<&[TableKey]> {
    metadata
        .iter()
        .filter_map(|entry| entry.as_ref().and_then(MetaEntry::range))
        .collect()
}

/// Cartesian product of the enum ranges, first range varying slowest.
fn key_combinations<'a>(ranges: &[&'a [TableKey]]) -> Vec<Vec<&'a str>> {
    ranges.iter().fold(vec![Vec::new()], |combinations, range| {
        combinations
            .iter()
            .flat_map(|prefix| {
                range.iter().map(move |key| {
                    let mut keys = prefix.clone();
                    keys.push(key.as_str());
                    keys
                })
            })
            .collect()
    })
}

/// Sub-table reached by following `enum_keys` through the enum levels, keeping every other
/// level as is.
fn without_enums(table: &Table, metadata: &[Option<MetaEntry>], enum_keys: &[&str]) -> Result<Table> {
    let (children, (entry, rest)) = match (table, metadata.split_first()) {
        (Tree::Branch(children), Some(level)) => (children, level),
        _ => return Ok(table.clone()),
    };

    if entry.as_ref().is_some_and(MetaEntry::is_enum) {
        let Some((key, other_keys)) = enum_keys.split_first() else {
            return Err(FbtError::invalid_table("more enum levels than enum keys"));
        };
        let child = children.get(key).ok_or_else(|| {
            FbtError::invalid_table(format!("enum key `{}` is missing from the table", key))
        })?;
        return without_enums(child, rest, other_keys);
    }

    let children = children
        .iter()
        .map(|(key, child)| Ok((key, without_enums(child, rest, enum_keys)?)))
        .collect::<Result<PropertyMap<_>>>()?;
    Ok(Tree::Branch(children))
}
