//! Packagers decorate collected phrases with the identifiers translation tooling keys on.

use clap::ValueEnum;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::{Phrase, PhraseTable, PropertyMap};
use crate::hash::{HashFunction, jsfbt_hash, jsfbt_hash_key};

/// Fields a packager writes. Stale copies coming from a previous run are dropped on input.
const PACKAGER_FIELDS: [&str; 3] = ["hash_key", "hash_code", "hashToLeaf"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Packager {
    /// `hashToLeaf` of every text, using the configured hash module.
    #[default]
    Text,
    /// `hash_key` and `hash_code` of the whole table.
    Phrase,
    /// Text, then phrase.
    Both,
    /// Phrases as collected.
    None,
}

impl Packager {
    pub fn name(self) -> &'static str {
        match self {
            Packager::Text => "text",
            Packager::Phrase => "phrase",
            Packager::Both => "both",
            Packager::None => "none",
        }
    }

    fn packs_texts(self) -> bool {
        matches!(self, Packager::Text | Packager::Both)
    }

    fn packs_phrases(self) -> bool {
        matches!(self, Packager::Phrase | Packager::Both)
    }

    /// Decorate every phrase, keeping input order.
    pub fn pack(self, phrases: Vec<Phrase>, hash: &dyn HashFunction) -> Vec<PackedPhrase> {
        phrases
            .into_par_iter()
            .map(|phrase| {
                let mut packed = PackedPhrase::from(phrase);
                if let Some(jsfbt) = &packed.jsfbt {
                    if self.packs_texts() {
                        packed.hash_to_leaf = Some(hash_to_leaf(jsfbt, hash));
                    }
                    if self.packs_phrases() {
                        packed.hash_key = Some(jsfbt_hash_key(&jsfbt.table));
                        packed.hash_code = Some(jsfbt_hash(&jsfbt.table));
                    }
                }
                packed
            })
            .collect()
    }
}

/// Text and description stored under a text hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashedText {
    pub text: String,
    pub desc: String,
}

fn hash_to_leaf(jsfbt: &PhraseTable, hash: &dyn HashFunction) -> PropertyMap<HashedText> {
    let mut hashes = PropertyMap::new();
    jsfbt.table.for_each_leaf(&mut |leaf| {
        hashes.insert(
            hash.hash(&leaf.text, &leaf.desc),
            HashedText {
                text: leaf.text.clone(),
                desc: leaf.desc.clone(),
            },
        );
    });
    hashes
}

/// A phrase as written to the collect output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackedPhrase {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash_code: Option<u32>,
    #[serde(rename = "hashToLeaf", skip_serializing_if = "Option::is_none")]
    pub hash_to_leaf: Option<PropertyMap<HashedText>>,
    pub filepath: Option<String>,
    pub line_beg: u32,
    pub col_beg: u32,
    pub line_end: u32,
    pub col_end: u32,
    #[serde(flatten)]
    pub options: Map<String, Value>,
    pub project: String,
    /// Absent in terse output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsfbt: Option<PhraseTable>,
}

impl From<Phrase> for PackedPhrase {
    fn from(phrase: Phrase) -> Self {
        let mut options = phrase.options;
        options.retain(|key, _| !PACKAGER_FIELDS.contains(&key.as_str()));
        Self {
            hash_key: None,
            hash_code: None,
            hash_to_leaf: None,
            filepath: phrase.filepath,
            line_beg: phrase.line_beg,
            col_beg: phrase.col_beg,
            line_end: phrase.line_end,
            col_end: phrase.col_end,
            options,
            project: phrase.project,
            jsfbt: Some(phrase.jsfbt),
        }
    }
}
