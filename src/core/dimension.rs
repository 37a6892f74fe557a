//! Variation dimensions and the combinations they produce.
//!
//! Every string variation argument of a call site (plural count, gender, pronoun, enum
//! value...) becomes a [`Dimension`]. The cartesian product of their candidate values gives
//! every concrete text the call site can render, one [`Combination`] each.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::table::TableKey;
use crate::error::{FbtError, Result};

/// Table key for "exactly one" in number variations.
pub const EXACTLY_ONE: &str = "_1";
/// Table key for the general number case.
pub const NUMBER_ANY: &str = "*";
/// Table key for any gender.
pub const GENDER_ANY: &str = "*";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionKind {
    Enum,
    Number,
    Gender,
    Pronoun,
    /// Gender of the subject (viewer or implicit element) placeholder.
    Subject,
}

/// One axis of variation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    pub kind: DimensionKind,
    /// Token name the variation is bound to; absent for pronouns and subjects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Source code of the runtime argument. Enum, number and pronoun dimensions driven by the
    /// same argument are multiplexed only once.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub candidates: Vec<TableKey>,
    /// Number token substituted with the literal count.
    #[serde(default)]
    pub singular: bool,
    /// Render every candidate without adding a table level.
    #[serde(default)]
    pub collapsible: bool,
}

impl Dimension {
    pub fn new<K: Into<TableKey>>(
        kind: DimensionKind,
        candidates: impl IntoIterator<Item = K>,
    ) -> Self {
        Self {
            kind,
            token: None,
            source: None,
            candidates: candidates.into_iter().map(Into::into).collect(),
            singular: false,
            collapsible: false,
        }
    }

    /// Enum dimension over an ordered list of keys.
    pub fn enumeration<K: Into<TableKey>>(
        source: impl Into<String>,
        keys: impl IntoIterator<Item = K>,
    ) -> Self {
        Self::new(DimensionKind::Enum, keys).with_source(source)
    }

    /// Plural variation: `*` then `_1`, with the count shown as `token`.
    pub fn plural(token: impl Into<String>, source: impl Into<String>) -> Self {
        Self::new(DimensionKind::Number, [NUMBER_ANY, EXACTLY_ONE])
            .with_token(token)
            .with_source(source)
            .with_singular(true)
    }

    /// Gender-aware token that only renders the `*` case.
    pub fn gender(token: impl Into<String>) -> Self {
        Self::new(DimensionKind::Gender, [GENDER_ANY]).with_token(token)
    }

    pub fn pronoun<K: Into<TableKey>>(
        source: impl Into<String>,
        candidates: impl IntoIterator<Item = K>,
    ) -> Self {
        Self::new(DimensionKind::Pronoun, candidates).with_source(source)
    }

    pub fn subject<K: Into<TableKey>>(candidates: impl IntoIterator<Item = K>) -> Self {
        Self::new(DimensionKind::Subject, candidates)
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_singular(mut self, singular: bool) -> Self {
        self.singular = singular;
        self
    }

    pub fn always_collapsible(mut self) -> Self {
        self.collapsible = true;
        self
    }

    /// Key under which an upstream dimension with the same runtime argument is remembered.
    fn reuse_key(&self) -> Option<(DimensionKind, &str)> {
        match self.kind {
            DimensionKind::Enum | DimensionKind::Number | DimensionKind::Pronoun => {
                self.source.as_deref().map(|source| (self.kind, source))
            }
            DimensionKind::Gender | DimensionKind::Subject => None,
        }
    }
}

/// The value picked for one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice<'a> {
    pub dimension: &'a Dimension,
    pub key: &'a str,
    /// Rendered, but not part of the table path.
    pub collapsible: bool,
}

/// One concrete assignment, one choice per dimension in dimension order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Combination<'a> {
    choices: Vec<Choice<'a>>,
}

impl<'a> Combination<'a> {
    pub fn choices(&self) -> &[Choice<'a>] {
        &self.choices
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Key chosen for the dimension at `index`.
    pub fn key(&self, index: usize) -> Option<&'a str> {
        self.choices.get(index).map(|choice| choice.key)
    }

    /// Table keys of the non-collapsible choices.
    pub fn path(&self) -> Vec<TableKey> {
        self.choices
            .iter()
            .filter(|choice| !choice.collapsible)
            .map(|choice| choice.key.to_string())
            .collect()
    }
}

/// Every combination of candidate values, dimension 0 varying slowest.
///
/// Dimensions reusing an upstream runtime argument are not multiplexed again: they take the
/// upstream value. A reused enum is also collapsed out of the table path. An empty list of
/// dimensions yields a single empty combination.
pub fn compute_combinations(dimensions: &[Dimension]) -> Result<Vec<Combination<'_>>> {
    let mut combinator = Combinator {
        dimensions,
        used: HashMap::new(),
        combinations: Vec::new(),
    };
    combinator.walk(0, &mut Vec::new())?;
    Ok(combinator.combinations)
}

struct Combinator<'a> {
    dimensions: &'a [Dimension],
    used: HashMap<(DimensionKind, &'a str), &'a str>,
    combinations: Vec<Combination<'a>>,
}

impl<'a> Combinator<'a> {
    fn walk(&mut self, index: usize, prefix: &mut Vec<Choice<'a>>) -> Result<()> {
        let Some(dimension) = self.dimensions.get(index) else {
            self.combinations.push(Combination {
                choices: prefix.clone(),
            });
            return Ok(());
        };

        let reuse_key = dimension.reuse_key();
        if let Some(used_key) = reuse_key.and_then(|k| self.used.get(&k).copied()) {
            let choice = if dimension.kind == DimensionKind::Enum {
                let key = dimension
                    .candidates
                    .iter()
                    .find(|candidate| candidate.as_str() == used_key)
                    .ok_or_else(|| FbtError::IncompatibleEnumReuse {
                        source_code: dimension.source.clone().unwrap_or_default(),
                        key: used_key.to_string(),
                    })?;
                Choice {
                    dimension,
                    key,
                    collapsible: true,
                }
            } else {
                // Constrained to the upstream value, but still adds a level.
                Choice {
                    dimension,
                    key: used_key,
                    collapsible: dimension.collapsible,
                }
            };
            prefix.push(choice);
            let result = self.walk(index + 1, prefix);
            prefix.pop();
            return result;
        }

        for candidate in &dimension.candidates {
            if let Some(k) = reuse_key {
                self.used.insert(k, candidate);
            }
            prefix.push(Choice {
                dimension,
                key: candidate,
                collapsible: dimension.collapsible,
            });
            let result = self.walk(index + 1, prefix);
            prefix.pop();
            result?;
        }
        if let Some(k) = reuse_key {
            self.used.remove(&k);
        }
        Ok(())
    }
}
