//! Phrase tables (JSFBT trees) and the keyed tree builder.
//!
//! A table is either a single [`Leaf`] or a branch mapping table keys (`_1`, `*`, enum keys,
//! pronoun codes...) to sub-tables. Leaves are found by walking one key per variation level.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::property_map::PropertyMap;
use crate::error::{FbtError, Result};

/// Key used at one level of a table.
pub type TableKey = String;

/// Clear token name mapped to its alias (e.g. `"=Hello"` → `"=m0"`).
pub type TokenAliases = PropertyMap<String>;

/// Renderable text and description for one concrete combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaf {
    pub desc: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_aliases: Option<TokenAliases>,
    /// Token name of this string inside its outer string, e.g. `=World` for the inner
    /// string of `Hello {=World}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outer_token_name: Option<String>,
}

impl Leaf {
    pub fn new(text: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            desc: desc.into(),
            text: text.into(),
            hash: None,
            token_aliases: None,
            outer_token_name: None,
        }
    }

    pub fn with_token_aliases(mut self, aliases: TokenAliases) -> Self {
        self.token_aliases = Some(aliases);
        self
    }

    pub fn with_outer_token_name(mut self, name: impl Into<String>) -> Self {
        self.outer_token_name = Some(name.into());
        self
    }
}

/// Recursive keyed tree. Phrase tables are `Tree<Leaf>`; hashing maps leaves to other shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tree<L> {
    Leaf(L),
    Branch(PropertyMap<Tree<L>>),
}

pub type Table = Tree<Leaf>;

impl<L> Default for Tree<L> {
    fn default() -> Self {
        Tree::Branch(PropertyMap::new())
    }
}

impl<L> Tree<L> {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Tree::Leaf(_))
    }

    pub fn as_leaf(&self) -> Option<&L> {
        match self {
            Tree::Leaf(leaf) => Some(leaf),
            Tree::Branch(_) => None,
        }
    }

    /// Child at `key`, if this is a branch that has one.
    pub fn get(&self, key: &str) -> Option<&Tree<L>> {
        match self {
            Tree::Branch(children) => children.get(key),
            Tree::Leaf(_) => None,
        }
    }

    /// Visit every leaf, depth first, in key order.
    pub fn for_each_leaf<'a>(&'a self, f: &mut impl FnMut(&'a L)) {
        match self {
            Tree::Leaf(leaf) => f(leaf),
            Tree::Branch(children) => children.values().for_each(|child| child.for_each_leaf(f)),
        }
    }

    pub fn leaves(&self) -> Vec<&L> {
        let mut leaves = Vec::new();
        self.for_each_leaf(&mut |leaf| leaves.push(leaf));
        leaves
    }

    /// Every leaf with the keys leading to it.
    pub fn leaf_paths(&self) -> Vec<(Vec<TableKey>, &L)> {
        fn walk<'a, L>(
            tree: &'a Tree<L>,
            prefix: &mut Vec<TableKey>,
            out: &mut Vec<(Vec<TableKey>, &'a L)>,
        ) {
            match tree {
                Tree::Leaf(leaf) => out.push((prefix.clone(), leaf)),
                Tree::Branch(children) => {
                    for (key, child) in children.iter() {
                        prefix.push(key.to_string());
                        walk(child, prefix, out);
                        prefix.pop();
                    }
                }
            }
        }

        let mut out = Vec::new();
        walk(self, &mut Vec::new(), &mut out);
        out
    }

    /// Clone the tree shape, replacing each leaf with `convert(leaf)`.
    pub fn map_leaves<T>(&self, convert: &mut impl FnMut(&L) -> T) -> Tree<T> {
        match self {
            Tree::Leaf(leaf) => Tree::Leaf(convert(leaf)),
            Tree::Branch(children) => Tree::Branch(
                children
                    .iter()
                    .map(|(key, child)| (key, child.map_leaves(convert)))
                    .collect(),
            ),
        }
    }
}

/// Insert `leaf` at `path`, creating intermediate branches as needed.
///
/// Fails with [`FbtError::DuplicateLeafPath`] when anything already occupies the target
/// position (or a leaf sits where a branch is needed). An empty path makes `leaf` the root,
/// which is only allowed while the tree is still empty.
pub fn insert<L>(tree: &mut Tree<L>, path: &[TableKey], leaf: L) -> Result<()> {
    let duplicate = || FbtError::DuplicateLeafPath {
        path: path.to_vec(),
    };

    let Some((last, parents)) = path.split_last() else {
        if !matches!(tree, Tree::Branch(children) if children.is_empty()) {
            return Err(duplicate());
        }
        *tree = Tree::Leaf(leaf);
        return Ok(());
    };

    let mut branch = match tree {
        Tree::Branch(children) => children,
        Tree::Leaf(_) => return Err(duplicate()),
    };
    for key in parents {
        branch = match branch.get_or_insert_with(key, Tree::default) {
            Tree::Branch(children) => children,
            Tree::Leaf(_) => return Err(duplicate()),
        };
    }

    if branch.contains_key(last) {
        return Err(duplicate());
    }
    branch.insert(last.clone(), Tree::Leaf(leaf));
    Ok(())
}

impl<L: Serialize> Serialize for Tree<L> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Tree::Leaf(leaf) => leaf.serialize(serializer),
            Tree::Branch(children) => children.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Table {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Table::try_from(value).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<Value> for Table {
    type Error = FbtError;

    fn try_from(value: Value) -> Result<Self> {
        let object = match value {
            Value::Object(object) => object,
            other => {
                return Err(FbtError::invalid_table(format!(
                    "expected a leaf or a branch object, got `{}`",
                    other
                )));
            }
        };

        if looks_like_leaf(&object) {
            let leaf = serde_json::from_value(Value::Object(object))
                .map_err(|e| FbtError::invalid_table(e.to_string()))?;
            return Ok(Tree::Leaf(leaf));
        }

        let mut children = PropertyMap::new();
        for (key, child) in object {
            children.insert(key, Table::try_from(child)?);
        }
        Ok(Tree::Branch(children))
    }
}

fn looks_like_leaf(object: &serde_json::Map<String, Value>) -> bool {
    object.get("desc").is_some_and(Value::is_string)
        && object.get("text").is_some_and(Value::is_string)
        && object
            .get("tokenAliases")
            .is_none_or(|aliases| aliases.is_object() || aliases.is_null())
}
