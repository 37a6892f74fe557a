//! Phrase-level hashes computed over a whole table.

use serde_json::{Map, Value};

use super::jenkins::{base62, jenkins_hash};
use crate::core::{Leaf, Table, Tree};

/// Jenkins hash of a table's legacy JSON serialization.
///
/// When all leaves share one description, leaves are reduced to their text (or
/// `{text, tokenAliases}`) and `|desc` is appended once; otherwise each leaf keeps its own
/// `{desc, text[, tokenAliases]}`. A table without leaves hashes its bare JSON shape.
pub fn jsfbt_hash(table: &Table) -> u32 {
    let leaves = table.leaves();
    let shared_desc = leaves
        .first()
        .map(|first| first.desc.as_str())
        .filter(|desc| leaves.iter().all(|leaf| leaf.desc == *desc));

    match shared_desc {
        Some(desc) => {
            let input = tree_to_json(table.map_leaves(&mut text_only));
            jenkins_hash(&format!("{}|{}", input, desc))
        }
        None => jenkins_hash(&tree_to_json(table.map_leaves(&mut with_desc)).to_string()),
    }
}

/// Base-62 form of [`jsfbt_hash`], used as the phrase `hash_key`.
pub fn jsfbt_hash_key(table: &Table) -> String {
    base62(jsfbt_hash(table))
}

/// Hash for a single text, consistent with [`jsfbt_hash`] of a one-leaf table.
pub fn jenkins_text_hash(text: &str, desc: &str) -> String {
    let input = format!("{}|{}", Value::String(text.to_string()), desc);
    base62(jenkins_hash(&input))
}

fn text_only(leaf: &Leaf) -> Value {
    match &leaf.token_aliases {
        Some(aliases) => {
            let mut object = Map::new();
            object.insert("text".to_string(), Value::String(leaf.text.clone()));
            object.insert("tokenAliases".to_string(), aliases_to_json(aliases));
            Value::Object(object)
        }
        None => Value::String(leaf.text.clone()),
    }
}

fn with_desc(leaf: &Leaf) -> Value {
    let mut object = Map::new();
    object.insert("desc".to_string(), Value::String(leaf.desc.clone()));
    object.insert("text".to_string(), Value::String(leaf.text.clone()));
    if let Some(aliases) = &leaf.token_aliases {
        object.insert("tokenAliases".to_string(), aliases_to_json(aliases));
    }
    Value::Object(object)
}

fn aliases_to_json(aliases: &crate::core::TokenAliases) -> Value {
    Value::Object(
        aliases
            .iter()
            .map(|(token, alias)| (token.to_string(), Value::String(alias.clone())))
            .collect(),
    )
}

fn tree_to_json(tree: Tree<Value>) -> Value {
    match tree {
        Tree::Leaf(value) => value,
        Tree::Branch(children) => Value::Object(
            children
                .into_iter()
                .map(|(key, child)| (key, tree_to_json(child)))
                .collect(),
        ),
    }
}
