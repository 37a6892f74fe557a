//! Ordered string-keyed map with JavaScript object property order.
//!
//! Phrase tables and token alias maps are exchanged as JSON with a pipeline that hashes the
//! serialized text, so the key order of our maps must match what a JavaScript engine would
//! produce for the same insertions: keys that are canonical array indices come first in
//! ascending numeric order, every other key follows in insertion order.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for PropertyMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> PropertyMap<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.position(key).map(move |i| &mut self.entries[i].1)
    }

    /// Insert or replace a value. A replaced key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        match self.position(&key) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].1, value)),
            None => {
                self.insert_new(key, value);
                None
            }
        }
    }

    pub fn get_or_insert_with(&mut self, key: &str, default: impl FnOnce() -> V) -> &mut V {
        let index = match self.position(key) {
            Some(i) => i,
            None => self.insert_new(key.to_string(), default()),
        };
        &mut self.entries[index].1
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    fn insert_new(&mut self, key: String, value: V) -> usize {
        let index = match array_index(&key) {
            Some(n) => self
                .entries
                .iter()
                .position(|(k, _)| array_index(k).is_none_or(|other| other > n))
                .unwrap_or(self.entries.len()),
            None => self.entries.len(),
        };
        self.entries.insert(index, (key, value));
        index
    }
}

/// Numeric value of `key` if JavaScript would treat it as an array index.
fn array_index(key: &str) -> Option<u32> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if key.len() > 1 && key.starts_with('0') {
        return None;
    }
    key.parse::<u32>().ok().filter(|n| *n != u32::MAX)
}

impl<K: Into<String>, V> FromIterator<(K, V)> for PropertyMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = PropertyMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<V> IntoIterator for PropertyMap<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<V: Serialize> Serialize for PropertyMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for PropertyMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PropertyMapVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for PropertyMapVisitor<V> {
            type Value = PropertyMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = PropertyMap::new();
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(PropertyMapVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn keys<V>(map: &PropertyMap<V>) -> Vec<&str> {
        map.keys().collect()
    }

    #[test]
    fn string_keys_keep_insertion_order() {
        let map: PropertyMap<u8> = [("*", 0), ("_1", 1), ("photos", 2)].into_iter().collect();
        assert_eq!(keys(&map), vec!["*", "_1", "photos"]);
    }

    #[test]
    fn index_keys_sort_numerically_before_strings() {
        let map: PropertyMap<u8> = [("*", 0), ("2", 1), ("10", 2), ("1", 3), ("x", 4)]
            .into_iter()
            .collect();
        assert_eq!(keys(&map), vec!["1", "2", "10", "*", "x"]);
    }

    #[test]
    fn leading_zero_and_overflow_are_plain_strings() {
        let map: PropertyMap<u8> = [("b", 0), ("01", 1), ("4294967295", 2), ("0", 3)]
            .into_iter()
            .collect();
        assert_eq!(keys(&map), vec!["0", "b", "01", "4294967295"]);
    }

    #[test]
    fn replacing_keeps_position() {
        let mut map: PropertyMap<u8> = [("a", 0), ("b", 1)].into_iter().collect();
        assert_eq!(map.insert("a", 5), Some(0));
        assert_eq!(keys(&map), vec!["a", "b"]);
        assert_eq!(map.get("a"), Some(&5));
    }

    #[test]
    fn json_round_trip_matches_javascript_order() {
        let map: PropertyMap<u8> = serde_json::from_str(r#"{"*":1,"2":2,"0":3}"#).unwrap();
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"0":3,"2":2,"*":1}"#);
    }
}
