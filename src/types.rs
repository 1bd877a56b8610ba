//! Core data model for conversion.
//!
//! A run accumulates into a [`ResultMapping`]: file base-name -> first-column values, in the order
//! files were discovered.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Insertion-ordered mapping from file base-name to that file's first-column values.
///
/// Serializes as a JSON object whose keys appear in insertion order. Inserting a key that is
/// already present replaces its values in place; the key keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultMapping {
    entries: Vec<(String, Vec<String>)>,
}

impl ResultMapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `values` under `key`.
    ///
    /// Returns the previous values if `key` was already present (they are discarded from the
    /// mapping, not merged).
    pub fn insert(&mut self, key: impl Into<String>, values: Vec<String>) -> Option<Vec<String>> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, values)),
            None => {
                self.entries.push((key, values));
                None
            }
        }
    }

    /// Values stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_slice())
    }

    /// Iterate keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Iterate `(key, values)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no file has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of values across all keys.
    pub fn value_count(&self) -> usize {
        self.entries.iter().map(|(_, v)| v.len()).sum()
    }
}

impl Serialize for ResultMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, values) in &self.entries {
            map.serialize_entry(key, values)?;
        }
        map.end()
    }
}
