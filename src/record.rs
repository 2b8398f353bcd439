//! Flat records: the ordered key/value rows the engine consumes.
//!
//! A [`FlatRecord`] keeps its entries in source order and never deduplicates
//! keys. Keys keep their original spelling; matching against them is
//! case-insensitive and happens in [`crate::matcher`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

impl Entry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlatRecord {
    entries: Vec<Entry>,
}

impl FlatRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zips a header row with a data row. Extra cells on either side are dropped.
    pub fn from_row(headers: &[String], row: &[String]) -> Self {
        headers
            .iter()
            .zip(row.iter())
            .map(|(key, value)| Entry::new(key.clone(), value.clone()))
            .collect()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push(Entry::new(key, value));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }
}

impl From<Vec<Entry>> for FlatRecord {
    fn from(entries: Vec<Entry>) -> Self {
        Self { entries }
    }
}

impl FromIterator<Entry> for FlatRecord {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for FlatRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(key, value)| Entry::new(key, value))
            .collect()
    }
}

impl<'a> IntoIterator for &'a FlatRecord {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for FlatRecord {
    type Item = Entry;
    type IntoIter = std::vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
