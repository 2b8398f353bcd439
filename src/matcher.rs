//! Column matching: selecting the record entries that belong to a member.
//!
//! Matching is a case-insensitive `starts_with` on the key. Stripping a
//! literal or a group index from a key also trims the separator characters
//! that follow it, so `lane1_place` under `lane*` becomes index `1` with key
//! `place`.
//!
//! [`ColumnPool`] is the per-object view the engine works through: an entry
//! handed to one member is never offered to a later sibling.

use itertools::Itertools;
use log::debug;

use crate::{
    pattern::NamingPattern,
    record::{Entry, FlatRecord},
};

const SEPARATORS: &[char] = &['_', '-', '.', ' '];

/// Strips `literal` from the front of `key`, comparing case-insensitively.
pub fn strip_prefix_ignore_case<'a>(key: &'a str, literal: &str) -> Option<&'a str> {
    let mut rest = key;
    for expected in literal.chars() {
        let mut chars = rest.chars();
        let actual = chars.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
        rest = chars.as_str();
    }
    Some(rest)
}

pub fn trim_separators(key: &str) -> &str {
    key.trim_start_matches(SEPARATORS)
}

/// Splits a key into its run of leading ASCII digits and the remainder.
pub fn split_index(key: &str) -> (&str, &str) {
    let end = key
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(key.len());
    key.split_at(end)
}

/// Every entry whose key starts with the pattern's literal. Non-destructive.
pub fn select<'r>(pattern: &NamingPattern, record: &'r FlatRecord) -> Vec<&'r Entry> {
    let literal = pattern.literal();
    record
        .iter()
        .filter(|entry| strip_prefix_ignore_case(&entry.key, literal).is_some())
        .collect()
}

/// One element's worth of columns under a wildcard pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Leading digits shared by the group's keys, never empty.
    pub index: String,
    /// The group's entries with the index stripped from their keys.
    pub record: FlatRecord,
}

/// Groups an already literal-stripped record by leading digit run.
///
/// Groups come out in order of first appearance. An entry belongs to a
/// group only when its own index equals the group's index, so `1` and `10`
/// stay apart. Entries without leading digits belong to no group and are
/// dropped.
pub fn group_by_index(record: &FlatRecord) -> Vec<Group> {
    let indexed = record
        .iter()
        .filter_map(|entry| {
            let (index, rest) = split_index(trim_separators(&entry.key));
            if index.is_empty() {
                debug!("Column '{}' has no group index; ignoring it", entry.key);
                return None;
            }
            Some((index, trim_separators(rest), entry))
        })
        .collect::<Vec<_>>();

    indexed
        .iter()
        .map(|(index, _, _)| *index)
        .unique()
        .map(|index| Group {
            index: index.to_string(),
            record: indexed
                .iter()
                .filter(|(candidate, _, _)| *candidate == index)
                .map(|(_, key, entry)| Entry::new(*key, entry.value.clone()))
                .collect(),
        })
        .collect()
}

/// Tracks which entries of one record have already been handed to a member.
#[derive(Debug)]
pub struct ColumnPool<'r> {
    record: &'r FlatRecord,
    consumed: Vec<bool>,
}

impl<'r> ColumnPool<'r> {
    pub fn new(record: &'r FlatRecord) -> Self {
        Self {
            record,
            consumed: vec![false; record.len()],
        }
    }

    fn available(&self) -> impl Iterator<Item = (usize, &'r Entry)> + '_ {
        let record = self.record;
        record
            .iter()
            .enumerate()
            .filter(|(idx, _)| !self.consumed[*idx])
    }

    /// Consumes the first unconsumed entry matching `literal`.
    pub fn take_first(&mut self, literal: &str) -> Option<&'r Entry> {
        let (idx, entry) = self
            .available()
            .find(|(_, entry)| strip_prefix_ignore_case(&entry.key, literal).is_some())?;
        self.consumed[idx] = true;
        Some(entry)
    }

    /// Consumes every unconsumed entry matching `literal` and returns them
    /// as a sub-record with the literal stripped.
    pub fn take_prefixed(&mut self, literal: &str) -> FlatRecord {
        let mut sub = FlatRecord::new();
        for (idx, entry) in self.record.iter().enumerate() {
            if self.consumed[idx] {
                continue;
            }
            if let Some(rest) = strip_prefix_ignore_case(&entry.key, literal) {
                self.consumed[idx] = true;
                sub.push(trim_separators(rest), entry.value.clone());
            }
        }
        sub
    }

    /// Consumes everything still available.
    pub fn take_all(&mut self) -> FlatRecord {
        let rest = self
            .available()
            .map(|(_, entry)| entry.clone())
            .collect::<FlatRecord>();
        self.consumed.iter_mut().for_each(|flag| *flag = true);
        rest
    }

    pub fn remaining(&self) -> usize {
        self.consumed.iter().filter(|flag| !**flag).count()
    }

    pub fn unconsumed_keys(&self) -> Vec<&'r str> {
        self.available()
            .map(|(_, entry)| entry.key.as_str())
            .collect()
    }
}
