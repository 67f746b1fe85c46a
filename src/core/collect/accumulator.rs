//! Insertion-ordered, deduplicating record store for one collection run

use crate::domain::{DedupKey, DedupStrategy, Record};
use indexmap::IndexMap;

/// Accumulates page results keyed by dedup key
///
/// A record whose key was already seen replaces the stored value but keeps the
/// position of the first occurrence.
#[derive(Debug)]
pub struct Accumulator {
    strategy: DedupStrategy,
    entries: IndexMap<DedupKey, Record>,
    merged: usize,
}

impl Accumulator {
    pub fn new(strategy: DedupStrategy) -> Self {
        Self {
            strategy,
            entries: IndexMap::new(),
            merged: 0,
        }
    }

    /// Merges records in order; returns how many keys were new
    pub fn merge(&mut self, records: impl IntoIterator<Item = Record>) -> usize {
        let before = self.entries.len();
        for record in records {
            let key = self.strategy.key_for(&record);
            self.merged += 1;
            self.entries.insert(key, record);
        }
        self.entries.len() - before
    }

    /// Distinct records held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records merged so far, duplicates included
    pub fn merged(&self) -> usize {
        self.merged
    }

    pub fn duplicates_collapsed(&self) -> usize {
        self.merged - self.entries.len()
    }

    /// Takes the records out in first-seen order, leaving the accumulator empty
    pub fn drain(&mut self) -> Vec<Record> {
        self.merged = 0;
        std::mem::take(&mut self.entries).into_values().collect()
    }
}
