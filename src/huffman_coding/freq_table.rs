use rustc_hash::FxHashMap;

use super::symbol::Symbol;
use crate::error::{HuffmanError, Result};

/// Occurrence counts per symbol.
///
/// Symbols keep the order in which they were first seen. That order seeds the tree
/// builder, so the same table always produces the same tree.
#[derive(Clone, Debug)]
pub struct FrequencyTable<S: Symbol> {
    entries: Vec<(S, u64)>,
    index: FxHashMap<S, usize>,
}

impl<S: Symbol> FrequencyTable<S> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Build a table from (symbol, count) pairs. A repeated symbol takes the later count.
    pub fn from_counts<I: IntoIterator<Item = (S, u64)>>(counts: I) -> Result<Self> {
        let mut table = Self::new();
        for (symbol, count) in counts {
            table.insert(symbol, count)?;
        }
        Ok(table)
    }

    /// Count one more occurrence of `symbol`.
    pub fn add(&mut self, symbol: S) {
        match self.index.get(&symbol) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(symbol, self.entries.len());
                self.entries.push((symbol, 1));
            }
        }
    }

    /// Count every symbol in `symbols`.
    pub fn add_all<I: IntoIterator<Item = S>>(&mut self, symbols: I) {
        symbols.into_iter().for_each(|s| self.add(s));
    }

    /// Set the count for `symbol`. Counts must be at least 1.
    pub fn insert(&mut self, symbol: S, count: u64) -> Result<()> {
        if count == 0 {
            return Err(HuffmanError::ZeroFrequency {
                symbol: format!("{:?}", symbol),
            });
        }
        match self.index.get(&symbol) {
            Some(&i) => self.entries[i].1 = count,
            None => {
                self.index.insert(symbol, self.entries.len());
                self.entries.push((symbol, count));
            }
        }
        Ok(())
    }

    pub fn get(&self, symbol: &S) -> Option<u64> {
        self.index.get(symbol).map(|&i| self.entries[i].1)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|&(_, c)| c).sum()
    }

    /// (symbol, count) pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (S, u64)> + '_ {
        self.entries.iter().copied()
    }
}

impl<S: Symbol> Default for FrequencyTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Symbol> FromIterator<S> for FrequencyTable<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut table = Self::new();
        table.add_all(iter);
        table
    }
}
