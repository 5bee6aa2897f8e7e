use std::fmt::Write as _;

use rustc_hash::FxHashMap;

use super::freq_table::FrequencyTable;
use super::symbol::Symbol;
use super::tree::{CodeTree, NodeData};

/// Symbol to code map derived from a tree. Codes are never empty and no code is a prefix
/// of another.
#[derive(Clone, Debug)]
pub struct CodeTable<S: Symbol> {
    codes: FxHashMap<S, Vec<bool>>,
    /// Symbols in leaf order, for stable listings.
    order: Vec<S>,
}

impl<S: Symbol> CodeTable<S> {
    pub fn get(&self, symbol: &S) -> Option<&[bool]> {
        self.codes.get(symbol).map(Vec::as_slice)
    }

    pub fn contains(&self, symbol: &S) -> bool {
        self.codes.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// (symbol, code) pairs in leaf order.
    pub fn iter(&self) -> impl Iterator<Item = (S, &[bool])> + '_ {
        self.order
            .iter()
            .map(move |s| (*s, self.codes[s].as_slice()))
    }

    /// A code as a string of 0s and 1s.
    pub fn code_string(&self, symbol: &S) -> Option<String> {
        self.get(symbol).map(|code| {
            code.iter().fold(String::with_capacity(code.len()), |mut s, &bit| {
                s.push(if bit { '1' } else { '0' });
                s
            })
        })
    }

    /// Total bits needed to code every occurrence in `freqs`. Symbols without a code are
    /// skipped.
    pub fn weighted_cost(&self, freqs: &FrequencyTable<S>) -> u64 {
        freqs
            .iter()
            .filter_map(|(s, count)| self.get(&s).map(|code| code.len() as u64 * count))
            .sum()
    }

    /// Check that no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<&[bool]> = self.codes.values().map(Vec::as_slice).collect();
        // After sorting, a prefix always sits right before some code it prefixes.
        codes.sort_unstable();
        codes.windows(2).all(|w| !w[1].starts_with(w[0]))
    }

    /// One line per symbol: symbol, code length, code.
    pub fn listing(&self) -> String {
        let mut out = String::new();
        for (symbol, code) in self.iter() {
            let bits = self.code_string(&symbol).unwrap_or_default();
            // char's Debug ignores width, so pad the rendered form instead.
            let shown = format!("{:?}", symbol);
            let _ = writeln!(out, "{:>10} {:>3} {}", shown, code.len(), bits);
        }
        out
    }
}

/// Walk the tree and record the path to every leaf: 0 for each left step, 1 for each
/// right step. A tree that is a single leaf gives its symbol the code "0".
pub fn generate_codes<S: Symbol>(tree: &CodeTree<S>) -> CodeTable<S> {
    let mut codes = FxHashMap::default();
    let mut order = Vec::with_capacity(tree.leaf_count());

    if let NodeData::Leaf(symbol) = tree.data(tree.root()) {
        codes.insert(*symbol, vec![false]);
        order.push(*symbol);
        return CodeTable { codes, order };
    }

    let mut stack = vec![(tree.root(), Vec::new())];
    while let Some((id, path)) = stack.pop() {
        match tree.data(id) {
            NodeData::Leaf(symbol) => {
                order.push(*symbol);
                codes.insert(*symbol, path);
            }
            NodeData::Kids(left, right) => {
                let mut right_path = path.clone();
                right_path.push(true);
                let mut left_path = path;
                left_path.push(false);
                stack.push((*right, right_path));
                stack.push((*left, left_path));
            }
        }
    }
    CodeTable { codes, order }
}
