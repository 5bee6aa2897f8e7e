//! Structural serialization of a code tree.
//!
//! The tree is written as a preorder walk over two streams. The structural stream gets a
//! 0 for every leaf, and a 1 in front of each child of an internal node (two per internal
//! node). The symbol stream gets the leaf symbols in the order the walk meets them. The
//! structural stream ends with a sentinel 1 so that its length can be recovered from
//! packed bytes.

use log::trace;

use super::symbol::Symbol;
use super::tree::{Arena, CodeTree, NodeData, NodeId};
use crate::bitstream::bitset::BitSet;
use crate::error::{HuffmanError, Result};

/// A serialized tree: shape bits and leaf symbols. Neither half means anything alone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeRecord<S> {
    pub structure: BitSet,
    pub symbols: Vec<S>,
}

enum Step {
    Visit(NodeId),
    /// Marker in front of a right child.
    Guard,
}

/// Serialize `tree` into its structural bitstream and symbol stream.
pub fn serialize_tree<S: Symbol>(tree: &CodeTree<S>) -> TreeRecord<S> {
    let mut shape = Vec::with_capacity(tree.len() * 2);
    let mut symbols = Vec::with_capacity(tree.leaf_count());

    let mut stack = vec![Step::Visit(tree.root())];
    while let Some(step) = stack.pop() {
        match step {
            Step::Guard => shape.push(true),
            Step::Visit(id) => match tree.data(id) {
                NodeData::Leaf(symbol) => {
                    shape.push(false);
                    symbols.push(*symbol);
                }
                NodeData::Kids(left, right) => {
                    shape.push(true);
                    stack.push(Step::Visit(*right));
                    stack.push(Step::Guard);
                    stack.push(Step::Visit(*left));
                }
            },
        }
    }

    trace!(
        "Serialized tree: {} structural bits, {} symbols.",
        shape.len(),
        symbols.len()
    );
    TreeRecord {
        structure: BitSet::with_sentinel(&shape),
        symbols,
    }
}

fn corrupt(msg: String) -> HuffmanError {
    HuffmanError::CorruptTree(msg)
}

/// Rebuild a tree from its structural bitstream and symbol stream.
///
/// The read position is a plain loop variable. Internal nodes whose children are still
/// being read wait on an explicit stack, holding their left child once it is complete.
pub fn deserialize_tree<S: Symbol>(structure: &BitSet, symbols: &[S]) -> Result<CodeTree<S>> {
    let end = structure
        .payload_len()
        .ok_or_else(|| corrupt("structural bitstream has no end marker".to_string()))?;
    let mut next_symbol = symbols.iter();

    let mut arena = Arena::with_capacity(symbols.len() * 2);
    let mut pending: Vec<Option<NodeId>> = Vec::new();
    let mut cursor = 0;

    let root = 'tree: loop {
        if cursor >= end {
            return Err(corrupt(format!(
                "structural bitstream ends at bit {} inside the tree",
                cursor
            )));
        }
        let is_internal = structure.get(cursor);
        cursor += 1;
        if is_internal {
            pending.push(None);
            continue;
        }

        let symbol = *next_symbol.next().ok_or_else(|| {
            corrupt(format!(
                "leaf at bit {} but only {} symbols were supplied",
                cursor - 1,
                symbols.len()
            ))
        })?;
        let mut done = arena.leaf(symbol, 0);

        // Hand the finished subtree to the nodes waiting for it.
        loop {
            match pending.last_mut() {
                None => break 'tree done,
                Some(Some(left)) => {
                    let left = *left;
                    pending.pop();
                    done = arena.kids(left, done);
                }
                Some(slot) => {
                    *slot = Some(done);
                    if cursor >= end {
                        return Err(corrupt(format!(
                            "structural bitstream ends at bit {} before a right branch",
                            cursor
                        )));
                    }
                    if !structure.get(cursor) {
                        return Err(corrupt(format!(
                            "expected a right branch marker at bit {}",
                            cursor
                        )));
                    }
                    cursor += 1;
                    break;
                }
            }
        }
    };

    if cursor != end {
        return Err(corrupt(format!(
            "{} structural bits left after the tree was complete",
            end - cursor
        )));
    }
    let left_over = next_symbol.count();
    if left_over > 0 {
        return Err(corrupt(format!(
            "{} symbols left after the tree was complete",
            left_over
        )));
    }
    Ok(arena.into_tree(root))
}
