//! The code tree and the Huffman construction that produces it.
//!
//! Nodes live in a single arena and refer to their children by `NodeId`. Children are
//! always stored before their parent, the tree is full (every node has zero or two
//! children) and it never changes once built. All walks over it are iterative, so a
//! deep tree from a badly skewed alphabet cannot overflow the call stack.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use log::debug;

use super::freq_table::FrequencyTable;
use super::symbol::Symbol;
use crate::error::{HuffmanError, Result};

/// Handle of a node inside its tree's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeData<S> {
    /// Left and right children.
    Kids(NodeId, NodeId),
    Leaf(S),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node<S> {
    /// Combined count of the subtree. Only meaningful for trees built from counts; a tree
    /// read back from storage carries zero weights.
    pub weight: u64,
    pub node_data: NodeData<S>,
}

/// A full binary code tree.
#[derive(Clone, Debug)]
pub struct CodeTree<S> {
    nodes: Vec<Node<S>>,
    root: NodeId,
}

/// Appends nodes and hands out their handles.
pub(crate) struct Arena<S> {
    nodes: Vec<Node<S>>,
}

impl<S> Arena<S> {
    pub(crate) fn with_capacity(size: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(size),
        }
    }

    pub(crate) fn leaf(&mut self, symbol: S, weight: u64) -> NodeId {
        self.push(Node {
            weight,
            node_data: NodeData::Leaf(symbol),
        })
    }

    pub(crate) fn kids(&mut self, left: NodeId, right: NodeId) -> NodeId {
        let weight = self.nodes[left.0]
            .weight
            .saturating_add(self.nodes[right.0].weight);
        self.push(Node {
            weight,
            node_data: NodeData::Kids(left, right),
        })
    }

    fn push(&mut self, node: Node<S>) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub(crate) fn into_tree(self, root: NodeId) -> CodeTree<S> {
        CodeTree {
            nodes: self.nodes,
            root,
        }
    }
}

impl<S: Symbol> CodeTree<S> {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node<S> {
        &self.nodes[id.0]
    }

    pub fn data(&self, id: NodeId) -> &NodeData<S> {
        &self.nodes[id.0].node_data
    }

    /// Total number of nodes, leaves and internal.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of symbols in the tree. For a full binary tree this is (len + 1) / 2.
    pub fn leaf_count(&self) -> usize {
        (self.nodes.len() + 1) / 2
    }

    /// True when the root itself is a leaf, i.e. the alphabet has one symbol.
    pub fn is_single_leaf(&self) -> bool {
        matches!(self.data(self.root), NodeData::Leaf(_))
    }

    /// Weight of the root, which is the total count the tree was built from.
    pub fn weight(&self) -> u64 {
        self.node(self.root).weight
    }

    /// Every leaf symbol with its depth, in preorder (left before right).
    pub fn leaves(&self) -> Vec<(S, usize)> {
        let mut leaves = Vec::with_capacity(self.leaf_count());
        let mut stack = vec![(self.root, 0_usize)];
        while let Some((id, depth)) = stack.pop() {
            match self.data(id) {
                NodeData::Leaf(symbol) => leaves.push((*symbol, depth)),
                NodeData::Kids(left, right) => {
                    stack.push((*right, depth + 1));
                    stack.push((*left, depth + 1));
                }
            }
        }
        leaves
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.leaves().iter().map(|&(_, d)| d).max().unwrap_or(0)
    }

    /// True when both trees have the same shape and the same symbol at every leaf.
    /// Weights and arena layout are ignored.
    pub fn is_isomorphic(&self, other: &CodeTree<S>) -> bool {
        let mut stack = vec![(self.root, other.root)];
        while let Some((a, b)) = stack.pop() {
            match (self.data(a), other.data(b)) {
                (NodeData::Leaf(x), NodeData::Leaf(y)) if x == y => {}
                (NodeData::Kids(al, ar), NodeData::Kids(bl, br)) => {
                    stack.push((*ar, *br));
                    stack.push((*al, *bl));
                }
                _ => return false,
            }
        }
        true
    }
}

/// Build the Huffman tree for `freqs`.
///
/// Every symbol starts as a leaf in a min-queue keyed by (weight, sequence). Leaves get
/// their sequence numbers in table order and each merged node takes the next free one,
/// so equal weights always leave the queue first-in first-out. The two lightest nodes are
/// merged until one remains: the first one taken becomes the left child.
pub fn build_tree<S: Symbol>(freqs: &FrequencyTable<S>) -> Result<CodeTree<S>> {
    if freqs.is_empty() {
        return Err(HuffmanError::EmptyAlphabet);
    }

    let mut arena = Arena::with_capacity(freqs.len() * 2 - 1);
    let mut queue = BinaryHeap::with_capacity(freqs.len());
    for (seq, (symbol, count)) in freqs.iter().enumerate() {
        if count == 0 {
            return Err(HuffmanError::ZeroFrequency {
                symbol: format!("{:?}", symbol),
            });
        }
        queue.push(Reverse((count, seq, arena.leaf(symbol, count))));
    }

    let mut seq = freqs.len();
    let root = loop {
        let Reverse((_, _, left)) = queue.pop().ok_or(HuffmanError::EmptyAlphabet)?;
        let Some(Reverse((_, _, right))) = queue.pop() else {
            break left;
        };
        let parent = arena.kids(left, right);
        queue.push(Reverse((arena.nodes[parent.0].weight, seq, parent)));
        seq += 1;
    };

    let tree = arena.into_tree(root);
    debug!(
        "Built code tree: {} symbols, {} nodes, depth {}, weight {}.",
        tree.leaf_count(),
        tree.len(),
        tree.depth(),
        tree.weight()
    );
    Ok(tree)
}

#[cfg(test)]
mod test {
    use super::*;

    fn classic() -> FrequencyTable<char> {
        FrequencyTable::from_counts([
            ('a', 5),
            ('b', 9),
            ('c', 12),
            ('d', 13),
            ('e', 16),
            ('f', 45),
        ])
        .unwrap()
    }

    #[test]
    fn empty_alphabet_test() {
        let freqs = FrequencyTable::<char>::new();
        assert!(matches!(
            build_tree(&freqs),
            Err(HuffmanError::EmptyAlphabet)
        ));
    }

    #[test]
    fn single_symbol_test() {
        let freqs = FrequencyTable::from_counts([('x', 10)]).unwrap();
        let tree = build_tree(&freqs).unwrap();
        assert!(tree.is_single_leaf());
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.leaves(), vec![('x', 0)]);
        assert_eq!(tree.weight(), 10);
    }

    #[test]
    fn classic_depths_test() {
        let tree = build_tree(&classic()).unwrap();
        // f first (45 < 55), then the 55 subtree: c d on the left, a b e on the right.
        assert_eq!(
            tree.leaves(),
            vec![
                ('f', 1),
                ('c', 3),
                ('d', 3),
                ('a', 4),
                ('b', 4),
                ('e', 3)
            ]
        );
        let cost: u64 = tree
            .leaves()
            .iter()
            .map(|&(s, d)| classic().get(&s).unwrap() * d as u64)
            .sum();
        assert_eq!(cost, 224);
        assert_eq!(tree.weight(), 100);
        assert_eq!(tree.len(), 11);
    }

    #[test]
    fn tie_break_test() {
        // All equal: the first two symbols in table order merge first and sit on the left.
        let freqs = FrequencyTable::from_counts([('p', 1), ('q', 1), ('r', 1), ('s', 1)]).unwrap();
        let tree = build_tree(&freqs).unwrap();
        assert_eq!(
            tree.leaves(),
            vec![('p', 2), ('q', 2), ('r', 2), ('s', 2)]
        );
    }

    #[test]
    fn merged_node_after_equal_leaf_test() {
        // a+b = 2 ties with c = 2; c was queued first so it is taken first (left).
        let freqs = FrequencyTable::from_counts([('a', 1), ('b', 1), ('c', 2)]).unwrap();
        let tree = build_tree(&freqs).unwrap();
        assert_eq!(tree.leaves(), vec![('c', 1), ('a', 2), ('b', 2)]);
    }

    #[test]
    fn determinism_test() {
        let one = build_tree(&classic()).unwrap();
        let two = build_tree(&classic()).unwrap();
        assert!(one.is_isomorphic(&two));
        assert_eq!(one.leaves(), two.leaves());
    }

    #[test]
    fn isomorphic_mismatch_test() {
        let one = build_tree(&classic()).unwrap();
        let freqs = FrequencyTable::from_counts([('a', 1), ('b', 1), ('c', 2)]).unwrap();
        let two = build_tree(&freqs).unwrap();
        assert!(!one.is_isomorphic(&two));
        assert!(two.is_isomorphic(&two.clone()));
    }
}
