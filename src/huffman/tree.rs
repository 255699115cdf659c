use std::{collections::BinaryHeap, cmp::Reverse};

use log::debug;

use crate::frequency::FrequencyTable;

use super::Symbol;

/// A node of the arena-backed Huffman tree. Children are arena indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HuffNode {
    Leaf { 
        weight: u64, 
        symbol: Symbol,
    },
    Internal { 
        weight: u64, 
        left: usize, 
        right: usize,
    }
}

impl HuffNode {
    #[inline(always)]
    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }
}

/// Queue entry: equal weights leave the queue in insertion order.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct HeapNode {
    weight: u64,
    seq: usize,
    index: usize,
}

#[derive(Clone, Debug)]
pub struct HuffmanTree {
    nodes: Vec<HuffNode>,
    root: usize,
}

impl HuffmanTree {
    /// Builds the tree with the greedy Huffman merge.
    ///
    /// One leaf per entry of `freq` is queued in ascending byte order, then
    /// the end-of-stream leaf with weight 1. The two lightest nodes are merged
    /// until one is left, the first one popped becoming the left child. Ties
    /// on weight are broken by queue insertion order, merged nodes being
    /// queued after every leaf, so the same table always gives the same tree.
    pub fn build(freq: &FrequencyTable) -> Self {
        let num_leaves = freq.len() + 1;
        let mut nodes = Vec::with_capacity(2 * num_leaves - 1);
        let mut freq_tree = BinaryHeap::with_capacity(num_leaves);

        let leaves = freq.iter()
            .map(|(byte, count)| (Symbol::Byte(byte), count))
            .chain(std::iter::once((Symbol::EndOfStream, 1)));

        for (symbol, weight) in leaves {
            let index = nodes.len();
            nodes.push(HuffNode::Leaf { weight, symbol });
            freq_tree.push(Reverse(HeapNode { weight, seq: index, index }));
        }

        while freq_tree.len() > 1 {
            let (Some(Reverse(first)), Some(Reverse(second))) = (freq_tree.pop(), freq_tree.pop()) else {
                break;
            };

            let weight = first.weight + second.weight;
            let index = nodes.len();
            nodes.push(HuffNode::Internal { weight, left: first.index, right: second.index });
            freq_tree.push(Reverse(HeapNode { weight, seq: index, index }));
        }

        // the last node created is the only one never merged
        let tree = HuffmanTree { root: nodes.len() - 1, nodes };

        debug!("Built Huffman tree with {} leaves, {} nodes, root weight {}",
            num_leaves, tree.len(), tree.weight());

        tree
    }

    #[inline(always)]
    pub fn root(&self) -> usize {
        self.root
    }

    /// Returns the node at `index`.
    ///
    /// # Panics
    /// If `index` is not a node of this tree.
    #[inline(always)]
    pub fn node(&self, index: usize) -> &HuffNode {
        &self.nodes[index]
    }

    pub fn root_node(&self) -> &HuffNode {
        self.node(self.root)
    }

    /// Number of nodes, leaves and internal ones.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Weight of the root, the input length plus one for the end-of-stream leaf.
    pub fn weight(&self) -> u64 {
        self.root_node().weight()
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self.root, 0)];

        while let Some((index, depth)) = stack.pop() {
            match self.nodes[index] {
                HuffNode::Leaf { .. } => max_depth = max_depth.max(depth),
                HuffNode::Internal { left, right, .. } => {
                    stack.push((left, depth + 1));
                    stack.push((right, depth + 1));
                }
            }
        }

        max_depth
    }
}
