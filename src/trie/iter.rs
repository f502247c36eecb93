use std::collections::btree_map;

use crate::trie::node::TrieNode;
use crate::utils::arena::{NodeArena, NodeId};

type ChildIter<'a> = btree_map::Iter<'a, char, NodeId>;

/// Depth-first, ascending iterator over the terminal nodes beneath one trie node.
pub struct TrieIter<'a, V> {
    nodes: &'a NodeArena<TrieNode<V>>,
    // One child iterator per level we've descended, paired with the key length at that level.
    node_iter_stack: Vec<(ChildIter<'a>, usize)>,
    cur_key: Vec<char>,
    // The value of the starting node itself, yielded before any descendant.
    start_value: Option<&'a V>,
}

impl<'a, V> TrieIter<'a, V> {
    pub(crate) fn new(nodes: &'a NodeArena<TrieNode<V>>, start: NodeId, prefix: &[char]) -> Self {
        let node = &nodes[start];
        Self {
            nodes,
            node_iter_stack: vec![(node.children.iter(), prefix.len())],
            cur_key: prefix.to_vec(),
            start_value: node.value.as_ref(),
        }
    }

    pub(crate) fn empty(nodes: &'a NodeArena<TrieNode<V>>) -> Self {
        Self {
            nodes,
            node_iter_stack: vec![],
            cur_key: vec![],
            start_value: None,
        }
    }
}

impl<'a, V> Iterator for TrieIter<'a, V> {
    type Item = (String, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(v) = self.start_value.take() {
            return Some((self.cur_key.iter().collect(), v));
        }

        // Take the next child off the deepest iterator. Exhausted iterators are popped, which
        // moves us back up a level. Every child visited gets its own iterator pushed, and is
        // yielded if it ends a key: parents come out before their descendants, which together
        // with the ordered child maps gives ascending key order.
        let nodes = self.nodes;
        loop {
            let (children, base_len) = self.node_iter_stack.last_mut()?;
            let base_len = *base_len;
            let Some((&c, &id)) = children.next() else {
                self.node_iter_stack.pop();
                continue;
            };

            self.cur_key.truncate(base_len);
            self.cur_key.push(c);
            let node = &nodes[id];
            self.node_iter_stack
                .push((node.children.iter(), self.cur_key.len()));

            if let Some(v) = node.value.as_ref() {
                return Some((self.cur_key.iter().collect(), v));
            }
        }
    }
}
