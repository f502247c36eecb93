//! Ternary search tree.
//!
//! Each node compares one character. A smaller character goes `lo`, a greater one goes `hi`, and
//! a match consumes the character and continues down `eq`. Shared prefixes collapse into
//! `eq`-chains, while divergent characters at one depth form a small binary search tree.
//! The tree never rebalances, so a node's parent is fixed from the moment it is created.

use std::cmp::Ordering;
use std::fmt;
use std::fmt::Write;

use tracing::{debug, trace};

use crate::error::DictError;
use crate::keys::CharKey;
use crate::stats::{DictStats, DictStatsTrait};
use crate::utils::arena::{NodeArena, NodeId};
use crate::PrefixDictionary;

pub mod iter;
pub(crate) mod node;

pub use crate::tst::iter::TstIter;
use crate::tst::node::{Link, TstNode};

/// A ternary search tree mapping string keys to values.
///
/// ```rust
/// use prefix_dict::{PrefixDictionary, TernarySearchTree};
///
/// let mut tst = TernarySearchTree::new();
/// tst.insert("magazine", 1).unwrap();
/// tst.insert("magnificent", 2).unwrap();
/// tst.insert("magazines", 3).unwrap();
///
/// assert_eq!(tst.keys_with_prefix("magaz"), vec!["magazine", "magazines"]);
/// assert_eq!(tst.delete("magazines"), Ok(true));
/// assert_eq!(tst.get("magazine"), Ok(Some(&1)));
/// ```
pub struct TernarySearchTree<ValueType> {
    nodes: NodeArena<TstNode<ValueType>>,
    root: Option<NodeId>,
    size: usize,
}

impl<ValueType> Default for TernarySearchTree<ValueType> {
    fn default() -> Self {
        Self::new()
    }
}

impl<ValueType> TernarySearchTree<ValueType> {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a new empty tree with room for `nodes` nodes before the node arena reallocates.
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            nodes: NodeArena::with_capacity(nodes),
            root: None,
            size: 0,
        }
    }

    /// Render the node structure, one node per line, indented by depth and labelled with the
    /// slot (`root`, `lo`, `eq`, `hi`) each node occupies.
    pub fn debug_tree(&self) -> String {
        let mut out = String::new();
        if let Some(root) = self.root {
            self.debug_tree_recurse(root, "root", 0, &mut out);
        }
        out
    }

    fn debug_tree_recurse(&self, id: NodeId, label: &str, depth: usize, out: &mut String) {
        let node = &self.nodes[id];
        let _ = writeln!(
            out,
            "{:indent$}{}: {:?} ({})",
            "",
            label,
            node.character,
            node.is_terminal(),
            indent = depth
        );
        for (link, child) in node.children() {
            let label = match link {
                Link::Lo => "lo",
                Link::Eq => "eq",
                Link::Hi => "hi",
            };
            self.debug_tree_recurse(child, label, depth + 1, out);
        }
    }

    /// Descend by three-way comparison, consuming a character only on a match. Returns the node
    /// matching the last character of a non-empty `key`.
    fn find(&self, key: &[char]) -> Option<NodeId> {
        let mut cur = self.root?;
        let mut depth = 0;
        loop {
            let node = &self.nodes[cur];
            let c = *key.get(depth)?;
            match c.cmp(&node.character) {
                Ordering::Less => cur = node.lo?,
                Ordering::Greater => cur = node.hi?,
                Ordering::Equal => {
                    depth += 1;
                    if depth == key.len() {
                        return Some(cur);
                    }
                    cur = node.eq?;
                }
            }
        }
    }

    /// Follow `link` out of `parent`, creating a node for `character` there if the slot is empty.
    fn child_or_insert(&mut self, parent: NodeId, link: Link, character: char) -> NodeId {
        if let Some(child) = self.nodes[parent].link(link) {
            return child;
        }
        let child = self.nodes.add(|_| TstNode::new(character, Some(parent)));
        *self.nodes[parent].link_mut(link) = Some(child);
        child
    }

    /// Unlink and free childless, non-terminal nodes from `start` upward, stopping at the first
    /// node that ends a key or still has a child. Removing the last node empties the tree.
    fn prune_from(&mut self, start: NodeId) {
        let mut cur = start;
        loop {
            let node = &self.nodes[cur];
            if node.is_terminal() || node.has_children() {
                break;
            }
            let character = node.character;
            let parent = node.parent;
            match parent {
                None => {
                    debug_assert_eq!(self.root, Some(cur));
                    self.root = None;
                    self.nodes.free(cur);
                    trace!(?character, "pruned tst root");
                    break;
                }
                Some(parent) => {
                    let Some(link) = self.nodes[parent].slot_of(cur) else {
                        unreachable!("tst node {:?} is not linked from its parent", cur);
                    };
                    *self.nodes[parent].link_mut(link) = None;
                    self.nodes.free(cur);
                    trace!(?character, ?link, "pruned tst node");
                    cur = parent;
                }
            }
        }
    }
}

impl<ValueType> PrefixDictionary for TernarySearchTree<ValueType> {
    type Value = ValueType;
    type PrefixIter<'a>
        = TstIter<'a, ValueType>
    where
        Self: 'a;

    fn insert_k(
        &mut self,
        key: &CharKey,
        value: ValueType,
    ) -> Result<Option<ValueType>, DictError> {
        let chars = key.non_empty()?;

        let mut cur = match self.root {
            Some(root) => root,
            None => {
                let root = self.nodes.add(|_| TstNode::new(chars[0], None));
                self.root = Some(root);
                root
            }
        };
        let mut depth = 0;
        loop {
            let c = chars[depth];
            match c.cmp(&self.nodes[cur].character) {
                Ordering::Less => cur = self.child_or_insert(cur, Link::Lo, c),
                Ordering::Greater => cur = self.child_or_insert(cur, Link::Hi, c),
                Ordering::Equal => {
                    depth += 1;
                    if depth == chars.len() {
                        break;
                    }
                    cur = self.child_or_insert(cur, Link::Eq, chars[depth]);
                }
            }
        }

        let previous = self.nodes[cur].value.replace(value);
        if previous.is_none() {
            self.size += 1;
            trace!(%key, size = self.size, "inserted new tst key");
        }
        Ok(previous)
    }

    fn delete_k(&mut self, key: &CharKey) -> Result<bool, DictError> {
        let chars = key.non_empty()?;
        let Some(found) = self.find(chars) else {
            return Ok(false);
        };
        if self.nodes[found].value.take().is_none() {
            return Ok(false);
        }
        self.size -= 1;
        self.prune_from(found);
        Ok(true)
    }

    fn get_k(&self, key: &CharKey) -> Result<Option<&ValueType>, DictError> {
        let chars = key.non_empty()?;
        Ok(self
            .find(chars)
            .and_then(|found| self.nodes[found].value.as_ref()))
    }

    fn get_mut_k(&mut self, key: &CharKey) -> Result<Option<&mut ValueType>, DictError> {
        let chars = key.non_empty()?;
        let Some(found) = self.find(chars) else {
            return Ok(None);
        };
        Ok(self.nodes[found].value.as_mut())
    }

    fn prefix_iter_k(&self, prefix: &CharKey) -> TstIter<'_, ValueType> {
        if prefix.is_empty() {
            return TstIter::new(&self.nodes, self.root, &[], None);
        }
        match self.find(prefix.as_slice()) {
            Some(found) => {
                let node = &self.nodes[found];
                TstIter::new(&self.nodes, node.eq, prefix.as_slice(), node.value.as_ref())
            }
            None => TstIter::empty(&self.nodes),
        }
    }

    fn len(&self) -> usize {
        self.size
    }

    fn clear(&mut self) {
        let discarded = self.nodes.size();
        self.nodes.clear();
        self.root = None;
        self.size = 0;
        debug!(discarded, "cleared tst");
    }
}

impl<ValueType> DictStatsTrait for TernarySearchTree<ValueType> {
    fn get_dict_stats(&self) -> DictStats {
        let mut stats = DictStats {
            allocated_nodes: self.nodes.size(),
            ..Default::default()
        };

        let mut stack: Vec<(NodeId, usize)> = self.root.map(|root| (root, 1)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            let node = &self.nodes[id];
            // The root has no structural purpose of its own, but an empty tree frees it, so it
            // must be live like every other node.
            stats.visit(depth, node.is_terminal(), node.has_children(), false);
            for (link, child) in node.children() {
                let child_node = &self.nodes[child];
                debug_assert_eq!(child_node.parent, Some(id));
                debug_assert!(match link {
                    Link::Lo => child_node.character < node.character,
                    Link::Hi => child_node.character > node.character,
                    Link::Eq => true,
                });
                stack.push((child, depth + 1));
            }
        }
        stats
    }
}

impl<ValueType: fmt::Debug> fmt::Debug for TernarySearchTree<ValueType> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
