use std::collections::BTreeMap;

use crate::utils::arena::NodeId;

/// One character position in a [`Trie`](crate::Trie).
///
/// Children are kept in an ordered map so that enumeration visits them in ascending code-point
/// order. A node ends a stored key exactly when it holds a value.
pub(crate) struct TrieNode<V> {
    /// Meaningless for the root sentinel.
    pub(crate) character: char,
    pub(crate) children: BTreeMap<char, NodeId>,
    pub(crate) value: Option<V>,
    /// Non-owning; walked upward by delete to prune. `None` only for the root.
    pub(crate) parent: Option<NodeId>,
}

impl<V> TrieNode<V> {
    #[inline]
    pub(crate) fn new_root() -> Self {
        Self {
            character: '\0',
            children: BTreeMap::new(),
            value: None,
            parent: None,
        }
    }

    #[inline]
    pub(crate) fn new_child(character: char, parent: NodeId) -> Self {
        Self {
            character,
            children: BTreeMap::new(),
            value: None,
            parent: Some(parent),
        }
    }

    #[inline]
    pub(crate) fn is_terminal(&self) -> bool {
        self.value.is_some()
    }

    #[inline]
    pub(crate) fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    #[inline]
    pub(crate) fn seek_child(&self, character: char) -> Option<NodeId> {
        self.children.get(&character).copied()
    }
}
