//! Character trie.
//!
//! One node per character position, rooted at a sentinel that never ends a key. Nodes live in a
//! [`NodeArena`]; children are addressed through an ordered map from character to node id, and
//! every non-root node keeps a non-owning id of its parent for upward pruning.

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

pub use crate::trie::iter::TrieIter;
use crate::trie::node::TrieNode;

/// A character trie mapping string keys to values.
///
/// Depth along a matched path equals the key length. Shared prefixes share nodes; deleting a key
/// removes exactly the nodes no other key passes through.
///
/// ```rust
/// use prefix_dict::{PrefixDictionary, Trie};
///
/// let mut trie = Trie::new();
/// for word in ["hello", "hell", "hey", "heck"] {
///     trie.insert(word, word.len()).unwrap();
/// }
///
/// assert_eq!(trie.len(), 4);
/// assert_eq!(trie.keys_with_prefix("hel"), vec!["hell", "hello"]);
/// assert_eq!(trie.contains("he"), Ok(false));
/// ```
pub struct Trie<ValueType> {
    nodes: NodeArena<TrieNode<ValueType>>,
    root: NodeId,
    size: usize,
}

impl<ValueType> Default for Trie<ValueType> {
    fn default() -> Self {
        Self::new()
    }
}

impl<ValueType> Trie<ValueType> {
    /// Create a new empty trie.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a new empty trie with room for `nodes` nodes (the root included) before the node
    /// arena reallocates.
    pub fn with_capacity(nodes: usize) -> Self {
        let mut nodes = NodeArena::with_capacity(nodes);
        let root = nodes.add(|_| TrieNode::new_root());
        Self {
            nodes,
            root,
            size: 0,
        }
    }

    /// Render the node structure, one node per line, indented by depth.
    ///
    /// Each line shows the node's character and whether it ends a key.
    pub fn debug_tree(&self) -> String {
        let mut out = String::new();
        self.debug_tree_recurse(self.root, 0, &mut out);
        out
    }

    fn debug_tree_recurse(&self, id: NodeId, depth: usize, out: &mut String) {
        let node = &self.nodes[id];
        if id == self.root {
            out.push_str("root\n");
        } else {
            let _ = writeln!(
                out,
                "{:indent$}{:?} ({})",
                "",
                node.character,
                node.is_terminal(),
                indent = depth - 1
            );
        }
        for &child in node.children.values() {
            self.debug_tree_recurse(child, depth + 1, out);
        }
    }

    /// Walk the exact path for `key`, returning the node it lands on.
    fn find(&self, key: &[char]) -> Option<NodeId> {
        let mut cur = self.root;
        for &c in key {
            cur = self.nodes[cur].seek_child(c)?;
        }
        Some(cur)
    }

    /// Remove childless, non-terminal nodes from `start` upward, stopping at the first node that
    /// ends a key, still has children, or is the root.
    fn prune_from(&mut self, start: NodeId) {
        let mut cur = start;
        loop {
            let node = &self.nodes[cur];
            if node.is_terminal() || node.has_children() {
                break;
            }
            let Some(parent) = node.parent else {
                break;
            };
            let character = node.character;
            let removed = self.nodes[parent].children.remove(&character);
            debug_assert_eq!(removed, Some(cur));
            self.nodes.free(cur);
            trace!(?character, "pruned trie node");
            cur = parent;
        }
    }
}

impl<ValueType> PrefixDictionary for Trie<ValueType> {
    type Value = ValueType;
    type PrefixIter<'a>
        = TrieIter<'a, ValueType>
    where
        Self: 'a;

    fn insert_k(
        &mut self,
        key: &CharKey,
        value: ValueType,
    ) -> Result<Option<ValueType>, DictError> {
        let chars = key.non_empty()?;

        let mut cur = self.root;
        for &c in chars {
            cur = match self.nodes[cur].seek_child(c) {
                Some(child) => child,
                None => {
                    let parent = cur;
                    let child = self.nodes.add(|_| TrieNode::new_child(c, parent));
                    self.nodes[parent].children.insert(c, child);
                    child
                }
            };
        }

        let previous = self.nodes[cur].value.replace(value);
        if previous.is_none() {
            self.size += 1;
            trace!(%key, size = self.size, "inserted new trie key");
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

    fn prefix_iter_k(&self, prefix: &CharKey) -> TrieIter<'_, ValueType> {
        match self.find(prefix.as_slice()) {
            Some(start) => TrieIter::new(&self.nodes, start, prefix.as_slice()),
            None => TrieIter::empty(&self.nodes),
        }
    }

    fn len(&self) -> usize {
        self.size
    }

    fn clear(&mut self) {
        let discarded = self.nodes.size();
        self.nodes.clear();
        self.root = self.nodes.add(|_| TrieNode::new_root());
        self.size = 0;
        debug!(discarded, "cleared trie");
    }
}

impl<ValueType> DictStatsTrait for Trie<ValueType> {
    fn get_dict_stats(&self) -> DictStats {
        let mut stats = DictStats {
            allocated_nodes: self.nodes.size(),
            ..Default::default()
        };

        let mut stack = vec![(self.root, 1)];
        while let Some((id, depth)) = stack.pop() {
            let node = &self.nodes[id];
            stats.visit(depth, node.is_terminal(), node.has_children(), id == self.root);
            for &child in node.children.values() {
                debug_assert_eq!(self.nodes[child].parent, Some(id));
                stack.push((child, depth + 1));
            }
        }
        stats
    }
}

impl<ValueType: fmt::Debug> fmt::Debug for Trie<ValueType> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rand::seq::SliceRandom;
    use rand::{rng, Rng};

    use crate::error::DictError;
    use crate::stats::DictStatsTrait;
    use crate::trie::Trie;
    use crate::PrefixDictionary;

    const WORDS: [&str; 6] = ["hey", "hello", "hell", "magazine", "magnificent", "magazines"];

    fn assert_well_formed<V>(trie: &Trie<V>) {
        let stats = trie.get_dict_stats();
        assert!(stats.is_well_formed(), "malformed trie: {:?}", stats);
        assert_eq!(stats.num_terminals, trie.len());
    }

    #[test]
    fn test_insert_contains() {
        let mut trie = Trie::new();
        for word in WORDS {
            assert_eq!(trie.insert(word, ()), Ok(None));
        }
        for word in WORDS {
            assert_eq!(trie.contains(word), Ok(true), "missing {word}");
        }
        assert_eq!(trie.contains("mag"), Ok(false));
        assert_eq!(trie.contains("magazinesx"), Ok(false));
        assert_eq!(trie.contains("x"), Ok(false));
        assert_well_formed(&trie);
    }

    #[test]
    fn test_insert_get() {
        let mut trie = Trie::new();
        for word in WORDS {
            trie.insert(word, word.as_bytes().to_vec()).unwrap();
        }
        for word in WORDS {
            assert_eq!(trie.get(word), Ok(Some(&word.as_bytes().to_vec())));
        }
        assert_eq!(trie.get("he"), Ok(None));
    }

    #[test]
    fn test_insert_returns_replaced_value() {
        let mut trie = Trie::new();
        assert_eq!(trie.insert("key1", 100), Ok(None));
        assert_eq!(trie.insert("key1", 200), Ok(Some(100)));
        assert_eq!(trie.insert("key1", 300), Ok(Some(200)));
        assert_eq!(trie.len(), 1);
        assert_eq!(trie.get("key1"), Ok(Some(&300)));

        // A key that is a prefix of an existing path becomes terminal without new nodes.
        let before = trie.get_dict_stats().num_nodes;
        assert_eq!(trie.insert("key", 1), Ok(None));
        assert_eq!(trie.get_dict_stats().num_nodes, before);
        assert_eq!(trie.len(), 2);
    }

    #[test]
    fn test_get_mut() {
        let mut trie = Trie::new();
        trie.insert("counter", 1).unwrap();
        *trie.get_mut("counter").unwrap().unwrap() += 41;
        assert_eq!(trie.get("counter"), Ok(Some(&42)));
        assert_eq!(trie.get_mut("count"), Ok(None));
        assert_eq!(trie.get_mut("nothing"), Ok(None));
    }

    #[test]
    fn test_empty_key_rejected() {
        let mut trie: Trie<i32> = Trie::new();
        assert_eq!(trie.insert("", 1), Err(DictError::EmptyKey));
        assert_eq!(trie.delete(""), Err(DictError::EmptyKey));
        assert_eq!(trie.contains(""), Err(DictError::EmptyKey));
        assert_eq!(trie.get(""), Err(DictError::EmptyKey));
        assert_eq!(trie.get_mut(""), Err(DictError::EmptyKey));
        assert_eq!(trie.len(), 0);
        assert_well_formed(&trie);
    }

    #[test]
    fn test_starts_with() {
        let mut trie = Trie::new();
        for (i, word) in ["foo", "foobar", "f", "fo"].iter().enumerate() {
            trie.insert(*word, i).unwrap();
        }

        assert_eq!(trie.keys_with_prefix("foo"), vec!["foo", "foobar"]);
        assert_eq!(trie.keys_with_prefix("fo"), vec!["fo", "foo", "foobar"]);
        assert_eq!(trie.keys_with_prefix("f"), vec!["f", "fo", "foo", "foobar"]);
        assert!(trie.keys_with_prefix("nomatch").is_empty());
        assert!(trie.keys_with_prefix("foob").len() == 1);

        let entries = trie.starts_with("fo");
        assert_eq!(
            entries,
            vec![
                ("fo".to_string(), &3),
                ("foo".to_string(), &0),
                ("foobar".to_string(), &1)
            ]
        );
    }

    #[test]
    fn test_starts_with_ascending_order() {
        let mut trie = Trie::new();
        for word in ["b", "ab", "a", "ba", "aa", "c", "abc", "Z"] {
            trie.insert(word, ()).unwrap();
        }
        assert_eq!(
            trie.keys_with_prefix(""),
            vec!["Z", "a", "aa", "ab", "abc", "b", "ba", "c"]
        );
    }

    #[test]
    fn test_with_capacity() {
        let mut trie = Trie::with_capacity(16);
        assert!(trie.is_empty());
        trie.insert("abc", 1).unwrap();
        trie.insert("abd", 2).unwrap();
        trie.insert("b", 3).unwrap();
        assert_eq!(trie.keys_with_prefix("ab"), vec!["abc", "abd"]);
        assert_eq!(trie.get_dict_stats().num_nodes, 6);
        assert_well_formed(&trie);
    }

    #[test]
    fn test_len_clear() {
        let mut trie = Trie::new();
        for word in [
            "hello", "hell", "hey", "heck", "blah", "boo", "foo", "foobar", "moo",
        ] {
            trie.insert(word, ()).unwrap();
        }
        assert_eq!(trie.len(), 9);

        trie.clear();
        assert_eq!(trie.len(), 0);
        assert!(trie.is_empty());
        assert!(trie.starts_with("").is_empty());
        assert_eq!(trie.contains("hello"), Ok(false));
        assert_eq!(trie.get_dict_stats().num_nodes, 1);

        trie.insert("again", ()).unwrap();
        assert_eq!(trie.keys_with_prefix(""), vec!["again"]);
        assert_well_formed(&trie);
    }

    #[test]
    fn test_delete() {
        let mut trie = Trie::new();
        for word in WORDS {
            trie.insert(word, ()).unwrap();
        }

        assert_eq!(trie.delete("magazines"), Ok(true));
        assert_eq!(trie.contains("magazines"), Ok(false));
        assert_eq!(trie.delete("hell"), Ok(true));
        assert_eq!(trie.contains("hell"), Ok(false));
        assert_eq!(trie.len(), 4);

        for word in ["hey", "hello", "magazine", "magnificent"] {
            assert_eq!(trie.contains(word), Ok(true), "missing {word}");
        }
        assert_well_formed(&trie);

        // Absent keys, and prefixes of present keys, are not deleted.
        assert_eq!(trie.delete("hell"), Ok(false));
        assert_eq!(trie.delete("mag"), Ok(false));
        assert_eq!(trie.delete("zebra"), Ok(false));
        assert_eq!(trie.len(), 4);
    }

    #[test]
    fn test_delete_keeps_terminal_ancestor() {
        let mut trie = Trie::new();
        trie.insert("foo", 1).unwrap();
        trie.insert("foobar", 2).unwrap();
        let nodes_with_foo = 1 + 3;

        assert_eq!(trie.delete("foobar"), Ok(true));
        assert_eq!(trie.get("foo"), Ok(Some(&1)));
        assert_eq!(trie.contains("foobar"), Ok(false));
        assert_eq!(trie.contains("foob"), Ok(false));
        assert_eq!(trie.get_dict_stats().num_nodes, nodes_with_foo);
        assert_well_formed(&trie);
    }

    #[test]
    fn test_delete_keeps_sibling_branch() {
        let mut trie = Trie::new();
        trie.insert("team", 1).unwrap();
        trie.insert("tear", 2).unwrap();

        assert_eq!(trie.delete("team"), Ok(true));
        assert_eq!(trie.get("tear"), Ok(Some(&2)));
        // root, t, e, a, r
        assert_eq!(trie.get_dict_stats().num_nodes, 5);

        assert_eq!(trie.delete("tear"), Ok(true));
        assert_eq!(trie.get_dict_stats().num_nodes, 1);
        assert!(trie.is_empty());
    }

    #[test]
    fn test_delete_inner_terminal_keeps_path() {
        let mut trie = Trie::new();
        trie.insert("foo", 1).unwrap();
        trie.insert("foobar", 2).unwrap();

        assert_eq!(trie.delete("foo"), Ok(true));
        assert_eq!(trie.contains("foo"), Ok(false));
        assert_eq!(trie.get("foobar"), Ok(Some(&2)));
        assert_eq!(trie.keys_with_prefix("f"), vec!["foobar"]);
        assert_well_formed(&trie);
    }

    #[test]
    fn test_unicode_keys() {
        let mut trie = Trie::new();
        trie.insert("naïve", 1).unwrap();
        trie.insert("naive", 2).unwrap();
        trie.insert("日本語", 3).unwrap();
        trie.insert("日本", 4).unwrap();

        assert_eq!(trie.get("naïve"), Ok(Some(&1)));
        assert_eq!(trie.keys_with_prefix("na"), vec!["naive", "naïve"]);
        assert_eq!(trie.keys_with_prefix("日"), vec!["日本", "日本語"]);
        assert_eq!(trie.delete("日本語"), Ok(true));
        assert_eq!(trie.keys_with_prefix("日"), vec!["日本"]);
        assert_well_formed(&trie);
    }

    #[test]
    fn test_debug_tree() {
        let mut trie = Trie::new();
        trie.insert("ab", ()).unwrap();
        trie.insert("a", ()).unwrap();
        trie.insert("b", ()).unwrap();
        assert_eq!(
            trie.debug_tree(),
            "root\n'a' (true)\n 'b' (true)\n'b' (true)\n"
        );
        assert_eq!(format!("{:?}", trie), r#"{"a": (), "ab": (), "b": ()}"#);
    }

    fn gen_random_string_keys(count: usize, max_len: usize) -> Vec<String> {
        let chars: Vec<char> = ('a'..='f').collect();
        let mut rng = rng();
        (0..count)
            .map(|_| {
                let len = rng.random_range(1..=max_len);
                (0..len)
                    .map(|_| chars[rng.random_range(0..chars.len())])
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_bulk_random_against_btree() {
        let mut trie = Trie::new();
        let mut btree = BTreeMap::new();
        let mut keys = gen_random_string_keys(5_000, 8);

        for (i, key) in keys.iter().enumerate() {
            assert_eq!(
                trie.insert(key, i).unwrap(),
                btree.insert(key.clone(), i),
                "insert {key}"
            );
        }
        assert_eq!(trie.len(), btree.len());
        assert_well_formed(&trie);

        for prefix in ["", "a", "ab", "fed", "cccc"] {
            let expected: Vec<(String, &usize)> = btree
                .iter()
                .filter(|(k, _)| k.starts_with(prefix))
                .map(|(k, v)| (k.clone(), v))
                .collect();
            assert_eq!(trie.starts_with(prefix), expected, "prefix {prefix:?}");
        }

        keys.shuffle(&mut rng());
        for key in keys.iter().take(keys.len() / 2) {
            assert_eq!(
                trie.delete(key).unwrap(),
                btree.remove(key).is_some(),
                "delete {key}"
            );
        }
        assert_eq!(trie.len(), btree.len());
        assert_well_formed(&trie);

        for (key, value) in btree.iter() {
            assert_eq!(trie.get(key), Ok(Some(value)));
        }
        let all: Vec<String> = trie.iter().map(|(k, _)| k).collect();
        let expected: Vec<String> = btree.keys().cloned().collect();
        assert_eq!(all, expected);
    }

    #[test]
    fn test_delete_all_frees_every_node() {
        let mut trie = Trie::new();
        let keys = gen_random_string_keys(1_000, 6);
        for key in keys.iter() {
            trie.insert(key, ()).unwrap();
        }
        for key in keys.iter() {
            trie.delete(key).unwrap();
        }
        assert!(trie.is_empty());
        let stats = trie.get_dict_stats();
        assert_eq!(stats.num_nodes, 1);
        assert_eq!(stats.allocated_nodes, 1);
    }
}
