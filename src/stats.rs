//! Structural statistics for the dictionaries.
//!
//! Gathered by a full walk from the root, so they reflect the nodes actually reachable rather
//! than any cached counter. Useful for:
//! - comparing the shape of a trie and a TST built from the same keys
//! - checking structural invariants in tests (`num_terminals == len()`, `dead_nodes == 0`)

pub trait DictStatsTrait {
    fn get_dict_stats(&self) -> DictStats;
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DictStats {
    /// Nodes reachable from the root, the trie's root sentinel included.
    pub num_nodes: usize,
    /// Reachable nodes that end a stored key.
    pub num_terminals: usize,
    /// Length of the longest root-to-node path, counted in nodes.
    pub max_depth: usize,
    /// Non-root nodes that neither end a key nor have children. Deletion prunes these, so any
    /// non-zero count is a bug.
    pub dead_nodes: usize,
    /// Nodes held by the arena, reachable or not. Equals `num_nodes` unless nodes leaked.
    pub allocated_nodes: usize,
}

impl DictStats {
    pub(crate) fn visit(&mut self, depth: usize, terminal: bool, has_children: bool, is_root: bool) {
        self.num_nodes += 1;
        if terminal {
            self.num_terminals += 1;
        }
        if depth > self.max_depth {
            self.max_depth = depth;
        }
        if !is_root && !terminal && !has_children {
            self.dead_nodes += 1;
        }
    }

    /// True when every allocated node is reachable and none of them is dead.
    pub fn is_well_formed(&self) -> bool {
        self.dead_nodes == 0 && self.allocated_nodes == self.num_nodes
    }
}
