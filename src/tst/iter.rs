use crate::tst::node::TstNode;
use crate::utils::arena::{NodeArena, NodeId};

enum Step {
    // Expand a subtree: queue its `lo` side, the node itself, then its `hi` side.
    Enter(NodeId, usize),
    // Append the node's character to the key, queue its `eq` subtree, yield if terminal.
    Visit(NodeId, usize),
}

/// In-order iterator over the terminal nodes of a TST subtree.
///
/// `lo` and `hi` links lead to sibling characters at the same depth and leave the key length
/// alone; only an `eq` step extends it. Visiting `lo`, then the node and its `eq` subtree, then
/// `hi` produces keys in ascending order.
pub struct TstIter<'a, V> {
    nodes: &'a NodeArena<TstNode<V>>,
    // Every step records the key length it starts from, so the shared key buffer can be
    // truncated back to the right depth when a step is finally taken.
    stack: Vec<Step>,
    cur_key: Vec<char>,
    start_value: Option<&'a V>,
}

impl<'a, V> TstIter<'a, V> {
    /// Iterate `subtree`, whose keys all extend `prefix`. `start_value` is the value stored for
    /// `prefix` itself, if any, and is yielded first.
    pub(crate) fn new(
        nodes: &'a NodeArena<TstNode<V>>,
        subtree: Option<NodeId>,
        prefix: &[char],
        start_value: Option<&'a V>,
    ) -> Self {
        Self {
            nodes,
            stack: subtree
                .map(|id| Step::Enter(id, prefix.len()))
                .into_iter()
                .collect(),
            cur_key: prefix.to_vec(),
            start_value,
        }
    }

    pub(crate) fn empty(nodes: &'a NodeArena<TstNode<V>>) -> Self {
        Self::new(nodes, None, &[], None)
    }
}

impl<'a, V> Iterator for TstIter<'a, V> {
    type Item = (String, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(v) = self.start_value.take() {
            return Some((self.cur_key.iter().collect(), v));
        }

        let nodes = self.nodes;
        loop {
            match self.stack.pop()? {
                Step::Enter(id, depth) => {
                    let node = &nodes[id];
                    // Pushed in reverse of the order they should be taken.
                    if let Some(hi) = node.hi {
                        self.stack.push(Step::Enter(hi, depth));
                    }
                    self.stack.push(Step::Visit(id, depth));
                    if let Some(lo) = node.lo {
                        self.stack.push(Step::Enter(lo, depth));
                    }
                }
                Step::Visit(id, depth) => {
                    let node = &nodes[id];
                    self.cur_key.truncate(depth);
                    self.cur_key.push(node.character);
                    if let Some(eq) = node.eq {
                        self.stack.push(Step::Enter(eq, depth + 1));
                    }
                    if let Some(v) = node.value.as_ref() {
                        return Some((self.cur_key.iter().collect(), v));
                    }
                }
            }
        }
    }
}
