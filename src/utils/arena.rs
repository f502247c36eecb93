use std::ops::{Index, IndexMut};

// A u32 rather than usize: a single dictionary will not hold four billion nodes, and it keeps the
// per-node link fields small (three of them in a TST node).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    fn slot(self) -> usize {
        self.0 as usize
    }
}

enum Slot<N> {
    Occupied(N),
    // Link to the next vacant slot, forming an intrusive free list.
    Vacant(Option<u32>),
}

/// Owned storage for the nodes of one dictionary, addressed by [`NodeId`].
///
/// Freed slots are threaded onto a free list and handed out again by the next `add`, so a
/// long-running insert/delete workload does not grow the backing vector without bound. Every
/// node is owned by exactly one arena; links between nodes are plain ids and never own anything.
pub struct NodeArena<N> {
    slots: Vec<Slot<N>>,
    free_head: Option<u32>,
    size: usize,
}

impl<N> NodeArena<N> {
    pub fn new() -> Self {
        Self {
            slots: vec![],
            free_head: None,
            size: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            size: 0,
        }
    }

    /// Store a new node, built by `f` from the id it will live at.
    pub fn add<F: FnOnce(NodeId) -> N>(&mut self, f: F) -> NodeId {
        let id = match self.free_head {
            None => {
                let id = NodeId(self.slots.len() as u32);
                self.slots.push(Slot::Occupied(f(id)));
                id
            }
            Some(idx) => {
                let id = NodeId(idx);
                let Slot::Vacant(next) = &self.slots[id.slot()] else {
                    unreachable!("free list points at an occupied slot");
                };
                self.free_head = *next;
                self.slots[id.slot()] = Slot::Occupied(f(id));
                id
            }
        };
        self.size += 1;
        id
    }

    /// Release the node at `id`, returning it. Returns `None` if the slot was already vacant.
    pub fn free(&mut self, id: NodeId) -> Option<N> {
        let slot = self.slots.get_mut(id.slot())?;
        if matches!(slot, Slot::Vacant(_)) {
            return None;
        }
        let Slot::Occupied(node) = std::mem::replace(slot, Slot::Vacant(self.free_head)) else {
            unreachable!();
        };
        self.free_head = Some(id.0);
        self.size -= 1;
        Some(node)
    }

    pub fn get(&self, id: NodeId) -> Option<&N> {
        match self.slots.get(id.slot()) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut N> {
        match self.slots.get_mut(id.slot()) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    /// Drop every node and forget the free list. Capacity is retained.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.size = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of live nodes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Iterate live nodes with their ids, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &N)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| match slot {
                Slot::Occupied(node) => Some((NodeId(i as u32), node)),
                Slot::Vacant(_) => None,
            })
    }
}

impl<N> Index<NodeId> for NodeArena<N> {
    type Output = N;

    fn index(&self, id: NodeId) -> &Self::Output {
        match &self.slots[id.slot()] {
            Slot::Occupied(node) => node,
            Slot::Vacant(_) => panic!("access to freed node {:?}", id),
        }
    }
}

impl<N> IndexMut<NodeId> for NodeArena<N> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        match &mut self.slots[id.slot()] {
            Slot::Occupied(node) => node,
            Slot::Vacant(_) => panic!("access to freed node {:?}", id),
        }
    }
}

impl<N> Default for NodeArena<N> {
    fn default() -> Self {
        Self::new()
    }
}
