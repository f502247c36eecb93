use crate::utils::arena::NodeId;

/// Which of a TST node's three child slots a link occupies.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Link {
    /// Sibling with a smaller character at the same depth.
    Lo,
    /// Next character of the key.
    Eq,
    /// Sibling with a greater character at the same depth.
    Hi,
}

/// One character comparison in a [`TernarySearchTree`](crate::TernarySearchTree).
pub(crate) struct TstNode<V> {
    pub(crate) character: char,
    pub(crate) lo: Option<NodeId>,
    pub(crate) eq: Option<NodeId>,
    pub(crate) hi: Option<NodeId>,
    pub(crate) value: Option<V>,
    /// The node whose `lo`, `eq` or `hi` slot holds this one. Non-owning, set once at creation;
    /// `None` only for the root.
    pub(crate) parent: Option<NodeId>,
}

impl<V> TstNode<V> {
    #[inline]
    pub(crate) fn new(character: char, parent: Option<NodeId>) -> Self {
        Self {
            character,
            lo: None,
            eq: None,
            hi: None,
            value: None,
            parent,
        }
    }

    #[inline]
    pub(crate) fn is_terminal(&self) -> bool {
        self.value.is_some()
    }

    #[inline]
    pub(crate) fn has_children(&self) -> bool {
        self.lo.is_some() || self.eq.is_some() || self.hi.is_some()
    }

    #[inline]
    pub(crate) fn link(&self, link: Link) -> Option<NodeId> {
        match link {
            Link::Lo => self.lo,
            Link::Eq => self.eq,
            Link::Hi => self.hi,
        }
    }

    #[inline]
    pub(crate) fn link_mut(&mut self, link: Link) -> &mut Option<NodeId> {
        match link {
            Link::Lo => &mut self.lo,
            Link::Eq => &mut self.eq,
            Link::Hi => &mut self.hi,
        }
    }

    /// The slot holding `child`, by id. Characters alone can't tell an `eq` child from a `lo` or
    /// `hi` one, since the next character of a key may be smaller or greater than this one.
    pub(crate) fn slot_of(&self, child: NodeId) -> Option<Link> {
        [Link::Lo, Link::Eq, Link::Hi]
            .into_iter()
            .find(|&link| self.link(link) == Some(child))
    }

    pub(crate) fn children(&self) -> impl Iterator<Item = (Link, NodeId)> + '_ {
        [Link::Lo, Link::Eq, Link::Hi]
            .into_iter()
            .filter_map(|link| self.link(link).map(|id| (link, id)))
    }
}
