//! # Node Arena
//!
//! Arena-backed storage for doubly-linked lists with random references.
//!
//! Every node lives in a slot of a [`NodeArena`] and is addressed by its
//! [`NodeId`]. The id is the node's identity: two nodes with equal `data` are
//! still distinct, and every identity-keyed table in this crate is keyed by
//! `NodeId`. Links are plain `Option<NodeId>` values, so the arena owns all
//! nodes and references carry no ownership.

use crate::error::{ListError, Result};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Handle to a node inside a [`NodeArena`].
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the arena slot of this node.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// One list element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListNode {
    pub data: String,
    pub next: Option<NodeId>,
    pub previous: Option<NodeId>,
    pub random: Option<NodeId>,
}

impl ListNode {
    fn detached(data: String) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }
}

/// Owner of list nodes. A single arena may hold any number of chains.
#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    nodes: Vec<ListNode>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Number of nodes allocated in the arena (across all chains).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a detached node carrying `data`.
    pub fn push(&mut self, data: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(ListNode::detached(data.into()));
        id
    }

    /// Allocate one linked chain from `values` and return its head.
    ///
    /// Returns `None` when `values` is empty.
    pub fn push_chain<I, S>(&mut self, values: I) -> Option<NodeId>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut head = None;
        let mut tail: Option<NodeId> = None;
        for value in values {
            let id = self.push(value);
            match tail {
                Some(prev) => self.attach(prev, id),
                None => head = Some(id),
            }
            tail = Some(id);
        }
        head
    }

    pub fn get(&self, id: NodeId) -> Option<&ListNode> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut ListNode> {
        self.nodes.get_mut(id.0)
    }

    /// Like [`get`](Self::get) but reports a foreign id as an error.
    pub fn node(&self, id: NodeId) -> Result<&ListNode> {
        self.get(id).ok_or(ListError::UnknownNode(id.0))
    }

    /// Make `next` the successor of `prev` and `prev` the predecessor of `next`.
    pub fn link(&mut self, prev: NodeId, next: NodeId) -> Result<()> {
        if prev == next {
            return Err(ListError::CyclicChain(prev.0));
        }
        if self.node(prev)?.next.is_some() {
            return Err(ListError::AlreadyLinked(prev.0));
        }
        if self.node(next)?.previous.is_some() {
            return Err(ListError::AlreadyLinked(next.0));
        }
        self.attach(prev, next);
        Ok(())
    }

    /// Set or clear the random reference of `node`.
    pub fn set_random(&mut self, node: NodeId, target: Option<NodeId>) -> Result<()> {
        if let Some(target) = target {
            self.node(target)?;
        }
        let slot = self.get_mut(node).ok_or(ListError::UnknownNode(node.0))?;
        slot.random = target;
        Ok(())
    }

    /// Forward iterator over the chain starting at `head`.
    ///
    /// The iterator yields `Err` once and stops if the walk reaches an id that
    /// is not in the arena or revisits a node.
    pub fn iter(&self, head: Option<NodeId>) -> ChainIter<'_> {
        ChainIter {
            arena: self,
            cursor: head,
            seen: HashSet::new(),
        }
    }

    /// Data payloads of the chain starting at `head`, in traversal order.
    pub fn values(&self, head: Option<NodeId>) -> Result<Vec<&str>> {
        self.iter(head)
            .map(|step| step.map(|(_, node)| node.data.as_str()))
            .collect()
    }

    /// Number of nodes reachable from `head` via `next`.
    pub fn chain_len(&self, head: Option<NodeId>) -> Result<usize> {
        self.iter(head).try_fold(0, |count, step| step.map(|_| count + 1))
    }

    /// Last node of the chain starting at `head`.
    pub fn tail(&self, head: NodeId) -> Result<NodeId> {
        let mut tail = head;
        for step in self.iter(Some(head)) {
            tail = step?.0;
        }
        Ok(tail)
    }

    pub(crate) fn attach(&mut self, prev: NodeId, next: NodeId) {
        self.nodes[prev.0].next = Some(next);
        self.nodes[next.0].previous = Some(prev);
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }
}

/// Iterator returned by [`NodeArena::iter`].
pub struct ChainIter<'a> {
    arena: &'a NodeArena,
    cursor: Option<NodeId>,
    seen: HashSet<NodeId>,
}

impl<'a> Iterator for ChainIter<'a> {
    type Item = Result<(NodeId, &'a ListNode)>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor.take()?;
        if !self.seen.insert(id) {
            return Some(Err(ListError::CyclicChain(id.0)));
        }
        match self.arena.get(id) {
            Some(node) => {
                self.cursor = node.next;
                Some(Ok((id, node)))
            }
            None => Some(Err(ListError::UnknownNode(id.0))),
        }
    }
}

/// An owned chain: the arena holding its nodes plus the head.
///
/// Produced by deserialization and by [`deep_copy`](crate::core::deep_copy::deep_copy).
/// An absent head is the empty chain.
#[derive(Debug, Clone, Default)]
pub struct NodeList {
    pub arena: NodeArena,
    pub head: Option<NodeId>,
}

impl NodeList {
    pub fn new(arena: NodeArena, head: Option<NodeId>) -> Self {
        Self { arena, head }
    }

    /// Build a list from payloads, without random references.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut arena = NodeArena::new();
        let head = arena.push_chain(values);
        Self { arena, head }
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Number of nodes on the chain.
    pub fn len(&self) -> usize {
        self.ids().len()
    }

    /// Node ids in traversal order.
    pub fn ids(&self) -> Vec<NodeId> {
        self.arena
            .iter(self.head)
            .map_while(|step| step.ok().map(|(id, _)| id))
            .collect()
    }

    /// Payloads in traversal order.
    pub fn values(&self) -> Vec<&str> {
        self.arena
            .iter(self.head)
            .map_while(|step| step.ok().map(|(_, node)| node.data.as_str()))
            .collect()
    }

    /// Payload of each node's random target, in traversal order.
    pub fn random_values(&self) -> Vec<Option<&str>> {
        self.arena
            .iter(self.head)
            .map_while(|step| step.ok())
            .map(|(_, node)| {
                node.random
                    .and_then(|id| self.arena.get(id))
                    .map(|target| target.data.as_str())
            })
            .collect()
    }

    /// Traversal index of each node's random target.
    pub fn random_indices(&self) -> Vec<Option<usize>> {
        let ids = self.ids();
        let positions: HashMap<NodeId, usize> =
            ids.iter().enumerate().map(|(index, id)| (*id, index)).collect();
        ids.iter()
            .filter_map(|id| self.arena.get(*id))
            .map(|node| node.random.and_then(|r| positions.get(&r).copied()))
            .collect()
    }

    pub fn get(&self, id: NodeId) -> Option<&ListNode> {
        self.arena.get(id)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn test_push_chain_links_both_directions() {
        let mut arena = NodeArena::new();
        let head = arena.push_chain(["a", "b", "c"]).expect("non-empty");
        let ids: Vec<NodeId> = arena.iter(Some(head)).map(|s| s.unwrap().0).collect();

        assert_eq!(ids.len(), 3);
        assert_eq!(arena.get(ids[0]).unwrap().previous, None);
        assert_eq!(arena.get(ids[1]).unwrap().previous, Some(ids[0]));
        assert_eq!(arena.get(ids[2]).unwrap().previous, Some(ids[1]));
        assert_eq!(arena.get(ids[2]).unwrap().next, None);
        assert_eq!(arena.tail(head).unwrap(), ids[2]);
    }

    #[test]
    fn test_push_chain_empty() {
        let mut arena = NodeArena::new();
        assert_eq!(arena.push_chain(Vec::<String>::new()), None);
        assert_eq!(arena.chain_len(None).unwrap(), 0);
    }

    #[test]
    fn test_link_rejects_relinking() {
        let mut arena = NodeArena::new();
        let a = arena.push("a");
        let b = arena.push("b");
        let c = arena.push("c");
        arena.link(a, b).unwrap();

        assert!(matches!(arena.link(a, c), Err(ListError::AlreadyLinked(_))));
        assert!(matches!(arena.link(c, b), Err(ListError::AlreadyLinked(_))));
        assert!(matches!(arena.link(c, c), Err(ListError::CyclicChain(_))));
    }

    #[test]
    fn test_iter_detects_cycle() {
        let mut arena = NodeArena::new();
        let a = arena.push("a");
        let b = arena.push("b");
        arena.link(a, b).unwrap();
        arena.link(b, a).unwrap();

        assert!(matches!(arena.chain_len(Some(a)), Err(ListError::CyclicChain(_))));
    }

    #[test]
    fn test_set_random_rejects_foreign_id() {
        let mut arena = NodeArena::new();
        let a = arena.push("a");
        let mut other = NodeArena::new();
        other.push("x");
        let foreign = other.push("y");

        assert!(matches!(
            arena.set_random(a, Some(foreign)),
            Err(ListError::UnknownNode(1))
        ));
        arena.set_random(a, Some(a)).unwrap();
        assert_eq!(arena.get(a).unwrap().random, Some(a));
    }

    #[test]
    fn test_random_indices() {
        let mut list = NodeList::from_values(["x", "y", "z"]);
        let ids = list.ids();
        list.arena.set_random(ids[2], Some(ids[0])).unwrap();
        list.arena.set_random(ids[1], Some(ids[1])).unwrap();

        assert_eq!(list.random_indices(), vec![None, Some(1), Some(0)]);
        assert_eq!(list.random_values(), vec![None, Some("y"), Some("x")]);
    }
}
