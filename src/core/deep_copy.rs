//! # Deep Copy
//!
//! Single-pass structural clone of a chain with random references.
//!
//! A source→copy table keyed by [`NodeId`] backs a lazy get-or-create step:
//! a node reached through `random` before the main walk gets there is copied
//! on the spot, and the walk later picks up that same copy. Every distinct
//! source node is copied exactly once and no recursion is involved.

use crate::core::node::{NodeArena, NodeId, NodeList};
use crate::error::{ListError, Result};
use std::collections::HashMap;
use tracing::{debug, instrument};

struct CopyTable<'s> {
    source: &'s NodeArena,
    copies: HashMap<NodeId, NodeId>,
}

impl<'s> CopyTable<'s> {
    fn new(source: &'s NodeArena) -> Self {
        Self {
            source,
            copies: HashMap::new(),
        }
    }

    fn get_or_create(&mut self, target: &mut NodeArena, original: NodeId) -> Result<NodeId> {
        if let Some(&copy) = self.copies.get(&original) {
            return Ok(copy);
        }
        let data = self.source.node(original)?.data.clone();
        let copy = target.push(data);
        self.copies.insert(original, copy);
        Ok(copy)
    }

    fn copy_random(&mut self, target: &mut NodeArena, original: NodeId, copy: NodeId) -> Result<()> {
        let Some(random) = self.source.node(original)?.random else {
            return Ok(());
        };
        let random_copy = self.get_or_create(target, random)?;
        if let Some(node) = target.get_mut(copy) {
            node.random = Some(random_copy);
        }
        Ok(())
    }
}

/// Copy the chain starting at `head` into `target` and return the copy's head.
///
/// On error `target` is left as it was before the call.
#[instrument(skip(source, target), level = "debug")]
pub fn deep_copy_into(
    source: &NodeArena,
    head: Option<NodeId>,
    target: &mut NodeArena,
) -> Result<Option<NodeId>> {
    let Some(head) = head else {
        return Ok(None);
    };
    let mark = target.len();
    let result = copy_chain(source, head, target);
    if result.is_err() {
        target.truncate(mark);
    }
    result.map(Some)
}

/// Copy the chain starting at `head` into a fresh arena.
pub fn deep_copy(source: &NodeArena, head: Option<NodeId>) -> Result<NodeList> {
    let mut arena = NodeArena::new();
    let head = deep_copy_into(source, head, &mut arena)?;
    Ok(NodeList::new(arena, head))
}

fn copy_chain(source: &NodeArena, head: NodeId, target: &mut NodeArena) -> Result<NodeId> {
    let mut table = CopyTable::new(source);

    let copy_head = table.get_or_create(target, head)?;
    table.copy_random(target, head, copy_head)?;

    let mut cursor = head;
    let mut copy_tail = copy_head;
    let mut nodes = 1usize;
    while let Some(next) = source.node(cursor)?.next {
        let copy = table.get_or_create(target, next)?;
        // a copy that is already on the new chain means `next` loops back
        if copy == copy_head || target.get(copy).is_some_and(|n| n.previous.is_some()) {
            return Err(ListError::CyclicChain(next.index()));
        }
        target.attach(copy_tail, copy);
        table.copy_random(target, next, copy)?;

        cursor = next;
        copy_tail = copy;
        nodes += 1;
    }

    debug!(nodes, copies = table.copies.len(), "Deep copied chain");
    Ok(copy_head)
}
