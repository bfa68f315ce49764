use alloc::vec::Vec;

use core::mem;

/// Reserved index standing in for an absent child or parent link.
///
/// No node is ever stored at this index; color lookups on it yield
/// [`Color::Black`], so rebalancing code can treat an absent link like
/// a real black node.
pub(crate) const NIL: usize = usize::MAX;

/// Node colors used to maintain the red-black balance properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Color {
    /// Red node - both of its children must be black
    Red,
    /// Black node - contributes to the black height of its paths
    Black,
}

/// Stable handle to a node in a [`RbTree`](crate::RbTree).
///
/// Handles are returned by `insert` and `find` and stay valid until the
/// node they name is removed or the tree is cleared. A handle must only
/// be used with the tree that produced it; after removal the slot may
/// be reused by a later insertion, which a handle cannot detect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// A tree node: the key plus its structural links.
///
/// `parent` is a non-owning back-reference kept consistent with the
/// child slots by every rotation and transplant.
#[derive(Debug, Clone)]
pub(crate) struct Node<K> {
    pub key: K,
    pub color: Color,
    pub parent: usize,
    pub left: usize,
    pub right: usize,
}

#[derive(Debug, Clone)]
enum Slot<K> {
    Occupied(Node<K>),
    Vacant { next_free: usize },
}

/// Slab-style node storage with an internal free list.
///
/// Freed slots are chained through `free_head` and reused before the
/// backing vector grows, so a long insert/erase workload settles into a
/// fixed footprint.
#[derive(Debug, Clone)]
pub(crate) struct Arena<K> {
    slots: Vec<Slot<K>>,
    free_head: usize,
    len: usize,
}

impl<K> Arena<K> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: NIL,
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: NIL,
            len: 0,
        }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Stores a node and returns its index, reusing a free slot when
    /// one is available.
    pub fn alloc(&mut self, node: Node<K>) -> usize {
        self.len += 1;
        if self.free_head == NIL {
            self.slots.push(Slot::Occupied(node));
            self.slots.len() - 1
        } else {
            let idx = self.free_head;
            if let Slot::Vacant { next_free } = self.slots[idx] {
                self.free_head = next_free;
            }
            self.slots[idx] = Slot::Occupied(node);
            idx
        }
    }

    /// Releases a slot back to the free list, returning the node it
    /// held, or `None` if the slot was already vacant.
    pub fn free(&mut self, idx: usize) -> Option<Node<K>> {
        let slot = self.slots.get_mut(idx)?;
        match mem::replace(
            slot,
            Slot::Vacant {
                next_free: self.free_head,
            },
        ) {
            Slot::Occupied(node) => {
                self.free_head = idx;
                self.len -= 1;
                Some(node)
            }
            vacant => {
                // Already vacant: restore the original chain entry.
                self.slots[idx] = vacant;
                None
            }
        }
    }

    /// Checked access; `None` for `NIL`, out-of-range or vacant slots.
    pub fn get(&self, idx: usize) -> Option<&Node<K>> {
        match self.slots.get(idx) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    /// Access to a slot that must be occupied.
    ///
    /// Internal tree code only derives indices from live links, so a
    /// vacant slot here means the structure is corrupt.
    #[inline]
    pub fn node(&self, idx: usize) -> &Node<K> {
        match &self.slots[idx] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("dangling node index {idx}"),
        }
    }

    #[inline]
    pub fn node_mut(&mut self, idx: usize) -> &mut Node<K> {
        match &mut self.slots[idx] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("dangling node index {idx}"),
        }
    }

    /// Drops every node and resets the free list.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = NIL;
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(key: i32) -> Node<i32> {
        Node {
            key,
            color: Color::Red,
            parent: NIL,
            left: NIL,
            right: NIL,
        }
    }

    #[test]
    fn test_alloc_assigns_sequential_indices() {
        let mut arena = Arena::new();
        assert_eq!(arena.alloc(leaf(1)), 0);
        assert_eq!(arena.alloc(leaf(2)), 1);
        assert_eq!(arena.alloc(leaf(3)), 2);
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_free_slots_are_reused() {
        let mut arena = Arena::new();
        let a = arena.alloc(leaf(1));
        let b = arena.alloc(leaf(2));

        assert_eq!(arena.free(a).map(|n| n.key), Some(1));
        assert_eq!(arena.free(b).map(|n| n.key), Some(2));
        assert_eq!(arena.len(), 0);

        // LIFO reuse: the most recently freed slot comes back first.
        assert_eq!(arena.alloc(leaf(3)), b);
        assert_eq!(arena.alloc(leaf(4)), a);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_double_free_is_rejected() {
        let mut arena = Arena::new();
        let a = arena.alloc(leaf(1));
        assert!(arena.free(a).is_some());
        assert!(arena.free(a).is_none());
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn test_get_on_stale_index() {
        let mut arena = Arena::new();
        let a = arena.alloc(leaf(7));
        assert_eq!(arena.get(a).map(|n| n.key), Some(7));

        assert!(arena.free(a).is_some());
        assert!(arena.get(a).is_none());
        assert!(arena.get(NIL).is_none());
        assert!(arena.get(99).is_none());
    }

    #[test]
    fn test_clear_resets_free_list() {
        let mut arena = Arena::new();
        let a = arena.alloc(leaf(1));
        arena.alloc(leaf(2));
        assert!(arena.free(a).is_some());

        arena.clear();
        assert_eq!(arena.len(), 0);
        assert_eq!(arena.alloc(leaf(3)), 0);
    }
}
