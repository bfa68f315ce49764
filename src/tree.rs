use core::cmp::Ordering;

use crate::arena::{Arena, Color, NIL, Node, NodeId};
use crate::iter::InOrder;

/// A red-black tree storing a multiset of ordered keys.
///
/// The tree guarantees O(log n) insertion, erasure and lookup by
/// maintaining the classic red-black balance properties after every
/// mutation:
/// - the root is black,
/// - no red node has a red child,
/// - every path from a node to an absent link passes the same number
///   of black nodes.
///
/// Nodes live in a slab arena and are addressed by [`NodeId`] handles,
/// so a caller can hold on to the exact node an insertion created and
/// later erase it even when equal keys are present. Absent links are a
/// reserved index that always reads as black, which removes the
/// null-special-casing from the rebalancing branches.
///
/// Duplicate keys are accepted: a key equal to an existing one descends
/// into the left subtree.
#[derive(Debug, Clone)]
pub struct RbTree<K> {
    arena: Arena<K>,
    root: usize,
}

impl<K: Ord> RbTree<K> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: NIL,
        }
    }

    /// Creates an empty tree with room for `capacity` nodes before the
    /// arena reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            root: NIL,
        }
    }

    /// Returns the number of keys currently stored, duplicates
    /// included.
    #[inline]
    pub const fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the tree holds no keys.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts a key and returns the handle of the node created for it.
    ///
    /// Duplicates are never rejected; an equal key goes into the left
    /// subtree of the existing one.
    pub fn insert(&mut self, key: K) -> NodeId {
        let mut parent = NIL;
        let mut cur = self.root;
        while cur != NIL {
            parent = cur;
            let node = self.arena.node(cur);
            cur = if key > node.key { node.right } else { node.left };
        }

        let idx = self.arena.alloc(Node {
            key,
            color: Color::Red,
            parent,
            left: NIL,
            right: NIL,
        });

        if parent == NIL {
            self.root = idx;
        } else if self.arena.node(idx).key > self.arena.node(parent).key {
            self.arena.node_mut(parent).right = idx;
        } else {
            self.arena.node_mut(parent).left = idx;
        }

        self.insert_fixup(idx);

        debug_assert!(self.check_invariants());
        NodeId(idx)
    }

    /// Looks up a key and returns the handle of a node holding it, or
    /// `None` if the key is absent.
    ///
    /// When duplicates exist, the match closest to the root is
    /// returned.
    pub fn find(&self, key: &K) -> Option<NodeId> {
        let mut cur = self.root;
        while cur != NIL {
            let node = self.arena.node(cur);
            match key.cmp(&node.key) {
                Ordering::Equal => return Some(NodeId(cur)),
                Ordering::Less => cur = node.left,
                Ordering::Greater => cur = node.right,
            }
        }
        None
    }

    /// Returns `true` if at least one node holds the key.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Returns the key stored behind a handle, or `None` if the handle
    /// no longer names a live node.
    pub fn key(&self, id: NodeId) -> Option<&K> {
        self.arena.get(id.0).map(|node| &node.key)
    }

    /// Handle of the node with the smallest key; `None` on an empty
    /// tree.
    pub fn min(&self) -> Option<NodeId> {
        if self.root == NIL {
            None
        } else {
            Some(NodeId(self.min_in(self.root)))
        }
    }

    /// Handle of the node with the largest key; `None` on an empty
    /// tree.
    pub fn max(&self) -> Option<NodeId> {
        if self.root == NIL {
            None
        } else {
            Some(NodeId(self.max_in(self.root)))
        }
    }

    /// Erases the node a handle names and returns its key.
    ///
    /// Returns `None` if the handle's slot is vacant. A handle whose
    /// slot has since been reused by a later insertion cannot be told
    /// apart from a live one; handles must only be used with the tree
    /// that issued them.
    pub fn remove(&mut self, id: NodeId) -> Option<K> {
        self.arena.get(id.0)?;

        let (spliced_color, fix, fix_parent) = self.detach(id.0);
        if spliced_color == Color::Black {
            self.remove_fixup(fix, fix_parent);
        }
        let node = self.arena.free(id.0);

        debug_assert!(self.check_invariants());
        node.map(|node| node.key)
    }

    /// Erases one node holding `key` and returns the key, or `None` if
    /// it is absent.
    ///
    /// With duplicates, the node erased is the match closest to the
    /// root, as found by [`find`](Self::find).
    pub fn remove_key(&mut self, key: &K) -> Option<K> {
        let id = self.find(key)?;
        self.remove(id)
    }

    /// Copies up to `out.len()` keys into the caller's buffer in
    /// ascending order and returns how many were written.
    pub fn copy_keys(&self, out: &mut [K]) -> usize
    where
        K: Clone,
    {
        let mut copied = 0;
        for (slot, key) in out.iter_mut().zip(self.iter()) {
            *slot = key.clone();
            copied += 1;
        }
        copied
    }

    /// Lazy in-order iterator over the keys, smallest first.
    ///
    /// The traversal keeps an explicit stack, so arbitrarily deep trees
    /// cannot overflow the call stack, and a fresh iterator restarts
    /// from the smallest key.
    pub fn iter(&self) -> InOrder<'_, K> {
        InOrder::new(self)
    }

    /// Drops every node and resets the arena for reuse. Outstanding
    /// handles become stale.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = NIL;
    }

    // Structural accessors shared with the iterator and dump modules.
    // All of them treat NIL uniformly: the links of an absent node are
    // absent and its color is black.

    #[inline]
    pub(crate) const fn root_index(&self) -> usize {
        self.root
    }

    #[inline]
    pub(crate) fn left_of(&self, idx: usize) -> usize {
        if idx == NIL { NIL } else { self.arena.node(idx).left }
    }

    #[inline]
    pub(crate) fn right_of(&self, idx: usize) -> usize {
        if idx == NIL { NIL } else { self.arena.node(idx).right }
    }

    #[inline]
    pub(crate) fn parent_of(&self, idx: usize) -> usize {
        if idx == NIL { NIL } else { self.arena.node(idx).parent }
    }

    #[inline]
    pub(crate) fn color_of(&self, idx: usize) -> Color {
        if idx == NIL {
            Color::Black
        } else {
            self.arena.node(idx).color
        }
    }

    #[inline]
    pub(crate) fn key_at(&self, idx: usize) -> &K {
        &self.arena.node(idx).key
    }

    #[inline]
    fn is_red(&self, idx: usize) -> bool {
        self.color_of(idx) == Color::Red
    }

    #[inline]
    fn is_black(&self, idx: usize) -> bool {
        self.color_of(idx) == Color::Black
    }

    #[inline]
    fn set_color(&mut self, idx: usize, color: Color) {
        if idx != NIL {
            self.arena.node_mut(idx).color = color;
        }
    }

    fn min_in(&self, mut idx: usize) -> usize {
        loop {
            let left = self.arena.node(idx).left;
            if left == NIL {
                return idx;
            }
            idx = left;
        }
    }

    fn max_in(&self, mut idx: usize) -> usize {
        loop {
            let right = self.arena.node(idx).right;
            if right == NIL {
                return idx;
            }
            idx = right;
        }
    }

    /// Rotates `x` down to the left, lifting its right child into its
    /// place. Touches only links, never colors.
    fn rotate_left(&mut self, x: usize) {
        let y = self.arena.node(x).right;
        debug_assert!(y != NIL, "left rotation requires a right child");

        let y_left = self.arena.node(y).left;
        self.arena.node_mut(x).right = y_left;
        if y_left != NIL {
            self.arena.node_mut(y_left).parent = x;
        }

        let parent = self.arena.node(x).parent;
        self.arena.node_mut(y).parent = parent;
        if parent == NIL {
            self.root = y;
        } else if x == self.arena.node(parent).left {
            self.arena.node_mut(parent).left = y;
        } else {
            self.arena.node_mut(parent).right = y;
        }

        self.arena.node_mut(y).left = x;
        self.arena.node_mut(x).parent = y;
    }

    /// Mirror image of [`rotate_left`](Self::rotate_left).
    fn rotate_right(&mut self, x: usize) {
        let y = self.arena.node(x).left;
        debug_assert!(y != NIL, "right rotation requires a left child");

        let y_right = self.arena.node(y).right;
        self.arena.node_mut(x).left = y_right;
        if y_right != NIL {
            self.arena.node_mut(y_right).parent = x;
        }

        let parent = self.arena.node(x).parent;
        self.arena.node_mut(y).parent = parent;
        if parent == NIL {
            self.root = y;
        } else if x == self.arena.node(parent).left {
            self.arena.node_mut(parent).left = y;
        } else {
            self.arena.node_mut(parent).right = y;
        }

        self.arena.node_mut(y).right = x;
        self.arena.node_mut(x).parent = y;
    }

    /// Restores the red-black properties after inserting a red node.
    ///
    /// While the cursor's parent is red a grandparent must exist (the
    /// root is black), giving the three classic cases per side: red
    /// uncle recolors and moves the cursor up, a black uncle with an
    /// inner cursor rotates into the outer shape, and the outer shape
    /// recolors and rotates the grandparent.
    fn insert_fixup(&mut self, mut node: usize) {
        while node != self.root && self.is_red(self.parent_of(node)) {
            let parent = self.parent_of(node);
            let grandparent = self.parent_of(parent);

            if parent == self.left_of(grandparent) {
                let uncle = self.right_of(grandparent);
                if self.is_red(uncle) {
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    node = grandparent;
                } else {
                    if node == self.right_of(parent) {
                        node = parent;
                        self.rotate_left(node);
                    }
                    let parent = self.parent_of(node);
                    let grandparent = self.parent_of(parent);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate_right(grandparent);
                }
            } else {
                let uncle = self.left_of(grandparent);
                if self.is_red(uncle) {
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    node = grandparent;
                } else {
                    if node == self.left_of(parent) {
                        node = parent;
                        self.rotate_right(node);
                    }
                    let parent = self.parent_of(node);
                    let grandparent = self.parent_of(parent);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate_left(grandparent);
                }
            }
        }
        let root = self.root;
        self.set_color(root, Color::Black);
    }

    /// Replaces the subtree rooted at `old` with the one rooted at
    /// `new` in old's parent slot. `new`'s children are untouched.
    fn transplant(&mut self, old: usize, new: usize) {
        let parent = self.arena.node(old).parent;
        if parent == NIL {
            self.root = new;
        } else if old == self.arena.node(parent).left {
            self.arena.node_mut(parent).left = new;
        } else {
            self.arena.node_mut(parent).right = new;
        }
        if new != NIL {
            self.arena.node_mut(new).parent = parent;
        }
    }

    /// Unlinks `node` from the tree without freeing its slot.
    ///
    /// Returns the color of the node actually spliced out of its
    /// position, the node now standing in that position (possibly
    /// `NIL`) and that node's parent. The parent is threaded explicitly
    /// because an absent link has no parent field of its own.
    fn detach(&mut self, node: usize) -> (Color, usize, usize) {
        let original_color = self.arena.node(node).color;
        let left = self.arena.node(node).left;
        let right = self.arena.node(node).right;

        if left == NIL {
            let parent = self.arena.node(node).parent;
            self.transplant(node, right);
            (original_color, right, parent)
        } else if right == NIL {
            let parent = self.arena.node(node).parent;
            self.transplant(node, left);
            (original_color, left, parent)
        } else {
            // Both children: the in-order successor takes node's place
            // and adopts its color; the deficiency appears where the
            // successor used to be.
            let successor = self.min_in(right);
            let successor_color = self.arena.node(successor).color;
            let fix = self.arena.node(successor).right;
            let fix_parent;

            if self.arena.node(successor).parent == node {
                fix_parent = successor;
            } else {
                fix_parent = self.arena.node(successor).parent;
                self.transplant(successor, fix);
                self.arena.node_mut(successor).right = right;
                self.arena.node_mut(right).parent = successor;
            }

            self.transplant(node, successor);
            self.arena.node_mut(successor).left = left;
            self.arena.node_mut(left).parent = successor;
            self.arena.node_mut(successor).color = original_color;

            (successor_color, fix, fix_parent)
        }
    }

    /// Repairs the black-height deficit left by splicing out a black
    /// node.
    ///
    /// `node` is the position carrying the deficit and `parent` its
    /// parent, tracked separately so the loop also works when `node`
    /// is absent. Cases per side: a red sibling is rotated into a
    /// black one, a sibling with two black children pushes the deficit
    /// up, a near-red sibling child is rotated into the far position,
    /// and a far-red sibling child resolves the deficit with one final
    /// rotation.
    fn remove_fixup(&mut self, mut node: usize, mut parent: usize) {
        while node != self.root && self.is_black(node) {
            if node != NIL {
                parent = self.arena.node(node).parent;
            }
            if parent == NIL {
                break;
            }

            if node == self.left_of(parent) {
                let mut sibling = self.right_of(parent);

                if self.is_red(sibling) {
                    self.set_color(sibling, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.rotate_left(parent);
                    sibling = self.right_of(parent);
                }

                if self.is_black(self.left_of(sibling)) && self.is_black(self.right_of(sibling)) {
                    self.set_color(sibling, Color::Red);
                    node = parent;
                } else {
                    if self.is_black(self.right_of(sibling)) {
                        let near = self.left_of(sibling);
                        self.set_color(near, Color::Black);
                        self.set_color(sibling, Color::Red);
                        self.rotate_right(sibling);
                        sibling = self.right_of(parent);
                    }
                    let parent_color = self.color_of(parent);
                    self.set_color(sibling, parent_color);
                    self.set_color(parent, Color::Black);
                    let far = self.right_of(sibling);
                    self.set_color(far, Color::Black);
                    self.rotate_left(parent);
                    node = self.root;
                }
            } else {
                let mut sibling = self.left_of(parent);

                if self.is_red(sibling) {
                    self.set_color(sibling, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.rotate_right(parent);
                    sibling = self.left_of(parent);
                }

                if self.is_black(self.right_of(sibling)) && self.is_black(self.left_of(sibling)) {
                    self.set_color(sibling, Color::Red);
                    node = parent;
                } else {
                    if self.is_black(self.left_of(sibling)) {
                        let near = self.right_of(sibling);
                        self.set_color(near, Color::Black);
                        self.set_color(sibling, Color::Red);
                        self.rotate_left(sibling);
                        sibling = self.left_of(parent);
                    }
                    let parent_color = self.color_of(parent);
                    self.set_color(sibling, parent_color);
                    self.set_color(parent, Color::Black);
                    let far = self.left_of(sibling);
                    self.set_color(far, Color::Black);
                    self.rotate_right(parent);
                    node = self.root;
                }
            }
        }
        self.set_color(node, Color::Black);
    }

    /// Full structural audit: root color, red-red edges, black-height
    /// uniformity, parent/child agreement and in-order key order.
    /// Used by `debug_assert!` after every mutation and by tests.
    fn check_invariants(&self) -> bool {
        if self.root == NIL {
            return self.arena.len() == 0;
        }
        if self.arena.node(self.root).parent != NIL || !self.is_black(self.root) {
            return false;
        }
        if self.black_height(self.root).is_none() {
            return false;
        }

        let mut visited = 0;
        let mut prev: Option<&K> = None;
        for key in self.iter() {
            if prev.is_some_and(|prev| prev > key) {
                return false;
            }
            prev = Some(key);
            visited += 1;
        }
        visited == self.len()
    }

    /// Black height of the subtree at `idx`, or `None` if any red-red
    /// edge, dangling parent link or black-height mismatch exists
    /// below it.
    fn black_height(&self, idx: usize) -> Option<usize> {
        if idx == NIL {
            return Some(1);
        }
        let node = self.arena.node(idx);

        if self.is_red(idx) && (self.is_red(node.left) || self.is_red(node.right)) {
            return None;
        }
        if node.left != NIL && self.arena.node(node.left).parent != idx {
            return None;
        }
        if node.right != NIL && self.arena.node(node.right).parent != idx {
            return None;
        }

        let left_height = self.black_height(node.left)?;
        let right_height = self.black_height(node.right)?;
        if left_height != right_height {
            return None;
        }
        Some(if self.is_black(idx) {
            left_height + 1
        } else {
            left_height
        })
    }
}

impl<K: Ord> Default for RbTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloc::vec::Vec;

    use ahash::RandomState;
    use hashbrown::HashMap;
    use ordered_float::OrderedFloat;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    fn keys<K: Ord + Clone>(tree: &RbTree<K>) -> Vec<K> {
        tree.iter().cloned().collect()
    }

    fn height<K: Ord>(tree: &RbTree<K>, idx: usize) -> usize {
        if idx == NIL {
            0
        } else {
            let left = height(tree, tree.left_of(idx));
            let right = height(tree, tree.right_of(idx));
            1 + core::cmp::max(left, right)
        }
    }

    #[test]
    fn test_empty_tree() {
        let tree = RbTree::<i32>::new();
        assert_eq!(tree.len(), 0);
        assert!(tree.is_empty());
        assert!(tree.min().is_none());
        assert!(tree.max().is_none());
        assert!(tree.find(&1).is_none());
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_single_insert_remove() {
        let mut tree = RbTree::new();
        let id = tree.insert(42);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.key(id), Some(&42));
        assert_eq!(tree.min(), Some(id));
        assert_eq!(tree.max(), Some(id));
        assert_eq!(tree.color_of(tree.root_index()), Color::Black);

        assert_eq!(tree.remove(id), Some(42));
        assert!(tree.is_empty());
        assert_eq!(tree.root_index(), NIL);
    }

    #[test]
    fn test_duplicate_scenario_in_order() {
        // Duplicates must all be kept and come out sorted.
        let mut tree = RbTree::new();
        for key in [10, 5, 5, 34, 6, 23, 12, 12, 6, 12] {
            tree.insert(key);
        }

        assert_eq!(tree.len(), 10);
        assert_eq!(keys(&tree), [5, 5, 6, 6, 10, 12, 12, 12, 23, 34]);
        assert_eq!(tree.color_of(tree.root_index()), Color::Black);
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_ascending_insertion_stays_balanced() {
        // Worst case for a naive BST; height must stay within
        // 2 * log2(n + 1).
        let mut tree = RbTree::new();
        for key in 1..=7 {
            tree.insert(key);
        }
        assert!(height(&tree, tree.root_index()) <= 6);

        let mut tree = RbTree::new();
        for key in 1..=1000 {
            tree.insert(key);
        }
        assert!(height(&tree, tree.root_index()) <= 19);
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_descending_insertion_stays_balanced() {
        let mut tree = RbTree::new();
        for key in (1..=256).rev() {
            tree.insert(key);
        }
        assert!(height(&tree, tree.root_index()) <= 17);
        assert_eq!(tree.min().and_then(|id| tree.key(id)), Some(&1));
        assert_eq!(tree.max().and_then(|id| tree.key(id)), Some(&256));
    }

    #[test]
    fn test_find_round_trip() {
        let mut tree = RbTree::new();
        let values = [50, 25, 75, 12, 37, 62, 87, 6, 18];
        for &key in &values {
            tree.insert(key);
        }

        for &key in &values {
            assert_eq!(tree.find(&key).and_then(|id| tree.key(id)), Some(&key));
        }
        assert!(tree.find(&99).is_none());
        assert!(!tree.contains(&99));
        assert!(tree.contains(&37));

        assert_eq!(tree.remove_key(&37), Some(37));
        assert!(tree.find(&37).is_none());
    }

    #[test]
    fn test_remove_stale_handle() {
        let mut tree = RbTree::new();
        let id = tree.insert(7);
        tree.insert(3);

        assert_eq!(tree.remove(id), Some(7));
        assert_eq!(tree.remove(id), None);
        assert_eq!(tree.key(id), None);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_duplicates_are_individual_nodes() {
        let mut tree = RbTree::new();
        let a = tree.insert(5);
        let b = tree.insert(5);
        let c = tree.insert(5);
        assert_eq!(tree.len(), 3);
        assert_ne!(a, b);
        assert_ne!(b, c);

        // Erasing by handle removes exactly that node; equal keys stay
        // findable until the last one goes.
        assert_eq!(tree.remove(b), Some(5));
        assert!(tree.contains(&5));
        assert_eq!(tree.remove(a), Some(5));
        assert!(tree.contains(&5));
        assert_eq!(tree.remove(c), Some(5));
        assert!(!tree.contains(&5));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_remove_key_with_duplicates() {
        let mut tree = RbTree::new();
        for key in [8, 4, 4, 4, 12] {
            tree.insert(key);
        }

        assert_eq!(tree.remove_key(&4), Some(4));
        assert_eq!(tree.remove_key(&4), Some(4));
        assert_eq!(tree.remove_key(&4), Some(4));
        assert_eq!(tree.remove_key(&4), None);
        assert_eq!(keys(&tree), [8, 12]);
    }

    #[test]
    fn test_min_max_match_traversal_ends() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut tree = RbTree::new();
        for _ in 0..128 {
            tree.insert(rng.gen_range(-1000, 1000));
        }

        let sorted = keys(&tree);
        assert_eq!(tree.min().and_then(|id| tree.key(id)), sorted.first());
        assert_eq!(tree.max().and_then(|id| tree.key(id)), sorted.last());
    }

    #[test]
    fn test_copy_keys_respects_buffer_capacity() {
        let mut tree = RbTree::new();
        for key in [3, 1, 4, 1, 5] {
            tree.insert(key);
        }

        let mut exact = [0; 5];
        assert_eq!(tree.copy_keys(&mut exact), 5);
        assert_eq!(exact, [1, 1, 3, 4, 5]);

        let mut short = [0; 3];
        assert_eq!(tree.copy_keys(&mut short), 3);
        assert_eq!(short, [1, 1, 3]);

        let mut long = [0; 8];
        assert_eq!(tree.copy_keys(&mut long), 5);
        assert_eq!(&long[..5], [1, 1, 3, 4, 5]);
    }

    #[test]
    fn test_random_insert_erase_drain() {
        let mut rng = Pcg32::seed_from_u64(0xC0FFEE);
        let mut tree = RbTree::new();
        let mut live: Vec<(NodeId, i32)> = Vec::new();
        let mut counts: HashMap<i32, usize, RandomState> = HashMap::default();

        for _ in 0..400 {
            let key = rng.gen_range(0, 64);
            let id = tree.insert(key);
            live.push((id, key));
            *counts.entry(key).or_insert(0) += 1;
        }
        assert_eq!(tree.len(), 400);
        assert!(tree.check_invariants());

        let mut sorted: Vec<i32> = live.iter().map(|&(_, key)| key).collect();
        sorted.sort_unstable();
        assert_eq!(keys(&tree), sorted);

        for &key in counts.keys() {
            assert!(tree.contains(&key));
        }

        // Erase everything in an unrelated order; every handle must be
        // released exactly once and the tree must end empty.
        live.shuffle(&mut rng);
        for (step, &(id, key)) in live.iter().enumerate() {
            assert_eq!(tree.remove(id), Some(key));
            if step % 37 == 0 {
                assert!(tree.check_invariants());
            }
        }
        assert!(tree.is_empty());
        assert_eq!(tree.root_index(), NIL);
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_interleaved_insert_remove() {
        let mut rng = Pcg32::seed_from_u64(99);
        let mut tree = RbTree::new();
        let mut live: Vec<(NodeId, i32)> = Vec::new();

        for step in 0..1000 {
            if live.is_empty() || rng.gen_range(0, 3) > 0 {
                let key = rng.gen_range(0, 128);
                live.push((tree.insert(key), key));
            } else {
                let pick = rng.gen_range(0, live.len());
                let (id, key) = live.swap_remove(pick);
                assert_eq!(tree.remove(id), Some(key));
            }
            if step % 97 == 0 {
                assert!(tree.check_invariants());
            }
        }

        let mut sorted: Vec<i32> = live.iter().map(|&(_, key)| key).collect();
        sorted.sort_unstable();
        assert_eq!(keys(&tree), sorted);
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_clear_and_reuse() {
        let mut tree = RbTree::new();
        let id = tree.insert(1);
        tree.insert(2);

        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.key(id), None);

        tree.insert(10);
        tree.insert(5);
        assert_eq!(keys(&tree), [5, 10]);
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_float_keys_via_ordered_float() {
        let mut tree = RbTree::new();
        for value in [2.5f64, -0.5, 11.0, 2.5, 0.0] {
            tree.insert(OrderedFloat(value));
        }

        assert_eq!(
            keys(&tree),
            [
                OrderedFloat(-0.5),
                OrderedFloat(0.0),
                OrderedFloat(2.5),
                OrderedFloat(2.5),
                OrderedFloat(11.0)
            ]
        );
        assert_eq!(tree.min().and_then(|id| tree.key(id)), Some(&OrderedFloat(-0.5)));
    }
}
