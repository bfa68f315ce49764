use alloc::vec::Vec;

use core::iter::FusedIterator;

use crate::arena::NIL;
use crate::tree::RbTree;

/// Lazy in-order iterator over the keys of a [`RbTree`].
///
/// Yields borrowed keys in non-decreasing order. The traversal keeps
/// its own stack of pending nodes instead of recursing, so tree depth
/// never translates into call-stack depth. Obtained from
/// [`RbTree::iter`]; a fresh iterator restarts from the smallest key.
pub struct InOrder<'a, K> {
    tree: &'a RbTree<K>,
    /// Nodes whose key is still pending, deepest unvisited left spine
    /// on top.
    stack: Vec<usize>,
    remaining: usize,
}

impl<'a, K: Ord> InOrder<'a, K> {
    pub(crate) fn new(tree: &'a RbTree<K>) -> Self {
        let mut iter = InOrder {
            tree,
            stack: Vec::new(),
            remaining: tree.len(),
        };
        iter.push_left_spine(tree.root_index());
        iter
    }

    fn push_left_spine(&mut self, mut idx: usize) {
        while idx != NIL {
            self.stack.push(idx);
            idx = self.tree.left_of(idx);
        }
    }
}

impl<'a, K: Ord> Iterator for InOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let idx = self.stack.pop()?;
        self.push_left_spine(self.tree.right_of(idx));
        self.remaining -= 1;
        Some(self.tree.key_at(idx))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: Ord> ExactSizeIterator for InOrder<'_, K> {}
impl<K: Ord> FusedIterator for InOrder<'_, K> {}

impl<'a, K: Ord> IntoIterator for &'a RbTree<K> {
    type Item = &'a K;
    type IntoIter = InOrder<'a, K>;

    fn into_iter(self) -> InOrder<'a, K> {
        self.iter()
    }
}
