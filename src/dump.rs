use alloc::vec::Vec;

use core::fmt::{self, Display, Formatter};

use crate::arena::{Color, NIL};
use crate::tree::RbTree;

/// Diagnostic rendering of a tree's shape, obtained from
/// [`RbTree::structure`].
///
/// Prints one node per line in pre-order, indented by depth, with the
/// node's key, its color and the key of its parent. Intended for
/// debugging output only; the format is not stable.
pub struct Structure<'a, K> {
    tree: &'a RbTree<K>,
}

impl<K: Ord + Display> Display for Structure<'_, K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let tree = self.tree;
        let mut stack = Vec::new();
        if tree.root_index() != NIL {
            stack.push((tree.root_index(), 0usize));
        }

        while let Some((idx, depth)) = stack.pop() {
            for _ in 0..depth {
                f.write_str("  ")?;
            }
            let color = match tree.color_of(idx) {
                Color::Red => "RED",
                Color::Black => "BLACK",
            };
            let parent = tree.parent_of(idx);
            if parent == NIL {
                writeln!(f, "{} {} (root)", tree.key_at(idx), color)?;
            } else {
                writeln!(f, "{} {} (parent {})", tree.key_at(idx), color, tree.key_at(parent))?;
            }

            // Right child pushed first so the left subtree prints
            // before it.
            let right = tree.right_of(idx);
            if right != NIL {
                stack.push((right, depth + 1));
            }
            let left = tree.left_of(idx);
            if left != NIL {
                stack.push((left, depth + 1));
            }
        }
        Ok(())
    }
}

impl<K: Ord> RbTree<K> {
    /// Returns a [`Display`] adapter that renders the tree structure
    /// for diagnostics.
    pub fn structure(&self) -> Structure<'_, K> {
        Structure { tree: self }
    }
}
