//! A diagnostic rendering of a [`Tree`] rotated a quarter turn counter-clockwise, so the root is
//! at the left edge and larger keys are higher up.
//!
//! ```
//! use ordered_tree::arena::Tree;
//!
//! let mut tree = Tree::new();
//! tree.insert(10).insert(5).insert(15);
//!
//! assert_eq!(tree.sideways().to_string(), "\t\t15\n\t10\n\t\t5\n");
//! ```

use std::fmt;

use crate::arena::Tree;

/// Borrowed view returned by [`Tree::sideways`].
pub struct Sideways<'a, K> {
    tree: &'a Tree<K>,
}

impl<'a, K> Sideways<'a, K> {
    pub(crate) fn new(tree: &'a Tree<K>) -> Self {
        Self { tree }
    }

    /// Pushes `current` and its chain of right children, each paired with its depth.
    fn descend_right(
        &self,
        stack: &mut Vec<(usize, usize)>,
        mut current: Option<usize>,
        mut depth: usize,
    ) {
        while let Some(index) = current {
            stack.push((index, depth));
            current = self.tree.node(index).right;
            depth += 1;
        }
    }
}

impl<'a, K> fmt::Display for Sideways<'a, K>
where
    K: fmt::Display,
{
    // Right subtree, then the node, then the left subtree. Walked with a stack rather than
    // recursion since a degenerate tree is as deep as it is long.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = Vec::new();
        self.descend_right(&mut stack, self.tree.root_index(), 1);

        while let Some((index, depth)) = stack.pop() {
            let node = self.tree.node(index);
            for _ in 0..depth {
                f.write_str("\t")?;
            }
            writeln!(f, "{}", node.key)?;
            self.descend_right(&mut stack, node.left, depth + 1);
        }

        Ok(())
    }
}
