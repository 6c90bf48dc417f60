//! Property tests against the public API of `ordered_tree`.

mod arena;

use ordered_tree::{NodeId, Tree};

/// Builds a tree by inserting `xs` in order. Keys are widened so `range` can't overflow.
fn build(xs: &[i8]) -> Tree<i32> {
    xs.iter().map(|&x| i32::from(x)).collect()
}

/// Every node reachable from `start`, found through the public handle accessors.
fn subtree_nodes(tree: &Tree<i32>, start: Option<NodeId>) -> Vec<NodeId> {
    let mut nodes = Vec::new();
    let mut stack: Vec<NodeId> = start.into_iter().collect();
    while let Some(node) = stack.pop() {
        nodes.push(node);
        stack.extend(tree.left(node).unwrap());
        stack.extend(tree.right(node).unwrap());
    }

    nodes
}
