//! An ordered Binary Search Tree (BST) over any totally ordered key, kept deliberately simple:
//! no rebalancing and no deletion. Each query comes in an iterative and a recursive flavour so
//! the two can be compared (and checked against each other).
//!
//! ## Binary Search Tree
//!
//! A BST is made of `Node`s. Each `Node` stores a key and may have a left and a right child
//! `Node`. The invariant this crate maintains is:
//!
//! 1. For every `Node`, all the `Node`s in its left subtree have a key less than its own key.
//! 2. For every `Node`, all the `Node`s in its right subtree have a key greater than or equal to
//!    its own key. Duplicates always go right.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching takes `O(height)` where `height` is the longest path from the root `Node` to a
//! leaf `Node`. Without rebalancing the height depends entirely on insertion order: random keys
//! give `O(lg N)` on average while sorted keys give a tree that is really a linked list. The
//! recursive queries use stack space proportional to that height, the iterative ones don't.
//!
//! Nodes are stored in an arena and addressed through [`NodeId`] handles, so a subtree can be
//! named without holding a borrow of the tree. See [`arena`] for examples.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod arena;
pub mod error;
pub mod sideways;
mod util;

pub use arena::{NodeId, Tree};
pub use error::{Error, Result};

#[cfg(test)]
mod test {
    pub(crate) mod quick;
}
