//! An unbalanced BST whose nodes live in a single `Vec` and refer to their children by index.
//! Nothing is ever removed from the arena so an index, once handed out, stays valid for the life
//! of the tree.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::arena::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(tree.is_empty());
//! assert_eq!(tree.min(), None);
//! assert_eq!(tree.range(), Ok(None));
//!
//! tree.insert(10).insert(5).insert(15);
//!
//! assert!(tree.contains(&15));
//! assert_eq!(tree.min(), Some(&5));
//! assert_eq!(tree.max_recursive(), Some(&15));
//! assert_eq!(tree.range(), Ok(Some(10)));
//!
//! // A single node subtree has a range of zero, which is not the same as no subtree at all.
//! let leaf = tree.find(&15);
//! assert_eq!(tree.range_from(leaf), Ok(Some(0)));
//! assert_eq!(tree.range_from(None), Ok(None));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::sync::atomic::{self, AtomicU64};

use num_traits::CheckedSub;
use tracing::{debug, instrument, trace};

use crate::error::{Error, Result};
use crate::sideways::Sideways;
use crate::util::Side;

/// Source of the tag that ties a [`NodeId`] to the tree that issued it.
static NEXT_TAG: AtomicU64 = AtomicU64::new(0);

fn next_tag() -> u64 {
    NEXT_TAG.fetch_add(1, atomic::Ordering::Relaxed)
}

/// A handle to a node in a particular [`Tree`]. Handles are only produced by the tree that owns
/// the node and are rejected with [`Error::ForeignNode`] by any other tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    tree: u64,
    index: usize,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} of tree {}", self.index, self.tree)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) left: Option<usize>,
    pub(crate) right: Option<usize>,
}

impl<K> Node<K> {
    fn leaf(key: K) -> Self {
        Self {
            key,
            left: None,
            right: None,
        }
    }

    fn child(&self, side: Side) -> Option<usize> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn child_mut(&mut self, side: Side) -> &mut Option<usize> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Strictly smaller keys belong on the left. Everything else, ties included, goes right.
    fn side_for(&self, key: &K) -> Side
    where
        K: Ord,
    {
        match key.cmp(&self.key) {
            Ordering::Less => Side::Left,
            Ordering::Equal | Ordering::Greater => Side::Right,
        }
    }
}

/// A Binary Search Tree with no rebalancing. Its shape is determined entirely by insertion order
/// so sorted input produces a tree as tall as it has nodes.
///
/// For every node, keys in its left subtree are smaller than its key and keys in its right
/// subtree are greater than or equal to it.
pub struct Tree<K> {
    nodes: Vec<Node<K>>,
    root: Option<usize>,
    tag: u64,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Manual implementation of `Clone` so the copy gets its own tag. Handles from the original
/// must not resolve in the clone once the two trees diverge.
impl<K> Clone for Tree<K>
where
    K: Clone,
{
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            root: self.root,
            tag: next_tag(),
        }
    }
}

impl<K> fmt::Debug for Tree<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.len())
            .field("height", &self.height())
            .field("keys", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

impl<K> Tree<K> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            tag: next_tag(),
        }
    }

    /// Whether the tree has no root.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The number of nodes in the tree. Duplicate keys each get their own node.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// The number of nodes on the longest path from the root to a leaf. An empty tree has a
    /// height of 0 and a lone root has a height of 1.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(usize, usize)> = self.root.map(|root| (root, 1)).into_iter().collect();
        while let Some((index, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[index];
            stack.extend(node.left.map(|left| (left, depth + 1)));
            stack.extend(node.right.map(|right| (right, depth + 1)));
        }

        height
    }

    /// A handle to the root node, if there is one.
    pub fn root(&self) -> Option<NodeId> {
        self.root.map(|index| self.handle(index))
    }

    /// The key stored in `node`.
    pub fn key(&self, node: NodeId) -> Result<&K> {
        let index = self.resolve(node)?;
        Ok(&self.nodes[index].key)
    }

    /// A handle to the left child of `node`.
    pub fn left(&self, node: NodeId) -> Result<Option<NodeId>> {
        let index = self.resolve(node)?;
        Ok(self.nodes[index].left.map(|left| self.handle(left)))
    }

    /// A handle to the right child of `node`.
    pub fn right(&self, node: NodeId) -> Result<Option<NodeId>> {
        let index = self.resolve(node)?;
        Ok(self.nodes[index].right.map(|right| self.handle(right)))
    }

    /// Iterates over every key in ascending order. Equal keys come out in the order they were
    /// inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::arena::Tree;
    ///
    /// let tree: Tree<_> = vec![3, 1, 2, 1].into_iter().collect();
    ///
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 1, 2, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self)
    }

    /// A [`Display`][fmt::Display]able view of the tree turned on its side: the right subtree
    /// is printed above a node and the left subtree below it, with one tab of indentation per
    /// level.
    pub fn sideways(&self) -> Sideways<'_, K> {
        Sideways::new(self)
    }

    /// Prints [`Tree::sideways`] to stdout.
    pub fn print(&self)
    where
        K: fmt::Display,
    {
        print!("{}", self.sideways());
    }

    /// Finds the smallest key in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::arena::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.min(), None);
    ///
    /// tree.insert(2).insert(1);
    /// assert_eq!(tree.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&K> {
        self.root.map(|root| self.extremum(root, Side::Left))
    }

    /// Finds the largest key in the tree.
    pub fn max(&self) -> Option<&K> {
        self.root.map(|root| self.extremum(root, Side::Right))
    }

    /// Same as [`Tree::min`] but recurses instead of looping, using stack space proportional
    /// to the length of the left spine.
    pub fn min_recursive(&self) -> Option<&K> {
        self.root.map(|root| self.extremum_recursive(root, Side::Left))
    }

    /// Same as [`Tree::max`] but recurses instead of looping.
    pub fn max_recursive(&self) -> Option<&K> {
        self.root.map(|root| self.extremum_recursive(root, Side::Right))
    }

    /// Finds the smallest key in the subtree rooted at `start`. `Ok(None)` means there is no
    /// subtree to search.
    #[instrument(level = "trace", skip(self))]
    pub fn min_from(&self, start: Option<NodeId>) -> Result<Option<&K>> {
        let start = self.resolve_start(start)?;
        Ok(start.map(|index| self.extremum(index, Side::Left)))
    }

    /// Finds the largest key in the subtree rooted at `start`.
    #[instrument(level = "trace", skip(self))]
    pub fn max_from(&self, start: Option<NodeId>) -> Result<Option<&K>> {
        let start = self.resolve_start(start)?;
        Ok(start.map(|index| self.extremum(index, Side::Right)))
    }

    /// Recursive version of [`Tree::min_from`].
    #[instrument(level = "trace", skip(self))]
    pub fn min_recursive_from(&self, start: Option<NodeId>) -> Result<Option<&K>> {
        let start = self.resolve_start(start)?;
        Ok(start.map(|index| self.extremum_recursive(index, Side::Left)))
    }

    /// Recursive version of [`Tree::max_from`].
    #[instrument(level = "trace", skip(self))]
    pub fn max_recursive_from(&self, start: Option<NodeId>) -> Result<Option<&K>> {
        let start = self.resolve_start(start)?;
        Ok(start.map(|index| self.extremum_recursive(index, Side::Right)))
    }

    /// The difference between the largest and smallest keys in the tree.
    ///
    /// `Ok(None)` for an empty tree and `Ok(Some(0))` (for integers) for a tree whose keys are
    /// all equal. Fails with [`Error::RangeOverflow`] if the difference doesn't fit in `K`.
    pub fn range(&self) -> Result<Option<K>>
    where
        K: CheckedSub,
    {
        self.spread(self.root)
    }

    /// The difference between the largest and smallest keys in the subtree rooted at `start`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::arena::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(25).insert(15).insert(10).insert(22);
    ///
    /// let fifteen = tree.find(&15);
    /// assert_eq!(tree.range_from(fifteen), Ok(Some(12)));
    /// assert_eq!(tree.range_from(None), Ok(None));
    /// ```
    #[instrument(level = "trace", skip(self))]
    pub fn range_from(&self, start: Option<NodeId>) -> Result<Option<K>>
    where
        K: CheckedSub,
    {
        let start = self.resolve_start(start)?;
        self.spread(start)
    }

    /// Whether the tree holds a node with `key`. Walks down from the root in a loop.
    pub fn contains(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.locate(key).is_some()
    }

    /// Same answer as [`Tree::contains`] but found by recursing down from the root.
    pub fn contains_recursive(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.locate_recursive(key, self.root)
    }

    /// Whether the subtree rooted at `start` holds a node with `key`.
    #[instrument(level = "trace", skip(self, key))]
    pub fn contains_recursive_from(&self, key: &K, start: Option<NodeId>) -> Result<bool>
    where
        K: Ord,
    {
        let start = self.resolve_start(start)?;
        Ok(self.locate_recursive(key, start))
    }

    /// A handle to the first node on the search path from the root that holds `key`. With
    /// duplicates this is the one inserted first.
    pub fn find(&self, key: &K) -> Option<NodeId>
    where
        K: Ord,
    {
        self.locate(key).map(|index| self.handle(index))
    }

    /// Inserts `key` as a new leaf, walking down from the root in a loop. Returns the tree so
    /// calls can be chained.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::arena::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(10).insert(5).insert(10);
    ///
    /// assert_eq!(tree.len(), 3);
    /// assert_eq!(tree.height(), 2);
    /// ```
    pub fn insert(&mut self, key: K) -> &mut Self
    where
        K: Ord,
    {
        let Some(mut current) = self.root else {
            self.plant(key);
            return self;
        };

        let mut depth = 0;
        loop {
            let side = self.nodes[current].side_for(&key);
            match self.nodes[current].child(side) {
                Some(next) => {
                    current = next;
                    depth += 1;
                }
                None => {
                    self.attach(current, side, key, depth);
                    return self;
                }
            }
        }
    }

    /// Inserts `key` by recursing down from the root. Produces exactly the shape
    /// [`Tree::insert`] would.
    pub fn insert_recursive(&mut self, key: K) -> &mut Self
    where
        K: Ord,
    {
        match self.root {
            Some(root) => self.insert_below(root, key, 0),
            None => self.plant(key),
        }

        self
    }

    pub(crate) fn root_index(&self) -> Option<usize> {
        self.root
    }

    pub(crate) fn node(&self, index: usize) -> &Node<K> {
        &self.nodes[index]
    }

    fn handle(&self, index: usize) -> NodeId {
        NodeId {
            tree: self.tag,
            index,
        }
    }

    fn resolve(&self, node: NodeId) -> Result<usize> {
        if node.tree == self.tag && node.index < self.nodes.len() {
            Ok(node.index)
        } else {
            debug!(%node, tree = self.tag, "rejected node from another tree");
            Err(Error::ForeignNode(node))
        }
    }

    fn resolve_start(&self, start: Option<NodeId>) -> Result<Option<usize>> {
        start.map(|node| self.resolve(node)).transpose()
    }

    fn push(&mut self, key: K) -> usize {
        self.nodes.push(Node::leaf(key));
        self.nodes.len() - 1
    }

    fn plant(&mut self, key: K) {
        let index = self.push(key);
        self.root = Some(index);
        trace!(index, "planted root");
    }

    fn insert_below(&mut self, current: usize, key: K, depth: usize)
    where
        K: Ord,
    {
        let side = self.nodes[current].side_for(&key);
        match self.nodes[current].child(side) {
            Some(next) => self.insert_below(next, key, depth + 1),
            None => self.attach(current, side, key, depth),
        }
    }

    /// Hangs a new leaf off the empty `side` of `parent`, which sits `parent_depth` levels below
    /// the root.
    fn attach(&mut self, parent: usize, side: Side, key: K, parent_depth: usize)
    where
        K: Ord,
    {
        let index = self.push(key);
        *self.nodes[parent].child_mut(side) = Some(index);
        trace!(index, parent, ?side, depth = parent_depth + 1, "attached leaf");

        if cfg!(debug_assertions) {
            let parent = &self.nodes[parent];
            let child = &self.nodes[index];
            match side {
                Side::Left => assert!(child.key < parent.key),
                Side::Right => assert!(child.key >= parent.key),
            }
        }
    }

    fn locate(&self, key: &K) -> Option<usize>
    where
        K: Ord,
    {
        let mut current = self.root;
        while let Some(index) = current {
            let node = &self.nodes[index];
            current = match key.cmp(&node.key) {
                Ordering::Equal => return Some(index),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }

        None
    }

    fn locate_recursive(&self, key: &K, current: Option<usize>) -> bool
    where
        K: Ord,
    {
        let Some(index) = current else {
            return false;
        };
        let node = &self.nodes[index];
        match key.cmp(&node.key) {
            Ordering::Equal => true,
            Ordering::Less => self.locate_recursive(key, node.left),
            Ordering::Greater => self.locate_recursive(key, node.right),
        }
    }

    /// Follows `side` links from `start` until there are none left.
    fn extremum(&self, start: usize, side: Side) -> &K {
        let mut current = start;
        while let Some(next) = self.nodes[current].child(side) {
            current = next;
        }

        &self.nodes[current].key
    }

    fn extremum_recursive(&self, current: usize, side: Side) -> &K {
        match self.nodes[current].child(side) {
            Some(next) => self.extremum_recursive(next, side),
            None => &self.nodes[current].key,
        }
    }

    fn spread(&self, start: Option<usize>) -> Result<Option<K>>
    where
        K: CheckedSub,
    {
        let Some(start) = start else {
            return Ok(None);
        };
        let max = self.extremum(start, Side::Right);
        let min = self.extremum(start, Side::Left);

        max.checked_sub(min).map(Some).ok_or(Error::RangeOverflow)
    }
}

impl<K> Extend<K> for Tree<K>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, keys: I) {
        for key in keys {
            self.insert(key);
        }
    }
}

impl<K> FromIterator<K> for Tree<K>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = K>>(keys: I) -> Self {
        let mut tree = Self::new();
        tree.extend(keys);
        tree
    }
}

impl<'a, K> IntoIterator for &'a Tree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over the keys of a [`Tree`]. Holds the left spine of whatever subtree is
/// still to be visited on an explicit stack, so it never recurses.
pub struct Iter<'a, K> {
    tree: &'a Tree<K>,
    stack: Vec<usize>,
}

impl<'a, K> Iter<'a, K> {
    fn new(tree: &'a Tree<K>) -> Self {
        let mut iter = Self {
            tree,
            stack: Vec::new(),
        };
        iter.descend_left(tree.root);
        iter
    }

    fn descend_left(&mut self, mut current: Option<usize>) {
        while let Some(index) = current {
            self.stack.push(index);
            current = self.tree.nodes[index].left;
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let index = self.stack.pop()?;
        let node = &tree.nodes[index];
        self.descend_left(node.right);

        Some(&node.key)
    }
}
