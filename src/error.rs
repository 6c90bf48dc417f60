//! Errors returned by [`Tree`][crate::arena::Tree] operations that take a node handle or do
//! arithmetic on keys.

use thiserror::Error;

use crate::arena::NodeId;

/// The ways a well-formed call on a [`Tree`][crate::arena::Tree] can fail.
///
/// Note that "no answer" (for example the minimum of an empty tree) is not an error. Those
/// outcomes are `Ok(None)`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The handle was issued by a different tree (or a clone of this one).
    #[error("node {0} does not belong to this tree")]
    ForeignNode(NodeId),

    /// `max - min` of the subtree can't be represented in the key type.
    #[error("range of subtree overflows the key type")]
    RangeOverflow,
}

/// Shorthand for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
