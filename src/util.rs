/// Which child link a walk follows. Finding the minimum follows `Left` until there is no further
/// child; finding the maximum follows `Right`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}
