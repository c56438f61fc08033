//! Term node representation.

use crate::handle::{AtomId, TermHandle};
use crate::op::Op;

/// A node in the term arena.
///
/// Interior nodes are a generic `(op, left, right)` triple; the composite shapes of
/// [`shape`](crate::shape) are built from it. Children are optional: an absent child
/// is distinct from the `True`/`False` leaves.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TermNode {
    /// A named atom.
    Atom(AtomId),
    /// An integer literal.
    Number(i64),
    /// Boolean constant `TRUE`.
    True,
    /// Boolean constant `FALSE`.
    False,
    /// A failure marker carrying a message, used as the last arm of lowered `ite`s.
    Failure(AtomId),
    /// An interior node.
    Node {
        /// Operator tag.
        op: Op,
        /// Left child.
        left: Option<TermHandle>,
        /// Right child.
        right: Option<TermHandle>,
    },
}

impl TermNode {
    /// Returns true for atoms, numbers, boolean constants and failures.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        !matches!(self, Self::Node { .. })
    }

    /// Returns the operator of an interior node.
    #[must_use]
    pub const fn op(&self) -> Option<Op> {
        match self {
            Self::Node { op, .. } => Some(*op),
            _ => None,
        }
    }

    /// Returns the children of an interior node; leaves have none.
    #[must_use]
    pub const fn children(&self) -> (Option<TermHandle>, Option<TermHandle>) {
        match self {
            Self::Node { left, right, .. } => (*left, *right),
            _ => (None, None),
        }
    }
}
