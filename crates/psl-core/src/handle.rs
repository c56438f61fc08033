//! Type-safe term handles.
//!
//! Handles are 32-bit indices into the [`TermArena`](crate::TermArena). Because the
//! arena hash-conses every node, two handles are equal exactly when the terms they
//! name are structurally identical.

use std::fmt;

/// A handle to a term in the arena.
///
/// Absent children (the "no term here" marker used by holes, weak suffix implications
/// and star operands) are represented as `Option::<TermHandle>::None`, never as a handle.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TermHandle(u32);

impl TermHandle {
    /// Creates a new handle from an index.
    ///
    /// This is primarily for internal use by the arena.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index of this handle.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for TermHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Term({})", self.0)
    }
}

impl fmt::Display for TermHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of an interned atom name.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct AtomId(u32);

impl AtomId {
    /// Creates an atom id from its interning index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the interning index.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}
