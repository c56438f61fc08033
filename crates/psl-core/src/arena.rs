//! Arena storage for terms.
//!
//! Nodes are stored contiguously and hash-consed: building the same `(op, left, right)`
//! triple twice yields the same [`TermHandle`]. Nothing is ever freed individually;
//! rewriting only appends, and the whole arena is dropped with its session.

use hashbrown::HashMap;

use crate::display::TermDisplay;
use crate::error::{PslError, PslResult};
use crate::handle::{AtomId, TermHandle};
use crate::intern::AtomTable;
use crate::op::Op;
use crate::term::TermNode;

/// The arena owning every term of a session.
#[derive(Debug, Default)]
pub struct TermArena {
    /// Storage for all term nodes.
    nodes: Vec<TermNode>,
    /// Interning table: maps node content to its handle.
    intern_map: HashMap<TermNode, TermHandle>,
    /// Atom names.
    atoms: AtomTable,
}

impl TermArena {
    /// Creates a new empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an arena with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            intern_map: HashMap::with_capacity(capacity),
            atoms: AtomTable::default(),
        }
    }

    /// Interns a node, returning its handle.
    ///
    /// If an identical node already exists, returns the existing handle.
    ///
    /// # Panics
    ///
    /// Panics if the arena already holds `u32::MAX` nodes.
    pub fn intern(&mut self, node: TermNode) -> TermHandle {
        if let Some(&handle) = self.intern_map.get(&node) {
            return handle;
        }

        let index = self.nodes.len();
        assert!(index < u32::MAX as usize, "Arena capacity exceeded");

        #[allow(clippy::cast_possible_truncation)]
        let handle = TermHandle::new(index as u32);
        self.nodes.push(node);
        self.intern_map.insert(node, handle);
        handle
    }

    /// Gets the node at the given handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle was not produced by this arena.
    #[must_use]
    pub fn get(&self, handle: TermHandle) -> TermNode {
        self.nodes[handle.index() as usize]
    }

    /// Returns the number of nodes in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the arena is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Interns an atom name.
    pub fn intern_atom(&mut self, name: &str) -> AtomId {
        self.atoms.intern(name)
    }

    /// Gets the name of an atom.
    #[must_use]
    pub fn atom_name(&self, id: AtomId) -> Option<&str> {
        self.atoms.name(id)
    }

    // === Constructors ===

    /// Creates an atom leaf.
    pub fn atom(&mut self, name: &str) -> TermHandle {
        let id = self.intern_atom(name);
        self.intern(TermNode::Atom(id))
    }

    /// Creates an integer leaf.
    pub fn number(&mut self, value: i64) -> TermHandle {
        self.intern(TermNode::Number(value))
    }

    /// Creates the `TRUE` leaf.
    pub fn make_true(&mut self) -> TermHandle {
        self.intern(TermNode::True)
    }

    /// Creates the `FALSE` leaf.
    pub fn make_false(&mut self) -> TermHandle {
        self.intern(TermNode::False)
    }

    /// Creates a boolean constant.
    pub fn constant(&mut self, value: bool) -> TermHandle {
        if value {
            self.make_true()
        } else {
            self.make_false()
        }
    }

    /// Creates a failure leaf with the given message.
    pub fn failure(&mut self, message: &str) -> TermHandle {
        let id = self.intern_atom(message);
        self.intern(TermNode::Failure(id))
    }

    /// Builds an interior node. This is the canonicalizing constructor every rewrite
    /// goes through.
    pub fn make(
        &mut self,
        op: Op,
        left: Option<TermHandle>,
        right: Option<TermHandle>,
    ) -> TermHandle {
        debug_assert!(
            !op.is_nullary() || (left.is_none() && right.is_none()),
            "`{op}` takes no children"
        );
        debug_assert!(
            !op.is_strictly_binary() || (left.is_some() && right.is_some()),
            "`{op}` needs two children"
        );
        self.intern(TermNode::Node { op, left, right })
    }

    /// Builds a node with only a left child.
    pub fn unary(&mut self, op: Op, operand: TermHandle) -> TermHandle {
        self.make(op, Some(operand), None)
    }

    /// Builds a node with both children.
    pub fn binary(&mut self, op: Op, left: TermHandle, right: TermHandle) -> TermHandle {
        self.make(op, Some(left), Some(right))
    }

    /// Builds a childless node such as `boolean` or an empty `eventually!` hole.
    pub fn nullary(&mut self, op: Op) -> TermHandle {
        self.make(op, None, None)
    }

    // === Accessors over possibly-absent terms ===

    /// The operator of `term`, or `None` for leaves and the absent term.
    #[must_use]
    pub fn op(&self, term: Option<TermHandle>) -> Option<Op> {
        term.and_then(|t| self.get(t).op())
    }

    /// Returns true if `term` is an interior node with operator `op`.
    #[must_use]
    pub fn is_op(&self, term: Option<TermHandle>, op: Op) -> bool {
        self.op(term) == Some(op)
    }

    /// Left child of `term`; absent for leaves and the absent term.
    #[must_use]
    pub fn left(&self, term: Option<TermHandle>) -> Option<TermHandle> {
        term.and_then(|t| self.get(t).children().0)
    }

    /// Right child of `term`; absent for leaves and the absent term.
    #[must_use]
    pub fn right(&self, term: Option<TermHandle>) -> Option<TermHandle> {
        term.and_then(|t| self.get(t).children().1)
    }

    /// Returns true for the absent term and for leaf nodes.
    #[must_use]
    pub fn is_leaf(&self, term: Option<TermHandle>) -> bool {
        term.map_or(true, |t| self.get(t).is_leaf())
    }

    /// The value of an integer leaf.
    #[must_use]
    pub fn number_value(&self, term: Option<TermHandle>) -> Option<i64> {
        match term.map(|t| self.get(t)) {
            Some(TermNode::Number(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns true for the `TRUE` leaf.
    #[must_use]
    pub fn is_true(&self, term: Option<TermHandle>) -> bool {
        matches!(term.map(|t| self.get(t)), Some(TermNode::True))
    }

    /// Returns true for the `FALSE` leaf.
    #[must_use]
    pub fn is_false(&self, term: Option<TermHandle>) -> bool {
        matches!(term.map(|t| self.get(t)), Some(TermNode::False))
    }

    /// Nesting depth of `term`; leaves have depth 1, the absent term 0.
    ///
    /// Computed without recursion so it can vet machine-generated input before the
    /// recursive passes run.
    #[must_use]
    pub fn depth(&self, term: Option<TermHandle>) -> usize {
        let Some(root) = term else { return 0 };
        let mut depths: HashMap<TermHandle, usize> = HashMap::new();
        let mut stack = vec![(root, false)];

        while let Some((t, expanded)) = stack.pop() {
            if depths.contains_key(&t) {
                continue;
            }
            let (left, right) = self.get(t).children();
            if expanded {
                let child = |c: Option<TermHandle>| c.map_or(0, |c| depths[&c]);
                let d = 1 + child(left).max(child(right));
                depths.insert(t, d);
            } else {
                stack.push((t, true));
                stack.extend(
                    [left, right]
                        .into_iter()
                        .flatten()
                        .filter(|c| !depths.contains_key(c))
                        .map(|c| (c, false)),
                );
            }
        }
        depths[&root]
    }

    /// Checks `term` against an optional nesting limit; `None` accepts any depth.
    ///
    /// # Errors
    ///
    /// [`PslError::NestingTooDeep`] if `term` nests deeper than `limit`.
    pub fn check_depth(&self, term: Option<TermHandle>, limit: Option<usize>) -> PslResult<()> {
        let Some(limit) = limit else { return Ok(()) };
        let depth = self.depth(term);
        if depth > limit {
            return Err(PslError::NestingTooDeep { depth, limit });
        }
        Ok(())
    }

    /// Renders `term` for diagnostics and logs.
    #[must_use]
    pub fn display(&self, term: Option<TermHandle>) -> TermDisplay<'_> {
        TermDisplay::new(self, term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_basic() {
        let mut arena = TermArena::new();

        let a = arena.atom("a");
        let b = arena.atom("b");

        assert_eq!(a, arena.atom("a"));
        assert_ne!(a, b);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_hash_consing() {
        let mut arena = TermArena::new();

        let a = arena.atom("a");
        let b = arena.atom("b");
        let and1 = arena.binary(Op::And, a, b);
        let and2 = arena.binary(Op::And, a, b);
        let and3 = arena.binary(Op::And, b, a);

        assert_eq!(and1, and2);
        assert_ne!(and1, and3);
        assert_eq!(arena.len(), 4);
    }

    #[test]
    fn test_absent_is_not_a_constant() {
        let mut arena = TermArena::new();
        let t = arena.make_true();
        let f = arena.make_false();

        assert!(arena.is_true(Some(t)));
        assert!(arena.is_false(Some(f)));
        assert!(!arena.is_true(None));
        assert!(!arena.is_false(None));
        assert!(arena.is_leaf(None));
        assert_eq!(arena.op(None), None);
    }

    #[test]
    fn test_accessors() {
        let mut arena = TermArena::new();
        let p = arena.atom("p");
        let three = arena.number(3);
        let hole = arena.nullary(Op::EventuallyBang);
        let not_p = arena.unary(Op::Not, p);

        assert_eq!(arena.op(Some(not_p)), Some(Op::Not));
        assert!(arena.is_op(Some(not_p), Op::Not));
        assert_eq!(arena.left(Some(not_p)), Some(p));
        assert_eq!(arena.right(Some(not_p)), None);
        assert_eq!(arena.left(Some(hole)), None);
        assert_eq!(arena.number_value(Some(three)), Some(3));
        assert_eq!(arena.number_value(Some(p)), None);
    }

    #[test]
    fn test_atom_names() {
        let mut arena = TermArena::new();
        let id = arena.intern_atom("req");
        assert_eq!(arena.intern_atom("req"), id);
        assert_eq!(arena.atom_name(id), Some("req"));
    }

    #[test]
    fn test_depth() {
        let mut arena = TermArena::new();
        let p = arena.atom("p");
        assert_eq!(arena.depth(None), 0);
        assert_eq!(arena.depth(Some(p)), 1);

        let mut t = p;
        for _ in 0..10 {
            t = arena.unary(Op::XBang, t);
        }
        let shared = arena.binary(Op::And, t, t);
        assert_eq!(arena.depth(Some(t)), 11);
        assert_eq!(arena.depth(Some(shared)), 12);
    }

    #[test]
    fn test_check_depth() {
        let mut arena = TermArena::new();
        let mut t = arena.atom("p");
        for _ in 0..5 {
            t = arena.unary(Op::Not, t);
        }

        assert_eq!(arena.check_depth(Some(t), None), Ok(()));
        assert_eq!(arena.check_depth(Some(t), Some(6)), Ok(()));
        assert_eq!(
            arena.check_depth(Some(t), Some(5)),
            Err(PslError::NestingTooDeep { depth: 6, limit: 5 })
        );
    }
}
