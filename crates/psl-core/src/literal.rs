//! Integer literal resolution.
//!
//! Repetition counts, next-time offsets, range bounds and replicator value ranges must
//! be literal integers. What counts as "literal" depends on the host: a bare parser
//! only knows number leaves, while a model with `DEFINE`d constants can fold those as
//! well. The passes take a [`LiteralResolver`] and never evaluate anything themselves.

use hashbrown::HashMap;

use crate::arena::TermArena;
use crate::handle::{AtomId, TermHandle};
use crate::op::Op;
use crate::term::TermNode;

/// Resolves an expression to an integer if it denotes a compile-time literal.
pub trait LiteralResolver {
    /// Returns the integer denoted by `term`, or `None` if it is not a literal.
    fn resolve_literal(&self, arena: &TermArena, term: TermHandle) -> Option<i64>;
}

/// Accepts number leaves and their negations only.
#[derive(Clone, Copy, Debug, Default)]
pub struct NumberLiterals;

impl LiteralResolver for NumberLiterals {
    fn resolve_literal(&self, arena: &TermArena, term: TermHandle) -> Option<i64> {
        match arena.get(term) {
            TermNode::Number(value) => Some(value),
            TermNode::Node {
                op: Op::UMinus | Op::Minus,
                left: Some(operand),
                right: None,
            } => arena.number_value(Some(operand))?.checked_neg(),
            _ => None,
        }
    }
}

/// Named integer constants plus constant folding of `+ - * / mod`.
///
/// Arithmetic is checked; an overflowing or dividing-by-zero expression is simply
/// not a literal.
#[derive(Clone, Debug, Default)]
pub struct ConstantTable {
    values: HashMap<AtomId, i64>,
}

impl ConstantTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `value`, replacing any earlier binding.
    pub fn define(&mut self, arena: &mut TermArena, name: &str, value: i64) {
        let id = arena.intern_atom(name);
        self.values.insert(id, value);
    }

    /// Returns the value bound to `id`.
    #[must_use]
    pub fn get(&self, id: AtomId) -> Option<i64> {
        self.values.get(&id).copied()
    }

    /// Number of bound constants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no constant is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl LiteralResolver for ConstantTable {
    fn resolve_literal(&self, arena: &TermArena, term: TermHandle) -> Option<i64> {
        match arena.get(term) {
            TermNode::Number(value) => Some(value),
            TermNode::Atom(id) => self.get(id),
            TermNode::Node {
                op: Op::UMinus | Op::Minus,
                left: Some(operand),
                right: None,
            } => self.resolve_literal(arena, operand)?.checked_neg(),
            TermNode::Node {
                op,
                left: Some(l),
                right: Some(r),
            } => {
                let (a, b) = (
                    self.resolve_literal(arena, l)?,
                    self.resolve_literal(arena, r)?,
                );
                match op {
                    Op::Plus => a.checked_add(b),
                    Op::Minus => a.checked_sub(b),
                    Op::Times => a.checked_mul(b),
                    Op::Divide => a.checked_div(b),
                    Op::Mod => a.checked_rem(b),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}
