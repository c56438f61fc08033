//! Turns the chains left after merging into LTL.
//!
//! A chain `{x1} ; {x2} ; ... ; {xn}` becomes `x1 & X!(x2 & X!(... xn))`; a fusion
//! shares the step instead of moving to the next one. The continuation of a hole is
//! inserted into the hole rather than conjoined beside it.

use psl_classify::is_propositional;
use psl_core::{Op, TermHandle};

use super::SereReducer;
use crate::chain::{is_chain, is_inert};

impl SereReducer<'_> {
    pub(crate) fn collapse(&mut self, term: Option<TermHandle>) -> Option<TermHandle> {
        if self.arena.is_op(term, Op::Sere) {
            return self.collapse(self.arena.left(term));
        }
        if is_inert(self.arena, term) || is_propositional(self.arena, term) {
            return term;
        }
        if self.arena.is_hole(term) {
            // Nothing follows the hole: the sequence only has to go on.
            let t = self.arena.make_true();
            return Some(self.arena.unary(Op::EventuallyBang, t));
        }
        if is_chain(self.arena, term) {
            return self.chain_to_ltl(term, None);
        }
        if let Some((Op::Or, l, r)) = self.arena.as_compound(term) {
            let (l, r) = (self.collapse(l), self.collapse(r));
            return self.rebuild(Op::Or, l, r);
        }

        let op = self.arena.op(term)?;
        let (left, right) = (self.arena.left(term), self.arena.right(term));
        let (l, r) = (self.collapse(left), self.collapse(right));
        self.rebuild(op, l, r)
    }

    fn chain_to_ltl(
        &mut self,
        term: Option<TermHandle>,
        pending: Option<TermHandle>,
    ) -> Option<TermHandle> {
        match self.arena.op(term) {
            Some(Op::Sere) => self.chain_to_ltl(self.arena.left(term), pending),
            Some(Op::SereConcat) => {
                let (l, r) = (self.arena.left(term), self.arena.right(term));
                let rest = self.chain_to_ltl(r, pending);
                let next = self.arena.make(Op::XBang, rest, None);
                self.chain_to_ltl(l, Some(next))
            }
            Some(Op::SereFusion) => {
                let (l, r) = (self.arena.left(term), self.arena.right(term));
                let rest = self.chain_to_ltl(r, pending);
                self.chain_to_ltl(l, rest)
            }
            _ => {
                let (filled, inserted) = self.fill_holes(term, pending);
                let element = self.collapse(filled);
                if inserted {
                    element
                } else {
                    self.rebuild(Op::And, element, pending)
                }
            }
        }
    }

    /// Inserts `pending` into every hole of `term`: the right operand of a strong
    /// until, or the operand of an empty `eventually!`.
    fn fill_holes(
        &mut self,
        term: Option<TermHandle>,
        pending: Option<TermHandle>,
    ) -> (Option<TermHandle>, bool) {
        let Some(cont) = pending else {
            return (term, false);
        };
        if is_inert(self.arena, term) || is_propositional(self.arena, term) {
            return (term, false);
        }
        if self.arena.is_hole(term) {
            return (Some(self.arena.unary(Op::EventuallyBang, cont)), true);
        }
        if self.arena.is_op(term, Op::UntilBang) {
            let (l, r) = (self.arena.left(term), self.arena.right(term));
            let r = self.arena.make(Op::And, r, Some(cont));
            return (Some(self.arena.make(Op::UntilBang, l, Some(r))), true);
        }
        self.descend(term, |this, t| this.fill_holes(t, pending))
    }
}
