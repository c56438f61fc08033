//! Counted stars, unbounded stars and plus.

use psl_classify::is_sere;
use psl_core::{Op, PslError, PslResult, TermHandle};

use super::{Rewritten, SereReducer};
use crate::chain::{
    is_atomic, is_inert, is_standalone_plus, is_standalone_star, propstar_operand, repetition,
    unbrace,
};

impl SereReducer<'_> {
    /// Unrolls `r[*n]` into `n` concatenated copies of `r`. A bare `[*n]` repeats
    /// `{true}`; `n = 0` leaves nothing.
    pub(crate) fn expand_star_counts(
        &mut self,
        term: Option<TermHandle>,
    ) -> PslResult<Rewritten> {
        if is_inert(self.arena, term) || is_atomic(self.arena, term) {
            return Ok((term, false));
        }
        if let Some(rep) = self.arena.as_repeated(term) {
            if !rep.is_star_count() {
                return Ok((term, false));
            }
            let count = self.repetition_count(term, rep.count)?;
            if count == 0 {
                return Ok((None, true));
            }
            let (expr, _) = self.expand_star_counts(rep.expr)?;
            if rep.expr.is_some() && expr.is_none() {
                return Ok((None, true));
            }
            let unit = match expr {
                Some(e) if is_sere(self.arena, Some(e)) => e,
                Some(e) => self.arena.sere(e),
                None => {
                    let t = self.arena.make_true();
                    self.arena.sere(t)
                }
            };
            let mut acc = unit;
            for _ in 1..count {
                acc = self.arena.concat(unit, acc);
            }
            return Ok((Some(acc), true));
        }
        if self.arena.is_op(term, Op::Sere) {
            return self.expand_star_counts(self.arena.left(term));
        }

        if let Some((op, l, r)) = self.arena.as_compound(term) {
            let (l, lc) = self.expand_star_counts(l)?;
            let (r, rc) = self.expand_star_counts(r)?;
            return Ok((self.compound_of(op, l, r), lc || rc));
        }
        let Some(op) = self.arena.op(term) else {
            return Ok((term, false));
        };
        let (left, right) = (self.arena.left(term), self.arena.right(term));
        let (l, lc) = self.expand_star_counts(left)?;
        let (r, rc) = self.expand_star_counts(right)?;
        Ok((self.rebuild(op, l, r), lc || rc))
    }

    fn repetition_count(
        &self,
        term: Option<TermHandle>,
        count: Option<TermHandle>,
    ) -> PslResult<i64> {
        let value = count
            .and_then(|c| self.resolver.resolve_literal(self.arena, c))
            .ok_or_else(|| PslError::ExpectedNumber {
                term: self.arena.display(term).to_string(),
            })?;
        if value < 0 {
            return Err(PslError::InvalidNumericValue {
                value,
                reason: "repetition count must not be negative",
                term: self.arena.display(term).to_string(),
            });
        }
        Ok(value)
    }

    /// Removes unbounded `[*]`.
    ///
    /// At the top of a SERE trailing stars are dropped: `r ; b[*]` matches whenever
    /// `r` does. Elsewhere `r ; [*]` becomes `{r | r ; {eventually!}}` and
    /// `r ; b[*]` becomes `{r | r ; {b until! b}}`, mirrored for a leading star.
    pub(crate) fn remove_star(&mut self, term: Option<TermHandle>, toplevel: bool) -> Rewritten {
        if is_inert(self.arena, term) {
            return (term, false);
        }
        let mut term = term;
        let mut changed = false;
        if toplevel {
            (term, changed) = self.remove_trailing_star(term);
            if term.is_none() {
                return (None, changed);
            }
        }

        if self.arena.is_op(term, Op::SereConcat) {
            let (l, r) = (self.arena.left(term), self.arena.right(term));
            if is_standalone_star(self.arena, r) {
                let (l, _) = self.remove_star(l, false);
                let hole = self.arena.hole();
                return (self.star_alternatives(l, hole, false), true);
            }
            if let Some(p) = propstar_operand(self.arena, r) {
                let (l, _) = self.remove_star(l, false);
                let run = self.arena.binary(Op::UntilBang, p, p);
                return (self.star_alternatives(l, run, false), true);
            }
            if is_standalone_star(self.arena, l) {
                let (r, _) = self.remove_star(r, false);
                let hole = self.arena.hole();
                return (self.star_alternatives(r, hole, true), true);
            }
            if let Some(p) = propstar_operand(self.arena, l) {
                let (r, _) = self.remove_star(r, false);
                let run = self.arena.binary(Op::UntilBang, p, p);
                return (self.star_alternatives(r, run, true), true);
            }
        }

        if let Some((op, l, r)) = self.arena.as_compound(term) {
            let (l, lc) = self.remove_star(l, toplevel);
            let (r, rc) = self.remove_star(r, toplevel);
            // A trailing disjunct that was dropped matches any continuation.
            if toplevel && op == Op::Or && (l.is_none() || r.is_none()) {
                return (None, true);
            }
            return (self.compound_of(op, l, r), changed || lc || rc);
        }
        let Some(op) = self.arena.op(term) else {
            return (term, changed);
        };
        let toplevel_l = toplevel && !matches!(op, Op::SereConcat | Op::SereFusion);
        let (left, right) = (self.arena.left(term), self.arena.right(term));
        let (l, lc) = self.remove_star(left, toplevel_l);
        let (r, rc) = self.remove_star(right, toplevel);
        (self.rebuild(op, l, r), changed || lc || rc)
    }

    /// `{r | r ; {ext}}`, or `{r | {ext} ; r}` when the star was leading.
    fn star_alternatives(
        &mut self,
        r: Option<TermHandle>,
        ext: TermHandle,
        leading: bool,
    ) -> Option<TermHandle> {
        let ext = self.arena.sere(ext);
        let Some(r) = r else {
            return Some(ext);
        };
        let longer = if leading {
            self.arena.concat(ext, r)
        } else {
            self.arena.concat(r, ext)
        };
        Some(self.arena.compound(Op::Or, r, longer))
    }

    fn remove_trailing_star(&mut self, term: Option<TermHandle>) -> Rewritten {
        if is_inert(self.arena, term) {
            return (term, false);
        }
        if repetition(self.arena, term).is_some_and(|r| r.is_star()) {
            return (None, true);
        }
        if !self.arena.is_op(term, Op::SereConcat) {
            return (term, false);
        }
        let (head, tail) = (self.arena.left(term), self.arena.right(term));
        let (tail, tail_changed) = self.remove_trailing_star(tail);
        if tail.is_none() {
            let (head, head_changed) = self.remove_trailing_star(head);
            return (head, tail_changed || head_changed);
        }
        (self.concat_opt(head, tail), tail_changed)
    }

    /// Removes `[+]`: `b[+]` becomes `{b until! b}`, a standalone `[+]` an
    /// `eventually!` hole, and a trailing or top-level standalone `[+]` `{true}`.
    pub(crate) fn remove_plus(&mut self, term: Option<TermHandle>, toplevel: bool) -> Rewritten {
        if is_inert(self.arena, term) {
            return (term, false);
        }
        let mut term = term;
        let mut changed = false;
        if toplevel && self.arena.is_op(term, Op::SereConcat) {
            (term, changed) = self.remove_trailing_plus(term);
        }

        if let Some(rep) = repetition(self.arena, term).filter(|r| r.is_plus()) {
            let replacement = match unbrace(self.arena, rep.expr) {
                Some(p) => self.arena.binary(Op::UntilBang, p, p),
                None if toplevel => self.arena.make_true(),
                None => self.arena.hole(),
            };
            return (Some(self.arena.sere(replacement)), true);
        }

        if let Some((op, l, r)) = self.arena.as_compound(term) {
            let (l, lc) = self.remove_plus(l, toplevel);
            let (r, rc) = self.remove_plus(r, toplevel);
            return (self.compound_of(op, l, r), changed || lc || rc);
        }
        let Some(op) = self.arena.op(term) else {
            return (term, changed);
        };
        let toplevel_l = toplevel && !matches!(op, Op::SereConcat | Op::SereFusion);
        let (left, right) = (self.arena.left(term), self.arena.right(term));
        let (l, lc) = self.remove_plus(left, toplevel_l);
        let (r, rc) = self.remove_plus(right, toplevel);
        (self.rebuild(op, l, r), changed || lc || rc)
    }

    fn remove_trailing_plus(&mut self, term: Option<TermHandle>) -> Rewritten {
        if is_inert(self.arena, term) {
            return (term, false);
        }
        if is_standalone_plus(self.arena, term) {
            let t = self.arena.make_true();
            return (Some(self.arena.sere(t)), true);
        }
        if !self.arena.is_op(term, Op::SereConcat) {
            return (term, false);
        }
        let (head, tail) = (self.arena.left(term), self.arena.right(term));
        let (tail, changed) = self.remove_trailing_plus(tail);
        (self.concat_opt(head, tail), changed)
    }
}
