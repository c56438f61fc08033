//! Formula classifier.
//!
//! Decides which reduction path a property takes, and whether every construct in it
//! is one the reduction supports.

use psl_core::{LiteralResolver, Op, PslError, PslResult, TermArena, TermHandle};
use tracing::debug;

use crate::predicates::{
    is_emptystar_free, is_id, is_leaf, is_ltl, is_obe, is_propositional, is_star_free,
};

/// Which logic a formula belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Classification {
    /// No temporal operator.
    Propositional,
    /// Linear-time formula, possibly with SEREs, that the reduction supports.
    Ltl,
    /// Branching-time formula.
    Obe,
    /// Mixes logics or uses an unsupported construct.
    Unsupported,
}

/// Checks formulas against what the reduction supports.
///
/// Literal-ness of repetition counts and next-time bounds is decided by the
/// resolver, so the same formula may be supported under a constant table and
/// rejected without one.
pub struct Classifier<'a> {
    arena: &'a TermArena,
    resolver: &'a dyn LiteralResolver,
}

impl<'a> Classifier<'a> {
    /// Creates a classifier over `arena`.
    pub fn new(arena: &'a TermArena, resolver: &'a dyn LiteralResolver) -> Self {
        Self { arena, resolver }
    }

    /// Classifies `term`.
    ///
    /// # Errors
    ///
    /// Propagates malformed-input failures found while checking support
    /// ([`PslError::ExpectedNumber`], [`PslError::InvalidNumericValue`]).
    pub fn classify(&self, term: TermHandle) -> PslResult<Classification> {
        let term = Some(term);
        if is_propositional(self.arena, term) {
            return Ok(Classification::Propositional);
        }
        if self.is_handled(term)? {
            return Ok(Classification::Ltl);
        }
        if is_obe(self.arena, term) {
            return Ok(Classification::Obe);
        }
        Ok(Classification::Unsupported)
    }

    /// Returns `Ok(false)` where [`check_handled`](Self::check_handled) reports an
    /// unsupported feature.
    ///
    /// # Errors
    ///
    /// Propagates every other failure of [`check_handled`](Self::check_handled).
    pub fn is_handled(&self, term: Option<TermHandle>) -> PslResult<bool> {
        match self.check_handled(term) {
            Ok(()) => Ok(true),
            Err(PslError::NotSupportedFeature { .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Checks that every construct in `term` can be reduced to LTL.
    ///
    /// # Errors
    ///
    /// - [`PslError::NotSupportedFeature`] for branching-time operators, weak suffix
    ///   implications, `within`/`whilenot`/`abort`, and SEREs outside the supported
    ///   fragment
    /// - [`PslError::ExpectedNumber`] when a repetition count or next-time range bound
    ///   is not a literal
    /// - [`PslError::InvalidNumericValue`] for a negative repetition count
    pub fn check_handled(&self, term: Option<TermHandle>) -> PslResult<()> {
        if term.is_none() || is_propositional(self.arena, term) {
            return Ok(());
        }
        let Some(op) = self.arena.op(term) else {
            return Ok(());
        };

        if op.is_obe() {
            return Err(self.unsupported("branching-time operator in a linear-time formula", term));
        }
        if let Some(suffix) = self.arena.as_suffix_implication(term) {
            if !suffix.strong {
                return Err(self.unsupported("weak suffix implications are not supported", term));
            }
            if !self.is_unbound_star_free(suffix.premise)? {
                return Err(self.unsupported(
                    "premise in suffix implication contains an unbounded repetition",
                    term,
                ));
            }
            self.check_handled(suffix.premise)?;
            return self.check_handled(suffix.consequent);
        }
        if op.is_unhandled_fl() {
            return Err(self.unsupported("operator not currently supported", term));
        }
        if op.is_extended_next() {
            return self.check_next(term);
        }
        if op.is_sere() {
            if self.is_handled_sere(term, true)? {
                return Ok(());
            }
            return Err(self.unsupported("SERE contains an unsupported feature", term));
        }

        self.check_handled(self.arena.left(term))?;
        self.check_handled(self.arena.right(term))
    }

    fn unsupported(&self, reason: &str, term: Option<TermHandle>) -> PslError {
        let rendered = self.arena.display(term).to_string();
        debug!(reason, term = %rendered, "unsupported construct");
        PslError::NotSupportedFeature {
            reason: reason.to_owned(),
            term: rendered,
        }
    }

    fn expected_number(&self, term: Option<TermHandle>) -> PslError {
        PslError::ExpectedNumber {
            term: self.arena.display(term).to_string(),
        }
    }

    fn resolves(&self, term: Option<TermHandle>) -> bool {
        term.is_some_and(|t| self.resolver.resolve_literal(self.arena, t).is_some())
    }

    fn check_next(&self, term: Option<TermHandle>) -> PslResult<()> {
        let Some(next) = self.arena.as_extended_next(term) else {
            unreachable!("check_next called on a non-next term");
        };
        if next.expr.is_none() {
            return Err(self.unsupported("next expression without an operand", term));
        }
        self.check_handled(next.expr)?;

        if next.condition.is_some() && !is_propositional(self.arena, next.condition) {
            return Err(self.unsupported("next event condition is not propositional", term));
        }

        // Plain counts are resolved when the operator is unrolled; replicator expansion
        // may still turn them into literals. Range bounds must already be literals.
        if self.arena.is_op(next.when, Op::Range) {
            let (lo, hi) = (self.arena.left(next.when), self.arena.right(next.when));
            if !self.resolves(lo) || !self.resolves(hi) {
                return Err(self.expected_number(next.when));
            }
        }
        Ok(())
    }

    /// Repetitions in a suffix premise must all be counted stars with literal counts.
    fn is_unbound_star_free(&self, term: Option<TermHandle>) -> PslResult<bool> {
        if is_leaf(self.arena, term) || is_id(self.arena, term) {
            return Ok(true);
        }
        if let Some(rep) = self.arena.as_repeated(term) {
            if !rep.is_star_count() {
                return Ok(false);
            }
            if !self.resolves(rep.count) {
                return Err(self.expected_number(term));
            }
        }
        Ok(self.is_unbound_star_free(self.arena.left(term))?
            && self.is_unbound_star_free(self.arena.right(term))?)
    }

    fn is_handled_sere(&self, term: Option<TermHandle>, toplevel: bool) -> PslResult<bool> {
        if term.is_none() {
            return Ok(false);
        }
        if is_propositional(self.arena, term) {
            return Ok(true);
        }
        let arena = self.arena;
        let (l, r) = (arena.left(term), arena.right(term));

        match arena.op(term) {
            Some(Op::Sere) => self.is_handled_sere(l, toplevel),
            Some(Op::SereConcat) => {
                if toplevel && !(is_emptystar_free(arena, l) || is_emptystar_free(arena, r)) {
                    return Ok(false);
                }
                Ok(self.is_handled_sere(l, false)? && self.is_handled_sere(r, false)?)
            }
            Some(Op::SereFusion) => Ok(!self.unrolls_to_empty(l)
                && !self.unrolls_to_empty(r)
                && self.is_handled_sere(l, false)?
                && self.is_handled_sere(r, false)?
                && is_emptystar_free(arena, l)
                && is_emptystar_free(arena, r)),
            Some(Op::SereCompound) => {
                let Some((op, cl, cr)) = arena.as_compound(term) else {
                    return Ok(false);
                };
                if self.unrolls_to_empty(cl) || self.unrolls_to_empty(cr) {
                    return Ok(false);
                }
                // Stars are ruled out under `&`: `{a;b[*]} & {c;d;e}` would force the
                // run of `b`s to end with the `e` of the other operand.
                let shape_ok = match op {
                    Op::And | Op::AmpAmp => is_star_free(arena, cl) && is_star_free(arena, cr),
                    Op::Or if !toplevel => true,
                    _ => is_emptystar_free(arena, cl) && is_emptystar_free(arena, cr),
                };
                Ok(shape_ok
                    && self.is_handled_sere(cl, toplevel)?
                    && self.is_handled_sere(cr, toplevel)?)
            }
            Some(Op::SereRepeated) => self.is_handled_star(term, toplevel),
            _ => Ok(false),
        }
    }

    /// True when unrolling counted repetitions leaves nothing of `term`, as for
    /// `{b[*N]}` with `N` resolving to zero.
    fn unrolls_to_empty(&self, term: Option<TermHandle>) -> bool {
        let arena = self.arena;
        if let Some(rep) = arena.as_repeated(term) {
            let zero = rep.count.and_then(|c| self.resolver.resolve_literal(arena, c)) == Some(0);
            return rep.is_star_count() && (zero || self.unrolls_to_empty(rep.expr));
        }
        let (l, r) = (arena.left(term), arena.right(term));
        match arena.op(term) {
            Some(Op::Sere) => self.unrolls_to_empty(l),
            Some(Op::SereConcat) => self.unrolls_to_empty(l) && self.unrolls_to_empty(r),
            _ => false,
        }
    }

    fn is_handled_star(&self, term: Option<TermHandle>, toplevel: bool) -> PslResult<bool> {
        let Some(rep) = self.arena.as_repeated(term) else {
            unreachable!("is_handled_star called on a non-repetition");
        };
        let expr = self.strip_braces(rep.expr);

        if rep.is_star_count() {
            let count = rep
                .count
                .and_then(|c| self.resolver.resolve_literal(self.arena, c))
                .ok_or_else(|| self.expected_number(term))?;
            if count < 0 {
                return Err(PslError::InvalidNumericValue {
                    value: count,
                    reason: "repetition count must not be negative",
                    term: self.arena.display(term).to_string(),
                });
            }
            // A bare `[*n]` repeats `true`.
            return if expr.is_none() {
                Ok(true)
            } else {
                self.is_handled_sere(expr, toplevel)
            };
        }
        if matches!(rep.kind, Op::StarEq | Op::StarMinusGt) {
            return Ok(false);
        }
        if toplevel && rep.is_star() {
            return Ok(false);
        }
        Ok(expr.is_none() || is_propositional(self.arena, expr))
    }

    fn strip_braces(&self, mut term: Option<TermHandle>) -> Option<TermHandle> {
        while self.arena.is_op(term, Op::Sere) {
            term = self.arena.left(term);
        }
        term
    }
}

/// Convenience wrapper: returns true if `term` is LTL and supported.
///
/// # Errors
///
/// See [`Classifier::check_handled`].
pub fn is_handled_ltl(
    arena: &TermArena,
    resolver: &dyn LiteralResolver,
    term: TermHandle,
) -> PslResult<bool> {
    Ok(is_ltl(arena, Some(term)) && Classifier::new(arena, resolver).is_handled(Some(term))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use psl_core::{ConstantTable, NumberLiterals};

    fn unsupported(result: PslResult<()>) -> bool {
        matches!(result, Err(PslError::NotSupportedFeature { .. }))
    }

    #[test]
    fn test_classify_paths() {
        let mut arena = TermArena::new();
        let a = arena.atom("a");
        let b = arena.atom("b");
        let prop = arena.binary(Op::And, a, b);
        let g = arena.unary(Op::Always, a);
        let ef = arena.unary(Op::Ef, a);
        let within = arena.binary(Op::Within, a, b);

        let c = Classifier::new(&arena, &NumberLiterals);
        assert_eq!(c.classify(prop), Ok(Classification::Propositional));
        assert_eq!(c.classify(g), Ok(Classification::Ltl));
        assert_eq!(c.classify(ef), Ok(Classification::Obe));
        assert_eq!(c.classify(within), Ok(Classification::Unsupported));
    }

    #[test]
    fn test_suffix_implications() {
        let mut arena = TermArena::new();
        let a = arena.atom("a");
        let p = arena.atom("p");
        let sa = arena.sere(a);
        let strong = arena.suffix_implication(Op::PipeMinusGt, sa, p, true);
        let weak = arena.suffix_implication(Op::PipeMinusGt, sa, p, false);
        let star = arena.star(Some(a));
        let unbounded = arena.suffix_implication(Op::PipeEqGt, star, p, true);

        let c = Classifier::new(&arena, &NumberLiterals);
        assert_eq!(c.check_handled(Some(strong)), Ok(()));
        assert!(unsupported(c.check_handled(Some(weak))));
        assert!(unsupported(c.check_handled(Some(unbounded))));
        assert_eq!(c.is_handled(Some(weak)), Ok(false));
    }

    #[test]
    fn test_star_counts_need_literals() {
        let mut arena = TermArena::new();
        let mut table = ConstantTable::new();
        table.define(&mut arena, "N", 3);
        let a = arena.atom("a");
        let n = arena.atom("N");
        let m = arena.atom("M");
        let sa = arena.sere(a);
        let by_n = arena.repeated(Op::Star, Some(sa), Some(n));
        let by_m = arena.repeated(Op::Star, Some(sa), Some(m));

        assert!(matches!(
            Classifier::new(&arena, &NumberLiterals).check_handled(Some(by_n)),
            Err(PslError::ExpectedNumber { .. })
        ));
        assert_eq!(Classifier::new(&arena, &table).check_handled(Some(by_n)), Ok(()));
        assert!(matches!(
            Classifier::new(&arena, &table).check_handled(Some(by_m)),
            Err(PslError::ExpectedNumber { .. })
        ));
    }

    #[test]
    fn test_negative_star_count() {
        let mut arena = TermArena::new();
        let a = arena.atom("a");
        let two = arena.number(2);
        let neg = arena.unary(Op::UMinus, two);
        let rep = arena.repeated(Op::Star, Some(a), Some(neg));

        assert!(matches!(
            Classifier::new(&arena, &NumberLiterals).check_handled(Some(rep)),
            Err(PslError::InvalidNumericValue { value: -2, .. })
        ));
    }

    #[test]
    fn test_sere_fragment() {
        let mut arena = TermArena::new();
        let a = arena.atom("a");
        let b = arena.atom("b");
        let sa = arena.sere(a);
        let sb = arena.sere(b);
        let b_star = arena.star(Some(b));
        let tail_star = arena.concat(sa, b_star);
        let only_star = arena.sere(b_star);
        let two = arena.number(2);
        let goto = arena.repeated(Op::StarMinusGt, Some(b), Some(two));
        let starred_and = arena.compound(Op::And, tail_star, sb);
        let plain_and = arena.compound(Op::And, sa, sb);

        let c = Classifier::new(&arena, &NumberLiterals);
        assert_eq!(c.check_handled(Some(tail_star)), Ok(()));
        assert!(unsupported(c.check_handled(Some(only_star))));
        assert!(unsupported(c.check_handled(Some(goto))));
        assert!(unsupported(c.check_handled(Some(starred_and))));
        assert_eq!(c.check_handled(Some(plain_and)), Ok(()));
    }

    #[test]
    fn test_empty_operands_are_rejected() {
        let mut arena = TermArena::new();
        let mut table = ConstantTable::new();
        table.define(&mut arena, "N", 0);
        let (b, c) = (arena.atom("b"), arena.atom("c"));
        let (sb, sc) = (arena.sere(b), arena.sere(c));
        let b_star = arena.star(Some(b));
        let braced_star = arena.sere(b_star);
        let one = arena.number(1);
        let once_star = arena.repeated(Op::Star, Some(braced_star), Some(one));
        let c_plus = arena.plus(Some(sc));
        let fused = arena.fusion(c_plus, once_star);
        let n = arena.atom("N");
        let no_b = arena.repeated(Op::Star, Some(sb), Some(n));
        let either = arena.compound(Op::Or, sc, no_b);
        let chain = arena.concat(sb, either);

        assert!(unsupported(Classifier::new(&arena, &NumberLiterals).check_handled(Some(fused))));
        assert!(unsupported(Classifier::new(&arena, &table).check_handled(Some(chain))));
    }

    #[test]
    fn test_next_bounds() {
        let mut arena = TermArena::new();
        let p = arena.atom("p");
        let b = arena.atom("b");
        let one = arena.number(1);
        let n = arena.atom("N");
        let literal = arena.range(one, one);
        let symbolic = arena.range(one, n);
        let g = arena.unary(Op::Always, p);
        let ok = arena.extended_next(Op::NextEventA, p, Some(literal), Some(b));
        let bad_range = arena.extended_next(Op::NextA, p, Some(symbolic), None);
        let bad_cond = arena.extended_next(Op::NextEvent, p, None, Some(g));

        let c = Classifier::new(&arena, &NumberLiterals);
        assert_eq!(c.check_handled(Some(ok)), Ok(()));
        assert!(matches!(
            c.check_handled(Some(bad_range)),
            Err(PslError::ExpectedNumber { .. })
        ));
        assert!(unsupported(c.check_handled(Some(bad_cond))));
    }

    #[test]
    fn test_is_handled_ltl() {
        let mut arena = TermArena::new();
        let a = arena.atom("a");
        let sa = arena.sere(a);
        let g = arena.unary(Op::Always, a);

        assert_eq!(is_handled_ltl(&arena, &NumberLiterals, g), Ok(true));
        assert_eq!(is_handled_ltl(&arena, &NumberLiterals, sa), Ok(false));
    }
}
