//! Composite PSL shapes.
//!
//! The parser encodes SEREs, suffix implications, replicators and the extended
//! next-time family as small fixed patterns over `(op, left, right)` nodes:
//!
//! | construct                    | encoding                                         |
//! |------------------------------|--------------------------------------------------|
//! | `{r}`                        | `Sere(r, _)`                                     |
//! | `r[*n]`, `r[+]`, ...         | `SereRepeated(kind(r?, _), n?)`                  |
//! | `r1 & r2`, `&&`, `\|`        | `SereCompound(op(r1, r2), _)`                    |
//! | `r \|-> p`, `r \|=> p!`      | `op(Colon(r, p), strong?)`                       |
//! | `forall i in S : p`          | `ReplProp(ForAll(i, SetIn(range?, S)), p)`       |
//! | `next_event(b)[n](p)`        | `op(p, Colon(n?, b?))`                           |
//! | `ite(c, t, e)`               | `Ite(Colon(c, t), e)`                            |
//!
//! This module owns those encodings: the makers build them and the views take
//! them apart, so the passes never index children by position.

use smallvec::SmallVec;

use crate::arena::TermArena;
use crate::handle::TermHandle;
use crate::op::Op;

/// A repetition `expr[kind count]`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RepeatedSere {
    /// One of [`Op::Star`], [`Op::PlusRepeat`], [`Op::StarEq`], [`Op::StarMinusGt`].
    pub kind: Op,
    /// The repeated expression; absent for standalone `[*]` and `[+]`.
    pub expr: Option<TermHandle>,
    /// The repetition count; absent when unbounded.
    pub count: Option<TermHandle>,
}

impl RepeatedSere {
    /// `expr[*]` or standalone `[*]`.
    #[must_use]
    pub fn is_star(&self) -> bool {
        self.kind == Op::Star && self.count.is_none()
    }

    /// `expr[*n]` with an explicit count.
    #[must_use]
    pub fn is_star_count(&self) -> bool {
        self.kind == Op::Star && self.count.is_some()
    }

    /// `expr[+]` or standalone `[+]`.
    #[must_use]
    pub fn is_plus(&self) -> bool {
        self.kind == Op::PlusRepeat
    }

    /// A repetition without an operand.
    #[must_use]
    pub fn is_standalone(&self) -> bool {
        self.expr.is_none()
    }
}

/// A suffix implication `premise |-> consequent` or `premise |=> consequent`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SuffixImplication {
    /// [`Op::PipeMinusGt`] (overlapping) or [`Op::PipeEqGt`] (non-overlapping).
    pub op: Op,
    /// The sequence on the left.
    pub premise: Option<TermHandle>,
    /// The consequent property or sequence.
    pub consequent: Option<TermHandle>,
    /// True for the strong `!` form.
    pub strong: bool,
}

/// A replicator `forall id in [range] values` or `forany ...`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Replicator {
    /// [`Op::ForAll`] or [`Op::ForAny`].
    pub kind: Op,
    /// The bound identifier.
    pub id: Option<TermHandle>,
    /// Optional index range (`forall i in {0:3} in ...`).
    pub range: Option<TermHandle>,
    /// The value set: `boolean` or a `Cons` list.
    pub values: Option<TermHandle>,
}

impl Replicator {
    /// Connective joining the instances: `&` for `forall`, `|` for `forany`.
    #[must_use]
    pub fn join(&self) -> Op {
        if self.kind == Op::ForAll {
            Op::And
        } else {
            Op::Or
        }
    }
}

/// A member of the extended next-time family with its optional bound and event.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ExtendedNext {
    /// The operator.
    pub op: Op,
    /// The operand property.
    pub expr: Option<TermHandle>,
    /// Count or `lo..hi` range.
    pub when: Option<TermHandle>,
    /// Event condition of the `next_event` forms.
    pub condition: Option<TermHandle>,
}

impl TermArena {
    // === Makers ===

    /// `{x}`.
    pub fn sere(&mut self, x: TermHandle) -> TermHandle {
        self.unary(Op::Sere, x)
    }

    /// `l ; r`.
    pub fn concat(&mut self, l: TermHandle, r: TermHandle) -> TermHandle {
        self.binary(Op::SereConcat, l, r)
    }

    /// `l : r`.
    pub fn fusion(&mut self, l: TermHandle, r: TermHandle) -> TermHandle {
        self.binary(Op::SereFusion, l, r)
    }

    /// `l op r` as a sequence operator, `op` being `&`, `&&` or `|`.
    pub fn compound(&mut self, op: Op, l: TermHandle, r: TermHandle) -> TermHandle {
        debug_assert!(matches!(op, Op::And | Op::AmpAmp | Op::Or));
        let inner = self.binary(op, l, r);
        self.unary(Op::SereCompound, inner)
    }

    /// `expr[kind count]`.
    pub fn repeated(
        &mut self,
        kind: Op,
        expr: Option<TermHandle>,
        count: Option<TermHandle>,
    ) -> TermHandle {
        debug_assert!(kind.is_repetition());
        let inner = self.make(kind, expr, None);
        self.make(Op::SereRepeated, Some(inner), count)
    }

    /// `expr[*]`, or standalone `[*]` when `expr` is absent.
    pub fn star(&mut self, expr: Option<TermHandle>) -> TermHandle {
        self.repeated(Op::Star, expr, None)
    }

    /// `expr[+]`, or standalone `[+]` when `expr` is absent.
    pub fn plus(&mut self, expr: Option<TermHandle>) -> TermHandle {
        self.repeated(Op::PlusRepeat, expr, None)
    }

    /// `premise |-> consequent` (or `|=>`), strong when `strong` is set.
    pub fn suffix_implication(
        &mut self,
        op: Op,
        premise: TermHandle,
        consequent: TermHandle,
        strong: bool,
    ) -> TermHandle {
        debug_assert!(op.is_suffix_implication());
        let body = self.binary(Op::Colon, premise, consequent);
        let marker = strong.then(|| self.nullary_not());
        self.make(op, Some(body), marker)
    }

    fn nullary_not(&mut self) -> TermHandle {
        self.make(Op::Not, None, None)
    }

    /// `forall id in [range] values` (or `forany`).
    pub fn replicator(
        &mut self,
        kind: Op,
        id: TermHandle,
        range: Option<TermHandle>,
        values: TermHandle,
    ) -> TermHandle {
        debug_assert!(matches!(kind, Op::ForAll | Op::ForAny));
        let set = self.make(Op::SetIn, range, Some(values));
        self.binary(kind, id, set)
    }

    /// `replicator : property`.
    pub fn replicated(&mut self, replicator: TermHandle, property: TermHandle) -> TermHandle {
        self.binary(Op::ReplProp, replicator, property)
    }

    /// A `Cons` list of values, in order. Returns `None` for an empty list.
    pub fn value_list(
        &mut self,
        values: impl Into<SmallVec<[TermHandle; 8]>>,
    ) -> Option<TermHandle> {
        let values = values.into();
        values
            .iter()
            .rev()
            .fold(None, |tail, &v| Some(self.make(Op::Cons, Some(v), tail)))
    }

    /// `op[when](condition)(expr)`; with neither bound nor event the right child is
    /// absent.
    pub fn extended_next(
        &mut self,
        op: Op,
        expr: TermHandle,
        when: Option<TermHandle>,
        condition: Option<TermHandle>,
    ) -> TermHandle {
        debug_assert!(op.is_extended_next());
        let bound = (when.is_some() || condition.is_some())
            .then(|| self.make(Op::Colon, when, condition));
        self.make(op, Some(expr), bound)
    }

    /// `ite(c, t, e)`.
    pub fn ite(&mut self, c: TermHandle, t: TermHandle, e: TermHandle) -> TermHandle {
        let arm = self.binary(Op::Colon, c, t);
        self.binary(Op::Ite, arm, e)
    }

    /// `case c : t; rest esac`.
    pub fn case(&mut self, c: TermHandle, t: TermHandle, rest: TermHandle) -> TermHandle {
        let arm = self.binary(Op::Colon, c, t);
        self.binary(Op::Case, arm, rest)
    }

    /// PSL range `lo..hi`.
    pub fn range(&mut self, lo: TermHandle, hi: TermHandle) -> TermHandle {
        self.binary(Op::Range, lo, hi)
    }

    /// The empty SERE hole, an operand-less `eventually!`.
    pub fn hole(&mut self) -> TermHandle {
        self.nullary(Op::EventuallyBang)
    }

    // === Views ===

    /// Returns true for the operand-less `eventually!`.
    #[must_use]
    pub fn is_hole(&self, term: Option<TermHandle>) -> bool {
        self.is_op(term, Op::EventuallyBang) && self.left(term).is_none()
    }

    /// Takes apart `SereRepeated(kind(expr), count)`.
    #[must_use]
    pub fn as_repeated(&self, term: Option<TermHandle>) -> Option<RepeatedSere> {
        if !self.is_op(term, Op::SereRepeated) {
            return None;
        }
        let inner = self.left(term);
        Some(RepeatedSere {
            kind: self.op(inner)?,
            expr: self.left(inner),
            count: self.right(term),
        })
    }

    /// Takes apart `SereCompound(op(l, r))` into `(op, l, r)`.
    #[must_use]
    pub fn as_compound(
        &self,
        term: Option<TermHandle>,
    ) -> Option<(Op, Option<TermHandle>, Option<TermHandle>)> {
        if !self.is_op(term, Op::SereCompound) {
            return None;
        }
        let inner = self.left(term);
        Some((self.op(inner)?, self.left(inner), self.right(inner)))
    }

    /// Takes apart a suffix implication.
    #[must_use]
    pub fn as_suffix_implication(&self, term: Option<TermHandle>) -> Option<SuffixImplication> {
        let op = self.op(term).filter(|op| op.is_suffix_implication())?;
        let body = self.left(term);
        Some(SuffixImplication {
            op,
            premise: self.left(body),
            consequent: self.right(body),
            strong: self.right(term).is_some(),
        })
    }

    /// Takes apart a replicator node (the left child of a `ReplProp`).
    #[must_use]
    pub fn as_replicator(&self, term: Option<TermHandle>) -> Option<Replicator> {
        let kind = self
            .op(term)
            .filter(|op| matches!(op, Op::ForAll | Op::ForAny))?;
        let set = self.right(term);
        Some(Replicator {
            kind,
            id: self.left(term),
            range: self.left(set),
            values: self.right(set),
        })
    }

    /// Takes apart a member of the extended next-time family.
    #[must_use]
    pub fn as_extended_next(&self, term: Option<TermHandle>) -> Option<ExtendedNext> {
        let op = self.op(term).filter(|op| op.is_extended_next())?;
        let bound = self.right(term);
        Some(ExtendedNext {
            op,
            expr: self.left(term),
            when: self.left(bound),
            condition: self.right(bound),
        })
    }

    /// Takes apart `Ite(Colon(c, t), e)` into `(c, t, e)`.
    #[must_use]
    pub fn as_ite(
        &self,
        term: Option<TermHandle>,
    ) -> Option<(Option<TermHandle>, Option<TermHandle>, Option<TermHandle>)> {
        if !self.is_op(term, Op::Ite) {
            return None;
        }
        let arm = self.left(term);
        Some((self.left(arm), self.right(arm), self.right(term)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn test_repeated_round_trip() {
        let mut arena = TermArena::new();
        let a = arena.atom("a");
        let three = arena.number(3);
        let counted = arena.repeated(Op::Star, Some(a), Some(three));
        let standalone = arena.plus(None);

        let view = arena.as_repeated(Some(counted)).unwrap();
        assert!(view.is_star_count());
        assert!(!view.is_star());
        assert_eq!(view.expr, Some(a));
        assert_eq!(view.count, Some(three));

        let view = arena.as_repeated(Some(standalone)).unwrap();
        assert!(view.is_plus() && view.is_standalone());
        assert!(arena.as_repeated(Some(a)).is_none());
    }

    #[test]
    fn test_suffix_strength() {
        let mut arena = TermArena::new();
        let a = arena.atom("a");
        let p = arena.atom("p");
        let seq = arena.sere(a);
        let weak = arena.suffix_implication(Op::PipeMinusGt, seq, p, false);
        let strong = arena.suffix_implication(Op::PipeEqGt, seq, p, true);

        let view = arena.as_suffix_implication(Some(weak)).unwrap();
        assert_eq!((view.premise, view.consequent, view.strong), (Some(seq), Some(p), false));
        assert!(arena.as_suffix_implication(Some(strong)).unwrap().strong);
        assert_ne!(weak, strong);
    }

    #[test]
    fn test_replicator_and_value_list() {
        let mut arena = TermArena::new();
        let i = arena.atom("i");
        let values: SmallVec<[TermHandle; 8]> = smallvec![arena.number(1), arena.number(2)];
        let list = arena.value_list(values.clone()).unwrap();
        let rep = arena.replicator(Op::ForAny, i, None, list);

        let view = arena.as_replicator(Some(rep)).unwrap();
        assert_eq!(view.join(), Op::Or);
        assert_eq!(view.id, Some(i));
        assert_eq!(view.range, None);
        assert_eq!(arena.left(view.values), Some(values[0]));
        assert_eq!(arena.left(arena.right(view.values)), Some(values[1]));
        assert_eq!(arena.right(arena.right(view.values)), None);

        let empty: [TermHandle; 0] = [];
        assert_eq!(arena.value_list(&empty[..]), None);
    }

    #[test]
    fn test_extended_next_bounds() {
        let mut arena = TermArena::new();
        let p = arena.atom("p");
        let b = arena.atom("b");
        let two = arena.number(2);
        let plain = arena.extended_next(Op::XBang, p, None, None);
        let event = arena.extended_next(Op::NextEvent, p, Some(two), Some(b));

        assert_eq!(arena.right(Some(plain)), None);
        let view = arena.as_extended_next(Some(event)).unwrap();
        assert_eq!((view.expr, view.when, view.condition), (Some(p), Some(two), Some(b)));
    }

    #[test]
    fn test_hole() {
        let mut arena = TermArena::new();
        let p = arena.atom("p");
        let hole = arena.hole();
        let filled = arena.unary(Op::EventuallyBang, p);
        assert!(arena.is_hole(Some(hole)));
        assert!(!arena.is_hole(Some(filled)));
    }
}
