use psl_core::{Op, TermHandle};

use super::{Rewritten, SereReducer};
use crate::chain::{disjuncts, is_atomic, is_inert};

impl SereReducer<'_> {
    /// Hoists a SERE disjunction out of a concatenation, fusion or conjunction:
    /// `r ; {r1 | r2}` becomes `{r ; r1 | r ; r2}`. One disjunction is hoisted per
    /// node and call; the fixed-point loop takes care of the rest.
    pub(crate) fn distribute_disjunction(&mut self, term: Option<TermHandle>) -> Rewritten {
        if is_inert(self.arena, term) || is_atomic(self.arena, term) {
            return (term, false);
        }
        let (op, l, r, compound) = match self.arena.as_compound(term) {
            Some((op, l, r)) => (op, l, r, true),
            None => match self.arena.op(term) {
                Some(op) => (op, self.arena.left(term), self.arena.right(term), false),
                None => return (term, false),
            },
        };
        let distributes = match op {
            Op::SereConcat | Op::SereFusion => true,
            Op::And | Op::AmpAmp => compound,
            _ => false,
        };

        if distributes {
            if let (Some(l), Some(r)) = (l, r) {
                if let Some((r1, r2)) = disjuncts(self.arena, Some(l)) {
                    let first = self.join(op, r1, r);
                    let second = self.join(op, r2, r);
                    return (Some(self.arena.compound(Op::Or, first, second)), true);
                }
                if let Some((r1, r2)) = disjuncts(self.arena, Some(r)) {
                    let first = self.join(op, l, r1);
                    let second = self.join(op, l, r2);
                    return (Some(self.arena.compound(Op::Or, first, second)), true);
                }
            }
        }
        self.descend(term, Self::distribute_disjunction)
    }

    fn join(&mut self, op: Op, l: TermHandle, r: TermHandle) -> TermHandle {
        if matches!(op, Op::SereConcat | Op::SereFusion) {
            self.arena.binary(op, l, r)
        } else {
            self.arena.compound(op, l, r)
        }
    }
}

#[cfg(test)]
mod tests {
    use psl_core::{NumberLiterals, Op, TermArena};

    use crate::reducer::SereReducer;

    #[test]
    fn test_left_disjunction_under_conjunction() {
        let mut arena = TermArena::new();
        let (a, b, c) = (arena.atom("a"), arena.atom("b"), arena.atom("c"));
        let (sa, sb, sc) = (arena.sere(a), arena.sere(b), arena.sere(c));
        let or = arena.compound(Op::Or, sa, sb);
        let braced = arena.sere(or);
        let and = arena.compound(Op::AmpAmp, braced, sc);

        let mut reducer = SereReducer::new(&mut arena, &NumberLiterals);
        let (result, changed) = reducer.distribute_disjunction(Some(and));
        assert!(changed);
        assert_eq!(
            arena.display(result).to_string(),
            "{{{a} && {c}} | {{b} && {c}}}"
        );
    }

    #[test]
    fn test_boolean_or_is_not_a_sere_disjunction() {
        let mut arena = TermArena::new();
        let (a, b, c) = (arena.atom("a"), arena.atom("b"), arena.atom("c"));
        let or = arena.binary(Op::Or, b, c);
        let (sa, s_or) = (arena.sere(a), arena.sere(or));
        let chain = arena.concat(sa, s_or);

        let mut reducer = SereReducer::new(&mut arena, &NumberLiterals);
        assert_eq!(
            reducer.distribute_disjunction(Some(chain)),
            (Some(chain), false)
        );
    }
}
