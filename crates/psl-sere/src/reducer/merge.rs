//! Passes that merge parallel or overlapping sequences point by point.

use psl_core::{Op, TermHandle};

use super::{Rewritten, SereReducer};
use crate::chain::{
    is_atomic, is_chain_holes_free, is_concat_holes_free, is_inert, split_first, split_last,
};

impl SereReducer<'_> {
    /// Removes `{r1} & {r2}` over hole-free concatenations: the first elements are
    /// conjoined and the tails conjoined recursively, the longer tail running on alone.
    pub(crate) fn remove_ampersand(&mut self, term: Option<TermHandle>) -> Rewritten {
        self.remove_conjunction(term, Op::And)
    }

    /// Removes the length-matching `{r1} && {r2}`. Sequences of different lengths
    /// never match together, leaving `{false}`.
    pub(crate) fn remove_2ampersand(&mut self, term: Option<TermHandle>) -> Rewritten {
        self.remove_conjunction(term, Op::AmpAmp)
    }

    fn remove_conjunction(&mut self, term: Option<TermHandle>, kind: Op) -> Rewritten {
        if is_inert(self.arena, term) || is_atomic(self.arena, term) {
            return (term, false);
        }
        let (l, r) = match self.arena.as_compound(term) {
            Some((op, Some(l), Some(r))) if op == kind => (l, r),
            _ => return self.descend(term, |this, t| this.remove_conjunction(t, kind)),
        };

        let mergeable =
            |t| is_atomic(self.arena, Some(t)) || is_concat_holes_free(self.arena, Some(t));
        if mergeable(l) && mergeable(r) {
            let (Some((hl, tl)), Some((hr, tr))) =
                (split_first(self.arena, Some(l)), split_first(self.arena, Some(r)))
            else {
                unreachable!("hole-free concatenation without a first element");
            };
            let heads = self.point(hl, hr);
            let merged = match (tl, tr) {
                (None, None) => heads,
                (Some(tl), Some(tr)) => {
                    let tails = self.arena.compound(kind, tl, tr);
                    let (tails, _) = self.remove_conjunction(Some(tails), kind);
                    self.concat_opt(Some(heads), tails).unwrap_or(heads)
                }
                (Some(tail), None) | (None, Some(tail)) if kind == Op::And => {
                    self.arena.concat(heads, tail)
                }
                _ => {
                    let f = self.arena.make_false();
                    self.arena.sere(f)
                }
            };
            return (Some(merged), true);
        }

        let (lm, l_changed) = self.remove_conjunction(Some(l), kind);
        let (rm, r_changed) = self.remove_conjunction(Some(r), kind);
        if !(l_changed || r_changed) {
            return (term, false);
        }
        let rebuilt = self.compound_of(kind, lm, rm);
        let (rebuilt, _) = self.remove_conjunction(rebuilt, kind);
        (rebuilt, true)
    }

    /// Removes `r1 : r2` over hole-free chains by conjoining the last element of
    /// `r1` with the first element of `r2`.
    pub(crate) fn remove_fusion(&mut self, term: Option<TermHandle>) -> Rewritten {
        if is_inert(self.arena, term) || is_atomic(self.arena, term) {
            return (term, false);
        }
        let (l, r) = (self.arena.left(term), self.arena.right(term));
        let fusable = self.arena.is_op(term, Op::SereFusion)
            && is_chain_holes_free(self.arena, l)
            && is_chain_holes_free(self.arena, r);
        if !fusable {
            return self.descend(term, Self::remove_fusion);
        }

        // Both sides come back as plain concatenations.
        let (l, _) = self.remove_fusion(l);
        let (r, _) = self.remove_fusion(r);
        let Some((l_rest, l_last)) = split_last(self.arena, l) else {
            unreachable!("hole-free chain without a last element");
        };
        let Some((r_first, r_rest)) = split_first(self.arena, r) else {
            unreachable!("hole-free chain without a first element");
        };
        let overlap = self.point(l_last, r_first);
        let tail = self.concat_opt(Some(overlap), r_rest);
        (self.concat_opt(l_rest, tail), true)
    }
}

#[cfg(test)]
mod tests {
    use psl_core::{NumberLiterals, Op, TermArena};

    use crate::reducer::SereReducer;

    #[test]
    fn test_nested_ampersand_is_merged_inside_out() {
        let mut arena = TermArena::new();
        let (a, b, c) = (arena.atom("a"), arena.atom("b"), arena.atom("c"));
        let (sa, sb, sc) = (arena.sere(a), arena.sere(b), arena.sere(c));
        let inner = arena.compound(Op::And, sb, sc);
        let chain = arena.concat(sa, inner);
        let outer = arena.compound(Op::And, chain, sc);

        let mut reducer = SereReducer::new(&mut arena, &NumberLiterals);
        let (result, changed) = reducer.remove_ampersand(Some(outer));
        assert!(changed);
        assert_eq!(arena.display(result).to_string(), "{(a & c)} ; {(b & c)}");
    }

    #[test]
    fn test_fusion_of_single_elements() {
        let mut arena = TermArena::new();
        let (a, b) = (arena.atom("a"), arena.atom("b"));
        let (sa, sb) = (arena.sere(a), arena.sere(b));
        let fused = arena.fusion(sa, sb);

        let mut reducer = SereReducer::new(&mut arena, &NumberLiterals);
        let (result, changed) = reducer.remove_fusion(Some(fused));
        assert!(changed);
        assert_eq!(arena.display(result).to_string(), "{(a & b)}");
    }

    #[test]
    fn test_fusion_with_holes_is_kept() {
        let mut arena = TermArena::new();
        let (a, b) = (arena.atom("a"), arena.atom("b"));
        let sa = arena.sere(a);
        let run = arena.binary(Op::UntilBang, b, b);
        let hole = arena.sere(run);
        let fused = arena.fusion(hole, sa);

        let mut reducer = SereReducer::new(&mut arena, &NumberLiterals);
        assert_eq!(reducer.remove_fusion(Some(fused)), (Some(fused), false));
    }
}
