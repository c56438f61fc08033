use psl_classify::is_sere;
use psl_core::{Op, TermHandle};

use super::{Rewritten, SereReducer};
use crate::chain::{is_atomic, is_inert};

impl SereReducer<'_> {
    /// `r |-> p` becomes `!r | {r : {p}}` and `r |=> p` becomes `!r | {r ; {p}}`.
    /// Suffix implications nested in the consequent are rewritten first.
    pub(crate) fn remove_suffix_implication(&mut self, term: Option<TermHandle>) -> Rewritten {
        if is_inert(self.arena, term) || is_atomic(self.arena, term) {
            return (term, false);
        }
        let Some(suffix) = self.arena.as_suffix_implication(term) else {
            return self.descend(term, Self::remove_suffix_implication);
        };
        let (Some(premise), Some(consequent)) = (suffix.premise, suffix.consequent) else {
            unreachable!("suffix implication without operands");
        };

        let consequent = if is_sere(self.arena, Some(consequent)) {
            consequent
        } else {
            self.arena.sere(consequent)
        };
        let (consequent, _) = self.remove_suffix_implication(Some(consequent));

        let join = if suffix.op == Op::PipeMinusGt {
            Op::SereFusion
        } else {
            Op::SereConcat
        };
        let matched = self.rebuild(join, Some(premise), consequent);
        let unmatched = self.arena.unary(Op::Not, premise);
        (self.rebuild(Op::Or, Some(unmatched), matched), true)
    }
}
