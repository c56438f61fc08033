use psl_core::{Op, TermHandle};

use super::{is_state_operator, Lowered, Lowering};

impl Lowering<'_> {
    pub(super) fn ctl(&mut self, term: Option<TermHandle>) -> Lowered {
        let Some(t) = term else { return Ok(None) };
        let Some(op) = self.arena.op(term) else {
            return Ok(term);
        };
        match op {
            Op::Ite => self.ite(t, Self::ctl),
            Op::ReplProp => self.replicated(t, Self::ctl),
            Op::NextState => self.convert(t, op, Self::ctl),
            _ if op.is_obe() || is_state_operator(op) => self.convert(t, op, Self::ctl),
            _ => Err(self.unsupported("operator not allowed in a branching-time formula", t)),
        }
    }
}
