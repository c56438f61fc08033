use psl_core::{Op, PslResult, TermHandle};

use super::{is_state_operator, Lowered, Lowering};

impl Lowering<'_> {
    pub(super) fn ltl(&mut self, term: Option<TermHandle>) -> Lowered {
        let Some(t) = term else { return Ok(None) };
        let Some(op) = self.arena.op(term) else {
            return Ok(term);
        };
        if op.is_extended_next() {
            return self.lower_next(t).map(Some);
        }

        let lowered = match op {
            Op::Ite => return self.ite(t, Self::ltl),
            Op::ReplProp => return self.replicated(t, Self::ltl),
            Op::WSelect => {
                let (l, r) = self.children(t, Self::ltl)?;
                self.arena.make(Op::BitSelection, l, r)
            }
            Op::Never => {
                let Some(f) = self.ltl(self.arena.left(term))? else {
                    unreachable!("never without an operand");
                };
                let not_f = self.unary(Op::Not, f)?;
                self.unary(Op::Always, not_f)?
            }
            Op::W
            | Op::WeakUntil
            | Op::UntilBang
            | Op::UntilInclusive
            | Op::UntilBangInclusive
            | Op::Before
            | Op::BeforeBang
            | Op::BeforeInclusive
            | Op::BeforeBangInclusive => {
                let (Some(f1), Some(f2)) = self.children(t, Self::ltl)? else {
                    unreachable!("binary temporal operator with a missing operand");
                };
                self.until_family(op, f1, f2)?
            }
            Op::EventuallyBang
            | Op::Future
            | Op::Always
            | Op::Globally
            | Op::Until
            | Op::CoreNext
            | Op::NextState => return self.convert(t, op, Self::ltl),
            _ if is_state_operator(op) => return self.convert(t, op, Self::ltl),
            _ => return Err(self.unsupported("operator not allowed in a linear-time formula", t)),
        };
        Ok(Some(lowered))
    }

    /// The weak, strong and inclusive forms of `until` and `before`, over `U` and `G`.
    fn until_family(&mut self, op: Op, f1: TermHandle, f2: TermHandle) -> PslResult<TermHandle> {
        let strong = match op {
            // f1 U f2
            Op::W | Op::WeakUntil | Op::UntilBang => self.binary(Op::Until, f1, f2)?,
            // f1 U (f1 & f2)
            Op::UntilInclusive | Op::UntilBangInclusive => {
                let both = self.binary(Op::And, f1, f2)?;
                self.binary(Op::Until, f1, both)?
            }
            // !f2 U (f1 & !f2)
            Op::Before | Op::BeforeBang => {
                let not_f2 = self.unary(Op::Not, f2)?;
                let first = self.binary(Op::And, f1, not_f2)?;
                self.binary(Op::Until, not_f2, first)?
            }
            // !f2 U f1
            Op::BeforeInclusive | Op::BeforeBangInclusive => {
                let not_f2 = self.unary(Op::Not, f2)?;
                self.binary(Op::Until, not_f2, f1)?
            }
            _ => unreachable!("{op} is not an until or before operator"),
        };

        // The weak forms also hold when the awaited event never comes.
        let waited = match op {
            Op::W | Op::WeakUntil | Op::UntilInclusive => f1,
            Op::Before | Op::BeforeInclusive => self.unary(Op::Not, f2)?,
            _ => return Ok(strong),
        };
        let forever = self.unary(Op::Always, waited)?;
        self.binary(Op::Or, strong, forever)
    }
}
