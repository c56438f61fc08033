//! Unrolling of the extended next-time family.
//!
//! Offsets and ranges must resolve to literals. Weak and strong nexts are not told
//! apart once lowered to the core vocabulary.

use psl_core::{Op, PslError, PslResult, TermHandle, INVALID_RANGE};
use tracing::trace;

use super::Lowering;

/// How `next_a[lo..hi]` and `next_e[lo..hi]` are unrolled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NextRangeExpansion {
    /// `X^lo (f op X (f op ... X f))`: each copy of `f` appears once.
    #[default]
    Distributed,
    /// `X^lo f op X^(lo+1) f op ... op X^hi f`.
    Flat,
}

impl Lowering<'_> {
    pub(super) fn lower_next(&mut self, term: TermHandle) -> PslResult<TermHandle> {
        let Some(next) = self.arena.as_extended_next(Some(term)) else {
            unreachable!("lower_next called on {}", self.arena.display(Some(term)));
        };
        let Some(f) = self.ltl(next.expr)? else {
            unreachable!("next-time operator without an operand");
        };
        trace!(op = %next.op, "unrolling next-time operator");

        match next.op {
            Op::X | Op::XBang | Op::Next | Op::NextBang => {
                let count = match next.when {
                    None => 1,
                    Some(when) => self.literal(term, when)?,
                };
                if count < 0 {
                    return Err(self.invalid(count, "next offset must not be negative", term));
                }
                let mut result = f;
                for _ in 0..count {
                    result = self.unary(next.op, result)?;
                }
                Ok(result)
            }
            Op::NextA | Op::NextABang | Op::NextE | Op::NextEBang => {
                let (lo, hi) = self.bounds(term, next.when)?;
                if lo < 0 {
                    return Err(self.invalid(lo, "next offset must not be negative", term));
                }
                if lo > hi {
                    return Err(self.invalid(hi, INVALID_RANGE, term));
                }
                let join = if matches!(next.op, Op::NextA | Op::NextABang) {
                    Op::And
                } else {
                    Op::Or
                };
                self.next_range(f, lo, hi, join)
            }
            _ => {
                let Some(b) = self.ltl(next.condition)? else {
                    unreachable!("next_event without a condition");
                };
                let strong = next.op.is_strong_next_event();
                let first = self.event(strong, f, b)?;
                match next.op {
                    Op::NextEvent | Op::NextEventBang => {
                        let Some(when) = next.when else {
                            return Ok(first);
                        };
                        let count = self.literal(term, when)?;
                        if count <= 0 {
                            return Err(self.invalid(
                                count,
                                "next event operators expect a positive count",
                                term,
                            ));
                        }
                        self.nth_event(strong, first, b, count - 1)
                    }
                    _ => {
                        let (lo, hi) = self.bounds(term, next.when)?;
                        for bound in [lo, hi] {
                            if bound <= 0 {
                                return Err(self.invalid(
                                    bound,
                                    "next event operators expect a positive range",
                                    term,
                                ));
                            }
                        }
                        if lo > hi {
                            return Err(self.invalid(hi, INVALID_RANGE, term));
                        }
                        let join = if matches!(next.op, Op::NextEventA | Op::NextEventABang) {
                            Op::And
                        } else {
                            Op::Or
                        };

                        let mut occurrence = self.nth_event(strong, first, b, lo - 1)?;
                        let mut result = occurrence;
                        for _ in lo..hi {
                            occurrence = self.nth_event(strong, occurrence, b, 1)?;
                            result = self.binary(join, result, occurrence)?;
                        }
                        Ok(result)
                    }
                }
            }
        }
    }

    fn next_range(&mut self, f: TermHandle, lo: i64, hi: i64, join: Op) -> PslResult<TermHandle> {
        match self.next_range {
            NextRangeExpansion::Distributed => {
                let mut result = f;
                for _ in lo..hi {
                    let later = self.unary(Op::XBang, result)?;
                    result = self.binary(join, f, later)?;
                }
                for _ in 0..lo {
                    result = self.unary(Op::XBang, result)?;
                }
                Ok(result)
            }
            NextRangeExpansion::Flat => {
                let mut shifted = f;
                for _ in 0..lo {
                    shifted = self.unary(Op::XBang, shifted)?;
                }
                let mut result = shifted;
                for _ in lo..hi {
                    shifted = self.unary(Op::XBang, shifted)?;
                    result = self.binary(join, result, shifted)?;
                }
                Ok(result)
            }
        }
    }

    /// `!b U (b & f)`, or `(!b U (b & f)) | G(!b)` for the weak forms.
    fn event(&mut self, strong: bool, f: TermHandle, b: TermHandle) -> PslResult<TermHandle> {
        let not_b = self.unary(Op::Not, b)?;
        let hit = self.binary(Op::And, b, f)?;
        let until = self.binary(Op::Until, not_b, hit)?;
        if strong {
            return Ok(until);
        }
        let never = self.unary(Op::Always, not_b)?;
        self.binary(Op::Or, until, never)
    }

    /// Waits for `more` further occurrences of `b` before `occurrence`.
    fn nth_event(
        &mut self,
        strong: bool,
        occurrence: TermHandle,
        b: TermHandle,
        more: i64,
    ) -> PslResult<TermHandle> {
        let mut result = occurrence;
        for _ in 0..more {
            let later = self.unary(Op::XBang, result)?;
            result = self.event(strong, later, b)?;
        }
        Ok(result)
    }

    fn literal(&self, term: TermHandle, expr: TermHandle) -> PslResult<i64> {
        match self.resolver.resolve_literal(self.arena, expr) {
            Some(value) => Ok(value),
            None => Err(PslError::ExpectedNumber {
                term: self.arena.display(Some(term)).to_string(),
            }),
        }
    }

    fn bounds(&self, term: TermHandle, when: Option<TermHandle>) -> PslResult<(i64, i64)> {
        let (Some(lo), Some(hi)) = (self.arena.left(when), self.arena.right(when)) else {
            return Err(PslError::ExpectedNumber {
                term: self.arena.display(Some(term)).to_string(),
            });
        };
        if !self.arena.is_op(when, Op::Range) {
            return Err(PslError::ExpectedNumber {
                term: self.arena.display(Some(term)).to_string(),
            });
        }
        Ok((self.literal(term, lo)?, self.literal(term, hi)?))
    }

    fn invalid(&self, value: i64, reason: &'static str, term: TermHandle) -> PslError {
        PslError::InvalidNumericValue {
            value,
            reason,
            term: self.arena.display(Some(term)).to_string(),
        }
    }
}
