//! The lowering driver shared by the linear-time and branching-time passes.

mod ctl;
mod ltl;
mod next;

use psl_core::{LiteralResolver, Op, PslError, PslResult, Target, TermArena, TermHandle};
use psl_replicate::ReplicatorExpander;
use smallvec::SmallVec;
use tracing::warn;

pub use next::NextRangeExpansion;

type Lowered = PslResult<Option<TermHandle>>;

/// Rewrites PSL-only operators into the plain LTL/CTL vocabulary of a [`Target`].
pub struct Lowering<'a> {
    arena: &'a mut TermArena,
    resolver: &'a dyn LiteralResolver,
    target: Target,
    next_range: NextRangeExpansion,
    /// Identifiers of the replicators being expanded around the current position.
    bound: SmallVec<[TermHandle; 4]>,
}

impl<'a> Lowering<'a> {
    /// Creates a lowering into `target`. Next-time offsets and ranges are resolved with
    /// `resolver`.
    pub fn new(
        arena: &'a mut TermArena,
        resolver: &'a dyn LiteralResolver,
        target: Target,
    ) -> Self {
        Self {
            arena,
            resolver,
            target,
            next_range: NextRangeExpansion::default(),
            bound: SmallVec::new(),
        }
    }

    /// Selects how `next_a` / `next_e` ranges are unrolled.
    #[must_use]
    pub fn with_next_range_expansion(mut self, style: NextRangeExpansion) -> Self {
        self.next_range = style;
        self
    }

    /// Lowers a linear-time formula whose SEREs have already been removed.
    ///
    /// # Errors
    ///
    /// - [`PslError::ExpectedNumber`] if a next-time offset or range bound is not a
    ///   literal
    /// - [`PslError::InvalidNumericValue`] for negative offsets, non-positive event
    ///   counts and reversed ranges
    /// - [`PslError::NotSupportedFeature`] for operators outside linear-time logic
    /// - [`PslError::RepeatedReplicatorId`] for shadowing replicators
    /// - [`PslError::UnsupportedConversion`] if a symbol has no core equivalent
    pub fn lower_ltl(&mut self, term: TermHandle) -> PslResult<TermHandle> {
        let Some(lowered) = self.ltl(Some(term))? else {
            unreachable!("lowering erased a formula");
        };
        Ok(lowered)
    }

    /// Lowers a branching-time (OBE) formula.
    ///
    /// # Errors
    ///
    /// As [`lower_ltl`](Self::lower_ltl), with linear-time operators reported as
    /// [`PslError::NotSupportedFeature`].
    pub fn lower_ctl(&mut self, term: TermHandle) -> PslResult<TermHandle> {
        let Some(lowered) = self.ctl(Some(term))? else {
            unreachable!("lowering erased a formula");
        };
        Ok(lowered)
    }

    // === Builders in the target vocabulary ===

    fn unary(&mut self, op: Op, operand: TermHandle) -> PslResult<TermHandle> {
        let op = self.target.op(op)?;
        Ok(self.arena.unary(op, operand))
    }

    fn binary(&mut self, op: Op, l: TermHandle, r: TermHandle) -> PslResult<TermHandle> {
        let op = self.target.op(op)?;
        Ok(self.arena.binary(op, l, r))
    }

    /// Lowers both children of `term` with `pass` and rebuilds it with `op` converted.
    fn convert<F>(&mut self, term: TermHandle, op: Op, pass: F) -> Lowered
    where
        F: FnMut(&mut Self, Option<TermHandle>) -> Lowered,
    {
        let (l, r) = self.children(term, pass)?;
        let op = self.target.op(op)?;
        Ok(Some(self.arena.make(op, l, r)))
    }

    fn children<F>(
        &mut self,
        term: TermHandle,
        mut pass: F,
    ) -> PslResult<(Option<TermHandle>, Option<TermHandle>)>
    where
        F: FnMut(&mut Self, Option<TermHandle>) -> Lowered,
    {
        let (left, right) = (self.arena.left(Some(term)), self.arena.right(Some(term)));
        Ok((pass(self, left)?, pass(self, right)?))
    }

    /// `ite(c, t, e)` becomes `case c : t; true : e; FAILURE esac`.
    fn ite<F>(&mut self, term: TermHandle, mut pass: F) -> Lowered
    where
        F: FnMut(&mut Self, Option<TermHandle>) -> Lowered,
    {
        let Some((c, t, e)) = self.arena.as_ite(Some(term)) else {
            unreachable!("ite lowering called on another operator");
        };
        let (Some(c), Some(t), Some(e)) = (pass(self, c)?, pass(self, t)?, pass(self, e)?) else {
            unreachable!("ite with a missing arm");
        };
        let always = self.arena.make_true();
        let impossible = self.arena.failure("Impossible failure");
        let otherwise = self.arena.case(always, e, impossible);
        Ok(Some(self.arena.case(c, t, otherwise)))
    }

    /// Expands the outermost replicator of `term` and lowers the instances.
    fn replicated<F>(&mut self, term: TermHandle, mut pass: F) -> Lowered
    where
        F: FnMut(&mut Self, Option<TermHandle>) -> Lowered,
    {
        let replicator = self.arena.as_replicator(self.arena.left(Some(term)));
        let Some(id) = replicator.and_then(|r| r.id) else {
            unreachable!("replicated property without an identifier");
        };
        if self.bound.contains(&id) {
            return Err(PslError::RepeatedReplicatorId {
                id: self.arena.display(Some(id)).to_string(),
            });
        }

        let expanded = ReplicatorExpander::new(self.arena, self.resolver).expand_one(term)?;
        self.bound.push(id);
        let result = pass(self, Some(expanded));
        self.bound.pop();
        result
    }

    fn unsupported(&self, reason: &str, term: TermHandle) -> PslError {
        let rendered = self.arena.display(Some(term)).to_string();
        warn!(reason, term = %rendered, "cannot lower construct");
        PslError::NotSupportedFeature {
            reason: reason.to_owned(),
            term: rendered,
        }
    }
}

/// Operators with the same meaning in linear and branching time: identifiers,
/// arithmetic, relations, words and Boolean connectives.
fn is_state_operator(op: Op) -> bool {
    matches!(
        op,
        Op::Context
            | Op::Case
            | Op::Colon
            | Op::Array
            | Op::Dot
            | Op::Cons
            | Op::Range
            | Op::TwoDots
            | Op::Boolean
            | Op::SetIn
            | Op::Union
            | Op::Plus
            | Op::Minus
            | Op::UMinus
            | Op::Times
            | Op::Divide
            | Op::Mod
            | Op::Equal
            | Op::EqEq
            | Op::NotEqual
            | Op::Lt
            | Op::Le
            | Op::Gt
            | Op::Ge
            | Op::Xnor
            | Op::LShift
            | Op::RShift
            | Op::WordConcat
            | Op::BitSelection
            | Op::Extend
            | Op::Resize
            | Op::CastBool
            | Op::CastWord1
            | Op::CastToInt
            | Op::CastSigned
            | Op::CastUnsigned
            | Op::Not
            | Op::Tilde
            | Op::And
            | Op::Or
            | Op::PslOr
            | Op::Xor
            | Op::Caret
            | Op::Iff
            | Op::Implies
    )
}

/// Lowers a linear-time formula into `target`, unrolling next ranges the default way.
///
/// # Errors
///
/// See [`Lowering::lower_ltl`].
pub fn lower_ltl(
    arena: &mut TermArena,
    resolver: &dyn LiteralResolver,
    term: TermHandle,
    target: Target,
) -> PslResult<TermHandle> {
    Lowering::new(arena, resolver, target).lower_ltl(term)
}

/// Lowers a branching-time formula into `target`.
///
/// # Errors
///
/// See [`Lowering::lower_ctl`].
pub fn lower_ctl(
    arena: &mut TermArena,
    resolver: &dyn LiteralResolver,
    term: TermHandle,
    target: Target,
) -> PslResult<TermHandle> {
    Lowering::new(arena, resolver, target).lower_ctl(term)
}
