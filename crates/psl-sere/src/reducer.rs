//! The SERE reduction driver.
//!
//! Passes run in a fixed order. The one-shot passes normalize repetitions and suffix
//! implications; the merging passes then run round-robin until none of them changes
//! the term, and the chains left over are collapsed into LTL.

mod collapse;
mod disjunction;
mod merge;
mod repetition;
mod suffix;

use psl_core::{LiteralResolver, Op, PslResult, TermArena, TermHandle};
use tracing::{debug, trace};

/// A rewritten term and whether the pass changed anything. The term is absent when
/// the whole input matched only the empty sequence.
pub(crate) type Rewritten = (Option<TermHandle>, bool);

type Pass<'a> = fn(&mut SereReducer<'a>, Option<TermHandle>) -> Rewritten;

/// Counters collected over one reduction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReductionStats {
    /// Rounds of the fixed-point loop, including the final round that changed nothing.
    pub iterations: usize,
    /// Nodes added to the arena.
    pub nodes_created: usize,
}

/// Rewrites SERE-based properties into plain LTL.
pub struct SereReducer<'a> {
    arena: &'a mut TermArena,
    resolver: &'a dyn LiteralResolver,
    max_depth: Option<usize>,
    stats: ReductionStats,
}

impl<'a> SereReducer<'a> {
    /// Creates a reducer over `arena`. Repetition counts are resolved with `resolver`.
    pub fn new(arena: &'a mut TermArena, resolver: &'a dyn LiteralResolver) -> Self {
        Self {
            arena,
            resolver,
            max_depth: None,
            stats: ReductionStats::default(),
        }
    }

    /// Bounds the nesting depth of the term once repetition counts are unrolled.
    #[must_use]
    pub fn with_max_depth(mut self, limit: Option<usize>) -> Self {
        self.max_depth = limit;
        self
    }

    /// Counters of the reductions run so far.
    #[must_use]
    pub fn stats(&self) -> ReductionStats {
        self.stats
    }

    /// Removes every SERE operator from `term`.
    ///
    /// The input is expected to have passed the classifier: replicators expanded,
    /// repetition counts resolvable, no unbounded repetition at the top of a SERE.
    ///
    /// # Errors
    ///
    /// - [`PslError::ExpectedNumber`](psl_core::PslError::ExpectedNumber) if a
    ///   repetition count does not resolve to a literal
    /// - [`PslError::InvalidNumericValue`](psl_core::PslError::InvalidNumericValue) if
    ///   it is negative
    /// - [`PslError::NestingTooDeep`](psl_core::PslError::NestingTooDeep) if unrolling
    ///   the counts nests deeper than the limit set with
    ///   [`with_max_depth`](Self::with_max_depth)
    pub fn reduce(&mut self, term: TermHandle) -> PslResult<TermHandle> {
        let start = self.arena.len();

        let (t, changed) = self.expand_star_counts(Some(term))?;
        trace!(pass = "expand_star_counts", changed, "sere pass");
        self.arena.check_depth(t, self.max_depth)?;
        let t = self.step("remove_trailing_star", t, Self::remove_star_top);
        let t = self.step("remove_plus", t, Self::remove_plus_top);
        let t = self.step("remove_suffix_implication", t, Self::remove_suffix_implication);
        let t = self.run_fixed_point(t);
        let t = self.collapse(t);

        self.stats.nodes_created += self.arena.len() - start;
        Ok(t.unwrap_or_else(|| self.arena.make_true()))
    }

    fn step(
        &mut self,
        name: &'static str,
        term: Option<TermHandle>,
        pass: Pass<'a>,
    ) -> Option<TermHandle> {
        let (term, changed) = pass(self, term);
        trace!(pass = name, changed, "sere pass");
        term
    }

    fn run_fixed_point(&mut self, mut term: Option<TermHandle>) -> Option<TermHandle> {
        let passes: [(&'static str, Pass<'a>); 5] = [
            ("remove_star", Self::remove_star_top),
            ("remove_ampersand", Self::remove_ampersand),
            ("remove_2ampersand", Self::remove_2ampersand),
            ("remove_fusion", Self::remove_fusion),
            ("distribute_disjunction", Self::distribute_disjunction),
        ];

        let mut rounds = 0;
        loop {
            rounds += 1;
            let mut any = false;
            for (name, pass) in passes {
                let (next, changed) = pass(self, term);
                trace!(pass = name, changed, "sere pass");
                term = next;
                any |= changed;
            }
            if !any {
                break;
            }
        }
        debug!(rounds, "sere fixed point reached");
        self.stats.iterations += rounds;
        term
    }

    fn remove_star_top(&mut self, term: Option<TermHandle>) -> Rewritten {
        self.remove_star(term, true)
    }

    fn remove_plus_top(&mut self, term: Option<TermHandle>) -> Rewritten {
        self.remove_plus(term, true)
    }

    // === Construction helpers shared by the passes ===

    /// Rebuilds `op(l, r)` after its children were rewritten. An absent operand of a
    /// binary node leaves the other one; braces around nothing are nothing.
    fn rebuild(
        &mut self,
        op: Op,
        l: Option<TermHandle>,
        r: Option<TermHandle>,
    ) -> Option<TermHandle> {
        match (l, r) {
            (None, _) if matches!(op, Op::Sere | Op::SereCompound) => None,
            (None, None) if op.is_strictly_binary() => None,
            (Some(side), None) | (None, Some(side)) if op.is_strictly_binary() => Some(side),
            _ => Some(self.arena.make(op, l, r)),
        }
    }

    fn compound_of(
        &mut self,
        op: Op,
        l: Option<TermHandle>,
        r: Option<TermHandle>,
    ) -> Option<TermHandle> {
        match (l, r) {
            (Some(l), Some(r)) => Some(self.arena.compound(op, l, r)),
            (side, None) | (None, side) => side,
        }
    }

    /// Applies `pass` to the children of `term` and rebuilds it. Compound SEREs are
    /// entered through their operands.
    fn descend<F>(&mut self, term: Option<TermHandle>, mut pass: F) -> Rewritten
    where
        F: FnMut(&mut Self, Option<TermHandle>) -> Rewritten,
    {
        if let Some((op, l, r)) = self.arena.as_compound(term) {
            let (l, lc) = pass(self, l);
            let (r, rc) = pass(self, r);
            return (self.compound_of(op, l, r), lc || rc);
        }
        let Some(op) = self.arena.op(term) else {
            return (term, false);
        };
        let (left, right) = (self.arena.left(term), self.arena.right(term));
        let (l, lc) = pass(self, left);
        let (r, rc) = pass(self, right);
        (self.rebuild(op, l, r), lc || rc)
    }

    /// `{x & y}` from the elements `{x}` and `{y}`.
    fn point(&mut self, a: TermHandle, b: TermHandle) -> TermHandle {
        let (x, y) = (self.arena.left(Some(a)), self.arena.left(Some(b)));
        let both = self.arena.make(Op::And, x, y);
        self.arena.sere(both)
    }

    fn concat_opt(&mut self, l: Option<TermHandle>, r: Option<TermHandle>) -> Option<TermHandle> {
        self.rebuild(Op::SereConcat, l, r)
    }
}

/// Removes every SERE operator from `term`.
///
/// # Errors
///
/// See [`SereReducer::reduce`].
pub fn remove_sere(
    arena: &mut TermArena,
    resolver: &dyn LiteralResolver,
    term: TermHandle,
) -> PslResult<TermHandle> {
    SereReducer::new(arena, resolver).reduce(term)
}
