//! The reduction driver.
//!
//! Routes a property through replicator expansion, then either the linear-time path
//! (SERE removal when needed, then lowering) or the branching-time path.

use psl_classify::{is_ltl, is_obe, Classification, Classifier};
use psl_core::{LiteralResolver, PslError, PslResult, Target, TermArena, TermHandle};
use psl_lower::{Lowering, NextRangeExpansion};
use psl_replicate::expand_replicators;
use psl_sere::SereReducer;
use tracing::debug;

/// Options for customizing a reduction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReduceOptions {
    /// How `next_a` / `next_e` ranges are unrolled.
    pub next_range_expansion: NextRangeExpansion,
    /// Properties nesting deeper than this are rejected before any pass runs.
    pub max_depth: Option<usize>,
}

impl Default for ReduceOptions {
    fn default() -> Self {
        Self {
            next_range_expansion: NextRangeExpansion::Distributed,
            max_depth: Some(4096),
        }
    }
}

/// The logic of a reduced property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CoreLogic {
    /// Core LTL.
    Ltl,
    /// Core CTL.
    Ctl,
}

/// A property reduced to the core vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CoreTerm {
    /// The reduced formula.
    pub term: TermHandle,
    /// Which engine family consumes it.
    pub logic: CoreLogic,
}

/// Reduces PSL properties to core LTL or CTL.
pub struct Reducer<'a> {
    arena: &'a mut TermArena,
    resolver: &'a dyn LiteralResolver,
    options: ReduceOptions,
}

impl<'a> Reducer<'a> {
    /// Creates a reducer with default options.
    pub fn new(arena: &'a mut TermArena, resolver: &'a dyn LiteralResolver) -> Self {
        Self::with_options(arena, resolver, ReduceOptions::default())
    }

    /// Creates a reducer with custom options.
    pub fn with_options(
        arena: &'a mut TermArena,
        resolver: &'a dyn LiteralResolver,
        options: ReduceOptions,
    ) -> Self {
        Self {
            arena,
            resolver,
            options,
        }
    }

    /// Classifies `term` without reducing it.
    ///
    /// # Errors
    ///
    /// See [`Classifier::classify`].
    pub fn classify(&self, term: TermHandle) -> PslResult<Classification> {
        Classifier::new(self.arena, self.resolver).classify(term)
    }

    /// Reduces `term` to core LTL or CTL.
    ///
    /// A property is either reduced completely or rejected; no partial result is
    /// returned.
    ///
    /// # Errors
    ///
    /// - [`PslError::NestingTooDeep`] if the property, or its form after replicator
    ///   expansion or repetition unrolling, exceeds [`ReduceOptions::max_depth`]
    /// - [`PslError::NotSupportedFeature`] if the property is neither supported
    ///   linear-time nor branching-time, naming the first unsupported construct
    /// - the malformed-input failures of replicator expansion, SERE removal and
    ///   next-time unrolling
    pub fn reduce_to_core(&mut self, term: TermHandle) -> PslResult<CoreTerm> {
        let limit = self.options.max_depth;
        self.arena.check_depth(Some(term), limit)?;
        let expanded = expand_replicators(self.arena, self.resolver, term)?;
        self.arena.check_depth(Some(expanded), limit)?;
        let handled = Classifier::new(self.arena, self.resolver).check_handled(Some(expanded));

        let reduced = match handled {
            Ok(()) => {
                let ltl = if is_ltl(self.arena, Some(expanded)) {
                    expanded
                } else {
                    let mut sere =
                        SereReducer::new(self.arena, self.resolver).with_max_depth(limit);
                    let ltl = sere.reduce(expanded)?;
                    debug!(iterations = sere.stats().iterations, "removed SEREs");
                    self.arena.check_depth(Some(ltl), limit)?;
                    ltl
                };
                let term = self.lowering().lower_ltl(ltl)?;
                CoreTerm {
                    term,
                    logic: CoreLogic::Ltl,
                }
            }
            Err(PslError::NotSupportedFeature { .. }) if is_obe(self.arena, Some(expanded)) => {
                let term = self.lowering().lower_ctl(expanded)?;
                CoreTerm {
                    term,
                    logic: CoreLogic::Ctl,
                }
            }
            Err(err) => return Err(err),
        };

        debug!(
            logic = ?reduced.logic,
            term = %self.arena.display(Some(reduced.term)),
            "reduced property"
        );
        Ok(reduced)
    }

    fn lowering(&mut self) -> Lowering<'_> {
        Lowering::new(self.arena, self.resolver, Target::Core)
            .with_next_range_expansion(self.options.next_range_expansion)
    }
}

/// Reduces `term` to core LTL or CTL with default options.
///
/// # Errors
///
/// See [`Reducer::reduce_to_core`].
pub fn reduce_to_core(
    arena: &mut TermArena,
    resolver: &dyn LiteralResolver,
    term: TermHandle,
) -> PslResult<CoreTerm> {
    Reducer::new(arena, resolver).reduce_to_core(term)
}

#[cfg(test)]
mod tests {
    use super::*;
    use psl_core::{NumberLiterals, Op};

    fn render(arena: &TermArena, reduced: CoreTerm) -> String {
        arena.display(Some(reduced.term)).to_string()
    }

    #[test]
    fn test_sere_path() {
        let mut arena = TermArena::new();
        let (a, b) = (arena.atom("a"), arena.atom("b"));
        let (sa, sb) = (arena.sere(a), arena.sere(b));
        let ab = arena.concat(sa, sb);
        let braced = arena.sere(ab);
        let always = arena.unary(Op::Always, braced);

        let reduced = reduce_to_core(&mut arena, &NumberLiterals, always).unwrap();
        assert_eq!(reduced.logic, CoreLogic::Ltl);
        assert_eq!(render(&arena, reduced), "G((a & X(b)))");
    }

    #[test]
    fn test_plain_ltl_path() {
        let mut arena = TermArena::new();
        let (p, q) = (arena.atom("p"), arena.atom("q"));
        let until = arena.binary(Op::UntilBang, p, q);
        let never = arena.unary(Op::Never, until);

        let reduced = reduce_to_core(&mut arena, &NumberLiterals, never).unwrap();
        assert_eq!(render(&arena, reduced), "G(!(p U q))");
    }

    #[test]
    fn test_propositional_property() {
        let mut arena = TermArena::new();
        let (p, q) = (arena.atom("p"), arena.atom("q"));
        let or = arena.binary(Op::PslOr, p, q);

        let reduced = reduce_to_core(&mut arena, &NumberLiterals, or).unwrap();
        assert_eq!(reduced.logic, CoreLogic::Ltl);
        assert_eq!(render(&arena, reduced), "(p | q)");
    }

    #[test]
    fn test_branching_path() {
        let mut arena = TermArena::new();
        let p = arena.atom("p");
        let ef = arena.unary(Op::Ef, p);
        let ag = arena.unary(Op::Ag, ef);

        let reduced = reduce_to_core(&mut arena, &NumberLiterals, ag).unwrap();
        assert_eq!(reduced.logic, CoreLogic::Ctl);
        assert_eq!(reduced.term, ag);
    }

    #[test]
    fn test_mixed_logics_are_rejected() {
        let mut arena = TermArena::new();
        let p = arena.atom("p");
        let ef = arena.unary(Op::Ef, p);
        let g = arena.unary(Op::Always, ef);

        let err = reduce_to_core(&mut arena, &NumberLiterals, g).unwrap_err();
        assert!(matches!(err, PslError::NotSupportedFeature { .. }));
    }

    #[test]
    fn test_unsupported_operator_is_named() {
        let mut arena = TermArena::new();
        let (p, q) = (arena.atom("p"), arena.atom("q"));
        let abort = arena.binary(Op::Abort, p, q);

        assert_eq!(
            reduce_to_core(&mut arena, &NumberLiterals, abort),
            Err(PslError::NotSupportedFeature {
                reason: "operator not currently supported".into(),
                term: "(p abort q)".into(),
            })
        );
    }

    #[test]
    fn test_depth_limit() {
        let mut arena = TermArena::new();
        let mut term = arena.atom("p");
        for _ in 0..10 {
            term = arena.unary(Op::Always, term);
        }
        let options = ReduceOptions {
            max_depth: Some(8),
            ..ReduceOptions::default()
        };

        assert_eq!(
            Reducer::with_options(&mut arena, &NumberLiterals, options).reduce_to_core(term),
            Err(PslError::NestingTooDeep {
                depth: 11,
                limit: 8
            })
        );
    }

    #[test]
    fn test_replicator_is_expanded_first() {
        let mut arena = TermArena::new();
        let (req, i) = (arena.atom("req"), arena.atom("i"));
        let body = arena.binary(Op::Array, req, i);
        let sere = arena.sere(body);
        let always = arena.unary(Op::Always, sere);
        let values = [arena.number(0), arena.number(1)];
        let list = arena.value_list(&values[..]).unwrap();
        let rep = arena.replicator(Op::ForAll, i, None, list);
        let prop = arena.replicated(rep, always);

        let reduced = reduce_to_core(&mut arena, &NumberLiterals, prop).unwrap();
        assert_eq!(render(&arena, reduced), "(G(req[0]) & G(req[1]))");
    }

    #[test]
    fn test_unrolled_count_is_checked_against_depth_limit() {
        let mut arena = TermArena::new();
        let a = arena.atom("a");
        let sa = arena.sere(a);
        let count = arena.number(20_000);
        let rep = arena.repeated(Op::Star, Some(sa), Some(count));
        assert!(arena.depth(Some(rep)) < 8);

        let err = reduce_to_core(&mut arena, &NumberLiterals, rep).unwrap_err();
        assert!(matches!(err, PslError::NestingTooDeep { limit: 4096, .. }));
    }

    #[test]
    fn test_expanded_replicator_is_checked_against_depth_limit() {
        let mut arena = TermArena::new();
        let (ok, i) = (arena.atom("ok"), arena.atom("i"));
        let body = arena.binary(Op::Array, ok, i);
        let (lo, hi) = (arena.number(0), arena.number(9_999));
        let range = arena.range(lo, hi);
        let values = arena.value_list(&[range][..]).unwrap();
        let rep = arena.replicator(Op::ForAll, i, None, values);
        let prop = arena.replicated(rep, body);

        let err = reduce_to_core(&mut arena, &NumberLiterals, prop).unwrap_err();
        assert!(matches!(err, PslError::NestingTooDeep { limit: 4096, .. }));
    }
}
