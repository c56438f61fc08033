//! A reduction session.
//!
//! The session owns the term arena, so everything it interns lives exactly as long as
//! the session does.

use psl_classify::Classification;
use psl_core::{ConstantTable, PslResult, TermArena, TermDisplay, TermHandle};
use tracing::warn;

use crate::reducer::{CoreTerm, ReduceOptions, Reducer};

/// Terms, named constants and options shared by the properties of one model.
#[derive(Debug, Default)]
pub struct Session {
    arena: TermArena,
    constants: ConstantTable,
    options: ReduceOptions,
}

impl Session {
    /// Creates a session with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session with custom options.
    #[must_use]
    pub fn with_options(options: ReduceOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// The session's terms.
    #[must_use]
    pub fn arena(&self) -> &TermArena {
        &self.arena
    }

    /// The session's terms, for building properties.
    pub fn arena_mut(&mut self) -> &mut TermArena {
        &mut self.arena
    }

    /// The options every reduction of this session uses.
    #[must_use]
    pub fn options(&self) -> &ReduceOptions {
        &self.options
    }

    /// Binds the constant `name` to `value` for repetition counts, next offsets and
    /// replicator ranges.
    pub fn define_constant(&mut self, name: &str, value: i64) {
        self.constants.define(&mut self.arena, name, value);
    }

    /// Renders `term` for diagnostics.
    #[must_use]
    pub fn display(&self, term: TermHandle) -> TermDisplay<'_> {
        self.arena.display(Some(term))
    }

    /// Classifies `term`.
    ///
    /// # Errors
    ///
    /// See [`Reducer::classify`].
    pub fn classify(&mut self, term: TermHandle) -> PslResult<Classification> {
        self.reducer().classify(term)
    }

    /// Reduces one property.
    ///
    /// # Errors
    ///
    /// See [`Reducer::reduce_to_core`].
    pub fn reduce_to_core(&mut self, term: TermHandle) -> PslResult<CoreTerm> {
        self.reducer().reduce_to_core(term)
    }

    /// Reduces every property, in order.
    ///
    /// A failing property does not stop the others: its error is logged and returned
    /// in its slot.
    pub fn reduce_properties(&mut self, properties: &[TermHandle]) -> Vec<PslResult<CoreTerm>> {
        properties
            .iter()
            .enumerate()
            .map(|(index, &property)| {
                let result = self.reduce_to_core(property);
                if let Err(err) = &result {
                    warn!(
                        index,
                        property = %self.arena.display(Some(property)),
                        error = %err,
                        "skipping property"
                    );
                }
                result
            })
            .collect()
    }

    fn reducer(&mut self) -> Reducer<'_> {
        Reducer::with_options(&mut self.arena, &self.constants, self.options.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducer::CoreLogic;
    use psl_core::{Op, PslError};

    #[test]
    fn test_constants_resolve_counts() {
        let mut session = Session::new();
        session.define_constant("DEPTH", 2);

        let arena = session.arena_mut();
        let (p, depth) = (arena.atom("p"), arena.atom("DEPTH"));
        let next = arena.extended_next(Op::XBang, p, Some(depth), None);

        let reduced = session.reduce_to_core(next).unwrap();
        assert_eq!(session.display(reduced.term).to_string(), "X(X(p))");
    }

    #[test]
    fn test_failures_do_not_stop_the_batch() {
        let mut session = Session::new();
        let arena = session.arena_mut();
        let (p, q) = (arena.atom("p"), arena.atom("q"));
        let g = arena.unary(Op::Always, p);
        let within = arena.binary(Op::Within, p, q);
        let af = arena.unary(Op::Af, q);

        let results = session.reduce_properties(&[g, within, af]);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().map(|r| r.logic), Ok(CoreLogic::Ltl));
        assert!(matches!(
            results[1],
            Err(PslError::NotSupportedFeature { .. })
        ));
        assert_eq!(results[2].as_ref().map(|r| r.logic), Ok(CoreLogic::Ctl));
    }

    #[test]
    fn test_classify() {
        let mut session = Session::new();
        let arena = session.arena_mut();
        let p = arena.atom("p");
        let not_p = arena.unary(Op::Not, p);
        let eg = arena.unary(Op::Eg, p);
        let f = arena.unary(Op::EventuallyBang, p);

        assert_eq!(session.classify(not_p), Ok(Classification::Propositional));
        assert_eq!(session.classify(f), Ok(Classification::Ltl));
        assert_eq!(session.classify(eg), Ok(Classification::Obe));
    }

    #[test]
    fn test_session_options() {
        let options = ReduceOptions {
            max_depth: None,
            ..ReduceOptions::default()
        };
        let session = Session::with_options(options.clone());
        assert_eq!(session.options(), &options);
    }

    #[test]
    fn test_overdeep_unrolling_is_skipped() {
        let mut session = Session::new();
        let arena = session.arena_mut();
        let a = arena.atom("a");
        let sa = arena.sere(a);
        let count = arena.number(20_000);
        let huge = arena.repeated(Op::Star, Some(sa), Some(count));
        let g = arena.unary(Op::Always, a);

        let results = session.reduce_properties(&[huge, g]);

        assert!(matches!(results[0], Err(PslError::NestingTooDeep { .. })));
        assert_eq!(results[1].as_ref().map(|r| r.logic), Ok(CoreLogic::Ltl));
    }
}
