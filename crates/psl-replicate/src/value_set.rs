//! Normalized replicator value sets.

use psl_core::{
    LiteralResolver, Op, PslError, PslResult, Replicator, TermArena, TermHandle, TermNode,
    INVALID_RANGE,
};
use smallvec::SmallVec;

/// The enumerated values of a replicator, in declaration order.
///
/// Built once per expansion and consumed by it; never stored in the arena.
#[derive(Debug, Default)]
pub(crate) struct ValueSet {
    values: SmallVec<[TermHandle; 8]>,
}

impl ValueSet {
    /// Enumerates the value set of `replicator`: `boolean` becomes `FALSE, TRUE`,
    /// ranges are expanded in place, numbers and identifiers are kept.
    pub(crate) fn normalize(
        arena: &mut TermArena,
        resolver: &dyn LiteralResolver,
        replicator: &Replicator,
    ) -> PslResult<Self> {
        if replicator.range.is_some() {
            return Err(PslError::NotSupportedFeature {
                reason: "replicator index ranges are not supported".into(),
                term: arena.display(replicator.range).to_string(),
            });
        }

        let mut set = Self::default();
        if arena.is_op(replicator.values, Op::Boolean) {
            set.push_booleans(arena);
            return Ok(set);
        }

        let mut cell = replicator.values;
        while let Some(list) = cell {
            if !arena.is_op(Some(list), Op::Cons) {
                return Err(not_a_value(arena, Some(list)));
            }
            let element = arena.left(Some(list));
            set.push_element(arena, resolver, element)?;
            cell = arena.right(Some(list));
        }
        Ok(set)
    }

    fn push_booleans(&mut self, arena: &mut TermArena) {
        self.values.push(arena.make_false());
        self.values.push(arena.make_true());
    }

    fn push_element(
        &mut self,
        arena: &mut TermArena,
        resolver: &dyn LiteralResolver,
        element: Option<TermHandle>,
    ) -> PslResult<()> {
        let Some(v) = element else {
            return Err(not_a_value(arena, element));
        };
        match arena.get(v) {
            TermNode::Number(_) | TermNode::Atom(_) | TermNode::Node { op: Op::Dot, .. } => {
                self.values.push(v);
            }
            TermNode::Node { op: Op::Boolean, .. } => self.push_booleans(arena),
            TermNode::Node {
                op: Op::Range | Op::TwoDots,
                left,
                right,
            } => {
                let bound = |t: Option<TermHandle>| {
                    t.and_then(|t| resolver.resolve_literal(arena, t))
                        .ok_or_else(|| PslError::ExpectedNumber {
                            term: arena.display(t).to_string(),
                        })
                };
                let (lo, hi) = (bound(left)?, bound(right)?);
                if lo > hi {
                    return Err(PslError::InvalidNumericValue {
                        value: hi,
                        reason: INVALID_RANGE,
                        term: arena.display(element).to_string(),
                    });
                }
                self.values.extend((lo..=hi).map(|i| arena.number(i)));
            }
            _ => return Err(not_a_value(arena, element)),
        }
        Ok(())
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = TermHandle> + '_ {
        self.values.iter().copied()
    }
}

fn not_a_value(arena: &TermArena, term: Option<TermHandle>) -> PslError {
    PslError::NotSupportedFeature {
        reason: "replicator values must be numbers, identifiers, ranges or `boolean`".into(),
        term: arena.display(term).to_string(),
    }
}
