//! Replicator expansion.
//!
//! `forall i in S : φ` becomes `φ[i:=v1] & φ[i:=v2] & ...` and `forany` the same with
//! `|`, folded left to right in declaration order. Nested replicators are expanded
//! after their enclosing one has substituted its value into them.

use psl_classify::is_id;
use psl_core::{LiteralResolver, Op, PslError, PslResult, TermArena, TermHandle};
use smallvec::SmallVec;
use tracing::trace;

use crate::value_set::ValueSet;

/// Removes replicated properties from a formula.
pub struct ReplicatorExpander<'a> {
    arena: &'a mut TermArena,
    resolver: &'a dyn LiteralResolver,
    /// Identifiers bound by the replicators enclosing the current position.
    bound: SmallVec<[TermHandle; 4]>,
}

impl<'a> ReplicatorExpander<'a> {
    /// Creates an expander over `arena`.
    pub fn new(arena: &'a mut TermArena, resolver: &'a dyn LiteralResolver) -> Self {
        Self {
            arena,
            resolver,
            bound: SmallVec::new(),
        }
    }

    /// Expands every replicated property in `term`, recursively.
    ///
    /// # Errors
    ///
    /// - [`PslError::RepeatedReplicatorId`] if a replicator rebinds an enclosing id
    /// - [`PslError::ExpectedNumber`] / [`PslError::InvalidNumericValue`] for value
    ///   ranges whose bounds are not literals or are reversed
    /// - [`PslError::NotSupportedFeature`] for replicator index ranges
    pub fn expand_all(&mut self, term: Option<TermHandle>) -> PslResult<Option<TermHandle>> {
        let Some(t) = term else { return Ok(None) };
        if self.arena.is_leaf(term) {
            return Ok(term);
        }

        if !self.arena.is_op(term, Op::ReplProp) {
            let Some(op) = self.arena.op(term) else {
                unreachable!("interior term without an operator");
            };
            let l = self.expand_all(self.arena.left(term))?;
            let r = self.expand_all(self.arena.right(term))?;
            return Ok(Some(self.arena.make(op, l, r)));
        }

        let id = self.replicator_id(t)?;
        if self.bound.contains(&id) {
            return Err(PslError::RepeatedReplicatorId {
                id: self.arena.display(Some(id)).to_string(),
            });
        }

        self.bound.push(id);
        let result = self
            .expand_one(t)
            .and_then(|expanded| self.expand_all(Some(expanded)));
        self.bound.pop();
        result
    }

    /// Expands the outermost replicator of a replicated property, leaving any nested
    /// replicator in place.
    ///
    /// # Errors
    ///
    /// As [`expand_all`](Self::expand_all), except that nested ids are not checked.
    pub fn expand_one(&mut self, replicated: TermHandle) -> PslResult<TermHandle> {
        assert!(
            self.arena.is_op(Some(replicated), Op::ReplProp),
            "expand_one expects a replicated property"
        );
        let property = self.arena.right(Some(replicated));
        let Some(replicator) = self.arena.as_replicator(self.arena.left(Some(replicated)))
        else {
            unreachable!("replicated property without a replicator");
        };
        let Some(id) = replicator.id else {
            unreachable!("replicator without an identifier");
        };

        let values = ValueSet::normalize(self.arena, self.resolver, &replicator)?;
        trace!(
            id = %self.arena.display(Some(id)),
            values = values.len(),
            "expanding replicator"
        );

        let join = replicator.join();
        let mut result = None;
        for v in values.iter() {
            let instance = self.subst_id(property, id, v, true);
            result = match result {
                None => instance,
                Some(acc) => Some(self.arena.make(join, Some(acc), instance)),
            };
        }
        // An empty set yields the unit of the join: `true` for `forall`.
        Ok(result.unwrap_or_else(|| self.arena.constant(join == Op::And)))
    }

    fn replicator_id(&self, replicated: TermHandle) -> PslResult<TermHandle> {
        self.arena
            .as_replicator(self.arena.left(Some(replicated)))
            .and_then(|r| r.id)
            .ok_or_else(|| PslError::NotSupportedFeature {
                reason: "malformed replicator".into(),
                term: self.arena.display(Some(replicated)).to_string(),
            })
    }

    /// Replaces top-level occurrences of the identifier `id` with `v`.
    ///
    /// Inside a dotted name the components are not top level, so `i` in `m.i` is a
    /// field, not the bound variable; array indices are, so `arr[i]` is substituted.
    /// Nested replicator headers are left alone.
    fn subst_id(
        &mut self,
        expr: Option<TermHandle>,
        id: TermHandle,
        v: TermHandle,
        top: bool,
    ) -> Option<TermHandle> {
        let t = expr?;
        let op = self.arena.op(expr);
        if matches!(op, Some(Op::ForAll | Op::ForAny)) {
            return expr;
        }
        if is_id(self.arena, expr) {
            if t == id && top {
                return Some(v);
            }
            let child_top = match op {
                Some(Op::Array) => true,
                Some(Op::Dot) => false,
                _ => return expr,
            };
            let l = self.subst_id(self.arena.left(expr), id, v, child_top);
            let r = self.subst_id(self.arena.right(expr), id, v, child_top);
            return op.map(|op| self.arena.make(op, l, r));
        }
        let op = op?;
        let l = self.subst_id(self.arena.left(expr), id, v, true);
        let r = self.subst_id(self.arena.right(expr), id, v, true);
        Some(self.arena.make(op, l, r))
    }
}

/// Expands every replicated property in `term`.
///
/// # Errors
///
/// See [`ReplicatorExpander::expand_all`].
pub fn expand_replicators(
    arena: &mut TermArena,
    resolver: &dyn LiteralResolver,
    term: TermHandle,
) -> PslResult<TermHandle> {
    let expanded = ReplicatorExpander::new(arena, resolver).expand_all(Some(term))?;
    Ok(expanded.unwrap_or(term))
}
